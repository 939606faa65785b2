use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use cubestats::{
    attempt::Stat,
    core::store::ResultStore,
    engine::{
        projector::RecordProjector,
        records::{RecordPair, classify_history},
        traits::AllResults,
    },
    result::{ContestResult, ResultDraft},
    round::{aggregate::aggregate_raw, rank::rank_results},
    types::{RecordType, RoundFormat},
};

fn day(i: u64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2010, 1, 1)
        .and_then(|d| d.checked_add_days(chrono::Days::new(i / 20)))
        .expect("date")
}

fn attempts(i: u64) -> Vec<i64> {
    let base = 800 + i64::try_from(i % 700).expect("fits");
    vec![base, base + 37, if i % 11 == 0 { -1 } else { base + 12 }, base + 90, base - 5]
}

fn draft(i: u64) -> ResultDraft {
    ResultDraft {
        event_id: "333".to_string(),
        round_id: i / 100,
        person_ids: vec![u32::try_from(i % 5_000).expect("fits")],
        date: day(i),
        format: RoundFormat::AverageOf5,
        cutoff: None,
        attempts: attempts(i),
    }
}

fn result(i: u64) -> ContestResult {
    let (attempts, agg) =
        aggregate_raw(&attempts(i), RoundFormat::AverageOf5, None).expect("aggregate");
    ContestResult {
        id: i + 1,
        event_id: "333".to_string(),
        round_id: 1,
        person_ids: vec![u32::try_from(i).expect("fits")],
        date: day(i),
        format: RoundFormat::AverageOf5,
        cutoff: None,
        attempts,
        best: agg.best,
        average: agg.average,
        ranking: None,
        single_record_label: None,
        average_record_label: None,
        removed: false,
    }
}

fn bench_aggregate(c: &mut Criterion) {
    let raw: Vec<Vec<i64>> = (0..10_000).map(attempts).collect();
    c.bench_function("aggregate_ao5_10k", |b| {
        b.iter(|| {
            raw.iter()
                .map(|a| aggregate_raw(a, RoundFormat::AverageOf5, None).expect("aggregate").1)
                .filter(|agg| agg.average != Some(Stat::Dnf))
                .count()
        });
    });
}

fn bench_ranking(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_round");
    for n in [100usize, 1_000, 10_000] {
        let round: Vec<ContestResult> = (0..n as u64).map(result).collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &round, |b, round| {
            b.iter(|| {
                let mut round = round.clone();
                rank_results(&mut round);
                round
            });
        });
    }
    group.finish();
}

fn bench_record_fold(c: &mut Criterion) {
    let history: Vec<ContestResult> = (0..50_000).map(result).collect();
    c.bench_function("classify_history_50k", |b| {
        b.iter(|| classify_history(&history, RecordPair::default()).end);
    });
}

fn bench_incremental_projection(c: &mut Criterion) {
    c.bench_function("store_insert_project_5k", |b| {
        b.iter(|| {
            let mut store = ResultStore::new();
            let mut projector = RecordProjector::new("333");
            projector
                .track(
                    RecordType {
                        id: 1,
                        label: "WR".to_string(),
                        scope_rank: 0,
                        active: true,
                    },
                    AllResults,
                )
                .expect("track");
            for i in 0..5_000u64 {
                let (_, op) = store.insert(draft(i)).expect("insert");
                projector.apply_stored_op(&store, &op).expect("project");
            }
        });
    });
}

criterion_group!(
    benches,
    bench_aggregate,
    bench_ranking,
    bench_record_fold,
    bench_incremental_projection
);
criterion_main!(benches);
