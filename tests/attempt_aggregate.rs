use cubestats::{
    attempt::{AttemptOutcome, Stat, classify, classify_all},
    error::EngineError,
    round::aggregate::{aggregate, aggregate_raw, cutoff_met},
    types::{Cutoff, RoundFormat},
};

use AttemptOutcome::{Dnf, Dns, Skipped, Value};

#[test]
fn raw_codes_classify_to_outcomes() {
    assert_eq!(classify(0, 1234).unwrap(), Value(1234));
    assert_eq!(classify(0, 0).unwrap(), Skipped);
    assert_eq!(classify(0, -1).unwrap(), Dnf);
    assert_eq!(classify(0, -2).unwrap(), Dns);

    for outcome in [Value(42), Skipped, Dnf, Dns] {
        assert_eq!(classify(0, outcome.to_raw()).unwrap(), outcome);
    }
}

#[test]
fn out_of_range_codes_are_rejected() {
    assert!(matches!(
        classify(3, -3),
        Err(EngineError::InvalidAttemptValue { index: 3, value: -3, .. })
    ));
    assert!(matches!(
        classify(0, i64::from(u32::MAX) + 1),
        Err(EngineError::InvalidAttemptValue { .. })
    ));
}

#[test]
fn skipped_must_be_a_trailing_run() {
    assert_eq!(
        classify_all(&[900, 0, 0]).unwrap(),
        vec![Value(900), Skipped, Skipped]
    );
    assert!(matches!(
        classify_all(&[900, 0, 950]),
        Err(EngineError::InvalidAttemptValue { index: 1, value: 0, .. })
    ));
    assert!(matches!(
        classify_all(&[0, 900]),
        Err(EngineError::InvalidAttemptValue { index: 0, .. })
    ));
}

#[test]
fn average_of_5_drops_best_and_worst() {
    let (_, agg) = aggregate_raw(&[900, 950, 1000, 1050, 1100], RoundFormat::AverageOf5, None).unwrap();
    assert_eq!(agg.best, Stat::Value(900));
    assert_eq!(agg.average, Some(Stat::Value(1000)));
}

#[test]
fn average_of_5_rounds_to_nearest_unit() {
    // 1001 + 1002 + 1002 = 3005 -> 1001.67
    let (_, agg) = aggregate_raw(&[1000, 1001, 1002, 1002, 1003], RoundFormat::AverageOf5, None).unwrap();
    assert_eq!(agg.average, Some(Stat::Value(1002)));

    // 1000 + 1000 + 1001 = 3001 -> 1000.33
    let (_, agg) = aggregate_raw(&[999, 1000, 1000, 1001, 1500], RoundFormat::AverageOf5, None).unwrap();
    assert_eq!(agg.average, Some(Stat::Value(1000)));
}

#[test]
fn average_of_5_survives_one_dnf() {
    let (_, agg) = aggregate_raw(&[-1, 950, 1000, 1050, 1200], RoundFormat::AverageOf5, None).unwrap();
    assert_eq!(agg.best, Stat::Value(950));
    assert_eq!(agg.average, Some(Stat::Value(1083)));

    let (_, agg) = aggregate_raw(&[-2, 950, 1000, 1050, 1200], RoundFormat::AverageOf5, None).unwrap();
    assert_eq!(agg.average, Some(Stat::Value(1083)));
}

#[test]
fn average_of_5_with_two_dnfs_is_dnf() {
    let (_, agg) = aggregate_raw(&[-1, 950, 1000, 1050, -1], RoundFormat::AverageOf5, None).unwrap();
    assert_eq!(agg.best, Stat::Value(950));
    assert_eq!(agg.average, Some(Stat::Dnf));

    let (_, agg) = aggregate_raw(&[-1, 950, -2, 1050, 1100], RoundFormat::AverageOf5, None).unwrap();
    assert_eq!(agg.average, Some(Stat::Dnf));
}

#[test]
fn mean_of_3_rounds_and_never_drops() {
    let (_, agg) = aggregate_raw(&[44, 39, 46], RoundFormat::MeanOf3, None).unwrap();
    assert_eq!(agg.best, Stat::Value(39));
    assert_eq!(agg.average, Some(Stat::Value(43)));

    let (_, agg) = aggregate_raw(&[44, 40, 46], RoundFormat::MeanOf3, None).unwrap();
    assert_eq!(agg.average, Some(Stat::Value(43)));

    let (_, agg) = aggregate_raw(&[44, -1, 46], RoundFormat::MeanOf3, None).unwrap();
    assert_eq!(agg.best, Stat::Value(44));
    assert_eq!(agg.average, Some(Stat::Dnf));
}

#[test]
fn best_of_formats_have_no_average() {
    let (_, agg) = aggregate_raw(&[-1, 3120, 2950], RoundFormat::BestOf3, None).unwrap();
    assert_eq!(agg.best, Stat::Value(2950));
    assert_eq!(agg.average, None);

    let (_, agg) = aggregate_raw(&[-1, -2], RoundFormat::BestOf2, None).unwrap();
    assert_eq!(agg.best, Stat::Dnf);
    assert_eq!(agg.average, None);

    let (_, agg) = aggregate_raw(&[-2], RoundFormat::BestOf1, None).unwrap();
    assert_eq!(agg.best, Stat::Dnf);
}

#[test]
fn wrong_attempt_count_without_cutoff_is_incomplete() {
    assert!(matches!(
        aggregate_raw(&[900, 950, 1000], RoundFormat::AverageOf5, None),
        Err(EngineError::IncompleteAttempts { expected: 5, actual: 3, .. })
    ));
    assert!(matches!(
        aggregate_raw(&[900, 950], RoundFormat::BestOf1, None),
        Err(EngineError::IncompleteAttempts { expected: 1, actual: 2, .. })
    ));
    assert!(matches!(
        aggregate_raw(&[900, 950, 0, 0, 0], RoundFormat::AverageOf5, None),
        Err(EngineError::IncompleteAttempts { .. })
    ));
}

#[test]
fn missed_cutoff_truncates_or_skips_remaining_attempts() {
    let cutoff = Some(Cutoff {
        required_attempts: 2,
        threshold_value: 6000,
    });

    let (attempts, agg) = aggregate_raw(&[6100, -1, 0, 0, 0], RoundFormat::AverageOf5, cutoff).unwrap();
    assert_eq!(attempts, vec![Value(6100), Dnf, Skipped, Skipped, Skipped]);
    assert_eq!(agg.best, Stat::Value(6100));
    assert_eq!(agg.average, Some(Stat::Dnf));

    let (_, agg) = aggregate_raw(&[6100, 6200], RoundFormat::AverageOf5, cutoff).unwrap();
    assert_eq!(agg.best, Stat::Value(6100));
    assert_eq!(agg.average, Some(Stat::Dnf));
}

#[test]
fn threshold_must_be_beaten_strictly() {
    let cutoff = Cutoff {
        required_attempts: 2,
        threshold_value: 6000,
    };
    assert!(!cutoff_met(&[Value(6000), Dnf], cutoff));
    assert!(cutoff_met(&[Value(6000), Value(5999)], cutoff));
    assert!(!cutoff_met(&[Dnf, Dnf, Value(10)], cutoff));
}

#[test]
fn cutoff_inconsistencies_are_incomplete() {
    let cutoff = Some(Cutoff {
        required_attempts: 2,
        threshold_value: 6000,
    });

    // met, yet attempts are missing
    assert!(matches!(
        aggregate_raw(&[5000, 6100, 0, 0, 0], RoundFormat::AverageOf5, cutoff),
        Err(EngineError::IncompleteAttempts { .. })
    ));
    // missed, yet a third attempt was taken
    assert!(matches!(
        aggregate_raw(&[6100, 6200, 5000, 0, 0], RoundFormat::AverageOf5, cutoff),
        Err(EngineError::IncompleteAttempts { .. })
    ));
    // missed before the cutoff attempts were even done
    assert!(matches!(
        aggregate_raw(&[6100], RoundFormat::AverageOf5, cutoff),
        Err(EngineError::IncompleteAttempts { .. })
    ));
}

#[test]
fn met_cutoff_requires_all_attempts() {
    let cutoff = Some(Cutoff {
        required_attempts: 2,
        threshold_value: 6000,
    });
    let (_, agg) = aggregate_raw(&[6100, 5900, 5800, 5700, 5600], RoundFormat::AverageOf5, cutoff).unwrap();
    assert_eq!(agg.average, Some(Stat::Value(5800)));
}

#[test]
fn aggregate_rejects_misplaced_skips_in_typed_input() {
    assert!(matches!(
        aggregate(&[Value(900), Skipped, Value(950)], RoundFormat::BestOf3, None),
        Err(EngineError::InvalidAttemptValue { .. })
    ));
}

#[test]
fn typed_zero_value_is_rejected() {
    assert!(matches!(
        aggregate(&[Value(0)], RoundFormat::BestOf1, None),
        Err(EngineError::InvalidAttemptValue { index: 0, value: 0, .. })
    ));
    assert!(matches!(
        aggregate(&[Value(900), Dnf, Value(0)], RoundFormat::MeanOf3, None),
        Err(EngineError::InvalidAttemptValue { index: 2, .. })
    ));
}

#[test]
fn cutoff_requiring_no_attempts_is_rejected() {
    let cutoff = Some(Cutoff {
        required_attempts: 0,
        threshold_value: 6000,
    });
    assert!(matches!(
        aggregate(&[Skipped, Skipped, Skipped, Skipped, Skipped], RoundFormat::AverageOf5, cutoff),
        Err(EngineError::IncompleteAttempts { .. })
    ));
    assert!(matches!(
        aggregate_raw(&[900, 950, 1000, 1050, 1100], RoundFormat::AverageOf5, cutoff),
        Err(EngineError::IncompleteAttempts { .. })
    ));
}
