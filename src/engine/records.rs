use chrono::NaiveDate;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    attempt::Stat,
    result::ContestResult,
    types::{PersonId, ResultId},
};

/// Running record state: what a result must match or beat to be a record.
///
/// `Dnf` means no record exists yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordPair {
    /// Standing single record.
    pub best_so_far: Stat,
    /// Standing average record.
    pub average_so_far: Stat,
}

impl Default for RecordPair {
    fn default() -> Self {
        Self {
            best_so_far: Stat::Dnf,
            average_so_far: Stat::Dnf,
        }
    }
}

/// Whether a result's single and average are records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RecordMarks {
    /// The single is a record.
    pub single: bool,
    /// The average is a record.
    pub average: bool,
}

impl RecordMarks {
    /// True when either stat is a record.
    pub fn any(self) -> bool {
        self.single || self.average
    }
}

/// Record state right after all results of `date` were processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCheckpoint {
    /// Processed day.
    pub date: NaiveDate,
    /// Record state after that day.
    pub after: RecordPair,
}

/// The same competitors have several results on one day, whose order is unknown.
///
/// Non-fatal: the day is still classified as a batch.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("competitors {person_ids:?} have {} results on {date} with no known order", .result_ids.len())]
pub struct DataIntegrityWarning {
    /// Day of the ambiguous results.
    pub date: NaiveDate,
    /// Sorted competitor ids shared by the results.
    pub person_ids: Vec<PersonId>,
    /// The ambiguous results.
    pub result_ids: Vec<ResultId>,
}

/// Output of [`classify_history`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Classification {
    /// Marks for every classified result, records or not.
    pub marks: HashMap<ResultId, RecordMarks>,
    /// One checkpoint per processed day, in date order.
    pub checkpoints: Vec<DayCheckpoint>,
    /// Record state after the last processed day.
    pub end: RecordPair,
    /// Ambiguous same-day results met along the way.
    pub warnings: Vec<DataIntegrityWarning>,
}

impl Classification {
    /// Marks of one result; unclassified results hold no record.
    pub fn marks_for(&self, id: ResultId) -> RecordMarks {
        self.marks.get(&id).copied().unwrap_or_default()
    }
}

/// Classifies a scope-filtered history for one event and record type.
///
/// `start` is the record state valid strictly before the earliest date in `history`.
/// Results are grouped by day; within a day every result tying the day's best is
/// marked when that best matches or beats the record standing before the day.
pub fn classify_history<'a, I>(history: I, start: RecordPair) -> Classification
where
    I: IntoIterator<Item = &'a ContestResult>,
{
    let mut sorted: Vec<&ContestResult> = history.into_iter().collect();
    sorted.sort_by_key(|r| r.date);

    let mut out = Classification {
        end: start,
        ..Classification::default()
    };

    for day in sorted.chunk_by(|a, b| a.date == b.date) {
        let Some(date) = day.first().map(|r| r.date) else {
            continue;
        };

        let day_best_single = day.iter().map(|r| r.best).min().unwrap_or(Stat::Dnf);
        let day_best_average = day
            .iter()
            .filter_map(|r| r.average)
            .min()
            .unwrap_or(Stat::Dnf);

        let single_is_record = beats_or_ties(day_best_single, out.end.best_so_far);
        let average_is_record = beats_or_ties(day_best_average, out.end.average_so_far);

        for result in day {
            let marks = RecordMarks {
                single: single_is_record && result.best == day_best_single,
                average: average_is_record && result.average == Some(day_best_average),
            };
            out.marks.insert(result.id, marks);
        }

        out.warnings.extend(ambiguous_same_day(date, day));

        out.end = RecordPair {
            best_so_far: out.end.best_so_far.min(day_best_single),
            average_so_far: out.end.average_so_far.min(day_best_average),
        };
        out.checkpoints.push(DayCheckpoint {
            date,
            after: out.end,
        });
    }

    out
}

/// Ambiguous same-day results of `history`, ordered by day and then competitors.
pub fn same_day_ambiguities<'a, I>(history: I) -> Vec<DataIntegrityWarning>
where
    I: IntoIterator<Item = &'a ContestResult>,
{
    let mut sorted: Vec<&ContestResult> = history.into_iter().collect();
    sorted.sort_by_key(|r| r.date);

    sorted
        .chunk_by(|a, b| a.date == b.date)
        .filter_map(|day| day.first().map(|r| ambiguous_same_day(r.date, day)))
        .flatten()
        .collect()
}

/// Only numeric values can set or tie a record.
fn beats_or_ties(candidate: Stat, standing: Stat) -> bool {
    candidate.is_value() && candidate <= standing
}

fn ambiguous_same_day(date: NaiveDate, day: &[&ContestResult]) -> Vec<DataIntegrityWarning> {
    let mut by_persons: HashMap<Vec<PersonId>, Vec<ResultId>> = HashMap::new();
    for result in day {
        let mut persons = result.person_ids.clone();
        persons.sort_unstable();
        by_persons.entry(persons).or_default().push(result.id);
    }

    let mut warnings: Vec<DataIntegrityWarning> = by_persons
        .into_iter()
        .filter(|(_, ids)| ids.len() > 1)
        .map(|(person_ids, result_ids)| DataIntegrityWarning {
            date,
            person_ids,
            result_ids,
        })
        .collect();
    warnings.sort_by(|a, b| a.person_ids.cmp(&b.person_ids));
    warnings
}
