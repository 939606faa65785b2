use std::collections::BTreeMap;

use chrono::NaiveDate;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    config::EngineConfig,
    core::store::ResultStore,
    op::{Op, StoredOp},
    result::ContestResult,
    types::{EventId, RecordType, RecordTypeId, ResultId},
};

use super::{
    records::{
        DataIntegrityWarning, DayCheckpoint, RecordMarks, RecordPair, classify_history,
        same_day_ambiguities,
    },
    traits::RecordScope,
};

/// Failures while projecting ledger ops.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectorError {
    /// The op refers to a result the store does not hold.
    #[error("result {0} is missing from the store")]
    MissingResult(ResultId),
    /// Record types must be tracked at most once.
    #[error("record type {0} is already tracked")]
    DuplicateRecordType(RecordTypeId),
}

/// Broadest record labels held by one result.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecordLabels {
    /// Label for the single, e.g. `WR`.
    pub single: Option<String>,
    /// Label for the average.
    pub average: Option<String>,
}

#[derive(Debug, Clone, Copy)]
struct MarkEntry {
    date: NaiveDate,
    marks: RecordMarks,
}

struct Track {
    record_type: RecordType,
    scope: Box<dyn RecordScope>,
    checkpoints: Vec<DayCheckpoint>,
    marks: HashMap<ResultId, MarkEntry>,
}

impl Track {
    fn pair_before(&self, date: NaiveDate) -> RecordPair {
        self.checkpoints
            .iter()
            .rev()
            .find(|c| c.date < date)
            .map(|c| c.after)
            .unwrap_or_default()
    }

    fn truncate_from(&mut self, date: NaiveDate) {
        self.checkpoints.retain(|c| c.date < date);
        self.marks.retain(|_, entry| entry.date < date);
    }
}

/// Keeps record classifications of one event (within one record category) in sync
/// with a [`ResultStore`], one track per record type.
///
/// Each op rewinds every track to the checkpoint just before the earliest date the op
/// touches and re-runs the fold from there. The outcome is identical to
/// [`RecordProjector::rebuild_all`].
pub struct RecordProjector {
    event_id: EventId,
    tracks: Vec<Track>,
    warnings: Vec<DataIntegrityWarning>,
}

impl RecordProjector {
    /// Projector for `event_id` with no record types yet.
    pub fn new(event_id: impl Into<EventId>) -> Self {
        Self {
            event_id: event_id.into(),
            tracks: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Projector tracking every configured record type, with scopes from `scope_for`.
    pub fn from_config<F>(
        event_id: impl Into<EventId>,
        config: &EngineConfig,
        mut scope_for: F,
    ) -> Result<Self, ProjectorError>
    where
        F: FnMut(&RecordType) -> Box<dyn RecordScope>,
    {
        let mut projector = Self::new(event_id);
        for record_type in &config.record_types {
            let scope = scope_for(record_type);
            projector.track_boxed(record_type.clone(), scope)?;
        }
        Ok(projector)
    }

    /// Adds a record type whose eligible results are picked by `scope`.
    pub fn track(
        &mut self,
        record_type: RecordType,
        scope: impl RecordScope,
    ) -> Result<(), ProjectorError> {
        self.track_boxed(record_type, Box::new(scope))
    }

    fn track_boxed(
        &mut self,
        record_type: RecordType,
        scope: Box<dyn RecordScope>,
    ) -> Result<(), ProjectorError> {
        if self.tracks.iter().any(|t| t.record_type.id == record_type.id) {
            return Err(ProjectorError::DuplicateRecordType(record_type.id));
        }
        self.tracks.push(Track {
            record_type,
            scope,
            checkpoints: Vec::new(),
            marks: HashMap::new(),
        });
        Ok(())
    }

    /// Event this projector classifies.
    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    /// Folds one ledger op into the classification.
    ///
    /// Returns the date the rebuild started from, or `None` when the op does not
    /// concern this event.
    pub fn apply_stored_op(
        &mut self,
        store: &ResultStore,
        stored: &StoredOp,
    ) -> Result<Option<NaiveDate>, ProjectorError> {
        let affected = match &stored.op {
            Op::Insert { result } => self.concerns(result).then_some(result.date),
            Op::Patch { id, prev, .. } => {
                let current = store.get(*id).ok_or(ProjectorError::MissingResult(*id))?;
                let old_event = prev.event_id.as_deref().unwrap_or(current.event_id.as_str());
                let old_date = prev.date.unwrap_or(current.date);

                [
                    (old_event == self.event_id).then_some(old_date),
                    self.concerns(current).then_some(current.date),
                ]
                .into_iter()
                .flatten()
                .min()
            }
            Op::Remove { id, .. } => {
                let current = store.get(*id).ok_or(ProjectorError::MissingResult(*id))?;
                self.concerns(current).then_some(current.date)
            }
        };

        if let Some(from) = affected {
            self.rebuild_from(store, from);
        }
        Ok(affected)
    }

    /// Drops everything and re-runs the fold over the full history.
    pub fn rebuild_all(&mut self, store: &ResultStore) {
        self.rebuild_from(store, NaiveDate::MIN);
    }

    /// Re-runs the fold for all results dated on or after `from`.
    pub fn rebuild_from(&mut self, store: &ResultStore, from: NaiveDate) {
        let history: Vec<&ContestResult> = store
            .by_event(&self.event_id)
            .into_iter()
            .filter(|r| !r.removed && r.date >= from)
            .collect();

        let tracks = &self.tracks;
        let found = same_day_ambiguities(history.iter().copied().filter(|r| {
            tracks
                .iter()
                .any(|t| t.record_type.active && t.scope.is_eligible(r))
        }));
        for warning in &found {
            warn!(event = %self.event_id, %warning, "ambiguous same-day results");
        }
        self.warnings.retain(|w| w.date < from);
        self.warnings.extend(found);

        for track in &mut self.tracks {
            track.truncate_from(from);
            if !track.record_type.active {
                continue;
            }

            let start = track.pair_before(from);
            debug!(
                event = %self.event_id,
                record_type = %track.record_type.label,
                %from,
                results = history.len(),
                "rebuilding records"
            );

            let scope = &track.scope;
            let classification =
                classify_history(history.iter().copied().filter(|r| scope.is_eligible(r)), start);

            for (id, marks) in classification.marks {
                if let Some(date) = store.get(id).map(|r| r.date) {
                    track.marks.insert(id, MarkEntry { date, marks });
                }
            }
            track.checkpoints.extend(classification.checkpoints);
        }
    }

    /// Marks of a result under one record type.
    pub fn marks(&self, record_type: RecordTypeId, id: ResultId) -> RecordMarks {
        self.find_track(record_type)
            .and_then(|t| t.marks.get(&id))
            .map(|entry| entry.marks)
            .unwrap_or_default()
    }

    /// Standing record of one record type after all processed days.
    pub fn record_pair(&self, record_type: RecordTypeId) -> RecordPair {
        self.find_track(record_type)
            .and_then(|t| t.checkpoints.last())
            .map(|c| c.after)
            .unwrap_or_default()
    }

    /// Standing record of one record type strictly before `date`.
    pub fn record_pair_before(&self, record_type: RecordTypeId, date: NaiveDate) -> RecordPair {
        self.find_track(record_type)
            .map(|t| t.pair_before(date))
            .unwrap_or_default()
    }

    /// Every record mark, keyed by record type and result.
    pub fn classification(&self) -> BTreeMap<(RecordTypeId, ResultId), RecordMarks> {
        self.tracks
            .iter()
            .flat_map(|t| {
                t.marks
                    .iter()
                    .filter(|(_, entry)| entry.marks.any())
                    .map(|(id, entry)| ((t.record_type.id, *id), entry.marks))
            })
            .collect()
    }

    /// Labels of the broadest-scope record types the result holds.
    pub fn labels_for(&self, id: ResultId) -> RecordLabels {
        let broadest = |pick: fn(RecordMarks) -> bool| {
            self.tracks
                .iter()
                .filter(|t| t.record_type.active)
                .filter(|t| t.marks.get(&id).is_some_and(|entry| pick(entry.marks)))
                .min_by_key(|t| t.record_type.scope_rank)
                .map(|t| t.record_type.label.clone())
        };

        RecordLabels {
            single: broadest(|m| m.single),
            average: broadest(|m| m.average),
        }
    }

    /// Overwrites the record labels of `result` with the current classification.
    pub fn apply_labels(&self, result: &mut ContestResult) {
        let labels = self.labels_for(result.id);
        result.single_record_label = labels.single;
        result.average_record_label = labels.average;
    }

    /// Ambiguous same-day results among those eligible for any active record type,
    /// one warning per day and competitor set.
    pub fn warnings(&self) -> impl Iterator<Item = &DataIntegrityWarning> {
        self.warnings.iter()
    }

    fn concerns(&self, result: &ContestResult) -> bool {
        result.event_id == self.event_id
    }

    fn find_track(&self, record_type: RecordTypeId) -> Option<&Track> {
        self.tracks.iter().find(|t| t.record_type.id == record_type)
    }
}
