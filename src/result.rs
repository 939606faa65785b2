//! Result record, draft, and patch types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    attempt::{AttemptOutcome, Stat},
    types::{Cutoff, EventId, PersonId, ResultId, RoundFormat, RoundId},
};

/// Fully materialized, authoritative result of one competitor (or team) in a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContestResult {
    /// Stable result identifier.
    pub id: ResultId,
    /// Event in which the result was achieved.
    pub event_id: EventId,
    /// Round the result belongs to.
    pub round_id: RoundId,
    /// Competitor ids; more than one for team events.
    pub person_ids: Vec<PersonId>,
    /// Day on which the result was achieved.
    pub date: NaiveDate,
    /// Format of the round.
    pub format: RoundFormat,
    /// Cutoff of the round, if any.
    pub cutoff: Option<Cutoff>,
    /// Classified attempts, possibly truncated by a missed cutoff.
    pub attempts: Vec<AttemptOutcome>,
    /// Best single.
    pub best: Stat,
    /// Average or mean; `None` for best-of formats.
    pub average: Option<Stat>,
    /// Rank within the round, once ranked.
    pub ranking: Option<u32>,
    /// Broadest record label held by `best`.
    pub single_record_label: Option<String>,
    /// Broadest record label held by `average`.
    pub average_record_label: Option<String>,
    /// True when the result has been removed.
    pub removed: bool,
}

impl ContestResult {
    /// Average, with best-of formats and missing averages treated as DNF.
    pub fn average_or_dnf(&self) -> Stat {
        self.average.unwrap_or(Stat::Dnf)
    }

    /// Raw attempt codes, as collaborators store them.
    pub fn raw_attempts(&self) -> Vec<i64> {
        self.attempts.iter().map(|a| a.to_raw()).collect()
    }
}

/// Insert payload used to create a new [`ContestResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultDraft {
    /// Event in which the result was achieved.
    pub event_id: EventId,
    /// Round the result belongs to.
    pub round_id: RoundId,
    /// Competitor ids.
    pub person_ids: Vec<PersonId>,
    /// Day on which the result was achieved.
    pub date: NaiveDate,
    /// Format of the round.
    pub format: RoundFormat,
    /// Cutoff of the round, if any.
    pub cutoff: Option<Cutoff>,
    /// Raw attempt codes.
    pub attempts: Vec<i64>,
}

/// Sparse patch where each `Some` field overwrites the record value.
///
/// Derived stats are never patched; the store recomputes them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResultPatch {
    /// Optional replacement for event id.
    pub event_id: Option<EventId>,
    /// Optional replacement for round id.
    pub round_id: Option<RoundId>,
    /// Optional replacement for competitor ids.
    pub person_ids: Option<Vec<PersonId>>,
    /// Optional replacement for date.
    pub date: Option<NaiveDate>,
    /// Optional replacement for format.
    pub format: Option<RoundFormat>,
    /// Optional replacement for cutoff; `Some(None)` clears it.
    pub cutoff: Option<Option<Cutoff>>,
    /// Optional replacement for attempts.
    pub attempts: Option<Vec<AttemptOutcome>>,
    /// Optional replacement for removed flag.
    pub removed: Option<bool>,
}

impl ResultPatch {
    /// Returns true when no fields are set.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// True when applying the patch requires re-aggregating attempts.
    pub fn touches_attempts(&self) -> bool {
        self.format.is_some() || self.cutoff.is_some() || self.attempts.is_some()
    }

    /// Captures an inverse patch for all fields present in `self`.
    pub fn capture_inverse_for(&self, rec: &ContestResult) -> Self {
        Self {
            event_id: self.event_id.as_ref().map(|_| rec.event_id.clone()),
            round_id: self.round_id.map(|_| rec.round_id),
            person_ids: self.person_ids.as_ref().map(|_| rec.person_ids.clone()),
            date: self.date.map(|_| rec.date),
            format: self.format.map(|_| rec.format),
            cutoff: self.cutoff.map(|_| rec.cutoff),
            attempts: self.attempts.as_ref().map(|_| rec.attempts.clone()),
            removed: self.removed.map(|_| rec.removed),
        }
    }

    /// Applies this patch in place to `rec`, leaving derived stats untouched.
    pub fn apply_to(&self, rec: &mut ContestResult) {
        if let Some(v) = &self.event_id {
            rec.event_id = v.clone();
        }
        if let Some(v) = self.round_id {
            rec.round_id = v;
        }
        if let Some(v) = &self.person_ids {
            rec.person_ids = v.clone();
        }
        if let Some(v) = self.date {
            rec.date = v;
        }
        if let Some(v) = self.format {
            rec.format = v;
        }
        if let Some(v) = self.cutoff {
            rec.cutoff = v;
        }
        if let Some(v) = &self.attempts {
            rec.attempts = v.clone();
        }
        if let Some(v) = self.removed {
            rec.removed = v;
        }
    }
}
