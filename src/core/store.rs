use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

use crate::{
    error::EngineError,
    op::{Op, StoredOp},
    result::{ContestResult, ResultDraft, ResultPatch},
    round::aggregate,
    types::{EventId, OpSeq, PersonId, ResultId, RoundId},
};

use super::indices::{VecIndex, index_insert, index_remove};

/// Failures of ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No result with this id.
    #[error("result {0} does not exist")]
    MissingResult(ResultId),
    /// A result with this id is already stored.
    #[error("result {0} already exists")]
    AlreadyExists(ResultId),
    /// `person_ids` is empty.
    #[error("a result needs at least one competitor")]
    NoCompetitors,
    /// Attempts were rejected by the engine.
    #[error(transparent)]
    Engine(#[from] EngineError),
    /// Undo stack is empty.
    #[error("nothing to undo")]
    NothingToUndo,
    /// Redo stack is empty.
    #[error("nothing to redo")]
    NothingToRedo,
}

/// Serializable image of a [`ResultStore`], without undo history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshotV1 {
    /// Id the next insert will receive.
    pub next_result_id: ResultId,
    /// Sequence the next op will receive.
    pub next_op_seq: OpSeq,
    /// Insertion order.
    pub order: Vec<ResultId>,
    /// Results in insertion order.
    pub results: Vec<ContestResult>,
}

/// Authoritative in-memory result ledger with undo/redo.
///
/// Every mutation yields a [`StoredOp`] for the caller to persist and to feed into a
/// record projector.
#[derive(Debug, Default)]
pub struct ResultStore {
    results: HashMap<ResultId, ContestResult>,
    order: Vec<ResultId>,
    by_event: VecIndex<EventId>,
    by_person: VecIndex<PersonId>,
    by_round: VecIndex<RoundId>,
    undo: Vec<Op>,
    redo: Vec<Op>,
    pending_ops: Vec<StoredOp>,
    next_op_seq: OpSeq,
    next_result_id: ResultId,
}

impl ResultStore {
    /// Empty store; ids and sequences start at 1.
    pub fn new() -> Self {
        Self {
            next_op_seq: 1,
            next_result_id: 1,
            ..Self::default()
        }
    }

    /// Rebuilds a store from a snapshot.
    pub fn from_snapshot(snapshot: StoreSnapshotV1) -> Result<Self, StoreError> {
        let mut store = Self {
            next_result_id: snapshot.next_result_id,
            next_op_seq: snapshot.next_op_seq,
            order: snapshot.order,
            ..Self::default()
        };

        for res in snapshot.results {
            if store.results.contains_key(&res.id) {
                return Err(StoreError::AlreadyExists(res.id));
            }
            store.insert_indices(&res);
            store.results.insert(res.id, res);
        }

        if let Some(id) = store.order.iter().find(|id| !store.results.contains_key(*id)) {
            return Err(StoreError::MissingResult(*id));
        }

        Ok(store)
    }

    /// Captures the current results for persistence.
    pub fn export_snapshot(&self) -> StoreSnapshotV1 {
        let results = self
            .order
            .iter()
            .filter_map(|id| self.results.get(id).cloned())
            .collect();

        StoreSnapshotV1 {
            next_result_id: self.next_result_id,
            next_op_seq: self.next_op_seq,
            order: self.order.clone(),
            results,
        }
    }

    /// Classifies and aggregates a draft, then stores it.
    pub fn insert(&mut self, draft: ResultDraft) -> Result<(ResultId, StoredOp), StoreError> {
        if draft.person_ids.is_empty() {
            return Err(StoreError::NoCompetitors);
        }
        let (attempts, agg) = aggregate::aggregate_raw(&draft.attempts, draft.format, draft.cutoff)?;

        let id = self.next_result_id;
        self.next_result_id += 1;

        let result = ContestResult {
            id,
            event_id: draft.event_id,
            round_id: draft.round_id,
            person_ids: draft.person_ids,
            date: draft.date,
            format: draft.format,
            cutoff: draft.cutoff,
            attempts,
            best: agg.best,
            average: agg.average,
            ranking: None,
            single_record_label: None,
            average_record_label: None,
            removed: false,
        };

        let (stored, inverse) = self.apply_insert(result)?;
        self.undo.push(inverse);
        self.redo.clear();
        self.pending_ops.push(stored.clone());
        Ok((id, stored))
    }

    /// Applies a sparse edit; derived stats are recomputed when attempts change.
    pub fn patch(&mut self, id: ResultId, patch: ResultPatch) -> Result<((), StoredOp), StoreError> {
        let (stored, inverse) = self.apply_patch(id, patch)?;
        self.undo.push(inverse);
        self.redo.clear();
        self.pending_ops.push(stored.clone());
        Ok(((), stored))
    }

    /// Toggles the removed flag.
    pub fn remove(&mut self, id: ResultId) -> Result<((), StoredOp), StoreError> {
        let prev_removed = self
            .results
            .get(&id)
            .ok_or(StoreError::MissingResult(id))?
            .removed;
        let (stored, inverse) = self.apply_remove(id, prev_removed)?;
        self.undo.push(inverse);
        self.redo.clear();
        self.pending_ops.push(stored.clone());
        Ok(((), stored))
    }

    /// Reverts the latest mutation.
    pub fn undo(&mut self) -> Result<((), StoredOp), StoreError> {
        let op = self.undo.pop().ok_or(StoreError::NothingToUndo)?;
        let (stored, inverse) = self.apply_op(op)?;
        self.redo.push(inverse);
        self.pending_ops.push(stored.clone());
        Ok(((), stored))
    }

    /// Re-applies the latest undone mutation.
    pub fn redo(&mut self) -> Result<((), StoredOp), StoreError> {
        let op = self.redo.pop().ok_or(StoreError::NothingToRedo)?;
        let (stored, inverse) = self.apply_op(op)?;
        self.undo.push(inverse);
        self.pending_ops.push(stored.clone());
        Ok(((), stored))
    }

    /// Applies an op read back from a journal; clears undo history.
    pub fn apply_replayed_op(&mut self, stored: StoredOp) -> Result<(), StoreError> {
        let seq = stored.seq;
        match stored.op {
            Op::Insert { result } => {
                self.apply_insert_with_seq(result, seq)?;
            }
            Op::Patch { id, patch, .. } => {
                self.apply_patch_with_seq(id, patch, seq)?;
            }
            Op::Remove { id, prev_removed } => {
                self.apply_remove_with_seq(id, prev_removed, seq)?;
            }
        }
        self.undo.clear();
        self.redo.clear();
        Ok(())
    }

    /// Results of an event, removed ones included.
    pub fn by_event(&self, event_id: &str) -> Vec<&ContestResult> {
        self.resolve(self.by_event.get(event_id))
    }

    /// Results a competitor took part in, removed ones included.
    pub fn by_person(&self, person_id: PersonId) -> Vec<&ContestResult> {
        self.resolve(self.by_person.get(&person_id))
    }

    /// Results of a round, removed ones included.
    pub fn by_round(&self, round_id: RoundId) -> Vec<&ContestResult> {
        self.resolve(self.by_round.get(&round_id))
    }

    /// Non-removed results of a round, cloned so they can be ranked in place.
    pub fn round_cloned(&self, round_id: RoundId) -> Vec<ContestResult> {
        self.by_round(round_id)
            .into_iter()
            .filter(|r| !r.removed)
            .cloned()
            .collect()
    }

    /// Takes the ops produced since the last drain.
    ///
    /// The caller appends them to whatever journal it keeps; replaying that journal
    /// through [`ResultStore::apply_replayed_op`] reproduces the store.
    pub fn drain_pending_ops(&mut self) -> Vec<StoredOp> {
        std::mem::take(&mut self.pending_ops)
    }

    fn resolve(&self, ids: Option<&Vec<ResultId>>) -> Vec<&ContestResult> {
        ids.into_iter()
            .flat_map(|ids| ids.iter())
            .filter_map(|id| self.results.get(id))
            .collect()
    }

    fn apply_op(&mut self, op: Op) -> Result<(StoredOp, Op), StoreError> {
        match op {
            Op::Insert { result } => self.apply_insert(result),
            Op::Patch { id, patch, .. } => self.apply_patch(id, patch),
            Op::Remove { id, prev_removed } => self.apply_remove(id, prev_removed),
        }
    }

    fn apply_insert(&mut self, result: ContestResult) -> Result<(StoredOp, Op), StoreError> {
        let seq = self.take_next_op_seq();
        self.apply_insert_with_seq(result, seq)
    }

    fn apply_insert_with_seq(&mut self, result: ContestResult, seq: OpSeq) -> Result<(StoredOp, Op), StoreError> {
        if self.results.contains_key(&result.id) {
            return Err(StoreError::AlreadyExists(result.id));
        }

        let id = result.id;
        trace!(id, event = %result.event_id, date = %result.date, seq, "insert result");
        self.next_result_id = self.next_result_id.max(id.saturating_add(1));
        self.insert_indices(&result);
        self.order.push(id);
        self.results.insert(id, result.clone());

        self.bump_next_seq_from(seq);
        let stored = StoredOp {
            seq,
            op: Op::Insert { result },
        };
        let inverse = Op::Remove {
            id,
            prev_removed: false,
        };
        Ok((stored, inverse))
    }

    fn apply_patch(&mut self, id: ResultId, patch: ResultPatch) -> Result<(StoredOp, Op), StoreError> {
        let seq = self.take_next_op_seq();
        self.apply_patch_with_seq(id, patch, seq)
    }

    fn apply_patch_with_seq(&mut self, id: ResultId, patch: ResultPatch, seq: OpSeq) -> Result<(StoredOp, Op), StoreError> {
        let old = self.results.get(&id).ok_or(StoreError::MissingResult(id))?;

        let mut new = old.clone();
        patch.apply_to(&mut new);
        if new.person_ids.is_empty() {
            return Err(StoreError::NoCompetitors);
        }
        if patch.touches_attempts() {
            let agg = aggregate::aggregate(&new.attempts, new.format, new.cutoff)?;
            if agg.best != new.best || agg.average != new.average {
                new.ranking = None;
                new.single_record_label = None;
                new.average_record_label = None;
            }
            new.best = agg.best;
            new.average = agg.average;
        }
        if new.round_id != old.round_id {
            new.ranking = None;
        }

        let prev = patch.capture_inverse_for(old);
        trace!(id, seq, "patch result");

        if new.event_id != old.event_id
            || new.round_id != old.round_id
            || new.person_ids != old.person_ids
        {
            let old = old.clone();
            self.remove_indices(&old);
            self.insert_indices(&new);
        }
        self.results.insert(id, new);

        self.bump_next_seq_from(seq);
        let stored = StoredOp {
            seq,
            op: Op::Patch {
                id,
                patch: patch.clone(),
                prev: prev.clone(),
            },
        };
        let inverse = Op::Patch {
            id,
            patch: prev,
            prev: patch,
        };
        Ok((stored, inverse))
    }

    fn apply_remove(&mut self, id: ResultId, prev_removed: bool) -> Result<(StoredOp, Op), StoreError> {
        let seq = self.take_next_op_seq();
        self.apply_remove_with_seq(id, prev_removed, seq)
    }

    fn apply_remove_with_seq(&mut self, id: ResultId, prev_removed: bool, seq: OpSeq) -> Result<(StoredOp, Op), StoreError> {
        let new_removed = {
            let res = self.results.get_mut(&id).ok_or(StoreError::MissingResult(id))?;
            res.removed = !prev_removed;
            res.removed
        };
        trace!(id, seq, removed = new_removed, "toggle removed");

        self.bump_next_seq_from(seq);
        let stored = StoredOp {
            seq,
            op: Op::Remove { id, prev_removed },
        };
        let inverse = Op::Remove {
            id,
            prev_removed: new_removed,
        };
        Ok((stored, inverse))
    }

    fn insert_indices(&mut self, res: &ContestResult) {
        index_insert(&mut self.by_event, res.event_id.clone(), res.id);
        index_insert(&mut self.by_round, res.round_id, res.id);
        for person in &res.person_ids {
            index_insert(&mut self.by_person, *person, res.id);
        }
    }

    fn remove_indices(&mut self, res: &ContestResult) {
        index_remove(&mut self.by_event, &res.event_id, res.id);
        index_remove(&mut self.by_round, &res.round_id, res.id);
        for person in &res.person_ids {
            index_remove(&mut self.by_person, person, res.id);
        }
    }

    fn take_next_op_seq(&mut self) -> OpSeq {
        let seq = self.next_op_seq;
        self.next_op_seq += 1;
        seq
    }

    fn bump_next_seq_from(&mut self, seq: OpSeq) {
        self.next_op_seq = self.next_op_seq.max(seq.saturating_add(1));
    }
}

#[allow(missing_docs)]
impl ResultStore {
    pub fn get(&self, id: ResultId) -> Option<&ContestResult> {
        self.results.get(&id)
    }

    pub fn get_cloned(&self, id: ResultId) -> Option<ContestResult> {
        self.get(id).cloned()
    }

    pub fn ordered_ids(&self) -> &[ResultId] {
        &self.order
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    pub fn latest_op_seq(&self) -> OpSeq {
        self.next_op_seq.saturating_sub(1)
    }
}
