//! Mutation operation model and persistence wrappers.

use serde::{Deserialize, Serialize};

use crate::{
    result::{ContestResult, ResultPatch},
    types::{OpSeq, ResultId},
};

/// Version number for serialized [`StoredOpEnvelope`] payloads.
pub const OP_FORMAT_VERSION: u16 = 1;

/// Immutable operation appended to the result ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Op {
    /// Insert a fully materialized result.
    Insert {
        /// Inserted result.
        result: ContestResult,
    },
    /// Patch a result, including precomputed inverse patch.
    Patch {
        /// Result id to mutate.
        id: ResultId,
        /// Forward patch.
        patch: ResultPatch,
        /// Inverse patch that restores prior state.
        prev: ResultPatch,
    },
    /// Toggle removed state using previous value.
    Remove {
        /// Result id to mutate.
        id: ResultId,
        /// Previous removed value.
        prev_removed: bool,
    },
}

impl Op {
    /// Id of the result the op touches.
    pub fn result_id(&self) -> ResultId {
        match self {
            Self::Insert { result } => result.id,
            Self::Patch { id, .. } | Self::Remove { id, .. } => *id,
        }
    }
}

/// Ledger row metadata plus operation payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredOp {
    /// Monotonic operation sequence.
    pub seq: OpSeq,
    /// Operation body.
    pub op: Op,
}

/// Journal line for collaborators that persist the ledger.
///
/// The store itself does no I/O. A host serializes each op from
/// [`ResultStore::drain_pending_ops`](crate::core::store::ResultStore::drain_pending_ops)
/// inside an envelope, and on startup checks `format_version` before feeding
/// `stored` back through
/// [`ResultStore::apply_replayed_op`](crate::core::store::ResultStore::apply_replayed_op).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredOpEnvelope {
    /// Payload format version.
    pub format_version: u16,
    /// Wrapped operation.
    pub stored: StoredOp,
}

impl StoredOpEnvelope {
    /// Constructs an envelope using [`OP_FORMAT_VERSION`].
    pub fn new(stored: StoredOp) -> Self {
        Self {
            format_version: OP_FORMAT_VERSION,
            stored,
        }
    }
}
