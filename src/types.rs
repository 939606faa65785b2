//! Shared primitive IDs and round-configuration enums.

use serde::{Deserialize, Serialize};

/// Monotonic result identifier.
pub type ResultId = u64;
/// Monotonic operation sequence number.
pub type OpSeq = u64;
/// Event identifier (e.g. `333`, `333fm`).
pub type EventId = String;
/// Round identifier, unique within a contest.
pub type RoundId = u64;
/// Competitor identifier.
pub type PersonId = u32;
/// Record type identifier.
pub type RecordTypeId = u32;

/// How the attempts of a round are aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundFormat {
    /// Five attempts, best and worst dropped.
    AverageOf5,
    /// Three attempts, plain mean.
    MeanOf3,
    /// Best of three attempts.
    BestOf3,
    /// Best of two attempts.
    BestOf2,
    /// Single attempt.
    BestOf1,
}

impl RoundFormat {
    /// Number of attempts a competitor is entitled to.
    pub const fn required_attempts(self) -> usize {
        match self {
            Self::AverageOf5 => 5,
            Self::MeanOf3 | Self::BestOf3 => 3,
            Self::BestOf2 => 2,
            Self::BestOf1 => 1,
        }
    }

    /// True when the round produces an average (or mean).
    pub const fn is_averaged(self) -> bool {
        matches!(self, Self::AverageOf5 | Self::MeanOf3)
    }
}

/// Cutoff that must be met within the first attempts to unlock the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cutoff {
    /// Attempts in which a qualifying result must be produced.
    pub required_attempts: usize,
    /// A `Value` strictly below this qualifies.
    pub threshold_value: u32,
}

/// How the proceed cutoff of a round is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProceedType {
    /// Fixed number of competitors.
    Number,
    /// Percentage of all competitors, rounded up.
    Percentage,
}

/// Rule deciding who advances to the next round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProceedRule {
    /// Interpretation of `value`.
    pub kind: ProceedType,
    /// Count or percentage.
    pub value: i64,
}

/// A kind of record, e.g. world, continental, or national.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordType {
    /// Stable identifier.
    pub id: RecordTypeId,
    /// Label attached to results holding this record, e.g. `WR`.
    pub label: String,
    /// Breadth of the scope; smaller is broader.
    pub scope_rank: u32,
    /// Inactive record types are never awarded.
    pub active: bool,
}
