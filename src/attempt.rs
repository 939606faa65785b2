//! Attempt classification and the `best`/`average` stat type.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Raw code for an attempt skipped after a missed cutoff.
pub const RAW_SKIPPED: i64 = 0;
/// Raw code for "did not finish".
pub const RAW_DNF: i64 = -1;
/// Raw code for "did not start".
pub const RAW_DNS: i64 = -2;

/// Typed outcome of a single attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttemptOutcome {
    /// Centiseconds or move count, always positive.
    Value(u32),
    /// Not taken because a cutoff was missed.
    Skipped,
    /// Did not finish.
    Dnf,
    /// Did not start.
    Dns,
}

impl AttemptOutcome {
    /// Encodes the outcome back into its raw integer code.
    pub fn to_raw(self) -> i64 {
        match self {
            Self::Value(v) => i64::from(v),
            Self::Skipped => RAW_SKIPPED,
            Self::Dnf => RAW_DNF,
            Self::Dns => RAW_DNS,
        }
    }

    /// Numeric value, if any.
    pub fn value(self) -> Option<u32> {
        match self {
            Self::Value(v) => Some(v),
            Self::Skipped | Self::Dnf | Self::Dns => None,
        }
    }

    /// Sort key: values ascending, every non-value after them.
    pub(crate) fn quality(self) -> Stat {
        match self.value() {
            Some(v) => Stat::Value(v),
            None => Stat::Dnf,
        }
    }
}

/// Aggregated statistic: a numeric value or DNF.
///
/// The derived ordering ranks every `Value` ahead of `Dnf`, and smaller values ahead
/// of larger ones, which is exactly "better sorts first".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stat {
    /// Centiseconds or move count.
    Value(u32),
    /// No valid result.
    Dnf,
}

impl Stat {
    /// Numeric value, if any.
    pub fn value(self) -> Option<u32> {
        match self {
            Self::Value(v) => Some(v),
            Self::Dnf => None,
        }
    }

    /// True for `Value`.
    pub fn is_value(self) -> bool {
        matches!(self, Self::Value(_))
    }
}

/// Classifies one raw code without positional checks.
pub fn classify(index: usize, raw: i64) -> EngineResult<AttemptOutcome> {
    match raw {
        RAW_SKIPPED => Ok(AttemptOutcome::Skipped),
        RAW_DNF => Ok(AttemptOutcome::Dnf),
        RAW_DNS => Ok(AttemptOutcome::Dns),
        v if v > 0 => u32::try_from(v)
            .map(AttemptOutcome::Value)
            .map_err(|_| EngineError::InvalidAttemptValue {
                index,
                value: raw,
                reason: "value exceeds the representable range",
            }),
        _ => Err(EngineError::InvalidAttemptValue {
            index,
            value: raw,
            reason: "unknown negative code",
        }),
    }
}

/// Classifies a whole attempt list; skipped codes must form a trailing run.
pub fn classify_all(raw: &[i64]) -> EngineResult<Vec<AttemptOutcome>> {
    let attempts = raw
        .iter()
        .enumerate()
        .map(|(index, code)| classify(index, *code))
        .collect::<EngineResult<Vec<_>>>()?;
    check_trailing_skips(&attempts)?;
    Ok(attempts)
}

/// Rejects `Value(0)`, which no raw code classifies to.
pub fn check_positive(attempts: &[AttemptOutcome]) -> EngineResult<()> {
    match attempts.iter().position(|a| *a == AttemptOutcome::Value(0)) {
        Some(index) => Err(EngineError::InvalidAttemptValue {
            index,
            value: 0,
            reason: "value must be positive",
        }),
        None => Ok(()),
    }
}

/// Rejects a `Skipped` outcome followed by anything other than `Skipped`.
pub fn check_trailing_skips(attempts: &[AttemptOutcome]) -> EngineResult<()> {
    let Some(first_skip) = attempts.iter().position(|a| *a == AttemptOutcome::Skipped) else {
        return Ok(());
    };

    if attempts[first_skip..]
        .iter()
        .any(|a| *a != AttemptOutcome::Skipped)
    {
        return Err(EngineError::InvalidAttemptValue {
            index: first_skip,
            value: RAW_SKIPPED,
            reason: "skipped attempt is followed by a taken attempt",
        });
    }

    Ok(())
}
