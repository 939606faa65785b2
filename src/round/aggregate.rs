use serde::{Deserialize, Serialize};

use crate::{
    attempt::{self, AttemptOutcome, Stat},
    error::{EngineError, EngineResult},
    types::{Cutoff, RoundFormat},
};

/// Derived statistics of one result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggregate {
    /// Best single.
    pub best: Stat,
    /// Average or mean; `None` for best-of formats.
    pub average: Option<Stat>,
}

/// Classifies raw codes and aggregates them in one step.
pub fn aggregate_raw(
    raw: &[i64],
    format: RoundFormat,
    cutoff: Option<Cutoff>,
) -> EngineResult<(Vec<AttemptOutcome>, Aggregate)> {
    let attempts = attempt::classify_all(raw)?;
    let agg = aggregate(&attempts, format, cutoff)?;
    Ok((attempts, agg))
}

/// Computes `best` and `average` after validating the attempt list.
pub fn aggregate(
    attempts: &[AttemptOutcome],
    format: RoundFormat,
    cutoff: Option<Cutoff>,
) -> EngineResult<Aggregate> {
    validate_attempts(attempts, format, cutoff)?;

    let best = attempts
        .iter()
        .filter_map(|a| a.value())
        .min()
        .map_or(Stat::Dnf, Stat::Value);

    let average = match format {
        RoundFormat::AverageOf5 => Some(average_of(attempts, format.required_attempts(), 1)),
        RoundFormat::MeanOf3 => Some(average_of(attempts, format.required_attempts(), 0)),
        RoundFormat::BestOf3 | RoundFormat::BestOf2 | RoundFormat::BestOf1 => None,
    };

    Ok(Aggregate { best, average })
}

/// True when a qualifying value was produced within the cutoff attempts.
pub fn cutoff_met(attempts: &[AttemptOutcome], cutoff: Cutoff) -> bool {
    attempts
        .iter()
        .take(cutoff.required_attempts)
        .filter_map(|a| a.value())
        .any(|v| v < cutoff.threshold_value)
}

/// Checks values, skip placement, and attempt count against the format and cutoff.
///
/// Typed attempts (e.g. from a patch) never went through [`attempt::classify`], so
/// positivity is checked here too.
pub fn validate_attempts(
    attempts: &[AttemptOutcome],
    format: RoundFormat,
    cutoff: Option<Cutoff>,
) -> EngineResult<()> {
    attempt::check_positive(attempts)?;
    attempt::check_trailing_skips(attempts)?;

    let expected = format.required_attempts();
    let actual = attempts.len();
    let incomplete = |reason| EngineError::IncompleteAttempts {
        expected,
        actual,
        reason,
    };

    if actual > expected {
        return Err(incomplete("more attempts than the format allows"));
    }
    if cutoff.is_some_and(|c| c.required_attempts == 0) {
        return Err(incomplete("cutoff must require at least one attempt"));
    }

    let taken = attempts
        .iter()
        .take_while(|a| **a != AttemptOutcome::Skipped)
        .count();

    let Some(cutoff) = cutoff.filter(|c| c.required_attempts < expected) else {
        return if taken == expected {
            Ok(())
        } else {
            Err(incomplete("no cutoff explains the missing attempts"))
        };
    };

    if cutoff_met(attempts, cutoff) {
        if taken != expected {
            return Err(incomplete("cutoff was met but attempts are missing"));
        }
    } else if taken < cutoff.required_attempts {
        return Err(incomplete("attempts before the cutoff are missing"));
    } else if taken > cutoff.required_attempts {
        return Err(incomplete("cutoff was missed but later attempts were taken"));
    }

    Ok(())
}

/// Drops `trim` outcomes from each end and averages the rest.
///
/// Attempts truncated away by a cutoff count as non-values, like skipped ones.
fn average_of(attempts: &[AttemptOutcome], required: usize, trim: usize) -> Stat {
    let mut sorted: Vec<Stat> = attempts.iter().map(|a| a.quality()).collect();
    sorted.resize(required, Stat::Dnf);

    let non_values = sorted.iter().filter(|s| !s.is_value()).count();
    if non_values > trim {
        return Stat::Dnf;
    }

    sorted.sort_unstable();
    let counted = &sorted[trim..required - trim];
    let sum: u64 = counted
        .iter()
        .filter_map(|s| s.value())
        .map(u64::from)
        .sum();

    let n = counted.len() as u64;
    u32::try_from((sum + n / 2) / n)
        .map(Stat::Value)
        .unwrap_or(Stat::Dnf)
}
