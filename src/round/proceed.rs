use crate::{
    error::{EngineError, EngineResult},
    result::ContestResult,
    types::{ProceedRule, ProceedType},
};

/// Maximal rank that proceeds under `rule` with `total_competitors` in the round.
pub fn proceed_cutoff_rank(rule: ProceedRule, total_competitors: usize) -> EngineResult<u32> {
    if rule.value <= 0 {
        return Err(EngineError::InvalidProceedRule {
            value: rule.value,
            reason: "value must be positive",
        });
    }

    let value = rule.value.unsigned_abs();
    let rank = match rule.kind {
        ProceedType::Number => value,
        ProceedType::Percentage => {
            if value > 100 {
                return Err(EngineError::InvalidProceedRule {
                    value: rule.value,
                    reason: "percentage exceeds 100",
                });
            }
            (total_competitors as u64 * value).div_ceil(100)
        }
    };

    Ok(u32::try_from(rank).unwrap_or(u32::MAX))
}

/// Ranked results at or above `cutoff_rank`, ties at the boundary included.
pub fn advancing(results: &[ContestResult], cutoff_rank: u32) -> impl Iterator<Item = &ContestResult> {
    results
        .iter()
        .filter(move |r| r.ranking.is_some_and(|rank| rank <= cutoff_rank))
}
