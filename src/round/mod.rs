//! Per-round aggregation, ordering, ranking, and advancement.

/// Best/average derivation and attempt-count validation.
pub mod aggregate;
/// Total order between results.
pub mod compare;
/// Proceed (advancement) cutoff.
pub mod proceed;
/// Competition-style ranking.
pub mod rank;

use serde::{Deserialize, Serialize};

use crate::{
    error::EngineResult,
    result::ContestResult,
    types::{ProceedRule, ResultId},
};

/// Outcome of scoring a whole round.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoundOutcome {
    /// Number of ranked (non-removed) results.
    pub competitors: usize,
    /// Maximal rank that proceeds, when a rule was given.
    pub cutoff_rank: Option<u32>,
    /// Ids of the advancing results, best first.
    pub advancing: Vec<ResultId>,
}

/// Ranks a round in place and, given a rule, works out who proceeds.
///
/// Removed results are moved to the end and left unranked.
pub fn score_round(
    results: &mut [ContestResult],
    rule: Option<ProceedRule>,
) -> EngineResult<RoundOutcome> {
    results.sort_by_key(|r| r.removed);
    let competitors = results.iter().filter(|r| !r.removed).count();
    let (ranked, removed) = results.split_at_mut(competitors);

    rank::rank_results(ranked);
    for result in removed.iter_mut() {
        result.ranking = None;
    }

    let Some(rule) = rule else {
        return Ok(RoundOutcome {
            competitors,
            ..RoundOutcome::default()
        });
    };

    let cutoff_rank = proceed::proceed_cutoff_rank(rule, competitors)?;
    let advancing = proceed::advancing(ranked, cutoff_rank).map(|r| r.id).collect();

    Ok(RoundOutcome {
        competitors,
        cutoff_rank: Some(cutoff_rank),
        advancing,
    })
}
