use std::cmp::Ordering;

use crate::result::ContestResult;

use super::compare::compare_results;

/// Standard competition ranks for an already sorted sequence (e.g. 1, 1, 3, 4).
pub fn competition_ranks<T>(sorted: &[T], mut cmp: impl FnMut(&T, &T) -> Ordering) -> Vec<u32> {
    let mut ranks: Vec<u32> = Vec::with_capacity(sorted.len());

    for (pos, item) in sorted.iter().enumerate() {
        let rank = match (pos.checked_sub(1).and_then(|p| sorted.get(p)), ranks.last()) {
            (Some(prev), Some(prev_rank)) if cmp(prev, item) == Ordering::Equal => *prev_rank,
            _ => u32::try_from(pos + 1).unwrap_or(u32::MAX),
        };
        ranks.push(rank);
    }

    ranks
}

/// Sorts a round's results best-to-worst (stable) and assigns `ranking`.
pub fn rank_results(results: &mut [ContestResult]) {
    results.sort_by(compare_results);
    let ranks = competition_ranks(results, compare_results);
    for (result, rank) in results.iter_mut().zip(ranks) {
        result.ranking = Some(rank);
    }
}
