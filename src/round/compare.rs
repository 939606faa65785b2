use std::cmp::Ordering;

use crate::{attempt::Stat, result::ContestResult, types::RoundFormat};

/// Orders two (best, average) pairs best-first.
///
/// Averaged formats compare the average and fall back to the single; best-of formats
/// compare the single only. `Equal` means a tie.
pub fn compare_stats(
    format: RoundFormat,
    (a_best, a_average): (Stat, Stat),
    (b_best, b_average): (Stat, Stat),
) -> Ordering {
    let by_best = a_best.cmp(&b_best);
    if format.is_averaged() {
        a_average.cmp(&b_average).then(by_best)
    } else {
        by_best
    }
}

/// Orders two results of the same round best-first, using the format of `a`.
pub fn compare_results(a: &ContestResult, b: &ContestResult) -> Ordering {
    compare_stats(
        a.format,
        (a.best, a.average_or_dnf()),
        (b.best, b.average_or_dnf()),
    )
}

/// True when the two results tie under [`compare_results`].
pub fn is_tie(a: &ContestResult, b: &ContestResult) -> bool {
    compare_results(a, b) == Ordering::Equal
}
