use crate::result::ContestResult;

/// Decides which results count towards one record type.
///
/// The caller owns the scope: a national record type, for example, accepts only
/// results of competitors representing that nation.
pub trait RecordScope: Send + Sync + 'static {
    /// True when `result` counts towards the record type.
    fn is_eligible(&self, result: &ContestResult) -> bool;
}

/// Scope that accepts every result.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllResults;

impl RecordScope for AllResults {
    fn is_eligible(&self, _result: &ContestResult) -> bool {
        true
    }
}

impl<F> RecordScope for F
where
    F: Fn(&ContestResult) -> bool + Send + Sync + 'static,
{
    fn is_eligible(&self, result: &ContestResult) -> bool {
        self(result)
    }
}
