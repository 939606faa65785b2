//! Record attribution over chronological history.

/// Projector that keeps record classifications up to date with the ledger.
pub mod projector;
/// Same-day-aware record fold.
pub mod records;
/// Record scope trait.
pub mod traits;
