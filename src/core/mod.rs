//! In-memory authoritative result ledger and index helpers.

/// Helper index aliases.
pub mod indices;
/// Authoritative result store and undo/redo engine.
pub mod store;
