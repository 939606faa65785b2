//! Results and records engine for speedcubing-style competitions.
//!
//! Raw attempt codes go in; best, average, round rankings, proceed cutoffs, and
//! same-day-aware record classifications come out.
//!
//! # Examples
//!
//! Scoring a round:
//! ```
//! use chrono::NaiveDate;
//! use cubestats::{
//!     attempt::Stat,
//!     core::store::ResultStore,
//!     result::ResultDraft,
//!     round::score_round,
//!     types::{ProceedRule, ProceedType, RoundFormat},
//! };
//!
//! let date = NaiveDate::from_ymd_opt(2024, 3, 9).expect("date");
//! let mut store = ResultStore::new();
//! for (person, attempts) in [(1, [900, 950, 1000, 1050, 1100]), (2, [1200, -1, 1000, 1100, 1150])] {
//!     store.insert(ResultDraft {
//!         event_id: "333".to_string(),
//!         round_id: 1,
//!         person_ids: vec![person],
//!         date,
//!         format: RoundFormat::AverageOf5,
//!         cutoff: None,
//!         attempts: attempts.to_vec(),
//!     }).expect("insert");
//! }
//!
//! let mut round = store.round_cloned(1);
//! let rule = ProceedRule { kind: ProceedType::Number, value: 1 };
//! let outcome = score_round(&mut round, Some(rule)).expect("score");
//! assert_eq!(round[0].average, Some(Stat::Value(1000)));
//! assert_eq!(outcome.advancing, vec![1]);
//! ```
//!
//! Keeping records in sync with the ledger:
//! ```
//! use chrono::NaiveDate;
//! use cubestats::{
//!     config::EngineConfig,
//!     core::store::ResultStore,
//!     engine::{projector::RecordProjector, traits::{AllResults, RecordScope}},
//!     result::ResultDraft,
//!     types::RoundFormat,
//! };
//!
//! let config = EngineConfig::default();
//! let mut projector = RecordProjector::from_config("333", &config, |_| {
//!     Box::new(AllResults) as Box<dyn RecordScope>
//! }).expect("projector");
//!
//! let mut store = ResultStore::new();
//! let (id, op) = store.insert(ResultDraft {
//!     event_id: "333".to_string(),
//!     round_id: 1,
//!     person_ids: vec![7],
//!     date: NaiveDate::from_ymd_opt(2024, 3, 9).expect("date"),
//!     format: RoundFormat::BestOf1,
//!     cutoff: None,
//!     attempts: vec![2098],
//! }).expect("insert");
//! projector.apply_stored_op(&store, &op).expect("project");
//!
//! assert_eq!(projector.labels_for(id).single.as_deref(), Some("WR"));
//! ```
#![deny(missing_docs)]

/// Attempt classification and the stat type.
pub mod attempt;
/// Record-type catalogue.
pub mod config;
/// Core in-memory result ledger and index helpers.
pub mod core;
/// Record engine, scope trait, and incremental projector.
pub mod engine;
/// Engine error taxonomy.
pub mod error;
/// Ledger op model and persistence wrapper types.
pub mod op;
/// Result records and patches.
pub mod result;
/// Per-round aggregation, ranking, and advancement.
pub mod round;
/// Shared primitive types and enums.
pub mod types;
