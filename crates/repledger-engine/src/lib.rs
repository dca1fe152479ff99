//! Repledger Engine
//!
//! The reputation state-transition engine:
//! - DApp registry guarded by a single-owner access controller
//! - Admission checks for interaction reports
//! - Weighted incremental score aggregation with per-user serialization
//! - Append-only audit journal of accepted operations
//! - The `ReputationLedger` façade tying them together

pub mod access;
pub mod clock;
pub mod journal;
pub mod ledger;
pub mod registry;
pub mod score;
pub mod validator;

pub use access::AccessController;
pub use clock::{BlockHeightClock, Clock, SystemClock};
pub use journal::{Journal, JournalEntry, LedgerEvent};
pub use ledger::ReputationLedger;
pub use registry::DAppRegistry;
pub use score::ScoreEngine;
