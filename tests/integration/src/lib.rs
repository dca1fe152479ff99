//! Shared fixtures for the Repledger integration tests.

use std::sync::Arc;

use repledger_core::{LedgerConfig, Principal};
use repledger_engine::{BlockHeightClock, ReputationLedger};

pub const OWNER: &str = "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM";
pub const DAPP: &str = "ST2PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM";
pub const USER: &str = "ST3PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM";

/// Parse a principal, panicking on malformed test input.
pub fn principal(id: &str) -> Principal {
    Principal::new(id).unwrap_or_else(|e| panic!("bad test principal {id:?}: {e}"))
}

/// A ledger owned by [`OWNER`] on a block clock starting at height 1.
pub fn ledger() -> (Arc<ReputationLedger>, Arc<BlockHeightClock>) {
    let clock = Arc::new(BlockHeightClock::new(1));
    let ledger = ReputationLedger::new(LedgerConfig::new(principal(OWNER)), clock.clone());
    (Arc::new(ledger), clock)
}

/// A ledger with [`DAPP`] registered at weight 10 as "Test DApp".
pub fn ledger_with_dapp() -> (Arc<ReputationLedger>, Arc<BlockHeightClock>) {
    let (ledger, clock) = ledger();
    ledger
        .register_dapp(&principal(OWNER), &principal(DAPP), "Test DApp", 10)
        .unwrap_or_else(|e| panic!("fixture registration failed: {e}"));
    (ledger, clock)
}
