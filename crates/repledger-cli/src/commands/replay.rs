//! `repledger replay`: apply a JSON transaction batch to a fresh ledger.

use clap::Args;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use repledger_core::{DAppInfo, LedgerConfig, UserScoreSnapshot};
use repledger_engine::{BlockHeightClock, ReputationLedger, SystemClock};

use crate::batch::{self, Batch, Transaction};
use crate::config::{ClockConfig, ClockKind};

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Path to the batch file (JSON).
    pub batch: PathBuf,

    /// Print the final registry and user scores after the batch.
    #[arg(long)]
    pub dump: bool,

    /// Print the audit journal after the batch.
    #[arg(long)]
    pub journal: bool,
}

#[derive(Serialize)]
struct FinalState {
    dapps: BTreeMap<String, DAppInfo>,
    users: BTreeMap<String, UserScoreSnapshot>,
}

/// Build a ledger for the configured clock. The block clock is returned
/// separately so `advance_clock` transactions can drive it.
pub fn build_ledger(
    ledger_config: LedgerConfig,
    clock: &ClockConfig,
) -> (ReputationLedger, Option<Arc<BlockHeightClock>>) {
    match clock.kind {
        ClockKind::Block => {
            let block_clock = Arc::new(BlockHeightClock::new(clock.start_height));
            let ledger = ReputationLedger::new(ledger_config, block_clock.clone());
            (ledger, Some(block_clock))
        }
        ClockKind::System => (ReputationLedger::new(ledger_config, Arc::new(SystemClock)), None),
    }
}

pub fn run(
    ledger_config: LedgerConfig,
    clock: &ClockConfig,
    args: &ReplayArgs,
) -> anyhow::Result<()> {
    let contents = std::fs::read_to_string(&args.batch)?;
    let batch: Batch = serde_json::from_str(&contents)?;
    tracing::info!(
        path = %args.batch.display(),
        transactions = batch.transactions.len(),
        "replaying batch"
    );

    let (ledger, block_clock) = build_ledger(ledger_config, clock);
    let results = batch::replay(&ledger, block_clock.as_deref(), &batch);

    for result in &results {
        println!("{}", serde_json::to_string(result)?);
    }

    let failed = results.iter().filter(|r| !r.ok).count();
    tracing::info!(applied = results.len() - failed, failed, "batch complete");

    if args.dump {
        println!("{}", serde_json::to_string_pretty(&final_state(&ledger, &batch))?);
    }
    if args.journal {
        for entry in ledger.journal().entries() {
            println!("{}", serde_json::to_string(&entry)?);
        }
    }
    Ok(())
}

/// Registry contents plus every user the batch mentions.
fn final_state(ledger: &ReputationLedger, batch: &Batch) -> FinalState {
    let dapps = ledger
        .dapps()
        .into_iter()
        .filter_map(|id| ledger.get_dapp_info(&id).map(|info| (id.to_string(), info)))
        .collect();

    let users = batch
        .transactions
        .iter()
        .filter_map(|tx| match tx {
            Transaction::ReportInteraction { user, .. } | Transaction::GetUserScore { user } => {
                Some(user)
            }
            _ => None,
        })
        .map(|user| (user.to_string(), ledger.get_user_score(user)))
        .collect();

    FinalState { dapps, users }
}
