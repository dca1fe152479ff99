//! Transaction batches replayed against a local ledger.
//!
//! A batch is a JSON document `{ "transactions": [ ... ] }`; each
//! transaction is tagged by `op`. Results are produced one per
//! transaction, in order, and never abort the batch.

use serde::{Deserialize, Serialize};

use repledger_core::{DAppInfo, LedgerError, Principal, UserScoreSnapshot, ValidationError};
use repledger_engine::{BlockHeightClock, ReputationLedger};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Batch {
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Transaction {
    RegisterDapp {
        caller: Principal,
        dapp: Principal,
        name: String,
        /// Signed so non-positive weights surface as validation errors
        /// instead of parse failures.
        weight: i64,
    },
    ReportInteraction {
        dapp: Principal,
        user: Principal,
        score: i64,
        category: String,
    },
    SetDappActive {
        caller: Principal,
        dapp: Principal,
        active: bool,
    },
    UpdateDappWeight {
        caller: Principal,
        dapp: Principal,
        weight: i64,
    },
    GetDappInfo {
        dapp: Principal,
    },
    GetUserScore {
        user: Principal,
    },
    /// Only meaningful with the block clock; ignored otherwise.
    AdvanceClock {
        blocks: u64,
    },
}

impl Transaction {
    pub fn op(&self) -> &'static str {
        match self {
            Self::RegisterDapp { .. } => "register_dapp",
            Self::ReportInteraction { .. } => "report_interaction",
            Self::SetDappActive { .. } => "set_dapp_active",
            Self::UpdateDappWeight { .. } => "update_dapp_weight",
            Self::GetDappInfo { .. } => "get_dapp_info",
            Self::GetUserScore { .. } => "get_user_score",
            Self::AdvanceClock { .. } => "advance_clock",
        }
    }
}

/// Successful transaction payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    Done,
    Snapshot(UserScoreSnapshot),
    DApp(Option<DAppInfo>),
    Height(u64),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub code: u32,
    pub message: String,
}

impl From<&LedgerError> for ErrorBody {
    fn from(err: &LedgerError) -> Self {
        Self {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

/// One line of replay output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TxResult {
    pub index: usize,
    pub op: &'static str,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Outcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

/// Narrow a batch weight for the engine.
///
/// Values outside `u32` become zero, so the engine rejects them after its
/// own authorization check. Only the owner gets `WeightOutOfRange` for an
/// over-large weight; everyone else sees `Unauthorized`.
fn weight_arg(
    ledger: &ReputationLedger,
    caller: &Principal,
    weight: i64,
) -> Result<u32, LedgerError> {
    match u32::try_from(weight) {
        Ok(weight) => Ok(weight),
        Err(_) if weight > 0 && caller == ledger.owner() => {
            Err(ValidationError::WeightOutOfRange(weight).into())
        }
        Err(_) => Ok(0),
    }
}

/// Apply one transaction to the ledger.
pub fn apply(
    ledger: &ReputationLedger,
    block_clock: Option<&BlockHeightClock>,
    tx: &Transaction,
) -> Result<Outcome, LedgerError> {
    match tx {
        Transaction::RegisterDapp {
            caller,
            dapp,
            name,
            weight,
        } => {
            ledger.register_dapp(caller, dapp, name, weight_arg(ledger, caller, *weight)?)?;
            Ok(Outcome::Done)
        }
        Transaction::ReportInteraction {
            dapp,
            user,
            score,
            category,
        } => ledger
            .report_interaction(dapp, user, *score, category)
            .map(Outcome::Snapshot),
        Transaction::SetDappActive {
            caller,
            dapp,
            active,
        } => {
            ledger.set_dapp_active(caller, dapp, *active)?;
            Ok(Outcome::Done)
        }
        Transaction::UpdateDappWeight {
            caller,
            dapp,
            weight,
        } => {
            ledger.update_dapp_weight(caller, dapp, weight_arg(ledger, caller, *weight)?)?;
            Ok(Outcome::Done)
        }
        Transaction::GetDappInfo { dapp } => Ok(Outcome::DApp(ledger.get_dapp_info(dapp))),
        Transaction::GetUserScore { user } => Ok(Outcome::Snapshot(ledger.get_user_score(user))),
        Transaction::AdvanceClock { blocks } => match block_clock {
            Some(clock) => Ok(Outcome::Height(clock.advance(*blocks))),
            None => {
                tracing::warn!("advance_clock ignored: ledger is on the system clock");
                Ok(Outcome::Done)
            }
        },
    }
}

/// Replay a whole batch, collecting one result per transaction.
pub fn replay(
    ledger: &ReputationLedger,
    block_clock: Option<&BlockHeightClock>,
    batch: &Batch,
) -> Vec<TxResult> {
    batch
        .transactions
        .iter()
        .enumerate()
        .map(|(index, tx)| match apply(ledger, block_clock, tx) {
            Ok(outcome) => TxResult {
                index,
                op: tx.op(),
                ok: true,
                result: Some(outcome),
                error: None,
            },
            Err(err) => {
                tracing::debug!(index, op = tx.op(), code = err.code(), error = %err, "transaction failed");
                TxResult {
                    index,
                    op: tx.op(),
                    ok: false,
                    result: None,
                    error: Some(ErrorBody::from(&err)),
                }
            }
        })
        .collect()
}
