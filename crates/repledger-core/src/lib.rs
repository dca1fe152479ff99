//! Repledger Core: identities, records, error codes, and configuration
//! shared by the reputation engine and its drivers.

pub mod config;
pub mod error;
pub mod state;
pub mod types;

pub use config::LedgerConfig;
pub use error::{
    LedgerError, ValidationError, ERR_ARITHMETIC_OVERFLOW, ERR_DAPP_NOT_REGISTERED,
    ERR_INVALID_SCORE, ERR_UNAUTHORIZED, ERR_VALIDATION,
};
pub use state::{UserEvent, UserState, UserStateMachine};
pub use types::{
    DAppInfo, DAppRecord, Principal, RawScore, UserScore, UserScoreSnapshot, DEFAULT_SCORE,
    MAX_SCORE, MIN_SCORE,
};
