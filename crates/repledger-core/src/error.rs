use crate::types::Principal;

/// Numeric code for a caller lacking the required privilege.
pub const ERR_UNAUTHORIZED: u32 = 100;
/// Numeric code for a raw score outside `[0, 100]`.
pub const ERR_INVALID_SCORE: u32 = 101;
/// Numeric code for a reporter that is unknown or inactive.
pub const ERR_DAPP_NOT_REGISTERED: u32 = 102;
/// Numeric code for malformed registration or report input.
pub const ERR_VALIDATION: u32 = 103;
/// Numeric code for an accumulated weight that no longer fits.
pub const ERR_ARITHMETIC_OVERFLOW: u32 = 104;

/// Errors returned by ledger operations.
///
/// Every variant is recoverable and is raised before any state is touched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("unauthorized caller: {caller}")]
    Unauthorized { caller: Principal },

    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("invalid score: {0} (must be between 0 and 100)")]
    InvalidScore(i64),

    #[error("DApp not registered or inactive: {0}")]
    DAppNotRegistered(Principal),

    #[error("accumulated weight overflow for user {0}")]
    ArithmeticOverflow(Principal),
}

impl LedgerError {
    /// The numeric code external callers match on.
    pub fn code(&self) -> u32 {
        match self {
            Self::Unauthorized { .. } => ERR_UNAUTHORIZED,
            Self::InvalidScore(_) => ERR_INVALID_SCORE,
            Self::DAppNotRegistered(_) => ERR_DAPP_NOT_REGISTERED,
            Self::Validation(_) => ERR_VALIDATION,
            Self::ArithmeticOverflow(_) => ERR_ARITHMETIC_OVERFLOW,
        }
    }
}

/// Malformed input to a registration or report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid principal: {0:?}")]
    InvalidPrincipal(String),

    #[error("DApp name must not be empty")]
    EmptyName,

    #[error("DApp name is {len} chars, maximum is {max}")]
    NameTooLong { len: usize, max: usize },

    #[error("DApp weight must be a positive integer")]
    NonPositiveWeight,

    #[error("DApp weight {0} is out of range")]
    WeightOutOfRange(i64),

    #[error("DApp already registered: {0}")]
    DuplicateDApp(Principal),

    #[error("the ledger owner cannot be registered as a DApp")]
    OwnerAsDApp,

    #[error("interaction category must not be empty")]
    EmptyCategory,

    #[error("interaction category is {len} chars, maximum is {max}")]
    CategoryTooLong { len: usize, max: usize },
}
