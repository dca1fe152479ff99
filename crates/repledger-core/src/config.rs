use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::types::Principal;

/// Configuration fixed when a ledger is constructed.
///
/// The owner identity is never changed after construction; there is no
/// setter on the engine side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// The only principal allowed to mutate the DApp registry.
    pub owner: Principal,
    /// Maximum DApp display name length, in characters.
    #[serde(default = "default_max_name_len")]
    pub max_name_len: usize,
    /// Maximum interaction category length, in characters.
    #[serde(default = "default_max_category_len")]
    pub max_category_len: usize,
    /// Number of journal entries retained before the oldest are dropped.
    #[serde(default = "default_journal_capacity")]
    pub journal_capacity: usize,
}

fn default_max_name_len() -> usize {
    64
}
fn default_max_category_len() -> usize {
    32
}
fn default_journal_capacity() -> usize {
    10_000
}

impl LedgerConfig {
    /// Configuration with default bounds for the given owner.
    pub fn new(owner: Principal) -> Self {
        Self {
            owner,
            max_name_len: default_max_name_len(),
            max_category_len: default_max_category_len(),
            journal_capacity: default_journal_capacity(),
        }
    }

    /// Convenience constructor from the owner's textual identity.
    pub fn with_owner(owner: &str) -> Result<Self, ValidationError> {
        Ok(Self::new(Principal::new(owner)?))
    }
}
