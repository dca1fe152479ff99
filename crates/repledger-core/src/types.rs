use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{LedgerError, ValidationError};

/// Lowest raw score an interaction report may carry.
pub const MIN_SCORE: i64 = 0;
/// Highest raw score an interaction report may carry.
pub const MAX_SCORE: i64 = 100;
/// Score shown for users with no accepted interactions.
///
/// This is a display value only: it never takes part in aggregation.
pub const DEFAULT_SCORE: u8 = 50;

/// An opaque account identity (owner, DApp, or user).
///
/// Principals are compared byte-for-byte; surrounding whitespace is
/// rejected rather than trimmed so `"alice"` and `" alice"` never alias.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Principal(String);

impl Principal {
    /// Create a principal from its textual form.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() || id.trim() != id {
            return Err(ValidationError::InvalidPrincipal(id));
        }
        Ok(Self(id))
    }

    /// The textual form of the principal.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Principal {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Principal {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Principal> for String {
    fn from(p: Principal) -> Self {
        p.0
    }
}

/// A raw interaction score that has passed bounds checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct RawScore(u8);

impl RawScore {
    /// Validate a caller-supplied score. Anything outside `[0, 100]` is
    /// rejected with [`LedgerError::InvalidScore`].
    pub fn new(value: i64) -> Result<Self, LedgerError> {
        if !(MIN_SCORE..=MAX_SCORE).contains(&value) {
            return Err(LedgerError::InvalidScore(value));
        }
        Ok(Self(value as u8))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

/// A DApp authorized (or formerly authorized) to report interactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DAppRecord {
    /// Immutable identity of the DApp.
    pub id: Principal,
    /// Display name, bounded by the configured maximum length.
    pub name: String,
    /// Influence factor applied to every report from this DApp.
    pub weight: u32,
    /// Inactive DApps stay registered but may not report.
    pub is_active: bool,
    /// Clock reading at registration time.
    pub registered_at: u64,
}

impl DAppRecord {
    /// The public read shape of this record.
    pub fn info(&self) -> DAppInfo {
        DAppInfo {
            name: self.name.clone(),
            weight: self.weight,
            is_active: self.is_active,
        }
    }
}

/// Public view of a registered DApp, as returned by `get_dapp_info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DAppInfo {
    pub name: String,
    pub weight: u32,
    pub is_active: bool,
}

/// Persisted aggregation state for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserScore {
    pub user: Principal,
    /// Weighted average of all accepted raw scores, floored.
    pub total_score: u8,
    /// Number of accepted interactions.
    pub interaction_count: u64,
    /// Clock reading of the most recent accepted interaction.
    pub last_updated: u64,
    /// Sum of the reporting weights of all accepted interactions.
    pub accumulated_weight: u64,
}

impl UserScore {
    /// State of a user before any interaction has been accepted.
    ///
    /// The accumulated weight is zero, so the first report replaces the
    /// display default outright instead of blending with it.
    pub fn unseen(user: Principal) -> Self {
        Self {
            user,
            total_score: DEFAULT_SCORE,
            interaction_count: 0,
            last_updated: 0,
            accumulated_weight: 0,
        }
    }

    pub fn snapshot(&self) -> UserScoreSnapshot {
        UserScoreSnapshot {
            total_score: self.total_score,
            interaction_count: self.interaction_count,
            last_updated: self.last_updated,
        }
    }
}

/// Public view of a user's reputation, as returned by `get_user_score`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserScoreSnapshot {
    pub total_score: u8,
    pub interaction_count: u64,
    pub last_updated: u64,
}

impl Default for UserScoreSnapshot {
    fn default() -> Self {
        Self {
            total_score: DEFAULT_SCORE,
            interaction_count: 0,
            last_updated: 0,
        }
    }
}
