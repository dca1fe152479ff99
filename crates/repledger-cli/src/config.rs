//! CLI configuration loading and management.

use serde::{Deserialize, Serialize};
use std::path::Path;

use repledger_core::{LedgerConfig, Principal};

/// Full configuration for the `repledger` driver.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CliConfig {
    /// Ledger construction parameters.
    #[serde(default)]
    pub ledger: LedgerSection,

    /// Time source settings.
    #[serde(default)]
    pub clock: ClockConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSection {
    /// Owner principal. Required before a ledger can be built, either here
    /// or via `--owner`.
    #[serde(default)]
    pub owner: Option<String>,
    /// Maximum DApp name length.
    #[serde(default = "default_max_name_len")]
    pub max_name_len: usize,
    /// Maximum interaction category length.
    #[serde(default = "default_max_category_len")]
    pub max_category_len: usize,
    /// Journal entries retained in memory.
    #[serde(default = "default_journal_capacity")]
    pub journal_capacity: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClockKind {
    /// Block-height counter, advanced by `advance_clock` transactions.
    #[default]
    Block,
    /// Wall-clock Unix seconds.
    System,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockConfig {
    #[serde(default)]
    pub kind: ClockKind,
    /// Initial height for the block clock.
    #[serde(default = "default_start_height")]
    pub start_height: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (text, json).
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_max_name_len() -> usize {
    64
}
fn default_max_category_len() -> usize {
    32
}
fn default_journal_capacity() -> usize {
    10_000
}
fn default_start_height() -> u64 {
    1
}
fn default_log_level() -> String {
    "info".into()
}
fn default_log_format() -> String {
    "text".into()
}

impl Default for LedgerSection {
    fn default() -> Self {
        Self {
            owner: None,
            max_name_len: default_max_name_len(),
            max_category_len: default_max_category_len(),
            journal_capacity: default_journal_capacity(),
        }
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            kind: ClockKind::default(),
            start_height: default_start_height(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl CliConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            let config: CliConfig = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save the current config to a TOML file.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Build the engine configuration. Fails when no owner is configured.
    pub fn ledger_config(&self) -> anyhow::Result<LedgerConfig> {
        let owner = self
            .ledger
            .owner
            .as_deref()
            .ok_or_else(|| {
                anyhow::anyhow!("no ledger owner configured (set [ledger].owner or pass --owner)")
            })?;
        Ok(LedgerConfig {
            owner: Principal::new(owner)?,
            max_name_len: self.ledger.max_name_len,
            max_category_len: self.ledger.max_category_len,
            journal_capacity: self.ledger.journal_capacity,
        })
    }
}
