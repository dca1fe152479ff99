//! Input bounds checks for registrations and interaction reports.
//!
//! Everything here is pure; nothing touches ledger state except the
//! reporter lookup, which only reads the registry.

use repledger_core::{DAppRecord, LedgerError, Principal, RawScore, ValidationError};

use crate::access::AccessController;
use crate::registry::DAppRegistry;

/// DApp display names: non-empty, at most `max_len` characters.
pub fn validate_name(name: &str, max_len: usize) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    let len = name.chars().count();
    if len > max_len {
        return Err(ValidationError::NameTooLong { len, max: max_len });
    }
    Ok(())
}

/// DApp weights must be strictly positive.
pub fn validate_weight(weight: u32) -> Result<(), ValidationError> {
    if weight == 0 {
        return Err(ValidationError::NonPositiveWeight);
    }
    Ok(())
}

/// Interaction categories: non-empty, at most `max_len` characters.
pub fn validate_category(category: &str, max_len: usize) -> Result<(), ValidationError> {
    if category.trim().is_empty() {
        return Err(ValidationError::EmptyCategory);
    }
    let len = category.chars().count();
    if len > max_len {
        return Err(ValidationError::CategoryTooLong { len, max: max_len });
    }
    Ok(())
}

/// A report that passed admission control.
#[derive(Debug, Clone)]
pub struct AdmittedReport {
    pub reporter: DAppRecord,
    pub score: RawScore,
}

/// Run the admission checks for an interaction report, first failure wins:
///
/// 1. raw score in `[0, 100]`                       → `InvalidScore`
/// 2. reporter registered and active                → `DAppNotRegistered`
/// 3. category non-empty and within `max_category_len` → `Validation`
pub fn admit_report(
    access: &AccessController,
    registry: &DAppRegistry,
    reporter: &Principal,
    raw_score: i64,
    category: &str,
    max_category_len: usize,
) -> Result<AdmittedReport, LedgerError> {
    let score = RawScore::new(raw_score)?;
    let reporter = access.require_registered_active_dapp(reporter, registry)?;
    validate_category(category, max_category_len)?;
    Ok(AdmittedReport { reporter, score })
}
