use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use repledger_core::{DAppRecord, LedgerError, Principal, ValidationError};

use crate::access::AccessController;
use crate::validator;

/// Registry of DApps allowed to report interactions.
///
/// Records are never removed; deactivation keeps the identity reserved.
pub struct DAppRegistry {
    dapps: DashMap<Principal, DAppRecord>,
    max_name_len: usize,
}

impl DAppRegistry {
    /// Create an empty registry accepting names up to `max_name_len` chars.
    pub fn new(max_name_len: usize) -> Self {
        Self {
            dapps: DashMap::new(),
            max_name_len,
        }
    }

    /// Register a new DApp, active from the start.
    ///
    /// Checks run in order: owner privilege, name, weight, owner collision,
    /// duplicate identity. An existing record is never overwritten.
    pub fn register(
        &self,
        access: &AccessController,
        caller: &Principal,
        dapp: Principal,
        name: &str,
        weight: u32,
        now: u64,
    ) -> Result<DAppRecord, LedgerError> {
        access.require_owner(caller)?;
        validator::validate_name(name, self.max_name_len)?;
        validator::validate_weight(weight)?;
        if access.is_owner(&dapp) {
            return Err(ValidationError::OwnerAsDApp.into());
        }

        match self.dapps.entry(dapp) {
            Entry::Occupied(entry) => {
                tracing::warn!(dapp = %entry.key(), "rejected duplicate DApp registration");
                Err(ValidationError::DuplicateDApp(entry.key().clone()).into())
            }
            Entry::Vacant(entry) => {
                let record = DAppRecord {
                    id: entry.key().clone(),
                    name: name.to_string(),
                    weight,
                    is_active: true,
                    registered_at: now,
                };
                entry.insert(record.clone());
                tracing::info!(dapp = %record.id, name = %record.name, weight, "DApp registered");
                Ok(record)
            }
        }
    }

    /// Activate or deactivate a registered DApp.
    pub fn set_active(
        &self,
        access: &AccessController,
        caller: &Principal,
        dapp: &Principal,
        active: bool,
    ) -> Result<DAppRecord, LedgerError> {
        access.require_owner(caller)?;
        let mut record = self
            .dapps
            .get_mut(dapp)
            .ok_or_else(|| LedgerError::DAppNotRegistered(dapp.clone()))?;
        record.is_active = active;
        tracing::info!(dapp = %dapp, active, "DApp status changed");
        Ok(record.clone())
    }

    /// Change the weight applied to future reports from a DApp.
    ///
    /// Returns the updated record and the previous weight.
    pub fn update_weight(
        &self,
        access: &AccessController,
        caller: &Principal,
        dapp: &Principal,
        weight: u32,
    ) -> Result<(DAppRecord, u32), LedgerError> {
        access.require_owner(caller)?;
        validator::validate_weight(weight)?;
        let mut record = self
            .dapps
            .get_mut(dapp)
            .ok_or_else(|| LedgerError::DAppNotRegistered(dapp.clone()))?;
        let previous = std::mem::replace(&mut record.weight, weight);
        tracing::info!(dapp = %dapp, previous, weight, "DApp weight updated");
        Ok((record.clone(), previous))
    }

    /// Look up a DApp record.
    pub fn get(&self, dapp: &Principal) -> Option<DAppRecord> {
        self.dapps.get(dapp).map(|entry| entry.clone())
    }

    pub fn contains(&self, dapp: &Principal) -> bool {
        self.dapps.contains_key(dapp)
    }

    /// All registered identities, sorted.
    pub fn list(&self) -> Vec<Principal> {
        let mut ids: Vec<Principal> = self.dapps.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.dapps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dapps.is_empty()
    }
}
