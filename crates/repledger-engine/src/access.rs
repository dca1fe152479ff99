use repledger_core::{DAppRecord, LedgerError, Principal};

use crate::registry::DAppRegistry;

/// Single-owner privilege policy.
///
/// The owner is fixed at construction and cannot be
/// replaced afterwards.
#[derive(Debug, Clone)]
pub struct AccessController {
    owner: Principal,
}

impl AccessController {
    pub fn new(owner: Principal) -> Self {
        Self { owner }
    }

    pub fn owner(&self) -> &Principal {
        &self.owner
    }

    pub fn is_owner(&self, caller: &Principal) -> bool {
        caller == &self.owner
    }

    /// Gate for every registry mutation.
    pub fn require_owner(&self, caller: &Principal) -> Result<(), LedgerError> {
        if !self.is_owner(caller) {
            tracing::warn!(caller = %caller, "rejected non-owner registry mutation");
            return Err(LedgerError::Unauthorized {
                caller: caller.clone(),
            });
        }
        Ok(())
    }

    /// Gate for interaction reporting. Unknown and inactive DApps are
    /// rejected alike.
    pub fn require_registered_active_dapp(
        &self,
        dapp: &Principal,
        registry: &DAppRegistry,
    ) -> Result<DAppRecord, LedgerError> {
        match registry.get(dapp) {
            Some(record) if record.is_active => Ok(record),
            Some(_) => {
                tracing::warn!(dapp = %dapp, "rejected report from inactive DApp");
                Err(LedgerError::DAppNotRegistered(dapp.clone()))
            }
            None => {
                tracing::warn!(dapp = %dapp, "rejected report from unregistered DApp");
                Err(LedgerError::DAppNotRegistered(dapp.clone()))
            }
        }
    }
}
