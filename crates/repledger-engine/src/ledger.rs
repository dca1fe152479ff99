//! The reputation ledger façade.
//!
//! Every external operation enters here. Mutations consult the access
//! controller and validator first and only then touch the registry or the
//! score arena, so a failed call leaves no trace in ledger state.

use std::sync::Arc;

use repledger_core::{
    DAppInfo, DAppRecord, LedgerConfig, LedgerError, Principal, UserScore, UserScoreSnapshot,
};

use crate::access::AccessController;
use crate::clock::Clock;
use crate::journal::{Journal, LedgerEvent};
use crate::registry::DAppRegistry;
use crate::score::ScoreEngine;
use crate::validator;

pub struct ReputationLedger {
    config: LedgerConfig,
    access: AccessController,
    registry: DAppRegistry,
    scores: ScoreEngine,
    journal: Journal,
    clock: Arc<dyn Clock>,
}

impl ReputationLedger {
    /// Create an empty ledger owned by `config.owner`, reading time from `clock`.
    pub fn new(config: LedgerConfig, clock: Arc<dyn Clock>) -> Self {
        tracing::info!(
            owner = %config.owner,
            max_name_len = config.max_name_len,
            max_category_len = config.max_category_len,
            "reputation ledger created"
        );
        Self {
            access: AccessController::new(config.owner.clone()),
            registry: DAppRegistry::new(config.max_name_len),
            scores: ScoreEngine::new(),
            journal: Journal::new(config.journal_capacity),
            config,
            clock,
        }
    }

    /// Register `dapp` with a display name and weight. Owner only.
    pub fn register_dapp(
        &self,
        caller: &Principal,
        dapp: &Principal,
        name: &str,
        weight: u32,
    ) -> Result<(), LedgerError> {
        let now = self.clock.now();
        let record = self
            .registry
            .register(&self.access, caller, dapp.clone(), name, weight, now)?;
        self.journal.append(
            now,
            LedgerEvent::DAppRegistered {
                dapp: record.id,
                name: record.name,
                weight: record.weight,
            },
        );
        Ok(())
    }

    /// Fold a scored interaction from `dapp` into `user`'s reputation.
    ///
    /// Fails with `InvalidScore` (101) before anything else is looked at,
    /// then with `DAppNotRegistered` (102) for unknown or inactive reporters.
    pub fn report_interaction(
        &self,
        dapp: &Principal,
        user: &Principal,
        score: i64,
        category: &str,
    ) -> Result<UserScoreSnapshot, LedgerError> {
        let admitted = validator::admit_report(
            &self.access,
            &self.registry,
            dapp,
            score,
            category,
            self.config.max_category_len,
        )?;

        let now = self.clock.now();
        let reporter = &admitted.reporter;
        let raw_score = admitted.score.value();
        // Runs under the user's writer lock: per-user journal order is
        // apply order.
        let updated = self.scores.record_then(
            user,
            admitted.score,
            reporter.weight,
            now,
            |state| {
                tracing::info!(
                    dapp = %reporter.id,
                    user = %user,
                    raw_score,
                    category,
                    total_score = state.total_score,
                    interactions = state.interaction_count,
                    "interaction recorded"
                );
                self.journal.append(
                    state.last_updated,
                    LedgerEvent::InteractionRecorded {
                        dapp: reporter.id.clone(),
                        user: user.clone(),
                        raw_score,
                        category: category.to_string(),
                        total_score: state.total_score,
                        interaction_count: state.interaction_count,
                    },
                );
            },
        )?;
        Ok(updated.snapshot())
    }

    /// Activate or deactivate a DApp. Owner only.
    pub fn set_dapp_active(
        &self,
        caller: &Principal,
        dapp: &Principal,
        active: bool,
    ) -> Result<(), LedgerError> {
        let record = self.registry.set_active(&self.access, caller, dapp, active)?;
        self.journal.append(
            self.clock.now(),
            LedgerEvent::DAppStatusChanged {
                dapp: record.id,
                active,
            },
        );
        Ok(())
    }

    /// Change a DApp's weight for future reports. Owner only.
    pub fn update_dapp_weight(
        &self,
        caller: &Principal,
        dapp: &Principal,
        weight: u32,
    ) -> Result<(), LedgerError> {
        let (record, previous) = self
            .registry
            .update_weight(&self.access, caller, dapp, weight)?;
        self.journal.append(
            self.clock.now(),
            LedgerEvent::DAppWeightUpdated {
                dapp: record.id,
                previous,
                weight,
            },
        );
        Ok(())
    }

    pub fn get_dapp_info(&self, dapp: &Principal) -> Option<DAppInfo> {
        tracing::debug!(dapp = %dapp, "get_dapp_info");
        self.registry.get(dapp).map(|record| record.info())
    }

    pub fn get_dapp_record(&self, dapp: &Principal) -> Option<DAppRecord> {
        self.registry.get(dapp)
    }

    /// Reputation snapshot; `{50, 0, 0}` for users never reported on.
    pub fn get_user_score(&self, user: &Principal) -> UserScoreSnapshot {
        tracing::debug!(user = %user, "get_user_score");
        self.scores.get(user)
    }

    /// Full aggregation state, including the accumulated weight.
    pub fn get_user_record(&self, user: &Principal) -> Option<UserScore> {
        self.scores.record_of(user)
    }

    pub fn owner(&self) -> &Principal {
        self.access.owner()
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// Registered DApp identities, sorted.
    pub fn dapps(&self) -> Vec<Principal> {
        self.registry.list()
    }

    pub fn seen_users(&self) -> usize {
        self.scores.seen_users()
    }
}
