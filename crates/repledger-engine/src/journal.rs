use std::collections::VecDeque;
use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use repledger_core::Principal;

/// An accepted state change, recorded for audit and off-engine analytics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LedgerEvent {
    #[serde(rename = "dapp_registered")]
    DAppRegistered {
        dapp: Principal,
        name: String,
        weight: u32,
    },
    #[serde(rename = "dapp_status_changed")]
    DAppStatusChanged {
        dapp: Principal,
        active: bool,
    },
    #[serde(rename = "dapp_weight_updated")]
    DAppWeightUpdated {
        dapp: Principal,
        previous: u32,
        weight: u32,
    },
    InteractionRecorded {
        dapp: Principal,
        user: Principal,
        raw_score: u8,
        /// Free-form tag; it has no effect on scoring.
        category: String,
        total_score: u8,
        interaction_count: u64,
    },
}

impl LedgerEvent {
    /// The user an event concerns, if any.
    pub fn user(&self) -> Option<&Principal> {
        match self {
            Self::InteractionRecorded { user, .. } => Some(user),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: Uuid,
    /// Ledger clock reading when the change was applied. Interaction
    /// entries carry the user's `last_updated`, which never moves back.
    pub at: u64,
    /// Wall-clock time the entry was written.
    pub logged_at: DateTime<Utc>,
    #[serde(flatten)]
    pub event: LedgerEvent,
}

/// Bounded, append-only event journal. Oldest entries are dropped first.
pub struct Journal {
    entries: RwLock<VecDeque<JournalEntry>>,
    capacity: usize,
}

impl Journal {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(VecDeque::with_capacity(capacity.min(1024))),
            capacity,
        }
    }

    /// Append an event. A zero-capacity journal records nothing.
    pub fn append(&self, at: u64, event: LedgerEvent) -> Option<Uuid> {
        if self.capacity == 0 {
            return None;
        }
        let entry = JournalEntry {
            id: Uuid::now_v7(),
            at,
            logged_at: Utc::now(),
            event,
        };
        let id = entry.id;

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        while entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
        Some(id)
    }

    /// All retained entries, oldest first.
    pub fn entries(&self) -> Vec<JournalEntry> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    /// Retained interaction entries about `user`, oldest first.
    pub fn for_user(&self, user: &Principal) -> Vec<JournalEntry> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|e| e.event.user() == Some(user))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
