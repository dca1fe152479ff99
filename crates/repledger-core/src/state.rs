use std::fmt;

use crate::types::UserScore;

/// Lifecycle of a user's reputation record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum UserState {
    /// No accepted interaction yet; reads return the display default.
    Unseen,
    /// At least one accepted interaction. There is no way back to `Unseen`.
    Seen,
}

impl UserState {
    /// Derive the state from a stored record.
    pub fn of(score: &UserScore) -> Self {
        if score.interaction_count == 0 {
            Self::Unseen
        } else {
            Self::Seen
        }
    }
}

impl fmt::Display for UserState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unseen => write!(f, "Unseen"),
            Self::Seen => write!(f, "Seen"),
        }
    }
}

/// Events that move a user record through its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserEvent {
    /// A report about the user passed validation and was folded in.
    InteractionAccepted,
}

/// Transitions:
/// - Unseen → Seen (InteractionAccepted)
/// - Seen → Seen (InteractionAccepted)
pub struct UserStateMachine;

impl UserStateMachine {
    pub fn transition(current: UserState, event: UserEvent) -> UserState {
        match (current, event) {
            (UserState::Unseen, UserEvent::InteractionAccepted) => UserState::Seen,
            (UserState::Seen, UserEvent::InteractionAccepted) => UserState::Seen,
        }
    }
}
