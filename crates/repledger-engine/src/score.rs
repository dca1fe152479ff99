use std::sync::{Arc, Mutex, PoisonError, RwLock};

use dashmap::DashMap;

use repledger_core::{
    LedgerError, Principal, RawScore, UserEvent, UserScore, UserScoreSnapshot, UserState,
    UserStateMachine, ValidationError,
};

/// Fold one accepted report into a user's aggregation state.
///
/// `new = floor((S * W + raw * w) / (W + w))`, then `W += w` and `n += 1`.
/// For an unseen user `W == 0`, so the result is exactly `raw`.
/// `last_updated` never moves backwards even if `now` does.
pub fn fold(
    current: &UserScore,
    raw: RawScore,
    weight: u32,
    now: u64,
) -> Result<UserScore, LedgerError> {
    if weight == 0 {
        return Err(ValidationError::NonPositiveWeight.into());
    }
    let overflow = || LedgerError::ArithmeticOverflow(current.user.clone());

    let accumulated_weight = current
        .accumulated_weight
        .checked_add(u64::from(weight))
        .ok_or_else(overflow)?;
    let interaction_count = current.interaction_count.checked_add(1).ok_or_else(overflow)?;

    let numerator = u128::from(current.total_score) * u128::from(current.accumulated_weight)
        + u128::from(raw.value()) * u128::from(weight);
    // Weighted mean of values in [0, 100], so it always fits in a u8.
    let total_score = (numerator / u128::from(accumulated_weight)) as u8;

    Ok(UserScore {
        user: current.user.clone(),
        total_score,
        interaction_count,
        last_updated: current.last_updated.max(now),
        accumulated_weight,
    })
}

/// Per-user slot in the score arena.
///
/// Writers serialize on `state`; readers only touch `published`, so a
/// slow report never holds up `get_user_score`.
struct UserCell {
    state: Mutex<UserScore>,
    published: RwLock<UserScoreSnapshot>,
}

impl UserCell {
    fn new(user: Principal) -> Self {
        let score = UserScore::unseen(user);
        let snapshot = score.snapshot();
        Self {
            state: Mutex::new(score),
            published: RwLock::new(snapshot),
        }
    }

    fn snapshot(&self) -> UserScoreSnapshot {
        *self.published.read().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Owns every user's score and applies the weighted aggregation.
pub struct ScoreEngine {
    users: DashMap<Principal, Arc<UserCell>>,
}

impl ScoreEngine {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
        }
    }

    /// The user's slot. A slot is only created once `fold` has accepted a
    /// first report against the unseen state, so failed reports never grow
    /// the arena.
    fn admitted_cell(
        &self,
        user: &Principal,
        raw: RawScore,
        weight: u32,
        now: u64,
    ) -> Result<Arc<UserCell>, LedgerError> {
        if let Some(cell) = self.users.get(user) {
            return Ok(cell.clone());
        }
        fold(&UserScore::unseen(user.clone()), raw, weight, now)?;
        Ok(self
            .users
            .entry(user.clone())
            .or_insert_with(|| Arc::new(UserCell::new(user.clone())))
            .clone())
    }

    /// Apply an admitted report from a DApp of the given `weight`.
    ///
    /// Reports for the same user are applied one at a time; on error the
    /// stored state is left exactly as it was.
    pub fn record(
        &self,
        user: &Principal,
        raw: RawScore,
        weight: u32,
        now: u64,
    ) -> Result<UserScore, LedgerError> {
        self.record_then(user, raw, weight, now, |_| {})
    }

    /// Like [`record`](Self::record), running `on_applied` with the new
    /// state while the user's writer lock is still held. Callbacks for one
    /// user observe updates in the order they were applied.
    pub fn record_then<F>(
        &self,
        user: &Principal,
        raw: RawScore,
        weight: u32,
        now: u64,
        on_applied: F,
    ) -> Result<UserScore, LedgerError>
    where
        F: FnOnce(&UserScore),
    {
        let cell = self.admitted_cell(user, raw, weight, now)?;
        let mut state = cell.state.lock().unwrap_or_else(PoisonError::into_inner);

        let before = UserState::of(&state);
        let next = fold(&state, raw, weight, now)?;
        let after = UserStateMachine::transition(before, UserEvent::InteractionAccepted);
        if before != after {
            tracing::debug!(user = %user, from = %before, to = %after, "user state transition");
        }

        *state = next.clone();
        *cell.published.write().unwrap_or_else(PoisonError::into_inner) = next.snapshot();
        on_applied(&next);
        Ok(next)
    }

    /// Current snapshot for a user; the display default if none was recorded.
    pub fn get(&self, user: &Principal) -> UserScoreSnapshot {
        self.users
            .get(user)
            .map(|cell| cell.snapshot())
            .unwrap_or_default()
    }

    /// Full aggregation state, or `None` for users with no accepted report.
    pub fn record_of(&self, user: &Principal) -> Option<UserScore> {
        let cell = self.users.get(user).map(|c| c.clone())?;
        let state = cell.state.lock().unwrap_or_else(PoisonError::into_inner);
        match UserState::of(&state) {
            UserState::Seen => Some(state.clone()),
            UserState::Unseen => None,
        }
    }

    /// Number of users with at least one accepted interaction.
    pub fn seen_users(&self) -> usize {
        self.users
            .iter()
            .filter(|entry| entry.value().snapshot().interaction_count > 0)
            .count()
    }
}

impl Default for ScoreEngine {
    fn default() -> Self {
        Self::new()
    }
}
