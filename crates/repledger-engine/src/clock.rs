use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

/// An externally driven, monotonic time source.
///
/// The engine only ever reads it. Readings may be block heights or Unix
/// seconds; the engine does not care which, as long as they never go back.
pub trait Clock: Send + Sync {
    fn now(&self) -> u64;
}

/// A block-height style counter advanced by whoever drives the ledger.
#[derive(Debug, Default)]
pub struct BlockHeightClock {
    height: AtomicU64,
}

impl BlockHeightClock {
    pub fn new(height: u64) -> Self {
        Self {
            height: AtomicU64::new(height),
        }
    }

    /// Move forward by `blocks` and return the new height.
    pub fn advance(&self, blocks: u64) -> u64 {
        let prev = self
            .height
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |h| {
                Some(h.saturating_add(blocks))
            })
            .unwrap_or_else(|h| h);
        prev.saturating_add(blocks)
    }

    /// Jump to `height`. Earlier heights are ignored; returns the height in effect.
    pub fn set(&self, height: u64) -> u64 {
        self.height.fetch_max(height, Ordering::AcqRel).max(height)
    }
}

impl Clock for BlockHeightClock {
    fn now(&self) -> u64 {
        self.height.load(Ordering::Acquire)
    }
}

/// Wall-clock Unix seconds.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        // Pre-epoch readings clamp to zero.
        u64::try_from(Utc::now().timestamp()).unwrap_or(0)
    }
}
