//! Injectable time source and absolute deadlines.

// ============================================================================
// Imports
// ============================================================================

use std::time::{Duration, Instant};

use async_trait::async_trait;

// ============================================================================
// Clock
// ============================================================================

/// Time source for polling loops.
///
/// Production code uses [`SystemClock`]; tests substitute a virtual
/// clock whose `sleep` advances time instantly, making the bounded
/// wait loops deterministic and fast.
#[async_trait]
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> Instant;

    /// Suspends the caller for `duration`.
    async fn sleep(&self, duration: Duration);
}

// ============================================================================
// SystemClock
// ============================================================================

/// Real wall-clock time backed by `tokio::time`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

// ============================================================================
// Deadline
// ============================================================================

/// Absolute expiry time derived from a timeout at the start of a
/// bounded operation.
///
/// Computed exactly once as `now + timeout`; polling loops re-check
/// `passed` before each attempt and never recompute the timeout
/// relative to prior iterations, so slow polls cannot starve the
/// budget or drift it forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    /// `None` when the timeout overflows `Instant` arithmetic; such a
    /// deadline never passes.
    at: Option<Instant>,
}

impl Deadline {
    /// Computes the deadline `timeout` from `now`.
    #[must_use]
    pub fn after(now: Instant, timeout: Duration) -> Self {
        Self {
            at: now.checked_add(timeout),
        }
    }

    /// Returns whether the deadline has been reached.
    #[inline]
    #[must_use]
    pub fn passed(&self, now: Instant) -> bool {
        self.at.is_some_and(|at| now >= at)
    }
}

// ============================================================================
// Tests
// ============================================================================
