//! Single-resolution waits.
//!
//! A [`ResponseWait`] is the suspension point of one offer or one confirmation
//! request. Exactly one of {responder, timer} resolves it: the resolution cell is
//! claimed with a compare-and-set, and only the winner gets to act on the outcome.
//!
//! Waking (cancelling the token) is kept separate from resolving. A responder
//! first claims the resolution, then performs its own state changes, then wakes
//! the waiter, so the waiter never observes a half-applied response. Waking has
//! no side effect of its own.

use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

const PENDING: u8 = 0;
const ACCEPTED: u8 = 1;
const DECLINED: u8 = 2;
const TIMED_OUT: u8 = 3;

/// Terminal outcome of a wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The counterpart accepted (driver took the offer, food-place confirmed).
    Accepted,
    /// The counterpart explicitly said no.
    Declined,
    /// Nobody answered before the deadline.
    TimedOut,
}

impl Resolution {
    fn encode(self) -> u8 {
        match self {
            Resolution::Accepted => ACCEPTED,
            Resolution::Declined => DECLINED,
            Resolution::TimedOut => TIMED_OUT,
        }
    }

    fn decode(raw: u8) -> Option<Self> {
        match raw {
            ACCEPTED => Some(Resolution::Accepted),
            DECLINED => Some(Resolution::Declined),
            TIMED_OUT => Some(Resolution::TimedOut),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct ResponseWait {
    token: CancellationToken,
    state: AtomicU8,
}

impl ResponseWait {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the resolution. Returns `true` for exactly one caller over the
    /// lifetime of the wait.
    pub fn try_resolve(&self, resolution: Resolution) -> bool {
        self.state
            .compare_exchange(
                PENDING,
                resolution.encode(),
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }

    pub fn resolution(&self) -> Option<Resolution> {
        Resolution::decode(self.state.load(Ordering::Acquire))
    }

    pub fn is_resolved(&self) -> bool {
        self.resolution().is_some()
    }

    /// Wake the waiting task. Idempotent.
    pub fn wake(&self) {
        self.token.cancel();
    }

    /// Wakes the waiter when dropped, so a responder that claimed the
    /// resolution releases the waiter even if its own work fails midway.
    pub fn wake_on_drop(&self) -> WakeOnDrop<'_> {
        WakeOnDrop(self)
    }

    /// Suspend until woken or until `timeout` elapses.
    ///
    /// On expiry the timer tries to claim [`Resolution::TimedOut`]. If a
    /// responder got there first, this keeps waiting for that responder's
    /// wake-up and returns its resolution.
    pub async fn wait(&self, timeout: Duration) -> Resolution {
        let _ = tokio::time::timeout(timeout, self.token.cancelled()).await;

        // Also covers a wake without a claimed resolution.
        if self.try_resolve(Resolution::TimedOut) {
            return Resolution::TimedOut;
        }

        self.token.cancelled().await;
        self.resolution().unwrap_or(Resolution::TimedOut)
    }
}

/// Guard returned by [`ResponseWait::wake_on_drop`].
pub struct WakeOnDrop<'a>(&'a ResponseWait);

impl Drop for WakeOnDrop<'_> {
    fn drop(&mut self) {
        self.0.wake();
    }
}
