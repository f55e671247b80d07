#![forbid(unsafe_code)]

//! Cancellable scheduled callbacks.
//!
//! The engine never blocks and never spawns: when it wants to be called back
//! later it asks a [`TimerService`] for a [`TimerHandle`], and the host calls
//! the engine's timer entry point with that handle once the delay elapses.
//! Scheduling is cancel-and-restart: the engine holds at most one pending
//! handle per purpose and cancels it before scheduling a replacement.
//!
//! [`ManualTimer`] is a deterministic implementation driven by explicit
//! clock advancement. It backs the test suites and suits hosts with their
//! own frame clock.

use std::collections::BTreeMap;
use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Opaque handle for one scheduled callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimerHandle(u64);

impl TimerHandle {
    /// Wrap a raw handle value. Hosts with their own timer ids use this.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Source of delayed callbacks.
pub trait TimerService {
    /// Schedule a callback `delay` from now and return its handle.
    fn schedule_after(&mut self, delay: Duration) -> TimerHandle;

    /// Cancel a pending callback. Cancelling an unknown or already-fired
    /// handle is a no-op.
    fn cancel(&mut self, handle: TimerHandle);
}

/// Deterministic timer driven by [`advance`](ManualTimer::advance).
#[derive(Debug, Clone)]
pub struct ManualTimer {
    now: Instant,
    next_id: u64,
    pending: BTreeMap<TimerHandle, Instant>,
}

impl ManualTimer {
    /// Create a timer whose clock starts at `start`.
    #[must_use]
    pub fn new(start: Instant) -> Self {
        Self {
            now: start,
            next_id: 1,
            pending: BTreeMap::new(),
        }
    }

    /// Current clock value.
    #[must_use]
    pub const fn now(&self) -> Instant {
        self.now
    }

    /// Move the clock forward by `by` and return every handle that became
    /// due, ordered by deadline then by scheduling order.
    pub fn advance(&mut self, by: Duration) -> Vec<TimerHandle> {
        let target = self.now + by;
        self.advance_to(target)
    }

    /// Move the clock to `target` (never backwards) and return due handles.
    pub fn advance_to(&mut self, target: Instant) -> Vec<TimerHandle> {
        if target > self.now {
            self.now = target;
        }
        let mut due: Vec<(Instant, TimerHandle)> = self
            .pending
            .iter()
            .filter(|(_, deadline)| **deadline <= self.now)
            .map(|(handle, deadline)| (*deadline, *handle))
            .collect();
        due.sort();
        for (_, handle) in &due {
            self.pending.remove(handle);
        }
        due.into_iter().map(|(_, handle)| handle).collect()
    }

    /// True if `handle` is scheduled and has not fired or been cancelled.
    #[must_use]
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.contains_key(&handle)
    }

    /// Number of pending callbacks.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Pending handles in scheduling order.
    pub fn pending_handles(&self) -> impl Iterator<Item = TimerHandle> + '_ {
        self.pending.keys().copied()
    }
}

impl Default for ManualTimer {
    fn default() -> Self {
        Self::new(Instant::now())
    }
}

impl TimerService for ManualTimer {
    fn schedule_after(&mut self, delay: Duration) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.pending.insert(handle, self.now + delay);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.pending.remove(&handle);
    }
}
