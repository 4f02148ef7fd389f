// SPDX-License-Identifier: MIT OR Apache-2.0
//! Virtual clock and cancellable delayed-task handle.
//!
//! Components never sleep. The embedding loop advances their clock with a
//! frame delta and every deadline the delta spans fires at its exact instant.

/// Time in milliseconds
pub type Millis = u64;

/// Monotonic virtual clock
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Clock {
    now: Millis,
}

impl Clock {
    /// Create a clock at time zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Current time
    pub fn now(&self) -> Millis {
        self.now
    }

    /// Advance by a delta and return the new time
    pub fn advance(&mut self, delta: Millis) -> Millis {
        self.now = self.now.saturating_add(delta);
        self.now
    }

    /// Move forward to `time`; earlier times are ignored
    pub fn advance_to(&mut self, time: Millis) {
        self.now = self.now.max(time);
    }
}

/// A single pending deadline that can be cancelled or rescheduled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timer {
    deadline: Option<Millis>,
}

impl Timer {
    /// Create a timer with nothing scheduled
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule the deadline `delay` after `now`, replacing any pending one
    pub fn schedule(&mut self, now: Millis, delay: Millis) {
        self.deadline = Some(now.saturating_add(delay));
    }

    /// Cancel the pending deadline, returning it
    pub fn cancel(&mut self) -> Option<Millis> {
        self.deadline.take()
    }

    /// Whether a deadline is pending
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Pending deadline
    pub fn deadline(&self) -> Option<Millis> {
        self.deadline
    }

    /// Time left until the deadline
    pub fn remaining(&self, now: Millis) -> Option<Millis> {
        self.deadline.map(|deadline| deadline.saturating_sub(now))
    }

    /// Take the deadline if it falls at or before `now`
    pub fn take_due(&mut self, now: Millis) -> Option<Millis> {
        match self.deadline {
            Some(deadline) if deadline <= now => self.deadline.take(),
            _ => None,
        }
    }
}
