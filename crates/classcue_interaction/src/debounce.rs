// SPDX-License-Identifier: MIT OR Apache-2.0
//! Trailing-edge debounce.

use classcue_sequencer::{Millis, Timer};

/// Coalesces rapid calls into one delayed delivery of the latest payload
#[derive(Debug)]
pub struct Debouncer<P> {
    pending: Option<P>,
    timer: Timer,
}

impl<P> Default for Debouncer<P> {
    fn default() -> Self {
        Self {
            pending: None,
            timer: Timer::new(),
        }
    }
}

impl<P> Debouncer<P> {
    /// Create an idle debouncer
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the pending payload and restart the delay from `now`
    pub fn call(&mut self, now: Millis, payload: P, delay: Millis) {
        self.pending = Some(payload);
        self.timer.schedule(now, delay);
    }

    /// Drop the pending payload
    pub fn cancel(&mut self) -> Option<P> {
        self.timer.cancel();
        self.pending.take()
    }

    /// Whether a payload is waiting
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending payload is delivered
    pub fn deadline(&self) -> Option<Millis> {
        self.timer.deadline()
    }

    /// Take the payload if its delay has elapsed by `now`
    pub fn take_due(&mut self, now: Millis) -> Option<P> {
        self.timer.take_due(now)?;
        self.pending.take()
    }
}
