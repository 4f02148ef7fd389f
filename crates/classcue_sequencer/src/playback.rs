// SPDX-License-Identifier: MIT OR Apache-2.0
//! Playback options layered over the stepper.

use crate::error::{Result, SequencerError};
use crate::timer::Millis;
use serde::{Deserialize, Serialize};

/// How many full passes a started sequence plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoopCount {
    /// Play this many passes, then stop
    Finite(u32),
    /// Loop until paused or reset
    Infinite,
}

impl Default for LoopCount {
    fn default() -> Self {
        Self::Finite(1)
    }
}

impl LoopCount {
    /// Whether another pass follows after `completed` passes
    pub fn has_more(&self, completed: u32) -> bool {
        match self {
            Self::Finite(count) => completed < *count,
            Self::Infinite => true,
        }
    }
}

/// Speed and looping applied to a sequence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaybackOptions {
    /// Playback speed multiplier; step durations are divided by it
    #[serde(default = "default_speed")]
    pub speed: f32,
    /// Number of passes per start
    #[serde(default)]
    pub loop_count: LoopCount,
}

fn default_speed() -> f32 {
    1.0
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            speed: default_speed(),
            loop_count: LoopCount::default(),
        }
    }
}

impl PlaybackOptions {
    /// Create options with the given speed and loop count
    pub fn new(speed: f32, loop_count: LoopCount) -> Self {
        Self { speed, loop_count }
    }

    /// Check speed and loop count
    pub fn validate(&self) -> Result<()> {
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err(SequencerError::InvalidInput(format!(
                "speed must be a positive number, got {}",
                self.speed
            )));
        }
        if self.loop_count == LoopCount::Finite(0) {
            return Err(SequencerError::InvalidInput(
                "loop count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Duration of a step after speed scaling
    pub fn scaled(&self, duration: Millis) -> Millis {
        (duration as f64 / f64::from(self.speed)).round() as Millis
    }
}
