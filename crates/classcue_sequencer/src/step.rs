// SPDX-License-Identifier: MIT OR Apache-2.0
//! Animation step definitions for the sequencer.

use crate::error::{Result, SequencerError};
use crate::timer::Millis;
use serde::{Deserialize, Serialize};

/// A visual state held on the target for a fixed duration
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnimationStep {
    /// Visual state (a single class token) applied while the step runs
    #[serde(alias = "className")]
    pub visual_state: String,
    /// Time the state stays applied, in milliseconds
    #[serde(alias = "duration")]
    pub duration_ms: Millis,
}

impl AnimationStep {
    /// Create a new step
    pub fn new(visual_state: impl Into<String>, duration_ms: Millis) -> Self {
        Self {
            visual_state: visual_state.into(),
            duration_ms,
        }
    }

    /// Check that the visual state is a usable class token
    pub fn validate(&self) -> Result<()> {
        if self.visual_state.is_empty() {
            return Err(SequencerError::InvalidInput(
                "visual state must not be empty".to_string(),
            ));
        }
        if self.visual_state.chars().any(char::is_whitespace) {
            return Err(SequencerError::InvalidInput(format!(
                "visual state '{}' must be a single token",
                self.visual_state
            )));
        }
        Ok(())
    }
}

/// Validate every step of a sequence, reporting the first malformed one
pub fn validate_steps(steps: &[AnimationStep]) -> Result<()> {
    for (index, step) in steps.iter().enumerate() {
        step.validate().map_err(|SequencerError::InvalidInput(reason)| {
            SequencerError::InvalidInput(format!("step {index}: {reason}"))
        })?;
    }
    Ok(())
}
