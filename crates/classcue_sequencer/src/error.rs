// SPDX-License-Identifier: MIT OR Apache-2.0
//! Sequencer errors.

use thiserror::Error;

/// Errors raised while building or reconfiguring a sequencer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequencerError {
    /// Malformed step list or playback options
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for sequencer operations
pub type Result<T> = std::result::Result<T, SequencerError>;
