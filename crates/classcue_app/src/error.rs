// SPDX-License-Identifier: MIT OR Apache-2.0
//! Runtime errors.

use classcue_interaction::InteractionError;
use classcue_sequencer::SequencerError;
use thiserror::Error;

/// Errors raised while building or driving animated elements
#[derive(Debug, Error)]
pub enum CueError {
    /// No element with this id exists on the stage
    #[error("No target element with id '{0}'")]
    MissingTarget(String),

    /// Preset name not present in the configuration
    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    /// Malformed sequence or playback options
    #[error(transparent)]
    Sequencer(#[from] SequencerError),

    /// Bad interaction name
    #[error(transparent)]
    Interaction(#[from] InteractionError),

    /// Configuration could not be parsed
    #[error("Config parse error: {0}")]
    Config(#[from] ron::error::SpannedError),

    /// Configuration could not be written
    #[error("Config serialization error: {0}")]
    Serialize(#[from] ron::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, CueError>;
