// SPDX-License-Identifier: MIT OR Apache-2.0
//! Dispatcher errors.

use thiserror::Error;

/// Errors raised when registering interactions or callbacks
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InteractionError {
    /// Unknown interaction name or one this dispatcher does not recognize
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type for dispatcher operations
pub type Result<T> = std::result::Result<T, InteractionError>;
