// SPDX-License-Identifier: MIT OR Apache-2.0
//! Interaction dispatching for classcue.
//!
//! Binds named user interactions on one target to callbacks:
//! - A fixed registry of interaction names
//! - Per-callback failure isolation on dispatch
//! - Trailing-edge debounce
//! - Optional interaction feedback states on the target

pub mod debounce;
pub mod dispatcher;
pub mod error;
pub mod interaction;

pub use debounce::Debouncer;
pub use dispatcher::{
    CallbackError, CallbackId, CallbackResult, DispatchReport, Dispatcher,
    DEFAULT_FEEDBACK_TIMEOUT_MS,
};
pub use error::{InteractionError, Result};
pub use interaction::Interaction;
