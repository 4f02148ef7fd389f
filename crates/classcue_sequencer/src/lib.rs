// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timed visual-state sequencer for classcue.
//!
//! This crate drives simple UI animations by toggling named visual states
//! (class tokens) on a target, one step at a time:
//! - Ordered steps of `(visual_state, duration_ms)`
//! - Start, pause, resume, reset and restart controls
//! - Speed scaling and loop counts layered over the stepper
//!
//! ## Architecture
//!
//! The sequencer is built on:
//! - A virtual millisecond clock advanced by [`Sequencer::tick`]
//! - A cancellable [`Timer`] holding the pending step deadline
//! - The [`VisualTarget`] trait supplied by the presentation layer

pub mod error;
pub mod playback;
pub mod sequence;
pub mod step;
pub mod target;
pub mod timer;

pub use error::{Result, SequencerError};
pub use playback::{LoopCount, PlaybackOptions};
pub use sequence::{Sequencer, SequencerState};
pub use step::{validate_steps, AnimationStep};
pub use target::{ClassList, StateChange, VisualTarget};
pub use timer::{Clock, Millis, Timer};
