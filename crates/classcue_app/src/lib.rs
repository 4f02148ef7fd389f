// SPDX-License-Identifier: MIT OR Apache-2.0
//! classcue runtime.
//!
//! Composes a sequencer and an interaction dispatcher per target element:
//! - [`Stage`]: the element registry targets are looked up in
//! - [`AnimatedElement`]: one target, its animation and its bindings
//! - [`Scene`]: every configured element, ticked together
//! - [`CueConfig`]: presets and element tables, loadable from RON

pub mod config;
pub mod element;
pub mod error;
pub mod scene;
pub mod stage;

pub use config::{AnimationConfig, CueConfig, ElementAnimation, ElementSpec};
pub use element::AnimatedElement;
pub use error::{CueError, Result};
pub use scene::Scene;
pub use stage::{ElementHandle, Stage};
