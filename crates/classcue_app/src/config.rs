// SPDX-License-Identifier: MIT OR Apache-2.0
//! Animation presets and element tables.
//!
//! Configuration is plain data passed at construction:
//! - Named presets (a step sequence plus playback options)
//! - Default interaction names
//! - Feedback timeout for interaction states
//! - Elements to animate, each referencing a preset or carrying its own steps

use crate::error::{CueError, Result};
use classcue_interaction::DEFAULT_FEEDBACK_TIMEOUT_MS;
use classcue_sequencer::{validate_steps, AnimationStep, LoopCount, Millis, PlaybackOptions};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Steps and playback options for one animation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Steps in playback order
    pub sequence: Vec<AnimationStep>,
    /// Speed and looping
    #[serde(default)]
    pub control: PlaybackOptions,
}

impl AnimationConfig {
    /// Create an animation config
    pub fn new(sequence: Vec<AnimationStep>, control: PlaybackOptions) -> Self {
        Self { sequence, control }
    }

    /// Check steps and options
    pub fn validate(&self) -> Result<()> {
        validate_steps(&self.sequence)?;
        self.control.validate()?;
        Ok(())
    }
}

/// Animation an element plays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ElementAnimation {
    /// A named preset
    Preset(String),
    /// Steps given inline
    Custom(AnimationConfig),
}

/// An element to animate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementSpec {
    /// Element id on the stage
    pub id: String,
    /// Interactions that start the animation; empty means the config defaults
    #[serde(default)]
    pub interactions: Vec<String>,
    /// Animation to play
    pub animation: ElementAnimation,
}

fn default_feedback_timeout() -> Option<Millis> {
    Some(DEFAULT_FEEDBACK_TIMEOUT_MS)
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CueConfig {
    /// Named presets
    #[serde(default)]
    pub presets: IndexMap<String, AnimationConfig>,
    /// Interactions used by elements that list none
    #[serde(default)]
    pub interactions: Vec<String>,
    /// How long interaction feedback states stay applied; `None` disables them
    #[serde(default = "default_feedback_timeout")]
    pub feedback_timeout_ms: Option<Millis>,
    /// Elements to animate
    #[serde(default)]
    pub elements: Vec<ElementSpec>,
}

impl CueConfig {
    /// Preset played when an item is added to a list
    pub const ITEM_ADDITION: &'static str = "item_addition";
    /// Page-wide preset
    pub const GLOBAL: &'static str = "global";

    /// Parse and validate a RON document
    pub fn from_ron_str(text: &str) -> Result<Self> {
        let config: Self = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_ron_str(&text)
    }

    /// Serialize as pretty RON
    pub fn to_ron_string(&self) -> Result<String> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }

    /// Look up a preset
    pub fn preset(&self, name: &str) -> Result<&AnimationConfig> {
        self.presets
            .get(name)
            .ok_or_else(|| CueError::UnknownPreset(name.to_string()))
    }

    /// Animation an element plays
    pub fn resolve<'a>(&'a self, animation: &'a ElementAnimation) -> Result<&'a AnimationConfig> {
        match animation {
            ElementAnimation::Preset(name) => self.preset(name),
            ElementAnimation::Custom(config) => Ok(config),
        }
    }

    /// Interactions an element listens to
    pub fn interactions_for<'a>(&'a self, spec: &'a ElementSpec) -> &'a [String] {
        if spec.interactions.is_empty() {
            &self.interactions
        } else {
            &spec.interactions
        }
    }

    /// Check every preset and element
    pub fn validate(&self) -> Result<()> {
        for config in self.presets.values() {
            config.validate()?;
        }
        for spec in &self.elements {
            self.resolve(&spec.animation)?.validate()?;
        }
        Ok(())
    }
}

impl Default for CueConfig {
    fn default() -> Self {
        let mut presets = IndexMap::new();
        presets.insert(
            Self::ITEM_ADDITION.to_string(),
            AnimationConfig::new(
                vec![
                    AnimationStep::new("fadeIn", 300),
                    AnimationStep::new("expand", 200),
                    AnimationStep::new("settle", 100),
                ],
                PlaybackOptions::new(1.5, LoopCount::Finite(1)),
            ),
        );
        presets.insert(
            Self::GLOBAL.to_string(),
            AnimationConfig::new(
                vec![
                    AnimationStep::new("fadeInGlobal", 500),
                    AnimationStep::new("expandGlobal", 400),
                    AnimationStep::new("settleGlobal", 300),
                ],
                PlaybackOptions::new(1.0, LoopCount::Finite(1)),
            ),
        );

        fn custom(steps: &[(&str, Millis)]) -> ElementAnimation {
            ElementAnimation::Custom(AnimationConfig::new(
                steps
                    .iter()
                    .map(|(state, duration)| AnimationStep::new(*state, *duration))
                    .collect(),
                PlaybackOptions::default(),
            ))
        }

        let click = vec!["click".to_string()];
        let elements = vec![
            ElementSpec {
                id: "item".to_string(),
                interactions: click.clone(),
                animation: custom(&[("fadeIn", 300)]),
            },
            ElementSpec {
                id: "newItem".to_string(),
                interactions: click.clone(),
                animation: custom(&[("grow-shadow", 300), ("increase-size", 300)]),
            },
            ElementSpec {
                id: "extraItem".to_string(),
                interactions: click,
                animation: custom(&[("rotate", 300), ("change-color", 300)]),
            },
            ElementSpec {
                id: "list".to_string(),
                interactions: vec!["adding".to_string()],
                animation: ElementAnimation::Preset(Self::ITEM_ADDITION.to_string()),
            },
        ];

        Self {
            presets,
            interactions: vec![
                "click".to_string(),
                "mouseover".to_string(),
                "mouseout".to_string(),
            ],
            feedback_timeout_ms: default_feedback_timeout(),
            elements,
        }
    }
}
