// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scene of animated elements built from configuration.

use crate::config::{CueConfig, ElementSpec};
use crate::element::AnimatedElement;
use crate::error::{CueError, Result};
use crate::stage::Stage;
use classcue_interaction::DispatchReport;
use classcue_sequencer::{Millis, StateChange};
use indexmap::IndexMap;

/// Every configured element, ticked together
#[derive(Default)]
pub struct Scene {
    stage: Stage,
    elements: IndexMap<String, AnimatedElement>,
}

impl Scene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Build every element listed in `config`, with all its interactions bound
    pub fn from_config(config: &CueConfig) -> Result<Self> {
        let mut scene = Self::new();
        for spec in &config.elements {
            scene.add_element(spec, config)?;
        }
        tracing::info!("Scene ready with {} elements", scene.elements.len());
        Ok(scene)
    }

    /// Place an element on the stage and bind its interactions
    pub fn add_element(&mut self, spec: &ElementSpec, config: &CueConfig) -> Result<()> {
        let animation = config.resolve(&spec.animation)?;
        self.stage.insert(spec.id.as_str());
        let mut element = AnimatedElement::new(
            &self.stage,
            &spec.id,
            animation,
            config.interactions_for(spec),
            config.feedback_timeout_ms,
        )?;
        element.bind_all()?;
        self.elements.insert(spec.id.clone(), element);
        Ok(())
    }

    /// Look up an element
    pub fn element(&self, id: &str) -> Result<&AnimatedElement> {
        self.elements
            .get(id)
            .ok_or_else(|| CueError::MissingTarget(id.to_string()))
    }

    /// Look up an element mutably
    pub fn element_mut(&mut self, id: &str) -> Result<&mut AnimatedElement> {
        self.elements
            .get_mut(id)
            .ok_or_else(|| CueError::MissingTarget(id.to_string()))
    }

    /// Dispatch an interaction on one element
    pub fn trigger(&mut self, id: &str, interaction: &str) -> Result<DispatchReport> {
        Ok(self.element_mut(id)?.trigger(interaction))
    }

    /// Advance every element
    pub fn tick(&mut self, delta: Millis) {
        for element in self.elements.values_mut() {
            element.tick(delta);
        }
    }

    /// Whether no element is playing, waiting on a debounced trigger or
    /// holding a feedback state
    pub fn is_idle(&self) -> bool {
        self.elements.values().all(AnimatedElement::is_idle)
    }

    /// Record visual-state changes for [`Scene::take_changes`]. Off by default.
    pub fn set_journaling(&mut self, enabled: bool) {
        self.stage.set_journaling(enabled);
    }

    /// Drain the recorded visual-state changes of every element
    pub fn take_changes(&mut self) -> Vec<(String, StateChange)> {
        let mut changes = Vec::new();
        for (id, element) in &self.elements {
            let journal = element.element().borrow_mut().take_journal();
            changes.extend(journal.into_iter().map(|change| (id.clone(), change)));
        }
        changes
    }

    /// Element registry
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Animated elements in insertion order
    pub fn elements(&self) -> impl Iterator<Item = &AnimatedElement> {
        self.elements.values()
    }
}
