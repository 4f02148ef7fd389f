// SPDX-License-Identifier: MIT OR Apache-2.0
//! Animated element: one target, its sequencer and its interaction bindings.

use crate::config::AnimationConfig;
use crate::error::Result;
use crate::stage::{ElementHandle, Stage};
use classcue_interaction::{CallbackId, DispatchReport, Dispatcher, Interaction};
use classcue_sequencer::{Millis, PlaybackOptions, Sequencer, SequencerState};
use indexmap::IndexMap;
use std::cell::RefCell;
use std::rc::Rc;

/// A stage element whose animation is started by interactions
pub struct AnimatedElement {
    /// Element id on the stage
    id: String,
    /// Shared handle to the element
    element: ElementHandle,
    /// Sequencer shared with the binding callbacks
    sequencer: Rc<RefCell<Sequencer<ElementHandle>>>,
    /// Interaction dispatcher for this element
    dispatcher: Dispatcher,
    /// Callbacks that start the animation, per interaction
    bindings: IndexMap<Interaction, CallbackId>,
}

impl AnimatedElement {
    /// Build the sequencer and dispatcher for element `id`.
    ///
    /// Fails with `MissingTarget` if the stage has no such element and with
    /// `InvalidInput` if the animation is malformed. Unknown interaction
    /// names are dropped with a warning.
    pub fn new<S: AsRef<str>>(
        stage: &Stage,
        id: &str,
        animation: &AnimationConfig,
        interactions: &[S],
        feedback_timeout: Option<Millis>,
    ) -> Result<Self> {
        let element = stage.element(id)?;
        let sequencer = Sequencer::with_options(
            Rc::clone(&element),
            animation.sequence.clone(),
            animation.control,
        )?;

        let mut dispatcher = Dispatcher::new(interactions.iter().map(S::as_ref));
        if let Some(timeout) = feedback_timeout {
            dispatcher = dispatcher.with_feedback(Rc::clone(&element), timeout);
        }

        Ok(Self {
            id: id.to_string(),
            element,
            sequencer: Rc::new(RefCell::new(sequencer)),
            dispatcher,
            bindings: IndexMap::new(),
        })
    }

    /// Start the animation whenever `name` is dispatched.
    ///
    /// Binding an interaction twice keeps the first binding.
    pub fn bind(&mut self, name: &str) -> Result<CallbackId> {
        if let Some(id) = name
            .parse::<Interaction>()
            .ok()
            .and_then(|interaction| self.bindings.get(&interaction))
        {
            return Ok(*id);
        }

        let sequencer = Rc::clone(&self.sequencer);
        let element_id = self.id.clone();
        let callback_id = self.dispatcher.register(name, move |interaction| {
            if !sequencer.borrow_mut().start() {
                tracing::debug!(element = %element_id, %interaction, "animation already playing");
            }
            Ok(())
        })?;

        let interaction = name.parse::<Interaction>()?;
        self.bindings.insert(interaction, callback_id);
        Ok(callback_id)
    }

    /// Bind every recognized interaction
    pub fn bind_all(&mut self) -> Result<()> {
        let names: Vec<_> = self.dispatcher.recognized().map(|i| i.name()).collect();
        for name in names {
            self.bind(name)?;
        }
        Ok(())
    }

    /// Remove the binding for `name`. Returns whether it was bound.
    pub fn unbind(&mut self, name: &str) -> bool {
        let Ok(interaction) = name.parse::<Interaction>() else {
            return false;
        };
        match self.bindings.swap_remove(&interaction) {
            Some(id) => self.dispatcher.unregister(id),
            None => false,
        }
    }

    /// Interactions currently bound
    pub fn bound(&self) -> impl Iterator<Item = Interaction> + '_ {
        self.bindings.keys().copied()
    }

    /// Dispatch an interaction on this element
    pub fn trigger(&mut self, name: &str) -> DispatchReport {
        self.dispatcher.dispatch(name)
    }

    /// Dispatch an interaction once rapid triggers settle for `delay`
    pub fn trigger_debounced(&mut self, name: &str, delay: Millis) -> Result<()> {
        self.dispatcher.debounce_dispatch(name, delay)?;
        Ok(())
    }

    /// Access the dispatcher to register additional callbacks
    pub fn dispatcher_mut(&mut self) -> &mut Dispatcher {
        &mut self.dispatcher
    }

    /// Start the animation directly
    pub fn start(&mut self) -> bool {
        self.sequencer.borrow_mut().start()
    }

    /// Pause the animation
    pub fn pause(&mut self) {
        self.sequencer.borrow_mut().pause();
    }

    /// Resume a paused animation
    pub fn resume(&mut self) -> bool {
        self.sequencer.borrow_mut().resume()
    }

    /// Reset the animation and clear the element's states
    pub fn reset(&mut self) {
        self.sequencer.borrow_mut().reset();
    }

    /// Replace speed and looping
    pub fn configure(&mut self, options: PlaybackOptions) -> Result<()> {
        self.sequencer.borrow_mut().configure(options)?;
        Ok(())
    }

    /// Swap in another animation; playback returns to step 0
    pub fn apply_preset(&mut self, animation: &AnimationConfig) -> Result<()> {
        animation.validate()?;
        let mut sequencer = self.sequencer.borrow_mut();
        sequencer.set_sequence(animation.sequence.clone())?;
        sequencer.configure(animation.control)?;
        Ok(())
    }

    /// Advance both the dispatcher and the animation
    pub fn tick(&mut self, delta: Millis) {
        self.dispatcher.tick(delta);
        self.sequencer.borrow_mut().tick(delta);
    }

    /// Animation state
    pub fn state(&self) -> SequencerState {
        self.sequencer.borrow().state()
    }

    /// Whether nothing is playing, waiting to be dispatched or waiting to
    /// drop a feedback state
    pub fn is_idle(&self) -> bool {
        self.state() != SequencerState::Running
            && !self.dispatcher.has_pending()
            && !self.dispatcher.has_feedback_pending()
    }

    /// Element id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Element handle
    pub fn element(&self) -> &ElementHandle {
        &self.element
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CueError;
    use classcue_sequencer::{AnimationStep, LoopCount, StateChange};

    fn pulse() -> AnimationConfig {
        AnimationConfig::new(
            vec![AnimationStep::new("grow", 100), AnimationStep::new("shrink", 50)],
            PlaybackOptions::default(),
        )
    }

    fn stage_with(id: &str) -> Stage {
        let mut stage = Stage::new();
        stage.insert(id);
        stage
    }

    #[test]
    fn test_missing_target() {
        let stage = Stage::new();
        let result = AnimatedElement::new(&stage, "ghost", &pulse(), &["click"], None);
        assert!(matches!(result, Err(CueError::MissingTarget(_))));
    }

    #[test]
    fn test_malformed_animation() {
        let stage = stage_with("item");
        let bad =
            AnimationConfig::new(vec![AnimationStep::new("", 10)], PlaybackOptions::default());
        let result = AnimatedElement::new(&stage, "item", &bad, &["click"], None);
        assert!(matches!(result, Err(CueError::Sequencer(_))));
    }

    #[test]
    fn test_trigger_starts_animation() {
        let stage = stage_with("item");
        let mut element = AnimatedElement::new(&stage, "item", &pulse(), &["click"], None).unwrap();
        element.bind("click").unwrap();

        let report = element.trigger("click");
        assert_eq!(report.invoked, 1);
        assert_eq!(element.state(), SequencerState::Running);
        assert!(element.element().borrow().contains("grow"));

        element.tick(100);
        assert!(element.element().borrow().contains("shrink"));
        element.tick(50);
        assert!(element.is_idle());
        assert!(element.element().borrow().is_empty());
    }

    #[test]
    fn test_retrigger_while_playing_is_ignored() {
        let mut stage = Stage::new();
        stage.set_journaling(true);
        stage.insert("item");
        let mut element = AnimatedElement::new(&stage, "item", &pulse(), &["click"], None).unwrap();
        element.bind("click").unwrap();
        element.trigger("click");
        element.tick(120);
        element.trigger("click");
        element.tick(30);

        let journal = element.element().borrow().journal().to_vec();
        let grows = journal
            .iter()
            .filter(|change| **change == StateChange::Added("grow".to_string()))
            .count();
        assert_eq!(grows, 1);
    }

    #[test]
    fn test_bind_unrecognized_rejected() {
        let stage = stage_with("item");
        let mut element =
            AnimatedElement::new(&stage, "item", &pulse(), &["click", "hover"], None).unwrap();
        assert!(element.bind("hover").is_err());
        assert!(element.bind("dragging").is_err());
        assert!(element.bind("click").is_ok());
    }

    #[test]
    fn test_bind_twice_keeps_one_callback() {
        let stage = stage_with("item");
        let mut element = AnimatedElement::new(&stage, "item", &pulse(), &["click"], None).unwrap();
        let first = element.bind("click").unwrap();
        let second = element.bind("click").unwrap();
        assert_eq!(first, second);
        assert_eq!(element.dispatcher_mut().callback_count("click"), 1);
    }

    #[test]
    fn test_unbind() {
        let stage = stage_with("item");
        let mut element =
            AnimatedElement::new(&stage, "item", &pulse(), &["click", "mouseover"], None).unwrap();
        element.bind_all().unwrap();
        assert_eq!(element.bound().count(), 2);

        assert!(element.unbind("click"));
        assert!(!element.unbind("click"));
        assert_eq!(element.trigger("click").invoked, 0);
        assert_eq!(element.state(), SequencerState::Idle);
    }

    #[test]
    fn test_failing_extra_callback_does_not_block_animation() {
        let stage = stage_with("item");
        let mut element =
            AnimatedElement::new(&stage, "item", &pulse(), &["adding"], None).unwrap();
        element
            .dispatcher_mut()
            .register("adding", |_| Err("analytics offline".into()))
            .unwrap();
        element.bind("adding").unwrap();

        let report = element.trigger("adding");
        assert_eq!(report.failed, 1);
        assert_eq!(element.state(), SequencerState::Running);
    }

    #[test]
    fn test_debounced_trigger() {
        let stage = stage_with("item");
        let mut element = AnimatedElement::new(&stage, "item", &pulse(), &["click"], None).unwrap();
        element.bind("click").unwrap();
        element.trigger_debounced("click", 200).unwrap();
        element.tick(50);
        element.trigger_debounced("click", 200).unwrap();
        element.tick(199);
        assert_eq!(element.state(), SequencerState::Idle);
        assert!(!element.is_idle());
        element.tick(1);
        assert_eq!(element.state(), SequencerState::Running);
    }

    #[test]
    fn test_feedback_state_alongside_animation() {
        let stage = stage_with("item");
        let mut element =
            AnimatedElement::new(&stage, "item", &pulse(), &["click"], Some(1_000)).unwrap();
        element.bind("click").unwrap();
        element.trigger("click");
        {
            let states = element.element().borrow();
            assert!(states.contains("click"));
            assert!(states.contains("grow"));
        }
        element.tick(150);
        assert!(!element.element().borrow().contains("grow"));
        assert!(!element.is_idle());

        element.tick(850);
        assert!(element.element().borrow().is_empty());
        assert!(element.is_idle());
    }

    #[test]
    fn test_infinite_loop_without_journal_stays_bounded() {
        let stage = stage_with("spinner");
        let spin = AnimationConfig::new(
            vec![AnimationStep::new("spin", 10)],
            PlaybackOptions::new(1.0, LoopCount::Infinite),
        );
        let mut element = AnimatedElement::new(&stage, "spinner", &spin, &["click"], None).unwrap();
        assert!(element.start());
        element.tick(1_000_000);
        assert_eq!(element.state(), SequencerState::Running);
        assert!(element.element().borrow().journal().is_empty());
    }

    #[test]
    fn test_apply_preset_and_configure() {
        let stage = stage_with("item");
        let mut element = AnimatedElement::new(&stage, "item", &pulse(), &["click"], None).unwrap();
        element.bind("click").unwrap();
        element.trigger("click");
        element.tick(10);

        let flash = AnimationConfig::new(
            vec![AnimationStep::new("flash", 40)],
            PlaybackOptions::new(1.0, LoopCount::Finite(2)),
        );
        element.apply_preset(&flash).unwrap();
        assert!(element.element().borrow().is_empty());
        assert_eq!(element.state(), SequencerState::Idle);

        element.trigger("click");
        element.tick(40);
        assert!(element.element().borrow().contains("flash"));
        element.tick(40);
        assert!(element.is_idle());

        assert!(element.configure(PlaybackOptions::new(0.0, LoopCount::Infinite)).is_err());
    }

    #[test]
    fn test_pause_resume_reset() {
        let stage = stage_with("item");
        let mut element = AnimatedElement::new(&stage, "item", &pulse(), &["click"], None).unwrap();
        assert!(element.start());
        element.tick(60);
        element.pause();
        element.tick(500);
        assert_eq!(element.state(), SequencerState::Paused);
        assert!(element.resume());
        element.tick(40);
        assert!(element.element().borrow().contains("shrink"));

        element.reset();
        assert!(element.element().borrow().is_empty());
        assert_eq!(element.state(), SequencerState::Idle);
    }
}
