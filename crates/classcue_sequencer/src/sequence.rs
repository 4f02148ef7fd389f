// SPDX-License-Identifier: MIT OR Apache-2.0
//! Sequencer playing an ordered list of steps against one target.

use crate::error::Result;
use crate::playback::{LoopCount, PlaybackOptions};
use crate::step::{validate_steps, AnimationStep};
use crate::target::VisualTarget;
use crate::timer::{Clock, Millis, Timer};

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SequencerState {
    /// At index 0 with nothing in flight
    #[default]
    Idle,
    /// A step is applied and its removal is scheduled
    Running,
    /// Paused, possibly with a step still applied
    Paused,
}

/// Plays `(visual_state, duration)` steps one at a time on a target.
///
/// `start` only begins from idle. It is a no-op while a step is in flight or
/// while paused; use [`Sequencer::resume`] to continue and
/// [`Sequencer::restart`] to begin again from step 0.
///
/// Pausing cancels the pending timer and records the time left on the
/// in-flight step. Its visual state stays applied until playback resumes and
/// that remaining time has elapsed.
pub struct Sequencer<T: VisualTarget> {
    /// Handle to the element being animated
    target: T,
    /// Steps in playback order
    steps: Vec<AnimationStep>,
    /// Index of the current step
    index: usize,
    /// Paused flag
    paused: bool,
    /// Whether the step at `index` is applied to the target
    in_flight: bool,
    /// Time left on the in-flight step, captured on pause
    remaining: Option<Millis>,
    /// Deadline of the in-flight step
    timer: Timer,
    /// Virtual clock
    clock: Clock,
    /// Speed and looping
    options: PlaybackOptions,
    /// Full passes finished since the last start
    loops_completed: u32,
    /// Time at which the current pass began
    pass_started_at: Millis,
}

impl<T: VisualTarget> Sequencer<T> {
    /// Create a sequencer with default playback options
    pub fn new(target: T, steps: Vec<AnimationStep>) -> Result<Self> {
        Self::with_options(target, steps, PlaybackOptions::default())
    }

    /// Create a sequencer with the given playback options
    pub fn with_options(
        target: T,
        steps: Vec<AnimationStep>,
        options: PlaybackOptions,
    ) -> Result<Self> {
        validate_steps(&steps)?;
        options.validate()?;
        Ok(Self {
            target,
            steps,
            index: 0,
            paused: false,
            in_flight: false,
            remaining: None,
            timer: Timer::new(),
            clock: Clock::new(),
            options,
            loops_completed: 0,
            pass_started_at: 0,
        })
    }

    /// Begin playback from step 0. Returns whether playback began.
    pub fn start(&mut self) -> bool {
        if self.paused || self.in_flight || self.index != 0 {
            tracing::debug!(index = self.index, paused = self.paused, "start ignored");
            return false;
        }
        if self.steps.is_empty() {
            return false;
        }
        self.begin_pass(true);
        true
    }

    /// Reset, then start from step 0
    pub fn restart(&mut self) -> bool {
        self.reset();
        self.start()
    }

    /// Pause playback, holding the in-flight step
    pub fn pause(&mut self) {
        if self.paused {
            return;
        }
        self.paused = true;
        if self.in_flight {
            self.remaining = self.timer.remaining(self.clock.now());
            self.timer.cancel();
        }
        tracing::debug!(index = self.index, remaining = ?self.remaining, "sequence paused");
    }

    /// Resume a paused sequence. Returns whether the sequencer was paused.
    pub fn resume(&mut self) -> bool {
        if !self.paused {
            return false;
        }
        self.paused = false;

        if self.in_flight {
            let remaining = self.remaining.take().unwrap_or(0);
            self.timer.schedule(self.clock.now(), remaining);
        } else if self.index < self.steps.len() {
            if self.index == 0 {
                self.begin_pass(true);
            } else {
                self.execute_step();
            }
        }
        tracing::debug!(index = self.index, "sequence resumed");
        true
    }

    /// Return to step 0, clear the paused flag and every visual state
    pub fn reset(&mut self) {
        self.timer.cancel();
        self.index = 0;
        self.paused = false;
        self.in_flight = false;
        self.remaining = None;
        self.loops_completed = 0;
        self.target.clear_states();
    }

    /// Replace the steps and return to step 0. The paused flag is kept.
    pub fn set_sequence(&mut self, steps: Vec<AnimationStep>) -> Result<()> {
        validate_steps(&steps)?;
        self.timer.cancel();
        if self.in_flight {
            let state = &self.steps[self.index].visual_state;
            self.target.remove_state(state);
        }
        self.in_flight = false;
        self.remaining = None;
        self.steps = steps;
        self.index = 0;
        self.loops_completed = 0;
        Ok(())
    }

    /// Replace the playback options. Applies to steps scheduled afterwards.
    pub fn configure(&mut self, options: PlaybackOptions) -> Result<()> {
        options.validate()?;
        self.options = options;
        Ok(())
    }

    /// Change only the speed
    pub fn set_speed(&mut self, speed: f32) -> Result<()> {
        self.configure(PlaybackOptions {
            speed,
            ..self.options
        })
    }

    /// Change only the loop count
    pub fn set_loop_count(&mut self, loop_count: LoopCount) -> Result<()> {
        self.configure(PlaybackOptions {
            loop_count,
            ..self.options
        })
    }

    /// Advance the clock, running every step boundary the delta spans
    pub fn tick(&mut self, delta: Millis) {
        let target_time = self.clock.now().saturating_add(delta);
        while let Some(deadline) = self.timer.take_due(target_time) {
            self.clock.advance_to(deadline);
            self.finish_step();
        }
        self.clock.advance_to(target_time);
    }

    /// Current playback state
    pub fn state(&self) -> SequencerState {
        if self.paused {
            SequencerState::Paused
        } else if self.in_flight {
            SequencerState::Running
        } else {
            SequencerState::Idle
        }
    }

    /// Index of the current step
    pub fn current_index(&self) -> usize {
        self.index
    }

    /// Step currently applied to the target
    pub fn current_step(&self) -> Option<&AnimationStep> {
        if self.in_flight {
            self.steps.get(self.index)
        } else {
            None
        }
    }

    /// Whether playback is paused
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Steps in playback order
    pub fn steps(&self) -> &[AnimationStep] {
        &self.steps
    }

    /// Playback options
    pub fn options(&self) -> PlaybackOptions {
        self.options
    }

    /// Full passes finished since the last start
    pub fn loops_completed(&self) -> u32 {
        self.loops_completed
    }

    /// Time left on the in-flight step
    pub fn remaining(&self) -> Option<Millis> {
        if self.paused {
            self.remaining
        } else {
            self.timer.remaining(self.clock.now())
        }
    }

    /// Current virtual time
    pub fn now(&self) -> Millis {
        self.clock.now()
    }

    /// Target handle
    pub fn target(&self) -> &T {
        &self.target
    }

    fn begin_pass(&mut self, fresh: bool) {
        if fresh {
            self.loops_completed = 0;
        }
        self.pass_started_at = self.clock.now();
        self.execute_step();
    }

    fn execute_step(&mut self) {
        let step = &self.steps[self.index];
        let duration = self.options.scaled(step.duration_ms);
        self.target.add_state(&step.visual_state);
        self.timer.schedule(self.clock.now(), duration);
        self.in_flight = true;
        tracing::debug!(
            index = self.index,
            state = %step.visual_state,
            duration,
            at = self.clock.now(),
            "step applied"
        );
    }

    fn finish_step(&mut self) {
        let state = &self.steps[self.index].visual_state;
        self.target.remove_state(state);
        self.in_flight = false;
        self.index += 1;

        if self.index < self.steps.len() {
            self.execute_step();
            return;
        }

        self.index = 0;
        self.loops_completed = self.loops_completed.saturating_add(1);
        if !self.options.loop_count.has_more(self.loops_completed) {
            tracing::debug!(loops = self.loops_completed, "sequence complete");
            return;
        }
        // A pass that takes no time would loop within a single tick forever.
        if self.clock.now() == self.pass_started_at {
            tracing::warn!("zero-length sequence cannot loop, stopping");
            return;
        }
        self.begin_pass(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::{ClassList, StateChange};

    fn added(state: &str) -> StateChange {
        StateChange::Added(state.to_string())
    }

    fn removed(state: &str) -> StateChange {
        StateChange::Removed(state.to_string())
    }

    fn two_steps() -> Vec<AnimationStep> {
        vec![AnimationStep::new("A", 100), AnimationStep::new("B", 50)]
    }

    #[test]
    fn test_two_step_timeline() {
        let mut seq = Sequencer::new(ClassList::with_journal(), two_steps()).unwrap();
        assert!(seq.start());
        assert_eq!(seq.target().journal(), &[added("A")]);

        seq.tick(99);
        assert!(seq.target().contains("A"));
        assert_eq!(seq.current_index(), 0);

        seq.tick(1);
        assert_eq!(seq.target().journal(), &[added("A"), removed("A"), added("B")]);
        assert_eq!(seq.current_index(), 1);

        seq.tick(50);
        assert_eq!(
            seq.target().journal(),
            &[added("A"), removed("A"), added("B"), removed("B")]
        );
        assert_eq!(seq.current_index(), 0);
        assert_eq!(seq.state(), SequencerState::Idle);
        assert!(seq.target().is_empty());
    }

    #[test]
    fn test_large_tick_runs_each_step_once_in_order() {
        let steps = vec![
            AnimationStep::new("fadeIn", 300),
            AnimationStep::new("expand", 200),
            AnimationStep::new("settle", 100),
        ];
        let mut seq = Sequencer::new(ClassList::with_journal(), steps).unwrap();
        seq.start();
        seq.tick(10_000);
        assert_eq!(
            seq.target().journal(),
            &[
                added("fadeIn"),
                removed("fadeIn"),
                added("expand"),
                removed("expand"),
                added("settle"),
                removed("settle"),
            ]
        );
        assert_eq!(seq.loops_completed(), 1);
    }

    #[test]
    fn test_start_is_noop_mid_sequence() {
        let mut seq = Sequencer::new(ClassList::with_journal(), two_steps()).unwrap();
        assert!(seq.start());
        seq.tick(120);
        assert!(!seq.start());
        assert_eq!(seq.current_index(), 1);
        assert_eq!(seq.remaining(), Some(30));
    }

    #[test]
    fn test_start_after_completion_replays() {
        let mut seq = Sequencer::new(ClassList::with_journal(), two_steps()).unwrap();
        seq.start();
        seq.tick(150);
        assert!(seq.start());
        assert!(seq.target().contains("A"));
    }

    #[test]
    fn test_pause_cancels_pending_timer() {
        let mut seq = Sequencer::new(ClassList::with_journal(), two_steps()).unwrap();
        seq.start();
        seq.tick(40);
        seq.pause();
        assert_eq!(seq.state(), SequencerState::Paused);

        seq.tick(1_000);
        assert!(seq.target().contains("A"));
        assert_eq!(seq.current_index(), 0);
        assert_eq!(seq.remaining(), Some(60));
    }

    #[test]
    fn test_resume_continues_with_remaining_time() {
        let mut seq = Sequencer::new(ClassList::with_journal(), two_steps()).unwrap();
        seq.start();
        seq.tick(120);
        seq.pause();
        seq.tick(500);
        assert!(seq.resume());

        seq.tick(29);
        assert!(seq.target().contains("B"));
        seq.tick(1);
        assert!(seq.target().is_empty());
        assert_eq!(
            seq.target().journal(),
            &[added("A"), removed("A"), added("B"), removed("B")]
        );
    }

    #[test]
    fn test_start_while_paused_is_noop() {
        let mut seq = Sequencer::new(ClassList::with_journal(), two_steps()).unwrap();
        seq.pause();
        assert!(!seq.start());
        assert!(seq.target().journal().is_empty());

        assert!(seq.resume());
        assert_eq!(seq.state(), SequencerState::Running);
        assert!(seq.target().contains("A"));
    }

    #[test]
    fn test_resume_when_not_paused() {
        let mut seq = Sequencer::new(ClassList::with_journal(), two_steps()).unwrap();
        assert!(!seq.resume());
        assert_eq!(seq.state(), SequencerState::Idle);
    }

    #[test]
    fn test_reset_mid_step() {
        let mut seq = Sequencer::new(ClassList::with_journal(), two_steps()).unwrap();
        seq.start();
        seq.tick(110);
        seq.pause();
        seq.reset();

        assert_eq!(seq.current_index(), 0);
        assert!(!seq.is_paused());
        assert!(seq.target().is_empty());
        assert_eq!(seq.state(), SequencerState::Idle);

        let before = seq.target().journal().len();
        seq.tick(1_000);
        assert_eq!(seq.target().journal().len(), before);
    }

    #[test]
    fn test_restart() {
        let mut seq = Sequencer::new(ClassList::with_journal(), two_steps()).unwrap();
        seq.start();
        seq.tick(120);
        assert!(seq.restart());
        assert_eq!(seq.current_index(), 0);
        assert_eq!(seq.target().states().collect::<Vec<_>>(), vec!["A"]);
    }

    #[test]
    fn test_set_sequence_replaces_in_flight_step() {
        let mut seq = Sequencer::new(ClassList::with_journal(), two_steps()).unwrap();
        seq.start();
        seq.tick(20);
        seq.set_sequence(vec![AnimationStep::new("rotate", 300)]).unwrap();

        assert!(seq.target().is_empty());
        assert_eq!(seq.state(), SequencerState::Idle);
        seq.tick(1_000);
        assert!(seq.target().is_empty());

        assert!(seq.start());
        assert!(seq.target().contains("rotate"));
    }

    #[test]
    fn test_set_sequence_rejects_malformed_steps() {
        let mut seq = Sequencer::new(ClassList::with_journal(), two_steps()).unwrap();
        let result = seq.set_sequence(vec![AnimationStep::new("", 10)]);
        assert!(result.is_err());
        assert_eq!(seq.steps(), two_steps().as_slice());
    }

    #[test]
    fn test_empty_sequence_does_not_start() {
        let mut seq = Sequencer::new(ClassList::with_journal(), Vec::new()).unwrap();
        assert!(!seq.start());
        assert_eq!(seq.state(), SequencerState::Idle);
    }

    #[test]
    fn test_speed_scales_durations() {
        let options = PlaybackOptions::new(2.0, LoopCount::Finite(1));
        let mut seq =
            Sequencer::with_options(ClassList::with_journal(), two_steps(), options).unwrap();
        seq.start();
        seq.tick(50);
        assert!(seq.target().contains("B"));
        seq.tick(25);
        assert!(seq.target().is_empty());
    }

    #[test]
    fn test_finite_loops() {
        let options = PlaybackOptions::new(1.0, LoopCount::Finite(3));
        let mut seq =
            Sequencer::with_options(ClassList::with_journal(), two_steps(), options).unwrap();
        seq.start();
        seq.tick(10_000);
        assert_eq!(seq.loops_completed(), 3);
        assert_eq!(seq.target().journal().len(), 12);
        assert_eq!(seq.state(), SequencerState::Idle);
    }

    #[test]
    fn test_infinite_loop_until_reset() {
        let options = PlaybackOptions::new(1.0, LoopCount::Infinite);
        let mut seq =
            Sequencer::with_options(ClassList::with_journal(), two_steps(), options).unwrap();
        seq.start();
        seq.tick(1_500);
        assert_eq!(seq.loops_completed(), 10);
        assert_eq!(seq.state(), SequencerState::Running);

        seq.reset();
        seq.tick(1_500);
        assert_eq!(seq.loops_completed(), 0);
        assert!(seq.target().is_empty());
    }

    #[test]
    fn test_infinite_loop_keeps_no_history_without_journal() {
        let options = PlaybackOptions::new(1.0, LoopCount::Infinite);
        let steps = vec![AnimationStep::new("spin", 10)];
        let mut seq = Sequencer::with_options(ClassList::new(), steps, options).unwrap();
        seq.start();
        seq.tick(1_000_000);
        assert_eq!(seq.loops_completed(), 100_000);
        assert_eq!(seq.state(), SequencerState::Running);
        assert!(seq.target().journal().is_empty());
        assert_eq!(seq.target().states().collect::<Vec<_>>(), vec!["spin"]);
    }

    #[test]
    fn test_zero_length_loop_stops() {
        let options = PlaybackOptions::new(1.0, LoopCount::Infinite);
        let steps = vec![AnimationStep::new("flash", 0)];
        let mut seq = Sequencer::with_options(ClassList::with_journal(), steps, options).unwrap();
        seq.start();
        seq.tick(0);
        assert_eq!(seq.loops_completed(), 1);
        assert_eq!(seq.state(), SequencerState::Idle);
    }

    #[test]
    fn test_invalid_options_rejected() {
        let mut seq = Sequencer::new(ClassList::with_journal(), two_steps()).unwrap();
        assert!(seq.set_speed(-1.0).is_err());
        assert!(seq.set_loop_count(LoopCount::Finite(0)).is_err());
        assert_eq!(seq.options(), PlaybackOptions::default());
    }
}
