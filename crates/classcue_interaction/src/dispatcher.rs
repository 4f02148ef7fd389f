// SPDX-License-Identifier: MIT OR Apache-2.0
//! Interaction dispatcher bound to one target.

use crate::debounce::Debouncer;
use crate::error::{InteractionError, Result};
use crate::interaction::Interaction;
use classcue_sequencer::{Clock, Millis, Timer, VisualTarget};
use indexmap::{IndexMap, IndexSet};
use uuid::Uuid;

/// Default time an interaction feedback state stays applied
pub const DEFAULT_FEEDBACK_TIMEOUT_MS: Millis = 1000;

/// Error returned by a failing callback
pub type CallbackError = Box<dyn std::error::Error>;

/// Result returned by callbacks
pub type CallbackResult = std::result::Result<(), CallbackError>;

type Callback = Box<dyn FnMut(Interaction) -> CallbackResult>;

/// Unique identifier for a registered callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallbackId(pub Uuid);

impl CallbackId {
    /// Create a new random callback ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CallbackId {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of one dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchReport {
    /// Callbacks invoked
    pub invoked: usize,
    /// Callbacks that returned an error
    pub failed: usize,
}

impl DispatchReport {
    /// Callbacks that completed without error
    pub fn succeeded(&self) -> usize {
        self.invoked - self.failed
    }
}

/// Work held back by the debouncer
enum Deferred {
    Callback(Box<dyn FnOnce() -> CallbackResult>),
    Dispatch(Interaction),
}

/// Feedback state applied to the target for each dispatched interaction
struct Feedback {
    target: Box<dyn VisualTarget>,
    timeout: Millis,
    timer: Timer,
    active: Option<Interaction>,
}

#[derive(Clone, Copy)]
enum Due {
    Feedback,
    Debounce,
}

/// Routes recognized interactions to registered callbacks
pub struct Dispatcher {
    /// Interactions this dispatcher accepts
    recognized: IndexSet<Interaction>,
    /// Callbacks per interaction, in registration order
    callbacks: IndexMap<Interaction, Vec<(CallbackId, Callback)>>,
    /// Pending debounced work
    debouncer: Debouncer<Deferred>,
    /// Optional feedback states
    feedback: Option<Feedback>,
    /// Virtual clock
    clock: Clock,
}

impl Dispatcher {
    /// Create a dispatcher for the given interaction names.
    ///
    /// Names missing from the registry are dropped with a warning.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut recognized = IndexSet::new();
        for name in names {
            let name = name.as_ref();
            match name.parse::<Interaction>() {
                Ok(interaction) => {
                    recognized.insert(interaction);
                }
                Err(_) => tracing::warn!("Dropping unknown interaction '{}'", name),
            }
        }
        Self {
            recognized,
            callbacks: IndexMap::new(),
            debouncer: Debouncer::new(),
            feedback: None,
            clock: Clock::new(),
        }
    }

    /// Apply a feedback state named after each dispatched interaction to
    /// `target`, removed again after `timeout` milliseconds
    pub fn with_feedback(mut self, target: impl VisualTarget + 'static, timeout: Millis) -> Self {
        self.feedback = Some(Feedback {
            target: Box::new(target),
            timeout,
            timer: Timer::new(),
            active: None,
        });
        self
    }

    /// Recognize another registry interaction
    pub fn recognize(&mut self, name: &str) -> Result<Interaction> {
        let interaction = name.parse::<Interaction>()?;
        self.recognized.insert(interaction);
        Ok(interaction)
    }

    /// Whether `name` is recognized by this dispatcher
    pub fn is_recognized(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Recognized interactions
    pub fn recognized(&self) -> impl Iterator<Item = Interaction> + '_ {
        self.recognized.iter().copied()
    }

    /// Register a callback for an interaction
    pub fn register<F>(&mut self, name: &str, callback: F) -> Result<CallbackId>
    where
        F: FnMut(Interaction) -> CallbackResult + 'static,
    {
        let interaction = self.require(name)?;
        let id = CallbackId::new();
        self.callbacks
            .entry(interaction)
            .or_default()
            .push((id, Box::new(callback)));
        Ok(id)
    }

    /// Remove one callback. Returns whether it was registered.
    pub fn unregister(&mut self, id: CallbackId) -> bool {
        for callbacks in self.callbacks.values_mut() {
            let before = callbacks.len();
            callbacks.retain(|(existing, _)| *existing != id);
            if callbacks.len() != before {
                return true;
            }
        }
        false
    }

    /// Remove every callback for an interaction, returning how many were removed
    pub fn clear(&mut self, name: &str) -> usize {
        self.lookup(name)
            .and_then(|interaction| self.callbacks.swap_remove(&interaction))
            .map_or(0, |callbacks| callbacks.len())
    }

    /// Number of callbacks registered for an interaction
    pub fn callback_count(&self, name: &str) -> usize {
        self.lookup(name)
            .and_then(|interaction| self.callbacks.get(&interaction))
            .map_or(0, Vec::len)
    }

    /// Invoke every callback registered for `name`.
    ///
    /// A failing callback is logged and the remaining ones still run.
    /// Unrecognized names are logged and ignored.
    pub fn dispatch(&mut self, name: &str) -> DispatchReport {
        match self.lookup(name) {
            Some(interaction) => self.dispatch_interaction(interaction),
            None => {
                tracing::error!("Interaction '{}' is not recognized", name);
                DispatchReport::default()
            }
        }
    }

    /// Run `callback` once, `delay` after the most recent debounce call.
    ///
    /// `debounce` and [`Dispatcher::debounce_dispatch`] share one pending
    /// slot: a later call to either replaces whatever is waiting.
    pub fn debounce<F>(&mut self, callback: F, delay: Millis)
    where
        F: FnOnce() -> CallbackResult + 'static,
    {
        let now = self.clock.now();
        self.debouncer
            .call(now, Deferred::Callback(Box::new(callback)), delay);
    }

    /// Dispatch `name` once, `delay` after the most recent debounce call.
    ///
    /// Shares the pending slot with [`Dispatcher::debounce`], so a waiting
    /// callback is replaced by this dispatch and the other way round.
    pub fn debounce_dispatch(&mut self, name: &str, delay: Millis) -> Result<()> {
        let interaction = self.require(name)?;
        let now = self.clock.now();
        self.debouncer.call(now, Deferred::Dispatch(interaction), delay);
        Ok(())
    }

    /// Drop pending debounced work
    pub fn cancel_debounce(&mut self) -> bool {
        self.debouncer.cancel().is_some()
    }

    /// Whether debounced work is waiting
    pub fn has_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Whether a feedback state is applied and waiting to expire
    pub fn has_feedback_pending(&self) -> bool {
        self.feedback
            .as_ref()
            .is_some_and(|feedback| feedback.timer.is_pending())
    }

    /// Advance the clock, firing debounced work and feedback expiry
    pub fn tick(&mut self, delta: Millis) {
        let target_time = self.clock.now().saturating_add(delta);
        loop {
            let feedback_due = self
                .feedback
                .as_ref()
                .and_then(|feedback| feedback.timer.deadline())
                .map(|deadline| (deadline, Due::Feedback));
            let debounce_due = self
                .debouncer
                .deadline()
                .map(|deadline| (deadline, Due::Debounce));

            let next = [feedback_due, debounce_due]
                .into_iter()
                .flatten()
                .filter(|(deadline, _)| *deadline <= target_time)
                .min_by_key(|(deadline, _)| *deadline);
            let Some((deadline, due)) = next else {
                break;
            };

            self.clock.advance_to(deadline);
            match due {
                Due::Feedback => self.expire_feedback(),
                Due::Debounce => self.fire_debounced(),
            }
        }
        self.clock.advance_to(target_time);
    }

    /// Current virtual time
    pub fn now(&self) -> Millis {
        self.clock.now()
    }

    fn lookup(&self, name: &str) -> Option<Interaction> {
        name.parse::<Interaction>()
            .ok()
            .filter(|interaction| self.recognized.contains(interaction))
    }

    fn require(&self, name: &str) -> Result<Interaction> {
        self.lookup(name).ok_or_else(|| {
            InteractionError::InvalidArgument(format!("interaction '{name}' is not recognized"))
        })
    }

    fn dispatch_interaction(&mut self, interaction: Interaction) -> DispatchReport {
        self.apply_feedback(interaction);

        let mut report = DispatchReport::default();
        let Some(callbacks) = self.callbacks.get_mut(&interaction) else {
            return report;
        };
        for (id, callback) in callbacks.iter_mut() {
            report.invoked += 1;
            if let Err(e) = callback(interaction) {
                report.failed += 1;
                tracing::error!("Callback {:?} failed for '{}': {}", id.0, interaction, e);
            }
        }
        tracing::debug!(
            %interaction,
            invoked = report.invoked,
            failed = report.failed,
            "interaction dispatched"
        );
        report
    }

    fn apply_feedback(&mut self, interaction: Interaction) {
        let now = self.clock.now();
        let Some(feedback) = self.feedback.as_mut() else {
            return;
        };
        for recognized in &self.recognized {
            feedback.target.remove_state(recognized.name());
        }
        feedback.target.add_state(interaction.name());
        feedback.active = Some(interaction);
        feedback.timer.schedule(now, feedback.timeout);
    }

    fn expire_feedback(&mut self) {
        let Some(feedback) = self.feedback.as_mut() else {
            return;
        };
        feedback.timer.cancel();
        if let Some(interaction) = feedback.active.take() {
            feedback.target.remove_state(interaction.name());
        }
    }

    fn fire_debounced(&mut self) {
        let now = self.clock.now();
        match self.debouncer.take_due(now) {
            Some(Deferred::Callback(callback)) => {
                if let Err(e) = callback() {
                    tracing::error!("Debounced callback failed: {}", e);
                }
            }
            Some(Deferred::Dispatch(interaction)) => {
                self.dispatch_interaction(interaction);
            }
            None => {}
        }
    }
}
