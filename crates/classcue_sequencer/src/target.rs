// SPDX-License-Identifier: MIT OR Apache-2.0
//! Visual targets driven by the sequencer.

use indexmap::IndexSet;
use std::cell::RefCell;
use std::rc::Rc;

/// Presentation-layer element whose visual states the core toggles
pub trait VisualTarget {
    /// Apply a visual state
    fn add_state(&mut self, state: &str);

    /// Remove a visual state
    fn remove_state(&mut self, state: &str);

    /// Remove every visual state
    fn clear_states(&mut self);
}

impl<T: VisualTarget + ?Sized> VisualTarget for Rc<RefCell<T>> {
    fn add_state(&mut self, state: &str) {
        self.borrow_mut().add_state(state);
    }

    fn remove_state(&mut self, state: &str) {
        self.borrow_mut().remove_state(state);
    }

    fn clear_states(&mut self) {
        self.borrow_mut().clear_states();
    }
}

impl<T: VisualTarget + ?Sized> VisualTarget for Box<T> {
    fn add_state(&mut self, state: &str) {
        (**self).add_state(state);
    }

    fn remove_state(&mut self, state: &str) {
        (**self).remove_state(state);
    }

    fn clear_states(&mut self) {
        (**self).clear_states();
    }
}

impl<T: VisualTarget + ?Sized> VisualTarget for &mut T {
    fn add_state(&mut self, state: &str) {
        (**self).add_state(state);
    }

    fn remove_state(&mut self, state: &str) {
        (**self).remove_state(state);
    }

    fn clear_states(&mut self) {
        (**self).clear_states();
    }
}

/// A change applied to a [`ClassList`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateChange {
    /// State added
    Added(String),
    /// State removed
    Removed(String),
    /// All states cleared
    Cleared,
}

/// In-memory class list with an optional journal of every change
#[derive(Debug, Clone, Default)]
pub struct ClassList {
    /// Active states in application order
    states: IndexSet<String>,
    /// Every call made against this list, when journaling is on
    journal: Option<Vec<StateChange>>,
}

impl ClassList {
    /// Create an empty class list without a journal
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty class list that records every change
    pub fn with_journal() -> Self {
        Self {
            states: IndexSet::new(),
            journal: Some(Vec::new()),
        }
    }

    /// Turn journaling on or off. Turning it off drops recorded changes.
    pub fn set_journaling(&mut self, enabled: bool) {
        match (enabled, self.journal.is_some()) {
            (true, false) => self.journal = Some(Vec::new()),
            (false, true) => self.journal = None,
            _ => {}
        }
    }

    /// Whether changes are being recorded
    pub fn is_journaling(&self) -> bool {
        self.journal.is_some()
    }

    /// Whether a state is currently applied
    pub fn contains(&self, state: &str) -> bool {
        self.states.contains(state)
    }

    /// Active states in application order
    pub fn states(&self) -> impl Iterator<Item = &str> {
        self.states.iter().map(String::as_str)
    }

    /// Number of active states
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether no state is applied
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Recorded changes
    pub fn journal(&self) -> &[StateChange] {
        self.journal.as_deref().unwrap_or_default()
    }

    /// Take the recorded changes, leaving the journal empty
    pub fn take_journal(&mut self) -> Vec<StateChange> {
        self.journal.as_mut().map(std::mem::take).unwrap_or_default()
    }

    fn record(&mut self, change: StateChange) {
        if let Some(journal) = self.journal.as_mut() {
            journal.push(change);
        }
    }
}

impl VisualTarget for ClassList {
    fn add_state(&mut self, state: &str) {
        self.states.insert(state.to_string());
        self.record(StateChange::Added(state.to_string()));
    }

    fn remove_state(&mut self, state: &str) {
        self.states.shift_remove(state);
        self.record(StateChange::Removed(state.to_string()));
    }

    fn clear_states(&mut self) {
        self.states.clear();
        self.record(StateChange::Cleared);
    }
}
