// SPDX-License-Identifier: MIT OR Apache-2.0
//! Element registry.

use crate::error::{CueError, Result};
use classcue_sequencer::ClassList;
use indexmap::IndexMap;
use std::cell::RefCell;
use std::rc::Rc;

/// Shared handle to an element's class list
pub type ElementHandle = Rc<RefCell<ClassList>>;

/// Elements addressable by id
#[derive(Debug, Default)]
pub struct Stage {
    elements: IndexMap<String, ElementHandle>,
    /// Whether elements record their state changes
    journaling: bool,
}

impl Stage {
    /// Create an empty stage
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element, or return the existing one with this id
    pub fn insert(&mut self, id: impl Into<String>) -> ElementHandle {
        let journaling = self.journaling;
        let handle = self.elements.entry(id.into()).or_insert_with(|| {
            let mut list = ClassList::new();
            list.set_journaling(journaling);
            Rc::new(RefCell::new(list))
        });
        Rc::clone(handle)
    }

    /// Record state changes on every element, current and future.
    ///
    /// Recorded changes accumulate until drained with `take_journal`.
    pub fn set_journaling(&mut self, enabled: bool) {
        self.journaling = enabled;
        for element in self.elements.values() {
            element.borrow_mut().set_journaling(enabled);
        }
    }

    /// Whether elements record their state changes
    pub fn is_journaling(&self) -> bool {
        self.journaling
    }

    /// Look up an element
    pub fn element(&self, id: &str) -> Result<ElementHandle> {
        self.elements
            .get(id)
            .map(Rc::clone)
            .ok_or_else(|| CueError::MissingTarget(id.to_string()))
    }

    /// Whether an element with this id exists
    pub fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    /// Element ids in insertion order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.elements.keys().map(String::as_str)
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the stage has no elements
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
