// SPDX-License-Identifier: MIT OR Apache-2.0
//! Registry of interaction names.

use crate::error::InteractionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A user interaction the dispatcher can recognize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interaction {
    /// Item added to a list
    Adding,
    /// Attention requested
    Alerting,
    /// Drag in progress
    Dragging,
    /// Item dropped
    Dropping,
    /// List reordered
    Sorting,
    /// Item removed
    Deleting,
    /// Pointer click
    Click,
    /// Pointer entered
    MouseOver,
    /// Pointer left
    MouseOut,
}

impl Interaction {
    /// Name used in configuration and as the feedback state
    pub fn name(&self) -> &'static str {
        match self {
            Self::Adding => "adding",
            Self::Alerting => "alerting",
            Self::Dragging => "dragging",
            Self::Dropping => "dropping",
            Self::Sorting => "sorting",
            Self::Deleting => "deleting",
            Self::Click => "click",
            Self::MouseOver => "mouseover",
            Self::MouseOut => "mouseout",
        }
    }

    /// Every interaction in the registry
    pub fn all() -> &'static [Interaction] {
        &[
            Self::Adding,
            Self::Alerting,
            Self::Dragging,
            Self::Dropping,
            Self::Sorting,
            Self::Deleting,
            Self::Click,
            Self::MouseOver,
            Self::MouseOut,
        ]
    }
}

impl FromStr for Interaction {
    type Err = InteractionError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|interaction| interaction.name() == name)
            .ok_or_else(|| InteractionError::InvalidArgument(format!("unknown interaction '{name}'")))
    }
}

impl fmt::Display for Interaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
