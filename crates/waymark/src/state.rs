#![forbid(unsafe_code)]

//! Tour state, owned and mutated by the driver only.

use std::rc::Rc;

use serde::Serialize;
use waymark_core::ElementId;

use crate::step::Step;

/// Where the driver is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    /// Not started, or torn down.
    Uninitialized,
    /// Showing a step (or between steps) and accepting navigation.
    Idle,
    /// A step change is waiting for its settle delay.
    Transitioning,
}

/// The mutable part of a tour.
#[derive(Debug, Clone, Default)]
pub struct TourState {
    pub is_initialized: bool,
    /// Index into the step list; `None` for an ad-hoc highlight.
    pub active_index: Option<usize>,
    /// The resolved element, `None` when the step is centered.
    pub active_element: Option<ElementId>,
    pub active_step: Option<Rc<Step>>,
    pub previous_element: Option<ElementId>,
    pub previous_step: Option<Rc<Step>>,
    /// Set between a step change and its popover render. Navigation is
    /// ignored while set.
    pub transition_in_progress: bool,
    /// Focus owner when the tour started, restored on teardown.
    pub focused_before_activation: Option<ElementId>,
}

impl TourState {
    #[must_use]
    pub fn phase(&self) -> Phase {
        if !self.is_initialized {
            Phase::Uninitialized
        } else if self.transition_in_progress {
            Phase::Transitioning
        } else {
            Phase::Idle
        }
    }

    /// Serializable view of the state, with steps reduced to their titles.
    #[must_use]
    pub fn snapshot(&self) -> StateSnapshot {
        let title = |step: &Option<Rc<Step>>| {
            step.as_ref()
                .and_then(|s| s.popover.as_ref())
                .map(|p| p.title.clone())
        };
        StateSnapshot {
            is_initialized: self.is_initialized,
            active_index: self.active_index,
            active_element: self.active_element,
            active_step: title(&self.active_step),
            previous_element: self.previous_element,
            previous_step: title(&self.previous_step),
            transition_in_progress: self.transition_in_progress,
            focused_before_activation: self.focused_before_activation,
            phase: self.phase(),
        }
    }

    /// One field of the [`snapshot`](Self::snapshot) by its camelCase key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        match serde_json::to_value(self.snapshot()) {
            Ok(serde_json::Value::Object(mut map)) => map.remove(key),
            _ => None,
        }
    }
}

/// See [`TourState::snapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSnapshot {
    pub is_initialized: bool,
    pub active_index: Option<usize>,
    pub active_element: Option<ElementId>,
    /// Popover title of the active step.
    pub active_step: Option<String>,
    pub previous_element: Option<ElementId>,
    pub previous_step: Option<String>,
    pub transition_in_progress: bool,
    pub focused_before_activation: Option<ElementId>,
    pub phase: Phase,
}
