#![forbid(unsafe_code)]

//! Deferred driver commands.
//!
//! Hooks run while the driver is borrowed, so they cannot call it directly.
//! Instead they queue a [`Command`] through the [`DriverHandle`] in their
//! [`HookContext`](crate::hooks::HookContext); the driver drains the queue
//! once the current operation returns.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Navigation a hook can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Advance without consulting `on_next_click`.
    MoveNext,
    /// Go back without consulting `on_prev_click`.
    MovePrevious,
    MoveTo(usize),
    Refresh,
    /// Tear down without consulting `on_destroy_started`.
    Destroy,
}

/// A queued unit of work. Handle commands bypass the click hooks; the rest
/// come from input and go through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Pending {
    Handle(Command),
    Next,
    Previous,
    Close,
    Overlay,
    Escape,
}

/// Cloneable queue into a driver.
#[derive(Debug, Clone, Default)]
pub struct DriverHandle {
    queue: Rc<RefCell<VecDeque<Pending>>>,
}

impl DriverHandle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_next(&self) {
        self.send(Command::MoveNext);
    }

    pub fn move_previous(&self) {
        self.send(Command::MovePrevious);
    }

    pub fn move_to(&self, index: usize) {
        self.send(Command::MoveTo(index));
    }

    pub fn refresh(&self) {
        self.send(Command::Refresh);
    }

    pub fn destroy(&self) {
        self.send(Command::Destroy);
    }

    pub fn send(&self, command: Command) {
        self.push(Pending::Handle(command));
    }

    /// Queued commands not yet run.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    pub(crate) fn push(&self, pending: Pending) {
        self.queue.borrow_mut().push_back(pending);
    }

    pub(crate) fn pop(&self) -> Option<Pending> {
        self.queue.borrow_mut().pop_front()
    }

    pub(crate) fn clear(&self) {
        self.queue.borrow_mut().clear();
    }
}
