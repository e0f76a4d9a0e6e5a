#![forbid(unsafe_code)]

//! Synchronous publish/subscribe.
//!
//! Input translation and the step controller only meet through an
//! [`EventBus`]: keyboard and click handling emit named events, the
//! controller listens. Listeners run in registration order on the emitting
//! call stack.

use std::collections::HashMap;
use std::hash::Hash;

/// Handle returned by [`EventBus::listen`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener<E> = Box<dyn FnMut(E)>;

/// A per-instance event bus.
pub struct EventBus<E> {
    next_id: u64,
    listeners: HashMap<E, Vec<(ListenerId, Listener<E>)>>,
}

impl<E> std::fmt::Debug for EventBus<E>
where
    E: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("events", &self.listeners.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self {
            next_id: 0,
            listeners: HashMap::new(),
        }
    }
}

impl<E> EventBus<E>
where
    E: Copy + Eq + Hash,
{
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for one event.
    pub fn listen(&mut self, event: E, listener: impl FnMut(E) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners
            .entry(event)
            .or_default()
            .push((id, Box::new(listener)));
        id
    }

    /// Remove one listener. Returns whether it was registered.
    pub fn unlisten(&mut self, id: ListenerId) -> bool {
        let mut removed = false;
        for list in self.listeners.values_mut() {
            let before = list.len();
            list.retain(|(lid, _)| *lid != id);
            removed |= list.len() != before;
        }
        self.listeners.retain(|_, list| !list.is_empty());
        removed
    }

    /// Deliver an event. Returns how many listeners ran.
    pub fn emit(&mut self, event: E) -> usize {
        let Some(list) = self.listeners.get_mut(&event) else {
            return 0;
        };
        for (_, listener) in list.iter_mut() {
            listener(event);
        }
        list.len()
    }

    /// Whether anything listens for `event`.
    #[must_use]
    pub fn has_listeners(&self, event: E) -> bool {
        self.listeners.contains_key(&event)
    }

    /// Total listener count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Drop every listener.
    pub fn clear(&mut self) {
        self.listeners.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Ev {
        A,
        B,
    }

    #[test]
    fn emit_runs_listeners_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();
        for tag in ["first", "second"] {
            let log = Rc::clone(&log);
            bus.listen(Ev::A, move |_| log.borrow_mut().push(tag));
        }
        assert_eq!(bus.emit(Ev::A), 2);
        assert_eq!(bus.emit(Ev::B), 0);
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn unlisten_and_clear() {
        let hits = Rc::new(RefCell::new(0));
        let mut bus = EventBus::new();
        let h = Rc::clone(&hits);
        let id = bus.listen(Ev::B, move |_| *h.borrow_mut() += 1);
        assert!(bus.has_listeners(Ev::B));
        assert!(bus.unlisten(id));
        assert!(!bus.unlisten(id));
        assert!(!bus.has_listeners(Ev::B));
        assert_eq!(bus.emit(Ev::B), 0);

        bus.listen(Ev::A, |_| {});
        assert_eq!(bus.len(), 1);
        bus.clear();
        assert!(bus.is_empty());
        assert_eq!(*hits.borrow(), 0);
    }

    #[test]
    fn listener_receives_event() {
        let seen = Rc::new(RefCell::new(None));
        let mut bus = EventBus::new();
        let s = Rc::clone(&seen);
        bus.listen(Ev::A, move |ev| *s.borrow_mut() = Some(ev));
        bus.emit(Ev::A);
        assert_eq!(*seen.borrow(), Some(Ev::A));
    }
}
