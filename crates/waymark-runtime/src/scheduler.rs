#![forbid(unsafe_code)]

//! Deferred work pumped by the host.
//!
//! The tour never sleeps or spawns. It parks payloads in a [`Scheduler`]
//! keyed either by a deadline on a [`DeterministicClock`] or by a number of
//! animation-frame boundaries, and the host hands control back through
//! [`Scheduler::advance`] and [`Scheduler::on_animation_frame`]. Whatever
//! comes due is returned to the caller to execute, so payloads are plain
//! data rather than closures borrowing the owner.
//!
//! # Ordering
//!
//! - Timed tasks fire in deadline order; equal deadlines fire in scheduling
//!   order.
//! - Frame tasks fire in scheduling order.
//! - A cancelled task never fires.

use web_time::Duration;

/// Monotonic clock controlled by the host.
#[derive(Debug, Default, Clone)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    /// Current monotonic time.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Set current monotonic time.
    pub fn set(&mut self, now: Duration) {
        self.now = now;
    }

    /// Advance monotonic time by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }
}

/// Handle to a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
    At(Duration),
    Frames(u32),
}

#[derive(Debug)]
struct Task<T> {
    id: TaskId,
    trigger: Trigger,
    payload: T,
}

/// Timer and animation-frame queue.
#[derive(Debug)]
pub struct Scheduler<T> {
    clock: DeterministicClock,
    next_id: u64,
    tasks: Vec<Task<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    /// Empty scheduler at time zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            clock: DeterministicClock::new(),
            next_id: 0,
            tasks: Vec::new(),
        }
    }

    /// Current time on the scheduler's clock.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Number of tasks still waiting.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Whether nothing is waiting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Whether a task is still waiting.
    #[must_use]
    pub fn is_scheduled(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|t| t.id == id)
    }

    fn push(&mut self, trigger: Trigger, payload: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push(Task {
            id,
            trigger,
            payload,
        });
        id
    }

    /// Run `payload` once `delay` has elapsed.
    pub fn after(&mut self, delay: Duration, payload: T) -> TaskId {
        let deadline = self.clock.now().saturating_add(delay);
        let id = self.push(Trigger::At(deadline), payload);
        tracing::trace!(
            target: "waymark.scheduler",
            task = id.0,
            delay_ms = delay.as_millis() as u64,
            "timer scheduled"
        );
        id
    }

    /// Run `payload` after `frames` animation-frame boundaries.
    ///
    /// Zero is treated as one: the earliest a frame task can run is the next
    /// frame.
    pub fn after_frames(&mut self, frames: u32, payload: T) -> TaskId {
        let id = self.push(Trigger::Frames(frames.max(1)), payload);
        tracing::trace!(
            target: "waymark.scheduler",
            task = id.0,
            frames,
            "frame task scheduled"
        );
        id
    }

    /// Drop a task. Returns whether it was still waiting.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        let cancelled = self.tasks.len() != before;
        if cancelled {
            tracing::trace!(target: "waymark.scheduler", task = id.0, "task cancelled");
        }
        cancelled
    }

    /// Drop every waiting task.
    pub fn clear(&mut self) {
        if !self.tasks.is_empty() {
            tracing::debug!(
                target: "waymark.scheduler",
                dropped = self.tasks.len(),
                "scheduler cleared"
            );
        }
        self.tasks.clear();
    }

    /// Signal an animation-frame boundary and return the frame tasks that
    /// came due.
    pub fn on_animation_frame(&mut self) -> Vec<T> {
        let mut due = Vec::new();
        let mut waiting = Vec::with_capacity(self.tasks.len());
        for mut task in self.tasks.drain(..) {
            if let Trigger::Frames(n) = task.trigger {
                if n <= 1 {
                    due.push(task.payload);
                    continue;
                }
                task.trigger = Trigger::Frames(n - 1);
            }
            waiting.push(task);
        }
        self.tasks = waiting;
        due
    }

    /// Advance the clock and return the timed tasks that came due.
    pub fn advance(&mut self, dt: Duration) -> Vec<T> {
        self.clock.advance(dt);
        let now = self.clock.now();

        let mut due = Vec::new();
        let mut waiting = Vec::with_capacity(self.tasks.len());
        for task in self.tasks.drain(..) {
            match task.trigger {
                Trigger::At(deadline) if deadline <= now => {
                    due.push((deadline, task.id, task.payload));
                }
                _ => waiting.push(task),
            }
        }
        self.tasks = waiting;
        due.sort_by_key(|(deadline, id, _)| (*deadline, *id));
        due.into_iter().map(|(_, _, payload)| payload).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn clock_advances() {
        let mut c = DeterministicClock::new();
        c.advance(ms(5));
        c.advance(ms(7));
        assert_eq!(c.now(), ms(12));
        c.set(ms(1));
        assert_eq!(c.now(), ms(1));
    }

    #[test]
    fn timers_fire_at_deadline() {
        let mut s = Scheduler::new();
        s.after(ms(400), "settle");
        assert!(s.advance(ms(399)).is_empty());
        assert_eq!(s.advance(ms(1)), vec!["settle"]);
        assert!(s.is_empty());
    }

    #[test]
    fn timers_fire_in_deadline_then_insertion_order() {
        let mut s = Scheduler::new();
        s.after(ms(30), 'c');
        s.after(ms(10), 'a');
        s.after(ms(10), 'b');
        assert_eq!(s.advance(ms(100)), vec!['a', 'b', 'c']);
    }

    #[test]
    fn frame_tasks_count_boundaries() {
        let mut s = Scheduler::new();
        s.after_frames(2, 1);
        s.after_frames(0, 0);
        assert_eq!(s.on_animation_frame(), vec![0]);
        assert_eq!(s.on_animation_frame(), vec![1]);
        assert!(s.on_animation_frame().is_empty());
    }

    #[test]
    fn frames_and_timers_are_independent() {
        let mut s = Scheduler::new();
        s.after(ms(10), "timer");
        s.after_frames(1, "frame");
        assert_eq!(s.on_animation_frame(), vec!["frame"]);
        assert_eq!(s.pending(), 1);
        assert!(s.advance(Duration::ZERO).is_empty());
        assert_eq!(s.advance(ms(10)), vec!["timer"]);
    }

    #[test]
    fn cancel_and_clear() {
        let mut s = Scheduler::new();
        let a = s.after(ms(10), 1);
        let b = s.after_frames(1, 2);
        assert!(s.is_scheduled(a));
        assert!(s.cancel(a));
        assert!(!s.cancel(a));
        assert!(s.advance(ms(20)).is_empty());
        assert!(s.is_scheduled(b));
        s.clear();
        assert!(s.on_animation_frame().is_empty());
    }

    #[test]
    fn deadlines_are_relative_to_now() {
        let mut s = Scheduler::new();
        s.advance(ms(1000));
        s.after(ms(10), ());
        assert!(s.advance(ms(9)).is_empty());
        assert_eq!(s.advance(ms(1)).len(), 1);
    }
}
