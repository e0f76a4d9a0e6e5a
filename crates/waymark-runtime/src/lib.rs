#![forbid(unsafe_code)]

//! Cooperative runtime pieces for the tour.
//!
//! Nothing here owns a thread or an event loop. The host pumps time and
//! animation frames into a [`Scheduler`], input is fanned out through an
//! [`EventBus`], and user callbacks run inside [`run_hook`].

pub mod bus;
pub mod hooks;
pub mod pump;
pub mod scheduler;

pub use bus::{EventBus, ListenerId};
pub use hooks::{HookFailure, HookFlow, HookResult, run_hook};
pub use pump::Pump;
pub use scheduler::{DeterministicClock, Scheduler, TaskId};
pub use web_time::Duration;
