#![forbid(unsafe_code)]

//! Lifecycle hook invocation.
//!
//! User hooks are untrusted: they may return an error or panic. [`run_hook`]
//! turns either into a logged warning and lets the tour carry on as if the
//! hook had returned [`HookFlow::Proceed`]. Only an explicit
//! [`HookFlow::Cancel`] stops a gated operation.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};

/// What a hook asks the tour to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HookFlow {
    /// Continue with the operation.
    #[default]
    Proceed,
    /// Abort the gated operation and leave state untouched.
    Cancel,
}

/// An error reported by a hook.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct HookFailure {
    message: String,
}

impl HookFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<&str> for HookFailure {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for HookFailure {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

/// Result type hooks return.
pub type HookResult = Result<HookFlow, HookFailure>;

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}

/// Invoke a hook, absorbing failures.
///
/// `name` identifies the hook in log output.
pub fn run_hook<F>(name: &str, hook: F) -> HookFlow
where
    F: FnOnce() -> HookResult,
{
    match catch_unwind(AssertUnwindSafe(hook)) {
        Ok(Ok(flow)) => {
            tracing::trace!(target: "waymark.hooks", hook = name, ?flow, "hook returned");
            flow
        }
        Ok(Err(err)) => {
            tracing::warn!(
                target: "waymark.hooks",
                hook = name,
                error = %err,
                "hook failed; continuing"
            );
            HookFlow::Proceed
        }
        Err(payload) => {
            tracing::warn!(
                target: "waymark.hooks",
                hook = name,
                panic = panic_message(payload.as_ref()),
                "hook panicked; continuing"
            );
            HookFlow::Proceed
        }
    }
}
