#![forbid(unsafe_code)]

//! Structural errors returned to callers.
//!
//! Hook failures and missing elements are not errors; they are logged and
//! the tour continues.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("invalid step {index}: {reason}")]
    InvalidStep { index: usize, reason: String },
    #[error("the tour has no steps")]
    NoSteps,
    #[error("step index {index} is out of range for {len} steps")]
    InvalidStepIndex { index: usize, len: usize },
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidConfig(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
