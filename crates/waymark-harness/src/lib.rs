#![forbid(unsafe_code)]

//! Test support for Waymark.
//!
//! [`FakePage`] stands in for a browser document; the [`pump`] helpers
//! drive time and animation frames the way a host event loop would.

pub mod page;
pub mod pump;

pub use page::{DEFAULT_POPOVER_SIZE, ElementSpec, FakeElement, FakePage};
pub use pump::{SETTLE_FRAMES, SETTLE_TIME, advance_ms, frames, settle};

/// Install a test-writer `tracing` subscriber. Safe to call repeatedly.
///
/// Honours `RUST_LOG`; defaults to `waymark=debug`.
pub fn init_test_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("waymark=debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
