#![forbid(unsafe_code)]

//! The host pumping contract.

use web_time::Duration;

/// Anything whose deferred work is driven by host time and frames.
pub trait Pump {
    /// Advance the clock by `dt` and run whatever came due.
    fn advance(&mut self, dt: Duration);

    /// Signal one animation-frame boundary.
    fn animation_frame(&mut self);
}
