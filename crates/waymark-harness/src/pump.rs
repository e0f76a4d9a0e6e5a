#![forbid(unsafe_code)]

//! Pumping helpers for anything implementing [`Pump`].

use waymark_runtime::{Duration, Pump};

/// Longer than any settle delay the tour schedules.
pub const SETTLE_TIME: Duration = Duration::from_millis(500);

/// Frames enough to flush every frame-deferred task.
pub const SETTLE_FRAMES: u32 = 3;

/// Signal `n` animation frames.
pub fn frames<P: Pump + ?Sized>(target: &mut P, n: u32) {
    for _ in 0..n {
        target.animation_frame();
    }
}

/// Advance by `ms` milliseconds.
pub fn advance_ms<P: Pump + ?Sized>(target: &mut P, ms: u64) {
    target.advance(Duration::from_millis(ms));
}

/// Run every pending frame task and timer.
pub fn settle<P: Pump + ?Sized>(target: &mut P) {
    frames(target, SETTLE_FRAMES);
    target.advance(SETTLE_TIME);
    frames(target, SETTLE_FRAMES);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        frames: u32,
        elapsed: Duration,
    }

    impl Pump for Counter {
        fn advance(&mut self, dt: Duration) {
            self.elapsed += dt;
        }

        fn animation_frame(&mut self) {
            self.frames += 1;
        }
    }

    #[test]
    fn settle_pumps_time_and_frames() {
        let mut c = Counter::default();
        settle(&mut c);
        assert_eq!(c.frames, SETTLE_FRAMES * 2);
        assert_eq!(c.elapsed, SETTLE_TIME);
        advance_ms(&mut c, 10);
        assert_eq!(c.elapsed, Duration::from_millis(510));
    }
}
