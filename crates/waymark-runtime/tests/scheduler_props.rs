//! Property tests for scheduler ordering and cancellation.

use proptest::prelude::*;
use waymark_runtime::{Duration, Scheduler};

proptest! {
    #[test]
    fn every_timer_fires_once_in_deadline_order(
        delays in prop::collection::vec(0u64..1000, 1..40),
        steps in prop::collection::vec(1u64..200, 1..20),
    ) {
        let mut s = Scheduler::new();
        for (i, d) in delays.iter().enumerate() {
            s.after(Duration::from_millis(*d), (*d, i));
        }

        let mut fired = Vec::new();
        for step in &steps {
            fired.extend(s.advance(Duration::from_millis(*step)));
        }
        fired.extend(s.advance(Duration::from_millis(1000)));

        prop_assert_eq!(fired.len(), delays.len());
        prop_assert!(s.is_empty());
        for pair in fired.windows(2) {
            prop_assert!(pair[0] <= pair[1], "out of order: {:?}", pair);
        }
    }

    #[test]
    fn cancelled_tasks_never_fire(
        frames in prop::collection::vec(1u32..5, 1..30),
        cancel_mask in prop::collection::vec(any::<bool>(), 30),
    ) {
        let mut s = Scheduler::new();
        let ids: Vec<_> = frames
            .iter()
            .enumerate()
            .map(|(i, n)| (i, s.after_frames(*n, i)))
            .collect();
        for (i, id) in &ids {
            if cancel_mask[*i] {
                prop_assert!(s.cancel(*id));
            }
        }

        let mut fired = Vec::new();
        for _ in 0..5 {
            fired.extend(s.on_animation_frame());
        }
        for i in &fired {
            prop_assert!(!cancel_mask[*i]);
        }
        let expected = (0..frames.len()).filter(|i| !cancel_mask[*i]).count();
        prop_assert_eq!(fired.len(), expected);
    }
}
