use proptest::prelude::*;

use waymark::{Driver, Options, PopoverSpec, Step};
use waymark_harness::{ElementSpec, FakePage, init_test_logging, settle};

#[derive(Debug, Clone, Copy)]
enum Op {
    Next,
    Previous,
    MoveTo(usize),
    Refresh,
    Settle,
    Frame,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Next),
        2 => Just(Op::Previous),
        1 => (0usize..10).prop_map(Op::MoveTo),
        1 => Just(Op::Refresh),
        3 => Just(Op::Settle),
        1 => Just(Op::Frame),
    ]
}

/// `n` steps, alternating element and centered popovers.
fn tour(n: usize, animate: bool) -> Driver<FakePage> {
    init_test_logging();
    let mut page = FakePage::new(1280.0, 800.0);
    let steps = (0..n)
        .map(|i| {
            let popover = PopoverSpec::new(format!("Step {i}"));
            if i % 2 == 0 {
                let selector = format!("#el-{i}");
                page.add(
                    ElementSpec::new()
                        .selector(selector.clone())
                        .rect(40.0 * i as f64, 30.0 * i as f64, 100.0, 40.0),
                );
                Step::new().element(selector).popover(popover)
            } else {
                Step::new().popover(popover)
            }
        })
        .collect();
    let options = Options {
        animate,
        ..Options::default()
    };
    Driver::new(page, options, steps).unwrap_or_else(|e| panic!("{e}"))
}

proptest! {
    #[test]
    fn walking_forward_reaches_the_end(n in 1usize..8, animate in any::<bool>()) {
        let mut driver = tour(n, animate);
        driver.drive(0).unwrap_or_else(|e| panic!("{e}"));
        settle(&mut driver);
        for _ in 1..n {
            prop_assert!(!driver.is_last_step());
            driver.move_next();
            settle(&mut driver);
        }
        prop_assert!(driver.is_last_step());
        prop_assert_eq!(driver.active_index(), Some(n - 1));
        driver.move_next();
        prop_assert!(!driver.is_active());
        prop_assert!(driver.page().styles().is_empty());
    }

    #[test]
    fn random_navigation_keeps_state_consistent(
        n in 1usize..6,
        ops in proptest::collection::vec(op(), 0..40),
    ) {
        let mut driver = tour(n, true);
        driver.drive(0).unwrap_or_else(|e| panic!("{e}"));
        for op in ops {
            match op {
                Op::Next => driver.move_next(),
                Op::Previous => driver.move_previous(),
                Op::MoveTo(i) => {
                    let result = driver.move_to(i);
                    prop_assert_eq!(result.is_err(), i >= n);
                }
                Op::Refresh => driver.refresh(),
                Op::Settle => settle(&mut driver),
                Op::Frame => driver.animation_frame(),
            }
            if driver.is_active() {
                let index = driver.active_index();
                prop_assert!(index.is_some_and(|i| i < n));
                prop_assert_eq!(driver.page().styles().len(), 1);
                prop_assert!(driver.scrim().is_mounted());
            } else {
                prop_assert_eq!(driver.active_index(), None);
                prop_assert!(!driver.state().transition_in_progress);
            }
            let hole = driver.scrim().visible_hole();
            if let Some(hole) = hole {
                prop_assert!(hole.x >= 0.0 && hole.y >= 0.0);
                prop_assert!(hole.x + hole.width <= 1280.0);
                prop_assert!(hole.y + hole.height <= 800.0);
            }
        }
        settle(&mut driver);
        prop_assert!(!driver.state().transition_in_progress);
        if driver.is_active() {
            prop_assert!(driver.popover().is_visible());
        }
    }
}
