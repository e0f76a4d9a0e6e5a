use pretty_assertions::assert_eq;

use waymark::{
    ButtonKind, ClickEvent, Driver, ElementId, Event, KeyCode, KeyEvent, KeyEventKind, Modifiers,
    Options, OverlayClickBehavior, PopoverSpec, Step,
};
use waymark_harness::{ElementSpec, FakePage, settle};

fn driver_with(options: Options) -> (Driver<FakePage>, ElementId) {
    let mut page = FakePage::new(1024.0, 768.0);
    let btn = page.add(ElementSpec::new().selector("#btn").rect(400.0, 300.0, 120.0, 40.0));
    let steps = vec![
        Step::new().popover(PopoverSpec::new("One")),
        Step::new().element("#btn").popover(PopoverSpec::new("Two")),
        Step::new().popover(PopoverSpec::new("Three")),
    ];
    let mut driver = Driver::new(page, options, steps).unwrap_or_else(|e| panic!("{e}"));
    driver.drive(0).unwrap_or_else(|e| panic!("{e}"));
    settle(&mut driver);
    (driver, btn)
}

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code))
}

#[test]
fn arrows_tab_and_backtab_navigate() {
    let (mut driver, _) = driver_with(Options::default());
    driver.handle_event(&key(KeyCode::Right));
    assert_eq!(driver.active_index(), Some(1));
    settle(&mut driver);
    driver.handle_event(&key(KeyCode::Tab));
    assert_eq!(driver.active_index(), Some(2));
    settle(&mut driver);
    driver.handle_event(&key(KeyCode::Left));
    assert_eq!(driver.active_index(), Some(1));
    settle(&mut driver);
    driver.handle_event(&Event::Key(
        KeyEvent::new(KeyCode::Tab).with_modifiers(Modifiers::SHIFT),
    ));
    assert_eq!(driver.active_index(), Some(0));
    settle(&mut driver);
    driver.handle_event(&key(KeyCode::BackTab));
    assert_eq!(driver.active_index(), Some(0));
}

#[test]
fn key_releases_and_other_keys_are_ignored() {
    let (mut driver, _) = driver_with(Options::default());
    driver.handle_event(&Event::Key(
        KeyEvent::new(KeyCode::Right).with_kind(KeyEventKind::Release),
    ));
    driver.handle_event(&key(KeyCode::Char('n')));
    driver.handle_event(&key(KeyCode::Enter));
    assert_eq!(driver.active_index(), Some(0));
}

#[test]
fn keyboard_control_can_be_disabled() {
    let (mut driver, _) = driver_with(Options {
        allow_keyboard_control: false,
        ..Options::default()
    });
    driver.handle_event(&key(KeyCode::Right));
    driver.handle_event(&key(KeyCode::Escape));
    assert_eq!(driver.active_index(), Some(0));
    assert!(driver.is_active());
}

#[test]
fn escape_respects_allow_close() {
    let (mut driver, _) = driver_with(Options {
        allow_close: false,
        ..Options::default()
    });
    driver.handle_event(&key(KeyCode::Escape));
    assert!(driver.is_active());

    let (mut driver, _) = driver_with(Options::default());
    driver.handle_event(&key(KeyCode::Escape));
    assert!(!driver.is_active());
}

#[test]
fn overlay_click_closes_by_default() {
    let (mut driver, _) = driver_with(Options::default());
    driver.handle_event(&Event::Click(ClickEvent::at(5.0, 5.0)));
    assert!(!driver.is_active());
}

#[test]
fn overlay_click_ignored_when_close_not_allowed() {
    let (mut driver, _) = driver_with(Options {
        allow_close: false,
        ..Options::default()
    });
    driver.handle_event(&Event::Click(ClickEvent::at(5.0, 5.0)));
    assert!(driver.is_active());
    assert_eq!(driver.active_index(), Some(0));
}

#[test]
fn overlay_click_can_advance() {
    let (mut driver, _) = driver_with(Options {
        overlay_click_behavior: OverlayClickBehavior::NextStep,
        allow_close: false,
        ..Options::default()
    });
    driver.handle_event(&Event::Click(ClickEvent::at(5.0, 5.0)));
    assert_eq!(driver.active_index(), Some(1));
}

#[test]
fn clicks_inside_the_hole_pass_through() {
    let (mut driver, btn) = driver_with(Options::default());
    driver.move_next();
    settle(&mut driver);
    driver.handle_event(&Event::Click(ClickEvent::at(450.0, 310.0).on(btn)));
    assert!(driver.is_active());
    assert_eq!(driver.active_index(), Some(1));
}

#[test]
fn old_hole_is_closed_while_the_next_step_settles() {
    let (mut driver, btn) = driver_with(Options::default());
    driver.move_next();
    settle(&mut driver);
    assert!(driver.scrim().visible_hole().is_some());

    driver.move_next();
    assert!(driver.state().transition_in_progress);
    assert_eq!(driver.scrim().visible_hole(), None);
    driver.handle_event(&Event::Click(ClickEvent::at(450.0, 310.0).on(btn)));
    assert!(!driver.is_active());
}

#[test]
fn popover_buttons_route_through_the_bus() {
    let (mut driver, _) = driver_with(Options::default());

    driver.handle_event(&Event::PopoverButton(ButtonKind::Previous));
    assert_eq!(driver.active_index(), Some(0));

    driver.handle_event(&Event::PopoverButton(ButtonKind::Next));
    assert_eq!(driver.active_index(), Some(1));

    driver.handle_event(&Event::PopoverButton(ButtonKind::Next));
    assert_eq!(driver.active_index(), Some(1));
    settle(&mut driver);

    driver.handle_event(&Event::PopoverButton(ButtonKind::Previous));
    assert_eq!(driver.active_index(), Some(0));
    settle(&mut driver);

    driver.handle_event(&Event::PopoverButton(ButtonKind::Close));
    assert!(!driver.is_active());
}

#[test]
fn hidden_or_disabled_buttons_do_nothing() {
    let (mut driver, _) = driver_with(Options {
        show_buttons: vec![ButtonKind::Close],
        ..Options::default()
    });
    driver.handle_event(&Event::PopoverButton(ButtonKind::Next));
    assert_eq!(driver.active_index(), Some(0));

    let (mut driver, _) = driver_with(Options {
        disable_buttons: vec![ButtonKind::Close],
        ..Options::default()
    });
    driver.handle_event(&Event::PopoverButton(ButtonKind::Close));
    assert!(driver.is_active());
}

#[test]
fn close_button_respects_allow_close() {
    let (mut driver, _) = driver_with(Options {
        allow_close: false,
        ..Options::default()
    });
    driver.handle_event(&Event::PopoverButton(ButtonKind::Close));
    assert!(driver.is_active());
}

#[test]
fn events_before_start_are_ignored() {
    let mut page = FakePage::new(800.0, 600.0);
    page.add(ElementSpec::new().selector("#a").rect(0.0, 0.0, 10.0, 10.0));
    let steps = vec![Step::new().element("#a").popover(PopoverSpec::new("A"))];
    let mut driver = Driver::new(page, Options::default(), steps).unwrap_or_else(|e| panic!("{e}"));
    driver.handle_event(&key(KeyCode::Right));
    driver.handle_event(&Event::Click(ClickEvent::at(1.0, 1.0)));
    driver.handle_event(&Event::PopoverButton(ButtonKind::Next));
    assert!(!driver.is_active());
    assert!(driver.page().styles().is_empty());
}
