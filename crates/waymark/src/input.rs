#![forbid(unsafe_code)]

//! Mapping host input to tour events.

use waymark_core::{ButtonKind, KeyCode, KeyEvent, KeyEventKind};

/// Events carried on the driver's bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TourEvent {
    NextClick,
    PrevClick,
    CloseClick,
    OverlayClick,
    EscapePress,
    ArrowRightPress,
    ArrowLeftPress,
}

impl TourEvent {
    /// The event a popover button emits.
    #[must_use]
    pub const fn from_button(kind: ButtonKind) -> Self {
        match kind {
            ButtonKind::Next => Self::NextClick,
            ButtonKind::Previous => Self::PrevClick,
            ButtonKind::Close => Self::CloseClick,
        }
    }
}

/// Translate a key press. Releases and repeats are ignored.
#[must_use]
pub fn key_event(key: &KeyEvent) -> Option<TourEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Right => Some(TourEvent::ArrowRightPress),
        KeyCode::Tab if !key.shift() => Some(TourEvent::ArrowRightPress),
        KeyCode::Left | KeyCode::BackTab | KeyCode::Tab => Some(TourEvent::ArrowLeftPress),
        KeyCode::Escape => Some(TourEvent::EscapePress),
        _ => None,
    }
}
