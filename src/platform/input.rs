//! Key mapping
//!
//! Space starts or pauses, E toggles the special effect, Escape or closing
//! the window quits. Everything else is ignored.

use crate::sim::TickInput;

/// Keys the session cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    E,
    Escape,
    Other,
}

impl Key {
    /// Parse a key name as a frontend or script would spell it
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "space" => Some(Key::Space),
            "e" => Some(Key::E),
            "esc" | "escape" => Some(Key::Escape),
            "" => None,
            _ => Some(Key::Other),
        }
    }
}

/// Raw event from the windowing layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawEvent {
    KeyDown(Key),
    Close,
}

/// Session-level input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    StartPause,
    ToggleSpecial,
    Quit,
}

impl InputEvent {
    pub fn from_raw(raw: RawEvent) -> Option<Self> {
        match raw {
            RawEvent::Close | RawEvent::KeyDown(Key::Escape) => Some(InputEvent::Quit),
            RawEvent::KeyDown(Key::Space) => Some(InputEvent::StartPause),
            RawEvent::KeyDown(Key::E) => Some(InputEvent::ToggleSpecial),
            RawEvent::KeyDown(Key::Other) => None,
        }
    }
}

/// Fold one frame's events into tick input plus a quit flag
///
/// Repeated presses within a frame cancel in pairs.
pub fn fold_events(events: &[InputEvent]) -> (TickInput, bool) {
    let mut input = TickInput::default();
    let mut quit = false;
    for event in events {
        match event {
            InputEvent::StartPause => input.start_pause ^= true,
            InputEvent::ToggleSpecial => input.toggle_special ^= true,
            InputEvent::Quit => quit = true,
        }
    }
    (input, quit)
}
