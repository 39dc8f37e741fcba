//! Input Source: turns raw pointer, touch and key events into intents.
//!
//! Every accepted raw input is the same "press"; which intent it becomes
//! depends only on the current phase.  The state machine never sees raw
//! input vocabulary.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEventKind};

use crate::entities::{Intent, Phase};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Space,
    ArrowUp,
}

/// A press from any supported source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RawInput {
    Pointer,
    Touch,
    Key(Key),
}

impl RawInput {
    /// Translate a terminal event.  Mouse button presses count as pointer
    /// input; only Space and Up are bound on the keyboard.
    pub fn from_event(event: &Event) -> Option<RawInput> {
        match event {
            Event::Key(KeyEvent { code, kind, .. }) if *kind != KeyEventKind::Release => {
                match code {
                    KeyCode::Char(' ') => Some(RawInput::Key(Key::Space)),
                    KeyCode::Up => Some(RawInput::Key(Key::ArrowUp)),
                    _ => None,
                }
            }
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => Some(RawInput::Pointer),
                _ => None,
            },
            _ => None,
        }
    }

    /// Bound keys swallow the host's default action for them (page scroll in
    /// a browser, any other binding in a terminal).
    pub fn suppresses_default(&self) -> bool {
        matches!(self, RawInput::Key(_))
    }
}

/// Route a press by phase: it starts a game from Idle or GameOver and jumps
/// while Playing.
pub fn route(phase: Phase, _input: RawInput) -> Intent {
    match phase {
        Phase::Idle | Phase::GameOver => Intent::Start,
        Phase::Playing => Intent::Jump,
    }
}
