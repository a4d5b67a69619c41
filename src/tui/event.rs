use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::core::NavigationEvent;

/// TUI-specific input events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuiEvent {
    CursorUp,
    CursorDown,
    Submit,
    Back,
    PageUp,
    PageDown,
    Quit,
    ForceQuit, // Ctrl+C
    Resize(u16, u16),
}

impl TuiEvent {
    /// The navigation action this event stands for, if any.
    pub fn navigation(self) -> Option<NavigationEvent> {
        match self {
            TuiEvent::CursorUp => Some(NavigationEvent::MoveUp),
            TuiEvent::CursorDown => Some(NavigationEvent::MoveDown),
            TuiEvent::Submit => Some(NavigationEvent::Select),
            TuiEvent::Back => Some(NavigationEvent::Back),
            TuiEvent::PageUp => Some(NavigationEvent::PageBackward),
            TuiEvent::PageDown => Some(NavigationEvent::PageForward),
            TuiEvent::Quit | TuiEvent::ForceQuit => Some(NavigationEvent::Quit),
            TuiEvent::Resize(..) => None,
        }
    }
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> io::Result<Option<TuiEvent>> {
    poll_event_timeout(Duration::ZERO)
}

/// Poll for an event, blocking up to `timeout`.
pub fn poll_event_timeout(timeout: Duration) -> io::Result<Option<TuiEvent>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    Ok(match event::read()? {
        Event::Key(key_event) => {
            log::debug!(
                "Key event: {:?} with modifiers {:?}",
                key_event.code,
                key_event.modifiers
            );
            map_key(key_event)
        }
        Event::Resize(width, height) => Some(TuiEvent::Resize(width, height)),
        _ => None,
    })
}

/// Translate a key press into a `TuiEvent`. Releases and repeats are ignored.
pub fn map_key(key_event: KeyEvent) -> Option<TuiEvent> {
    if key_event.kind != KeyEventKind::Press {
        return None;
    }
    match (key_event.modifiers, key_event.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
        (_, KeyCode::Char('j' | 'n')) | (_, KeyCode::Down) => Some(TuiEvent::CursorDown),
        (_, KeyCode::Char('k' | 'p')) | (_, KeyCode::Up) => Some(TuiEvent::CursorUp),
        (_, KeyCode::Char('l')) | (_, KeyCode::Enter) | (_, KeyCode::Right) => {
            Some(TuiEvent::Submit)
        }
        (_, KeyCode::Char('h')) | (_, KeyCode::Backspace | KeyCode::Esc | KeyCode::Left) => {
            Some(TuiEvent::Back)
        }
        (_, KeyCode::Char(']')) | (_, KeyCode::PageDown) => Some(TuiEvent::PageDown),
        (_, KeyCode::Char('[')) | (_, KeyCode::PageUp) => Some(TuiEvent::PageUp),
        (_, KeyCode::Char('q')) => Some(TuiEvent::Quit),
        _ => None,
    }
}
