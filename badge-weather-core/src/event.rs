//! Input events delivered to the view

use crossterm::event::KeyEvent;

/// The event payload forwarded by the input source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// Keyboard event
    Key(KeyEvent),
    /// Terminal resize; the surface needs a redraw
    Resize(u16, u16),
}

impl From<KeyEvent> for EventKind {
    fn from(key: KeyEvent) -> Self {
        EventKind::Key(key)
    }
}
