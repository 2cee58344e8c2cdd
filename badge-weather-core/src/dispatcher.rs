//! InputDispatcher - key events to view actions
//!
//! A direct mapping: escape exits, `r`/`R` refreshes, everything else is
//! ignored. While a fetch is in flight every key is ignored, so neither a
//! refresh storm nor an exit can happen mid-fetch.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::debug;

use crate::action::Action;
use crate::state::FetchState;

#[derive(Debug, Default, Clone, Copy)]
pub struct InputDispatcher;

impl InputDispatcher {
    pub fn new() -> Self {
        Self
    }

    /// Map a key to an action, or `None` when the key does nothing now
    pub fn on_key(&self, key: &KeyEvent, fetch: &FetchState) -> Option<Action> {
        if fetch.is_loading() {
            debug!(code = ?key.code, "fetch in flight, ignoring key");
            return None;
        }

        // Release/repeat reports would double every press
        if key.kind != KeyEventKind::Press {
            return None;
        }

        // No chords: only bare keys (shift is how `R` arrives)
        if !key.modifiers.difference(KeyModifiers::SHIFT).is_empty() {
            return None;
        }

        match key.code {
            KeyCode::Esc => Some(Action::ViewExit),
            KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::WeatherFetch),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Failure;
    use crate::testing::{char_key, key};

    fn displayed() -> FetchState {
        FetchState::Displayed("Boston: ☀️ +20°C".into())
    }

    #[test]
    fn test_refresh_keys() {
        let dispatcher = InputDispatcher::new();

        assert_eq!(
            dispatcher.on_key(&char_key('r'), &displayed()),
            Some(Action::WeatherFetch)
        );
        assert_eq!(
            dispatcher.on_key(&key("shift+r"), &displayed()),
            Some(Action::WeatherFetch)
        );
        assert_eq!(
            dispatcher.on_key(&char_key('R'), &FetchState::Failed(Failure::Network)),
            Some(Action::WeatherFetch)
        );
    }

    #[test]
    fn test_escape_exits() {
        let dispatcher = InputDispatcher::new();
        assert_eq!(
            dispatcher.on_key(&key("esc"), &displayed()),
            Some(Action::ViewExit)
        );
    }

    #[test]
    fn test_loading_ignores_everything() {
        let dispatcher = InputDispatcher::new();
        for k in [key("esc"), char_key('r'), char_key('R'), key("enter")] {
            assert_eq!(dispatcher.on_key(&k, &FetchState::Loading), None);
        }
    }

    #[test]
    fn test_other_keys_ignored() {
        let dispatcher = InputDispatcher::new();
        for k in [char_key('q'), key("enter"), key("f5"), key("ctrl+r")] {
            assert_eq!(dispatcher.on_key(&k, &displayed()), None);
        }
    }

    #[test]
    fn test_release_events_ignored() {
        let dispatcher = InputDispatcher::new();
        let mut k = char_key('r');
        k.kind = KeyEventKind::Release;
        assert_eq!(dispatcher.on_key(&k, &displayed()), None);
    }
}
