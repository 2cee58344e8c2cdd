//! Test utilities for the weather view
//!
//! - [`key`] / [`char_key`]: build `KeyEvent`s (`key("esc")`, `key("shift+r")`)
//! - [`ScriptedFetcher`]: a [`TextFetcher`] that plays back queued replies
//! - [`RecordingSurface`]: a [`RenderSurface`] that records every call
//! - [`Journal`]: shared log both doubles write to, so tests can check that
//!   the loading text was drawn before a request went out
//!
//! # Example
//!
//! ```ignore
//! let journal = Journal::new();
//! let fetcher = Arc::new(ScriptedFetcher::new(journal.clone()));
//! fetcher.respond(RawResponse::ok("Boston: ☀️ +20°C"));
//! fetcher.respond(RawResponse::failed());
//!
//! let mut controller = FetchController::new(ViewConfig::default(), fetcher);
//! controller.activate(RecordingSurface::new(journal.clone()), None);
//! controller.settle().await;
//! assert_eq!(journal.last_text().as_deref(), Some("Boston: ☀️ +20°C"));
//! ```

use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

use crate::fetch::TextFetcher;
use crate::state::RawResponse;
use crate::surface::RenderSurface;

/// Create a `KeyEvent` from a key string such as `"r"`, `"esc"`,
/// `"shift+r"` or `"ctrl+c"`.
///
/// # Panics
///
/// Panics if the key string cannot be parsed.
pub fn key(s: &str) -> KeyEvent {
    parse_key(s).unwrap_or_else(|| panic!("Invalid key string: {:?}", s))
}

/// Create a `KeyEvent` for a character with no modifiers.
pub fn char_key(c: char) -> KeyEvent {
    KeyEvent {
        code: KeyCode::Char(c),
        modifiers: KeyModifiers::empty(),
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

fn parse_key(s: &str) -> Option<KeyEvent> {
    let s = s.trim().to_lowercase();
    let parts: Vec<&str> = s.split('+').collect();
    let (key_part, modifier_parts) = parts.split_last()?;

    let mut modifiers = KeyModifiers::empty();
    for part in modifier_parts {
        match part.trim() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            "alt" => modifiers |= KeyModifiers::ALT,
            _ => return None,
        }
    }

    let code = match key_part.trim() {
        "esc" | "escape" => KeyCode::Esc,
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "space" => KeyCode::Char(' '),
        f if f.len() > 1 && f.starts_with('f') => KeyCode::F(f[1..].parse().ok()?),
        c if c.chars().count() == 1 => {
            let c = c.chars().next()?;
            if modifiers.contains(KeyModifiers::SHIFT) {
                KeyCode::Char(c.to_ascii_uppercase())
            } else {
                KeyCode::Char(c)
            }
        }
        _ => return None,
    };

    Some(KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    })
}

/// One observable step, as seen by the collaborators
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Entry {
    Text(String),
    Redraw,
    Release,
    Request(String),
}

/// Ordered record of surface calls and outgoing requests
#[derive(Clone, Debug, Default)]
pub struct Journal(Arc<Mutex<Vec<Entry>>>);

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, entry: Entry) {
        self.lock().push(entry);
    }

    pub fn entries(&self) -> Vec<Entry> {
        self.lock().clone()
    }

    /// Every text handed to the surface, in order
    pub fn texts(&self) -> Vec<String> {
        self.collect(|entry| match entry {
            Entry::Text(text) => Some(text.clone()),
            _ => None,
        })
    }

    /// Every URL requested, in order
    pub fn requests(&self) -> Vec<String> {
        self.collect(|entry| match entry {
            Entry::Request(url) => Some(url.clone()),
            _ => None,
        })
    }

    pub fn last_text(&self) -> Option<String> {
        self.texts().pop()
    }

    pub fn count(&self, wanted: &Entry) -> usize {
        self.lock().iter().filter(|entry| *entry == wanted).count()
    }

    /// Position of the first matching entry
    pub fn position(&self, wanted: &Entry) -> Option<usize> {
        self.lock().iter().position(|entry| entry == wanted)
    }

    fn collect<T>(&self, pick: impl Fn(&Entry) -> Option<T>) -> Vec<T> {
        self.lock().iter().filter_map(pick).collect()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Entry>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Surface double that journals every call
#[derive(Debug)]
pub struct RecordingSurface {
    journal: Journal,
}

impl RecordingSurface {
    pub fn new(journal: Journal) -> Self {
        Self { journal }
    }
}

impl RenderSurface for RecordingSurface {
    fn set_display_text(&mut self, text: &str) {
        self.journal.push(Entry::Text(text.to_string()));
    }

    fn request_immediate_redraw(&mut self) {
        self.journal.push(Entry::Redraw);
    }

    fn release(self) {
        self.journal.push(Entry::Release);
    }
}

/// What the scripted fetcher does for one request
#[derive(Clone, Debug)]
pub enum Reply {
    Respond(RawResponse),
    /// Never completes; only the controller's watchdog ends it
    Hang,
}

/// Fetcher double that answers requests from a queue.
///
/// An empty queue answers with a failed response.
#[derive(Debug, Default)]
pub struct ScriptedFetcher {
    journal: Journal,
    replies: Mutex<VecDeque<Reply>>,
}

impl ScriptedFetcher {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            replies: Mutex::new(VecDeque::new()),
        }
    }

    pub fn respond(&self, response: RawResponse) -> &Self {
        self.push(Reply::Respond(response))
    }

    pub fn hang(&self) -> &Self {
        self.push(Reply::Hang)
    }

    pub fn push(&self, reply: Reply) -> &Self {
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(reply);
        self
    }

    fn next_reply(&self) -> Option<Reply> {
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
    }
}

impl TextFetcher for ScriptedFetcher {
    fn fetch_text(
        &self,
        url: &str,
        _timeout: Duration,
    ) -> impl Future<Output = RawResponse> + Send {
        self.journal.push(Entry::Request(url.to_string()));
        let reply = self.next_reply();
        async move {
            match reply {
                Some(Reply::Respond(response)) => response,
                Some(Reply::Hang) => std::future::pending().await,
                None => RawResponse::failed(),
            }
        }
    }
}
