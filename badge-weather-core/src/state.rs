//! View state - single source of truth for the weather view
//!
//! Only the reducer mutates [`AppState`]; the controller reads it to decide
//! what to draw and the input dispatcher reads it to decide which keys count.

use std::fmt;

/// Location queried when none is configured
pub const DEFAULT_LOCATION: &str = "Boston";

/// Base URL of the text weather service
pub const DEFAULT_SERVICE_URL: &str = "https://wttr.in";

/// Shown right after the view is entered, before the first cycle starts
pub const ACTIVATING_TEXT: &str = "Loading weather...";

/// Shown for the whole `Loading` window of a fetch cycle
pub const LOADING_TEXT: &str = "Fetching weather...";

/// The place to query. Fixed for the lifetime of a view.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Location(String);

impl Location {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::new(DEFAULT_LOCATION)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Why a fetch cycle ended without weather text
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Failure {
    /// Request A failed, timed out or came back blank
    Network,
    /// The responses could not be reduced; carries the fault description
    Parse(String),
}

impl Failure {
    /// Short machine-friendly reason, used in logs
    pub fn reason(&self) -> &'static str {
        match self {
            Failure::Network => "network",
            Failure::Parse(_) => "parse",
        }
    }
}

/// Where the current fetch cycle stands
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FetchState {
    #[default]
    Idle,
    Loading,
    Displayed(String),
    Failed(Failure),
}

impl FetchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    /// `Displayed` or `Failed` - a new cycle may start from here
    pub fn is_terminal(&self) -> bool {
        matches!(self, FetchState::Displayed(_) | FetchState::Failed(_))
    }
}

/// Outcome of one request to the text service.
///
/// The body is kept as raw bytes; decoding is part of the reduction step.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawResponse {
    pub succeeded: bool,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            succeeded: true,
            body: body.into(),
        }
    }

    pub fn failed() -> Self {
        Self {
            succeeded: false,
            body: Vec::new(),
        }
    }
}

/// Static view configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewConfig {
    pub location: Location,
    pub service_url: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            location: Location::default(),
            service_url: DEFAULT_SERVICE_URL.to_string(),
        }
    }
}

/// Everything the view needs to render and to guard input
#[derive(Clone, Debug)]
pub struct AppState {
    pub config: ViewConfig,

    pub fetch: FetchState,

    /// Number of the most recent fetch cycle. Result actions from any other
    /// cycle are stale.
    pub cycle: u64,

    /// Trimmed body of request A while request B is in flight
    pub pending_summary: Option<String>,
}

impl AppState {
    pub fn new(config: ViewConfig) -> Self {
        Self {
            config,
            fetch: FetchState::Idle,
            cycle: 0,
            pending_summary: None,
        }
    }

    pub fn location(&self) -> &Location {
        &self.config.location
    }

    pub fn is_loading(&self) -> bool {
        self.fetch.is_loading()
    }

    /// Back to `Idle` for a fresh activation. The cycle counter keeps
    /// counting so responses from a previous activation stay stale.
    pub fn reset(&mut self) {
        self.fetch = FetchState::Idle;
        self.pending_summary = None;
    }

    /// Text the view should currently show
    pub fn display_text(&self) -> String {
        match &self.fetch {
            FetchState::Idle => ACTIVATING_TEXT.to_string(),
            FetchState::Loading => LOADING_TEXT.to_string(),
            FetchState::Displayed(text) => text.clone(),
            FetchState::Failed(Failure::Network) => format!(
                "Failed to fetch weather\nfor {}\n\nCheck network connection",
                self.config.location
            ),
            FetchState::Failed(Failure::Parse(fault)) => {
                format!("Error parsing weather:\n{fault}")
            }
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ViewConfig::default())
    }
}
