//! Core state machine for the badge weather view
//!
//! The view shows current conditions for one location, fetched from a
//! wttr.in-style text service. This crate owns everything except the screen
//! and the network, which come in through two traits:
//!
//! - [`TextFetcher`]: "give me the text at this URL within this timeout"
//! - [`RenderSurface`]: "show this text, draw now, give the screen back"
//!
//! # Fetch cycle
//!
//! Every refresh runs one cycle of two requests:
//!
//! 1. **Request A** (`?format=3`) - a one-line summary. If it fails or comes
//!    back blank the cycle ends in `Failed(Network)` and request B is never
//!    sent.
//! 2. **Request B** (`?format=%l:+%C+%t+%w+%h`) - split on the first `": "`
//!    into location name and conditions. If it is unusable the summary from
//!    request A is shown instead.
//!
//! ```text
//! Idle --activate--> Loading --A fails--> Failed
//!                       |
//!                       +--A ok, B any--> Displayed
//! Displayed/Failed --r--> Loading
//! ```
//!
//! Keys are ignored while a cycle is `Loading`; in any other state `Esc`
//! leaves the view and `r` starts a new cycle.
//!
//! # Example
//!
//! ```ignore
//! use badge_weather_core::{FetchController, ViewConfig};
//!
//! let mut controller = FetchController::new(ViewConfig::default(), fetcher);
//! controller.activate(surface, Some(Box::new(|| println!("bye"))));
//! controller.run(&mut events).await;
//! ```

pub mod action;
pub mod controller;
pub mod dispatcher;
pub mod effect;
pub mod error;
pub mod event;
pub mod fetch;
pub mod format;
pub mod reducer;
pub mod state;
pub mod store;
pub mod surface;
pub mod tasks;
pub mod testing;

pub use action::Action;
pub use controller::{ExitCallback, FetchController};
pub use dispatcher::InputDispatcher;
pub use effect::{DispatchResult, Effect};
pub use error::ParseFault;
pub use event::EventKind;
pub use fetch::{TextFetcher, FETCH_TIMEOUT, WATCHDOG_GRACE};
pub use format::{detail_url, layout_detail, summary_url};
pub use reducer::{reducer, Reducer};
pub use state::{
    AppState, Failure, FetchState, Location, RawResponse, ViewConfig, ACTIVATING_TEXT,
    DEFAULT_LOCATION, DEFAULT_SERVICE_URL, LOADING_TEXT,
};
pub use store::Store;
pub use surface::{RenderSurface, STATUS_HINT, TITLE};
pub use tasks::{TaskKey, TaskManager};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        Action, EventKind, FetchController, FetchState, InputDispatcher, Location, RawResponse,
        RenderSurface, TextFetcher, ViewConfig,
    };
}
