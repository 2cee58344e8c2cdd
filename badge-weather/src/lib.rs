//! Badge weather - terminal front end for the weather view
//!
//! Wires the `badge-weather-core` controller to real collaborators:
//! - [`HttpFetcher`] / [`CurlFetcher`] for requests
//! - [`TerminalSurface`] for drawing
//! - [`spawn_event_poller`] for keyboard and resize input

pub mod components;
pub mod config;
pub mod curl;
pub mod error;
pub mod http;
pub mod logging;
pub mod poller;
pub mod surface;

pub use config::{Args, Transport};
pub use curl::CurlFetcher;
pub use error::FetchError;
pub use http::HttpFetcher;
pub use logging::init_logging;
pub use poller::{spawn_event_poller, stop_event_poller, POLL_INTERVAL};
pub use surface::TerminalSurface;
