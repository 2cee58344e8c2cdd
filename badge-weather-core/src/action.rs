//! Actions for the weather view
//!
//! Naming follows the intent/result split:
//! - `WeatherFetch`, `ViewExit` are intents (from keys or the controller)
//! - `WeatherDid*` carry the outcome of a spawned request back to the reducer

use crate::state::RawResponse;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Intent: start a fetch cycle (ignored while one is in flight)
    WeatherFetch,

    /// Result: request A (short one-line summary) finished
    WeatherDidFetchSummary { cycle: u64, response: RawResponse },

    /// Result: request B (detailed format) finished
    WeatherDidFetchDetail { cycle: u64, response: RawResponse },

    /// Intent: dismiss the view
    ViewExit,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::WeatherFetch => "WeatherFetch",
            Action::WeatherDidFetchSummary { .. } => "WeatherDidFetchSummary",
            Action::WeatherDidFetchDetail { .. } => "WeatherDidFetchDetail",
            Action::ViewExit => "ViewExit",
        }
    }

    /// Concise form for logs. Bodies are reduced to their size.
    pub fn summary(&self) -> String {
        match self {
            Action::WeatherDidFetchSummary { cycle, response }
            | Action::WeatherDidFetchDetail { cycle, response } => format!(
                "{} {{ cycle: {}, ok: {}, bytes: {} }}",
                self.name(),
                cycle,
                response.succeeded,
                response.body.len()
            ),
            _ => self.name().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_hides_body() {
        let action = Action::WeatherDidFetchDetail {
            cycle: 3,
            response: RawResponse::ok("Boston: Sunny +20°C"),
        };

        let summary = action.summary();
        assert!(summary.starts_with("WeatherDidFetchDetail"));
        assert!(summary.contains("cycle: 3"));
        assert!(!summary.contains("Sunny"));
    }

    #[test]
    fn test_summary_simple() {
        assert_eq!(Action::ViewExit.summary(), "ViewExit");
    }
}
