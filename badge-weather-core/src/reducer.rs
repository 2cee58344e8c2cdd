//! Reducer - every FetchState transition lives here
//!
//! `fn(&mut AppState, Action) -> DispatchResult<Effect>`:
//! - `changed` tells the controller to redraw
//! - effects tell it which request to issue next
//! - no I/O, no clocks

use tracing::debug;

use crate::action::Action;
use crate::effect::{DispatchResult, Effect};
use crate::error::ParseFault;
use crate::format::{detail_url, layout_detail, summary_url};
use crate::state::{AppState, Failure, FetchState, RawResponse};

pub type Reducer = fn(&mut AppState, Action) -> DispatchResult<Effect>;

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::WeatherFetch => {
            if state.is_loading() {
                debug!(cycle = state.cycle, "fetch already in flight, ignoring");
                return DispatchResult::unchanged();
            }

            state.cycle += 1;
            state.fetch = FetchState::Loading;
            state.pending_summary = None;

            DispatchResult::changed_with(Effect::FetchSummary {
                cycle: state.cycle,
                url: summary_url(&state.config.service_url, state.location()),
            })
        }

        Action::WeatherDidFetchSummary { cycle, response } => {
            if !accepts(state, cycle) {
                return DispatchResult::unchanged();
            }

            match summary_text(&response) {
                Ok(Some(summary)) => {
                    // Still loading; nothing new to draw until request B lands
                    state.pending_summary = Some(summary);
                    DispatchResult::effect(Effect::FetchDetail {
                        cycle,
                        url: detail_url(&state.config.service_url, state.location()),
                    })
                }
                Ok(None) => {
                    state.fetch = FetchState::Failed(Failure::Network);
                    DispatchResult::changed()
                }
                Err(fault) => {
                    state.fetch = FetchState::Failed(Failure::Parse(fault.to_string()));
                    DispatchResult::changed()
                }
            }
        }

        Action::WeatherDidFetchDetail { cycle, response } => {
            if !accepts(state, cycle) {
                return DispatchResult::unchanged();
            }

            state.fetch = match state.pending_summary.take() {
                Some(summary) => FetchState::Displayed(detail_or_summary(summary, &response)),
                None => FetchState::Failed(Failure::Parse(
                    ParseFault::MissingSummary(cycle).to_string(),
                )),
            };
            DispatchResult::changed()
        }

        Action::ViewExit => {
            // An exit queued right behind a refresh must not cut the cycle short
            if state.is_loading() {
                debug!(cycle = state.cycle, "fetch in flight, ignoring exit");
                return DispatchResult::unchanged();
            }
            DispatchResult::effect(Effect::ReleaseView)
        }
    }
}

/// Result actions only count for the current cycle while it is loading
fn accepts(state: &AppState, cycle: u64) -> bool {
    let current = cycle == state.cycle && state.is_loading();
    if !current {
        debug!(cycle, current = state.cycle, "dropping stale fetch result");
    }
    current
}

/// Trimmed body of request A, `None` when the request failed or was blank
fn summary_text(response: &RawResponse) -> Result<Option<String>, ParseFault> {
    if !response.succeeded {
        return Ok(None);
    }
    let text = std::str::from_utf8(&response.body)?.trim();
    Ok((!text.is_empty()).then(|| text.to_string()))
}

/// Two-field layout from request B, or request A's text when B is unusable
fn detail_or_summary(summary: String, detail: &RawResponse) -> String {
    if !detail.succeeded {
        return summary;
    }
    std::str::from_utf8(&detail.body)
        .ok()
        .filter(|text| !text.trim().is_empty())
        .and_then(layout_detail)
        .unwrap_or(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loading_state() -> AppState {
        let mut state = AppState::default();
        reducer(&mut state, Action::WeatherFetch);
        state
    }

    fn summary(state: &AppState, response: RawResponse) -> Action {
        Action::WeatherDidFetchSummary {
            cycle: state.cycle,
            response,
        }
    }

    fn detail(state: &AppState, response: RawResponse) -> Action {
        Action::WeatherDidFetchDetail {
            cycle: state.cycle,
            response,
        }
    }

    #[test]
    fn test_fetch_sets_loading_and_requests_summary() {
        let mut state = AppState::default();

        let result = reducer(&mut state, Action::WeatherFetch);

        assert!(result.changed);
        assert!(state.is_loading());
        assert_eq!(
            result.effects,
            vec![Effect::FetchSummary {
                cycle: 1,
                url: "https://wttr.in/Boston?format=3".into(),
            }]
        );
    }

    #[test]
    fn test_fetch_while_loading_is_ignored() {
        let mut state = loading_state();

        let result = reducer(&mut state, Action::WeatherFetch);

        assert_eq!(result, DispatchResult::unchanged());
        assert_eq!(state.cycle, 1);
    }

    #[test]
    fn test_summary_failure_is_network() {
        let mut state = loading_state();
        let action = summary(&state, RawResponse::failed());

        let result = reducer(&mut state, action);

        assert!(result.changed);
        assert!(!result.has_effects());
        assert_eq!(state.fetch, FetchState::Failed(Failure::Network));
    }

    #[test]
    fn test_blank_summary_is_network() {
        let mut state = loading_state();
        let action = summary(&state, RawResponse::ok(" \n\t "));

        let result = reducer(&mut state, action);

        assert!(!result.has_effects());
        assert_eq!(state.fetch, FetchState::Failed(Failure::Network));
    }

    #[test]
    fn test_summary_requests_detail() {
        let mut state = loading_state();
        let action = summary(&state, RawResponse::ok("Boston: ☀️ +20°C\n"));

        let result = reducer(&mut state, action);

        assert!(!result.changed);
        assert_eq!(
            result.effects,
            vec![Effect::FetchDetail {
                cycle: 1,
                url: "https://wttr.in/Boston?format=%l:+%C+%t+%w+%h".into(),
            }]
        );
        assert!(state.is_loading());
        assert_eq!(state.pending_summary.as_deref(), Some("Boston: ☀️ +20°C"));
    }

    #[test]
    fn test_invalid_utf8_summary_is_parse_failure() {
        let mut state = loading_state();
        let action = summary(&state, RawResponse::ok(vec![0xff, 0xfe]));

        reducer(&mut state, action);

        assert!(matches!(state.fetch, FetchState::Failed(Failure::Parse(ref m)) if m.contains("UTF-8")));
    }

    #[test]
    fn test_detail_layout() {
        let mut state = loading_state();
        let action = summary(&state, RawResponse::ok("Boston: ☀️ +20°C"));
        reducer(&mut state, action);

        let action = detail(&state, RawResponse::ok("Boston: Sunny +20°C 5km/h 60%"));
        let result = reducer(&mut state, action);

        assert!(result.changed);
        assert_eq!(
            state.fetch,
            FetchState::Displayed("Boston\n\nSunny +20°C 5km/h 60%".into())
        );
        assert_eq!(state.pending_summary, None);
    }

    #[test]
    fn test_detail_fallbacks() {
        let cases = [
            RawResponse::failed(),
            RawResponse::ok("malformed"),
            RawResponse::ok("   "),
            RawResponse::ok(vec![0xc3, 0x28]),
        ];

        for response in cases {
            let mut state = loading_state();
            let action = summary(&state, RawResponse::ok("  Boston: ☀️ +20°C  "));
            reducer(&mut state, action);

            let action = detail(&state, response.clone());
            reducer(&mut state, action);

            assert_eq!(
                state.fetch,
                FetchState::Displayed("Boston: ☀️ +20°C".into()),
                "fallback for {response:?}"
            );
        }
    }

    #[test]
    fn test_detail_without_summary_is_parse_failure() {
        let mut state = loading_state();
        let action = detail(&state, RawResponse::ok("Boston: Sunny"));

        reducer(&mut state, action);

        assert_eq!(
            state.fetch,
            FetchState::Failed(Failure::Parse(
                "detail arrived without a summary for cycle 1".into()
            ))
        );
    }

    #[test]
    fn test_stale_cycle_is_dropped() {
        let mut state = loading_state();
        let stale = Action::WeatherDidFetchSummary {
            cycle: state.cycle - 1,
            response: RawResponse::failed(),
        };

        let result = reducer(&mut state, stale);

        assert_eq!(result, DispatchResult::unchanged());
        assert!(state.is_loading());
    }

    #[test]
    fn test_result_after_terminal_is_dropped() {
        let mut state = loading_state();
        let action = summary(&state, RawResponse::failed());
        reducer(&mut state, action);

        let late = detail(&state, RawResponse::ok("Boston: Sunny"));
        let result = reducer(&mut state, late);

        assert!(!result.changed);
        assert_eq!(state.fetch, FetchState::Failed(Failure::Network));
    }

    #[test]
    fn test_refresh_after_terminal_starts_new_cycle() {
        let mut state = loading_state();
        let action = summary(&state, RawResponse::failed());
        reducer(&mut state, action);

        let result = reducer(&mut state, Action::WeatherFetch);

        assert!(result.changed);
        assert_eq!(state.cycle, 2);
        assert!(state.is_loading());
    }

    #[test]
    fn test_exit_requests_release() {
        let mut state = AppState::default();
        let result = reducer(&mut state, Action::ViewExit);
        assert_eq!(result.effects, vec![Effect::ReleaseView]);
        assert!(!result.changed);
    }

    #[test]
    fn test_exit_while_loading_is_ignored() {
        let mut state = loading_state();
        let result = reducer(&mut state, Action::ViewExit);
        assert_eq!(result, DispatchResult::unchanged());
    }
}
