//! Transport errors
//!
//! Fetchers never hand these to the controller. They are logged and then
//! collapsed into a failed [`RawResponse`].

use std::io;

use badge_weather_core::RawResponse;
use thiserror::Error;
use tracing::{debug, warn};

/// Why a request produced no usable body
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request timed out")]
    Timeout,
    #[error("could not connect: {0}")]
    Connect(#[source] reqwest::Error),
    #[error("service answered {0}")]
    Status(reqwest::StatusCode),
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("could not start fetch command: {0}")]
    Spawn(#[source] io::Error),
    #[error("fetch command exited with {}", exit_code(*.0))]
    Exit(Option<i32>),
}

fn exit_code(code: Option<i32>) -> String {
    code.map_or_else(|| "a signal".to_string(), |code| format!("status {code}"))
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_connect() {
            FetchError::Connect(err)
        } else if let Some(status) = err.status() {
            FetchError::Status(status)
        } else {
            FetchError::Request(err)
        }
    }
}

/// Collapse a request outcome into the shape the controller understands
pub fn into_response(result: Result<Vec<u8>, FetchError>, url: &str) -> RawResponse {
    match result {
        Ok(body) => {
            debug!(url, bytes = body.len(), "fetched");
            RawResponse::ok(body)
        }
        Err(err) => {
            warn!(url, error = %err, "fetch failed");
            RawResponse::failed()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_body_passes_through() {
        let response = into_response(Ok(b"Boston: +20\xc2\xb0C".to_vec()), "u");
        assert!(response.succeeded);
        assert_eq!(response.body, "Boston: +20°C".as_bytes());
    }

    #[test]
    fn test_errors_become_failures() {
        let cases = [
            FetchError::Timeout,
            FetchError::Status(reqwest::StatusCode::SERVICE_UNAVAILABLE),
            FetchError::Exit(Some(22)),
            FetchError::Spawn(io::Error::from(io::ErrorKind::NotFound)),
        ];
        for err in cases {
            assert_eq!(into_response(Err(err), "u"), RawResponse::failed());
        }
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            FetchError::Status(reqwest::StatusCode::NOT_FOUND).to_string(),
            "service answered 404 Not Found"
        );
        assert_eq!(
            FetchError::Exit(Some(28)).to_string(),
            "fetch command exited with status 28"
        );
        assert_eq!(
            FetchError::Exit(None).to_string(),
            "fetch command exited with a signal"
        );
    }
}
