//! Fetcher that shells out to `curl`

use std::process::Stdio;
use std::time::Duration;

use badge_weather_core::{RawResponse, TextFetcher};
use tokio::process::Command;
use tracing::warn;

use crate::error::{into_response, FetchError};

#[derive(Clone, Debug)]
pub struct CurlFetcher {
    program: String,
}

impl CurlFetcher {
    pub fn new() -> Self {
        Self::with_program("curl")
    }

    /// Use a different executable, e.g. an absolute path
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    async fn get(&self, url: &str, timeout: Duration) -> Result<Vec<u8>, FetchError> {
        // --max-time takes whole or fractional seconds
        let max_time = format!("{}", timeout.as_secs_f32());
        let output = Command::new(&self.program)
            .args(["-s", "--fail", "--max-time", &max_time, url])
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(FetchError::Spawn)?;

        if !output.status.success() {
            return Err(FetchError::Exit(output.status.code()));
        }
        Ok(output.stdout)
    }
}

impl Default for CurlFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl TextFetcher for CurlFetcher {
    async fn fetch_text(&self, url: &str, timeout: Duration) -> RawResponse {
        let result = self.get(url, timeout).await;
        if let Err(FetchError::Spawn(err)) = &result {
            warn!(program = %self.program, error = %err, "could not run curl");
        }
        into_response(result, url)
    }
}
