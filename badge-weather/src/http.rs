//! reqwest-backed fetcher

use std::time::Duration;

use badge_weather_core::{RawResponse, TextFetcher};
use crate::error::{into_response, FetchError};

const USER_AGENT: &str = concat!("badge-weather/", env!("CARGO_PKG_VERSION"));

#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Fails when the client cannot be built, e.g. the TLS backend does
    /// not initialize.
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { client })
    }

    async fn get(&self, url: &str, timeout: Duration) -> Result<Vec<u8>, FetchError> {
        let response = self.client.get(url).timeout(timeout).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        Ok(response.bytes().await?.to_vec())
    }
}

impl TextFetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str, timeout: Duration) -> RawResponse {
        into_response(self.get(url, timeout).await, url)
    }
}
