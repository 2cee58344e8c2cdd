//! Command-line configuration

use std::path::PathBuf;

use badge_weather_core::{Location, ViewConfig, DEFAULT_LOCATION, DEFAULT_SERVICE_URL};
use clap::{Parser, ValueEnum};

/// How requests reach the weather service
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Transport {
    /// In-process HTTP client
    #[default]
    Http,
    /// Shell out to `curl`
    Curl,
}

/// Badge weather - current conditions from wttr.in
#[derive(Parser, Debug)]
#[command(name = "badge-weather")]
#[command(about = "Single-screen weather view. R refreshes, ESC exits.")]
pub struct Args {
    /// Location to query
    #[arg(long, short, default_value = DEFAULT_LOCATION)]
    pub location: String,

    /// Base URL of the text weather service
    #[arg(long, default_value = DEFAULT_SERVICE_URL)]
    pub service_url: String,

    /// Request transport
    #[arg(long, value_enum, default_value_t = Transport::Http)]
    pub transport: Transport,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Args {
    pub fn view_config(&self) -> ViewConfig {
        ViewConfig {
            location: Location::new(self.location.trim()),
            service_url: self.service_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["badge-weather"]).expect("parse");

        assert_eq!(args.transport, Transport::Http);
        assert_eq!(args.log_file, None);
        assert_eq!(args.view_config(), ViewConfig::default());
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "badge-weather",
            "-l",
            "New York",
            "--service-url",
            "http://localhost:8080",
            "--transport",
            "curl",
            "--log-file",
            "/tmp/weather.log",
        ])
        .expect("parse");

        let config = args.view_config();
        assert_eq!(config.location.as_str(), "New York");
        assert_eq!(config.service_url, "http://localhost:8080");
        assert_eq!(args.transport, Transport::Curl);
        assert_eq!(args.log_file, Some(PathBuf::from("/tmp/weather.log")));
    }

    #[test]
    fn test_unknown_transport_rejected() {
        assert!(Args::try_parse_from(["badge-weather", "--transport", "ftp"]).is_err());
    }
}
