//! Service queries and response layout
//!
//! The query strings are the text service's own template syntax and are
//! reproduced byte for byte. Only the location is percent-encoded.

use crate::state::Location;

/// One-line "location: conditions, temperature" summary
pub const SUMMARY_FORMAT: &str = "format=3";

/// Location, conditions, temperature, wind and humidity
pub const DETAIL_FORMAT: &str = "format=%l:+%C+%t+%w+%h";

/// Separates the location name from the rest of a detail line
pub const DETAIL_DELIMITER: &str = ": ";

/// URL for request A
pub fn summary_url(service_url: &str, location: &Location) -> String {
    query_url(service_url, location, SUMMARY_FORMAT)
}

/// URL for request B
pub fn detail_url(service_url: &str, location: &Location) -> String {
    query_url(service_url, location, DETAIL_FORMAT)
}

fn query_url(service_url: &str, location: &Location, format: &str) -> String {
    format!(
        "{}/{}?{}",
        service_url.trim_end_matches('/'),
        urlencoding::encode(location.as_str()),
        format
    )
}

/// Lay out a detail line as "name", blank line, "conditions".
///
/// Splits on the first delimiter only, so a value that itself contains
/// `": "` stays intact. Returns `None` when there is no delimiter.
pub fn layout_detail(detail: &str) -> Option<String> {
    let (name, conditions) = detail.trim().split_once(DETAIL_DELIMITER)?;
    Some(format!("{name}\n\n{conditions}"))
}
