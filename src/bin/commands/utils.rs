use abc_radio_plays::{AbcRadioClientImpl, ClientConfig};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use std::env;

/// Environment variable overriding the search endpoint
pub const BASE_URL_ENV: &str = "ABC_RADIO_BASE_URL";

/// Build the client, resolving the endpoint from the flag, then the environment,
/// then the built-in default.
pub fn create_client(base_url: Option<String>) -> AbcRadioClientImpl {
    let mut config = ClientConfig::new();
    if let Some(base_url) = base_url.or_else(|| env::var(BASE_URL_ENV).ok()) {
        config = config.with_base_url(base_url);
    }

    let http_client = http_client::native::NativeClient::new();
    AbcRadioClientImpl::with_config(Box::new(http_client), config)
}

/// Parse a command-line timestamp.
///
/// Accepts RFC 3339 (`2024-01-01T10:00:00+10:00`), or a bare date / date-time
/// which is taken to be UTC (`2024-01-01`, `2024-01-01T00:00`, `2024-01-01T00:00:00`).
pub fn parse_datetime(value: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }
    Err(format!(
        "Invalid timestamp '{value}'. Expected RFC 3339 or YYYY-MM-DD[THH:MM[:SS]]"
    ))
}

/// The display offset for a number of hours from UTC.
pub fn display_offset(utc_offset_hours: i32) -> Result<FixedOffset, String> {
    utc_offset_hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| format!("UTC offset out of range: {utc_offset_hours} hours"))
}

/// Format a play time as a 12-hour clock reading, e.g. `9:05 PM`.
pub fn format_play_time(played_time: &DateTime<FixedOffset>, offset: &FixedOffset) -> String {
    played_time
        .with_timezone(offset)
        .format("%I:%M %p")
        .to_string()
        .trim_start_matches('0')
        .to_string()
}
