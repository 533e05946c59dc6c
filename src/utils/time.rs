use chrono::NaiveDateTime;
use thiserror::Error;

/// Calendar layouts accepted by [`parse_calendar_string`], tried in order.
/// The first is the NASA close-approach layout (`2020-Jan-01 12:30`).
pub const CALENDAR_FORMATS: &[&str] = &[
    "%Y-%b-%d %H:%M",
    "%Y-%b-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
];

/// Minute precision; the source data carries no seconds.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Error)]
#[error("unrecognized calendar date {input:?}")]
pub struct TimeParseError {
    input: String,
}

impl TimeParseError {
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Parses a calendar string such as `2020-Jan-01 12:30` into a timestamp.
pub fn parse_calendar_string(input: &str) -> Result<NaiveDateTime, TimeParseError> {
    let trimmed = input.trim();
    CALENDAR_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| TimeParseError {
            input: input.to_string(),
        })
}

pub fn format_timestamp(time: &NaiveDateTime) -> String {
    time.format(DISPLAY_FORMAT).to_string()
}
