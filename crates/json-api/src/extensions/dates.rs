//! Date filter parsing.

use jiff::{Timestamp, civil::Date, tz::TimeZone};
use salvo::oapi::extract::QueryParam;

use crate::errors::ApiError;

pub(crate) trait DateParamExt {
    /// Parse an optional RFC 3339 timestamp or `YYYY-MM-DD` date.
    fn into_timestamp(self, name: &str) -> Result<Option<Timestamp>, ApiError>;
}

impl DateParamExt for QueryParam<String, false> {
    fn into_timestamp(self, name: &str) -> Result<Option<Timestamp>, ApiError> {
        self.into_inner()
            .filter(|value| !value.trim().is_empty())
            .map(|value| {
                parse_timestamp(value.trim())
                    .ok_or_else(|| ApiError::bad_request(format!("Fecha inválida en {name}")))
            })
            .transpose()
    }
}

/// A plain date means midnight UTC.
pub(crate) fn parse_timestamp(value: &str) -> Option<Timestamp> {
    if let Ok(timestamp) = value.parse::<Timestamp>() {
        return Some(timestamp);
    }

    value
        .parse::<Date>()
        .ok()?
        .to_zoned(TimeZone::UTC)
        .ok()
        .map(|zoned| zoned.timestamp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_rfc3339_timestamps() {
        assert_eq!(
            parse_timestamp("2024-03-01T12:30:00Z").map(|ts| ts.as_second()),
            Some(1_709_296_200),
            "timestamp should parse as given"
        );
    }

    #[test]
    fn plain_dates_start_at_utc_midnight() {
        assert_eq!(
            parse_timestamp("2024-03-01").map(|ts| ts.as_second()),
            Some(1_709_251_200),
            "date should map to midnight UTC"
        );
    }

    #[test]
    fn rejects_other_formats() {
        assert_eq!(parse_timestamp("01/03/2024"), None, "slashes are not a date");
        assert_eq!(parse_timestamp("ayer"), None, "words are not a date");
    }
}
