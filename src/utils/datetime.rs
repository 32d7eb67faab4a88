use chrono::{DateTime, Month, NaiveDate, NaiveDateTime, Utc};

use crate::error::{IiError, IiResult};

/// Parses a backend date into its calendar day in UTC.
///
/// Strings without an offset are taken as UTC, strings with one are converted
/// to UTC first, so a viewer's local timezone never shifts the day.
pub fn date_from_str(s: &str) -> IiResult<NaiveDate> {
    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y%m%d"];
    const DATETIME_FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f", // ISO 8601 Extended
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y%m%dT%H%M%S", // ISO 8601 Basic
    ];

    let s = s.trim();

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Ok(date);
        }
    }

    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(datetime.and_utc().date_naive());
        }
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(s) {
        return Ok(datetime.with_timezone(&Utc).date_naive());
    }

    // RFC 2822, the form Flask uses to serialize datetimes
    if let Ok(datetime) = DateTime::parse_from_rfc2822(s) {
        return Ok(datetime.with_timezone(&Utc).date_naive());
    }

    Err(IiError::Invalid {
        code: "INVALID_DATE",
        message: format!("Unable to parse date '{s}'"),
    })
}

pub fn date_from_millis(millis: i64) -> IiResult<NaiveDate> {
    DateTime::from_timestamp_millis(millis)
        .map(|datetime| datetime.date_naive())
        .ok_or_else(|| IiError::Invalid {
            code: "INVALID_DATE",
            message: format!("Timestamp '{millis}' out of range"),
        })
}

pub fn date_to_str(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// e.g. `Mar 05`
pub fn date_to_day_label(date: &NaiveDate) -> String {
    date.format("%b %d").to_string()
}

/// e.g. `Mar 2024`
pub fn date_to_month_label(date: &NaiveDate) -> String {
    date.format("%b %Y").to_string()
}

pub fn month_name(month: u32) -> Option<&'static str> {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_from_str() {
        assert_eq!(
            date_to_str(&date_from_str("2024-01-02").unwrap()),
            "2024-01-02"
        );
        assert_eq!(
            date_to_str(&date_from_str("20240102").unwrap()),
            "2024-01-02"
        );
        assert_eq!(
            date_to_str(&date_from_str("2024-01-02T00:00:00").unwrap()),
            "2024-01-02"
        );
        assert_eq!(
            date_to_str(&date_from_str("2024-01-02 23:59:59.123456").unwrap()),
            "2024-01-02"
        );
        assert_eq!(
            date_to_str(&date_from_str("2024-01-02T00:00:00Z").unwrap()),
            "2024-01-02"
        );
        assert_eq!(
            date_to_str(&date_from_str("Tue, 02 Jan 2024 05:00:00 GMT").unwrap()),
            "2024-01-02"
        );
        assert!(date_from_str("invalid-date").is_err());
        assert!(date_from_str("").is_err());
    }

    #[test]
    fn test_date_from_str_anchors_to_utc() {
        // 23:30 in New York is already the next day in UTC
        assert_eq!(
            date_to_str(&date_from_str("2024-03-04T23:30:00-05:00").unwrap()),
            "2024-03-05"
        );
        // Midnight with no offset must not slide back a day
        assert_eq!(
            date_to_str(&date_from_str("2024-03-01T00:00:00").unwrap()),
            "2024-03-01"
        );
        assert_eq!(
            date_to_str(&date_from_str("Fri, 01 Mar 2024 00:00:00 GMT").unwrap()),
            "2024-03-01"
        );
    }

    #[test]
    fn test_date_from_millis() {
        assert_eq!(
            date_to_str(&date_from_millis(1_704_153_600_000).unwrap()),
            "2024-01-02"
        );
        assert_eq!(
            date_to_str(&date_from_millis(1_704_239_999_999).unwrap()),
            "2024-01-02"
        );
        assert!(date_from_millis(i64::MAX).is_err());
    }

    #[test]
    fn test_labels() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(date_to_day_label(&date), "Mar 05");
        assert_eq!(date_to_month_label(&date), "Mar 2024");
    }

    #[test]
    fn test_month_name() {
        assert_eq!(month_name(1), Some("January"));
        assert_eq!(month_name(12), Some("December"));
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
    }
}
