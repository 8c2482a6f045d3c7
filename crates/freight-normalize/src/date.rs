//! Date cleaning with an ordered format list.
//!
//! Invoice dates are calendar dates. A time component, when a vendor export
//! carries one, is kept as metadata only; nothing downstream compares
//! instants, and no timezone is ever inferred.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::outcome::{Cleaned, is_blank};

/// A cleaned date plus the incidental time-of-day some exports include.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateValue {
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
}

impl DateValue {
    fn date_only(date: NaiveDate) -> Self {
        Self { date, time: None }
    }

    fn with_time(dt: NaiveDateTime) -> Self {
        Self {
            date: dt.date(),
            time: Some(dt.time()),
        }
    }
}

/// Datetime formats, most common first. `%-m`/`%-d` style padding is not
/// needed: chrono's `%m`/`%d` accept one- and two-digit values.
const DATETIME_FORMATS: [&str; 4] = [
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

const DATE_FORMATS: [&str; 4] = ["%m/%d/%Y", "%Y-%m-%d", "%m-%d-%Y", "%Y/%m/%d"];

/// Cleans a raw date cell. The first format to parse wins.
pub fn clean_date(raw: &str) -> Cleaned<DateValue> {
    if is_blank(raw) {
        return Cleaned::Missing;
    }
    let trimmed = raw.trim();
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Cleaned::Value(DateValue::with_time(dt));
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Cleaned::Value(DateValue::date_only(date));
        }
    }
    Cleaned::Invalid
}

/// True when a cell reads as a number or a date; used by header detection
/// to tell data rows from header rows.
pub fn looks_numeric_or_date(raw: &str) -> bool {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return false;
    }
    trimmed.parse::<f64>().is_ok() || matches!(clean_date(trimmed), Cleaned::Value(_))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_datetime_to_calendar_date() {
        let cleaned = clean_date("7/31/2025 12:00:00 AM");
        let Cleaned::Value(value) = cleaned else {
            panic!("expected value, got {cleaned:?}");
        };
        assert_eq!(value.date, NaiveDate::from_ymd_opt(2025, 7, 31).unwrap());
        assert_eq!(value.time, Some(NaiveTime::from_hms_opt(0, 0, 0).unwrap()));
    }

    #[test]
    fn first_matching_format_wins() {
        let value = clean_date("8/2/2025").value().unwrap();
        assert_eq!(value.date, NaiveDate::from_ymd_opt(2025, 8, 2).unwrap());
        assert_eq!(value.time, None);

        let value = clean_date("2025-08-02").value().unwrap();
        assert_eq!(value.date, NaiveDate::from_ymd_opt(2025, 8, 2).unwrap());
    }

    #[test]
    fn unparsable_is_invalid_never_a_panic() {
        assert!(clean_date("tomorrow").is_invalid());
        assert!(clean_date("13/45/2025").is_invalid());
        assert!(clean_date("").is_missing());
    }

    #[test]
    fn numeric_or_date_detection() {
        assert!(looks_numeric_or_date("42.5"));
        assert!(looks_numeric_or_date("8/2/2025"));
        assert!(!looks_numeric_or_date("Tracking Number"));
        assert!(!looks_numeric_or_date(""));
    }
}
