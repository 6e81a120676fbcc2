//! Calendar-date parsing.
//!
//! Every place where a date string from the backend, a snapshot file or a CSV
//! becomes a [`NaiveDate`] goes through this module. The date portion of an
//! ISO-8601 value is taken literally: `2025-01-10T23:30:00-05:00` is the 10th,
//! not whatever day that instant falls on in UTC or in the viewer's zone.

use chrono::NaiveDate;

/// Formats accepted by [`parse_loose_date`] after the ISO form has failed.
const LOOSE_FORMATS: &[&str] = &["%d/%m/%Y", "%m/%d/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y/%m/%d"];

/// Parse the calendar date out of an ISO-8601 date or date-time string.
///
/// Accepts `YYYY-MM-DD`, optionally followed by `T` or a space and any time /
/// offset suffix. The suffix is ignored. Returns `None` for blank or
/// malformed input.
pub fn parse_calendar_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    let date_part = s.split(['T', ' ']).next().unwrap_or(s);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Parse a date typed by a human (spreadsheets, CSV exports).
///
/// Tries the ISO form first, then a handful of common day-first and
/// month-first layouts.
pub fn parse_loose_date(s: &str) -> Option<NaiveDate> {
    if let Some(d) = parse_calendar_date(s) {
        return Some(d);
    }
    let s = s.trim();
    LOOSE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Format a date the way the backend expects it (`YYYY-MM-DD`).
pub fn format_calendar_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Where "today" comes from: a date pinned on the command line, or the
/// local clock read afresh each time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Today {
    Pinned(NaiveDate),
    Clock,
}

impl Today {
    pub fn new(pinned: Option<NaiveDate>) -> Self {
        pinned.map_or(Today::Clock, Today::Pinned)
    }

    pub fn resolve(&self) -> NaiveDate {
        self.resolve_with(|| chrono::Local::now().date_naive())
    }

    /// Like [`Today::resolve`], reading the clock through `clock`.
    pub fn resolve_with(&self, clock: impl FnOnce() -> NaiveDate) -> NaiveDate {
        match self {
            Today::Pinned(date) => *date,
            Today::Clock => clock(),
        }
    }
}

/// Serde helper for `Option<NaiveDate>` fields fed by ISO date or date-time
/// strings. Serializes back to plain `YYYY-MM-DD`.
pub mod calendar_date_opt {
    use chrono::NaiveDate;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => serializer.serialize_str(&super::format_calendar_date(*d)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => super::parse_calendar_date(s)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid calendar date '{}'", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn plain_iso_date() {
        assert_eq!(parse_calendar_date("2025-01-10"), Some(ymd(2025, 1, 10)));
    }

    #[test]
    fn datetime_keeps_its_own_calendar_day() {
        // Late evening with a negative offset is the next day in UTC.
        assert_eq!(
            parse_calendar_date("2025-01-10T23:30:00-05:00"),
            Some(ymd(2025, 1, 10))
        );
        assert_eq!(
            parse_calendar_date("2025-01-10T00:15:00+09:00"),
            Some(ymd(2025, 1, 10))
        );
        assert_eq!(
            parse_calendar_date("2025-03-01 08:00:00"),
            Some(ymd(2025, 3, 1))
        );
        assert_eq!(
            parse_calendar_date("2025-03-01T00:00:00.000Z"),
            Some(ymd(2025, 3, 1))
        );
    }

    #[test]
    fn blank_and_garbage_are_none() {
        assert_eq!(parse_calendar_date(""), None);
        assert_eq!(parse_calendar_date("   "), None);
        assert_eq!(parse_calendar_date("next tuesday"), None);
        assert_eq!(parse_calendar_date("2025-02-30"), None);
    }

    #[test]
    fn loose_formats() {
        assert_eq!(parse_loose_date("15/01/2025"), Some(ymd(2025, 1, 15)));
        assert_eq!(parse_loose_date("15.01.2025"), Some(ymd(2025, 1, 15)));
        assert_eq!(parse_loose_date("2025/01/15"), Some(ymd(2025, 1, 15)));
        assert_eq!(parse_loose_date("2025-01-15T10:00:00Z"), Some(ymd(2025, 1, 15)));
    }

    #[test]
    fn serde_helper_accepts_datetime_and_null() {
        #[derive(serde::Deserialize, serde::Serialize)]
        struct Row {
            #[serde(default, with = "calendar_date_opt")]
            due: Option<NaiveDate>,
        }

        let row: Row = serde_json::from_str(r#"{"due":"2025-06-30T22:00:00-03:00"}"#).unwrap();
        assert_eq!(row.due, Some(ymd(2025, 6, 30)));

        let row: Row = serde_json::from_str(r#"{"due":null}"#).unwrap();
        assert_eq!(row.due, None);

        let row: Row = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(row.due, None);

        let row: Row = serde_json::from_str(r#"{"due":""}"#).unwrap();
        assert_eq!(row.due, None);

        assert!(serde_json::from_str::<Row>(r#"{"due":"soon"}"#).is_err());

        let json = serde_json::to_string(&Row { due: Some(ymd(2025, 1, 2)) }).unwrap();
        assert_eq!(json, r#"{"due":"2025-01-02"}"#);
    }

    #[test]
    fn clock_today_follows_midnight_and_pinned_does_not() {
        let before = ymd(2025, 3, 9);
        let after = ymd(2025, 3, 10);

        let clock = Today::new(None);
        assert_eq!(clock, Today::Clock);
        assert_eq!(clock.resolve_with(|| before), before);
        assert_eq!(clock.resolve_with(|| after), after);

        let pinned = Today::new(Some(ymd(2024, 12, 24)));
        assert_eq!(pinned.resolve_with(|| after), ymd(2024, 12, 24));
        assert_eq!(pinned.resolve(), ymd(2024, 12, 24));
    }
}
