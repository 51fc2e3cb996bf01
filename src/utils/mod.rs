// Date/time helpers shared by validation, list filtering and export

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeZone, Utc};

/// Format datetime for API responses and spreadsheet cells
pub fn format_datetime(dt: DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// The only accepted shape for timestamps carried in request bodies.
///
/// RFC 3339 with an explicit offset, e.g. `2024-05-01T10:00:00Z` or
/// `2024-05-01T10:00:00+07:00`. Locale-dependent shapes such as
/// `05/01/2024` are ambiguous between month-first and day-first and are
/// rejected rather than guessed.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Which end of an inclusive range a query bound describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Start,
    End,
}

/// Parse a `start_date` / `end_date` query value.
///
/// Accepts RFC 3339 or a bare `YYYY-MM-DD`. A bare date expands to the
/// first instant of the day for `Start` and the last for `End`.
pub fn parse_range_bound(raw: &str, bound: Bound) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Some(ts) = parse_timestamp(raw) {
        return Some(ts);
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    let time = match bound {
        Bound::Start => NaiveTime::from_hms_opt(0, 0, 0)?,
        Bound::End => NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999)?,
    };
    Some(Utc.from_utc_datetime(&date.and_time(time)))
}

/// First instant of the calendar month containing `now`
pub fn start_of_month(now: DateTime<Utc>) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
        .single()
        .unwrap_or(now)
}

/// `[Jan 1 year, Jan 1 year+1)` in UTC, or `None` for years chrono cannot represent
pub fn year_window(year: i32) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let start = Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).single()?;
    let end = Utc.with_ymd_and_hms(year.checked_add(1)?, 1, 1, 0, 0, 0).single()?;
    Some((start, end))
}
