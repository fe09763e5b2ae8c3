//! Date handling for sheet cells and form payloads
//!
//! Sheet cells hold `d/m/yyyy` text (sometimes Buddhist-era years, sometimes
//! month-first from older imports); form payloads carry `YYYY-MM-DD` or full
//! RFC 3339 timestamps. Everything funnels through [`parse_date`].

use chrono::{DateTime, Datelike, NaiveDate, SecondsFormat, Utc};
use std::str::FromStr;

/// Offset between Buddhist-era and Gregorian years
const BUDDHIST_ERA_OFFSET: i32 = 543;

/// Years above this are taken to be Buddhist-era
const BUDDHIST_ERA_THRESHOLD: i32 = 2400;

/// How to read `a/b/yyyy` when both `a` and `b` are ≤ 12
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatePolicy {
    /// `05/06/2024` is 6 May 2024
    #[default]
    MonthFirst,
    /// `05/06/2024` is 5 June 2024
    DayFirst,
}

impl FromStr for DatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "month-first" | "month_first" | "mdy" => Ok(Self::MonthFirst),
            "day-first" | "day_first" | "dmy" => Ok(Self::DayFirst),
            other => Err(format!("unknown date policy: {}", other)),
        }
    }
}

/// Parse a calendar date from any of the accepted textual forms.
///
/// Accepted: RFC 3339 timestamps, `YYYY-MM-DD` (optionally followed by a time),
/// and `a/b/yyyy` (optionally followed by a time). Returns `None` for blank or
/// unrecognized input.
pub fn parse_date(input: &str, policy: DatePolicy) -> Option<NaiveDate> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    let token = s.split(['T', ' ']).next().unwrap_or(s);
    if token.contains('/') {
        parse_slashed(token, policy)
    } else {
        let date = NaiveDate::parse_from_str(token, "%Y-%m-%d").ok()?;
        if date.year() > BUDDHIST_ERA_THRESHOLD {
            date.with_year(date.year() - BUDDHIST_ERA_OFFSET)
        } else {
            Some(date)
        }
    }
}

fn parse_slashed(token: &str, policy: DatePolicy) -> Option<NaiveDate> {
    let mut parts = token.split('/');
    let a: u32 = parts.next()?.trim().parse().ok()?;
    let b: u32 = parts.next()?.trim().parse().ok()?;
    let mut year: i32 = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() {
        return None;
    }

    let (day, month) = if a > 12 {
        (a, b)
    } else if b > 12 {
        (b, a)
    } else {
        match policy {
            DatePolicy::MonthFirst => (b, a),
            DatePolicy::DayFirst => (a, b),
        }
    };

    if year > BUDDHIST_ERA_THRESHOLD {
        year -= BUDDHIST_ERA_OFFSET;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parse to an instant; plain dates become UTC midnight
pub fn parse_instant(input: &str, policy: DatePolicy) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input.trim()) {
        return Some(dt.with_timezone(&Utc));
    }
    parse_date(input, policy)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Re-emit any accepted date as `YYYY-MM-DD`
pub fn to_iso_date(input: &str, policy: DatePolicy) -> Option<String> {
    parse_date(input, policy).map(|d| d.format("%Y-%m-%d").to_string())
}

/// Parse a date read back from a sheet cell.
///
/// Cells are written by [`format_sheet_date`] as `d/m/yyyy`, so both parts
/// ≤ 12 always mean day first. A part above 12 still wins, which keeps older
/// month-first imports readable.
pub fn parse_sheet_date(cell: &str) -> Option<NaiveDate> {
    parse_date(cell, DatePolicy::DayFirst)
}

/// [`parse_sheet_date`] re-emitted as `YYYY-MM-DD`
pub fn sheet_date_to_iso(cell: &str) -> Option<String> {
    parse_sheet_date(cell).map(|d| d.format("%Y-%m-%d").to_string())
}

/// `d/m/yyyy` without zero padding, the form written into sheet cells
pub fn format_sheet_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.day(), date.month(), date.year())
}

/// English month name, e.g. `"May"`
pub fn month_name(date: NaiveDate) -> String {
    date.format("%B").to_string()
}

/// ISO-8601 UTC with millisecond precision, e.g. `2024-05-13T00:00:00.000Z`
pub fn iso_timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Current time as [`iso_timestamp`]
pub fn now_iso() -> String {
    iso_timestamp(Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_day_first_when_first_part_exceeds_twelve() {
        assert_eq!(
            parse_date("13/05/2024", DatePolicy::MonthFirst),
            Some(ymd(2024, 5, 13))
        );
    }

    #[test]
    fn test_month_first_when_second_part_exceeds_twelve() {
        assert_eq!(
            parse_date("05/13/2024", DatePolicy::DayFirst),
            Some(ymd(2024, 5, 13))
        );
    }

    #[test]
    fn test_ambiguous_follows_policy() {
        assert_eq!(
            parse_date("05/06/2024", DatePolicy::MonthFirst),
            Some(ymd(2024, 5, 6))
        );
        assert_eq!(
            parse_date("05/06/2024", DatePolicy::DayFirst),
            Some(ymd(2024, 6, 5))
        );
        assert_eq!(DatePolicy::default(), DatePolicy::MonthFirst);
    }

    #[test]
    fn test_buddhist_era_year() {
        assert_eq!(
            parse_date("13/5/2567", DatePolicy::MonthFirst),
            Some(ymd(2024, 5, 13))
        );
        assert_eq!(
            parse_date("2567-05-13", DatePolicy::MonthFirst),
            Some(ymd(2024, 5, 13))
        );
    }

    #[test]
    fn test_iso_and_rfc3339() {
        assert_eq!(
            parse_date("2024-05-13", DatePolicy::MonthFirst),
            Some(ymd(2024, 5, 13))
        );
        assert_eq!(
            parse_date("2024-05-13T10:30:00.000Z", DatePolicy::MonthFirst),
            Some(ymd(2024, 5, 13))
        );
        assert_eq!(
            parse_date("13/5/2024 10:30:00", DatePolicy::MonthFirst),
            Some(ymd(2024, 5, 13))
        );
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(parse_date("", DatePolicy::MonthFirst), None);
        assert_eq!(parse_date("next week", DatePolicy::MonthFirst), None);
        assert_eq!(parse_date("31/02/2024", DatePolicy::MonthFirst), None);
        assert_eq!(parse_date("1/2/3/4", DatePolicy::MonthFirst), None);
    }

    #[test]
    fn test_parse_instant_plain_date_is_utc_midnight() {
        let instant = parse_instant("2024-05-13", DatePolicy::MonthFirst).unwrap();
        assert_eq!(iso_timestamp(instant), "2024-05-13T00:00:00.000Z");
    }

    #[test]
    fn test_output_formats() {
        let d = ymd(2024, 5, 3);
        assert_eq!(format_sheet_date(d), "3/5/2024");
        assert_eq!(month_name(d), "May");
        assert_eq!(
            to_iso_date("3/5/2024", DatePolicy::DayFirst).as_deref(),
            Some("2024-05-03")
        );
    }

    #[test]
    fn test_sheet_cells_read_back_day_first() {
        for date in [ymd(2024, 5, 3), ymd(2024, 12, 1), ymd(2024, 1, 12), ymd(2024, 5, 13)] {
            assert_eq!(parse_sheet_date(&format_sheet_date(date)), Some(date));
        }
        assert_eq!(sheet_date_to_iso("05/13/2024").as_deref(), Some("2024-05-13"));
        assert_eq!(sheet_date_to_iso("3/5/2567").as_deref(), Some("2024-05-03"));
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("day-first".parse::<DatePolicy>(), Ok(DatePolicy::DayFirst));
        assert_eq!("MDY".parse::<DatePolicy>(), Ok(DatePolicy::MonthFirst));
        assert!("sideways".parse::<DatePolicy>().is_err());
    }
}
