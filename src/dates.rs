//! Publication-date parsing and month-window arithmetic.
//!
//! Listing pages carry dates in several shapes: an ISO-8601 `datetime`
//! attribute (`2025-12-27T10:00:00Z`), a bare `2025-12-27`, or human-readable
//! text like `27 December 2025` / `27 Dec 2025`. [`parse_pub_date`] tries them
//! in a fixed order and normalizes everything to UTC. A date that matches no
//! attempt is `None`, never an error; the scanner and the sort both treat
//! `None` as "unknown, exclude from date-based decisions."
//!
//! [`month_window`] turns an optional `YYYY-MM` argument into the half-open
//! UTC range `[start, end)` covering exactly that calendar month.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::DigestError;

static WHITESPACE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static MONTH_ARG: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})$").unwrap());

/// Zone-less ISO date-times are assumed UTC.
const ZONELESS_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Plain dates, interpreted as UTC midnight.
const DATE_FORMATS: [&str; 3] = ["%d %B %Y", "%d %b %Y", "%Y-%m-%d"];

/// Parse heterogeneous publication-date text into a UTC instant.
///
/// Attempts, first success wins:
/// 1. RFC 3339 with explicit offset (`Z` is offset zero), converted to UTC
/// 2. ISO date-time without a zone, assumed UTC
/// 3. `27 December 2025`, `27 Dec 2025`, `2025-12-27`, as UTC midnight
///
/// Internal whitespace runs are collapsed first. Empty input and text that
/// survives no attempt yield `None`.
pub fn parse_pub_date(text: &str) -> Option<DateTime<Utc>> {
    let s = WHITESPACE_RUNS.replace_all(text.trim(), " ");
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(&s) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ZONELESS_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&s, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(&s, fmt) {
            return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
        }
    }

    None
}

/// The half-open UTC range covering one calendar month.
#[derive(Debug, Clone)]
pub struct MonthWindow {
    /// First instant of the month (inclusive).
    pub start: DateTime<Utc>,
    /// First instant of the following month (exclusive).
    pub end: DateTime<Utc>,
    /// `YYYY-MM`, used for the report heading and the output filename.
    pub label: String,
}

impl MonthWindow {
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        ts >= self.start && ts < self.end
    }
}

/// Compute the target month window.
///
/// With no argument the window is the current UTC calendar month. A given
/// argument must be `YYYY-MM` with the month in `01..=12`; anything else is
/// [`DigestError::InvalidInput`]. December rolls the end into January of the
/// following year.
pub fn month_window(month_arg: Option<&str>) -> Result<MonthWindow, DigestError> {
    let (year, month) = match month_arg {
        None => {
            let now = Utc::now();
            (now.year(), now.month())
        }
        Some(raw) => {
            let caps = MONTH_ARG.captures(raw.trim()).ok_or_else(|| {
                DigestError::InvalidInput(
                    "month must be in YYYY-MM format, e.g. 2025-12".to_string(),
                )
            })?;
            let year: i32 = caps[1].parse().map_err(|_| {
                DigestError::InvalidInput("month year is out of range".to_string())
            })?;
            let month: u32 = caps[2].parse().map_err(|_| {
                DigestError::InvalidInput("month must be between 01 and 12".to_string())
            })?;
            if !(1..=12).contains(&month) {
                return Err(DigestError::InvalidInput(
                    "month must be between 01 and 12".to_string(),
                ));
            }
            (year, month)
        }
    };

    let start = month_start(year, month)?;
    let end = if month == 12 {
        month_start(year + 1, 1)?
    } else {
        month_start(year, month + 1)?
    };

    Ok(MonthWindow {
        start,
        end,
        label: format!("{year:04}-{month:02}"),
    })
}

fn month_start(year: i32, month: u32) -> Result<DateTime<Utc>, DigestError> {
    Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0)
        .single()
        .ok_or_else(|| {
            DigestError::InvalidInput(format!("{year:04}-{month:02} is not a valid month"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn test_parse_rfc3339_z_suffix() {
        assert_eq!(
            parse_pub_date("2025-12-27T10:00:00Z"),
            Some(utc(2025, 12, 27, 10, 0, 0))
        );
    }

    #[test]
    fn test_parse_z_equals_zero_offset() {
        assert_eq!(
            parse_pub_date("2025-12-27T10:00:00Z"),
            parse_pub_date("2025-12-27T10:00:00+00:00")
        );
    }

    #[test]
    fn test_parse_rfc3339_nonzero_offset_normalized_to_utc() {
        assert_eq!(
            parse_pub_date("2025-12-27T10:00:00+08:00"),
            Some(utc(2025, 12, 27, 2, 0, 0))
        );
    }

    #[test]
    fn test_parse_zoneless_datetime_assumed_utc() {
        assert_eq!(
            parse_pub_date("2025-12-27T10:00:00"),
            Some(utc(2025, 12, 27, 10, 0, 0))
        );
        assert_eq!(
            parse_pub_date("2025-12-27T10:00"),
            Some(utc(2025, 12, 27, 10, 0, 0))
        );
    }

    #[test]
    fn test_parse_full_month_name() {
        assert_eq!(
            parse_pub_date("27 December 2025"),
            Some(utc(2025, 12, 27, 0, 0, 0))
        );
    }

    #[test]
    fn test_parse_abbreviated_month_name() {
        assert_eq!(
            parse_pub_date("27 Dec 2025"),
            Some(utc(2025, 12, 27, 0, 0, 0))
        );
    }

    #[test]
    fn test_parse_plain_date_is_utc_midnight() {
        assert_eq!(
            parse_pub_date("2025-12-27"),
            Some(utc(2025, 12, 27, 0, 0, 0))
        );
    }

    #[test]
    fn test_parse_collapses_whitespace_runs() {
        assert_eq!(
            parse_pub_date("  27   December\n 2025 "),
            Some(utc(2025, 12, 27, 0, 0, 0))
        );
    }

    #[test]
    fn test_parse_unstructured_text_is_absent() {
        assert_eq!(parse_pub_date(""), None);
        assert_eq!(parse_pub_date("   "), None);
        assert_eq!(parse_pub_date("yesterday"), None);
        assert_eq!(parse_pub_date("December 2025"), None);
        assert_eq!(parse_pub_date("27/12/2025"), None);
    }

    #[test]
    fn test_month_window_december_rolls_year() {
        let window = month_window(Some("2025-12")).unwrap();
        assert_eq!(window.start, utc(2025, 12, 1, 0, 0, 0));
        assert_eq!(window.end, utc(2026, 1, 1, 0, 0, 0));
        assert_eq!(window.label, "2025-12");
    }

    #[test]
    fn test_month_window_mid_year() {
        let window = month_window(Some("2025-02")).unwrap();
        assert_eq!(window.start, utc(2025, 2, 1, 0, 0, 0));
        assert_eq!(window.end, utc(2025, 3, 1, 0, 0, 0));
        assert_eq!(window.label, "2025-02");
    }

    #[test]
    fn test_month_window_is_one_calendar_month() {
        for arg in ["2024-02", "2025-06", "2025-12", "2026-01"] {
            let window = month_window(Some(arg)).unwrap();
            assert!(window.start < window.end);
            let expected_end = if window.start.month() == 12 {
                utc(window.start.year() + 1, 1, 1, 0, 0, 0)
            } else {
                utc(window.start.year(), window.start.month() + 1, 1, 0, 0, 0)
            };
            assert_eq!(window.end, expected_end);
        }
    }

    #[test]
    fn test_month_window_defaults_to_current_month() {
        let window = month_window(None).unwrap();
        assert!(window.contains(Utc::now()));
    }

    #[test]
    fn test_month_window_rejects_malformed_args() {
        for bad in ["13-01", "2025-13", "2025-00", "2025/12", "202512", "abc", "2025-1"] {
            match month_window(Some(bad)) {
                Err(DigestError::InvalidInput(_)) => {}
                other => panic!("expected InvalidInput for {bad:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_window_contains_is_half_open() {
        let window = month_window(Some("2025-12")).unwrap();
        assert!(window.contains(window.start));
        assert!(window.contains(utc(2025, 12, 31, 23, 59, 59)));
        assert!(!window.contains(window.end));
        assert!(!window.contains(utc(2025, 11, 30, 23, 59, 59)));
    }
}
