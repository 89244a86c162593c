use chrono::{DateTime, NaiveDate, NaiveTime, Timelike, Utc};
use chrono_tz::Tz;

use crate::config;

fn app_time_zone() -> Tz {
    config::current_time_zone()
}

pub fn now_in_app_tz() -> DateTime<Tz> {
    Utc::now().with_timezone(&app_time_zone())
}

pub fn today_in_app_tz() -> NaiveDate {
    now_in_app_tz().date_naive()
}

/// Parses a strict `HH:MM` value as produced by the time picker.
pub fn parse_hhmm(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    if value.len() != 5 {
        return None;
    }
    NaiveTime::parse_from_str(value, "%H:%M").ok()
}

/// Reads a clock time as the API sends it, `HH:MM` or `HH:MM:SS`.
pub fn parse_clock(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .ok()
        .or_else(|| parse_hhmm(value))
}

/// Rewrites an API clock time as `HH:MM`; anything unreadable is returned trimmed.
pub fn normalize_hhmm(value: &str) -> String {
    match parse_clock(value) {
        Some(time) => format_hhmm(time),
        None => value.trim().to_string(),
    }
}

pub fn format_hhmm(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

pub fn minutes_since_midnight(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// `2025-03-04` → `Tue, 04 Mar 2025`
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%a, %d %b %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_times_with_seconds_are_shortened() {
        assert_eq!(normalize_hhmm("09:00:00"), "09:00");
        assert_eq!(normalize_hhmm("17:30"), "17:30");
        assert_eq!(normalize_hhmm(" later "), "later");
        assert_eq!(parse_clock("08:15:59"), NaiveTime::from_hms_opt(8, 15, 59));
        assert!(parse_clock("8am").is_none());
    }

    #[test]
    fn parse_hhmm_accepts_only_two_digit_fields() {
        assert_eq!(parse_hhmm("09:00"), NaiveTime::from_hms_opt(9, 0, 0));
        assert_eq!(parse_hhmm(" 17:30 "), NaiveTime::from_hms_opt(17, 30, 0));
        assert!(parse_hhmm("9:00").is_none());
        assert!(parse_hhmm("24:00").is_none());
        assert!(parse_hhmm("").is_none());
    }

    #[test]
    fn minutes_since_midnight_counts_hours_and_minutes() {
        let t = NaiveTime::from_hms_opt(6, 45, 0).unwrap();
        assert_eq!(minutes_since_midnight(t), 405);
        assert_eq!(format_hhmm(t), "06:45");
    }

    #[test]
    fn date_helpers_use_iso_format() {
        let date = parse_date("2025-03-04").unwrap();
        assert_eq!(format_date(date), "2025-03-04");
        assert_eq!(format_long_date(date), "Tue, 04 Mar 2025");
        assert!(parse_date("04/03/2025").is_none());
    }
}
