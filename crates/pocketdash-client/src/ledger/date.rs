use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::ledger::types::ParsedTimestamp;

pub const TODAY_LABEL: &str = "Today";
pub const YESTERDAY_LABEL: &str = "Yesterday";
pub const OTHER_LABEL: &str = "Other";

const DATE_TIME_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// Whether calendar-date labels in the current year carry the year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateLabelStyle {
    /// "2 Jan" this year, "2 Jan 2023" otherwise.
    #[default]
    OmitCurrentYear,
    /// "2 Jan 2024" always.
    AlwaysYear,
}

pub fn parse_timestamp(value: &str) -> Option<ParsedTimestamp> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(ParsedTimestamp {
            at: parsed.naive_local(),
            has_time: true,
        });
    }

    for format in DATE_TIME_FORMATS {
        if let Ok(at) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(ParsedTimestamp { at, has_time: true });
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return date.and_hms_opt(0, 0, 0).map(|at| ParsedTimestamp {
                at,
                has_time: false,
            });
        }
    }

    None
}

/// Parses the `--now` override: a date, or a date and time.
pub fn parse_now(value: &str) -> Option<NaiveDateTime> {
    parse_timestamp(value).map(|parsed| parsed.at)
}

pub fn same_month(at: NaiveDateTime, now: NaiveDateTime) -> bool {
    at.year() == now.year() && at.month() == now.month()
}

pub fn relative_group(timestamp: &str, now: NaiveDateTime) -> String {
    relative_group_with(timestamp, now, DateLabelStyle::default())
}

pub fn relative_group_with(timestamp: &str, now: NaiveDateTime, style: DateLabelStyle) -> String {
    match parse_timestamp(timestamp) {
        Some(parsed) => group_label(parsed.at.date(), now.date(), style),
        None => OTHER_LABEL.to_string(),
    }
}

pub fn group_label(date: NaiveDate, today: NaiveDate, style: DateLabelStyle) -> String {
    if date == today {
        return TODAY_LABEL.to_string();
    }
    if date + Duration::days(1) == today {
        return YESTERDAY_LABEL.to_string();
    }

    let include_year = match style {
        DateLabelStyle::AlwaysYear => true,
        DateLabelStyle::OmitCurrentYear => date.year() != today.year(),
    };
    if include_year {
        date.format("%-d %b %Y").to_string()
    } else {
        date.format("%-d %b").to_string()
    }
}

/// "March 2024"
pub fn period_label(now: NaiveDateTime) -> String {
    now.format("%B %Y").to_string()
}

pub fn format_time(parsed: &ParsedTimestamp) -> String {
    if parsed.has_time {
        parsed.at.format("%H:%M").to_string()
    } else {
        String::new()
    }
}
