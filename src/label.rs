//! Display labels for the report picker and the period header.

use std::sync::OnceLock;

use chrono::{Local, TimeZone};
use regex::Regex;

use crate::model::Report;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

fn period_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})\s*-\s*(\d{1,2})/(\d{1,2})/(\d{4})$")
            .expect("period regex is valid")
    })
}

fn month_name(month: &str) -> Option<&'static str> {
    let idx: usize = month.parse().ok()?;
    MONTHS.get(idx.checked_sub(1)?).copied()
}

/// Render `dd/mm/yyyy-dd/mm/yyyy` as `dd Mon yyyy - dd Mon yyyy`.
///
/// Anything that does not have that exact shape, or names a month outside
/// 1..=12, comes back verbatim.
#[must_use]
pub fn format_period(raw: &str) -> String {
    let Some(caps) = period_re().captures(raw.trim()) else {
        return raw.to_string();
    };
    match (month_name(&caps[2]), month_name(&caps[5])) {
        (Some(start_month), Some(end_month)) => format!(
            "{} {} {} - {} {} {}",
            &caps[1], start_month, &caps[3], &caps[4], end_month, &caps[6]
        ),
        _ => raw.to_string(),
    }
}

/// The report period, if the report carries one in either form.
#[must_use]
pub fn period_header(report: &Report) -> Option<String> {
    if let Some(formatted) = non_empty(&report.report_period_formatted) {
        return Some(formatted.to_string());
    }
    non_empty(&report.report_period).map(format_period)
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// Render a millisecond timestamp in the local time zone.
#[must_use]
pub fn format_timestamp(millis: i64) -> Option<String> {
    Local
        .timestamp_millis_opt(millis)
        .single()
        .map(|dt| dt.format("%d/%m/%Y, %H:%M:%S").to_string())
}

/// Picker label for the report at `index`.
#[must_use]
pub fn report_label(report: &Report, index: usize) -> String {
    if let Some(period) = period_header(report) {
        return period;
    }
    if let Some(date) = non_empty(&report.date) {
        return date.to_string();
    }
    report
        .timestamp
        .and_then(format_timestamp)
        .unwrap_or_else(|| format!("Report {}", index + 1))
}
