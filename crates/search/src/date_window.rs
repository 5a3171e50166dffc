//! Symbolic period selectors resolved against an evaluation instant.
//!
//! Windows are rolling: "today" means the 24 hours before `now`, not "since
//! midnight". All arithmetic happens in UTC with fixed-length days.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};

/// Window applied to a selector that is set but not recognised.
pub const DEFAULT_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateRange {
    Today,
    Week,
    Month,
    Other(String),
}

impl DateRange {
    /// `None` for a blank selector, which imposes no window at all.
    pub fn parse(selector: &str) -> Option<Self> {
        let selector = selector.trim();
        if selector.is_empty() {
            return None;
        }
        Some(match selector.to_ascii_lowercase().as_str() {
            "today" => DateRange::Today,
            "week" => DateRange::Week,
            "month" => DateRange::Month,
            _ => DateRange::Other(selector.to_string()),
        })
    }

    pub fn days(&self) -> i64 {
        match self {
            DateRange::Today => 1,
            DateRange::Week => 7,
            DateRange::Month => 30,
            DateRange::Other(_) => DEFAULT_WINDOW_DAYS,
        }
    }

    pub fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::days(self.days())
    }
}

/// Earliest instant a record may carry and still fall inside the window.
pub fn resolve_cutoff(now: DateTime<Utc>, selector: &str) -> Option<DateTime<Utc>> {
    let range = DateRange::parse(selector)?;
    if let DateRange::Other(raw) = &range {
        log::debug!("Unknown date range {raw:?}; using the {DEFAULT_WINDOW_DAYS}-day default");
    }
    Some(range.cutoff(now))
}

/// Accepts RFC 3339, naive date-times (read as UTC) and bare dates (UTC midnight).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
