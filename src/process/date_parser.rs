use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use crate::process::utils::clean_str;

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

const DATETIME_FORMATS: [&str; 8] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
];

/// Parse a claim date in any of the layouts seen in claims extracts.
/// A time component, if present, is discarded.
pub fn parse_claim_date(s: &str) -> Option<NaiveDate> {
    let s = clean_str(s);
    if s.is_empty() {
        return None;
    }

    // fast path for plain ISO dates
    let b = s.as_bytes();
    if b.len() == 10 && b[4] == b'-' && b[7] == b'-' {
        let year: i32 = s[0..4].parse().ok()?;
        let month: u32 = s[5..7].parse().ok()?;
        let day: u32 = s[8..10].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    // compact YYYYMMDD
    if s.len() == 8 && s.bytes().all(|b| b.is_ascii_digit()) {
        let year: i32 = s[0..4].parse().ok()?;
        let month: u32 = s[4..6].parse().ok()?;
        let day: u32 = s[6..8].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    // chrono's %Y takes any digit count; "01/05/23" must not become year 1
    if !has_four_digit_year(s) {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.naive_local().date())
        })
}

/// True when the date part (before any time) is three numeric fields with a
/// four-digit year leading or trailing.
fn has_four_digit_year(s: &str) -> bool {
    let date = s.split(|c: char| c == ' ' || c == 'T').next().unwrap_or_default();
    let parts: Vec<&str> = date.split(|c: char| c == '-' || c == '/').collect();
    parts.len() == 3
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()))
        && (parts[0].len() == 4 || parts[2].len() == 4)
}

/// Days from 0001-01-01 to 1970-01-01, the offset between chrono's CE count and Arrow's Date32.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Arrow `Date32` value for `date`.
pub fn days_since_epoch(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

/// `YYYY-MM` of a date.
pub fn to_claim_month(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}
