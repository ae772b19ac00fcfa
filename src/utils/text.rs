// src/utils/text.rs

//! Text cleanup helpers shared by the extractor.

use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use regex::Regex;

/// ISO 8601 forms with an offset that strict RFC 3339 rejects.
const ISO_OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%dT%H:%M%:z",
];

/// Naive formats carrying a time of day, tried in order.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Fallback date-only formats, tried in order after `DATETIME_FORMATS`.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%B %d, %Y", "%b %d, %Y"];

static DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+\.\d+)").expect("decimal pattern is valid"));
static INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)").expect("integer pattern is valid"));

/// Collapse every whitespace run to a single space and trim the ends.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse a publication date.
///
/// ISO 8601 is tried first, with a trailing `Z` read as `+00:00`: strict
/// RFC 3339, then offsets without a colon or without seconds. Naive
/// fallback formats are taken as UTC. Returns `None` when nothing matches;
/// the caller decides how loudly to report it.
pub fn extract_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    let iso = match raw.strip_suffix('Z') {
        Some(prefix) => format!("{prefix}+00:00"),
        None => raw.to_string(),
    };
    if let Ok(date) = DateTime::parse_from_rfc3339(&iso) {
        return Some(date);
    }
    if let Some(date) = ISO_OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(&iso, fmt).ok())
    {
        return Some(date);
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|datetime| datetime.and_utc().fixed_offset())
}

/// Parse a score shown on its own, e.g. `"8.4"`.
pub fn parse_score(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok()
}

/// Pull a score out of text that may carry extra words, e.g. `"Score: 8.4"`.
///
/// The first decimal number wins, then the first integer.
pub fn extract_score(text: &str) -> Option<f64> {
    if text.trim().is_empty() {
        return None;
    }

    DECIMAL
        .captures(text)
        .or_else(|| INTEGER.captures(text))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}
