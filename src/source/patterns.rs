//! Shared extraction helpers
//!
//! Regex captures, date normalisation to ISO `YYYY-MM-DD`, and
//! bounded-window date lookups used by several extractors.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

/// Human-readable English date such as "December 19, 2025" or "Dec 9, 2025"
pub const MONTH_DATE_PATTERN: &str = r"(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Sept|Oct|Nov|Dec)[a-z]*\.?\s+\d{1,2},\s*\d{4}";

static MONTH_DATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(MONTH_DATE_PATTERN).unwrap());

static PAREN_YYYYMMDD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((\d{8})\)").unwrap());

/// First capture group of the first match
pub fn capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Convert a compact `YYYYMMDD` token to `YYYY-MM-DD`, rejecting impossible dates
pub fn yyyymmdd_to_iso(token: &str) -> Option<String> {
    NaiveDate::parse_from_str(token, "%Y%m%d")
        .ok()
        .map(|d| d.format("%Y-%m-%d").to_string())
}

/// Convert "December 19, 2025" style dates to `YYYY-MM-DD`
pub fn month_date_to_iso(text: &str) -> Option<String> {
    let normalized = text
        .split_whitespace()
        .map(|word| match word.trim_end_matches('.') {
            "Sept" => "Sep",
            trimmed => trimmed,
        })
        .collect::<Vec<_>>()
        .join(" ");
    ["%B %d, %Y", "%b %d, %Y", "%B %d,%Y", "%b %d,%Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&normalized, fmt).ok())
        .map(|d| d.format("%Y-%m-%d").to_string())
}

/// Find the first `(YYYYMMDD)` token in text
pub fn paren_yyyymmdd(text: &str) -> Option<String> {
    capture(&PAREN_YYYYMMDD_RE, text).and_then(|t| yyyymmdd_to_iso(&t))
}

/// Find a release date near a match spanning `start..end`
///
/// The first date within `window` bytes after the match wins; otherwise the
/// last date within `window` bytes before it.
pub fn date_near(text: &str, start: usize, end: usize, window: usize) -> Option<String> {
    let after_end = floor_boundary(text, end.saturating_add(window).min(text.len()));
    let after = &text[floor_boundary(text, end)..after_end];
    if let Some(m) = MONTH_DATE_RE.find(after) {
        return month_date_to_iso(m.as_str());
    }

    let before = &text[floor_boundary(text, start.saturating_sub(window))..floor_boundary(text, start)];
    MONTH_DATE_RE
        .find_iter(before)
        .last()
        .and_then(|m| month_date_to_iso(m.as_str()))
}

/// Find a date that follows `literal` within `window` characters
pub fn date_after_literal(text: &str, literal: &str, window: usize) -> Option<String> {
    let pattern = format!(
        r"(?:^|[^\d.]){}\b[\s\S]{{0,{}}}?({})",
        regex::escape(literal),
        window,
        MONTH_DATE_PATTERN
    );
    let re = Regex::new(&pattern).ok()?;
    capture(&re, text).and_then(|d| month_date_to_iso(&d))
}

/// Keep the first `n` dot-separated components
pub fn truncate_components(version: &str, n: usize) -> String {
    version.split('.').take(n).collect::<Vec<_>>().join(".")
}

fn floor_boundary(text: &str, mut index: usize) -> usize {
    index = index.min(text.len());
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}
