//! Pure UI helpers extracted from components for non-wasm testing.

use chrono::{DateTime, Datelike, NaiveDate};
use std::fmt::Write;

/// Combined trending sets.
pub const TRENDING_PATH: &str = "/api/trending/all";
/// Login endpoint.
pub const LOGIN_PATH: &str = "/auth/login";
/// Registration endpoint.
pub const REGISTER_PATH: &str = "/auth/register";
/// Review submission endpoint.
pub const REVIEW_ADD_PATH: &str = "/reviews/add";
/// Command relay endpoint.
pub const COMMAND_PATH: &str = "/api/cmd";

/// Movie detail path for a route identifier.
#[must_use]
pub fn movie_detail_path(id: i64) -> String {
    format!("/movies/tmdb/{id}")
}

/// Person detail path.
#[must_use]
pub fn person_path(id: i64) -> String {
    format!("/actors/{id}")
}

/// Review list path for a movie.
#[must_use]
pub fn reviews_path(movie_id: i64) -> String {
    format!("/reviews/{movie_id}")
}

/// Combined search path with a URL-encoded query.
#[must_use]
pub fn search_path(query: &str) -> String {
    format!("/api/search/all?query={}", urlencoding::encode(query))
}

/// Parse a route segment into a positive movie identifier.
#[must_use]
pub fn parse_route_id(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok().filter(|id| *id > 0)
}

/// Rating rendered with one decimal; `None` when absent or zero.
#[must_use]
pub fn format_rating(score: Option<f64>) -> Option<String> {
    score
        .filter(|value| value.is_finite() && *value > 0.0)
        .map(|value| format!("{value:.1}"))
}

/// Parse any of the backend's date renderings.
///
/// Accepts `YYYY-MM-DD` (optionally followed by a time), RFC 3339 and the
/// RFC 2822 form the catalog's HTTP layer emits for date columns.
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if let Some(date) = trimmed
        .get(..10)
        .and_then(|head| NaiveDate::parse_from_str(head, "%Y-%m-%d").ok())
    {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .or_else(|_| DateTime::parse_from_rfc2822(trimmed))
        .ok()
        .map(|stamp| stamp.date_naive())
}

/// Normalised `YYYY-MM-DD` rendering, or the raw text when unparseable.
#[must_use]
pub fn display_date(raw: &str) -> String {
    parse_date(raw).map_or_else(
        || raw.trim().to_string(),
        |date| date.format("%Y-%m-%d").to_string(),
    )
}

/// Age as the difference between the current year and the birth year.
#[must_use]
pub fn age_in(birth: NaiveDate, current_year: i32) -> i32 {
    current_year - birth.year()
}

/// Escape text for interpolation into HTML content or quoted attributes.
#[must_use]
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Join non-empty names with the given separator.
#[must_use]
pub fn join_names<'a>(names: impl IntoIterator<Item = &'a str>, separator: &str) -> String {
    let mut out = String::new();
    for name in names.into_iter().map(str::trim).filter(|name| !name.is_empty()) {
        if !out.is_empty() {
            out.push_str(separator);
        }
        let _ = write!(out, "{name}");
    }
    out
}
