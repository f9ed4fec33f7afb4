//! Input validation for scheduling data.
//!
//! Day and time values travel as strings (`YYYY-MM-DD`, `HH:MM`) end to end,
//! so every endpoint validates them here before they reach a query.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating calendar days (YYYY-MM-DD, fixed widths)
    static ref DAY_REGEX: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();

    /// Regex for validating times of day (HH:MM, 24-hour)
    static ref TIME_REGEX: Regex = Regex::new(r"^\d{2}:\d{2}$").unwrap();
}

/// Valid role values, shared between staff and shifts (stored lowercase)
pub const ALLOWED_ROLES: [&str; 3] = ["server", "cook", "manager"];

/// Validate a calendar day string as `YYYY-MM-DD`.
///
/// The regex fixes component widths (rejecting `2025-9-1`); the chrono
/// round-trip rejects impossible dates like `2025-02-30` or `2025-13-01`.
pub fn is_valid_day(day: &str) -> bool {
    if !DAY_REGEX.is_match(day) {
        return false;
    }
    NaiveDate::parse_from_str(day, "%Y-%m-%d").is_ok()
}

/// Validate a time string as `HH:MM` on a 24-hour clock.
///
/// Single-digit hours (`7:30`) and alternate separators (`07-30`) are
/// rejected by the regex; out-of-range components by the bounds check.
pub fn is_valid_time(time: &str) -> bool {
    if !TIME_REGEX.is_match(time) {
        return false;
    }
    let (h, m) = match time.split_once(':') {
        Some(parts) => parts,
        None => return false,
    };
    match (h.parse::<u32>(), m.parse::<u32>()) {
        (Ok(h), Ok(m)) => h <= 23 && m <= 59,
        _ => false,
    }
}

/// Convert a pre-validated `HH:MM` string to minutes since midnight.
///
/// Callers must run `is_valid_time` first; anything malformed maps to 0.
pub fn time_to_minutes(time: &str) -> i64 {
    debug_assert!(is_valid_time(time), "time_to_minutes on unvalidated input");
    let (h, m) = time.split_once(':').unwrap_or(("0", "0"));
    let h: i64 = h.parse().unwrap_or(0);
    let m: i64 = m.parse().unwrap_or(0);
    h * 60 + m
}

/// Validate a role value against the fixed set (case-insensitive).
pub fn validate_role(role: &str) -> Result<(), String> {
    let role_lower = role.to_lowercase();
    if !ALLOWED_ROLES.contains(&role_lower.as_str()) {
        return Err(format!("Invalid role. Allowed: {}", ALLOWED_ROLES.join(", ")));
    }
    Ok(())
}
