//! Parsing and normalization of typed work durations.
//!
//! Every place where a person types worked time (the `log` command, the weekly
//! grid, timer corrections) goes through this module. It accepts two
//! grammars and produces one canonical shape.
//!
//! ## Accepted Input
//!
//! - **Decimal hours**: `"2"`, `"2.5"`, `"8.75"`, `".5"`. The fractional part
//!   is converted to minutes and rounded to the nearest minute.
//! - **Clock format**: `"2:30"`, and the partial forms `"2:"` and `"2:3"`.
//!   A single digit after the colon is read as tens of minutes, so `"2:3"`
//!   means 2h30m. Minutes of 60 or more fold into the hours (`"1:90"` is
//!   `"2:30"`).
//!
//! ## Validity
//!
//! The ceiling is inclusive `24:00`. Anything above it, and any negative
//! number, is a range error. Exactly zero is accepted here; call sites decide
//! whether zero means "delete the entry".
//!
//! ## Storage
//!
//! Values are persisted and sent over the wire as decimal hours rounded to two
//! places by [`round_for_storage`]. Converting a stored value back to `H:MM`
//! with [`format_for_display`] may drift by at most one minute.
//!
//! ## Examples
//!
//! ```rust
//! use timecard::libs::duration::{format_for_display, normalize, round_for_storage, to_decimal_hours};
//!
//! assert_eq!(normalize("2.2").unwrap().to_string(), "2:12");
//! assert_eq!(normalize("2:75").unwrap().to_string(), "3:15");
//! assert_eq!(to_decimal_hours("2:3").unwrap(), 2.5);
//! assert_eq!(round_for_storage(8.756), 8.76);
//! assert_eq!(format_for_display(8.75), "8:45");
//! ```

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Inclusive upper bound for a single duration, in hours.
pub const MAX_HOURS: u64 = 24;

/// Why a raw duration string could not be normalized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    /// Nothing was typed. Callers treat this as "no value", not as a failure.
    #[error("no duration provided")]
    Empty,
    /// The text matches neither the decimal nor the clock grammar.
    #[error("unrecognized duration '{0}'")]
    SyntaxInvalid(String),
    /// The text parses but is negative or exceeds 24:00.
    #[error("duration '{0}' is outside 0:00..=24:00")]
    RangeInvalid(String),
}

impl DurationError {
    pub fn is_empty(&self) -> bool {
        matches!(self, DurationError::Empty)
    }
}

/// A duration in canonical clock form: minutes are always below 60.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockDuration {
    hours: u64,
    minutes: u64,
}

impl ClockDuration {
    /// Builds a duration from raw parts, folding minute overflow into hours.
    ///
    /// Returns `None` when the folded value exceeds 24:00.
    pub fn new(hours: u64, minutes: u64) -> Option<Self> {
        let hours = hours.checked_add(minutes / 60)?;
        let minutes = minutes % 60;
        if hours > MAX_HOURS || (hours == MAX_HOURS && minutes > 0) {
            return None;
        }
        Some(Self { hours, minutes })
    }

    pub fn hours(&self) -> u64 {
        self.hours
    }

    pub fn minutes(&self) -> u64 {
        self.minutes
    }

    pub fn is_zero(&self) -> bool {
        self.hours == 0 && self.minutes == 0
    }

    /// Decimal hours, unrounded (`2:30` is `2.5`).
    pub fn as_decimal_hours(&self) -> f64 {
        self.hours as f64 + self.minutes as f64 / 60.0
    }
}

impl fmt::Display for ClockDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.hours, self.minutes)
    }
}

impl FromStr for ClockDuration {
    type Err = DurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        normalize(s)
    }
}

/// Parses user-typed text into a canonical [`ClockDuration`].
///
/// Rules are tried in order: empty input, decimal hours, clock format.
/// The first grammar that matches decides the result.
///
/// # Errors
///
/// - [`DurationError::Empty`] for empty or whitespace-only input
/// - [`DurationError::RangeInvalid`] for negative values or values above 24:00
/// - [`DurationError::SyntaxInvalid`] for everything else
pub fn normalize(raw: &str) -> Result<ClockDuration, DurationError> {
    let input = raw.trim();
    if input.is_empty() {
        return Err(DurationError::Empty);
    }

    if let Some((int_part, frac_part)) = split_decimal(input) {
        return parse_decimal(input, int_part, frac_part);
    }

    if let Some((hours_part, minutes_part)) = split_clock(input) {
        return parse_clock(input, hours_part, minutes_part);
    }

    // A leading minus on an otherwise well-formed number is a range problem,
    // which lets callers show the range message instead of the format help.
    if let Some(rest) = input.strip_prefix('-') {
        if split_decimal(rest).is_some() || split_clock(rest).is_some() {
            return Err(DurationError::RangeInvalid(input.to_string()));
        }
    }

    Err(DurationError::SyntaxInvalid(input.to_string()))
}

/// Parses user-typed text straight to decimal hours (unrounded).
pub fn to_decimal_hours(raw: &str) -> Result<f64, DurationError> {
    normalize(raw).map(|clock| clock.as_decimal_hours())
}

/// Rounds decimal hours to two places, the only precision ever persisted.
///
/// Negative and non-finite values clamp to `0.0`. Halves round away from
/// zero on the binary value, so a decimal tie like `1.005` (stored as
/// `1.00499…`) rounds down to `1.0`. Clock input never lands on such a tie:
/// `m / 60` hours is never an exact odd multiple of `0.005`.
pub fn round_for_storage(hours: f64) -> f64 {
    if !hours.is_finite() || hours <= 0.0 {
        return 0.0;
    }
    (hours * 100.0).round() / 100.0
}

/// Renders decimal hours as `H:MM`.
///
/// Minute rounding can produce 60, which folds into the hour. Negative and
/// non-finite values render as `0:00`.
pub fn format_for_display(hours: f64) -> String {
    if !hours.is_finite() || hours <= 0.0 {
        return "0:00".to_string();
    }
    let whole = hours.floor();
    let minutes = ((hours - whole) * 60.0).round() as u64;
    let whole = whole as u64 + minutes / 60;
    format!("{}:{:02}", whole, minutes % 60)
}

/// True when `raw` is a finite duration in `(0, 24]`.
///
/// Zero is rejected here. Use [`is_valid_or_clear`] where clearing a value is
/// a legal outcome.
pub fn is_valid_duration(raw: &str) -> bool {
    match to_decimal_hours(raw) {
        Ok(hours) => hours.is_finite() && hours > 0.0 && hours <= MAX_HOURS as f64,
        Err(_) => false,
    }
}

/// Like [`is_valid_duration`] but also accepts empty input and zero.
pub fn is_valid_or_clear(raw: &str) -> bool {
    match normalize(raw) {
        Ok(clock) => clock.is_zero() || is_valid_duration(raw),
        Err(e) => e.is_empty(),
    }
}

/// Splits `digits* '.'? digits*` with at least one digit overall.
fn split_decimal(input: &str) -> Option<(&str, &str)> {
    let (int_part, frac_part) = match input.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (input, ""),
    };
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int_part) || !all_digits(frac_part) {
        return None;
    }
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    Some((int_part, frac_part))
}

/// Splits `digits+ ':' digit{0,2}`.
fn split_clock(input: &str) -> Option<(&str, &str)> {
    let (hours_part, minutes_part) = input.split_once(':')?;
    if hours_part.is_empty() || !hours_part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if minutes_part.len() > 2 || !minutes_part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((hours_part, minutes_part))
}

fn parse_decimal(input: &str, int_part: &str, frac_part: &str) -> Result<ClockDuration, DurationError> {
    let range_err = || DurationError::RangeInvalid(input.to_string());

    let normalized = format!(
        "{}.{}",
        if int_part.is_empty() { "0" } else { int_part },
        if frac_part.is_empty() { "0" } else { frac_part }
    );
    let value: f64 = normalized.parse().map_err(|_| DurationError::SyntaxInvalid(input.to_string()))?;
    if !value.is_finite() || value < 0.0 || value > MAX_HOURS as f64 {
        return Err(range_err());
    }

    let hours = value.floor();
    let minutes = ((value - hours) * 60.0).round();
    ClockDuration::new(hours as u64, minutes as u64).ok_or_else(range_err)
}

fn parse_clock(input: &str, hours_part: &str, minutes_part: &str) -> Result<ClockDuration, DurationError> {
    let range_err = || DurationError::RangeInvalid(input.to_string());

    // Digit runs too long for u64 are far beyond 24 hours.
    let hours: u64 = hours_part.parse().map_err(|_| range_err())?;
    let minutes: u64 = match minutes_part.len() {
        0 => 0,
        1 => minutes_part.parse::<u64>().map_err(|_| range_err())? * 10,
        _ => minutes_part.parse().map_err(|_| range_err())?,
    };

    ClockDuration::new(hours, minutes).ok_or_else(range_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(raw: &str) -> String {
        normalize(raw).unwrap().to_string()
    }

    #[test]
    fn test_decimal_to_clock() {
        assert_eq!(norm("2.5"), "2:30");
        assert_eq!(norm("2.2"), "2:12");
        assert_eq!(norm("8.75"), "8:45");
        assert_eq!(norm(".5"), "0:30");
        assert_eq!(norm("2."), "2:00");
        assert_eq!(norm("2"), "2:00");
        assert_eq!(norm("  3.25 "), "3:15");
    }

    #[test]
    fn test_decimal_minute_rounding_folds_into_hour() {
        // 0.999 * 60 = 59.94, rounds to 60
        assert_eq!(norm("1.999"), "2:00");
        assert_eq!(norm("23.999"), "24:00");
    }

    #[test]
    fn test_clock_forms() {
        assert_eq!(norm("2:30"), "2:30");
        assert_eq!(norm("2:05"), "2:05");
        assert_eq!(norm("2:"), "2:00");
        assert_eq!(norm("02:00"), "2:00");
        assert_eq!(norm("0:45"), "0:45");
    }

    #[test]
    fn test_single_digit_minute_is_tens() {
        assert_eq!(norm("2:3"), "2:30");
        assert_eq!(norm("1:0"), "1:00");
        assert_eq!(norm("0:9"), "1:30");
    }

    #[test]
    fn test_minute_overflow_fold() {
        assert_eq!(norm("2:75"), "3:15");
        assert_eq!(norm("1:90"), "2:30");
        assert_eq!(norm("0:60"), "1:00");
        assert_eq!(norm("23:60"), "24:00");
    }

    #[test]
    fn test_ceiling() {
        assert_eq!(norm("24"), "24:00");
        assert_eq!(norm("24:00"), "24:00");
        assert_eq!(norm("24.0"), "24:00");
        assert!(matches!(normalize("24:01"), Err(DurationError::RangeInvalid(_))));
        assert!(matches!(normalize("25"), Err(DurationError::RangeInvalid(_))));
        assert!(matches!(normalize("36:00"), Err(DurationError::RangeInvalid(_))));
        assert!(matches!(normalize("24.01"), Err(DurationError::RangeInvalid(_))));
        assert!(matches!(normalize("23:99"), Err(DurationError::RangeInvalid(_))));
        assert!(matches!(normalize("99999999999999999999999:00"), Err(DurationError::RangeInvalid(_))));
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(matches!(normalize("abc"), Err(DurationError::SyntaxInvalid(_))));
        assert!(matches!(normalize("1:2:3"), Err(DurationError::SyntaxInvalid(_))));
        assert!(matches!(normalize("2:300"), Err(DurationError::SyntaxInvalid(_))));
        assert!(matches!(normalize("."), Err(DurationError::SyntaxInvalid(_))));
        assert!(matches!(normalize(":30"), Err(DurationError::SyntaxInvalid(_))));
        assert!(matches!(normalize("1.2.3"), Err(DurationError::SyntaxInvalid(_))));
        assert!(matches!(normalize("2h"), Err(DurationError::SyntaxInvalid(_))));
        assert!(matches!(normalize("2 30"), Err(DurationError::SyntaxInvalid(_))));
    }

    #[test]
    fn test_negative_is_range_error() {
        assert!(matches!(normalize("-1"), Err(DurationError::RangeInvalid(_))));
        assert!(matches!(normalize("-0:30"), Err(DurationError::RangeInvalid(_))));
        assert!(matches!(normalize("-abc"), Err(DurationError::SyntaxInvalid(_))));
    }

    #[test]
    fn test_empty_is_distinct() {
        assert_eq!(normalize(""), Err(DurationError::Empty));
        assert_eq!(normalize("   "), Err(DurationError::Empty));
        assert!(normalize("").unwrap_err().is_empty());
        assert!(!normalize("x").unwrap_err().is_empty());
    }

    #[test]
    fn test_to_decimal_hours() {
        assert_eq!(to_decimal_hours("2:30").unwrap(), 2.5);
        assert_eq!(to_decimal_hours("2:3").unwrap(), 2.5);
        assert_eq!(to_decimal_hours("8.75").unwrap(), 8.75);
        assert_eq!(to_decimal_hours("0").unwrap(), 0.0);
        assert!((to_decimal_hours("2.2").unwrap() - 2.2).abs() < 1e-9);
        assert_eq!(to_decimal_hours("abc"), Err(DurationError::SyntaxInvalid("abc".to_string())));
    }

    #[test]
    fn test_round_for_storage() {
        assert_eq!(round_for_storage(2.5), 2.5);
        assert_eq!(round_for_storage(1.0 / 3.0), 0.33);
        assert_eq!(round_for_storage(2.0 / 3.0), 0.67);
        assert_eq!(round_for_storage(0.125), 0.13);
        assert_eq!(round_for_storage(0.004), 0.0);
        assert_eq!(round_for_storage(-1.0), 0.0);
        assert_eq!(round_for_storage(f64::NAN), 0.0);
        assert_eq!(round_for_storage(1.005), 1.0);
    }

    #[test]
    fn test_round_for_storage_minutes_match_exact_rounding() {
        for minutes in 0..60u32 {
            // Exact half-up rounding of minutes * 100 / 60 in integers
            let hundredths = (minutes * 100 * 2 + 60) / 120;
            let stored = round_for_storage(5.0 + minutes as f64 / 60.0);
            assert_eq!((stored * 100.0).round() as u32, 500 + hundredths, "{} minutes", minutes);
        }
    }

    #[test]
    fn test_round_for_storage_idempotent() {
        let mut x = 0.0;
        while x <= 24.0 {
            let once = round_for_storage(x);
            assert_eq!(round_for_storage(once), once, "not idempotent for {}", x);
            let scaled = once * 100.0;
            assert!((scaled - scaled.round()).abs() < 1e-6, "more than 2 decimals for {}", x);
            x += 0.0037;
        }
    }

    #[test]
    fn test_format_for_display() {
        assert_eq!(format_for_display(2.5), "2:30");
        assert_eq!(format_for_display(8.75), "8:45");
        assert_eq!(format_for_display(0.0), "0:00");
        assert_eq!(format_for_display(24.0), "24:00");
        assert_eq!(format_for_display(1.9999), "2:00");
        assert_eq!(format_for_display(-3.0), "0:00");
        assert_eq!(format_for_display(40.5), "40:30");
    }

    #[test]
    fn test_whole_clock_round_trip() {
        for h in 0..=24u64 {
            for m in 0..60u64 {
                if h == 24 && m > 0 {
                    continue;
                }
                let value = h as f64 + m as f64 / 60.0;
                let display = format_for_display(value);
                assert_eq!(display, format!("{}:{:02}", h, m));
                let back = to_decimal_hours(&display).unwrap();
                assert!((back - value).abs() < 1.0 / 60.0);
            }
        }
    }

    #[test]
    fn test_storage_round_trip_drifts_at_most_one_minute() {
        for h in 0..24u64 {
            for m in 0..60u64 {
                let canonical = format!("{}:{:02}", h, m);
                let stored = round_for_storage(to_decimal_hours(&canonical).unwrap());
                let shown = normalize(&format_for_display(stored)).unwrap();
                let drift = (shown.hours() * 60 + shown.minutes()) as i64 - (h * 60 + m) as i64;
                assert!(drift.abs() <= 1, "{} drifted to {}", canonical, shown);
            }
        }
    }

    #[test]
    fn test_validators() {
        assert!(is_valid_duration("2:30"));
        assert!(is_valid_duration("24"));
        assert!(is_valid_duration("0:01"));
        assert!(!is_valid_duration("0"));
        assert!(!is_valid_duration(""));
        assert!(!is_valid_duration("24:01"));
        assert!(!is_valid_duration("abc"));

        assert!(is_valid_or_clear(""));
        assert!(is_valid_or_clear("0"));
        assert!(is_valid_or_clear("0:00"));
        assert!(is_valid_or_clear("1.5"));
        assert!(!is_valid_or_clear("25"));
        assert!(!is_valid_or_clear("x"));
    }

    #[test]
    fn test_from_str() {
        let clock: ClockDuration = "1:90".parse().unwrap();
        assert_eq!(clock.hours(), 2);
        assert_eq!(clock.minutes(), 30);
        assert!("nope".parse::<ClockDuration>().is_err());
    }

    #[test]
    fn test_clock_duration_new() {
        assert_eq!(ClockDuration::new(1, 75).unwrap().to_string(), "2:15");
        assert!(ClockDuration::new(24, 1).is_none());
        assert!(ClockDuration::new(u64::MAX, 60).is_none());
    }
}
