//! Parsing and formatting of user-entered numbers.
//!
//! Users type decimals with either a `.` or a `,` as the fractional separator. Displayed
//! numbers always use the comma.

/// The number of fractional digits used for money and volumes on screen.
pub const DEFAULT_DIGITS: usize = 2;

/// Parses user-entered text into a number, accepting `.` or `,` as the fractional separator.
///
/// Empty, non-numeric and non-finite input all yield `0.0`. Callers treat zero as "nothing was
/// entered"; there is no separate error channel.
///
/// ```
/// # use fuel_log::model::parse_locale_number;
/// assert_eq!(parse_locale_number("12,5"), 12.5);
/// assert_eq!(parse_locale_number("12.5"), 12.5);
/// assert_eq!(parse_locale_number("abc"), 0.0);
/// ```
pub fn parse_locale_number(input: &str) -> f64 {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    let normalized = trimmed.replacen(',', ".", 1);
    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Formats `value` with `digits` fractional places and a comma separator, rounding half away
/// from zero. Non-finite values render as zero.
///
/// ```
/// # use fuel_log::model::format_number;
/// assert_eq!(format_number(20.0, 2), "20,00");
/// assert_eq!(format_number(f64::NAN, 2), "0,00");
/// ```
pub fn format_number(value: f64, digits: usize) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let factor = 10f64.powi(digits as i32);
    let mut rounded = (value * factor).round() / factor;
    if !rounded.is_finite() {
        // value * factor overflowed
        rounded = value;
    }
    if rounded == 0.0 {
        rounded = 0.0;
    }
    format!("{rounded:.digits$}").replace('.', ",")
}

/// Shorthand for [`format_number`] with [`DEFAULT_DIGITS`].
pub fn format_default(value: f64) -> String {
    format_number(value, DEFAULT_DIGITS)
}
