//! Boundary parsing of user-entered numbers.
//!
//! Text from the presentation layer is turned into a finite `f64` exactly
//! once, here. Calculation code only ever sees already-parsed numbers.

use thiserror::Error;

/// Reasons a string is not a usable amount.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseAmountError {
    #[error("amount is empty")]
    Empty,

    #[error("amount {0:?} is not a number")]
    NotANumber(String),

    #[error("amount {0:?} is not finite")]
    NotFinite(String),
}

/// Parse an amount such as `"310,000,000"`, `"1 500.75"` or `"2_000"`.
///
/// `.` is the only decimal separator. Grouping separators (`,`, `_`,
/// spaces) are accepted only between thousands groups of the integer part:
/// `"1,5"` and `"1 2 3"` are rejected rather than read as `15` or `123`.
pub fn parse_amount(input: &str) -> Result<f64, ParseAmountError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ParseAmountError::Empty);
    }

    let cleaned = strip_grouping(trimmed)
        .ok_or_else(|| ParseAmountError::NotANumber(trimmed.to_string()))?;

    // Reject what f64::from_str would otherwise accept as a number.
    let lowered = cleaned.to_ascii_lowercase();
    if lowered.contains("inf") || lowered.contains("nan") {
        return Err(ParseAmountError::NotFinite(trimmed.to_string()));
    }

    let value: f64 = cleaned
        .parse()
        .map_err(|_| ParseAmountError::NotANumber(trimmed.to_string()))?;

    if !value.is_finite() {
        return Err(ParseAmountError::NotFinite(trimmed.to_string()));
    }

    Ok(value)
}

fn is_group_separator(c: char) -> bool {
    c == ',' || c == '_' || c.is_whitespace()
}

fn same_separator(a: char, b: char) -> bool {
    a == b || (a.is_whitespace() && b.is_whitespace())
}

/// Remove thousands separators, or `None` if they are misplaced.
///
/// One kind of separator per amount. The first group holds one to three
/// digits and every later group exactly three.
fn strip_grouping(text: &str) -> Option<String> {
    let (integer, fraction) = match text.find('.') {
        Some(dot) => text.split_at(dot),
        None => (text, ""),
    };

    if fraction.chars().any(is_group_separator) {
        return None;
    }

    let mut separators = integer.chars().filter(|c| is_group_separator(*c));
    let first = match separators.next() {
        Some(first) => first,
        None => return Some(text.to_string()),
    };
    if separators.any(|c| !same_separator(c, first)) {
        return None;
    }

    let (sign, digits) = match integer.strip_prefix(|c: char| c == '-' || c == '+') {
        Some(rest) => (&integer[..1], rest),
        None => ("", integer),
    };

    let mut cleaned = String::with_capacity(text.len());
    cleaned.push_str(sign);

    for (i, group) in digits.split(is_group_separator).enumerate() {
        let width_ok = if i == 0 {
            (1..=3).contains(&group.len())
        } else {
            group.len() == 3
        };
        if !width_ok || !group.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        cleaned.push_str(group);
    }

    cleaned.push_str(fraction);
    Some(cleaned)
}

/// Parse an optional amount; blank input means "not supplied".
pub fn parse_optional_amount(input: Option<&str>) -> Result<Option<f64>, ParseAmountError> {
    match input {
        Some(s) if !s.trim().is_empty() => parse_amount(s).map(Some),
        _ => Ok(None),
    }
}
