//! Scalar cell values and numeric coercion.

use std::{borrow::Cow, fmt};

use serde::Serialize;

/// Largest magnitude (exclusive) that is coerced to a number. Integers past
/// this point lose precision as `f64`, so they stay text.
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

/// A single cell of a dataset row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Text that did not look numeric.
    Text(String),
    /// A numeric-looking field.
    Number(f64),
    /// An empty or absent field.
    Null,
}

impl Value {
    /// Returns true for [`Value::Null`].
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the number if this value was coerced to one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the value as display text. `Null` is the empty string.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(s) => Cow::Borrowed(s.as_str()),
            Self::Number(_) => Cow::Owned(self.to_string()),
            Self::Null => Cow::Borrowed(""),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            // -0.0 prints as "-0" otherwise
            Self::Number(n) if *n == 0.0 => f.write_str("0"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Null => Ok(()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

/// Coerces a raw field to a [`Value`]. Never fails.
///
/// - `""` becomes [`Value::Null`]
/// - numeric-looking text within ±2^53 becomes [`Value::Number`]
/// - anything else is kept verbatim as [`Value::Text`]
///
/// Numeric-looking means optional surrounding whitespace, an optional
/// leading `-`, then `123`, `123.`, `.5` or `1.5`, then an optional
/// exponent such as `e-3`.
pub fn try_parse_number(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::Null;
    }
    if !looks_numeric(raw.trim()) {
        return Value::Text(raw.to_string());
    }
    match raw.trim().parse::<f64>() {
        Ok(n) if n.is_finite() && n > -MAX_EXACT_INT && n < MAX_EXACT_INT => Value::Number(n),
        _ => Value::Text(raw.to_string()),
    }
}

fn looks_numeric(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;

    if bytes.first() == Some(&b'-') {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = i - int_start;

    let mut frac_digits = 0;
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        frac_digits = i - frac_start;
    }

    if int_digits == 0 && frac_digits == 0 {
        return false;
    }

    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }

    i == bytes.len()
}
