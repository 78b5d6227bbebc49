//! Caller context values (name, email, birth year, ...)

use passguess_data::fold_case;
use serde_json::Value;

/// A context value the password is checked against
#[derive(Debug, Clone, PartialEq)]
pub enum UserInput {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl UserInput {
    /// Accept strings, numbers and booleans; discard everything else
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(text) => Some(Self::Text(text.clone())),
            Value::Number(number) => number.as_f64().map(Self::Number),
            Value::Bool(flag) => Some(Self::Bool(*flag)),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Lowercase text form used as a `user_inputs` dictionary word.
    ///
    /// Text is folded char by char, exactly as password substrings are, so a
    /// password equal to one of its inputs always finds it.
    pub fn sanitized(&self) -> String {
        match self {
            Self::Text(text) => fold_case(text),
            Self::Number(number) => fold_case(&number_text(*number)),
            Self::Bool(flag) => flag.to_string(),
        }
    }
}

/// Shortest round-trip form of `number`, switching to exponent notation
/// (`1e+21`, `1.5e-7`) outside `[1e-6, 1e21)` the way web clients print
/// numbers.
fn number_text(number: f64) -> String {
    if number.is_nan() {
        return "NaN".to_owned();
    }
    if number.is_infinite() {
        return if number > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }
    if number == 0.0 {
        return "0".to_owned();
    }
    if (1e-6..1e21).contains(&number.abs()) {
        // 1985.0 reads as "1985"
        return number.to_string();
    }
    let formatted = format!("{number:e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => formatted,
    }
}

impl From<&str> for UserInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for UserInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<f64> for UserInput {
    fn from(number: f64) -> Self {
        Self::Number(number)
    }
}

impl From<i64> for UserInput {
    fn from(number: i64) -> Self {
        Self::Number(number as f64)
    }
}

impl From<i32> for UserInput {
    fn from(number: i32) -> Self {
        Self::Number(f64::from(number))
    }
}

impl From<bool> for UserInput {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}
