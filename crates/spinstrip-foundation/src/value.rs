//! Opaque selectable values.

use std::fmt;

/// A value the spinner can select. The control never interprets values; it
/// only displays them and compares them for equality in `set_value`.
#[derive(Debug, Clone)]
pub enum SpinValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl SpinValue {
    fn as_f64(&self) -> Option<f64> {
        match self {
            SpinValue::Int(value) => Some(*value as f64),
            SpinValue::Float(value) => Some(*value),
            SpinValue::Text(_) => None,
        }
    }
}

/// Numeric values compare across the Int/Float split; text compares only
/// to text.
impl PartialEq for SpinValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (SpinValue::Text(a), SpinValue::Text(b)) => a == b,
            (SpinValue::Text(_), _) | (_, SpinValue::Text(_)) => false,
            _ => self.as_f64() == other.as_f64(),
        }
    }
}

impl fmt::Display for SpinValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpinValue::Int(value) => write!(f, "{value}"),
            SpinValue::Float(value) => write!(f, "{value}"),
            SpinValue::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for SpinValue {
    fn from(value: i64) -> Self {
        SpinValue::Int(value)
    }
}

impl From<i32> for SpinValue {
    fn from(value: i32) -> Self {
        SpinValue::Int(value as i64)
    }
}

impl From<f64> for SpinValue {
    fn from(value: f64) -> Self {
        SpinValue::Float(value)
    }
}

impl From<&str> for SpinValue {
    fn from(value: &str) -> Self {
        SpinValue::Text(value.to_owned())
    }
}

impl From<String> for SpinValue {
    fn from(value: String) -> Self {
        SpinValue::Text(value)
    }
}
