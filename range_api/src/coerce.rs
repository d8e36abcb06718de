// Per-field coercions for loosely typed request bodies.
//
// Clients send numbers, numeric strings, nulls or nothing at all for the same
// field; each helper returns `None` when a value should be ignored.

use serde_json::Value;

/// A JSON number, as `f64`. Strings and booleans are not numbers here.
pub fn number(value: Option<&Value>) -> Option<f64> {
    value.and_then(Value::as_f64).filter(|n| n.is_finite())
}

/// A JSON number truncated toward zero and raised to `floor`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn integer_at_least(value: Option<&Value>, floor: u64) -> Option<u64> {
    // `as` saturates: negatives become 0 and huge values u64::MAX.
    number(value).map(|n| (n.trunc() as u64).max(floor))
}

/// A number or a string holding one, as a browser's `Number()` would read it.
pub fn loose_number(value: Option<&Value>) -> Option<f64> {
    let n = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    n.filter(|n| n.is_finite())
}

/// JavaScript truthiness.
pub fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

/// A non-empty string.
pub fn text(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}
