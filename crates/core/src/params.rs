//! Lenient readers for flat JSON override objects.
//!
//! Each helper takes a JSON value, a key and the current setting. A missing
//! key or a value of the wrong type leaves the current setting in place, so
//! applying overrides never fails.

use serde_json::Value;

/// Reads `params[name]` as `f64`, keeping `current` if missing or not a number.
///
/// JSON integers are accepted and widened.
pub fn param_f64(params: &Value, name: &str, current: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(current)
}

/// Reads `params[name]` as `usize`, keeping `current` unless the value is a
/// non-negative integer.
pub fn param_usize(params: &Value, name: &str, current: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(current)
}
