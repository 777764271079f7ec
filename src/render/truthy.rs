use serde_json::Value;

/// Return true if the given [`Value`] is truthy.
///
/// `false`, zero, the empty string and null are falsy. Every object and array
/// is truthy, even when empty.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(bo) => *bo,
        Value::Number(nu) => nu.as_f64().is_some_and(|n| n != 0.0),
        Value::String(st) => !st.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
        Value::Null => false,
    }
}
