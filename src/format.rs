//! Transforms applied to values as they are written into a rendered template.
use indexmap::IndexMap;
use regex::Regex;
use serde_json::{Number, Value};
use std::{borrow::Cow, sync::OnceLock};

/// Return the text form of a [`Value`].
///
/// Strings are written as-is, and arrays or objects as compact JSON.
pub fn to_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(string) => Cow::Borrowed(string.as_str()),
        Value::Number(number) => Cow::Owned(number_text(number)),
        Value::Bool(bool) => Cow::Borrowed(if *bool { "true" } else { "false" }),
        Value::Null => Cow::Borrowed("null"),
        Value::Array(_) | Value::Object(_) => Cow::Owned(value.to_string()),
    }
}

/// Write floats with no fractional part as integers, so `2.0` displays as `2`.
fn number_text(number: &Number) -> String {
    match number.as_f64() {
        Some(float) if number.is_f64() && float.fract() == 0.0 && float.abs() < 1e21 => {
            if float == 0.0 {
                "0".to_string()
            } else {
                format!("{float:.0}")
            }
        }
        _ => number.to_string(),
    }
}

/// Replace every occurrence of each key in `table` with its value.
///
/// Replacements are applied one after another in table order, so a later
/// key is matched against the output of earlier replacements.
pub fn encode(text: &str, table: &IndexMap<String, String>) -> String {
    let mut output = text.to_string();
    for (from, to) in table.iter().filter(|(from, _)| !from.is_empty()) {
        if output.contains(from.as_str()) {
            output = output.replace(from.as_str(), to);
        }
    }

    output
}

/// Insert a backslash before every occurrence of each string in `list`,
/// unless the occurrence is already preceded by a backslash.
pub fn escape(text: &str, list: &[String]) -> String {
    let mut output = text.to_string();
    for target in list.iter().filter(|target| !target.is_empty()) {
        let mut escaped = String::with_capacity(output.len());
        let mut last = 0;
        for (index, found) in output.match_indices(target.as_str()) {
            escaped.push_str(&output[last..index]);
            if !output[..index].ends_with('\\') {
                escaped.push('\\');
            }
            escaped.push_str(found);
            last = index + found.len();
        }
        escaped.push_str(&output[last..]);
        output = escaped;
    }

    output
}

/// Replace every run of whitespace with a single space.
pub fn collapse(text: &str) -> Cow<'_, str> {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();

    WHITESPACE
        .get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern must compile"))
        .replace_all(text, " ")
}
