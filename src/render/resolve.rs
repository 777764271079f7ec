use super::truthy::is_truthy;
use crate::{
    log::{error_shape, Error},
    Store,
};
use serde_json::Value;

/// Return the [`Value`] at the given dotted path.
///
/// A member missing from the final segment resolves to `None`, but reading
/// any member of a missing or null value is an error.
///
/// # Errors
///
/// Returns an [`Error`] when a segment after the first is read from a value
/// that is missing or null.
pub fn resolve<'store>(store: &'store Store, path: &str) -> Result<Option<&'store Value>, Error> {
    let mut segments = path.split('.');
    let mut value = segments.next().and_then(|first| store.get(first));

    for segment in segments {
        value = match value {
            None | Some(Value::Null) => return Err(error_shape(path, segment)),
            Some(parent) => member(parent, segment),
        };
    }

    Ok(value)
}

/// Return the [`Value`] at the given dotted path, stopping at the first
/// falsy value instead of failing.
///
/// Returns `None` when the walk stops early or the final member is missing.
pub fn resolve_lenient<'store>(store: &'store Store, path: &str) -> Option<&'store Value> {
    let mut segments = path.split('.');
    let mut value = store.get(segments.next()?)?;

    for segment in segments {
        if !is_truthy(value) {
            return None;
        }
        value = member(value, segment)?;
    }

    Some(value)
}

/// Return the member of `parent` named by `segment`.
///
/// Arrays are indexed by segments that parse as an index. Other values
/// have no members.
fn member<'store>(parent: &'store Value, segment: &str) -> Option<&'store Value> {
    match parent {
        Value::Object(object) => object.get(segment),
        Value::Array(array) => segment.parse::<usize>().ok().and_then(|i| array.get(i)),
        _ => None,
    }
}
