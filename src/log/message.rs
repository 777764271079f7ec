use super::Error;

pub const DATA_SHAPE_MISMATCH: &str = "data shape mismatch";
pub const INVALID_DATA: &str = "invalid data";
pub const INVALID_OPTIONS: &str = "invalid options";

/// Return an [`Error`] explaining that a member was read from a missing value.
///
/// `segment` is the member that could not be reached, and `path` is the full
/// path being resolved.
pub fn error_shape(path: &str, segment: &str) -> Error {
    Error::build(DATA_SHAPE_MISMATCH).with_help(format!(
        "cannot read `{segment}` while resolving `{path}`, the value before it is undefined"
    ))
}

/// Return an [`Error`] explaining that render data must be an object.
pub fn error_not_object(found: &str) -> Error {
    Error::build(INVALID_DATA).with_help(format!(
        "render data must be an object with named members, found {found}"
    ))
}
