//! Applies an optional format specifier to a single resolved value.

use tracing::trace;

use crate::composite::format_one;
use crate::error::FormatResult;
use crate::value::Value;

/// Format `value` through the composite item `{0}` or `{0:<spec>}`.
///
/// Returns `None` when the value is absent so callers can leave the
/// original placeholder untouched.
pub fn apply_format(value: &Value, spec: &str) -> FormatResult<Option<String>> {
    if value.is_null() {
        return Ok(None);
    }

    let item = if spec.is_empty() {
        "{0}".to_string()
    } else {
        format!("{{0:{spec}}}")
    };
    trace!(spec, kind = value.kind(), "applying format");
    format_one(&item, std::slice::from_ref(value)).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormatError;

    #[test]
    fn test_apply_format() {
        assert_eq!(apply_format(&Value::from(10), "").unwrap().as_deref(), Some("10"));
        assert_eq!(apply_format(&Value::from(10), "000").unwrap().as_deref(), Some("010"));
        assert_eq!(apply_format(&Value::from(2.5), "F1").unwrap().as_deref(), Some("2.5"));
    }

    #[test]
    fn test_null_value_yields_none() {
        assert_eq!(apply_format(&Value::Null, "000").unwrap(), None);
    }

    #[test]
    fn test_invalid_spec_is_error() {
        assert!(matches!(
            apply_format(&Value::from(10), "qqq"),
            Err(FormatError::InvalidSpecifier { .. })
        ));
    }
}
