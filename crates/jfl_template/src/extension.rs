//! String extension methods.

use jfl_format::{format_one, FormatResult, Value};

use crate::attributes::AttributeProvider;
use crate::engine::interpolate;
use crate::error::TemplateResult;

/// Template helpers callable directly on string slices.
pub trait WithVar {
    /// Interpolate `{name}` / `{name:spec}` placeholders from `record`.
    fn with_var<R: AttributeProvider + ?Sized>(&self, record: &R) -> TemplateResult<String>;

    /// Positional composite formatting, `{0}`, `{1:000}` and so on.
    fn with(&self, args: &[Value]) -> FormatResult<String>;
}

impl WithVar for str {
    fn with_var<R: AttributeProvider + ?Sized>(&self, record: &R) -> TemplateResult<String> {
        interpolate(self, record)
    }

    fn with(&self, args: &[Value]) -> FormatResult<String> {
        format_one(self, args)
    }
}
