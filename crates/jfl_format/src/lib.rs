//! # jfl_format
//!
//! Composite positional formatting for the JFL extension library.
//!
//! This crate provides:
//! - **Dynamic values**: [`Value`] wraps the primitives a template can carry
//! - **Composite formatting**: [`format_one`] renders `{index[,alignment][:format]}` items
//! - **Format application**: [`apply_format`] formats one value with an optional specifier
//!
//! Formatting follows invariant-culture rules for numbers (`C D E F G N P R X`
//! and custom `0 # . , %` patterns) and date-times (`d D f F g G M o r s t T u Y`
//! and custom `yyyy MM dd HH mm ss fff tt` patterns).
//!
//! ## Example
//!
//! ```rust
//! use jfl_format::{format_one, format_with, Value};
//!
//! let text = format_one("{0:000} rows, {1}", &[Value::from(10), Value::from("done")]).unwrap();
//! assert_eq!(text, "010 rows, done");
//!
//! let text = format_with!("{0:N2}", 1234.5).unwrap();
//! assert_eq!(text, "1,234.50");
//! ```

pub mod applier;
pub mod composite;
mod datetime;
pub mod error;
mod numeric;
pub mod value;

pub use applier::apply_format;
pub use composite::{format_one, format_value};
pub use error::{FormatError, FormatResult};
pub use value::Value;

/// Call [`format_one`] with arguments converted through `Value::from`.
#[macro_export]
macro_rules! format_with {
    ($format:expr $(, $arg:expr)* $(,)?) => {
        $crate::format_one($format, &[$($crate::Value::from($arg)),*])
    };
}
