//! # jfl_template
//!
//! Named-placeholder string templating for the JFL extension library.
//!
//! A template such as `"{count:00000} Rows Deleted!"` is resolved against the
//! attributes of a record. Each `{name}` or `{name:spec}` token is replaced by
//! the attribute value, formatted through [`jfl_format`].
//!
//! - **Attribute providers**: [`Record`], JSON objects, maps, any `Serialize`
//!   value via [`Serialized`], or structs through [`impl_attributes!`]
//! - **Scanner**: per-attribute regex over the current text
//! - **Engine**: [`Interpolator`] with an [`EngineConfig`] loadable from YAML or TOML
//!
//! ## Example
//!
//! ```rust
//! use jfl_template::{record, WithVar};
//!
//! let query = "select * from {TableName} where id >= {Id};"
//!     .with_var(&record! { TableName: "Foo", Id: 10 })
//!     .unwrap();
//! assert_eq!(query, "select * from Foo where id >= 10;");
//! ```

pub mod attributes;
pub mod config;
pub mod engine;
pub mod error;
pub mod extension;
pub mod scanner;

pub use attributes::{Attribute, AttributeProvider, Record, Serialized};
pub use config::{EngineConfig, NameMatching, NullPolicy};
pub use engine::{interpolate, Interpolator};
pub use error::{TemplateError, TemplateResult};
pub use extension::WithVar;
pub use jfl_format::{format_one, FormatError, FormatResult, Value};
pub use scanner::{build_pattern, find_tokens, TokenMatch};
