//! Attribute providers: the named, readable attributes of a record.

use std::collections::{BTreeMap, HashMap};

use jfl_format::Value;
use serde::Serialize;

use crate::error::{TemplateError, TemplateResult};

/// A single named attribute. A `Null` value means the attribute is absent.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub value: Value,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Exposes a record's attributes as an ordered list of name/value pairs.
///
/// Implementations must be pure reads. The engine enumerates the list
/// exactly once per interpolation.
pub trait AttributeProvider {
    fn attributes(&self) -> Vec<Attribute>;
}

impl<T: AttributeProvider + ?Sized> AttributeProvider for &T {
    fn attributes(&self) -> Vec<Attribute> {
        (**self).attributes()
    }
}

/// An ordered, ad-hoc record. Usually built with [`record!`](crate::record).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    attributes: Vec<Attribute>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an attribute, builder style.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Add an attribute, replacing the value of an existing one with the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let attribute = Attribute::new(name, value);
        match self.attributes.iter_mut().find(|a| a.name == attribute.name) {
            Some(existing) => existing.value = attribute.value,
            None => self.attributes.push(attribute),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| &a.value)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (name, value) in iter {
            record.insert(name, value);
        }
        record
    }
}

impl AttributeProvider for Record {
    fn attributes(&self) -> Vec<Attribute> {
        self.attributes.clone()
    }
}

/// Attributes captured from any `Serialize` value that serializes to a map.
#[derive(Debug, Clone, PartialEq)]
pub struct Serialized {
    attributes: Vec<Attribute>,
}

impl Serialized {
    pub fn new<T: Serialize + ?Sized>(value: &T) -> TemplateResult<Self> {
        match serde_json::to_value(value)? {
            serde_json::Value::Object(map) => Ok(Self {
                attributes: map.attributes(),
            }),
            other => Err(TemplateError::NotARecord(json_kind(&other).to_string())),
        }
    }
}

impl AttributeProvider for Serialized {
    fn attributes(&self) -> Vec<Attribute> {
        self.attributes.clone()
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

impl AttributeProvider for serde_json::Map<String, serde_json::Value> {
    fn attributes(&self) -> Vec<Attribute> {
        self.iter()
            .map(|(name, value)| Attribute::new(name.clone(), Value::from_json(value)))
            .collect()
    }
}

/// Objects expose their members; every other JSON value has no attributes.
impl AttributeProvider for serde_json::Value {
    fn attributes(&self) -> Vec<Attribute> {
        match self {
            serde_json::Value::Object(map) => map.attributes(),
            _ => Vec::new(),
        }
    }
}

impl<K: AsRef<str>, V: Clone + Into<Value>> AttributeProvider for BTreeMap<K, V> {
    fn attributes(&self) -> Vec<Attribute> {
        self.iter()
            .map(|(name, value)| Attribute::new(name.as_ref(), value.clone()))
            .collect()
    }
}

impl<K: AsRef<str>, V: Clone + Into<Value>, S> AttributeProvider for HashMap<K, V, S> {
    fn attributes(&self) -> Vec<Attribute> {
        self.iter()
            .map(|(name, value)| Attribute::new(name.as_ref(), value.clone()))
            .collect()
    }
}

/// Build a [`Record`] from `name: value` pairs or bare variable names.
///
/// ```rust
/// use jfl_template::record;
///
/// let count = 10;
/// let rec = record! { count, table: "Foo" };
/// assert_eq!(rec.len(), 2);
/// ```
#[macro_export]
macro_rules! record {
    (@acc $rec:expr ;) => { $rec };
    (@acc $rec:expr ; $name:ident : $value:expr , $($rest:tt)*) => {
        $crate::record!(@acc $rec.with(stringify!($name), $value) ; $($rest)*)
    };
    (@acc $rec:expr ; $name:ident : $value:expr) => {
        $rec.with(stringify!($name), $value)
    };
    (@acc $rec:expr ; $name:ident , $($rest:tt)*) => {
        $crate::record!(@acc $rec.with(stringify!($name), $name) ; $($rest)*)
    };
    (@acc $rec:expr ; $name:ident) => {
        $rec.with(stringify!($name), $name)
    };
    ($($body:tt)*) => {
        $crate::record!(@acc $crate::Record::new() ; $($body)*)
    };
}

/// Implement [`AttributeProvider`] for a struct from a list of its fields.
///
/// Every listed field is cloned and converted with `Value::from`.
#[macro_export]
macro_rules! impl_attributes {
    ($ty:ty { $($field:ident),* $(,)? }) => {
        impl $crate::AttributeProvider for $ty {
            fn attributes(&self) -> ::std::vec::Vec<$crate::Attribute> {
                ::std::vec![
                    $($crate::Attribute::new(
                        stringify!($field),
                        ::std::clone::Clone::clone(&self.$field),
                    )),*
                ]
            }
        }
    };
}
