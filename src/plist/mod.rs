//! Apple XML property lists.
//!
//! - [`reader`] — parses `<plist>` documents into a [`Value`] tree.
//! - [`writer`] — serializes a [`Value`] tree the way `PropertyListSerialization`
//!   does (tab indentation, sorted keys), so output is stable across runs.
//!
//! Binary plists (`bplist00`) are not supported and fail to decode.

use std::collections::BTreeMap;

use thiserror::Error;

pub mod reader;
pub mod writer;

pub use reader::from_bytes;
pub use writer::to_bytes;

/// A decoded property-list value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Dictionary(BTreeMap<String, Value>),
    Array(Vec<Value>),
    String(String),
    Integer(i64),
    Real(f64),
    Boolean(bool),
    /// ISO-8601 text, kept as written.
    Date(String),
    /// Base64 payload, kept encoded.
    Data(String),
}

impl Value {
    pub fn as_dictionary(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

/// Build a dictionary of string values from `(key, value)` pairs.
pub fn string_dict<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Value
where
    K: Into<String>,
    V: Into<String>,
{
    Value::Dictionary(
        pairs
            .into_iter()
            .map(|(k, v)| (k.into(), Value::String(v.into())))
            .collect(),
    )
}

/// Errors raised while reading or writing a property list.
#[derive(Error, Debug)]
pub enum PlistError {
    /// Input is binary or not UTF-8.
    #[error("unsupported plist format (only UTF-8 XML plists are read)")]
    UnsupportedFormat,

    /// Malformed XML, or an I/O failure in the XML writer.
    #[error("XML error: {0}")]
    Xml(String),

    /// Document ended before the structure was complete.
    #[error("unexpected end of plist document")]
    UnexpectedEof,

    /// An element that is not valid at this position.
    #[error("unexpected element <{0}>")]
    UnexpectedElement(String),

    /// A `<key>` with no value after it.
    #[error("dictionary key `{0}` has no value")]
    MissingValue(String),

    /// Scalar text that does not parse as its declared type.
    #[error("invalid <{tag}> value `{text}`")]
    InvalidScalar { tag: &'static str, text: String },
}

pub(crate) fn xml_err(err: impl std::fmt::Display) -> PlistError {
    PlistError::Xml(err.to_string())
}
