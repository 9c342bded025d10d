//! The JSON-safe output tree.
//!
//! [`Plain`] is what a conversion produces: nested objects, arrays, strings,
//! finite numbers, booleans, and null: nothing a plain JSON encoder cannot
//! represent. Exotic inputs arrive here wrapped in tagged envelopes (see the
//! [`processors`](crate::processors) module) and repeated identities arrive
//! as `{"ref": "<path>"}` descriptors.
//!
//! `Plain` implements [`Serialize`], so any serde backend can emit it:
//!
//! ```rust
//! use ajson::{convert, value};
//!
//! let tree = convert(&value!({ "a": 1 })).unwrap();
//! assert_eq!(serde_json::to_string(&tree).unwrap(), r#"{"a":1}"#);
//! ```
//!
//! There is no `Deserialize` and no decoder: the reverse mapping is out of
//! scope for this crate.

use crate::PlainMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// A JSON-safe value: the output of a conversion.
///
/// # Examples
///
/// ```rust
/// use ajson::{plain, Plain};
///
/// let tree = plain!({ "ref": "#/b" });
/// assert!(tree.is_object());
/// assert_eq!(
///     tree.as_object().and_then(|o| o.get("ref")).and_then(|v| v.as_str()),
///     Some("#/b")
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Plain {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Array(Vec<Plain>),
    Object(PlainMap),
}

impl Plain {
    /// Returns `true` if the value is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Plain::Null)
    }

    /// Returns `true` if the value is a boolean.
    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Plain::Bool(_))
    }

    /// Returns `true` if the value is an integer or float.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Plain::Integer(_) | Plain::Float(_))
    }

    /// Returns `true` if the value is a string.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Plain::String(_))
    }

    /// Returns `true` if the value is an array.
    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Plain::Array(_))
    }

    /// Returns `true` if the value is an object.
    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Plain::Object(_))
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Plain::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Plain::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is an integer or whole-number float, returns it.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Plain::Integer(i) => Some(*i),
            Plain::Float(f) => {
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                    Some(*f as i64)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// If the value is a number, returns it as `f64`. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Plain::Integer(i) => Some(*i as f64),
            Plain::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// If the value is an array, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<Plain>> {
        match self {
            Plain::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// If the value is an object, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&PlainMap> {
        match self {
            Plain::Object(obj) => Some(obj),
            _ => None,
        }
    }
}

impl fmt::Display for Plain {
    /// Renders compact JSON text.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Plain::Null => f.write_str("null"),
            Plain::Bool(b) => write!(f, "{}", b),
            Plain::Integer(i) => write!(f, "{}", i),
            Plain::Float(fl) => write!(f, "{}", fl),
            Plain::String(s) => write_json_string(f, s),
            Plain::Array(arr) => {
                f.write_str("[")?;
                for (i, element) in arr.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", element)?;
                }
                f.write_str("]")
            }
            Plain::Object(obj) => {
                f.write_str("{")?;
                for (i, (key, value)) in obj.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write_json_string(f, key)?;
                    f.write_str(":")?;
                    write!(f, "{}", value)?;
                }
                f.write_str("}")
            }
        }
    }
}

fn write_json_string(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for ch in s.chars() {
        match ch {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if (c as u32) < 0x20 => write!(f, "\\u{:04x}", c as u32)?,
            c => write!(f, "{}", c)?,
        }
    }
    f.write_str("\"")
}

impl Serialize for Plain {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Plain::Null => serializer.serialize_unit(),
            Plain::Bool(b) => serializer.serialize_bool(*b),
            Plain::Integer(i) => serializer.serialize_i64(*i),
            Plain::Float(f) => serializer.serialize_f64(*f),
            Plain::String(s) => serializer.serialize_str(s),
            Plain::Array(arr) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for element in arr {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Plain::Object(obj) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(obj.len()))?;
                for (k, v) in obj.iter() {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl From<bool> for Plain {
    fn from(value: bool) -> Self {
        Plain::Bool(value)
    }
}

impl From<i8> for Plain {
    fn from(value: i8) -> Self {
        Plain::Integer(value as i64)
    }
}

impl From<i16> for Plain {
    fn from(value: i16) -> Self {
        Plain::Integer(value as i64)
    }
}

impl From<i32> for Plain {
    fn from(value: i32) -> Self {
        Plain::Integer(value as i64)
    }
}

impl From<i64> for Plain {
    fn from(value: i64) -> Self {
        Plain::Integer(value)
    }
}

impl From<u8> for Plain {
    fn from(value: u8) -> Self {
        Plain::Integer(value as i64)
    }
}

impl From<u16> for Plain {
    fn from(value: u16) -> Self {
        Plain::Integer(value as i64)
    }
}

impl From<u32> for Plain {
    fn from(value: u32) -> Self {
        Plain::Integer(value as i64)
    }
}

impl From<f32> for Plain {
    fn from(value: f32) -> Self {
        Plain::Float(value as f64)
    }
}

impl From<f64> for Plain {
    fn from(value: f64) -> Self {
        Plain::Float(value)
    }
}

impl From<String> for Plain {
    fn from(value: String) -> Self {
        Plain::String(value)
    }
}

impl From<&str> for Plain {
    fn from(value: &str) -> Self {
        Plain::String(value.to_string())
    }
}

impl From<Vec<Plain>> for Plain {
    fn from(value: Vec<Plain>) -> Self {
        Plain::Array(value)
    }
}

impl From<PlainMap> for Plain {
    fn from(value: PlainMap) -> Self {
        Plain::Object(value)
    }
}
