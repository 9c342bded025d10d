//! Dynamic value graphs.
//!
//! This module provides the [`Value`] enum which represents any node of an
//! input graph: primitives, exotic scalars (dates, patterns, symbols, binary
//! blobs), containers, and tagged class instances. Containers and exotic
//! scalars sit behind [`Rc`], so the same allocation can appear at several
//! points of a graph; that shared identity, not structural equality, is
//! what the reference detector tracks to collapse sharing and cycles.
//!
//! ## Core Types
//!
//! - [`Value`]: any graph node
//! - [`Number`]: numeric values including `Infinity`, `-Infinity`, and `NaN`
//! - [`Pattern`]: a regular-expression literal (source plus flags)
//!
//! ## Building graphs
//!
//! ```rust
//! use ajson::{value, Value};
//!
//! // Acyclic values build from constructors, `From` impls, or the `value!`
//! // macro.
//! let user = Value::object([
//!     ("name", Value::from("Alice")),
//!     ("tags", Value::array([Value::from("admin")])),
//! ]);
//!
//! // Cycles are created by inserting a clone of a container into itself;
//! // clones share the underlying allocation.
//! let node = value!({});
//! node.insert("me", node.clone());
//! ```

use crate::tags::ClassValue;
use crate::ValueMap;
use chrono::{DateTime, Utc};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A dynamically-typed node of a value graph.
///
/// Container and exotic-scalar variants are identity-bearing: cloning them
/// copies an [`Rc`] handle, so both clones refer to the same allocation and
/// the reference detector treats them as one identity.
#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    Null,
    /// The explicit "undefined" marker, distinct from `Null`.
    Undefined,
    Bool(bool),
    Number(Number),
    String(String),
    /// A symbol's description text. Not identity-bearing.
    Symbol(String),
    Date(Rc<DateTime<Utc>>),
    Pattern(Rc<Pattern>),
    /// An opaque binary blob.
    Bytes(Rc<Vec<u8>>),
    Array(Rc<RefCell<Vec<Value>>>),
    Object(Rc<RefCell<ValueMap>>),
    /// A key-to-value map with arbitrary keys, in insertion order.
    Map(Rc<RefCell<Vec<(Value, Value)>>>),
    /// A set of values, in insertion order.
    Set(Rc<RefCell<Vec<Value>>>),
    /// A tagged class instance; see [`ClassValue`](crate::ClassValue).
    Instance(Rc<dyn ClassValue>),
}

/// A regular-expression literal: source text plus flags.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    pub source: String,
    pub flags: String,
}

/// A numeric value that can be an integer, float, or special value.
///
/// Negative zero travels as `Float(-0.0)`; the special-number leaf encoder
/// distinguishes it by sign bit rather than equality.
///
/// # Examples
///
/// ```rust
/// use ajson::Number;
///
/// let integer = Number::Integer(42);
/// let float = Number::Float(3.5);
/// let infinity = Number::Infinity;
///
/// assert!(integer.is_integer());
/// assert_eq!(integer.as_i64(), Some(42));
/// assert_eq!(float.as_f64(), 3.5);
/// assert!(infinity.is_special());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
    Infinity,
    NegativeInfinity,
    NaN,
}

impl Number {
    /// Returns `true` if this is an integer value.
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    /// Returns `true` if this is a floating-point value.
    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }

    /// Returns `true` if this is a special value (Infinity, -Infinity, or NaN).
    ///
    /// Non-finite `Float` payloads and negative zero also count: they map to
    /// the same envelopes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ajson::Number;
    ///
    /// assert!(Number::Infinity.is_special());
    /// assert!(Number::Float(f64::NAN).is_special());
    /// assert!(Number::Float(-0.0).is_special());
    /// assert!(!Number::Integer(42).is_special());
    /// ```
    #[inline]
    #[must_use]
    pub fn is_special(&self) -> bool {
        match self {
            Number::Infinity | Number::NegativeInfinity | Number::NaN => true,
            Number::Float(f) => !f.is_finite() || (*f == 0.0 && f.is_sign_negative()),
            Number::Integer(_) => false,
        }
    }

    /// Converts this number to an `i64` if possible.
    ///
    /// Returns `Some(i64)` for integers and floats with no fractional part
    /// that fit in i64 range. Returns `None` for special values and
    /// out-of-range floats.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Integer(i) => Some(*i),
            Number::Float(f) => {
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                    Some(*f as i64)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Converts this number to an `f64`.
    ///
    /// Always succeeds, converting integers and special values to their
    /// corresponding f64 representations.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Float(f) => *f,
            Number::Infinity => f64::INFINITY,
            Number::NegativeInfinity => f64::NEG_INFINITY,
            Number::NaN => f64::NAN,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(fl) => write!(f, "{}", fl),
            Number::Infinity => write!(f, "Infinity"),
            Number::NegativeInfinity => write!(f, "-Infinity"),
            Number::NaN => write!(f, "NaN"),
        }
    }
}

impl Value {
    /// Creates an object from an iterator of key-value pairs.
    #[must_use]
    pub fn object<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let map: ValueMap = fields
            .into_iter()
            .map(|(k, v)| (k.into(), v))
            .collect();
        Value::Object(Rc::new(RefCell::new(map)))
    }

    /// Creates an array from an iterator of values.
    #[must_use]
    pub fn array<I: IntoIterator<Item = Value>>(items: I) -> Self {
        Value::Array(Rc::new(RefCell::new(items.into_iter().collect())))
    }

    /// Creates a map from an iterator of key-value entries.
    ///
    /// Unlike objects, map keys are arbitrary values and entries keep their
    /// insertion order.
    #[must_use]
    pub fn map<I: IntoIterator<Item = (Value, Value)>>(entries: I) -> Self {
        Value::Map(Rc::new(RefCell::new(entries.into_iter().collect())))
    }

    /// Creates a set from an iterator of values, in insertion order.
    #[must_use]
    pub fn set<I: IntoIterator<Item = Value>>(members: I) -> Self {
        Value::Set(Rc::new(RefCell::new(members.into_iter().collect())))
    }

    /// Creates a date value.
    #[must_use]
    pub fn date(dt: DateTime<Utc>) -> Self {
        Value::Date(Rc::new(dt))
    }

    /// Creates a pattern value from regular-expression source and flags.
    #[must_use]
    pub fn pattern(source: impl Into<String>, flags: impl Into<String>) -> Self {
        Value::Pattern(Rc::new(Pattern {
            source: source.into(),
            flags: flags.into(),
        }))
    }

    /// Creates a symbol value from its description text.
    #[must_use]
    pub fn symbol(description: impl Into<String>) -> Self {
        Value::Symbol(description.into())
    }

    /// Creates a binary blob value.
    #[must_use]
    pub fn bytes(data: impl Into<Vec<u8>>) -> Self {
        Value::Bytes(Rc::new(data.into()))
    }

    /// Wraps a class instance.
    #[must_use]
    pub fn instance<T: ClassValue>(instance: T) -> Self {
        Value::Instance(Rc::new(instance))
    }

    /// Inserts a field into an object value.
    ///
    /// Inserting a clone of the object itself (or of one of its ancestors)
    /// is how cycles are built.
    ///
    /// # Panics
    ///
    /// Panics if this value is not an object; that is a logic error, like
    /// indexing a slice out of bounds.
    pub fn insert(&self, key: impl Into<String>, value: Value) {
        match self {
            Value::Object(map) => {
                map.borrow_mut().insert(key.into(), value);
            }
            other => panic!("Value::insert on non-object {}", other.kind()),
        }
    }

    /// Appends an element to an array value.
    ///
    /// # Panics
    ///
    /// Panics if this value is not an array.
    pub fn push(&self, value: Value) {
        match self {
            Value::Array(items) => items.borrow_mut().push(value),
            other => panic!("Value::push on non-array {}", other.kind()),
        }
    }

    /// Appends an entry to a map value.
    ///
    /// # Panics
    ///
    /// Panics if this value is not a map.
    pub fn set_entry(&self, key: Value, value: Value) {
        match self {
            Value::Map(entries) => entries.borrow_mut().push((key, value)),
            other => panic!("Value::set_entry on non-map {}", other.kind()),
        }
    }

    /// Appends a member to a set value.
    ///
    /// # Panics
    ///
    /// Panics if this value is not a set.
    pub fn add(&self, value: Value) {
        match self {
            Value::Set(members) => members.borrow_mut().push(value),
            other => panic!("Value::add on non-set {}", other.kind()),
        }
    }

    /// Returns `true` if the value is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if the value is the undefined marker.
    #[inline]
    #[must_use]
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// Returns `true` if the value is a number.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is an i64 integer or a whole-number float, returns it.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// The identity handle of this value, if it is identity-bearing.
    ///
    /// Identity is the `Rc` allocation address: clones of the same handle
    /// share it, structurally equal but separately built values do not. The
    /// handle does not keep the allocation alive; it is only meaningful
    /// while the graph being converted is.
    ///
    /// Primitives and symbols have no identity: repeating the string "x"
    /// twice in a graph is repetition of content, not sharing.
    #[must_use]
    pub fn identity(&self) -> Option<usize> {
        match self {
            Value::Date(rc) => Some(Rc::as_ptr(rc) as *const () as usize),
            Value::Pattern(rc) => Some(Rc::as_ptr(rc) as *const () as usize),
            Value::Bytes(rc) => Some(Rc::as_ptr(rc) as *const () as usize),
            Value::Array(rc) => Some(Rc::as_ptr(rc) as *const () as usize),
            Value::Object(rc) => Some(Rc::as_ptr(rc) as *const () as usize),
            Value::Map(rc) => Some(Rc::as_ptr(rc) as *const () as usize),
            Value::Set(rc) => Some(Rc::as_ptr(rc) as *const () as usize),
            Value::Instance(rc) => Some(Rc::as_ptr(rc) as *const () as usize),
            _ => None,
        }
    }

    /// A short name for this value's shape, used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Undefined => "undefined",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::Date(_) => "date",
            Value::Pattern(_) => "pattern",
            Value::Bytes(_) => "bytes",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Map(_) => "map",
            Value::Set(_) => "set",
            Value::Instance(_) => "instance",
        }
    }
}

impl PartialEq for Value {
    /// Structural equality, except class instances which compare by identity.
    ///
    /// Comparing cyclic graphs structurally does not terminate, the same as
    /// for any `Rc`-backed recursive type; compare encoded output instead.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Undefined, Value::Undefined) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::Pattern(a), Value::Pattern(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => a == b,
            (Value::Instance(a), Value::Instance(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i8> for Value {
    fn from(value: i8) -> Self {
        Value::Number(Number::Integer(value as i64))
    }
}

impl From<i16> for Value {
    fn from(value: i16) -> Self {
        Value::Number(Number::Integer(value as i64))
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(Number::Integer(value as i64))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(Number::Integer(value))
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Value::Number(Number::Integer(value as i64))
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Value::Number(Number::Integer(value as i64))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Number(Number::Integer(value as i64))
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Number(Number::Float(value as f64))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(Number::Float(value))
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Value::Number(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::array(value)
    }
}

impl From<ValueMap> for Value {
    fn from(value: ValueMap) -> Self {
        Value::Object(Rc::new(RefCell::new(value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_identity() {
        let obj = Value::object([("a", Value::from(1))]);
        let alias = obj.clone();
        assert_eq!(obj.identity(), alias.identity());
        assert!(obj.identity().is_some());
    }

    #[test]
    fn test_separate_allocations_differ() {
        let a = Value::from(ValueMap::new());
        let b = Value::from(ValueMap::new());
        assert_ne!(a.identity(), b.identity());
    }

    #[test]
    fn test_primitives_have_no_identity() {
        assert_eq!(Value::Null.identity(), None);
        assert_eq!(Value::from(42).identity(), None);
        assert_eq!(Value::from("x").identity(), None);
        assert_eq!(Value::symbol("a").identity(), None);
        assert_eq!(Value::Undefined.identity(), None);
    }

    #[test]
    fn test_exotic_scalars_have_identity() {
        assert!(Value::pattern("a+", "i").identity().is_some());
        assert!(Value::bytes(vec![1, 2, 3]).identity().is_some());
    }

    #[test]
    fn test_insert_builds_cycle() {
        let node = Value::from(ValueMap::new());
        node.insert("me", node.clone());
        if let Value::Object(map) = &node {
            let inner = map.borrow();
            assert_eq!(
                inner.get("me").and_then(|v| v.identity()),
                node.identity()
            );
        } else {
            panic!("expected object");
        }
    }

    #[test]
    fn test_special_numbers() {
        assert!(Number::Float(-0.0).is_special());
        assert!(!Number::Float(0.0).is_special());
        assert!(Number::Float(f64::INFINITY).is_special());
        assert!(Number::NaN.is_special());
        assert!(!Number::Integer(0).is_special());
    }

    #[test]
    fn test_from_primitives() {
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(42i64), Value::Number(Number::Integer(42)));
        assert_eq!(Value::from(3.5f64), Value::Number(Number::Float(3.5)));
        assert_eq!(Value::from("test"), Value::String("test".to_string()));
    }
}
