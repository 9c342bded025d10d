//! Ordered maps for object fields and encoded output objects.
//!
//! This module provides [`OrderedMap`], a wrapper around [`IndexMap`] that
//! maintains insertion order. Both sides of a conversion use it: input
//! objects ([`ValueMap`]) and encoded output objects ([`PlainMap`]). Field
//! order is part of the contract: an acyclic conversion preserves object
//! insertion order in its output.
//!
//! ## Why IndexMap?
//!
//! `IndexMap` instead of `HashMap` ensures:
//!
//! - **Deterministic output**: fields encode in a consistent order
//! - **Iteration order**: fields are visited in insertion order, so the
//!   reference detector always records first-seen paths deterministically
//!
//! ## Examples
//!
//! ```rust
//! use ajson::{Value, ValueMap};
//!
//! let mut map = ValueMap::new();
//! map.insert("name".to_string(), Value::from("Alice"));
//! map.insert("age".to_string(), Value::from(30));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```

use indexmap::IndexMap;
use std::collections::HashMap;

/// An insertion-ordered map of string keys to values.
///
/// A thin wrapper around [`IndexMap`]; the order fields are inserted is the
/// order they are visited and encoded.
///
/// # Examples
///
/// ```rust
/// use ajson::{Plain, PlainMap};
///
/// let mut map = PlainMap::new();
/// map.insert("first".to_string(), Plain::from(1));
/// map.insert("second".to_string(), Plain::from(2));
///
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<V>(IndexMap<String, V>);

/// Fields of an input object or class instance.
pub type ValueMap = OrderedMap<crate::Value>;

/// Fields of an encoded JSON-safe object.
pub type PlainMap = OrderedMap<crate::Plain>;

impl<V> OrderedMap<V> {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        OrderedMap(IndexMap::new())
    }

    /// Creates an empty map with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        OrderedMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contained this key, the old value is returned and
    /// the key keeps its original position.
    pub fn insert(&mut self, key: String, value: V) -> Option<V> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.0.get(key)
    }

    /// Returns the number of elements in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, V> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, V> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, V> {
        self.0.iter()
    }
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> From<HashMap<String, V>> for OrderedMap<V> {
    fn from(map: HashMap<String, V>) -> Self {
        OrderedMap(map.into_iter().collect())
    }
}

impl<V> From<OrderedMap<V>> for HashMap<String, V> {
    fn from(map: OrderedMap<V>) -> Self {
        map.0.into_iter().collect()
    }
}

impl<V> IntoIterator for OrderedMap<V> {
    type Item = (String, V);
    type IntoIter = indexmap::map::IntoIter<String, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, V> IntoIterator for &'a OrderedMap<V> {
    type Item = (&'a String, &'a V);
    type IntoIter = indexmap::map::Iter<'a, String, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<V> FromIterator<(String, V)> for OrderedMap<V> {
    fn from_iter<T: IntoIterator<Item = (String, V)>>(iter: T) -> Self {
        OrderedMap(IndexMap::from_iter(iter))
    }
}
