//! Constructor tagging for class instances.
//!
//! A [`TagTable`] maps concrete instance types (constructor identity, keyed
//! by [`TypeId`]) to short tag names. The [`ClassTags`] processor rewrites a
//! matching instance to `{"@@<tag>": <payload>}`, where the payload is the
//! instance's custom plain form if it has one and a shallow field copy
//! otherwise.
//!
//! Payload fields are **not** re-entered into the chain: exotic values
//! nested inside a tagged instance's fields are emitted in a literal,
//! envelope-free projection, and repeated identities inside the payload are
//! not collapsed. Instances that want their nested exotics normalized must
//! cover them in their own plain form. This is a deliberate limitation of
//! the tagging contract, not an oversight.
//!
//! ## Examples
//!
//! ```rust
//! use ajson::processors::RefDetector;
//! use ajson::{ClassValue, ClassTags, Encoder, TagTable, Value, ValueMap};
//!
//! #[derive(Debug)]
//! struct Point { x: i64, y: i64 }
//!
//! impl ClassValue for Point {
//!     fn fields(&self) -> ValueMap {
//!         [
//!             ("x".to_string(), Value::from(self.x)),
//!             ("y".to_string(), Value::from(self.y)),
//!         ]
//!         .into_iter()
//!         .collect()
//!     }
//! }
//!
//! let table = TagTable::new().tag::<Point>("point");
//! let encoder = Encoder::new()
//!     .add_processor(RefDetector::new)
//!     .add_processor(move || ClassTags::new(table.clone()));
//!
//! let tree = encoder.convert(&Value::instance(Point { x: 1, y: 2 })).unwrap();
//! assert_eq!(tree.to_string(), r#"{"@@point":{"x":1,"y":2}}"#);
//! ```

use crate::engine::{Node, Processor, Reenter};
use crate::value::Number;
use crate::{Path, Plain, PlainMap, Result, Value, ValueMap};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::SecondsFormat;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;

/// A class instance that can live inside a value graph.
///
/// `fields` is the shallow field view used for tag-encoder payloads;
/// `to_plain` is the optional custom plain form (the serialize hook), used
/// by both the tag encoder and the
/// [`PlainFormUnwrapper`](crate::processors::PlainFormUnwrapper).
pub trait ClassValue: Any + fmt::Debug {
    /// A shallow copy of the instance's fields.
    fn fields(&self) -> ValueMap;

    /// The instance's custom plain form, if it defines one.
    fn to_plain(&self) -> Option<Value> {
        None
    }
}

/// Maps constructor identities to short tag names.
///
/// Consumed once to build a [`ClassTags`] processor; cheap to clone into
/// the per-conversion factory closure.
#[derive(Clone, Debug, Default)]
pub struct TagTable {
    tags: HashMap<TypeId, String>,
}

impl TagTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tag for the concrete instance type `T`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ajson::{TagTable, ClassValue, ValueMap};
    ///
    /// #[derive(Debug)]
    /// struct Marker;
    /// impl ClassValue for Marker {
    ///     fn fields(&self) -> ValueMap { ValueMap::new() }
    /// }
    ///
    /// let table = TagTable::new().tag::<Marker>("marker");
    /// assert_eq!(table.len(), 1);
    /// ```
    #[must_use]
    pub fn tag<T: ClassValue>(mut self, name: impl Into<String>) -> Self {
        self.tags.insert(TypeId::of::<T>(), name.into());
        self
    }

    /// Returns the number of registered tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Returns `true` if no tags are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    fn get(&self, id: TypeId) -> Option<&str> {
        self.tags.get(&id).map(String::as_str)
    }
}

/// Rewrites tagged class instances to `{"@@<tag>": <payload>}`.
///
/// Register before the
/// [`PlainFormUnwrapper`](crate::processors::PlainFormUnwrapper), otherwise
/// the unwrapper consumes every instance that defines a plain form before
/// tagging can happen. Instances whose type is not in the table pass
/// through unchanged.
pub struct ClassTags {
    table: TagTable,
}

impl ClassTags {
    #[must_use]
    pub fn new(table: TagTable) -> Self {
        ClassTags { table }
    }
}

impl Processor for ClassTags {
    fn process(&self, node: Node, _path: &Path, _chain: &dyn Reenter) -> Result<Node> {
        let Node::Value(Value::Instance(instance)) = &node else {
            return Ok(node);
        };
        let id = {
            let any: &dyn Any = instance.as_ref();
            any.type_id()
        };
        let Some(tag) = self.table.get(id) else {
            return Ok(node);
        };

        let payload = match instance.to_plain() {
            Some(custom) => lower(&custom),
            None => lower_fields(&instance.fields()),
        };
        let mut out = PlainMap::with_capacity(1);
        out.insert(format!("@@{}", tag), payload);
        Ok(Node::Plain(Plain::Object(out)))
    }
}

/// Literal, chain-free projection used for tag payloads.
///
/// Scalars map to their obvious JSON forms, containers recurse, and neither
/// envelopes nor identity tracking apply. Cyclic payloads are the caller's
/// responsibility, exactly as they were for the serialize hooks this
/// mirrors.
fn lower(value: &Value) -> Plain {
    match value {
        Value::Null | Value::Undefined => Plain::Null,
        Value::Bool(b) => Plain::Bool(*b),
        Value::Number(Number::Integer(i)) => Plain::Integer(*i),
        Value::Number(n) => {
            let f = n.as_f64();
            if f.is_finite() {
                Plain::Float(f)
            } else {
                Plain::Null
            }
        }
        Value::String(s) => Plain::String(s.clone()),
        Value::Symbol(description) => Plain::String(description.clone()),
        Value::Date(dt) => Plain::String(dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
        Value::Pattern(p) => Plain::String(p.source.clone()),
        Value::Bytes(data) => Plain::String(STANDARD.encode(&***data)),
        Value::Array(items) => Plain::Array(items.borrow().iter().map(lower).collect()),
        Value::Set(members) => Plain::Array(members.borrow().iter().map(lower).collect()),
        Value::Map(entries) => Plain::Array(
            entries
                .borrow()
                .iter()
                .map(|(k, v)| Plain::Array(vec![lower(k), lower(v)]))
                .collect(),
        ),
        Value::Object(map) => Plain::Object(
            map.borrow()
                .iter()
                .map(|(k, v)| (k.clone(), lower(v)))
                .collect(),
        ),
        Value::Instance(instance) => match instance.to_plain() {
            Some(custom) => lower(&custom),
            None => lower_fields(&instance.fields()),
        },
    }
}

fn lower_fields(fields: &ValueMap) -> Plain {
    Plain::Object(
        fields
            .iter()
            .map(|(k, v)| (k.clone(), lower(v)))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plain;

    struct NeverReenter;
    impl Reenter for NeverReenter {
        fn reenter(&self, _value: Value, _path: Path) -> Result<Plain> {
            panic!("tag payloads must not re-enter the chain");
        }
    }

    #[derive(Debug)]
    struct Point {
        x: i64,
        y: i64,
    }

    impl ClassValue for Point {
        fn fields(&self) -> ValueMap {
            [
                ("x".to_string(), Value::from(self.x)),
                ("y".to_string(), Value::from(self.y)),
            ]
            .into_iter()
            .collect()
        }
    }

    #[derive(Debug)]
    struct Stamped;

    impl ClassValue for Stamped {
        fn fields(&self) -> ValueMap {
            ValueMap::new()
        }

        fn to_plain(&self) -> Option<Value> {
            Some(Value::from("stamped"))
        }
    }

    fn run(table: TagTable, value: Value) -> Node {
        ClassTags::new(table)
            .process(Node::Value(value), &Path::root(), &NeverReenter)
            .unwrap()
    }

    #[test]
    fn test_tagged_instance_gets_field_payload() {
        let table = TagTable::new().tag::<Point>("point");
        let node = run(table, Value::instance(Point { x: 1, y: 2 }));
        match node {
            Node::Plain(plain) => {
                assert_eq!(plain, plain!({ "@@point": { "x": 1, "y": 2 } }))
            }
            Node::Value(_) => panic!("expected tagged envelope"),
        }
    }

    #[test]
    fn test_plain_form_preferred_over_fields() {
        let table = TagTable::new().tag::<Stamped>("stamp");
        let node = run(table, Value::instance(Stamped));
        match node {
            Node::Plain(plain) => assert_eq!(plain, plain!({ "@@stamp": "stamped" })),
            Node::Value(_) => panic!("expected tagged envelope"),
        }
    }

    #[test]
    fn test_unregistered_type_passes_through() {
        let table = TagTable::new().tag::<Stamped>("stamp");
        let node = run(table, Value::instance(Point { x: 0, y: 0 }));
        assert!(matches!(node, Node::Value(Value::Instance(_))));
    }

    #[test]
    fn test_payload_is_not_reentered() {
        use chrono::TimeZone;

        #[derive(Debug)]
        struct Event {
            at: Value,
        }
        impl ClassValue for Event {
            fn fields(&self) -> ValueMap {
                [("at".to_string(), self.at.clone())].into_iter().collect()
            }
        }

        let dt = chrono::Utc.timestamp_millis_opt(1_000_000_000_000).unwrap();
        let table = TagTable::new().tag::<Event>("event");
        let node = run(table, Value::instance(Event { at: Value::date(dt) }));

        // The nested date lowers to a bare ISO string, not a timestamp
        // envelope: payload fields bypass the chain.
        match node {
            Node::Plain(plain) => assert_eq!(
                plain,
                plain!({ "@@event": { "at": "2001-09-09T01:46:40.000Z" } })
            ),
            Node::Value(_) => panic!("expected tagged envelope"),
        }
    }
}
