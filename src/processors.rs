//! The stock processors.
//!
//! One type per transform, all behind the [`Processor`] contract:
//!
//! - [`RefDetector`]: collapses repeated identities into `{"ref": <path>}`
//!   back-references; the only stateful processor, and the one that makes
//!   cyclic input terminate.
//! - [`ObjectWalker`], [`ArrayWalker`], [`MapWalker`], [`SetWalker`]: match
//!   one container shape each and re-enter the chain for every child.
//! - [`SpecialNumbers`], [`UndefinedValue`], [`PatternValue`], [`DateValue`],
//!   [`SymbolValue`], [`BytesValue`]: value-local envelope encoders, order
//!   independent among themselves.
//! - [`PlainFormUnwrapper`]: swaps an instance for its custom plain form and
//!   re-enters the whole chain at the same path.
//!
//! Every processor passes unmatched values through unchanged. The stock
//! registration order lives in [`Encoder::standard`](crate::Encoder::standard).

use crate::engine::{Node, Processor, Reenter};
use crate::{Path, Plain, PlainMap, Result, Value};
use crate::value::Number;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::SecondsFormat;
use std::cell::RefCell;
use std::collections::HashMap;

/// Builds a single-field envelope object.
fn envelope(key: &str, value: Plain) -> Node {
    let mut fields = PlainMap::with_capacity(1);
    fields.insert(key.to_string(), value);
    Node::Plain(Plain::Object(fields))
}

/// Detects repeated identities and replaces them with back-references.
///
/// For any identity-bearing value (containers and exotic-scalar objects
/// alike), the first visitation records `(identity → path)` and passes the
/// value through; every later visitation of the same identity, anywhere in
/// the graph, yields `{"ref": "<first path>"}` instead of a second
/// expansion. The detector is type-agnostic: two occurrences of the same
/// date allocation collapse exactly like a cyclic object does.
///
/// Must be registered before any container walker. Walkers return newly
/// built output, so a detector running after them would never see the same
/// identity twice and cyclic input would never terminate.
///
/// The table keys are allocation addresses, and each entry holds a clone of
/// the tracked value so the allocation outlives the subtree that introduced
/// it. Temporary values fed into the chain (an instance's unwrapped plain
/// form, say) would otherwise be freed mid-conversion and a later
/// allocation at the reused address would masquerade as a repeated
/// identity. The table is dropped with the conversion.
#[derive(Default)]
pub struct RefDetector {
    seen: RefCell<HashMap<usize, (Path, Value)>>,
}

impl RefDetector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Processor for RefDetector {
    fn process(&self, node: Node, path: &Path, _chain: &dyn Reenter) -> Result<Node> {
        if let Node::Value(value) = &node {
            if let Some(identity) = value.identity() {
                let mut seen = self.seen.borrow_mut();
                if let Some((first, _)) = seen.get(&identity) {
                    return Ok(envelope("ref", Plain::String(first.to_string())));
                }
                seen.insert(identity, (path.clone(), value.clone()));
            }
        }
        Ok(node)
    }
}

/// Walks plain objects, re-entering the chain for every field value.
///
/// Matches only the object variant; class instances are a different shape
/// and are left for the unwrapper and tag encoder.
#[derive(Default)]
pub struct ObjectWalker;

impl ObjectWalker {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Processor for ObjectWalker {
    fn process(&self, node: Node, path: &Path, chain: &dyn Reenter) -> Result<Node> {
        let Node::Value(Value::Object(map)) = &node else {
            return Ok(node);
        };
        let fields: Vec<(String, Value)> = map
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        let mut out = PlainMap::with_capacity(fields.len());
        for (key, child) in fields {
            let encoded = chain.reenter(child, path.key(key.clone()))?;
            out.insert(key, encoded);
        }
        Ok(Node::Plain(Plain::Object(out)))
    }
}

/// Walks arrays, re-entering the chain for every element.
#[derive(Default)]
pub struct ArrayWalker;

impl ArrayWalker {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Processor for ArrayWalker {
    fn process(&self, node: Node, path: &Path, chain: &dyn Reenter) -> Result<Node> {
        let Node::Value(Value::Array(items)) = &node else {
            return Ok(node);
        };
        let children: Vec<Value> = items.borrow().clone();

        let mut out = Vec::with_capacity(children.len());
        for (i, child) in children.into_iter().enumerate() {
            out.push(chain.reenter(child, path.index(i))?);
        }
        Ok(Node::Plain(Plain::Array(out)))
    }
}

/// Walks maps into a `{"map": [[key, value], ...]}` envelope.
///
/// Entries keep insertion order; entry *i*'s key re-enters at `path/[i]/[0]`
/// and its value at `path/[i]/[1]`, the pair-array paths of the entries
/// sequence the envelope wraps.
#[derive(Default)]
pub struct MapWalker;

impl MapWalker {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Processor for MapWalker {
    fn process(&self, node: Node, path: &Path, chain: &dyn Reenter) -> Result<Node> {
        let Node::Value(Value::Map(entries)) = &node else {
            return Ok(node);
        };
        let pairs: Vec<(Value, Value)> = entries.borrow().clone();

        let mut out = Vec::with_capacity(pairs.len());
        for (i, (key, value)) in pairs.into_iter().enumerate() {
            let entry_path = path.index(i);
            let encoded_key = chain.reenter(key, entry_path.index(0))?;
            let encoded_value = chain.reenter(value, entry_path.index(1))?;
            out.push(Plain::Array(vec![encoded_key, encoded_value]));
        }
        Ok(envelope("map", Plain::Array(out)))
    }
}

/// Walks sets into a `{"set": [member, ...]}` envelope, in insertion order.
#[derive(Default)]
pub struct SetWalker;

impl SetWalker {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Processor for SetWalker {
    fn process(&self, node: Node, path: &Path, chain: &dyn Reenter) -> Result<Node> {
        let Node::Value(Value::Set(members)) = &node else {
            return Ok(node);
        };
        let children: Vec<Value> = members.borrow().clone();

        let mut out = Vec::with_capacity(children.len());
        for (i, member) in children.into_iter().enumerate() {
            out.push(chain.reenter(member, path.index(i))?);
        }
        Ok(envelope("set", Plain::Array(out)))
    }
}

/// Encodes `-0`, `NaN`, and `±Infinity` into `{"specialNumber": ...}`.
///
/// Matches both the explicit special [`Number`] variants and `Float`
/// payloads that happen to be non-finite or negative zero; ordinary numbers
/// pass through for the engine to lower directly.
#[derive(Default)]
pub struct SpecialNumbers;

impl SpecialNumbers {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Processor for SpecialNumbers {
    fn process(&self, node: Node, _path: &Path, _chain: &dyn Reenter) -> Result<Node> {
        let Node::Value(Value::Number(n)) = &node else {
            return Ok(node);
        };
        let rendering = match n {
            Number::NaN => "NaN",
            Number::Infinity => "Infinity",
            Number::NegativeInfinity => "-Infinity",
            Number::Float(f) if f.is_nan() => "NaN",
            Number::Float(f) if *f == f64::INFINITY => "Infinity",
            Number::Float(f) if *f == f64::NEG_INFINITY => "-Infinity",
            Number::Float(f) if *f == 0.0 && f.is_sign_negative() => "-0",
            _ => return Ok(node),
        };
        Ok(envelope(
            "specialNumber",
            Plain::String(rendering.to_string()),
        ))
    }
}

/// Encodes the undefined marker into `{"isUndefined": true}`.
#[derive(Default)]
pub struct UndefinedValue;

impl UndefinedValue {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Processor for UndefinedValue {
    fn process(&self, node: Node, _path: &Path, _chain: &dyn Reenter) -> Result<Node> {
        match node {
            Node::Value(Value::Undefined) => Ok(envelope("isUndefined", Plain::Bool(true))),
            other => Ok(other),
        }
    }
}

/// Encodes patterns into `{"pattern": <source>, "flags": <flags>}`.
#[derive(Default)]
pub struct PatternValue;

impl PatternValue {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Processor for PatternValue {
    fn process(&self, node: Node, _path: &Path, _chain: &dyn Reenter) -> Result<Node> {
        let Node::Value(Value::Pattern(pattern)) = &node else {
            return Ok(node);
        };
        let mut fields = PlainMap::with_capacity(2);
        fields.insert("pattern".to_string(), Plain::String(pattern.source.clone()));
        fields.insert("flags".to_string(), Plain::String(pattern.flags.clone()));
        Ok(Node::Plain(Plain::Object(fields)))
    }
}

/// Encodes dates into `{"timestamp": <ISO-8601>}`.
///
/// Millisecond precision with a `Z` suffix: `2001-09-09T01:46:40.000Z`.
#[derive(Default)]
pub struct DateValue;

impl DateValue {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Processor for DateValue {
    fn process(&self, node: Node, _path: &Path, _chain: &dyn Reenter) -> Result<Node> {
        let Node::Value(Value::Date(dt)) = &node else {
            return Ok(node);
        };
        let rendered = dt.to_rfc3339_opts(SecondsFormat::Millis, true);
        Ok(envelope("timestamp", Plain::String(rendered)))
    }
}

/// Encodes symbols into `{"symbol": <description>}`.
#[derive(Default)]
pub struct SymbolValue;

impl SymbolValue {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Processor for SymbolValue {
    fn process(&self, node: Node, _path: &Path, _chain: &dyn Reenter) -> Result<Node> {
        match node {
            Node::Value(Value::Symbol(description)) => {
                Ok(envelope("symbol", Plain::String(description)))
            }
            other => Ok(other),
        }
    }
}

/// Encodes binary blobs into `{"binary": <base64>}`.
///
/// Standard alphabet with padding.
#[derive(Default)]
pub struct BytesValue;

impl BytesValue {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Processor for BytesValue {
    fn process(&self, node: Node, _path: &Path, _chain: &dyn Reenter) -> Result<Node> {
        let Node::Value(Value::Bytes(data)) = &node else {
            return Ok(node);
        };
        Ok(envelope("binary", Plain::String(STANDARD.encode(&**data))))
    }
}

/// Swaps a class instance for its custom plain form.
///
/// The plain form re-enters the *entire* chain at the *same* path, so any
/// exotic values nested inside it are themselves normalized. Instances
/// without a plain form pass through for the tag encoder or finalization.
#[derive(Default)]
pub struct PlainFormUnwrapper;

impl PlainFormUnwrapper {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Processor for PlainFormUnwrapper {
    fn process(&self, node: Node, path: &Path, chain: &dyn Reenter) -> Result<Node> {
        let Node::Value(Value::Instance(instance)) = &node else {
            return Ok(node);
        };
        match instance.to_plain() {
            Some(plain_form) => Ok(Node::Plain(chain.reenter(plain_form, path.clone())?)),
            None => Ok(node),
        }
    }
}
