//! # ajson
//!
//! Encodes arbitrary, possibly cyclic, in-memory value graphs into JSON-safe
//! trees.
//!
//! ## Why?
//!
//! A plain JSON encoder cannot faithfully represent maps, sets, dates,
//! regular-expression patterns, symbols, binary blobs, `NaN`/`±Infinity`/`-0`,
//! an explicit `undefined`, tagged class instances, or structures that refer
//! to themselves. This crate converts all of those into nested
//! objects/arrays/strings/numbers/booleans/null only:
//!
//! - Exotic values become **tagged envelopes** (`{"timestamp": ...}`,
//!   `{"specialNumber": "NaN"}`, `{"map": [...]}` and so on) that keep the
//!   type information a naive conversion would lose.
//! - Structural sharing and cycles become **path-based back-references**:
//!   the first visitation of an identity expands normally, every later one
//!   collapses to `{"ref": "#/path/to/first"}`. This is also what makes
//!   conversion of cyclic input terminate.
//!
//! ## Key Features
//!
//! - **Pluggable processor chain**: every node threads through an ordered
//!   list of independent processors; the chain is caller-configurable and
//!   extensible with your own [`Processor`] implementations
//! - **Per-conversion isolation**: processors are built from factories once
//!   per conversion, so identity state never leaks between calls
//! - **Order-preserving**: array index order and object/map insertion order
//!   survive conversion
//! - **Serde-ready output**: the resulting [`Plain`] tree implements
//!   `Serialize`, so any JSON backend can emit it
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! ajson = "0.1"
//! ```
//!
//! ### Converting a cyclic graph
//!
//! ```rust
//! use ajson::{convert, value};
//!
//! // self.a = self
//! let root = value!({});
//! root.insert("a", root.clone());
//!
//! let tree = convert(&root).unwrap();
//! assert_eq!(tree.to_string(), r##"{"a":{"ref":"#"}}"##);
//! ```
//!
//! ### Shared sub-objects collapse to back-references
//!
//! ```rust
//! use ajson::{convert, value, Value};
//!
//! let shared = value!({});
//! let root = Value::object([
//!     ("a", Value::from(1)),
//!     ("b", shared.clone()),
//!     ("c", shared),
//! ]);
//!
//! let tree = convert(&root).unwrap();
//! assert_eq!(tree.to_string(), r##"{"a":1,"b":{},"c":{"ref":"#/b"}}"##);
//! ```
//!
//! ### Exotic scalars become envelopes
//!
//! ```rust
//! use ajson::{convert, plain, Value};
//!
//! assert_eq!(convert(&Value::from(f64::NAN)).unwrap(), plain!({ "specialNumber": "NaN" }));
//! assert_eq!(convert(&Value::Undefined).unwrap(), plain!({ "isUndefined": true }));
//! assert_eq!(
//!     convert(&Value::pattern("a+", "i")).unwrap(),
//!     plain!({ "pattern": "a+", "flags": "i" })
//! );
//! ```
//!
//! ### Custom chains
//!
//! The stock chain is [`Encoder::standard`]; custom chains register
//! processor factories explicitly, and registration order is application
//! order for every node at every depth. The reference detector must precede
//! the container walkers or cyclic input will not terminate.
//!
//! ```rust
//! use ajson::processors::{ArrayWalker, ObjectWalker, RefDetector};
//! use ajson::{value, Encoder};
//!
//! let encoder = Encoder::new()
//!     .add_processor(RefDetector::new)
//!     .add_processor(ObjectWalker::new)
//!     .add_processor(ArrayWalker::new);
//!
//! let tree = encoder.convert(&value!({ "xs": [1, 2, 3] })).unwrap();
//! assert_eq!(tree.to_string(), r#"{"xs":[1,2,3]}"#);
//! ```
//!
//! ## Reference path format
//!
//! Back-reference paths join segments with `/`: the root renders as `#`,
//! object and map keys render literally, and sequence indices render as
//! `[n]`, for example `#/friends/[3]`.
//!
//! ## Scope
//!
//! This crate encodes; it does not decode. There is no deserializer, no
//! streaming mode, and no JSON-pointer escaping beyond the segment-join
//! rule above. Conversion is synchronous and depth-first; recursion depth
//! equals the longest non-cyclic path in the input.

pub mod engine;
pub mod error;
pub mod macros;
pub mod map;
pub mod path;
pub mod plain;
pub mod processors;
pub mod tags;
pub mod value;

pub use engine::{Encoder, Node, Processor, ProcessorFactory, Reenter};
pub use error::{Error, Result};
pub use map::{OrderedMap, PlainMap, ValueMap};
pub use path::{Path, Segment};
pub use plain::Plain;
pub use tags::{ClassTags, ClassValue, TagTable};
pub use value::{Number, Pattern, Value};

/// Converts a value graph into a JSON-safe tree using the stock chain.
///
/// Equivalent to `Encoder::standard().convert(value)`; build an
/// [`Encoder`] once and reuse it when converting many graphs.
///
/// # Examples
///
/// ```rust
/// use ajson::{convert, value};
///
/// let tree = convert(&value!({ "n": 42 })).unwrap();
/// assert_eq!(serde_json::to_string(&tree).unwrap(), r#"{"n":42}"#);
/// ```
///
/// # Errors
///
/// The stock chain handles every [`Value`] shape, so this only fails for
/// graphs containing an untagged class instance with no plain form.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn convert(value: &Value) -> Result<Plain> {
    Encoder::standard().convert(value)
}
