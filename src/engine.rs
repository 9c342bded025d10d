//! The traversal and composition engine.
//!
//! An [`Encoder`] holds an ordered list of processor *factories*. Each call
//! to [`Encoder::convert`] materializes every factory into a fresh processor
//! instance, so state held by an instance (the reference detector's identity
//! table) lives for exactly one conversion and never leaks into the next.
//!
//! For every node, root or nested, the node's value is threaded through
//! the full chain in registration order: the output of processor *i* is the
//! input of processor *i+1*. Processors that recurse into children do so
//! through the [`Reenter`] callback, which restarts the full chain at the
//! child's path. Restarting from the first instance is what lets the
//! reference detector see every node before any walker does, which in turn
//! is what guarantees termination on cyclic input.
//!
//! ## Usage
//!
//! Most callers want the stock chain:
//!
//! ```rust
//! use ajson::{value, Encoder};
//!
//! let encoder = Encoder::standard();
//! let tree = encoder.convert(&value!({ "a": [1, 2] })).unwrap();
//! assert_eq!(tree.to_string(), r#"{"a":[1,2]}"#);
//! ```
//!
//! Custom chains register factories explicitly; registration order is
//! application order for every node at every depth:
//!
//! ```rust
//! use ajson::processors::{ArrayWalker, ObjectWalker, RefDetector, SpecialNumbers};
//! use ajson::{value, Encoder};
//!
//! let encoder = Encoder::new()
//!     .add_processor(RefDetector::new)
//!     .add_processor(ObjectWalker::new)
//!     .add_processor(ArrayWalker::new)
//!     .add_processor(SpecialNumbers::new);
//!
//! let root = value!({});
//! root.insert("me", root.clone());
//! let tree = encoder.convert(&root).unwrap();
//! assert_eq!(tree.to_string(), r##"{"me":{"ref":"#"}}"##);
//! ```

use crate::{Error, Number, Path, Plain, Result, Value};

/// What flows through the chain for one node.
///
/// A node starts as [`Node::Value`]; once some processor has produced its
/// JSON-safe representation it becomes [`Node::Plain`], and every later
/// processor in the chain must pass it through untouched.
#[derive(Clone, Debug)]
pub enum Node {
    /// Not yet encoded.
    Value(Value),
    /// Already encoded; later processors pass this through unchanged.
    Plain(Plain),
}

/// One pluggable transform in the chain.
///
/// The contract, which the engine relies on:
///
/// - A processor that does not match its target shape must return its input
///   unchanged so later processors see an unaffected value, and must never
///   fail on a value it does not recognize.
/// - A processor that recurses must call [`Reenter::reenter`] for every
///   child it rebuilds, at the child's extended path, and must not re-invoke
///   the chain on the value it returns.
/// - The only permitted state is private to one instance, scoped to one
///   conversion by the factory-per-call rule, and accessed through interior
///   mutability (the receiver is `&self` because the chain re-enters itself
///   recursively).
pub trait Processor {
    fn process(&self, node: Node, path: &Path, chain: &dyn Reenter) -> Result<Node>;
}

/// The re-entry callback: converts a child value at an extended path by
/// running it through the full chain.
pub trait Reenter {
    fn reenter(&self, value: Value, path: Path) -> Result<Plain>;
}

/// Produces one fresh processor instance per top-level conversion.
pub type ProcessorFactory = Box<dyn Fn() -> Box<dyn Processor>>;

/// An ordered, configured chain of processor factories.
///
/// `Encoder` itself is stateless across conversions; all per-conversion
/// state lives in the instances created when [`convert`](Encoder::convert)
/// runs. One `Encoder` can therefore be reused for any number of
/// independent conversions.
pub struct Encoder {
    factories: Vec<ProcessorFactory>,
}

impl Encoder {
    /// Creates an encoder with an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Encoder {
            factories: Vec::new(),
        }
    }

    /// Creates an encoder with the stock chain: reference detector first,
    /// then the plain-form unwrapper, the four container walkers, and the
    /// leaf encoders.
    ///
    /// The detector must precede the walkers: walkers rebuild fresh output
    /// containers, so a detector placed after them would never see a
    /// repeated identity and cyclic input would recurse forever.
    #[must_use]
    pub fn standard() -> Self {
        use crate::processors::{
            ArrayWalker, BytesValue, DateValue, MapWalker, ObjectWalker, PatternValue,
            PlainFormUnwrapper, RefDetector, SetWalker, SpecialNumbers, SymbolValue,
            UndefinedValue,
        };

        Encoder::new()
            .add_processor(RefDetector::new)
            .add_processor(PlainFormUnwrapper::new)
            .add_processor(ObjectWalker::new)
            .add_processor(ArrayWalker::new)
            .add_processor(MapWalker::new)
            .add_processor(SetWalker::new)
            .add_processor(SpecialNumbers::new)
            .add_processor(UndefinedValue::new)
            .add_processor(PatternValue::new)
            .add_processor(DateValue::new)
            .add_processor(SymbolValue::new)
            .add_processor(BytesValue::new)
    }

    /// Appends a processor factory to the chain.
    ///
    /// The factory runs once per conversion; registration order is the order
    /// of application for every node.
    #[must_use]
    pub fn add_processor<P, F>(mut self, factory: F) -> Self
    where
        P: Processor + 'static,
        F: Fn() -> P + 'static,
    {
        self.factories.push(Box::new(move || Box::new(factory())));
        self
    }

    /// Converts a value graph into a JSON-safe tree.
    ///
    /// Instantiates every registered factory, seeds the root path, and runs
    /// the root value through the chain. The instances and the identity
    /// table they carry are dropped when this call returns.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unhandled`] if some value reaches the end of the
    /// chain without a processor claiming it, which is only possible when the chain
    /// is missing a walker or leaf encoder for a shape present in the input.
    #[must_use = "this returns the result of the operation, errors must be handled"]
    pub fn convert(&self, value: &Value) -> Result<Plain> {
        let conversion = Conversion {
            instances: self.factories.iter().map(|factory| factory()).collect(),
        };
        conversion.reenter(value.clone(), Path::root())
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

/// The per-call context: one fresh instance per registered factory.
struct Conversion {
    instances: Vec<Box<dyn Processor>>,
}

impl Reenter for Conversion {
    fn reenter(&self, value: Value, path: Path) -> Result<Plain> {
        let mut node = Node::Value(value);
        for instance in &self.instances {
            node = instance.process(node, &path, self)?;
        }
        finalize(node, &path)
    }
}

/// Lowers whatever survived the chain into the output tree.
///
/// JSON-safe primitives lower directly, so an empty chain still maps `42`
/// to `42`. Special numbers do not lower: `NaN`, `±Infinity`, and `-0`
/// have no JSON rendering, so without their leaf encoder they are residual
/// values like any other exotic. Anything else left raw means the chain
/// had no processor for it.
fn finalize(node: Node, path: &Path) -> Result<Plain> {
    match node {
        Node::Plain(plain) => Ok(plain),
        Node::Value(Value::Null) => Ok(Plain::Null),
        Node::Value(Value::Bool(b)) => Ok(Plain::Bool(b)),
        Node::Value(Value::Number(Number::Integer(i))) => Ok(Plain::Integer(i)),
        Node::Value(Value::Number(n)) if !n.is_special() => Ok(Plain::Float(n.as_f64())),
        Node::Value(Value::String(s)) => Ok(Plain::String(s)),
        Node::Value(other) => Err(Error::unhandled(other.kind(), &path.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{plain, value};

    #[test]
    fn test_empty_chain_passes_primitives_through() {
        let encoder = Encoder::new();
        assert_eq!(encoder.convert(&Value::from(42)).unwrap(), plain!(42));
        assert_eq!(encoder.convert(&Value::from("x")).unwrap(), plain!("x"));
        assert_eq!(encoder.convert(&Value::Null).unwrap(), plain!(null));
        assert_eq!(encoder.convert(&Value::from(true)).unwrap(), plain!(true));
    }

    #[test]
    fn test_empty_chain_rejects_containers() {
        let encoder = Encoder::new();
        let err = encoder.convert(&value!([1])).unwrap_err();
        assert!(matches!(err, Error::Unhandled { ref kind, ref path } if kind == "array" && path == "#"));
    }

    #[test]
    fn test_empty_chain_rejects_special_numbers() {
        // Without the special-number encoder these have no JSON rendering,
        // so they must surface as residuals, not leak as non-finite floats.
        let encoder = Encoder::new();
        let err = encoder.convert(&Value::from(f64::NAN)).unwrap_err();
        assert!(matches!(
            err,
            Error::Unhandled { ref kind, ref path } if kind == "number" && path == "#"
        ));
        assert!(encoder.convert(&Value::from(f64::INFINITY)).is_err());
        assert!(encoder.convert(&Value::from(f64::NEG_INFINITY)).is_err());
        assert!(encoder.convert(&Value::from(-0.0)).is_err());
        assert_eq!(encoder.convert(&Value::from(3.5)).unwrap(), plain!(3.5));
    }

    #[test]
    fn test_unhandled_reports_nested_path() {
        use crate::processors::{ObjectWalker, RefDetector};
        // No array walker, so the nested array is the residual value.
        let encoder = Encoder::new()
            .add_processor(RefDetector::new)
            .add_processor(ObjectWalker::new);
        let err = encoder.convert(&value!({ "xs": [1] })).unwrap_err();
        assert!(matches!(err, Error::Unhandled { ref path, .. } if path == "#/xs"));
    }

    #[test]
    fn test_registration_order_is_application_order() {
        struct Upper;
        impl Processor for Upper {
            fn process(&self, node: Node, _path: &Path, _chain: &dyn Reenter) -> Result<Node> {
                match node {
                    Node::Value(Value::String(s)) => {
                        Ok(Node::Value(Value::String(s.to_uppercase())))
                    }
                    other => Ok(other),
                }
            }
        }
        struct Bang;
        impl Processor for Bang {
            fn process(&self, node: Node, _path: &Path, _chain: &dyn Reenter) -> Result<Node> {
                match node {
                    Node::Value(Value::String(s)) => Ok(Node::Plain(Plain::String(s + "!"))),
                    other => Ok(other),
                }
            }
        }

        let upper_first = Encoder::new()
            .add_processor(|| Upper)
            .add_processor(|| Bang);
        assert_eq!(
            upper_first.convert(&Value::from("hey")).unwrap(),
            plain!("HEY!")
        );

        // Bang finishes the node first, so Upper never sees it.
        let bang_first = Encoder::new()
            .add_processor(|| Bang)
            .add_processor(|| Upper);
        assert_eq!(
            bang_first.convert(&Value::from("hey")).unwrap(),
            plain!("hey!")
        );
    }

    #[test]
    fn test_conversions_are_isolated() {
        let encoder = Encoder::standard();
        let root = value!({});
        root.insert("me", root.clone());

        // A leaked identity table would turn the second run's root into a
        // back-reference at the top level.
        let first = encoder.convert(&root).unwrap();
        let second = encoder.convert(&root).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, plain!({ "me": { "ref": "#" } }));
    }
}
