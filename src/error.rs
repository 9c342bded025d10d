//! Error types for graph encoding.
//!
//! The engine itself has no failure modes: processors that do not recognize
//! a value pass it through unchanged rather than erroring, and the stock
//! chain handles every [`Value`](crate::Value) shape. The only reportable
//! condition is a chain configured without a processor for some container or
//! exotic scalar, in which case the residual value surfaces as
//! [`Error::Unhandled`] at finalization.
//!
//! ## Examples
//!
//! ```rust
//! use ajson::{Encoder, Error, Value};
//! use ajson::processors::RefDetector;
//!
//! // A chain with no walkers cannot encode a container.
//! let encoder = Encoder::new().add_processor(RefDetector::new);
//! let result = encoder.convert(&Value::object([("a", Value::from(1))]));
//! assert!(matches!(result, Err(Error::Unhandled { .. })));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while encoding a value graph.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// A value reached finalization without any processor claiming it.
    ///
    /// Only possible with a hand-built chain that omits a walker or leaf
    /// encoder; [`Encoder::standard`](crate::Encoder::standard) covers every
    /// value shape.
    #[error("no processor handled {kind} value at {path}")]
    Unhandled { kind: String, path: String },

    /// Custom error raised by a user-supplied processor.
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an unhandled-value error for the given value kind and rendered path.
    pub fn unhandled(kind: &str, path: &str) -> Self {
        Error::Unhandled {
            kind: kind.to_string(),
            path: path.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ajson::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
