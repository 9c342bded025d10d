//! Paths from the conversion root to a node.
//!
//! Every node visited during a conversion carries a [`Path`]: the ordered
//! sequence of segments that leads to it from the document root. The
//! reference detector records the path of a value's first visitation and
//! renders it into back-reference descriptors.
//!
//! ## Rendering
//!
//! Segments join with `/`. The root sentinel renders as `#`, object and map
//! keys render literally, and sequence indices render as `[n]`:
//!
//! ```rust
//! use ajson::{Path, Segment};
//!
//! let path = Path::root()
//!     .child(Segment::Key("b".to_string()))
//!     .child(Segment::Index(2));
//! assert_eq!(path.to_string(), "#/b/[2]");
//! ```

use std::fmt;

/// One step of a [`Path`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Segment {
    /// The document-root sentinel; seeds every conversion.
    Root,
    /// An object or map key.
    Key(String),
    /// An array, set, or map-entry index.
    Index(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Root => write!(f, "#"),
            Segment::Key(key) => write!(f, "{}", key),
            Segment::Index(i) => write!(f, "[{}]", i),
        }
    }
}

/// An ordered sequence of segments from the conversion root.
///
/// Paths are small and cloned freely: each recursion into a child extends
/// the parent path by one segment via [`Path::child`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Path(Vec<Segment>);

impl Path {
    /// The root path, seeded with the single [`Segment::Root`] sentinel.
    #[must_use]
    pub fn root() -> Self {
        Path(vec![Segment::Root])
    }

    /// Returns a new path extended by one segment.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ajson::{Path, Segment};
    ///
    /// let parent = Path::root();
    /// let child = parent.child(Segment::Key("a".to_string()));
    /// assert_eq!(parent.to_string(), "#");
    /// assert_eq!(child.to_string(), "#/a");
    /// ```
    #[must_use]
    pub fn child(&self, segment: Segment) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment);
        Path(segments)
    }

    /// Returns a new path extended by a key segment.
    #[must_use]
    pub fn key(&self, key: impl Into<String>) -> Self {
        self.child(Segment::Key(key.into()))
    }

    /// Returns a new path extended by an index segment.
    #[must_use]
    pub fn index(&self, i: usize) -> Self {
        self.child(Segment::Index(i))
    }

    /// The segments of this path, root sentinel first.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.0
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}
