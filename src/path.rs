//! Field path representation for keying failures by location.
//!
//! This module provides [`FieldPath`] and [`PathSegment`], the keys of a
//! [`FailureMap`](crate::FailureMap). A path is never empty: failures that
//! belong to the whole value are kept apart as global failures instead of
//! being stored under a root path.

use std::fmt::{self, Display};
use std::str::FromStr;

/// A segment of a field path.
///
/// Paths are built from segments that represent either a named field or a
/// list element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathSegment {
    /// A named field (e.g., `user`, `email`)
    Field(String),
    /// A list element (e.g., `[0]`, `[42]`)
    Index(usize),
}

impl PathSegment {
    /// Creates a new field segment.
    pub fn field(name: impl Into<String>) -> Self {
        PathSegment::Field(name.into())
    }

    /// Creates a new index segment.
    pub fn index(idx: usize) -> Self {
        PathSegment::Index(idx)
    }
}

impl Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => write!(f, "{}", name),
            PathSegment::Index(idx) => write!(f, "[{}]", idx),
        }
    }
}

/// A non-empty path to a field in a nested structure, outermost segment first.
///
/// Equality and ordering are structural over the segment sequence, so paths
/// can be used directly as map keys.
///
/// # Example
///
/// ```rust
/// use verdict::FieldPath;
///
/// let path = FieldPath::field("users")
///     .push_index(0)
///     .push_field("email");
///
/// assert_eq!(path.to_string(), "users[0].email");
/// assert_eq!(path.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// Creates a path from a single segment.
    pub fn new(segment: PathSegment) -> Self {
        Self {
            segments: vec![segment],
        }
    }

    /// Creates a path from a single field segment.
    pub fn field(name: impl Into<String>) -> Self {
        Self::new(PathSegment::Field(name.into()))
    }

    /// Creates a path from a single index segment.
    pub fn index(idx: usize) -> Self {
        Self::new(PathSegment::Index(idx))
    }

    /// Returns a new path with `segment` appended.
    ///
    /// This method does not modify the original path; it returns a new one.
    pub fn push(&self, segment: PathSegment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }

    /// Returns a new path with a field segment appended.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        self.push(PathSegment::Field(name.into()))
    }

    /// Returns a new path with an index segment appended.
    pub fn push_index(&self, idx: usize) -> Self {
        self.push(PathSegment::Index(idx))
    }

    /// Returns `self` followed by every segment of `inner`.
    ///
    /// This is how a nested validation's failure paths are re-keyed when they
    /// are absorbed into an enclosing field: `a.join(b.c) == a.b.c`.
    pub fn join(&self, inner: &FieldPath) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + inner.segments.len());
        segments.extend(self.segments.iter().cloned());
        segments.extend(inner.segments.iter().cloned());
        Self { segments }
    }

    /// Returns a new path with `segment` prepended as the outermost segment.
    pub fn prefixed(&self, segment: PathSegment) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.push(segment);
        segments.extend(self.segments.iter().cloned());
        Self { segments }
    }

    /// Returns the number of segments in this path. Always at least one.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns false; a field path always has at least one segment.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the path segments, outermost first.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// Returns the outermost segment.
    pub fn first(&self) -> &PathSegment {
        &self.segments[0]
    }

    /// Returns the innermost segment.
    pub fn last(&self) -> &PathSegment {
        &self.segments[self.segments.len() - 1]
    }

    /// Returns the parent path, or None if this path has a single segment.
    pub fn parent(&self) -> Option<Self> {
        if self.segments.len() <= 1 {
            None
        } else {
            Some(Self {
                segments: self.segments[..self.segments.len() - 1].to_vec(),
            })
        }
    }

    /// Returns true if `self` starts with every segment of `prefix`.
    pub fn starts_with(&self, prefix: &FieldPath) -> bool {
        self.segments.starts_with(&prefix.segments)
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", name)?;
                }
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

/// A string field name becomes a single-segment path. The name is taken
/// verbatim; use [`str::parse`] to read a dotted path such as `users[0].email`.
impl From<&str> for FieldPath {
    fn from(name: &str) -> Self {
        FieldPath::field(name)
    }
}

impl From<String> for FieldPath {
    fn from(name: String) -> Self {
        FieldPath::field(name)
    }
}

impl From<PathSegment> for FieldPath {
    fn from(segment: PathSegment) -> Self {
        FieldPath::new(segment)
    }
}

/// Errors produced when parsing a [`FieldPath`] from its display form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// The input string was empty.
    #[error("field path is empty")]
    Empty,

    /// A dot-separated part had no field name.
    #[error("empty field name in part {0} of the path")]
    EmptySegment(usize),

    /// An index was opened with `[` but never closed.
    #[error("unclosed index in '{0}'")]
    UnclosedIndex(String),

    /// The text between brackets was not a non-negative integer.
    #[error("invalid index '{0}'")]
    InvalidIndex(String),

    /// Text followed a closing bracket without a separating dot.
    #[error("unexpected text '{0}' after index")]
    TrailingText(String),
}

impl FromStr for FieldPath {
    type Err = PathError;

    /// Parses the display form of a path: dot-separated field names, each
    /// optionally followed by bracketed indices. A leading index (`[0].name`)
    /// is accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(PathError::Empty);
        }

        let mut segments = Vec::new();
        for (i, part) in s.split('.').enumerate() {
            let (name, mut indices) = match part.find('[') {
                Some(pos) => (&part[..pos], &part[pos..]),
                None => (part, ""),
            };

            if name.is_empty() {
                if i > 0 || indices.is_empty() {
                    return Err(PathError::EmptySegment(i));
                }
            } else {
                segments.push(PathSegment::Field(name.to_string()));
            }

            while !indices.is_empty() {
                let inner = indices
                    .strip_prefix('[')
                    .ok_or_else(|| PathError::TrailingText(indices.to_string()))?;
                let close = inner
                    .find(']')
                    .ok_or_else(|| PathError::UnclosedIndex(part.to_string()))?;
                let digits = &inner[..close];
                let idx = digits
                    .parse::<usize>()
                    .map_err(|_| PathError::InvalidIndex(digits.to_string()))?;
                segments.push(PathSegment::Index(idx));
                indices = &inner[close + 1..];
            }
        }

        Ok(Self { segments })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_field() {
        let path = FieldPath::field("user");
        assert_eq!(path.to_string(), "user");
        assert_eq!(path.len(), 1);
        assert!(!path.is_empty());
    }

    #[test]
    fn test_single_index() {
        let path = FieldPath::index(0);
        assert_eq!(path.to_string(), "[0]");
    }

    #[test]
    fn test_nested_fields() {
        let path = FieldPath::field("user").push_field("email");
        assert_eq!(path.to_string(), "user.email");
    }

    #[test]
    fn test_deeply_nested() {
        let path = FieldPath::field("body")
            .push_field("data")
            .push_index(42)
            .push_field("items")
            .push_index(0)
            .push_field("name");
        assert_eq!(path.to_string(), "body.data[42].items[0].name");
    }

    #[test]
    fn test_path_immutability() {
        let base = FieldPath::field("users");
        let path_a = base.push_index(0);
        let path_b = base.push_index(1);

        assert_eq!(base.to_string(), "users");
        assert_eq!(path_a.to_string(), "users[0]");
        assert_eq!(path_b.to_string(), "users[1]");
    }

    #[test]
    fn test_join_puts_outer_first() {
        let outer = FieldPath::field("a");
        let inner = FieldPath::field("b").push_field("c");
        assert_eq!(outer.join(&inner).to_string(), "a.b.c");
    }

    #[test]
    fn test_prefixed() {
        let path = FieldPath::field("email").prefixed(PathSegment::index(3));
        assert_eq!(path.to_string(), "[3].email");
        assert_eq!(path.first(), &PathSegment::Index(3));
        assert_eq!(path.last(), &PathSegment::field("email"));
    }

    #[test]
    fn test_parent_path() {
        let path = FieldPath::field("users").push_index(0).push_field("email");

        let parent = path.parent().unwrap();
        assert_eq!(parent.to_string(), "users[0]");

        let grandparent = parent.parent().unwrap();
        assert_eq!(grandparent.to_string(), "users");
        assert!(grandparent.parent().is_none());
    }

    #[test]
    fn test_starts_with() {
        let path = FieldPath::field("a").push_field("b");
        assert!(path.starts_with(&FieldPath::field("a")));
        assert!(!path.starts_with(&FieldPath::field("b")));
    }

    #[test]
    fn test_ordering_is_structural() {
        let a = FieldPath::field("a");
        let ab = FieldPath::field("a").push_field("b");
        let b = FieldPath::field("b");
        assert!(a < ab);
        assert!(ab < b);
    }

    #[test]
    fn test_str_conversion_is_verbatim() {
        let path: FieldPath = "user.name".into();
        assert_eq!(path.len(), 1);
        assert_eq!(path.first(), &PathSegment::field("user.name"));
    }

    #[test]
    fn test_parse_round_trip() {
        for text in ["name", "users[0].email", "[3].id", "matrix[1][2]", "a.b.c"] {
            let path: FieldPath = text.parse().unwrap();
            assert_eq!(path.to_string(), text);
        }
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<FieldPath>(), Err(PathError::Empty));
        assert_eq!("a..b".parse::<FieldPath>(), Err(PathError::EmptySegment(1)));
        assert_eq!("a.[0]".parse::<FieldPath>(), Err(PathError::EmptySegment(1)));
        assert_eq!(
            "a[0".parse::<FieldPath>(),
            Err(PathError::UnclosedIndex("a[0".to_string()))
        );
        assert_eq!(
            "a[x]".parse::<FieldPath>(),
            Err(PathError::InvalidIndex("x".to_string()))
        );
        assert_eq!(
            "a[0]b".parse::<FieldPath>(),
            Err(PathError::TrailingText("b".to_string()))
        );
    }
}
