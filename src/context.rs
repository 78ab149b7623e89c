//! The value currently being validated, tagged with where it lives.
//!
//! A [`ValueContext`] is either global (the whole value, no field name) or
//! attached to a [`FieldPath`]. The tag decides where failures raised against
//! the value are recorded; the context itself holds no failures.

use crate::path::FieldPath;

/// A value under validation, either global or attached to a field path.
///
/// Replacing the carried value keeps the tag, so a chain of transformations
/// that turns a `ValueContext<String>` into a `ValueContext<u32>` still
/// reports failures against the same field.
///
/// # Example
///
/// ```rust
/// use verdict::{FieldPath, ValueContext};
///
/// let ctx = ValueContext::field("age", "42".to_string());
/// let parsed = ctx.map(|s| s.len());
///
/// assert_eq!(parsed.path(), Some(&FieldPath::field("age")));
/// assert_eq!(parsed.value(), &2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueContext<A> {
    /// The whole value, with no enclosing field.
    Global(A),
    /// A value identified by a field path.
    Field(FieldPath, A),
}

impl<A> ValueContext<A> {
    /// Creates a global context.
    pub fn global(value: A) -> Self {
        ValueContext::Global(value)
    }

    /// Creates a context attached to `path`.
    pub fn field(path: impl Into<FieldPath>, value: A) -> Self {
        ValueContext::Field(path.into(), value)
    }

    /// Rebuilds a context from an optional path and a value.
    pub fn from_parts(path: Option<FieldPath>, value: A) -> Self {
        match path {
            Some(path) => ValueContext::Field(path, value),
            None => ValueContext::Global(value),
        }
    }

    /// Returns the carried value.
    pub fn value(&self) -> &A {
        match self {
            ValueContext::Global(value) | ValueContext::Field(_, value) => value,
        }
    }

    /// Consumes the context and returns the carried value.
    pub fn into_value(self) -> A {
        match self {
            ValueContext::Global(value) | ValueContext::Field(_, value) => value,
        }
    }

    /// Returns the field path, or `None` for a global context.
    pub fn path(&self) -> Option<&FieldPath> {
        match self {
            ValueContext::Global(_) => None,
            ValueContext::Field(path, _) => Some(path),
        }
    }

    /// Returns true for a global context.
    pub fn is_global(&self) -> bool {
        matches!(self, ValueContext::Global(_))
    }

    /// Splits the context into its optional path and value.
    pub fn into_parts(self) -> (Option<FieldPath>, A) {
        match self {
            ValueContext::Global(value) => (None, value),
            ValueContext::Field(path, value) => (Some(path), value),
        }
    }

    /// Replaces the carried value, keeping the tag. The new value may have a
    /// different type.
    pub fn set_value<B>(self, value: B) -> ValueContext<B> {
        let (path, _) = self.into_parts();
        ValueContext::from_parts(path, value)
    }

    /// Transforms the carried value, keeping the tag.
    pub fn map<B>(self, f: impl FnOnce(A) -> B) -> ValueContext<B> {
        let (path, value) = self.into_parts();
        ValueContext::from_parts(path, f(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_has_no_path() {
        let ctx = ValueContext::global(5);
        assert!(ctx.is_global());
        assert_eq!(ctx.path(), None);
        assert_eq!(ctx.into_value(), 5);
    }

    #[test]
    fn test_set_value_changes_type_keeps_path() {
        let ctx = ValueContext::field("count", "3");
        let replaced: ValueContext<u8> = ctx.set_value(3);
        assert_eq!(replaced, ValueContext::Field(FieldPath::field("count"), 3));
    }

    #[test]
    fn test_map_keeps_global_tag() {
        let ctx = ValueContext::global("abc").map(str::len);
        assert_eq!(ctx, ValueContext::Global(3));
    }

    #[test]
    fn test_parts_round_trip() {
        let ctx = ValueContext::field(FieldPath::field("a").push_index(1), 'x');
        let (path, value) = ctx.clone().into_parts();
        assert_eq!(ValueContext::from_parts(path, value), ctx);
    }
}
