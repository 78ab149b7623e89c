//! The complete failure record of a validation.

use std::fmt::{self, Debug, Display};

use stillwater::Semigroup;

use super::FailureMap;
use crate::path::FieldPath;

/// Every failure raised while validating a value.
///
/// `Failures` keeps failures of the whole value (`global`) apart from failures
/// attached to field paths (`fields`). Global failures are an ordered list;
/// field failures live in a [`FailureMap`]. Neither side is ever reordered or
/// pruned, so the record is a loss-free history of what went wrong.
///
/// # Combining Failures
///
/// `Failures` implements `Semigroup`. Combining concatenates the global lists
/// and merges the field maps, left operand first:
///
/// ```rust
/// use verdict::{Failures, FieldPath};
/// use stillwater::Semigroup;
///
/// let mut left = Failures::new();
/// left.push_global("too short");
/// let mut right = Failures::new();
/// right.push_field(FieldPath::field("email"), "missing @");
///
/// let combined = left.combine(right);
/// assert_eq!(combined.global(), &["too short"]);
/// assert_eq!(combined.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failures<F> {
    global: Vec<F>,
    fields: FailureMap<F>,
}

impl<F> Failures<F> {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self {
            global: Vec::new(),
            fields: FailureMap::new(),
        }
    }

    /// Creates a record from its two halves.
    pub fn from_parts(global: Vec<F>, fields: FailureMap<F>) -> Self {
        Self { global, fields }
    }

    /// Creates a record holding only global failures.
    pub fn from_global(global: Vec<F>) -> Self {
        Self::from_parts(global, FailureMap::new())
    }

    /// Creates a record holding only field failures.
    pub fn from_fields(fields: FailureMap<F>) -> Self {
        Self::from_parts(Vec::new(), fields)
    }

    /// Returns the failures of the whole value, in the order they were raised.
    pub fn global(&self) -> &[F] {
        &self.global
    }

    /// Returns the failures keyed by field path.
    pub fn fields(&self) -> &FailureMap<F> {
        &self.fields
    }

    /// Returns the failures recorded at `path`.
    pub fn at_path(&self, path: &FieldPath) -> Option<&[F]> {
        self.fields.get(path)
    }

    /// Splits the record into its global list and field map.
    pub fn into_parts(self) -> (Vec<F>, FailureMap<F>) {
        (self.global, self.fields)
    }

    /// Returns the total number of failures.
    pub fn len(&self) -> usize {
        self.global.len() + self.fields.failure_count()
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.global.is_empty() && self.fields.is_empty()
    }

    /// Appends a failure of the whole value.
    pub fn push_global(&mut self, failure: F) {
        self.global.push(failure);
    }

    /// Appends a failure at `path`.
    pub fn push_field(&mut self, path: FieldPath, failure: F) {
        self.fields.push(path, failure);
    }

    /// Appends `failures` at `path`, or to the global list when `path` is
    /// `None`.
    pub fn record<I>(&mut self, path: Option<&FieldPath>, failures: I)
    where
        I: IntoIterator<Item = F>,
    {
        match path {
            Some(path) => self.fields.insert(path.clone(), failures),
            None => self.global.extend(failures),
        }
    }

    /// Combines two records, keeping this record's failures first.
    pub fn merge(mut self, other: Self) -> Self {
        self.global.extend(other.global);
        self.fields = self.fields.merge(other.fields);
        self
    }

    /// Re-homes a nested validation's failures under `path`.
    ///
    /// Global failures of the nested value become field failures at `path`,
    /// and its field failures are prefixed with `path`. With no path the
    /// record is returned unchanged.
    pub fn absorb_at(self, path: Option<&FieldPath>) -> Self {
        match path {
            None => self,
            Some(path) => {
                let mut fields = FailureMap::new();
                fields.insert(path.clone(), self.global);
                Self::from_fields(fields.merge(self.fields.prefixed(path)))
            }
        }
    }

    /// Converts every failure with `f`, keeping paths and order.
    pub fn map<G>(self, mut f: impl FnMut(F) -> G) -> Failures<G> {
        Failures {
            global: self.global.into_iter().map(&mut f).collect(),
            fields: self.fields.map(f),
        }
    }
}

impl<F> Default for Failures<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> Semigroup for Failures<F> {
    fn combine(self, other: Self) -> Self {
        self.merge(other)
    }
}

impl<F: Display> Display for Failures<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} failure(s):", self.len())?;
        let mut n = 0;
        for failure in &self.global {
            n += 1;
            writeln!(f, "  {}. (global): {}", n, failure)?;
        }
        for (path, failures) in self.fields.iter() {
            for failure in failures {
                n += 1;
                writeln!(f, "  {}. {}: {}", n, path, failure)?;
            }
        }
        Ok(())
    }
}

impl<F: Display + Debug> std::error::Error for Failures<F> {}
