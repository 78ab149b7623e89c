//! Ordered mapping from field paths to the failures recorded there.

use indexmap::IndexMap;
use stillwater::prelude::*;

use crate::path::FieldPath;

/// A mapping from [`FieldPath`] to the ordered list of failures recorded at
/// that path.
///
/// Paths iterate in first-insertion order, so failures of sibling fields come
/// out in the order the fields were validated. The map is purely additive:
/// lists are only ever appended to, and a path is never present with an empty
/// list.
///
/// # Example
///
/// ```rust
/// use verdict::{FailureMap, FieldPath};
///
/// let left = FailureMap::singleton(FieldPath::field("age"), 1);
/// let right = FailureMap::singleton(FieldPath::field("age"), 2);
///
/// let merged = left.merge(right);
/// assert_eq!(merged.get(&FieldPath::field("age")), Some(&[1, 2][..]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureMap<F> {
    entries: IndexMap<FieldPath, Vec<F>>,
}

impl<F> FailureMap<F> {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Creates a map holding one failure at `path`.
    pub fn singleton(path: FieldPath, failure: F) -> Self {
        let mut map = Self::new();
        map.push(path, failure);
        map
    }

    /// Appends `failures` to the list at `path`, creating the entry if needed.
    ///
    /// Inserting an empty sequence leaves the map unchanged.
    pub fn insert<I>(&mut self, path: FieldPath, failures: I)
    where
        I: IntoIterator<Item = F>,
    {
        let mut failures = failures.into_iter().peekable();
        if failures.peek().is_none() {
            return;
        }
        self.entries.entry(path).or_default().extend(failures);
    }

    /// Appends a single failure at `path`.
    pub fn push(&mut self, path: FieldPath, failure: F) {
        self.entries.entry(path).or_default().push(failure);
    }

    /// Combines two maps. For a path present in both, the result lists this
    /// map's failures before `other`'s.
    pub fn merge(mut self, other: Self) -> Self {
        for (path, failures) in other.entries {
            self.insert(path, failures);
        }
        self
    }

    /// Returns the failures recorded at `path`.
    pub fn get(&self, path: &FieldPath) -> Option<&[F]> {
        self.entries.get(path).map(Vec::as_slice)
    }

    /// Returns true if any failure is recorded at `path`.
    pub fn contains_path(&self, path: &FieldPath) -> bool {
        self.entries.contains_key(path)
    }

    /// Returns the number of distinct paths.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no failures are recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the total number of failures across all paths.
    pub fn failure_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Returns the recorded paths in insertion order.
    pub fn paths(&self) -> impl Iterator<Item = &FieldPath> {
        self.entries.keys()
    }

    /// Returns an iterator over `(path, failures)` entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldPath, &[F])> {
        self.entries
            .iter()
            .map(|(path, failures)| (path, failures.as_slice()))
    }

    /// Converts every failure with `f`, keeping paths and order.
    pub fn map<G>(self, mut f: impl FnMut(F) -> G) -> FailureMap<G> {
        FailureMap {
            entries: self
                .entries
                .into_iter()
                .map(|(path, failures)| (path, failures.into_iter().map(&mut f).collect()))
                .collect(),
        }
    }

    /// Re-keys every entry under `prefix`, so a failure at `b` moves to
    /// `prefix.b`.
    pub fn prefixed(self, prefix: &FieldPath) -> Self {
        Self {
            entries: self
                .entries
                .into_iter()
                .map(|(path, failures)| (prefix.join(&path), failures))
                .collect(),
        }
    }
}

impl<F> Default for FailureMap<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> Semigroup for FailureMap<F> {
    fn combine(self, other: Self) -> Self {
        self.merge(other)
    }
}

impl<F> FromIterator<(FieldPath, F)> for FailureMap<F> {
    fn from_iter<I: IntoIterator<Item = (FieldPath, F)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (path, failure) in iter {
            map.push(path, failure);
        }
        map
    }
}

impl<F> IntoIterator for FailureMap<F> {
    type Item = (FieldPath, Vec<F>);
    type IntoIter = indexmap::map::IntoIter<FieldPath, Vec<F>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
