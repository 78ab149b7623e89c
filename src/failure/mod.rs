//! Failure records keyed by field path.
//!
//! This module provides [`FailureMap`] for failures attached to field paths and
//! [`Failures`] for the complete record of a validation: the failures of the
//! whole value plus the per-field map. Both are purely additive and combine
//! with stillwater's `Semigroup`.

mod failure_map;
mod failures;

pub use failure_map::FailureMap;
pub use failures::Failures;
