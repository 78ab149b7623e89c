//! The terminal result of a validation call.
//!
//! A [`Proof`] is what callers outside a validation see: either the fully
//! validated value, or the complete [`Failures`] record. It never carries a
//! value alongside failures.

use stillwater::Validation;

use crate::failure::Failures;

/// The two-state result of a validation call.
///
/// # Example
///
/// ```rust
/// use verdict::{Proof, Validate};
///
/// let proof: Proof<&str, u32> = Validate::value("42")
///     .refute_with(|s: &str| s.parse::<u32>().map_err(|_| "not a number"))
///     .qed()
///     .to_proof();
///
/// assert_eq!(proof, Proof::Valid(42));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Proof<F, T> {
    /// The value passed every check.
    Valid(T),
    /// At least one check failed; every failure is recorded.
    Invalid(Failures<F>),
}

impl<F, T> Proof<F, T> {
    /// Returns true if the value passed validation.
    pub fn is_valid(&self) -> bool {
        matches!(self, Proof::Valid(_))
    }

    /// Returns true if validation failed.
    pub fn is_invalid(&self) -> bool {
        matches!(self, Proof::Invalid(_))
    }

    /// Returns the validated value, if any.
    pub fn valid(&self) -> Option<&T> {
        match self {
            Proof::Valid(value) => Some(value),
            Proof::Invalid(_) => None,
        }
    }

    /// Consumes the proof and returns the validated value, if any.
    pub fn into_valid(self) -> Option<T> {
        match self {
            Proof::Valid(value) => Some(value),
            Proof::Invalid(_) => None,
        }
    }

    /// Returns the failure record of an invalid proof.
    pub fn failures(&self) -> Option<&Failures<F>> {
        match self {
            Proof::Valid(_) => None,
            Proof::Invalid(failures) => Some(failures),
        }
    }

    /// Transforms the validated value.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Proof<F, U> {
        match self {
            Proof::Valid(value) => Proof::Valid(f(value)),
            Proof::Invalid(failures) => Proof::Invalid(failures),
        }
    }

    /// Converts every failure with `f`, keeping paths and order.
    ///
    /// This lifts a nested component's failure type into the enclosing
    /// component's failure type before the proof is absorbed with
    /// [`refute_with_proof`](crate::Accumulator::refute_with_proof).
    ///
    /// # Example
    ///
    /// ```rust
    /// use verdict::{Failures, Proof};
    ///
    /// #[derive(Debug, PartialEq)]
    /// enum AddressFailure { MissingCity }
    ///
    /// #[derive(Debug, PartialEq)]
    /// enum UserFailure { Address(AddressFailure) }
    ///
    /// let nested: Proof<AddressFailure, ()> =
    ///     Proof::Invalid(Failures::from_global(vec![AddressFailure::MissingCity]));
    ///
    /// let lifted = nested.map_invalid(UserFailure::Address);
    /// assert_eq!(
    ///     lifted.failures().unwrap().global(),
    ///     &[UserFailure::Address(AddressFailure::MissingCity)]
    /// );
    /// ```
    pub fn map_invalid<G>(self, f: impl FnMut(F) -> G) -> Proof<G, T> {
        match self {
            Proof::Valid(value) => Proof::Valid(value),
            Proof::Invalid(failures) => Proof::Invalid(failures.map(f)),
        }
    }

    /// Converts the proof into a `Result`, so an invalid proof can be
    /// propagated with `?`.
    pub fn into_result(self) -> Result<T, Failures<F>> {
        match self {
            Proof::Valid(value) => Ok(value),
            Proof::Invalid(failures) => Err(failures),
        }
    }

    /// Converts the proof into a stillwater `Validation`.
    ///
    /// Proofs can then be combined with stillwater's applicative
    /// combinators; failures accumulate through `Failures`' `Semigroup`.
    pub fn into_validation(self) -> Validation<T, Failures<F>> {
        match self {
            Proof::Valid(value) => Validation::Success(value),
            Proof::Invalid(failures) => Validation::Failure(failures),
        }
    }
}

impl<F, T> From<Validation<T, Failures<F>>> for Proof<F, T> {
    fn from(validation: Validation<T, Failures<F>>) -> Self {
        match validation {
            Validation::Success(value) => Proof::Valid(value),
            Validation::Failure(failures) => Proof::Invalid(failures),
        }
    }
}

impl<F, T> From<Result<T, Failures<F>>> for Proof<F, T> {
    fn from(result: Result<T, Failures<F>>) -> Self {
        match result {
            Ok(value) => Proof::Valid(value),
            Err(failures) => Proof::Invalid(failures),
        }
    }
}
