//! # Verdict
//!
//! A validation library that separates fatal failures from non-fatal ones and
//! records every failure against the field path where it was raised.
//!
//! ## Overview
//!
//! A validation call threads a value through a chain of checks. Each check
//! either passes, *disputes* the value (a non-fatal failure: later checks
//! still run), or *refutes* it (a fatal failure: the value cannot be turned
//! into the next required type, so the chain stops). Independent branches,
//! such as the fields of a record, are combined applicatively so that every
//! branch runs and every failure is reported together.
//!
//! ## Core Types
//!
//! - [`FieldPath`]: Locates a field in nested structures (e.g., `users[0].email`)
//! - [`FailureMap`]: Failures keyed by field path, in insertion order
//! - [`Failures`]: Global failures plus the field map; the full failure record
//! - [`ValueContext`]: The value being validated, global or attached to a path
//! - [`Accumulator`]: The three-state in-progress result (valid, disputed, refuted)
//! - [`Proof`]: The final result, a valid value or the failure record
//!
//! ## Example
//!
//! ```rust
//! use verdict::{checks, FieldPath, MergeAll, Proof, Validate};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! enum Failure {
//!     Required,
//!     TooShort,
//!     NotNumeric,
//! }
//!
//! #[derive(Debug, PartialEq)]
//! struct Signup {
//!     name: String,
//!     pin: u32,
//! }
//!
//! fn signup(name: Option<String>, pin: String) -> Proof<Failure, Signup> {
//!     let name = Validate::field("name", name)
//!         .refute_with(checks::required(Failure::Required))
//!         .qed();
//!     let pin = Validate::field("pin", pin)
//!         .dispute_with(checks::exact_len(4, Failure::TooShort))
//!         .dispute_with(checks::numeric(Failure::NotNumeric))
//!         .refute_with(checks::parse(Failure::NotNumeric))
//!         .qed();
//!
//!     (name, pin)
//!         .merge_all()
//!         .map(|(name, pin)| Signup { name, pin })
//!         .to_proof()
//! }
//!
//! assert!(signup(Some("Ada".into()), "1234".into()).is_valid());
//!
//! let proof = signup(None, "12a".into());
//! let failures = proof.failures().unwrap();
//! assert_eq!(failures.at_path(&FieldPath::field("name")), Some(&[Failure::Required][..]));
//! assert_eq!(
//!     failures.at_path(&FieldPath::field("pin")),
//!     Some(&[Failure::TooShort, Failure::NotNumeric, Failure::NotNumeric][..])
//! );
//! ```

pub mod accumulator;
pub mod checks;
pub mod context;
pub mod failure;
pub mod path;
pub mod proof;
pub mod render;

pub use accumulator::{Accumulator, MergeAll, Validate};
pub use context::ValueContext;
pub use failure::{FailureMap, Failures};
pub use path::{FieldPath, PathError, PathSegment};
pub use proof::Proof;

/// Type alias for an accumulator carrying a [`ValueContext`], the shape every
/// step operator works on.
pub type Check<F, A> = Accumulator<F, ValueContext<A>>;
