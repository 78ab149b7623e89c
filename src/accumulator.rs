//! The validation accumulator.
//!
//! [`Accumulator`] is the in-progress result of a validation call. It has three
//! states:
//!
//! - `Valid`: nothing has failed yet.
//! - `Disputed`: non-fatal failures were recorded, but the value is still
//!   carried and later checks keep running.
//! - `Refuted`: a fatal failure occurred. No value is carried and no further
//!   check on this branch runs.
//!
//! Step operators such as [`refute_with`](Accumulator::refute_with) and
//! [`dispute_with`](Accumulator::dispute_with) work on accumulators that carry a
//! [`ValueContext`], so failures land at the field path of the value being
//! checked. Sequential steps compose with [`and_then`](Accumulator::and_then);
//! independent branches compose with [`and`](Accumulator::and),
//! [`Accumulator::all`] or [`MergeAll`], which always evaluate every branch.
//!
//! # Example
//!
//! ```rust
//! use verdict::{checks, FieldPath, MergeAll, Proof, Validate};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! enum Failure { Empty, InvalidFormat }
//!
//! let username = Validate::field("username", String::new())
//!     .dispute_with(checks::not_empty(Failure::Empty))
//!     .qed();
//! let email = Validate::field("email", "bad".to_string())
//!     .dispute_with(checks::email(Failure::InvalidFormat))
//!     .qed();
//!
//! let proof = (username, email).merge_all().to_proof();
//!
//! let failures = proof.failures().unwrap();
//! assert!(failures.global().is_empty());
//! assert_eq!(failures.at_path(&FieldPath::field("username")), Some(&[Failure::Empty][..]));
//! assert_eq!(failures.at_path(&FieldPath::field("email")), Some(&[Failure::InvalidFormat][..]));
//! ```

use rayon::prelude::*;

use crate::context::ValueContext;
use crate::failure::Failures;
use crate::path::{FieldPath, PathSegment};
use crate::proof::Proof;

/// The three-state accumulator of a validation in progress.
///
/// `F` is the caller's failure type; `A` is the value currently carried.
/// `Refuted` has no value slot, and `Disputed` always has one, so the
/// "refutation stops transformation" rule is enforced by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Accumulator<F, A> {
    /// No failure recorded yet.
    Valid(A),
    /// Non-fatal failures recorded; the value is still being validated.
    Disputed(Failures<F>, A),
    /// A fatal failure occurred; this branch carries no value.
    Refuted(Failures<F>),
}

/// Entry point for starting a validation call.
///
/// # Example
///
/// ```rust
/// use verdict::{Accumulator, Validate, ValueContext};
///
/// let acc: Accumulator<(), _> = Validate::field("name", "Alice");
/// assert_eq!(acc, Accumulator::Valid(ValueContext::field("name", "Alice")));
/// ```
pub struct Validate;

impl Validate {
    /// Starts validating a whole value. Failures are recorded as global.
    pub fn value<F, A>(value: A) -> Accumulator<F, ValueContext<A>> {
        Accumulator::Valid(ValueContext::Global(value))
    }

    /// Starts validating a value identified by `path`. Failures are recorded
    /// at that path.
    pub fn field<F, A>(path: impl Into<FieldPath>, value: A) -> Accumulator<F, ValueContext<A>> {
        Accumulator::Valid(ValueContext::Field(path.into(), value))
    }
}

impl<F, A> Accumulator<F, A> {
    /// Returns true if nothing has failed.
    pub fn is_valid(&self) -> bool {
        matches!(self, Accumulator::Valid(_))
    }

    /// Returns true if non-fatal failures were recorded.
    pub fn is_disputed(&self) -> bool {
        matches!(self, Accumulator::Disputed(..))
    }

    /// Returns true if a fatal failure occurred.
    pub fn is_refuted(&self) -> bool {
        matches!(self, Accumulator::Refuted(_))
    }

    /// Returns the carried value, or `None` once refuted.
    pub fn value(&self) -> Option<&A> {
        match self {
            Accumulator::Valid(value) | Accumulator::Disputed(_, value) => Some(value),
            Accumulator::Refuted(_) => None,
        }
    }

    /// Returns the failures recorded so far, or `None` while valid.
    pub fn failures(&self) -> Option<&Failures<F>> {
        match self {
            Accumulator::Valid(_) => None,
            Accumulator::Disputed(failures, _) | Accumulator::Refuted(failures) => Some(failures),
        }
    }

    /// Discards any carried value and returns the failures recorded so far.
    pub fn into_failures(self) -> Failures<F> {
        match self {
            Accumulator::Valid(_) => Failures::new(),
            Accumulator::Disputed(failures, _) | Accumulator::Refuted(failures) => failures,
        }
    }

    /// Transforms the carried value. The state is preserved.
    pub fn map<B>(self, f: impl FnOnce(A) -> B) -> Accumulator<F, B> {
        match self {
            Accumulator::Valid(value) => Accumulator::Valid(f(value)),
            Accumulator::Disputed(failures, value) => Accumulator::Disputed(failures, f(value)),
            Accumulator::Refuted(failures) => Accumulator::Refuted(failures),
        }
    }

    /// Converts every recorded failure with `f`.
    pub fn map_failures<G>(self, f: impl FnMut(F) -> G) -> Accumulator<G, A> {
        match self {
            Accumulator::Valid(value) => Accumulator::Valid(value),
            Accumulator::Disputed(failures, value) => Accumulator::Disputed(failures.map(f), value),
            Accumulator::Refuted(failures) => Accumulator::Refuted(failures.map(f)),
        }
    }

    /// Sequential composition.
    ///
    /// - `Valid(a)` returns `f(a)` unchanged.
    /// - `Refuted` is returned as is; `f` is never called.
    /// - `Disputed(failures, a)` calls `f(a)` and keeps the earlier failures
    ///   ahead of whatever `f` records. A refutation from `f` drops the value
    ///   but not the failures gathered so far.
    pub fn and_then<B>(self, f: impl FnOnce(A) -> Accumulator<F, B>) -> Accumulator<F, B> {
        match self {
            Accumulator::Valid(value) => f(value),
            Accumulator::Refuted(failures) => Accumulator::Refuted(failures),
            Accumulator::Disputed(failures, value) => match f(value) {
                Accumulator::Valid(next) => Accumulator::Disputed(failures, next),
                Accumulator::Disputed(more, next) => {
                    Accumulator::Disputed(failures.merge(more), next)
                }
                Accumulator::Refuted(more) => Accumulator::Refuted(failures.merge(more)),
            },
        }
    }

    /// Independent composition of two branches.
    ///
    /// The result is `Valid((a, b))` only when both sides are valid. Otherwise
    /// it is `Refuted` with the failures of both sides, this side's first; a
    /// disputed side counts as failed here.
    pub fn and<B>(self, other: Accumulator<F, B>) -> Accumulator<F, (A, B)> {
        match (self, other) {
            (Accumulator::Valid(a), Accumulator::Valid(b)) => Accumulator::Valid((a, b)),
            (left, right) => Accumulator::Refuted(left.into_failures().merge(right.into_failures())),
        }
    }

    /// Independent composition of any number of branches of the same type.
    ///
    /// Valid only when every branch is valid; otherwise refuted with every
    /// branch's failures in iteration order.
    pub fn all<I>(branches: I) -> Accumulator<F, Vec<A>>
    where
        I: IntoIterator<Item = Accumulator<F, A>>,
    {
        let mut values = Vec::new();
        let mut failures = Failures::new();
        let mut valid = true;

        for branch in branches {
            match branch {
                Accumulator::Valid(value) => values.push(value),
                failed => {
                    valid = false;
                    failures = failures.merge(failed.into_failures());
                }
            }
        }

        if valid {
            Accumulator::Valid(values)
        } else {
            Accumulator::Refuted(failures)
        }
    }

    /// Runs `validate` on every input across the rayon thread pool and combines
    /// the branches like [`Accumulator::all`].
    ///
    /// The result, including the order of every failure list, is identical to
    /// validating the inputs sequentially.
    pub fn par_all<T, V>(inputs: Vec<T>, validate: V) -> Accumulator<F, Vec<A>>
    where
        T: Send,
        F: Send,
        A: Send,
        V: Fn(T) -> Accumulator<F, A> + Sync + Send,
    {
        inputs
            .into_par_iter()
            .map(|input| match validate(input) {
                Accumulator::Valid(value) => Accumulator::Valid(vec![value]),
                failed => Accumulator::Refuted(failed.into_failures()),
            })
            .reduce(
                || Accumulator::Valid(Vec::new()),
                |left, right| {
                    left.and(right).map(|(mut values, rest)| {
                        values.extend(rest);
                        values
                    })
                },
            )
    }

    /// Ends the validation call.
    ///
    /// A disputed accumulator still carries a value, but the proof drops it:
    /// a proof never exposes a value alongside failures.
    pub fn to_proof(self) -> Proof<F, A> {
        match self {
            Accumulator::Valid(value) => Proof::Valid(value),
            Accumulator::Disputed(failures, _) | Accumulator::Refuted(failures) => {
                tracing::debug!(
                    global = failures.global().len(),
                    fields = failures.fields().len(),
                    "validation produced an invalid proof"
                );
                Proof::Invalid(failures)
            }
        }
    }
}

impl<F, A> Accumulator<F, ValueContext<A>> {
    /// Records a fatal failure against the current value.
    ///
    /// Global contexts record it as a global failure, field contexts at their
    /// path. An already refuted accumulator is unchanged.
    pub fn refute(self, failure: F) -> Self {
        self.refute_many(std::iter::once(failure))
    }

    /// Records several fatal failures at once. An empty list is a no-op.
    pub fn refute_many<I>(self, failures: I) -> Self
    where
        I: IntoIterator<Item = F>,
    {
        let mut failures = failures.into_iter().peekable();
        if failures.peek().is_none() {
            return self;
        }

        match self {
            Accumulator::Valid(ctx) => {
                let mut recorded = Failures::new();
                recorded.record(ctx.path(), failures);
                Accumulator::Refuted(recorded)
            }
            Accumulator::Disputed(mut recorded, ctx) => {
                recorded.record(ctx.path(), failures);
                Accumulator::Refuted(recorded)
            }
            refuted @ Accumulator::Refuted(_) => refuted,
        }
    }

    /// Records a non-fatal failure against the current value. The value is
    /// kept and later checks still run.
    pub fn dispute(self, failure: F) -> Self {
        self.dispute_many(std::iter::once(failure))
    }

    /// Records several non-fatal failures at once. An empty list is a no-op.
    pub fn dispute_many<I>(self, failures: I) -> Self
    where
        I: IntoIterator<Item = F>,
    {
        let mut failures = failures.into_iter().peekable();
        if failures.peek().is_none() {
            return self;
        }

        match self {
            Accumulator::Valid(ctx) => {
                let mut recorded = Failures::new();
                recorded.record(ctx.path(), failures);
                Accumulator::Disputed(recorded, ctx)
            }
            Accumulator::Disputed(mut recorded, ctx) => {
                recorded.record(ctx.path(), failures);
                Accumulator::Disputed(recorded, ctx)
            }
            refuted @ Accumulator::Refuted(_) => refuted,
        }
    }

    /// Disputes the value if `check` returns a failure.
    ///
    /// `check` is not called once the accumulator is refuted.
    pub fn dispute_with(self, check: impl FnOnce(&A) -> Option<F>) -> Self {
        let failure = match &self {
            Accumulator::Valid(ctx) | Accumulator::Disputed(_, ctx) => check(ctx.value()),
            Accumulator::Refuted(_) => None,
        };
        match failure {
            Some(failure) => self.dispute(failure),
            None => self,
        }
    }

    /// Disputes the value with `failure` unless `fact` holds for it.
    pub fn dispute_with_fact(self, failure: F, fact: impl FnOnce(&A) -> bool) -> Self {
        self.dispute_with(|value| if fact(value) { None } else { Some(failure) })
    }

    /// Refutes the value with `failure` unless `fact` holds for it.
    pub fn refute_with_fact(self, failure: F, fact: impl FnOnce(&A) -> bool) -> Self {
        let holds = match &self {
            Accumulator::Valid(ctx) | Accumulator::Disputed(_, ctx) => fact(ctx.value()),
            Accumulator::Refuted(_) => true,
        };
        if holds {
            self
        } else {
            self.refute(failure)
        }
    }

    /// Transforms the value with a check that may fail fatally.
    ///
    /// `Ok(b)` replaces the carried value with `b`, keeping the state. `Err`
    /// refutes the accumulator, keeping any failures already recorded.
    ///
    /// # Example
    ///
    /// ```rust
    /// use verdict::{FieldPath, Validate};
    ///
    /// let acc = Validate::field("age", "abc")
    ///     .refute_with(|s: &str| s.parse::<u32>().map_err(|_| "not a number"));
    ///
    /// assert!(acc.is_refuted());
    /// assert_eq!(
    ///     acc.failures().unwrap().at_path(&FieldPath::field("age")),
    ///     Some(&["not a number"][..])
    /// );
    /// ```
    pub fn refute_with<B>(
        self,
        transform: impl FnOnce(A) -> Result<B, F>,
    ) -> Accumulator<F, ValueContext<B>> {
        match self {
            Accumulator::Valid(ctx) => {
                let (path, value) = ctx.into_parts();
                match transform(value) {
                    Ok(next) => Accumulator::Valid(ValueContext::from_parts(path, next)),
                    Err(failure) => {
                        let mut recorded = Failures::new();
                        recorded.record(path.as_ref(), [failure]);
                        Accumulator::Refuted(recorded)
                    }
                }
            }
            Accumulator::Disputed(mut recorded, ctx) => {
                let (path, value) = ctx.into_parts();
                match transform(value) {
                    Ok(next) => Accumulator::Disputed(recorded, ValueContext::from_parts(path, next)),
                    Err(failure) => {
                        recorded.record(path.as_ref(), [failure]);
                        Accumulator::Refuted(recorded)
                    }
                }
            }
            Accumulator::Refuted(recorded) => Accumulator::Refuted(recorded),
        }
    }

    /// Validates the value with a nested validation and absorbs its proof.
    ///
    /// A valid proof replaces the carried value. An invalid proof refutes the
    /// accumulator: in a global context its failures are taken as they are;
    /// in a field context its global failures are recorded at the field's path
    /// and its field failures are prefixed with that path.
    ///
    /// # Example
    ///
    /// ```rust
    /// use verdict::{FieldPath, Proof, Validate};
    ///
    /// fn city(value: &str) -> Proof<&'static str, String> {
    ///     Validate::field("city", value.to_string())
    ///         .refute_with_fact("empty", |s| !s.is_empty())
    ///         .qed()
    ///         .to_proof()
    /// }
    ///
    /// let acc = Validate::field("address", "").refute_with_proof(city);
    ///
    /// let path = FieldPath::field("address").push_field("city");
    /// assert_eq!(acc.failures().unwrap().at_path(&path), Some(&["empty"][..]));
    /// ```
    pub fn refute_with_proof<B>(
        self,
        validate: impl FnOnce(A) -> Proof<F, B>,
    ) -> Accumulator<F, ValueContext<B>> {
        let (recorded, ctx) = match self {
            Accumulator::Valid(ctx) => (None, ctx),
            Accumulator::Disputed(recorded, ctx) => (Some(recorded), ctx),
            Accumulator::Refuted(recorded) => return Accumulator::Refuted(recorded),
        };

        let (path, value) = ctx.into_parts();
        match (validate(value), recorded) {
            (Proof::Valid(next), None) => Accumulator::Valid(ValueContext::from_parts(path, next)),
            (Proof::Valid(next), Some(recorded)) => {
                Accumulator::Disputed(recorded, ValueContext::from_parts(path, next))
            }
            (Proof::Invalid(nested), recorded) => {
                if let Some(path) = &path {
                    tracing::trace!(%path, failures = nested.len(), "absorbing nested proof");
                }
                let absorbed = nested.absorb_at(path.as_ref());
                Accumulator::Refuted(recorded.unwrap_or_default().merge(absorbed))
            }
        }
    }

    /// Unwraps the value context, leaving the bare carried value. The state is
    /// preserved.
    pub fn qed(self) -> Accumulator<F, A> {
        self.map(ValueContext::into_value)
    }

    /// Unwraps the value context and transforms the carried value.
    pub fn qed_with<B>(self, f: impl FnOnce(A) -> B) -> Accumulator<F, B> {
        self.map(|ctx| f(ctx.into_value()))
    }
}

impl<F, A> Accumulator<F, ValueContext<Option<A>>> {
    /// Runs `validate` on the value only when one is present.
    ///
    /// `validate` receives a fresh valid accumulator carrying the inner value
    /// under the same tag. A missing value passes through as `None`. Failures
    /// already recorded are kept ahead of anything `validate` records.
    pub fn optional<B>(
        self,
        validate: impl FnOnce(Accumulator<F, ValueContext<A>>) -> Accumulator<F, ValueContext<B>>,
    ) -> Accumulator<F, ValueContext<Option<B>>> {
        self.and_then(|ctx| {
            let (path, value) = ctx.into_parts();
            match value {
                None => Accumulator::Valid(ValueContext::from_parts(path, None)),
                Some(value) => validate(Accumulator::Valid(ValueContext::from_parts(path, value)))
                    .map(|ctx| ctx.map(Some)),
            }
        })
    }
}

/// Returns the path of list element `idx` under `path`.
fn element_path(path: Option<&FieldPath>, idx: usize) -> FieldPath {
    match path {
        Some(path) => path.push_index(idx),
        None => FieldPath::new(PathSegment::Index(idx)),
    }
}

impl<F, A> Accumulator<F, ValueContext<Vec<A>>> {
    /// Checks every element of a list with a check that may fail fatally.
    ///
    /// Every element is checked. Element `i`'s failure is recorded at the
    /// current path followed by `[i]`. If any element fails the accumulator is
    /// refuted; otherwise the carried list is replaced by the transformed one.
    pub fn refute_each_with<B>(
        self,
        mut transform: impl FnMut(A) -> Result<B, F>,
    ) -> Accumulator<F, ValueContext<Vec<B>>> {
        self.refute_each_with_proof(|value| match transform(value) {
            Ok(next) => Proof::Valid(next),
            Err(failure) => Proof::Invalid(Failures::from_global(vec![failure])),
        })
    }

    /// Validates every element of a list with a nested validation and absorbs
    /// each proof at the element's path.
    ///
    /// Global failures of element `i` land at `path[i]`; its field failures
    /// are prefixed with `path[i]`.
    pub fn refute_each_with_proof<B>(
        self,
        mut validate: impl FnMut(A) -> Proof<F, B>,
    ) -> Accumulator<F, ValueContext<Vec<B>>> {
        self.and_then(|ctx| {
            let (path, values) = ctx.into_parts();
            let proofs = values.into_iter().map(&mut validate).collect();
            absorb_each(path, proofs)
        })
    }

    /// Parallel form of [`refute_each_with_proof`](Self::refute_each_with_proof).
    ///
    /// Elements are validated across the rayon thread pool; failures are
    /// recorded in element order exactly as in the sequential form.
    pub fn refute_each_with_proof_par<B>(
        self,
        validate: impl Fn(A) -> Proof<F, B> + Sync + Send,
    ) -> Accumulator<F, ValueContext<Vec<B>>>
    where
        F: Send,
        A: Send,
        B: Send,
    {
        self.and_then(|ctx| {
            let (path, values) = ctx.into_parts();
            let proofs = values.into_par_iter().map(&validate).collect();
            absorb_each(path, proofs)
        })
    }

    /// Disputes individual elements of a list. Each element for which `check`
    /// returns a failure gets it recorded at its element path; the list is
    /// kept.
    pub fn dispute_each_with(self, mut check: impl FnMut(&A) -> Option<F>) -> Self {
        let mut recorded = Failures::new();
        if let Accumulator::Valid(ctx) | Accumulator::Disputed(_, ctx) = &self {
            for (idx, value) in ctx.value().iter().enumerate() {
                if let Some(failure) = check(value) {
                    let path = element_path(ctx.path(), idx);
                    tracing::trace!(%path, "disputed list element");
                    recorded.push_field(path, failure);
                }
            }
        }
        if recorded.is_empty() {
            return self;
        }

        match self {
            Accumulator::Valid(ctx) => Accumulator::Disputed(recorded, ctx),
            Accumulator::Disputed(earlier, ctx) => Accumulator::Disputed(earlier.merge(recorded), ctx),
            refuted @ Accumulator::Refuted(_) => refuted,
        }
    }
}

/// Combines per-element proofs into one accumulator for the list at `path`.
fn absorb_each<F, B>(
    path: Option<FieldPath>,
    proofs: Vec<Proof<F, B>>,
) -> Accumulator<F, ValueContext<Vec<B>>> {
    let mut values = Vec::with_capacity(proofs.len());
    let mut failures = Failures::new();
    let mut valid = true;

    for (idx, proof) in proofs.into_iter().enumerate() {
        match proof {
            Proof::Valid(value) => values.push(value),
            Proof::Invalid(nested) => {
                valid = false;
                let at = element_path(path.as_ref(), idx);
                tracing::trace!(path = %at, failures = nested.len(), "absorbing list element proof");
                failures = failures.merge(nested.absorb_at(Some(&at)));
            }
        }
    }

    if valid {
        Accumulator::Valid(ValueContext::from_parts(path, values))
    } else {
        Accumulator::Refuted(failures)
    }
}

/// Independent composition of a tuple of branches with different value types.
///
/// Every branch is evaluated; the result is valid only when all of them are,
/// and otherwise carries every branch's failures in tuple order.
///
/// # Example
///
/// ```rust
/// use verdict::{Accumulator, MergeAll};
///
/// let merged = (
///     Accumulator::<&str, _>::Valid(1),
///     Accumulator::Valid("two"),
///     Accumulator::Valid(3.0),
/// )
///     .merge_all();
///
/// assert_eq!(merged, Accumulator::Valid((1, "two", 3.0)));
/// ```
pub trait MergeAll<F> {
    /// The tuple of carried values when every branch is valid.
    type Output;

    /// Combines all branches.
    fn merge_all(self) -> Accumulator<F, Self::Output>;
}

macro_rules! impl_merge_all {
    ($($T:ident => $v:ident),+) => {
        impl<F, $($T),+> MergeAll<F> for ($(Accumulator<F, $T>,)+) {
            type Output = ($($T,)+);

            #[allow(non_snake_case)]
            fn merge_all(self) -> Accumulator<F, Self::Output> {
                let ($($T,)+) = self;
                let mut failures = Failures::new();
                $(
                    let $v = match $T {
                        Accumulator::Valid(value) => Some(value),
                        failed => {
                            failures = failures.merge(failed.into_failures());
                            None
                        }
                    };
                )+
                match ($($v,)+) {
                    ($(Some($v),)+) => Accumulator::Valid(($($v,)+)),
                    _ => Accumulator::Refuted(failures),
                }
            }
        }
    };
}

impl_merge_all!(T1 => v1, T2 => v2);
impl_merge_all!(T1 => v1, T2 => v2, T3 => v3);
impl_merge_all!(T1 => v1, T2 => v2, T3 => v3, T4 => v4);
impl_merge_all!(T1 => v1, T2 => v2, T3 => v3, T4 => v4, T5 => v5);
impl_merge_all!(T1 => v1, T2 => v2, T3 => v3, T4 => v4, T5 => v5, T6 => v6);
impl_merge_all!(T1 => v1, T2 => v2, T3 => v3, T4 => v4, T5 => v5, T6 => v6, T7 => v7);
impl_merge_all!(T1 => v1, T2 => v2, T3 => v3, T4 => v4, T5 => v5, T6 => v6, T7 => v7, T8 => v8);
