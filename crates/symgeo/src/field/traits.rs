//! Capability traits a concrete numeric domain implements.
//!
//! - `Field`: mandatory arithmetic, sampling and equality, plus two optional
//!   capabilities queried through `ordered()` / `metric()`.
//! - `FieldAddition`, `FieldMultiplication`: the two group structures.
//! - `OrderedField`, `MetricSpaceField` + `InnerProduct`: optional extras.
//! - `Element`: bound on the element type carried by `Scalar` leaves.

use std::cmp::Ordering;
use std::fmt::Debug;
use std::hash::{Hash, Hasher};

use crate::error::{Capability, Error, Result};
use crate::scalar::Scalar;

/// Element types that can sit in a `Scalar` leaf.
///
/// `hash_into` must agree with `PartialEq` for values that compare equal, so
/// that leaves can participate in the multiset fingerprint of `Add`/`Mult`.
pub trait Element: Clone + Debug + PartialEq + Send + Sync + 'static {
    fn hash_into<H: Hasher>(&self, state: &mut H);
}

impl Element for f64 {
    #[inline]
    fn hash_into<H: Hasher>(&self, state: &mut H) {
        // -0.0 == 0.0, so both must land on the same bits.
        let v = if *self == 0.0 { 0.0f64 } else { *self };
        v.to_bits().hash(state);
    }
}

impl Element for u64 {
    #[inline]
    fn hash_into<H: Hasher>(&self, state: &mut H) {
        self.hash(state);
    }
}

/// Additive group structure.
pub trait FieldAddition<T> {
    fn neutral(&self) -> T;
    fn inverse(&self, x: &T) -> T;
    fn add(&self, a: &T, b: &T) -> T;
}

/// Multiplicative group structure. `inverse` of the additive identity fails.
pub trait FieldMultiplication<T> {
    fn neutral(&self) -> T;
    fn inverse(&self, x: &T) -> Result<T>;
    fn multiply(&self, a: &T, b: &T) -> T;
}

/// Ordering capability: random draws constrained by a bound.
pub trait OrderedField<T> {
    /// A fresh value strictly greater than `lower`.
    fn greater(&self, lower: &T) -> T;
    /// A fresh value strictly lower than `upper`.
    fn lower(&self, upper: &T) -> T;
    /// A fresh value in `[lower, upper]`; `lower` itself when both are equal.
    /// Fails with `Argument` when `lower > upper`.
    fn between(&self, lower: &T, upper: &T) -> Result<T>;
    /// Tolerance-aware comparison; `None` for incomparable values.
    fn compare(&self, a: &T, b: &T) -> Option<Ordering>;
}

/// Inner product over coordinate slices.
pub trait InnerProduct<T> {
    fn inner(&self, a: &[T], b: &[T]) -> Result<T>;
    fn norm(&self, a: &[T]) -> Result<T>;
    /// Unsigned angle in `[0, π]`.
    fn angle(&self, a: &[T], b: &[T]) -> Result<T>;
    /// Oriented angle from `a` to `b` in `(-π, π]`; 2-dimensional inputs only.
    fn signed_angle(&self, a: &[T], b: &[T]) -> Result<T>;
}

/// Metric capability.
pub trait MetricSpaceField<T> {
    fn product(&self) -> &dyn InnerProduct<T>;
}

/// A concrete numeric domain.
///
/// Implementations must route `actual` through [`actual_of`] so that leaves
/// are returned as-is instead of being re-derived through field arithmetic.
pub trait Field<T: Element>: Send + Sync {
    /// Short label used in diagnostics (`Unsupported` errors, logs).
    fn name(&self) -> &str;

    fn addition(&self) -> &dyn FieldAddition<T>;

    fn multiplication(&self) -> &dyn FieldMultiplication<T>;

    /// Draw a fresh concrete value.
    fn draw(&self) -> T;

    /// Draw a concrete value guaranteed not to be `same` as `value`.
    fn draw_other(&self, value: &T) -> T;

    /// Value-level equality (tolerance-aware where the domain needs it).
    fn same(&self, a: &T, b: &T) -> bool;

    /// Fully evaluate `scalar`.
    fn actual(&self, scalar: &Scalar<T>) -> Result<T>;

    /// A resampleable scalar: every evaluation draws again.
    fn random(&self) -> Scalar<T> {
        Scalar::random()
    }

    /// A scalar whose value always differs from the value of `scalar`.
    fn other(&self, scalar: &Scalar<T>) -> Scalar<T> {
        Scalar::different(scalar)
    }

    /// Structurally equal scalars are equal without evaluation; otherwise
    /// both sides are resolved and compared with `same`.
    fn equals(&self, a: &Scalar<T>, b: &Scalar<T>) -> Result<bool> {
        if a == b {
            return Ok(true);
        }
        Ok(self.same(&self.actual(a)?, &self.actual(b)?))
    }

    fn is_zero(&self, value: &T) -> bool {
        self.same(value, &self.addition().neutral())
    }

    /// Whether `value` vanishes relative to `magnitude`, the squared size of
    /// the terms it was computed from. Exact fields ignore the magnitude.
    fn is_negligible(&self, value: &T, magnitude: &T) -> bool {
        let _ = magnitude;
        self.is_zero(value)
    }

    fn ordered(&self) -> Option<&dyn OrderedField<T>> {
        None
    }

    fn metric(&self) -> Option<&dyn MetricSpaceField<T>> {
        None
    }

    fn require_ordered(&self) -> Result<&dyn OrderedField<T>> {
        self.ordered()
            .ok_or_else(|| Error::unsupported(Capability::Ordering, self.name()))
    }

    fn require_metric(&self) -> Result<&dyn MetricSpaceField<T>> {
        self.metric()
            .ok_or_else(|| Error::unsupported(Capability::Metric, self.name()))
    }
}

/// Shared body of `Field::actual`: leaves short-circuit, composites evaluate.
#[inline]
pub fn actual_of<T: Element>(field: &dyn Field<T>, scalar: &Scalar<T>) -> Result<T> {
    match scalar.as_leaf() {
        Some(v) => Ok(v.clone()),
        None => scalar.value(field),
    }
}
