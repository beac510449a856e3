//! Fixed-length vectors of scalar expressions.

use std::fmt;
use std::sync::Arc;

use nalgebra::DVector;

use crate::error::{Error, Result};
use crate::field::{Element, Field};
use crate::scalar::Scalar;

/// Ordered coordinates. Every binary/n-ary operation checks lengths first and
/// fails with `Argument` on mismatch.
#[derive(Clone, PartialEq)]
pub struct Vect<T: Element> {
    coords: Arc<[Scalar<T>]>,
}

impl<T: Element> Vect<T> {
    pub fn new(coords: Vec<Scalar<T>>) -> Self {
        Self {
            coords: coords.into(),
        }
    }

    pub fn from_values(values: impl IntoIterator<Item = T>) -> Self {
        Self::new(values.into_iter().map(Scalar::leaf).collect())
    }

    /// `n` additive identities.
    pub fn zeros(n: usize) -> Self {
        Self::new((0..n).map(|_| Scalar::zero()).collect())
    }

    /// The `i`-th standard basis vector of length `n`.
    pub fn basis(n: usize, i: usize) -> Result<Self> {
        if i >= n {
            return Err(Error::argument(format!("basis index {i} out of range for length {n}")));
        }
        Ok(Self::new(
            (0..n)
                .map(|k| if k == i { Scalar::one() } else { Scalar::zero() })
                .collect(),
        ))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    #[inline]
    pub fn coords(&self) -> &[Scalar<T>] {
        &self.coords
    }

    pub fn coord(&self, i: usize) -> Result<&Scalar<T>> {
        self.coords.get(i).ok_or_else(|| {
            Error::argument(format!("coordinate {i} out of range for length {}", self.len()))
        })
    }

    #[inline]
    fn check_len(&self, other: &Vect<T>) -> Result<()> {
        if self.len() != other.len() {
            return Err(Error::dimension(self.len(), other.len()));
        }
        Ok(())
    }

    fn zip_with(
        &self,
        other: &Vect<T>,
        f: impl Fn(&Scalar<T>, &Scalar<T>) -> Scalar<T>,
    ) -> Result<Vect<T>> {
        self.check_len(other)?;
        Ok(Self::new(
            self.coords
                .iter()
                .zip(other.coords.iter())
                .map(|(a, b)| f(a, b))
                .collect(),
        ))
    }

    /// Coordinate-wise n-ary combination; fails on an empty operand list.
    fn fold_all(
        vects: &[Vect<T>],
        f: impl Fn(Vec<Scalar<T>>) -> Scalar<T>,
    ) -> Result<Vect<T>> {
        let first = vects
            .first()
            .ok_or_else(|| Error::argument("no operand vectors"))?;
        for v in &vects[1..] {
            first.check_len(v)?;
        }
        Ok(Self::new(
            (0..first.len())
                .map(|i| f(vects.iter().map(|v| v.coords[i].clone()).collect()))
                .collect(),
        ))
    }

    /// Coordinate-wise `Add` over all operands.
    pub fn sum(vects: &[Vect<T>]) -> Result<Vect<T>> {
        Self::fold_all(vects, |ops| Scalar::sum(ops))
    }

    /// Coordinate-wise `Mult` over all operands.
    pub fn times(vects: &[Vect<T>]) -> Result<Vect<T>> {
        Self::fold_all(vects, |ops| Scalar::product(ops))
    }

    pub fn plus(&self, other: &Vect<T>) -> Result<Vect<T>> {
        self.zip_with(other, |a, b| a + b)
    }

    pub fn minus(&self, other: &Vect<T>) -> Result<Vect<T>> {
        self.zip_with(other, |a, b| a - b)
    }

    /// Scalar multiple `k · self`.
    pub fn scale(&self, k: &Scalar<T>) -> Vect<T> {
        Self::new(self.coords.iter().map(|c| k * c).collect())
    }

    pub fn opposite(&self) -> Vect<T> {
        Self::new(self.coords.iter().map(|c| -c).collect())
    }

    /// Sum of pairwise products.
    pub fn dot(&self, other: &Vect<T>) -> Result<Scalar<T>> {
        self.check_len(other)?;
        Ok(Scalar::sum(
            self.coords
                .iter()
                .zip(other.coords.iter())
                .map(|(a, b)| a * b),
        ))
    }

    pub fn norm_squared(&self) -> Scalar<T> {
        Scalar::sum(self.coords.iter().map(|c| c * c))
    }

    /// Norm through the field's inner product (metric fields only).
    pub fn norm(&self) -> Scalar<T> {
        Scalar::norm(self.clone())
    }

    /// Unsigned angle in `[0, π]` (metric fields only).
    pub fn angle(&self, other: &Vect<T>) -> Result<Scalar<T>> {
        self.check_len(other)?;
        Ok(Scalar::angle(self.clone(), other.clone()))
    }

    /// Oriented angle from `self` to `other` in `(-π, π]`; 2D only.
    pub fn signed_angle(&self, other: &Vect<T>) -> Result<Scalar<T>> {
        self.check_plane()?;
        self.check_len(other)?;
        Ok(Scalar::signed_angle(self.clone(), other.clone()))
    }

    fn check_plane(&self) -> Result<()> {
        if self.len() != 2 {
            return Err(Error::dimension(2, self.len()));
        }
        Ok(())
    }

    /// Quarter turn counterclockwise: `(x, y) ↦ (-y, x)`.
    pub fn perp(&self) -> Result<Vect<T>> {
        self.check_plane()?;
        Ok(Self::new(vec![-&self.coords[1], self.coords[0].clone()]))
    }

    /// Planar cross product `x1·y2 - y1·x2`.
    pub fn cross(&self, other: &Vect<T>) -> Result<Scalar<T>> {
        self.check_plane()?;
        self.check_len(other)?;
        let (a, b) = (&self.coords, &other.coords);
        Ok(&a[0] * &b[1] - &a[1] * &b[0])
    }

    /// Field-level equality: `false` on length mismatch, otherwise every
    /// coordinate pair must be `Field::equals`.
    pub fn equals(&self, field: &dyn Field<T>, other: &Vect<T>) -> Result<bool> {
        if self.len() != other.len() {
            return Ok(false);
        }
        if Arc::ptr_eq(&self.coords, &other.coords) {
            return Ok(true);
        }
        for (a, b) in self.coords.iter().zip(other.coords.iter()) {
            if !field.equals(a, b)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    pub fn actual(&self, field: &dyn Field<T>) -> Result<Vec<T>> {
        self.coords.iter().map(|c| field.actual(c)).collect()
    }

    /// Resolve into a dense nalgebra vector.
    pub fn to_dvector(&self, field: &dyn Field<T>) -> Result<DVector<T>> {
        Ok(DVector::from_vec(self.actual(field)?))
    }

    pub fn is_deterministic(&self) -> bool {
        self.coords.iter().all(Scalar::is_deterministic)
    }
}

impl<T: Element> From<Vec<Scalar<T>>> for Vect<T> {
    fn from(coords: Vec<Scalar<T>>) -> Self {
        Self::new(coords)
    }
}

impl<T: Element> fmt::Display for Vect<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, c) in self.coords.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{c}")?;
        }
        f.write_str("]")
    }
}

impl<T: Element> fmt::Debug for Vect<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vect{self}")
    }
}
