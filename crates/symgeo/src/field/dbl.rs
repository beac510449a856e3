//! Double-precision field.
//!
//! Model
//! - Plain `f64` arithmetic; value equality within `DblCfg::eps`.
//! - Draws come from a bounded `StdRng` with inclusive bounds `[min, max]`.
//! - Ordered (`between`/`greater`/`lower`) and metric (Euclidean inner
//!   product backed by nalgebra) capabilities are both available.

use std::cmp::Ordering;
use std::sync::{Mutex, PoisonError};

use nalgebra::DVector;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::traits::{
    actual_of, Field, FieldAddition, FieldMultiplication, InnerProduct, MetricSpaceField,
    OrderedField,
};
use crate::error::{Error, Result};
use crate::scalar::Scalar;

/// Sampling bounds and tolerance for [`DblField`].
#[derive(Clone, Copy, Debug)]
pub struct DblCfg {
    /// Inclusive lower bound of `draw()`.
    pub min: f64,
    /// Inclusive upper bound of `draw()`.
    pub max: f64,
    /// Absolute tolerance used by `same`.
    pub eps: f64,
    /// Fixed seed for reproducible draws; entropy when `None`.
    pub seed: Option<u64>,
    /// Draws attempted by `draw_other` before the complementary shift.
    pub other_attempts: usize,
}

impl Default for DblCfg {
    fn default() -> Self {
        Self {
            min: -10.0,
            max: 10.0,
            eps: 1e-9,
            seed: None,
            other_attempts: 32,
        }
    }
}

impl DblCfg {
    fn validate(&self) -> Result<()> {
        if !(self.min.is_finite() && self.max.is_finite()) {
            return Err(Error::argument("sampling bounds must be finite"));
        }
        if self.min > self.max {
            return Err(Error::argument(format!(
                "sampling bounds reversed: min {} > max {}",
                self.min, self.max
            )));
        }
        if !(self.eps >= 0.0 && self.eps.is_finite()) {
            return Err(Error::argument("eps must be finite and >= 0"));
        }
        Ok(())
    }
}

/// Additive structure of `f64`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DblAdd;

impl FieldAddition<f64> for DblAdd {
    #[inline]
    fn neutral(&self) -> f64 {
        0.0
    }
    #[inline]
    fn inverse(&self, x: &f64) -> f64 {
        -*x
    }
    #[inline]
    fn add(&self, a: &f64, b: &f64) -> f64 {
        a + b
    }
}

/// Multiplicative structure of `f64`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DblMult;

impl FieldMultiplication<f64> for DblMult {
    #[inline]
    fn neutral(&self) -> f64 {
        1.0
    }
    fn inverse(&self, x: &f64) -> Result<f64> {
        if *x == 0.0 {
            return Err(Error::argument("multiplicative inverse of zero"));
        }
        Ok(1.0 / x)
    }
    #[inline]
    fn multiply(&self, a: &f64, b: &f64) -> f64 {
        a * b
    }
}

/// Euclidean inner product on `f64` coordinates.
#[derive(Clone, Copy, Debug, Default)]
pub struct Euclidean;

impl Euclidean {
    fn pair(a: &[f64], b: &[f64]) -> Result<(DVector<f64>, DVector<f64>)> {
        if a.len() != b.len() {
            return Err(Error::dimension(a.len(), b.len()));
        }
        Ok((DVector::from_column_slice(a), DVector::from_column_slice(b)))
    }
}

impl InnerProduct<f64> for Euclidean {
    fn inner(&self, a: &[f64], b: &[f64]) -> Result<f64> {
        let (va, vb) = Self::pair(a, b)?;
        Ok(va.dot(&vb))
    }

    fn norm(&self, a: &[f64]) -> Result<f64> {
        Ok(DVector::from_column_slice(a).norm())
    }

    fn angle(&self, a: &[f64], b: &[f64]) -> Result<f64> {
        let (va, vb) = Self::pair(a, b)?;
        if va.norm() == 0.0 || vb.norm() == 0.0 {
            return Err(Error::argument("angle with a zero vector"));
        }
        Ok(va.angle(&vb))
    }

    fn signed_angle(&self, a: &[f64], b: &[f64]) -> Result<f64> {
        if a.len() != 2 {
            return Err(Error::dimension(2, a.len()));
        }
        let (va, vb) = Self::pair(a, b)?;
        if va.norm() == 0.0 || vb.norm() == 0.0 {
            return Err(Error::argument("angle with a zero vector"));
        }
        let cross = va[0] * vb[1] - va[1] * vb[0];
        let theta = cross.atan2(va.dot(&vb));
        // atan2 yields -π for a negative-zero cross term; keep the range half-open.
        if theta <= -std::f64::consts::PI {
            Ok(std::f64::consts::PI)
        } else {
            Ok(theta)
        }
    }
}

/// Double-precision field with ordering and Euclidean metric.
#[derive(Debug)]
pub struct DblField {
    cfg: DblCfg,
    rng: Mutex<StdRng>,
    add: DblAdd,
    mult: DblMult,
    product: Euclidean,
}

impl DblField {
    pub fn new(cfg: DblCfg) -> Result<Self> {
        cfg.validate()?;
        let rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            cfg,
            rng: Mutex::new(rng),
            add: DblAdd,
            mult: DblMult,
            product: Euclidean,
        })
    }

    /// Default bounds with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        let cfg = DblCfg {
            seed: Some(seed),
            ..DblCfg::default()
        };
        Self {
            cfg,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            add: DblAdd,
            mult: DblMult,
            product: Euclidean,
        }
    }

    #[inline]
    pub fn cfg(&self) -> &DblCfg {
        &self.cfg
    }

    fn uniform(&self, lo: f64, hi: f64) -> f64 {
        if lo >= hi {
            return lo;
        }
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.gen_range(lo..=hi)
    }

    /// Strictly positive offset, larger than the equality tolerance.
    fn positive_offset(&self) -> f64 {
        let width = (self.cfg.max - self.cfg.min).max(1.0);
        let u: f64 = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            rng.gen()
        };
        2.0 * self.cfg.eps + width * (1.0 - u)
    }
}

impl Default for DblField {
    fn default() -> Self {
        Self {
            cfg: DblCfg::default(),
            rng: Mutex::new(StdRng::from_entropy()),
            add: DblAdd,
            mult: DblMult,
            product: Euclidean,
        }
    }
}

impl Field<f64> for DblField {
    fn name(&self) -> &str {
        "f64"
    }

    fn addition(&self) -> &dyn FieldAddition<f64> {
        &self.add
    }

    fn multiplication(&self) -> &dyn FieldMultiplication<f64> {
        &self.mult
    }

    fn draw(&self) -> f64 {
        self.uniform(self.cfg.min, self.cfg.max)
    }

    fn draw_other(&self, value: &f64) -> f64 {
        for _ in 0..self.cfg.other_attempts {
            let x = self.draw();
            if !self.same(&x, value) {
                return x;
            }
        }
        tracing::warn!(
            value,
            attempts = self.cfg.other_attempts,
            "draw_other exhausted attempts, shifting"
        );
        let step = (self.cfg.max - self.cfg.min).max(1.0) + 2.0 * self.cfg.eps;
        value + step
    }

    #[inline]
    fn same(&self, a: &f64, b: &f64) -> bool {
        a == b || (a - b).abs() <= self.cfg.eps
    }

    fn actual(&self, scalar: &Scalar<f64>) -> Result<f64> {
        actual_of(self, scalar)
    }

    /// `|value| <= eps · max(1, sqrt(magnitude))`: relative above unit scale,
    /// absolute below it.
    fn is_negligible(&self, value: &f64, magnitude: &f64) -> bool {
        let scale = magnitude.abs().sqrt().max(1.0);
        value.abs() <= self.cfg.eps * scale
    }

    fn ordered(&self) -> Option<&dyn OrderedField<f64>> {
        Some(self)
    }

    fn metric(&self) -> Option<&dyn MetricSpaceField<f64>> {
        Some(self)
    }
}

impl OrderedField<f64> for DblField {
    fn greater(&self, lower: &f64) -> f64 {
        lower + self.positive_offset()
    }

    fn lower(&self, upper: &f64) -> f64 {
        upper - self.positive_offset()
    }

    fn between(&self, lower: &f64, upper: &f64) -> Result<f64> {
        match lower.partial_cmp(upper) {
            None => Err(Error::argument(format!(
                "interval bounds not comparable: [{lower}, {upper}]"
            ))),
            Some(Ordering::Greater) => Err(Error::argument(format!(
                "empty interval: lower {lower} > upper {upper}"
            ))),
            Some(Ordering::Equal) => Ok(*lower),
            Some(Ordering::Less) => Ok(self.uniform(*lower, *upper)),
        }
    }

    fn compare(&self, a: &f64, b: &f64) -> Option<Ordering> {
        if self.same(a, b) {
            Some(Ordering::Equal)
        } else {
            a.partial_cmp(b)
        }
    }
}

impl MetricSpaceField<f64> for DblField {
    fn product(&self) -> &dyn InnerProduct<f64> {
        &self.product
    }
}
