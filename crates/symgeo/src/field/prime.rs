//! Prime field GF(p) over `u64` representatives.
//!
//! Purpose
//! - A second concrete domain with exact arithmetic and no ordering or metric.
//!   Ordered/metric scalars evaluated here fail with `Unsupported`.
//!
//! Representation
//! - Canonical representatives in `[0, p)`; inputs are reduced on entry so
//!   hand-built leaves outside the range still behave.
//! - `p < 2^32`, so a product of two representatives fits in `u64`.

use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::traits::{actual_of, Field, FieldAddition, FieldMultiplication};
use crate::error::{Error, Result};
use crate::scalar::Scalar;

const MAX_MODULUS: u64 = 1 << 32;

fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut d = 3u64;
    while d * d <= n {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}

#[derive(Clone, Copy, Debug)]
pub struct ModAdd {
    p: u64,
}

impl FieldAddition<u64> for ModAdd {
    fn neutral(&self) -> u64 {
        0
    }
    fn inverse(&self, x: &u64) -> u64 {
        (self.p - x % self.p) % self.p
    }
    fn add(&self, a: &u64, b: &u64) -> u64 {
        (a % self.p + b % self.p) % self.p
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ModMult {
    p: u64,
}

impl ModMult {
    fn pow(&self, mut base: u64, mut exp: u64) -> u64 {
        let mut acc = 1u64;
        base %= self.p;
        while exp > 0 {
            if exp & 1 == 1 {
                acc = acc * base % self.p;
            }
            base = base * base % self.p;
            exp >>= 1;
        }
        acc
    }
}

impl FieldMultiplication<u64> for ModMult {
    fn neutral(&self) -> u64 {
        1 % self.p
    }
    fn inverse(&self, x: &u64) -> Result<u64> {
        let x = x % self.p;
        if x == 0 {
            return Err(Error::argument("multiplicative inverse of zero"));
        }
        // Fermat: x^(p-2) = x^-1 for prime p.
        Ok(self.pow(x, self.p - 2))
    }
    fn multiply(&self, a: &u64, b: &u64) -> u64 {
        (a % self.p) * (b % self.p) % self.p
    }
}

/// Integers modulo a prime `p < 2^32`.
#[derive(Debug)]
pub struct PrimeField {
    name: String,
    add: ModAdd,
    mult: ModMult,
    rng: Mutex<StdRng>,
}

impl PrimeField {
    pub fn new(p: u64) -> Result<Self> {
        Self::build(p, StdRng::from_entropy())
    }

    pub fn seeded(p: u64, seed: u64) -> Result<Self> {
        Self::build(p, StdRng::seed_from_u64(seed))
    }

    fn build(p: u64, rng: StdRng) -> Result<Self> {
        if p >= MAX_MODULUS {
            return Err(Error::argument(format!("modulus {p} exceeds 2^32")));
        }
        if !is_prime(p) {
            return Err(Error::argument(format!("modulus {p} is not prime")));
        }
        Ok(Self {
            name: format!("GF({p})"),
            add: ModAdd { p },
            mult: ModMult { p },
            rng: Mutex::new(rng),
        })
    }

    #[inline]
    pub fn modulus(&self) -> u64 {
        self.add.p
    }
}

impl Field<u64> for PrimeField {
    fn name(&self) -> &str {
        &self.name
    }

    fn addition(&self) -> &dyn FieldAddition<u64> {
        &self.add
    }

    fn multiplication(&self) -> &dyn FieldMultiplication<u64> {
        &self.mult
    }

    fn draw(&self) -> u64 {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.gen_range(0..self.modulus())
    }

    fn draw_other(&self, value: &u64) -> u64 {
        // Shift by a non-zero residue: never lands back on `value`.
        let p = self.modulus();
        let shift = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            rng.gen_range(1..p)
        };
        (value % p + shift) % p
    }

    fn same(&self, a: &u64, b: &u64) -> bool {
        a % self.modulus() == b % self.modulus()
    }

    fn actual(&self, scalar: &Scalar<u64>) -> Result<u64> {
        actual_of(self, scalar)
    }
}
