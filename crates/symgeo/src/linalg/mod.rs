//! Vectors and matrices over scalar expressions.
//!
//! - `Vect`: coordinate-wise combinators, dot/norm/angle, planar helpers,
//!   field-level equality (`equals`), nalgebra export.
//! - `Matrix`: `apply`, entrywise `sum`/`times`, `compose`, lazy `transpose`.
//!
//! Conventions
//! - All indices are 0-based.
//! - Length/shape mismatches fail immediately with `Error::Argument`, except
//!   `Vect::equals`, which answers `false`.

mod matrix;
mod vect;

pub use matrix::Matrix;
pub use vect::Vect;

#[cfg(test)]
mod tests;
