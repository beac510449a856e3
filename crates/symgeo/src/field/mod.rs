//! Field capabilities and concrete fields.
//!
//! Purpose
//! - Describe what a numeric domain must supply for `Scalar` evaluation:
//!   two group structures, sampling, value equality, and full evaluation.
//! - Keep ordering and metric structure optional: fields expose them through
//!   `Field::ordered()` / `Field::metric()`, and callers that need them go
//!   through `require_ordered` / `require_metric` (`Unsupported` when absent).
//!
//! Concrete fields
//! - `DblField`: `f64`, ordered + Euclidean metric, bounded seeded sampling.
//! - `PrimeField`: GF(p) on `u64`, no ordering, no metric.

mod dbl;
mod prime;
mod traits;

pub use dbl::{DblAdd, DblCfg, DblField, DblMult, Euclidean};
pub use prime::{ModAdd, ModMult, PrimeField};
pub use traits::{
    actual_of, Element, Field, FieldAddition, FieldMultiplication, InnerProduct,
    MetricSpaceField, OrderedField,
};
