//! Field-generic symbolic algebra with a planar construction layer.
//!
//! Layers, leaves first:
//! - `field`: capability traits and two concrete fields (`f64`, GF(p)).
//! - `scalar`: immutable expression trees, evaluated lazily against a field.
//! - `linalg`: `Vect` and `Matrix` over scalar expressions.
//! - `geometry`: points, lines, segments, circles; fixed and dynamic
//!   constructions over relation predicates.
//!
//! Consumers that only draw need two operations: `Vect::coords()` and
//! `Field::actual(&Scalar)`.
//!
//! API Policy
//! - Indices are 0-based throughout.
//! - Fallible operations return [`Result`]; construction-time violations in
//!   `geometry::construct` are deferred into `Throwing` scalars instead.

pub mod error;
pub mod field;
pub mod geometry;
pub mod linalg;
pub mod scalar;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{Error, Result};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::error::{Capability, Error, Result};
    pub use crate::field::{
        DblCfg, DblField, Element, Field, FieldAddition, FieldMultiplication, InnerProduct,
        MetricSpaceField, OrderedField, PrimeField,
    };
    pub use crate::geometry::construct;
    pub use crate::geometry::{
        Anchor, Circle, Constraint, DynamicLine, DynamicPoint, Line, Point, Relation, Segment,
    };
    pub use crate::linalg::{Matrix, Vect};
    pub use crate::scalar::Scalar;
}
