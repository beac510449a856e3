//! Planar geometry built on the scalar algebra.
//!
//! Purpose
//! - Points, lines, segments and circles as compositions of `Scalar`/`Vect`,
//!   usable over any field; ordered/metric operations fail with `Unsupported`
//!   where the field lacks them.
//!
//! Modes
//! - `construct`: fixed constructions. Free parameters are drawn once and
//!   captured; membership preconditions are checked eagerly and violations
//!   become `Throwing` coordinates.
//! - `dynamic`: objects that keep their constraint while dependencies move,
//!   regenerating only when a cheap probe fails.
//! - `Anchor`: the one mutable input; derived objects read it live.
//!
//! Code cross-refs: `relation::Relation` (predicates and residuals),
//! `cfg::REGEN_ATTEMPTS`.

mod anchor;
mod cfg;
pub mod construct;
pub mod dynamic;
mod relation;
mod types;

pub use anchor::Anchor;
pub use dynamic::{Constraint, DynamicLine, DynamicPoint};
pub use relation::Relation;
pub use types::{Circle, Line, Point, Segment};
