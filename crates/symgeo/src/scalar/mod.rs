//! Deferred, field-generic scalar expressions.
//!
//! Purpose
//! - Build numeric computations as immutable trees and evaluate them lazily
//!   against whichever concrete `Field` the caller picks.
//!
//! Why this design
//! - A tagged enum behind an `Arc`: clones are cheap, sharing is free and no
//!   node exposes a mutator, so trees are safe to read from several threads.
//! - Each node stores a structural fingerprint computed once at construction;
//!   it is order-independent for `Add`/`Mult`, which makes bag equality cheap.
//! - Errors that are known at construction time can be carried as `Throwing`
//!   nodes and only surface when evaluated.
//!
//! Code cross-refs: `field::{Field, actual_of}`, `linalg::Vect` (metric nodes).

mod equality;
mod eval;
mod node;
mod ops;

pub use node::{LiveSource, MetricOp, Node, Scalar, Token};
