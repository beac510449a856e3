//! Depth-first evaluation against a concrete field.
//!
//! No memoization: sampling nodes draw again on every call, which is what lets
//! a constructed expression be re-sampled.

use super::node::{MetricOp, Node, Scalar};
use crate::error::{Error, Result};
use crate::field::{Element, Field};

impl<T: Element> Scalar<T> {
    /// Resolve this expression to a concrete value.
    ///
    /// Children are resolved left to right before the node's own operation.
    /// Errors:
    /// - `Argument` on division/inversion by the additive identity;
    /// - `Unsupported` for ordered/metric nodes on fields lacking the capability;
    /// - `Deferred` when a `Throwing` node is reached.
    pub fn value(&self, field: &dyn Field<T>) -> Result<T> {
        match self.node() {
            Node::Leaf(v) => Ok(v.clone()),
            Node::Add(ops) => fold(field, ops, |f, a, b| f.addition().add(a, b))
                .map(|v| v.unwrap_or_else(|| field.addition().neutral())),
            Node::Mult(ops) => fold(field, ops, |f, a, b| f.multiplication().multiply(a, b))
                .map(|v| v.unwrap_or_else(|| field.multiplication().neutral())),
            Node::Diff(a, b) => {
                let add = field.addition();
                let a = a.value(field)?;
                let b = b.value(field)?;
                Ok(add.add(&a, &add.inverse(&b)))
            }
            Node::Division(a, b) => {
                let a = a.value(field)?;
                let b = nonzero(field, b.value(field)?, "division by the additive identity")?;
                let mult = field.multiplication();
                Ok(mult.multiply(&a, &mult.inverse(&b)?))
            }
            Node::AddInverse(x) => Ok(field.addition().inverse(&x.value(field)?)),
            Node::MultInverse(x) => {
                let x = nonzero(field, x.value(field)?, "inverse of the additive identity")?;
                field.multiplication().inverse(&x)
            }
            Node::AddIdentity => Ok(field.addition().neutral()),
            Node::MultIdentity => Ok(field.multiplication().neutral()),
            Node::Random(_) => Ok(field.draw()),
            Node::Different(x) => Ok(field.draw_other(&x.value(field)?)),
            Node::Between(lo, hi) => {
                let ord = field.require_ordered()?;
                let lo = lo.value(field)?;
                let hi = hi.value(field)?;
                ord.between(&lo, &hi)
            }
            Node::Greater(lo) => {
                let ord = field.require_ordered()?;
                Ok(ord.greater(&lo.value(field)?))
            }
            Node::Lower(hi) => {
                let ord = field.require_ordered()?;
                Ok(ord.lower(&hi.value(field)?))
            }
            Node::Throwing(e) => Err(Error::Deferred(Box::new(e.clone()))),
            Node::Metric(op) => {
                let ip = field.require_metric()?.product();
                match op {
                    MetricOp::Norm(v) => ip.norm(&v.actual(field)?),
                    MetricOp::Angle(a, b) => ip.angle(&a.actual(field)?, &b.actual(field)?),
                    MetricOp::SignedAngle(a, b) => {
                        ip.signed_angle(&a.actual(field)?, &b.actual(field)?)
                    }
                }
            }
            Node::Live { source, index } => {
                let values = source.current(field)?;
                let len = values.len();
                values.into_iter().nth(*index).ok_or_else(|| {
                    Error::argument(format!(
                        "coordinate {index} out of range for `{}` (dimension {len})",
                        source.label()
                    ))
                })
            }
        }
    }
}

fn fold<T: Element>(
    field: &dyn Field<T>,
    ops: &[Scalar<T>],
    op: impl Fn(&dyn Field<T>, &T, &T) -> T,
) -> Result<Option<T>> {
    let mut acc: Option<T> = None;
    for s in ops {
        let v = s.value(field)?;
        acc = Some(match acc {
            Some(a) => op(field, &a, &v),
            None => v,
        });
    }
    Ok(acc)
}

/// Exact test against the additive identity: a tiny divisor is still a divisor.
fn nonzero<T: Element>(field: &dyn Field<T>, v: T, what: &str) -> Result<T> {
    if v == field.addition().neutral() {
        Err(Error::argument(what))
    } else {
        Ok(v)
    }
}
