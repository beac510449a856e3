//! Relation predicates between planar objects.
//!
//! Every relation has an algebraic `residual` that vanishes exactly when it
//! holds, so predicates work over any field; `PointInSegment` additionally
//! needs an ordering to bound the line parameter.
//!
//! The residual is tested with `Field::is_negligible` against `magnitude`, so
//! on `f64` the tolerance grows with the coordinates instead of staying at
//! the absolute `eps`.

use std::cmp::Ordering;
use std::fmt;

use super::types::{Circle, Line, Point, Segment};
use crate::error::Result;
use crate::field::{Element, Field};
use crate::linalg::Vect;
use crate::scalar::Scalar;

#[derive(Clone, Debug)]
pub enum Relation<T: Element> {
    Vertical(Line<T>),
    Horizontal(Line<T>),
    Parallel(Line<T>, Line<T>),
    Perpendicular(Line<T>, Line<T>),
    PointInLine(Point<T>, Line<T>),
    PointInCircle(Point<T>, Circle<T>),
    PointInSegment(Point<T>, Segment<T>),
    Collinear(Point<T>, Point<T>, Point<T>),
    SamePoint(Point<T>, Point<T>),
}

/// `x1·y2 - y1·x2` for planar displacements.
pub(super) fn cross<T: Element>(u: &Vect<T>, v: &Vect<T>) -> Scalar<T> {
    let (u, v) = (u.coords(), v.coords());
    &u[0] * &v[1] - &u[1] * &v[0]
}

pub(super) fn dot<T: Element>(u: &Vect<T>, v: &Vect<T>) -> Scalar<T> {
    let (u, v) = (u.coords(), v.coords());
    &u[0] * &v[0] + &u[1] * &v[1]
}

impl<T: Element> Relation<T> {
    /// Scalar that evaluates to the additive identity iff the relation holds
    /// (for `PointInSegment`: iff the point lies on the supporting line).
    pub fn residual(&self) -> Scalar<T> {
        match self {
            Relation::Vertical(l) => l.direction().coords()[0].clone(),
            Relation::Horizontal(l) => l.direction().coords()[1].clone(),
            Relation::Parallel(l, m) => cross(&l.direction(), &m.direction()),
            Relation::Perpendicular(l, m) => dot(&l.direction(), &m.direction()),
            Relation::PointInLine(p, l) => cross(&l.a().to(p), &l.direction()),
            Relation::PointInSegment(p, s) => cross(&s.a().to(p), &s.a().to(s.b())),
            Relation::PointInCircle(p, c) => {
                c.center().to(p).norm_squared() - c.radius_squared()
            }
            Relation::Collinear(p, q, r) => cross(&p.to(q), &p.to(r)),
            Relation::SamePoint(p, q) => p.to(q).norm_squared(),
        }
    }

    /// Squared size of the terms `residual` is built from.
    ///
    /// Products of displacement lengths for the cross/dot residuals, the
    /// squared sum of both squared radii for `PointInCircle`. Approximate
    /// fields scale their tolerance by it, so a predicate answers the same
    /// way at any coordinate scale.
    pub fn magnitude(&self) -> Scalar<T> {
        match self {
            Relation::Vertical(l) | Relation::Horizontal(l) => l.direction().norm_squared(),
            Relation::Parallel(l, m) | Relation::Perpendicular(l, m) => {
                l.direction().norm_squared() * m.direction().norm_squared()
            }
            Relation::PointInLine(p, l) => {
                l.a().to(p).norm_squared() * l.direction().norm_squared()
            }
            Relation::PointInSegment(p, s) => {
                s.a().to(p).norm_squared() * s.a().to(s.b()).norm_squared()
            }
            Relation::PointInCircle(p, c) => {
                (c.center().to(p).norm_squared() + c.radius_squared()).squared()
            }
            Relation::Collinear(p, q, r) => p.to(q).norm_squared() * p.to(r).norm_squared(),
            Relation::SamePoint(p, q) => {
                (p.as_vect().norm_squared() + q.as_vect().norm_squared()).squared()
            }
        }
    }

    /// Evaluate the relation against `field`.
    ///
    /// `PointInSegment` fails with `Unsupported` on fields without ordering.
    pub fn holds(&self, field: &dyn Field<T>) -> Result<bool> {
        match self {
            // Coordinate-wise, so fields without a positive-definite square
            // sum still get the right answer.
            Relation::SamePoint(p, q) => p.as_vect().equals(field, q.as_vect()),
            Relation::PointInSegment(p, s) => self.segment_holds(field, p, s),
            _ => self.vanishes(field),
        }
    }

    /// Residual is zero up to the field's tolerance at this magnitude.
    fn vanishes(&self, field: &dyn Field<T>) -> Result<bool> {
        let residual = field.actual(&self.residual())?;
        let magnitude = field.actual(&self.magnitude())?;
        Ok(field.is_negligible(&residual, &magnitude))
    }

    fn segment_holds(&self, field: &dyn Field<T>, p: &Point<T>, s: &Segment<T>) -> Result<bool> {
        let ord = field.require_ordered()?;
        let d = s.a().to(s.b());
        let len2 = field.actual(&d.norm_squared())?;
        // A zero-length segment is its single endpoint.
        if len2 == field.addition().neutral() {
            return Relation::SamePoint(p.clone(), s.a().clone()).holds(field);
        }
        if !self.vanishes(field)? {
            return Ok(false);
        }
        // t = (p - a)·d ranges over [0, |d|²] along the segment.
        let t = field.actual(&dot(&s.a().to(p), &d))?;
        let scale = field.multiplication().multiply(&len2, &len2);
        let add = field.addition();
        let above = matches!(
            ord.compare(&t, &add.neutral()),
            Some(Ordering::Greater | Ordering::Equal)
        ) || field.is_negligible(&t, &scale);
        let slack = add.add(&len2, &add.inverse(&t));
        let below = matches!(
            ord.compare(&t, &len2),
            Some(Ordering::Less | Ordering::Equal)
        ) || field.is_negligible(&slack, &scale);
        Ok(above && below)
    }

    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl<T: Element> fmt::Display for Relation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relation::Vertical(l) => write!(f, "{l} is vertical"),
            Relation::Horizontal(l) => write!(f, "{l} is horizontal"),
            Relation::Parallel(l, m) => write!(f, "{l} is parallel to {m}"),
            Relation::Perpendicular(l, m) => write!(f, "{l} is perpendicular to {m}"),
            Relation::PointInLine(p, l) => write!(f, "{p} lies on {l}"),
            Relation::PointInCircle(p, c) => write!(f, "{p} lies on {c}"),
            Relation::PointInSegment(p, s) => write!(f, "{p} lies on {s}"),
            Relation::Collinear(p, q, r) => write!(f, "{p}, {q}, {r} are collinear"),
            Relation::SamePoint(p, q) => write!(f, "{p} coincides with {q}"),
        }
    }
}
