//! Planar objects as compositions of scalar expressions.
//!
//! - `Point`: a length-2 `Vect`.
//! - `Line`: two defining points; direction `b - a`.
//! - `Segment`: two endpoints.
//! - `Circle`: center, radius, and one point known to lie on it.
//!
//! Analytics that are undefined for the current configuration (slope of a
//! vertical line, ...) fail with `Error::State`; check the matching
//! `Relation` first to avoid them.

use std::fmt;

use super::relation::Relation;
use crate::error::{Error, Result};
use crate::field::{Element, Field};
use crate::linalg::Vect;
use crate::scalar::Scalar;

fn two<T: Element>() -> Scalar<T> {
    Scalar::sum([Scalar::one(), Scalar::one()])
}

#[derive(Clone, PartialEq)]
pub struct Point<T: Element> {
    v: Vect<T>,
}

impl<T: Element> Point<T> {
    pub fn new(x: Scalar<T>, y: Scalar<T>) -> Self {
        Self {
            v: Vect::new(vec![x, y]),
        }
    }

    /// Point with leaf coordinates.
    pub fn at(x: T, y: T) -> Self {
        Self::new(Scalar::leaf(x), Scalar::leaf(y))
    }

    pub fn origin() -> Self {
        Self::new(Scalar::zero(), Scalar::zero())
    }

    pub fn from_vect(v: Vect<T>) -> Result<Self> {
        if v.len() != 2 {
            return Err(Error::dimension(2, v.len()));
        }
        Ok(Self { v })
    }

    /// Both coordinates defer `error` to evaluation time.
    pub fn throwing(error: Error) -> Self {
        let s = Scalar::throwing(error);
        Self::new(s.clone(), s)
    }

    #[inline]
    pub fn x(&self) -> &Scalar<T> {
        &self.v.coords()[0]
    }

    #[inline]
    pub fn y(&self) -> &Scalar<T> {
        &self.v.coords()[1]
    }

    #[inline]
    pub fn as_vect(&self) -> &Vect<T> {
        &self.v
    }

    #[inline]
    pub fn coords(&self) -> &[Scalar<T>] {
        self.v.coords()
    }

    pub fn is_throwing(&self) -> bool {
        self.coords().iter().any(Scalar::is_throwing)
    }

    /// Displacement `other - self`.
    pub fn to(&self, other: &Point<T>) -> Vect<T> {
        Vect::new(vec![other.x() - self.x(), other.y() - self.y()])
    }

    /// `self + d` for a planar displacement.
    pub fn offset(&self, d: &Vect<T>) -> Result<Point<T>> {
        Point::from_vect(self.v.plus(d)?)
    }

    /// `self + k·d`.
    pub fn offset_scaled(&self, k: &Scalar<T>, d: &Vect<T>) -> Result<Point<T>> {
        self.offset(&d.scale(k))
    }

    pub fn actual(&self, field: &dyn Field<T>) -> Result<(T, T)> {
        Ok((field.actual(self.x())?, field.actual(self.y())?))
    }
}

impl<T: Element> fmt::Display for Point<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x(), self.y())
    }
}

impl<T: Element> fmt::Debug for Point<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point{self}")
    }
}

/// Line through two points.
#[derive(Clone, PartialEq, Debug)]
pub struct Line<T: Element> {
    a: Point<T>,
    b: Point<T>,
}

impl<T: Element> Line<T> {
    pub fn through(a: Point<T>, b: Point<T>) -> Self {
        Self { a, b }
    }

    /// Line through `a` along `d`.
    pub fn from_direction(a: Point<T>, d: &Vect<T>) -> Result<Self> {
        let b = a.offset(d)?;
        Ok(Self { a, b })
    }

    pub fn throwing(error: Error) -> Self {
        let p = Point::throwing(error);
        Self {
            a: p.clone(),
            b: p,
        }
    }

    #[inline]
    pub fn a(&self) -> &Point<T> {
        &self.a
    }

    #[inline]
    pub fn b(&self) -> &Point<T> {
        &self.b
    }

    pub fn direction(&self) -> Vect<T> {
        self.a.to(&self.b)
    }

    /// Direction turned a quarter counterclockwise.
    pub fn normal(&self) -> Vect<T> {
        let d = self.direction();
        Vect::new(vec![-d.coords()[1].clone(), d.coords()[0].clone()])
    }

    /// Parametric point `a + t·(b - a)`.
    pub fn point_at(&self, t: &Scalar<T>) -> Point<T> {
        let d = self.direction();
        Point::new(
            self.a.x() + &(t * &d.coords()[0]),
            self.a.y() + &(t * &d.coords()[1]),
        )
    }

    /// `dy/dx`; `State` error for vertical lines.
    pub fn slope(&self, field: &dyn Field<T>) -> Result<T> {
        if Relation::Vertical(self.clone()).holds(field)? {
            return Err(Error::state("vertical line has no slope"));
        }
        let d = self.direction();
        field.actual(&(&d.coords()[1] / &d.coords()[0]))
    }

    /// `y` where the line crosses `x = 0`; `State` error for vertical lines.
    pub fn intercept(&self, field: &dyn Field<T>) -> Result<T> {
        self.y_at(field, &Scalar::zero())
    }

    /// `y` at abscissa `x`; `State` error for vertical lines.
    pub fn y_at(&self, field: &dyn Field<T>, x: &Scalar<T>) -> Result<T> {
        if Relation::Vertical(self.clone()).holds(field)? {
            return Err(Error::state("vertical line is not a function of x"));
        }
        let d = self.direction();
        let slope = &d.coords()[1] / &d.coords()[0];
        field.actual(&(self.a.y() + &(&slope * &(x - self.a.x()))))
    }

    /// `x` at ordinate `y`; `State` error for horizontal lines.
    pub fn x_at(&self, field: &dyn Field<T>, y: &Scalar<T>) -> Result<T> {
        if Relation::Horizontal(self.clone()).holds(field)? {
            return Err(Error::state("horizontal line is not a function of y"));
        }
        let d = self.direction();
        let inv_slope = &d.coords()[0] / &d.coords()[1];
        field.actual(&(self.a.x() + &(&inv_slope * &(y - self.a.y()))))
    }
}

impl<T: Element> fmt::Display for Line<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line[{} -> {}]", self.a, self.b)
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct Segment<T: Element> {
    a: Point<T>,
    b: Point<T>,
}

impl<T: Element> Segment<T> {
    pub fn new(a: Point<T>, b: Point<T>) -> Self {
        Self { a, b }
    }

    pub fn throwing(error: Error) -> Self {
        let p = Point::throwing(error);
        Self {
            a: p.clone(),
            b: p,
        }
    }

    #[inline]
    pub fn a(&self) -> &Point<T> {
        &self.a
    }

    #[inline]
    pub fn b(&self) -> &Point<T> {
        &self.b
    }

    pub fn line(&self) -> Line<T> {
        Line::through(self.a.clone(), self.b.clone())
    }

    pub fn length_squared(&self) -> Scalar<T> {
        self.a.to(&self.b).norm_squared()
    }

    /// Euclidean length (metric fields only).
    pub fn length(&self) -> Scalar<T> {
        self.a.to(&self.b).norm()
    }

    pub fn midpoint(&self) -> Point<T> {
        let half = Scalar::inverse(two::<T>());
        Point::new(
            &(self.a.x() + self.b.x()) * &half,
            &(self.a.y() + self.b.y()) * &half,
        )
    }

    /// `a + t·(b - a)`; inside the segment for `t ∈ [0, 1]`.
    pub fn point_at(&self, t: &Scalar<T>) -> Point<T> {
        self.line().point_at(t)
    }
}

impl<T: Element> fmt::Display for Segment<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "segment[{}, {}]", self.a, self.b)
    }
}

/// Circle given by its center, radius, and a point on it.
///
/// `radius_squared` is derived from `center` and `on` without a square root,
/// so membership stays algebraic even on fields without a metric.
#[derive(Clone, PartialEq, Debug)]
pub struct Circle<T: Element> {
    center: Point<T>,
    radius: Scalar<T>,
    on: Point<T>,
}

impl<T: Element> Circle<T> {
    pub fn new(center: Point<T>, radius: Scalar<T>) -> Self {
        let on = Point::new(center.x() + &radius, center.y().clone());
        Self { center, radius, on }
    }

    /// Circle centered at `center` passing through `point`.
    pub fn through(center: Point<T>, point: Point<T>) -> Self {
        let radius = center.to(&point).norm();
        Self {
            center,
            radius,
            on: point,
        }
    }

    pub fn throwing(error: Error) -> Self {
        let p = Point::throwing(error.clone());
        Self {
            center: p.clone(),
            radius: Scalar::throwing(error),
            on: p,
        }
    }

    #[inline]
    pub fn center(&self) -> &Point<T> {
        &self.center
    }

    #[inline]
    pub fn radius(&self) -> &Scalar<T> {
        &self.radius
    }

    /// A point known to lie on the circle.
    #[inline]
    pub fn on(&self) -> &Point<T> {
        &self.on
    }

    pub fn radius_squared(&self) -> Scalar<T> {
        self.center.to(&self.on).norm_squared()
    }
}

impl<T: Element> fmt::Display for Circle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "circle[{}, r={}]", self.center, self.radius)
    }
}
