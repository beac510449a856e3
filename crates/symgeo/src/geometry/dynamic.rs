//! Dynamic objects: re-derived from their dependencies, memoized until invalid.
//!
//! Model
//! - Each object keeps the last generated coordinate values behind a `Mutex`
//!   and a probe derived from its constraint ("still on this line?").
//! - On read the probe runs against the current state of the dependencies.
//!   Only a failing probe (or an empty cache) triggers a fresh draw through the
//!   matching fixed construction; a draw is accepted once it passes the probe,
//!   bounded by `REGEN_ATTEMPTS`.
//! - Objects hand out `Live` scalars, so anything composed from them reads
//!   through this cache on every evaluation.
//!
//! Concurrency
//! - Reads may regenerate, so two threads reading the same object can observe
//!   different values. The lock only keeps the cache itself consistent.

use std::cmp::Ordering;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::trace;

use super::cfg::REGEN_ATTEMPTS;
use super::construct;
use super::relation::Relation;
use super::types::{Circle, Line, Point, Segment};
use crate::error::{Error, Result};
use crate::field::{Element, Field};
use crate::linalg::Vect;
use crate::scalar::{LiveSource, Scalar};

/// Last accepted coordinate values of one dynamic object.
struct Cache<T: Element> {
    label: String,
    last: Mutex<Option<Vec<T>>>,
}

impl<T: Element> Cache<T> {
    fn new(label: String) -> Self {
        Self {
            label,
            last: Mutex::new(None),
        }
    }

    fn peek(&self) -> Option<Vec<T>> {
        self.last
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn store(&self, values: Option<Vec<T>>) {
        *self.last.lock().unwrap_or_else(PoisonError::into_inner) = values;
    }

    /// Cached values if `probe` accepts them, otherwise a fresh accepted draw.
    ///
    /// The lock is not held while probing or generating: both evaluate
    /// dependencies, which may be dynamic objects themselves.
    fn get_or_regen(
        &self,
        probe: impl Fn(&[T]) -> Result<bool>,
        generate: impl Fn() -> Result<Vec<T>>,
    ) -> Result<Vec<T>> {
        if let Some(values) = self.peek() {
            if probe(&values)? {
                return Ok(values);
            }
            trace!(object = %self.label, "probe failed");
        }
        for attempt in 1..=REGEN_ATTEMPTS {
            let values = generate()?;
            if probe(&values)? {
                trace!(object = %self.label, attempt, "regenerated");
                self.store(Some(values.clone()));
                return Ok(values);
            }
        }
        Err(Error::state(format!(
            "`{}`: no valid sample after {REGEN_ATTEMPTS} attempts",
            self.label
        )))
    }
}

/// Where a dynamic point is allowed to live.
#[derive(Clone, Debug)]
pub enum Constraint<T: Element> {
    Free,
    InLine(Line<T>),
    OutsideLine(Line<T>),
    InSegment(Segment<T>),
    InCircle(Circle<T>),
    InsideCircle(Circle<T>),
    OutsideCircle(Circle<T>),
}

impl<T: Element> Constraint<T> {
    fn generate(&self, field: &dyn Field<T>) -> Point<T> {
        match self {
            Constraint::Free => construct::free_point(field),
            Constraint::InLine(l) => construct::point_in_line(field, l),
            Constraint::OutsideLine(l) => construct::point_outside_line(field, l),
            Constraint::InSegment(s) => construct::point_in_segment(field, s),
            Constraint::InCircle(c) => construct::point_in_circle(field, c),
            Constraint::InsideCircle(c) => construct::point_inside_circle(field, c),
            Constraint::OutsideCircle(c) => construct::point_outside_circle(field, c),
        }
    }

    /// Whether `p` currently satisfies the constraint.
    pub fn admits(&self, field: &dyn Field<T>, p: &Point<T>) -> Result<bool> {
        match self {
            Constraint::Free => Ok(true),
            Constraint::InLine(l) => Relation::PointInLine(p.clone(), l.clone()).holds(field),
            Constraint::OutsideLine(l) => {
                Ok(!Relation::PointInLine(p.clone(), l.clone()).holds(field)?)
            }
            Constraint::InSegment(s) => Relation::PointInSegment(p.clone(), s.clone()).holds(field),
            Constraint::InCircle(c) => Relation::PointInCircle(p.clone(), c.clone()).holds(field),
            Constraint::InsideCircle(c) => {
                Ok(radial_order(field, p, c)? == Some(Ordering::Less))
            }
            Constraint::OutsideCircle(c) => {
                Ok(radial_order(field, p, c)? == Some(Ordering::Greater))
            }
        }
    }
}

/// Squared distance of `p` to the center, compared with the squared radius.
fn radial_order<T: Element>(
    field: &dyn Field<T>,
    p: &Point<T>,
    c: &Circle<T>,
) -> Result<Option<Ordering>> {
    let ord = field.require_ordered()?;
    let d2 = field.actual(&c.center().to(p).norm_squared())?;
    let r2 = field.actual(&c.radius_squared())?;
    Ok(ord.compare(&d2, &r2))
}

fn leaf_point<T: Element>(values: &[T]) -> Point<T> {
    Point::new(
        Scalar::leaf(values[0].clone()),
        Scalar::leaf(values[1].clone()),
    )
}

struct PointState<T: Element> {
    constraint: Constraint<T>,
    cache: Cache<T>,
}

impl<T: Element> LiveSource<T> for PointState<T> {
    fn label(&self) -> &str {
        &self.cache.label
    }

    fn dimension(&self) -> usize {
        2
    }

    fn current(&self, field: &dyn Field<T>) -> Result<Vec<T>> {
        self.cache.get_or_regen(
            |v| self.constraint.admits(field, &leaf_point(v)),
            || self.constraint.generate(field).as_vect().actual(field),
        )
    }
}

/// Point that stays on its constraint while its dependencies move.
///
/// Clones share the cache.
#[derive(Clone)]
pub struct DynamicPoint<T: Element> {
    state: Arc<PointState<T>>,
}

impl<T: Element> DynamicPoint<T> {
    pub fn new(label: impl Into<String>, constraint: Constraint<T>) -> Self {
        Self {
            state: Arc::new(PointState {
                constraint,
                cache: Cache::new(label.into()),
            }),
        }
    }

    pub fn free(label: impl Into<String>) -> Self {
        Self::new(label, Constraint::Free)
    }

    pub fn in_line(label: impl Into<String>, line: Line<T>) -> Self {
        Self::new(label, Constraint::InLine(line))
    }

    pub fn outside_line(label: impl Into<String>, line: Line<T>) -> Self {
        Self::new(label, Constraint::OutsideLine(line))
    }

    pub fn in_segment(label: impl Into<String>, segment: Segment<T>) -> Self {
        Self::new(label, Constraint::InSegment(segment))
    }

    pub fn in_circle(label: impl Into<String>, circle: Circle<T>) -> Self {
        Self::new(label, Constraint::InCircle(circle))
    }

    pub fn inside_circle(label: impl Into<String>, circle: Circle<T>) -> Self {
        Self::new(label, Constraint::InsideCircle(circle))
    }

    pub fn outside_circle(label: impl Into<String>, circle: Circle<T>) -> Self {
        Self::new(label, Constraint::OutsideCircle(circle))
    }

    pub fn label(&self) -> &str {
        &self.state.cache.label
    }

    pub fn constraint(&self) -> &Constraint<T> {
        &self.state.constraint
    }

    /// Point with `Live` coordinates reading through the cache.
    pub fn point(&self) -> Point<T> {
        let source: Arc<dyn LiveSource<T>> = self.state.clone();
        Point::new(
            Scalar::live(Arc::clone(&source), 0),
            Scalar::live(source, 1),
        )
    }

    /// Coordinates as a `Vect` of `Live` scalars.
    pub fn coords(&self) -> Vect<T> {
        self.point().as_vect().clone()
    }

    /// Current values, regenerating if the cache no longer fits.
    pub fn position(&self, field: &dyn Field<T>) -> Result<(T, T)> {
        let v = self.state.current(field)?;
        Ok((v[0].clone(), v[1].clone()))
    }

    /// Last accepted values, without probing.
    pub fn cached(&self) -> Option<(T, T)> {
        self.state
            .cache
            .peek()
            .map(|v| (v[0].clone(), v[1].clone()))
    }

    /// Drop the cache; the next read draws again.
    pub fn invalidate(&self) {
        self.state.cache.store(None);
    }

    /// Force a fresh draw now.
    pub fn resample(&self, field: &dyn Field<T>) -> Result<(T, T)> {
        self.invalidate();
        self.position(field)
    }
}

impl<T: Element> fmt::Debug for DynamicPoint<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicPoint")
            .field("label", &self.label())
            .field("constraint", &self.state.constraint)
            .field("cached", &self.cached())
            .finish()
    }
}

struct LineState<T: Element> {
    anchor: Point<T>,
    cache: Cache<T>,
}

impl<T: Element> LineState<T> {
    fn distinct(&self, field: &dyn Field<T>, values: &[T]) -> Result<bool> {
        Ok(!Relation::SamePoint(self.anchor.clone(), leaf_point(values)).holds(field)?)
    }
}

impl<T: Element> LiveSource<T> for LineState<T> {
    fn label(&self) -> &str {
        &self.cache.label
    }

    fn dimension(&self) -> usize {
        2
    }

    /// Coordinates of the second defining point.
    fn current(&self, field: &dyn Field<T>) -> Result<Vec<T>> {
        self.cache.get_or_regen(
            |v| self.distinct(field, v),
            || {
                construct::line_through(field, &self.anchor)
                    .b()
                    .as_vect()
                    .actual(field)
            },
        )
    }
}

/// Line through a given point whose second defining point is dynamic.
#[derive(Clone)]
pub struct DynamicLine<T: Element> {
    state: Arc<LineState<T>>,
}

impl<T: Element> DynamicLine<T> {
    pub fn through(label: impl Into<String>, point: Point<T>) -> Self {
        Self {
            state: Arc::new(LineState {
                anchor: point,
                cache: Cache::new(label.into()),
            }),
        }
    }

    pub fn label(&self) -> &str {
        &self.state.cache.label
    }

    /// Line from the given point to the live second point.
    pub fn line(&self) -> Line<T> {
        let source: Arc<dyn LiveSource<T>> = self.state.clone();
        let b = Point::new(
            Scalar::live(Arc::clone(&source), 0),
            Scalar::live(source, 1),
        );
        Line::through(self.state.anchor.clone(), b)
    }

    pub fn invalidate(&self) {
        self.state.cache.store(None);
    }

    /// Force a fresh second point now.
    pub fn resample(&self, field: &dyn Field<T>) -> Result<Line<T>> {
        self.invalidate();
        self.state.current(field)?;
        Ok(self.line())
    }
}

impl<T: Element> fmt::Debug for DynamicLine<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicLine")
            .field("label", &self.label())
            .field("through", &self.state.anchor)
            .finish()
    }
}
