//! Fixed constructions.
//!
//! Model
//! - Free parameters are drawn once (`random`, `other`, `between`, `greater`)
//!   and captured as leaves, so the returned object is a stable function of
//!   its dependencies.
//! - Dependencies are not resolved: an object built on an `Anchor` follows the
//!   anchor when it moves.
//!
//! Failure policy
//! - Nothing here returns `Result`. Caller-supplied points that must satisfy a
//!   membership (`chord_through`, `tangent_at`, ...) are checked eagerly; on a
//!   violation the object gets `Throwing` coordinates and the error surfaces on
//!   evaluation. A parameter that cannot be drawn (no ordering on the field) is
//!   captured as a `Throwing` scalar the same way.

use tracing::debug;

use super::cfg::REGEN_ATTEMPTS;
use super::relation::{cross, dot, Relation};
use super::types::{Circle, Line, Point, Segment};
use crate::error::Error;
use crate::field::{Element, Field};
use crate::linalg::Vect;
use crate::scalar::Scalar;

/// Resolve `s` once and keep the value as a leaf.
fn capture<T: Element>(field: &dyn Field<T>, s: &Scalar<T>) -> Scalar<T> {
    match field.actual(s) {
        Ok(v) => Scalar::leaf(v),
        Err(e) => {
            debug!(field = field.name(), param = %s, error = %e, "parameter not drawable, deferring");
            Scalar::throwing(e)
        }
    }
}

/// `p + k·d`.
fn along<T: Element>(p: &Point<T>, k: &Scalar<T>, d: &Vect<T>) -> Point<T> {
    let d = d.coords();
    Point::new(p.x() + &(k * &d[0]), p.y() + &(k * &d[1]))
}

/// `p + d`.
fn shifted<T: Element>(p: &Point<T>, d: &Vect<T>) -> Point<T> {
    let d = d.coords();
    Point::new(p.x() + &d[0], p.y() + &d[1])
}

fn two<T: Element>() -> Scalar<T> {
    Scalar::sum([Scalar::one(), Scalar::one()])
}

/// Captured direction `(r, s)` with `s` never the additive identity.
fn nonzero_direction<T: Element>(field: &dyn Field<T>) -> Vect<T> {
    let x = capture(field, &field.random());
    let y = capture(field, &field.other(&Scalar::zero()));
    Vect::new(vec![x, y])
}

/// `None` when `relation` holds; otherwise the error to defer.
fn violation<T: Element>(field: &dyn Field<T>, relation: &Relation<T>) -> Option<Error> {
    match relation.holds(field) {
        Ok(true) => None,
        Ok(false) => Some(Error::state(format!("precondition violated: {relation}"))),
        Err(e) => Some(e),
    }
}

/// `Some(error)` when `relation` holds.
fn degeneracy<T: Element>(
    field: &dyn Field<T>,
    relation: Relation<T>,
    what: &str,
) -> Option<Error> {
    match relation.holds(field) {
        Ok(false) => None,
        Ok(true) => Some(Error::state(format!("{what}: {relation}"))),
        Err(e) => Some(e),
    }
}

fn downgraded(construction: &str, e: &Error) {
    debug!(construction, error = %e, "construction downgraded to throwing coordinates");
}

pub fn free_point<T: Element>(field: &dyn Field<T>) -> Point<T> {
    Point::new(
        capture(field, &field.random()),
        capture(field, &field.random()),
    )
}

/// A point of `line` at a random parameter.
pub fn point_in_line<T: Element>(field: &dyn Field<T>, line: &Line<T>) -> Point<T> {
    line.point_at(&capture(field, &field.random()))
}

/// A point off `line`: a point of the line pushed along the normal by a
/// non-zero amount.
pub fn point_outside_line<T: Element>(field: &dyn Field<T>, line: &Line<T>) -> Point<T> {
    let base = point_in_line(field, line);
    let u = capture(field, &field.other(&Scalar::zero()));
    along(&base, &u, &line.normal())
}

/// A point of `segment` at a parameter in `[0, 1]` (ordered fields only).
pub fn point_in_segment<T: Element>(field: &dyn Field<T>, segment: &Segment<T>) -> Point<T> {
    let t = capture(field, &Scalar::between(Scalar::zero(), Scalar::one()));
    segment.point_at(&t)
}

/// Reflect `q` across a random line through `center`; the image keeps the
/// distance to `center` without taking a square root.
fn reflect_about_center<T: Element>(
    field: &dyn Field<T>,
    center: &Point<T>,
    q: &Point<T>,
) -> Point<T> {
    let mut u = nonzero_direction(field);
    // Isotropic directions (u·u = 0) exist over some finite fields.
    for _ in 1..REGEN_ATTEMPTS {
        match field.actual(&dot(&u, &u)) {
            Ok(n) if !field.is_zero(&n) => break,
            Ok(_) => u = nonzero_direction(field),
            Err(_) => break,
        }
    }
    let w = center.to(q);
    let k = two::<T>() * (dot(&w, &u) / dot(&u, &u));
    Point::new(
        q.x() - &(&k * &u.coords()[0]),
        q.y() - &(&k * &u.coords()[1]),
    )
}

/// A point on `circle`.
pub fn point_in_circle<T: Element>(field: &dyn Field<T>, circle: &Circle<T>) -> Point<T> {
    reflect_about_center(field, circle.center(), circle.on())
}

/// `center + s·(p - center)` for a captured `s` and a fresh point `p` of the circle.
fn radial<T: Element>(field: &dyn Field<T>, circle: &Circle<T>, s: Scalar<T>) -> Point<T> {
    let p = point_in_circle(field, circle);
    along(circle.center(), &s, &circle.center().to(&p))
}

/// A point strictly inside `circle` (ordered fields only).
pub fn point_inside_circle<T: Element>(field: &dyn Field<T>, circle: &Circle<T>) -> Point<T> {
    let s = capture(field, &Scalar::inverse(Scalar::greater(Scalar::one())));
    radial(field, circle, s)
}

/// A point strictly outside `circle` (ordered fields only).
pub fn point_outside_circle<T: Element>(field: &dyn Field<T>, circle: &Circle<T>) -> Point<T> {
    let s = capture(field, &Scalar::greater(Scalar::one()));
    radial(field, circle, s)
}

/// A line through `point` with a random direction.
pub fn line_through<T: Element>(field: &dyn Field<T>, point: &Point<T>) -> Line<T> {
    let d = nonzero_direction(field);
    Line::through(point.clone(), shifted(point, &d))
}

pub fn parallel_through<T: Element>(line: &Line<T>, point: &Point<T>) -> Line<T> {
    Line::through(point.clone(), shifted(point, &line.direction()))
}

pub fn perpendicular_through<T: Element>(line: &Line<T>, point: &Point<T>) -> Line<T> {
    Line::through(point.clone(), shifted(point, &line.normal()))
}

pub fn vertical_through<T: Element>(point: &Point<T>) -> Line<T> {
    Line::through(point.clone(), Point::new(point.x().clone(), point.y() + &Scalar::one()))
}

pub fn horizontal_through<T: Element>(point: &Point<T>) -> Line<T> {
    Line::through(point.clone(), Point::new(point.x() + &Scalar::one(), point.y().clone()))
}

/// A segment of `line` with two distinct captured parameters.
pub fn segment_in_line<T: Element>(field: &dyn Field<T>, line: &Line<T>) -> Segment<T> {
    let t0 = capture(field, &field.random());
    let t1 = capture(field, &field.other(&t0));
    Segment::new(line.point_at(&t0), line.point_at(&t1))
}

/// A circle through `point` around a random center distinct from it.
pub fn circle_through<T: Element>(field: &dyn Field<T>, point: &Point<T>) -> Circle<T> {
    let center = shifted(point, &nonzero_direction(field));
    Circle::through(center, point.clone())
}

/// A circle around `center` with a random non-zero radius vector.
pub fn circle_centered_at<T: Element>(field: &dyn Field<T>, center: &Point<T>) -> Circle<T> {
    let on = shifted(center, &nonzero_direction(field));
    Circle::through(center.clone(), on)
}

/// Chord of `circle` with one end at `point`, which must lie on the circle.
pub fn chord_through<T: Element>(
    field: &dyn Field<T>,
    circle: &Circle<T>,
    point: &Point<T>,
) -> Segment<T> {
    if let Some(e) = violation(field, &Relation::PointInCircle(point.clone(), circle.clone())) {
        downgraded("chord_through", &e);
        return Segment::throwing(e);
    }
    let end = reflect_about_center(field, circle.center(), point);
    Segment::new(point.clone(), end)
}

/// Diameter of `circle` with one end at `point`, which must lie on the circle.
pub fn diameter_through<T: Element>(
    field: &dyn Field<T>,
    circle: &Circle<T>,
    point: &Point<T>,
) -> Segment<T> {
    if let Some(e) = violation(field, &Relation::PointInCircle(point.clone(), circle.clone())) {
        downgraded("diameter_through", &e);
        return Segment::throwing(e);
    }
    let c = circle.center();
    let end = Point::new(
        two::<T>() * c.x().clone() - point.x().clone(),
        two::<T>() * c.y().clone() - point.y().clone(),
    );
    Segment::new(point.clone(), end)
}

/// Tangent to `circle` at `point`, which must lie on the circle.
pub fn tangent_at<T: Element>(field: &dyn Field<T>, circle: &Circle<T>, point: &Point<T>) -> Line<T> {
    if let Some(e) = violation(field, &Relation::PointInCircle(point.clone(), circle.clone())) {
        downgraded("tangent_at", &e);
        return Line::throwing(e);
    }
    let radius = Line::through(circle.center().clone(), point.clone());
    perpendicular_through(&radius, point)
}

/// Orthogonal projection of `point` onto `line`.
pub fn foot_of_perpendicular<T: Element>(line: &Line<T>, point: &Point<T>) -> Point<T> {
    let d = line.direction();
    let k = dot(&line.a().to(point), &d) / dot(&d, &d);
    along(line.a(), &k, &d)
}

/// Mirror image of `point` across `line`.
pub fn reflection<T: Element>(line: &Line<T>, point: &Point<T>) -> Point<T> {
    let foot = foot_of_perpendicular(line, point);
    Point::new(
        two::<T>() * foot.x().clone() - point.x().clone(),
        two::<T>() * foot.y().clone() - point.y().clone(),
    )
}

pub fn midpoint<T: Element>(a: &Point<T>, b: &Point<T>) -> Point<T> {
    Segment::new(a.clone(), b.clone()).midpoint()
}

/// Common point of two lines; `Throwing` when they are parallel.
pub fn intersection<T: Element>(field: &dyn Field<T>, l1: &Line<T>, l2: &Line<T>) -> Point<T> {
    let parallel = Relation::Parallel(l1.clone(), l2.clone());
    if let Some(e) = degeneracy(field, parallel, "lines do not meet in one point") {
        downgraded("intersection", &e);
        return Point::throwing(e);
    }
    let (d1, d2) = (l1.direction(), l2.direction());
    let k = cross(&l1.a().to(l2.a()), &d2) / cross(&d1, &d2);
    along(l1.a(), &k, &d1)
}

/// Circumcircle of three points; `Throwing` when they are collinear.
pub fn circle_through_three<T: Element>(
    field: &dyn Field<T>,
    a: &Point<T>,
    b: &Point<T>,
    c: &Point<T>,
) -> Circle<T> {
    let collinear = Relation::Collinear(a.clone(), b.clone(), c.clone());
    if let Some(e) = degeneracy(field, collinear, "no circle through three points") {
        downgraded("circle_through_three", &e);
        return Circle::throwing(e);
    }
    let ab = Line::through(a.clone(), b.clone());
    let bc = Line::through(b.clone(), c.clone());
    let center = intersection(
        field,
        &perpendicular_through(&ab, &midpoint(a, b)),
        &perpendicular_through(&bc, &midpoint(b, c)),
    );
    Circle::through(center, a.clone())
}
