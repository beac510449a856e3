//! Anchors: named, externally mutable free points.
//!
//! The only mutable objects in a construction. Everything built from
//! `Anchor::point()` reads the anchor's coordinates through `Live` scalars, so a
//! `set` is visible on the next evaluation without rebuilding anything.

use std::sync::{Arc, PoisonError, RwLock};

use super::types::Point;
use crate::error::Result;
use crate::field::{Element, Field};
use crate::linalg::Vect;
use crate::scalar::{LiveSource, Scalar};

struct AnchorState<T: Element> {
    name: String,
    coords: RwLock<Vect<T>>,
}

impl<T: Element> AnchorState<T> {
    fn snapshot(&self) -> Vect<T> {
        self.coords
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl<T: Element> LiveSource<T> for AnchorState<T> {
    fn label(&self) -> &str {
        &self.name
    }

    fn dimension(&self) -> usize {
        2
    }

    fn current(&self, field: &dyn Field<T>) -> Result<Vec<T>> {
        // Resolve outside the lock: coordinates may themselves read other anchors.
        self.snapshot().actual(field)
    }
}

/// Named mutable point. Clones share state.
#[derive(Clone)]
pub struct Anchor<T: Element> {
    state: Arc<AnchorState<T>>,
}

impl<T: Element> Anchor<T> {
    pub fn new(name: impl Into<String>, x: T, y: T) -> Self {
        Self::from_point(name, Point::at(x, y))
    }

    /// Anchor initialised with arbitrary coordinate expressions.
    ///
    /// They are re-read on every evaluation until the first `set`.
    pub fn from_point(name: impl Into<String>, p: Point<T>) -> Self {
        Self {
            state: Arc::new(AnchorState {
                name: name.into(),
                coords: RwLock::new(p.as_vect().clone()),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.state.name
    }

    pub fn set(&self, x: T, y: T) {
        self.store(Vect::from_values([x, y]));
    }

    /// Move to the current value of `p`.
    ///
    /// `p` is resolved before it is stored, so it may read this anchor (for
    /// example a midpoint with another anchor) without creating a cycle.
    pub fn set_point(&self, field: &dyn Field<T>, p: &Point<T>) -> Result<()> {
        let (x, y) = p.actual(field)?;
        self.set(x, y);
        Ok(())
    }

    fn store(&self, coords: Vect<T>) {
        let mut guard = self
            .state
            .coords
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = coords;
    }

    /// Move by `(dx, dy)`, resolved against `field` at call time.
    pub fn translate(&self, field: &dyn Field<T>, dx: T, dy: T) -> Result<()> {
        let (x, y) = self.position(field)?;
        let add = field.addition();
        self.set(add.add(&x, &dx), add.add(&y, &dy));
        Ok(())
    }

    /// Current coordinates as plain values.
    pub fn position(&self, field: &dyn Field<T>) -> Result<(T, T)> {
        let v = self.state.current(field)?;
        Ok((v[0].clone(), v[1].clone()))
    }

    /// Point whose coordinates track this anchor.
    pub fn point(&self) -> Point<T> {
        let source: Arc<dyn LiveSource<T>> = self.state.clone();
        Point::new(
            Scalar::live(Arc::clone(&source), 0),
            Scalar::live(source, 1),
        )
    }
}

impl<T: Element> std::fmt::Debug for Anchor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Anchor({} = {})", self.state.name, self.state.snapshot())
    }
}
