//! Lines × columns grids of scalar expressions.
//!
//! Indexing is 0-based for lines, columns and coordinates alike.
//! `transpose` is a view: it flips a flag and shares the entry storage.

use std::fmt;
use std::sync::Arc;

use nalgebra::DMatrix;

use super::vect::Vect;
use crate::error::{Error, Result};
use crate::field::{Element, Field};
use crate::scalar::Scalar;

#[derive(Clone)]
pub struct Matrix<T: Element> {
    /// Row-major storage of the untransposed shape `rows × cols`.
    entries: Arc<[Scalar<T>]>,
    rows: usize,
    cols: usize,
    transposed: bool,
}

impl<T: Element> Matrix<T> {
    /// Build from lines; all lines must share one length.
    pub fn new(lines: Vec<Vect<T>>) -> Result<Self> {
        let cols = lines.first().map_or(0, Vect::len);
        if let Some(bad) = lines.iter().find(|l| l.len() != cols) {
            return Err(Error::dimension(cols, bad.len()));
        }
        let rows = lines.len();
        let entries: Vec<Scalar<T>> = lines
            .iter()
            .flat_map(|l| l.coords().iter().cloned())
            .collect();
        Ok(Self {
            entries: entries.into(),
            rows,
            cols,
            transposed: false,
        })
    }

    /// Row-major leaf values.
    pub fn from_values(lines: usize, columns: usize, values: Vec<T>) -> Result<Self> {
        if values.len() != lines * columns {
            return Err(Error::dimension(lines * columns, values.len()));
        }
        Ok(Self {
            entries: values.into_iter().map(Scalar::leaf).collect::<Vec<_>>().into(),
            rows: lines,
            cols: columns,
            transposed: false,
        })
    }

    pub fn from_fn(
        lines: usize,
        columns: usize,
        mut f: impl FnMut(usize, usize) -> Scalar<T>,
    ) -> Self {
        let mut entries = Vec::with_capacity(lines * columns);
        for i in 0..lines {
            for j in 0..columns {
                entries.push(f(i, j));
            }
        }
        Self {
            entries: entries.into(),
            rows: lines,
            cols: columns,
            transposed: false,
        }
    }

    pub fn identity(n: usize) -> Self {
        Self::from_fn(n, n, |i, j| if i == j { Scalar::one() } else { Scalar::zero() })
    }

    /// Planar rotation `[[c, -s], [s, c]]`.
    pub fn rotation(cos: Scalar<T>, sin: Scalar<T>) -> Self {
        Self::from_fn(2, 2, |i, j| match (i, j) {
            (0, 0) | (1, 1) => cos.clone(),
            (0, 1) => -&sin,
            _ => sin.clone(),
        })
    }

    #[inline]
    pub fn lines(&self) -> usize {
        if self.transposed {
            self.cols
        } else {
            self.rows
        }
    }

    #[inline]
    pub fn columns(&self) -> usize {
        if self.transposed {
            self.rows
        } else {
            self.cols
        }
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.lines(), self.columns())
    }

    #[inline]
    pub fn is_transposed(&self) -> bool {
        self.transposed
    }

    #[inline]
    fn at(&self, i: usize, j: usize) -> &Scalar<T> {
        let (r, c) = if self.transposed { (j, i) } else { (i, j) };
        &self.entries[r * self.cols + c]
    }

    pub fn get(&self, i: usize, j: usize) -> Result<&Scalar<T>> {
        if i >= self.lines() || j >= self.columns() {
            return Err(Error::argument(format!(
                "entry ({i}, {j}) out of range for {}x{} matrix",
                self.lines(),
                self.columns()
            )));
        }
        Ok(self.at(i, j))
    }

    pub fn line(&self, i: usize) -> Result<Vect<T>> {
        if i >= self.lines() {
            return Err(Error::argument(format!(
                "line {i} out of range for {} lines",
                self.lines()
            )));
        }
        Ok(Vect::new(
            (0..self.columns()).map(|j| self.at(i, j).clone()).collect(),
        ))
    }

    pub fn column(&self, j: usize) -> Result<Vect<T>> {
        if j >= self.columns() {
            return Err(Error::argument(format!(
                "column {j} out of range for {} columns",
                self.columns()
            )));
        }
        Ok(Vect::new(
            (0..self.lines()).map(|i| self.at(i, j).clone()).collect(),
        ))
    }

    /// `M v`: the i-th coordinate is the dot product of `v` with line i.
    pub fn apply(&self, v: &Vect<T>) -> Result<Vect<T>> {
        if v.len() != self.columns() {
            return Err(Error::dimension(self.columns(), v.len()));
        }
        let out = (0..self.lines())
            .map(|i| self.line(i).and_then(|l| l.dot(v)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Vect::new(out))
    }

    /// Lazy transpose sharing storage with `self`.
    pub fn transpose(&self) -> Matrix<T> {
        Matrix {
            entries: Arc::clone(&self.entries),
            rows: self.rows,
            cols: self.cols,
            transposed: !self.transposed,
        }
    }

    fn same_shape_all(ms: &[Matrix<T>]) -> Result<(usize, usize)> {
        let first = ms.first().ok_or_else(|| Error::argument("no operand matrices"))?;
        let shape = first.shape();
        for m in &ms[1..] {
            if m.shape() != shape {
                return Err(Error::argument(format!(
                    "shape mismatch: {}x{} vs {}x{}",
                    shape.0,
                    shape.1,
                    m.lines(),
                    m.columns()
                )));
            }
        }
        Ok(shape)
    }

    fn entrywise(
        ms: &[Matrix<T>],
        f: impl Fn(Vec<Scalar<T>>) -> Scalar<T>,
    ) -> Result<Matrix<T>> {
        let (lines, columns) = Self::same_shape_all(ms)?;
        Ok(Self::from_fn(lines, columns, |i, j| {
            f(ms.iter().map(|m| m.at(i, j).clone()).collect())
        }))
    }

    /// Entrywise `Add` over all operands.
    pub fn sum(ms: &[Matrix<T>]) -> Result<Matrix<T>> {
        Self::entrywise(ms, |ops| Scalar::sum(ops))
    }

    /// Entrywise `Mult` over all operands.
    pub fn times(ms: &[Matrix<T>]) -> Result<Matrix<T>> {
        Self::entrywise(ms, |ops| Scalar::product(ops))
    }

    pub fn minus(&self, other: &Matrix<T>) -> Result<Matrix<T>> {
        Self::same_shape_all(&[self.clone(), other.clone()])?;
        Ok(Self::from_fn(self.lines(), self.columns(), |i, j| {
            self.at(i, j) - other.at(i, j)
        }))
    }

    pub fn scale(&self, k: &Scalar<T>) -> Matrix<T> {
        Self::from_fn(self.lines(), self.columns(), |i, j| k * self.at(i, j))
    }

    /// Matrix product `self · other`.
    pub fn compose(&self, other: &Matrix<T>) -> Result<Matrix<T>> {
        if self.columns() != other.lines() {
            return Err(Error::dimension(self.columns(), other.lines()));
        }
        let mut entries = Vec::with_capacity(self.lines() * other.columns());
        for i in 0..self.lines() {
            let line = self.line(i)?;
            for j in 0..other.columns() {
                entries.push(line.dot(&other.column(j)?)?);
            }
        }
        Ok(Self {
            entries: entries.into(),
            rows: self.lines(),
            cols: other.columns(),
            transposed: false,
        })
    }

    /// Resolve all entries, line by line.
    pub fn actual(&self, field: &dyn Field<T>) -> Result<Vec<Vec<T>>> {
        (0..self.lines())
            .map(|i| self.line(i).and_then(|l| l.actual(field)))
            .collect()
    }

    /// Resolve into a dense nalgebra matrix.
    pub fn to_dmatrix(&self, field: &dyn Field<T>) -> Result<DMatrix<T>> {
        let flat: Vec<T> = self.actual(field)?.into_iter().flatten().collect();
        Ok(DMatrix::from_row_slice(self.lines(), self.columns(), &flat))
    }
}

impl<T: Element> PartialEq for Matrix<T> {
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape()
            && (0..self.lines())
                .all(|i| (0..self.columns()).all(|j| self.at(i, j) == other.at(i, j)))
    }
}

impl<T: Element> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for i in 0..self.lines() {
            if i > 0 {
                f.write_str("; ")?;
            }
            for j in 0..self.columns() {
                if j > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", self.at(i, j))?;
            }
        }
        f.write_str("]")
    }
}

impl<T: Element> fmt::Debug for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Matrix{}x{}{self}", self.lines(), self.columns())
    }
}
