//! Expression nodes and their constructors.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::equality::fingerprint_of;
use crate::error::{Error, Result};
use crate::field::{Element, Field};
use crate::linalg::Vect;

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

/// Construction-time identity of a `Random` node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Token(u64);

impl Token {
    fn fresh() -> Self {
        Token(NEXT_TOKEN.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// A dependency whose coordinates are re-derived on every read.
///
/// Implemented by anchors (mutable free parameters) and by dynamic geometric
/// objects. `Live` scalars index into `current`.
pub trait LiveSource<T: Element>: Send + Sync {
    fn label(&self) -> &str;
    fn dimension(&self) -> usize;
    fn current(&self, field: &dyn Field<T>) -> Result<Vec<T>>;
}

/// Scalars resolved through the field's inner product.
#[derive(Clone, PartialEq)]
pub enum MetricOp<T: Element> {
    Norm(Vect<T>),
    Angle(Vect<T>, Vect<T>),
    SignedAngle(Vect<T>, Vect<T>),
}

pub enum Node<T: Element> {
    Leaf(T),
    /// Sum of a multiset of operands.
    Add(Vec<Scalar<T>>),
    /// Product of a multiset of operands.
    Mult(Vec<Scalar<T>>),
    Diff(Scalar<T>, Scalar<T>),
    Division(Scalar<T>, Scalar<T>),
    AddInverse(Scalar<T>),
    MultInverse(Scalar<T>),
    AddIdentity,
    MultIdentity,
    Random(Token),
    Different(Scalar<T>),
    Between(Scalar<T>, Scalar<T>),
    Greater(Scalar<T>),
    Lower(Scalar<T>),
    Throwing(Error),
    Metric(MetricOp<T>),
    Live {
        source: Arc<dyn LiveSource<T>>,
        index: usize,
    },
}

pub(super) struct Inner<T: Element> {
    pub(super) node: Node<T>,
    pub(super) fingerprint: u64,
}

/// Immutable, cheaply clonable expression over a field's element type.
///
/// Nothing is computed at construction time; [`Scalar::value`] walks the tree
/// against a concrete [`Field`]. Nodes that sample (`Random`, `Different`,
/// `Between`, `Greater`, `Lower`) yield a fresh value on every evaluation.
pub struct Scalar<T: Element>(pub(super) Arc<Inner<T>>);

impl<T: Element> Clone for Scalar<T> {
    fn clone(&self) -> Self {
        Scalar(Arc::clone(&self.0))
    }
}

impl<T: Element> Scalar<T> {
    fn from_node(node: Node<T>) -> Self {
        let fingerprint = fingerprint_of(&node);
        Scalar(Arc::new(Inner { node, fingerprint }))
    }

    #[inline]
    pub fn node(&self) -> &Node<T> {
        &self.0.node
    }

    /// Order-independent structural hash (identity-based for `Random`/`Live`).
    #[inline]
    pub fn fingerprint(&self) -> u64 {
        self.0.fingerprint
    }

    /// True when both handles point at the very same node.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn leaf(value: T) -> Self {
        Self::from_node(Node::Leaf(value))
    }

    /// Additive identity.
    pub fn zero() -> Self {
        Self::from_node(Node::AddIdentity)
    }

    /// Multiplicative identity.
    pub fn one() -> Self {
        Self::from_node(Node::MultIdentity)
    }

    /// Sum over a multiset of operands; the empty sum is the additive identity.
    pub fn sum(operands: impl IntoIterator<Item = Scalar<T>>) -> Self {
        Self::from_node(Node::Add(operands.into_iter().collect()))
    }

    /// Product over a multiset of operands; the empty product is the
    /// multiplicative identity.
    pub fn product(operands: impl IntoIterator<Item = Scalar<T>>) -> Self {
        Self::from_node(Node::Mult(operands.into_iter().collect()))
    }

    pub fn diff(minuend: Scalar<T>, subtrahend: Scalar<T>) -> Self {
        Self::from_node(Node::Diff(minuend, subtrahend))
    }

    pub fn division(dividend: Scalar<T>, divisor: Scalar<T>) -> Self {
        Self::from_node(Node::Division(dividend, divisor))
    }

    pub fn opposite(x: Scalar<T>) -> Self {
        Self::from_node(Node::AddInverse(x))
    }

    pub fn inverse(x: Scalar<T>) -> Self {
        Self::from_node(Node::MultInverse(x))
    }

    /// Fresh identity-unique sampling node.
    pub fn random() -> Self {
        Self::from_node(Node::Random(Token::fresh()))
    }

    pub fn different(other: &Scalar<T>) -> Self {
        Self::from_node(Node::Different(other.clone()))
    }

    pub fn between(lower: Scalar<T>, upper: Scalar<T>) -> Self {
        Self::from_node(Node::Between(lower, upper))
    }

    pub fn greater(lower: Scalar<T>) -> Self {
        Self::from_node(Node::Greater(lower))
    }

    pub fn lower(upper: Scalar<T>) -> Self {
        Self::from_node(Node::Lower(upper))
    }

    /// Holds `error` until someone evaluates this scalar.
    pub fn throwing(error: Error) -> Self {
        Self::from_node(Node::Throwing(error))
    }

    pub fn norm(v: Vect<T>) -> Self {
        Self::from_node(Node::Metric(MetricOp::Norm(v)))
    }

    pub fn angle(a: Vect<T>, b: Vect<T>) -> Self {
        Self::from_node(Node::Metric(MetricOp::Angle(a, b)))
    }

    pub fn signed_angle(a: Vect<T>, b: Vect<T>) -> Self {
        Self::from_node(Node::Metric(MetricOp::SignedAngle(a, b)))
    }

    pub fn live(source: Arc<dyn LiveSource<T>>, index: usize) -> Self {
        Self::from_node(Node::Live { source, index })
    }

    pub fn plus(&self, other: &Scalar<T>) -> Self {
        Self::sum([self.clone(), other.clone()])
    }

    pub fn minus(&self, other: &Scalar<T>) -> Self {
        Self::diff(self.clone(), other.clone())
    }

    pub fn times(&self, other: &Scalar<T>) -> Self {
        Self::product([self.clone(), other.clone()])
    }

    pub fn over(&self, other: &Scalar<T>) -> Self {
        Self::division(self.clone(), other.clone())
    }

    pub fn squared(&self) -> Self {
        Self::product([self.clone(), self.clone()])
    }

    #[inline]
    pub fn as_leaf(&self) -> Option<&T> {
        match self.node() {
            Node::Leaf(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn is_throwing(&self) -> bool {
        matches!(self.node(), Node::Throwing(_))
    }

    /// False if any node in the tree samples on evaluation.
    ///
    /// `Live` nodes count as deterministic: they read state, they do not draw.
    pub fn is_deterministic(&self) -> bool {
        match self.node() {
            Node::Random(_)
            | Node::Different(_)
            | Node::Between(..)
            | Node::Greater(_)
            | Node::Lower(_) => false,
            Node::Leaf(_)
            | Node::AddIdentity
            | Node::MultIdentity
            | Node::Throwing(_)
            | Node::Live { .. } => true,
            Node::Add(ops) | Node::Mult(ops) => ops.iter().all(Scalar::is_deterministic),
            Node::Diff(a, b) | Node::Division(a, b) => a.is_deterministic() && b.is_deterministic(),
            Node::AddInverse(x) | Node::MultInverse(x) => x.is_deterministic(),
            Node::Metric(op) => op.vects().iter().all(|v| v.is_deterministic()),
        }
    }

    /// Height of the expression tree (leaves count as 1).
    pub fn depth(&self) -> usize {
        let below = match self.node() {
            Node::Leaf(_)
            | Node::AddIdentity
            | Node::MultIdentity
            | Node::Random(_)
            | Node::Throwing(_)
            | Node::Live { .. } => 0,
            Node::Add(ops) | Node::Mult(ops) => ops.iter().map(Scalar::depth).max().unwrap_or(0),
            Node::Diff(a, b) | Node::Division(a, b) | Node::Between(a, b) => a.depth().max(b.depth()),
            Node::AddInverse(x)
            | Node::MultInverse(x)
            | Node::Different(x)
            | Node::Greater(x)
            | Node::Lower(x) => x.depth(),
            Node::Metric(op) => op
                .vects()
                .into_iter()
                .flat_map(|v| v.coords().iter().map(Scalar::depth))
                .max()
                .unwrap_or(0),
        };
        below + 1
    }
}

impl<T: Element> MetricOp<T> {
    pub fn vects(&self) -> Vec<&Vect<T>> {
        match self {
            MetricOp::Norm(v) => vec![v],
            MetricOp::Angle(a, b) | MetricOp::SignedAngle(a, b) => vec![a, b],
        }
    }
}

fn join<T: Element>(f: &mut fmt::Formatter<'_>, ops: &[Scalar<T>], sep: &str) -> fmt::Result {
    f.write_str("(")?;
    for (i, op) in ops.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{op}")?;
    }
    f.write_str(")")
}

impl<T: Element> fmt::Display for Scalar<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node() {
            Node::Leaf(v) => write!(f, "{v:?}"),
            Node::Add(ops) if ops.is_empty() => f.write_str("0"),
            Node::Mult(ops) if ops.is_empty() => f.write_str("1"),
            Node::Add(ops) => join(f, ops, " + "),
            Node::Mult(ops) => join(f, ops, " * "),
            Node::Diff(a, b) => write!(f, "({a} - {b})"),
            Node::Division(a, b) => write!(f, "({a} / {b})"),
            Node::AddInverse(x) => write!(f, "-{x}"),
            Node::MultInverse(x) => write!(f, "{x}^-1"),
            Node::AddIdentity => f.write_str("0"),
            Node::MultIdentity => f.write_str("1"),
            Node::Random(t) => write!(f, "rand#{}", t.id()),
            Node::Different(x) => write!(f, "other({x})"),
            Node::Between(a, b) => write!(f, "between({a}, {b})"),
            Node::Greater(x) => write!(f, "greater({x})"),
            Node::Lower(x) => write!(f, "lower({x})"),
            Node::Throwing(e) => write!(f, "throw({e})"),
            Node::Metric(MetricOp::Norm(v)) => write!(f, "|{v}|"),
            Node::Metric(MetricOp::Angle(a, b)) => write!(f, "angle({a}, {b})"),
            Node::Metric(MetricOp::SignedAngle(a, b)) => write!(f, "signed_angle({a}, {b})"),
            Node::Live { source, index } => write!(f, "{}[{index}]", source.label()),
        }
    }
}

impl<T: Element> fmt::Debug for Scalar<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scalar({self})")
    }
}

impl<T: Element> From<T> for Scalar<T> {
    fn from(value: T) -> Self {
        Scalar::leaf(value)
    }
}
