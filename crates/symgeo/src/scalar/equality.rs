//! Structural equality and hashing.
//!
//! - `Add`/`Mult` compare as bags: operand order is irrelevant, duplicate
//!   counts are not. Fingerprints of the operands are sorted so the bag hash is
//!   order-independent; matching walks equal-fingerprint runs and falls back
//!   to full `==` to stay correct under hash collisions.
//! - `Random` compares by construction token, `Live` by source identity.
//! - Every other composite compares positionally.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::node::{LiveSource, MetricOp, Node, Scalar};
use crate::field::Element;
use crate::linalg::Vect;

fn source_addr<T: Element>(source: &Arc<dyn LiveSource<T>>) -> usize {
    Arc::as_ptr(source) as *const () as usize
}

fn sorted_fingerprints<T: Element>(ops: &[Scalar<T>]) -> Vec<u64> {
    let mut fps: Vec<u64> = ops.iter().map(Scalar::fingerprint).collect();
    fps.sort_unstable();
    fps
}

fn hash_vect<T: Element, H: Hasher>(v: &Vect<T>, h: &mut H) {
    v.len().hash(h);
    for c in v.coords() {
        c.fingerprint().hash(h);
    }
}

pub(super) fn fingerprint_of<T: Element>(node: &Node<T>) -> u64 {
    let mut h = DefaultHasher::new();
    match node {
        Node::Leaf(v) => {
            0u8.hash(&mut h);
            v.hash_into(&mut h);
        }
        Node::Add(ops) => {
            1u8.hash(&mut h);
            sorted_fingerprints(ops).hash(&mut h);
        }
        Node::Mult(ops) => {
            2u8.hash(&mut h);
            sorted_fingerprints(ops).hash(&mut h);
        }
        Node::Diff(a, b) => (3u8, a.fingerprint(), b.fingerprint()).hash(&mut h),
        Node::Division(a, b) => (4u8, a.fingerprint(), b.fingerprint()).hash(&mut h),
        Node::AddInverse(x) => (5u8, x.fingerprint()).hash(&mut h),
        Node::MultInverse(x) => (6u8, x.fingerprint()).hash(&mut h),
        Node::AddIdentity => 7u8.hash(&mut h),
        Node::MultIdentity => 8u8.hash(&mut h),
        Node::Random(t) => (9u8, t.id()).hash(&mut h),
        Node::Different(x) => (10u8, x.fingerprint()).hash(&mut h),
        Node::Between(a, b) => (11u8, a.fingerprint(), b.fingerprint()).hash(&mut h),
        Node::Greater(x) => (12u8, x.fingerprint()).hash(&mut h),
        Node::Lower(x) => (13u8, x.fingerprint()).hash(&mut h),
        Node::Throwing(e) => {
            14u8.hash(&mut h);
            e.to_string().hash(&mut h);
        }
        Node::Metric(op) => {
            15u8.hash(&mut h);
            match op {
                MetricOp::Norm(v) => {
                    0u8.hash(&mut h);
                    hash_vect(v, &mut h);
                }
                MetricOp::Angle(a, b) => {
                    1u8.hash(&mut h);
                    hash_vect(a, &mut h);
                    hash_vect(b, &mut h);
                }
                MetricOp::SignedAngle(a, b) => {
                    2u8.hash(&mut h);
                    hash_vect(a, &mut h);
                    hash_vect(b, &mut h);
                }
            }
        }
        Node::Live { source, index } => (16u8, source_addr(source), *index).hash(&mut h),
    }
    h.finish()
}

/// Multiset equality over operand lists.
pub(crate) fn bag_eq<T: Element>(a: &[Scalar<T>], b: &[Scalar<T>]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut pool: Vec<&Scalar<T>> = b.iter().collect();
    pool.sort_unstable_by_key(|s| s.fingerprint());
    let mut used = vec![false; pool.len()];
    for x in a {
        let fp = x.fingerprint();
        let start = pool.partition_point(|s| s.fingerprint() < fp);
        let hit = (start..pool.len())
            .take_while(|&j| pool[j].fingerprint() == fp)
            .find(|&j| !used[j] && x == pool[j]);
        match hit {
            Some(j) => used[j] = true,
            None => return false,
        }
    }
    true
}

impl<T: Element> PartialEq for Scalar<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        if self.fingerprint() != other.fingerprint() {
            return false;
        }
        match (self.node(), other.node()) {
            (Node::Leaf(a), Node::Leaf(b)) => a == b,
            (Node::Add(a), Node::Add(b)) | (Node::Mult(a), Node::Mult(b)) => bag_eq(a, b),
            (Node::Diff(a1, b1), Node::Diff(a2, b2))
            | (Node::Division(a1, b1), Node::Division(a2, b2))
            | (Node::Between(a1, b1), Node::Between(a2, b2)) => a1 == a2 && b1 == b2,
            (Node::AddInverse(x), Node::AddInverse(y))
            | (Node::MultInverse(x), Node::MultInverse(y))
            | (Node::Different(x), Node::Different(y))
            | (Node::Greater(x), Node::Greater(y))
            | (Node::Lower(x), Node::Lower(y)) => x == y,
            (Node::AddIdentity, Node::AddIdentity) | (Node::MultIdentity, Node::MultIdentity) => {
                true
            }
            (Node::Random(t1), Node::Random(t2)) => t1 == t2,
            (Node::Throwing(e1), Node::Throwing(e2)) => e1 == e2,
            (Node::Metric(m1), Node::Metric(m2)) => m1 == m2,
            (
                Node::Live {
                    source: s1,
                    index: i1,
                },
                Node::Live {
                    source: s2,
                    index: i2,
                },
            ) => source_addr(s1) == source_addr(s2) && i1 == i2,
            _ => false,
        }
    }
}

// Reflexive through the `ptr_eq` shortcut, even for NaN leaves.
impl<T: Element> Eq for Scalar<T> {}

impl<T: Element> Hash for Scalar<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.fingerprint());
    }
}
