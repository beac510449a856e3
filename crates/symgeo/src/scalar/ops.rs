//! Operator sugar: `a + b`, `a - b`, `a * b`, `a / b`, `-a` build binary nodes.

use std::ops::{Add, Div, Mul, Neg, Sub};

use super::node::Scalar;
use crate::field::Element;

fn add_pair<T: Element>(a: Scalar<T>, b: Scalar<T>) -> Scalar<T> {
    Scalar::sum([a, b])
}

fn mul_pair<T: Element>(a: Scalar<T>, b: Scalar<T>) -> Scalar<T> {
    Scalar::product([a, b])
}

macro_rules! binop {
    ($tr:ident, $method:ident, $ctor:path) => {
        impl<T: Element> $tr for Scalar<T> {
            type Output = Scalar<T>;
            #[inline]
            fn $method(self, rhs: Scalar<T>) -> Scalar<T> {
                $ctor(self, rhs)
            }
        }
        impl<T: Element> $tr<&Scalar<T>> for &Scalar<T> {
            type Output = Scalar<T>;
            #[inline]
            fn $method(self, rhs: &Scalar<T>) -> Scalar<T> {
                $ctor(self.clone(), rhs.clone())
            }
        }
    };
}

binop!(Add, add, add_pair);
binop!(Sub, sub, Scalar::diff);
binop!(Mul, mul, mul_pair);
binop!(Div, div, Scalar::division);

impl<T: Element> Neg for Scalar<T> {
    type Output = Scalar<T>;
    #[inline]
    fn neg(self) -> Scalar<T> {
        Scalar::opposite(self)
    }
}

impl<T: Element> Neg for &Scalar<T> {
    type Output = Scalar<T>;
    #[inline]
    fn neg(self) -> Scalar<T> {
        Scalar::opposite(self.clone())
    }
}
