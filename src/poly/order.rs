//! Term orders: total orders on monomials that determine the leading term of a polynomial.
//!
//! Orders are values rather than marker types, so that orders with data such as
//! [WeightedOrder] and [BlockOrder] can be stored in the polynomial ring.
//! All orders compare exponent slices of equal length.

use std::cmp::Ordering::{self, Equal};
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

use super::Exponent;

/// A well-order of monomials.
pub trait MonomialOrder: Clone + PartialEq + Eq + Hash + Debug + Send + Sync {
    fn cmp<E: Exponent>(&self, a: &[E], b: &[E]) -> Ordering;
}

#[inline]
fn degree<E: Exponent>(a: &[E]) -> u64 {
    a.iter().map(|x| x.to_u64()).sum()
}

/// Lexicographic ordering of monomials: the first variable is the most significant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LexOrder;

impl MonomialOrder for LexOrder {
    #[inline]
    fn cmp<E: Exponent>(&self, a: &[E], b: &[E]) -> Ordering {
        a.cmp(b)
    }
}

/// Inverse lexicographic ordering of monomials: the last variable is the most significant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct InvLexOrder;

impl MonomialOrder for InvLexOrder {
    #[inline]
    fn cmp<E: Exponent>(&self, a: &[E], b: &[E]) -> Ordering {
        a.iter().rev().cmp(b.iter().rev())
    }
}

/// Graded lexicographic ordering: the total degree first, ties broken lexicographically.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct GradedLexOrder;

impl MonomialOrder for GradedLexOrder {
    #[inline]
    fn cmp<E: Exponent>(&self, a: &[E], b: &[E]) -> Ordering {
        degree(a).cmp(&degree(b)).then_with(|| a.cmp(b))
    }
}

/// Graded inverse lexicographic ordering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct InvGradedLexOrder;

impl MonomialOrder for InvGradedLexOrder {
    #[inline]
    fn cmp<E: Exponent>(&self, a: &[E], b: &[E]) -> Ordering {
        degree(a)
            .cmp(&degree(b))
            .then_with(|| a.iter().rev().cmp(b.iter().rev()))
    }
}

/// Graded reverse lexicographic ordering of monomials.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct GrevLexOrder;

impl MonomialOrder for GrevLexOrder {
    #[inline]
    fn cmp<E: Exponent>(&self, a: &[E], b: &[E]) -> Ordering {
        match degree(a).cmp(&degree(b)) {
            Equal => {}
            x => {
                return x;
            }
        }

        for (a1, a2) in a.iter().rev().zip(b.iter().rev()) {
            match a1.cmp(a2) {
                Equal => {}
                x => {
                    return x.reverse();
                }
            }
        }

        Equal
    }
}

/// Order by a weighted degree, ties broken lexicographically.
/// Every weight must be positive for the order to be a well-order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct WeightedOrder {
    weights: Arc<[u64]>,
}

impl WeightedOrder {
    /// Create a weighted order. Zero weights are replaced by `1`.
    pub fn new(weights: &[u64]) -> WeightedOrder {
        WeightedOrder {
            weights: weights.iter().map(|w| (*w).max(1)).collect(),
        }
    }

    pub fn weights(&self) -> &[u64] {
        &self.weights
    }

    fn weighted_degree<E: Exponent>(&self, a: &[E]) -> u64 {
        a.iter()
            .zip(self.weights.iter().chain(std::iter::repeat(&1)))
            .map(|(e, w)| e.to_u64() * w)
            .sum()
    }
}

impl MonomialOrder for WeightedOrder {
    #[inline]
    fn cmp<E: Exponent>(&self, a: &[E], b: &[E]) -> Ordering {
        self.weighted_degree(a)
            .cmp(&self.weighted_degree(b))
            .then_with(|| a.cmp(b))
    }
}

/// A product order: the variables before `split` are compared with the first order,
/// and only on a tie are the remaining variables compared with the second order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BlockOrder<O1: MonomialOrder, O2: MonomialOrder> {
    split: usize,
    first: O1,
    second: O2,
}

impl<O1: MonomialOrder, O2: MonomialOrder> BlockOrder<O1, O2> {
    pub fn new(split: usize, first: O1, second: O2) -> Self {
        BlockOrder {
            split,
            first,
            second,
        }
    }

    pub fn split(&self) -> usize {
        self.split
    }
}

impl<O1: MonomialOrder, O2: MonomialOrder> MonomialOrder for BlockOrder<O1, O2> {
    #[inline]
    fn cmp<E: Exponent>(&self, a: &[E], b: &[E]) -> Ordering {
        let s = self.split.min(a.len());
        self.first
            .cmp(&a[..s], &b[..s])
            .then_with(|| self.second.cmp(&a[s..], &b[s..]))
    }
}

#[cfg(test)]
mod test {
    use std::cmp::Ordering;

    use super::{
        BlockOrder, GradedLexOrder, GrevLexOrder, InvGradedLexOrder, InvLexOrder, LexOrder,
        MonomialOrder, WeightedOrder,
    };

    // x*z^2 versus y^2 in the variables (x,y,z)
    const A: [u8; 3] = [1, 0, 2];
    const B: [u8; 3] = [0, 2, 0];

    #[test]
    fn lexicographic() {
        assert_eq!(LexOrder.cmp(&A, &B), Ordering::Greater);
        assert_eq!(InvLexOrder.cmp(&A, &B), Ordering::Greater);
        assert_eq!(InvLexOrder.cmp(&[2u8, 1, 0], &[0, 0, 1]), Ordering::Less);
    }

    #[test]
    fn graded() {
        assert_eq!(GradedLexOrder.cmp(&A, &B), Ordering::Greater);
        assert_eq!(GradedLexOrder.cmp(&[0u8, 0, 3], &[1, 1, 0]), Ordering::Greater);
        // x*z^2 versus y^2*z: the higher power of the last variable is smaller under grevlex
        assert_eq!(GrevLexOrder.cmp(&[1u8, 0, 2], &[0, 2, 1]), Ordering::Less);
        assert_eq!(GradedLexOrder.cmp(&[1u8, 0, 2], &[0, 2, 1]), Ordering::Greater);
        assert_eq!(GradedLexOrder.cmp(&[1u8, 1, 1], &[2, 0, 1]), Ordering::Less);
        assert_eq!(InvGradedLexOrder.cmp(&[1u8, 1, 1], &[2, 0, 1]), Ordering::Greater);
    }

    #[test]
    fn weighted() {
        let o = WeightedOrder::new(&[1, 3, 1]);
        assert_eq!(o.cmp(&A, &B), Ordering::Less);
        assert_eq!(o.cmp(&A, &A), Ordering::Equal);
        assert_eq!(o.weights(), &[1, 3, 1]);
    }

    #[test]
    fn block() {
        let o = BlockOrder::new(1, LexOrder, GrevLexOrder);
        assert_eq!(o.cmp(&A, &B), Ordering::Greater);
        assert_eq!(o.cmp(&[0u8, 1, 2], &[0, 2, 0]), Ordering::Greater);
        assert_eq!(o.split(), 1);
    }
}
