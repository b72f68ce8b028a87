//! Exponent vectors: the degrees of the variables of a single monomial.

use std::fmt::{Display, Formatter};
use std::ops::Deref;

use smallvec::SmallVec;

use crate::error::PolynomialError;

use super::{Exponent, INLINED_EXPONENTS};

/// An immutable list of per-variable exponents of a monomial.
///
/// Inside a polynomial the exponents of all terms are stored in one flat buffer;
/// this type is used at the boundary, for leading exponents and for moving
/// monomials between rings with different variable sets.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ExponentVector<E: Exponent>(SmallVec<[E; INLINED_EXPONENTS]>);

impl<E: Exponent> Deref for ExponentVector<E> {
    type Target = [E];

    fn deref(&self) -> &[E] {
        &self.0
    }
}

impl<E: Exponent> From<&[E]> for ExponentVector<E> {
    fn from(e: &[E]) -> Self {
        ExponentVector(SmallVec::from_slice(e))
    }
}

impl<E: Exponent> From<Vec<E>> for ExponentVector<E> {
    fn from(e: Vec<E>) -> Self {
        ExponentVector(SmallVec::from_vec(e))
    }
}

impl<E: Exponent> Display for ExponentVector<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("(")?;
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", e)?;
        }
        f.write_str(")")
    }
}

impl<E: Exponent> ExponentVector<E> {
    /// The exponent vector of the constant monomial in `nvars` variables.
    pub fn zero(nvars: usize) -> Self {
        ExponentVector(SmallVec::from_elem(E::zero(), nvars))
    }

    /// The exponent vector of `x_var^pow` in `nvars` variables.
    pub fn univariate(nvars: usize, var: usize, pow: E) -> Self {
        let mut e = Self::zero(nvars);
        e.0[var] = pow;
        e
    }

    pub fn as_slice(&self) -> &[E] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|e| e.is_zero())
    }

    pub fn total_degree(&self) -> u64 {
        self.0.iter().map(|e| e.to_u64()).sum()
    }

    /// The degree with respect to positive variable weights.
    pub fn weighted_degree(&self, weights: &[u64]) -> u64 {
        self.0
            .iter()
            .zip(weights)
            .map(|(e, w)| e.to_u64() * w)
            .sum()
    }

    /// The indices of the variables that occur with a non-zero exponent.
    pub fn dependency(&self) -> Vec<usize> {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(i, e)| if e.is_zero() { None } else { Some(i) })
            .collect()
    }

    fn check_arity(&self, other: &Self) -> Result<(), PolynomialError> {
        if self.len() != other.len() {
            Err(PolynomialError::ArityMismatch {
                expected: self.len(),
                found: other.len(),
            })
        } else {
            Ok(())
        }
    }

    /// The exponents of the product of two monomials.
    pub fn sum(&self, other: &Self) -> Result<Self, PolynomialError> {
        self.check_arity(other)?;
        self.0
            .iter()
            .zip(&other.0)
            .map(|(a, b)| {
                a.checked_add(b)
                    .ok_or(PolynomialError::ExponentOverflow(a.to_u64() + b.to_u64()))
            })
            .collect::<Result<SmallVec<_>, _>>()
            .map(ExponentVector)
    }

    /// The exponents of `self / other`, or `None` if `other` does not divide `self`.
    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        if self.len() != other.len() {
            return None;
        }

        self.0
            .iter()
            .zip(&other.0)
            .map(|(a, b)| a.checked_sub(b))
            .collect::<Option<SmallVec<_>>>()
            .map(ExponentVector)
    }

    /// The componentwise difference as signed integers.
    pub fn signed_difference(&self, other: &Self) -> Vec<i64> {
        self.0
            .iter()
            .zip(&other.0)
            .map(|(a, b)| a.to_u64() as i64 - b.to_u64() as i64)
            .collect()
    }

    pub fn lcm(&self, other: &Self) -> Self {
        ExponentVector(
            self.0
                .iter()
                .zip(&other.0)
                .map(|(a, b)| *a.max(b))
                .collect(),
        )
    }

    pub fn gcd(&self, other: &Self) -> Self {
        ExponentVector(
            self.0
                .iter()
                .zip(&other.0)
                .map(|(a, b)| *a.min(b))
                .collect(),
        )
    }

    /// Returns `true` iff the monomial of `self` is divisible by that of `other`.
    pub fn is_multiple_of(&self, other: &Self) -> bool {
        self.len() == other.len() && self.0.iter().zip(&other.0).all(|(a, b)| a >= b)
    }

    /// Split into the first `at` variables and the rest.
    pub fn split(&self, at: usize) -> (Self, Self) {
        (
            ExponentVector(SmallVec::from_slice(&self.0[..at])),
            ExponentVector(SmallVec::from_slice(&self.0[at..])),
        )
    }

    /// Concatenate two exponent vectors; the inverse of [ExponentVector::split].
    pub fn combine(&self, other: &Self) -> Self {
        let mut r = self.0.clone();
        r.extend_from_slice(&other.0);
        ExponentVector(r)
    }

    /// Reverse the variable order.
    pub fn reverse(&self) -> Self {
        ExponentVector(self.0.iter().rev().cloned().collect())
    }

    /// Append `n` variables with exponent zero.
    pub fn extend(&self, n: usize) -> Self {
        let mut r = self.0.clone();
        r.extend(std::iter::repeat(E::zero()).take(n));
        ExponentVector(r)
    }

    /// Prepend `n` variables with exponent zero.
    pub fn extend_lower(&self, n: usize) -> Self {
        let mut r: SmallVec<[E; INLINED_EXPONENTS]> = SmallVec::from_elem(E::zero(), n);
        r.extend_from_slice(&self.0);
        ExponentVector(r)
    }

    /// Remove the variables `start..start+len`.
    pub fn contract(&self, start: usize, len: usize) -> Self {
        let mut r = self.0.clone();
        r.drain(start..start + len);
        ExponentVector(r)
    }

    /// Replace the exponent of variable `var`.
    pub fn subst(&self, var: usize, e: E) -> Self {
        let mut r = self.0.clone();
        r[var] = e;
        ExponentVector(r)
    }

    /// Convert to another exponent width.
    pub fn convert<E2: Exponent>(&self) -> Result<ExponentVector<E2>, PolynomialError> {
        self.0
            .iter()
            .map(|e| E2::try_from_u64(e.to_u64()).ok_or(PolynomialError::ExponentOverflow(e.to_u64())))
            .collect::<Result<SmallVec<_>, _>>()
            .map(ExponentVector)
    }
}

#[cfg(test)]
mod test {
    use crate::error::PolynomialError;

    use super::ExponentVector;

    #[test]
    fn arithmetic() {
        let a: ExponentVector<u8> = vec![1, 2, 0].into();
        let b: ExponentVector<u8> = vec![0, 3, 1].into();

        assert_eq!(a.sum(&b).unwrap(), vec![1, 5, 1].into());
        assert_eq!(a.lcm(&b), vec![1, 3, 1].into());
        assert_eq!(a.gcd(&b), vec![0, 2, 0].into());
        assert_eq!(a.checked_sub(&b), None);
        assert_eq!(a.lcm(&b).checked_sub(&a), Some(vec![0, 1, 1].into()));
        assert!(a.lcm(&b).is_multiple_of(&b));
        assert_eq!(a.total_degree(), 3);
        assert_eq!(a.weighted_degree(&[2, 3, 5]), 8);
        assert_eq!(a.signed_difference(&b), vec![1, -1, -1]);
        assert_eq!(b.dependency(), vec![1, 2]);
    }

    #[test]
    fn overflow() {
        let a: ExponentVector<u8> = vec![200].into();
        assert_eq!(a.sum(&a), Err(PolynomialError::ExponentOverflow(400)));
        let wide: ExponentVector<u32> = vec![300].into();
        assert!(wide.convert::<u8>().is_err());
        assert_eq!(wide.convert::<u64>().unwrap().as_slice(), &[300u64]);
    }

    #[test]
    fn restructure() {
        let a: ExponentVector<u16> = vec![1, 2, 3, 4].into();
        let (l, r) = a.split(1);
        assert_eq!(l.combine(&r), a);
        assert_eq!(a.reverse(), vec![4, 3, 2, 1].into());
        assert_eq!(a.extend(1), vec![1, 2, 3, 4, 0].into());
        assert_eq!(a.extend_lower(1), vec![0, 1, 2, 3, 4].into());
        assert_eq!(a.contract(1, 2), vec![1, 4].into());
        assert_eq!(a.subst(0, 7), vec![7, 2, 3, 4].into());
    }
}
