//! Prime fields `Z/pZ` for word-sized primes.

use rand::Rng as _;
use std::fmt::{Debug, Display, Error, Formatter};
use std::hash::Hash;

use crate::error::PolynomialError;
use crate::printer::{PrintOptions, PrintState};
use crate::utils;

use super::integer::Integer;
use super::{EuclideanDomain, Field, InternalOrdering, Ring};

/// A 32-bit integer finite field.
pub type Zp = FiniteField<u32>;
/// A 64-bit integer finite field.
pub type Zp64 = FiniteField<u64>;

/// The unsigned word type that stores the prime and the elements.
pub trait FiniteFieldWorkspace:
    Copy + Clone + Display + Debug + Eq + Hash + Ord + Send + Sync + 'static
{
    fn to_u64(self) -> u64;
    /// Convert from a `u64` that is known to fit.
    fn from_u64(n: u64) -> Self;
    fn try_from_integer(n: &Integer) -> Option<Self>;
}

impl FiniteFieldWorkspace for u32 {
    #[inline(always)]
    fn to_u64(self) -> u64 {
        self as u64
    }

    #[inline(always)]
    fn from_u64(n: u64) -> u32 {
        n as u32
    }

    fn try_from_integer(n: &Integer) -> Option<u32> {
        n.to_u64().and_then(|x| u32::try_from(x).ok())
    }
}

impl FiniteFieldWorkspace for u64 {
    #[inline(always)]
    fn to_u64(self) -> u64 {
        self
    }

    #[inline(always)]
    fn from_u64(n: u64) -> u64 {
        n
    }

    fn try_from_integer(n: &Integer) -> Option<u64> {
        n.to_u64()
    }
}

/// A number in a finite field, stored in standard form `[0,p)`.
#[derive(Debug, Copy, Clone, Hash, PartialEq, PartialOrd, Eq, Ord)]
pub struct FiniteFieldElement<UField>(pub(crate) UField);

impl<UField: Ord> InternalOrdering for FiniteFieldElement<UField> {
    fn internal_cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.cmp(other)
    }
}

pub trait FiniteFieldCore<UField: FiniteFieldWorkspace>: Field {
    /// Create a new finite field with modulus prime `p`.
    fn new(p: UField) -> Self;
    fn get_prime(&self) -> UField;
    /// Convert a number to a representative in a prime field.
    fn to_element(&self, a: UField) -> Self::Element;
    /// Convert a number from the finite field to standard form `[0,p)`.
    fn from_element(&self, a: &Self::Element) -> UField;
}

/// The prime field `Z/pZ`, with `p < 2^64`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct FiniteField<UField> {
    p: UField,
}

impl<UField: FiniteFieldWorkspace> FiniteField<UField> {
    /// Create a prime field, verifying that `p` is prime.
    pub fn try_new(p: UField) -> Result<Self, PolynomialError> {
        if !utils::is_prime_u64(p.to_u64()) {
            return Err(PolynomialError::Unsupported(
                "the modulus of a finite field must be prime",
            ));
        }

        Ok(FiniteField { p })
    }

    #[inline(always)]
    fn prime_u64(&self) -> u64 {
        self.p.to_u64()
    }

    /// Convert an element to the symmetric representation `(-p/2,p/2]`.
    pub fn to_symmetric_integer(&self, a: &FiniteFieldElement<UField>) -> Integer {
        let a = a.0.to_u64();
        let p = self.prime_u64();
        if a > p / 2 {
            Integer::from(a as i128 - p as i128)
        } else {
            Integer::from(a)
        }
    }

    /// Convert an element to an integer in `[0,p)`.
    pub fn to_integer(&self, a: &FiniteFieldElement<UField>) -> Integer {
        Integer::from(a.0.to_u64())
    }

    /// Map an integer into the field.
    pub fn element_from_integer(&self, n: &Integer) -> FiniteFieldElement<UField> {
        let p = Integer::from(self.prime_u64());
        let r = n.rem_euclid(&p);
        // the remainder is in [0,p)
        FiniteFieldElement(UField::from_u64(r.to_u64().unwrap_or(0)))
    }
}

impl<UField: FiniteFieldWorkspace> Display for FiniteField<UField> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Z_{}", self.p)
    }
}

impl<UField: FiniteFieldWorkspace> FiniteFieldCore<UField> for FiniteField<UField> {
    fn new(p: UField) -> Self {
        FiniteField { p }
    }

    #[inline(always)]
    fn get_prime(&self) -> UField {
        self.p
    }

    #[inline(always)]
    fn to_element(&self, a: UField) -> FiniteFieldElement<UField> {
        FiniteFieldElement(UField::from_u64(a.to_u64() % self.prime_u64()))
    }

    #[inline(always)]
    fn from_element(&self, a: &FiniteFieldElement<UField>) -> UField {
        a.0
    }
}

/// Convert a coefficient to an element of a prime field.
pub trait ToFiniteField<UField: FiniteFieldWorkspace> {
    fn to_finite_field(&self, field: &FiniteField<UField>) -> FiniteFieldElement<UField>;
}

impl<UField: FiniteFieldWorkspace> ToFiniteField<UField> for Integer {
    fn to_finite_field(&self, field: &FiniteField<UField>) -> FiniteFieldElement<UField> {
        match self {
            Integer::Natural(n) => {
                let p = field.prime_u64() as i128;
                FiniteFieldElement(UField::from_u64((*n as i128).rem_euclid(p) as u64))
            }
            Integer::Large(_) => field.element_from_integer(self),
        }
    }
}

impl<UField: FiniteFieldWorkspace> Ring for FiniteField<UField> {
    type Element = FiniteFieldElement<UField>;

    #[inline]
    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        let p = self.prime_u64() as u128;
        FiniteFieldElement(UField::from_u64(
            ((a.0.to_u64() as u128 + b.0.to_u64() as u128) % p) as u64,
        ))
    }

    #[inline]
    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        let p = self.prime_u64() as u128;
        FiniteFieldElement(UField::from_u64(
            ((a.0.to_u64() as u128 + p - b.0.to_u64() as u128) % p) as u64,
        ))
    }

    #[inline]
    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        let p = self.prime_u64() as u128;
        FiniteFieldElement(UField::from_u64(
            ((a.0.to_u64() as u128 * b.0.to_u64() as u128) % p) as u64,
        ))
    }

    #[inline]
    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.add(a, b);
    }

    #[inline]
    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.sub(a, b);
    }

    #[inline]
    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.mul(a, b);
    }

    #[inline]
    fn add_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a = self.add(a, &self.mul(b, c));
    }

    #[inline]
    fn sub_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a = self.sub(a, &self.mul(b, c));
    }

    #[inline]
    fn neg(&self, a: &Self::Element) -> Self::Element {
        if a.0.to_u64() == 0 {
            *a
        } else {
            FiniteFieldElement(UField::from_u64(self.prime_u64() - a.0.to_u64()))
        }
    }

    #[inline]
    fn zero(&self) -> Self::Element {
        FiniteFieldElement(UField::from_u64(0))
    }

    #[inline]
    fn one(&self) -> Self::Element {
        FiniteFieldElement(UField::from_u64(1 % self.prime_u64()))
    }

    #[inline]
    fn nth(&self, n: &Integer) -> Self::Element {
        n.to_finite_field(self)
    }

    fn pow(&self, b: &Self::Element, e: u64) -> Self::Element {
        FiniteFieldElement(UField::from_u64(utils::pow_mod_u64(
            b.0.to_u64(),
            e,
            self.prime_u64(),
        )))
    }

    #[inline]
    fn is_zero(a: &Self::Element) -> bool {
        a.0.to_u64() == 0
    }

    #[inline]
    fn is_one(&self, a: &Self::Element) -> bool {
        a.0.to_u64() == 1
    }

    fn is_unit(&self, a: &Self::Element) -> bool {
        !Self::is_zero(a)
    }

    #[inline]
    fn one_is_gcd_unit() -> bool {
        true
    }

    fn characteristic(&self) -> Integer {
        Integer::from(self.prime_u64())
    }

    fn size(&self) -> Integer {
        Integer::from(self.prime_u64())
    }

    fn is_field(&self) -> bool {
        true
    }

    fn try_div(&self, a: &Self::Element, b: &Self::Element) -> Option<Self::Element> {
        if Self::is_zero(b) {
            None
        } else {
            Some(self.div(a, b))
        }
    }

    fn sample(&self, rng: &mut impl rand::RngCore, range: (i64, i64)) -> Self::Element {
        let r = rng.gen_range(range.0..range.1);
        self.nth(&Integer::new(r))
    }

    fn format<W: std::fmt::Write>(
        &self,
        element: &Self::Element,
        opts: &PrintOptions,
        state: PrintState,
        f: &mut W,
    ) -> Result<bool, Error> {
        if state.in_sum {
            f.write_char('+')?;
        }

        if opts.print_finite_field {
            write!(f, "{}%{}", element.0, self.p)?;
        } else {
            write!(f, "{}", element.0)?;
        }

        Ok(false)
    }
}

impl<UField: FiniteFieldWorkspace> EuclideanDomain for FiniteField<UField> {
    #[inline]
    fn rem(&self, _: &Self::Element, _: &Self::Element) -> Self::Element {
        self.zero()
    }

    #[inline]
    fn quot_rem(&self, a: &Self::Element, b: &Self::Element) -> (Self::Element, Self::Element) {
        (self.div(a, b), self.zero())
    }

    #[inline]
    fn gcd(&self, _: &Self::Element, _: &Self::Element) -> Self::Element {
        self.one()
    }
}

impl<UField: FiniteFieldWorkspace> Field for FiniteField<UField> {
    #[inline]
    fn div(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        self.mul(a, &self.inv(b))
    }

    #[inline]
    fn div_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.mul(a, &self.inv(b));
    }

    /// Computes the inverse using the extended Euclidean algorithm.
    /// Panics when `a` is zero.
    fn inv(&self, a: &Self::Element) -> Self::Element {
        assert!(!Self::is_zero(a), "0 is not invertible");

        let p = self.prime_u64() as i128;
        let mut u1: i128 = 1;
        let mut u3 = a.0.to_u64() as i128;
        let mut v1: i128 = 0;
        let mut v3 = p;

        while v3 != 0 {
            let q = u3 / v3;
            (u1, v1) = (v1, u1 - q * v1);
            (u3, v3) = (v3, u3 - q * v3);
        }

        FiniteFieldElement(UField::from_u64(u1.rem_euclid(p) as u64))
    }
}

#[cfg(test)]
mod test {
    use crate::domains::{integer::Integer, Field, Ring};

    use super::{FiniteFieldCore, ToFiniteField, Zp, Zp64};

    #[test]
    fn arithmetic() {
        let f = Zp::new(17);
        let a = f.to_element(5);
        let b = f.to_element(14);
        assert_eq!(f.from_element(&f.add(&a, &b)), 2);
        assert_eq!(f.from_element(&f.sub(&a, &b)), 8);
        assert_eq!(f.from_element(&f.mul(&a, &b)), 2);
        assert_eq!(f.from_element(&f.inv(&a)), 7);
        assert_eq!(f.from_element(&f.pow(&a, 16)), 1);
        assert_eq!(f.to_symmetric_integer(&b), Integer::new(-3));
    }

    #[test]
    fn large_prime() {
        let f = Zp64::new(18446744073709551557);
        let a = f.to_element(18446744073709551556);
        assert!(f.is_one(&f.mul(&a, &a)));
        assert!(f.is_one(&f.mul(&a, &f.inv(&a))));

        let n = Integer::new(-1).to_finite_field(&f);
        assert_eq!(n, a);
    }

    #[test]
    fn composite_rejected() {
        assert!(Zp::try_new(15).is_err());
        assert!(Zp::try_new(13).is_ok());
    }
}
