//! Defines the coefficient-ring capabilities that the polynomial algorithms are written against.
//!
//! The core trait is [Ring], which has two binary operations, addition and multiplication.
//! Each ring has an associated element type, that should not be confused with the ring type itself.
//! For example:
//! - The ring of integers [Z](type@integer::Z) has elements of type [Integer].
//! - The ring of rational numbers [Q](type@rational::Q) has elements of type [Rational](rational::Rational).
//! - The prime field [FiniteField](finite_field::FiniteField) has elements of type [FiniteFieldElement](finite_field::FiniteFieldElement).
//! - The ring of polynomials [PolynomialRing](super::poly::polynomial::PolynomialRing) has elements of type [MultivariatePolynomial](super::poly::polynomial::MultivariatePolynomial).
//!
//! The ring elements do not implement operations such as addition or multiplication,
//! but rather the ring itself does. The ring is the factory of its elements and carries
//! all data the elements share, such as the modulus of a finite field.
//!
//! An extension of the ring trait is the [`EuclideanDomain`] trait, which adds the ability to compute remainders, quotients, and gcds.
//! Another extension is the [`Field`] trait, which adds the ability to divide and invert elements.
pub mod algebraic_number;
pub mod complex;
pub mod finite_field;
pub mod integer;
pub mod rational;
pub mod rational_polynomial;

use std::fmt::{Debug, Display, Error, Formatter};
use std::hash::Hash;

use integer::Integer;

use crate::printer::{PrintOptions, PrintState};

/// The internal ordering trait is used to compare elements of a ring.
/// This ordering is defined even for rings that do not have a total ordering, such
/// as complex numbers.
pub trait InternalOrdering {
    /// Compare two elements using an internal ordering.
    fn internal_cmp(&self, other: &Self) -> std::cmp::Ordering;
}

macro_rules! impl_internal_ordering {
    ($($t:ty),*) => {
        $(
            impl InternalOrdering for $t {
                fn internal_cmp(&self, other: &Self) -> std::cmp::Ordering {
                    self.cmp(other)
                }
            }
        )*
    };
}

impl_internal_ordering!(u8, u16, u32, u64);

impl<T: InternalOrdering> InternalOrdering for Vec<T> {
    fn internal_cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.len().cmp(&other.len()) {
            std::cmp::Ordering::Equal => (),
            ord => return ord,
        }

        for (i, j) in self.iter().zip(other) {
            match i.internal_cmp(j) {
                std::cmp::Ordering::Equal => {}
                ord => return ord,
            }
        }

        std::cmp::Ordering::Equal
    }
}

/// A ring is a set with two binary operations, addition and multiplication.
/// Examples of rings include the integers, rational numbers, and polynomials.
///
/// Besides the arithmetic, a ring reports its capabilities: its characteristic,
/// its size, whether it is a field and which of its elements are units.
/// Generic algorithms query these once to select a strategy.
pub trait Ring: Clone + PartialEq + Eq + Hash + Debug + Display {
    /// The element of a ring. For example, the elements of the ring of integers [Z](type@integer::Z), `Z::Element`, are [Integer].
    type Element: Clone + PartialEq + Eq + Hash + InternalOrdering + Debug;

    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;
    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;
    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;
    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element);
    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element);
    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element);
    fn add_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element);
    fn sub_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element);
    fn neg(&self, a: &Self::Element) -> Self::Element;
    fn zero(&self) -> Self::Element;
    fn one(&self) -> Self::Element;
    /// Return the nth element by computing `n * 1`.
    fn nth(&self, n: &Integer) -> Self::Element;
    fn pow(&self, b: &Self::Element, e: u64) -> Self::Element;
    fn is_zero(a: &Self::Element) -> bool;
    fn is_one(&self, a: &Self::Element) -> bool;
    /// Returns `true` iff `a` has a multiplicative inverse in the ring.
    fn is_unit(&self, a: &Self::Element) -> bool;
    /// Should return `true` iff `gcd(1,x)` returns `1` for any `x`.
    fn one_is_gcd_unit() -> bool;
    fn characteristic(&self) -> Integer;
    /// The number of elements in the ring. 0 is used for infinite rings.
    fn size(&self) -> Integer;
    /// Returns `true` iff every non-zero element is a unit.
    fn is_field(&self) -> bool;

    fn is_finite(&self) -> bool {
        !self.size().is_zero()
    }

    /// The sign of an element for rings with a natural sign, such as the integers.
    /// Rings without an ordering return `1` for every non-zero element.
    fn signum(&self, a: &Self::Element) -> i8 {
        if Self::is_zero(a) {
            0
        } else {
            1
        }
    }

    fn abs(&self, a: &Self::Element) -> Self::Element {
        if self.signum(a) < 0 {
            self.neg(a)
        } else {
            a.clone()
        }
    }

    /// Return the result of dividing `a` by `b`, if possible and if the result is unique.
    /// For example, in [Z](type@integer::Z), `4/2` is possible but `3/2` is not.
    fn try_div(&self, a: &Self::Element, b: &Self::Element) -> Option<Self::Element>;

    fn sample(&self, rng: &mut impl rand::RngCore, range: (i64, i64)) -> Self::Element;

    /// Format a ring element with custom [PrintOptions] and [PrintState].
    /// A `+` is written in front of non-negative elements when the state is in a sum.
    /// Returns `true` if the element was wrapped in parentheses.
    fn format<W: std::fmt::Write>(
        &self,
        element: &Self::Element,
        opts: &PrintOptions,
        state: PrintState,
        f: &mut W,
    ) -> Result<bool, Error>;

    /// Create a new printer for the given ring element that
    /// can be used in a [format!] macro.
    fn printer<'a>(&'a self, element: &'a Self::Element) -> RingPrinter<'a, Self> {
        RingPrinter::new(self, element)
    }
}

/// A Euclidean domain is a ring that supports division with remainder, quotients, and gcds.
pub trait EuclideanDomain: Ring {
    fn rem(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;
    fn quot_rem(&self, a: &Self::Element, b: &Self::Element) -> (Self::Element, Self::Element);
    fn gcd(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;

    /// Compute `(g, s, t)` with `s*a + t*b = g` and `g = gcd(a, b)`.
    fn extended_gcd(
        &self,
        a: &Self::Element,
        b: &Self::Element,
    ) -> (Self::Element, Self::Element, Self::Element) {
        let mut r0 = a.clone();
        let mut r1 = b.clone();
        let mut s0 = self.one();
        let mut s1 = self.zero();
        let mut t0 = self.zero();
        let mut t1 = self.one();

        while !Self::is_zero(&r1) {
            let (q, r) = self.quot_rem(&r0, &r1);
            r0 = std::mem::replace(&mut r1, r);

            let s = self.sub(&s0, &self.mul(&q, &s1));
            s0 = std::mem::replace(&mut s1, s);
            let t = self.sub(&t0, &self.mul(&q, &t1));
            t0 = std::mem::replace(&mut t1, t);
        }

        if self.signum(&r0) < 0 {
            (self.neg(&r0), self.neg(&s0), self.neg(&t0))
        } else {
            (r0, s0, t0)
        }
    }

    /// Compute the least common multiple, normalized to be non-negative if the ring has a sign.
    fn lcm(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        if Self::is_zero(a) || Self::is_zero(b) {
            return self.zero();
        }

        let g = self.gcd(a, b);
        let (q, _) = self.quot_rem(a, &g);
        self.abs(&self.mul(&q, b))
    }
}

/// A field is a ring that supports division and inversion.
pub trait Field: EuclideanDomain {
    fn div(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;
    fn div_assign(&self, a: &mut Self::Element, b: &Self::Element);
    fn inv(&self, a: &Self::Element) -> Self::Element;
}

/// Provides an interface for printing elements of a ring with optional customization,
/// suitable as an argument to [format!]. Internally, it will call [Ring::format].
pub struct RingPrinter<'a, R: Ring> {
    pub ring: &'a R,
    pub element: &'a R::Element,
    pub opts: PrintOptions,
    pub state: PrintState,
}

impl<'a, R: Ring> RingPrinter<'a, R> {
    pub fn new(ring: &'a R, element: &'a R::Element) -> RingPrinter<'a, R> {
        RingPrinter {
            ring,
            element,
            opts: PrintOptions::default(),
            state: PrintState::default(),
        }
    }
}

impl<'a, R: Ring> Display for RingPrinter<'a, R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut s = String::new();
        self.ring.format(
            self.element,
            &self.opts.update_with_fmt(f),
            self.state.update_with_fmt(f),
            &mut s,
        )?;
        f.write_str(&s)
    }
}
