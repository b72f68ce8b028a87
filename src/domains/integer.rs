use std::{
    cmp::Ordering,
    fmt::{Display, Error, Formatter},
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

use rand::Rng as _;
use rug::{ops::Pow, Integer as MultiPrecisionInteger};

use crate::{
    error::PolynomialError,
    printer::{PrintOptions, PrintState},
    utils,
};

use super::{EuclideanDomain, InternalOrdering, Ring};

pub const SMALL_PRIMES: [i64; 100] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
    101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191, 193,
    197, 199, 211, 223, 227, 229, 233, 239, 241, 251, 257, 263, 269, 271, 277, 281, 283, 293, 307,
    311, 313, 317, 331, 337, 347, 349, 353, 359, 367, 373, 379, 383, 389, 397, 401, 409, 419, 421,
    431, 433, 439, 443, 449, 457, 461, 463, 467, 479, 487, 491, 499, 503, 509, 521, 523, 541,
];

/// The integer ring.
pub type Z = IntegerRing;
/// The integer ring.
pub const Z: IntegerRing = IntegerRing::new();

/// The integer ring.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct IntegerRing;

impl Default for IntegerRing {
    fn default() -> Self {
        Self::new()
    }
}

impl IntegerRing {
    pub const fn new() -> IntegerRing {
        IntegerRing
    }
}

/// An arbitrary-precision integer. Values that fit in a machine word
/// are always stored as [Integer::Natural].
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Integer {
    Natural(i64),
    Large(MultiPrecisionInteger),
}

impl InternalOrdering for Integer {
    fn internal_cmp(&self, other: &Self) -> Ordering {
        Ord::cmp(self, other)
    }
}

macro_rules! from_with_cast {
    ($($base: ty),*) => {
        $(
        impl From<$base> for Integer {
            #[inline]
            fn from(value: $base) -> Self {
                Integer::Natural(value as i64)
            }
        }

        impl PartialEq<$base> for Integer {
            #[inline]
            fn eq(&self, other: &$base) -> bool {
                match self {
                    Integer::Natural(n) => *n == *other as i64,
                    _ => false,
                }
            }
        }
        )*
    };
}

from_with_cast!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Integer {
    #[inline]
    fn from(value: u64) -> Self {
        if value <= i64::MAX as u64 {
            Integer::Natural(value as i64)
        } else {
            Integer::Large(value.into())
        }
    }
}

impl From<usize> for Integer {
    #[inline]
    fn from(value: usize) -> Self {
        Integer::from(value as u64)
    }
}

impl From<i128> for Integer {
    #[inline]
    fn from(value: i128) -> Self {
        if value >= i64::MIN as i128 && value <= i64::MAX as i128 {
            Integer::Natural(value as i64)
        } else {
            Integer::Large(value.into())
        }
    }
}

impl From<MultiPrecisionInteger> for Integer {
    /// Convert from a multi-precision integer to an Integer, potentially
    /// downcasting the number.
    #[inline]
    fn from(n: MultiPrecisionInteger) -> Self {
        if let Some(n) = n.to_i64() {
            Integer::Natural(n)
        } else {
            Integer::Large(n)
        }
    }
}

impl PartialOrd for Integer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Integer {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Integer::Natural(a), Integer::Natural(b)) => a.cmp(b),
            (Integer::Natural(a), Integer::Large(b)) => b.partial_cmp(a).map_or(Ordering::Equal, |x| x.reverse()),
            (Integer::Large(a), Integer::Natural(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (Integer::Large(a), Integer::Large(b)) => a.cmp(b),
        }
    }
}

impl Default for Integer {
    fn default() -> Self {
        Integer::zero()
    }
}

impl Integer {
    #[inline]
    pub fn new(num: i64) -> Integer {
        Integer::Natural(num)
    }

    #[inline]
    pub fn zero() -> Integer {
        Integer::Natural(0)
    }

    #[inline]
    pub fn one() -> Integer {
        Integer::Natural(1)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        *self == Integer::Natural(0)
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        *self == Integer::Natural(1)
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        match self {
            Integer::Natural(n) => *n < 0,
            Integer::Large(r) => r.cmp0() == Ordering::Less,
        }
    }

    #[inline]
    pub fn signum(&self) -> i8 {
        match self {
            Integer::Natural(n) => n.signum() as i8,
            Integer::Large(r) => match r.cmp0() {
                Ordering::Less => -1,
                Ordering::Equal => 0,
                Ordering::Greater => 1,
            },
        }
    }

    pub fn abs(&self) -> Integer {
        if self.is_negative() {
            -self
        } else {
            self.clone()
        }
    }

    pub fn to_i64(&self) -> Option<i64> {
        match self {
            Integer::Natural(n) => Some(*n),
            Integer::Large(_) => None,
        }
    }

    pub fn to_u64(&self) -> Option<u64> {
        match self {
            Integer::Natural(n) if *n >= 0 => Some(*n as u64),
            Integer::Natural(_) => None,
            Integer::Large(r) => r.to_u64(),
        }
    }

    pub fn to_multi_prec(&self) -> MultiPrecisionInteger {
        match self {
            Integer::Natural(n) => MultiPrecisionInteger::from(*n),
            Integer::Large(r) => r.clone(),
        }
    }

    /// The number of bits of the absolute value.
    pub fn bits(&self) -> u64 {
        match self {
            Integer::Natural(n) => 64 - n.unsigned_abs().leading_zeros() as u64,
            Integer::Large(r) => r.significant_bits() as u64,
        }
    }

    /// Compute `2^e`.
    pub fn power_of_two(e: u32) -> Integer {
        if e < 63 {
            Integer::Natural(1 << e)
        } else {
            Integer::from(MultiPrecisionInteger::from(1) << e)
        }
    }

    pub fn pow(&self, e: u64) -> Integer {
        if e == 0 {
            return Integer::one();
        }

        if let Integer::Natural(n) = self {
            if let Ok(e32) = u32::try_from(e) {
                if let Some(r) = n.checked_pow(e32) {
                    return Integer::Natural(r);
                }
            }
        }

        // exponents beyond u32 only occur for 0, 1 and -1 in practice
        let e = e.min(u32::MAX as u64) as u32;
        Integer::from(self.to_multi_prec().pow(e))
    }

    /// The floored integer square root of a non-negative integer.
    pub fn isqrt(&self) -> Integer {
        if self.is_negative() {
            return Integer::zero();
        }

        Integer::from(self.to_multi_prec().sqrt())
    }

    /// Euclidean division: the remainder is always non-negative.
    /// Panics when `b` is zero.
    pub fn quot_rem(&self, b: &Integer) -> (Integer, Integer) {
        if b.is_zero() {
            panic!("Cannot divide by zero");
        }

        if let (Integer::Natural(aa), Integer::Natural(bb)) = (self, b) {
            if let (Some(q), Some(r)) = (aa.checked_div_euclid(*bb), aa.checked_rem_euclid(*bb)) {
                return (Integer::Natural(q), Integer::Natural(r));
            }
        }

        let (q, r) = self.to_multi_prec().div_rem_euc(b.to_multi_prec());
        (Integer::from(q), Integer::from(r))
    }

    /// The non-negative remainder of the division by `b`.
    pub fn rem_euclid(&self, b: &Integer) -> Integer {
        self.quot_rem(b).1
    }

    /// Divide by `b` if the division is exact.
    pub fn try_div(&self, b: &Integer) -> Option<Integer> {
        if b.is_zero() {
            return None;
        }

        let (q, r) = self.quot_rem(b);
        if r.is_zero() {
            Some(q)
        } else {
            None
        }
    }

    pub fn gcd(&self, b: &Integer) -> Integer {
        match (self, b) {
            (Integer::Natural(n1), Integer::Natural(n2)) => {
                Integer::from(utils::gcd_signed(*n1, *n2))
            }
            _ => Integer::from(self.to_multi_prec().gcd(&b.to_multi_prec())),
        }
    }

    pub fn lcm(&self, b: &Integer) -> Integer {
        if self.is_zero() || b.is_zero() {
            return Integer::zero();
        }

        let g = self.gcd(b);
        (&self.quot_rem(&g).0 * b).abs()
    }

    /// Compute `(g, s, t)` with `s*self + t*b = g`, `g >= 0`.
    pub fn extended_gcd(&self, b: &Integer) -> (Integer, Integer, Integer) {
        let mut r0 = self.clone();
        let mut r1 = b.clone();
        let mut s0 = Integer::one();
        let mut s1 = Integer::zero();
        let mut t0 = Integer::zero();
        let mut t1 = Integer::one();

        while !r1.is_zero() {
            let (q, r) = r0.quot_rem(&r1);
            r0 = std::mem::replace(&mut r1, r);
            let s = &s0 - &(&q * &s1);
            s0 = std::mem::replace(&mut s1, s);
            let t = &t0 - &(&q * &t1);
            t0 = std::mem::replace(&mut t1, t);
        }

        if r0.is_negative() {
            (-r0, -s0, -t0)
        } else {
            (r0, s0, t0)
        }
    }

    /// Compute the modular inverse of `self` in the ring with size `n`.
    pub fn mod_inverse(&self, n: &Integer) -> Result<Integer, PolynomialError> {
        let (g, s, _) = self.rem_euclid(n).extended_gcd(n);
        if !g.is_one() {
            return Err(PolynomialError::NotInvertible(format!(
                "{} modulo {}",
                self, n
            )));
        }

        Ok(s.rem_euclid(n))
    }

    /// Perform the symmetric mod `p` on `self`, yielding a representative in `(-p/2, p/2]`.
    #[inline]
    pub fn symmetric_mod(&self, p: &Integer) -> Integer {
        let c = self.rem_euclid(p);

        if &c * &Integer::Natural(2) > *p {
            &c - p
        } else {
            c
        }
    }

    /// Combine `n1 mod p1` and `n2 mod p2` with coprime moduli into the
    /// symmetric representative modulo `p1*p2`.
    pub fn chinese_remainder(
        n1: &Integer,
        n2: &Integer,
        p1: &Integer,
        p2: &Integer,
    ) -> Result<Integer, PolynomialError> {
        // convert to mixed-radix notation
        let gamma1 = p1.rem_euclid(p2).mod_inverse(p2)?;
        let v1 = (&(n2 - n1) * &gamma1).rem_euclid(p2);

        // convert to standard representation
        let r = &(&v1 * p1) + n1;
        Ok(r.symmetric_mod(&(p1 * p2)))
    }
}

impl Display for Integer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Integer::Natural(n) => n.fmt(f),
            Integer::Large(r) => r.fmt(f),
        }
    }
}

impl Display for IntegerRing {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("Z")
    }
}

impl Ring for IntegerRing {
    type Element = Integer;

    #[inline]
    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a + b
    }

    #[inline]
    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a - b
    }

    #[inline]
    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a * b
    }

    #[inline]
    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a += b;
    }

    #[inline]
    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a -= b;
    }

    #[inline]
    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a *= b;
    }

    #[inline]
    fn add_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a += &(b * c);
    }

    #[inline]
    fn sub_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a -= &(b * c);
    }

    #[inline]
    fn neg(&self, a: &Self::Element) -> Self::Element {
        -a
    }

    #[inline]
    fn zero(&self) -> Self::Element {
        Integer::zero()
    }

    #[inline]
    fn one(&self) -> Self::Element {
        Integer::one()
    }

    #[inline]
    fn nth(&self, n: &Integer) -> Self::Element {
        n.clone()
    }

    #[inline]
    fn pow(&self, b: &Self::Element, e: u64) -> Self::Element {
        b.pow(e)
    }

    #[inline]
    fn is_zero(a: &Self::Element) -> bool {
        a.is_zero()
    }

    #[inline]
    fn is_one(&self, a: &Self::Element) -> bool {
        a.is_one()
    }

    fn is_unit(&self, a: &Self::Element) -> bool {
        *a == Integer::Natural(1) || *a == Integer::Natural(-1)
    }

    #[inline]
    fn one_is_gcd_unit() -> bool {
        true
    }

    fn characteristic(&self) -> Integer {
        Integer::zero()
    }

    fn size(&self) -> Integer {
        Integer::zero()
    }

    fn is_field(&self) -> bool {
        false
    }

    fn signum(&self, a: &Self::Element) -> i8 {
        a.signum()
    }

    fn abs(&self, a: &Self::Element) -> Self::Element {
        a.abs()
    }

    fn try_div(&self, a: &Self::Element, b: &Self::Element) -> Option<Self::Element> {
        a.try_div(b)
    }

    fn sample(&self, rng: &mut impl rand::RngCore, range: (i64, i64)) -> Self::Element {
        Integer::Natural(rng.gen_range(range.0..range.1))
    }

    fn format<W: std::fmt::Write>(
        &self,
        element: &Self::Element,
        _opts: &PrintOptions,
        state: PrintState,
        f: &mut W,
    ) -> Result<bool, Error> {
        if state.in_sum && !element.is_negative() {
            f.write_char('+')?;
        }

        write!(f, "{}", element)?;
        Ok(false)
    }
}

impl EuclideanDomain for IntegerRing {
    fn rem(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a.rem_euclid(b)
    }

    fn quot_rem(&self, a: &Self::Element, b: &Self::Element) -> (Self::Element, Self::Element) {
        a.quot_rem(b)
    }

    fn gcd(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a.gcd(b)
    }

    fn extended_gcd(
        &self,
        a: &Self::Element,
        b: &Self::Element,
    ) -> (Self::Element, Self::Element, Self::Element) {
        a.extended_gcd(b)
    }
}

impl<'a> Add<&'a Integer> for &'a Integer {
    type Output = Integer;

    #[inline]
    fn add(self, rhs: &'a Integer) -> Integer {
        if let (Integer::Natural(a), Integer::Natural(b)) = (self, rhs) {
            if let Some(c) = a.checked_add(*b) {
                return Integer::Natural(c);
            }
        }

        Integer::from(self.to_multi_prec() + rhs.to_multi_prec())
    }
}

impl<'a> Sub<&'a Integer> for &'a Integer {
    type Output = Integer;

    #[inline]
    fn sub(self, rhs: &'a Integer) -> Integer {
        if let (Integer::Natural(a), Integer::Natural(b)) = (self, rhs) {
            if let Some(c) = a.checked_sub(*b) {
                return Integer::Natural(c);
            }
        }

        Integer::from(self.to_multi_prec() - rhs.to_multi_prec())
    }
}

impl<'a> Mul<&'a Integer> for &'a Integer {
    type Output = Integer;

    #[inline]
    fn mul(self, rhs: &'a Integer) -> Integer {
        if let (Integer::Natural(a), Integer::Natural(b)) = (self, rhs) {
            if let Some(c) = a.checked_mul(*b) {
                return Integer::Natural(c);
            }
        }

        Integer::from(self.to_multi_prec() * rhs.to_multi_prec())
    }
}

impl<'a> Neg for &'a Integer {
    type Output = Integer;

    #[inline]
    fn neg(self) -> Integer {
        match self {
            Integer::Natural(n) => match n.checked_neg() {
                Some(n) => Integer::Natural(n),
                None => Integer::from(-MultiPrecisionInteger::from(*n)),
            },
            Integer::Large(r) => Integer::from(-r.clone()),
        }
    }
}

impl Neg for Integer {
    type Output = Integer;

    #[inline]
    fn neg(self) -> Integer {
        -&self
    }
}

impl Add for Integer {
    type Output = Integer;

    fn add(self, rhs: Integer) -> Integer {
        &self + &rhs
    }
}

impl Sub for Integer {
    type Output = Integer;

    fn sub(self, rhs: Integer) -> Integer {
        &self - &rhs
    }
}

impl Mul for Integer {
    type Output = Integer;

    fn mul(self, rhs: Integer) -> Integer {
        &self * &rhs
    }
}

impl<'a> AddAssign<&'a Integer> for Integer {
    #[inline]
    fn add_assign(&mut self, rhs: &'a Integer) {
        *self = &*self + rhs;
    }
}

impl<'a> SubAssign<&'a Integer> for Integer {
    #[inline]
    fn sub_assign(&mut self, rhs: &'a Integer) {
        *self = &*self - rhs;
    }
}

impl<'a> MulAssign<&'a Integer> for Integer {
    #[inline]
    fn mul_assign(&mut self, rhs: &'a Integer) {
        *self = &*self * rhs;
    }
}

#[cfg(test)]
mod test {
    use crate::domains::{EuclideanDomain, Ring};

    use super::{Integer, Z};

    #[test]
    fn overflow_promotes() {
        let a = Integer::new(i64::MAX);
        let b = &a + &Integer::one();
        assert!(matches!(b, Integer::Large(_)));
        assert_eq!(&b - &Integer::one(), a);

        let c = &a * &a;
        assert_eq!(c.quot_rem(&a), (a.clone(), Integer::zero()));
        assert_eq!(-Integer::new(i64::MIN), &Integer::new(i64::MAX) + &Integer::one());
    }

    #[test]
    fn euclidean_division() {
        let (q, r) = Integer::new(-7).quot_rem(&Integer::new(2));
        assert_eq!((q, r), (Integer::new(-4), Integer::new(1)));
        assert_eq!(Integer::new(7).symmetric_mod(&Integer::new(5)), Integer::new(2));
        assert_eq!(Integer::new(8).symmetric_mod(&Integer::new(5)), Integer::new(-2));
    }

    #[test]
    fn gcd_and_inverse() {
        assert_eq!(Z.gcd(&Integer::new(-12), &Integer::new(18)), Integer::new(6));
        let (g, s, t) = Z.extended_gcd(&Integer::new(240), &Integer::new(46));
        assert_eq!(g, Integer::new(2));
        assert_eq!(&(&s * &Integer::new(240)) + &(&t * &Integer::new(46)), g);
        assert_eq!(
            Integer::new(3).mod_inverse(&Integer::new(7)).unwrap(),
            Integer::new(5)
        );
        assert!(Integer::new(2).mod_inverse(&Integer::new(4)).is_err());
        assert_eq!(Z.lcm(&Integer::new(-4), &Integer::new(6)), Integer::new(12));
    }

    #[test]
    fn chinese_remainder() {
        let r = Integer::chinese_remainder(
            &Integer::new(2),
            &Integer::new(3),
            &Integer::new(5),
            &Integer::new(7),
        )
        .unwrap();
        assert_eq!(r, Integer::new(17));

        let r = Integer::chinese_remainder(
            &Integer::new(3),
            &Integer::new(5),
            &Integer::new(5),
            &Integer::new(7),
        )
        .unwrap();
        assert_eq!(r, Integer::new(-2));
    }

    #[test]
    fn pow_and_bits() {
        let p = Integer::new(3).pow(50);
        assert_eq!(p.to_string(), "717897987691852588770249");
        assert_eq!(Integer::new(255).bits(), 8);
        assert_eq!(Integer::new(17).isqrt(), Integer::new(4));
        assert!(Z.is_unit(&Integer::new(-1)));
    }
}
