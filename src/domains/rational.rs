use std::{
    cmp::Ordering,
    fmt::{Display, Error, Formatter},
};

use rand::Rng as _;

use crate::printer::{PrintOptions, PrintState};

use super::{
    integer::{Integer, Z},
    EuclideanDomain, Field, InternalOrdering, Ring,
};

/// The field of rational numbers.
pub type Q = RationalField;
/// The field of rational numbers.
pub const Q: RationalField = RationalField::new();

/// The field of rational numbers.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct RationalField;

impl Default for RationalField {
    fn default() -> Self {
        Self::new()
    }
}

impl RationalField {
    pub const fn new() -> RationalField {
        RationalField
    }
}

/// A rational number in lowest terms with a positive denominator.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Rational {
    numerator: Integer,
    denominator: Integer,
}

impl InternalOrdering for Rational {
    fn internal_cmp(&self, other: &Self) -> Ordering {
        Ord::cmp(self, other)
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        (&self.numerator * &other.denominator).cmp(&(&other.numerator * &self.denominator))
    }
}

impl From<Integer> for Rational {
    fn from(value: Integer) -> Self {
        Rational {
            numerator: value,
            denominator: Integer::one(),
        }
    }
}

impl From<i64> for Rational {
    fn from(value: i64) -> Self {
        Rational::from(Integer::new(value))
    }
}

impl From<(i64, i64)> for Rational {
    fn from((n, d): (i64, i64)) -> Self {
        Rational::new(Integer::new(n), Integer::new(d))
    }
}

impl Rational {
    /// Create a new rational number `num/den`. Panics when `den` is zero.
    pub fn new(num: Integer, den: Integer) -> Rational {
        if den.is_zero() {
            panic!("Zero denominator");
        }

        let g = num.gcd(&den);
        let (mut num, mut den) = if g.is_one() {
            (num, den)
        } else {
            (num.quot_rem(&g).0, den.quot_rem(&g).0)
        };

        if den.is_negative() {
            num = -num;
            den = -den;
        }

        Rational {
            numerator: num,
            denominator: den,
        }
    }

    pub fn zero() -> Rational {
        Rational::from(Integer::zero())
    }

    pub fn one() -> Rational {
        Rational::from(Integer::one())
    }

    pub fn numerator(&self) -> &Integer {
        &self.numerator
    }

    pub fn denominator(&self) -> &Integer {
        &self.denominator
    }

    pub fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.numerator.is_one() && self.denominator.is_one()
    }

    pub fn is_integer(&self) -> bool {
        self.denominator.is_one()
    }

    pub fn is_negative(&self) -> bool {
        self.numerator.is_negative()
    }

    pub fn add(&self, other: &Rational) -> Rational {
        if self.is_integer() && other.is_integer() {
            return Rational::from(&self.numerator + &other.numerator);
        }

        Rational::new(
            &(&self.numerator * &other.denominator) + &(&other.numerator * &self.denominator),
            &self.denominator * &other.denominator,
        )
    }

    pub fn sub(&self, other: &Rational) -> Rational {
        self.add(&other.neg())
    }

    pub fn mul(&self, other: &Rational) -> Rational {
        if self.is_integer() && other.is_integer() {
            return Rational::from(&self.numerator * &other.numerator);
        }

        Rational::new(
            &self.numerator * &other.numerator,
            &self.denominator * &other.denominator,
        )
    }

    pub fn neg(&self) -> Rational {
        Rational {
            numerator: -&self.numerator,
            denominator: self.denominator.clone(),
        }
    }

    /// Panics when `self` is zero.
    pub fn inv(&self) -> Rational {
        Rational::new(self.denominator.clone(), self.numerator.clone())
    }

    pub fn div(&self, other: &Rational) -> Rational {
        self.mul(&other.inv())
    }

    pub fn pow(&self, e: u64) -> Rational {
        Rational {
            numerator: self.numerator.pow(e),
            denominator: self.denominator.pow(e),
        }
    }

    pub fn abs(&self) -> Rational {
        if self.is_negative() {
            self.neg()
        } else {
            self.clone()
        }
    }

    /// The gcd of two rationals is `gcd(num)/lcm(den)`, so that both
    /// arguments divided by the gcd are coprime integers.
    pub fn gcd(&self, other: &Rational) -> Rational {
        if self.is_zero() {
            return other.abs();
        }
        if other.is_zero() {
            return self.abs();
        }

        Rational::new(
            self.numerator.gcd(&other.numerator),
            self.denominator.lcm(&other.denominator),
        )
    }
}

impl Display for Rational {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.denominator.is_one() {
            self.numerator.fmt(f)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

impl Display for RationalField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("Q")
    }
}

impl Ring for RationalField {
    type Element = Rational;

    #[inline]
    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a.add(b)
    }

    #[inline]
    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a.sub(b)
    }

    #[inline]
    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a.mul(b)
    }

    #[inline]
    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = a.add(b);
    }

    #[inline]
    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = a.sub(b);
    }

    #[inline]
    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = a.mul(b);
    }

    #[inline]
    fn add_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a = a.add(&b.mul(c));
    }

    #[inline]
    fn sub_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a = a.sub(&b.mul(c));
    }

    #[inline]
    fn neg(&self, a: &Self::Element) -> Self::Element {
        a.neg()
    }

    #[inline]
    fn zero(&self) -> Self::Element {
        Rational::zero()
    }

    #[inline]
    fn one(&self) -> Self::Element {
        Rational::one()
    }

    #[inline]
    fn nth(&self, n: &Integer) -> Self::Element {
        Rational::from(n.clone())
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
        !a.is_zero()
    }

    #[inline]
    fn one_is_gcd_unit() -> bool {
        false
    }

    fn characteristic(&self) -> Integer {
        Integer::zero()
    }

    fn size(&self) -> Integer {
        Integer::zero()
    }

    fn is_field(&self) -> bool {
        true
    }

    fn signum(&self, a: &Self::Element) -> i8 {
        a.numerator.signum()
    }

    fn abs(&self, a: &Self::Element) -> Self::Element {
        a.abs()
    }

    fn try_div(&self, a: &Self::Element, b: &Self::Element) -> Option<Self::Element> {
        if b.is_zero() {
            None
        } else {
            Some(a.div(b))
        }
    }

    fn sample(&self, rng: &mut impl rand::RngCore, range: (i64, i64)) -> Self::Element {
        let num = rng.gen_range(range.0..range.1);
        let den = rng.gen_range(1..range.1.max(2));
        Rational::from((num, den))
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

        // a fraction in an exponent needs parentheses
        if state.in_exp && !element.is_integer() {
            write!(f, "({})", element)?;
            Ok(true)
        } else {
            write!(f, "{}", element)?;
            Ok(false)
        }
    }
}

impl EuclideanDomain for RationalField {
    fn rem(&self, _a: &Self::Element, _b: &Self::Element) -> Self::Element {
        Rational::zero()
    }

    fn quot_rem(&self, a: &Self::Element, b: &Self::Element) -> (Self::Element, Self::Element) {
        (a.div(b), Rational::zero())
    }

    fn gcd(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a.gcd(b)
    }
}

impl Field for RationalField {
    #[inline]
    fn div(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a.div(b)
    }

    #[inline]
    fn div_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = a.div(b);
    }

    #[inline]
    fn inv(&self, a: &Self::Element) -> Self::Element {
        a.inv()
    }
}

impl RationalField {
    /// The least common multiple of the denominators of `coeffs`.
    pub fn common_denominator<'a>(&self, coeffs: impl IntoIterator<Item = &'a Rational>) -> Integer {
        coeffs
            .into_iter()
            .fold(Integer::one(), |acc, c| Z.lcm(&acc, &c.denominator))
    }
}

#[cfg(test)]
mod test {
    use crate::domains::{integer::Integer, EuclideanDomain, Field, Ring};

    use super::{Rational, Q};

    #[test]
    fn normalization() {
        let r = Rational::from((6, -4));
        assert_eq!(r.numerator(), &Integer::new(-3));
        assert_eq!(r.denominator(), &Integer::new(2));
        assert_eq!(r.to_string(), "-3/2");
    }

    #[test]
    fn arithmetic() {
        let a = Rational::from((1, 2));
        let b = Rational::from((1, 3));
        assert_eq!(Q.add(&a, &b), Rational::from((5, 6)));
        assert_eq!(Q.sub(&a, &b), Rational::from((1, 6)));
        assert_eq!(Q.div(&a, &b), Rational::from((3, 2)));
        assert_eq!(Q.inv(&Rational::from((-2, 3))), Rational::from((-3, 2)));
        assert!(a > b);
    }

    #[test]
    fn gcd() {
        let a = Rational::from((4, 3));
        let b = Rational::from((6, 5));
        assert_eq!(Q.gcd(&a, &b), Rational::from((2, 15)));
        assert_eq!(
            Q.common_denominator(&[a, b, Rational::from((1, 2))]),
            Integer::new(30)
        );
    }

    #[test]
    fn printing() {
        let r = Rational::from((3, 2));
        let mut s = String::new();
        Q.format(
            &r,
            &Default::default(),
            crate::printer::PrintState {
                in_sum: true,
                in_product: false,
                in_exp: false,
            },
            &mut s,
        )
        .unwrap();
        assert_eq!(s, "+3/2");
    }
}
