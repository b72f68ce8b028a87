//! Complex numbers `a + b*i` with components in a base ring.
//!
//! Over a field in which `-1` has no square root, such as `Q` or `Z_p` with
//! `p = 3 mod 4`, the complex numbers form a field. Over the integers they form
//! the Euclidean domain of Gaussian integers.

use std::fmt::{Display, Formatter};

use crate::error::PolynomialError;
use crate::poly::factor::Factorize;
use crate::poly::gcd::PolynomialGCD;
use crate::poly::order::MonomialOrder;
use crate::poly::polynomial::MultivariatePolynomial;
use crate::poly::squarefree::{pth_root_finite, PthRoot};
use crate::poly::Exponent;
use crate::printer::{PrintOptions, PrintState};
use crate::settings::{FactorSettings, GcdAlgorithm};

use super::integer::{Integer, IntegerRing};
use super::{EuclideanDomain, Field, InternalOrdering, Ring};

/// A complex number with real part `re` and imaginary part `im`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Complex<T> {
    pub re: T,
    pub im: T,
}

impl<T> Complex<T> {
    pub fn new(re: T, im: T) -> Complex<T> {
        Complex { re, im }
    }
}

impl<T: InternalOrdering> InternalOrdering for Complex<T> {
    fn internal_cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.re
            .internal_cmp(&other.re)
            .then_with(|| self.im.internal_cmp(&other.im))
    }
}

/// The ring `R[i]` with `i^2 = -1`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ComplexField<R: Ring> {
    ring: R,
}

impl<R: Ring> ComplexField<R> {
    pub fn new(ring: R) -> ComplexField<R> {
        ComplexField { ring }
    }

    pub fn base_ring(&self) -> &R {
        &self.ring
    }

    /// The imaginary unit.
    pub fn i(&self) -> Complex<R::Element> {
        Complex::new(self.ring.zero(), self.ring.one())
    }

    /// Embed an element of the base ring.
    pub fn real(&self, re: R::Element) -> Complex<R::Element> {
        Complex::new(re, self.ring.zero())
    }

    pub fn conjugate(&self, a: &Complex<R::Element>) -> Complex<R::Element> {
        Complex::new(a.re.clone(), self.ring.neg(&a.im))
    }

    /// The norm `a * conj(a) = re^2 + im^2`.
    pub fn norm(&self, a: &Complex<R::Element>) -> R::Element {
        let mut n = self.ring.mul(&a.re, &a.re);
        self.ring.add_mul_assign(&mut n, &a.im, &a.im);
        n
    }

    fn mul_i(&self, a: &Complex<R::Element>) -> Complex<R::Element> {
        Complex::new(self.ring.neg(&a.im), a.re.clone())
    }
}

impl<R: Ring> Display for ComplexField<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[i]", self.ring)
    }
}

impl<R: Ring> Ring for ComplexField<R> {
    type Element = Complex<R::Element>;

    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        Complex::new(self.ring.add(&a.re, &b.re), self.ring.add(&a.im, &b.im))
    }

    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        Complex::new(self.ring.sub(&a.re, &b.re), self.ring.sub(&a.im, &b.im))
    }

    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        let mut re = self.ring.mul(&a.re, &b.re);
        self.ring.sub_mul_assign(&mut re, &a.im, &b.im);
        let mut im = self.ring.mul(&a.re, &b.im);
        self.ring.add_mul_assign(&mut im, &a.im, &b.re);
        Complex::new(re, im)
    }

    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        self.ring.add_assign(&mut a.re, &b.re);
        self.ring.add_assign(&mut a.im, &b.im);
    }

    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        self.ring.sub_assign(&mut a.re, &b.re);
        self.ring.sub_assign(&mut a.im, &b.im);
    }

    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.mul(a, b);
    }

    fn add_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        let p = self.mul(b, c);
        self.add_assign(a, &p);
    }

    fn sub_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        let p = self.mul(b, c);
        self.sub_assign(a, &p);
    }

    fn neg(&self, a: &Self::Element) -> Self::Element {
        Complex::new(self.ring.neg(&a.re), self.ring.neg(&a.im))
    }

    fn zero(&self) -> Self::Element {
        Complex::new(self.ring.zero(), self.ring.zero())
    }

    fn one(&self) -> Self::Element {
        self.real(self.ring.one())
    }

    fn nth(&self, n: &Integer) -> Self::Element {
        self.real(self.ring.nth(n))
    }

    fn pow(&self, b: &Self::Element, mut e: u64) -> Self::Element {
        let mut result = self.one();
        let mut base = b.clone();
        while e > 0 {
            if e % 2 == 1 {
                result = self.mul(&result, &base);
            }
            e /= 2;
            if e > 0 {
                base = self.mul(&base, &base);
            }
        }
        result
    }

    fn is_zero(a: &Self::Element) -> bool {
        R::is_zero(&a.re) && R::is_zero(&a.im)
    }

    fn is_one(&self, a: &Self::Element) -> bool {
        self.ring.is_one(&a.re) && R::is_zero(&a.im)
    }

    /// An element is a unit iff its norm is a unit.
    fn is_unit(&self, a: &Self::Element) -> bool {
        self.ring.is_unit(&self.norm(a))
    }

    fn one_is_gcd_unit() -> bool {
        R::one_is_gcd_unit()
    }

    fn characteristic(&self) -> Integer {
        self.ring.characteristic()
    }

    fn size(&self) -> Integer {
        self.ring.size().pow(2)
    }

    /// `-1` has no square root in characteristic zero or in characteristic `p = 3 mod 4`.
    fn is_field(&self) -> bool {
        if !self.ring.is_field() {
            return false;
        }

        let c = self.characteristic();
        c.is_zero() || c.to_u64().map(|p| p % 4 == 3).unwrap_or(false)
    }

    fn try_div(&self, a: &Self::Element, b: &Self::Element) -> Option<Self::Element> {
        if Self::is_zero(b) {
            return None;
        }

        let n = self.norm(b);
        let t = self.mul(a, &self.conjugate(b));
        Some(Complex::new(
            self.ring.try_div(&t.re, &n)?,
            self.ring.try_div(&t.im, &n)?,
        ))
    }

    fn sample(&self, rng: &mut impl rand::RngCore, range: (i64, i64)) -> Self::Element {
        Complex::new(self.ring.sample(rng, range), self.ring.sample(rng, range))
    }

    fn format<W: std::fmt::Write>(
        &self,
        element: &Self::Element,
        opts: &PrintOptions,
        state: PrintState,
        f: &mut W,
    ) -> Result<bool, std::fmt::Error> {
        if R::is_zero(&element.im) {
            return self.ring.format(&element.re, opts, state, f);
        }

        let re_zero = R::is_zero(&element.re);
        let mut s = String::new();
        if !re_zero {
            self.ring
                .format(&element.re, opts, PrintState::new(), &mut s)?;
        }

        if self.ring.is_one(&element.im) {
            if !re_zero {
                s.push('+');
            }
        } else if self.ring.is_one(&self.ring.neg(&element.im)) {
            s.push('-');
        } else {
            let im_state = PrintState {
                in_sum: !re_zero,
                in_product: true,
                in_exp: false,
            };
            self.ring.format(&element.im, opts, im_state, &mut s)?;
            s.push(opts.multiplication_operator);
        }
        s.push('i');

        let wrap = !re_zero && (state.in_product || state.in_exp);
        if state.in_sum && (wrap || !s.starts_with('-')) {
            f.write_char('+')?;
        }
        if wrap {
            write!(f, "({})", s)?;
        } else {
            f.write_str(&s)?;
        }
        Ok(wrap)
    }
}

impl<R: Field> EuclideanDomain for ComplexField<R> {
    fn rem(&self, _a: &Self::Element, _b: &Self::Element) -> Self::Element {
        self.zero()
    }

    fn quot_rem(&self, a: &Self::Element, b: &Self::Element) -> (Self::Element, Self::Element) {
        (self.div(a, b), self.zero())
    }

    fn gcd(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        if Self::is_zero(a) && Self::is_zero(b) {
            self.zero()
        } else {
            self.one()
        }
    }
}

impl<R: Field> Field for ComplexField<R> {
    fn div(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        self.mul(a, &self.inv(b))
    }

    fn div_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.div(a, b);
    }

    fn inv(&self, a: &Self::Element) -> Self::Element {
        let n = self.norm(a);
        if R::is_zero(&n) {
            panic!("{} is not invertible in {}", self.printer(a), self);
        }

        let n_inv = self.ring.inv(&n);
        let c = self.conjugate(a);
        Complex::new(self.ring.mul(&c.re, &n_inv), self.ring.mul(&c.im, &n_inv))
    }
}

impl ComplexField<IntegerRing> {
    /// The associate with a positive real part and a non-negative imaginary part.
    pub fn normalize(&self, a: &Complex<Integer>) -> Complex<Integer> {
        if Self::is_zero(a) {
            return a.clone();
        }

        let mut r = a.clone();
        for _ in 0..4 {
            if r.re > Integer::zero() && r.im >= Integer::zero() {
                return r;
            }
            r = self.mul_i(&r);
        }
        unreachable!("No normalized associate of {}", self.printer(a))
    }

    /// Round `a / n` to the nearest integer, for positive `n`.
    fn round_div(a: &Integer, n: &Integer) -> Integer {
        let num = &(a * &Integer::new(2)) + n;
        num.quot_rem(&(n * &Integer::new(2))).0
    }
}

/// The Gaussian integers, with division that rounds the exact quotient
/// to the nearest lattice point.
impl EuclideanDomain for ComplexField<IntegerRing> {
    fn rem(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        self.quot_rem(a, b).1
    }

    fn quot_rem(&self, a: &Self::Element, b: &Self::Element) -> (Self::Element, Self::Element) {
        if Self::is_zero(b) {
            panic!("Division by zero");
        }

        let n = self.norm(b);
        let t = self.mul(a, &self.conjugate(b));
        let q = Complex::new(Self::round_div(&t.re, &n), Self::round_div(&t.im, &n));
        let r = self.sub(a, &self.mul(&q, b));
        (q, r)
    }

    fn gcd(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        let mut a = a.clone();
        let mut b = b.clone();
        while !Self::is_zero(&b) {
            let r = self.rem(&a, &b);
            a = std::mem::replace(&mut b, r);
        }
        self.normalize(&a)
    }
}

impl<R: Field, E: Exponent> PolynomialGCD<E> for ComplexField<R> {
    fn default_gcd_algorithm(&self) -> GcdAlgorithm {
        GcdAlgorithm::PrimitivePrs
    }
}

impl<E: Exponent> PolynomialGCD<E> for ComplexField<IntegerRing> {
    fn default_gcd_algorithm(&self) -> GcdAlgorithm {
        GcdAlgorithm::SubresultantPrs
    }
}

impl<R: PthRoot> PthRoot for ComplexField<R> {
    /// The Frobenius map sends `a + b*i` to `a^p + b^p * i^p` with `i^p = +-i`
    /// for odd `p`, so the root is taken per component.
    fn pth_root(&self, a: &Self::Element) -> Result<Self::Element, PolynomialError> {
        if self.is_finite() {
            return pth_root_finite(self, a);
        }

        let Some(p) = self.characteristic().to_u64().filter(|p| *p > 2) else {
            return Err(PolynomialError::Unsupported(
                "p-th root of complex numbers in characteristic zero or two",
            ));
        };

        let im = if p % 4 == 1 {
            a.im.clone()
        } else {
            self.ring.neg(&a.im)
        };
        Ok(Complex::new(
            self.ring.pth_root(&a.re)?,
            self.ring.pth_root(&im)?,
        ))
    }
}

impl<R: Ring, E: Exponent, O: MonomialOrder> Factorize
    for MultivariatePolynomial<ComplexField<R>, E, O>
{
    fn factor_squarefree_univariate(
        &self,
        _settings: &FactorSettings,
    ) -> Result<Vec<Self>, PolynomialError> {
        if self.total_degree() <= 1 {
            return Ok(vec![self.clone()]);
        }

        Err(PolynomialError::Unsupported(
            "factorization over complex coefficients",
        ))
    }
}

#[cfg(test)]
mod test {
    use crate::domains::finite_field::{FiniteField, FiniteFieldCore};
    use crate::domains::integer::{Integer, Z};
    use crate::domains::rational::{Rational, Q};
    use crate::domains::{EuclideanDomain, Field, Ring};
    use crate::poly::polynomial::PolynomialRing;
    use crate::poly::squarefree::PthRoot;
    use crate::poly::variables;

    use super::{Complex, ComplexField};

    fn gaussian(re: i64, im: i64) -> Complex<Integer> {
        Complex::new(Integer::new(re), Integer::new(im))
    }

    #[test]
    fn rational_complex_field() {
        let c = ComplexField::new(Q);
        let q = |re: i64, im: i64| Complex::new(Rational::from(re), Rational::from(im));

        assert!(c.is_field());
        assert_eq!(c.mul(&q(1, 2), &q(3, -1)), q(5, 5));
        assert_eq!(c.mul(&c.i(), &c.i()), q(-1, 0));
        assert_eq!(
            c.inv(&q(1, 1)),
            Complex::new(Rational::from((1, 2)), Rational::from((-1, 2)))
        );
        assert_eq!(c.printer(&q(5, 5)).to_string(), "5+5*i");
        assert_eq!(c.printer(&q(0, -1)).to_string(), "-i");
        assert_eq!(c.printer(&q(3, 0)).to_string(), "3");
    }

    #[test]
    fn gaussian_integers() {
        let c = ComplexField::new(Z);

        assert!(!c.is_field());
        assert!(c.is_unit(&c.i()));
        assert!(!c.is_unit(&gaussian(1, 1)));
        assert_eq!(c.try_div(&gaussian(2, 0), &gaussian(1, 1)), Some(gaussian(1, -1)));
        assert_eq!(c.try_div(&gaussian(1, 0), &gaussian(1, 1)), None);

        // 5 = (2 + i)(2 - i) and 3 + i = (1 + i)(2 - i)
        assert_eq!(c.gcd(&gaussian(5, 0), &gaussian(3, 1)), gaussian(1, 2));

        let (q, r) = c.quot_rem(&gaussian(7, 3), &gaussian(2, -1));
        assert_eq!(c.add(&c.mul(&q, &gaussian(2, -1)), &r), gaussian(7, 3));
        assert!(c.norm(&r) < c.norm(&gaussian(2, -1)));
    }

    #[test]
    fn finite_components() {
        let z3 = ComplexField::new(FiniteField::<u32>::new(3));
        assert!(z3.is_field());
        assert_eq!(z3.size(), Integer::new(9));

        let x = z3.add(&z3.one(), &z3.i());
        assert_eq!(z3.pth_root(&z3.pow(&x, 3)).unwrap(), x);
        assert_eq!(z3.mul(&x, &z3.inv(&x)), z3.one());

        // 5 = (2 + i)(2 - i) is zero in Z_5
        let z5 = ComplexField::new(FiniteField::<u32>::new(5));
        assert!(!z5.is_field());
        let f = z5.base_ring();
        let a = Complex::new(f.to_element(2), f.to_element(1));
        let b = Complex::new(f.to_element(2), f.to_element(4));
        assert_eq!(z5.mul(&a, &b), z5.zero());
    }

    #[test]
    fn polynomials_over_gaussian_rationals() {
        let c = ComplexField::new(Q);
        let r: PolynomialRing<_, u16> = PolynomialRing::new(c, variables(&["x"]));
        let x = r.variable(0).unwrap();
        let i = r.constant(c.i());
        let one = r.constant(c.one());

        // x^2 + 1 = (x - i)(x + i)
        let f = &(&x * &x) + &one;
        let g = &x - &i;
        assert_eq!(f.gcd(&g), g);

        let p = &(&g * &g) * &(&x + &one);
        let sqf = p.square_free_factorization();
        assert_eq!(sqf.len(), 2);
        assert!(sqf.contains(&(g.clone(), 2)));
        assert!(sqf.contains(&(&x + &one, 1)));
    }
}
