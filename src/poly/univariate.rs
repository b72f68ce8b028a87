use std::fmt::Display;
use std::ops::{Add, Mul, Neg, Sub};
use std::sync::Arc;

use crate::domains::integer::Integer;
use crate::domains::{EuclideanDomain, Field, Ring};
use crate::error::PolynomialError;
use crate::printer::{PrintOptions, PrintState};

use super::Variable;

/// A dense univariate polynomial. The coefficient of `x^i` is stored at index `i`
/// and the highest coefficient is never zero.
#[derive(Clone)]
pub struct UnivariatePolynomial<F: Ring> {
    pub coefficients: Vec<F::Element>,
    pub variable: Arc<Variable>,
    pub ring: F,
}

impl<F: Ring> std::fmt::Debug for UnivariatePolynomial<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.is_zero() {
            return write!(f, "[]");
        }
        let mut first = true;
        write!(f, "[ ")?;
        for c in self.coefficients.iter() {
            if first {
                first = false;
            } else {
                write!(f, ", ")?;
            }
            write!(f, "{{ {:?} }}", c)?;
        }
        write!(f, " ]")
    }
}

impl<F: Ring> Display for UnivariatePolynomial<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        let opts = PrintOptions::default().update_with_fmt(f);
        let mut s = String::new();
        let mut first = true;
        for (e, c) in self.coefficients.iter().enumerate().rev() {
            if F::is_zero(c) {
                continue;
            }

            let state = PrintState {
                in_sum: !first,
                in_product: e > 0,
                in_exp: false,
            };

            if e > 0 && self.ring.is_one(c) {
                if !first {
                    s.push('+');
                }
            } else if e > 0 && self.ring.is_one(&self.ring.neg(c)) {
                s.push('-');
            } else {
                self.ring.format(c, &opts, state, &mut s)?;
                if e > 0 {
                    s.push(opts.multiplication_operator);
                }
            }
            first = false;

            match e {
                0 => {}
                1 => s.push_str(&self.variable.to_string()),
                _ => s.push_str(&format!("{}^{}", self.variable, e)),
            }
        }
        f.write_str(&s)
    }
}

impl<F: Ring> UnivariatePolynomial<F> {
    /// Constructs a zero polynomial. Instead of using this constructor,
    /// prefer to create new polynomials from existing ones, so that the
    /// variable and ring are inherited.
    #[inline]
    pub fn new(ring: &F, cap: Option<usize>, variable: Arc<Variable>) -> Self {
        Self {
            coefficients: Vec::with_capacity(cap.unwrap_or(0)),
            ring: ring.clone(),
            variable,
        }
    }

    /// Create a polynomial from dense coefficients, lowest power first.
    pub fn from_coefficients(ring: F, coefficients: Vec<F::Element>, variable: Arc<Variable>) -> Self {
        let mut r = Self {
            coefficients,
            ring,
            variable,
        };
        r.truncate();
        r
    }

    /// Constructs a zero polynomial, inheriting the ring and variable from `self`.
    #[inline]
    pub fn zero(&self) -> Self {
        Self {
            coefficients: vec![],
            ring: self.ring.clone(),
            variable: self.variable.clone(),
        }
    }

    #[inline]
    pub fn zero_with_capacity(&self, cap: usize) -> Self {
        Self::new(&self.ring, Some(cap), self.variable.clone())
    }

    /// Constructs a constant polynomial, inheriting the ring and variable from `self`.
    #[inline]
    pub fn constant(&self, coeff: F::Element) -> Self {
        if F::is_zero(&coeff) {
            return self.zero();
        }

        Self {
            coefficients: vec![coeff],
            ring: self.ring.clone(),
            variable: self.variable.clone(),
        }
    }

    #[inline]
    pub fn one(&self) -> Self {
        self.constant(self.ring.one())
    }

    /// Constructs `coeff * x^exponent`.
    #[inline]
    pub fn monomial(&self, coeff: F::Element, exponent: usize) -> Self {
        if F::is_zero(&coeff) {
            return self.zero();
        }

        let mut coefficients = vec![self.ring.zero(); exponent + 1];
        coefficients[exponent] = coeff;

        Self {
            coefficients,
            ring: self.ring.clone(),
            variable: self.variable.clone(),
        }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.coefficients.is_empty()
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        self.coefficients.len() == 1 && self.ring.is_one(&self.coefficients[0])
    }

    /// Returns true if the polynomial is constant.
    #[inline]
    pub fn is_constant(&self) -> bool {
        self.coefficients.len() <= 1
    }

    /// Get the constant term of the polynomial.
    #[inline]
    pub fn get_constant(&self) -> F::Element {
        self.coefficients
            .first()
            .cloned()
            .unwrap_or_else(|| self.ring.zero())
    }

    /// Get the leading coefficient.
    pub fn lcoeff(&self) -> F::Element {
        self.coefficients
            .last()
            .cloned()
            .unwrap_or_else(|| self.ring.zero())
    }

    /// The degree of the polynomial. The zero polynomial has degree 0.
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Remove trailing zero coefficients.
    pub(crate) fn truncate(&mut self) {
        while let Some(c) = self.coefficients.last() {
            if F::is_zero(c) {
                self.coefficients.pop();
            } else {
                break;
            }
        }
    }

    /// Compute `self^pow`.
    pub fn pow(&self, mut pow: usize) -> Self {
        if pow == 0 {
            return self.one();
        }

        let mut x = self.clone();
        let mut y = self.one();
        while pow != 1 {
            if pow % 2 == 1 {
                y = &y * &x;
                pow -= 1;
            }

            x = &x * &x;
            pow /= 2;
        }

        &x * &y
    }

    /// Multiply by `x^exp`.
    pub fn mul_exp(&self, exp: usize) -> Self {
        if exp == 0 || self.is_zero() {
            return self.clone();
        }

        let mut coefficients = vec![self.ring.zero(); exp];
        coefficients.extend(self.coefficients.iter().cloned());
        Self {
            coefficients,
            ring: self.ring.clone(),
            variable: self.variable.clone(),
        }
    }

    /// Multiply every coefficient by `coeff`.
    pub fn mul_coeff(mut self, coeff: &F::Element) -> Self {
        for c in &mut self.coefficients {
            if !F::is_zero(c) {
                self.ring.mul_assign(c, coeff);
            }
        }

        self.truncate();
        self
    }

    /// Evaluate the polynomial using Horner's method.
    pub fn evaluate(&self, x: &F::Element) -> F::Element {
        let mut r = self.ring.zero();
        for c in self.coefficients.iter().rev() {
            self.ring.mul_assign(&mut r, x);
            self.ring.add_assign(&mut r, c);
        }
        r
    }

    /// Compute `self(g)`.
    pub fn compose(&self, g: &Self) -> Self {
        let mut r = self.zero();
        for c in self.coefficients.iter().rev() {
            r = &(&r * g) + &self.constant(c.clone());
        }
        r
    }

    pub fn derivative(&self) -> Self {
        if self.is_constant() {
            return self.zero();
        }

        let mut r = self.zero_with_capacity(self.coefficients.len() - 1);
        for (e, c) in self.coefficients.iter().enumerate().skip(1) {
            r.coefficients
                .push(self.ring.mul(c, &self.ring.nth(&Integer::from(e as u64))));
        }
        r.truncate();
        r
    }

    /// Map the coefficients to another ring.
    pub fn map_coeff<U: Ring, T: Fn(&F::Element) -> U::Element>(
        &self,
        f: T,
        ring: U,
    ) -> UnivariatePolynomial<U> {
        UnivariatePolynomial::from_coefficients(
            ring,
            self.coefficients.iter().map(f).collect(),
            self.variable.clone(),
        )
    }

    /// Compute the pseudo-quotient and pseudo-remainder, such that
    /// `lcoeff(div)^(deg(self) - deg(div) + 1) * self = q * div + r`.
    pub fn pseudo_quot_rem(&self, div: &Self) -> Result<(Self, Self), PolynomialError> {
        if div.is_zero() {
            return Err(PolynomialError::DivisionByZero);
        }

        Ok(self.pseudo_divide(div))
    }

    /// Pseudo-division by a non-zero `div`.
    pub(crate) fn pseudo_divide(&self, div: &Self) -> (Self, Self) {
        if self.degree() < div.degree() || self.is_zero() {
            return (self.zero(), self.clone());
        }

        let m = div.degree();
        let lc = div.lcoeff();
        let mut e = self.degree() - m + 1;

        let mut q = self.zero();
        let mut r = self.clone();
        while !r.is_zero() && r.degree() >= m {
            let s = self.monomial(r.lcoeff(), r.degree() - m);
            q = q.mul_coeff(&lc) + &s;
            r = r.mul_coeff(&lc) - &(div * &s);
            e -= 1;
        }

        let scale = self.ring.pow(&lc, e as u64);
        (q.mul_coeff(&scale), r.mul_coeff(&scale))
    }

    /// The pseudo-remainder of [UnivariatePolynomial::pseudo_quot_rem].
    pub fn pseudo_rem(&self, div: &Self) -> Result<Self, PolynomialError> {
        Ok(self.pseudo_quot_rem(div)?.1)
    }

    /// Divide by `div` if the division is exact, using exact coefficient division.
    pub fn divides(&self, div: &Self) -> Option<Self> {
        if div.is_zero() {
            return None;
        }

        if self.is_zero() {
            return Some(self.zero());
        }

        if self.degree() < div.degree() {
            return None;
        }

        let m = div.degree();
        let lc = div.lcoeff();
        let mut q = self.zero();
        q.coefficients = vec![self.ring.zero(); self.degree() - m + 1];

        let mut r = self.clone();
        while !r.is_zero() && r.degree() >= m {
            let n = r.degree();
            let qq = self.ring.try_div(&r.coefficients[n], &lc)?;
            r = r - div.mul_exp(n - m).mul_coeff(&qq);
            q.coefficients[n - m] = qq;
        }

        if r.is_zero() {
            q.truncate();
            Some(q)
        } else {
            None
        }
    }

    /// Divide every coefficient by `c`, if all divisions are exact.
    pub fn try_div_coeff(&self, c: &F::Element) -> Option<Self> {
        let coefficients = self
            .coefficients
            .iter()
            .map(|x| self.ring.try_div(x, c))
            .collect::<Option<Vec<_>>>()?;
        Some(Self::from_coefficients(
            self.ring.clone(),
            coefficients,
            self.variable.clone(),
        ))
    }
}

impl<F: EuclideanDomain> UnivariatePolynomial<F> {
    /// Get the content from the coefficients. The content is non-negative for rings
    /// with a sign and the leading coefficient for fields.
    pub fn content(&self) -> F::Element {
        if self.coefficients.is_empty() {
            return self.ring.zero();
        }

        if self.ring.is_field() {
            return self.lcoeff();
        }

        let mut c = self.coefficients[0].clone();
        for cc in self.coefficients.iter().skip(1) {
            // early return if possible
            if self.ring.is_unit(&c) {
                break;
            }

            c = self.ring.gcd(&c, cc);
        }

        self.ring.abs(&c)
    }

    /// Divide every coefficient with `other`.
    pub fn div_coeff(self, other: &F::Element) -> Self {
        if self.ring.is_one(other) {
            return self;
        }

        match self.try_div_coeff(other) {
            Some(r) => r,
            None => panic!("{} does not divide {}", self.ring.printer(other), self),
        }
    }

    /// Make the polynomial primitive by removing the content. Over a field,
    /// the polynomial becomes monic.
    pub fn primitive_part(&self) -> Self {
        if self.is_zero() {
            return self.clone();
        }

        let c = self.content();
        self.clone().div_coeff(&c)
    }
}

impl<F: Field> UnivariatePolynomial<F> {
    /// Make the polynomial monic.
    pub fn monic(self) -> Self {
        if self.is_zero() || self.ring.is_one(&self.lcoeff()) {
            return self;
        }

        let inv = self.ring.inv(&self.lcoeff());
        self.mul_coeff(&inv)
    }

    /// Divide with remainder over a field.
    pub fn quot_rem(&self, div: &Self) -> Result<(Self, Self), PolynomialError> {
        if div.is_zero() {
            return Err(PolynomialError::DivisionByZero);
        }

        if self.is_zero() || self.degree() < div.degree() {
            return Ok((self.zero(), self.clone()));
        }

        let m = div.degree();
        let u = self.ring.inv(&div.lcoeff());

        let mut q = self.zero();
        q.coefficients = vec![self.ring.zero(); self.degree() - m + 1];

        let mut r = self.clone();
        while !r.is_zero() && r.degree() >= m {
            let n = r.degree();
            let qq = self.ring.mul(&r.coefficients[n], &u);
            r = r - div.mul_exp(n - m).mul_coeff(&qq);
            q.coefficients[n - m] = qq;
        }

        q.truncate();
        Ok((q, r))
    }

    /// Compute the remainder `self % div`. Panics when `div` is zero.
    pub fn rem(&self, div: &Self) -> Self {
        match self.quot_rem(div) {
            Ok((_, r)) => r,
            Err(e) => panic!("Cannot compute {} mod {}: {}", self, div, e),
        }
    }

    /// Compute the univariate GCD using Euclid's algorithm. The result is monic.
    pub fn gcd(&self, b: &Self) -> Self {
        if self.is_zero() {
            return b.clone().monic();
        }
        if b.is_zero() {
            return self.clone().monic();
        }

        let mut c = self.clone();
        let mut d = b.clone();
        if c.degree() < d.degree() {
            std::mem::swap(&mut c, &mut d);
        }

        let mut r = c.rem(&d);
        while !r.is_zero() {
            c = d;
            d = r;
            r = c.rem(&d);
        }

        d.monic()
    }

    /// Compute the extended GCD `(g, s, t)` with `s * self + t * b = g`, where `g` is monic.
    pub fn eea(&self, b: &Self) -> (Self, Self, Self) {
        if self.is_zero() && b.is_zero() {
            return (self.zero(), self.zero(), self.zero());
        }

        let mut r0 = self.clone();
        let mut r1 = b.clone();
        let mut s0 = self.one();
        let mut s1 = self.zero();
        let mut t0 = self.zero();
        let mut t1 = self.one();

        while !r1.is_zero() {
            let (q, r) = match r0.quot_rem(&r1) {
                Ok(qr) => qr,
                Err(e) => panic!("Division failed in extended Euclid: {}", e),
            };
            r0 = std::mem::replace(&mut r1, r);
            let s = &s0 - &(&q * &s1);
            s0 = std::mem::replace(&mut s1, s);
            let t = &t0 - &(&q * &t1);
            t0 = std::mem::replace(&mut t1, t);
        }

        let inv = self.ring.inv(&r0.lcoeff());
        (r0.mul_coeff(&inv), s0.mul_coeff(&inv), t0.mul_coeff(&inv))
    }

    /// Solve `s * self + t * b = rhs` with `deg(s) < deg(b)`, for coprime `self` and `b`.
    pub fn diophantine(&self, b: &Self, rhs: &Self) -> Result<(Self, Self), PolynomialError> {
        let (g, s, t) = self.eea(b);
        if !g.is_one() {
            return Err(PolynomialError::NotInvertible(format!(
                "{} and {} are not coprime",
                self, b
            )));
        }

        let s = &s * rhs;
        let t = &t * rhs;
        let (q, s) = s.quot_rem(b)?;
        let t = &t + &(&q * self);
        Ok((s, t))
    }

    /// Compute `self^e mod m`.
    pub fn pow_mod(&self, e: &Integer, m: &Self) -> Self {
        let b = self.rem(m);
        let mut r = self.one();

        let e = e.to_multi_prec();
        for i in (0..e.significant_bits()).rev() {
            r = (&r * &r).rem(m);
            if e.get_bit(i) {
                r = (&r * &b).rem(m);
            }
        }

        r
    }
}

impl<F: Ring> PartialEq for UnivariatePolynomial<F> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.ring == other.ring && self.coefficients == other.coefficients
    }
}

impl<F: Ring> Eq for UnivariatePolynomial<F> {}

impl<F: Ring> std::hash::Hash for UnivariatePolynomial<F> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.coefficients.hash(state);
    }
}

impl<'a, 'b, F: Ring> Add<&'a UnivariatePolynomial<F>> for &'b UnivariatePolynomial<F> {
    type Output = UnivariatePolynomial<F>;

    fn add(self, other: &'a UnivariatePolynomial<F>) -> Self::Output {
        let (long, short) = if self.coefficients.len() >= other.coefficients.len() {
            (self, other)
        } else {
            (other, self)
        };

        let mut r = long.clone();
        for (c, o) in r.coefficients.iter_mut().zip(&short.coefficients) {
            self.ring.add_assign(c, o);
        }
        r.truncate();
        r
    }
}

impl<'a, F: Ring> Add<&'a UnivariatePolynomial<F>> for UnivariatePolynomial<F> {
    type Output = Self;

    fn add(self, other: &'a UnivariatePolynomial<F>) -> Self::Output {
        &self + other
    }
}

impl<F: Ring> Add for UnivariatePolynomial<F> {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        &self + &other
    }
}

impl<'a, 'b, F: Ring> Sub<&'a UnivariatePolynomial<F>> for &'b UnivariatePolynomial<F> {
    type Output = UnivariatePolynomial<F>;

    fn sub(self, other: &'a UnivariatePolynomial<F>) -> Self::Output {
        self + &(-other)
    }
}

impl<'a, F: Ring> Sub<&'a UnivariatePolynomial<F>> for UnivariatePolynomial<F> {
    type Output = Self;

    fn sub(self, other: &'a UnivariatePolynomial<F>) -> Self::Output {
        &self - other
    }
}

impl<F: Ring> Sub for UnivariatePolynomial<F> {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        &self - &other
    }
}

impl<'a, F: Ring> Neg for &'a UnivariatePolynomial<F> {
    type Output = UnivariatePolynomial<F>;

    fn neg(self) -> Self::Output {
        let mut r = self.clone();
        for c in &mut r.coefficients {
            *c = self.ring.neg(c);
        }
        r
    }
}

impl<F: Ring> Neg for UnivariatePolynomial<F> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        -&self
    }
}

impl<'a, 'b, F: Ring> Mul<&'a UnivariatePolynomial<F>> for &'b UnivariatePolynomial<F> {
    type Output = UnivariatePolynomial<F>;

    fn mul(self, rhs: &'a UnivariatePolynomial<F>) -> Self::Output {
        if self.is_zero() || rhs.is_zero() {
            return self.zero();
        }

        let n = self.degree() + rhs.degree();
        let mut coefficients = vec![self.ring.zero(); n + 1];
        for (e1, c1) in self.coefficients.iter().enumerate() {
            if F::is_zero(c1) {
                continue;
            }
            for (e2, c2) in rhs.coefficients.iter().enumerate() {
                if !F::is_zero(c2) {
                    self.ring.add_mul_assign(&mut coefficients[e1 + e2], c1, c2);
                }
            }
        }

        UnivariatePolynomial::from_coefficients(self.ring.clone(), coefficients, self.variable.clone())
    }
}

impl<'a, F: Ring> Mul<&'a UnivariatePolynomial<F>> for UnivariatePolynomial<F> {
    type Output = Self;

    fn mul(self, rhs: &'a UnivariatePolynomial<F>) -> Self::Output {
        &self * rhs
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use crate::domains::finite_field::{FiniteField, FiniteFieldCore, Zp};
    use crate::domains::integer::{Integer, Z};
    use crate::domains::rational::{Rational, Q};
    use crate::poly::Variable;

    use super::UnivariatePolynomial;

    fn int_poly(c: &[i64]) -> UnivariatePolynomial<crate::domains::integer::IntegerRing> {
        UnivariatePolynomial::from_coefficients(
            Z,
            c.iter().map(|x| Integer::new(*x)).collect(),
            Arc::new(Variable::from("x")),
        )
    }

    fn rat_poly(c: &[i64]) -> UnivariatePolynomial<crate::domains::rational::RationalField> {
        UnivariatePolynomial::from_coefficients(
            Q,
            c.iter().map(|x| Rational::from(*x)).collect(),
            Arc::new(Variable::from("x")),
        )
    }

    #[test]
    fn arithmetic() {
        let a = int_poly(&[1, 1]);
        let b = int_poly(&[-1, 1]);
        assert_eq!(&a * &b, int_poly(&[-1, 0, 1]));
        assert_eq!(&a - &a, int_poly(&[]));
        assert_eq!(a.pow(2), int_poly(&[1, 2, 1]));
        assert_eq!(int_poly(&[1, 2, 1]).evaluate(&Integer::new(2)), Integer::new(9));
        assert_eq!(int_poly(&[1, 2, 3]).derivative(), int_poly(&[2, 6]));
        assert_eq!(format!("{}", int_poly(&[-1, 0, 3])), "3*x^2-1");
    }

    #[test]
    fn pseudo_division() {
        // 4 * (x^2 + 1) = (2x - 1)(2x + 1) + 5
        let a = int_poly(&[1, 0, 1]);
        let b = int_poly(&[1, 2]);
        let (q, r) = a.pseudo_quot_rem(&b).unwrap();
        assert_eq!(q, int_poly(&[-1, 2]));
        assert_eq!(r, int_poly(&[5]));
        assert_eq!(&(&q * &b) + &r, a.mul_coeff(&Integer::new(4)));
    }

    #[test]
    fn exact_division() {
        let a = int_poly(&[-1, 0, 1]);
        assert_eq!(a.divides(&int_poly(&[1, 1])), Some(int_poly(&[-1, 1])));
        assert_eq!(a.divides(&int_poly(&[1, 2])), None);
        assert_eq!(int_poly(&[2, 4, 6]).content(), Integer::new(2));
        assert_eq!(int_poly(&[2, -4]).primitive_part(), int_poly(&[1, -2]));
    }

    #[test]
    fn field_gcd() {
        let a = rat_poly(&[-1, 0, 1]);
        let b = rat_poly(&[1, 2, 1]);
        assert_eq!(a.gcd(&b), rat_poly(&[1, 1]));

        let (g, s, t) = a.eea(&rat_poly(&[2, 1]));
        assert!(g.is_one());
        assert_eq!(&(&s * &a) + &(&t * &rat_poly(&[2, 1])), g);
    }

    #[test]
    fn diophantine() {
        let f = Zp::new(7);
        let a = rat_poly(&[1, 1]).map_coeff(|c| f.element_from_integer(c.numerator()), f.clone());
        let b = rat_poly(&[2, 1]).map_coeff(|c| f.element_from_integer(c.numerator()), f.clone());
        let rhs = a.one().mul_exp(1);
        let (s, t) = a.diophantine(&b, &rhs).unwrap();
        assert!(s.degree() < b.degree());
        assert_eq!(&(&s * &a) + &(&t * &b), rhs);
    }

    #[test]
    fn equality_respects_the_ring() {
        let (f5, f7) = (Zp::new(5), Zp::new(7));
        let a = int_poly(&[1, 1]).map_coeff(|c| f5.element_from_integer(c), f5.clone());
        let b = UnivariatePolynomial::from_coefficients(f7, a.coefficients.clone(), a.variable.clone());
        assert_eq!(a.coefficients, b.coefficients);
        assert_ne!(a, b);

        let c = UnivariatePolynomial::from_coefficients(f5, a.coefficients.clone(), a.variable.clone());
        assert_eq!(a, c);
    }

    #[test]
    fn modular_power() {
        let f: FiniteField<u32> = FiniteField::new(5);
        let x = UnivariatePolynomial::new(&f, None, Arc::new(Variable::from("x")))
            .monomial(f.to_element(1), 1);
        let m = &x.pow(2) + &x.constant(f.to_element(2));
        // x^5 = x * (x^2)^2 = x * 4 = 4x mod (x^2 + 2)
        let r = x.pow_mod(&Integer::new(5), &m);
        assert_eq!(r, x.monomial(f.to_element(4), 1));
    }
}
