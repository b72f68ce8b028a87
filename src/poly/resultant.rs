use crate::domains::{EuclideanDomain, Field};

use super::gcd::PolynomialGCD;
use super::order::MonomialOrder;
use super::polynomial::MultivariatePolynomial;
use super::univariate::UnivariatePolynomial;
use super::Exponent;

/// Compute the resultant with the subresultant polynomial remainder sequence.
///
/// The contents are removed first and their contribution is restored at the end.
/// Every swap of two odd-degree operands flips the sign.
pub fn resultant_subresultant<R: EuclideanDomain>(
    a: &UnivariatePolynomial<R>,
    b: &UnivariatePolynomial<R>,
) -> R::Element {
    let ring = &a.ring;
    if a.is_zero() || b.is_zero() {
        return ring.zero();
    }

    let (mut f, mut g) = (a.clone(), b.clone());
    let mut negate = false;
    if f.degree() < g.degree() {
        std::mem::swap(&mut f, &mut g);
        negate = f.degree() % 2 == 1 && g.degree() % 2 == 1;
    }

    let (cf, cg) = (f.content(), g.content());
    let t = ring.mul(
        &ring.pow(&cf, g.degree() as u64),
        &ring.pow(&cg, f.degree() as u64),
    );
    f = f.primitive_part();
    g = g.primitive_part();

    let mut s = ring.one();
    let mut h = ring.one();
    while g.degree() > 0 {
        let delta = (f.degree() - g.degree()) as u64;
        if f.degree() % 2 == 1 && g.degree() % 2 == 1 {
            negate = !negate;
        }

        let r = f.pseudo_divide(&g).1;
        if r.is_zero() {
            return ring.zero();
        }

        f = g;
        let divisor = ring.mul(&s, &ring.pow(&h, delta));
        g = match r.try_div_coeff(&divisor) {
            Some(g) => g,
            None => unreachable!("Subresultant division by {} is not exact", ring.printer(&divisor)),
        };

        s = f.lcoeff();
        if delta > 0 {
            h = exact_div(ring, &ring.pow(&s, delta), &ring.pow(&h, delta - 1));
        }
    }

    let df = f.degree() as u64;
    if df > 0 {
        h = exact_div(ring, &ring.pow(&g.lcoeff(), df), &ring.pow(&h, df - 1));
    }

    let res = ring.mul(&t, &h);
    if negate {
        ring.neg(&res)
    } else {
        res
    }
}

fn exact_div<R: EuclideanDomain>(ring: &R, a: &R::Element, b: &R::Element) -> R::Element {
    match ring.try_div(a, b) {
        Some(q) => q,
        None => unreachable!(
            "Subresultant scaling {} / {} is not exact",
            ring.printer(a),
            ring.printer(b)
        ),
    }
}

impl<F: EuclideanDomain> UnivariatePolynomial<F> {
    /// The discriminant `(-1)^(n(n-1)/2) res(f, f') / lcoeff(f)` of a polynomial of degree `n`.
    pub fn discriminant(&self) -> F::Element {
        if self.degree() < 1 {
            return self.ring.one();
        }

        let n = self.degree() as u64;
        let r = resultant_subresultant(self, &self.derivative());
        let d = exact_div(&self.ring, &r, &self.lcoeff());
        if (n * (n - 1) / 2) % 2 == 1 {
            self.ring.neg(&d)
        } else {
            d
        }
    }
}

impl<F: Field> UnivariatePolynomial<F> {
    /// Compute the resultant with the Euclidean remainder sequence, using
    /// `res(a, b) = (-1)^(deg a deg b) lcoeff(b)^(deg a - deg r) res(b, r)` with `r = a mod b`.
    pub fn resultant(&self, other: &Self) -> F::Element {
        if self.is_zero() || other.is_zero() {
            return self.ring.zero();
        }

        let mut a = self.clone();
        let mut b = other.clone();
        let mut res = self.ring.one();

        loop {
            let (da, db) = (a.degree(), b.degree());
            if db == 0 {
                return self
                    .ring
                    .mul(&res, &self.ring.pow(&b.lcoeff(), da as u64));
            }

            let r = a.rem(&b);
            if r.is_zero() {
                return self.ring.zero();
            }

            if da % 2 == 1 && db % 2 == 1 {
                res = self.ring.neg(&res);
            }
            self.ring
                .mul_assign(&mut res, &self.ring.pow(&b.lcoeff(), (da - r.degree()) as u64));

            a = b;
            b = r;
        }
    }
}

impl<R: PolynomialGCD<E>, E: Exponent, O: MonomialOrder> MultivariatePolynomial<R, E, O> {
    /// Compute the resultant of two polynomials with respect to the variable `var`.
    /// The result no longer depends on `var`.
    pub fn resultant(&self, other: &Self, var: usize) -> Self {
        self.assert_compatible(other);

        let a = self.to_univariate(var);
        let b = other.to_univariate(var);
        resultant_subresultant(&a, &b)
    }

    /// The discriminant with respect to the variable `var`.
    pub fn discriminant(&self, var: usize) -> Self {
        self.to_univariate(var).discriminant()
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use crate::domains::integer::{Integer, IntegerRing, Z};
    use crate::domains::rational::{Rational, Q};
    use crate::poly::polynomial::PolynomialRing;
    use crate::poly::univariate::UnivariatePolynomial;
    use crate::poly::{variables, Variable};

    use super::resultant_subresultant;

    fn int_poly(c: &[i64]) -> UnivariatePolynomial<IntegerRing> {
        UnivariatePolynomial::from_coefficients(
            Z,
            c.iter().map(|x| Integer::new(*x)).collect(),
            Arc::new(Variable::from("x")),
        )
    }

    #[test]
    fn univariate_resultant() {
        // x^2 + 1 and x - 2
        let a = int_poly(&[1, 0, 1]);
        let b = int_poly(&[-2, 1]);
        assert_eq!(resultant_subresultant(&a, &b), Integer::new(5));
        assert_eq!(resultant_subresultant(&b, &a), Integer::new(5));

        // a common root gives zero
        let c = int_poly(&[-1, 0, 1]);
        let d = int_poly(&[1, 1]);
        assert_eq!(resultant_subresultant(&c, &d), Integer::zero());

        // res(2x + 2, 3x - 6) = 2 * 3 * res(x + 1, x - 2) = 6 * (-3)
        let e = int_poly(&[2, 2]);
        let f = int_poly(&[-6, 3]);
        assert_eq!(resultant_subresultant(&e, &f), Integer::new(-18));
    }

    #[test]
    fn field_resultant_agrees() {
        let a = int_poly(&[3, -1, 0, 2]);
        let b = int_poly(&[-5, 0, 1]);
        let to_q = |p: &UnivariatePolynomial<IntegerRing>| p.map_coeff(|c| Rational::from(c.clone()), Q);
        assert_eq!(
            to_q(&a).resultant(&to_q(&b)),
            Rational::from(resultant_subresultant(&a, &b))
        );
    }

    #[test]
    fn discriminant() {
        // x^2 - 3x + 2 has discriminant 9 - 8
        assert_eq!(int_poly(&[2, -3, 1]).discriminant(), Integer::new(1));
        // x^2 + 1
        assert_eq!(int_poly(&[1, 0, 1]).discriminant(), Integer::new(-4));
    }

    #[test]
    fn multivariate_resultant() {
        let r: PolynomialRing<_, u16> = PolynomialRing::new(Z, variables(&["x", "y"]));
        let x = r.variable(0).unwrap();
        let y = r.variable(1).unwrap();
        let two = r.constant(Integer::new(2));

        // eliminating y from x - y and y^2 - 2 gives x^2 - 2
        let a = &x - &y;
        let b = &(&y * &y) - &two;
        assert_eq!(a.resultant(&b, 1), &(&x * &x) - &two);
    }
}
