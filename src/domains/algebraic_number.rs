//! Algebraic extensions of a field, such as `Q(sqrt(2))` or the Galois field `GF(p^k)`.
//!
//! An element is a polynomial in the generator `a` of degree less than the degree
//! of the monic defining polynomial `m(a)`, and products are reduced modulo `m`.
//! The defining polynomial is assumed to be irreducible. When it is not, the ring
//! has zero divisors and inverting one of them yields [AlgebraicNotInvertible],
//! which carries the factor of `m` that was discovered.

use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

use rand::{thread_rng, Rng as _};
use thiserror::Error;
use tracing::debug;

use crate::error::PolynomialError;
use crate::linear_system::Matrix;
use crate::poly::factor::Factorize;
use crate::poly::gcd::PolynomialGCD;
use crate::poly::order::MonomialOrder;
use crate::poly::polynomial::MultivariatePolynomial;
use crate::poly::squarefree::{pth_root_finite, PthRoot};
use crate::poly::univariate::UnivariatePolynomial;
use crate::poly::{Exponent, Variable};
use crate::printer::{PrintOptions, PrintState};
use crate::settings::{FactorSettings, GcdAlgorithm};

use super::finite_field::{FiniteField, FiniteFieldCore, FiniteFieldWorkspace};
use super::integer::Integer;
use super::{EuclideanDomain, Field, InternalOrdering, Ring};

/// The field `R[a]/(m(a))` for a monic, irreducible polynomial `m`.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct AlgebraicExtension<R: Field> {
    modulus: Arc<UnivariatePolynomial<R>>,
}

/// An element of an [AlgebraicExtension]. Whether the element is a unit
/// is computed at most once.
#[derive(Clone)]
pub struct AlgebraicNumber<R: Field> {
    pub(crate) poly: UnivariatePolynomial<R>,
    unit: OnceLock<bool>,
}

impl<R: Field> AlgebraicNumber<R> {
    fn new(poly: UnivariatePolynomial<R>) -> Self {
        AlgebraicNumber {
            poly,
            unit: OnceLock::new(),
        }
    }

    /// The representative polynomial, of lower degree than the modulus.
    pub fn poly(&self) -> &UnivariatePolynomial<R> {
        &self.poly
    }

    pub fn into_poly(self) -> UnivariatePolynomial<R> {
        self.poly
    }
}

impl<R: Field> PartialEq for AlgebraicNumber<R> {
    fn eq(&self, other: &Self) -> bool {
        self.poly == other.poly
    }
}

impl<R: Field> Eq for AlgebraicNumber<R> {}

impl<R: Field> Hash for AlgebraicNumber<R> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.poly.hash(state)
    }
}

impl<R: Field> InternalOrdering for AlgebraicNumber<R> {
    fn internal_cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.poly
            .coefficients
            .len()
            .cmp(&other.poly.coefficients.len())
            .then_with(|| {
                for (a, b) in self.poly.coefficients.iter().zip(&other.poly.coefficients).rev() {
                    match a.internal_cmp(b) {
                        std::cmp::Ordering::Equal => {}
                        ord => return ord,
                    }
                }
                std::cmp::Ordering::Equal
            })
    }
}

impl<R: Field> std::fmt::Debug for AlgebraicNumber<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.poly)
    }
}

impl<R: Field> Display for AlgebraicNumber<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.poly)
    }
}

/// An element that shares the factor `gcd` with the modulus and therefore has no inverse.
#[derive(Error, Debug, Clone)]
#[error("{element} is not invertible: it shares the factor {gcd} with the modulus")]
pub struct AlgebraicNotInvertible<R: Field> {
    pub element: AlgebraicNumber<R>,
    pub gcd: UnivariatePolynomial<R>,
}

impl<R: Field> From<AlgebraicNotInvertible<R>> for PolynomialError {
    fn from(e: AlgebraicNotInvertible<R>) -> Self {
        PolynomialError::NotInvertible(e.to_string())
    }
}

impl<R: Field> AlgebraicExtension<R> {
    /// Create the extension defined by `modulus`, which is made monic.
    /// Irreducibility of the modulus is not checked.
    pub fn new(modulus: UnivariatePolynomial<R>) -> Result<Self, PolynomialError> {
        if modulus.degree() < 1 {
            return Err(PolynomialError::Unsupported(
                "the defining polynomial of an extension must be non-constant",
            ));
        }

        Ok(AlgebraicExtension {
            modulus: Arc::new(modulus.monic()),
        })
    }

    /// Create the extension from a polynomial in which only the variable `var` occurs.
    pub fn from_poly<E: Exponent, O: MonomialOrder>(
        modulus: &MultivariatePolynomial<R, E, O>,
        var: usize,
    ) -> Result<Self, PolynomialError> {
        if modulus.occurring_variables().iter().any(|v| *v != var) {
            return Err(PolynomialError::Unsupported(
                "the defining polynomial of an extension must be univariate",
            ));
        }

        Self::new(modulus.to_univariate_from_univariate(var))
    }

    pub fn modulus(&self) -> &UnivariatePolynomial<R> {
        &self.modulus
    }

    pub fn coefficient_ring(&self) -> &R {
        &self.modulus.ring
    }

    /// The degree of the extension.
    pub fn degree(&self) -> usize {
        self.modulus.degree()
    }

    /// Reduce a polynomial in the generator to an element of the extension.
    pub fn to_element(&self, poly: UnivariatePolynomial<R>) -> AlgebraicNumber<R> {
        let poly = if poly.degree() >= self.degree() {
            poly.rem(&self.modulus)
        } else {
            poly
        };

        AlgebraicNumber::new(UnivariatePolynomial::from_coefficients(
            self.coefficient_ring().clone(),
            poly.coefficients,
            self.modulus.variable.clone(),
        ))
    }

    /// The generator `a`, a root of the modulus.
    pub fn generator(&self) -> AlgebraicNumber<R> {
        self.to_element(self.modulus.monomial(self.coefficient_ring().one(), 1))
    }

    /// Embed an element of the coefficient field.
    pub fn constant(&self, c: R::Element) -> AlgebraicNumber<R> {
        AlgebraicNumber::new(self.modulus.constant(c))
    }

    /// Compute the inverse, or the factor of the modulus that proves that
    /// no inverse exists.
    pub fn try_inv(&self, a: &AlgebraicNumber<R>) -> Result<AlgebraicNumber<R>, AlgebraicNotInvertible<R>> {
        let (g, s, _) = a.poly.eea(&self.modulus);
        if !g.is_one() {
            return Err(AlgebraicNotInvertible {
                element: a.clone(),
                gcd: g,
            });
        }

        Ok(self.to_element(s))
    }

    /// The norm `N(a) = res(m, a)`, the product of all conjugates of `a`.
    pub fn norm(&self, a: &AlgebraicNumber<R>) -> R::Element {
        self.modulus.resultant(&a.poly)
    }
}

impl<UField: FiniteFieldWorkspace> AlgebraicExtension<FiniteField<UField>> {
    /// Construct the Galois field `GF(p^degree)` by sampling monic polynomials
    /// until an irreducible one is found.
    pub fn galois_field(base: FiniteField<UField>, degree: usize, variable: Variable) -> Self {
        let p = base.get_prime().to_u64();
        let variable = Arc::new(variable);
        let mut rng = thread_rng();

        loop {
            let mut coeffs: Vec<_> = (0..degree)
                .map(|_| base.to_element(UField::from_u64(rng.gen_range(0..p))))
                .collect();
            coeffs.push(base.one());

            let m = UnivariatePolynomial::from_coefficients(base, coeffs, variable.clone());
            let squarefree = m.gcd(&m.derivative()).is_one();
            if squarefree {
                let dd = m.distinct_degree_factorization();
                if dd.len() == 1 && dd[0].0 == degree {
                    return AlgebraicExtension {
                        modulus: Arc::new(m),
                    };
                }
            }
            debug!("Rejected reducible modulus {}", m);
        }
    }
}

impl<R: Field> Display for AlgebraicExtension<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}[{}]/({})",
            self.coefficient_ring(),
            self.modulus.variable,
            self.modulus
        )
    }
}

impl<R: Field> Ring for AlgebraicExtension<R> {
    type Element = AlgebraicNumber<R>;

    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        AlgebraicNumber::new(&a.poly + &b.poly)
    }

    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        AlgebraicNumber::new(&a.poly - &b.poly)
    }

    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        self.to_element(&a.poly * &b.poly)
    }

    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.add(a, b);
    }

    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.sub(a, b);
    }

    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.mul(a, b);
    }

    fn add_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a = self.add(a, &self.mul(b, c));
    }

    fn sub_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a = self.sub(a, &self.mul(b, c));
    }

    fn neg(&self, a: &Self::Element) -> Self::Element {
        AlgebraicNumber::new(-&a.poly)
    }

    fn zero(&self) -> Self::Element {
        AlgebraicNumber::new(self.modulus.zero())
    }

    fn one(&self) -> Self::Element {
        AlgebraicNumber::new(self.modulus.one())
    }

    fn nth(&self, n: &Integer) -> Self::Element {
        self.constant(self.coefficient_ring().nth(n))
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
        a.poly.is_zero()
    }

    fn is_one(&self, a: &Self::Element) -> bool {
        a.poly.is_one()
    }

    fn is_unit(&self, a: &Self::Element) -> bool {
        *a.unit
            .get_or_init(|| !a.poly.is_zero() && a.poly.gcd(&self.modulus).is_one())
    }

    fn one_is_gcd_unit() -> bool {
        true
    }

    fn characteristic(&self) -> Integer {
        self.coefficient_ring().characteristic()
    }

    fn size(&self) -> Integer {
        self.coefficient_ring().size().pow(self.degree() as u64)
    }

    fn is_field(&self) -> bool {
        true
    }

    fn try_div(&self, a: &Self::Element, b: &Self::Element) -> Option<Self::Element> {
        let inv = self.try_inv(b).ok()?;
        Some(self.mul(a, &inv))
    }

    fn sample(&self, rng: &mut impl rand::RngCore, range: (i64, i64)) -> Self::Element {
        let coeffs = (0..self.degree())
            .map(|_| self.coefficient_ring().sample(rng, range))
            .collect();
        self.to_element(UnivariatePolynomial::from_coefficients(
            self.coefficient_ring().clone(),
            coeffs,
            self.modulus.variable.clone(),
        ))
    }

    fn format<W: std::fmt::Write>(
        &self,
        element: &Self::Element,
        opts: &PrintOptions,
        state: PrintState,
        f: &mut W,
    ) -> Result<bool, std::fmt::Error> {
        let s = if opts.print_finite_field {
            format!("{:#}", element.poly)
        } else {
            format!("{}", element.poly)
        };

        let nterms = element
            .poly
            .coefficients
            .iter()
            .filter(|c| !R::is_zero(c))
            .count();
        let wrap = nterms > 1 && (state.in_product || state.in_exp);

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

impl<R: Field> EuclideanDomain for AlgebraicExtension<R> {
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

impl<R: Field> Field for AlgebraicExtension<R> {
    fn div(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        self.mul(a, &self.inv(b))
    }

    fn div_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.div(a, b);
    }

    fn inv(&self, a: &Self::Element) -> Self::Element {
        match self.try_inv(a) {
            Ok(i) => i,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<R: Field, E: Exponent> PolynomialGCD<E> for AlgebraicExtension<R> {
    fn default_gcd_algorithm(&self) -> GcdAlgorithm {
        GcdAlgorithm::PrimitivePrs
    }
}

impl<R: Field + PthRoot> PthRoot for AlgebraicExtension<R> {
    /// In a finite extension the root is a power of `a`. Otherwise, write
    /// `a = sum_i c_i a^(ip)` by solving a linear system and take
    /// `b = sum_i c_i^(1/p) a^i`.
    fn pth_root(&self, a: &Self::Element) -> Result<Self::Element, PolynomialError> {
        if self.is_finite() {
            return pth_root_finite(self, a);
        }

        let Some(p) = self.characteristic().to_u64().filter(|p| *p > 1) else {
            return Err(PolynomialError::Unsupported(
                "p-th root in characteristic zero",
            ));
        };

        let d = self.degree();
        let field = self.coefficient_ring().clone();
        let generator_p = self.pow(&self.generator(), p);

        let mut m = Matrix::new(d, d, field.clone());
        let mut col = self.one();
        for i in 0..d {
            for (r, c) in col.poly.coefficients.iter().enumerate() {
                m[(r, i)] = c.clone();
            }
            col = self.mul(&col, &generator_p);
        }

        let mut rhs = vec![field.zero(); d];
        for (r, c) in a.poly.coefficients.iter().enumerate() {
            rhs[r] = c.clone();
        }

        let c = m
            .solve(&Matrix::column(rhs, field.clone()))
            .map_err(|e| {
                PolynomialError::NotInvertible(format!("{} has no {}-th root: {}", a, p, e))
            })?;

        let coeffs = c
            .into_vec()
            .iter()
            .map(|x| field.pth_root(x))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(self.to_element(UnivariatePolynomial::from_coefficients(
            field,
            coeffs,
            self.modulus.variable.clone(),
        )))
    }
}

impl<R: Field, E: Exponent, O: MonomialOrder> Factorize
    for MultivariatePolynomial<AlgebraicExtension<R>, E, O>
{
    fn factor_squarefree_univariate(
        &self,
        _settings: &FactorSettings,
    ) -> Result<Vec<Self>, PolynomialError> {
        if self.total_degree() <= 1 {
            return Ok(vec![self.clone()]);
        }

        Err(PolynomialError::Unsupported(
            "factorization over algebraic extensions",
        ))
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use crate::domains::finite_field::{FiniteField, FiniteFieldCore};
    use crate::domains::integer::Integer;
    use crate::domains::rational::{Rational, RationalField, Q};
    use crate::domains::{Field, Ring};
    use crate::error::PolynomialError;
    use crate::poly::polynomial::PolynomialRing;
    use crate::poly::squarefree::PthRoot;
    use crate::poly::univariate::UnivariatePolynomial;
    use crate::poly::{variables, Variable};

    use super::AlgebraicExtension;

    fn rational_extension(c: &[i64]) -> AlgebraicExtension<RationalField> {
        AlgebraicExtension::new(UnivariatePolynomial::from_coefficients(
            Q,
            c.iter().map(|x| Rational::from(*x)).collect(),
            Arc::new(Variable::from("a")),
        ))
        .unwrap()
    }

    #[test]
    fn square_root_of_two() {
        let ext = rational_extension(&[-2, 0, 1]);
        let a = ext.generator();

        assert_eq!(ext.mul(&a, &a), ext.constant(Rational::from(2)));
        assert_eq!(ext.size(), Integer::zero());
        assert_eq!(ext.to_string(), "Q[a]/(a^2-2)");

        // (1 + a)(a - 1) = 1
        let b = ext.add(&ext.one(), &a);
        let b_inv = ext.inv(&b);
        assert_eq!(b_inv, ext.sub(&a, &ext.one()));
        assert_eq!(ext.mul(&b, &b_inv), ext.one());
        assert!(ext.is_unit(&b));
        assert!(ext.is_unit(&b));

        assert_eq!(ext.norm(&b), Rational::from(-1));
        assert_eq!(ext.pow(&a, 5), ext.mul(&ext.constant(Rational::from(4)), &a));
        assert_eq!(ext.div(&ext.one(), &a), ext.mul(&ext.constant(Rational::from((1, 2))), &a));
    }

    #[test]
    fn reducible_modulus() {
        let ext = rational_extension(&[-1, 0, 1]);
        let a = ext.generator();
        let b = ext.sub(&a, &ext.one());

        assert!(!ext.is_unit(&b));
        assert_eq!(ext.try_div(&ext.one(), &b), None);

        let err = ext.try_inv(&b).unwrap_err();
        assert_eq!(err.gcd, b.poly);
        assert!(matches!(
            PolynomialError::from(err),
            PolynomialError::NotInvertible(_)
        ));
    }

    #[test]
    fn galois_field() {
        let z3 = FiniteField::<u32>::new(3);
        let gf9 = AlgebraicExtension::galois_field(z3, 2, Variable::from("a"));
        assert_eq!(gf9.size(), Integer::new(9));
        assert_eq!(gf9.characteristic(), Integer::new(3));

        let a = gf9.generator();
        assert_eq!(gf9.pow(&a, 9), a);
        assert_eq!(gf9.pow(&a, 8), gf9.one());

        let cube = gf9.pow(&a, 3);
        assert_eq!(gf9.pth_root(&cube).unwrap(), a);
    }

    #[test]
    fn polynomials_over_extension() {
        let ext = rational_extension(&[-2, 0, 1]);
        let r: PolynomialRing<_, u16> = PolynomialRing::new(ext.clone(), variables(&["x"]));
        let x = r.variable(0).unwrap();
        let a = r.constant(ext.generator());
        let two = r.constant(ext.nth(&Integer::new(2)));
        let one = r.constant(ext.one());

        // x^2 - 2 = (x - a)(x + a)
        let f = &(&x * &x) - &two;
        let g = &x - &a;
        assert_eq!(f.gcd(&g), g);

        let p = &(&g * &g) * &(&x + &one);
        let sqf = p.square_free_factorization();
        assert_eq!(sqf.len(), 2);
        assert!(sqf.contains(&(&x - &a, 2)));
        assert!(sqf.contains(&(&x + &one, 1)));
    }
}
