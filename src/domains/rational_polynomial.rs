//! The field of rational functions `R(x_1, ..., x_n)`, such as `Q(t)` or `Z_p(t)`.
//!
//! A rational function is a numerator and denominator in lowest terms. The
//! denominator is monic over a field and has a positive leading coefficient
//! otherwise. Over `Z_p` the field has characteristic `p` but infinitely many elements.

use std::cmp::Ordering;
use std::fmt::{Display, Error, Formatter};
use std::marker::PhantomData;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::sync::Arc;

use crate::error::PolynomialError;
use crate::poly::factor::Factorize;
use crate::poly::gcd::PolynomialGCD;
use crate::poly::order::{LexOrder, MonomialOrder};
use crate::poly::polynomial::MultivariatePolynomial;
use crate::poly::squarefree::PthRoot;
use crate::poly::{Exponent, Variable};
use crate::printer::{PolynomialPrinter, PrintOptions, PrintState};
use crate::settings::{FactorSettings, GcdAlgorithm};

use super::integer::Integer;
use super::{EuclideanDomain, Field, InternalOrdering, Ring};

/// The field of fractions of the polynomials over `ring` in a fixed list of variables.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct RationalPolynomialField<R: Ring, E: Exponent> {
    ring: R,
    variables: Arc<Vec<Variable>>,
    _phantom_exp: PhantomData<E>,
}

impl<R: Ring, E: Exponent> RationalPolynomialField<R, E> {
    pub fn new(coeff_ring: R, variables: Arc<Vec<Variable>>) -> RationalPolynomialField<R, E> {
        RationalPolynomialField {
            ring: coeff_ring,
            variables,
            _phantom_exp: PhantomData,
        }
    }

    pub fn from_poly(poly: &MultivariatePolynomial<R, E>) -> RationalPolynomialField<R, E> {
        RationalPolynomialField {
            ring: poly.ring.clone(),
            variables: poly.variables.clone(),
            _phantom_exp: PhantomData,
        }
    }

    pub fn coefficient_ring(&self) -> &R {
        &self.ring
    }

    pub fn variables(&self) -> &Arc<Vec<Variable>> {
        &self.variables
    }
}

/// A rational function in lowest terms.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct RationalPolynomial<R: Ring, E: Exponent> {
    pub(crate) numerator: MultivariatePolynomial<R, E>,
    pub(crate) denominator: MultivariatePolynomial<R, E>,
}

impl<R: Ring, E: Exponent> InternalOrdering for RationalPolynomial<R, E> {
    /// An ordering of rational polynomials that has no intuitive meaning.
    fn internal_cmp(&self, other: &Self) -> Ordering {
        self.numerator
            .internal_cmp(&other.numerator)
            .then_with(|| self.denominator.internal_cmp(&other.denominator))
    }
}

impl<R: Ring, E: Exponent> RationalPolynomial<R, E> {
    pub fn numerator(&self) -> &MultivariatePolynomial<R, E> {
        &self.numerator
    }

    pub fn denominator(&self) -> &MultivariatePolynomial<R, E> {
        &self.denominator
    }

    pub fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }

    pub fn is_constant(&self) -> bool {
        self.numerator.is_constant() && self.denominator.is_constant()
    }

    pub fn get_variables(&self) -> &Arc<Vec<Variable>> {
        &self.numerator.variables
    }
}

fn exact_div<R: PolynomialGCD<E>, E: Exponent>(
    a: &MultivariatePolynomial<R, E>,
    b: &MultivariatePolynomial<R, E>,
) -> MultivariatePolynomial<R, E> {
    match a.divides(b) {
        Some(q) => q,
        None => unreachable!("{} does not divide {}", b, a),
    }
}

impl<R: PolynomialGCD<E>, E: Exponent> RationalPolynomial<R, E> {
    /// Create a rational function from a numerator and a denominator, which
    /// are brought to lowest terms.
    pub fn from_num_den(
        num: MultivariatePolynomial<R, E>,
        den: MultivariatePolynomial<R, E>,
    ) -> Result<Self, PolynomialError> {
        num.check_compatible(&den)?;
        if den.is_zero() {
            return Err(PolynomialError::DivisionByZero);
        }

        if num.is_zero() {
            return Ok(Self::from_coprime(num.zero(), den.one()));
        }

        let g = num.gcd(&den);
        if g.is_one() {
            Ok(Self::from_coprime(num, den))
        } else {
            Ok(Self::from_coprime(exact_div(&num, &g), exact_div(&den, &g)))
        }
    }

    /// Normalize the unit of the denominator of a fraction that is already in lowest terms.
    fn from_coprime(
        mut num: MultivariatePolynomial<R, E>,
        mut den: MultivariatePolynomial<R, E>,
    ) -> Self {
        let ring = den.ring.clone();
        let lc = den.lcoeff();

        if !ring.is_one(&lc) && ring.is_unit(&lc) {
            if let Some(inv) = ring.try_div(&ring.one(), &lc) {
                num = num.mul_coeff(inv.clone());
                den = den.mul_coeff(inv);
                return RationalPolynomial {
                    numerator: num,
                    denominator: den,
                };
            }
        }

        if ring.signum(&lc) < 0 {
            num = -num;
            den = -den;
        }

        RationalPolynomial {
            numerator: num,
            denominator: den,
        }
    }

    /// Embed a polynomial.
    pub fn from_polynomial(num: MultivariatePolynomial<R, E>) -> Self {
        let den = num.one();
        RationalPolynomial {
            numerator: num,
            denominator: den,
        }
    }

    /// Compute `1/self`, or `None` for zero.
    pub fn inv(&self) -> Option<Self> {
        if self.is_zero() {
            return None;
        }

        Some(Self::from_coprime(
            self.denominator.clone(),
            self.numerator.clone(),
        ))
    }

    pub fn pow(&self, e: u64) -> Self {
        // a power of a fraction in lowest terms is in lowest terms
        RationalPolynomial {
            numerator: self.numerator.pow(e as usize),
            denominator: self.denominator.pow(e as usize),
        }
    }
}

impl<'a, 'b, R: PolynomialGCD<E>, E: Exponent> Add<&'a RationalPolynomial<R, E>>
    for &'b RationalPolynomial<R, E>
{
    type Output = RationalPolynomial<R, E>;

    fn add(self, other: &'a RationalPolynomial<R, E>) -> Self::Output {
        if self.is_zero() {
            return other.clone();
        }
        if other.is_zero() {
            return self.clone();
        }

        let denom_gcd = self.denominator.gcd(&other.denominator);
        let (a_denom_red, b_denom_red) = if denom_gcd.is_one() {
            (self.denominator.clone(), other.denominator.clone())
        } else {
            (
                exact_div(&self.denominator, &denom_gcd),
                exact_div(&other.denominator, &denom_gcd),
            )
        };

        let num = &(&self.numerator * &b_denom_red) + &(&other.numerator * &a_denom_red);
        if num.is_zero() {
            return RationalPolynomial {
                denominator: num.one(),
                numerator: num,
            };
        }

        let den = &a_denom_red * &other.denominator;

        // only a factor of the shared denominator can divide the new numerator
        let g = num.gcd(&denom_gcd);
        if g.is_one() {
            RationalPolynomial::from_coprime(num, den)
        } else {
            RationalPolynomial::from_coprime(exact_div(&num, &g), exact_div(&den, &g))
        }
    }
}

impl<'a, R: PolynomialGCD<E>, E: Exponent> Neg for &'a RationalPolynomial<R, E> {
    type Output = RationalPolynomial<R, E>;

    fn neg(self) -> Self::Output {
        RationalPolynomial {
            numerator: -&self.numerator,
            denominator: self.denominator.clone(),
        }
    }
}

impl<'a, 'b, R: PolynomialGCD<E>, E: Exponent> Sub<&'a RationalPolynomial<R, E>>
    for &'b RationalPolynomial<R, E>
{
    type Output = RationalPolynomial<R, E>;

    fn sub(self, other: &'a RationalPolynomial<R, E>) -> Self::Output {
        self + &(-other)
    }
}

impl<'a, 'b, R: PolynomialGCD<E>, E: Exponent> Mul<&'a RationalPolynomial<R, E>>
    for &'b RationalPolynomial<R, E>
{
    type Output = RationalPolynomial<R, E>;

    fn mul(self, other: &'a RationalPolynomial<R, E>) -> Self::Output {
        if self.is_zero() || other.is_zero() {
            let zero = self.numerator.zero();
            return RationalPolynomial {
                denominator: zero.one(),
                numerator: zero,
            };
        }

        let gcd1 = self.numerator.gcd(&other.denominator);
        let gcd2 = self.denominator.gcd(&other.numerator);

        let reduce = |a: &MultivariatePolynomial<R, E>, g: &MultivariatePolynomial<R, E>| {
            if g.is_one() {
                a.clone()
            } else {
                exact_div(a, g)
            }
        };

        RationalPolynomial::from_coprime(
            &reduce(&self.numerator, &gcd1) * &reduce(&other.numerator, &gcd2),
            &reduce(&self.denominator, &gcd2) * &reduce(&other.denominator, &gcd1),
        )
    }
}

impl<'a, 'b, R: PolynomialGCD<E>, E: Exponent> Div<&'a RationalPolynomial<R, E>>
    for &'b RationalPolynomial<R, E>
{
    type Output = RationalPolynomial<R, E>;

    /// Panics when dividing by zero.
    fn div(self, other: &'a RationalPolynomial<R, E>) -> Self::Output {
        match other.inv() {
            Some(i) => self * &i,
            None => panic!("Division of {} by zero", self),
        }
    }
}

impl<R: Ring, E: Exponent> RationalPolynomial<R, E> {
    fn format<W: std::fmt::Write>(
        &self,
        opts: &PrintOptions,
        state: PrintState,
        f: &mut W,
    ) -> Result<bool, Error> {
        if self.denominator.is_one() {
            let mut s = String::new();
            let wrapped = PolynomialPrinter {
                poly: &self.numerator,
                names: None,
                opts: *opts,
                state: PrintState {
                    in_sum: false,
                    ..state
                },
            }
            .format(&mut s)?;

            if state.in_sum && (wrapped || !s.starts_with('-')) {
                f.write_char('+')?;
            }
            f.write_str(&s)?;
            return Ok(wrapped);
        }

        let mut s = String::new();
        PolynomialPrinter {
            poly: &self.numerator,
            names: None,
            opts: *opts,
            state: PrintState {
                in_sum: false,
                in_product: true,
                in_exp: false,
            },
        }
        .format(&mut s)?;
        s.push('/');

        let den = &self.denominator;
        let wrap_den = den.nterms() > 1 || (!den.is_constant() && !den.ring.is_one(den.lcoeff_ref()));
        if wrap_den {
            s.push('(');
        }
        PolynomialPrinter::new_with_options(den, *opts).format(&mut s)?;
        if wrap_den {
            s.push(')');
        }

        let wrap = state.in_product || state.in_exp;
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

impl<R: Ring, E: Exponent> Display for RationalPolynomial<R, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut s = String::new();
        self.format(
            &PrintOptions::default().update_with_fmt(f),
            PrintState::new(),
            &mut s,
        )?;
        f.write_str(&s)
    }
}

impl<R: Ring, E: Exponent> Display for RationalPolynomialField<R, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}(", self.ring)?;
        for (i, v) in self.variables.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", v)?;
        }
        f.write_str(")")
    }
}

impl<R: PolynomialGCD<E>, E: Exponent> RationalPolynomialField<R, E> {
    /// Create the element `num/den` in lowest terms.
    pub fn to_element(
        &self,
        num: MultivariatePolynomial<R, E>,
        den: MultivariatePolynomial<R, E>,
    ) -> Result<RationalPolynomial<R, E>, PolynomialError> {
        if num.ring != self.ring || num.variables != self.variables {
            return Err(PolynomialError::RingMismatch);
        }
        RationalPolynomial::from_num_den(num, den)
    }

    /// Embed a polynomial.
    pub fn polynomial(
        &self,
        num: MultivariatePolynomial<R, E>,
    ) -> Result<RationalPolynomial<R, E>, PolynomialError> {
        if num.ring != self.ring || num.variables != self.variables {
            return Err(PolynomialError::RingMismatch);
        }
        Ok(RationalPolynomial::from_polynomial(num))
    }
}

impl<R: PolynomialGCD<E>, E: Exponent> Ring for RationalPolynomialField<R, E> {
    type Element = RationalPolynomial<R, E>;

    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a + b
    }

    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a - b
    }

    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a * b
    }

    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = &*a + b;
    }

    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = &*a - b;
    }

    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = &*a * b;
    }

    fn add_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a = &*a + &(b * c);
    }

    fn sub_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a = &*a - &(b * c);
    }

    fn neg(&self, a: &Self::Element) -> Self::Element {
        -a
    }

    fn zero(&self) -> Self::Element {
        let num = MultivariatePolynomial::new(&self.ring, None, self.variables.clone(), LexOrder);
        RationalPolynomial {
            denominator: num.one(),
            numerator: num,
        }
    }

    fn one(&self) -> Self::Element {
        let num = MultivariatePolynomial::new(&self.ring, None, self.variables.clone(), LexOrder)
            .one();
        RationalPolynomial {
            numerator: num.clone(),
            denominator: num,
        }
    }

    fn nth(&self, n: &Integer) -> Self::Element {
        let mut r = self.zero();
        r.numerator = r.numerator.constant(self.ring.nth(n));
        r
    }

    fn pow(&self, b: &Self::Element, e: u64) -> Self::Element {
        b.pow(e)
    }

    fn is_zero(a: &Self::Element) -> bool {
        a.numerator.is_zero()
    }

    fn is_one(&self, a: &Self::Element) -> bool {
        a.numerator.is_one() && a.denominator.is_one()
    }

    fn is_unit(&self, a: &Self::Element) -> bool {
        !a.is_zero()
    }

    fn one_is_gcd_unit() -> bool {
        true
    }

    fn characteristic(&self) -> Integer {
        self.ring.characteristic()
    }

    fn size(&self) -> Integer {
        Integer::zero()
    }

    fn is_field(&self) -> bool {
        true
    }

    fn try_div(&self, a: &Self::Element, b: &Self::Element) -> Option<Self::Element> {
        Some(a * &b.inv()?)
    }

    fn sample(&self, rng: &mut impl rand::RngCore, range: (i64, i64)) -> Self::Element {
        let mut r = self.zero();
        r.numerator = r.numerator.constant(self.ring.sample(rng, range));
        r
    }

    fn format<W: std::fmt::Write>(
        &self,
        element: &Self::Element,
        opts: &PrintOptions,
        state: PrintState,
        f: &mut W,
    ) -> Result<bool, Error> {
        element.format(opts, state, f)
    }
}

impl<R: PolynomialGCD<E>, E: Exponent> EuclideanDomain for RationalPolynomialField<R, E> {
    fn rem(&self, _a: &Self::Element, _b: &Self::Element) -> Self::Element {
        self.zero()
    }

    fn quot_rem(&self, a: &Self::Element, b: &Self::Element) -> (Self::Element, Self::Element) {
        (self.div(a, b), self.zero())
    }

    fn gcd(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        if a.is_zero() && b.is_zero() {
            self.zero()
        } else {
            self.one()
        }
    }
}

impl<R: PolynomialGCD<E>, E: Exponent> Field for RationalPolynomialField<R, E> {
    fn div(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a / b
    }

    fn div_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = &*a / b;
    }

    fn inv(&self, a: &Self::Element) -> Self::Element {
        match a.inv() {
            Some(i) => i,
            None => panic!("Cannot invert 0"),
        }
    }
}

impl<R: PolynomialGCD<E>, E: Exponent, E2: Exponent> PolynomialGCD<E2>
    for RationalPolynomialField<R, E>
{
    fn default_gcd_algorithm(&self) -> GcdAlgorithm {
        GcdAlgorithm::PrimitivePrs
    }
}

impl<R: PolynomialGCD<E> + PthRoot, E: Exponent> PthRoot for RationalPolynomialField<R, E> {
    /// The root of `n/d` is the root of `n` over the root of `d`. It exists only
    /// if all exponents are multiples of the characteristic.
    fn pth_root(&self, a: &Self::Element) -> Result<Self::Element, PolynomialError> {
        let num = a.numerator.pth_root_with(|c| self.ring.pth_root(c))?;
        let den = a.denominator.pth_root_with(|c| self.ring.pth_root(c))?;
        Ok(RationalPolynomial::from_coprime(num, den))
    }

    /// The partial derivatives in the variables of the field. Their common kernel
    /// consists of the `p`-th powers only if the coefficient ring is perfect, which
    /// holds for finite coefficient rings.
    fn derivation_count(&self) -> usize {
        if self.ring.is_finite() {
            self.variables.len()
        } else {
            0
        }
    }

    /// `(n/d)' = (n' d - n d') / d^2`
    fn derive(&self, a: &Self::Element, i: usize) -> Self::Element {
        let (n, d) = (&a.numerator, &a.denominator);
        let num = &(&n.derivative(i) * d) - &(n * &d.derivative(i));
        match RationalPolynomial::from_num_den(num, d * d) {
            Ok(r) => r,
            Err(e) => unreachable!("Derivative of {} has no valid form: {}", a, e),
        }
    }
}

impl<R: PolynomialGCD<E>, E: Exponent, E2: Exponent, O: MonomialOrder> Factorize
    for MultivariatePolynomial<RationalPolynomialField<R, E>, E2, O>
{
    fn factor_squarefree_univariate(
        &self,
        _settings: &FactorSettings,
    ) -> Result<Vec<Self>, PolynomialError> {
        if self.total_degree() <= 1 {
            return Ok(vec![self.clone()]);
        }

        Err(PolynomialError::Unsupported(
            "factorization over rational function coefficients",
        ))
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use crate::domains::algebraic_number::AlgebraicExtension;
    use crate::domains::finite_field::{FiniteField, FiniteFieldCore, Zp};
    use crate::domains::integer::{Integer, Z};
    use crate::domains::rational::Q;
    use crate::domains::{Field, Ring};
    use crate::error::PolynomialError;
    use crate::poly::polynomial::PolynomialRing;
    use crate::poly::squarefree::PthRoot;
    use crate::poly::univariate::UnivariatePolynomial;
    use crate::poly::{variables, Variable};

    use super::{RationalPolynomial, RationalPolynomialField};

    #[test]
    fn rational_functions() {
        let r: PolynomialRing<_, u16> = PolynomialRing::new(Q, variables(&["t"]));
        let t = r.variable(0).unwrap();
        let one = r.one();
        let field = RationalPolynomialField::new(Q, r.variables().clone());

        let a = field.to_element(one.clone(), &t + &one).unwrap();
        let b = field.to_element(one.clone(), &t - &one).unwrap();

        let sum = field.add(&a, &b);
        assert_eq!(sum.to_string(), "2*t/(t^2-1)");
        assert_eq!(
            field.mul(&a, &b),
            field.to_element(one.clone(), &(&t * &t) - &one).unwrap()
        );

        // (t^2 - 1)/(t + 1) = t - 1
        let c = field.to_element(&(&t * &t) - &one, &t + &one).unwrap();
        assert_eq!(c, field.polynomial(&t - &one).unwrap());
        assert_eq!(field.div(&field.one(), &b), field.polynomial(&t - &one).unwrap());
        assert_eq!(field.sub(&a, &a), field.zero());
        assert_eq!(field.mul(&a, &field.inv(&a)), field.one());
        assert_eq!(field.pow(&a, 2).denominator(), &(&(&t + &one) * &(&t + &one)));
    }

    #[test]
    fn integer_normalization() {
        let r: PolynomialRing<_, u16> = PolynomialRing::new(Z, variables(&["t"]));
        let t = r.variable(0).unwrap();

        let num = t.clone().mul_coeff(Integer::new(2));
        let den = (&t * &t).mul_coeff(Integer::new(-4));
        let f = RationalPolynomial::from_num_den(num, den).unwrap();
        assert_eq!(f.numerator(), &r.constant(Integer::new(-1)));
        assert_eq!(f.denominator(), &t.clone().mul_coeff(Integer::new(2)));
        assert_eq!(f.to_string(), "-1/(2*t)");

        assert_eq!(
            RationalPolynomial::from_num_den(t.clone(), r.zero()),
            Err(PolynomialError::DivisionByZero)
        );
    }

    fn z3_t() -> (
        RationalPolynomialField<Zp, u16>,
        RationalPolynomial<Zp, u16>,
    ) {
        let z3 = FiniteField::<u32>::new(3);
        let r: PolynomialRing<_, u16> = PolynomialRing::new(z3, variables(&["t"]));
        let field = RationalPolynomialField::new(z3, r.variables().clone());
        let t = field.polynomial(r.variable(0).unwrap()).unwrap();
        (field, t)
    }

    #[test]
    fn pth_roots_in_characteristic_three() {
        let (field, t) = z3_t();
        assert_eq!(field.characteristic(), Integer::new(3));
        assert!(!field.is_finite());

        // (t/(t+1))^3 = t^3/(t^3+1)
        let f = field.div(&t, &field.add(&t, &field.one()));
        assert_eq!(field.pth_root(&field.pow(&f, 3)).unwrap(), f);
        assert!(matches!(
            field.pth_root(&t),
            Err(PolynomialError::NotInvertible(_))
        ));
    }

    #[test]
    fn squarefree_over_function_field() {
        let (field, t) = z3_t();
        let r: PolynomialRing<_, u16> = PolynomialRing::new(field.clone(), variables(&["x"]));
        let x = r.variable(0).unwrap();
        let one = r.one();

        // x^3 - t is irreducible and has a vanishing derivative
        let a = &(&(&x * &x) * &x) - &r.constant(t);
        let b = &x + &one;
        let p = &(&a * &a) * &b;

        let sqf = p.square_free_factorization();
        assert_eq!(sqf.len(), 2);
        assert!(sqf.contains(&(a.clone(), 2)));
        assert!(sqf.contains(&(b.clone(), 1)));
        assert!(!p.is_squarefree());
        assert!(a.is_squarefree());
    }

    #[test]
    fn inseparable_and_pth_power_factors() {
        let (field, t) = z3_t();
        let r: PolynomialRing<_, u16> = PolynomialRing::new(field.clone(), variables(&["x"]));
        let x = r.variable(0).unwrap();
        let x3 = x.pow(3);

        // x^3 - t has no cube root, while x^3 - t^3 = (x - t)^3
        let a = &x3 - &r.constant(t.clone());
        let b = &x3 - &r.constant(field.pow(&t, 3));
        let p = &a * &b;

        let sqf = p.square_free_factorization();
        assert_eq!(sqf.len(), 2);
        assert!(sqf.contains(&(a.clone(), 1)));
        assert!(sqf.contains(&(&x - &r.constant(t.clone()), 3)));
        assert!(!p.is_squarefree());
        assert_eq!(p.squarefree_part(), &a * &(&x - &r.constant(t.clone())));

        let derivative = field.derive(&field.pow(&t, 4), 0);
        assert_eq!(derivative, field.pow(&t, 3));
    }

    #[test]
    fn algebraic_pth_root_over_function_field() {
        let (field, t) = z3_t();

        // a^2 = t
        let ext = AlgebraicExtension::new(UnivariatePolynomial::from_coefficients(
            field.clone(),
            vec![field.neg(&t), field.zero(), field.one()],
            Arc::new(Variable::from("a")),
        ))
        .unwrap();
        let a = ext.generator();

        // a^3 = t*a
        let ta = ext.mul(&ext.constant(t.clone()), &a);
        assert_eq!(ext.pow(&a, 3), ta);
        assert_eq!(ext.pth_root(&ta).unwrap(), a);
        assert!(ext.pth_root(&a).is_err());
    }
}
