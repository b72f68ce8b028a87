use ahash::{HashMap, HashMapExt};
use std::cmp::Ordering;
use std::fmt::Display;
use std::marker::PhantomData;
use std::ops::{Add, Mul, Neg, Sub};
use std::sync::Arc;

use smallvec::SmallVec;

use crate::domains::integer::Integer;
use crate::domains::{EuclideanDomain, Field, Ring};
use crate::error::PolynomialError;
use crate::printer::{PolynomialPrinter, PrintOptions, PrintState};

use super::gcd::PolynomialGCD;
use super::monomial::ExponentVector;
use super::order::{LexOrder, MonomialOrder};
use super::univariate::UnivariatePolynomial;
use super::{Exponent, Variable, INLINED_EXPONENTS};

/// A polynomial ring: the factory of [MultivariatePolynomial]s that share a coefficient ring,
/// a list of variables and a term order. Polynomials can only be combined if their
/// rings compare equal.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct PolynomialRing<R: Ring, E: Exponent, O: MonomialOrder = LexOrder> {
    ring: R,
    variables: Arc<Vec<Variable>>,
    order: O,
    _phantom_exp: PhantomData<E>,
}

impl<R: Ring, E: Exponent, O: MonomialOrder + Default> PolynomialRing<R, E, O> {
    pub fn new(coeff_ring: R, variables: Arc<Vec<Variable>>) -> PolynomialRing<R, E, O> {
        Self::with_order(coeff_ring, variables, O::default())
    }
}

impl<R: Ring, E: Exponent, O: MonomialOrder> PolynomialRing<R, E, O> {
    pub fn with_order(
        coeff_ring: R,
        variables: Arc<Vec<Variable>>,
        order: O,
    ) -> PolynomialRing<R, E, O> {
        PolynomialRing {
            ring: coeff_ring,
            variables,
            order,
            _phantom_exp: PhantomData,
        }
    }

    pub fn from_poly(poly: &MultivariatePolynomial<R, E, O>) -> PolynomialRing<R, E, O> {
        PolynomialRing {
            ring: poly.ring.clone(),
            variables: poly.variables.clone(),
            order: poly.order.clone(),
            _phantom_exp: PhantomData,
        }
    }

    pub fn coefficient_ring(&self) -> &R {
        &self.ring
    }

    pub fn variables(&self) -> &Arc<Vec<Variable>> {
        &self.variables
    }

    pub fn order(&self) -> &O {
        &self.order
    }

    pub fn nvars(&self) -> usize {
        self.variables.len()
    }

    /// Returns `true` if `p` was created by this ring or an equal one.
    pub fn contains(&self, p: &MultivariatePolynomial<R, E, O>) -> bool {
        self.ring == p.ring && self.variables == p.variables && self.order == p.order
    }

    /// The polynomial consisting of the variable with index `index`.
    pub fn variable(&self, index: usize) -> Result<MultivariatePolynomial<R, E, O>, PolynomialError> {
        if index >= self.nvars() {
            return Err(PolynomialError::ArityMismatch {
                expected: self.nvars(),
                found: index + 1,
            });
        }

        let mut exp = vec![E::zero(); self.nvars()];
        exp[index] = E::one();
        Ok(self.zero().monomial(self.ring.one(), exp))
    }

    pub fn constant(&self, coeff: R::Element) -> MultivariatePolynomial<R, E, O> {
        self.zero().constant(coeff)
    }

    pub fn monomial(
        &self,
        coeff: R::Element,
        exponents: &ExponentVector<E>,
    ) -> Result<MultivariatePolynomial<R, E, O>, PolynomialError> {
        if exponents.len() != self.nvars() {
            return Err(PolynomialError::ArityMismatch {
                expected: self.nvars(),
                found: exponents.len(),
            });
        }

        Ok(self.zero().monomial(coeff, exponents.to_vec()))
    }

    /// Create a polynomial from a list of terms. Equal monomials are merged.
    pub fn from_terms<I: IntoIterator<Item = (R::Element, Vec<E>)>>(
        &self,
        terms: I,
    ) -> Result<MultivariatePolynomial<R, E, O>, PolynomialError> {
        let mut b = PolynomialBuilder::new(self.ring.clone(), self.variables.clone(), self.order.clone());
        for (c, e) in terms {
            if e.len() != self.nvars() {
                return Err(PolynomialError::ArityMismatch {
                    expected: self.nvars(),
                    found: e.len(),
                });
            }
            b.add_term(c, &e);
        }
        Ok(b.build())
    }
}

impl<R: Ring, E: Exponent, O: MonomialOrder> Display for PolynomialRing<R, E, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[", self.ring)?;
        for (i, v) in self.variables.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", v)?;
        }
        f.write_str("]")
    }
}

impl<R: Ring, E: Exponent, O: MonomialOrder> Ring for PolynomialRing<R, E, O> {
    type Element = MultivariatePolynomial<R, E, O>;

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
        *a = &*a + b;
    }

    #[inline]
    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = &*a - b;
    }

    #[inline]
    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = &*a * b;
    }

    #[inline]
    fn add_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a = &*a + &(b * c);
    }

    #[inline]
    fn sub_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a = &*a - &(b * c);
    }

    #[inline]
    fn neg(&self, a: &Self::Element) -> Self::Element {
        -a
    }

    #[inline]
    fn zero(&self) -> Self::Element {
        MultivariatePolynomial::new(&self.ring, None, self.variables.clone(), self.order.clone())
    }

    #[inline]
    fn one(&self) -> Self::Element {
        self.zero().one()
    }

    #[inline]
    fn nth(&self, n: &Integer) -> Self::Element {
        self.zero().constant(self.ring.nth(n))
    }

    #[inline]
    fn pow(&self, b: &Self::Element, e: u64) -> Self::Element {
        b.pow(e as usize)
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
        a.nterms() == 1 && a.is_constant() && self.ring.is_unit(&a.coefficients[0])
    }

    fn one_is_gcd_unit() -> bool {
        false
    }

    fn characteristic(&self) -> Integer {
        self.ring.characteristic()
    }

    fn size(&self) -> Integer {
        if self.nvars() == 0 {
            self.ring.size()
        } else {
            Integer::zero()
        }
    }

    fn is_field(&self) -> bool {
        self.nvars() == 0 && self.ring.is_field()
    }

    /// The sign of the leading coefficient.
    fn signum(&self, a: &Self::Element) -> i8 {
        if a.is_zero() {
            0
        } else {
            self.ring.signum(a.lcoeff_ref())
        }
    }

    fn try_div(&self, a: &Self::Element, b: &Self::Element) -> Option<Self::Element> {
        a.divides(b)
    }

    fn sample(&self, rng: &mut impl rand::RngCore, range: (i64, i64)) -> Self::Element {
        self.zero().constant(self.ring.sample(rng, range))
    }

    fn format<W: std::fmt::Write>(
        &self,
        element: &Self::Element,
        opts: &PrintOptions,
        state: PrintState,
        f: &mut W,
    ) -> Result<bool, std::fmt::Error> {
        let mut s = String::new();
        let wrapped = PolynomialPrinter {
            poly: element,
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
        Ok(wrapped)
    }
}

impl<R: PolynomialGCD<E>, E: Exponent, O: MonomialOrder> EuclideanDomain
    for PolynomialRing<R, E, O>
{
    fn rem(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a.quot_rem_euclidean(b).1
    }

    fn quot_rem(&self, a: &Self::Element, b: &Self::Element) -> (Self::Element, Self::Element) {
        a.quot_rem_euclidean(b)
    }

    fn gcd(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a.gcd(b)
    }
}

/// Collects unordered terms and produces a sorted polynomial without zero terms.
/// Equal monomials are merged by adding their coefficients.
pub(crate) struct PolynomialBuilder<F: Ring, E: Exponent, O: MonomialOrder> {
    terms: HashMap<SmallVec<[E; INLINED_EXPONENTS]>, F::Element>,
    ring: F,
    variables: Arc<Vec<Variable>>,
    order: O,
}

impl<F: Ring, E: Exponent, O: MonomialOrder> PolynomialBuilder<F, E, O> {
    pub(crate) fn new(ring: F, variables: Arc<Vec<Variable>>, order: O) -> Self {
        PolynomialBuilder {
            terms: HashMap::new(),
            ring,
            variables,
            order,
        }
    }

    pub(crate) fn for_poly(p: &MultivariatePolynomial<F, E, O>) -> Self {
        Self::new(p.ring.clone(), p.variables.clone(), p.order.clone())
    }

    pub(crate) fn add_term(&mut self, coeff: F::Element, exponents: &[E]) {
        if F::is_zero(&coeff) {
            return;
        }

        match self.terms.get_mut(exponents) {
            Some(c) => self.ring.add_assign(c, &coeff),
            None => {
                self.terms.insert(SmallVec::from_slice(exponents), coeff);
            }
        }
    }

    pub(crate) fn build(self) -> MultivariatePolynomial<F, E, O> {
        let mut terms: Vec<_> = self
            .terms
            .into_iter()
            .filter(|(_, c)| !F::is_zero(c))
            .collect();
        terms.sort_unstable_by(|(a, _), (b, _)| self.order.cmp(a.as_slice(), b.as_slice()));

        let mut poly = MultivariatePolynomial::new(
            &self.ring,
            Some(terms.len()),
            self.variables,
            self.order,
        );
        for (e, c) in terms {
            poly.coefficients.push(c);
            poly.exponents.extend_from_slice(&e);
        }
        poly
    }
}

/// Multivariate polynomial with a sparse degree and variable dense representation.
#[derive(Clone)]
pub struct MultivariatePolynomial<F: Ring, E: Exponent = u16, O: MonomialOrder = LexOrder> {
    // Data format: the i-th monomial is stored as coefficients[i] and
    // exponents[i * nvars .. (i + 1) * nvars]. Terms are sorted in ascending order,
    // so that the leading term is the last one.
    pub(crate) coefficients: Vec<F::Element>,
    pub(crate) exponents: Vec<E>,
    pub(crate) ring: F,
    pub(crate) variables: Arc<Vec<Variable>>,
    pub(crate) order: O,
}

impl<F: Ring, E: Exponent, O: MonomialOrder> MultivariatePolynomial<F, E, O> {
    /// Constructs a zero polynomial. Instead of using this constructor,
    /// prefer to create new polynomials from a [PolynomialRing] or from existing ones, so that the
    /// variable map and ring are inherited.
    #[inline]
    pub fn new(ring: &F, cap: Option<usize>, variables: Arc<Vec<Variable>>, order: O) -> Self {
        Self {
            coefficients: Vec::with_capacity(cap.unwrap_or(0)),
            exponents: Vec::with_capacity(cap.unwrap_or(0) * variables.len()),
            ring: ring.clone(),
            variables,
            order,
        }
    }

    /// Constructs a zero polynomial, inheriting the ring and variable map from `self`.
    #[inline]
    pub fn zero(&self) -> Self {
        Self {
            coefficients: vec![],
            exponents: vec![],
            ring: self.ring.clone(),
            variables: self.variables.clone(),
            order: self.order.clone(),
        }
    }

    #[inline]
    pub fn zero_with_capacity(&self, cap: usize) -> Self {
        Self::new(&self.ring, Some(cap), self.variables.clone(), self.order.clone())
    }

    /// Constructs a constant polynomial,
    /// inheriting the ring and variable map from `self`.
    #[inline]
    pub fn constant(&self, coeff: F::Element) -> Self {
        if F::is_zero(&coeff) {
            return self.zero();
        }

        let mut r = self.zero();
        r.coefficients.push(coeff);
        r.exponents = vec![E::zero(); self.nvars()];
        r
    }

    /// Constructs a polynomial that is one, inheriting the ring and variable map from `self`.
    #[inline]
    pub fn one(&self) -> Self {
        self.constant(self.ring.one())
    }

    /// Constructs a polynomial with a single term.
    #[inline]
    pub fn monomial(&self, coeff: F::Element, exponents: Vec<E>) -> Self {
        debug_assert!(self.nvars() == exponents.len());

        if F::is_zero(&coeff) {
            return self.zero();
        }

        let mut r = self.zero();
        r.coefficients.push(coeff);
        r.exponents = exponents;
        r
    }

    #[inline]
    pub fn ring(&self) -> &F {
        &self.ring
    }

    #[inline]
    pub fn order(&self) -> &O {
        &self.order
    }

    /// Get the coefficients in ascending term order.
    #[inline]
    pub fn coefficients(&self) -> &[F::Element] {
        &self.coefficients
    }

    /// Get a copy of the variable list.
    pub fn get_vars(&self) -> Arc<Vec<Variable>> {
        self.variables.clone()
    }

    /// Get a reference to the variables list.
    pub fn get_vars_ref(&self) -> &[Variable] {
        self.variables.as_ref()
    }

    /// Returns `true` if both polynomials belong to the same ring.
    #[inline]
    pub fn same_ring(&self, other: &Self) -> bool {
        self.ring == other.ring && self.variables == other.variables && self.order == other.order
    }

    /// Check that `other` belongs to the same ring as `self`.
    pub fn check_compatible(&self, other: &Self) -> Result<(), PolynomialError> {
        if self.nvars() != other.nvars() {
            return Err(PolynomialError::ArityMismatch {
                expected: self.nvars(),
                found: other.nvars(),
            });
        }

        if !self.same_ring(other) {
            return Err(PolynomialError::RingMismatch);
        }

        Ok(())
    }

    #[inline(always)]
    pub(crate) fn assert_compatible(&self, other: &Self) {
        if let Err(e) = self.check_compatible(other) {
            panic!("Cannot combine {} and {}: {}", self, other, e);
        }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.nterms() == 0
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        self.nterms() == 1
            && self.ring.is_one(&self.coefficients[0])
            && self.exponents.iter().all(|x| x.is_zero())
    }

    /// Returns the number of terms in the polynomial.
    #[inline]
    pub fn nterms(&self) -> usize {
        self.coefficients.len()
    }

    /// Returns the number of variables in the polynomial.
    #[inline]
    pub fn nvars(&self) -> usize {
        self.variables.len()
    }

    /// Returns true if the polynomial is constant.
    #[inline]
    pub fn is_constant(&self) -> bool {
        match self.nterms() {
            0 => true,
            1 => self.exponents.iter().all(|e| e.is_zero()),
            _ => false,
        }
    }

    /// Get the constant term of the polynomial.
    #[inline]
    pub fn get_constant(&self) -> F::Element {
        if self.is_zero() || !self.exponents(0).iter().all(|e| e.is_zero()) {
            return self.ring.zero();
        }

        self.coefficients[0].clone()
    }

    /// Returns the slice for the exponents of the specified monomial.
    #[inline]
    pub fn exponents(&self, index: usize) -> &[E] {
        &self.exponents[index * self.nvars()..(index + 1) * self.nvars()]
    }

    #[inline(always)]
    pub fn last_exponents(&self) -> &[E] {
        self.exponents(self.nterms() - 1)
    }

    /// Returns an iterator over the exponents of every monomial.
    #[inline]
    pub fn exponents_iter(&self) -> std::slice::Chunks<E> {
        self.exponents.chunks(self.nvars().max(1))
    }

    /// Check if the polynomial is sorted and has only non-zero coefficients
    pub fn check_consistency(&self) {
        assert_eq!(self.coefficients.len(), self.nterms());
        assert_eq!(self.exponents.len(), self.nterms() * self.nvars());

        for c in &self.coefficients {
            if F::is_zero(c) {
                panic!("Inconsistent polynomial (0 coefficient): {}", self);
            }
        }

        for t in 1..self.nterms() {
            match self.order.cmp(self.exponents(t), self.exponents(t - 1)) {
                Ordering::Equal => panic!("Inconsistent polynomial (equal monomials): {}", self),
                Ordering::Less => panic!(
                    "Inconsistent polynomial (wrong monomial ordering): {}",
                    self
                ),
                Ordering::Greater => {}
            }
        }
    }

    /// Appends a monomial to the polynomial, merging it with an existing monomial.
    pub(crate) fn append_monomial(&mut self, coefficient: F::Element, exponents: &[E]) {
        if F::is_zero(&coefficient) {
            return;
        }
        if self.nvars() != exponents.len() {
            panic!(
                "nvars mismatched: got {}, expected {}",
                exponents.len(),
                self.nvars()
            );
        }

        // should we append to the back?
        if self.nterms() == 0 || self.order.cmp(self.last_exponents(), exponents).is_lt() {
            self.coefficients.push(coefficient);
            self.exponents.extend_from_slice(exponents);
            return;
        }

        // binary search for the insertion point
        let mut l = 0;
        let mut r = self.nterms();
        while l < r {
            let m = (l + r) / 2;
            match self.order.cmp(exponents, self.exponents(m)) {
                Ordering::Equal => {
                    self.ring.add_assign(&mut self.coefficients[m], &coefficient);
                    if F::is_zero(&self.coefficients[m]) {
                        self.coefficients.remove(m);
                        let i = m * self.nvars();
                        self.exponents.drain(i..i + self.nvars());
                    }
                    return;
                }
                Ordering::Greater => l = m + 1,
                Ordering::Less => r = m,
            }
        }

        self.coefficients.insert(l, coefficient);
        let i = l * self.nvars();
        self.exponents.splice(i..i, exponents.iter().cloned());
    }

    /// Get the leading coefficient, or zero for the zero polynomial.
    pub fn lcoeff(&self) -> F::Element {
        self.coefficients
            .last()
            .cloned()
            .unwrap_or_else(|| self.ring.zero())
    }

    /// Get a reference to the leading coefficient. Panics on the zero polynomial.
    #[inline]
    pub(crate) fn lcoeff_ref(&self) -> &F::Element {
        &self.coefficients[self.nterms() - 1]
    }

    /// Get the exponents of the leading monomial. The zero polynomial
    /// has the exponents of the constant monomial.
    pub fn leading_exponent(&self) -> ExponentVector<E> {
        if self.is_zero() {
            ExponentVector::zero(self.nvars())
        } else {
            self.last_exponents().into()
        }
    }

    /// Get the exponents of the smallest monomial.
    pub fn trailing_exponent(&self) -> ExponentVector<E> {
        if self.is_zero() {
            ExponentVector::zero(self.nvars())
        } else {
            self.exponents(0).into()
        }
    }

    /// The leading term as a polynomial.
    pub fn leading_term(&self) -> Self {
        if self.is_zero() {
            return self.zero();
        }

        self.monomial(self.lcoeff(), self.last_exponents().to_vec())
    }

    /// Get the highest degree of the variable `x`.
    pub fn degree(&self, x: usize) -> E {
        self.exponents_iter()
            .map(|e| e[x])
            .max()
            .unwrap_or_else(E::zero)
    }

    /// Get the lowest degree of the variable `x`.
    pub fn ldegree(&self, x: usize) -> E {
        self.exponents_iter()
            .map(|e| e[x])
            .min()
            .unwrap_or_else(E::zero)
    }

    /// Get the highest total degree of all terms.
    pub fn total_degree(&self) -> u64 {
        self.exponents_iter()
            .map(|e| e.iter().map(|x| x.to_u64()).sum())
            .max()
            .unwrap_or(0)
    }

    /// The maximal degree of every variable.
    pub fn degree_bounds(&self) -> Vec<E> {
        (0..self.nvars()).map(|i| self.degree(i)).collect()
    }

    /// The indices of the variables that occur in the polynomial.
    pub fn occurring_variables(&self) -> Vec<usize> {
        (0..self.nvars())
            .filter(|i| self.exponents_iter().any(|e| !e[*i].is_zero()))
            .collect()
    }

    /// Returns `true` if at most one variable occurs.
    pub fn is_univariate(&self) -> bool {
        self.occurring_variables().len() <= 1
    }

    /// The exponents that all terms have in common.
    pub fn common_monomial(&self) -> ExponentVector<E> {
        if self.is_zero() {
            return ExponentVector::zero(self.nvars());
        }

        let mut e = self.exponents(0).to_vec();
        for t in self.exponents_iter().skip(1) {
            for (a, b) in e.iter_mut().zip(t) {
                *a = (*a).min(*b);
            }
        }
        e.into()
    }

    /// Multiply every coefficient with `other`.
    pub fn mul_coeff(mut self, other: F::Element) -> Self {
        if F::is_zero(&other) {
            return self.zero();
        }

        for c in &mut self.coefficients {
            self.ring.mul_assign(c, &other);
        }

        self.remove_zero_terms();
        self
    }

    /// Remove the terms whose coefficient became zero, which can happen
    /// in rings with zero divisors.
    fn remove_zero_terms(&mut self) {
        if self.coefficients.iter().all(|c| !F::is_zero(c)) {
            return;
        }

        let nvars = self.nvars();
        let mut new = self.zero_with_capacity(self.nterms());
        for (i, c) in self.coefficients.drain(..).enumerate() {
            if !F::is_zero(&c) {
                new.coefficients.push(c);
                new.exponents
                    .extend_from_slice(&self.exponents[i * nvars..(i + 1) * nvars]);
            }
        }
        *self = new;
    }

    /// Multiply with the monomial `c * x^exponents`.
    pub fn mul_monomial(&self, c: &F::Element, exponents: &[E]) -> Self {
        if F::is_zero(c) || self.is_zero() {
            return self.zero();
        }

        let mut r = self.clone();
        for (rc, re) in r.coefficients.iter_mut().zip(r.exponents.chunks_mut(self.nvars().max(1))) {
            self.ring.mul_assign(rc, c);
            for (a, b) in re.iter_mut().zip(exponents) {
                *a = match a.checked_add(b) {
                    Some(s) => s,
                    None => panic!("Exponent overflow while multiplying {}", self),
                };
            }
        }

        // term orders are compatible with multiplication by a monomial
        r.remove_zero_terms();
        r
    }

    /// Multiply by the monomial `x^exponents`.
    pub fn mul_exp(&self, exponents: &[E]) -> Self {
        self.mul_monomial(&self.ring.one(), exponents)
    }

    /// Divide by the monomial `x^exponents`, which must divide every term.
    pub fn div_exp(&self, exponents: &[E]) -> Self {
        let mut r = self.clone();
        for re in r.exponents.chunks_mut(self.nvars().max(1)) {
            for (a, b) in re.iter_mut().zip(exponents) {
                debug_assert!(*a >= *b);
                *a = *a - *b;
            }
        }
        r
    }

    /// Map the coefficients to another ring. Terms that map to zero are removed.
    pub fn map_coeff<U: Ring, T: Fn(&F::Element) -> U::Element>(
        &self,
        f: T,
        ring: U,
    ) -> MultivariatePolynomial<U, E, O> {
        let mut r = MultivariatePolynomial::new(
            &ring,
            Some(self.nterms()),
            self.variables.clone(),
            self.order.clone(),
        );

        for (t, c) in self.coefficients.iter().enumerate() {
            let nc = f(c);
            if !U::is_zero(&nc) {
                r.coefficients.push(nc);
                r.exponents.extend_from_slice(self.exponents(t));
            }
        }
        r
    }

    /// Sort the polynomial with respect to another term order.
    pub fn reorder<ON: MonomialOrder>(&self, order: ON) -> MultivariatePolynomial<F, E, ON> {
        let mut b = PolynomialBuilder::new(self.ring.clone(), self.variables.clone(), order);
        for t in self {
            b.add_term(t.coefficient.clone(), t.exponents);
        }
        b.build()
    }

    /// Convert the exponents to another width.
    pub fn convert_exponents<E2: Exponent>(
        &self,
    ) -> Result<MultivariatePolynomial<F, E2, O>, PolynomialError> {
        let exponents = self
            .exponents
            .iter()
            .map(|e| E2::try_from_u64(e.to_u64()).ok_or(PolynomialError::ExponentOverflow(e.to_u64())))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(MultivariatePolynomial {
            coefficients: self.coefficients.clone(),
            exponents,
            ring: self.ring.clone(),
            variables: self.variables.clone(),
            order: self.order.clone(),
        })
    }

    /// Append new variables with exponent zero to the variable list.
    pub fn extend_variables(&self, new_vars: &[Variable]) -> Self {
        let mut vars = self.variables.as_ref().clone();
        vars.extend_from_slice(new_vars);

        let mut r = MultivariatePolynomial::new(
            &self.ring,
            Some(self.nterms()),
            Arc::new(vars),
            self.order.clone(),
        );
        for t in self {
            let e = ExponentVector::from(t.exponents).extend(new_vars.len());
            r.coefficients.push(t.coefficient.clone());
            r.exponents.extend_from_slice(&e);
        }

        // appended zero exponents can change the order of weighted or block orders
        let mut b = PolynomialBuilder::for_poly(&r);
        for t in &r {
            b.add_term(t.coefficient.clone(), t.exponents);
        }
        b.build()
    }

    /// Remove the variables `start..start+len`, which must not occur in the polynomial.
    pub fn contract_variables(&self, start: usize, len: usize) -> Result<Self, PolynomialError> {
        if start + len > self.nvars() {
            return Err(PolynomialError::ArityMismatch {
                expected: self.nvars(),
                found: start + len,
            });
        }

        if self
            .exponents_iter()
            .any(|e| e[start..start + len].iter().any(|x| !x.is_zero()))
        {
            return Err(PolynomialError::Unsupported(
                "cannot remove a variable that occurs in the polynomial",
            ));
        }

        let mut vars = self.variables.as_ref().clone();
        vars.drain(start..start + len);

        let mut b = PolynomialBuilder::new(self.ring.clone(), Arc::new(vars), self.order.clone());
        for t in self {
            b.add_term(
                t.coefficient.clone(),
                &ExponentVector::from(t.exponents).contract(start, len),
            );
        }
        Ok(b.build())
    }

    /// Take the derivative of the polynomial w.r.t the variable `var`.
    pub fn derivative(&self, var: usize) -> Self {
        debug_assert!(var < self.nvars());

        let mut res = self.zero_with_capacity(self.nterms());

        let mut exp = vec![E::zero(); self.nvars()];
        for x in self {
            if x.exponents[var] > E::zero() {
                exp.copy_from_slice(x.exponents);
                let pow = exp[var].to_u64();
                exp[var] = exp[var] - E::one();
                res.append_monomial(
                    self.ring.mul(x.coefficient, &self.ring.nth(&Integer::from(pow))),
                    &exp,
                );
            }
        }

        res
    }

    /// Replace the variable `n` by the value `v`.
    pub fn replace(&self, n: usize, v: &F::Element) -> Self {
        let mut pow_cache: Vec<F::Element> = vec![self.ring.one()];
        let mut b = PolynomialBuilder::for_poly(self);
        let mut exp = vec![E::zero(); self.nvars()];

        for t in self {
            let d = t.exponents[n].to_u64() as usize;
            while pow_cache.len() <= d {
                let next = self.ring.mul(&pow_cache[pow_cache.len() - 1], v);
                pow_cache.push(next);
            }

            exp.copy_from_slice(t.exponents);
            exp[n] = E::zero();
            b.add_term(self.ring.mul(t.coefficient, &pow_cache[d]), &exp);
        }

        b.build()
    }

    /// Replace the variable `n` by the polynomial `v`.
    pub fn replace_with_poly(&self, n: usize, v: &Self) -> Self {
        let mut res = self.zero();
        let mut exp = vec![E::zero(); self.nvars()];
        for t in self {
            exp.copy_from_slice(t.exponents);
            exp[n] = E::zero();
            let m = self.monomial(t.coefficient.clone(), exp.clone());
            res = &res + &(&m * &v.pow(t.exponents[n].to_u64() as usize));
        }
        res
    }

    /// Evaluate the polynomial at the point `values`.
    pub fn evaluate(&self, values: &[F::Element]) -> F::Element {
        let mut r = self.ring.zero();
        for t in self {
            let mut c = t.coefficient.clone();
            for (v, e) in values.iter().zip(t.exponents) {
                if !e.is_zero() {
                    self.ring.mul_assign(&mut c, &self.ring.pow(v, e.to_u64()));
                }
            }
            self.ring.add_assign(&mut r, &c);
        }
        r
    }

    /// Compute `self^pow` by repeated squaring.
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

        x * &y
    }

    fn add_impl(&self, other: &Self, negate_other: bool) -> Self {
        self.assert_compatible(other);

        let mut res = self.zero_with_capacity(self.nterms() + other.nterms());
        let mut i = 0;
        let mut j = 0;

        let other_coeff = |k: usize| {
            if negate_other {
                self.ring.neg(&other.coefficients[k])
            } else {
                other.coefficients[k].clone()
            }
        };

        while i < self.nterms() && j < other.nterms() {
            match self.order.cmp(self.exponents(i), other.exponents(j)) {
                Ordering::Less => {
                    res.coefficients.push(self.coefficients[i].clone());
                    res.exponents.extend_from_slice(self.exponents(i));
                    i += 1;
                }
                Ordering::Greater => {
                    res.coefficients.push(other_coeff(j));
                    res.exponents.extend_from_slice(other.exponents(j));
                    j += 1;
                }
                Ordering::Equal => {
                    let c = self.ring.add(&self.coefficients[i], &other_coeff(j));
                    if !F::is_zero(&c) {
                        res.coefficients.push(c);
                        res.exponents.extend_from_slice(self.exponents(i));
                    }
                    i += 1;
                    j += 1;
                }
            }
        }

        for k in i..self.nterms() {
            res.coefficients.push(self.coefficients[k].clone());
            res.exponents.extend_from_slice(self.exponents(k));
        }

        for k in j..other.nterms() {
            res.coefficients.push(other_coeff(k));
            res.exponents.extend_from_slice(other.exponents(k));
        }

        res
    }

    /// Multiply by term-by-term convolution.
    fn mul_impl(&self, other: &Self) -> Self {
        self.assert_compatible(other);

        if self.is_zero() || other.is_zero() {
            return self.zero();
        }

        if other.nterms() == 1 {
            return self.mul_monomial(&other.coefficients[0], other.exponents(0));
        }

        if self.nterms() == 1 {
            return other.mul_monomial(&self.coefficients[0], self.exponents(0));
        }

        let mut b = PolynomialBuilder::for_poly(self);
        let mut exp = vec![E::zero(); self.nvars()];
        for t1 in self {
            for t2 in other {
                for ((e, a), b) in exp.iter_mut().zip(t1.exponents).zip(t2.exponents) {
                    *e = match a.checked_add(b) {
                        Some(s) => s,
                        None => panic!("Exponent overflow while multiplying {} and {}", self, other),
                    };
                }
                b.add_term(self.ring.mul(t1.coefficient, t2.coefficient), &exp);
            }
        }

        b.build()
    }

    /// Divide by `div`, requiring the leading coefficient of `div` to be invertible.
    /// The leading monomial of the remainder is not a multiple of the leading monomial of `div`.
    pub fn quot_rem(&self, div: &Self) -> Result<(Self, Self), PolynomialError> {
        self.check_compatible(div)?;

        if div.is_zero() {
            return Err(PolynomialError::DivisionByZero);
        }

        if !self.ring.is_unit(div.lcoeff_ref()) {
            return Err(PolynomialError::NotInvertible(format!(
                "leading coefficient {} of {}",
                self.ring.printer(div.lcoeff_ref()),
                div
            )));
        }

        let (q, r, _) = self.division_loop(div, false);
        Ok((q, r))
    }

    /// Divide by `div` if the division is exact.
    pub fn divides(&self, div: &Self) -> Option<Self> {
        if div.is_zero() || !self.same_ring(div) {
            return None;
        }

        if self.is_zero() {
            return Some(self.zero());
        }

        let (q, r, exact) = self.division_loop(div, true);
        if exact && r.is_zero() {
            Some(q)
        } else {
            None
        }
    }

    /// Divide with remainder, moving every term whose monomial or coefficient is
    /// not divisible by the leading term of `div` into the remainder.
    pub fn quot_rem_euclidean(&self, div: &Self) -> (Self, Self) {
        if div.is_zero() {
            panic!("Cannot divide {} by zero", self);
        }

        let (q, r, _) = self.division_loop(div, false);
        (q, r)
    }

    /// The leading-monomial elimination loop. If `stop_early` is set, the loop
    /// stops as soon as a term cannot be divided and reports `false`.
    fn division_loop(&self, div: &Self, stop_early: bool) -> (Self, Self, bool) {
        let mut q = PolynomialBuilder::for_poly(self);
        let mut r = PolynomialBuilder::for_poly(self);
        let mut p = self.clone();

        let div_lm: ExponentVector<E> = div.last_exponents().into();
        let div_lc = div.lcoeff_ref();

        while !p.is_zero() {
            let lm: ExponentVector<E> = p.last_exponents().into();
            let lc = p.lcoeff();

            let quot = lm
                .checked_sub(&div_lm)
                .and_then(|m| self.ring.try_div(&lc, div_lc).map(|c| (m, c)));

            match quot {
                Some((m, c)) => {
                    p = &p - &div.mul_monomial(&c, &m);
                    q.add_term(c, &m);
                }
                None => {
                    if stop_early {
                        return (q.build(), p, false);
                    }

                    r.add_term(lc, &lm);
                    p.coefficients.pop();
                    let n = p.exponents.len() - p.nvars();
                    p.exponents.truncate(n);
                }
            }
        }

        (q.build(), r.build(), true)
    }

    /// Convert to a univariate polynomial in the variable `var`, with
    /// polynomial coefficients in the remaining variables.
    pub fn to_univariate(&self, var: usize) -> UnivariatePolynomial<PolynomialRing<F, E, O>> {
        let ring = PolynomialRing::from_poly(self);
        let deg = self.degree(var).to_u64() as usize;

        let mut builders: Vec<_> = (0..=deg).map(|_| PolynomialBuilder::for_poly(self)).collect();
        let mut exp = vec![E::zero(); self.nvars()];
        for t in self {
            exp.copy_from_slice(t.exponents);
            exp[var] = E::zero();
            builders[t.exponents[var].to_u64() as usize].add_term(t.coefficient.clone(), &exp);
        }

        let coeffs = builders.into_iter().map(|b| b.build()).collect();
        UnivariatePolynomial::from_coefficients(ring, coeffs, Arc::new(self.variables[var].clone()))
    }

    /// Convert a polynomial in which only `var` occurs to a dense univariate polynomial.
    pub fn to_univariate_from_univariate(&self, var: usize) -> UnivariatePolynomial<F> {
        let deg = self.degree(var).to_u64() as usize;
        let mut coeffs = vec![self.ring.zero(); if self.is_zero() { 0 } else { deg + 1 }];
        for t in self {
            debug_assert!(t
                .exponents
                .iter()
                .enumerate()
                .all(|(i, e)| i == var || e.is_zero()));
            self.ring
                .add_assign(&mut coeffs[t.exponents[var].to_u64() as usize], t.coefficient);
        }

        UnivariatePolynomial::from_coefficients(
            self.ring.clone(),
            coeffs,
            Arc::new(self.variables[var].clone()),
        )
    }

    /// Convert a univariate polynomial with polynomial coefficients back into
    /// a multivariate polynomial, where `var` is the univariate variable.
    pub fn from_univariate(u: &UnivariatePolynomial<PolynomialRing<F, E, O>>, var: usize) -> Self {
        let mut b = PolynomialBuilder::new(
            u.ring.ring.clone(),
            u.ring.variables.clone(),
            u.ring.order.clone(),
        );

        let mut exp = vec![E::zero(); u.ring.nvars()];
        for (d, c) in u.coefficients.iter().enumerate() {
            for t in c {
                exp.copy_from_slice(t.exponents);
                exp[var] = E::from_u64(d as u64);
                b.add_term(t.coefficient.clone(), &exp);
            }
        }
        b.build()
    }

    /// Convert a dense univariate polynomial to a polynomial in the ring of `self`,
    /// where the univariate variable becomes `var`.
    pub fn from_univariate_coefficients(&self, u: &UnivariatePolynomial<F>, var: usize) -> Self {
        let mut r = self.zero_with_capacity(u.coefficients.len());
        let mut exp = vec![E::zero(); self.nvars()];
        for (d, c) in u.coefficients.iter().enumerate() {
            if !F::is_zero(c) {
                exp[var] = E::from_u64(d as u64);
                r.append_monomial(c.clone(), &exp);
            }
        }
        r
    }

    /// Write the polynomial as a polynomial in the first `n` variables whose
    /// coefficients are polynomials in the remaining variables. Both levels use
    /// the lexicographic order.
    pub fn to_recursive(
        &self,
        n: usize,
    ) -> MultivariatePolynomial<PolynomialRing<F, E, LexOrder>, E, LexOrder> {
        let n = n.min(self.nvars());
        let outer_vars = Arc::new(self.variables[..n].to_vec());
        let inner_ring: PolynomialRing<F, E, LexOrder> =
            PolynomialRing::new(self.ring.clone(), Arc::new(self.variables[n..].to_vec()));

        let mut parts: HashMap<SmallVec<[E; INLINED_EXPONENTS]>, PolynomialBuilder<F, E, LexOrder>> =
            HashMap::new();
        for t in self {
            let (outer, inner) = t.exponents.split_at(n);
            parts
                .entry(SmallVec::from_slice(outer))
                .or_insert_with(|| {
                    PolynomialBuilder::new(
                        self.ring.clone(),
                        inner_ring.variables.clone(),
                        LexOrder,
                    )
                })
                .add_term(t.coefficient.clone(), inner);
        }

        let mut b = PolynomialBuilder::new(inner_ring, outer_vars, LexOrder);
        for (e, c) in parts {
            b.add_term(c.build(), &e);
        }
        b.build()
    }

    /// The inverse of [MultivariatePolynomial::to_recursive].
    pub fn from_recursive(
        r: &MultivariatePolynomial<PolynomialRing<F, E, LexOrder>, E, LexOrder>,
        order: O,
    ) -> Self {
        let mut vars = r.variables.as_ref().clone();
        vars.extend(r.ring.variables.iter().cloned());

        let mut b = PolynomialBuilder::new(r.ring.ring.clone(), Arc::new(vars), order);
        let mut exp = vec![];
        for t in r {
            for ti in t.coefficient {
                exp.clear();
                exp.extend_from_slice(t.exponents);
                exp.extend_from_slice(ti.exponents);
                b.add_term(ti.coefficient.clone(), &exp);
            }
        }
        b.build()
    }
}

impl<F: EuclideanDomain, E: Exponent, O: MonomialOrder> MultivariatePolynomial<F, E, O> {
    /// Get the content, the gcd of the coefficients. The content is
    /// non-negative for rings that have a sign.
    pub fn content(&self) -> F::Element {
        if self.is_zero() {
            return self.ring.zero();
        }

        let mut c = self.coefficients[0].clone();
        for cc in self.coefficients.iter().skip(1) {
            if self.ring.is_unit(&c) {
                break;
            }
            c = self.ring.gcd(&c, cc);
        }

        self.ring.abs(&c)
    }

    /// Divide every coefficient by `other`, which must divide every coefficient.
    pub fn div_coeff(mut self, other: &F::Element) -> Self {
        if self.ring.is_one(other) {
            return self;
        }

        for c in &mut self.coefficients {
            let (quot, rem) = self.ring.quot_rem(c, other);
            debug_assert!(F::is_zero(&rem));
            *c = quot;
        }
        self
    }

    /// Divide by the content.
    pub fn primitive_part(&self) -> Self {
        if self.is_zero() {
            return self.clone();
        }

        let c = self.content();
        self.clone().div_coeff(&c)
    }
}

impl<F: Field, E: Exponent, O: MonomialOrder> MultivariatePolynomial<F, E, O> {
    /// Make the polynomial monic, i.e., make the leading coefficient `1` by
    /// multiplying all monomials with `1/lcoeff`.
    pub fn monic(self) -> Self {
        if self.is_zero() || self.ring.is_one(self.lcoeff_ref()) {
            return self;
        }

        let ci = self.ring.inv(self.lcoeff_ref());
        self.mul_coeff(ci)
    }

    /// Compute the extended gcd `(g, s, t)` with `s * self + t * other = g` of two
    /// polynomials in which only the variable `var` occurs. The gcd is monic.
    pub fn egcd_univariate(
        &self,
        other: &Self,
        var: usize,
    ) -> Result<(Self, Self, Self), PolynomialError> {
        self.check_compatible(other)?;
        if var >= self.nvars() {
            return Err(PolynomialError::ArityMismatch {
                expected: self.nvars(),
                found: var + 1,
            });
        }

        for p in [self, other] {
            if p.occurring_variables().iter().any(|v| *v != var) {
                return Err(PolynomialError::Unsupported(
                    "extended gcd of a multivariate polynomial",
                ));
            }
        }

        let (g, s, t) = self
            .to_univariate_from_univariate(var)
            .eea(&other.to_univariate_from_univariate(var));

        Ok((
            self.from_univariate_coefficients(&g, var),
            self.from_univariate_coefficients(&s, var),
            self.from_univariate_coefficients(&t, var),
        ))
    }
}

impl<F: Ring, E: Exponent, O: MonomialOrder> std::fmt::Debug for MultivariatePolynomial<F, E, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.is_zero() {
            return write!(f, "[]");
        }
        let mut first = true;
        write!(f, "[ ")?;
        for monomial in self {
            if first {
                first = false;
            } else {
                write!(f, ", ")?;
            }

            write!(f, "{{ {:?}, {:?} }}", monomial.coefficient, monomial.exponents)?;
        }
        write!(f, " ]")
    }
}

impl<F: Ring, E: Exponent, O: MonomialOrder> Display for MultivariatePolynomial<F, E, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        PolynomialPrinter::new(self).fmt(f)
    }
}

impl<F: Ring, E: Exponent, O: MonomialOrder> PartialEq for MultivariatePolynomial<F, E, O> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.variables == other.variables
            && self.exponents == other.exponents
            && self.coefficients == other.coefficients
    }
}

impl<F: Ring, E: Exponent, O: MonomialOrder> Eq for MultivariatePolynomial<F, E, O> {}

impl<F: Ring, E: Exponent, O: MonomialOrder> std::hash::Hash for MultivariatePolynomial<F, E, O> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.coefficients.hash(state);
        self.exponents.hash(state);
    }
}

impl<F: Ring, E: Exponent, O: MonomialOrder> crate::domains::InternalOrdering
    for MultivariatePolynomial<F, E, O>
{
    /// An ordering of polynomials that has no intuitive meaning.
    fn internal_cmp(&self, other: &Self) -> Ordering {
        self.exponents
            .cmp(&other.exponents)
            .then_with(|| self.coefficients.len().cmp(&other.coefficients.len()))
            .then_with(|| {
                for (a, b) in self.coefficients.iter().zip(&other.coefficients) {
                    match a.internal_cmp(b) {
                        Ordering::Equal => {}
                        o => return o,
                    }
                }
                Ordering::Equal
            })
    }
}

impl<'a, F: Ring, E: Exponent, O: MonomialOrder> Add<&'a MultivariatePolynomial<F, E, O>>
    for &'a MultivariatePolynomial<F, E, O>
{
    type Output = MultivariatePolynomial<F, E, O>;

    fn add(self, other: &'a MultivariatePolynomial<F, E, O>) -> Self::Output {
        self.add_impl(other, false)
    }
}

impl<F: Ring, E: Exponent, O: MonomialOrder> Add for MultivariatePolynomial<F, E, O> {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        self.add_impl(&other, false)
    }
}

impl<'a, F: Ring, E: Exponent, O: MonomialOrder> Sub<&'a MultivariatePolynomial<F, E, O>>
    for &'a MultivariatePolynomial<F, E, O>
{
    type Output = MultivariatePolynomial<F, E, O>;

    fn sub(self, other: &'a MultivariatePolynomial<F, E, O>) -> Self::Output {
        self.add_impl(other, true)
    }
}

impl<F: Ring, E: Exponent, O: MonomialOrder> Sub for MultivariatePolynomial<F, E, O> {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        self.add_impl(&other, true)
    }
}

impl<'a, F: Ring, E: Exponent, O: MonomialOrder> Neg for &'a MultivariatePolynomial<F, E, O> {
    type Output = MultivariatePolynomial<F, E, O>;

    fn neg(self) -> Self::Output {
        let mut r = self.clone();
        for c in &mut r.coefficients {
            *c = self.ring.neg(c);
        }
        r
    }
}

impl<F: Ring, E: Exponent, O: MonomialOrder> Neg for MultivariatePolynomial<F, E, O> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        -&self
    }
}

impl<'a, F: Ring, E: Exponent, O: MonomialOrder> Mul<&'a MultivariatePolynomial<F, E, O>>
    for &'a MultivariatePolynomial<F, E, O>
{
    type Output = MultivariatePolynomial<F, E, O>;

    fn mul(self, other: &'a MultivariatePolynomial<F, E, O>) -> Self::Output {
        self.mul_impl(other)
    }
}

impl<'a, F: Ring, E: Exponent, O: MonomialOrder> Mul<&'a MultivariatePolynomial<F, E, O>>
    for MultivariatePolynomial<F, E, O>
{
    type Output = Self;

    fn mul(self, other: &'a MultivariatePolynomial<F, E, O>) -> Self::Output {
        self.mul_impl(other)
    }
}

impl<F: Ring, E: Exponent, O: MonomialOrder> Mul for MultivariatePolynomial<F, E, O> {
    type Output = Self;

    fn mul(self, other: Self) -> Self::Output {
        self.mul_impl(&other)
    }
}

/// View object for a term in a multivariate polynomial.
#[derive(Copy, Clone, Debug)]
pub struct MonomialView<'a, F: 'a + Ring, E: 'a + Exponent> {
    pub coefficient: &'a F::Element,
    pub exponents: &'a [E],
}

/// Iterator over terms in a multivariate polynomial, in ascending term order.
pub struct MonomialViewIterator<'a, F: Ring, E: Exponent, O: MonomialOrder> {
    poly: &'a MultivariatePolynomial<F, E, O>,
    index: usize,
}

impl<'a, F: Ring, E: Exponent, O: MonomialOrder> Iterator for MonomialViewIterator<'a, F, E, O> {
    type Item = MonomialView<'a, F, E>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index == self.poly.nterms() {
            None
        } else {
            let view = MonomialView {
                coefficient: &self.poly.coefficients[self.index],
                exponents: self.poly.exponents(self.index),
            };
            self.index += 1;
            Some(view)
        }
    }
}

impl<'a, F: Ring, E: Exponent, O: MonomialOrder> IntoIterator
    for &'a MultivariatePolynomial<F, E, O>
{
    type Item = MonomialView<'a, F, E>;
    type IntoIter = MonomialViewIterator<'a, F, E, O>;

    fn into_iter(self) -> Self::IntoIter {
        MonomialViewIterator {
            poly: self,
            index: 0,
        }
    }
}

#[cfg(test)]
mod test {
    use rand::rngs::StdRng;
    use rand::{Rng as _, SeedableRng};

    use crate::domains::Ring;
    use crate::domains::integer::{Integer, Z};
    use crate::domains::rational::{Rational, Q};
    use crate::error::PolynomialError;
    use crate::poly::order::{GradedLexOrder, GrevLexOrder, LexOrder, MonomialOrder};
    use crate::poly::{variables, Exponent};

    use super::{MultivariatePolynomial, PolynomialRing};

    fn random_poly<R: Ring, E: Exponent, O: MonomialOrder>(
        r: &PolynomialRing<R, E, O>,
        rng: &mut StdRng,
        nterms: usize,
        max_exp: u64,
    ) -> MultivariatePolynomial<R, E, O> {
        let terms: Vec<_> = (0..nterms)
            .map(|_| {
                let c = r.ring.sample(&mut *rng, (-9, 10));
                let e = (0..r.variables.len())
                    .map(|_| E::from_u64(rng.gen_range(0..=max_exp)))
                    .collect();
                (c, e)
            })
            .collect();
        r.from_terms(terms).unwrap()
    }

    fn division_identity<E: Exponent, O: MonomialOrder + Default>(rng: &mut StdRng) {
        let r: PolynomialRing<_, E, O> = PolynomialRing::new(Q, variables(&["x", "y", "z"]));
        for _ in 0..25 {
            let a = random_poly(&r, rng, 6, 4);
            let b = random_poly(&r, rng, 3, 2);
            if b.is_zero() {
                continue;
            }

            let (q, rem) = a.quot_rem(&b).unwrap();
            assert_eq!(&(&q * &b) + &rem, a, "{} / {}", a, b);
        }
    }

    fn bezout_identity<E: Exponent, O: MonomialOrder + Default>(rng: &mut StdRng) {
        let r: PolynomialRing<_, E, O> = PolynomialRing::new(Q, variables(&["x"]));
        for _ in 0..25 {
            let shared = random_poly(&r, rng, 2, 2);
            let a = &random_poly(&r, rng, 3, 3) * &shared;
            let b = &random_poly(&r, rng, 3, 3) * &shared;
            if a.is_zero() || b.is_zero() {
                continue;
            }

            let (g, s, t) = a.egcd_univariate(&b, 0).unwrap();
            assert_eq!(&(&s * &a) + &(&t * &b), g, "egcd of {} and {}", a, b);
            assert!(a.divides(&g).is_some() && b.divides(&g).is_some());
            assert!(g.divides(&shared).is_some());
        }
    }

    fn gcd_symmetry<E: Exponent, O: MonomialOrder + Default>(rng: &mut StdRng) {
        let r: PolynomialRing<_, E, O> = PolynomialRing::new(Z, variables(&["x", "y"]));
        for _ in 0..15 {
            let shared = random_poly(&r, rng, 2, 2);
            let a = &random_poly(&r, rng, 3, 2) * &shared;
            let b = &random_poly(&r, rng, 3, 2) * &shared;
            if a.is_zero() || b.is_zero() {
                continue;
            }

            let g = a.gcd(&b);
            assert_eq!(g, b.gcd(&a), "gcd of {} and {}", a, b);
            assert!(a.divides(&g).is_some() && b.divides(&g).is_some());
            if !shared.is_zero() {
                assert!(g.divides(&shared).is_some());
            }
        }
    }

    #[test]
    fn random_identities() {
        let mut rng = StdRng::seed_from_u64(17);

        division_identity::<u8, LexOrder>(&mut rng);
        division_identity::<u16, GradedLexOrder>(&mut rng);
        division_identity::<u32, GrevLexOrder>(&mut rng);

        bezout_identity::<u8, GrevLexOrder>(&mut rng);
        bezout_identity::<u16, LexOrder>(&mut rng);
        bezout_identity::<u32, GradedLexOrder>(&mut rng);

        gcd_symmetry::<u16, LexOrder>(&mut rng);
        gcd_symmetry::<u8, GradedLexOrder>(&mut rng);
        gcd_symmetry::<u32, GrevLexOrder>(&mut rng);
    }

    #[test]
    fn construction() {
        let r: PolynomialRing<_, u16> = PolynomialRing::new(Z, variables(&["x", "y"]));
        let p = r
            .from_terms([
                (Integer::new(3), vec![1, 0]),
                (Integer::new(2), vec![0, 2]),
                (Integer::new(-3), vec![1, 0]),
            ])
            .unwrap();
        assert_eq!(p.nterms(), 1);
        assert_eq!(p.to_string(), "2*y^2");
        assert!(r.contains(&p));

        assert_eq!(
            r.variable(2),
            Err(PolynomialError::ArityMismatch {
                expected: 2,
                found: 3
            })
        );
        assert_eq!(
            r.from_terms([(Integer::new(1), vec![1])]),
            Err(PolynomialError::ArityMismatch {
                expected: 2,
                found: 1
            })
        );

        let big = r.monomial(Integer::new(1), &vec![300, 0].into()).unwrap();
        assert_eq!(
            big.convert_exponents::<u8>(),
            Err(PolynomialError::ExponentOverflow(300))
        );
        assert_eq!(big.convert_exponents::<u32>().unwrap().degree(0), 300);
    }

    #[test]
    fn arithmetic() {
        let r: PolynomialRing<_, u16> = PolynomialRing::new(Z, variables(&["x", "y"]));
        let x = r.variable(0).unwrap();
        let y = r.variable(1).unwrap();

        let s = &x + &y;
        let sq = &s * &s;
        assert_eq!(sq.to_string(), "x^2+2*x*y+y^2");
        assert_eq!(sq, s.pow(2));
        assert_eq!(&sq - &sq, r.zero());
        assert_eq!(sq.total_degree(), 2);
        assert_eq!(sq.degree(1), 2);
        assert_eq!(
            sq.evaluate(&[Integer::new(2), Integer::new(3)]),
            Integer::new(25)
        );
        assert_eq!((-&s).to_string(), "-x-y");
    }

    #[test]
    fn division() {
        let r: PolynomialRing<_, u16> = PolynomialRing::new(Q, variables(&["x", "y"]));
        let x = r.variable(0).unwrap();
        let y = r.variable(1).unwrap();

        let p = &(&x * &x) + &y;
        let d = &x - &y;
        let (q, rem) = p.quot_rem(&d).unwrap();
        assert_eq!(q, &x + &y);
        assert_eq!(rem, &(&y * &y) + &y);
        assert_eq!(&(&q * &d) + &rem, p);

        assert_eq!(p.quot_rem(&r.zero()), Err(PolynomialError::DivisionByZero));
        assert_eq!(
            (&(&x * &x) - &(&y * &y)).divides(&d),
            Some(&x + &y)
        );
        assert_eq!(p.divides(&d), None);

        let other: PolynomialRing<_, u16> = PolynomialRing::new(Q, variables(&["x", "z"]));
        assert_eq!(
            p.quot_rem(&other.variable(0).unwrap()),
            Err(PolynomialError::RingMismatch)
        );

        let zr: PolynomialRing<_, u16> = PolynomialRing::new(Z, variables(&["x"]));
        let zx = zr.variable(0).unwrap();
        let two_x = zx.clone().mul_coeff(Integer::new(2));
        assert!(matches!(
            (&zx * &zx).quot_rem(&two_x),
            Err(PolynomialError::NotInvertible(_))
        ));
        assert_eq!(
            (&(&two_x * &zx) + &two_x).divides(&two_x),
            Some(&zx + &zr.one())
        );
    }

    #[test]
    fn recursive_form() {
        let r: PolynomialRing<_, u16> = PolynomialRing::new(Z, variables(&["x", "y", "z"]));
        let x = r.variable(0).unwrap();
        let y = r.variable(1).unwrap();
        let z = r.variable(2).unwrap();

        let p = &(&(&(&x * &x) * &y).mul_coeff(Integer::new(3)) + &(&(&x * &y) * &(&y * &z)))
            + &r.constant(Integer::new(5));
        let rec = p.to_recursive(1);
        assert_eq!(rec.nterms(), 3);
        assert_eq!(rec.nvars(), 1);
        assert_eq!(MultivariatePolynomial::from_recursive(&rec, LexOrder), p);

        let u = p.to_univariate(0);
        assert_eq!(u.degree(), 2);
        assert_eq!(MultivariatePolynomial::from_univariate(&u, 0), p);
    }

    #[test]
    fn term_orders() {
        let r: PolynomialRing<_, u16> = PolynomialRing::new(Q, variables(&["x", "y"]));
        let x = r.variable(0).unwrap();
        let y = r.variable(1).unwrap();

        let p = &x + &(&y * &y).mul_coeff(Rational::from(2));
        assert_eq!(p.to_string(), "x+2*y^2");
        assert_eq!(p.lcoeff(), Rational::from(1));

        let g = p.reorder(GradedLexOrder);
        assert_eq!(g.to_string(), "2*y^2+x");
        assert_eq!(g.lcoeff(), Rational::from(2));
        assert_eq!(g.clone().monic().lcoeff(), Rational::from(1));
        assert_eq!(g.reorder(LexOrder), p);
    }

    #[test]
    fn extended_gcd() {
        let r: PolynomialRing<_, u16> = PolynomialRing::new(Q, variables(&["x", "y"]));
        let x = r.variable(0).unwrap();
        let one = r.one();

        let a = &(&x * &x) - &one;
        let b = &(&(&x * &x) + &x.clone().mul_coeff(Rational::from(2))) + &one;
        let (g, s, t) = a.egcd_univariate(&b, 0).unwrap();
        assert_eq!(g, &x + &one);
        assert_eq!(&(&s * &a) + &(&t * &b), g);

        let y = r.variable(1).unwrap();
        assert!(matches!(
            a.egcd_univariate(&(&x + &y), 0),
            Err(PolynomialError::Unsupported(_))
        ));
    }
}
