//! Squarefree decomposition.
//!
//! In characteristic zero the decomposition uses Yun's algorithm. In characteristic `p`
//! the derivative of a `p`-th power vanishes, so after Yun's algorithm in every
//! variable the remaining part is a polynomial in `x^p` whose `p`-th root is decomposed
//! recursively. The `p`-th root of a coefficient is taken through [PthRoot].

use ahash::HashMap;
use tracing::{debug, instrument};

use crate::domains::finite_field::{FiniteField, FiniteFieldWorkspace};
use crate::domains::integer::IntegerRing;
use crate::domains::rational::RationalField;
use crate::domains::Ring;
use crate::error::PolynomialError;

use super::gcd::{normalize, PolynomialGCD};
use super::order::MonomialOrder;
use super::polynomial::{MultivariatePolynomial, PolynomialRing};
use super::Exponent;

/// Rings in which a `p`-th root can be taken, where `p` is the characteristic.
pub trait PthRoot: Ring {
    /// Compute `b` such that `b^p = a`.
    fn pth_root(&self, a: &Self::Element) -> Result<Self::Element, PolynomialError>;

    /// The number of derivations of the ring whose common kernel is the set of
    /// `p`-th powers. Zero if no such family is known.
    fn derivation_count(&self) -> usize {
        0
    }

    /// Apply the derivation `i` to `a`.
    fn derive(&self, _a: &Self::Element, _i: usize) -> Self::Element {
        self.zero()
    }
}

/// The `p`-th root in a finite ring of characteristic `p` and size `q = p^k`,
/// computed as `a^(p^(k-1))` by repeated Frobenius maps.
pub fn pth_root_finite<R: Ring>(ring: &R, a: &R::Element) -> Result<R::Element, PolynomialError> {
    let p = ring.characteristic();
    let Some(pu) = p.to_u64().filter(|p| *p > 1) else {
        return Err(PolynomialError::Unsupported(
            "p-th root in a ring with large or zero characteristic",
        ));
    };

    let mut size = ring.size();
    if size.is_zero() {
        return Err(PolynomialError::Unsupported("p-th root in an infinite ring"));
    }

    let mut r = a.clone();
    loop {
        let (q, rem) = size.quot_rem(&p);
        if !rem.is_zero() {
            return Err(PolynomialError::Unsupported(
                "ring size is not a power of the characteristic",
            ));
        }
        size = q;
        if size.is_one() {
            break;
        }
        r = ring.pow(&r, pu);
    }
    Ok(r)
}

impl PthRoot for IntegerRing {
    fn pth_root(&self, _a: &Self::Element) -> Result<Self::Element, PolynomialError> {
        Err(PolynomialError::Unsupported("p-th root in characteristic zero"))
    }
}

impl PthRoot for RationalField {
    fn pth_root(&self, _a: &Self::Element) -> Result<Self::Element, PolynomialError> {
        Err(PolynomialError::Unsupported("p-th root in characteristic zero"))
    }
}

impl<UField: FiniteFieldWorkspace> PthRoot for FiniteField<UField> {
    /// The Frobenius map is the identity on a prime field.
    fn pth_root(&self, a: &Self::Element) -> Result<Self::Element, PolynomialError> {
        Ok(a.clone())
    }
}

impl<R: PthRoot, E: Exponent, O: MonomialOrder> PthRoot for PolynomialRing<R, E, O> {
    fn pth_root(&self, a: &Self::Element) -> Result<Self::Element, PolynomialError> {
        a.pth_root_with(|c| a.ring.pth_root(c))
    }
}

impl<R: Ring, E: Exponent, O: MonomialOrder> MultivariatePolynomial<R, E, O> {
    /// Take the `p`-th root of a polynomial in which every exponent is a multiple
    /// of the characteristic `p`, using `root` for the coefficients.
    pub fn pth_root_with<T: Fn(&R::Element) -> Result<R::Element, PolynomialError>>(
        &self,
        root: T,
    ) -> Result<Self, PolynomialError> {
        let p = self.ring.characteristic().to_u64().unwrap_or(0);
        if p == 0 {
            return Err(PolynomialError::Unsupported("p-th root in characteristic zero"));
        }

        let mut r = self.clone();
        for e in &mut r.exponents {
            if e.to_u64() % p != 0 {
                return Err(PolynomialError::NotInvertible(format!(
                    "{} is not a {}-th power",
                    self, p
                )));
            }
            *e = E::from_u64(e.to_u64() / p);
        }

        for c in &mut r.coefficients {
            *c = root(c)?;
        }

        Ok(r)
    }

    /// Raise every exponent to the power `p`, without changing the coefficients.
    fn inflate(&self, p: u64) -> Self {
        let mut r = self.clone();
        for e in &mut r.exponents {
            *e = E::from_u64(e.to_u64() * p);
        }
        r
    }

    /// Deflate every exponent by `p`, without changing the coefficients.
    fn deflate(&self, p: u64) -> Self {
        let mut r = self.clone();
        for e in &mut r.exponents {
            debug_assert_eq!(e.to_u64() % p, 0);
            *e = E::from_u64(e.to_u64() / p);
        }
        r
    }
}

fn exact_div<R: PolynomialGCD<E>, E: Exponent, O: MonomialOrder>(
    a: &MultivariatePolynomial<R, E, O>,
    b: &MultivariatePolynomial<R, E, O>,
) -> MultivariatePolynomial<R, E, O> {
    match a.divides(b) {
        Some(q) => q,
        None => unreachable!("{} does not divide {}", b, a),
    }
}

impl<R: PolynomialGCD<E> + PthRoot, E: Exponent, O: MonomialOrder> MultivariatePolynomial<R, E, O> {
    /// Compute the squarefree decomposition `u * a_1^e_1 * ... * a_n^e_n`, where the
    /// `a_i` are squarefree and pairwise coprime. The unit or content `u` is included
    /// as a constant factor with multiplicity one if it is not one, so that the product
    /// of the factors reproduces the polynomial.
    #[instrument(level = "debug", skip_all)]
    pub fn square_free_factorization(&self) -> Vec<(Self, usize)> {
        if self.is_zero() {
            return vec![];
        }

        let (unit, stripped) = self.unit_and_normal_part();

        let mut factors = vec![];
        if !self.ring.is_one(&unit) {
            factors.push((self.constant(unit), 1));
        }

        // monomial factors
        let shared = stripped.common_monomial();
        let stripped = stripped.div_exp(&shared);
        for (var, e) in shared.iter().enumerate() {
            if !e.is_zero() {
                let mut exp = vec![E::zero(); self.nvars()];
                exp[var] = E::one();
                factors.push((self.monomial(self.ring.one(), exp), e.to_u64() as usize));
            }
        }

        let characteristic = self.ring.characteristic();
        for f in stripped.factor_separable() {
            if f.is_constant() {
                continue;
            }

            let parts = if characteristic.is_zero() {
                if self.ring.is_field() {
                    f.square_free_factorization_char0_field()
                } else {
                    f.square_free_factorization_char0_ring()
                }
            } else if self.ring.is_finite() {
                f.square_free_factorization_finite()
            } else {
                f.square_free_factorization_infinite()
            };

            factors.extend(parts);
        }

        if factors.is_empty() {
            factors.push((self.one(), 1));
        }

        factors
    }

    /// Returns `true` if the polynomial has no repeated non-constant factors.
    pub fn is_squarefree(&self) -> bool {
        self.square_free_factorization()
            .iter()
            .all(|(f, m)| *m == 1 || f.is_constant())
    }

    /// The product of all distinct non-constant factors.
    pub fn squarefree_part(&self) -> Self {
        self.square_free_factorization()
            .into_iter()
            .filter(|(f, _)| !f.is_constant())
            .fold(self.one(), |acc, (f, _)| &acc * &f)
    }

    /// Split off the unit or content, such that the remainder is monic over a field
    /// and primitive with a positive leading coefficient over other rings.
    fn unit_and_normal_part(&self) -> (R::Element, Self) {
        if self.ring.is_field() {
            let lc = self.lcoeff();
            match self.ring.try_div(&self.ring.one(), &lc) {
                Some(inv) => (lc, self.clone().mul_coeff(inv)),
                None => (self.ring.one(), self.clone()),
            }
        } else {
            let mut c = self.content();
            if self.ring.signum(self.lcoeff_ref()) < 0 {
                c = self.ring.neg(&c);
            }

            match self.divides(&self.constant(c.clone())) {
                Some(q) => (c, q),
                None => (self.ring.one(), self.clone()),
            }
        }
    }

    /// Split off the factors that do not depend on all variables, by
    /// repeatedly removing the content in every variable.
    pub fn factor_separable(&self) -> Vec<Self> {
        let mut stripped = self.clone();

        let mut factors = vec![];
        for x in 0..self.nvars() {
            if stripped.degree(x).is_zero() {
                continue;
            }

            let c = stripped.univariate_content(x);
            if !c.is_constant() {
                stripped = exact_div(&stripped, &c);
                factors.extend(c.factor_separable());
            }
        }

        factors.push(stripped);
        factors
    }

    /// The variable with the lowest non-zero degree.
    fn lowest_degree_variable(&self) -> Option<usize> {
        (0..self.nvars())
            .filter(|x| !self.degree(*x).is_zero())
            .min_by_key(|x| self.degree(*x))
    }

    /// Yun's algorithm in the variable `var`, in characteristic zero.
    /// Every factor of the input must depend on `var`.
    fn yun(&self, var: usize) -> Vec<(Self, usize)> {
        let b = self.derivative(var);
        let c = self.gcd(&b);

        if c.is_constant() {
            return vec![(self.clone(), 1)];
        }

        let mut factors = vec![];
        let mut w = exact_div(self, &c);
        let mut y = exact_div(&b, &c);

        let mut i = 1;
        while !w.is_constant() {
            let z = &y - &w.derivative(var);
            let g = w.gcd(&z);
            w = exact_div(&w, &g);
            y = exact_div(&z, &g);

            if !g.is_constant() {
                factors.push((g, i));
            }
            i += 1
        }

        factors
    }

    /// Squarefree decomposition of a monic polynomial over a field of characteristic zero.
    fn square_free_factorization_char0_field(&self) -> Vec<(Self, usize)> {
        match self.lowest_degree_variable() {
            Some(var) => self.yun(var),
            None => vec![],
        }
    }

    /// Squarefree decomposition of a primitive polynomial over a ring of characteristic zero.
    /// The gcds are normalized to a positive leading coefficient, so that all factors
    /// stay primitive and the divisions are exact.
    fn square_free_factorization_char0_ring(&self) -> Vec<(Self, usize)> {
        match self.lowest_degree_variable() {
            Some(var) => self
                .yun(var)
                .into_iter()
                .map(|(f, m)| (f.primitive_part(), m))
                .collect(),
            None => vec![],
        }
    }

    /// Squarefree decomposition over a finite field, where the `p`-th root of
    /// a coefficient is a power of the coefficient.
    fn square_free_factorization_finite(&self) -> Vec<(Self, usize)> {
        let ring = self.ring.clone();
        self.square_free_factorization_char_p(&|c: &R::Element| pth_root_finite(&ring, c))
    }

    /// Squarefree decomposition over an infinite field of characteristic `p`, where
    /// the coefficient ring computes its own `p`-th roots.
    fn square_free_factorization_infinite(&self) -> Vec<(Self, usize)> {
        let ring = self.ring.clone();
        self.square_free_factorization_char_p(&|c: &R::Element| ring.pth_root(c))
    }

    /// Bernardin's squarefree decomposition in characteristic `p`.
    fn square_free_factorization_char_p(
        &self,
        root: &dyn Fn(&R::Element) -> Result<R::Element, PolynomialError>,
    ) -> Vec<(Self, usize)> {
        if self.is_constant() {
            return vec![];
        }

        let p = match self.ring.characteristic().to_u64() {
            Some(p) => p,
            None => {
                debug!("Characteristic too large for exponents: no decomposition");
                return vec![(self.clone(), 1)];
            }
        };

        let mut f = self.clone();
        let mut h: HashMap<usize, Self> = HashMap::default();
        for var in 0..self.nvars() {
            if f.degree(var).is_zero() {
                continue;
            }

            let (rest, parts) = f.yun_char_p(var, p as usize);
            f = rest;
            for (part, pow) in parts {
                h.entry(pow)
                    .and_modify(|f| *f = &*f * &part)
                    .or_insert(part);
            }
        }

        // all derivatives vanish, so every exponent is a multiple of p
        let mut factors = vec![];
        if !f.is_constant() {
            let sub_factors = match f.pth_root_with(root) {
                Ok(b) => b
                    .square_free_factorization_char_p(root)
                    .into_iter()
                    .map(|(k, n)| (k, n * p as usize))
                    .collect::<Vec<_>>(),
                Err(e) => {
                    // the coefficients have no p-th root: decompose as a polynomial in x^p
                    debug!("No p-th root of {}: {}", f, e);
                    f.deflate(p)
                        .square_free_factorization_char_p_deflated(root, p)
                }
            };

            for (mut k, n) in sub_factors {
                for (powh, hi) in h.iter_mut() {
                    if (*powh as u64) < p {
                        let g = k.gcd(hi);
                        if !g.is_constant() {
                            k = exact_div(&k, &g);
                            *hi = exact_div(hi, &g);
                            factors.push((g, n + *powh));
                        }
                    }
                }

                if !k.is_constant() {
                    factors.push((k, n));
                }
            }
        }

        for (powh, hi) in h {
            if !hi.is_constant() {
                factors.push((hi, powh));
            }
        }

        factors
    }

    /// Decompose a polynomial `g(y)` with `y = x^p` and map the factors back.
    /// An inflated factor `k(x^p)` is the product of a `p`-th power `a^p` and a
    /// squarefree part without `p`-th root, which are separated and decomposed.
    fn square_free_factorization_char_p_deflated(
        &self,
        root: &dyn Fn(&R::Element) -> Result<R::Element, PolynomialError>,
        p: u64,
    ) -> Vec<(Self, usize)> {
        let mut factors = vec![];
        for (k, n) in self.square_free_factorization_char_p(root) {
            let k = k.inflate(p);
            let Some(a_p) = k.pth_power_part() else {
                debug!("No derivations to split {}", k);
                factors.push((k, n));
                continue;
            };

            if a_p.is_constant() {
                factors.push((k, n));
                continue;
            }

            let b = exact_div(&k, &a_p);
            if !b.is_constant() {
                factors.push((b, n));
            }

            match a_p.pth_root_with(root) {
                Ok(a) => factors.extend(
                    a.square_free_factorization_char_p(root)
                        .into_iter()
                        .map(|(g, m)| (g, m * n * p as usize)),
                ),
                Err(e) => {
                    debug!("No p-th root of {}: {}", a_p, e);
                    factors.push((a_p, n));
                }
            }
        }

        factors
    }

    /// The largest factor `a^p` of a polynomial whose coefficients are `p`-th powers,
    /// computed as the gcd of the normalized polynomial and its images under the
    /// derivations of the coefficient ring. `None` if the ring has no derivations.
    fn pth_power_part(&self) -> Option<Self> {
        let n = self.ring.derivation_count();
        if n == 0 {
            return None;
        }

        let k = normalize(self.clone());
        let mut g = k.clone();
        for i in 0..n {
            let d = k.map_coeff(|c| k.ring.derive(c, i), k.ring.clone());
            if !d.is_zero() {
                g = g.gcd(&d);
            }
        }

        Some(g)
    }

    /// A modified version of Yun's algorithm in characteristic `p`. Factors
    /// whose multiplicity is a multiple of `p` remain in the returned cofactor.
    fn yun_char_p(&self, var: usize, p: usize) -> (Self, Vec<(Self, usize)>) {
        let b = self.derivative(var);
        let mut c = self.gcd(&b);
        let mut w = exact_div(self, &c);
        let mut v = exact_div(&b, &c);

        let mut factors = vec![];

        let mut i = 1;
        while !w.is_constant() && i < p {
            let z = &v - &w.derivative(var);
            let g = w.gcd(&z);
            w = exact_div(&w, &g);
            v = exact_div(&z, &g);
            c = exact_div(&c, &w);

            if !g.is_constant() {
                factors.push((g, i));
            }
            i += 1
        }

        (c, factors)
    }
}

/// Multiply out a factorization.
pub fn expand_factors<R: Ring, E: Exponent, O: MonomialOrder>(
    one: &MultivariatePolynomial<R, E, O>,
    factors: &[(MultivariatePolynomial<R, E, O>, usize)],
) -> MultivariatePolynomial<R, E, O> {
    factors
        .iter()
        .fold(one.one(), |acc, (f, m)| &acc * &f.pow(*m))
}

#[cfg(test)]
mod test {
    use crate::domains::finite_field::{FiniteFieldCore, Zp};
    use crate::domains::integer::{Integer, Z};
    use crate::domains::rational::{Rational, Q};
    use crate::domains::Ring;
    use crate::poly::polynomial::PolynomialRing;
    use crate::poly::variables;

    use super::expand_factors;

    #[test]
    fn rational_scenario() {
        // x^3 - x
        let r: PolynomialRing<_, u16> = PolynomialRing::new(Q, variables(&["x"]));
        let p = r
            .from_terms([(Rational::from(1), vec![3]), (Rational::from(-1), vec![1])])
            .unwrap();

        let sff = p.square_free_factorization();
        assert!(sff.iter().all(|(_, m)| *m == 1));
        assert_eq!(expand_factors(&p, &sff), p);
        assert!(p.is_squarefree());

        let x = r.variable(0).unwrap();
        let one = r.one();
        let factors = p.squarefree_factors().unwrap();
        assert_eq!(factors.len(), 3);
        for f in [x.clone(), &x - &one, &x + &one] {
            assert!(factors.contains(&(f, 1)));
        }
        assert_eq!(expand_factors(&p, &factors), p);
    }

    #[test]
    fn integer_multiplicities() {
        let r: PolynomialRing<_, u16> = PolynomialRing::new(Z, variables(&["x", "y"]));
        let x = r.variable(0).unwrap();
        let y = r.variable(1).unwrap();
        let one = r.one();

        // -3 * (x + y)^2 * (x - 1)^3 * y
        let a = &x + &y;
        let b = &x - &one;
        let p = (&(&a.pow(2) * &b.pow(3)) * &y).mul_coeff(Integer::new(-3));

        let sff = p.square_free_factorization();
        assert_eq!(expand_factors(&p, &sff), p);
        assert!(sff.contains(&(a.clone(), 2)));
        assert!(sff.contains(&(b.clone(), 3)));
        assert!(sff.contains(&(y.clone(), 1)));
        assert!(sff.contains(&(r.constant(Integer::new(-3)), 1)));
        assert!(!p.is_squarefree());

        let part = p.squarefree_part();
        assert_eq!(part, &(&a * &b) * &y);
        assert_eq!(part.squarefree_part(), part);
    }

    #[test]
    fn finite_field_pth_powers() {
        let f = Zp::new(3);
        let r: PolynomialRing<_, u16> = PolynomialRing::new(f.clone(), variables(&["x", "y"]));
        let x = r.variable(0).unwrap();
        let y = r.variable(1).unwrap();
        let one = r.one();
        let two = r.constant(f.to_element(2));

        // (x + 1)^3 * (x + 2): the cube has a vanishing derivative
        let a = &x + &one;
        let b = &x + &two;
        let p = &a.pow(3) * &b;
        let sff = p.square_free_factorization();
        assert_eq!(expand_factors(&p, &sff), p);
        assert!(sff.contains(&(a.clone(), 3)));
        assert!(sff.contains(&(b.clone(), 1)));

        // (x + y)^4 mixes a p-th power with a first power
        let c = &x + &y;
        let q = c.pow(4);
        assert_eq!(q.square_free_factorization(), vec![(c.clone(), 4)]);

        // (x*y + 1)^6 * (x + 2)^2
        let d = &(&x * &y) + &one;
        let s = &d.pow(6) * &b.pow(2);
        let sff = s.square_free_factorization();
        assert_eq!(expand_factors(&s, &sff), s);
        assert!(sff.contains(&(d, 6)));
        assert!(sff.contains(&(b, 2)));
    }

    #[test]
    fn constants_and_zero() {
        let r: PolynomialRing<_, u16> = PolynomialRing::new(Z, variables(&["x"]));
        assert!(r.zero().square_free_factorization().is_empty());
        assert_eq!(
            r.constant(Integer::new(6)).square_free_factorization(),
            vec![(r.constant(Integer::new(6)), 1)]
        );
        assert_eq!(r.one().square_free_factorization(), vec![(r.one(), 1)]);
    }
}
