//! Factorization of polynomials into irreducible factors.
//!
//! The driver computes the squarefree decomposition and factors every squarefree part.
//! Univariate parts are factored by the coefficient ring through [Factorize]: over a
//! prime field with distinct-degree and equal-degree factorization, over the integers
//! by Hensel lifting a modular factorization, and over the rationals through the
//! integers. Multivariate parts are mapped to a univariate image with a Kronecker
//! substitution, whose factors are recombined into the multivariate factors.

use std::sync::Arc;

use rand::{thread_rng, Rng as _};
use tracing::{debug, instrument};

use crate::combinatorics::{take_indices, CombinationIterator};
use crate::domains::finite_field::{
    FiniteField, FiniteFieldCore, FiniteFieldWorkspace, ToFiniteField, Zp,
};
use crate::domains::integer::{Integer, IntegerRing};
use crate::domains::rational::{Rational, RationalField, Q};
use crate::domains::Ring;
use crate::error::PolynomialError;
use crate::settings::FactorSettings;

use super::gcd::{normalize, to_integer_polynomial, PolynomialGCD, LARGE_U32_PRIMES};
use super::hensel::{
    factor_coefficient_bound, lift_hensel, lift_hensel_monic, lift_hensel_quadratic,
    lifting_precision, symmetric_mod,
};
use super::order::{LexOrder, MonomialOrder};
use super::polynomial::{MultivariatePolynomial, PolynomialBuilder, PolynomialRing};
use super::squarefree::PthRoot;
use super::univariate::UnivariatePolynomial;
use super::{Exponent, NameAllocator};

/// Coefficient rings over which squarefree univariate polynomials can be factored.
pub trait Factorize: Sized {
    /// Factor a squarefree polynomial in which at most one variable occurs. The input
    /// must be primitive with a positive leading coefficient over rings and monic over
    /// fields. The factors are normalized in the same way.
    fn factor_squarefree_univariate(
        &self,
        settings: &FactorSettings,
    ) -> Result<Vec<Self>, PolynomialError>;
}

impl<E: Exponent, O: MonomialOrder> Factorize for MultivariatePolynomial<IntegerRing, E, O> {
    fn factor_squarefree_univariate(
        &self,
        settings: &FactorSettings,
    ) -> Result<Vec<Self>, PolynomialError> {
        let Some(&var) = self.occurring_variables().first() else {
            return Ok(vec![self.clone()]);
        };

        let u = self.to_univariate_from_univariate(var);
        Ok(factor_integer_univariate(&u, settings)?
            .iter()
            .map(|f| self.from_univariate_coefficients(f, var))
            .collect())
    }
}

impl<E: Exponent, O: MonomialOrder> Factorize for MultivariatePolynomial<RationalField, E, O> {
    fn factor_squarefree_univariate(
        &self,
        settings: &FactorSettings,
    ) -> Result<Vec<Self>, PolynomialError> {
        if self.is_univariate() && self.degree_bounds().iter().all(|d| d.to_u64() <= 1) {
            return Ok(vec![self.clone()]);
        }

        let z = to_integer_polynomial(self).primitive_part();
        Ok(z.factor_squarefree_univariate(settings)?
            .into_iter()
            .map(|f| f.map_coeff(|c| Rational::from(c.clone()), Q).monic())
            .collect())
    }
}

impl<UField: FiniteFieldWorkspace, E: Exponent, O: MonomialOrder> Factorize
    for MultivariatePolynomial<FiniteField<UField>, E, O>
{
    fn factor_squarefree_univariate(
        &self,
        _settings: &FactorSettings,
    ) -> Result<Vec<Self>, PolynomialError> {
        let Some(&var) = self.occurring_variables().first() else {
            return Ok(vec![self.clone()]);
        };

        let u = self.to_univariate_from_univariate(var).monic();
        Ok(u.factor_distinct_equal_degree()
            .iter()
            .map(|f| self.from_univariate_coefficients(f, var))
            .collect())
    }
}

impl<R: Ring, E: Exponent, O: MonomialOrder, E2: Exponent, O2: MonomialOrder> Factorize
    for MultivariatePolynomial<PolynomialRing<R, E2, O2>, E, O>
{
    fn factor_squarefree_univariate(
        &self,
        _settings: &FactorSettings,
    ) -> Result<Vec<Self>, PolynomialError> {
        if self.total_degree() <= 1 {
            return Ok(vec![self.clone()]);
        }

        Err(PolynomialError::Unsupported(
            "factorization over polynomial coefficient rings",
        ))
    }
}

fn exact_quot<UField: FiniteFieldWorkspace>(
    a: &UnivariatePolynomial<FiniteField<UField>>,
    b: &UnivariatePolynomial<FiniteField<UField>>,
) -> UnivariatePolynomial<FiniteField<UField>> {
    match a.quot_rem(b) {
        Ok((q, r)) if r.is_zero() => q,
        _ => unreachable!("{} does not divide {}", b, a),
    }
}

impl<UField: FiniteFieldWorkspace> UnivariatePolynomial<FiniteField<UField>> {
    /// Split a squarefree polynomial into products of the irreducible factors of equal degree.
    /// Returns pairs of the degree and the product of all factors of that degree.
    pub fn distinct_degree_factorization(&self) -> Vec<(usize, Self)> {
        let p = Integer::from(self.ring.get_prime().to_u64());
        let x = self.monomial(self.ring.one(), 1);

        let mut factors = vec![];
        let mut f = self.clone().monic();
        let mut h = x.clone();
        let mut i = 0;
        while f.degree() > 0 {
            i += 1;

            // h = x^(p^i) mod f
            h = h.pow_mod(&p, &f);

            let g = (&h - &x).gcd(&f);
            if !g.is_one() {
                f = exact_quot(&f, &g);
                h = h.rem(&f);
                factors.push((i, g));
            }

            if f.degree() < 2 * (i + 1) {
                // f cannot be split more
                if f.degree() > 0 {
                    factors.push((f.degree(), f));
                }
                break;
            }
        }

        factors
    }

    /// Cantor-Zassenhaus's probabilistic splitting of a squarefree polynomial whose
    /// irreducible factors all have degree `d`. In characteristic two the trace map
    /// `r + r^2 + ... + r^(2^(d-1))` replaces the power `r^((p^d - 1)/2)`.
    pub fn equal_degree_factorization(&self, d: usize) -> Vec<Self> {
        let f = self.clone().monic();
        let n = f.degree();
        if n <= d {
            return vec![f];
        }

        let p = self.ring.get_prime().to_u64();
        let exp = (&Integer::from(p).pow(d as u64) - &Integer::one())
            .quot_rem(&Integer::new(2))
            .0;

        let mut rng = thread_rng();
        let factor = loop {
            let coeffs = (0..n)
                .map(|_| self.ring.nth(&Integer::from(rng.gen_range(0..p))))
                .collect();
            let r = UnivariatePolynomial::from_coefficients(
                self.ring.clone(),
                coeffs,
                self.variable.clone(),
            );
            if r.degree() == 0 {
                continue;
            }

            let g = r.gcd(&f);
            if !g.is_one() {
                break g;
            }

            let b = if p == 2 {
                let mut t = r.clone();
                let mut trace = r;
                for _ in 1..d {
                    t = (&t * &t).rem(&f);
                    trace = &trace + &t;
                }
                trace
            } else {
                &r.pow_mod(&exp, &f) - &f.one()
            };

            let g = b.gcd(&f);
            if !g.is_one() && g.degree() < n {
                break g;
            }
        };

        let mut factors = factor.equal_degree_factorization(d);
        factors.extend(exact_quot(&f, &factor).equal_degree_factorization(d));
        factors
    }

    /// Factor a squarefree polynomial into monic irreducible factors.
    pub fn factor_distinct_equal_degree(&self) -> Vec<Self> {
        let mut factors = vec![];
        for (d, f) in self.distinct_degree_factorization() {
            debug!("DDF {} {}", f, d);
            factors.extend(f.equal_degree_factorization(d));
        }
        factors
    }
}

/// Factor a primitive squarefree polynomial with a positive leading coefficient over
/// the integers. A prime that keeps the polynomial squarefree is chosen, the modular
/// factors are Hensel lifted beyond the coefficient bound and recombined.
#[instrument(level = "debug", skip_all)]
fn factor_integer_univariate(
    u: &UnivariatePolynomial<IntegerRing>,
    settings: &FactorSettings,
) -> Result<Vec<UnivariatePolynomial<IntegerRing>>, PolynomialError> {
    if u.degree() <= 1 {
        return Ok(vec![u.clone()]);
    }

    let l = u.lcoeff();
    let mut image = None;
    for &p in LARGE_U32_PRIMES.iter() {
        if l.rem_euclid(&Integer::from(p as u64)).is_zero() {
            continue;
        }

        let field = Zp::new(p);
        let f_p = u.map_coeff(|c| c.to_finite_field(&field), field.clone());
        if f_p.gcd(&f_p.derivative()).is_one() {
            image = Some(f_p);
            break;
        }

        debug!("The image of {} modulo {} is not squarefree", u, p);
    }

    let Some(f_p) = image else {
        return Err(PolynomialError::Unsupported(
            "no word-sized prime keeps the polynomial squarefree",
        ));
    };

    let modular = f_p.monic().factor_distinct_equal_degree();
    if modular.len() == 1 {
        return Ok(vec![u.clone()]);
    }

    let bound = factor_coefficient_bound(u);

    if modular.len() == 2 {
        let lifted = if settings.quadratic_lifting {
            lift_hensel_quadratic(u, &modular[0], &modular[1], &bound)
        } else {
            lift_hensel(u, &modular[0], &modular[1], &bound)
        };

        return match lifted {
            Ok((a, b)) => Ok(vec![a, b]),
            Err(PolynomialError::NoLifting(e)) => {
                debug!("Modular factors do not lift: {}", e);
                Ok(vec![u.clone()])
            }
            Err(e) => Err(e),
        };
    }

    let p = Integer::from(modular[0].ring.get_prime().to_u64());
    let target = &(&l.abs() * &bound) * &Integer::new(2);
    let k = lifting_precision(&p, &target);
    let m = p.pow(k as u64);
    let pool = lift_hensel_monic(u, &modular, k)?;

    Ok(recombine_integer(u, pool, &m, settings))
}

/// Try products of subsets of the lifted monic factors modulo `m`, smallest subsets first.
fn recombine_integer(
    u: &UnivariatePolynomial<IntegerRing>,
    mut pool: Vec<UnivariatePolynomial<IntegerRing>>,
    m: &Integer,
    settings: &FactorSettings,
) -> Vec<UnivariatePolynomial<IntegerRing>> {
    let mut factors = vec![];
    let mut rest = u.clone();

    let mut s = 1;
    'len: while 2 * s <= pool.len() {
        if settings.max_subset_size.is_some_and(|max| s > max) {
            debug!("Subset size limit reached with {} factors left", pool.len());
            break;
        }

        let mut subsets = CombinationIterator::new(pool.len(), s);
        while let Some(subset) = subsets.next() {
            let mut g = rest.constant(rest.lcoeff());
            for i in subset {
                g = symmetric_mod(&(&g * &pool[*i]), m);
            }

            let mut g = g.primitive_part();
            if g.lcoeff().is_negative() {
                g = -g;
            }

            if let Some(q) = rest.divides(&g) {
                factors.push(g);
                let subset = subset.to_vec();
                take_indices(&mut pool, &subset);
                rest = q;
                continue 'len;
            }

            debug!("Subset {:?} is not a factor", subset);
        }

        s += 1;
    }

    factors.push(rest);
    factors
}

/// Map `p` to a univariate polynomial in a fresh variable by substituting
/// `x_i -> t^(d^i)`. For `d` larger than every partial degree, the map
/// is injective on the monomials of `p` and of its factors.
pub fn kronecker_substitution<R: Ring, E: Exponent, O: MonomialOrder>(
    p: &MultivariatePolynomial<R, E, O>,
    d: u64,
    names: &mut NameAllocator,
) -> Result<MultivariatePolynomial<R, E, LexOrder>, PolynomialError> {
    names.reserve(&p.variables);
    let var = names.fresh();

    let mut image = MultivariatePolynomial::new(
        &p.ring,
        Some(p.nterms()),
        Arc::new(vec![var]),
        LexOrder,
    );

    for t in p {
        let mut e: u64 = 0;
        for (i, x) in t.exponents.iter().enumerate() {
            if x.is_zero() {
                continue;
            }

            e = d
                .checked_pow(i as u32)
                .and_then(|w| w.checked_mul(x.to_u64()))
                .and_then(|w| w.checked_add(e))
                .ok_or(PolynomialError::ExponentOverflow(u64::MAX))?;
        }

        let exp = E::try_from_u64(e).ok_or(PolynomialError::ExponentOverflow(e))?;
        image.append_monomial(t.coefficient.clone(), &[exp]);
    }

    Ok(image)
}

/// Map a univariate image back to the ring of `template` by reading every
/// exponent as digits in base `d`. Digits beyond the last variable are added
/// to the last variable.
pub fn kronecker_inverse<R: Ring, E: Exponent, O: MonomialOrder>(
    image: &MultivariatePolynomial<R, E, LexOrder>,
    template: &MultivariatePolynomial<R, E, O>,
    d: u64,
) -> MultivariatePolynomial<R, E, O> {
    let n = template.nvars();
    let mut b = PolynomialBuilder::for_poly(template);

    let mut exp = vec![E::zero(); n];
    for t in image {
        let mut e = t.exponents[0].to_u64();
        for (i, x) in exp.iter_mut().enumerate() {
            if i + 1 == n {
                *x = E::from_u64(e);
            } else {
                *x = E::from_u64(e % d);
                e /= d;
            }
        }
        b.add_term(t.coefficient.clone(), &exp);
    }

    b.build()
}

impl<R: PolynomialGCD<E> + PthRoot, E: Exponent, O: MonomialOrder> MultivariatePolynomial<R, E, O>
where
    Self: Factorize,
    MultivariatePolynomial<R, E, LexOrder>: Factorize,
{
    /// Factor the polynomial into irreducible factors with their multiplicities.
    /// The content or unit is returned as a constant factor, so that the product
    /// of the factors is the polynomial.
    pub fn factor(&self) -> Result<Vec<(Self, usize)>, PolynomialError> {
        self.factor_with_settings(&FactorSettings::default())
    }

    #[instrument(level = "debug", skip_all)]
    pub fn factor_with_settings(
        &self,
        settings: &FactorSettings,
    ) -> Result<Vec<(Self, usize)>, PolynomialError> {
        let mut factors = vec![];
        for (f, m) in self.square_free_factorization() {
            if f.is_constant() {
                factors.push((f, m));
                continue;
            }

            for g in f.factor_squarefree(settings)? {
                factors.push((g, m));
            }
        }

        Ok(factors)
    }

    /// The squarefree decomposition with every multiplicity class split into its
    /// coprime factors, so that `x^3 - x` yields `x`, `x - 1` and `x + 1`. A class is
    /// kept whole when its coefficient ring cannot factor it.
    pub fn squarefree_factors(&self) -> Result<Vec<(Self, usize)>, PolynomialError> {
        let mut factors = vec![];
        for (f, m) in self.square_free_factorization() {
            if f.is_constant() {
                factors.push((f, m));
                continue;
            }

            match f.factor_squarefree(&FactorSettings::default()) {
                Ok(parts) => factors.extend(parts.into_iter().map(|g| (g, m))),
                Err(PolynomialError::Unsupported(_)) => {
                    debug!("Keeping the class of multiplicity {} unsplit", m);
                    factors.push((f, m));
                }
                Err(e) => return Err(e),
            }
        }

        Ok(factors)
    }

    /// Returns `true` if the polynomial is not constant and has no non-trivial factors.
    pub fn is_irreducible(&self) -> Result<bool, PolynomialError> {
        if self.is_constant() {
            return Ok(false);
        }

        let factors = self.factor()?;
        let mut non_constant = factors.iter().filter(|(f, _)| !f.is_constant());
        Ok(matches!(
            (non_constant.next(), non_constant.next()),
            (Some((_, 1)), None)
        ))
    }

    fn factor_squarefree(&self, settings: &FactorSettings) -> Result<Vec<Self>, PolynomialError> {
        if self.is_univariate() {
            return self.factor_squarefree_univariate(settings);
        }

        let mut names = NameAllocator::avoiding("t", &self.variables);
        self.factor_kronecker(settings, &mut names)
    }

    /// Factor a squarefree polynomial by factoring its Kronecker image and recombining
    /// subsets of the image factors, smallest subsets first. A candidate is accepted if
    /// its leading and trailing monomials divide those of the remaining cofactor and
    /// the division is exact. Every accepted factor restarts the search on the cofactor,
    /// with the degree bound of the cofactor.
    #[instrument(level = "debug", skip_all)]
    pub fn factor_kronecker(
        &self,
        settings: &FactorSettings,
        names: &mut NameAllocator,
    ) -> Result<Vec<Self>, PolynomialError> {
        if self.is_constant() {
            return Ok(vec![self.clone()]);
        }

        let mut factors = vec![];
        let mut rest = self.clone();

        'restart: while !rest.is_constant() {
            let d = rest.total_degree() + 1;
            let image = kronecker_substitution(&rest, d, names)?;

            let mut pool = vec![];
            for (f, m) in image.factor_with_settings(settings)? {
                if !f.is_constant() {
                    pool.extend(std::iter::repeat(f).take(m));
                }
            }
            debug!("Kronecker image with bound {} has {} factors", d, pool.len());

            let mut s = 1;
            while 2 * s <= pool.len() {
                if settings.max_subset_size.is_some_and(|max| s > max) {
                    debug!("Subset size limit reached with {} factors left", pool.len());
                    break 'restart;
                }

                let mut subsets = CombinationIterator::new(pool.len(), s);
                while let Some(subset) = subsets.next() {
                    let product = subset.iter().fold(image.one(), |acc, i| &acc * &pool[*i]);
                    let candidate = normalize(kronecker_inverse(&product, &rest, d));
                    if candidate.is_constant() {
                        continue;
                    }

                    if !rest
                        .leading_exponent()
                        .is_multiple_of(&candidate.leading_exponent())
                        || !rest
                            .trailing_exponent()
                            .is_multiple_of(&candidate.trailing_exponent())
                    {
                        debug!("Subset {:?} has incompatible monomials", subset);
                        continue;
                    }

                    if let Some(q) = rest.divides(&candidate) {
                        factors.push(candidate);
                        rest = q;
                        continue 'restart;
                    }

                    debug!("Subset {:?} is not a factor", subset);
                }

                s += 1;
            }

            break;
        }

        if !rest.is_one() {
            factors.push(rest);
        }

        Ok(factors)
    }
}

#[cfg(test)]
mod test {
    use crate::domains::Ring;
    use crate::domains::finite_field::{FiniteFieldCore, Zp};
    use crate::domains::integer::{Integer, Z};
    use crate::domains::rational::{Rational, Q};
    use crate::error::PolynomialError;
    use crate::poly::polynomial::PolynomialRing;
    use crate::poly::squarefree::expand_factors;
    use crate::poly::{variables, NameAllocator};
    use crate::settings::FactorSettings;

    #[test]
    fn integer_linear_factors() {
        let r: PolynomialRing<_, u16> = PolynomialRing::new(Z, variables(&["x"]));
        let x = r.variable(0).unwrap();
        let c = |n: i64| r.constant(Integer::new(n));

        let expected = [&x + &c(1), &x + &c(2), &x + &c(3)];
        let p = &(&expected[0] * &expected[1]) * &expected[2];

        let factors = p.factor().unwrap();
        assert_eq!(factors.len(), 3);
        for f in &expected {
            assert!(factors.contains(&(f.clone(), 1)));
        }

        // the same factors through the Kronecker substitution
        let k = p
            .factor_kronecker(&FactorSettings::default(), &mut NameAllocator::new("t"))
            .unwrap();
        assert_eq!(k.len(), 3);
        for f in &expected {
            assert!(k.contains(f));
        }
    }

    #[test]
    fn rational_squarefree_scenario() {
        // x^3 - x
        let r: PolynomialRing<_, u16> = PolynomialRing::new(Q, variables(&["x"]));
        let p = r
            .from_terms([(Rational::from(1), vec![3]), (Rational::from(-1), vec![1])])
            .unwrap();
        let x = r.variable(0).unwrap();
        let one = r.one();

        let factors = p.factor().unwrap();
        assert_eq!(factors.len(), 3);
        for f in [x.clone(), &x - &one, &x + &one] {
            assert!(factors.contains(&(f, 1)));
        }
    }

    #[test]
    fn multivariate_integer() {
        let r: PolynomialRing<_, u16> = PolynomialRing::new(Z, variables(&["x", "y"]));
        let x = r.variable(0).unwrap();
        let y = r.variable(1).unwrap();
        let c = |n: i64| r.constant(Integer::new(n));

        let a = &(&x + &y) + &c(1);
        let b = &(&x - &y) + &c(2);
        let p = &a * &b;

        let factors = p.factor().unwrap();
        assert_eq!(factors.len(), 2);
        assert!(factors.contains(&(a.clone(), 1)));
        assert!(factors.contains(&(b.clone(), 1)));

        // content, sign and repeated factors
        let q = (&(&a * &a) * &(&x - &c(1))).mul_coeff(Integer::new(-6));
        let factors = q.factor().unwrap();
        assert_eq!(expand_factors(&q, &factors), q);
        assert!(factors.contains(&(a, 2)));
        assert!(factors.contains(&(&x - &c(1), 1)));
        assert!(factors.contains(&(c(-6), 1)));
    }

    #[test]
    fn kronecker_restarts_on_cofactor() {
        let r: PolynomialRing<_, u16> = PolynomialRing::new(Z, variables(&["x", "y"]));
        let x = r.variable(0).unwrap();
        let y = r.variable(1).unwrap();
        let c = |n: i64| r.constant(Integer::new(n));

        // a high degree factor next to two small ones
        let a = &(&(&x.pow(3) * &y.pow(2)) + &x) + &c(1);
        let b = &(&x * &y) - &c(1);
        let d = &(&x + &y) + &c(3);
        let p = &(&a * &b) * &d;

        let k = p
            .factor_kronecker(&FactorSettings::default(), &mut NameAllocator::new("t"))
            .unwrap();
        assert_eq!(k.len(), 3);
        for f in [&a, &b, &d] {
            assert!(k.contains(f));
        }
        assert_eq!(k.iter().fold(r.one(), |acc, f| &acc * f), p);
    }

    #[test]
    fn finite_field() {
        let f = Zp::new(5);
        let r: PolynomialRing<_, u16> = PolynomialRing::new(f.clone(), variables(&["x"]));
        let x = r.variable(0).unwrap();
        let c = |n: u32| r.constant(f.to_element(n));

        // x^4 + 1 = (x^2 + 2) * (x^2 + 3) mod 5
        let p = &x.pow(4) + &c(1);
        let factors = p.factor().unwrap();
        assert_eq!(factors.len(), 2);
        assert!(factors.contains(&(&x.pow(2) + &c(2), 1)));
        assert!(factors.contains(&(&x.pow(2) + &c(3), 1)));
    }

    #[test]
    fn characteristic_two() {
        let f = Zp::new(2);
        let r: PolynomialRing<_, u16> = PolynomialRing::new(f.clone(), variables(&["x"]));
        let x = r.variable(0).unwrap();
        let one = r.one();

        // the two irreducible cubics over Z/2
        let a = &(&x.pow(3) + &x) + &one;
        let b = &(&x.pow(3) + &x.pow(2)) + &one;
        let factors = (&a * &b).factor().unwrap();
        assert_eq!(factors.len(), 2);
        assert!(factors.contains(&(a, 1)));
        assert!(factors.contains(&(b, 1)));

        let c = &x.pow(3) + &one;
        let factors = c.factor().unwrap();
        assert!(factors.contains(&(&x + &one, 1)));
        assert!(factors.contains(&(&(&x.pow(2) + &x) + &one, 1)));
    }

    #[test]
    fn irreducibility() {
        let r: PolynomialRing<_, u16> = PolynomialRing::new(Z, variables(&["x"]));
        let x = r.variable(0).unwrap();
        let one = r.one();

        assert!((&x.pow(2) + &one).is_irreducible().unwrap());
        assert!(!(&x.pow(2) - &one).is_irreducible().unwrap());
        assert!(!(&x.pow(2)).is_irreducible().unwrap());
        assert!(!one.is_irreducible().unwrap());

        // x^4 + 1 is irreducible over the integers but splits modulo every prime
        assert!((&x.pow(4) + &one).is_irreducible().unwrap());
    }

    #[test]
    fn unsupported_coefficients() {
        let inner: PolynomialRing<_, u16> = PolynomialRing::new(Z, variables(&["a"]));
        let r: PolynomialRing<_, u16> = PolynomialRing::new(inner.clone(), variables(&["x"]));
        let a = r.constant(inner.variable(0).unwrap());
        let x = r.variable(0).unwrap();

        // x^2 + a
        let p = &x.pow(2) + &a;
        assert!(matches!(
            p.factor(),
            Err(PolynomialError::Unsupported(_))
        ));
    }
}
