use std::cmp::Ordering;

use tracing::{debug, instrument};

use crate::domains::finite_field::{
    FiniteField, FiniteFieldCore, FiniteFieldWorkspace, ToFiniteField, Zp,
};
use crate::domains::integer::{Integer, IntegerRing, Z};
use crate::domains::rational::{Rational, RationalField, Q};
use crate::domains::{EuclideanDomain, Ring};
use crate::settings::{GcdAlgorithm, GcdSettings};

use super::monomial::ExponentVector;
use super::order::MonomialOrder;
use super::polynomial::{MultivariatePolynomial, PolynomialRing};
use super::univariate::UnivariatePolynomial;
use super::Exponent;

// 100 large u32 primes starting from the 203213901st prime number
pub const LARGE_U32_PRIMES: [u32; 100] = [
    4293490987, 4293491603, 4293492277, 4293492857, 4293491017, 4293491621, 4293492283, 4293492881,
    4293491023, 4293491639, 4293492293, 4293492893, 4293491051, 4293491659, 4293492331, 4293492941,
    4293491149, 4293491701, 4293492349, 4293492977, 4293491171, 4293491711, 4293492383, 4293493037,
    4293491221, 4293491747, 4293492403, 4293493049, 4293491261, 4293491779, 4293492421, 4293493069,
    4293491269, 4293491791, 4293492431, 4293493081, 4293491273, 4293491819, 4293492487, 4293493091,
    4293491281, 4293491849, 4293492499, 4293493117, 4293491299, 4293491863, 4293492523, 4293493121,
    4293491303, 4293491887, 4293492583, 4293493159, 4293491311, 4293491897, 4293492587, 4293493163,
    4293491327, 4293491911, 4293492649, 4293493207, 4293491329, 4293491953, 4293492661, 4293493229,
    4293491399, 4293491957, 4293492673, 4293493241, 4293491431, 4293492017, 4293492701, 4293493261,
    4293491467, 4293492023, 4293492739, 4293493319, 4293491509, 4293492097, 4293492751, 4293493363,
    4293491539, 4293492101, 4293492769, 4293493367, 4293491551, 4293492107, 4293492779, 4293493409,
    4293491561, 4293492113, 4293492781, 4293493423, 4293491567, 4293492139, 4293492811, 4293493433,
    4293491591, 4293492169, 4293492821, 4293493487,
];

/// A coefficient ring for which polynomial gcds can be computed.
/// The ring selects the algorithm that is used when [GcdSettings] does not force one.
pub trait PolynomialGCD<E: Exponent>: EuclideanDomain {
    /// The algorithm that is best suited for this coefficient ring.
    fn default_gcd_algorithm(&self) -> GcdAlgorithm;

    /// Compute the gcd using modular images, or return `None` if the
    /// ring has no modular method.
    fn gcd_modular<O: MonomialOrder>(
        _a: &MultivariatePolynomial<Self, E, O>,
        _b: &MultivariatePolynomial<Self, E, O>,
        _settings: &GcdSettings,
    ) -> Option<MultivariatePolynomial<Self, E, O>> {
        None
    }
}

impl<E: Exponent> PolynomialGCD<E> for IntegerRing {
    fn default_gcd_algorithm(&self) -> GcdAlgorithm {
        GcdAlgorithm::Modular
    }

    fn gcd_modular<O: MonomialOrder>(
        a: &MultivariatePolynomial<Self, E, O>,
        b: &MultivariatePolynomial<Self, E, O>,
        settings: &GcdSettings,
    ) -> Option<MultivariatePolynomial<Self, E, O>> {
        Some(gcd_modular(a, b, settings))
    }
}

impl<E: Exponent> PolynomialGCD<E> for RationalField {
    fn default_gcd_algorithm(&self) -> GcdAlgorithm {
        GcdAlgorithm::Modular
    }

    /// Clear the denominators and compute the gcd over the integers.
    fn gcd_modular<O: MonomialOrder>(
        a: &MultivariatePolynomial<Self, E, O>,
        b: &MultivariatePolynomial<Self, E, O>,
        settings: &GcdSettings,
    ) -> Option<MultivariatePolynomial<Self, E, O>> {
        let ai = to_integer_polynomial(a);
        let bi = to_integer_polynomial(b);
        let g = gcd_modular(&ai, &bi, settings);
        Some(normalize(g.map_coeff(|c| Rational::from(c.clone()), Q)))
    }
}

impl<UField: FiniteFieldWorkspace, E: Exponent> PolynomialGCD<E> for FiniteField<UField> {
    fn default_gcd_algorithm(&self) -> GcdAlgorithm {
        GcdAlgorithm::PrimitivePrs
    }
}

impl<R: PolynomialGCD<E2>, E: Exponent, E2: Exponent, O2: MonomialOrder> PolynomialGCD<E>
    for PolynomialRing<R, E2, O2>
{
    fn default_gcd_algorithm(&self) -> GcdAlgorithm {
        GcdAlgorithm::SubresultantPrs
    }
}

/// Multiply a rational polynomial by the lcm of its denominators.
pub(crate) fn to_integer_polynomial<E: Exponent, O: MonomialOrder>(
    a: &MultivariatePolynomial<RationalField, E, O>,
) -> MultivariatePolynomial<IntegerRing, E, O> {
    let d = Q.common_denominator(a.coefficients.iter());
    a.map_coeff(|c| (c.numerator() * &d).quot_rem(c.denominator()).0, Z)
}

/// Make the leading coefficient one for fields and positive for rings with a sign.
pub(crate) fn normalize<R: Ring, E: Exponent, O: MonomialOrder>(
    g: MultivariatePolynomial<R, E, O>,
) -> MultivariatePolynomial<R, E, O> {
    if g.is_zero() {
        return g;
    }

    if g.ring.is_field() {
        let lc = g.lcoeff();
        if g.ring.is_one(&lc) {
            return g;
        }

        match g.ring.try_div(&g.ring.one(), &lc) {
            Some(inv) => g.mul_coeff(inv),
            None => g,
        }
    } else if g.ring.signum(g.lcoeff_ref()) < 0 {
        -g
    } else {
        g
    }
}

/// Compute the gcd for the cases that need no remainder sequence.
fn simple_gcd<R: EuclideanDomain, E: Exponent, O: MonomialOrder>(
    a: &MultivariatePolynomial<R, E, O>,
    b: &MultivariatePolynomial<R, E, O>,
) -> Option<MultivariatePolynomial<R, E, O>> {
    if a.is_zero() {
        return Some(b.clone());
    }
    if b.is_zero() {
        return Some(a.clone());
    }

    if a == b {
        return Some(a.clone());
    }

    if a.is_one() || b.is_one() {
        return Some(a.one());
    }

    if a.is_constant() || b.is_constant() {
        let (c, p) = if a.is_constant() { (a, b) } else { (b, a) };
        let mut gcd = c.coefficients[0].clone();
        for x in &p.coefficients {
            if a.ring.is_unit(&gcd) {
                break;
            }
            gcd = a.ring.gcd(&gcd, x);
        }
        return Some(a.constant(gcd));
    }

    None
}

/// Compute the gcd of univariate polynomials with the primitive polynomial
/// remainder sequence: every pseudo-remainder is replaced by its primitive part.
pub fn gcd_primitive_prs<R: EuclideanDomain>(
    a: &UnivariatePolynomial<R>,
    b: &UnivariatePolynomial<R>,
) -> UnivariatePolynomial<R> {
    if a.is_zero() {
        return b.clone();
    }
    if b.is_zero() {
        return a.clone();
    }

    let c = a.ring.gcd(&a.content(), &b.content());

    let (mut f, mut g) = if a.degree() >= b.degree() {
        (a.primitive_part(), b.primitive_part())
    } else {
        (b.primitive_part(), a.primitive_part())
    };

    while !g.is_zero() && g.degree() > 0 {
        let r = f.pseudo_divide(&g).1;
        f = g;
        g = r.primitive_part();
    }

    let h = if g.is_zero() { f } else { f.one() };
    h.mul_coeff(&c)
}

/// Compute the gcd of univariate polynomials with the subresultant polynomial
/// remainder sequence. The predictable factors `g * h^delta` are divided out of every
/// pseudo-remainder, which bounds the growth of the coefficients.
pub fn gcd_subresultant<R: EuclideanDomain>(
    a: &UnivariatePolynomial<R>,
    b: &UnivariatePolynomial<R>,
) -> UnivariatePolynomial<R> {
    if a.is_zero() {
        return b.clone();
    }
    if b.is_zero() {
        return a.clone();
    }

    let ring = &a.ring;
    let c = ring.gcd(&a.content(), &b.content());

    let (mut f, mut g) = if a.degree() >= b.degree() {
        (a.primitive_part(), b.primitive_part())
    } else {
        (b.primitive_part(), a.primitive_part())
    };

    let mut s = ring.one();
    let mut h = ring.one();
    loop {
        if g.degree() == 0 {
            return a.constant(c);
        }

        let delta = (f.degree() - g.degree()) as u64;
        let r = f.pseudo_divide(&g).1;
        if r.is_zero() {
            break;
        }

        f = g;
        let divisor = ring.mul(&s, &ring.pow(&h, delta));
        g = match r.try_div_coeff(&divisor) {
            Some(g) => g,
            None => unreachable!("Subresultant division by {} is not exact", ring.printer(&divisor)),
        };

        s = f.lcoeff();
        if delta > 0 {
            let num = ring.pow(&s, delta);
            let den = ring.pow(&h, delta - 1);
            h = match ring.try_div(&num, &den) {
                Some(h) => h,
                None => unreachable!("Subresultant scaling is not exact"),
            };
        }
    }

    g.primitive_part().mul_coeff(&c)
}

/// Dispatch the base univariate gcd.
fn univariate_gcd<R: EuclideanDomain>(
    a: &UnivariatePolynomial<R>,
    b: &UnivariatePolynomial<R>,
    algorithm: GcdAlgorithm,
) -> UnivariatePolynomial<R> {
    match algorithm {
        GcdAlgorithm::PrimitivePrs => gcd_primitive_prs(a, b),
        GcdAlgorithm::SubresultantPrs | GcdAlgorithm::Modular => gcd_subresultant(a, b),
    }
}

/// Compute the gcd by writing the polynomials as univariate polynomials
/// in one variable with polynomial coefficients in the others.
fn gcd_recursive<R: PolynomialGCD<E>, E: Exponent, O: MonomialOrder>(
    a: &MultivariatePolynomial<R, E, O>,
    b: &MultivariatePolynomial<R, E, O>,
    algorithm: GcdAlgorithm,
) -> MultivariatePolynomial<R, E, O> {
    if let Some(g) = simple_gcd(a, b) {
        return g;
    }

    let mut vars = a.occurring_variables();
    for v in b.occurring_variables() {
        if !vars.contains(&v) {
            vars.push(v);
        }
    }

    // the main variable is the one with the lowest degree in both polynomials
    let shared: Vec<usize> = vars
        .iter()
        .copied()
        .filter(|v| !a.degree(*v).is_zero() && !b.degree(*v).is_zero())
        .collect();
    let main_var = shared
        .iter()
        .copied()
        .min_by_key(|v| a.degree(*v).max(b.degree(*v)))
        .unwrap_or(vars[0]);

    if vars.len() == 1 {
        let ua = a.to_univariate_from_univariate(main_var);
        let ub = b.to_univariate_from_univariate(main_var);
        let g = univariate_gcd(&ua, &ub, algorithm);
        return a.from_univariate_coefficients(&g, main_var);
    }

    debug!("Recursive gcd in variable {}", a.variables[main_var]);
    let ua = a.to_univariate(main_var);
    let ub = b.to_univariate(main_var);
    let g = univariate_gcd(&ua, &ub, algorithm);
    MultivariatePolynomial::from_univariate(&g, main_var)
}

/// A bound on the coefficients of a gcd of `a` and `b` with leading coefficient `gamma`,
/// based on the Landau-Mignotte bound.
fn coefficient_bound<E: Exponent, O: MonomialOrder>(
    a: &MultivariatePolynomial<IntegerRing, E, O>,
    b: &MultivariatePolynomial<IntegerRing, E, O>,
    gamma: &Integer,
) -> Integer {
    let norm = |p: &MultivariatePolynomial<IntegerRing, E, O>| {
        let mut n = Integer::zero();
        for c in &p.coefficients {
            n += &(c * c);
        }
        &n.isqrt() + &Integer::one()
    };

    let (na, nb) = (norm(a), norm(b));
    let n = if na < nb { na } else { nb };
    let d = a.total_degree().min(b.total_degree());

    &(&gamma.abs() * &Integer::power_of_two(d.min(u32::MAX as u64) as u32)) * &n
}

/// Combine the images `a mod p1` and `b mod p2` coefficient-wise with the Chinese remainder theorem.
fn chinese_remainder_poly<E: Exponent, O: MonomialOrder>(
    a: &MultivariatePolynomial<IntegerRing, E, O>,
    b: &MultivariatePolynomial<IntegerRing, E, O>,
    p1: &Integer,
    p2: &Integer,
) -> Result<MultivariatePolynomial<IntegerRing, E, O>, crate::error::PolynomialError> {
    let mut r = a.zero_with_capacity(a.nterms().max(b.nterms()));
    let zero = Integer::zero();

    let (mut i, mut j) = (0, 0);
    while i < a.nterms() || j < b.nterms() {
        let ord = if i == a.nterms() {
            Ordering::Greater
        } else if j == b.nterms() {
            Ordering::Less
        } else {
            a.order.cmp(a.exponents(i), b.exponents(j))
        };

        let (c1, c2, e) = match ord {
            Ordering::Less => {
                i += 1;
                (&a.coefficients[i - 1], &zero, a.exponents(i - 1))
            }
            Ordering::Greater => {
                j += 1;
                (&zero, &b.coefficients[j - 1], b.exponents(j - 1))
            }
            Ordering::Equal => {
                i += 1;
                j += 1;
                (&a.coefficients[i - 1], &b.coefficients[j - 1], a.exponents(i - 1))
            }
        };

        let c = Integer::chinese_remainder(c1, c2, p1, p2)?;
        if !c.is_zero() {
            r.coefficients.push(c);
            r.exponents.extend_from_slice(e);
        }
    }

    Ok(r)
}

/// Compute the gcd of two integer polynomials from their images modulo large primes.
///
/// Every image gcd is scaled so that its leading coefficient is the gcd `gamma` of
/// the leading coefficients of the inputs, which makes the images of different primes
/// compatible. A prime is unlucky if it divides `gamma` or if the image has a higher
/// leading monomial than the current target. An image with a lower leading monomial
/// shows that all previous primes were unlucky and restarts the accumulation.
///
/// The reconstruction stops when the accumulated modulus exceeds twice the coefficient
/// bound or when the reconstruction did not change, and the primitive part of the
/// candidate divides both inputs. After `settings.max_unlucky_primes` unlucky primes or
/// when all `settings.max_primes` primes are used, the subresultant algorithm is used instead.
#[instrument(level = "debug", skip_all)]
pub fn gcd_modular<E: Exponent, O: MonomialOrder>(
    a: &MultivariatePolynomial<IntegerRing, E, O>,
    b: &MultivariatePolynomial<IntegerRing, E, O>,
    settings: &GcdSettings,
) -> MultivariatePolynomial<IntegerRing, E, O> {
    if let Some(g) = simple_gcd(a, b) {
        return normalize(g);
    }

    let ca = a.content();
    let cb = b.content();
    let content = ca.gcd(&cb);
    let a = a.clone().div_coeff(&ca);
    let b = b.clone().div_coeff(&cb);

    let gamma = a.lcoeff().gcd(&b.lcoeff());
    let bound = &coefficient_bound(&a, &b, &gamma) * &Integer::new(2);
    debug!("gamma={}, bound={}", gamma, bound);

    let mut target: Option<ExponentVector<E>> = None;
    let mut accumulated: Option<MultivariatePolynomial<IntegerRing, E, O>> = None;
    let mut modulus = Integer::one();
    let mut unlucky = 0;

    for &p in LARGE_U32_PRIMES.iter().take(settings.max_primes) {
        if unlucky > settings.max_unlucky_primes {
            break;
        }

        let prime = Integer::from(p);
        if gamma.rem_euclid(&prime).is_zero() {
            debug!("Unlucky prime {}: divides the leading coefficient", p);
            unlucky += 1;
            continue;
        }

        let field = Zp::new(p);
        let ap = a.map_coeff(|c| c.to_finite_field(&field), field.clone());
        let bp = b.map_coeff(|c| c.to_finite_field(&field), field.clone());
        let gp = ap.gcd_with_settings(&bp, &GcdSettings::default());

        if gp.is_constant() {
            debug!("Image modulo {} is constant", p);
            return a.constant(content);
        }

        let lm = gp.leading_exponent();
        if let Some(t) = &target {
            match a.order.cmp(lm.as_slice(), t.as_slice()) {
                Ordering::Greater => {
                    debug!("Unlucky prime {}: image degree {} above target {}", p, lm, t);
                    unlucky += 1;
                    continue;
                }
                Ordering::Less => {
                    debug!("Image degree {} below target {}: restarting", lm, t);
                    unlucky += 1;
                    accumulated = None;
                    modulus = Integer::one();
                }
                Ordering::Equal => {}
            }
        }
        target = Some(lm);

        let gp = gp.mul_coeff(gamma.to_finite_field(&field));
        let image = gp.map_coeff(|c| field.to_symmetric_integer(c), Z);

        let new = match &accumulated {
            None => image,
            Some(acc) => match chinese_remainder_poly(acc, &image, &modulus, &prime) {
                Ok(r) => r,
                Err(e) => {
                    debug!("Chinese remainder failed: {}", e);
                    unlucky += 1;
                    continue;
                }
            },
        };
        modulus = &modulus * &prime;

        let stable = accumulated.as_ref() == Some(&new);
        accumulated = Some(new);

        if stable || modulus > bound {
            if let Some(acc) = &accumulated {
                let candidate = acc.primitive_part();
                if a.divides(&candidate).is_some() && b.divides(&candidate).is_some() {
                    debug!("Modular gcd found after modulus {}", modulus);
                    return normalize(candidate).mul_coeff(content);
                }
            }
        }
    }

    debug!(
        "Modular gcd gave up after {} unlucky primes: using subresultants",
        unlucky
    );
    normalize(gcd_recursive(&a, &b, GcdAlgorithm::SubresultantPrs)).mul_coeff(content)
}

impl<R: PolynomialGCD<E>, E: Exponent, O: MonomialOrder> MultivariatePolynomial<R, E, O> {
    /// Compute the gcd of two polynomials with the default settings.
    /// The result has a positive leading coefficient for rings with a sign
    /// and is monic over fields.
    pub fn gcd(&self, b: &Self) -> Self {
        self.gcd_with_settings(b, &GcdSettings::default())
    }

    /// Compute the gcd of two polynomials. Panics when the polynomials belong to different rings.
    #[instrument(level = "debug", skip_all)]
    pub fn gcd_with_settings(&self, b: &Self, settings: &GcdSettings) -> Self {
        self.assert_compatible(b);
        debug!("gcd of {} and {}", self, b);

        if let Some(g) = simple_gcd(self, b) {
            return normalize(g);
        }

        // remove the shared monomial factor
        let shared = self.common_monomial().gcd(&b.common_monomial());
        let a = self.div_exp(&shared);
        let b = b.div_exp(&shared);

        let algorithm = settings
            .algorithm
            .unwrap_or_else(|| self.ring.default_gcd_algorithm());

        let g = match algorithm {
            GcdAlgorithm::Modular => match R::gcd_modular(&a, &b, settings) {
                Some(g) => g,
                None => {
                    debug!("No modular algorithm for {}: using subresultants", self.ring);
                    gcd_recursive(&a, &b, GcdAlgorithm::SubresultantPrs)
                }
            },
            algorithm => gcd_recursive(&a, &b, algorithm),
        };

        normalize(g).mul_exp(&shared)
    }

    /// Compute the gcd of a list of polynomials.
    pub fn gcd_multiple(mut f: Vec<Self>) -> Option<Self> {
        f.sort_unstable_by_key(|p| std::cmp::Reverse(p.nterms()));

        let mut gcd = f.pop()?;
        for p in f {
            if gcd.is_one() {
                break;
            }

            gcd = gcd.gcd(&p);
        }
        Some(normalize(gcd))
    }

    /// Compute the least common multiple.
    pub fn lcm(&self, b: &Self) -> Self {
        if self.is_zero() || b.is_zero() {
            return self.zero();
        }

        let g = self.gcd(b);
        match self.divides(&g) {
            Some(q) => normalize(&q * b),
            None => unreachable!("{} does not divide {}", g, self),
        }
    }

    /// The gcd of the coefficients of the polynomial in the variable `x`.
    pub fn univariate_content(&self, x: usize) -> Self {
        let u = self.to_univariate(x);
        let coeffs = u.coefficients.into_iter().filter(|c| !c.is_zero()).collect();
        Self::gcd_multiple(coeffs).unwrap_or_else(|| self.zero())
    }

    /// Remove the content in the variable `x`.
    pub fn univariate_primitive_part(&self, x: usize) -> Self {
        if self.is_zero() {
            return self.clone();
        }

        let c = self.univariate_content(x);
        match self.divides(&c) {
            Some(q) => q,
            None => unreachable!("Content {} does not divide {}", c, self),
        }
    }

    /// Compute a gcd-free basis: a list of pairwise coprime polynomials such that
    /// every input is a product of powers of basis elements, up to a unit.
    /// The input should not contain zero.
    pub fn coprime_base(mut polys: Vec<Self>) -> Vec<Self> {
        let mut i = 0;
        while i + 1 < polys.len() {
            if polys[i].is_constant() {
                i += 1;
                continue;
            }

            let mut j = i + 1;
            while j < polys.len() {
                if polys[j].is_constant() {
                    j += 1;
                    continue;
                }

                let g = polys[i].gcd(&polys[j]);
                if !g.is_constant() {
                    if let (Some(a), Some(b)) = (polys[i].divides(&g), polys[j].divides(&g)) {
                        polys[i] = a;
                        polys[j] = b;
                        polys.push(g);
                    }
                }

                j += 1;
            }

            i += 1;
        }

        polys.retain(|p| !p.is_constant());
        polys.into_iter().map(normalize).collect()
    }

    /// Returns `true` if the gcd of the polynomials is a unit.
    pub fn is_coprime(&self, b: &Self) -> bool {
        let g = self.gcd(b);
        g.is_constant() && !g.is_zero()
    }
}

#[cfg(test)]
mod test {
    use crate::domains::finite_field::{FiniteFieldCore, Zp};
    use crate::domains::integer::{Integer, IntegerRing, Z};
    use crate::domains::rational::{Rational, Q};
    use crate::domains::Ring;
    use crate::poly::polynomial::{MultivariatePolynomial, PolynomialRing};
    use crate::poly::variables;
    use crate::settings::{GcdAlgorithm, GcdSettings};

    fn int_ring() -> PolynomialRing<IntegerRing, u16> {
        PolynomialRing::new(Z, variables(&["x", "y"]))
    }

    fn poly(r: &PolynomialRing<IntegerRing, u16>, terms: &[(i64, [u16; 2])]) -> MultivariatePolynomial<IntegerRing, u16> {
        r.from_terms(terms.iter().map(|(c, e)| (Integer::new(*c), e.to_vec())))
            .unwrap()
    }

    const ALGORITHMS: [GcdAlgorithm; 3] = [
        GcdAlgorithm::PrimitivePrs,
        GcdAlgorithm::SubresultantPrs,
        GcdAlgorithm::Modular,
    ];

    #[test]
    fn univariate_integer_gcd() {
        let r = int_ring();
        let a = poly(&r, &[(1, [2, 0]), (-1, [0, 0])]);
        let b = poly(&r, &[(1, [2, 0]), (2, [1, 0]), (1, [0, 0])]);
        let x_plus_one = poly(&r, &[(1, [1, 0]), (1, [0, 0])]);

        for alg in ALGORITHMS {
            let settings = GcdSettings::default().with_algorithm(alg);
            assert_eq!(a.gcd_with_settings(&b, &settings), x_plus_one);
        }
        assert_eq!(a.gcd(&b).to_string(), "x+1");
    }

    #[test]
    fn multivariate_integer_gcd() {
        let r = int_ring();
        let x = r.variable(0).unwrap();
        let y = r.variable(1).unwrap();
        let one = r.one();
        let two = r.nth(&Integer::new(2));

        let g = &x + &y;
        let a = &(&g * &g) * &(&x + &one);
        let b = &(&g * &(&y + &two)).mul_coeff(Integer::new(3)) * &x;

        for alg in ALGORITHMS {
            let settings = GcdSettings::default().with_algorithm(alg);
            assert_eq!(a.gcd_with_settings(&b, &settings), g);
        }
    }

    #[test]
    fn large_coefficients() {
        let r = int_ring();
        let g = poly(&r, &[(123456789, [1, 0]), (987654321, [0, 0])]);
        let a = &g * &poly(&r, &[(1, [2, 0]), (3, [0, 0])]);
        let b = &g * &poly(&r, &[(1, [1, 0]), (-5, [0, 0])]);
        assert_eq!(a.gcd(&b), g);

        // no primes at all forces the subresultant fallback
        let settings = GcdSettings::default()
            .with_algorithm(GcdAlgorithm::Modular)
            .with_max_primes(0);
        assert_eq!(a.gcd_with_settings(&b, &settings), g);
    }

    #[test]
    fn zero_and_constants() {
        let r = int_ring();
        let a = poly(&r, &[(-1, [1, 0]), (-1, [0, 0])]);
        let x_plus_one = -&a;
        assert_eq!(r.zero().gcd(&a), x_plus_one);
        assert_eq!(a.gcd(&r.zero()), x_plus_one);

        let six = r.nth(&Integer::new(6));
        let b = poly(&r, &[(4, [1, 0]), (2, [0, 0])]);
        assert_eq!(six.gcd(&b), r.nth(&Integer::new(2)));
        assert!(r.one().gcd(&r.one()).is_one());

        // shared monomial factors are kept
        let c = poly(&r, &[(2, [2, 1]), (4, [1, 1])]);
        let d = poly(&r, &[(6, [1, 2])]);
        assert_eq!(c.gcd(&d), poly(&r, &[(2, [1, 1])]));
    }

    #[test]
    fn rational_gcd_is_monic() {
        let r: PolynomialRing<_, u8> = PolynomialRing::new(Q, variables(&["x"]));
        let a = r
            .from_terms([(Rational::from(2), vec![2]), (Rational::from(-2), vec![0])])
            .unwrap();
        let b = r
            .from_terms([(Rational::from(4), vec![1]), (Rational::from(4), vec![0])])
            .unwrap();
        let expected = r
            .from_terms([(Rational::from(1), vec![1]), (Rational::from(1), vec![0])])
            .unwrap();
        assert_eq!(a.gcd(&b), expected);
    }

    #[test]
    fn finite_field_gcd() {
        let f = Zp::new(7);
        let r: PolynomialRing<_, u16> = PolynomialRing::new(f.clone(), variables(&["x", "y"]));
        let x = r.variable(0).unwrap();
        let y = r.variable(1).unwrap();
        let g = &(&x * &y) + &r.constant(f.to_element(3));
        let a = &g * &(&x + &y);
        let b = &g * &(&x - &y);
        assert_eq!(a.gcd(&b), g);
    }

    #[test]
    fn lcm_and_coprime_base() {
        let r = int_ring();
        let a = poly(&r, &[(1, [2, 0]), (-1, [0, 0])]);
        let b = poly(&r, &[(1, [1, 0]), (1, [0, 0])]);
        assert_eq!(a.lcm(&b), a);

        let base = MultivariatePolynomial::coprime_base(vec![a.clone(), b.clone()]);
        assert_eq!(base.len(), 2);
        assert!(base.contains(&b));
        assert!(base.contains(&poly(&r, &[(1, [1, 0]), (-1, [0, 0])])));
        assert!(a.is_coprime(&poly(&r, &[(1, [1, 0]), (2, [0, 0])])));
    }

    #[test]
    fn content() {
        let r = int_ring();
        // x*y + y = (x + 1) * y
        let p = poly(&r, &[(1, [1, 1]), (1, [0, 1])]);
        assert_eq!(p.univariate_content(0), r.variable(1).unwrap());
        assert_eq!(
            p.univariate_primitive_part(0),
            poly(&r, &[(1, [1, 0]), (1, [0, 0])])
        );
        assert_eq!(poly(&r, &[(-4, [1, 0]), (6, [0, 0])]).content(), Integer::new(2));
    }
}
