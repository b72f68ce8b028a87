//! Hensel lifting of factorizations modulo a prime `p` to factorizations over the integers.
//!
//! The routines work on dense univariate polynomials. Integer polynomials that hold
//! an image modulo `m` always use the symmetric representation `(-m/2, m/2]`.

use tracing::{debug, instrument};

use crate::domains::finite_field::{
    FiniteField, FiniteFieldCore, FiniteFieldWorkspace, ToFiniteField,
};
use crate::domains::integer::{Integer, IntegerRing, Z};
use crate::domains::Ring;
use crate::error::PolynomialError;

use super::univariate::UnivariatePolynomial;

type IntPoly = UnivariatePolynomial<IntegerRing>;
type ModPoly<UField> = UnivariatePolynomial<FiniteField<UField>>;

pub(crate) fn to_modular<UField: FiniteFieldWorkspace>(a: &IntPoly, field: &FiniteField<UField>) -> ModPoly<UField> {
    a.map_coeff(|c| c.to_finite_field(field), field.clone())
}

fn to_symmetric<UField: FiniteFieldWorkspace>(a: &ModPoly<UField>) -> IntPoly {
    a.map_coeff(|c| a.ring.to_symmetric_integer(c), Z)
}

pub(crate) fn symmetric_mod(a: &IntPoly, m: &Integer) -> IntPoly {
    a.map_coeff(|c| c.symmetric_mod(m), Z)
}

fn div_modulus(a: &IntPoly, m: &Integer) -> IntPoly {
    match a.try_div_coeff(m) {
        Some(r) => r,
        None => unreachable!("Lifting error {} is not divisible by {}", a, m),
    }
}

fn prime<UField: FiniteFieldWorkspace>(field: &FiniteField<UField>) -> Integer {
    Integer::from(field.get_prime().to_u64())
}

fn not_coprime<UField: FiniteFieldWorkspace>(
    a: &ModPoly<UField>,
    b: &ModPoly<UField>,
) -> PolynomialError {
    PolynomialError::NoLifting(format!(
        "{} and {} are not coprime modulo {}",
        a,
        b,
        a.ring.get_prime()
    ))
}

/// A bound on the absolute value of the coefficients of any factor of `c`,
/// based on the Landau-Mignotte bound `2^n ||c||_2`.
pub fn factor_coefficient_bound(c: &IntPoly) -> Integer {
    let mut norm = Integer::zero();
    for x in &c.coefficients {
        norm += &(x * x);
    }
    let norm = &norm.isqrt() + &Integer::one();

    &Integer::power_of_two(c.degree().min(u32::MAX as usize) as u32) * &norm
}

/// The smallest `k` such that `p^k > bound`.
pub fn lifting_precision(p: &Integer, bound: &Integer) -> u32 {
    let mut k = 1;
    let mut m = p.clone();
    while &m <= bound {
        m = &m * p;
        k += 1;
    }
    k
}

/// Lift Bézout coefficients `s * a + t * b = 1 mod p` of two integer polynomials whose
/// images modulo `p` are coprime to `s * a + t * b = 1 mod p^k`.
///
/// Every step computes the error `1 - s * a - t * b`, divides it by the current modulus,
/// solves for the correction modulo `p` and adds the correction times the modulus.
pub fn lift_extended_euclidean<UField: FiniteFieldWorkspace>(
    a: &IntPoly,
    b: &IntPoly,
    field: &FiniteField<UField>,
    k: u32,
) -> Result<(IntPoly, IntPoly), PolynomialError> {
    let (ap, bp) = (to_modular(a, field), to_modular(b, field));
    let (g, s, t) = ap.eea(&bp);
    if !g.is_one() {
        return Err(not_coprime(&ap, &bp));
    }

    let p = prime(field);
    let (mut s, mut t) = (to_symmetric(&s), to_symmetric(&t));
    let mut m = p.clone();
    let one = a.one();

    for _ in 1..k {
        let e = &(&one - &(&s * a)) - &(&t * b);
        if e.is_zero() {
            break;
        }

        let ep = to_modular(&div_modulus(&e, &m), field);
        let (sigma, tau) = ap.diophantine(&bp, &ep).map_err(|_| not_coprime(&ap, &bp))?;

        s = &s + &to_symmetric(&sigma).mul_coeff(&m);
        t = &t + &to_symmetric(&tau).mul_coeff(&m);
        m = &m * &p;
    }

    Ok((symmetric_mod(&s, &m), symmetric_mod(&t, &m)))
}

/// The lifting state of `c = g * h mod p`, where `g` has the leading coefficient of `c`
/// and `h` is monic.
struct LiftSetup<UField: FiniteFieldWorkspace> {
    g_p: ModPoly<UField>,
    h_p: ModPoly<UField>,
    g: IntPoly,
    h: IntPoly,
    target: Integer,
}

fn setup_two_factors<UField: FiniteFieldWorkspace>(
    c: &IntPoly,
    a: &ModPoly<UField>,
    b: &ModPoly<UField>,
    bound: &Integer,
) -> Result<LiftSetup<UField>, PolynomialError> {
    let field = &a.ring;
    let l = c.lcoeff();
    let l_p = l.to_finite_field(field);
    if FiniteField::<UField>::is_zero(&l_p) {
        return Err(PolynomialError::NoLifting(format!(
            "the leading coefficient of {} vanishes modulo {}",
            c,
            field.get_prime()
        )));
    }

    let g_p = a.clone().monic().mul_coeff(&l_p);
    let h_p = b.clone().monic();

    if &g_p * &h_p != to_modular(c, field) {
        return Err(PolynomialError::NoLifting(format!(
            "{} * {} is not a factorization of {} modulo {}",
            a,
            b,
            c,
            field.get_prime()
        )));
    }

    let (gcd, _, _) = g_p.eea(&h_p);
    if !gcd.is_one() {
        return Err(not_coprime(a, b));
    }

    let mut g = to_symmetric(&g_p);
    if let Some(lc) = g.coefficients.last_mut() {
        *lc = l.clone();
    }
    let h = to_symmetric(&h_p);

    Ok(LiftSetup {
        g_p,
        h_p,
        g,
        h,
        target: &(&l.abs() * bound) * &Integer::new(2),
    })
}

/// Reconstruct the integer factors from `c = g * h mod m` with `h` monic.
fn reconstruct(c: &IntPoly, g: IntPoly, h: &IntPoly, m: &Integer) -> Result<(IntPoly, IntPoly), PolynomialError> {
    if &(&g * h) == c {
        return Ok((g, h.clone()));
    }

    let mut b = symmetric_mod(&h.clone().mul_coeff(&c.lcoeff()), m).primitive_part();
    if b.lcoeff().is_negative() {
        b = -b;
    }

    match c.divides(&b) {
        Some(a) => Ok((a, b)),
        None => Err(PolynomialError::NoLifting(format!(
            "{} has no integer factor lifting {}",
            c,
            h.map_coeff(|x| x.symmetric_mod(m), Z)
        ))),
    }
}

/// Lift a coprime factorization `c = a * b mod p` to integer factors `c = a1 * b1`, gaining
/// one factor of `p` per step until the modulus exceeds twice `bound` times the leading
/// coefficient of `c`. `bound` must bound the coefficients of the factors of `c`, see
/// [factor_coefficient_bound].
#[instrument(level = "debug", skip_all)]
pub fn lift_hensel<UField: FiniteFieldWorkspace>(
    c: &IntPoly,
    a: &ModPoly<UField>,
    b: &ModPoly<UField>,
    bound: &Integer,
) -> Result<(IntPoly, IntPoly), PolynomialError> {
    let field = a.ring.clone();
    let p = prime(&field);
    let LiftSetup {
        g_p,
        h_p,
        mut g,
        mut h,
        target,
    } = setup_two_factors(c, a, b, bound)?;

    let mut m = p.clone();
    while m <= target {
        let e = c - &(&g * &h);
        if e.is_zero() {
            break;
        }

        let ep = to_modular(&div_modulus(&e, &m), &field);
        let (s, t) = g_p.diophantine(&h_p, &ep).map_err(|_| not_coprime(&g_p, &h_p))?;

        h = &h + &to_symmetric(&s).mul_coeff(&m);
        g = &g + &to_symmetric(&t).mul_coeff(&m);
        m = &m * &p;
    }

    debug!("Lifted to modulus {}", m);
    reconstruct(c, g, &h, &m)
}

/// Lift a coprime factorization `c = a * b mod p` to integer factors `c = a1 * b1`,
/// squaring the modulus in every step. The Bézout coefficients of the factors are
/// lifted together with the factors.
#[instrument(level = "debug", skip_all)]
pub fn lift_hensel_quadratic<UField: FiniteFieldWorkspace>(
    c: &IntPoly,
    a: &ModPoly<UField>,
    b: &ModPoly<UField>,
    bound: &Integer,
) -> Result<(IntPoly, IntPoly), PolynomialError> {
    let field = a.ring.clone();
    let l = c.lcoeff();
    let LiftSetup {
        g_p,
        h_p,
        mut g,
        mut h,
        target,
    } = setup_two_factors(c, a, b, bound)?;

    let (_, s, t) = g_p.eea(&h_p);
    let (mut s, mut t) = (to_symmetric(&s), to_symmetric(&t));

    let mut m = prime(&field);
    while m <= target {
        let e = c - &(&g * &h);
        if e.is_zero() {
            break;
        }

        let m2 = &m * &m;
        let e = symmetric_mod(&e, &m2);

        // h is monic, so pseudo-division is exact division
        let (q, r) = (&s * &e).pseudo_divide(&h);
        let mut g_new = symmetric_mod(&(&(&g + &(&t * &e)) + &(&q * &g)), &m2);
        if let Some(lc) = g_new.coefficients.last_mut() {
            *lc = l.clone();
        }
        let h_new = symmetric_mod(&(&h + &r), &m2);

        let d = symmetric_mod(&(&(&(&s * &g_new) + &(&t * &h_new)) - &h_new.one()), &m2);
        let (q2, r2) = (&s * &d).pseudo_divide(&h_new);
        s = symmetric_mod(&(&s - &r2), &m2);
        t = symmetric_mod(&(&(&t - &(&t * &d)) - &(&q2 * &g_new)), &m2);

        g = g_new;
        h = h_new;
        m = m2;
    }

    debug!("Lifted to modulus {}", m);
    reconstruct(c, g, &h, &m)
}

/// Solve `sum_i s_i prod_{j != i} a_j = rhs mod p` with `deg(s_i) < deg(a_i)`,
/// for pairwise coprime `a_i` and `deg(rhs) < sum_i deg(a_i)`.
pub fn lift_diophantine<UField: FiniteFieldWorkspace>(
    factors: &[ModPoly<UField>],
    rhs: &ModPoly<UField>,
) -> Result<Vec<ModPoly<UField>>, PolynomialError> {
    if factors.len() < 2 {
        return Ok(factors.iter().map(|a| rhs.rem(a)).collect());
    }

    // products of all factors with a higher index
    let mut tails = vec![rhs.one(); factors.len()];
    for i in (0..factors.len() - 1).rev() {
        tails[i] = &tails[i + 1] * &factors[i + 1];
    }

    // solve sum_i s_i prod_{j != i} a_j = 1 one factor at a time
    let mut sols = Vec::with_capacity(factors.len());
    let mut beta = rhs.one();
    for (a, tail) in factors.iter().zip(&tails).take(factors.len() - 1) {
        let (s, t) = tail
            .diophantine(a, &beta)
            .map_err(|_| not_coprime(a, tail))?;
        sols.push(s);
        beta = t;
    }
    sols.push(beta);

    Ok(sols
        .into_iter()
        .zip(factors)
        .map(|(s, a)| (&s * rhs).rem(a))
        .collect())
}

/// Lift monic factors `a_i` with `lcoeff(c) prod_i a_i = c mod p` to monic factors
/// modulo `p^k`. The factors must be pairwise coprime modulo `p`.
#[instrument(level = "debug", skip_all)]
pub fn lift_hensel_monic<UField: FiniteFieldWorkspace>(
    c: &IntPoly,
    factors: &[ModPoly<UField>],
    k: u32,
) -> Result<Vec<IntPoly>, PolynomialError> {
    let Some(field) = factors.first().map(|f| f.ring.clone()) else {
        return Ok(vec![]);
    };

    let p = prime(&field);
    let l = c.lcoeff();
    let l_p = l.to_finite_field(&field);
    if FiniteField::<UField>::is_zero(&l_p) {
        return Err(PolynomialError::NoLifting(format!(
            "the leading coefficient of {} vanishes modulo {}",
            c,
            field.get_prime()
        )));
    }

    // the first factor carries the leading coefficient during the lifting
    let mut factors_p: Vec<_> = factors.iter().map(|f| f.clone().monic()).collect();
    factors_p[0] = factors_p[0].clone().mul_coeff(&l_p);

    let product = factors_p
        .iter()
        .fold(factors_p[0].one(), |acc, f| &acc * f);
    if product != to_modular(c, &field) {
        return Err(PolynomialError::NoLifting(format!(
            "the factors are not a factorization of {} modulo {}",
            c, p
        )));
    }

    for (i, a) in factors_p.iter().enumerate() {
        for b in &factors_p[i + 1..] {
            let (g, _, _) = a.eea(b);
            if !g.is_one() {
                return Err(not_coprime(a, b));
            }
        }
    }

    let mut lifted: Vec<_> = factors_p.iter().map(to_symmetric).collect();
    if let Some(lc) = lifted[0].coefficients.last_mut() {
        *lc = l.clone();
    }

    let mut m = p.clone();
    for _ in 1..k {
        let e = c - &lifted.iter().fold(c.one(), |acc, f| &acc * f);
        if e.is_zero() {
            break;
        }

        let ep = to_modular(&div_modulus(&e, &m), &field);
        let corrections = lift_diophantine(&factors_p, &ep)?;
        for (f, s) in lifted.iter_mut().zip(&corrections) {
            *f = &*f + &to_symmetric(s).mul_coeff(&m);
        }
        m = &m * &p;
    }

    // make the first factor monic
    let inv = l.mod_inverse(&m)?;
    lifted[0] = lifted[0].clone().mul_coeff(&inv);

    Ok(lifted.iter().map(|f| symmetric_mod(f, &m)).collect())
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use crate::domains::finite_field::{FiniteFieldCore, Zp};
    use crate::domains::integer::{Integer, IntegerRing, Z};
    use crate::error::PolynomialError;
    use crate::poly::univariate::UnivariatePolynomial;
    use crate::poly::Variable;

    use super::{
        factor_coefficient_bound, lift_diophantine, lift_extended_euclidean, lift_hensel,
        lift_hensel_monic, lift_hensel_quadratic, to_modular,
    };

    fn int_poly(c: &[i64]) -> UnivariatePolynomial<IntegerRing> {
        UnivariatePolynomial::from_coefficients(
            Z,
            c.iter().map(|x| Integer::new(*x)).collect(),
            Arc::new(Variable::from("x")),
        )
    }

    #[test]
    fn bezout_lifting() {
        let field = Zp::new(5);
        let a = int_poly(&[1, 1]);
        let b = int_poly(&[2, 0, 1]);
        let (s, t) = lift_extended_euclidean(&a, &b, &field, 3).unwrap();

        let e = &(&(&s * &a) + &(&t * &b)) - &a.one();
        assert!(e
            .coefficients
            .iter()
            .all(|c| c.rem_euclid(&Integer::new(125)).is_zero()));
    }

    #[test]
    fn two_factor_lifting() {
        let field = Zp::new(7);
        // (x + 3) * (2x - 5)
        let c = int_poly(&[-15, 1, 2]);
        let a = to_modular(&int_poly(&[3, 1]), &field);
        let b = to_modular(&int_poly(&[-5, 2]), &field);
        let bound = factor_coefficient_bound(&c);

        let expected = (int_poly(&[3, 1]), int_poly(&[-5, 2]));
        assert_eq!(lift_hensel_quadratic(&c, &a, &b, &bound).unwrap(), expected);
        assert_eq!(lift_hensel(&c, &a, &b, &bound).unwrap(), expected);
    }

    #[test]
    fn monic_lifting() {
        let field = Zp::new(11);
        // (x - 7) * (x + 20)
        let c = int_poly(&[-140, 13, 1]);
        let a = to_modular(&int_poly(&[-7, 1]), &field);
        let b = to_modular(&int_poly(&[20, 1]), &field);
        let bound = factor_coefficient_bound(&c);

        let expected = (int_poly(&[-7, 1]), int_poly(&[20, 1]));
        assert_eq!(lift_hensel_quadratic(&c, &a, &b, &bound).unwrap(), expected);
        assert_eq!(lift_hensel(&c, &a, &b, &bound).unwrap(), expected);
    }

    #[test]
    fn no_lifting() {
        let field = Zp::new(5);
        // (x + 1)^2
        let c = int_poly(&[1, 2, 1]);
        let a = to_modular(&int_poly(&[1, 1]), &field);
        let bound = factor_coefficient_bound(&c);

        assert!(matches!(
            lift_hensel_quadratic(&c, &a, &a, &bound),
            Err(PolynomialError::NoLifting(_))
        ));
        assert!(matches!(
            lift_hensel_monic(&c, &[a.clone(), a.clone()], 3),
            Err(PolynomialError::NoLifting(_))
        ));
    }

    #[test]
    fn repeated_factor_rejected() {
        let field = Zp::new(7);
        // (x + 1)^2 * (x + 2)
        let c = int_poly(&[2, 5, 4, 1]);
        let factors: Vec<_> = [1, 1, 2]
            .iter()
            .map(|i| to_modular(&int_poly(&[*i, 1]), &field))
            .collect();

        match lift_hensel_monic(&c, &factors, 2) {
            Err(PolynomialError::NoLifting(msg)) => assert!(msg.contains("not coprime")),
            r => panic!("expected a lifting error, got {:?}", r.map(|_| ())),
        }
    }

    #[test]
    fn diophantine_equation() {
        let field = Zp::new(7);
        let factors: Vec<_> = [1, 2, 3]
            .iter()
            .map(|i| to_modular(&int_poly(&[*i, 1]), &field))
            .collect();
        let rhs = to_modular(&int_poly(&[0, 0, 1]), &field);

        let s = lift_diophantine(&factors, &rhs).unwrap();
        let mut sum = rhs.zero();
        for i in 0..3 {
            assert_eq!(s[i].degree(), 0);
            let mut t = s[i].clone();
            for j in 0..3 {
                if i != j {
                    t = &t * &factors[j];
                }
            }
            sum = &sum + &t;
        }
        assert_eq!(sum, rhs);
    }

    #[test]
    fn multi_factor_lifting() {
        let field = Zp::new(5);
        // (x + 1) * (x + 2) * (x + 3)
        let c = int_poly(&[6, 11, 6, 1]);
        let factors: Vec<_> = [1, 2, 3]
            .iter()
            .map(|i| to_modular(&int_poly(&[*i, 1]), &field))
            .collect();

        let lifted = lift_hensel_monic(&c, &factors, 3).unwrap();
        assert_eq!(
            lifted,
            vec![int_poly(&[1, 1]), int_poly(&[2, 1]), int_poly(&[3, 1])]
        );
    }
}
