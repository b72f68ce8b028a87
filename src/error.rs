//! Errors raised by the polynomial kernel.
//!
//! Only structural failures and missing capabilities are reported. Unlucky
//! primes, degree-dropping images and rejected recombination subsets are
//! handled inside the algorithms and never reach the caller.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolynomialError {
    #[error("polynomials belong to different rings")]
    RingMismatch,
    #[error("arity mismatch: expected {expected} variables, found {found}")]
    ArityMismatch { expected: usize, found: usize },
    #[error("division by zero")]
    DivisionByZero,
    #[error("not invertible: {0}")]
    NotInvertible(String),
    #[error("no lifting possible: {0}")]
    NoLifting(String),
    #[error("operation not supported: {0}")]
    Unsupported(&'static str),
    #[error("exponent {0} does not fit in the exponent type")]
    ExponentOverflow(u64),
}

#[cfg(test)]
mod test {
    use super::PolynomialError;

    #[test]
    fn messages() {
        assert_eq!(
            PolynomialError::ArityMismatch {
                expected: 2,
                found: 3
            }
            .to_string(),
            "arity mismatch: expected 2 variables, found 3"
        );
        assert_eq!(
            PolynomialError::NoLifting("x+1, x+1".into()).to_string(),
            "no lifting possible: x+1, x+1"
        );
    }
}
