//! Polykernel is the polynomial kernel of a computer algebra system.
//!
//! It provides sparse multivariate polynomials over exact coefficient rings,
//! such as the integers, the rationals, finite fields, algebraic extensions and
//! rational functions, together with greatest common divisors, resultants,
//! squarefree decomposition, Hensel lifting and factorization.
//!
//! For example:
//!
//! ```
//! use polykernel::domains::integer::{Integer, Z};
//! use polykernel::domains::Ring;
//! use polykernel::poly::polynomial::PolynomialRing;
//! use polykernel::poly::variables;
//!
//! let ring: PolynomialRing<_, u16> = PolynomialRing::new(Z, variables(&["x"]));
//! let x = ring.variable(0).unwrap();
//! let one = ring.one();
//!
//! let a = &(&x * &x) - &one;
//! let b = &(&(&x * &x) + &x.clone().mul_coeff(Integer::new(2))) + &one;
//! assert_eq!(a.gcd(&b).to_string(), "x+1");
//! ```

pub mod combinatorics;
pub mod domains;
pub mod error;
pub mod linear_system;
pub mod poly;
pub mod printer;
pub mod settings;
pub mod utils;
