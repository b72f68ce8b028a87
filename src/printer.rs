//! Printing of ring elements and polynomials.
//!
//! Polynomials are printed as `coefficient*monomial` terms joined by `+` or `-`.
//! A coefficient that itself contains an operator, for example a polynomial
//! coefficient of a recursive polynomial, is wrapped in parentheses.

use std::fmt::{self, Write};

use crate::domains::Ring;
use crate::poly::order::MonomialOrder;
use crate::poly::polynomial::MultivariatePolynomial;
use crate::poly::{Exponent, Variable};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PrintOptions {
    pub multiplication_operator: char,
    /// Print the modulus of finite field elements, as in `3%7`.
    pub print_finite_field: bool,
    /// Print `x^2` instead of `x**2`.
    pub caret_power: bool,
}

impl Default for PrintOptions {
    fn default() -> Self {
        PrintOptions {
            multiplication_operator: '*',
            print_finite_field: false,
            caret_power: true,
        }
    }
}

impl PrintOptions {
    pub fn mathematica() -> PrintOptions {
        PrintOptions {
            multiplication_operator: ' ',
            print_finite_field: false,
            caret_power: true,
        }
    }

    pub fn update_with_fmt(mut self, f: &fmt::Formatter) -> Self {
        if f.alternate() {
            self.print_finite_field = true;
        }
        self
    }
}

/// The context in which an element is printed.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct PrintState {
    /// The element is a term of a sum that is not the first.
    pub in_sum: bool,
    /// The element is a factor of a product.
    pub in_product: bool,
    /// The element is an exponent.
    pub in_exp: bool,
}

impl PrintState {
    pub fn new() -> PrintState {
        Self::default()
    }

    pub fn update_with_fmt(self, _f: &fmt::Formatter) -> Self {
        self
    }
}

/// Prints a polynomial with custom options. The variable names default
/// to the names stored in the polynomial, but can be overridden.
pub struct PolynomialPrinter<'a, F: Ring, E: Exponent, O: MonomialOrder> {
    pub poly: &'a MultivariatePolynomial<F, E, O>,
    pub names: Option<&'a [String]>,
    pub opts: PrintOptions,
    pub state: PrintState,
}

impl<'a, F: Ring, E: Exponent, O: MonomialOrder> PolynomialPrinter<'a, F, E, O> {
    pub fn new(poly: &'a MultivariatePolynomial<F, E, O>) -> PolynomialPrinter<'a, F, E, O> {
        PolynomialPrinter {
            poly,
            names: None,
            opts: PrintOptions::default(),
            state: PrintState::default(),
        }
    }

    /// Print the polynomial with the given variable names.
    pub fn new_with_names(
        poly: &'a MultivariatePolynomial<F, E, O>,
        names: &'a [String],
    ) -> PolynomialPrinter<'a, F, E, O> {
        PolynomialPrinter {
            poly,
            names: Some(names),
            opts: PrintOptions::default(),
            state: PrintState::default(),
        }
    }

    pub fn new_with_options(
        poly: &'a MultivariatePolynomial<F, E, O>,
        opts: PrintOptions,
    ) -> PolynomialPrinter<'a, F, E, O> {
        PolynomialPrinter {
            poly,
            names: None,
            opts,
            state: PrintState::default(),
        }
    }

    fn write_variable<W: Write>(&self, index: usize, f: &mut W) -> fmt::Result {
        match self.names {
            Some(n) if index < n.len() => f.write_str(&n[index]),
            _ => match self.poly.variables.get(index) {
                Some(v) => write!(f, "{}", v),
                None => write!(f, "{}", Variable::Temporary(index)),
            },
        }
    }

    /// Write the polynomial and return `true` if it consists of more than one term,
    /// so that a caller can decide to wrap it in parentheses.
    pub fn format<W: Write>(&self, f: &mut W) -> Result<bool, fmt::Error> {
        let p = self.poly;

        if p.is_zero() {
            f.write_char('0')?;
            return Ok(false);
        }

        let multiple_terms = p.nterms() > 1;
        let add_paren = multiple_terms && (self.state.in_product || self.state.in_exp);
        if add_paren {
            f.write_char('(')?;
        }

        // the leading term is printed first
        for (i, t) in (0..p.nterms()).rev().enumerate() {
            let coefficient = &p.coefficients[t];
            let exponents = p.exponents(t);
            let has_vars = exponents.iter().any(|e| !e.is_zero());

            let coeff_state = PrintState {
                in_sum: i > 0,
                in_product: has_vars,
                in_exp: false,
            };

            if has_vars && p.ring.is_one(coefficient) {
                if i > 0 {
                    f.write_char('+')?;
                }
            } else if has_vars && p.ring.is_one(&p.ring.neg(coefficient)) {
                f.write_char('-')?;
            } else {
                p.ring
                    .format(coefficient, &self.opts, coeff_state, f)?;
                if has_vars {
                    f.write_char(self.opts.multiplication_operator)?;
                }
            }

            let mut first = true;
            for (vi, e) in exponents.iter().enumerate() {
                if e.is_zero() {
                    continue;
                }
                if !first {
                    f.write_char(self.opts.multiplication_operator)?;
                }
                first = false;

                self.write_variable(vi, f)?;
                if e.to_u64() != 1 {
                    if self.opts.caret_power {
                        write!(f, "^{}", e)?;
                    } else {
                        write!(f, "**{}", e)?;
                    }
                }
            }
        }

        if add_paren {
            f.write_char(')')?;
        }

        Ok(add_paren)
    }
}

impl<'a, F: Ring, E: Exponent, O: MonomialOrder> fmt::Display for PolynomialPrinter<'a, F, E, O> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut s = String::new();
        PolynomialPrinter {
            poly: self.poly,
            names: self.names,
            opts: self.opts.update_with_fmt(f),
            state: self.state,
        }
        .format(&mut s)?;
        f.write_str(&s)
    }
}
