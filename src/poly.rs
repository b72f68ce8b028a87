//! Multivariate polynomials over generic coefficient rings and the algorithms
//! that operate on them: gcds, resultants, squarefree decomposition, Hensel
//! lifting and factorization.
pub mod factor;
pub mod gcd;
pub mod hensel;
pub mod monomial;
pub mod order;
pub mod polynomial;
pub mod resultant;
pub mod squarefree;
pub mod univariate;

use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::ops::{Add as OpAdd, AddAssign, Sub};
use std::sync::Arc;

use ahash::HashSet;
use smartstring::{LazyCompact, SmartString};

use crate::utils;

pub use order::{
    BlockOrder, GradedLexOrder, GrevLexOrder, InvGradedLexOrder, InvLexOrder, LexOrder,
    MonomialOrder, WeightedOrder,
};

/// The number of exponents that are stored inline before a monomial spills to the heap.
pub const INLINED_EXPONENTS: usize = 6;

/// An exponent of a variable in a monomial. Exponents can be stored in
/// `u8`, `u16`, `u32` or `u64`, trading memory for the maximal degree.
pub trait Exponent:
    Hash
    + Debug
    + Display
    + Ord
    + Sub<Output = Self>
    + OpAdd<Output = Self>
    + AddAssign
    + Clone
    + Copy
    + PartialEq
    + Eq
    + Default
    + Send
    + Sync
    + 'static
{
    fn zero() -> Self;
    fn one() -> Self;
    /// Convert the exponent to `u64`. This is always possible, as `u64` is the largest supported exponent type.
    fn to_u64(&self) -> u64;
    /// Convert from `u64`, returning `None` if the exponent does not fit.
    fn try_from_u64(n: u64) -> Option<Self>;
    fn is_zero(&self) -> bool;
    fn checked_add(&self, other: &Self) -> Option<Self>;
    fn checked_sub(&self, other: &Self) -> Option<Self>;
    fn gcd(&self, other: &Self) -> Self;

    /// Convert from `u64`. Panics if the exponent does not fit.
    #[inline]
    fn from_u64(n: u64) -> Self {
        match Self::try_from_u64(n) {
            Some(e) => e,
            None => panic!("Exponent {} does not fit in the exponent type", n),
        }
    }
}

macro_rules! impl_exponent {
    ($($t:ty),*) => {
        $(
        impl Exponent for $t {
            #[inline]
            fn zero() -> Self {
                0
            }

            #[inline]
            fn one() -> Self {
                1
            }

            #[inline]
            fn to_u64(&self) -> u64 {
                *self as u64
            }

            #[inline]
            fn try_from_u64(n: u64) -> Option<Self> {
                <$t>::try_from(n).ok()
            }

            #[inline]
            fn is_zero(&self) -> bool {
                *self == 0
            }

            #[inline]
            fn checked_add(&self, other: &Self) -> Option<Self> {
                <$t>::checked_add(*self, *other)
            }

            #[inline]
            fn checked_sub(&self, other: &Self) -> Option<Self> {
                <$t>::checked_sub(*self, *other)
            }

            #[inline]
            fn gcd(&self, other: &Self) -> Self {
                utils::gcd_unsigned(*self as u64, *other as u64) as Self
            }
        }
        )*
    };
}

impl_exponent!(u8, u16, u32, u64);

/// A variable of a polynomial ring.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Variable {
    Symbol(SmartString<LazyCompact>),
    Temporary(usize),
}

impl Variable {
    pub fn new(name: &str) -> Variable {
        Variable::Symbol(name.into())
    }
}

impl From<&str> for Variable {
    fn from(name: &str) -> Variable {
        Variable::new(name)
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Variable::Symbol(s) => f.write_str(s),
            Variable::Temporary(t) => write!(f, "_TMP_{}", t),
        }
    }
}

/// Create a shared variable list from names.
pub fn variables(names: &[&str]) -> Arc<Vec<Variable>> {
    Arc::new(names.iter().map(|n| Variable::new(n)).collect())
}

/// Hands out fresh variable names that do not collide with any name seen so far.
/// Algorithms that introduce auxiliary indeterminates take an allocator
/// as argument, so that the caller controls the naming scope.
#[derive(Clone, Debug, Default)]
pub struct NameAllocator {
    prefix: SmartString<LazyCompact>,
    used: HashSet<Variable>,
    counter: usize,
}

impl NameAllocator {
    pub fn new(prefix: &str) -> NameAllocator {
        NameAllocator {
            prefix: prefix.into(),
            used: HashSet::default(),
            counter: 0,
        }
    }

    /// Create an allocator that avoids the given variables.
    pub fn avoiding(prefix: &str, vars: &[Variable]) -> NameAllocator {
        let mut a = NameAllocator::new(prefix);
        a.reserve(vars);
        a
    }

    /// Mark variables as used.
    pub fn reserve(&mut self, vars: &[Variable]) {
        self.used.extend(vars.iter().cloned());
    }

    pub fn is_used(&self, var: &Variable) -> bool {
        self.used.contains(var)
    }

    /// Return a variable that has not been handed out or reserved before.
    pub fn fresh(&mut self) -> Variable {
        let prefix = if self.prefix.is_empty() {
            "t"
        } else {
            self.prefix.as_str()
        };

        loop {
            let v = Variable::new(&format!("{}{}", prefix, self.counter));
            self.counter += 1;
            if self.used.insert(v.clone()) {
                return v;
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Exponent, NameAllocator, Variable};

    #[test]
    fn exponent_widths() {
        assert_eq!(u8::try_from_u64(256), None);
        assert_eq!(u16::try_from_u64(256), Some(256));
        assert_eq!(u64::from_u64(1 << 40).to_u64(), 1 << 40);
        assert_eq!(Exponent::checked_sub(&5u8, &6), None);
        assert_eq!(12u32.gcd(&18), 6);
    }

    #[test]
    fn fresh_names() {
        let mut a = NameAllocator::avoiding("t", &[Variable::new("t0"), Variable::new("t2")]);
        assert_eq!(a.fresh(), Variable::new("t1"));
        assert_eq!(a.fresh(), Variable::new("t3"));
        assert!(a.is_used(&Variable::new("t2")));
        assert_eq!(Variable::Temporary(3).to_string(), "_TMP_3");
    }
}
