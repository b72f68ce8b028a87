//! Tunable parameters of the gcd and factorization engines.

use serde::{Deserialize, Serialize};

/// The algorithm used to compute the gcd of univariate images.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GcdAlgorithm {
    /// Euclidean remainder sequence on primitive parts.
    PrimitivePrs,
    /// Subresultant pseudo-remainder sequence.
    SubresultantPrs,
    /// Images modulo word-sized primes, combined with the Chinese remainder theorem.
    /// Only available for integer and rational coefficients.
    Modular,
}

/// Settings for the gcd engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GcdSettings {
    /// Overrides the algorithm preferred by the coefficient ring.
    pub algorithm: Option<GcdAlgorithm>,
    /// The number of unlucky primes (primes dividing the leading coefficients or
    /// yielding an image of too high degree) that are tolerated before the modular
    /// algorithm falls back to the subresultant algorithm.
    pub max_unlucky_primes: usize,
    /// The total number of primes the modular algorithm may use.
    pub max_primes: usize,
}

impl Default for GcdSettings {
    fn default() -> Self {
        GcdSettings {
            algorithm: None,
            max_unlucky_primes: 6,
            max_primes: 80,
        }
    }
}

impl GcdSettings {
    pub fn with_algorithm(mut self, algorithm: GcdAlgorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    pub fn with_max_unlucky_primes(mut self, max_unlucky_primes: usize) -> Self {
        self.max_unlucky_primes = max_unlucky_primes;
        self
    }

    pub fn with_max_primes(mut self, max_primes: usize) -> Self {
        self.max_primes = max_primes;
        self
    }
}

/// Settings for the factorization driver.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactorSettings {
    /// Limit the size of the factor subsets that are tried during recombination.
    /// When the limit is reached, the remaining cofactor is returned as one factor.
    pub max_subset_size: Option<usize>,
    /// Use quadratic instead of linear Hensel lifting for two factors.
    pub quadratic_lifting: bool,
    /// Settings of the gcds computed during factorization.
    pub gcd: GcdSettings,
}

impl Default for FactorSettings {
    fn default() -> Self {
        FactorSettings {
            max_subset_size: None,
            quadratic_lifting: true,
            gcd: GcdSettings::default(),
        }
    }
}

impl FactorSettings {
    pub fn with_max_subset_size(mut self, size: usize) -> Self {
        self.max_subset_size = Some(size);
        self
    }

    pub fn with_quadratic_lifting(mut self, quadratic: bool) -> Self {
        self.quadratic_lifting = quadratic;
        self
    }

    pub fn with_gcd_settings(mut self, gcd: GcdSettings) -> Self {
        self.gcd = gcd;
        self
    }
}

#[cfg(test)]
mod test {
    use super::{FactorSettings, GcdAlgorithm, GcdSettings};

    #[test]
    fn deserialize_partial() {
        let s: GcdSettings = serde_json::from_str(r#"{"max_unlucky_primes": 2}"#).unwrap();
        assert_eq!(s.max_unlucky_primes, 2);
        assert_eq!(s.max_primes, GcdSettings::default().max_primes);
        assert_eq!(s.algorithm, None);
    }

    #[test]
    fn round_trip() {
        let s = FactorSettings::default()
            .with_max_subset_size(3)
            .with_gcd_settings(GcdSettings::default().with_algorithm(GcdAlgorithm::PrimitivePrs));
        let j = serde_json::to_string(&s).unwrap();
        let r: FactorSettings = serde_json::from_str(&j).unwrap();
        assert_eq!(r, s);
    }
}
