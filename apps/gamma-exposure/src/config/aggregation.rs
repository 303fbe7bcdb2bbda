//! Aggregation stage configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Filters applied while aggregating contracts by strike.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregationConfig {
    /// Lowest strike kept (inclusive).
    #[serde(default)]
    pub min_strike: Option<Decimal>,
    /// Highest strike kept (inclusive).
    #[serde(default)]
    pub max_strike: Option<Decimal>,
    /// Gamma magnitude above which a contract contributes zero exposure.
    /// Unbounded unless set.
    #[serde(default)]
    pub max_abs_gamma: Option<f64>,
}

impl AggregationConfig {
    /// Restrict aggregation to an inclusive strike window.
    #[must_use]
    pub const fn with_strike_window(mut self, min: Option<Decimal>, max: Option<Decimal>) -> Self {
        self.min_strike = min;
        self.max_strike = max;
        self
    }

    /// Set or disable the gamma sanity bound.
    #[must_use]
    pub const fn with_max_abs_gamma(mut self, bound: Option<f64>) -> Self {
        self.max_abs_gamma = bound;
        self
    }

    /// Whether a strike lies inside the configured window.
    #[must_use]
    pub fn contains(&self, strike: Decimal) -> bool {
        self.min_strike.is_none_or(|min| strike >= min)
            && self.max_strike.is_none_or(|max| strike <= max)
    }

    /// Whether a gamma value passes the sanity bound.
    #[must_use]
    pub fn gamma_in_bounds(&self, gamma: f64) -> bool {
        self.max_abs_gamma.is_none_or(|bound| gamma.abs() <= bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn default_has_no_window() {
        let config = AggregationConfig::default();
        assert!(config.contains(dec!(0.5)));
        assert!(config.contains(dec!(100000)));
        assert_eq!(config.max_abs_gamma, None);
        assert!(config.gamma_in_bounds(1.5));
    }

    #[test]
    fn window_is_inclusive() {
        let config =
            AggregationConfig::default().with_strike_window(Some(dec!(100)), Some(dec!(110)));
        assert!(config.contains(dec!(100)));
        assert!(config.contains(dec!(110)));
        assert!(!config.contains(dec!(99.5)));
        assert!(!config.contains(dec!(110.5)));
    }

    #[test]
    fn gamma_bound() {
        let config = AggregationConfig::default().with_max_abs_gamma(Some(1.0));
        assert!(config.gamma_in_bounds(1.0));
        assert!(config.gamma_in_bounds(-0.3));
        assert!(!config.gamma_in_bounds(1.5));

        let unbounded = config.with_max_abs_gamma(None);
        assert!(unbounded.gamma_in_bounds(25.0));
    }
}
