//! Exposure profile types.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ContractError;

/// Net gamma exposure keyed by numeric strike (or grid price).
pub type ExposureMap = BTreeMap<Decimal, f64>;

/// Net exposure at one strike.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrikeExposure {
    /// Strike price.
    pub strike: Decimal,
    /// Signed net gamma exposure.
    pub gamma_exposure: f64,
}

impl StrikeExposure {
    /// Create a new strike exposure.
    #[must_use]
    pub const fn new(strike: Decimal, gamma_exposure: f64) -> Self {
        Self {
            strike,
            gamma_exposure,
        }
    }
}

/// How `maximum`/`minimum` are seeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtremaSeed {
    /// Baseline at zero: an all-negative profile reports `maximum = 0`.
    #[default]
    Zero,
    /// True signed extrema, seeded from the first entry.
    FirstObserved,
}

/// Counts of contracts that did not contribute normally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkipReport {
    /// Non-finite gamma.
    pub invalid_gamma: usize,
    /// Negative or non-finite open interest.
    pub invalid_open_interest: usize,
    /// Option type neither call nor put.
    pub unknown_type: usize,
    /// Outside the configured strike window.
    pub filtered: usize,
    /// Gamma beyond the sanity bound; strike kept at zero contribution.
    pub clamped: usize,
    /// Missing expiration or implied volatility (projection only).
    pub missing_inputs: usize,
    /// Expired as of the projection date (projection only).
    pub expired: usize,
}

impl SkipReport {
    /// Record a rejected contract.
    pub fn record(&mut self, error: &ContractError) {
        match error {
            ContractError::NonFiniteGamma { .. } => self.invalid_gamma += 1,
            ContractError::InvalidOpenInterest { .. } => self.invalid_open_interest += 1,
            ContractError::UnknownOptionType { .. } => self.unknown_type += 1,
        }
    }

    /// Contracts rejected as invalid input.
    #[must_use]
    pub const fn invalid(&self) -> usize {
        self.invalid_gamma + self.invalid_open_interest + self.unknown_type
    }

    /// Contracts that contributed nothing to the profile.
    #[must_use]
    pub const fn total_skipped(&self) -> usize {
        self.invalid() + self.filtered + self.missing_inputs + self.expired
    }

    /// Whether every contract contributed normally.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.total_skipped() == 0 && self.clamped == 0
    }
}

/// Result of an aggregation: the exposure map plus what was skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregationOutcome {
    /// Net exposure by strike.
    pub exposure: ExposureMap,
    /// Skipped contract counts.
    pub skipped: SkipReport,
}

impl AggregationOutcome {
    /// Consume the outcome, keeping only the map.
    #[must_use]
    pub fn into_map(self) -> ExposureMap {
        self.exposure
    }
}

/// Summary statistics over an exposure profile.
///
/// Produced once by [`summarize`](super::summarize) and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExposureStatistics {
    pub(crate) prices: Vec<StrikeExposure>,
    pub(crate) maximum: f64,
    pub(crate) minimum: f64,
    pub(crate) absolute_maximum: f64,
    pub(crate) absolute_minimum: f64,
    pub(crate) absolute_maximum_price: Decimal,
    pub(crate) absolute_minimum_price: Decimal,
    pub(crate) average_positive_exposure: f64,
    pub(crate) average_negative_exposure: f64,
    pub(crate) average_absolute_exposure: f64,
    pub(crate) weighted_average_positive_price: f64,
    pub(crate) weighted_average_negative_price: f64,
    pub(crate) weighted_average_absolute_price: f64,
    pub(crate) positive_exposure_total: f64,
    pub(crate) negative_exposure_total: f64,
}

impl Default for ExposureStatistics {
    fn default() -> Self {
        Self {
            prices: Vec::new(),
            maximum: 0.0,
            minimum: 0.0,
            absolute_maximum: 0.0,
            absolute_minimum: 0.0,
            absolute_maximum_price: Decimal::ZERO,
            absolute_minimum_price: Decimal::ZERO,
            average_positive_exposure: 0.0,
            average_negative_exposure: 0.0,
            average_absolute_exposure: 0.0,
            weighted_average_positive_price: 0.0,
            weighted_average_negative_price: 0.0,
            weighted_average_absolute_price: 0.0,
            positive_exposure_total: 0.0,
            negative_exposure_total: 0.0,
        }
    }
}

impl ExposureStatistics {
    /// Exposure series, ascending by numeric strike.
    #[must_use]
    pub fn prices(&self) -> &[StrikeExposure] {
        &self.prices
    }

    /// Largest signed exposure.
    #[must_use]
    pub const fn maximum(&self) -> f64 {
        self.maximum
    }

    /// Smallest signed exposure.
    #[must_use]
    pub const fn minimum(&self) -> f64 {
        self.minimum
    }

    /// Largest exposure magnitude.
    #[must_use]
    pub const fn absolute_maximum(&self) -> f64 {
        self.absolute_maximum
    }

    /// Smallest exposure magnitude.
    #[must_use]
    pub const fn absolute_minimum(&self) -> f64 {
        self.absolute_minimum
    }

    /// Strike carrying the largest magnitude.
    #[must_use]
    pub const fn absolute_maximum_price(&self) -> Decimal {
        self.absolute_maximum_price
    }

    /// Strike carrying the smallest magnitude.
    #[must_use]
    pub const fn absolute_minimum_price(&self) -> Decimal {
        self.absolute_minimum_price
    }

    /// Mean of the non-negative partition.
    #[must_use]
    pub const fn average_positive_exposure(&self) -> f64 {
        self.average_positive_exposure
    }

    /// Mean of the negative partition.
    #[must_use]
    pub const fn average_negative_exposure(&self) -> f64 {
        self.average_negative_exposure
    }

    /// Combined magnitude mean.
    #[must_use]
    pub const fn average_absolute_exposure(&self) -> f64 {
        self.average_absolute_exposure
    }

    /// Exposure-weighted strike of the non-negative partition.
    #[must_use]
    pub const fn weighted_average_positive_price(&self) -> f64 {
        self.weighted_average_positive_price
    }

    /// Exposure-weighted strike of the negative partition.
    #[must_use]
    pub const fn weighted_average_negative_price(&self) -> f64 {
        self.weighted_average_negative_price
    }

    /// Magnitude-weighted strike across both partitions.
    #[must_use]
    pub const fn weighted_average_absolute_price(&self) -> f64 {
        self.weighted_average_absolute_price
    }

    /// Sum of the non-negative partition.
    #[must_use]
    pub const fn positive_exposure_total(&self) -> f64 {
        self.positive_exposure_total
    }

    /// Sum of the negative partition.
    #[must_use]
    pub const fn negative_exposure_total(&self) -> f64 {
        self.negative_exposure_total
    }

    /// Net exposure across all strikes.
    #[must_use]
    pub fn net_exposure(&self) -> f64 {
        self.positive_exposure_total + self.negative_exposure_total
    }

    /// Whether the profile has no strikes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn default_statistics_are_zero() {
        let stats = ExposureStatistics::default();
        assert!(stats.is_empty());
        assert_eq!(stats.maximum(), 0.0);
        assert_eq!(stats.absolute_minimum_price(), Decimal::ZERO);
        assert_eq!(stats.net_exposure(), 0.0);
    }

    #[test]
    fn skip_report_counts() {
        let mut report = SkipReport::default();
        assert!(report.is_clean());

        report.record(&ContractError::NonFiniteGamma {
            strike: dec!(1),
            gamma: f64::NAN,
        });
        report.record(&ContractError::UnknownOptionType {
            value: "x".to_string(),
        });
        report.filtered += 2;
        report.clamped += 1;

        assert_eq!(report.invalid(), 2);
        assert_eq!(report.total_skipped(), 4);
        assert!(!report.is_clean());
    }

    #[test]
    fn extrema_seed_serde() {
        let seed: ExtremaSeed = serde_json::from_str("\"first_observed\"").unwrap();
        assert_eq!(seed, ExtremaSeed::FirstObserved);
        assert_eq!(ExtremaSeed::default(), ExtremaSeed::Zero);
    }

    #[test]
    fn statistics_serialize_camel_case() {
        let stats = ExposureStatistics {
            prices: vec![StrikeExposure::new(dec!(100), 0.5)],
            ..Default::default()
        };
        let value = serde_json::to_value(&stats).unwrap();

        assert_eq!(value["prices"][0]["gammaExposure"], 0.5);
        assert!(value.get("absoluteMaximum").is_some());
        assert!(value.get("weightedAverageAbsolutePrice").is_some());
    }
}
