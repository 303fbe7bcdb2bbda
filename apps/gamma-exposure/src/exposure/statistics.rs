//! Statistics stage: exposure map to summary statistics.

use rust_decimal::Decimal;
use tracing::debug;

use super::math::{clamped_count, finite_or_zero, safe_div, strike_value};
use super::types::{ExposureMap, ExposureStatistics, ExtremaSeed, StrikeExposure};

/// Summarize an exposure map with zero-seeded extrema.
#[must_use]
pub fn summarize(exposure_by_strike: &ExposureMap) -> ExposureStatistics {
    summarize_with(exposure_by_strike, ExtremaSeed::Zero)
}

/// Summarize an exposure map with the given extrema policy.
#[must_use]
pub fn summarize_with(exposure_by_strike: &ExposureMap, seed: ExtremaSeed) -> ExposureStatistics {
    if exposure_by_strike.is_empty() {
        return ExposureStatistics::default();
    }

    // Pre-aggregated maps from callers may carry non-finite entries.
    let mut acc = Accumulator::new(seed);
    for (strike, exposure) in exposure_by_strike {
        acc.push(*strike, finite_or_zero(*exposure));
    }
    let stats = acc.finish(exposure_by_strike);

    debug!(
        strikes = stats.prices.len(),
        maximum = stats.maximum,
        minimum = stats.minimum,
        "Summarized gamma exposure"
    );

    stats
}

/// Running sums for the single pass over the map.
struct Accumulator {
    seed: ExtremaSeed,
    seeded: bool,
    positive_sum: f64,
    negative_sum: f64,
    positive_count: usize,
    negative_count: usize,
    weighted_positive_sum: f64,
    weighted_negative_sum: f64,
    maximum: f64,
    minimum: f64,
    absolute_maximum: f64,
    absolute_minimum: f64,
    absolute_maximum_price: Decimal,
    absolute_minimum_price: Decimal,
}

impl Accumulator {
    const fn new(seed: ExtremaSeed) -> Self {
        Self {
            seed,
            seeded: false,
            positive_sum: 0.0,
            negative_sum: 0.0,
            positive_count: 0,
            negative_count: 0,
            weighted_positive_sum: 0.0,
            weighted_negative_sum: 0.0,
            maximum: 0.0,
            minimum: 0.0,
            absolute_maximum: 0.0,
            absolute_minimum: f64::MAX,
            absolute_maximum_price: Decimal::ZERO,
            absolute_minimum_price: Decimal::ZERO,
        }
    }

    fn push(&mut self, strike: Decimal, exposure: f64) {
        let weighted = strike_value(strike) * exposure;
        if exposure >= 0.0 {
            self.positive_sum += exposure;
            self.weighted_positive_sum += weighted;
            self.positive_count += 1;
        } else {
            self.negative_sum += exposure;
            self.weighted_negative_sum += weighted;
            self.negative_count += 1;
        }

        if !self.seeded && self.seed == ExtremaSeed::FirstObserved {
            self.maximum = exposure;
            self.minimum = exposure;
        }
        self.seeded = true;
        self.maximum = self.maximum.max(exposure);
        self.minimum = self.minimum.min(exposure);

        // Ties go to the later (higher) strike.
        let magnitude = exposure.abs();
        if magnitude >= self.absolute_maximum {
            self.absolute_maximum = magnitude;
            self.absolute_maximum_price = strike;
        }
        if magnitude <= self.absolute_minimum {
            self.absolute_minimum = magnitude;
            self.absolute_minimum_price = strike;
        }
    }

    fn finish(self, exposure_by_strike: &ExposureMap) -> ExposureStatistics {
        let positive_count = clamped_count(self.positive_count);
        let negative_count = clamped_count(self.negative_count);

        let average_positive_exposure = self.positive_sum / positive_count;
        let average_negative_exposure = self.negative_sum / negative_count;
        let average_absolute_exposure =
            (self.positive_sum.abs() + self.negative_sum.abs()) / (positive_count + negative_count);

        let weighted_average_absolute_price = safe_div(
            self.weighted_positive_sum.abs() + self.weighted_negative_sum.abs(),
            self.positive_sum.abs() + self.negative_sum.abs(),
        );
        let weighted_average_positive_price =
            safe_div(self.weighted_positive_sum, self.positive_sum);
        let weighted_average_negative_price =
            safe_div(self.weighted_negative_sum, self.negative_sum);

        let mut prices: Vec<StrikeExposure> = exposure_by_strike
            .iter()
            .map(|(strike, exposure)| StrikeExposure::new(*strike, finite_or_zero(*exposure)))
            .collect();
        prices.sort_by(|a, b| a.strike.cmp(&b.strike));

        ExposureStatistics {
            prices,
            maximum: self.maximum,
            minimum: self.minimum,
            absolute_maximum: self.absolute_maximum,
            absolute_minimum: self.absolute_minimum,
            absolute_maximum_price: self.absolute_maximum_price,
            absolute_minimum_price: self.absolute_minimum_price,
            average_positive_exposure,
            average_negative_exposure,
            average_absolute_exposure,
            weighted_average_positive_price,
            weighted_average_negative_price,
            weighted_average_absolute_price,
            positive_exposure_total: self.positive_sum,
            negative_exposure_total: self.negative_sum,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const EPS: f64 = 1e-9;

    fn map(entries: &[(Decimal, f64)]) -> ExposureMap {
        entries.iter().copied().collect()
    }

    #[test]
    fn empty_map_yields_zero_statistics() {
        let stats = summarize(&ExposureMap::new());

        assert!(stats.prices().is_empty());
        assert_eq!(stats.maximum(), 0.0);
        assert_eq!(stats.minimum(), 0.0);
        assert_eq!(stats.absolute_maximum(), 0.0);
        assert_eq!(stats.absolute_minimum(), 0.0);
        assert_eq!(stats.average_absolute_exposure(), 0.0);
        assert_eq!(stats.weighted_average_absolute_price(), 0.0);
    }

    #[test]
    fn reference_scenario() {
        let stats = summarize(&map(&[(dec!(100), 0.5), (dec!(105), 1.0)]));

        assert!((stats.maximum() - 1.0).abs() < EPS);
        assert_eq!(stats.minimum(), 0.0);
        assert!((stats.absolute_maximum() - 1.0).abs() < EPS);
        assert_eq!(stats.absolute_maximum_price(), dec!(105));
        assert!((stats.absolute_minimum() - 0.5).abs() < EPS);
        assert_eq!(stats.absolute_minimum_price(), dec!(100));
        assert!((stats.average_positive_exposure() - 0.75).abs() < EPS);
        assert_eq!(stats.average_negative_exposure(), 0.0);
        // (1.5 + 0) / (2 + 1)
        assert!((stats.average_absolute_exposure() - 1.5 / 3.0).abs() < EPS);
        // (100*0.5 + 105*1.0) / 1.5
        assert!((stats.weighted_average_positive_price() - 155.0 / 1.5).abs() < EPS);
        assert_eq!(stats.weighted_average_negative_price(), 0.0);
        assert!((stats.weighted_average_absolute_price() - 155.0 / 1.5).abs() < EPS);

        let strikes: Vec<Decimal> = stats.prices().iter().map(|p| p.strike).collect();
        assert_eq!(strikes, vec![dec!(100), dec!(105)]);
    }

    #[test]
    fn mixed_partitions() {
        let stats = summarize(&map(&[
            (dec!(90), -2.0),
            (dec!(95), -1.0),
            (dec!(100), 0.0),
            (dec!(105), 3.0),
        ]));

        assert!((stats.maximum() - 3.0).abs() < EPS);
        assert!((stats.minimum() + 2.0).abs() < EPS);
        assert!((stats.positive_exposure_total() - 3.0).abs() < EPS);
        assert!((stats.negative_exposure_total() + 3.0).abs() < EPS);
        // zero exposure falls in the positive partition: 3.0 / 2
        assert!((stats.average_positive_exposure() - 1.5).abs() < EPS);
        assert!((stats.average_negative_exposure() + 1.5).abs() < EPS);
        assert!((stats.average_absolute_exposure() - 6.0 / 4.0).abs() < EPS);
        // (90*-2 + 95*-1) / -3
        assert!((stats.weighted_average_negative_price() - 275.0 / 3.0).abs() < EPS);
        assert!((stats.weighted_average_positive_price() - 105.0).abs() < EPS);
        assert!((stats.weighted_average_absolute_price() - 590.0 / 6.0).abs() < EPS);
        assert_eq!(stats.absolute_minimum_price(), dec!(100));
        assert!((stats.net_exposure()).abs() < EPS);
    }

    #[test]
    fn all_negative_keeps_zero_maximum() {
        let stats = summarize(&map(&[(dec!(10), -4.0), (dec!(20), -1.0)]));

        assert_eq!(stats.maximum(), 0.0);
        assert!((stats.minimum() + 4.0).abs() < EPS);
        assert_eq!(stats.average_positive_exposure(), 0.0);
        assert_eq!(stats.weighted_average_positive_price(), 0.0);
    }

    #[test]
    fn first_observed_seed_gives_true_extrema() {
        let negatives = map(&[(dec!(10), -4.0), (dec!(20), -1.0)]);
        let stats = summarize_with(&negatives, ExtremaSeed::FirstObserved);
        assert!((stats.maximum() + 1.0).abs() < EPS);
        assert!((stats.minimum() + 4.0).abs() < EPS);

        let positives = map(&[(dec!(10), 2.0), (dec!(20), 5.0)]);
        let stats = summarize_with(&positives, ExtremaSeed::FirstObserved);
        assert!((stats.minimum() - 2.0).abs() < EPS);
        assert!((stats.maximum() - 5.0).abs() < EPS);

        let empty = summarize_with(&ExposureMap::new(), ExtremaSeed::FirstObserved);
        assert_eq!(empty.maximum(), 0.0);
    }

    #[test]
    fn zero_sum_partitions_resolve_to_zero() {
        let stats = summarize(&map(&[(dec!(100), 0.0), (dec!(105), 0.0)]));

        assert_eq!(stats.weighted_average_positive_price(), 0.0);
        assert_eq!(stats.weighted_average_negative_price(), 0.0);
        assert_eq!(stats.weighted_average_absolute_price(), 0.0);
        assert_eq!(stats.absolute_maximum_price(), dec!(105));
    }

    #[test]
    fn non_finite_entries_count_as_zero() {
        let stats = summarize(&map(&[(dec!(100), f64::NAN), (dec!(105), f64::INFINITY)]));

        assert_eq!(stats.maximum(), 0.0);
        assert_eq!(stats.prices()[0].gamma_exposure, 0.0);
        assert_eq!(stats.prices()[1].gamma_exposure, 0.0);
        assert!(stats.weighted_average_absolute_price().is_finite());
    }

    #[test]
    fn prices_sort_numerically() {
        let strikes = ["500", "50", "5000", "75.5"];
        let exposure: ExposureMap = strikes
            .iter()
            .map(|s| (s.parse::<Decimal>().unwrap(), 1.0))
            .collect();
        let stats = summarize(&exposure);

        let sorted: Vec<String> = stats.prices().iter().map(|p| p.strike.to_string()).collect();
        assert_eq!(sorted, vec!["50", "75.5", "500", "5000"]);
    }
}
