//! Projected gamma profile.
//!
//! Instead of the broker-supplied gamma at each strike, every contract's
//! Black-Scholes gamma is evaluated at a grid of hypothetical underlying
//! prices. The result is an exposure map keyed by grid price that feeds
//! the same statistics stage as the per-strike profile.

pub mod black_scholes;
mod grid;

use chrono::NaiveDate;
use rayon::prelude::*;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::config::{AggregationConfig, ProjectionConfig};
use crate::contract::OptionContract;
use crate::error::ProjectionError;
use crate::exposure::{AggregationOutcome, ExposureMap, SkipReport, finite_or_zero, strike_value};

use black_scholes::DAYS_PER_YEAR;
pub use grid::price_grid;

/// Contract inputs resolved for the model.
#[derive(Debug, Clone, Copy)]
struct ProjectedLeg {
    strike: f64,
    years: f64,
    sigma: f64,
    open_interest: f64,
    sign: f64,
}

impl ProjectedLeg {
    fn exposure_at(&self, spot: f64, rate: f64, max_abs_gamma: Option<f64>) -> f64 {
        let gamma = black_scholes::gamma(spot, self.strike, self.years, rate, self.sigma);
        if !gamma.is_finite() || max_abs_gamma.is_some_and(|bound| gamma.abs() > bound) {
            return 0.0;
        }
        gamma * self.open_interest * self.sign
    }
}

/// Builds exposure profiles over a grid of underlying prices.
#[derive(Debug, Clone, Default)]
pub struct GammaProjector {
    aggregation: AggregationConfig,
    config: ProjectionConfig,
}

impl GammaProjector {
    /// Create a projector.
    #[must_use]
    pub const fn new(aggregation: AggregationConfig, config: ProjectionConfig) -> Self {
        Self {
            aggregation,
            config,
        }
    }

    /// Project the chain's gamma onto the price grid as of `as_of`.
    ///
    /// The grid spans the configured strike window, defaulting to the lowest
    /// and highest strike of the usable contracts.
    ///
    /// # Errors
    ///
    /// Returns a `ProjectionError` if the grid step is invalid or the grid
    /// exceeds `max_grid_points`.
    pub fn project(
        &self,
        contracts: &[OptionContract],
        as_of: NaiveDate,
    ) -> Result<AggregationOutcome, ProjectionError> {
        let mut skipped = SkipReport::default();
        let mut legs = Vec::with_capacity(contracts.len());
        let mut lowest: Option<Decimal> = None;
        let mut highest: Option<Decimal> = None;

        for contract in contracts {
            if let Err(e) = contract.validate() {
                skipped.record(&e);
                continue;
            }
            let (Some(expiration), Some(sigma)) = (contract.expiration, contract.implied_volatility)
            else {
                skipped.missing_inputs += 1;
                continue;
            };
            if !sigma.is_finite() || sigma <= 0.0 {
                skipped.missing_inputs += 1;
                continue;
            }
            let days = expiration.signed_duration_since(as_of).num_days();
            if days <= 0 {
                skipped.expired += 1;
                continue;
            }

            lowest = Some(lowest.map_or(contract.strike, |low| low.min(contract.strike)));
            highest = Some(highest.map_or(contract.strike, |high| high.max(contract.strike)));
            legs.push(ProjectedLeg {
                strike: strike_value(contract.strike),
                years: days as f64 / DAYS_PER_YEAR,
                sigma,
                open_interest: contract.open_interest,
                sign: contract.option_type.exposure_sign(),
            });
        }

        if skipped.total_skipped() > 0 {
            warn!(
                invalid = skipped.invalid(),
                missing_inputs = skipped.missing_inputs,
                expired = skipped.expired,
                "Skipped {} contracts for projection",
                skipped.total_skipped()
            );
        }

        let (Some(lowest), Some(highest)) = (lowest, highest) else {
            return Ok(AggregationOutcome {
                exposure: ExposureMap::new(),
                skipped,
            });
        };

        let min = self.aggregation.min_strike.unwrap_or(lowest);
        let max = self.aggregation.max_strike.unwrap_or(highest);
        let grid = price_grid(min, max, self.config.price_step, self.config.max_grid_points)?;

        let rate = self.config.risk_free_rate;
        let max_abs_gamma = self.config.max_abs_gamma;
        let point = |price: &Decimal| {
            let spot = strike_value(*price);
            let total: f64 = legs
                .iter()
                .map(|leg| leg.exposure_at(spot, rate, max_abs_gamma))
                .sum();
            (*price, finite_or_zero(total))
        };

        let parallel = grid.len() >= self.config.min_parallel_points;
        let exposure: ExposureMap = if parallel {
            grid.par_iter().map(point).collect::<Vec<_>>().into_iter().collect()
        } else {
            grid.iter().map(point).collect()
        };

        debug!(
            legs = legs.len(),
            points = exposure.len(),
            parallel,
            "Projected gamma exposure onto price grid"
        );

        Ok(AggregationOutcome { exposure, skipped })
    }
}
