//! Aggregation stage: contracts to net gamma exposure by strike.

use std::borrow::Borrow;

use tracing::{debug, warn};

use crate::config::AggregationConfig;
use crate::contract::{ContractRecord, OptionContract};
use crate::error::ContractError;

use super::types::{AggregationOutcome, ExposureMap, SkipReport};

/// Aggregate contracts with the default filters.
#[must_use]
pub fn aggregate(contracts: &[OptionContract]) -> AggregationOutcome {
    Aggregator::default().aggregate(contracts)
}

/// Reduces option contracts into a strike-to-exposure map.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    config: AggregationConfig,
}

impl Aggregator {
    /// Create an aggregator with the given filters.
    #[must_use]
    pub const fn new(config: AggregationConfig) -> Self {
        Self { config }
    }

    /// Get the aggregation filters.
    #[must_use]
    pub const fn config(&self) -> &AggregationConfig {
        &self.config
    }

    /// Aggregate typed contracts.
    ///
    /// Invalid contracts are skipped and counted; the batch never fails.
    #[must_use]
    pub fn aggregate(&self, contracts: &[OptionContract]) -> AggregationOutcome {
        self.fold(contracts.iter().map(|c| c.validate().map(|()| c)))
    }

    /// Aggregate loosely typed records, rejecting unknown option types.
    #[must_use]
    pub fn aggregate_records(&self, records: &[ContractRecord]) -> AggregationOutcome {
        self.fold(records.iter().map(OptionContract::try_from))
    }

    fn fold<I, C>(&self, contracts: I) -> AggregationOutcome
    where
        I: Iterator<Item = Result<C, ContractError>>,
        C: Borrow<OptionContract>,
    {
        let mut exposure = ExposureMap::new();
        let mut skipped = SkipReport::default();
        let mut accepted = 0usize;

        for contract in contracts {
            let contract = match contract {
                Ok(contract) => contract,
                Err(e) => {
                    debug!(error = %e, "Skipping invalid contract");
                    skipped.record(&e);
                    continue;
                }
            };
            let contract: &OptionContract = contract.borrow();

            if !self.config.contains(contract.strike) {
                skipped.filtered += 1;
                continue;
            }

            let contribution = if self.config.gamma_in_bounds(contract.gamma) {
                contract.gamma_exposure()
            } else {
                skipped.clamped += 1;
                0.0
            };

            *exposure.entry(contract.strike).or_insert(0.0) += contribution;
            accepted += 1;
        }

        if skipped.invalid() > 0 {
            warn!(
                invalid_gamma = skipped.invalid_gamma,
                invalid_open_interest = skipped.invalid_open_interest,
                unknown_type = skipped.unknown_type,
                "Skipped {} invalid contracts",
                skipped.invalid()
            );
        }

        debug!(
            accepted,
            strikes = exposure.len(),
            filtered = skipped.filtered,
            clamped = skipped.clamped,
            "Aggregated gamma exposure by strike"
        );

        AggregationOutcome { exposure, skipped }
    }
}
