//! Gamma exposure engine.
//!
//! Wires the aggregation, projection and statistics stages behind one
//! immutable facade and stamps the result into an [`ExposureReport`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::config::{EngineConfig, load_config};
use crate::contract::{ContractRecord, OptionContract};
use crate::error::{GammaExposureError, ProjectionError};
use crate::exposure::{
    AggregationOutcome, Aggregator, ExposureStatistics, SkipReport, summarize_with,
};
use crate::projection::GammaProjector;

/// Which profile to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExposureMode {
    /// Broker-supplied gamma, netted per strike.
    #[default]
    ByStrike,
    /// Model gamma projected onto a grid of underlying prices.
    Projected,
}

impl std::fmt::Display for ExposureMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ByStrike => write!(f, "by_strike"),
            Self::Projected => write!(f, "projected"),
        }
    }
}

/// Statistics for one symbol, with provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExposureReport {
    symbol: String,
    generated_at: DateTime<Utc>,
    mode: ExposureMode,
    skipped: SkipReport,
    statistics: ExposureStatistics,
}

impl ExposureReport {
    /// Create a report stamped with the current time.
    #[must_use]
    pub fn new(
        symbol: impl Into<String>,
        mode: ExposureMode,
        skipped: SkipReport,
        statistics: ExposureStatistics,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            generated_at: Utc::now(),
            mode,
            skipped,
            statistics,
        }
    }

    /// Get the underlying symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Get the generation timestamp.
    #[must_use]
    pub const fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    /// Get the profile mode.
    #[must_use]
    pub const fn mode(&self) -> ExposureMode {
        self.mode
    }

    /// Get the skipped contract counts.
    #[must_use]
    pub const fn skipped(&self) -> &SkipReport {
        &self.skipped
    }

    /// Get the statistics.
    #[must_use]
    pub const fn statistics(&self) -> &ExposureStatistics {
        &self.statistics
    }

    /// Serialize to JSON for API consumers.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Immutable facade over the exposure stages.
#[derive(Debug, Clone, Default)]
pub struct GammaExposureEngine {
    config: EngineConfig,
    aggregator: Aggregator,
    projector: GammaProjector,
}

impl GammaExposureEngine {
    /// Create an engine from configuration.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let aggregator = Aggregator::new(config.aggregation.clone());
        let projector = GammaProjector::new(config.aggregation.clone(), config.projection.clone());
        Self {
            config,
            aggregator,
            projector,
        }
    }

    /// Create an engine from a YAML configuration file.
    ///
    /// `None` reads `gamma-exposure.yaml` from the working directory.
    ///
    /// # Errors
    ///
    /// Returns a `GammaExposureError` if the file cannot be read, parsed, or validated.
    pub fn from_config_file(path: Option<&str>) -> Result<Self, GammaExposureError> {
        let config = load_config(path)?;
        Ok(Self::new(config))
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Per-strike profile from the contracts' own gamma.
    #[instrument(skip_all, fields(symbol = %symbol, contracts = contracts.len()))]
    pub fn by_strike(&self, symbol: &str, contracts: &[OptionContract]) -> ExposureReport {
        let outcome = self.aggregator.aggregate(contracts);
        self.report(symbol, ExposureMode::ByStrike, outcome)
    }

    /// Per-strike profile from loosely typed records.
    #[instrument(skip_all, fields(symbol = %symbol, records = records.len()))]
    pub fn by_strike_records(&self, symbol: &str, records: &[ContractRecord]) -> ExposureReport {
        let outcome = self.aggregator.aggregate_records(records);
        self.report(symbol, ExposureMode::ByStrike, outcome)
    }

    /// Projected profile over the underlying price grid.
    ///
    /// # Errors
    ///
    /// Returns a `ProjectionError` if the configured grid is invalid or too large.
    #[instrument(skip_all, fields(symbol = %symbol, contracts = contracts.len(), %as_of))]
    pub fn projected(
        &self,
        symbol: &str,
        contracts: &[OptionContract],
        as_of: NaiveDate,
    ) -> Result<ExposureReport, ProjectionError> {
        let outcome = self.projector.project(contracts, as_of)?;
        Ok(self.report(symbol, ExposureMode::Projected, outcome))
    }

    /// Compute the profile for the requested mode.
    ///
    /// # Errors
    ///
    /// Returns a `ProjectionError` for an invalid projection grid.
    pub fn compute(
        &self,
        symbol: &str,
        contracts: &[OptionContract],
        mode: ExposureMode,
        as_of: NaiveDate,
    ) -> Result<ExposureReport, ProjectionError> {
        match mode {
            ExposureMode::ByStrike => Ok(self.by_strike(symbol, contracts)),
            ExposureMode::Projected => self.projected(symbol, contracts, as_of),
        }
    }

    fn report(
        &self,
        symbol: &str,
        mode: ExposureMode,
        outcome: AggregationOutcome,
    ) -> ExposureReport {
        let statistics = summarize_with(&outcome.exposure, self.config.statistics.extrema_seed);
        info!(
            %mode,
            strikes = statistics.prices().len(),
            skipped = outcome.skipped.total_skipped(),
            net_exposure = statistics.net_exposure(),
            "Gamma exposure computed"
        );
        ExposureReport::new(symbol, mode, outcome.skipped, statistics)
    }
}
