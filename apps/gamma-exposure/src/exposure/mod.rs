//! Gamma exposure aggregation and statistics.
//!
//! Two pure stages:
//! - Aggregation: contracts to signed net exposure per strike
//! - Statistics: exposure map to extremes, partition averages and
//!   exposure-weighted prices, plus the strike-ordered chart series

mod aggregate;
mod math;
mod statistics;
mod types;

pub use aggregate::{Aggregator, aggregate};
pub use statistics::{summarize, summarize_with};
pub use types::{
    AggregationOutcome, ExposureMap, ExposureStatistics, ExtremaSeed, SkipReport, StrikeExposure,
};

pub(crate) use math::{finite_or_zero, strike_value};
