//! Error types for the gamma exposure engine.
//!
//! Invalid contracts never abort an aggregation: they are counted in a
//! [`SkipReport`](crate::exposure::SkipReport) and the batch continues.
//! The errors here are returned by the fallible edges of the crate
//! (contract normalization, projection grids, configuration and
//! subscriber setup).

use rust_decimal::Decimal;
use thiserror::Error;

use crate::config::ConfigError;
use crate::telemetry::TelemetryError;

/// Reasons a single option contract is rejected.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ContractError {
    /// Gamma is NaN or infinite.
    #[error("Non-finite gamma {gamma} at strike {strike}")]
    NonFiniteGamma {
        /// Strike of the rejected contract.
        strike: Decimal,
        /// Offending gamma value.
        gamma: f64,
    },

    /// Open interest is negative, NaN or infinite.
    #[error("Invalid open interest {open_interest} at strike {strike}")]
    InvalidOpenInterest {
        /// Strike of the rejected contract.
        strike: Decimal,
        /// Offending open interest value.
        open_interest: f64,
    },

    /// Option type is neither call nor put.
    #[error("Unrecognized option type: {value:?}")]
    UnknownOptionType {
        /// The raw type string.
        value: String,
    },
}

/// Errors from building a projected gamma profile.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProjectionError {
    /// Price step is zero, negative or not representable.
    #[error("Invalid price step: {step}")]
    InvalidStep {
        /// The configured step.
        step: f64,
    },

    /// The price grid exceeds the configured point budget.
    #[error("Price grid of {points} points exceeds limit of {limit}")]
    GridTooLarge {
        /// Points the grid would contain.
        points: u64,
        /// Configured maximum.
        limit: usize,
    },

    /// The lower grid bound lies above the upper bound.
    #[error("Empty price window: {min} > {max}")]
    EmptyWindow {
        /// Lower bound.
        min: Decimal,
        /// Upper bound.
        max: Decimal,
    },
}

/// Top-level error for the crate.
#[derive(Debug, Error)]
pub enum GammaExposureError {
    /// Contract normalization failed.
    #[error(transparent)]
    Contract(#[from] ContractError),

    /// Projection could not be built.
    #[error(transparent)]
    Projection(#[from] ProjectionError),

    /// Configuration could not be loaded or validated.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Tracing subscriber setup failed.
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
}

/// Convenience result alias.
pub type Result<T> = std::result::Result<T, GammaExposureError>;
