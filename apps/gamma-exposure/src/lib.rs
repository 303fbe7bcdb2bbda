// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::needless_collect,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! Gamma Exposure - Rust Core Library
//!
//! Derives a per-strike net gamma exposure profile from an options chain,
//! plus the summary statistics a dashboard renders.
//!
//! # Data flow
//!
//! `contracts[] → strike→exposure map → ExposureStatistics`
//!
//! - `contract`: canonical `OptionContract` record and validation
//! - `exposure`: aggregation and statistics stages (pure, stateless)
//! - `projection`: Black-Scholes gamma projected onto a price grid
//! - `engine`: facade producing an `ExposureReport`
//! - `config`: YAML configuration with env interpolation
//! - `telemetry`: tracing subscriber setup
//!
//! # Example
//!
//! ```rust
//! use gamma_exposure::{OptionContract, aggregate, summarize};
//! use rust_decimal::Decimal;
//!
//! let contracts = vec![
//!     OptionContract::call(Decimal::new(100, 0), 0.01, 200.0),
//!     OptionContract::put(Decimal::new(100, 0), 0.015, 100.0),
//!     OptionContract::call(Decimal::new(105, 0), 0.02, 50.0),
//! ];
//!
//! let outcome = aggregate(&contracts);
//! let stats = summarize(&outcome.exposure);
//!
//! assert_eq!(stats.prices().len(), 2);
//! assert!((stats.maximum() - 1.0).abs() < 1e-9);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

/// Configuration loading and validation.
pub mod config;

/// Option contract value object.
pub mod contract;

/// Gamma exposure engine facade.
pub mod engine;

/// Error types.
pub mod error;

/// Aggregation and statistics stages.
pub mod exposure;

/// Projected gamma profile.
pub mod projection;

/// Tracing subscriber setup.
pub mod telemetry;

pub use config::{EngineConfig, load_config, load_config_from_string};
pub use contract::{ContractRecord, OptionContract, OptionType};
pub use engine::{ExposureMode, ExposureReport, GammaExposureEngine};
pub use error::{ContractError, GammaExposureError, ProjectionError};
pub use exposure::{
    AggregationOutcome, Aggregator, ExposureMap, ExposureStatistics, ExtremaSeed, SkipReport,
    StrikeExposure, aggregate, summarize, summarize_with,
};
pub use projection::GammaProjector;
