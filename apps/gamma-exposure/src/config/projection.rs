//! Projected gamma profile configuration.

use serde::{Deserialize, Serialize};

/// Price grid and model parameters for the projected profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Distance between grid prices.
    #[serde(default = "default_price_step")]
    pub price_step: f64,
    /// Risk-free rate (annualized) used in the Black-Scholes gamma.
    #[serde(default)]
    pub risk_free_rate: f64,
    /// Upper bound on grid size.
    #[serde(default = "default_max_grid_points")]
    pub max_grid_points: usize,
    /// Grid size at which points are evaluated in parallel.
    #[serde(default = "default_min_parallel_points")]
    pub min_parallel_points: usize,
    /// Model gamma magnitude above which a grid point gets no contribution.
    #[serde(default = "default_max_abs_gamma")]
    pub max_abs_gamma: Option<f64>,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            price_step: default_price_step(),
            risk_free_rate: 0.0,
            max_grid_points: default_max_grid_points(),
            min_parallel_points: default_min_parallel_points(),
            max_abs_gamma: default_max_abs_gamma(),
        }
    }
}

const fn default_price_step() -> f64 {
    0.5
}

const fn default_max_grid_points() -> usize {
    100_000
}

const fn default_min_parallel_points() -> usize {
    64
}

#[allow(clippy::unnecessary_wraps)]
const fn default_max_abs_gamma() -> Option<f64> {
    Some(1.0)
}
