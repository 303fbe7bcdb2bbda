//! Black-Scholes gamma.

// Black-Scholes uses standard mathematical notation (s, k, t, r, sigma)
#![allow(clippy::many_single_char_names)]
#![allow(clippy::suboptimal_flops)]

use std::f64::consts::PI;

/// Days per year used to annualize time to expiration.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Standard normal PDF (probability density function).
fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// Black-Scholes d1 parameter.
fn d1(s: f64, k: f64, t: f64, r: f64, sigma: f64) -> f64 {
    ((s / k).ln() + (r + 0.5 * sigma * sigma) * t) / (sigma * t.sqrt())
}

/// Black-Scholes gamma (same for calls and puts).
///
/// # Arguments
///
/// * `s` - Underlying price
/// * `k` - Strike price
/// * `t` - Time to expiration (years)
/// * `r` - Risk-free rate (annualized)
/// * `sigma` - Volatility (annualized)
///
/// Degenerate inputs (zero price, zero time) produce NaN or infinity; callers
/// decide how to treat those.
#[must_use]
pub fn gamma(s: f64, k: f64, t: f64, r: f64, sigma: f64) -> f64 {
    norm_pdf(d1(s, k, t, r, sigma)) / (s * sigma * t.sqrt())
}
