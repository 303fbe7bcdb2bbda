//! Numeric helpers shared by the aggregation and statistics stages.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Divide, resolving a zero denominator or non-finite quotient to 0.
pub fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    let quotient = numerator / denominator;
    if quotient.is_finite() { quotient } else { 0.0 }
}

/// Partition count clamped to at least one, as a divisor.
pub fn clamped_count(count: usize) -> f64 {
    count.max(1) as f64
}

/// Strike as `f64` for weighting.
pub fn strike_value(strike: Decimal) -> f64 {
    strike.to_f64().unwrap_or(0.0)
}

/// Replace a non-finite value with 0.
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_safe_div() {
        assert_eq!(safe_div(10.0, 4.0), 2.5);
        assert_eq!(safe_div(10.0, 0.0), 0.0);
        assert_eq!(safe_div(0.0, 0.0), 0.0);
        assert_eq!(safe_div(-3.0, -0.0), 0.0);
        assert_eq!(safe_div(f64::MAX, f64::MIN_POSITIVE), 0.0);
    }

    #[test]
    fn test_clamped_count() {
        assert_eq!(clamped_count(0), 1.0);
        assert_eq!(clamped_count(1), 1.0);
        assert_eq!(clamped_count(7), 7.0);
    }

    #[test]
    fn test_strike_value() {
        assert_eq!(strike_value(dec!(502.5)), 502.5);
        assert_eq!(strike_value(Decimal::ZERO), 0.0);
    }

    #[test]
    fn test_finite_or_zero() {
        assert_eq!(finite_or_zero(1.5), 1.5);
        assert_eq!(finite_or_zero(f64::NAN), 0.0);
        assert_eq!(finite_or_zero(f64::NEG_INFINITY), 0.0);
    }
}
