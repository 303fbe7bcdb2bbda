//! Underlying price grid for the projected profile.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::ProjectionError;

/// Build the inclusive price grid from `floor(min)` to `max` in `step` increments.
///
/// # Errors
///
/// Returns a `ProjectionError` if `step` is not a positive finite number,
/// `min > max`, or the grid would exceed `limit` points.
pub fn price_grid(
    min: Decimal,
    max: Decimal,
    step: f64,
    limit: usize,
) -> Result<Vec<Decimal>, ProjectionError> {
    let invalid_step = || ProjectionError::InvalidStep { step };

    if !step.is_finite() || step <= 0.0 {
        return Err(invalid_step());
    }
    let step_dec = Decimal::try_from(step).map_err(|_| invalid_step())?;
    if step_dec <= Decimal::ZERO {
        return Err(invalid_step());
    }

    if min > max {
        return Err(ProjectionError::EmptyWindow { min, max });
    }

    let start = min.floor();
    let points = (max - start)
        .checked_div(step_dec)
        .and_then(|steps| steps.floor().to_u64())
        .and_then(|steps| steps.checked_add(1))
        .ok_or_else(invalid_step)?;

    if points > limit as u64 {
        return Err(ProjectionError::GridTooLarge { points, limit });
    }

    Ok((0..points)
        .map(|i| start + step_dec * Decimal::from(i))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn grid_starts_at_floor_of_min() {
        let grid = price_grid(dec!(99.7), dec!(101), 0.5, 100).unwrap();
        assert_eq!(grid, vec![dec!(99), dec!(99.5), dec!(100), dec!(100.5), dec!(101)]);
    }

    #[test]
    fn grid_stops_at_or_below_max() {
        let grid = price_grid(dec!(10), dec!(11.2), 0.5, 100).unwrap();
        assert_eq!(grid.last().copied(), Some(dec!(11)));
    }

    #[test]
    fn single_point_grid() {
        let grid = price_grid(dec!(50), dec!(50), 1.0, 1).unwrap();
        assert_eq!(grid, vec![dec!(50)]);
    }

    #[test]
    fn invalid_steps_are_rejected() {
        for step in [0.0, -0.5, f64::NAN, f64::INFINITY] {
            let err = price_grid(dec!(1), dec!(2), step, 100).unwrap_err();
            assert!(matches!(err, ProjectionError::InvalidStep { .. }));
        }
    }

    #[test]
    fn inverted_window_is_rejected() {
        let err = price_grid(dec!(5), dec!(4), 0.5, 100).unwrap_err();
        assert_eq!(
            err,
            ProjectionError::EmptyWindow {
                min: dec!(5),
                max: dec!(4)
            }
        );
    }

    #[test]
    fn grid_limit_is_enforced() {
        let err = price_grid(dec!(0), dec!(100), 0.5, 200).unwrap_err();
        assert_eq!(
            err,
            ProjectionError::GridTooLarge {
                points: 201,
                limit: 200
            }
        );
        assert!(price_grid(dec!(0), dec!(100), 0.5, 201).is_ok());
    }
}
