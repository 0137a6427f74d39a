//! Resampling of excitation IRFs onto the simulation time step.
//!
//! The convolution in `undina-core` sums over every lag sample, so the IRF
//! is moved once, at setup, onto a uniform grid matching the simulation
//! step. The six DOF rows are fitted together with one cubic B-spline
//! parameterised by normalised lag time, then evaluated on the new grid.

use ndarray::Array2;

use crate::error::HydroError;
use crate::excitation::ImpulseExcitation;
use crate::spline::BSpline;

/// Spline degree used for IRF resampling.
pub const RESAMPLE_DEGREE: usize = 3;

/// Relative slack applied before taking the ceiling of `span / dt`, so that
/// a step which divides the span exactly does not gain a spurious interval.
const CEIL_SLACK: f64 = 1e-9;

/// Uniform grid over `[t0, t1]` with `ceil((t1 - t0) / dt)` intervals.
///
/// Both end points are reproduced exactly; the spacing equals `dt` whenever
/// `dt` divides the span and is slightly smaller otherwise.
pub fn uniform_grid(t0: f64, t1: f64, dt: f64) -> Result<Vec<f64>, HydroError> {
    if !(dt > 0.0) || !dt.is_finite() {
        return Err(HydroError::InvalidStep(dt));
    }
    let span = t1 - t0;
    if span <= 0.0 {
        return Ok(vec![t0]);
    }
    let intervals = ((span / dt) * (1.0 - CEIL_SLACK)).ceil().max(1.0) as usize;
    let step = span / intervals as f64;
    let mut grid: Vec<f64> = (0..=intervals).map(|i| t0 + step * i as f64).collect();
    grid[intervals] = t1;
    Ok(grid)
}

/// Resample an IRF table onto a uniform grid of step `dt`.
///
/// The returned table spans the same `[t0, t1]` as the input, and its
/// integration widths are recomputed from the new grid.
pub fn resample(table: &ImpulseExcitation, dt: f64) -> Result<ImpulseExcitation, HydroError> {
    let (t0, t1) = table.support();
    let new_time = uniform_grid(t0, t1, dt)?;
    if table.len() < 2 {
        // Nothing to interpolate between; a single lag sample is kept as is.
        return ImpulseExcitation::new(table.time().to_vec(), table.values().to_owned());
    }

    let span = t1 - t0;
    let old_params: Vec<f64> = table.time().iter().map(|t| (t - t0) / span).collect();
    let spline = BSpline::interpolate(table.values(), RESAMPLE_DEGREE, &old_params)?;

    let rows = table.values().nrows();
    let mut values = Array2::<f64>::zeros((rows, new_time.len()));
    for (j, t) in new_time.iter().enumerate() {
        let point = spline.evaluate((t - t0) / span);
        values.column_mut(j).assign(&point);
    }

    log::debug!(
        "Resampled IRF from {} to {} samples over [{}, {}] (dt = {})",
        table.len(),
        new_time.len(),
        t0,
        t1,
        dt
    );

    ImpulseExcitation::new(new_time, values)
}

impl ImpulseExcitation {
    /// Replace this table with its resampled version (see [`resample`]).
    ///
    /// On error the table is left unchanged.
    pub fn resample_in_place(&mut self, dt: f64) -> Result<(), HydroError> {
        *self = resample(self, dt)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn sine_table(n: usize, t0: f64, t1: f64) -> ImpulseExcitation {
        let time: Vec<f64> = (0..n)
            .map(|i| t0 + (t1 - t0) * i as f64 / (n - 1) as f64)
            .collect();
        let values = Array2::from_shape_fn((6, n), |(d, j)| {
            (d as f64 + 1.0) * (0.5 * time[j]).sin()
        });
        ImpulseExcitation::new(time, values).unwrap()
    }

    #[test]
    fn test_uniform_grid_exact_division() {
        let grid = uniform_grid(-2.0, 2.0, 0.5).unwrap();
        assert_eq!(grid.len(), 9);
        assert_eq!(grid[0], -2.0);
        assert_eq!(grid[8], 2.0);
        for w in grid.windows(2) {
            assert_abs_diff_eq!(w[1] - w[0], 0.5, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_uniform_grid_rounds_count_up() {
        // 1.0 / 0.3 = 3.33 -> 4 intervals of 0.25
        let grid = uniform_grid(0.0, 1.0, 0.3).unwrap();
        assert_eq!(grid.len(), 5);
        assert_abs_diff_eq!(grid[1], 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_uniform_grid_rejects_non_positive_step() {
        assert!(matches!(uniform_grid(0.0, 1.0, 0.0), Err(HydroError::InvalidStep(_))));
        assert!(matches!(uniform_grid(0.0, 1.0, -0.1), Err(HydroError::InvalidStep(_))));
    }

    #[test]
    fn test_resample_preserves_endpoints_and_values() {
        let table = sine_table(41, -5.0, 5.0);
        let resampled = resample(&table, 0.1).unwrap();

        let time = resampled.time();
        assert_eq!(time[0], -5.0);
        assert_eq!(time[time.len() - 1], 5.0);
        assert_eq!(time.len(), 101);

        // Smooth data: the spline should match the analytic curve closely.
        for (j, &t) in time.iter().enumerate() {
            for d in 0..6 {
                let expected = (d as f64 + 1.0) * (0.5 * t).sin();
                assert_abs_diff_eq!(resampled.values()[[d, j]], expected, epsilon = 1e-4);
            }
        }
    }

    #[test]
    fn test_resample_recomputes_widths() {
        let table = sine_table(11, 0.0, 2.0);
        let resampled = resample(&table, 0.05).unwrap();
        let widths = resampled.widths();
        assert_eq!(widths.len(), resampled.len());
        assert_abs_diff_eq!(widths[0], 0.025, epsilon = 1e-12);
        assert_abs_diff_eq!(widths[5], 0.05, epsilon = 1e-12);
        let total: f64 = widths.iter().sum();
        assert_abs_diff_eq!(total, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_resample_in_place_keeps_table_on_error() {
        let mut table = sine_table(5, 0.0, 1.0);
        assert!(table.resample_in_place(-1.0).is_err());
        assert_eq!(table.len(), 5);
    }
}
