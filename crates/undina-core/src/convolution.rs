//! Excitation force by convolution of the IRF with the elevation history.
//!
//! $$
//! F_d(t) = \sum_j K_d(\tau_j)\,\eta(t - \tau_j)\,w_j
//! $$
//!
//! Lag times $\tau_j$ are ascending, so the query times $t - \tau_j$ descend
//! and the history bracket can be walked down from one sample to the next
//! instead of searched afresh. The walk is local to one call: nothing is
//! cached between calls and results never depend on call order.

use ndarray::Array1;
use undina_hydro::{ImpulseExcitation, DOF_PER_BODY};

use crate::free_surface::FreeSurfaceHistory;
use crate::waves::WaveError;

/// $\eta(t - \tau_j)$ for every lag sample of `kernel`.
///
/// Fails with [`WaveError::Domain`] on the first lag whose query time falls
/// outside the history window.
pub fn lagged_elevation(
    kernel: &ImpulseExcitation,
    history: &FreeSurfaceHistory,
    t: f64,
) -> Result<Vec<f64>, WaveError> {
    let (min, max) = history.bounds();
    let times = history.times();
    let lags = kernel.time();

    let mut eta = Vec::with_capacity(lags.len());
    let mut cursor = history.lower_index(t - lags[0]);
    for &tau in lags {
        let s = t - tau;
        if s < min || s > max {
            return Err(WaveError::Domain { time: s, min, max });
        }
        while cursor > 0 && times[cursor] > s {
            cursor -= 1;
        }
        eta.push(history.interpolate_in(cursor, s));
    }
    Ok(eta)
}

/// Excitation force on one DOF of one body at time `t`.
pub fn convolve(
    kernel: &ImpulseExcitation,
    history: &FreeSurfaceHistory,
    dof: usize,
    t: f64,
) -> Result<f64, WaveError> {
    let eta = lagged_elevation(kernel, history, t)?;
    Ok(weighted_sum(kernel, dof, &eta))
}

/// Excitation force on all six DOF of one body at time `t`.
///
/// The lagged elevation is computed once and shared by the six rows.
pub fn convolve_body(
    kernel: &ImpulseExcitation,
    history: &FreeSurfaceHistory,
    t: f64,
) -> Result<Array1<f64>, WaveError> {
    let eta = lagged_elevation(kernel, history, t)?;
    Ok(Array1::from_shape_fn(DOF_PER_BODY, |dof| {
        weighted_sum(kernel, dof, &eta)
    }))
}

fn weighted_sum(kernel: &ImpulseExcitation, dof: usize, eta: &[f64]) -> f64 {
    kernel
        .values()
        .row(dof)
        .iter()
        .zip(eta.iter())
        .zip(kernel.widths().iter())
        .map(|((k, e), w)| k * e * w)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::Array2;

    fn linear_history() -> FreeSurfaceHistory {
        // eta(t) = 2 t + 1 on [-10, 10]
        let times: Vec<f64> = (0..=40).map(|i| -10.0 + 0.5 * i as f64).collect();
        let elevations = times.iter().map(|t| 2.0 * t + 1.0).collect();
        FreeSurfaceHistory::new(times, elevations).unwrap()
    }

    fn brute_force(kernel: &ImpulseExcitation, history: &FreeSurfaceHistory, dof: usize, t: f64) -> f64 {
        (0..kernel.len())
            .map(|j| {
                let eta = history.elevation_at(t - kernel.time()[j]).unwrap();
                kernel.values()[[dof, j]] * eta * kernel.widths()[j]
            })
            .sum()
    }

    #[test]
    fn test_cursor_walk_matches_independent_lookups() {
        let history = linear_history();
        let lags: Vec<f64> = (0..13).map(|i| -1.0 + 0.37 * i as f64).collect();
        let values = Array2::from_shape_fn((6, lags.len()), |(d, j)| (d + 1) as f64 * (j as f64).cos());
        let kernel = ImpulseExcitation::new(lags, values).unwrap();

        for &t in &[0.0, 1.13, 4.9] {
            let body = convolve_body(&kernel, &history, t).unwrap();
            for dof in 0..6 {
                assert_abs_diff_eq!(body[dof], brute_force(&kernel, &history, dof, t), epsilon = 1e-12);
                assert_eq!(convolve(&kernel, &history, dof, t).unwrap(), body[dof]);
            }
        }
    }

    #[test]
    fn test_lagged_elevation_on_linear_signal() {
        let history = linear_history();
        let kernel = ImpulseExcitation::new(vec![0.0, 0.25, 1.0], Array2::zeros((6, 3))).unwrap();
        let eta = lagged_elevation(&kernel, &history, 3.1).unwrap();
        assert_abs_diff_eq!(eta[0], 7.2, epsilon = 1e-12);
        assert_abs_diff_eq!(eta[1], 6.7, epsilon = 1e-12);
        assert_abs_diff_eq!(eta[2], 5.2, epsilon = 1e-12);
    }

    #[test]
    fn test_query_past_history_start_is_domain_error() {
        let history = linear_history();
        let kernel = ImpulseExcitation::new(vec![0.0, 5.0], Array2::ones((6, 2))).unwrap();
        let err = convolve(&kernel, &history, 0, -6.0).unwrap_err();
        match err {
            WaveError::Domain { time, min, .. } => {
                assert_eq!(time, -11.0);
                assert_eq!(min, -10.0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_query_past_history_end_is_domain_error() {
        let history = linear_history();
        let kernel = ImpulseExcitation::new(vec![-1.0, 0.0], Array2::ones((6, 2))).unwrap();
        assert!(matches!(
            convolve(&kernel, &history, 0, 9.5),
            Err(WaveError::Domain { .. })
        ));
    }
}
