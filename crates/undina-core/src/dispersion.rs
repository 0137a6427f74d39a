//! Linear water-wave dispersion relation.
//!
//! $$
//! \omega^2 = g\,k \tanh(k h)
//! $$
//!
//! Solved for the wave number $k$ by a Newton-type iteration started from
//! the deep-water value $k_0 = \omega^2 / g$. The slope used is
//! $f'(k) = -2g\tanh(kh) - g\,k h\,(1 - \tanh^2(kh))$, which is steeper than
//! the exact derivative; each step is therefore damped and the iteration
//! converges linearly rather than quadratically, always from the
//! deep-water side.
//!
//! Non-convergence is not an error: the last iterate is returned together
//! with a `converged` flag.

use serde::{Deserialize, Serialize};

/// Iteration settings for [`solve_wave_number`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DispersionOptions {
    /// Gravitational acceleration (m/s²).
    pub gravity: f64,
    /// Stop when the wave-number update is smaller than this (rad/m).
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl Default for DispersionOptions {
    fn default() -> Self {
        Self {
            gravity: 9.81,
            tolerance: 1e-6,
            max_iterations: 100,
        }
    }
}

/// Result of one dispersion solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DispersionSolution {
    /// Wave number $k$ (rad/m), the last iterate.
    pub wave_number: f64,
    /// Iterations performed.
    pub iterations: usize,
    /// Whether the last update fell below the tolerance.
    pub converged: bool,
}

/// Residual $\omega^2 - g k \tanh(kh)$ of the dispersion relation.
pub fn dispersion_residual(omega: f64, wave_number: f64, depth: f64, gravity: f64) -> f64 {
    omega * omega - gravity * wave_number * (wave_number * depth).tanh()
}

/// Solve the dispersion relation for a single angular frequency.
///
/// # Arguments
/// * `omega` - Angular frequency (rad/s).
/// * `depth` - Water depth (m); `f64::INFINITY` gives the deep-water limit.
/// * `options` - Gravity, tolerance and iteration cap.
pub fn solve_wave_number(omega: f64, depth: f64, options: &DispersionOptions) -> DispersionSolution {
    let g = options.gravity;
    let mut k = omega * omega / g;

    // Zero frequency has the trivial root; infinite depth is exactly k0.
    if k == 0.0 || depth.is_infinite() {
        return DispersionSolution {
            wave_number: k,
            iterations: 0,
            converged: true,
        };
    }

    let mut iterations = 0;
    let mut error = f64::INFINITY;
    while error > options.tolerance && iterations < options.max_iterations {
        let tanh_kh = (k * depth).tanh();
        let f = omega * omega - g * k * tanh_kh;
        let df = -2.0 * g * tanh_kh - g * k * depth * (1.0 - tanh_kh * tanh_kh);
        if df == 0.0 {
            break;
        }

        let delta_k = f / df;
        k -= delta_k;
        error = delta_k.abs();
        iterations += 1;
    }

    DispersionSolution {
        wave_number: k,
        iterations,
        converged: error <= options.tolerance,
    }
}

/// Wave numbers for a sequence of angular frequencies, each solved
/// independently with default gravity, tolerance and iteration cap.
pub fn wave_numbers(omegas: &[f64], depth: f64) -> Vec<f64> {
    wave_numbers_with(omegas, depth, &DispersionOptions::default())
}

/// As [`wave_numbers`], with explicit options.
pub fn wave_numbers_with(omegas: &[f64], depth: f64, options: &DispersionOptions) -> Vec<f64> {
    omegas
        .iter()
        .map(|&omega| solve_wave_number(omega, depth, options).wave_number)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_deep_water_limit() {
        let opts = DispersionOptions::default();
        let omega: f64 = 1.2;
        let sol = solve_wave_number(omega, 1000.0, &opts);
        assert!(sol.converged);
        assert_relative_eq!(sol.wave_number, omega * omega / 9.81, max_relative = 1e-6);
    }

    #[test]
    fn test_infinite_depth_is_exact() {
        let sol = solve_wave_number(2.0, f64::INFINITY, &DispersionOptions::default());
        assert_eq!(sol.iterations, 0);
        assert_eq!(sol.wave_number, 4.0 / 9.81);
    }

    #[test]
    fn test_shallow_water_limit() {
        // k h << 1: omega ≈ k sqrt(g h)
        let depth = 0.5;
        let omega = 0.05;
        let sol = solve_wave_number(omega, depth, &DispersionOptions::default());
        assert!(sol.converged);
        assert_relative_eq!(
            sol.wave_number,
            omega / (9.81 * depth).sqrt(),
            max_relative = 1e-3
        );
    }

    #[test]
    fn test_zero_frequency() {
        let sol = solve_wave_number(0.0, 10.0, &DispersionOptions::default());
        assert!(sol.converged);
        assert_eq!(sol.wave_number, 0.0);
    }

    #[test]
    fn test_iteration_cap_is_reported() {
        let opts = DispersionOptions {
            max_iterations: 1,
            tolerance: 1e-14,
            ..Default::default()
        };
        let sol = solve_wave_number(0.3, 5.0, &opts);
        assert_eq!(sol.iterations, 1);
        assert!(!sol.converged);
        assert!(sol.wave_number.is_finite());
    }

    #[test]
    fn test_vectorised_matches_scalar() {
        let omegas = [0.2, 0.7, 1.5, 3.0];
        let ks = wave_numbers(&omegas, 20.0);
        for (omega, k) in omegas.iter().zip(ks.iter()) {
            let sol = solve_wave_number(*omega, 20.0, &DispersionOptions::default());
            assert_eq!(*k, sol.wave_number);
        }
    }
}
