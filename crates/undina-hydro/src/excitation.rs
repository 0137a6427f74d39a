//! Per-body excitation tables.
//!
//! Two views of the same physical quantity are kept:
//!
//! - [`FrequencyExcitation`]: magnitude and phase of the excitation force per
//!   unit wave amplitude, tabulated over angular frequency. Used for regular
//!   (monochromatic) waves.
//! - [`ImpulseExcitation`]: the excitation impulse-response function (IRF)
//!   $K(\tau)$ on an ascending time grid, together with trapezoidal
//!   integration widths. Used for irregular waves, where the force is
//!   $F(t) = \int K(\tau)\,\eta(t - \tau)\,d\tau$.

use ndarray::{Array2, Array3, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::error::{check_ascending, HydroError};
use crate::DOF_PER_BODY;

/// Frequency-domain excitation coefficients for one body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrequencyExcitation {
    /// Angular frequencies (rad/s), strictly ascending.
    pub frequencies: Vec<f64>,
    /// Force magnitude per unit amplitude, shape (6, modes, frequencies).
    pub magnitude: Array3<f64>,
    /// Force phase (rad), same shape as `magnitude`.
    pub phase: Array3<f64>,
}

impl FrequencyExcitation {
    /// Construct and validate a frequency-domain table.
    pub fn new(
        frequencies: Vec<f64>,
        magnitude: Array3<f64>,
        phase: Array3<f64>,
    ) -> Result<Self, HydroError> {
        let table = Self {
            frequencies,
            magnitude,
            phase,
        };
        table.validate()?;
        Ok(table)
    }

    /// Check grid ordering and tensor shapes.
    pub fn validate(&self) -> Result<(), HydroError> {
        check_ascending("excitation frequencies", &self.frequencies)?;
        let shape = self.magnitude.shape();
        if shape[0] != DOF_PER_BODY || shape[2] != self.frequencies.len() || shape[1] == 0 {
            return Err(HydroError::ShapeMismatch {
                what: "excitation magnitude",
                expected: vec![DOF_PER_BODY, shape[1].max(1), self.frequencies.len()],
                actual: shape.to_vec(),
            });
        }
        if self.phase.shape() != shape {
            return Err(HydroError::ShapeMismatch {
                what: "excitation phase",
                expected: shape.to_vec(),
                actual: self.phase.shape().to_vec(),
            });
        }
        Ok(())
    }

    /// Number of wave-direction modes in the table.
    pub fn num_modes(&self) -> usize {
        self.magnitude.shape()[1]
    }

    /// Fractional bin index of angular frequency `omega`, or `None` when
    /// `omega` lies outside the tabulated range.
    ///
    /// For the uniform grid $\omega_i = (i + 1)\,\Delta\omega$ this equals
    /// $\omega / \Delta\omega - 1$.
    pub fn bin_position(&self, omega: f64) -> Option<f64> {
        let f = &self.frequencies;
        let last = f.len() - 1;
        if last == 0 {
            return ((omega - f[0]).abs() <= 1e-12 * f[0].abs().max(1.0)).then_some(0.0);
        }
        if !(omega >= f[0] && omega <= f[last]) {
            return None;
        }
        let upper = f.partition_point(|&x| x <= omega).clamp(1, last);
        let lower = upper - 1;
        Some(lower as f64 + (omega - f[lower]) / (f[upper] - f[lower]))
    }

    /// Magnitude at a fractional bin position, linear between neighbouring bins.
    pub fn magnitude_at(&self, dof: usize, mode: usize, position: f64) -> f64 {
        interpolate_bins(
            self.magnitude.slice(ndarray::s![dof, mode, ..]),
            position,
        )
    }

    /// Phase at a fractional bin position, linear between neighbouring bins.
    pub fn phase_at(&self, dof: usize, mode: usize, position: f64) -> f64 {
        interpolate_bins(self.phase.slice(ndarray::s![dof, mode, ..]), position)
    }
}

fn interpolate_bins(row: ArrayView1<f64>, position: f64) -> f64 {
    let last = row.len() - 1;
    let floor = (position.floor().max(0.0) as usize).min(last);
    let ceil = (floor + 1).min(last);
    let frac = position - floor as f64;
    row[floor] + frac * (row[ceil] - row[floor])
}

/// Excitation impulse-response table for one body.
///
/// The time grid, the IRF columns, and the integration widths are always
/// replaced together; see [`crate::resample`].
#[derive(Debug, Clone)]
pub struct ImpulseExcitation {
    time: Vec<f64>,
    /// IRF values, shape (6, time samples).
    values: Array2<f64>,
    widths: Vec<f64>,
}

impl ImpulseExcitation {
    /// Construct from a time grid and a `(6, n)` IRF matrix.
    ///
    /// Integration widths are computed from the time grid.
    pub fn new(time: Vec<f64>, values: Array2<f64>) -> Result<Self, HydroError> {
        check_ascending("IRF time", &time)?;
        if values.nrows() != DOF_PER_BODY || values.ncols() != time.len() {
            return Err(HydroError::ShapeMismatch {
                what: "excitation IRF",
                expected: vec![DOF_PER_BODY, time.len()],
                actual: values.shape().to_vec(),
            });
        }
        let widths = integration_widths(&time);
        Ok(Self {
            time,
            values,
            widths,
        })
    }

    /// Lag times $\tau_j$ (s), ascending.
    pub fn time(&self) -> &[f64] {
        &self.time
    }

    /// IRF matrix, shape (6, samples).
    pub fn values(&self) -> ArrayView2<f64> {
        self.values.view()
    }

    /// Trapezoidal integration widths, one per lag sample.
    pub fn widths(&self) -> &[f64] {
        &self.widths
    }

    /// Number of lag samples.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// First and last lag time.
    pub fn support(&self) -> (f64, f64) {
        (self.time[0], self.time[self.time.len() - 1])
    }
}

/// Trapezoidal weights for a (possibly non-uniform) grid.
///
/// `w_i = (|t_{i+1} - t_i| + |t_i - t_{i-1}|) / 2`, where the missing
/// neighbour at either end contributes zero.
pub fn integration_widths(time: &[f64]) -> Vec<f64> {
    let n = time.len();
    (0..n)
        .map(|i| {
            let mut w = 0.0;
            if i + 1 < n {
                w += 0.5 * (time[i + 1] - time[i]).abs();
            }
            if i > 0 {
                w += 0.5 * (time[i] - time[i - 1]).abs();
            }
            w
        })
        .collect()
}
