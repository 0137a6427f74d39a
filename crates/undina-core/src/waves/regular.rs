//! Monochromatic wave excitation.
//!
//! At setup the frequency-domain excitation magnitude $|X|$ and phase
//! $\angle X$ are interpolated once per body and DOF at the configured
//! angular frequency. The force is then
//!
//! $$
//! F_d(t) = |X_d|\,a\,\cos(\omega t + \angle X_d)
//! $$
//!
//! with no convolution involved.

use ndarray::Array2;
use undina_hydro::FrequencyExcitation;

use crate::types::{ForceVector, RegularWaveParams, WaveMode, DOF_PER_BODY};
use crate::waves::{WaveError, WaveForce};

/// Wave-direction mode read from the excitation tables.
const MODE: usize = 0;

/// Regular-wave force model.
#[derive(Debug, Clone)]
pub struct RegularWave {
    num_bodies: usize,
    params: RegularWaveParams,
    /// Interpolated magnitude per (body, DOF); `None` until hydro data is attached.
    magnitudes: Option<Array2<f64>>,
    phases: Option<Array2<f64>>,
}

impl RegularWave {
    pub fn new(num_bodies: usize, params: RegularWaveParams) -> Self {
        Self {
            num_bodies,
            params,
            magnitudes: None,
            phases: None,
        }
    }

    /// Attach one frequency-domain table per body and interpolate the
    /// excitation coefficients at the configured frequency.
    ///
    /// May be called once.
    pub fn add_hydro_data(&mut self, tables: &[FrequencyExcitation]) -> Result<(), WaveError> {
        if self.is_initialized() {
            return Err(WaveError::Configuration(
                "regular wave already has hydrodynamic data".into(),
            ));
        }
        if tables.len() != self.num_bodies {
            return Err(WaveError::Configuration(format!(
                "expected excitation tables for {} bodies, got {}",
                self.num_bodies,
                tables.len()
            )));
        }

        let omega = self.params.omega;
        let mut magnitudes = Array2::zeros((self.num_bodies, DOF_PER_BODY));
        let mut phases = Array2::zeros((self.num_bodies, DOF_PER_BODY));

        for (body, table) in tables.iter().enumerate() {
            table.validate()?;
            let position = table.bin_position(omega).ok_or_else(|| {
                WaveError::Configuration(format!(
                    "wave frequency {} rad/s is outside body {}'s excitation table [{}, {}]",
                    omega,
                    body,
                    table.frequencies[0],
                    table.frequencies[table.frequencies.len() - 1]
                ))
            })?;
            for dof in 0..DOF_PER_BODY {
                magnitudes[[body, dof]] = table.magnitude_at(dof, MODE, position);
                phases[[body, dof]] = table.phase_at(dof, MODE, position);
            }
            log::debug!("Body {}: excitation interpolated at bin {:.4}", body, position);
        }

        self.magnitudes = Some(magnitudes);
        self.phases = Some(phases);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.magnitudes.is_some()
    }

    pub fn params(&self) -> &RegularWaveParams {
        &self.params
    }

    /// Interpolated excitation magnitudes, shape (bodies, 6).
    pub fn magnitudes(&self) -> Option<&Array2<f64>> {
        self.magnitudes.as_ref()
    }

    /// Interpolated excitation phases (rad), shape (bodies, 6).
    pub fn phases(&self) -> Option<&Array2<f64>> {
        self.phases.as_ref()
    }
}

impl WaveForce for RegularWave {
    fn force_at_time(&self, t: f64) -> Result<ForceVector, WaveError> {
        let (magnitudes, phases) = match (&self.magnitudes, &self.phases) {
            (Some(m), Some(p)) => (m, p),
            _ => {
                return Err(WaveError::Configuration(
                    "regular wave evaluated before hydrodynamic data was attached".into(),
                ))
            }
        };

        let RegularWaveParams { amplitude, omega } = self.params;
        let mut force = ForceVector::zeros(DOF_PER_BODY * self.num_bodies);
        for ((idx, mag), phase) in magnitudes.indexed_iter().zip(phases.iter()) {
            let (body, dof) = idx;
            force[body * DOF_PER_BODY + dof] = mag * amplitude * (omega * t + phase).cos();
        }
        Ok(force)
    }

    fn num_bodies(&self) -> usize {
        self.num_bodies
    }

    fn mode(&self) -> WaveMode {
        WaveMode::Regular
    }
}
