//! Wave-force providers.
//!
//! The [`WaveForce`] trait is the single interface the host's integrator
//! sees: given a simulation time it returns the excitation force on every
//! body, six DOF per body, bodies in order. Three models implement it:
//!
//! - [`NoWave`]: still water, always zero.
//! - [`RegularWave`]: a monochromatic wave evaluated from the
//!   frequency-domain excitation tables.
//! - [`IrregularWaves`]: a spectral sea state, convolved with the excitation
//!   impulse-response functions.
//!
//! [`WaveForceProvider`] wraps all three behind one closed enum so the host
//! can select the model from configuration.

pub mod irregular;
pub mod no_wave;
pub mod regular;

pub use irregular::IrregularWaves;
pub use no_wave::NoWave;
pub use regular::RegularWave;

use thiserror::Error;
use undina_hydro::HydroError;

use crate::types::{ForceVector, WaveMode};

/// Errors raised while configuring or evaluating a wave-force model.
#[derive(Debug, Error)]
pub enum WaveError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid elevation data: {0}")]
    DataFormat(String),

    #[error("Time {time} is outside the elevation history [{min}, {max}]")]
    Domain { time: f64, min: f64, max: f64 },

    #[error("Hydrodynamic data error: {0}")]
    Hydro(#[from] HydroError),
}

/// A model producing the generalised wave-excitation force.
///
/// Implementations are immutable once initialised, so evaluation may be
/// shared across threads.
pub trait WaveForce: Send + Sync {
    /// Force vector of length `6 * num_bodies()` at simulation time `t` (s).
    fn force_at_time(&self, t: f64) -> Result<ForceVector, WaveError>;

    /// Number of bodies the force vector covers.
    fn num_bodies(&self) -> usize;

    /// Which wave model this is.
    fn mode(&self) -> WaveMode;

    /// Length of the force vector.
    fn force_len(&self) -> usize {
        crate::types::DOF_PER_BODY * self.num_bodies()
    }
}

/// Closed set of wave-force models, chosen at run time.
#[derive(Debug)]
pub enum WaveForceProvider {
    NoWave(NoWave),
    Regular(RegularWave),
    Irregular(IrregularWaves),
}

impl WaveForceProvider {
    fn inner(&self) -> &dyn WaveForce {
        match self {
            Self::NoWave(p) => p,
            Self::Regular(p) => p,
            Self::Irregular(p) => p,
        }
    }
}

impl WaveForce for WaveForceProvider {
    fn force_at_time(&self, t: f64) -> Result<ForceVector, WaveError> {
        self.inner().force_at_time(t)
    }

    fn num_bodies(&self) -> usize {
        self.inner().num_bodies()
    }

    fn mode(&self) -> WaveMode {
        self.inner().mode()
    }
}

impl From<NoWave> for WaveForceProvider {
    fn from(p: NoWave) -> Self {
        Self::NoWave(p)
    }
}

impl From<RegularWave> for WaveForceProvider {
    fn from(p: RegularWave) -> Self {
        Self::Regular(p)
    }
}

impl From<IrregularWaves> for WaveForceProvider {
    fn from(p: IrregularWaves) -> Self {
        Self::Irregular(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_dispatches_to_model() {
        let provider = WaveForceProvider::from(NoWave::new(3));
        assert_eq!(provider.mode(), WaveMode::NoWave);
        assert_eq!(provider.num_bodies(), 3);
        assert_eq!(provider.force_len(), 18);
        assert_eq!(provider.force_at_time(4.0).unwrap().len(), 18);
    }

    #[test]
    fn test_domain_error_message() {
        let err = WaveError::Domain {
            time: 12.5,
            min: 0.0,
            max: 10.0,
        };
        assert_eq!(
            err.to_string(),
            "Time 12.5 is outside the elevation history [0, 10]"
        );
    }
}
