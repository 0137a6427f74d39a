//! Core types shared across the Undina framework.
//!
//! Wave-mode selection and the parameter sets the host supplies for each
//! mode. All parameter structs deserialise from the host's configuration
//! format and carry sensible defaults.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

pub use undina_hydro::DOF_PER_BODY;

/// Generalised force vector: six DOF per body, bodies in order.
pub type ForceVector = Array1<f64>;

/// Which wave-force model is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaveMode {
    /// Still water: no excitation.
    #[default]
    NoWave,
    /// A single monochromatic wave.
    Regular,
    /// A stochastic sea state built from a spectrum.
    Irregular,
}

/// Regular (monochromatic) wave parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegularWaveParams {
    /// Wave amplitude (m).
    pub amplitude: f64,
    /// Angular frequency (rad/s).
    pub omega: f64,
}

impl Default for RegularWaveParams {
    fn default() -> Self {
        Self {
            amplitude: 1.0,
            omega: 1.0,
        }
    }
}

/// Parametric spectral shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SpectrumKind {
    PiersonMoskowitz,
    /// JONSWAP with peak-enhancement factor $\gamma$.
    Jonswap { gamma: f64 },
}

impl Default for SpectrumKind {
    fn default() -> Self {
        Self::Jonswap { gamma: 3.3 }
    }
}

/// Frequency grid in Hz: `points` samples linearly spaced over `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencyGrid {
    pub start: f64,
    pub end: f64,
    pub points: usize,
}

impl Default for FrequencyGrid {
    fn default() -> Self {
        Self {
            start: 0.001,
            end: 1.0,
            points: 1000,
        }
    }
}

/// Spectrum shape and the grid it is evaluated on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpectrumConfig {
    #[serde(default)]
    pub kind: SpectrumKind,
    #[serde(default)]
    pub grid: FrequencyGrid,
}

/// Irregular-wave parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IrregularWaveParams {
    /// Significant wave height $H_s$ (m).
    pub wave_height: f64,
    /// Peak period $T_p$ (s).
    pub wave_period: f64,
    #[serde(default)]
    pub spectrum: SpectrumConfig,
    /// Simulation time step (s). Non-positive keeps the IRF's native sampling.
    pub simulation_dt: f64,
    /// Simulation duration (s).
    pub simulation_duration: f64,
    /// Length of the linear 0→1 ramp applied to the start of the elevation (s).
    #[serde(default)]
    pub ramp_duration: f64,
    /// Seed for the random phases.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_seed() -> u64 {
    1
}

impl Default for IrregularWaveParams {
    fn default() -> Self {
        Self {
            wave_height: 0.0,
            wave_period: 0.0,
            spectrum: SpectrumConfig::default(),
            simulation_dt: 0.01,
            simulation_duration: 100.0,
            ramp_duration: 0.0,
            seed: default_seed(),
        }
    }
}
