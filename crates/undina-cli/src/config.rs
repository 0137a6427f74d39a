//! TOML configuration deserialisation for wave-force jobs.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use undina_core::types::{IrregularWaveParams, RegularWaveParams, SpectrumConfig, WaveMode};

/// Top-level job configuration.
#[derive(Debug, Deserialize)]
pub struct JobConfig {
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub waves: WavesConfig,
    pub hydro: HydroConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Time stepping of the force series.
#[derive(Debug, Deserialize)]
pub struct SimulationConfig {
    /// Number of bodies. Defaults to every body in the dataset.
    #[serde(default)]
    pub bodies: Option<usize>,
    /// Time step (s).
    pub timestep: f64,
    /// Duration (s).
    pub duration: f64,
}

/// Wave model selection, tagged by `mode`.
#[derive(Debug, Default, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum WavesConfig {
    #[default]
    NoWave,
    Regular {
        #[serde(default = "default_amplitude")]
        amplitude: f64,
        #[serde(default = "default_omega")]
        omega: f64,
    },
    Irregular {
        #[serde(default)]
        wave_height: f64,
        #[serde(default)]
        wave_period: f64,
        #[serde(default)]
        spectrum: SpectrumConfig,
        #[serde(default)]
        ramp_duration: f64,
        #[serde(default = "default_seed")]
        seed: u64,
        /// Pre-recorded elevation used instead of a synthesised one.
        #[serde(default)]
        eta_file: Option<String>,
    },
}

fn default_amplitude() -> f64 {
    RegularWaveParams::default().amplitude
}
fn default_omega() -> f64 {
    RegularWaveParams::default().omega
}
fn default_seed() -> u64 {
    IrregularWaveParams::default().seed
}

impl WavesConfig {
    pub fn mode(&self) -> WaveMode {
        match self {
            Self::NoWave => WaveMode::NoWave,
            Self::Regular { .. } => WaveMode::Regular,
            Self::Irregular { .. } => WaveMode::Irregular,
        }
    }
}

/// Hydrodynamic dataset location.
#[derive(Debug, Deserialize)]
pub struct HydroConfig {
    /// JSON dataset, relative to the data directory.
    pub dataset: String,
}

/// Output configuration.
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Output directory (default: "./output").
    #[serde(default = "default_output_dir")]
    pub directory: String,
    /// Whether to save the force series as CSV (default: true).
    #[serde(default = "default_true")]
    pub save_forces: bool,
    /// Whether to dump the spectrum and elevation (default: false).
    #[serde(default)]
    pub save_debug: bool,
    /// Whether to export the free-surface mesh after a run (default: false).
    #[serde(default)]
    pub save_mesh: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            save_forces: true,
            save_debug: false,
            save_mesh: false,
        }
    }
}

fn default_output_dir() -> String {
    "./output".into()
}
fn default_true() -> bool {
    true
}

/// Resolve a job-file path against the data directory.
pub fn resolve(data_dir: &Path, path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        data_dir.join(path)
    }
}

/// Load and parse a TOML job configuration file.
pub fn load_config(path: &Path) -> anyhow::Result<JobConfig> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> anyhow::Result<JobConfig> {
    let config: JobConfig = toml::from_str(content)?;
    if !(config.simulation.timestep > 0.0) {
        anyhow::bail!(
            "simulation.timestep must be positive, got {}",
            config.simulation.timestep
        );
    }
    if config.simulation.duration < 0.0 {
        anyhow::bail!(
            "simulation.duration must not be negative, got {}",
            config.simulation.duration
        );
    }
    Ok(config)
}
