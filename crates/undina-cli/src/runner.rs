//! Job runner: ties together the hydrodynamic dataset, the wave model and
//! the output files.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use undina_core::dispersion::DispersionOptions;
use undina_core::types::{
    ForceVector, IrregularWaveParams, RegularWaveParams, WaveMode, DOF_PER_BODY,
};
use undina_core::waves::{IrregularWaves, NoWave, RegularWave};
use undina_core::{WaveForce, WaveForceProvider};
use undina_hydro::HydroDataset;
use undina_io::{DumpDirectory, ElevationFile};

use crate::config::{resolve, JobConfig, WavesConfig};

const DOF_NAMES: [&str; DOF_PER_BODY] = ["surge", "sway", "heave", "roll", "pitch", "yaw"];

/// A force series sampled at the simulation step.
pub struct ForceSeries {
    pub time: Vec<f64>,
    pub forces: Vec<ForceVector>,
}

/// Load a JSON hydrodynamic dataset.
pub fn load_dataset(path: &Path) -> Result<HydroDataset> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read hydrodynamic dataset {}", path.display()))?;
    let dataset: HydroDataset = serde_json::from_str(&content)
        .with_context(|| format!("Invalid hydrodynamic dataset {}", path.display()))?;
    Ok(dataset)
}

/// Build and initialise the wave model a job asks for.
///
/// Relative paths in the job are resolved against `data_dir`; debug dumps
/// go to `out_dir` when enabled.
pub fn build_provider(
    job: &JobConfig,
    data_dir: &Path,
    out_dir: &Path,
) -> Result<WaveForceProvider> {
    let dataset_path = resolve(data_dir, &job.hydro.dataset);
    log::info!("Loading hydrodynamic dataset {}", dataset_path.display());
    let dataset = load_dataset(&dataset_path)?;
    let num_bodies = job.simulation.bodies.unwrap_or_else(|| dataset.num_bodies());
    if num_bodies != dataset.num_bodies() {
        anyhow::bail!(
            "Job has {} bodies but the dataset describes {}",
            num_bodies,
            dataset.num_bodies()
        );
    }
    println!(
        "Bodies: {} (water depth {} m)",
        num_bodies, dataset.simulation.water_depth
    );

    let provider: WaveForceProvider = match &job.waves {
        WavesConfig::NoWave => NoWave::new(num_bodies).into(),
        WavesConfig::Regular { amplitude, omega } => {
            let mut waves = RegularWave::new(
                num_bodies,
                RegularWaveParams {
                    amplitude: *amplitude,
                    omega: *omega,
                },
            );
            waves.add_hydro_data(&dataset.frequency_tables()?)?;
            waves.into()
        }
        WavesConfig::Irregular {
            wave_height,
            wave_period,
            spectrum,
            ramp_duration,
            seed,
            eta_file,
        } => {
            let params = IrregularWaveParams {
                wave_height: *wave_height,
                wave_period: *wave_period,
                spectrum: *spectrum,
                simulation_dt: job.simulation.timestep,
                simulation_duration: job.simulation.duration,
                ramp_duration: *ramp_duration,
                seed: *seed,
            };
            let mut waves = IrregularWaves::new(num_bodies, params).with_dispersion(
                DispersionOptions {
                    gravity: dataset.simulation.gravity,
                    ..Default::default()
                },
            );
            if let Some(file) = eta_file {
                waves = waves.with_elevation_source(Box::new(ElevationFile::new(resolve(
                    data_dir, file,
                ))));
            }
            if job.output.save_debug {
                waves = waves.with_debug_sink(Box::new(DumpDirectory::new(out_dir)));
            }
            waves.add_hydro_data(dataset.impulse_tables()?, dataset.simulation.water_depth)?;
            waves.into()
        }
    };
    Ok(provider)
}

/// Evaluate `provider` at every step of `[0, duration]`.
pub fn run_forces(provider: &dyn WaveForce, timestep: f64, duration: f64) -> Result<ForceSeries> {
    let steps = (duration / timestep).round() as usize;
    let mut time = Vec::with_capacity(steps + 1);
    let mut forces = Vec::with_capacity(steps + 1);

    for i in 0..=steps {
        let t = i as f64 * timestep;
        let force = provider
            .force_at_time(t)
            .with_context(|| format!("Force evaluation failed at t = {} s", t))?;

        if steps >= 10 && i % (steps / 10) == 0 {
            println!("  [{}/{}] t = {:.2} s", i, steps, t);
        }
        time.push(t);
        forces.push(force);
    }

    Ok(ForceSeries { time, forces })
}

/// Write the force series as CSV: a time column and one column per body DOF.
pub fn write_forces_csv(
    series: &ForceSeries,
    num_bodies: usize,
    mode: WaveMode,
    path: &Path,
) -> Result<()> {
    use std::io::Write;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);

    writeln!(file, "# Undina wave excitation forces")?;
    writeln!(file, "# Version: {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(file, "# wave mode: {:?}", mode)?;
    writeln!(file, "# bodies: {}", num_bodies)?;
    writeln!(file, "#")?;

    let mut header = vec!["time_s".to_string()];
    for body in 1..=num_bodies {
        header.extend(DOF_NAMES.iter().map(|dof| format!("body{}_{}", body, dof)));
    }
    writeln!(file, "{}", header.join(","))?;

    for (t, force) in series.time.iter().zip(series.forces.iter()) {
        write!(file, "{:.6}", t)?;
        for value in force.iter() {
            write!(file, ",{:.6e}", value)?;
        }
        writeln!(file)?;
    }
    file.flush()?;

    println!("Forces written to {}", path.display());
    Ok(())
}

/// Export the free-surface strip of an irregular-wave provider.
pub fn write_mesh(provider: &WaveForceProvider, path: &Path) -> Result<()> {
    let WaveForceProvider::Irregular(waves) = provider else {
        anyhow::bail!("The free-surface mesh needs an irregular wave model");
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mesh = waves.surface_mesh()?;
    undina_io::obj::save_obj(path, &mesh)
        .with_context(|| format!("Failed to write mesh {}", path.display()))?;
    println!("Free-surface mesh written to {}", path.display());
    Ok(())
}

/// Default data directory: the folder holding the job file.
pub fn default_data_dir(config: &Path) -> PathBuf {
    config
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}
