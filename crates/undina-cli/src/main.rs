//! Undina command-line interface.
//!
//! Evaluate wave excitation forces from TOML job files:
//! ```sh
//! undina run job.toml --data-dir ./rm3
//! undina validate job.toml
//! undina mesh job.toml -o free_surface.obj
//! ```

mod config;
mod runner;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use undina_core::WaveForce;

#[derive(Parser)]
#[command(name = "undina")]
#[command(about = "Undina: time-domain wave excitation forces")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the excitation force series of a job.
    Run {
        /// Path to the job configuration file.
        config: PathBuf,
        /// Directory that dataset and elevation paths are relative to
        /// (default: the job file's directory).
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// Output directory (overrides config file setting).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Parse a job and initialise its wave model without stepping.
    Validate {
        /// Path to the job configuration file.
        config: PathBuf,
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// Export the free surface of an irregular-wave job as a Wavefront OBJ.
    Mesh {
        /// Path to the job configuration file.
        config: PathBuf,
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// Mesh file (default: free_surface.obj in the output directory).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn data_dir_or_default(config: &Path, data_dir: Option<PathBuf>) -> PathBuf {
    data_dir.unwrap_or_else(|| runner::default_data_dir(config))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            data_dir,
            output,
        } => {
            println!("Undina wave excitation");
            println!("======================");
            let job = config::load_config(&config)?;
            println!("Configuration: {}", config.display());

            let data_dir = data_dir_or_default(&config, data_dir);
            let out_dir = output.unwrap_or_else(|| PathBuf::from(&job.output.directory));
            let provider = runner::build_provider(&job, &data_dir, &out_dir)?;
            println!("Wave mode: {:?}", job.waves.mode());

            let series =
                runner::run_forces(&provider, job.simulation.timestep, job.simulation.duration)?;

            if job.output.save_forces {
                runner::write_forces_csv(
                    &series,
                    provider.num_bodies(),
                    provider.mode(),
                    &out_dir.join("forces.csv"),
                )?;
            }
            if job.output.save_mesh {
                runner::write_mesh(&provider, &out_dir.join("free_surface.obj"))?;
            }

            println!("Run complete.");
            Ok(())
        }
        Commands::Validate { config, data_dir } => {
            let job = config::load_config(&config)?;
            let data_dir = data_dir_or_default(&config, data_dir);
            let out_dir = PathBuf::from(&job.output.directory);
            let provider = runner::build_provider(&job, &data_dir, &out_dir)?;
            println!(
                "Configuration is valid: {} ({:?}, {} bodies)",
                config.display(),
                provider.mode(),
                provider.num_bodies()
            );
            Ok(())
        }
        Commands::Mesh {
            config,
            data_dir,
            output,
        } => {
            let job = config::load_config(&config)?;
            let data_dir = data_dir_or_default(&config, data_dir);
            let out_dir = PathBuf::from(&job.output.directory);
            let provider = runner::build_provider(&job, &data_dir, &out_dir)?;
            let path = output.unwrap_or_else(|| out_dir.join("free_surface.obj"));
            runner::write_mesh(&provider, &path)
        }
    }
}
