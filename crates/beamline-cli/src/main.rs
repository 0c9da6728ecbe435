//! Beamline command-line interface.
//!
//! Run optical bench simulations from TOML descriptions:
//! ```sh
//! beamline-cli run bench.toml
//! beamline-cli validate bench.toml
//! beamline-cli elements
//! ```

mod config;
mod runner;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "beamline-cli")]
#[command(about = "Beamline: coherent optical bench simulator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation from a TOML bench description.
    Run {
        /// Path to the bench description file.
        config: PathBuf,
        /// Output directory (overrides config file setting).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a bench description without running the simulation.
    Validate {
        /// Path to the bench description file.
        config: PathBuf,
    },
    /// Display the placeable object kinds and their parameters.
    Elements,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, output } => {
            println!("Beamline optical bench");
            println!("======================");
            let bench = config::load_config(&config)?;
            println!("Bench description: {}", config.display());

            let mut scene = runner::build_scene(&bench)?;
            println!("Placed {} object(s).", scene.len());

            let out_dir = output.unwrap_or_else(|| PathBuf::from(&bench.output.directory));
            runner::run_simulation(&bench, &mut scene, &out_dir)?;

            println!("Simulation complete.");
            Ok(())
        }
        Commands::Validate { config } => {
            let bench = config::load_config(&config)?;
            runner::build_scene(&bench)?;
            println!("Bench description is valid: {}", config.display());
            Ok(())
        }
        Commands::Elements => {
            println!("Placeable object kinds:");
            println!();
            println!("  source       — coherent emitter");
            println!("                 mode (plane|gaussian|lg|hg|blank), wavelength, waist,");
            println!("                 psi, delta, l, p, m, n, samples, extent");
            println!("  mirror       — square fold mirror: size, reflectivity");
            println!("  convex-lens  — converging thin lens: radius, focal_length");
            println!("  concave-lens — diverging thin lens: radius, focal_length");
            println!("  iris         — circular hole: radius (≤ size), size");
            println!("  slit         — rectangular openings: height, width, num_slits,");
            println!("                 separation, size");
            println!("  camera       — accumulating sensor: size");
            Ok(())
        }
    }
}
