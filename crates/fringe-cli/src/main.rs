//! Fringe command-line interface.
//!
//! Run diffraction jobs from TOML configuration files:
//! ```sh
//! fringe-cli run job.toml
//! fringe-cli predict job.toml
//! fringe-cli compare job.toml measured.csv
//! fringe-cli validate job.toml
//! ```

mod config;
mod runner;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fringe-cli")]
#[command(about = "Fringe: Fraunhofer Slit Diffraction Toolkit")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample an intensity pattern from a TOML configuration file.
    Run {
        /// Path to the job configuration file.
        config: PathBuf,
        /// Output directory (overrides config file setting).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the analytic fringe prediction for a configuration.
    Predict {
        /// Path to the job configuration file.
        config: PathBuf,
        /// Output directory (overrides config file setting).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Compare a measured pattern against the configured theory.
    Compare {
        /// Path to the job configuration file.
        config: PathBuf,
        /// CSV file of measured (position_m, intensity) rows.
        measured: PathBuf,
        /// Output directory (overrides config file setting).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a configuration file without sampling anything.
    Validate {
        /// Path to the job configuration file.
        config: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, output } => {
            println!("Fringe Diffraction Toolkit");
            println!("==========================");
            let job = config::load_config(&config)?;
            println!("Configuration: {}", config.display());

            let experiment = runner::build_experiment(&job)?;
            let pattern = runner::sample_pattern(&experiment, &job)?;

            let out_dir = output.unwrap_or_else(|| PathBuf::from(&job.output.directory));

            // CSV pattern (default on)
            if job.output.save_pattern {
                let csv_path = out_dir.join("pattern.csv");
                runner::write_pattern_csv(&pattern, &csv_path, &job)?;
            }

            // JSON pattern (optional)
            if job.output.save_json {
                let json_path = out_dir.join("pattern.json");
                runner::write_pattern_json(&pattern, &json_path)?;
            }

            println!("Simulation complete.");
            Ok(())
        }
        Commands::Predict { config, output } => {
            let job = config::load_config(&config)?;
            let experiment = runner::build_experiment(&job)?;
            let prediction = experiment.fringe_positions(job.prediction.max_order)?;

            runner::print_prediction(&prediction, experiment.constants());

            if job.output.save_json {
                let out_dir = output.unwrap_or_else(|| PathBuf::from(&job.output.directory));
                let json_path = out_dir.join("prediction.json");
                runner::write_prediction_json(&prediction, &json_path)?;
            }
            Ok(())
        }
        Commands::Compare { config, measured, output } => {
            let job = config::load_config(&config)?;
            let experiment = runner::build_experiment(&job)?;
            let data = runner::read_measured_csv(&measured)?;
            println!(
                "Measured data: {} ({} samples)",
                measured.display(),
                data.positions.len()
            );

            let (theory, report) =
                runner::compare_measurement(&experiment, &data, job.screen.mode)?;
            runner::print_comparison(&report);

            let out_dir = output.unwrap_or_else(|| PathBuf::from(&job.output.directory));
            let residuals_path = out_dir.join("residuals.csv");
            runner::write_residuals_csv(&data, &theory, &report, &residuals_path)?;

            if job.output.save_json {
                let json_path = out_dir.join("comparison.json");
                runner::write_comparison_json(&report, &json_path)?;
            }
            Ok(())
        }
        Commands::Validate { config } => {
            let job = config::load_config(&config)?;
            let experiment = runner::build_experiment(&job)?;
            let constants = experiment.constants();
            println!("Configuration is valid: {}", config.display());
            println!(
                "  fringe spacing {:.4} mm, central maximum {:.4} mm, {} visible fringes",
                constants.linear_fringe_spacing * 1e3,
                constants.central_max_width * 1e3,
                constants.visible_fringe_count
            );
            Ok(())
        }
    }
}
