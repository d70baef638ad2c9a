//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// pspuav - results analysis and route visualization for PSP-UAV
///
/// Post-processes the CSV output of the evolutionary patrol scheduler:
/// aggregates per-instance statistics into reports and a consolidated CSV,
/// and renders drone trajectory maps.
///
/// Examples:
///   pspuav analyze
///   pspuav analyze --results-dir resultados --output resumen_completo.csv
///   pspuav plot PSP-UAV_01_a --fleet-size 3
///   pspuav compare PSP-UAV_02_a
///   pspuav demo
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding the optimizer's CSV output
    ///
    /// Defaults to `resultados` (or the value in .pspuav.toml).
    #[arg(long, value_name = "DIR", global = true)]
    pub results_dir: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .pspuav.toml in the current directory
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available pipelines.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Aggregate statistics files into reports and a consolidated CSV
    Analyze {
        /// Output path for the consolidated CSV
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Render the trajectory map of one instance/fleet-size configuration
    Plot {
        /// Instance name (e.g. PSP-UAV_01_a)
        instance: String,

        /// Number of drones of the configuration to draw
        #[arg(short = 'k', long, value_name = "K")]
        fleet_size: u32,

        /// Custom plot title
        #[arg(long, value_name = "TITLE")]
        title: Option<String>,
    },

    /// Render all configurations of one instance side by side
    Compare {
        /// Instance name (e.g. PSP-UAV_02_a)
        instance: String,
    },

    /// Run the visualizer with the fixed example arguments
    Demo,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Command::Plot { fleet_size, .. } = &self.command {
            if *fleet_size == 0 {
                return Err("Fleet size must be at least 1".to_string());
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args(command: Command) -> Args {
        Args {
            command,
            results_dir: None,
            config: None,
            verbose: false,
            quiet: false,
        }
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args(Command::Analyze { output: None });
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_zero_fleet_size() {
        let args = make_args(Command::Plot {
            instance: "PSP-UAV_01_a".to_string(),
            fleet_size: 0,
            title: None,
        });
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args(Command::Demo);
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }

    #[test]
    fn test_parse_plot_subcommand() {
        let args = Args::try_parse_from([
            "pspuav", "plot", "PSP-UAV_01_a", "--fleet-size", "3",
        ])
        .unwrap();
        match args.command {
            Command::Plot {
                instance,
                fleet_size,
                title,
            } => {
                assert_eq!(instance, "PSP-UAV_01_a");
                assert_eq!(fleet_size, 3);
                assert!(title.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
