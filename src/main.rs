//! pspuav - PSP-UAV results analyzer and route visualizer
//!
//! Post-processes the CSV output of the evolutionary patrol scheduler:
//! the `analyze` pipeline aggregates per-instance statistics into printed
//! reports, a LaTeX table and a consolidated CSV; the `plot`/`compare`
//! pipelines render drone trajectory maps.
//!
//! Exit codes:
//!   0 - Success (skipped steps due to missing inputs still count as success)
//!   1 - Runtime error (schema error, render failure, bad arguments)

mod analysis;
mod cli;
mod config;
mod error;
mod models;
mod report;
mod results;
mod routes;

use anyhow::{Context, Result};
use cli::{Args, Command};
use config::Config;
use error::PipelineError;
use std::path::Path;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Initialize logging
    init_logging(&args);

    info!("pspuav v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run(args) {
        error!("Run failed: {}", e);
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level())
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Dispatch the selected pipeline.
fn run(args: Args) -> Result<()> {
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    match &args.command {
        Command::Analyze { output } => {
            let summary_path = output
                .clone()
                .unwrap_or_else(|| config.paths.summary_csv.clone());
            run_analyze(&config, &summary_path)
        }
        Command::Plot {
            instance,
            fleet_size,
            title,
        } => {
            routes::render_single(
                &config.paths.results_dir,
                instance,
                *fleet_size,
                title.as_deref(),
                &config.plot,
            )?;
            Ok(())
        }
        Command::Compare { instance } => {
            routes::render_comparison(&config.paths.results_dir, instance, &config.plot)?;
            Ok(())
        }
        Command::Demo => run_demo(&config),
    }
}

/// The results aggregator: load every statistics file, print the general
/// table, the per-configuration analysis and the LaTeX table, and write
/// the consolidated CSV.
fn run_analyze(config: &Config, summary_path: &Path) -> Result<()> {
    let rule = "=".repeat(80);
    println!("{}", rule);
    println!("ANÁLISIS DE RESULTADOS - PSP-UAV");
    println!("{}", rule);

    let records = match results::load_results(&config.paths.results_dir) {
        Ok(records) => records,
        Err(err @ PipelineError::MissingFile(_)) => {
            warn!("{}", err);
            println!("❌ {}", err);
            return Ok(());
        }
        Err(err) => return Err(err).context("Failed to load statistics files"),
    };

    print!("{}", report::render_overview(&records));

    let groups = analysis::group_by_fleet_size(&records);
    print!("{}", analysis::render_fleet_report(&groups));

    println!("\n{}", rule);
    println!("TABLA LaTeX PARA EL INFORME");
    println!("{}", rule);
    println!();
    print!("{}", report::render_latex_table(&records));

    results::export_summary(&records, summary_path)
        .with_context(|| format!("Failed to write {}", summary_path.display()))?;
    println!("\n✅ Archivo consolidado guardado: {}", summary_path.display());

    Ok(())
}

/// Run the visualizer with the fixed example arguments.
fn run_demo(config: &Config) -> Result<()> {
    let rule = "=".repeat(70);
    println!("{}", rule);
    println!("VISUALIZACIÓN DE RUTAS PSP-UAV");
    println!("{}", rule);

    println!("\n📊 Generando visualización para PSP-UAV_01_a (k=3)...");
    routes::render_single(&config.paths.results_dir, "PSP-UAV_01_a", 3, None, &config.plot)?;

    println!("\n📊 Generando comparación para PSP-UAV_02_a...");
    routes::render_comparison(&config.paths.results_dir, "PSP-UAV_02_a", &config.plot)?;

    println!("\n✨ Visualizaciones completadas!");
    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .pspuav.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
