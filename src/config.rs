//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.pspuav.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Input/output paths.
    #[serde(default)]
    pub paths: PathsConfig,

    /// Plot rendering settings.
    #[serde(default)]
    pub plot: PlotConfig,
}

/// Input and output path settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory holding the optimizer's per-instance CSV output.
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,

    /// Path of the consolidated summary CSV.
    #[serde(default = "default_summary_csv")]
    pub summary_csv: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            results_dir: default_results_dir(),
            summary_csv: default_summary_csv(),
        }
    }
}

fn default_results_dir() -> PathBuf {
    PathBuf::from("resultados")
}

fn default_summary_csv() -> PathBuf {
    PathBuf::from("resumen_completo.csv")
}

/// Plot rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotConfig {
    /// Width in pixels of a single-configuration map.
    #[serde(default = "default_map_width")]
    pub map_width: u32,

    /// Height in pixels of a single-configuration map.
    #[serde(default = "default_map_height")]
    pub map_height: u32,

    /// Width in pixels of each comparison panel.
    #[serde(default = "default_panel_width")]
    pub panel_width: u32,

    /// Height in pixels of each comparison panel.
    #[serde(default = "default_panel_height")]
    pub panel_height: u32,

    /// Largest fleet size that still gets a legend on comparison panels.
    #[serde(default = "default_legend_max_fleet")]
    pub legend_max_fleet: u32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            map_width: default_map_width(),
            map_height: default_map_height(),
            panel_width: default_panel_width(),
            panel_height: default_panel_height(),
            legend_max_fleet: default_legend_max_fleet(),
        }
    }
}

// 12x10 and 6x5 inches at 150 dpi in the original figures.
fn default_map_width() -> u32 {
    1800
}

fn default_map_height() -> u32 {
    1500
}

fn default_panel_width() -> u32 {
    900
}

fn default_panel_height() -> u32 {
    750
}

fn default_legend_max_fleet() -> u32 {
    5
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but
    /// can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".pspuav.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref dir) = args.results_dir {
            self.paths.results_dir = dir.clone();
        }
    }
}
