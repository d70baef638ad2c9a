//! Error taxonomy for the results and route pipelines.
//!
//! Missing inputs and empty filters are diagnostics: the caller reports
//! them and skips the affected step. Schema errors are fatal, since the
//! aggregation cannot proceed on partial or ambiguous data.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// A requested statistics or route file (or directory) does not exist.
    /// Non-fatal: the corresponding step is skipped with a diagnostic.
    #[error("archivo no encontrado: {0}")]
    MissingFile(PathBuf),

    /// A required column is absent or a value failed to parse. Fatal.
    #[error("error de esquema en {file}: {source}")]
    Schema {
        file: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A fleet-size filter matched no rows; the output is not produced.
    #[error("no hay datos para {fleet_size} drones en {file}")]
    EmptyResult { file: PathBuf, fleet_size: u32 },

    /// Drone ids must be dense zero-based integers in `[0, fleet_size)`;
    /// the palette is indexed by id.
    #[error("dron {drone} fuera de rango para flota de {fleet_size}")]
    DroneIdOutOfRange { drone: u32, fleet_size: u32 },

    /// The plotting backend failed while drawing or saving an image.
    /// The artifact may be left incomplete.
    #[error("fallo al generar el gráfico: {0}")]
    Render(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;

impl PipelineError {
    /// Whether this error is a diagnostic the enclosing run can survive.
    pub fn is_diagnostic(&self) -> bool {
        matches!(
            self,
            PipelineError::MissingFile(_) | PipelineError::EmptyResult { .. }
        )
    }
}
