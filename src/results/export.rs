//! Consolidated summary CSV export.
//!
//! One row per record, sorted by `(instance, fleet_size)`, with the same
//! `Si`/`No` validity tokens the statistics input uses. Any existing file
//! at the output path is overwritten without warning.

use crate::error::{PipelineError, Result};
use crate::models::{sort_records, ExperimentRecord, SummaryRow};
use std::path::Path;
use tracing::info;

/// Write all records to the consolidated CSV at `path`.
pub fn export_summary(records: &[ExperimentRecord], path: &Path) -> Result<()> {
    let mut sorted = records.to_vec();
    sort_records(&mut sorted);

    let mut writer = csv::Writer::from_path(path).map_err(|source| schema(path, source))?;
    for record in &sorted {
        writer
            .serialize(SummaryRow::from(record))
            .map_err(|source| schema(path, source))?;
    }
    writer.flush()?;

    info!("Consolidated summary written to {}", path.display());
    Ok(())
}

/// Read a consolidated summary back into records.
///
/// Inverse of [`export_summary`]: re-loading an exported file yields the
/// same records the export was given, up to ordering.
pub fn load_summary(path: &Path) -> Result<Vec<ExperimentRecord>> {
    if !path.is_file() {
        return Err(PipelineError::MissingFile(path.to_path_buf()));
    }

    let mut reader = csv::Reader::from_path(path).map_err(|source| schema(path, source))?;
    let mut records = Vec::new();
    for row in reader.deserialize::<SummaryRow>() {
        let row = row.map_err(|source| schema(path, source))?;
        records.push(row.into_record());
    }

    Ok(records)
}

fn schema(path: &Path, source: csv::Error) -> PipelineError {
    PipelineError::Schema {
        file: path.to_path_buf(),
        source,
    }
}
