//! Statistics file discovery and parsing.
//!
//! Every `<instance>_estadisticas.csv` under the results directory becomes
//! a batch of `ExperimentRecord`s, one per row, with the instance name
//! taken from the file name. Nothing is filtered or deduplicated: repeated
//! `(instance, fleet_size)` runs all survive into the record list.

use crate::error::{PipelineError, Result};
use crate::models::{ExperimentRecord, StatsRow, STATS_SUFFIX};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Load every statistics file under `results_dir` into a unified record
/// list. Files are visited in file-name order, so the output is
/// deterministic for a given directory.
///
/// A missing directory is a `MissingFile` diagnostic; a malformed file is
/// a fatal `Schema` error naming the offending file.
pub fn load_results(results_dir: &Path) -> Result<Vec<ExperimentRecord>> {
    if !results_dir.is_dir() {
        return Err(PipelineError::MissingFile(results_dir.to_path_buf()));
    }

    let mut records = Vec::new();
    for path in discover_stats_files(results_dir) {
        let instance = instance_name(&path);
        debug!("Loading {} (instance {})", path.display(), instance);
        load_stats_file(&path, &instance, &mut records)?;
    }

    Ok(records)
}

/// Statistics files under `dir`, sorted by file name.
fn discover_stats_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.ends_with(&format!("{}.csv", STATS_SUFFIX)))
        })
        .collect();

    files.sort();
    files
}

/// Derive the instance identifier from a statistics file path by
/// stripping the fixed suffix from the stem.
fn instance_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    stem.strip_suffix(STATS_SUFFIX).unwrap_or(stem).to_string()
}

fn load_stats_file(
    path: &Path,
    instance: &str,
    records: &mut Vec<ExperimentRecord>,
) -> Result<()> {
    let mut reader = csv::Reader::from_path(path).map_err(|source| schema(path, source))?;

    for row in reader.deserialize::<StatsRow>() {
        let row = row.map_err(|source| schema(path, source))?;
        records.push(row.into_record(instance));
    }

    Ok(())
}

fn schema(path: &Path, source: csv::Error) -> PipelineError {
    PipelineError::Schema {
        file: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const HEADER: &str = "num_drones,iteraciones,ticks_operacion,urgencia_acumulada,solucion_valida,tiempo_s";

    fn write_stats(dir: &Path, name: &str, rows: &[&str]) {
        let mut content = String::from(HEADER);
        for row in rows {
            content.push('\n');
            content.push_str(row);
        }
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_single_file_single_row() {
        let dir = tempfile::tempdir().unwrap();
        write_stats(dir.path(), "foo_estadisticas.csv", &["3,100,50,12345.0,Si,1.23"]);

        let records = load_results(dir.path()).unwrap();
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.instance, "foo");
        assert_eq!(r.fleet_size, 3);
        assert_eq!(r.iterations, 100);
        assert_eq!(r.ticks, 50);
        assert_eq!(r.fitness, 12345.0);
        assert!(r.is_valid);
        assert_eq!(r.elapsed_seconds, 1.23);
    }

    #[test]
    fn test_repeated_configurations_are_kept() {
        let dir = tempfile::tempdir().unwrap();
        write_stats(
            dir.path(),
            "foo_estadisticas.csv",
            &["3,100,50,100.0,Si,1.0", "3,100,50,200.0,No,2.0"],
        );

        let records = load_results(dir.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].fleet_size, records[1].fleet_size);
    }

    #[test]
    fn test_non_matching_files_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        write_stats(dir.path(), "foo_estadisticas.csv", &["3,100,50,1.0,Si,1.0"]);
        fs::write(dir.path().join("foo_rutas.csv"), "not a stats file").unwrap();
        fs::write(dir.path().join("notes.txt"), "hi").unwrap();

        let records = load_results(dir.path()).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_files_visited_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        write_stats(dir.path(), "b_estadisticas.csv", &["1,1,1,1.0,Si,1.0"]);
        write_stats(dir.path(), "a_estadisticas.csv", &["1,1,1,1.0,Si,1.0"]);

        let records = load_results(dir.path()).unwrap();
        let instances: Vec<_> = records.iter().map(|r| r.instance.as_str()).collect();
        assert_eq!(instances, vec!["a", "b"]);
    }

    #[test]
    fn test_missing_directory_is_diagnostic() {
        let err = load_results(Path::new("no/such/dir")).unwrap_err();
        assert!(err.is_diagnostic());
        assert!(matches!(err, PipelineError::MissingFile(_)));
    }

    #[test]
    fn test_missing_column_is_schema_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("foo_estadisticas.csv"),
            "num_drones,iteraciones\n3,100",
        )
        .unwrap();

        let err = load_results(dir.path()).unwrap_err();
        match err {
            PipelineError::Schema { file, .. } => {
                assert!(file.to_string_lossy().contains("foo_estadisticas.csv"));
            }
            other => panic!("expected schema error, got {:?}", other),
        }
    }

    #[test]
    fn test_unparseable_number_is_schema_error() {
        let dir = tempfile::tempdir().unwrap();
        write_stats(dir.path(), "foo_estadisticas.csv", &["three,100,50,1.0,Si,1.0"]);

        let err = load_results(dir.path()).unwrap_err();
        assert!(!err.is_diagnostic());
        assert!(matches!(err, PipelineError::Schema { .. }));
    }
}
