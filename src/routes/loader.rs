//! Route trace parsing.
//!
//! Builds the two-level `fleet size -> drone id -> trajectory` mapping
//! from a `<instance>_rutas.csv` file. Rows are appended in file order,
//! which the optimizer guarantees to be tick-ordered; no re-sort is done
//! here. An optional fleet-size filter skips non-matching rows while
//! streaming, so filtered configurations are never materialized.

use crate::error::{PipelineError, Result};
use crate::models::{RouteMap, RouteRow};
use std::path::Path;
use tracing::debug;

/// Load trajectories from `path`, keeping only `fleet_filter` when set.
pub fn load_routes(path: &Path, fleet_filter: Option<u32>) -> Result<RouteMap> {
    if !path.is_file() {
        return Err(PipelineError::MissingFile(path.to_path_buf()));
    }

    let mut reader = csv::Reader::from_path(path).map_err(|source| schema(path, source))?;

    let mut routes = RouteMap::new();
    for row in reader.deserialize::<RouteRow>() {
        let row = row.map_err(|source| schema(path, source))?;

        if fleet_filter.is_some_and(|k| k != row.num_drones) {
            continue;
        }

        routes
            .entry(row.num_drones)
            .or_default()
            .entry(row.dron)
            .or_default()
            .push(row.into());
    }

    debug!(
        "Loaded {} configurations from {}",
        routes.len(),
        path.display()
    );
    Ok(routes)
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
    use std::path::PathBuf;

    const HEADER: &str = "num_drones,dron,tick,fila,columna,accion,base_origen";

    fn write_routes(rows: &[&str]) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("foo_rutas.csv");
        let mut content = String::from(HEADER);
        for row in rows {
            content.push('\n');
            content.push_str(row);
        }
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_filter_keeps_only_matching_fleet() {
        let (_dir, path) = write_routes(&[
            "2,0,0,1,1,0,0",
            "2,1,0,5,5,0,1",
            "2,0,1,1,2,1,0",
            "3,0,0,9,9,0,0",
        ]);

        let routes = load_routes(&path, Some(2)).unwrap();
        assert_eq!(routes.keys().copied().collect::<Vec<_>>(), vec![2]);

        let drones = &routes[&2];
        assert_eq!(drones.keys().copied().collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(drones[&0].len(), 2);
        assert_eq!(drones[&1].len(), 1);
    }

    #[test]
    fn test_points_keep_file_order() {
        let (_dir, path) = write_routes(&[
            "1,0,0,3,4,0,0",
            "1,0,1,3,5,2,0",
            "1,0,2,4,5,0,0",
        ]);

        let routes = load_routes(&path, None).unwrap();
        let traj = &routes[&1][&0];
        let ticks: Vec<u64> = traj.iter().map(|p| p.tick).collect();
        assert_eq!(ticks, vec![0, 1, 2]);
        assert_eq!((traj[1].row, traj[1].col), (3, 5));
        // Opaque fields pass through unchanged.
        assert_eq!(traj[1].action, 2);
        assert_eq!(traj[0].origin_base, 0);
    }

    #[test]
    fn test_no_filter_loads_all_configurations() {
        let (_dir, path) = write_routes(&["2,0,0,1,1,0,0", "3,0,0,2,2,0,0", "5,4,0,3,3,0,0"]);

        let routes = load_routes(&path, None).unwrap();
        assert_eq!(routes.keys().copied().collect::<Vec<_>>(), vec![2, 3, 5]);
    }

    #[test]
    fn test_missing_file_is_diagnostic() {
        let err = load_routes(Path::new("no/such/foo_rutas.csv"), None).unwrap_err();
        assert!(err.is_diagnostic());
        assert!(matches!(err, PipelineError::MissingFile(_)));
    }

    #[test]
    fn test_malformed_row_is_schema_error() {
        let (_dir, path) = write_routes(&["2,zero,0,1,1,0,0"]);
        let err = load_routes(&path, None).unwrap_err();
        assert!(matches!(err, PipelineError::Schema { .. }));
    }
}
