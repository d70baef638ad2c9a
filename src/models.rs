//! Data models for the PSP-UAV results pipelines.
//!
//! This module contains the core data structures shared by the results
//! aggregator and the route visualizer, plus the raw CSV row types that
//! mirror the files the evolutionary optimizer writes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fitness values at or above this magnitude encode an infeasibility
/// penalty rather than a real urgency score.
pub const PENALTY_THRESHOLD: f64 = 10_000_000.0;

/// The literal token the optimizer writes for a valid solution.
/// Case-sensitive; anything else means invalid.
pub const VALID_TOKEN: &str = "Si";

/// The token used when serializing an invalid solution.
pub const INVALID_TOKEN: &str = "No";

/// Suffix of per-instance statistics files (`<instance>_estadisticas.csv`).
pub const STATS_SUFFIX: &str = "_estadisticas";

/// Suffix of per-instance route files (`<instance>_rutas.csv`).
pub const ROUTES_SUFFIX: &str = "_rutas";

/// One aggregated experiment run.
///
/// `(instance, fleet_size)` is not unique: repeated runs of the same
/// configuration are expected and aggregated together downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentRecord {
    /// Identifier of the problem instance (map/base layout).
    pub instance: String,
    /// Number of drones in the run (k).
    pub fleet_size: u32,
    /// Algorithm iterations executed.
    pub iterations: u64,
    /// Simulated operational duration in ticks.
    pub ticks: u64,
    /// Accumulated urgency score; `>= PENALTY_THRESHOLD` encodes a penalty.
    pub fitness: f64,
    /// Validity flag as recorded by the optimizer. Tracked independently
    /// of the fitness magnitude; the two signals are never reconciled.
    pub is_valid: bool,
    /// Wall-clock time of the run in seconds.
    pub elapsed_seconds: f64,
}

impl ExperimentRecord {
    /// Whether the fitness magnitude marks this run as a penalty encoding.
    pub fn is_penalty(&self) -> bool {
        self.fitness >= PENALTY_THRESHOLD
    }
}

/// Raw row of a `<instance>_estadisticas.csv` file.
#[derive(Debug, Clone, Deserialize)]
pub struct StatsRow {
    pub num_drones: u32,
    pub iteraciones: u64,
    pub ticks_operacion: u64,
    pub urgencia_acumulada: f64,
    pub solucion_valida: String,
    pub tiempo_s: f64,
}

impl StatsRow {
    /// Attach the instance name (derived from the file name) to build the
    /// unified record.
    pub fn into_record(self, instance: &str) -> ExperimentRecord {
        ExperimentRecord {
            instance: instance.to_string(),
            fleet_size: self.num_drones,
            iterations: self.iteraciones,
            ticks: self.ticks_operacion,
            fitness: self.urgencia_acumulada,
            is_valid: self.solucion_valida == VALID_TOKEN,
            elapsed_seconds: self.tiempo_s,
        }
    }
}

/// Row of the consolidated summary CSV. The validity field uses the same
/// `Si`/`No` tokens as the statistics input, so the export round-trips.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryRow {
    pub instancia: String,
    pub num_drones: u32,
    pub iteraciones: u64,
    pub ticks: u64,
    pub urgencia_acumulada: f64,
    pub es_valida: String,
    pub tiempo_s: f64,
}

impl From<&ExperimentRecord> for SummaryRow {
    fn from(r: &ExperimentRecord) -> Self {
        Self {
            instancia: r.instance.clone(),
            num_drones: r.fleet_size,
            iteraciones: r.iterations,
            ticks: r.ticks,
            urgencia_acumulada: r.fitness,
            es_valida: if r.is_valid { VALID_TOKEN } else { INVALID_TOKEN }.to_string(),
            tiempo_s: r.elapsed_seconds,
        }
    }
}

impl SummaryRow {
    pub fn into_record(self) -> ExperimentRecord {
        ExperimentRecord {
            instance: self.instancia,
            fleet_size: self.num_drones,
            iterations: self.iteraciones,
            ticks: self.ticks,
            fitness: self.urgencia_acumulada,
            is_valid: self.es_valida == VALID_TOKEN,
            elapsed_seconds: self.tiempo_s,
        }
    }
}

/// Raw row of a `<instance>_rutas.csv` file.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RouteRow {
    pub num_drones: u32,
    pub dron: u32,
    pub tick: u64,
    pub fila: i64,
    pub columna: i64,
    pub accion: i32,
    pub base_origen: u32,
}

/// One grid position of a drone at a discrete simulation time step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutePoint {
    pub tick: u64,
    pub row: i64,
    pub col: i64,
    /// Opaque action code, passed through unchanged.
    pub action: i32,
    /// Launch base of the drone.
    pub origin_base: u32,
}

impl From<RouteRow> for RoutePoint {
    fn from(r: RouteRow) -> Self {
        Self {
            tick: r.tick,
            row: r.fila,
            col: r.columna,
            action: r.accion,
            origin_base: r.base_origen,
        }
    }
}

/// Ordered positions of one drone, in source-file (tick) order.
pub type Trajectory = Vec<RoutePoint>;

/// fleet size -> drone id -> trajectory. BTreeMaps keep both levels in
/// the ascending order the renderers iterate in.
pub type RouteMap = BTreeMap<u32, BTreeMap<u32, Trajectory>>;

/// Sort records by `(instance, fleet_size)`, the canonical report order.
pub fn sort_records(records: &mut [ExperimentRecord]) {
    records.sort_by(|a, b| {
        a.instance
            .cmp(&b.instance)
            .then(a.fleet_size.cmp(&b.fleet_size))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(instance: &str, fleet_size: u32, fitness: f64) -> ExperimentRecord {
        ExperimentRecord {
            instance: instance.to_string(),
            fleet_size,
            iterations: 100,
            ticks: 50,
            fitness,
            is_valid: true,
            elapsed_seconds: 1.0,
        }
    }

    #[test]
    fn test_penalty_threshold_boundary() {
        assert!(record("a", 1, 10_000_000.0).is_penalty());
        assert!(record("a", 1, 10_000_001.0).is_penalty());
        assert!(!record("a", 1, 9_999_999.0).is_penalty());
    }

    #[test]
    fn test_validity_token_is_case_sensitive() {
        let row = StatsRow {
            num_drones: 3,
            iteraciones: 100,
            ticks_operacion: 50,
            urgencia_acumulada: 12345.0,
            solucion_valida: "si".to_string(),
            tiempo_s: 1.23,
        };
        assert!(!row.into_record("foo").is_valid);
    }

    #[test]
    fn test_summary_row_round_trip() {
        let original = record("PSP-UAV_01_a", 3, 12345.0);
        let row = SummaryRow::from(&original);
        assert_eq!(row.es_valida, "Si");
        assert_eq!(row.into_record(), original);
    }

    #[test]
    fn test_sort_records_by_instance_then_fleet() {
        let mut records = vec![
            record("b", 1, 0.0),
            record("a", 5, 0.0),
            record("a", 3, 0.0),
        ];
        sort_records(&mut records);
        let order: Vec<_> = records
            .iter()
            .map(|r| (r.instance.as_str(), r.fleet_size))
            .collect();
        assert_eq!(order, vec![("a", 3), ("a", 5), ("b", 1)]);
    }
}
