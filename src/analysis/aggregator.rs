//! Fleet-size aggregation and statistics.
//!
//! Groups the full record list by number of drones and computes the
//! per-configuration summary: valid/invalid counts, mean and range of the
//! fitness over valid runs, and mean elapsed time over all runs.

use crate::models::ExperimentRecord;
use crate::report::group_thousands;
use itertools::{Itertools, MinMaxResult};

/// Summary of every run sharing one fleet size.
#[derive(Debug, Clone, PartialEq)]
pub struct FleetGroup {
    pub fleet_size: u32,
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    /// Mean fitness restricted to valid runs; `None` when no run is valid.
    pub mean_valid_fitness: Option<f64>,
    /// Min and max fitness over valid runs; `None` when no run is valid.
    pub fitness_range: Option<(f64, f64)>,
    /// Mean elapsed time over all runs in the group, valid and invalid.
    pub mean_elapsed: f64,
}

/// Group records by fleet size, ascending. Every record lands in exactly
/// one group; nothing is dropped.
pub fn group_by_fleet_size(records: &[ExperimentRecord]) -> Vec<FleetGroup> {
    let by_k = records.iter().into_group_map_by(|r| r.fleet_size);
    let mut sizes: Vec<u32> = by_k.keys().copied().collect();
    sizes.sort_unstable();

    sizes
        .into_iter()
        .map(|fleet_size| summarize(fleet_size, &by_k[&fleet_size]))
        .collect()
}

fn summarize(fleet_size: u32, group: &[&ExperimentRecord]) -> FleetGroup {
    let valid: Vec<&&ExperimentRecord> = group.iter().filter(|r| r.is_valid).collect();

    let mean_valid_fitness = if valid.is_empty() {
        None
    } else {
        Some(valid.iter().map(|r| r.fitness).sum::<f64>() / valid.len() as f64)
    };

    let fitness_range = match valid.iter().map(|r| r.fitness).minmax() {
        MinMaxResult::NoElements => None,
        MinMaxResult::OneElement(f) => Some((f, f)),
        MinMaxResult::MinMax(lo, hi) => Some((lo, hi)),
    };

    let mean_elapsed = group.iter().map(|r| r.elapsed_seconds).sum::<f64>() / group.len() as f64;

    FleetGroup {
        fleet_size,
        total: group.len(),
        valid: valid.len(),
        invalid: group.len() - valid.len(),
        mean_valid_fitness,
        fitness_range,
        mean_elapsed,
    }
}

/// Render the per-configuration analysis as deterministic text.
pub fn render_fleet_report(groups: &[FleetGroup]) -> String {
    let mut out = String::new();
    let rule = "=".repeat(80);

    out.push_str(&format!("\n{}\n", rule));
    out.push_str("ANÁLISIS POR CONFIGURACIÓN DE DRONES\n");
    out.push_str(&format!("{}\n", rule));

    for g in groups {
        out.push_str(&format!("\n🔹 k={} drones:\n", g.fleet_size));
        out.push_str(&format!(
            "   ✅ Soluciones válidas: {}/{}\n",
            g.valid, g.total
        ));
        out.push_str(&format!(
            "   ❌ Soluciones inválidas: {}/{}\n",
            g.invalid, g.total
        ));

        if let Some(mean) = g.mean_valid_fitness {
            out.push_str(&format!(
                "   📊 Fitness promedio (válidos): {}\n",
                group_thousands(mean)
            ));
        }
        if let Some((lo, hi)) = g.fitness_range {
            out.push_str(&format!(
                "   📈 Rango fitness: {} - {}\n",
                group_thousands(lo),
                group_thousands(hi)
            ));
        }

        out.push_str(&format!("   ⏱️  Tiempo promedio: {:.2}s\n", g.mean_elapsed));
    }

    out
}
