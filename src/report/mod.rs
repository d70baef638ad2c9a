//! Report rendering: the plain-text overview table and the LaTeX table.

pub mod latex;

pub use latex::render_latex_table;

use crate::models::{sort_records, ExperimentRecord};
use std::collections::BTreeSet;

/// Format a fitness value as a thousands-grouped integer using `.` as the
/// grouping separator (report convention, `12.345` for 12345).
pub fn group_thousands(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    if rounded < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Render the general results table printed at the start of an analysis
/// run: input counts plus one fixed-width row per record, sorted by
/// `(instance, fleet_size)`.
pub fn render_overview(records: &[ExperimentRecord]) -> String {
    let instances: BTreeSet<&str> = records.iter().map(|r| r.instance.as_str()).collect();
    let sizes: BTreeSet<u32> = records.iter().map(|r| r.fleet_size).collect();

    let mut out = String::new();
    out.push_str(&format!("\n📁 Archivos procesados: {}\n", instances.len()));
    out.push_str(&format!("📊 Total de experimentos: {}\n", records.len()));
    out.push_str(&format!(
        "🔧 Configuraciones de drones: {:?}\n",
        sizes.iter().collect::<Vec<_>>()
    ));

    let rule = "=".repeat(80);
    out.push_str(&format!("\n{}\n", rule));
    out.push_str(&format!(
        "{:<18} {:<5} {:<15} {:<8} {}\n",
        "Instancia", "k", "Fitness", "Válida", "Tiempo (s)"
    ));
    out.push_str(&format!("{}\n", rule));

    let mut sorted = records.to_vec();
    sort_records(&mut sorted);

    for r in &sorted {
        let glyph = if r.is_valid { "✓" } else { "✗" };
        out.push_str(&format!(
            "{:<18} {:<5} {:<15} {:<8} {:.2}\n",
            r.instance,
            r.fleet_size,
            group_thousands(r.fitness),
            glyph,
            r.elapsed_seconds
        ));
    }

    out
}
