//! LaTeX results table rendering.
//!
//! Emits a self-contained `table` block: one row per record, grouped by
//! instance with an `\hline` after each group, fleet sizes ascending
//! within a group. Two independent validity signals are rendered: the
//! recorded flag picks the `\checkmark`/`\texttimes` glyph, while the
//! fitness magnitude alone decides the italic penalty decoration.

use super::group_thousands;
use crate::models::{ExperimentRecord, PENALTY_THRESHOLD};
use itertools::Itertools;
use std::collections::BTreeMap;

const TABLE_HEADER: &str = r"\begin{table}[htbp]
\centering
\caption{Resultados experimentales del algoritmo evolutivo para PSP-UAV}
\label{tab:resultados_experimentos}
\small
\begin{tabular}{lrrrr}
\hline
\textbf{Instancia} & \textbf{$k$} & \textbf{Urgencia} & \textbf{Válida} & \textbf{Tiempo (s)} \\
\hline
";

const TABLE_FOOTER: &str = r"\end{tabular}
\begin{tablenotes}
\small
\item \textit{Nota:} Valores en cursiva representan soluciones inválidas ($\geq 10^7$).
\item \checkmark: Válida; \texttimes: Inválida (colisiones/fuera de límites).
\end{tablenotes}
\end{table}
";

/// Render the complete LaTeX table for the record list.
pub fn render_latex_table(records: &[ExperimentRecord]) -> String {
    let mut by_instance: BTreeMap<&str, Vec<&ExperimentRecord>> = BTreeMap::new();
    for r in records {
        by_instance.entry(r.instance.as_str()).or_default().push(r);
    }

    let mut out = String::from(TABLE_HEADER);

    for group in by_instance.values() {
        let rows = group
            .iter()
            .sorted_by_key(|r| r.fleet_size);
        for r in rows {
            out.push_str(&render_row(r));
        }
        out.push_str("\\hline\n");
    }

    out.push_str(TABLE_FOOTER);
    out
}

fn render_row(r: &ExperimentRecord) -> String {
    let glyph = if r.is_valid {
        r"\checkmark"
    } else {
        r"\texttimes"
    };

    format!(
        "{} & {} & {} & {} & {:.2} \\\\\n",
        escape_latex(&r.instance),
        r.fleet_size,
        format_fitness(r.fitness),
        glyph,
        r.elapsed_seconds
    )
}

/// Escape underscores so instance names render literally instead of
/// triggering subscripts.
fn escape_latex(name: &str) -> String {
    name.replace('_', r"\_")
}

/// Thousands-grouped fitness; penalty magnitudes are wrapped in italics.
fn format_fitness(fitness: f64) -> String {
    let grouped = group_thousands(fitness);
    if fitness >= PENALTY_THRESHOLD {
        format!(r"\textit{{{}}}", grouped)
    } else {
        grouped
    }
}
