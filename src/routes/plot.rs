//! Trajectory plot rendering.
//!
//! Draws drone trajectories as connected lines on the simulation grid,
//! one color per drone, with a filled circle at the launch point and a
//! square at the final position. The y-axis is inverted so row 0 sits at
//! the top, matching the grid's row/column convention.

use crate::config::PlotConfig;
use crate::error::{PipelineError, Result};
use crate::models::{RouteMap, Trajectory, ROUTES_SUFFIX};
use crate::routes::loader::load_routes;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::warn;

/// matplotlib's tab10 categorical palette.
const TAB10: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

/// Path of the route trace for an instance.
pub fn route_file(results_dir: &Path, instance: &str) -> PathBuf {
    results_dir.join(format!("{}{}.csv", instance, ROUTES_SUFFIX))
}

/// Render the trajectory map of one `(instance, fleet_size)` configuration.
///
/// Returns `Ok(None)` without producing a file when the route file is
/// missing or holds no rows for the requested fleet size; both cases are
/// reported as diagnostics.
pub fn render_single(
    results_dir: &Path,
    instance: &str,
    fleet_size: u32,
    title: Option<&str>,
    cfg: &PlotConfig,
) -> Result<Option<PathBuf>> {
    let path = route_file(results_dir, instance);
    let routes = match load_routes(&path, Some(fleet_size)) {
        Ok(routes) => routes,
        Err(err @ PipelineError::MissingFile(_)) => {
            warn!("{}", err);
            println!("❌ {}", err);
            return Ok(None);
        }
        Err(err) => return Err(err),
    };

    let Some(trajectories) = routes.get(&fleet_size) else {
        let err = PipelineError::EmptyResult { file: path, fleet_size };
        warn!("{}", err);
        println!("❌ {}", err);
        return Ok(None);
    };

    validate_drone_ids(trajectories, fleet_size)?;

    let output = results_dir.join(format!("{}_k{}_mapa.png", instance, fleet_size));
    let default_title = format!("{} - {} drones", instance, fleet_size);
    let title = title.unwrap_or(&default_title);

    draw_single(&output, trajectories, fleet_size, title, cfg)
        .map_err(|e| PipelineError::Render(e.to_string()))?;

    println!("✅ Gráfico guardado: {}", output.display());
    Ok(Some(output))
}

/// Render every configuration of an instance side by side in one image.
///
/// Returns `Ok(None)` when the route file is missing or empty.
pub fn render_comparison(
    results_dir: &Path,
    instance: &str,
    cfg: &PlotConfig,
) -> Result<Option<PathBuf>> {
    let path = route_file(results_dir, instance);
    let routes = match load_routes(&path, None) {
        Ok(routes) => routes,
        Err(err @ PipelineError::MissingFile(_)) => {
            warn!("{}", err);
            println!("❌ {}", err);
            return Ok(None);
        }
        Err(err) => return Err(err),
    };

    if routes.is_empty() {
        warn!("No route data in {}", path.display());
        println!("❌ No hay datos de rutas en {}", path.display());
        return Ok(None);
    }

    for (fleet_size, trajectories) in &routes {
        validate_drone_ids(trajectories, *fleet_size)?;
    }

    let output = results_dir.join(format!("{}_comparacion.png", instance));
    let title = format!("{} - Comparación de configuraciones", instance);

    draw_comparison(&output, &routes, &title, cfg)
        .map_err(|e| PipelineError::Render(e.to_string()))?;

    println!("✅ Gráfico comparativo guardado: {}", output.display());
    Ok(Some(output))
}

/// Categorical palette sized exactly to the fleet: evenly spaced tab10
/// entries for up to ten drones, wrapping around beyond that.
pub fn fleet_palette(fleet_size: u32) -> Vec<RGBColor> {
    let k = fleet_size as usize;
    (0..k)
        .map(|i| {
            if k <= TAB10.len() {
                if k == 1 {
                    TAB10[0]
                } else {
                    TAB10[i * (TAB10.len() - 1) / (k - 1)]
                }
            } else {
                TAB10[i % TAB10.len()]
            }
        })
        .collect()
}

/// Drone ids must be dense zero-based indices into the palette.
fn validate_drone_ids(trajectories: &BTreeMap<u32, Trajectory>, fleet_size: u32) -> Result<()> {
    for &drone in trajectories.keys() {
        if drone >= fleet_size {
            return Err(PipelineError::DroneIdOutOfRange { drone, fleet_size });
        }
    }
    Ok(())
}

fn draw_single(
    output: &Path,
    trajectories: &BTreeMap<u32, Trajectory>,
    fleet_size: u32,
    title: &str,
    cfg: &PlotConfig,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let root =
        BitMapBackend::new(output, (cfg.map_width, cfg.map_height)).into_drawing_area();
    root.fill(&WHITE)?;
    draw_config(&root, trajectories, fleet_size, title, 2, true)?;
    root.present()?;
    Ok(())
}

fn draw_comparison(
    output: &Path,
    routes: &RouteMap,
    title: &str,
    cfg: &PlotConfig,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let panel_count = routes.len() as u32;
    let size = (cfg.panel_width * panel_count, cfg.panel_height);

    let root = BitMapBackend::new(output, size).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(title, ("sans-serif", 30))?;

    let panels = root.split_evenly((1, routes.len()));
    for (panel, (fleet_size, trajectories)) in panels.iter().zip(routes) {
        draw_config(
            panel,
            trajectories,
            *fleet_size,
            &format!("k={} drones", fleet_size),
            1,
            *fleet_size <= cfg.legend_max_fleet,
        )?;
    }

    root.present()?;
    Ok(())
}

/// Draw one configuration into the given area: a line per drone plus
/// start/end markers, with the y-axis inverted.
fn draw_config(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    trajectories: &BTreeMap<u32, Trajectory>,
    fleet_size: u32,
    title: &str,
    line_width: u32,
    with_legend: bool,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let (x_range, y_range) = grid_ranges(trajectories);

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 26))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        // Descending y range puts row 0 at the top of the grid.
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc("Columna")
        .y_desc("Fila")
        .draw()?;

    let palette = fleet_palette(fleet_size);
    for (&drone, trajectory) in trajectories {
        let color = palette[drone as usize];
        let points: Vec<(f64, f64)> = trajectory
            .iter()
            .map(|p| (p.col as f64, p.row as f64))
            .collect();
        let (Some(&first), Some(&last)) = (points.first(), points.last()) else {
            continue;
        };

        let style = ShapeStyle::from(color.mix(0.6)).stroke_width(line_width);
        chart
            .draw_series(LineSeries::new(points.iter().copied(), style))?
            .label(format!("Dron {}", drone))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));

        chart.draw_series(std::iter::once(Circle::new(first, 6, color.filled())))?;
        chart.draw_series(std::iter::once(
            EmptyElement::at(last) + Rectangle::new([(-5, -5), (5, 5)], color.filled()),
        ))?;
    }

    if with_legend {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    Ok(())
}

/// Column range (ascending) and row range (descending, for the inverted
/// axis) covering every point, padded by one cell.
fn grid_ranges(
    trajectories: &BTreeMap<u32, Trajectory>,
) -> (std::ops::Range<f64>, std::ops::Range<f64>) {
    let mut min_col = i64::MAX;
    let mut max_col = i64::MIN;
    let mut min_row = i64::MAX;
    let mut max_row = i64::MIN;

    for point in trajectories.values().flatten() {
        min_col = min_col.min(point.col);
        max_col = max_col.max(point.col);
        min_row = min_row.min(point.row);
        max_row = max_row.max(point.row);
    }

    if min_col > max_col {
        // No points at all; give the chart a unit window.
        return (0.0..1.0, 1.0..0.0);
    }

    (
        (min_col - 1) as f64..(max_col + 1) as f64,
        (max_row + 1) as f64..(min_row - 1) as f64,
    )
}
