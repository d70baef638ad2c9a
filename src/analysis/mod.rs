//! Per-fleet-size aggregation and reporting.

pub mod aggregator;

pub use aggregator::{group_by_fleet_size, render_fleet_report, FleetGroup};
