//! Route visualizer: trajectory loading and plot rendering.

pub mod loader;
pub mod plot;

pub use loader::load_routes;
pub use plot::{render_comparison, render_single};
