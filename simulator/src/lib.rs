//! Headless scenario runner for the buoyancy plugin.

pub mod app;
pub mod scenario;

pub use app::{collect_reports, run_ticks, setup_simulation, BodyReport, SimulationOptions, TICKS_PER_SECOND};
pub use scenario::{load_scenario, parse_scenario, BodySpec, Scenario};
