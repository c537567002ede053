//! Per-tick buoyancy: water plane fitting, hull clipping and force model.

pub mod body;
pub mod forces;
pub mod plane_fit;
pub mod rapier;
pub mod submersion;

pub use body::{step_buoyancy, BodyVolumeData, BuoyancyStep, BuoyantBody, Kinematics};
pub use forces::{compute_forces, BuoyancyForces, ForceModelConfig};
pub use plane_fit::{estimate_water_plane, fit_plane, sample_probe_ring, PlaneFit};
pub use rapier::{BuoyancyPlugin, BuoyancyState, BuoyantHull};
pub use submersion::{evaluate_against_plane, evaluate_submersion, submerged_volume_local, SubmersionResult};
