//! Volumetric buoyancy for rigid bodies floating on procedural water.
//!
//! A closed hull is clipped every tick against a plane fitted to the wave
//! field under it. The submerged volume and its centroid drive a buoyant
//! force, linear drag and angular drag, which [`physics::BuoyancyPlugin`]
//! hands to rapier.

pub mod config;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod physics;
pub mod sets;
pub mod water;

pub use config::BuoyancyConfig;
pub use constants::*;
pub use error::{BuoyancyError, Result};
pub use physics::{BuoyancyPlugin, BuoyancyState, BuoyantHull};
pub use sets::BuoyancySet;
pub use water::{WaterEnvironment, WaveConfig, WavePreset};
