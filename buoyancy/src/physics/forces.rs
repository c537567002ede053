//! Buoyant force, linear drag and angular drag from a submersion result.

use bevy::math::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::WATER_DENSITY;

use super::body::{BodyVolumeData, BuoyantBody, Kinematics};
use super::submersion::SubmersionResult;

/// Tunable constants of the force model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForceModelConfig {
    /// Fluid density in kg/m³
    pub fluid_density: f32,
    /// Linear drag coefficient (1/s) applied to the submerged part's mass
    pub linear_drag: f32,
    /// Angular drag coefficient (1/s) scaled by the squared hull length
    pub angular_drag: f32,
    /// Velocity of the water itself (currents)
    pub fluid_velocity: Vec3,
    /// Converts body density times mass into the mass the drag acts on
    pub volume_mass_scale: f32,
    /// Upper bound on body angular speed in rad/s
    pub max_angular_speed: f32,
}

impl Default for ForceModelConfig {
    fn default() -> Self {
        Self {
            fluid_density: WATER_DENSITY,
            linear_drag: 5.0,
            angular_drag: 0.5,
            fluid_velocity: Vec3::ZERO,
            volume_mass_scale: 1.0 / WATER_DENSITY,
            max_angular_speed: 1500.0_f32.to_radians(),
        }
    }
}

/// Forces for one body at one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BuoyancyForces {
    /// Buoyancy plus linear drag
    pub force: Vec3,
    /// World-space application point of `force` (the submerged centroid)
    pub point: Vec3,
    /// Angular drag torque
    pub torque: Vec3,
}

impl BuoyancyForces {
    /// Total torque about `center_of_mass`, including the moment of `force`.
    pub fn moment_about(&self, center_of_mass: Vec3) -> Vec3 {
        (self.point - center_of_mass).cross(self.force) + self.torque
    }

    pub fn apply<B: BuoyantBody + ?Sized>(&self, body: &mut B) {
        body.apply_force_at_point(self.force, self.point);
        body.apply_torque(self.torque);
    }
}

pub fn compute_forces(
    submersion: &SubmersionResult,
    data: &BodyVolumeData,
    kinematics: &Kinematics,
    gravity: Vec3,
    config: &ForceModelConfig,
) -> BuoyancyForces {
    // -g points up whatever sign the caller's vertical axis uses.
    let buoyancy = -gravity * config.fluid_density * submersion.volume;

    let volume_mass = data.density * config.volume_mass_scale * kinematics.mass;
    let partial_mass = if data.volume > 0.0 {
        volume_mass * submersion.volume / data.volume
    } else {
        0.0
    };

    let arm = submersion.centroid - kinematics.center_of_mass;
    let centroid_velocity = kinematics.linear_velocity + kinematics.angular_velocity.cross(arm);
    let drag = partial_mass * config.linear_drag * (config.fluid_velocity - centroid_velocity);

    let length_squared = data.length * data.length;
    let torque = -partial_mass * config.angular_drag * length_squared * kinematics.angular_velocity;

    BuoyancyForces {
        force: buoyancy + drag,
        point: submersion.centroid,
        torque,
    }
}
