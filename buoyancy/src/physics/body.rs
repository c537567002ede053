use bevy::math::Vec3;
use bevy::transform::components::Transform;
use bevy_ecs::component::Component;
use std::f32::consts::TAU;

use crate::constants::TINY_VOLUME;
use crate::geometry::{mesh_volume, TriangleSoup};
use crate::water::WaveField;

use super::forces::{compute_forces, BuoyancyForces, ForceModelConfig};
use super::submersion::{evaluate_submersion, SubmersionResult};

/// Per-body data computed once from the hull.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct BodyVolumeData {
    /// Total hull volume in m³
    pub volume: f32,
    /// Centroid of the hull volume, body-local
    pub local_centroid: Vec3,
    /// Body density in kg/m³, may be tuned at runtime
    pub density: f32,
    /// Extent of the unrotated hull along local X
    pub length: f32,
    /// Local-space offsets of the water probes
    pub probes: Vec<Vec3>,
    /// The hull encloses no volume; buoyancy is skipped
    pub degenerate: bool,
}

impl BodyVolumeData {
    /// Integrate the hull and lay out `probe_count` probes on the ellipse
    /// inscribed in its horizontal bounds.
    pub fn from_soup(soup: &TriangleSoup, density: f32, probe_count: usize) -> Self {
        let integral = mesh_volume(soup);
        let (min, max) = soup.local_aabb().unwrap_or_default();
        let center = (min + max) * 0.5;
        let half = (max - min) * 0.5;

        let probes = (0..probe_count)
            .map(|i| {
                let angle = i as f32 / probe_count as f32 * TAU;
                Vec3::new(
                    center.x + half.x * angle.cos(),
                    center.y,
                    center.z + half.z * angle.sin(),
                )
            })
            .collect();

        let degenerate = integral.volume <= TINY_VOLUME || integral.centroid.is_none();

        Self {
            volume: integral.volume,
            local_centroid: integral.centroid.unwrap_or(Vec3::ZERO),
            density,
            length: max.x - min.x,
            probes,
            degenerate,
        }
    }
}

/// Rigid-body state read at the start of a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Kinematics {
    pub linear_velocity: Vec3,
    pub angular_velocity: Vec3,
    pub mass: f32,
    /// World-space centre of mass
    pub center_of_mass: Vec3,
}

/// What the buoyancy driver needs from a host rigid body.
pub trait BuoyantBody {
    /// Hull in the frame of [`BuoyantBody::world_transform`].
    fn triangle_soup(&self) -> &TriangleSoup;

    fn world_transform(&self) -> Transform;

    fn kinematics(&self) -> Kinematics;

    /// Apply `force` at world-space `point` for this tick.
    fn apply_force_at_point(&mut self, force: Vec3, point: Vec3);

    fn apply_torque(&mut self, torque: Vec3);
}

/// Outcome of one [`step_buoyancy`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BuoyancyStep {
    /// No wave field to float in
    NoWater,
    /// The hull has no volume
    Degenerate,
    /// Nothing below the surface
    Dry,
    Applied {
        submersion: SubmersionResult,
        forces: BuoyancyForces,
    },
}

/// Run one buoyancy tick for `body`: fit the water plane, clip the hull and
/// apply the resulting forces.
pub fn step_buoyancy<B: BuoyantBody + ?Sized>(
    body: &mut B,
    data: &BodyVolumeData,
    water: Option<&dyn WaveField>,
    time: f32,
    gravity: Vec3,
    config: &ForceModelConfig,
) -> BuoyancyStep {
    let Some(field) = water else {
        return BuoyancyStep::NoWater;
    };
    if data.degenerate {
        return BuoyancyStep::Degenerate;
    }

    let transform = body.world_transform();
    let up = (-gravity).normalize_or(Vec3::Y);
    let Some(submersion) = evaluate_submersion(body.triangle_soup(), data, &transform, field, time, up) else {
        return BuoyancyStep::Dry;
    };

    let forces = compute_forces(&submersion, data, &body.kinematics(), gravity, config);
    forces.apply(body);

    BuoyancyStep::Applied { submersion, forces }
}
