//! Gerstner (trochoidal) wave displacement.
//!
//! Gerstner waves move surface particles on circles, which gives the
//! characteristic sharp crests and rounded troughs of deep water. The time
//! term is not scaled by a dispersion relation: every wave is periodic in time
//! with period 2π, which keeps the field cheap and exactly reproducible.
//!
//! ## Usage
//!
//! ```rust
//! use bevy::math::Vec2;
//! use buoyancy::water::{gerstner_displacement, WaveParameters};
//!
//! let wave = WaveParameters::new(10.0, 0.5, Vec2::Y, 0.5);
//! let offset = gerstner_displacement(&wave, Vec2::new(3.0, 4.0), 1.5);
//! assert!(offset.y.abs() <= 0.5);
//! ```

use bevy::math::{Vec2, Vec3};

use super::config::{WaveCluster, WaveParameters, CLUSTER_SIZE};

/// Calculate displacement from a single Gerstner wave.
///
/// # Arguments
/// * `wave` - Wave parameters
/// * `position` - World position on the horizontal plane (x, z)
/// * `time` - Animation time
///
/// # Returns
/// 3D displacement vector (x, y, z), y being the vertical component
pub fn gerstner_displacement(wave: &WaveParameters, position: Vec2, time: f32) -> Vec3 {
    let k = wave.wave_number();
    let d = wave.travel_direction();
    let phase = k * d.dot(position) + (time + wave.phase);
    let (sin_phase, cos_phase) = phase.sin_cos();
    let qa = wave.steepness * wave.amplitude;

    Vec3::new(
        qa * d.x * cos_phase,
        wave.amplitude * sin_phase,
        qa * d.y * cos_phase,
    )
}

impl WaveCluster {
    /// Mean displacement of the cluster's waves.
    pub fn displacement(&self, position: Vec2, time: f32) -> Vec3 {
        let sum: Vec3 = self
            .waves()
            .iter()
            .map(|wave| gerstner_displacement(wave, position, time))
            .sum();
        sum / CLUSTER_SIZE as f32
    }
}
