//! Water surface height fields.
//!
//! A [`WaveField`] is a pure function of horizontal position and time. The
//! [`WaterEnvironment`] resource owns the field for a simulated space; bodies
//! only ever query it.

use bevy::math::{Vec2, Vec3};
use bevy_ecs::resource::Resource;

use super::config::{WaveConfig, CLUSTER_COUNT, CLUSTER_SIZE};

const WAVE_COUNT: usize = CLUSTER_COUNT * CLUSTER_SIZE;

/// Deterministic, side-effect free water surface.
pub trait WaveField: Send + Sync {
    /// Absolute surface height (Y) above the horizontal position (x, z).
    fn height(&self, position: Vec2, time: f32) -> f32;

    /// Offset of the surface particle whose rest position is (x, base level, z).
    fn displacement(&self, position: Vec2, time: f32) -> Vec3;

    /// Displaced world position of the surface particle resting at `position`.
    fn surface_point(&self, position: Vec2, time: f32) -> Vec3 {
        let offset = self.displacement(position, time);
        Vec3::new(
            position.x + offset.x,
            self.height(position, time),
            position.y + offset.z,
        )
    }
}

/// Flat, motionless water.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlatWater {
    pub level: f32,
}

impl FlatWater {
    pub fn new(level: f32) -> Self {
        Self { level }
    }
}

impl WaveField for FlatWater {
    fn height(&self, _position: Vec2, _time: f32) -> f32 {
        self.level
    }

    fn displacement(&self, _position: Vec2, _time: f32) -> Vec3 {
        Vec3::ZERO
    }
}

/// Precomputed constants for a single wave.
#[derive(Clone, Copy, Default)]
struct WaveConstants {
    /// Wave number k = 2π / wavelength
    k: f32,
    /// Rotated travel direction
    dir: Vec2,
    /// Scaled amplitude
    amplitude: f32,
    /// Steepness times scaled amplitude
    qa: f32,
    phase: f32,
}

/// Two averaged Gerstner wave clusters over a rest level.
///
/// Both clusters are expanded once at construction, so sampling is a flat
/// loop over sixteen waves.
#[derive(Clone)]
pub struct GerstnerWaveField {
    config: WaveConfig,
    waves: [WaveConstants; WAVE_COUNT],
}

impl GerstnerWaveField {
    pub fn new(config: WaveConfig) -> Self {
        let mut waves = [WaveConstants::default(); WAVE_COUNT];

        let expanded = config.clusters.iter().flat_map(|cluster| cluster.waves());
        for (slot, wave) in waves.iter_mut().zip(expanded) {
            let amplitude = wave.amplitude * config.amplitude_scale;
            *slot = WaveConstants {
                k: wave.wave_number(),
                dir: wave.travel_direction(),
                amplitude,
                qa: wave.steepness * amplitude,
                phase: wave.phase,
            };
        }

        Self { config, waves }
    }

    pub fn config(&self) -> &WaveConfig {
        &self.config
    }

    #[inline]
    fn phase(wave: &WaveConstants, position: Vec2, time: f32) -> f32 {
        wave.k * wave.dir.dot(position) + (time + wave.phase)
    }
}

impl Default for GerstnerWaveField {
    fn default() -> Self {
        Self::new(WaveConfig::default())
    }
}

impl WaveField for GerstnerWaveField {
    fn height(&self, position: Vec2, time: f32) -> f32 {
        let sum: f32 = self
            .waves
            .iter()
            .map(|w| w.amplitude * Self::phase(w, position, time).sin())
            .sum();

        self.config.base_level + sum / WAVE_COUNT as f32
    }

    fn displacement(&self, position: Vec2, time: f32) -> Vec3 {
        let mut offset = Vec3::ZERO;

        for w in &self.waves {
            let (sin_phase, cos_phase) = Self::phase(w, position, time).sin_cos();
            offset.x += w.qa * w.dir.x * cos_phase;
            offset.y += w.amplitude * sin_phase;
            offset.z += w.qa * w.dir.y * cos_phase;
        }

        offset / WAVE_COUNT as f32
    }
}

/// The water of one simulated space.
#[derive(Resource)]
pub struct WaterEnvironment {
    field: Box<dyn WaveField>,
}

impl WaterEnvironment {
    pub fn new(field: impl WaveField + 'static) -> Self {
        Self {
            field: Box::new(field),
        }
    }

    pub fn from_config(config: WaveConfig) -> Self {
        Self::new(GerstnerWaveField::new(config))
    }

    pub fn field(&self) -> &dyn WaveField {
        self.field.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::water::{WaveCluster, WavePreset};
    use std::f32::consts::TAU;

    #[test]
    fn test_still_water_height() {
        let field = GerstnerWaveField::new(WavePreset::Still.to_config(10.0));

        // Still water should always return base level
        assert_eq!(field.height(Vec2::ZERO, 0.0), 10.0);
        assert_eq!(field.height(Vec2::new(100.0, 100.0), 5.0), 10.0);
    }

    #[test]
    fn test_height_is_deterministic() {
        let field = GerstnerWaveField::default();
        let p = Vec2::new(12.5, -7.25);
        assert_eq!(field.height(p, 3.3).to_bits(), field.height(p, 3.3).to_bits());
        assert_eq!(field.displacement(p, 3.3), field.displacement(p, 3.3));
    }

    #[test]
    fn test_ocean_varies_in_time_and_space() {
        let field = GerstnerWaveField::default();
        let h1 = field.height(Vec2::ZERO, 0.0);
        let h2 = field.height(Vec2::ZERO, 1.0);
        let h3 = field.height(Vec2::new(5.0, 5.0), 0.0);
        assert!((h1 - h2).abs() > 1e-3, "Height should vary with time");
        assert!((h1 - h3).abs() > 1e-3, "Height should vary with position");
    }

    #[test]
    fn test_field_is_periodic_in_time() {
        let field = GerstnerWaveField::default();
        for p in [Vec2::ZERO, Vec2::new(3.0, -4.0), Vec2::new(-10.0, 8.0)] {
            let a = field.height(p, 0.5);
            let b = field.height(p, 0.5 + TAU);
            assert!((a - b).abs() < 1e-3, "Field should repeat after 2π ({a} vs {b})");
        }
    }

    #[test]
    fn test_field_averages_both_clusters() {
        let config = WavePreset::Ocean.to_config(0.0);
        let field = GerstnerWaveField::new(config.clone());
        let p = Vec2::new(2.0, 9.0);
        let expected: Vec3 = config
            .clusters
            .iter()
            .map(|c: &WaveCluster| c.displacement(p, 1.25))
            .sum::<Vec3>()
            / 2.0;
        assert!((field.displacement(p, 1.25) - expected).length() < 1e-5);
        assert!((field.height(p, 1.25) - expected.y).abs() < 1e-5);
    }

    #[test]
    fn test_heights_bounded_by_amplitude() {
        let field = GerstnerWaveField::default();
        let max_amplitude = 2.0 * 2.0; // largest wave of the coarse cluster
        for i in 0..50 {
            let t = i as f32 * 0.37;
            let h = field.height(Vec2::new(i as f32, -(i as f32) * 0.5), t);
            assert!(h.abs() <= max_amplitude);
        }
    }

    #[test]
    fn test_surface_point_on_flat_water() {
        let water = FlatWater::new(-2.0);
        let p = water.surface_point(Vec2::new(4.0, 5.0), 9.0);
        assert_eq!(p, Vec3::new(4.0, -2.0, 5.0));
    }
}
