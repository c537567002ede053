//! Wave configuration for the deep-water surface.
//!
//! The surface is built from two wave clusters (a coarse and a fine swell).
//! Each cluster expands one median wave into eight related waves, which gives
//! a reasonably rich spectrum without any runtime spectral synthesis.

use bevy::math::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Number of waves a [`WaveCluster`] expands into.
pub const CLUSTER_SIZE: usize = 8;

/// Number of clusters averaged into the final field.
pub const CLUSTER_COUNT: usize = 2;

/// `(wavelength and amplitude multiplier, angular offset in turns)` for each
/// wave of a cluster, relative to the cluster median.
pub const CLUSTER_SPREAD: [(f32, f32); CLUSTER_SIZE] = [
    (1.0, 0.0),
    (0.5, -0.1),
    (2.0, 0.1),
    (1.25, 0.05),
    (0.75, 0.075),
    (1.5, -0.125),
    (0.825, 0.063),
    (0.65, -0.11),
];

/// Parameters of a single Gerstner wave.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveParameters {
    /// Wavelength in world units
    pub wavelength: f32,
    /// Vertical amplitude in world units
    pub amplitude: f32,
    /// Base direction on the horizontal (x, z) plane, normalized
    pub direction: Vec2,
    /// Steepness factor (Q) - 0.0 is a plain sine, higher values peak the crests
    pub steepness: f32,
    /// Rotation of `direction` about the vertical axis, in turns
    pub angle: f32,
    /// Phase offset added to the time term
    pub phase: f32,
}

impl WaveParameters {
    pub fn new(wavelength: f32, amplitude: f32, direction: Vec2, steepness: f32) -> Self {
        Self {
            wavelength: wavelength.max(0.1),
            amplitude,
            direction: direction.normalize_or_zero(),
            steepness,
            angle: 0.0,
            phase: 0.0,
        }
    }

    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    pub fn with_phase(mut self, phase: f32) -> Self {
        self.phase = phase;
        self
    }

    /// Wave number (k = 2π / wavelength)
    #[inline(always)]
    pub fn wave_number(&self) -> f32 {
        TAU / self.wavelength
    }

    /// Direction of travel after applying `angle`.
    #[inline]
    pub fn travel_direction(&self) -> Vec2 {
        Vec2::from_angle(self.angle * TAU).rotate(self.direction)
    }
}

/// One median wave expanded into [`CLUSTER_SIZE`] waves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveCluster {
    pub median_wavelength: f32,
    pub median_amplitude: f32,
    pub direction: Vec2,
    pub steepness: f32,
}

impl WaveCluster {
    pub fn new(median_wavelength: f32, median_amplitude: f32, direction: Vec2, steepness: f32) -> Self {
        Self {
            median_wavelength,
            median_amplitude,
            direction,
            steepness,
        }
    }

    /// The cluster's waves, each scaled and turned away from the median.
    pub fn waves(&self) -> [WaveParameters; CLUSTER_SIZE] {
        CLUSTER_SPREAD.map(|(scale, angle)| {
            WaveParameters::new(
                self.median_wavelength * scale,
                self.median_amplitude * scale,
                self.direction,
                self.steepness,
            )
            .with_angle(angle)
        })
    }
}

/// Complete surface configuration.
/// Can be serialized for scenario files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveConfig {
    /// Coarse and fine swell
    pub clusters: [WaveCluster; CLUSTER_COUNT],
    /// Rest water level (Y coordinate)
    pub base_level: f32,
    /// Global amplitude multiplier
    pub amplitude_scale: f32,
}

impl Default for WaveConfig {
    fn default() -> Self {
        WavePreset::default().to_config(0.0)
    }
}

/// Preset wave configurations for different sea states.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub enum WavePreset {
    /// Completely still water (no waves)
    Still,
    /// Light breeze
    Calm,
    /// Open ocean swell
    #[default]
    Ocean,
    /// Heavy sea
    Storm,
}

impl WavePreset {
    /// Create a WaveConfig from this preset.
    pub fn to_config(self, base_level: f32) -> WaveConfig {
        let direction = Vec2::Y;
        let ocean = [
            WaveCluster::new(25.0, 2.0, direction, 0.5),
            WaveCluster::new(10.0, 1.15, direction, 0.5),
        ];

        let (clusters, amplitude_scale) = match self {
            WavePreset::Still => (ocean, 0.0),
            WavePreset::Calm => (
                [
                    WaveCluster::new(12.0, 0.3, direction, 0.3),
                    WaveCluster::new(5.0, 0.15, direction, 0.3),
                ],
                1.0,
            ),
            WavePreset::Ocean => (ocean, 1.0),
            WavePreset::Storm => (
                [
                    WaveCluster::new(40.0, 4.0, direction, 0.7),
                    WaveCluster::new(15.0, 2.0, Vec2::new(0.3, 1.0), 0.6),
                ],
                1.0,
            ),
        };

        WaveConfig {
            clusters,
            base_level,
            amplitude_scale,
        }
    }
}
