use std::fs;
use std::path::Path;

use bevy::prelude::*;
use bevy_log::info;
use buoyancy::{BuoyancyConfig, WavePreset, WATER_DENSITY};
use ron::de::from_str;
use serde::{Deserialize, Serialize};

/// A box-shaped floating body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodySpec {
    pub name: String,
    pub half_extents: Vec3,
    /// kg/m³, also used by rapier to derive the body's mass
    pub density: f32,
    pub position: Vec3,
    /// XYZ Euler angles in degrees
    pub rotation: Vec3,
}

impl Default for BodySpec {
    fn default() -> Self {
        Self {
            name: "box".to_string(),
            half_extents: Vec3::splat(0.5),
            density: WATER_DENSITY * 0.5,
            position: Vec3::new(0.0, 2.0, 0.0),
            rotation: Vec3::ZERO,
        }
    }
}

impl BodySpec {
    pub fn transform(&self) -> Transform {
        let r = self.rotation * std::f32::consts::PI / 180.0;
        Transform::from_translation(self.position)
            .with_rotation(Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub name: String,
    pub waves: WavePreset,
    pub water_level: f32,
    pub buoyancy: BuoyancyConfig,
    pub bodies: Vec<BodySpec>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            name: "open water".to_string(),
            waves: WavePreset::Ocean,
            water_level: 0.0,
            buoyancy: BuoyancyConfig::default(),
            bodies: vec![
                BodySpec {
                    name: "raft".to_string(),
                    half_extents: Vec3::new(2.0, 0.25, 1.5),
                    density: 300.0,
                    position: Vec3::new(-8.0, 1.0, 0.0),
                    ..default()
                },
                BodySpec {
                    name: "crate".to_string(),
                    half_extents: Vec3::splat(0.5),
                    density: 600.0,
                    position: Vec3::new(0.0, 3.0, 0.0),
                    rotation: Vec3::new(0.0, 30.0, 15.0),
                },
                BodySpec {
                    name: "barge".to_string(),
                    half_extents: Vec3::new(6.0, 1.0, 2.0),
                    density: 450.0,
                    position: Vec3::new(12.0, 0.5, -4.0),
                    rotation: Vec3::new(0.0, 90.0, 0.0),
                },
            ],
        }
    }
}

pub fn parse_scenario(contents: &str) -> Result<Scenario, ron::Error> {
    from_str(contents)
}

/// Read a scenario file, or the built-in one when `path` is `None` or missing.
pub fn load_scenario(path: Option<&Path>) -> Result<Scenario, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        info!("No scenario given, using the built-in one");
        return Ok(Scenario::default());
    };

    if !path.exists() {
        info!(
            "Scenario file not found: {}. Using the built-in one.",
            path.display()
        );
        return Ok(Scenario::default());
    }

    let contents: String = fs::read_to_string(path)?;
    let scenario = parse_scenario(&contents)?;

    info!("Loaded scenario {:?} from {}", scenario.name, path.display());

    Ok(scenario)
}
