//! Rapier integration for buoyant hulls.
//!
//! Entities carrying a [`BuoyantHull`] get a [`BodyVolumeData`] the first
//! frame they are seen. Every frame after that, the water plane under each
//! hull is fitted, the hull is clipped against it and the resulting force and
//! torque are written to the body's [`ExternalForce`] before rapier steps.

use bevy::prelude::*;
use bevy_log::{debug, warn};
use bevy_rapier3d::prelude::*;

use crate::config::BuoyancyConfig;
use crate::error::Result;
use crate::geometry::TriangleSoup;
use crate::sets::BuoyancySet;
use crate::water::WaterEnvironment;

use super::body::{step_buoyancy, BodyVolumeData, BuoyancyStep, BuoyantBody, Kinematics};

/// Hull geometry and density of a floating rigid body.
#[derive(Component, Debug, Clone)]
#[require(ExternalForce, Velocity, ReadMassProperties, BuoyancyState)]
pub struct BuoyantHull {
    pub soup: TriangleSoup,
    /// kg/m³
    pub density: f32,
}

impl BuoyantHull {
    pub fn new(soup: TriangleSoup, density: f32) -> Self {
        Self { soup, density }
    }

    pub fn from_collider(collider: &Collider, density: f32) -> Result<Self> {
        Ok(Self::new(TriangleSoup::from_collider(collider)?, density))
    }
}

/// Last tick's submersion of a hull.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct BuoyancyState {
    pub submerged_volume: f32,
    /// World-space centre of buoyancy, `None` while dry
    pub submerged_centroid: Option<Vec3>,
}

impl BuoyancyState {
    /// Fraction of the hull below the surface.
    pub fn submerged_fraction(&self, data: &BodyVolumeData) -> f32 {
        if data.volume > 0.0 {
            (self.submerged_volume / data.volume).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

#[derive(Default)]
pub struct BuoyancyPlugin {
    pub config: BuoyancyConfig,
}

impl BuoyancyPlugin {
    pub fn new(config: BuoyancyConfig) -> Self {
        Self { config }
    }
}

impl Plugin for BuoyancyPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.clone());

        app.configure_sets(PostUpdate, BuoyancySet::Apply.before(PhysicsSet::SyncBackend));

        app.add_systems(Update, init_buoyant_hulls.in_set(BuoyancySet::Init));
        app.add_systems(PostUpdate, apply_buoyancy.in_set(BuoyancySet::Apply));
    }
}

/// Compute volume data for hulls that don't have it yet.
pub fn init_buoyant_hulls(
    mut commands: Commands,
    config: Res<BuoyancyConfig>,
    hulls: Query<(Entity, &BuoyantHull), Without<BodyVolumeData>>,
) {
    for (entity, hull) in hulls.iter() {
        let data = BodyVolumeData::from_soup(&hull.soup, hull.density, config.probe_count);

        if data.degenerate {
            warn!(
                "Buoyant hull on {:?} encloses no volume ({} triangles), it will not float",
                entity,
                hull.soup.triangle_count()
            );
        } else {
            debug!(
                "Buoyant hull on {:?}: volume {:.3} m³, length {:.2} m",
                entity, data.volume, data.length
            );
        }

        commands.entity(entity).insert(data);
    }
}

/// A rapier body seen through [`BuoyantBody`] for one tick.
struct RapierHull<'a> {
    soup: &'a TriangleSoup,
    transform: Transform,
    kinematics: Kinematics,
    external: &'a mut ExternalForce,
}

impl BuoyantBody for RapierHull<'_> {
    fn triangle_soup(&self) -> &TriangleSoup {
        self.soup
    }

    fn world_transform(&self) -> Transform {
        self.transform
    }

    fn kinematics(&self) -> Kinematics {
        self.kinematics
    }

    fn apply_force_at_point(&mut self, force: Vec3, point: Vec3) {
        self.external.force += force;
        self.external.torque += (point - self.kinematics.center_of_mass).cross(force);
    }

    fn apply_torque(&mut self, torque: Vec3) {
        self.external.torque += torque;
    }
}

/// Gravity of the first rapier context, or the configured fallback.
fn current_gravity(contexts: &Query<&RapierConfiguration>, config: &BuoyancyConfig) -> Vec3 {
    contexts
        .iter()
        .next()
        .map_or(config.gravity, |context| context.gravity)
}

/// Wave time for an elapsed clock. The wave field repeats every 2π s, so
/// wrapping in f64 keeps f32 precision on long runs.
fn wave_time(elapsed_secs: f64) -> f32 {
    (elapsed_secs % std::f64::consts::TAU) as f32
}

pub fn apply_buoyancy(
    time: Res<Time>,
    config: Res<BuoyancyConfig>,
    water: Option<Res<WaterEnvironment>>,
    contexts: Query<&RapierConfiguration>,
    mut warned_no_water: Local<bool>,
    mut bodies: Query<(
        &BuoyantHull,
        &BodyVolumeData,
        &Transform,
        &mut Velocity,
        &ReadMassProperties,
        &mut ExternalForce,
        &mut BuoyancyState,
    )>,
) {
    let field = water.as_deref().map(WaterEnvironment::field);
    if field.is_none() && !*warned_no_water {
        warn!("No WaterEnvironment resource, buoyancy is disabled");
        *warned_no_water = true;
    }

    let gravity = current_gravity(&contexts, &config);
    let t = wave_time(time.elapsed_secs_f64());
    let model = &config.force_model;

    for (hull, data, transform, mut velocity, mass_props, mut external, mut state) in bodies.iter_mut() {
        let props = mass_props.get();
        // Mass properties are filled in by rapier after the first step.
        let mass = if props.mass > 0.0 {
            props.mass
        } else {
            data.density * data.volume
        };
        let local_com = if props.mass > 0.0 {
            props.local_center_of_mass
        } else {
            data.local_centroid
        };

        *external = ExternalForce::default();

        let mut body = RapierHull {
            soup: &hull.soup,
            transform: *transform,
            kinematics: Kinematics {
                linear_velocity: velocity.linvel,
                angular_velocity: velocity.angvel,
                mass,
                center_of_mass: transform.translation + transform.rotation * local_com,
            },
            external: &mut *external,
        };

        *state = match step_buoyancy(&mut body, data, field, t, gravity, model) {
            BuoyancyStep::Applied { submersion, .. } => BuoyancyState {
                submerged_volume: submersion.volume,
                submerged_centroid: Some(submersion.centroid),
            },
            BuoyancyStep::NoWater | BuoyancyStep::Degenerate | BuoyancyStep::Dry => BuoyancyState::default(),
        };

        let speed = velocity.angvel.length();
        if speed > model.max_angular_speed {
            velocity.angvel *= model.max_angular_speed / speed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::WATER_DENSITY;
    use crate::water::{FlatWater, WavePreset};

    fn app_with_water(water: Option<WaterEnvironment>) -> App {
        let mut app = App::new();
        app.init_resource::<Time>();
        app.add_plugins(BuoyancyPlugin::default());
        if let Some(water) = water {
            app.insert_resource(water);
        }
        app
    }

    fn spawn_cube(app: &mut App, height: f32) -> Entity {
        app.world_mut()
            .spawn((
                BuoyantHull::new(TriangleSoup::cuboid(Vec3::ONE), 500.0),
                Transform::from_xyz(0.0, height, 0.0),
            ))
            .id()
    }

    #[test]
    fn test_hull_gets_volume_data_and_force() {
        let mut app = app_with_water(Some(WaterEnvironment::new(FlatWater::new(0.0))));
        let cube = spawn_cube(&mut app, 0.0);

        app.update();

        let world = app.world();
        let data = world.get::<BodyVolumeData>(cube).expect("volume data should be attached");
        assert!((data.volume - 8.0).abs() < 1e-3);

        let state = world.get::<BuoyancyState>(cube).unwrap();
        assert!((state.submerged_volume - 4.0).abs() < 1e-3);
        assert!((state.submerged_fraction(data) - 0.5).abs() < 1e-3);

        let external = world.get::<ExternalForce>(cube).unwrap();
        let expected = WATER_DENSITY * 4.0 * 9.81;
        assert!(
            (external.force.y - expected).abs() / expected < 1e-3,
            "Force {} should be {expected}",
            external.force.y
        );
        assert!(external.torque.length() < 1.0);
    }

    #[test]
    fn test_dry_hull_has_no_force() {
        let mut app = app_with_water(Some(WaterEnvironment::new(FlatWater::new(0.0))));
        let cube = spawn_cube(&mut app, 10.0);

        app.update();

        let world = app.world();
        assert_eq!(*world.get::<ExternalForce>(cube).unwrap(), ExternalForce::default());
        assert_eq!(world.get::<BuoyancyState>(cube).unwrap().submerged_centroid, None);
    }

    #[test]
    fn test_missing_water_skips_bodies() {
        let mut app = app_with_water(None);
        let cube = spawn_cube(&mut app, 0.0);

        app.update();
        app.update();

        let world = app.world();
        assert!(world.get::<BodyVolumeData>(cube).is_some());
        assert_eq!(world.get::<ExternalForce>(cube).unwrap().force, Vec3::ZERO);
    }

    #[test]
    fn test_degenerate_hull_is_skipped() {
        let mut app = app_with_water(Some(WaterEnvironment::from_config(WavePreset::Ocean.to_config(0.0))));
        let empty = app
            .world_mut()
            .spawn((
                BuoyantHull::new(TriangleSoup::default(), 500.0),
                Transform::default(),
            ))
            .id();

        app.update();

        let world = app.world();
        assert!(world.get::<BodyVolumeData>(empty).unwrap().degenerate);
        assert_eq!(world.get::<ExternalForce>(empty).unwrap().force, Vec3::ZERO);
    }

    #[test]
    fn test_angular_speed_is_clamped() {
        let mut app = app_with_water(Some(WaterEnvironment::new(FlatWater::new(0.0))));
        let cube = spawn_cube(&mut app, 0.0);
        app.world_mut().entity_mut(cube).insert(Velocity::angular(Vec3::Y * 1000.0));

        app.update();

        let max = BuoyancyConfig::default().force_model.max_angular_speed;
        let angvel = app.world().get::<Velocity>(cube).unwrap().angvel;
        assert!((angvel.length() - max).abs() < 1e-3);
    }

    #[test]
    fn test_hull_from_collider() {
        let hull = BuoyantHull::from_collider(&Collider::cuboid(1.0, 0.5, 2.0), 700.0).unwrap();
        assert_eq!(hull.soup.triangle_count(), 12);
        assert!(BuoyantHull::from_collider(&Collider::ball(1.0), 700.0).is_err());
    }

    #[test]
    fn test_wave_time_wraps_without_losing_precision() {
        let tau = std::f64::consts::TAU;
        assert_eq!(wave_time(0.0), 0.0);
        assert!((wave_time(tau + 1.5) - 1.5).abs() < 1e-6);

        // A million periods in: the raw f32 clock has ~0.5 s resolution here.
        let t = wave_time(1e6 * tau + 0.3);
        assert!((t - 0.3).abs() < 1e-4, "Wrapped time was {t}");

        for i in 0..100 {
            let t = wave_time(i as f64 * 123.456);
            assert!((0.0..std::f32::consts::TAU + 1e-6).contains(&t), "{t} out of range");
        }
    }
}
