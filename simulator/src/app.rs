use std::time::Duration;

use bevy::diagnostic::FrameCount;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy_log::info;
use bevy_rapier3d::prelude::*;
use buoyancy::physics::{BodyVolumeData, BuoyancyState, BuoyantHull};
use buoyancy::{BuoyancyConfig, BuoyancyPlugin, BuoyancySet, WaterEnvironment};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::scenario::Scenario;

pub const TICKS_PER_SECOND: u32 = 60;

/// Largest random tilt added to every body at spawn, in radians.
const ORIENTATION_JITTER: f32 = 0.05;

#[derive(Debug, Clone, Copy)]
pub struct SimulationOptions {
    pub seed: u64,
    /// Log body state every this many ticks, never if zero
    pub report_every: u32,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            seed: 0,
            report_every: TICKS_PER_SECOND,
        }
    }
}

#[derive(Resource, Debug, Clone, Copy)]
struct ReportEvery(u32);

/// Name of a spawned scenario body.
#[derive(Component, Debug, Clone)]
pub struct SimulatedBody {
    pub name: String,
}

/// Snapshot of one body for reports.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyReport {
    pub name: String,
    pub height: f32,
    pub submerged_volume: f32,
    pub submerged_fraction: f32,
}

/// Install physics, water and the scenario's bodies into `app`.
///
/// The app advances by a fixed 1/60 s per `update`, whatever the wall clock
/// does, so runs with the same seed are reproducible.
pub fn setup_simulation(
    app: &mut App,
    scenario: &Scenario,
    options: &SimulationOptions,
) -> buoyancy::Result<()> {
    app.add_plugins(MinimalPlugins);
    app.add_plugins(TransformPlugin);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
        1.0 / TICKS_PER_SECOND as f64,
    )));

    app.add_plugins(RapierPhysicsPlugin::<NoUserData>::default());
    app.add_plugins(BuoyancyPlugin::new(scenario.buoyancy.clone()));

    app.insert_resource(WaterEnvironment::from_config(
        scenario.waves.to_config(scenario.water_level),
    ));
    app.insert_resource(ReportEvery(options.report_every));

    app.add_systems(Startup, configure_rapier_context);
    app.add_systems(PostUpdate, report_bodies.after(BuoyancySet::Apply));

    let mut rng = StdRng::seed_from_u64(options.seed);

    for body in &scenario.bodies {
        let collider = Collider::cuboid(body.half_extents.x, body.half_extents.y, body.half_extents.z);
        let hull = BuoyantHull::from_collider(&collider, body.density)?;

        let jitter = Quat::from_euler(
            EulerRot::XYZ,
            rng.gen_range(-ORIENTATION_JITTER..=ORIENTATION_JITTER),
            rng.gen_range(-ORIENTATION_JITTER..=ORIENTATION_JITTER),
            rng.gen_range(-ORIENTATION_JITTER..=ORIENTATION_JITTER),
        );
        let mut transform = body.transform();
        transform.rotation = jitter * transform.rotation;

        app.world_mut().spawn((
            Name::new(body.name.clone()),
            SimulatedBody {
                name: body.name.clone(),
            },
            RigidBody::Dynamic,
            collider,
            ColliderMassProperties::Density(body.density),
            hull,
            transform,
        ));
    }

    info!(
        "Scenario {:?}: {} bodies on {:?} water at y = {}",
        scenario.name,
        scenario.bodies.len(),
        scenario.waves,
        scenario.water_level
    );

    Ok(())
}

/// Use the scenario's gravity for the rapier context too.
fn configure_rapier_context(mut query: Query<&mut RapierConfiguration>, config: Res<BuoyancyConfig>) {
    for mut context in query.iter_mut() {
        context.gravity = config.gravity;
    }
}

pub fn collect_reports(world: &mut World) -> Vec<BodyReport> {
    let mut query = world.query::<(&SimulatedBody, &Transform, Option<&BodyVolumeData>, &BuoyancyState)>();
    query
        .iter(world)
        .map(|(body, transform, data, state)| BodyReport {
            name: body.name.clone(),
            height: transform.translation.y,
            submerged_volume: state.submerged_volume,
            submerged_fraction: data.map_or(0.0, |data| state.submerged_fraction(data)),
        })
        .collect()
}

fn report_bodies(
    frame: Res<FrameCount>,
    every: Res<ReportEvery>,
    bodies: Query<(&SimulatedBody, &Transform, &BodyVolumeData, &BuoyancyState)>,
) {
    if every.0 == 0 || frame.0 % every.0 != 0 {
        return;
    }

    let seconds = frame.0 as f32 / TICKS_PER_SECOND as f32;
    for (body, transform, data, state) in bodies.iter() {
        info!(
            "[t = {:>6.2}s] {:<10} y = {:>7.3}  submerged {:>7.3} m³ ({:>3.0}%)",
            seconds,
            body.name,
            transform.translation.y,
            state.submerged_volume,
            state.submerged_fraction(data) * 100.0
        );
    }
}

pub fn run_ticks(app: &mut App, ticks: u32) {
    for _ in 0..ticks {
        app.update();
    }
}
