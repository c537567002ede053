use bevy::prelude::*;

/// Gravity used when no rapier context is available (m/s²), negative for downward.
pub const DEFAULT_GRAVITY: Vec3 = Vec3::new(0.0, -9.81, 0.0);

/// Fresh water at rest (kg/m³).
pub const WATER_DENSITY: f32 = 1000.0;

/// Vertices must sit at least this far below the plane to count as submerged.
pub const TINY_DEPTH: f32 = -1e-6;

/// Submerged volumes at or below this are treated as dry.
pub const TINY_VOLUME: f32 = 1e-6;

/// Number of clipping probes placed around a hull.
pub const DEFAULT_PROBE_COUNT: usize = 8;

/// Power iteration cap for the plane normal.
pub const MAX_PLANE_ITERATIONS: usize = 100;

/// Squared distance between successive iterates that ends the power iteration.
pub const PLANE_CONVERGENCE_TOLERANCE: f64 = 1e-12;

/// The scatter matrix inverse is squared this many times before iterating.
pub const INVERSE_SQUARINGS: usize = 3;

/// Relative determinant below which the scatter matrix is treated as singular.
pub const SINGULAR_DETERMINANT_TOLERANCE: f64 = 1e-9;
