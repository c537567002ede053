//! Best-fit water plane under a hull.
//!
//! A ring of probes around the hull is dropped onto the wave field, and the
//! plane through their centroid with the direction of least spread as normal
//! approximates the local surface. The least-spread direction is the
//! eigenvector of the smallest eigenvalue of the probes' scatter matrix `S`,
//! which is the dominant eigenvector of `S⁻¹` and is found by power iteration.

use bevy::math::{Vec2, Vec3};
use bevy::transform::components::Transform;
use nalgebra::{Matrix3, Vector3};

use crate::constants::{
    INVERSE_SQUARINGS, MAX_PLANE_ITERATIONS, PLANE_CONVERGENCE_TOLERANCE,
    SINGULAR_DETERMINANT_TOLERANCE,
};
use crate::geometry::ClippingPlane;
use crate::water::WaveField;

/// Outcome of a plane fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaneFit {
    /// The probes determined the plane.
    Fitted(ClippingPlane),
    /// The probes were degenerate; the caller's default normal was used.
    Fallback(ClippingPlane),
}

impl PlaneFit {
    pub fn plane(&self) -> ClippingPlane {
        match *self {
            PlaneFit::Fitted(plane) | PlaneFit::Fallback(plane) => plane,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, PlaneFit::Fallback(_))
    }
}

#[inline]
fn to_na(v: Vec3) -> Vector3<f64> {
    Vector3::new(v.x as f64, v.y as f64, v.z as f64)
}

#[inline]
fn from_na(v: &Vector3<f64>) -> Vec3 {
    Vec3::new(v.x as f32, v.y as f32, v.z as f32)
}

/// Centroid and scatter matrix `Σ (p - c)(p - c)ᵀ` of a point set.
pub(crate) fn scatter_matrix(points: &[Vec3]) -> (Vector3<f64>, Matrix3<f64>) {
    let n = points.len().max(1) as f64;
    let centroid = points
        .iter()
        .fold(Vector3::zeros(), |acc: Vector3<f64>, &p| acc + to_na(p))
        / n;

    let scatter = points.iter().fold(Matrix3::zeros(), |acc, &p| {
        let d = to_na(p) - centroid;
        acc + d * d.transpose()
    });

    (centroid, scatter)
}

/// Null direction of a rank-2 symmetric matrix, `None` if the rank is lower.
fn null_direction(scatter: &Matrix3<f64>, scale: f64) -> Option<Vector3<f64>> {
    let rows = [
        scatter.row(0).transpose(),
        scatter.row(1).transpose(),
        scatter.row(2).transpose(),
    ];

    let cross = [
        rows[0].cross(&rows[1]),
        rows[0].cross(&rows[2]),
        rows[1].cross(&rows[2]),
    ]
    .into_iter()
    .max_by(|a, b| a.norm_squared().total_cmp(&b.norm_squared()))?;

    if cross.norm_squared() <= SINGULAR_DETERMINANT_TOLERANCE * scale.powi(4) {
        return None;
    }

    Some(cross.normalize())
}

/// Dominant eigenvector of `S⁻¹`, starting the iteration from `start`.
fn least_spread_direction(scatter: &Matrix3<f64>, start: Vector3<f64>) -> Option<Vector3<f64>> {
    let mut power = scatter.try_inverse()?;

    // Square the inverse a few times first; renormalise to keep it finite.
    for _ in 0..INVERSE_SQUARINGS {
        power = power * power;
        let norm = power.norm();
        if !norm.is_finite() || norm <= 0.0 {
            return None;
        }
        power /= norm;
    }

    let mut v = start;
    for _ in 0..MAX_PLANE_ITERATIONS {
        let next = (power * v).try_normalize(f64::EPSILON)?;
        let converged = (next - v).norm_squared() < PLANE_CONVERGENCE_TOLERANCE;
        v = next;
        if converged {
            break;
        }
    }

    v.iter().all(|c| c.is_finite()).then_some(v)
}

/// Fit a plane to `points`.
///
/// Coplanar points (a singular scatter matrix of rank two, e.g. perfectly
/// flat water) are solved exactly. Fewer than three points, or points that
/// are coincident or collinear, fall back to `fallback_normal` through their
/// centroid. The fitted normal is oriented to agree with `fallback_normal`.
pub fn fit_plane(points: &[Vec3], fallback_normal: Vec3) -> PlaneFit {
    let up = fallback_normal.normalize_or(Vec3::Y);
    let (centroid, scatter) = scatter_matrix(points);
    let point = from_na(&centroid);
    let fallback = PlaneFit::Fallback(ClippingPlane::new(point, up));

    if points.len() < 3 {
        return fallback;
    }

    let scale = scatter.trace();
    if !scale.is_finite() || scale <= f64::EPSILON {
        return fallback;
    }

    let singular = scatter.determinant().abs() <= SINGULAR_DETERMINANT_TOLERANCE * scale.powi(3);
    let normal = if singular {
        null_direction(&scatter, scale)
    } else {
        least_spread_direction(&scatter, to_na(up))
    };

    match normal {
        Some(n) => {
            let n = if n.dot(&to_na(up)) < 0.0 { -n } else { n };
            PlaneFit::Fitted(ClippingPlane::new(point, from_na(&n)))
        }
        None => {
            log::debug!("Degenerate probe ring, falling back to default water plane");
            fallback
        }
    }
}

/// Move the probe ring into world space and drop every probe onto the surface.
pub fn sample_probe_ring(
    probes: &[Vec3],
    transform: &Transform,
    field: &dyn WaveField,
    time: f32,
) -> Vec<Vec3> {
    probes
        .iter()
        .map(|&offset| {
            let mut p = transform.translation + transform.rotation * offset;
            p.y = field.height(Vec2::new(p.x, p.z), time);
            p
        })
        .collect()
}

/// Estimate the water plane under a body.
///
/// Without probes the plane is the fallback normal through the surface point
/// directly above the body origin.
pub fn estimate_water_plane(
    probes: &[Vec3],
    transform: &Transform,
    field: &dyn WaveField,
    time: f32,
    fallback_normal: Vec3,
) -> PlaneFit {
    if probes.is_empty() {
        let origin = transform.translation;
        let height = field.height(Vec2::new(origin.x, origin.z), time);
        return PlaneFit::Fallback(ClippingPlane::new(
            Vec3::new(origin.x, height, origin.z),
            fallback_normal,
        ));
    }

    let points = sample_probe_ring(probes, transform, field, time);
    fit_plane(&points, fallback_normal)
}
