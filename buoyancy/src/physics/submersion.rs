//! Submerged volume and centroid of a hull against the local water plane.

use bevy::math::Vec3;
use bevy::transform::components::Transform;

use crate::constants::{TINY_DEPTH, TINY_VOLUME};
use crate::geometry::{submerged_triangle_volume, ClippingPlane, LocalPlane, TriangleSoup, VolumeAccumulator};
use crate::water::WaveField;

use super::body::BodyVolumeData;
use super::plane_fit::estimate_water_plane;

/// Volume below the water plane and its centroid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubmersionResult {
    pub volume: f32,
    pub centroid: Vec3,
}

/// Clip a soup against a plane expressed in the soup's own frame.
///
/// Returns `None` when nothing is meaningfully submerged. The centroid is in
/// the soup's frame.
pub fn submerged_volume_local(soup: &TriangleSoup, plane: &LocalPlane) -> Option<SubmersionResult> {
    let vertices = soup.vertices();
    let depths: Vec<f32> = vertices.iter().map(|&v| plane.depth(v)).collect();

    let (deepest, &min_depth) = depths
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.total_cmp(b.1))?;
    if min_depth >= TINY_DEPTH {
        return None;
    }

    // Any apex on the plane works; the deepest vertex's foot is always valid.
    let apex = plane.project(vertices[deepest]);

    let mut acc = VolumeAccumulator::default();
    for &[a, b, c] in soup.indices() {
        let (a, b, c) = (a as usize, b as usize, c as usize);
        submerged_triangle_volume(
            &mut acc,
            apex,
            [vertices[a], vertices[b], vertices[c]],
            [depths[a], depths[b], depths[c]],
        );
    }

    if acc.volume <= TINY_VOLUME {
        return None;
    }

    acc.centroid().map(|centroid| SubmersionResult {
        volume: acc.volume,
        centroid,
    })
}

/// Clip a body placed at `transform` against a world-space plane.
///
/// The centroid of the result is in world space.
pub fn evaluate_against_plane(
    soup: &TriangleSoup,
    transform: &Transform,
    plane: &ClippingPlane,
) -> Option<SubmersionResult> {
    let local = plane.to_local(transform.translation, transform.rotation);
    submerged_volume_local(soup, &local).map(|result| SubmersionResult {
        volume: result.volume,
        centroid: transform.translation + transform.rotation * result.centroid,
    })
}

/// Submersion of a body in a wave field at `time`.
///
/// `up` orients the fitted water plane and is its normal when the probes
/// are degenerate; pass `-gravity` to stay consistent with the force model.
pub fn evaluate_submersion(
    soup: &TriangleSoup,
    data: &BodyVolumeData,
    transform: &Transform,
    field: &dyn WaveField,
    time: f32,
    up: Vec3,
) -> Option<SubmersionResult> {
    let plane = estimate_water_plane(&data.probes, transform, field, time, up).plane();
    evaluate_against_plane(soup, transform, &plane)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DEFAULT_PROBE_COUNT, WATER_DENSITY};
    use crate::water::FlatWater;
    use bevy::math::Quat;
    use std::f32::consts::FRAC_PI_4;

    fn unit_cube() -> TriangleSoup {
        TriangleSoup::cuboid(Vec3::splat(0.5))
    }

    #[test]
    fn test_unit_cube_half_submerged() {
        let result = evaluate_against_plane(&unit_cube(), &Transform::IDENTITY, &ClippingPlane::horizontal(0.0))
            .expect("Cube straddling the plane should be submerged");

        assert!((result.volume - 0.5).abs() < 1e-4, "Volume was {}", result.volume);
        assert!((result.centroid.y + 0.25).abs() < 1e-4);
        assert!(result.centroid.x.abs() < 1e-4 && result.centroid.z.abs() < 1e-4);
    }

    #[test]
    fn test_clipped_volume_in_body_frame() {
        // Same cube, moved: the body frame follows the transform.
        let transform = Transform::from_xyz(10.0, 0.25, -4.0);
        let result = evaluate_against_plane(&unit_cube(), &transform, &ClippingPlane::horizontal(0.0))
            .expect("Cube should be submerged");

        assert!((result.volume - 0.25).abs() < 1e-4);
        assert!((result.centroid - Vec3::new(10.0, -0.125, -4.0)).length() < 1e-4);
    }

    #[test]
    fn test_resting_on_plane_is_dry() {
        let transform = Transform::from_xyz(0.0, 0.5, 0.0);
        let result = evaluate_against_plane(&unit_cube(), &transform, &ClippingPlane::horizontal(0.0));
        assert_eq!(result, None);
    }

    #[test]
    fn test_fully_above_and_below() {
        let plane = ClippingPlane::horizontal(0.0);
        let above = evaluate_against_plane(&unit_cube(), &Transform::from_xyz(0.0, 3.0, 0.0), &plane);
        assert_eq!(above, None);

        let below = evaluate_against_plane(&unit_cube(), &Transform::from_xyz(1.0, -3.0, 2.0), &plane)
            .expect("Sunken cube should be submerged");
        assert!((below.volume - 1.0).abs() < 1e-3);
        assert!((below.centroid - Vec3::new(1.0, -3.0, 2.0)).length() < 1e-3);
    }

    #[test]
    fn test_volume_grows_while_sinking() {
        let soup = TriangleSoup::cuboid(Vec3::new(1.5, 0.4, 0.75));
        let plane = ClippingPlane::horizontal(0.0);
        let transform = Transform::from_rotation(Quat::from_rotation_z(0.3) * Quat::from_rotation_x(0.2));

        let mut previous = 0.0;
        for step in 0..40 {
            let height = 2.0 - step as f32 * 0.1;
            let volume = evaluate_against_plane(&soup, &transform.with_translation(Vec3::Y * height), &plane)
                .map_or(0.0, |r| r.volume);
            assert!(
                volume + 1e-5 >= previous,
                "Submerged volume shrank from {previous} to {volume} at height {height}"
            );
            previous = volume;
        }
        assert!((previous - 3.6).abs() < 1e-3);
    }

    #[test]
    fn test_rotated_cube_is_still_half_submerged() {
        let transform = Transform::from_rotation(Quat::from_rotation_z(FRAC_PI_4));
        let result = evaluate_against_plane(&unit_cube(), &transform, &ClippingPlane::horizontal(0.0))
            .expect("Rotated cube should be submerged");

        assert!((result.volume - 0.5).abs() < 1e-4);
        assert!(result.centroid.y < 0.0);
        assert!(result.centroid.x.abs() < 1e-4);
    }

    #[test]
    fn test_tilted_plane() {
        // A plane tilted about Z through the origin still halves a centred cube.
        let plane = ClippingPlane::new(Vec3::ZERO, Vec3::new(0.3, 1.0, 0.0));
        let result = evaluate_against_plane(&unit_cube(), &Transform::IDENTITY, &plane)
            .expect("Cube should be submerged");
        assert!((result.volume - 0.5).abs() < 1e-4);
        assert!(plane.depth(result.centroid) < 0.0);
    }

    #[test]
    fn test_evaluate_in_flat_water() {
        let soup = TriangleSoup::cuboid(Vec3::ONE);
        let data = BodyVolumeData::from_soup(&soup, WATER_DENSITY, DEFAULT_PROBE_COUNT);

        let centred = evaluate_submersion(&soup, &data, &Transform::IDENTITY, &FlatWater::new(0.0), 0.0, Vec3::Y)
            .expect("Cube should be submerged");
        assert!((centred.volume - 4.0).abs() < 1e-3);

        let lowered = evaluate_submersion(
            &soup,
            &data,
            &Transform::from_xyz(0.0, -0.5, 0.0),
            &FlatWater::new(0.0),
            0.0,
            Vec3::Y,
        )
        .expect("Cube should be submerged");
        assert!((lowered.volume - 6.0).abs() < 1e-3);
        assert!((lowered.centroid.y + 0.75).abs() < 1e-3);
    }

    #[test]
    fn test_up_vector_selects_submerged_side() {
        let soup = unit_cube();
        let data = BodyVolumeData::from_soup(&soup, WATER_DENSITY, DEFAULT_PROBE_COUNT);
        let transform = Transform::from_xyz(0.0, 0.25, 0.0);
        let water = FlatWater::new(0.0);

        let y_up = evaluate_submersion(&soup, &data, &transform, &water, 0.0, Vec3::Y)
            .expect("Lower quarter should be submerged");
        assert!((y_up.volume - 0.25).abs() < 1e-4);

        // With gravity along +Y the "water side" of the plane is above it.
        let y_down = evaluate_submersion(&soup, &data, &transform, &water, 0.0, Vec3::NEG_Y)
            .expect("Upper part should be submerged");
        assert!((y_down.volume - 0.75).abs() < 1e-4);
        assert!(y_down.centroid.y > 0.0);
    }

    #[test]
    fn test_empty_soup_is_dry() {
        let soup = TriangleSoup::default();
        let result = submerged_volume_local(
            &soup,
            &LocalPlane {
                normal: Vec3::Y,
                offset: 10.0,
            },
        );
        assert_eq!(result, None);
    }
}
