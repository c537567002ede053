//! Plane clipping of tetrahedra.
//!
//! A triangle together with an apex lying exactly on the clipping plane forms
//! a tetrahedron whose submerged part is the tetrahedron over the submerged
//! part of the triangle. Summing those over a closed mesh gives the volume
//! below the plane; the cap on the plane itself contributes nothing because
//! the apex lies on it.
//!
//! Depths follow `depth(v) = normal · v - offset`; negative is submerged and
//! exactly zero counts as dry.

use bevy::math::Vec3;

use super::VolumeAccumulator;

/// Point where edge `a -> b` crosses the plane.
#[inline]
fn edge_crossing(a: Vec3, b: Vec3, depth_a: f32, depth_b: f32) -> Vec3 {
    a + (depth_a / (depth_a - depth_b)) * (b - a)
}

/// Clip a triangle whose edge `v1 -> v2` crosses the plane.
///
/// Requires `d1 * d2 < 0`. Emits one or two tetrahedra covering the
/// submerged part, keeping the triangle's winding.
pub fn clip_triangle(
    acc: &mut VolumeAccumulator,
    apex: Vec3,
    [v1, v2, v3]: [Vec3; 3],
    [d1, d2, d3]: [f32; 3],
) -> f32 {
    debug_assert!(d1 * d2 < 0.0, "edge 1-2 must cross the plane");

    let c12 = edge_crossing(v1, v2, d1, d2);
    let mut volume = 0.0;

    if d1 < 0.0 {
        if d3 < 0.0 {
            // v1 and v3 submerged: quad v1, c12, c23, v3.
            let c23 = edge_crossing(v2, v3, d2, d3);
            volume += acc.add(apex, c12, c23, v1);
            volume += acc.add(apex, c23, v3, v1);
        } else {
            // Only v1 submerged.
            let c13 = edge_crossing(v1, v3, d1, d3);
            volume += acc.add(apex, c12, c13, v1);
        }
    } else if d3 < 0.0 {
        // v2 and v3 submerged: quad c12, v2, v3, c31.
        let c13 = edge_crossing(v1, v3, d1, d3);
        volume += acc.add(apex, c12, v2, v3);
        volume += acc.add(apex, c12, v3, c13);
    } else {
        // Only v2 submerged.
        let c23 = edge_crossing(v2, v3, d2, d3);
        volume += acc.add(apex, c12, v2, c23);
    }

    volume
}

/// Add the submerged part of one mesh triangle, whatever its depths.
///
/// `apex` must lie on the plane.
pub fn submerged_triangle_volume(
    acc: &mut VolumeAccumulator,
    apex: Vec3,
    [v1, v2, v3]: [Vec3; 3],
    [d1, d2, d3]: [f32; 3],
) -> f32 {
    if d1 * d2 < 0.0 {
        clip_triangle(acc, apex, [v1, v2, v3], [d1, d2, d3])
    } else if d1 * d3 < 0.0 {
        clip_triangle(acc, apex, [v3, v1, v2], [d3, d1, d2])
    } else if d2 * d3 < 0.0 {
        clip_triangle(acc, apex, [v2, v3, v1], [d2, d3, d1])
    } else if d1 < 0.0 || d2 < 0.0 || d3 < 0.0 {
        acc.add(apex, v1, v2, v3)
    } else {
        0.0
    }
}
