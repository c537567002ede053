//! Closed-form volume and centroid of a triangle soup.
//!
//! Every triangle forms a tetrahedron with a shared apex. Summing the signed
//! tetrahedron volumes over a closed mesh gives the enclosed volume exactly,
//! whatever the tessellation, because the contributions of any apex outside
//! the surface cancel (divergence theorem).

use bevy::math::Vec3;

use super::TriangleSoup;

/// Running sum of tetrahedron volumes and their volume-weighted centroids.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VolumeAccumulator {
    pub volume: f32,
    pub centroid_sum: Vec3,
}

impl VolumeAccumulator {
    /// Add the tetrahedron `(apex, v1, v2, v3)`, returning its signed volume.
    #[inline]
    pub fn add(&mut self, apex: Vec3, v1: Vec3, v2: Vec3, v3: Vec3) -> f32 {
        let volume = tetrahedron_volume(apex, v1, v2, v3);
        self.volume += volume;
        self.centroid_sum += 0.25 * volume * (v1 + v2 + v3 + apex);
        volume
    }

    /// Volume-weighted centroid, `None` when the accumulated volume is zero.
    pub fn centroid(&self) -> Option<Vec3> {
        (self.volume != 0.0).then(|| self.centroid_sum / self.volume)
    }
}

/// Signed volume of the tetrahedron spanned by `apex` and a triangle.
///
/// Positive when the apex lies on the inner side of a counter-clockwise
/// (outward facing) triangle.
#[inline]
pub fn tetrahedron_volume(apex: Vec3, v1: Vec3, v2: Vec3, v3: Vec3) -> f32 {
    let a = v2 - v1;
    let b = v3 - v1;
    let r = apex - v1;
    b.cross(a).dot(r) / 6.0
}

/// Volume and centroid of a whole soup.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VolumeIntegral {
    pub volume: f32,
    /// `None` for an empty or zero-volume soup.
    pub centroid: Option<Vec3>,
}

/// Integrate a closed soup using the local origin as apex.
pub fn mesh_volume(soup: &TriangleSoup) -> VolumeIntegral {
    let mut acc = VolumeAccumulator::default();
    for [v1, v2, v3] in soup.triangles() {
        acc.add(Vec3::ZERO, v1, v2, v3);
    }

    VolumeIntegral {
        volume: acc.volume,
        centroid: acc.centroid(),
    }
}
