use bevy::math::{Quat, Vec3};

/// A plane through `point` with unit `normal`, used as the local water surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClippingPlane {
    pub point: Vec3,
    pub normal: Vec3,
}

impl ClippingPlane {
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        Self {
            point,
            normal: normal.normalize_or(Vec3::Y),
        }
    }

    /// Flat water at height `level`.
    pub fn horizontal(level: f32) -> Self {
        Self {
            point: Vec3::new(0.0, level, 0.0),
            normal: Vec3::Y,
        }
    }

    #[inline]
    pub fn offset(&self) -> f32 {
        self.normal.dot(self.point)
    }

    /// Signed distance along the normal; negative below the surface.
    #[inline]
    pub fn depth(&self, v: Vec3) -> f32 {
        self.normal.dot(v) - self.offset()
    }

    /// Re-express the plane in a body frame located at `origin` with `rotation`.
    pub fn to_local(&self, origin: Vec3, rotation: Quat) -> LocalPlane {
        LocalPlane {
            normal: rotation.inverse() * self.normal,
            offset: self.normal.dot(self.point - origin),
        }
    }
}

/// A plane in a body's local frame, as `normal · v = offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalPlane {
    pub normal: Vec3,
    pub offset: f32,
}

impl LocalPlane {
    #[inline]
    pub fn depth(&self, v: Vec3) -> f32 {
        self.normal.dot(v) - self.offset
    }

    /// Foot of the perpendicular from `v` onto the plane.
    #[inline]
    pub fn project(&self, v: Vec3) -> Vec3 {
        v - self.depth(v) * self.normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_depth_sign() {
        let plane = ClippingPlane::horizontal(2.0);
        assert!(plane.depth(Vec3::new(5.0, 1.0, -3.0)) < 0.0);
        assert!(plane.depth(Vec3::new(0.0, 3.0, 0.0)) > 0.0);
        assert_eq!(plane.depth(Vec3::new(7.0, 2.0, 7.0)), 0.0);
    }

    #[test]
    fn test_local_depth_matches_world_depth() {
        let plane = ClippingPlane::new(Vec3::new(1.0, 0.5, -2.0), Vec3::new(0.2, 1.0, 0.1));
        let origin = Vec3::new(3.0, -1.0, 4.0);
        let rotation = Quat::from_rotation_z(FRAC_PI_2) * Quat::from_rotation_x(0.3);
        let local = plane.to_local(origin, rotation);

        for v in [Vec3::ZERO, Vec3::X, Vec3::new(-2.0, 0.5, 1.5)] {
            let world = origin + rotation * v;
            assert!((local.depth(v) - plane.depth(world)).abs() < 1e-5);
        }
    }

    #[test]
    fn test_projection_lands_on_plane() {
        let local = LocalPlane {
            normal: Vec3::new(0.0, 0.6, 0.8),
            offset: 1.0,
        };
        let p = local.project(Vec3::new(4.0, -3.0, 2.0));
        assert!(local.depth(p).abs() < 1e-5);
    }
}
