//! Read-only triangle soups in body-local space.

use bevy::math::Vec3;
use bevy_rapier3d::prelude::Collider;

use crate::error::{BuoyancyError, Result};

/// Vertex positions plus index triples for a hull, in the body's local frame.
///
/// Triangles wind counter-clockwise when seen from outside the hull.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleSoup {
    vertices: Vec<Vec3>,
    indices: Vec<[u32; 3]>,
}

impl TriangleSoup {
    /// Build a soup, rejecting triangles that address missing vertices.
    pub fn new(vertices: Vec<Vec3>, indices: Vec<[u32; 3]>) -> Result<Self> {
        let vertex_count = vertices.len();
        for (triangle, tri) in indices.iter().enumerate() {
            if let Some(&index) = tri.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(BuoyancyError::IndexOutOfRange {
                    triangle,
                    index,
                    vertex_count,
                });
            }
        }

        Ok(Self { vertices, indices })
    }

    /// Closed box centred on the local origin, two triangles per face.
    pub fn cuboid(half_extents: Vec3) -> Self {
        let vertices = (0..8)
            .map(|i| {
                Vec3::new(
                    if i & 1 == 0 { -half_extents.x } else { half_extents.x },
                    if i & 2 == 0 { -half_extents.y } else { half_extents.y },
                    if i & 4 == 0 { -half_extents.z } else { half_extents.z },
                )
            })
            .collect();

        let indices = vec![
            [0, 4, 6], // -X
            [0, 6, 2],
            [1, 3, 7], // +X
            [1, 7, 5],
            [0, 1, 5], // -Y
            [0, 5, 4],
            [2, 6, 7], // +Y
            [2, 7, 3],
            [0, 2, 3], // -Z
            [0, 3, 1],
            [4, 5, 7], // +Z
            [4, 7, 6],
        ];

        Self { vertices, indices }
    }

    /// Extract the primary collision geometry of a rapier collider.
    ///
    /// Cuboids, triangle meshes and convex polyhedra are supported; analytic
    /// round shapes have no exact triangle representation and are rejected.
    pub fn from_collider(collider: &Collider) -> Result<Self> {
        let shape = &collider.raw;

        if let Some(cuboid) = shape.as_cuboid() {
            let he = cuboid.half_extents;
            return Ok(Self::cuboid(Vec3::new(he.x, he.y, he.z)));
        }

        if let Some(trimesh) = shape.as_trimesh() {
            let vertices = trimesh
                .vertices()
                .iter()
                .map(|p| Vec3::new(p.x, p.y, p.z))
                .collect();
            return Self::new(vertices, trimesh.indices().to_vec());
        }

        if let Some(polyhedron) = shape.as_convex_polyhedron() {
            let (points, indices) = polyhedron.to_trimesh();
            let vertices = points.iter().map(|p| Vec3::new(p.x, p.y, p.z)).collect();
            return Self::new(vertices, indices);
        }

        Err(BuoyancyError::UnsupportedShape(format!(
            "{:?}",
            shape.shape_type()
        )))
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn indices(&self) -> &[[u32; 3]] {
        &self.indices
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate the soup as ordered `(v0, v1, v2)` position triples.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.iter().map(|&[a, b, c]| {
            [
                self.vertices[a as usize],
                self.vertices[b as usize],
                self.vertices[c as usize],
            ]
        })
    }

    /// Local axis-aligned bounds as `(min, max)`, or `None` for an empty soup.
    pub fn local_aabb(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.vertices.first()?;
        Some(
            self.vertices
                .iter()
                .fold((first, first), |(min, max), &v| (min.min(v), max.max(v))),
        )
    }

    /// Same soup with every vertex shifted by `offset`.
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            vertices: self.vertices.iter().map(|&v| v + offset).collect(),
            indices: self.indices.clone(),
        }
    }
}
