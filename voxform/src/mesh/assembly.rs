//! Module `mesh::assembly`
//!
//! Defines [`MeshAssembly`], the output of both meshers: a flat triangle list with one
//! palette index per triangle and the normalized color of every index in use.
//!
//! Vertices are in world space. A grid position `p` maps to
//! `(p - (size_x / 2, size_y / 2, 0)) / 16`, so the model is centered on X/Y and rests on
//! `z = 0`.

use std::collections::BTreeMap;

use glam::{UVec3, Vec3, Vec4};
use rustc_hash::FxHashMap;

use crate::{
    core::Palette,
    mesh::{Quad, VOXEL_SCALE},
    model::Extents,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshAssembly {
    pub vertices: Vec<Vec3>,
    pub triangles: Vec<[u32; 3]>,
    /// Palette index of each triangle, parallel to `triangles`.
    pub triangle_materials: Vec<u8>,
    /// Normalized RGBA of every palette index referenced by a triangle.
    pub materials: BTreeMap<u8, Vec4>,
}

impl MeshAssembly {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends four vertices and two triangles for one quad.
    ///
    /// Triangles are `(0, 1, 2), (0, 2, 3)`, or `(0, 3, 2), (0, 2, 1)` when `flip` is set.
    #[inline(always)]
    pub fn push_quad(&mut self, corners: [Vec3; 4], material: u8, color: Vec4, flip: bool) {
        let index = self.vertices.len() as u32;

        self.vertices.extend(corners);
        if flip {
            self.triangles.extend([
                [index, index + 3, index + 2],
                [index, index + 2, index + 1],
            ]);
        } else {
            self.triangles.extend([
                [index, index + 1, index + 2],
                [index, index + 2, index + 3],
            ]);
        }
        self.triangle_materials.extend([material, material]);
        self.materials.entry(material).or_insert(color);
    }

    #[must_use]
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    #[must_use]
    #[inline(always)]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    #[inline(always)]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    #[must_use]
    #[inline(always)]
    pub fn quad_count(&self) -> usize {
        self.triangles.len() / 2
    }

    /// Unit normal of `triangle` from its winding, or `None` when the triangle or one of its
    /// vertices does not exist.
    #[must_use]
    pub fn face_normal(&self, triangle: usize) -> Option<Vec3> {
        let vertex = |index: u32| self.vertices.get(index as usize).copied();
        let [a, b, c] = *self.triangles.get(triangle)?;
        let (a, b, c) = (vertex(a)?, vertex(b)?, vertex(c)?);

        Some((b - a).cross(c - a).normalize_or_zero())
    }

    /// Merges vertices with bit-identical positions and remaps triangle indices.
    ///
    /// Returns the number of vertices removed. Triangle count, order and materials are
    /// unchanged.
    pub fn weld_vertices(&mut self) -> usize {
        #[cfg(feature = "tracy")]
        let _span = tracy_client::span!("MeshAssembly::weld_vertices");

        let mut lookup: FxHashMap<[u32; 3], u32> = FxHashMap::default();
        let mut welded = Vec::with_capacity(self.vertices.len());
        let mut remap = Vec::with_capacity(self.vertices.len());

        for vertex in self.vertices.iter() {
            let key = vertex.to_array().map(f32::to_bits);
            let index = *lookup.entry(key).or_insert_with(|| {
                welded.push(*vertex);
                (welded.len() - 1) as u32
            });
            remap.push(index);
        }

        for triangle in self.triangles.iter_mut() {
            for index in triangle.iter_mut() {
                *index = remap[*index as usize];
            }
        }

        let removed = self.vertices.len() - welded.len();
        self.vertices = welded;

        removed
    }

    #[must_use]
    pub fn stats(&self) -> MeshStats {
        MeshStats {
            vertices: self.vertices.len(),
            triangles: self.triangles.len(),
            materials: self.materials.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshStats {
    pub vertices: usize,
    pub triangles: usize,
    pub materials: usize,
}

impl std::fmt::Display for MeshStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} vertices, {} triangles, {} materials",
            self.vertices, self.triangles, self.materials
        )
    }
}

/// Converts grid-space faces to world space and resolves their colors.
pub(crate) struct MeshBuilder<'a> {
    palette: &'a Palette,
    offset: Vec3,
    mesh: MeshAssembly,
}

impl<'a> MeshBuilder<'a> {
    pub(crate) fn new(extents: Extents, palette: &'a Palette) -> Self {
        Self {
            palette,
            offset: Vec3::new(extents.x() as f32 / 2.0, extents.y() as f32 / 2.0, 0.0),
            mesh: MeshAssembly::new(),
        }
    }

    #[inline(always)]
    fn to_world(&self, position: Vec3) -> Vec3 {
        (position - self.offset) * VOXEL_SCALE
    }

    #[inline(always)]
    fn color(&self, material: u8) -> Vec4 {
        self.palette
            .color(material)
            .map(|color| color.to_normalized())
            .unwrap_or_default()
    }

    /// Pushes a unit face of `voxel` described by corner offsets on the unit cube.
    pub(crate) fn push_face(&mut self, voxel: UVec3, offsets: [Vec3; 4], material: u8) {
        let origin = voxel.as_vec3();
        let corners = offsets.map(|offset| self.to_world(origin + offset));
        let color = self.color(material);

        self.mesh.push_quad(corners, material, color, false);
    }

    pub(crate) fn push_rect(&mut self, quad: &Quad) {
        let corners = quad.corners().map(|corner| self.to_world(corner.as_vec3()));
        let color = self.color(quad.material);

        self.mesh
            .push_quad(corners, quad.material, color, quad.direction.data().flip);
    }

    pub(crate) fn finish(self) -> MeshAssembly {
        self.mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> [Vec3; 4] {
        [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn test_push_quad_winding() {
        let mut mesh = MeshAssembly::new();
        mesh.push_quad(unit_square(), 3, Vec4::ONE, false);
        mesh.push_quad(unit_square(), 3, Vec4::ONE, true);

        assert_eq!(mesh.triangles[0], [0, 1, 2]);
        assert_eq!(mesh.triangles[1], [0, 2, 3]);
        assert_eq!(mesh.triangles[2], [4, 7, 6]);
        assert_eq!(mesh.triangles[3], [4, 6, 5]);

        assert_eq!(mesh.face_normal(0), Some(Vec3::Z));
        assert_eq!(mesh.face_normal(1), Some(Vec3::Z));
        assert_eq!(mesh.face_normal(2), Some(Vec3::NEG_Z));
        assert_eq!(mesh.face_normal(3), Some(Vec3::NEG_Z));
    }

    #[test]
    fn test_face_normal_out_of_range() {
        let mut mesh = MeshAssembly::new();
        assert_eq!(mesh.face_normal(0), None);

        mesh.push_quad(unit_square(), 1, Vec4::ONE, false);
        assert_eq!(mesh.face_normal(2), None);

        mesh.triangles.push([0, 1, 9]);
        assert_eq!(mesh.face_normal(2), None);
    }

    #[test]
    fn test_materials_registered_once() {
        let mut mesh = MeshAssembly::new();
        mesh.push_quad(unit_square(), 3, Vec4::ONE, false);
        mesh.push_quad(unit_square(), 3, Vec4::ZERO, false);
        mesh.push_quad(unit_square(), 5, Vec4::W, false);

        assert_eq!(mesh.triangle_materials, [3, 3, 3, 3, 5, 5]);
        assert_eq!(mesh.materials.len(), 2);
        assert_eq!(mesh.materials[&3], Vec4::ONE);
        assert_eq!(mesh.quad_count(), 3);
    }

    #[test]
    fn test_weld_shared_edge() {
        let mut mesh = MeshAssembly::new();
        mesh.push_quad(unit_square(), 1, Vec4::ONE, false);
        mesh.push_quad(unit_square().map(|v| v + Vec3::X), 1, Vec4::ONE, false);

        let before = mesh.triangles.clone();
        let removed = mesh.weld_vertices();

        assert_eq!(removed, 2);
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.triangle_count(), before.len());
        for triangle in mesh.triangles.iter() {
            assert!(triangle.iter().all(|&index| (index as usize) < mesh.vertex_count()));
        }
        assert_eq!(mesh.face_normal(2), Some(Vec3::Z));
    }

    #[test]
    fn test_stats_display() {
        let mut mesh = MeshAssembly::new();
        assert!(mesh.is_empty());

        mesh.push_quad(unit_square(), 1, Vec4::ONE, false);
        assert_eq!(
            mesh.stats().to_string(),
            "4 vertices, 2 triangles, 1 materials"
        );
    }

    #[test]
    fn test_builder_world_transform() {
        let palette = Palette::default();
        let mut builder = MeshBuilder::new(Extents::new(2, 4, 1), &palette);
        builder.push_rect(&Quad::unit(crate::core::Direction::PosZ, UVec3::ZERO, 1));
        let mesh = builder.finish();

        assert_eq!(mesh.vertices[0], Vec3::new(-1.0 / 16.0, -2.0 / 16.0, 1.0 / 16.0));
        assert_eq!(mesh.vertices[2], Vec3::new(0.0, -1.0 / 16.0, 1.0 / 16.0));
        assert_eq!(mesh.materials[&1], palette.color(1).unwrap().to_normalized());
    }
}
