use glam::Vec3;

use crate::{
    core::{Direction, Palette},
    mesh::{MeshAssembly, MeshBuilder, Mesher, Quad, is_face_exposed},
    model::VoxelGrid,
};

/// Unit-cube corner offsets per direction, wound so `(0, 1, 2), (0, 2, 3)` faces outward.
const FACES: [(Direction, [Vec3; 4]); 6] = [
    (
        Direction::PosX,
        [
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(1.0, 0.0, 1.0),
        ],
    ),
    (
        Direction::NegX,
        [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(0.0, 1.0, 1.0),
            Vec3::new(0.0, 1.0, 0.0),
        ],
    ),
    (
        Direction::PosY,
        [
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 1.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(1.0, 1.0, 0.0),
        ],
    ),
    (
        Direction::NegY,
        [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(0.0, 0.0, 1.0),
        ],
    ),
    (
        Direction::PosZ,
        [
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(0.0, 1.0, 1.0),
        ],
    ),
    (
        Direction::NegZ,
        [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
        ],
    ),
];

/// Emits one quad for every exposed voxel face, without merging.
///
/// Voxels are visited in `(z, y, x)` order and faces in direction table order.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaiveMesher;

impl Mesher for NaiveMesher {
    fn quads(&self, grid: &VoxelGrid) -> Vec<Quad> {
        #[cfg(feature = "tracy")]
        let _span = tracy_client::span!("NaiveMesher::quads");

        let mut quads = Vec::new();

        for (position, material) in grid.sorted() {
            for (direction, _) in FACES.iter() {
                if is_face_exposed(grid, position, *direction) {
                    quads.push(Quad::unit(*direction, position, material));
                }
            }
        }

        quads
    }

    fn mesh(&self, grid: &VoxelGrid, palette: &Palette) -> MeshAssembly {
        #[cfg(feature = "tracy")]
        let _span = tracy_client::span!("NaiveMesher::mesh");

        let mut builder = MeshBuilder::new(grid.extents(), palette);

        for (position, material) in grid.sorted() {
            for (direction, offsets) in FACES.iter() {
                if is_face_exposed(grid, position, *direction) {
                    builder.push_face(position, *offsets, material);
                }
            }
        }

        builder.finish()
    }
}

#[cfg(test)]
mod tests {
    use glam::IVec3;

    use super::*;
    use crate::model::Extents;

    #[test]
    fn test_single_voxel() {
        let mut grid = VoxelGrid::new(Extents::new(1, 1, 1));
        grid.set_voxel(IVec3::ZERO, 1);
        let palette = Palette::default();

        let quads = NaiveMesher.quads(&grid);
        assert_eq!(quads.len(), 6);

        let mesh = NaiveMesher.mesh(&grid, &palette);
        assert_eq!(mesh.quad_count(), 6);
        assert_eq!(mesh.triangle_count(), 12);
        assert_eq!(mesh.vertex_count(), 24);
        assert!(mesh.triangle_materials.iter().all(|&material| material == 1));
        assert_eq!(
            mesh.materials[&1],
            palette.slot(0).unwrap().to_normalized()
        );
    }

    #[test]
    fn test_shared_face_suppressed() {
        let mut grid = VoxelGrid::new(Extents::new(2, 1, 1));
        grid.set_voxel(IVec3::ZERO, 1);
        grid.set_voxel(IVec3::X, 1);

        let quads = NaiveMesher.quads(&grid);
        assert_eq!(quads.len(), 10);
        assert!(!quads.contains(&Quad::unit(Direction::PosX, glam::UVec3::ZERO, 1)));
        assert!(!quads.contains(&Quad::unit(Direction::NegX, glam::UVec3::X, 1)));
    }

    #[test]
    fn test_neighbor_material_irrelevant() {
        let mut grid = VoxelGrid::new(Extents::new(2, 1, 1));
        grid.set_voxel(IVec3::ZERO, 1);
        grid.set_voxel(IVec3::X, 2);

        assert_eq!(NaiveMesher.quads(&grid).len(), 10);
    }

    #[test]
    fn test_faces_match_direction_table() {
        for (direction, offsets) in FACES.iter() {
            let quad = Quad::unit(*direction, glam::UVec3::ZERO, 1);
            let mut corners = quad.corners().map(|corner| corner.as_vec3().to_array());
            let mut expected = offsets.map(|offset| offset.to_array());

            corners.sort_by(|a, b| a.partial_cmp(b).unwrap());
            expected.sort_by(|a, b| a.partial_cmp(b).unwrap());
            assert_eq!(corners, expected, "{direction}");
        }
    }

    #[test]
    fn test_outward_winding() {
        let mut grid = VoxelGrid::new(Extents::new(3, 3, 3));
        grid.set_voxel(IVec3::ONE, 4);

        let mesh = NaiveMesher.mesh(&grid, &Palette::default());
        for (face, (direction, _)) in FACES.iter().enumerate() {
            for triangle in [face * 2, face * 2 + 1] {
                assert!(
                    mesh.face_normal(triangle)
                        .is_some_and(|normal| normal.abs_diff_eq(direction.normal(), 1e-5)),
                    "{direction}"
                );
            }
        }
    }

    #[test]
    fn test_empty_grid() {
        let grid = VoxelGrid::new(Extents::default());
        let mesh = NaiveMesher.mesh(&grid, &Palette::default());

        assert!(mesh.is_empty());
        assert!(mesh.materials.is_empty());
    }
}
