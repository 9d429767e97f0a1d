//! Module `mesh::greedy`
//!
//! Greedy meshing: coplanar exposed faces sharing a material are merged into maximal
//! rectangles, one direction at a time.
//!
//! For every slice along a direction's normal axis, a `u`-major mask holds the material of
//! each exposed face. Rectangles are extracted by scanning `u` then `v`, growing the width
//! along `v` first and then the height along `u` while whole rows still match. The six
//! directions are independent and run in parallel; results are concatenated in direction
//! table order, so output never depends on scheduling.

use rayon::prelude::*;

use crate::{
    core::Direction,
    mesh::{Mesher, Quad, is_face_exposed},
    model::VoxelGrid,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyMesher;

impl GreedyMesher {
    /// Merged quads of a single direction, ordered by slice, then `u`, then `v`.
    #[must_use]
    pub fn quads_for_direction(grid: &VoxelGrid, direction: Direction) -> Vec<Quad> {
        #[cfg(feature = "tracy")]
        let _span = tracy_client::span!("GreedyMesher::quads_for_direction");

        let data = direction.data();
        let extents = grid.extents();
        let size_n = extents.along(data.normal) as usize;
        let size_u = extents.along(data.u) as usize;
        let size_v = extents.along(data.v) as usize;

        let mut slices: Vec<Vec<(u32, u32, u8)>> = vec![Vec::new(); size_n];
        for (position, material) in grid.iter() {
            if is_face_exposed(grid, position, direction) {
                let (n, u, v) = data.decompose(position);
                slices[n as usize].push((u, v, material));
            }
        }

        let mut mask = vec![0u8; size_u * size_v];
        let mut quads = Vec::new();

        for (slice, faces) in slices.iter().enumerate() {
            if faces.is_empty() {
                continue;
            }

            for &(u, v, material) in faces.iter() {
                mask[u as usize * size_v + v as usize] = material;
            }

            extract_rectangles(
                &mut mask,
                (size_u, size_v),
                direction,
                slice as u32,
                &mut quads,
            );
        }

        quads
    }
}

/// Consumes every non-empty cell of `mask`, leaving it zeroed.
fn extract_rectangles(
    mask: &mut [u8],
    (size_u, size_v): (usize, usize),
    direction: Direction,
    slice: u32,
    quads: &mut Vec<Quad>,
) {
    for u in 0..size_u {
        let mut v = 0;

        while v < size_v {
            let material = mask[u * size_v + v];
            if material == 0 {
                v += 1;
                continue;
            }

            let mut width = 1;
            while v + width < size_v && mask[u * size_v + v + width] == material {
                width += 1;
            }

            let mut height = 1;
            'grow: while u + height < size_u {
                let row = (u + height) * size_v + v;
                if mask[row..row + width].iter().any(|&cell| cell != material) {
                    break 'grow;
                }
                height += 1;
            }

            for du in 0..height {
                let row = (u + du) * size_v + v;
                mask[row..row + width].fill(0);
            }

            quads.push(Quad {
                direction,
                slice,
                u: u as u32,
                v: v as u32,
                width: width as u32,
                height: height as u32,
                material,
            });

            v += width;
        }
    }
}

impl Mesher for GreedyMesher {
    fn quads(&self, grid: &VoxelGrid) -> Vec<Quad> {
        #[cfg(feature = "tracy")]
        let _span = tracy_client::span!("GreedyMesher::quads");

        let per_direction: Vec<Vec<Quad>> = Direction::ALL
            .par_iter()
            .map(|&direction| Self::quads_for_direction(grid, direction))
            .collect();

        per_direction.into_iter().flatten().collect()
    }
}

#[cfg(test)]
mod tests {
    use glam::IVec3;
    use rand::{Rng, SeedableRng, rngs::SmallRng};

    use super::*;
    use crate::{core::Palette, mesh::NaiveMesher, model::Extents};

    fn expanded(quads: &[Quad]) -> Vec<Quad> {
        let mut faces: Vec<Quad> = quads.iter().flat_map(Quad::unit_faces).collect();
        faces.sort();
        faces
    }

    fn random_grid(seed: u64, extents: Extents, fill: f64, materials: u8) -> VoxelGrid {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut grid = VoxelGrid::new(extents);

        for z in 0..extents.z() as i32 {
            for y in 0..extents.y() as i32 {
                for x in 0..extents.x() as i32 {
                    if rng.random_bool(fill) {
                        grid.set_voxel(IVec3::new(x, y, z), rng.random_range(1..=materials));
                    }
                }
            }
        }

        grid
    }

    #[test]
    fn test_single_voxel() {
        let mut grid = VoxelGrid::new(Extents::new(1, 1, 1));
        grid.set_voxel(IVec3::ZERO, 1);

        let quads = GreedyMesher.quads(&grid);
        assert_eq!(quads.len(), 6);

        let mesh = GreedyMesher.mesh(&grid, &Palette::default());
        assert_eq!(mesh.triangle_count(), 12);
        assert!(mesh.triangle_materials.iter().all(|&material| material == 1));
    }

    #[test]
    fn test_two_voxels_merge() {
        let mut grid = VoxelGrid::new(Extents::new(2, 1, 1));
        grid.set_voxel(IVec3::ZERO, 1);
        grid.set_voxel(IVec3::X, 1);

        let quads = GreedyMesher.quads(&grid);
        assert_eq!(quads.len(), 6);
        assert!(quads.len() < NaiveMesher.quads(&grid).len());
        assert_eq!(quads.iter().map(Quad::area).sum::<u32>(), 10);
    }

    #[test]
    fn test_materials_not_merged() {
        let mut grid = VoxelGrid::new(Extents::new(2, 1, 1));
        grid.set_voxel(IVec3::ZERO, 1);
        grid.set_voxel(IVec3::X, 2);

        let quads = GreedyMesher.quads(&grid);
        assert_eq!(quads.len(), 10);
        assert!(quads.iter().all(|quad| quad.area() == 1));
    }

    #[test]
    fn test_gap_not_merged() {
        let mut grid = VoxelGrid::new(Extents::new(3, 1, 1));
        grid.set_voxel(IVec3::ZERO, 1);
        grid.set_voxel(IVec3::new(2, 0, 0), 1);

        assert_eq!(GreedyMesher.quads(&grid).len(), 12);
    }

    #[test]
    fn test_slab_is_six_quads() {
        let mut grid = VoxelGrid::new(Extents::new(16, 16, 1));
        grid.fill_box(IVec3::ZERO, IVec3::new(15, 15, 0), 3);

        let quads = GreedyMesher.quads(&grid);
        assert_eq!(quads.len(), 6);

        let top = quads
            .iter()
            .find(|quad| quad.direction == Direction::PosZ)
            .unwrap();
        assert_eq!((top.width, top.height), (16, 16));
    }

    #[test]
    fn test_width_grows_along_v_first() {
        // An L shape on the +Z face: row u=0 spans v=0..3, row u=1 only v=0.
        let mut grid = VoxelGrid::new(Extents::new(2, 3, 1));
        grid.set_voxel(IVec3::new(0, 0, 0), 1);
        grid.set_voxel(IVec3::new(0, 1, 0), 1);
        grid.set_voxel(IVec3::new(0, 2, 0), 1);
        grid.set_voxel(IVec3::new(1, 0, 0), 1);

        let top = GreedyMesher::quads_for_direction(&grid, Direction::PosZ);
        assert_eq!(
            top,
            [
                Quad {
                    direction: Direction::PosZ,
                    slice: 0,
                    u: 0,
                    v: 0,
                    width: 3,
                    height: 1,
                    material: 1,
                },
                Quad {
                    direction: Direction::PosZ,
                    slice: 0,
                    u: 1,
                    v: 0,
                    width: 1,
                    height: 1,
                    material: 1,
                },
            ]
        );
    }

    #[test]
    fn test_direction_order() {
        let mut grid = VoxelGrid::new(Extents::new(2, 2, 2));
        grid.set_voxel(IVec3::ZERO, 1);

        let directions: Vec<_> = GreedyMesher
            .quads(&grid)
            .iter()
            .map(|quad| quad.direction)
            .collect();
        assert_eq!(directions, Direction::ALL);
    }

    #[test]
    fn test_matches_naive_on_random_grids() {
        for seed in 0..16 {
            let grid = random_grid(seed, Extents::new(9, 7, 5), 0.45, 3);

            let naive = NaiveMesher.quads(&grid);
            let greedy = GreedyMesher.quads(&grid);

            assert_eq!(expanded(&greedy), expanded(&naive), "seed {seed}");
            assert!(greedy.len() <= naive.len(), "seed {seed}");
        }
    }

    #[test]
    fn test_outward_winding() {
        let grid = random_grid(7, Extents::new(6, 6, 6), 0.5, 2);

        let quads = GreedyMesher.quads(&grid);
        let mesh = GreedyMesher.mesh(&grid, &Palette::default());

        for (i, quad) in quads.iter().enumerate() {
            for triangle in [i * 2, i * 2 + 1] {
                assert!(
                    mesh.face_normal(triangle)
                        .is_some_and(|normal| normal.abs_diff_eq(quad.direction.normal(), 1e-5)),
                    "{}",
                    quad.direction
                );
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let grid = random_grid(11, Extents::new(8, 8, 8), 0.6, 4);

        assert_eq!(GreedyMesher.quads(&grid), GreedyMesher.quads(&grid.clone()));
    }

    #[test]
    fn test_empty_grid() {
        let grid = VoxelGrid::new(Extents::new(32, 32, 32));

        assert!(GreedyMesher.quads(&grid).is_empty());
        assert!(GreedyMesher.mesh(&grid, &Palette::default()).is_empty());
    }
}
