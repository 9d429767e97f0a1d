mod assembly;
mod greedy;
mod naive;
mod quad;

pub use assembly::{MeshAssembly, MeshStats};
pub use greedy::GreedyMesher;
pub use naive::NaiveMesher;
pub use quad::Quad;

pub(crate) use assembly::MeshBuilder;

use glam::UVec3;

use crate::{
    core::{Direction, Palette},
    model::VoxelGrid,
};

/// World units per voxel edge.
pub const VOXEL_SCALE: f32 = 1.0 / 16.0;

/// Turns a voxel grid into exposed-surface quads and a triangle mesh.
pub trait Mesher {
    /// Exposed surface as rectangles, in a deterministic order.
    fn quads(&self, grid: &VoxelGrid) -> Vec<Quad>;

    fn mesh(&self, grid: &VoxelGrid, palette: &Palette) -> MeshAssembly {
        #[cfg(feature = "tracy")]
        let _span = tracy_client::span!("Mesher::mesh");

        let mut builder = MeshBuilder::new(grid.extents(), palette);
        for quad in self.quads(grid).iter() {
            builder.push_rect(quad);
        }

        builder.finish()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MeshStrategy {
    Naive,
    #[default]
    Greedy,
}

impl MeshStrategy {
    #[must_use]
    pub fn mesh(self, grid: &VoxelGrid, palette: &Palette) -> MeshAssembly {
        match self {
            MeshStrategy::Naive => NaiveMesher.mesh(grid, palette),
            MeshStrategy::Greedy => GreedyMesher.mesh(grid, palette),
        }
    }
}

impl std::fmt::Display for MeshStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MeshStrategy::Naive => f.write_str("naive"),
            MeshStrategy::Greedy => f.write_str("greedy"),
        }
    }
}

/// A face is exposed when the neighbor along `direction` is empty, including off-grid
/// neighbors.
#[inline(always)]
pub(crate) fn is_face_exposed(grid: &VoxelGrid, position: UVec3, direction: Direction) -> bool {
    !grid.contains(position.as_ivec3() + direction.offset())
}
