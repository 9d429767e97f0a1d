mod extents;
mod grid;
mod paint;
mod shapes;
mod voxmodel;

pub use extents::{DEFAULT_EXTENT, Extents, MAX_EXTENT};
pub use grid::VoxelGrid;
pub use paint::Paint;
pub use shapes::ArrowShape;
pub use voxmodel::{ModelStats, VoxModel};
