pub mod core;
pub mod error;
pub mod io;
pub mod mesh;
pub mod model;

pub use crate::core::{Direction, MaterialTable, Palette, Rgba};
pub use error::{ConfigError, Result, VoxError};
pub use mesh::{GreedyMesher, MeshAssembly, MeshStrategy, Mesher, NaiveMesher, Quad};
pub use model::{ArrowShape, Extents, Paint, VoxModel, VoxelGrid};
