//! Module `model::voxmodel`
//!
//! Defines [`VoxModel`], a voxel grid bundled with the palette it indexes into and the named
//! material table used to resolve [`Paint`] arguments.
//!
//! # Examples
//!
//! ```rust
//! use glam::IVec3;
//! use voxform::{Direction, Extents, Rgba, VoxModel};
//!
//! let mut model = VoxModel::new(Extents::new(16, 16, 4));
//!
//! model.fill_box(IVec3::ZERO, IVec3::new(15, 15, 0), "frame");
//! model.fill_box(IVec3::new(0, 0, 1), IVec3::new(15, 15, 1), "belt");
//! model.draw_arrow(IVec3::new(12, 8, 2), Direction::PosX, Default::default(), "arrow");
//! model.set_voxel(IVec3::new(0, 0, 3), Rgba::opaque(250, 250, 10));
//!
//! let stats = model.stats();
//! assert_eq!(stats.voxel_count, 256 + 256 + 8 + 1);
//! ```

use glam::{IVec2, IVec3};

use crate::{
    core::{Direction, MaterialTable, Palette},
    io::VOX_VERSION,
    model::{ArrowShape, Extents, Paint, VoxelGrid},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoxModel {
    pub grid: VoxelGrid,
    pub palette: Palette,
    pub materials: MaterialTable,
    /// Header version read from disk, or the current version for new models.
    pub version: u32,
}

impl Default for VoxModel {
    fn default() -> Self {
        Self::new(Extents::default())
    }
}

impl VoxModel {
    /// Creates an empty model using the default materials and palette.
    #[must_use]
    pub fn new(extents: Extents) -> Self {
        Self::with_materials(extents, MaterialTable::default())
    }

    /// Creates an empty model whose palette is built from `materials`.
    #[must_use]
    pub fn with_materials(extents: Extents, materials: MaterialTable) -> Self {
        Self {
            grid: VoxelGrid::new(extents),
            palette: Palette::from_materials(&materials),
            materials,
            version: VOX_VERSION,
        }
    }

    #[must_use]
    pub fn from_parts(grid: VoxelGrid, palette: Palette) -> Self {
        Self {
            grid,
            palette,
            materials: MaterialTable::default(),
            version: VOX_VERSION,
        }
    }

    #[must_use]
    #[inline(always)]
    pub fn extents(&self) -> Extents {
        self.grid.extents()
    }

    /// Resolves a [`Paint`] to a voxel index.
    ///
    /// Returns `None` for material names missing from the table.
    #[must_use]
    pub fn resolve(&self, paint: Paint<'_>) -> Option<u8> {
        match paint {
            Paint::Index(index) => Some(index),
            Paint::Rgba(color) => Some(self.palette.nearest(color).index),
            Paint::Named(name) => match self.materials.get(name) {
                Some(color) => Some(self.palette.nearest(color).index),
                None => {
                    log::warn!("Unknown material '{name}', nothing written");
                    None
                }
            },
        }
    }

    pub fn set_voxel<'a>(&mut self, position: IVec3, paint: impl Into<Paint<'a>>) -> bool {
        self.resolve(paint.into())
            .is_some_and(|index| self.grid.set_voxel(position, index))
    }

    pub fn remove_voxel(&mut self, position: IVec3) -> Option<u8> {
        self.grid.remove_voxel(position)
    }

    pub fn fill_box<'a>(&mut self, a: IVec3, b: IVec3, paint: impl Into<Paint<'a>>) -> usize {
        self.resolve(paint.into())
            .map_or(0, |index| self.grid.fill_box(a, b, index))
    }

    pub fn fill_box_hollow<'a>(
        &mut self,
        a: IVec3,
        b: IVec3,
        thickness: i32,
        paint: impl Into<Paint<'a>>,
    ) -> usize {
        self.resolve(paint.into())
            .map_or(0, |index| self.grid.fill_box_hollow(a, b, thickness, index))
    }

    pub fn fill_cylinder<'a>(
        &mut self,
        center: IVec2,
        z_range: (i32, i32),
        radius: i32,
        paint: impl Into<Paint<'a>>,
    ) -> usize {
        self.resolve(paint.into()).map_or(0, |index| {
            self.grid.fill_cylinder(center, z_range, radius, index)
        })
    }

    pub fn draw_line<'a>(&mut self, a: IVec3, b: IVec3, paint: impl Into<Paint<'a>>) -> usize {
        self.resolve(paint.into())
            .map_or(0, |index| self.grid.draw_line(a, b, index))
    }

    pub fn draw_arrow<'a>(
        &mut self,
        tip: IVec3,
        direction: Direction,
        shape: ArrowShape,
        paint: impl Into<Paint<'a>>,
    ) -> usize {
        self.resolve(paint.into())
            .map_or(0, |index| self.grid.draw_arrow(tip, direction, shape, index))
    }

    #[must_use]
    pub fn stats(&self) -> ModelStats {
        let voxel_count = self.grid.len();

        ModelStats {
            extents: self.extents(),
            voxel_count,
            fill_ratio: voxel_count as f64 / self.extents().volume() as f64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelStats {
    pub extents: Extents,
    pub voxel_count: usize,
    /// Occupied share of the grid volume, `0.0..=1.0`.
    pub fill_ratio: f64,
}

impl std::fmt::Display for ModelStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} grid, {} voxels ({:.2}% filled)",
            self.extents,
            self.voxel_count,
            self.fill_ratio * 100.0
        )
    }
}
