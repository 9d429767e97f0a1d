//! Module `model::grid`
//!
//! Defines [`VoxelGrid`], sparse voxel storage bounded by [`Extents`].
//!
//! The grid maps integer coordinates to one-based palette indices. Writes outside the
//! extents, or with index `0`, are dropped instead of failing; [`VoxelGrid::set_voxel`]
//! reports whether the write took effect so strict callers can still check.
//!
//! # Examples
//!
//! ```rust
//! use glam::IVec3;
//! use voxform::{Extents, VoxelGrid};
//!
//! let mut grid = VoxelGrid::new(Extents::new(4, 4, 4));
//!
//! assert!(grid.set_voxel(IVec3::new(1, 2, 3), 5));
//! assert!(!grid.set_voxel(IVec3::new(4, 0, 0), 5));
//! assert!(!grid.set_voxel(IVec3::new(0, 0, 0), 0));
//!
//! assert_eq!(grid.get(IVec3::new(1, 2, 3)), Some(5));
//! assert_eq!(grid.len(), 1);
//! ```

use glam::{IVec3, UVec3};
use rustc_hash::FxHashMap;

use crate::model::Extents;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoxelGrid {
    extents: Extents,
    voxels: FxHashMap<UVec3, u8>,
}

impl VoxelGrid {
    #[must_use]
    pub fn new(extents: Extents) -> Self {
        Self {
            extents,
            voxels: FxHashMap::default(),
        }
    }

    #[must_use]
    #[inline(always)]
    pub fn extents(&self) -> Extents {
        self.extents
    }

    #[must_use]
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    #[must_use]
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    /// Stores `index` at `position`.
    ///
    /// Returns `false` and leaves the grid untouched when `position` is outside the extents
    /// or `index` is `0`.
    pub fn set_voxel(&mut self, position: IVec3, index: u8) -> bool {
        if index == 0 || !self.extents.contains(position) {
            return false;
        }

        self.voxels.insert(position.as_uvec3(), index);

        true
    }

    /// Removes the voxel at `position`, returning its index if one was stored.
    pub fn remove_voxel(&mut self, position: IVec3) -> Option<u8> {
        if !self.extents.contains(position) {
            return None;
        }

        self.voxels.remove(&position.as_uvec3())
    }

    /// Index stored at `position`; `None` for empty cells and positions outside the grid.
    #[must_use]
    #[inline(always)]
    pub fn get(&self, position: IVec3) -> Option<u8> {
        if !self.extents.contains(position) {
            return None;
        }

        self.voxels.get(&position.as_uvec3()).copied()
    }

    #[must_use]
    #[inline(always)]
    pub fn contains(&self, position: IVec3) -> bool {
        self.get(position).is_some()
    }

    /// Iterates voxels in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (UVec3, u8)> + '_ {
        self.voxels.iter().map(|(position, index)| (*position, *index))
    }

    /// Voxels ordered by `(z, y, x)`; used wherever output has to be deterministic.
    #[must_use]
    pub fn sorted(&self) -> Vec<(UVec3, u8)> {
        let mut voxels: Vec<_> = self.iter().collect();
        voxels.sort_unstable_by_key(|(position, _)| (position.z, position.y, position.x));

        voxels
    }

    pub fn clear(&mut self) {
        self.voxels.clear();
    }
}
