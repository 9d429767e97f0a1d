//! Module `model::extents`
//!
//! Defines [`Extents`], the bounded size of a voxel grid. Each axis holds between 1 and
//! [`MAX_EXTENT`] cells; out-of-range sizes are clamped on construction.
//!
//! # Examples
//!
//! ```rust
//! use glam::IVec3;
//! use voxform::Extents;
//!
//! let extents = Extents::new(16, 16, 2);
//! assert!(extents.contains(IVec3::new(15, 15, 1)));
//! assert!(!extents.contains(IVec3::new(0, 0, 2)));
//! assert!(!extents.contains(IVec3::new(-1, 0, 0)));
//! ```

use glam::{IVec3, UVec3};

use crate::core::Axis;

/// Largest size of a grid along any axis.
pub const MAX_EXTENT: u32 = 256;

pub const DEFAULT_EXTENT: u32 = 16;

#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Extents(UVec3);

impl Default for Extents {
    fn default() -> Self {
        Self(UVec3::splat(DEFAULT_EXTENT))
    }
}

impl From<Extents> for UVec3 {
    #[inline]
    fn from(extents: Extents) -> UVec3 {
        extents.0
    }
}

impl std::fmt::Display for Extents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}x{}", self.0.x, self.0.y, self.0.z)
    }
}

impl Extents {
    /// Creates new [`Extents`], clamping every axis into `1..=MAX_EXTENT`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use voxform::Extents;
    ///
    /// let extents = Extents::new(0, 300, 8);
    /// assert_eq!((extents.x(), extents.y(), extents.z()), (1, 256, 8));
    /// ```
    #[must_use]
    pub fn new(x: u32, y: u32, z: u32) -> Self {
        Self(UVec3::new(x, y, z).clamp(UVec3::ONE, UVec3::splat(MAX_EXTENT)))
    }

    #[must_use]
    #[inline(always)]
    pub const fn x(&self) -> u32 {
        self.0.x
    }

    #[must_use]
    #[inline(always)]
    pub const fn y(&self) -> u32 {
        self.0.y
    }

    #[must_use]
    #[inline(always)]
    pub const fn z(&self) -> u32 {
        self.0.z
    }

    #[must_use]
    #[inline(always)]
    pub const fn as_uvec3(&self) -> UVec3 {
        self.0
    }

    #[must_use]
    #[inline(always)]
    pub fn along(&self, axis: Axis) -> u32 {
        self.0.to_array()[axis.index()]
    }

    /// Returns `true` if `position` lies inside `[0, extent)` on every axis.
    #[must_use]
    #[inline(always)]
    pub fn contains(&self, position: IVec3) -> bool {
        position.cmpge(IVec3::ZERO).all() && position.cmplt(self.0.as_ivec3()).all()
    }

    /// Number of cells in the grid.
    #[must_use]
    pub fn volume(&self) -> usize {
        self.0.x as usize * self.0.y as usize * self.0.z as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let extents = Extents::default();
        assert_eq!(extents.as_uvec3(), UVec3::splat(16));
        assert_eq!(extents.volume(), 4096);
    }

    #[test]
    fn test_clamp() {
        let extents = Extents::new(0, 1000, 256);
        assert_eq!(extents.as_uvec3(), UVec3::new(1, 256, 256));
    }

    #[test]
    fn test_contains_bounds() {
        let extents = Extents::new(2, 3, 4);
        assert!(extents.contains(IVec3::ZERO));
        assert!(extents.contains(IVec3::new(1, 2, 3)));
        assert!(!extents.contains(IVec3::new(2, 0, 0)));
        assert!(!extents.contains(IVec3::new(0, 3, 0)));
        assert!(!extents.contains(IVec3::new(0, 0, 4)));
        assert!(!extents.contains(IVec3::new(0, -1, 0)));
    }

    #[test]
    fn test_along() {
        let extents = Extents::new(2, 3, 4);
        assert_eq!(extents.along(Axis::X), 2);
        assert_eq!(extents.along(Axis::Y), 3);
        assert_eq!(extents.along(Axis::Z), 4);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Extents::new(16, 8, 2)), "16x8x2");
    }
}
