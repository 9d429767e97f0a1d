//! Module `core::palette`
//!
//! Defines [`Palette`], the fixed 256-entry color table of a `.vox` model.
//!
//! Voxels reference the palette by a one-based index: a stored value `v` in `1..=255`
//! selects `entries[v - 1]`, and `0` means "no voxel". The last slot is therefore never
//! reachable from a voxel, but it is still stored and written back to disk.
//!
//! # Examples
//!
//! ```rust
//! use voxform::{Palette, Rgba};
//!
//! let palette = Palette::default();
//!
//! // "iron" is the first default material, so it lives at index 1.
//! assert_eq!(palette.color(1), Some(Rgba::opaque(115, 115, 120)));
//! assert_eq!(palette.color(0), None);
//!
//! let nearest = palette.nearest(Rgba::opaque(114, 116, 120));
//! assert_eq!(nearest.index, 1);
//! assert_eq!(nearest.distance, 2);
//! ```

use crate::core::{MaterialTable, Rgba};

pub const PALETTE_SIZE: usize = 256;

/// Number of palette slots a voxel index can reference.
pub const ADDRESSABLE_SLOTS: usize = PALETTE_SIZE - 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: [Rgba; PALETTE_SIZE],
}

/// Result of a nearest-color query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NearestColor {
    /// One-based voxel index of the matching entry.
    pub index: u8,
    /// Summed squared RGB difference to the query color.
    pub distance: u32,
}

/// Gray value used for a palette slot no material claims.
#[inline(always)]
pub const fn gray_ramp_value(slot: usize) -> u8 {
    ((slot * 255) / PALETTE_SIZE) as u8
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_materials(&MaterialTable::default())
    }
}

impl Palette {
    #[must_use]
    pub const fn from_entries(entries: [Rgba; PALETTE_SIZE]) -> Self {
        Self { entries }
    }

    /// A palette holding only the gray ramp.
    #[must_use]
    pub fn gray_ramp() -> Self {
        Self {
            entries: std::array::from_fn(|slot| Rgba::gray(gray_ramp_value(slot))),
        }
    }

    /// Places the materials in table order starting at slot 0; remaining slots get the
    /// gray ramp.
    #[must_use]
    pub fn from_materials(materials: &MaterialTable) -> Self {
        let mut palette = Self::gray_ramp();

        for (slot, (_, color)) in materials.iter().enumerate().take(ADDRESSABLE_SLOTS) {
            palette.entries[slot] = color;
        }

        palette
    }

    #[must_use]
    #[inline(always)]
    pub fn entries(&self) -> &[Rgba; PALETTE_SIZE] {
        &self.entries
    }

    /// Color of a zero-based slot.
    #[must_use]
    #[inline(always)]
    pub fn slot(&self, slot: usize) -> Option<Rgba> {
        self.entries.get(slot).copied()
    }

    /// Color referenced by a one-based voxel index. Index `0` is "no voxel" and has no color.
    #[must_use]
    #[inline(always)]
    pub fn color(&self, index: u8) -> Option<Rgba> {
        match index {
            0 => None,
            index => Some(self.entries[index as usize - 1]),
        }
    }

    /// Finds the entry closest to `color` by summed squared RGB difference.
    ///
    /// Alpha is ignored. Ties resolve to the first entry in palette order. Only the
    /// [`ADDRESSABLE_SLOTS`] entries a voxel can reference are considered.
    #[must_use]
    pub fn nearest(&self, color: Rgba) -> NearestColor {
        let mut best = NearestColor {
            index: 1,
            distance: u32::MAX,
        };

        for (slot, entry) in self.entries[..ADDRESSABLE_SLOTS].iter().enumerate() {
            let distance = entry.distance_squared(color);
            if distance < best.distance {
                best = NearestColor {
                    index: (slot + 1) as u8,
                    distance,
                };

                if distance == 0 {
                    break;
                }
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gray_ramp() {
        let palette = Palette::gray_ramp();
        assert_eq!(palette.slot(0), Some(Rgba::gray(0)));
        assert_eq!(palette.slot(128), Some(Rgba::gray(127)));
        assert_eq!(palette.slot(255), Some(Rgba::gray(254)));
        assert_eq!(palette.slot(256), None);
    }

    #[test]
    fn test_default_places_materials_first() {
        let palette = Palette::default();
        let materials = MaterialTable::default();

        for (slot, (_, color)) in materials.iter().enumerate() {
            assert_eq!(palette.slot(slot), Some(color));
        }

        let first_free = materials.len();
        assert_eq!(
            palette.slot(first_free),
            Some(Rgba::gray(gray_ramp_value(first_free)))
        );
        assert_eq!(palette.entries().len(), PALETTE_SIZE);
    }

    #[test]
    fn test_color_is_one_based() {
        let mut entries = [Rgba::default(); PALETTE_SIZE];
        entries[0] = Rgba::opaque(1, 2, 3);
        entries[254] = Rgba::opaque(4, 5, 6);
        entries[255] = Rgba::opaque(7, 8, 9);
        let palette = Palette::from_entries(entries);

        assert_eq!(palette.color(0), None);
        assert_eq!(palette.color(1), Some(Rgba::opaque(1, 2, 3)));
        assert_eq!(palette.color(255), Some(Rgba::opaque(4, 5, 6)));
    }

    #[test]
    fn test_nearest_exact_match() {
        let palette = Palette::default();
        let nearest = palette.nearest(Rgba::new(115, 115, 120, 255));

        assert_eq!(nearest.index, 1);
        assert_eq!(nearest.distance, 0);
    }

    #[test]
    fn test_nearest_near_miss() {
        let palette = Palette::default();
        // Closest to "copper" (184, 115, 51), slot 1.
        let nearest = palette.nearest(Rgba::new(180, 110, 50, 0));

        assert_eq!(nearest.index, 2);
        assert_eq!(nearest.distance, 16 + 25 + 1);
    }

    #[test]
    fn test_nearest_tie_prefers_first_entry() {
        let mut entries = [Rgba::gray(200); PALETTE_SIZE];
        entries[3] = Rgba::gray(10);
        entries[7] = Rgba::gray(10);
        let palette = Palette::from_entries(entries);

        let nearest = palette.nearest(Rgba::gray(12));
        assert_eq!(nearest.index, 4);
        assert_eq!(nearest.distance, 12);
    }

    #[test]
    fn test_nearest_skips_unaddressable_slot() {
        let mut entries = [Rgba::gray(200); PALETTE_SIZE];
        entries[255] = Rgba::gray(0);
        let palette = Palette::from_entries(entries);

        let nearest = palette.nearest(Rgba::gray(0));
        assert_eq!(nearest.index, 1);
    }
}
