//! Module `core::rgba`
//!
//! Defines [`Rgba`], a straight 8-bit-per-channel color as stored in the `.vox` `RGBA` chunk.
//!
//! # Examples
//!
//! ```rust
//! use voxform::Rgba;
//!
//! let iron = Rgba::opaque(115, 115, 120);
//! assert_eq!(iron.distance_squared(Rgba::opaque(115, 115, 121)), 1);
//! ```

use glam::Vec4;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[u8; 4]", into = "[u8; 4]")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Creates a new [`Rgba`] from its four channels.
    #[must_use]
    #[inline(always)]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a fully opaque color.
    #[must_use]
    #[inline(always)]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, u8::MAX)
    }

    /// Creates an opaque gray with all color channels set to `value`.
    #[must_use]
    #[inline(always)]
    pub const fn gray(value: u8) -> Self {
        Self::opaque(value, value, value)
    }

    /// Summed squared difference over R, G and B. Alpha is ignored.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use voxform::Rgba;
    ///
    /// let a = Rgba::new(10, 20, 30, 0);
    /// let b = Rgba::new(13, 16, 30, 255);
    /// assert_eq!(a.distance_squared(b), 9 + 16);
    /// ```
    #[must_use]
    #[inline(always)]
    pub const fn distance_squared(&self, other: Rgba) -> u32 {
        let dr = self.r.abs_diff(other.r) as u32;
        let dg = self.g.abs_diff(other.g) as u32;
        let db = self.b.abs_diff(other.b) as u32;

        dr * dr + dg * dg + db * db
    }

    /// Returns the color with every channel mapped into `0.0..=1.0`.
    #[must_use]
    pub fn to_normalized(&self) -> Vec4 {
        Vec4::new(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        )
    }

    #[must_use]
    #[inline(always)]
    pub const fn to_array(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[u8; 4]> for Rgba {
    #[inline]
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

impl From<Rgba> for [u8; 4] {
    #[inline]
    fn from(color: Rgba) -> [u8; 4] {
        color.to_array()
    }
}

impl std::fmt::Display for Rgba {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_ignores_alpha() {
        let a = Rgba::new(1, 2, 3, 0);
        let b = Rgba::new(1, 2, 3, 255);
        assert_eq!(a.distance_squared(b), 0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = Rgba::opaque(255, 0, 10);
        let b = Rgba::opaque(0, 255, 20);
        assert_eq!(a.distance_squared(b), b.distance_squared(a));
        assert_eq!(a.distance_squared(b), 255 * 255 * 2 + 100);
    }

    #[test]
    fn test_normalized() {
        let color = Rgba::new(255, 0, 51, 255);
        assert_eq!(color.to_normalized(), Vec4::new(1.0, 0.0, 0.2, 1.0));
    }

    #[test]
    fn test_array_roundtrip() {
        let color = Rgba::new(4, 3, 2, 1);
        let bytes: [u8; 4] = color.into();
        assert_eq!(bytes, [4, 3, 2, 1]);
        assert_eq!(Rgba::from(bytes), color);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Rgba::new(255, 16, 0, 255)), "#ff1000ff");
    }
}
