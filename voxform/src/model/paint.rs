use crate::core::Rgba;

/// Color argument accepted by the [`VoxModel`](crate::VoxModel) construction primitives.
///
/// `Index` is written as-is, `Rgba` snaps to the nearest palette entry and `Named` looks the
/// color up in the model's material table first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint<'a> {
    Index(u8),
    Rgba(Rgba),
    Named(&'a str),
}

impl From<u8> for Paint<'_> {
    fn from(index: u8) -> Self {
        Paint::Index(index)
    }
}

impl From<Rgba> for Paint<'_> {
    fn from(color: Rgba) -> Self {
        Paint::Rgba(color)
    }
}

impl<'a> From<&'a str> for Paint<'a> {
    fn from(name: &'a str) -> Self {
        Paint::Named(name)
    }
}
