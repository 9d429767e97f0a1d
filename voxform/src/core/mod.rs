mod direction;
mod materials;
mod palette;
mod rgba;

pub use direction::{Axis, Direction, DirectionData};
pub use materials::{MAX_MATERIALS, MaterialTable};
pub use palette::{ADDRESSABLE_SLOTS, NearestColor, PALETTE_SIZE, Palette, gray_ramp_value};
pub use rgba::Rgba;
