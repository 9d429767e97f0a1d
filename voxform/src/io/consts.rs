pub const VOX_MAGIC: [u8; 4] = *b"VOX ";
pub const VOX_VERSION: u32 = 150;

/// Magic plus version.
pub const VOX_HEADER_SIZE: usize = 8;
/// Tag plus the two length fields.
pub const CHUNK_HEADER_SIZE: usize = 12;

pub const SIZE_CONTENT_SIZE: usize = 12;
pub const VOXEL_RECORD_SIZE: usize = 4;
pub const RGBA_CONTENT_SIZE: usize = 256 * 4;
