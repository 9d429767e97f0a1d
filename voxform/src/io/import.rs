use std::{io::Read, path::Path};

use byteorder::{LittleEndian, ReadBytesExt};
use glam::{IVec3, UVec3};

use crate::{
    Result, VoxError,
    core::{PALETTE_SIZE, Palette, Rgba},
    io::{
        chunk::{Chunk, ChunkId, read_chunk, take},
        consts::{
            RGBA_CONTENT_SIZE, SIZE_CONTENT_SIZE, VOX_MAGIC, VOX_VERSION, VOXEL_RECORD_SIZE,
        },
    },
    model::{Extents, VoxModel, VoxelGrid},
};

/// One `(x, y, z, color_index)` record of an `XYZI` chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoxelRecord {
    pub x: u8,
    pub y: u8,
    pub z: u8,
    pub index: u8,
}

impl VoxelRecord {
    #[must_use]
    #[inline(always)]
    pub fn position(&self) -> IVec3 {
        IVec3::new(self.x as i32, self.y as i32, self.z as i32)
    }
}

/// A child of `MAIN`, classified by tag.
#[derive(Debug, Clone, PartialEq)]
pub enum VoxChunk<'a> {
    Size(UVec3),
    Voxels(Vec<VoxelRecord>),
    Palette(Box<Palette>),
    /// A chunk this reader does not interpret, kept as its raw span.
    Unknown(Chunk<'a>),
}

/// Interprets the content of a `MAIN` child.
///
/// # Errors
///
/// [`VoxError::TruncatedInput`] if a known chunk's content is shorter than its layout needs.
pub fn parse_chunk(chunk: Chunk<'_>) -> Result<VoxChunk<'_>> {
    let mut content = chunk.content;

    match chunk.id {
        ChunkId::SIZE => {
            let mut size = take(&mut content, SIZE_CONTENT_SIZE)?;
            let x = size.read_u32::<LittleEndian>()?;
            let y = size.read_u32::<LittleEndian>()?;
            let z = size.read_u32::<LittleEndian>()?;

            Ok(VoxChunk::Size(UVec3::new(x, y, z)))
        }
        ChunkId::XYZI => {
            let count = take(&mut content, 4)?.read_u32::<LittleEndian>()? as usize;
            let records = take(&mut content, count.saturating_mul(VOXEL_RECORD_SIZE))?;

            let voxels = records
                .chunks_exact(VOXEL_RECORD_SIZE)
                .map(|record| VoxelRecord {
                    x: record[0],
                    y: record[1],
                    z: record[2],
                    index: record[3],
                })
                .collect();

            Ok(VoxChunk::Voxels(voxels))
        }
        ChunkId::RGBA => {
            let rgba = take(&mut content, RGBA_CONTENT_SIZE)?;

            let mut entries = [Rgba::default(); PALETTE_SIZE];
            for (entry, bytes) in entries.iter_mut().zip(rgba.chunks_exact(4)) {
                *entry = Rgba::new(bytes[0], bytes[1], bytes[2], bytes[3]);
            }

            Ok(VoxChunk::Palette(Box::new(Palette::from_entries(entries))))
        }
        _ => Ok(VoxChunk::Unknown(chunk)),
    }
}

/// Decodes a complete `.vox` buffer.
///
/// Missing `SIZE`, `XYZI` or `RGBA` chunks leave the default extents, an empty grid and the
/// default palette respectively. Records outside the declared size, and records with color
/// index `0`, are dropped.
///
/// # Errors
///
/// * [`VoxError::UnknownMagic`] if the buffer does not start with `"VOX "`.
/// * [`VoxError::UnexpectedChunk`] if the top-level chunk is not `MAIN`.
/// * [`VoxError::TruncatedInput`] if the header or any chunk runs past the end of the buffer.
pub fn decode_vox(data: &[u8]) -> Result<VoxModel> {
    #[cfg(feature = "tracy")]
    let _span = tracy_client::span!("decode_vox");

    let mut input = data;

    let magic = take(&mut input, VOX_MAGIC.len())?;
    if magic != VOX_MAGIC {
        let mut found = [0u8; 4];
        found.copy_from_slice(magic);
        return Err(VoxError::UnknownMagic(found));
    }

    let version = take(&mut input, 4)?.read_u32::<LittleEndian>()?;
    if version != VOX_VERSION {
        log::debug!("Reading .vox version {version}, expected {VOX_VERSION}");
    }

    let main = read_chunk(&mut input)?;
    if main.id != ChunkId::MAIN {
        return Err(VoxError::UnexpectedChunk { found: main.id });
    }

    if !input.is_empty() {
        log::debug!("Ignoring {} trailing bytes after MAIN", input.len());
    }

    let mut size = None;
    let mut records = Vec::new();
    let mut palette = None;

    for chunk in main.children() {
        match parse_chunk(chunk?)? {
            VoxChunk::Size(value) => size = Some(value),
            VoxChunk::Voxels(voxels) => records.extend(voxels),
            VoxChunk::Palette(value) => palette = Some(*value),
            VoxChunk::Unknown(chunk) => {
                log::debug!(
                    "Skipping unknown chunk '{}' ({} + {} bytes)",
                    chunk.id,
                    chunk.content.len(),
                    chunk.children.len()
                );
            }
        }
    }

    let extents = size.map_or_else(Extents::default, |size| {
        Extents::new(size.x, size.y, size.z)
    });

    let mut grid = VoxelGrid::new(extents);
    let mut dropped = 0usize;
    for record in records.iter() {
        if !grid.set_voxel(record.position(), record.index) {
            dropped += 1;
        }
    }

    if dropped > 0 {
        log::warn!(
            "Dropped {dropped} of {} voxel records outside {extents} or with color index 0",
            records.len()
        );
    }

    let mut model = VoxModel::from_parts(grid, palette.unwrap_or_default());
    model.version = version;

    Ok(model)
}

pub fn read_vox<R: Read>(reader: &mut R) -> Result<VoxModel> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;

    decode_vox(&data)
}

pub fn import_model_from_vox<P: AsRef<Path>>(path: &P) -> Result<VoxModel> {
    let data = std::fs::read(path)?;
    let model = decode_vox(&data)?;

    log::info!(
        "Imported {} voxels ({}) from {}",
        model.grid.len(),
        model.extents(),
        path.as_ref().display()
    );

    Ok(model)
}
