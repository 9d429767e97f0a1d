//! Module `io::chunk`
//!
//! Generic chunk framing shared by the `.vox` reader and writer. A chunk is laid out as
//!
//! ```text
//! tag[4] | content_len: u32le | children_len: u32le | content | children
//! ```
//!
//! with no padding and no checksum. `children` is itself a concatenation of chunks; the
//! framing layer treats it as opaque bytes and [`ChunkIter`] walks it on demand.
//!
//! # Examples
//!
//! ```rust
//! use voxform::io::chunk::{ChunkId, encode_chunk, read_chunk};
//!
//! let bytes = encode_chunk(ChunkId::SIZE, &[1, 2, 3], &[]).unwrap();
//! let mut cursor = bytes.as_slice();
//! let chunk = read_chunk(&mut cursor).unwrap();
//!
//! assert_eq!(chunk.id, ChunkId::SIZE);
//! assert_eq!(chunk.content, &[1, 2, 3]);
//! assert!(cursor.is_empty());
//! ```

use std::io::Write;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::{Result, VoxError, io::consts::CHUNK_HEADER_SIZE};

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkId(pub [u8; 4]);

impl ChunkId {
    pub const MAIN: ChunkId = ChunkId(*b"MAIN");
    pub const SIZE: ChunkId = ChunkId(*b"SIZE");
    pub const XYZI: ChunkId = ChunkId(*b"XYZI");
    pub const RGBA: ChunkId = ChunkId(*b"RGBA");
}

impl std::fmt::Display for ChunkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.escape_ascii())
    }
}

impl std::fmt::Debug for ChunkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ChunkId(\"{}\")", self.0.escape_ascii())
    }
}

/// A decoded chunk borrowing its payloads from the input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    pub id: ChunkId,
    pub content: &'a [u8],
    pub children: &'a [u8],
}

impl<'a> Chunk<'a> {
    #[must_use]
    pub fn children(&self) -> ChunkIter<'a> {
        ChunkIter::new(self.children)
    }
}

pub fn write_chunk<W: Write>(
    writer: &mut W,
    id: ChunkId,
    content: &[u8],
    children: &[u8],
) -> Result<()> {
    let content_len = length_field(content)?;
    let children_len = length_field(children)?;

    writer.write_all(&id.0)?;
    writer.write_u32::<LittleEndian>(content_len)?;
    writer.write_u32::<LittleEndian>(children_len)?;
    writer.write_all(content)?;
    writer.write_all(children)?;

    Ok(())
}

pub fn encode_chunk(id: ChunkId, content: &[u8], children: &[u8]) -> Result<Vec<u8>> {
    let mut data = Vec::with_capacity(CHUNK_HEADER_SIZE + content.len() + children.len());
    write_chunk(&mut data, id, content, children)?;

    Ok(data)
}

/// Reads one chunk from the front of `input` and advances it past the chunk.
///
/// # Errors
///
/// [`VoxError::TruncatedInput`] if the header or either declared payload runs past the end
/// of `input`. The cursor position is unspecified after an error.
pub fn read_chunk<'a>(input: &mut &'a [u8]) -> Result<Chunk<'a>> {
    let mut header = take(input, CHUNK_HEADER_SIZE)?;

    let mut id = [0u8; 4];
    std::io::Read::read_exact(&mut header, &mut id)?;
    let content_len = header.read_u32::<LittleEndian>()? as usize;
    let children_len = header.read_u32::<LittleEndian>()? as usize;

    let content = take(input, content_len)?;
    let children = take(input, children_len)?;

    Ok(Chunk {
        id: ChunkId(id),
        content,
        children,
    })
}

/// Splits `len` bytes off the front of `input`.
pub(crate) fn take<'a>(input: &mut &'a [u8], len: usize) -> Result<&'a [u8]> {
    if input.len() < len {
        return Err(VoxError::TruncatedInput {
            needed: len,
            remaining: input.len(),
        });
    }

    let (head, tail) = input.split_at(len);
    *input = tail;

    Ok(head)
}

fn length_field(payload: &[u8]) -> Result<u32> {
    u32::try_from(payload.len()).map_err(|_| VoxError::ChunkTooLarge(payload.len()))
}

/// Iterator over a concatenation of chunks. Stops after the first error.
#[derive(Debug, Clone)]
pub struct ChunkIter<'a> {
    remaining: &'a [u8],
    failed: bool,
}

impl<'a> ChunkIter<'a> {
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            remaining: data,
            failed: false,
        }
    }
}

impl<'a> Iterator for ChunkIter<'a> {
    type Item = Result<Chunk<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.remaining.is_empty() {
            return None;
        }

        let chunk = read_chunk(&mut self.remaining);
        self.failed = chunk.is_err();

        Some(chunk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let bytes = encode_chunk(ChunkId(*b"TEST"), &[0xAA, 0xBB], &[0xCC]).unwrap();

        assert_eq!(
            bytes,
            [
                b'T', b'E', b'S', b'T', 2, 0, 0, 0, 1, 0, 0, 0, 0xAA, 0xBB, 0xCC
            ]
        );
    }

    #[test]
    fn test_roundtrip_nested() {
        let inner_a = encode_chunk(ChunkId::SIZE, &[1; 12], &[]).unwrap();
        let inner_b = encode_chunk(ChunkId::XYZI, &[0, 0, 0, 0], &[]).unwrap();
        let children = [inner_a, inner_b].concat();
        let bytes = encode_chunk(ChunkId::MAIN, &[], &children).unwrap();

        let mut cursor = bytes.as_slice();
        let main = read_chunk(&mut cursor).unwrap();
        assert!(cursor.is_empty());
        assert_eq!(main.id, ChunkId::MAIN);
        assert!(main.content.is_empty());
        assert_eq!(main.children, children.as_slice());

        let ids: Vec<_> = main.children().map(|chunk| chunk.unwrap().id).collect();
        assert_eq!(ids, [ChunkId::SIZE, ChunkId::XYZI]);
    }

    #[test]
    fn test_truncated_header() {
        let mut cursor: &[u8] = b"MAIN\0\0\0";
        let result = read_chunk(&mut cursor);

        assert!(matches!(
            result,
            Err(VoxError::TruncatedInput {
                needed: 12,
                remaining: 7
            })
        ));
    }

    #[test]
    fn test_truncated_content() {
        let mut bytes = encode_chunk(ChunkId::SIZE, &[1, 2, 3, 4], &[]).unwrap();
        bytes.truncate(bytes.len() - 1);

        let result = read_chunk(&mut bytes.as_slice());
        assert!(matches!(
            result,
            Err(VoxError::TruncatedInput {
                needed: 4,
                remaining: 3
            })
        ));
    }

    #[test]
    fn test_truncated_children() {
        let mut bytes = encode_chunk(ChunkId::MAIN, &[], &[9; 20]).unwrap();
        bytes.truncate(bytes.len() - 5);

        let result = read_chunk(&mut bytes.as_slice());
        assert!(matches!(
            result,
            Err(VoxError::TruncatedInput {
                needed: 20,
                remaining: 15
            })
        ));
    }

    #[test]
    fn test_iter_stops_after_error() {
        let mut data = encode_chunk(ChunkId::SIZE, &[], &[]).unwrap();
        data.extend_from_slice(b"XY");

        let mut iter = ChunkIter::new(&data);
        assert!(iter.next().unwrap().is_ok());
        assert!(iter.next().unwrap().is_err());
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_iter_empty() {
        assert_eq!(ChunkIter::new(&[]).count(), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(ChunkId::RGBA.to_string(), "RGBA");
        assert_eq!(ChunkId([b'n', 0, b'x', 0xFF]).to_string(), "n\\x00x\\xff");
    }
}
