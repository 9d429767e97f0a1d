//! Module `error`
//!
//! Error types for the `.vox` codec and the material configuration loader.
//!
//! Construction primitives and meshers are total and never produce errors; only the
//! format boundary and configuration parsing can fail.

use thiserror::Error;

use crate::io::chunk::ChunkId;

/// Errors raised while decoding or encoding `.vox` data.
#[derive(Error, Debug)]
pub enum VoxError {
    /// The first four bytes of the input are not `"VOX "`.
    #[error("unknown magic {0:?}, expected \"VOX \"")]
    UnknownMagic([u8; 4]),
    /// The top-level chunk is something other than `MAIN`.
    #[error("unexpected top-level chunk '{found}', expected 'MAIN'")]
    UnexpectedChunk { found: ChunkId },
    /// A header or a declared chunk length runs past the end of the input.
    #[error("truncated input: needed {needed} bytes, {remaining} remaining")]
    TruncatedInput { needed: usize, remaining: usize },
    /// A chunk payload does not fit the 32-bit length field.
    #[error("chunk payload of {0} bytes exceeds the 32-bit length field")]
    ChunkTooLarge(usize),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while loading a [`MaterialTable`](crate::core::MaterialTable).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    /// More named materials than addressable palette slots.
    #[error("{0} materials defined, at most 255 fit in a palette")]
    TooManyMaterials(usize),
    #[error("material '{0}' is defined more than once")]
    DuplicateMaterial(String),
}

pub type Result<T> = std::result::Result<T, VoxError>;
