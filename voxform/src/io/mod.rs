pub mod chunk;
pub mod consts;
pub mod export;
pub mod import;

pub use consts::{VOX_MAGIC, VOX_VERSION};
pub use export::{encode_vox, export_mesh_to_obj, export_model_to_vox, write_vox};
pub use import::{VoxChunk, VoxelRecord, decode_vox, import_model_from_vox, parse_chunk, read_vox};
