use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use byteorder::{LittleEndian, WriteBytesExt};

use crate::{
    Result,
    io::{
        chunk::{ChunkId, encode_chunk, write_chunk},
        consts::{
            CHUNK_HEADER_SIZE, RGBA_CONTENT_SIZE, SIZE_CONTENT_SIZE, VOX_HEADER_SIZE, VOX_MAGIC,
            VOX_VERSION, VOXEL_RECORD_SIZE,
        },
    },
    mesh::MeshAssembly,
    model::VoxModel,
};

/// Encodes `model` as a complete `.vox` buffer.
///
/// `MAIN` always holds `SIZE`, `XYZI` and `RGBA` in that order. Voxel records are sorted by
/// `(z, y, x)` so equal models encode to identical bytes.
pub fn encode_vox(model: &VoxModel) -> Result<Vec<u8>> {
    #[cfg(feature = "tracy")]
    let _span = tracy_client::span!("encode_vox");

    let extents = model.extents();
    let mut size = Vec::with_capacity(SIZE_CONTENT_SIZE);
    size.write_u32::<LittleEndian>(extents.x())?;
    size.write_u32::<LittleEndian>(extents.y())?;
    size.write_u32::<LittleEndian>(extents.z())?;

    let voxels = model.grid.sorted();
    let mut xyzi = Vec::with_capacity(4 + voxels.len() * VOXEL_RECORD_SIZE);
    xyzi.write_u32::<LittleEndian>(voxels.len() as u32)?;
    for (position, index) in voxels.iter() {
        // Positions are below the 256 extent limit.
        xyzi.extend_from_slice(&[position.x as u8, position.y as u8, position.z as u8, *index]);
    }

    let mut rgba = Vec::with_capacity(RGBA_CONTENT_SIZE);
    for entry in model.palette.entries().iter() {
        rgba.extend_from_slice(&entry.to_array());
    }

    let mut children =
        Vec::with_capacity(3 * CHUNK_HEADER_SIZE + size.len() + xyzi.len() + rgba.len());
    write_chunk(&mut children, ChunkId::SIZE, &size, &[])?;
    write_chunk(&mut children, ChunkId::XYZI, &xyzi, &[])?;
    write_chunk(&mut children, ChunkId::RGBA, &rgba, &[])?;

    let mut data = Vec::with_capacity(VOX_HEADER_SIZE + CHUNK_HEADER_SIZE + children.len());
    data.extend_from_slice(&VOX_MAGIC);
    data.write_u32::<LittleEndian>(VOX_VERSION)?;
    data.extend(encode_chunk(ChunkId::MAIN, &[], &children)?);

    Ok(data)
}

pub fn write_vox<W: Write>(writer: &mut W, model: &VoxModel) -> Result<()> {
    writer.write_all(&encode_vox(model)?)?;

    Ok(())
}

/// Writes `model` to `path`, creating missing parent directories.
pub fn export_model_to_vox<P: AsRef<Path>>(path: &P, model: &VoxModel) -> Result<()> {
    let path = path.as_ref();
    create_parent_dirs(path)?;

    let data = encode_vox(model)?;
    std::fs::write(path, &data)?;

    log::info!(
        "Exported {} voxels to {} ({} bytes)",
        model.grid.len(),
        path.display(),
        data.len()
    );

    Ok(())
}

/// Writes `mesh` as a Wavefront OBJ file plus a sibling `.mtl` holding one material per
/// palette index.
///
/// Each triangle gets its own face normal, and consecutive triangles sharing a material share
/// a `usemtl` group.
pub fn export_mesh_to_obj<P: AsRef<Path>>(name: &str, path: &P, mesh: &MeshAssembly) -> Result<()> {
    let path = path.as_ref();
    create_parent_dirs(path)?;

    let mtl_path = path.with_extension("mtl");
    let mtl_name = mtl_path
        .file_name()
        .map_or_else(|| format!("{name}.mtl"), |file| file.to_string_lossy().into_owned());

    let mut writer = BufWriter::new(File::create(path)?);

    writeln!(writer, "mtllib {mtl_name}")?;
    writeln!(writer, "o {name}")?;

    for vertex in mesh.vertices.iter() {
        writeln!(writer, "v {} {} {}", vertex.x, vertex.y, vertex.z)?;
    }

    for triangle in 0..mesh.triangle_count() {
        let normal = mesh.face_normal(triangle).unwrap_or_default();
        writeln!(writer, "vn {} {} {}", normal.x, normal.y, normal.z)?;
    }

    let mut current_material = None;
    for (triangle, (indices, material)) in mesh
        .triangles
        .iter()
        .zip(mesh.triangle_materials.iter())
        .enumerate()
    {
        if current_material != Some(*material) {
            writeln!(writer, "usemtl color_{material}")?;
            current_material = Some(*material);
        }

        let normal = triangle + 1;
        writeln!(
            writer,
            "f {}//{normal} {}//{normal} {}//{normal}",
            indices[0] + 1,
            indices[1] + 1,
            indices[2] + 1
        )?;
    }

    writer.flush()?;

    let mut writer = BufWriter::new(File::create(&mtl_path)?);
    for (material, color) in mesh.materials.iter() {
        writeln!(writer, "newmtl color_{material}")?;
        writeln!(writer, "Kd {} {} {}", color.x, color.y, color.z)?;
        writeln!(writer, "d {}", color.w)?;
        writeln!(writer)?;
    }
    writer.flush()?;

    log::info!(
        "Exported {} to {} ({})",
        name,
        path.display(),
        mesh.stats()
    );

    Ok(())
}

fn create_parent_dirs(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    Ok(())
}
