use std::path::Path;

use anyhow::{Context, bail};
use env_logger::Env;

use voxform::{
    MeshStrategy,
    io::{export_mesh_to_obj, import_model_from_vox},
};

struct Args {
    input: String,
    output: String,
    strategy: MeshStrategy,
    weld: bool,
}

fn usage(program: &str) -> String {
    format!("Usage: {program} <input.vox> <output.obj> [--naive] [--weld]")
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "vox-export".to_string());

    let mut paths = Vec::new();
    let mut strategy = MeshStrategy::default();
    let mut weld = false;

    for arg in args {
        match arg.as_str() {
            "--naive" => strategy = MeshStrategy::Naive,
            "--weld" => weld = true,
            flag if flag.starts_with("--") => bail!("unknown option '{flag}'\n{}", usage(&program)),
            _ => paths.push(arg),
        }
    }

    let [input, output]: [String; 2] = paths
        .try_into()
        .map_err(|_| anyhow::anyhow!(usage(&program)))?;

    Ok(Args {
        input,
        output,
        strategy,
        weld,
    })
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    #[cfg(feature = "tracy")]
    tracy_client::Client::start();

    let args = parse_args()?;

    let input = Path::new(&args.input);
    let output = Path::new(&args.output);

    let name = output
        .file_stem()
        .and_then(|stem| stem.to_str())
        .context("output path has no file name")?
        .to_string();

    let model = import_model_from_vox(&input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    println!("Model: {}", model.stats());

    let now = std::time::Instant::now();
    let mut mesh = args.strategy.mesh(&model.grid, &model.palette);
    if args.weld {
        let removed = mesh.weld_vertices();
        log::debug!("Welded {removed} duplicate vertices");
    }
    println!("Generating {} mesh took {:?}", args.strategy, now.elapsed());

    println!(
        " Vertices: {}",
        humanize_bytes::humanize_quantity!(mesh.vertex_count()),
    );
    println!(
        " Triangles: {}",
        humanize_bytes::humanize_quantity!(mesh.triangle_count()),
    );
    println!(" Materials: {}", mesh.materials.len());

    export_mesh_to_obj(&name, &output, &mesh)
        .with_context(|| format!("failed to write {}", output.display()))?;

    Ok(())
}
