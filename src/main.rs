use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use iconforge::png::{read_chunks, Header};
use iconforge::rendering::layout::default_icon;
use iconforge::{IconConfig, Scene};

#[derive(Parser)]
#[command(name = "iconforge", version, about = "Generate PNG icons from layered scenes")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render one PNG per requested size
    Generate(GenerateArgs),
    /// Print the chunk structure of a PNG file
    Inspect {
        file: PathBuf,
    },
}

#[derive(Args)]
struct GenerateArgs {
    /// Comma-separated edge lengths, e.g. 16,32,256
    #[arg(long, value_delimiter = ',')]
    sizes: Option<Vec<u32>>,
    /// Output directory (created if missing)
    #[arg(long, default_value = "icons")]
    out: PathBuf,
    /// Scene description (JSON); rescaled to each size. Corner radii larger
    /// than half a layer's shorter side are clamped with a warning
    #[arg(long)]
    scene: Option<PathBuf>,
    /// Batch configuration (JSON); flags take precedence
    #[arg(long)]
    config: Option<PathBuf>,
    /// zlib level 0-10
    #[arg(long)]
    level: Option<u8>,
    /// File name prefix
    #[arg(long)]
    prefix: Option<String>,
    /// Also write manifest.json with sizes and digests
    #[arg(long)]
    manifest: bool,
}

#[derive(Serialize)]
struct ManifestEntry {
    file: String,
    size: u32,
    bytes: usize,
    sha256: String,
}

fn generate(args: GenerateArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => IconConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => IconConfig::default(),
    };
    if let Some(sizes) = args.sizes {
        config.sizes = sizes;
    }
    if let Some(level) = args.level {
        config.compression_level = level;
    }
    if let Some(prefix) = args.prefix {
        config.file_prefix = prefix;
    }
    config.validate()?;

    let scene = match &args.scene {
        Some(path) => {
            let (scene, clamped) = Scene::load_reporting(path)
                .with_context(|| format!("loading scene {}", path.display()))?;
            for i in clamped {
                eprintln!("warning: layer {}: corner radius clamped", i);
            }
            Some(scene)
        }
        None => None,
    };

    fs::create_dir_all(&args.out)
        .with_context(|| format!("creating {}", args.out.display()))?;

    let scene = scene.as_ref();
    let scene_for_size = move |size| match scene {
        Some(s) => s.scaled_to(size),
        None => default_icon(size),
    };
    let mut manifest = Vec::new();
    let mut failed = Vec::new();
    // A failed size writes nothing; the remaining sizes still render
    for (size, res) in iconforge::render_each(&config, scene_for_size)? {
        let artifact = match res {
            Ok(a) => a,
            Err(e) => {
                eprintln!("iconforge: {}x{}: {}", size, size, e);
                failed.push(size);
                continue;
            }
        };

        let name = config.file_name(size);
        let path = args.out.join(&name);
        if let Err(e) = artifact.save(&path) {
            eprintln!("iconforge: writing {}: {}", path.display(), e);
            failed.push(size);
            continue;
        }
        println!("{} ({} bytes)", path.display(), artifact.png_data.len());

        manifest.push(ManifestEntry {
            file: name,
            size,
            bytes: artifact.png_data.len(),
            sha256: artifact.digest(),
        });
    }

    if args.manifest {
        let path = args.out.join("manifest.json");
        fs::write(&path, serde_json::to_string_pretty(&manifest)?)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("{}", path.display());
    }
    if !failed.is_empty() {
        bail!("failed to produce sizes {:?}", failed);
    }
    Ok(())
}

fn inspect(file: &Path) -> anyhow::Result<()> {
    let bytes = fs::read(file).with_context(|| format!("reading {}", file.display()))?;
    let chunks = read_chunks(&bytes)?;
    for chunk in &chunks {
        let class = if chunk.kind.is_critical() { "critical" } else { "ancillary" };
        println!("{} len={} crc={:08x} {}", chunk.kind, chunk.data.len(), chunk.crc(), class);
    }
    // read_chunks guarantees IHDR comes first
    let h = Header::parse(&chunks[0].data)?;
    println!(
        "{}x{} depth={} color_type={} compression={} filter={} interlace={}",
        h.width, h.height, h.bit_depth, h.color_type, h.compression, h.filter, h.interlace
    );
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let res = match cli.command {
        Command::Generate(args) => generate(args),
        Command::Inspect { file } => inspect(&file),
    };
    if let Err(e) = res {
        eprintln!("iconforge: {:#}", e);
        std::process::exit(1);
    }
}
