use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use image_quantizer_wasm::{QuantizeConfig, extract_palette_bytes, quantize_bytes};
use std::fs;
use std::path::PathBuf;

/// Reduce images to a fixed color palette (native wrapper).
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// One or more input image paths
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Number of palette colors
    #[arg(short = 'k', long, default_value_t = 64)]
    num_colors: usize,

    /// Seed for pixel sampling and centroid initialization
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Print the fitted palette as JSON instead of writing images
    #[arg(long)]
    palette_only: bool,

    /// Output directory
    #[arg(short = 'd', long)]
    out_dir: Option<PathBuf>,

    /// Output filename prefix (ignored when --out-dir supplied)
    #[arg(short = 'p', long, default_value = "quantized_")]
    prefix: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = QuantizeConfig::new()
        .num_colors(args.num_colors)
        .random_seed(args.seed);

    for input in &args.inputs {
        let bytes = fs::read(input)?;

        if args.palette_only {
            let palette = extract_palette_bytes(&bytes, &config)
                .with_context(|| format!("palette extraction failed for {}", input.display()))?;
            println!("{}", serde_json::to_string(&palette)?);
            continue;
        }

        let (png, _palette) = quantize_bytes(&bytes, &config)
            .with_context(|| format!("quantization failed for {}", input.display()))?;

        let out_path = if let Some(dir) = &args.out_dir {
            let stem = input.file_stem().unwrap_or_default().to_string_lossy();
            dir.join(format!("{stem}.png"))
        } else {
            let stem = input.file_name().unwrap().to_string_lossy();
            PathBuf::from(format!("{}{}", args.prefix, stem))
        };

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&out_path, png)?;
        println!("Saved → {}", out_path.display());
    }

    Ok(())
}
