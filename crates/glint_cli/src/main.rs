//! `glint` - render the Cornell box with the Glint path tracer.

mod cornell;

use anyhow::{Context, Result};
use clap::Parser;
use glint_renderer::{render, save_image, RenderConfig};
use std::fs;
use std::path::PathBuf;

/// Monte Carlo path tracer for the Cornell box.
#[derive(Parser, Debug)]
#[command(name = "glint", version, about)]
struct Cli {
    /// JSON render config; flags below override its fields
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output image (.ppm or .png)
    #[arg(short, long, default_value = "binary.ppm")]
    output: PathBuf,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    /// Samples per pixel
    #[arg(long)]
    spp: Option<u32>,

    /// Worker threads, one row band each
    #[arg(short = 'j', long)]
    threads: Option<u32>,

    #[arg(long)]
    max_depth: Option<u32>,

    /// Path continuation probability
    #[arg(long)]
    russian_roulette: Option<f32>,

    #[arg(long)]
    gamma: Option<f32>,

    #[arg(long)]
    seed: Option<u64>,

    /// Vertical field of view in degrees
    #[arg(long)]
    fov: Option<f32>,
}

impl Cli {
    /// Config file (or defaults) with command-line overrides applied.
    fn render_config(&self) -> Result<RenderConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("Failed to parse config {}", path.display()))?
            }
            None => RenderConfig::default(),
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(spp) = self.spp {
            config.samples_per_pixel = spp;
        }
        if let Some(threads) = self.threads {
            config.threads = threads;
        }
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }
        if let Some(rr) = self.russian_roulette {
            config.russian_roulette = rr;
        }
        if let Some(gamma) = self.gamma {
            config.gamma = gamma;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(fov) = self.fov {
            config.fov = fov;
        }

        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let config = cli.render_config()?;

    let scene = cornell::scene().context("Failed to build the Cornell box")?;
    log::info!("Scene: {} objects", scene.objects().len());

    let output = render(&scene, &config).context("Render failed")?;

    save_image(&output.image, &cli.output, config.gamma)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;

    log::info!(
        "Done in {:.2?} ({} rays)",
        output.elapsed,
        output.stats.total_rays()
    );
    Ok(())
}
