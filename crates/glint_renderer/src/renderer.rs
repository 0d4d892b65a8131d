//! Render driver.
//!
//! Splits the image into row bands, renders them in parallel on a
//! dedicated thread pool and stitches the results together after every
//! band has finished.

use crate::band::{partition_rows, render_band, Progress};
use crate::output::tone_map;
use crate::{Camera, Color, Integrator, RenderConfig, RenderStats, Scene};
use rayon::prelude::*;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Errors that can occur while rendering or writing an image.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid render configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to start render threads: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Encode(#[from] image::ImageError),
}

/// Linear radiance framebuffer, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let i = self.index(x, y);
        self.pixels[i] = color;
    }

    /// Tone-mapped RGB bytes, 3 per pixel.
    pub fn to_rgb8(&self, gamma: f32) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|&color| tone_map(color, gamma))
            .collect()
    }
}

/// A finished render.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    pub image: ImageBuffer,
    pub stats: RenderStats,
    pub elapsed: Duration,
}

/// Render `scene` with `config`.
///
/// One band per thread; each band writes only to its own buffer, and the
/// buffers are copied into the framebuffer in band order once all of them
/// are done. Rows past `threads * (height / threads)` stay black.
pub fn render(scene: &Scene, config: &RenderConfig) -> Result<RenderOutput, RenderError> {
    config.validate()?;

    let start = Instant::now();
    let camera = Camera::new(config);
    let integrator = Integrator::new(scene, config);
    let bands = partition_rows(config.width, config.height, config.threads);

    let rendered_rows: u32 = bands.iter().map(|b| b.height).sum();
    if rendered_rows < config.height {
        log::warn!(
            "{} rows do not divide evenly into {} bands; rows {}..{} are left black",
            config.height,
            config.threads,
            rendered_rows,
            config.height
        );
    }

    log::info!(
        "Rendering {}x{} @ {} spp on {} threads (max depth {}, RR {})",
        config.width,
        config.height,
        config.samples_per_pixel,
        config.threads,
        config.max_depth,
        config.russian_roulette
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads as usize)
        .thread_name(|i| format!("glint-band-{}", i))
        .build()?;

    let progress = Progress::new(rendered_rows);
    let results: Vec<_> = pool.install(|| {
        bands
            .par_iter()
            .map(|band| render_band(band, &integrator, &camera, config, &progress))
            .collect()
    });

    // Every band has joined; stitch in band order
    let mut image = ImageBuffer::new(config.width, config.height);
    let mut stats = RenderStats::default();
    for result in &results {
        let offset = result.band.offset();
        image.pixels[offset..offset + result.pixels.len()].copy_from_slice(&result.pixels);
        stats.merge(&result.stats);
    }

    let elapsed = start.elapsed();
    log::info!("Rendered in {:.2?}: {}", elapsed, stats);

    Ok(RenderOutput {
        image,
        stats,
        elapsed,
    })
}
