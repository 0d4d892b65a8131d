//! Row-band tile rendering.
//!
//! The image is cut into equal horizontal bands, one per worker thread.
//! Each band renders into its own buffer with its own random generator,
//! so no pixel is ever written by more than one thread.

use crate::{Camera, Color, Integrator, RenderConfig, RenderStats};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicU32, Ordering};

/// A contiguous run of full image rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    /// Index of this band in top-to-bottom order
    pub index: usize,
    /// First row of the band
    pub y: u32,
    pub height: u32,
    pub width: u32,
}

impl Band {
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Offset of the band's first pixel in the full framebuffer.
    pub fn offset(&self) -> usize {
        self.y as usize * self.width as usize
    }
}

/// Split `height` rows into `threads` bands of `height / threads` rows.
///
/// Rows left over by the integer division are not assigned to any band;
/// `threads * (height / threads)` rows are rendered in total.
pub fn partition_rows(width: u32, height: u32, threads: u32) -> Vec<Band> {
    if threads == 0 {
        return Vec::new();
    }
    let step = height / threads;

    (0..threads)
        .map(|i| Band {
            index: i as usize,
            y: i * step,
            height: step,
            width,
        })
        .collect()
}

/// Pixels and counters produced by one band.
#[derive(Debug, Clone)]
pub struct BandResult {
    pub band: Band,
    /// Pixel colors in row-major order
    pub pixels: Vec<Color>,
    pub stats: RenderStats,
}

/// Rows-finished counter shared by all bands, logging every 10%.
#[derive(Debug)]
pub struct Progress {
    total_rows: u32,
    done: AtomicU32,
}

impl Progress {
    pub fn new(total_rows: u32) -> Self {
        Self {
            total_rows,
            done: AtomicU32::new(0),
        }
    }

    pub fn row_finished(&self) {
        let done = self.done.fetch_add(1, Ordering::Relaxed) + 1;
        if self.total_rows == 0 {
            return;
        }

        let before = (done - 1) * 10 / self.total_rows;
        let after = done * 10 / self.total_rows;
        if after > before {
            log::info!("Rendered {}%", after * 10);
        }
    }

    pub fn rows_done(&self) -> u32 {
        self.done.load(Ordering::Relaxed)
    }
}

/// Render every pixel of `band`, averaging `samples_per_pixel` estimates.
///
/// The band's generator is seeded with `config.seed + band.index`, so the
/// output depends only on the config, never on thread scheduling.
pub fn render_band(
    band: &Band,
    integrator: &Integrator<'_>,
    camera: &Camera,
    config: &RenderConfig,
    progress: &Progress,
) -> BandResult {
    let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(band.index as u64));
    let mut stats = RenderStats::default();
    let mut pixels = vec![Color::ZERO; band.pixel_count()];
    let spp = config.samples_per_pixel;

    for local_y in 0..band.height {
        let j = band.y + local_y;
        for i in 0..band.width {
            let ray = camera.ray(i, j);
            let pixel = &mut pixels[local_y as usize * band.width as usize + i as usize];

            for _ in 0..spp {
                stats.camera_rays += 1;
                *pixel += integrator.cast_ray(&ray, 0, &mut rng, &mut stats) / spp as f32;
            }
        }
        progress.row_finished();
    }

    log::debug!(
        "Band {} (rows {}..{}) done: {}",
        band.index,
        band.y,
        band.y + band.height,
        stats
    );

    BandResult {
        band: *band,
        pixels,
        stats,
    }
}
