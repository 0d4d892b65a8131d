//! Pinhole camera generating primary rays.

use crate::RenderConfig;
use glint_math::{Ray, Vec3};

/// Pinhole camera at `eye` looking down +Z.
///
/// Screen-space x is mirrored (`-x` in the ray direction) so that a scene
/// modelled in a right-handed frame with +X to the left of the viewer is
/// not flipped in the image.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    eye: Vec3,
    width: u32,
    height: u32,
    /// tan(fov / 2)
    scale: f32,
    aspect: f32,
}

impl Camera {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            eye: config.eye(),
            width: config.width,
            height: config.height,
            scale: (config.fov * 0.5).to_radians().tan(),
            aspect: config.width as f32 / config.height as f32,
        }
    }

    /// Primary ray through the center of pixel `(i, j)`.
    pub fn ray(&self, i: u32, j: u32) -> Ray {
        let x = (2.0 * (i as f32 + 0.5) / self.width as f32 - 1.0) * self.aspect * self.scale;
        let y = (1.0 - 2.0 * (j as f32 + 0.5) / self.height as f32) * self.scale;

        Ray::new(self.eye, Vec3::new(-x, y, 1.0))
    }
}
