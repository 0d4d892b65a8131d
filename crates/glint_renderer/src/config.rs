//! Render configuration.

use crate::RenderError;
use glint_math::Vec3;
use serde::{Deserialize, Serialize};

/// Every tunable of a render. Missing fields in a config file fall back to
/// the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Camera position; the camera looks down +Z
    pub eye: [f32; 3],
    pub samples_per_pixel: u32,
    /// Worker threads, one row band each
    pub threads: u32,
    /// Deepest recursion depth that still contributes radiance
    pub max_depth: u32,
    /// Probability that a path continues past each bounce
    pub russian_roulette: f32,
    /// Exponent applied to clamped radiance before quantizing to 8 bits
    pub gamma: f32,
    /// Base seed; band `i` draws from a generator seeded with `seed + i`
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 784,
            height: 784,
            fov: 40.0,
            eye: [278.0, 273.0, -800.0],
            samples_per_pixel: 16,
            threads: 4,
            max_depth: 5,
            russian_roulette: 0.8,
            gamma: 0.6,
            seed: 0,
        }
    }
}

impl RenderConfig {
    pub fn eye(&self) -> Vec3 {
        Vec3::from_array(self.eye)
    }

    /// Reject settings the renderer cannot run with.
    pub fn validate(&self) -> Result<(), RenderError> {
        let invalid = |msg: String| Err(RenderError::InvalidConfig(msg));

        if self.width == 0 || self.height == 0 {
            return invalid(format!("image size {}x{} is empty", self.width, self.height));
        }
        if self.samples_per_pixel == 0 {
            return invalid("samples_per_pixel must be at least 1".into());
        }
        if self.threads == 0 {
            return invalid("threads must be at least 1".into());
        }
        if !(self.russian_roulette > 0.0 && self.russian_roulette <= 1.0) {
            return invalid(format!(
                "russian_roulette {} is outside (0, 1]",
                self.russian_roulette
            ));
        }
        if !(self.fov > 0.0 && self.fov < 180.0) {
            return invalid(format!("fov {} is outside (0, 180)", self.fov));
        }
        if !(self.gamma > 0.0) {
            return invalid(format!("gamma {} must be positive", self.gamma));
        }

        Ok(())
    }
}
