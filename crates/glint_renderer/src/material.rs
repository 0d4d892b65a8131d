//! Material trait for surface emission and BRDF sampling.

use crate::sampling::uniform_hemisphere;
use glint_math::Vec3;
use rand::RngCore;
use std::f32::consts::{FRAC_1_PI, PI};

/// Color type alias (linear RGB radiance, non-negative)
pub type Color = Vec3;

/// Surface behaviour seen by the integrator.
///
/// Direction arguments follow one convention throughout: `wo` points from
/// the surface back along the arriving ray, `wi` points from the surface
/// toward the light (or the next bounce), and `n` is the shading normal on
/// the side the ray arrived from. All three are unit length.
pub trait Material: Send + Sync {
    /// Whether this surface emits light.
    fn has_emission(&self) -> bool {
        false
    }

    /// Emitted radiance. Black for non-emitters.
    fn emission(&self) -> Color {
        Color::ZERO
    }

    /// BRDF value f(wo, wi).
    fn eval(&self, wo: Vec3, wi: Vec3, n: Vec3) -> Color;

    /// Importance-sample an incoming direction `wi`.
    fn sample(&self, wo: Vec3, n: Vec3, rng: &mut dyn RngCore) -> Vec3;

    /// Solid-angle density of [`Material::sample`] producing `wi`.
    fn pdf(&self, wo: Vec3, wi: Vec3, n: Vec3) -> f32;
}

/// Lambertian (diffuse) material.
#[derive(Debug, Clone)]
pub struct Lambertian {
    albedo: Color,
}

impl Lambertian {
    /// Create a new Lambertian material with the given albedo color.
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }
}

impl Material for Lambertian {
    fn eval(&self, _wo: Vec3, wi: Vec3, n: Vec3) -> Color {
        if wi.dot(n) > 0.0 {
            self.albedo * FRAC_1_PI
        } else {
            Color::ZERO
        }
    }

    fn sample(&self, _wo: Vec3, n: Vec3, rng: &mut dyn RngCore) -> Vec3 {
        uniform_hemisphere(n, rng)
    }

    fn pdf(&self, _wo: Vec3, wi: Vec3, n: Vec3) -> f32 {
        if wi.dot(n) > 0.0 {
            0.5 / PI
        } else {
            0.0
        }
    }
}

/// Diffuse light emitter. Emits on both faces and reflects nothing.
#[derive(Debug, Clone)]
pub struct DiffuseLight {
    emit: Color,
}

impl DiffuseLight {
    /// Create a new diffuse light with the given emission color.
    pub fn new(emit: Color) -> Self {
        Self { emit }
    }
}

impl Material for DiffuseLight {
    fn has_emission(&self) -> bool {
        self.emit.max_element() > 0.0
    }

    fn emission(&self) -> Color {
        self.emit
    }

    fn eval(&self, _wo: Vec3, _wi: Vec3, _n: Vec3) -> Color {
        Color::ZERO
    }

    fn sample(&self, _wo: Vec3, n: Vec3, rng: &mut dyn RngCore) -> Vec3 {
        uniform_hemisphere(n, rng)
    }

    fn pdf(&self, _wo: Vec3, _wi: Vec3, _n: Vec3) -> f32 {
        0.0
    }
}
