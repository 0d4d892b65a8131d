//! Radiance estimator.
//!
//! Each call to [`Integrator::cast_ray`] returns an unbiased estimate of the
//! radiance arriving along a ray:
//! - emitters hit directly return their emission and stop the path
//! - diffuse hits add a direct term from one sampled light segment and an
//!   indirect term from one BRDF-sampled bounce
//! - bounces continue with the Russian-roulette probability and are
//!   reweighted by its inverse

use crate::{gen_f32, Color, HitRecord, LightSegment, RenderConfig, RenderStats, Scene};
use glint_math::{Ray, Vec3};
use rand::RngCore;

/// Shadow rays cast per light segment to estimate its visibility.
pub const SHADOW_RAY_COUNT: u32 = 20;

/// Shadow rays start this far along their direction, off the shading surface.
const SHADOW_RAY_OFFSET: f32 = 0.01;

/// A shadow ray reaches its target when the nearest hit lies this close to it.
const VISIBILITY_TOLERANCE: f32 = 1e-3;

/// BRDF densities and squared light distances below this contribute nothing.
const PDF_EPSILON: f32 = 1e-8;

/// Path tracer over a read-only scene.
///
/// Holds no mutable state; each worker thread brings its own generator
/// and stats.
#[derive(Clone, Copy)]
pub struct Integrator<'a> {
    scene: &'a Scene,
    max_depth: u32,
    russian_roulette: f32,
}

impl<'a> Integrator<'a> {
    pub fn new(scene: &'a Scene, config: &RenderConfig) -> Self {
        Self {
            scene,
            max_depth: config.max_depth,
            russian_roulette: config.russian_roulette,
        }
    }

    /// Estimate the radiance arriving along `ray` at recursion `depth`.
    ///
    /// Camera rays start at depth 0; every bounce passes `depth + 1`.
    /// Anything past `max_depth` is black, which bounds the recursion
    /// whatever the roulette draws.
    pub fn cast_ray(
        &self,
        ray: &Ray,
        depth: u32,
        rng: &mut dyn RngCore,
        stats: &mut RenderStats,
    ) -> Color {
        if depth > self.max_depth {
            return Color::ZERO;
        }
        stats.record_depth(depth);

        let Some(rec) = self.scene.intersect(ray) else {
            return Color::ZERO;
        };

        if rec.material.has_emission() {
            return rec.material.emission();
        }

        let wo = -ray.direction();
        let direct = self.direct_lighting(&rec, wo, rng, stats);
        let indirect = self.indirect_lighting(&rec, wo, depth, rng, stats);

        direct + indirect
    }

    /// Light arriving straight from an emitter, through one sampled segment.
    fn direct_lighting(
        &self,
        rec: &HitRecord<'_>,
        wo: Vec3,
        rng: &mut dyn RngCore,
        stats: &mut RenderStats,
    ) -> Color {
        let segment = self.scene.lights().sample_segment(rng);
        // Scales with 1 / emissive area, so only a zero or broken density is rejected
        if !(segment.pdf > 0.0 && segment.pdf.is_finite()) {
            return Color::ZERO;
        }

        let light_point = segment.midpoint();
        let to_light = light_point - rec.p;
        let dist_sq = to_light.length_squared();
        if dist_sq <= PDF_EPSILON {
            return Color::ZERO;
        }
        let ws = to_light / dist_sq.sqrt();

        let cos_surface = ws.dot(rec.normal);
        if cos_surface <= 0.0 {
            return Color::ZERO;
        }
        // Emitters are two-sided
        let cos_light = (-ws).dot(segment.normal).abs();

        let ratio = self.visibility_ratio(rec.p, &segment, rng, stats);
        if ratio == 0.0 {
            return Color::ZERO;
        }

        let brdf = rec.material.eval(wo, ws, rec.normal);
        let geometry = cos_surface * cos_light / dist_sq;

        segment.emission * brdf * (geometry / segment.pdf * segment.extent() * ratio)
    }

    /// Fraction of [`SHADOW_RAY_COUNT`] shadow rays from `p` that reach
    /// uniformly drawn points along `segment` without being blocked.
    ///
    /// Approximates partial occlusion of the light instead of a binary
    /// visibility test on a single point.
    pub fn visibility_ratio(
        &self,
        p: Vec3,
        segment: &LightSegment,
        rng: &mut dyn RngCore,
        stats: &mut RenderStats,
    ) -> f32 {
        let mut passed = 0;

        for _ in 0..SHADOW_RAY_COUNT {
            let target = segment.point_at(gen_f32(rng));
            let dir = (target - p).normalize_or_zero();
            if dir == Vec3::ZERO {
                continue;
            }

            stats.shadow_rays += 1;
            let shadow_ray = Ray::new(p + dir * SHADOW_RAY_OFFSET, dir);
            let reached = self
                .scene
                .intersect(&shadow_ray)
                .is_some_and(|hit| (hit.p - target).length() < VISIBILITY_TOLERANCE);

            if reached {
                passed += 1;
            }
        }

        passed as f32 / SHADOW_RAY_COUNT as f32
    }

    /// Light arriving after at least one more diffuse bounce.
    fn indirect_lighting(
        &self,
        rec: &HitRecord<'_>,
        wo: Vec3,
        depth: u32,
        rng: &mut dyn RngCore,
        stats: &mut RenderStats,
    ) -> Color {
        if gen_f32(rng) >= self.russian_roulette {
            return Color::ZERO;
        }

        let n = rec.normal;
        let wi = rec.material.sample(wo, n, rng);
        let pdf = rec.material.pdf(wo, wi, n);
        let cos_theta = wi.dot(n);
        if pdf <= PDF_EPSILON || cos_theta <= 0.0 {
            return Color::ZERO;
        }

        stats.indirect_rays += 1;
        let bounce = Ray::new(rec.p, wi);

        // Emitters reached by a bounce were already counted by the direct term
        match self.scene.intersect(&bounce) {
            Some(hit) if !hit.material.has_emission() => {}
            _ => return Color::ZERO,
        }

        let li = self.cast_ray(&bounce, depth + 1, rng, stats);
        let brdf = rec.material.eval(wo, wi, n);

        li * brdf * (cos_theta / (pdf * self.russian_roulette))
    }
}
