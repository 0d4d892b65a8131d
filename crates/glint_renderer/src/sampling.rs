//! Random sampling helpers shared by materials and primitives.

use glint_math::Vec3;
use rand::{Rng, RngCore};
use std::f32::consts::PI;

/// Uniform float in `[0, 1)`.
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Uniform direction on the hemisphere around `n` (pdf = 1 / 2π).
pub(crate) fn uniform_hemisphere(n: Vec3, rng: &mut dyn RngCore) -> Vec3 {
    let z = gen_f32(rng);
    let r = (1.0 - z * z).max(0.0).sqrt();
    let phi = 2.0 * PI * gen_f32(rng);

    let (tangent, bitangent) = n.any_orthonormal_pair();
    (tangent * (r * phi.cos()) + bitangent * (r * phi.sin()) + n * z).normalize()
}

/// Uniform direction on the unit sphere.
pub(crate) fn uniform_sphere(rng: &mut dyn RngCore) -> Vec3 {
    let z = 1.0 - 2.0 * gen_f32(rng);
    let r = (1.0 - z * z).max(0.0).sqrt();
    let phi = 2.0 * PI * gen_f32(rng);
    Vec3::new(r * phi.cos(), r * phi.sin(), z)
}

/// Uniform barycentric weights `(w0, w1, w2)` over a triangle.
pub(crate) fn uniform_barycentric(rng: &mut dyn RngCore) -> (f32, f32, f32) {
    let su = gen_f32(rng).sqrt();
    let v = gen_f32(rng);
    (1.0 - su, su * (1.0 - v), su * v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_hemisphere_stays_above_normal() {
        let mut rng = StdRng::seed_from_u64(7);
        let n = Vec3::new(0.0, -1.0, 1.0).normalize();

        for _ in 0..1000 {
            let d = uniform_hemisphere(n, &mut rng);
            assert!(d.dot(n) >= 0.0);
            assert!((d.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_hemisphere_mean_cosine() {
        // E[cos θ] = 1/2 for a uniform hemisphere
        let mut rng = StdRng::seed_from_u64(11);
        let n = Vec3::Y;
        let count = 20_000;
        let mean: f32 = (0..count)
            .map(|_| uniform_hemisphere(n, &mut rng).dot(n))
            .sum::<f32>()
            / count as f32;

        assert!((mean - 0.5).abs() < 0.02, "mean cosine {}", mean);
    }

    #[test]
    fn test_barycentric_weights_sum_to_one() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let (a, b, c) = uniform_barycentric(&mut rng);
            assert!(a >= 0.0 && b >= 0.0 && c >= 0.0);
            assert!((a + b + c - 1.0).abs() < 1e-5);
        }
    }
}
