//! Hittable and Object traits for ray-object intersection and light sampling.

use crate::{Color, Material};
use glint_math::{Aabb, Interval, Ray, Vec3};
use rand::RngCore;

/// Placeholder material for `HitRecord::default()`. Black and non-scattering.
struct DummyMaterial;

impl Material for DummyMaterial {
    fn eval(&self, _wo: Vec3, _wi: Vec3, _n: Vec3) -> Color {
        Color::ZERO
    }

    fn sample(&self, _wo: Vec3, n: Vec3, _rng: &mut dyn RngCore) -> Vec3 {
        n
    }

    fn pdf(&self, _wo: Vec3, _wi: Vec3, _n: Vec3) -> f32 {
        0.0
    }
}

static NO_MATERIAL: DummyMaterial = DummyMaterial;

/// Nearest intersection found so far by a query.
#[derive(Clone)]
pub struct HitRecord<'a> {
    pub p: Vec3,
    /// Unit normal facing back toward the ray origin
    pub normal: Vec3,
    pub material: &'a dyn Material,
    /// Ray parameter of `p`
    pub t: f32,
    /// The ray arrived against the outward normal
    pub front_face: bool,
}

impl Default for HitRecord<'_> {
    fn default() -> Self {
        Self {
            p: Vec3::ZERO,
            normal: Vec3::ZERO,
            material: &NO_MATERIAL,
            t: f32::INFINITY,
            front_face: false,
        }
    }
}

impl HitRecord<'_> {
    /// Orient the stored normal against `ray`, remembering which side was hit.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        let facing = ray.direction().dot(outward_normal) < 0.0;
        self.front_face = facing;
        self.normal = if facing { outward_normal } else { -outward_normal };
    }
}

/// Geometry that answers nearest-hit queries.
pub trait Hittable: Send + Sync {
    /// On a hit with parameter strictly inside `ray_t`, overwrite `rec`
    /// and return true; leave `rec` untouched otherwise.
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool;

    fn bounding_box(&self) -> Aabb;
}

/// A point on a surface with its geometric (outward) normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfacePoint {
    pub p: Vec3,
    pub normal: Vec3,
}

/// A scene primitive: geometry plus the material it carries.
///
/// Besides intersection, primitives answer the queries light sampling
/// needs: surface area and uniform points on the surface.
pub trait Object: Hittable {
    fn material(&self) -> &dyn Material;

    fn area(&self) -> f32;

    /// Uniformly distributed point on the surface (area pdf = 1 / area).
    fn sample(&self, rng: &mut dyn RngCore) -> SurfacePoint;

    /// Two surface points spanning a chord of the primitive.
    ///
    /// The default draws two independent uniform points, which for a planar
    /// convex primitive gives a segment lying on the surface. Curved
    /// primitives should return a degenerate chord instead.
    fn sample_chord(&self, rng: &mut dyn RngCore) -> (SurfacePoint, SurfacePoint) {
        let start = self.sample(rng);
        let end = self.sample(rng);
        (start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_face_normal() {
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), -Vec3::Y);
        let mut rec = HitRecord::default();

        rec.set_face_normal(&ray, Vec3::Y);
        assert!(rec.front_face);
        assert_eq!(rec.normal, Vec3::Y);

        rec.set_face_normal(&ray, -Vec3::Y);
        assert!(!rec.front_face);
        assert_eq!(rec.normal, Vec3::Y);
    }

    #[test]
    fn test_default_record_is_black() {
        let rec = HitRecord::default();
        assert!(!rec.material.has_emission());
        assert_eq!(rec.material.emission(), Color::ZERO);
    }
}
