//! Triangles, the building block of the mesh-like scenes.
//!
//! Intersection is Möller-Trumbore on precomputed edges; area sampling uses
//! uniform barycentric coordinates.

use crate::{
    hittable::{HitRecord, Hittable, Object, SurfacePoint},
    sampling::uniform_barycentric,
    Material,
};
use glint_math::{Aabb, Interval, Ray, Vec3};
use rand::RngCore;

/// Determinants smaller than this mean the ray runs along the plane.
const PARALLEL_EPSILON: f32 = 1e-8;

pub struct Triangle<M: Material> {
    v0: Vec3,
    /// v1 - v0
    e1: Vec3,
    /// v2 - v0
    e2: Vec3,
    /// Unit face normal, `e1 x e2`
    normal: Vec3,
    area: f32,
    material: M,
    bbox: Aabb,
}

impl<M: Material> Triangle<M> {
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, material: M) -> Self {
        let e1 = v1 - v0;
        let e2 = v2 - v0;
        let cross = e1.cross(e2);

        Self {
            v0,
            e1,
            e2,
            normal: cross.normalize_or_zero(),
            area: 0.5 * cross.length(),
            material,
            bbox: Aabb::from_points(v0, v1).grow(v2).padded(),
        }
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Ray parameter of the crossing point, if the ray crosses the
    /// triangle strictly inside `ray_t`. Both faces are hit.
    fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<f32> {
        let p = ray.direction().cross(self.e2);
        let det = self.e1.dot(p);
        if det.abs() < PARALLEL_EPSILON {
            return None;
        }
        let inv_det = det.recip();

        let s = ray.origin() - self.v0;
        let u = s.dot(p) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(self.e1);
        let v = ray.direction().dot(q) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = self.e2.dot(q) * inv_det;
        ray_t.surrounds(t).then_some(t)
    }
}

impl<M: Material + 'static> Hittable for Triangle<M> {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let Some(t) = self.intersect(ray, ray_t) else {
            return false;
        };

        rec.t = t;
        rec.p = ray.at(t);
        rec.set_face_normal(ray, self.normal);
        rec.material = &self.material;
        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

impl<M: Material + 'static> Object for Triangle<M> {
    fn material(&self) -> &dyn Material {
        &self.material
    }

    fn area(&self) -> f32 {
        self.area
    }

    fn sample(&self, rng: &mut dyn RngCore) -> SurfacePoint {
        let (_, b1, b2) = uniform_barycentric(rng);
        SurfacePoint {
            p: self.v0 + self.e1 * b1 + self.e2 * b2,
            normal: self.normal,
        }
    }
}

/// Split the planar quad `corner, corner + u, corner + u + v, corner + v`
/// into two triangles sharing one material.
pub fn quad<M: Material + Clone>(corner: Vec3, u: Vec3, v: Vec3, material: M) -> [Triangle<M>; 2] {
    [
        Triangle::new(corner, corner + u, corner + u + v, material.clone()),
        Triangle::new(corner, corner + u + v, corner + v, material),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Base 2, height 2, lying in the plane z = -1.
    fn facing_triangle() -> Triangle<Lambertian> {
        Triangle::new(
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(0.0, 1.0, -1.0),
            Lambertian::new(Vec3::splat(0.5)),
        )
    }

    #[test]
    fn test_hit_front_and_back() {
        let tri = facing_triangle();
        let mut rec = HitRecord::default();

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(tri.hit(&ray, Interval::from_min(0.001), &mut rec));
        assert!((rec.t - 1.0).abs() < 1e-4);
        assert!(rec.front_face);

        let ray = Ray::new(Vec3::new(0.0, 0.0, -3.0), Vec3::Z);
        assert!(tri.hit(&ray, Interval::from_min(0.001), &mut rec));
        assert!(!rec.front_face);
        assert_eq!(rec.normal, -tri.normal());
    }

    #[test]
    fn test_misses() {
        let tri = facing_triangle();
        let mut rec = HitRecord::default();

        // Pointing away
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert!(!tri.hit(&ray, Interval::from_min(0.001), &mut rec));

        // Outside the edges
        let ray = Ray::new(Vec3::new(0.9, 0.9, 0.0), Vec3::NEG_Z);
        assert!(!tri.hit(&ray, Interval::from_min(0.001), &mut rec));

        // In the plane
        let ray = Ray::new(Vec3::new(-5.0, 0.0, -1.0), Vec3::X);
        assert!(!tri.hit(&ray, Interval::from_min(0.001), &mut rec));

        // Beyond the interval
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(!tri.hit(&ray, Interval::new(0.001, 0.5), &mut rec));
    }

    #[test]
    fn test_area_and_samples_stay_on_surface() {
        let tri = facing_triangle();
        assert!((tri.area() - 2.0).abs() < 1e-5);

        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..100 {
            let s = tri.sample(&mut rng);
            assert!((s.p.z + 1.0).abs() < 1e-5);
            assert!(s.p.y >= -1.0 - 1e-5 && s.p.y <= 1.0 + 1e-5);
            // Inside the slanted edges
            assert!(s.p.x.abs() <= (1.0 - s.p.y) * 0.5 + 1e-4);
            assert_eq!(s.normal, tri.normal());
        }
    }

    #[test]
    fn test_quad_covers_full_rectangle() {
        let [a, b] = quad(
            Vec3::ZERO,
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 3.0),
            Lambertian::new(Vec3::ONE),
        );
        assert!((a.area() + b.area() - 6.0).abs() < 1e-5);
        assert!(a.bounding_box().extent().y > 0.0);

        let mut rec = HitRecord::default();
        let down = Ray::new(Vec3::new(1.5, 1.0, 0.5), Vec3::NEG_Y);
        assert!(a.hit(&down, Interval::from_min(0.001), &mut rec));
        let down = Ray::new(Vec3::new(0.5, 1.0, 2.5), Vec3::NEG_Y);
        assert!(b.hit(&down, Interval::from_min(0.001), &mut rec));
    }
}
