//! Sphere primitive.

use crate::{
    hittable::{HitRecord, Hittable, Object, SurfacePoint},
    sampling::uniform_sphere,
    Material,
};
use glint_math::{Aabb, Interval, Ray, Vec3};
use rand::RngCore;
use std::f32::consts::PI;

/// Sphere of `radius` around `center`.
pub struct Sphere<M: Material> {
    center: Vec3,
    radius: f32,
    material: M,
    bbox: Aabb,
}

impl<M: Material> Sphere<M> {
    /// Negative radii are clamped to zero.
    pub fn new(center: Vec3, radius: f32, material: M) -> Self {
        let radius = radius.max(0.0);
        let half = Vec3::splat(radius);

        Self {
            center,
            radius,
            material,
            bbox: Aabb::from_points(center - half, center + half),
        }
    }

    /// Nearest root of `|o + t d - c|^2 = r^2` strictly inside `ray_t`.
    /// Ray directions are unit length, so the quadratic's leading term is 1.
    fn nearest_root(&self, ray: &Ray, ray_t: Interval) -> Option<f32> {
        let to_center = self.center - ray.origin();
        let half_b = ray.direction().dot(to_center);
        let c = to_center.length_squared() - self.radius * self.radius;

        let discriminant = half_b * half_b - c;
        if discriminant < 0.0 {
            return None;
        }
        let sqrt_d = discriminant.sqrt();

        [half_b - sqrt_d, half_b + sqrt_d]
            .into_iter()
            .find(|&t| ray_t.surrounds(t))
    }
}

impl<M: Material + 'static> Hittable for Sphere<M> {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let Some(t) = self.nearest_root(ray, ray_t) else {
            return false;
        };

        rec.t = t;
        rec.p = ray.at(t);
        rec.set_face_normal(ray, (rec.p - self.center) / self.radius);
        rec.material = &self.material;
        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

impl<M: Material + 'static> Object for Sphere<M> {
    fn material(&self) -> &dyn Material {
        &self.material
    }

    fn area(&self) -> f32 {
        4.0 * PI * self.radius * self.radius
    }

    fn sample(&self, rng: &mut dyn RngCore) -> SurfacePoint {
        let dir = uniform_sphere(rng);
        SurfacePoint {
            p: self.center + dir * self.radius,
            normal: dir,
        }
    }

    /// A straight chord between two sphere points cuts through the interior,
    /// so spheres collapse the chord to a single sampled point.
    fn sample_chord(&self, rng: &mut dyn RngCore) -> (SurfacePoint, SurfacePoint) {
        let point = self.sample(rng);
        (point, point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grey_sphere() -> Sphere<Lambertian> {
        Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, Lambertian::new(Vec3::splat(0.5)))
    }

    #[test]
    fn test_hit_from_outside() {
        let sphere = grey_sphere();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let mut rec = HitRecord::default();

        assert!(sphere.hit(&ray, Interval::from_min(0.001), &mut rec));
        assert!((rec.t - 0.5).abs() < 1e-4);
        assert!(rec.front_face);
        assert!((rec.normal - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_hit_from_inside_takes_far_root() {
        let sphere = grey_sphere();
        let ray = Ray::new(Vec3::new(0.0, 0.0, -1.0), Vec3::Y);
        let mut rec = HitRecord::default();

        assert!(sphere.hit(&ray, Interval::from_min(0.001), &mut rec));
        assert!((rec.t - 0.5).abs() < 1e-4);
        assert!(!rec.front_face);
        assert!((rec.normal + Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn test_miss() {
        let sphere = grey_sphere();
        let mut rec = HitRecord::default();

        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        assert!(!sphere.hit(&ray, Interval::from_min(0.001), &mut rec));

        // Sphere entirely behind the origin
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert!(!sphere.hit(&ray, Interval::from_min(0.001), &mut rec));
    }

    #[test]
    fn test_samples_lie_on_surface() {
        let sphere = grey_sphere();
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..100 {
            let s = sphere.sample(&mut rng);
            assert!(((s.p - Vec3::new(0.0, 0.0, -1.0)).length() - 0.5).abs() < 1e-4);
            assert!((s.normal.length() - 1.0).abs() < 1e-4);
        }

        let (a, b) = sphere.sample_chord(&mut rng);
        assert_eq!(a, b);
        assert!((sphere.area() - PI).abs() < 1e-5);
    }
}
