use crate::{Interval, Ray, Vec3};

/// Boxes thinner than this on an axis are widened to it.
const MIN_EXTENT: f32 = 1e-4;

/// Axis-aligned bounding box stored as its two extreme corners.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Contains nothing; the identity for [`Aabb::union`].
    pub const EMPTY: Aabb = Aabb {
        min: Vec3::INFINITY,
        max: Vec3::NEG_INFINITY,
    };

    /// Smallest box holding both points, padded to a minimum thickness.
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
        .padded()
    }

    /// Widen every axis thinner than the minimum extent, so that flat
    /// geometry lying in an axis plane still has a box a ray can enter.
    pub fn padded(self) -> Self {
        let thin = (self.max - self.min).cmplt(Vec3::splat(MIN_EXTENT));
        let pad = Vec3::select(thin, Vec3::splat(MIN_EXTENT * 0.5), Vec3::ZERO);
        Self {
            min: self.min - pad,
            max: self.max + pad,
        }
    }

    #[inline]
    pub fn union(&self, other: &Aabb) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    #[inline]
    pub fn grow(&self, point: Vec3) -> Self {
        Self {
            min: self.min.min(point),
            max: self.max.max(point),
        }
    }

    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn centroid(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// 0, 1 or 2 for X, Y or Z; ties go to the later axis.
    pub fn longest_axis(&self) -> usize {
        let e = self.extent();
        if e.x > e.y && e.x > e.z {
            0
        } else if e.y > e.z {
            1
        } else {
            2
        }
    }

    /// Slab test against all three axes at once.
    ///
    /// A zero direction component yields infinite slab distances, which the
    /// min/max reductions below handle without special cases.
    #[inline]
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> bool {
        let inv_dir = ray.direction().recip();
        let t0 = (self.min - ray.origin()) * inv_dir;
        let t1 = (self.max - ray.origin()) * inv_dir;

        let t_enter = t0.min(t1).max_element().max(ray_t.min);
        let t_exit = t0.max(t1).min_element().min(ray_t.max);
        t_enter < t_exit
    }
}
