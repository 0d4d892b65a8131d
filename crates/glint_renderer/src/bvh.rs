//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! Binary tree over the scene objects answering nearest-hit queries.
//! Built once when the scene is constructed and read-only afterwards.

use crate::{HitRecord, Hittable, Object};
use glint_math::{Aabb, Interval, Ray, Vec3};
use std::sync::Arc;

/// Nodes holding this many objects or fewer become leaves.
const LEAF_MAX_SIZE: usize = 4;

/// Binary tree of bounding boxes over the scene objects.
pub enum BvhNode {
    Branch {
        left: Box<BvhNode>,
        right: Box<BvhNode>,
        bbox: Aabb,
    },
    Leaf {
        objects: Vec<Arc<dyn Object>>,
        bbox: Aabb,
    },
    Empty,
}

impl BvhNode {
    pub fn new(objects: Vec<Arc<dyn Object>>) -> Self {
        let items: Vec<_> = objects
            .into_iter()
            .map(|object| {
                let bbox = object.bounding_box();
                (bbox.centroid(), bbox, object)
            })
            .collect();

        if items.is_empty() {
            BvhNode::Empty
        } else {
            Self::build(items)
        }
    }

    /// Object median split on the axis where the centroids spread widest.
    fn build(mut items: Vec<(Vec3, Aabb, Arc<dyn Object>)>) -> Self {
        let bbox = items
            .iter()
            .fold(Aabb::EMPTY, |acc, (_, b, _)| acc.union(b));

        if items.len() <= LEAF_MAX_SIZE {
            let objects = items.into_iter().map(|(_, _, object)| object).collect();
            return BvhNode::Leaf { objects, bbox };
        }

        let axis = items
            .iter()
            .fold(Aabb::EMPTY, |acc, (c, _, _)| acc.grow(*c))
            .longest_axis();

        let mid = items.len() / 2;
        items.select_nth_unstable_by(mid, |a, b| a.0[axis].total_cmp(&b.0[axis]));
        let upper = items.split_off(mid);

        BvhNode::Branch {
            left: Box::new(Self::build(items)),
            right: Box::new(Self::build(upper)),
            bbox,
        }
    }

    /// Depth of the tree (a single leaf has depth 1).
    pub fn depth(&self) -> usize {
        match self {
            BvhNode::Empty => 0,
            BvhNode::Leaf { .. } => 1,
            BvhNode::Branch { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

impl Hittable for BvhNode {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        match self {
            BvhNode::Empty => false,
            BvhNode::Leaf { objects, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return false;
                }

                let mut closest = ray_t;
                let mut hit_any = false;
                for object in objects {
                    if object.hit(ray, closest, rec) {
                        hit_any = true;
                        closest = closest.clamp_max(rec.t);
                    }
                }
                hit_any
            }
            BvhNode::Branch { left, right, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return false;
                }

                let hit_left = left.hit(ray, ray_t, rec);
                let right_t = if hit_left { ray_t.clamp_max(rec.t) } else { ray_t };
                let hit_right = right.hit(ray, right_t, rec);
                hit_left || hit_right
            }
        }
    }

    fn bounding_box(&self) -> Aabb {
        match self {
            BvhNode::Empty => Aabb::EMPTY,
            BvhNode::Leaf { bbox, .. } | BvhNode::Branch { bbox, .. } => *bbox,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Lambertian, Sphere};

    fn sphere_row(count: usize) -> Vec<Arc<dyn Object>> {
        (0..count)
            .map(|i| {
                Arc::new(Sphere::new(
                    Vec3::new(i as f32, 0.0, -5.0),
                    0.4,
                    Lambertian::new(Color::splat(0.5)),
                )) as Arc<dyn Object>
            })
            .collect()
    }

    #[test]
    fn test_empty_tree_never_hits() {
        let bvh = BvhNode::new(vec![]);
        assert!(matches!(bvh, BvhNode::Empty));
        assert_eq!(bvh.depth(), 0);

        let mut rec = HitRecord::default();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(!bvh.hit(&ray, Interval::from_min(0.001), &mut rec));
    }

    #[test]
    fn test_small_sets_are_one_leaf() {
        let bvh = BvhNode::new(sphere_row(LEAF_MAX_SIZE));
        assert!(matches!(bvh, BvhNode::Leaf { .. }));
        assert_eq!(bvh.depth(), 1);
    }

    #[test]
    fn test_split_keeps_every_object() {
        fn count(node: &BvhNode) -> usize {
            match node {
                BvhNode::Empty => 0,
                BvhNode::Leaf { objects, .. } => objects.len(),
                BvhNode::Branch { left, right, .. } => count(left) + count(right),
            }
        }

        let bvh = BvhNode::new(sphere_row(37));
        assert_eq!(count(&bvh), 37);
        assert!(bvh.depth() >= 4);

        let bbox = bvh.bounding_box();
        assert!((bbox.min.x + 0.4).abs() < 1e-4);
        assert!((bbox.max.x - 36.4).abs() < 1e-4);
    }

    #[test]
    fn test_finds_nearest_hit() {
        let bvh = BvhNode::new(sphere_row(10));

        let mut rec = HitRecord::default();
        let ray = Ray::new(Vec3::new(5.0, 0.0, 0.0), Vec3::NEG_Z);
        assert!(bvh.hit(&ray, Interval::from_min(0.001), &mut rec));
        assert!((rec.p.z + 4.6).abs() < 1e-3);

        // Along the row from both ends: only the first sphere met counts
        let mut rec = HitRecord::default();
        let ray = Ray::new(Vec3::new(-5.0, 0.0, -5.0), Vec3::X);
        assert!(bvh.hit(&ray, Interval::from_min(0.001), &mut rec));
        assert!((rec.p.x + 0.4).abs() < 1e-3);

        let mut rec = HitRecord::default();
        let ray = Ray::new(Vec3::new(20.0, 0.0, -5.0), Vec3::NEG_X);
        assert!(bvh.hit(&ray, Interval::from_min(0.001), &mut rec));
        assert!((rec.p.x - 9.4).abs() < 1e-3);
    }
}
