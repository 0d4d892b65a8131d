//! Scene: objects, their BVH and the light sampler.

use crate::{BvhNode, HitRecord, Hittable, LightSampler, Object};
use glint_math::{Interval, Ray};
use std::sync::Arc;
use thiserror::Error;

/// Shortest accepted hit distance, keeps rays from re-hitting their origin.
const T_MIN: f32 = 0.001;

/// Errors that can occur when assembling a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Scene contains no objects")]
    Empty,

    #[error("Scene has no emissive surface with positive area")]
    NoEmitters,
}

/// Read-only scene shared by every render thread.
pub struct Scene {
    objects: Vec<Arc<dyn Object>>,
    bvh: BvhNode,
    lights: LightSampler,
}

impl Scene {
    /// Build the BVH and light table for `objects`.
    pub fn new(objects: Vec<Arc<dyn Object>>) -> Result<Self, SceneError> {
        if objects.is_empty() {
            return Err(SceneError::Empty);
        }

        let lights = LightSampler::new(&objects)?;

        log::debug!("Generating BVH over {} objects", objects.len());
        let bvh = BvhNode::new(objects.clone());
        log::debug!("BVH depth {}", bvh.depth());

        Ok(Self {
            objects,
            bvh,
            lights,
        })
    }

    /// Nearest hit along `ray`, or `None` if the ray leaves the scene.
    pub fn intersect(&self, ray: &Ray) -> Option<HitRecord<'_>> {
        let mut rec = HitRecord::default();
        if self.bvh.hit(ray, Interval::from_min(T_MIN), &mut rec) {
            Some(rec)
        } else {
            None
        }
    }

    pub fn lights(&self) -> &LightSampler {
        &self.lights
    }

    pub fn objects(&self) -> &[Arc<dyn Object>] {
        &self.objects
    }
}
