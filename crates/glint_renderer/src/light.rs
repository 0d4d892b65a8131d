//! Area-weighted light sampling over the emissive objects of a scene.

use crate::{gen_f32, Color, Object, SceneError};
use glint_math::Vec3;
use rand::RngCore;
use std::sync::Arc;

/// A single point sampled on an emitter.
#[derive(Debug, Clone, Copy)]
pub struct LightSample {
    pub point: Vec3,
    /// Geometric normal of the emitter at `point`
    pub normal: Vec3,
    pub emission: Color,
    /// Area-measure density, 1 / total emissive area
    pub pdf: f32,
}

/// Two points on one emitter spanning a sampled chord.
#[derive(Debug, Clone, Copy)]
pub struct LightSegment {
    pub start: Vec3,
    pub end: Vec3,
    pub normal: Vec3,
    pub emission: Color,
    /// Density of choosing this segment: length / total emissive area,
    /// or 1 / total emissive area when the segment is degenerate.
    pub pdf: f32,
}

impl LightSegment {
    pub fn length(&self) -> f32 {
        (self.end - self.start).length()
    }

    /// Length factor applied to the segment estimate: the segment length,
    /// or 1 for a zero-length segment.
    pub fn extent(&self) -> f32 {
        let length = self.length();
        if length > f32::EPSILON {
            length
        } else {
            1.0
        }
    }

    /// Point at fraction `s` in `[0, 1]` from `start` to `end`.
    pub fn point_at(&self, s: f32) -> Vec3 {
        self.start.lerp(self.end, s)
    }

    pub fn midpoint(&self) -> Vec3 {
        self.point_at(0.5)
    }
}

/// Picks emitters with probability proportional to their area.
pub struct LightSampler {
    emitters: Vec<Arc<dyn Object>>,
    /// Running sum of emitter areas, same order as `emitters`
    cumulative_area: Vec<f32>,
    total_area: f32,
}

impl LightSampler {
    /// Collect the emitters among `objects`.
    ///
    /// Fails with [`SceneError::NoEmitters`] when no object both emits and
    /// has positive area, since every light-sampling density would then be
    /// undefined.
    pub fn new(objects: &[Arc<dyn Object>]) -> Result<Self, SceneError> {
        let mut emitters = Vec::new();
        let mut cumulative_area = Vec::new();
        let mut total_area = 0.0;

        for object in objects {
            let area = object.area();
            if object.material().has_emission() && area > 0.0 {
                total_area += area;
                emitters.push(Arc::clone(object));
                cumulative_area.push(total_area);
            }
        }

        if emitters.is_empty() {
            return Err(SceneError::NoEmitters);
        }

        log::debug!(
            "Light sampler: {} emitters, total area {:.3}",
            emitters.len(),
            total_area
        );

        Ok(Self {
            emitters,
            cumulative_area,
            total_area,
        })
    }

    pub fn emitter_count(&self) -> usize {
        self.emitters.len()
    }

    pub fn total_area(&self) -> f32 {
        self.total_area
    }

    /// Index of the first emitter whose cumulative area reaches `p`.
    fn select_index(&self, p: f32) -> usize {
        let index = self.cumulative_area.partition_point(|&area| area < p);
        index.min(self.emitters.len() - 1)
    }

    fn select(&self, rng: &mut dyn RngCore) -> &dyn Object {
        let p = gen_f32(rng) * self.total_area;
        self.emitters[self.select_index(p)].as_ref()
    }

    /// Sample one point on the emissive surfaces.
    pub fn sample_point(&self, rng: &mut dyn RngCore) -> LightSample {
        let emitter = self.select(rng);
        let surface = emitter.sample(rng);

        LightSample {
            point: surface.p,
            normal: surface.normal,
            emission: emitter.material().emission(),
            pdf: 1.0 / self.total_area,
        }
    }

    /// Sample a chord on one emitter.
    pub fn sample_segment(&self, rng: &mut dyn RngCore) -> LightSegment {
        let emitter = self.select(rng);
        let (start, end) = emitter.sample_chord(rng);

        let mut segment = LightSegment {
            start: start.p,
            end: end.p,
            normal: start.normal,
            emission: emitter.material().emission(),
            pdf: 0.0,
        };
        segment.pdf = segment.extent() / self.total_area;
        segment
    }
}
