//! Glint renderer - CPU path tracing.
//!
//! A Monte Carlo path tracer with explicit light sampling and
//! Russian-roulette terminated indirect bounces. The image is split into
//! row bands that render in parallel and are stitched together once every
//! band has finished.

mod band;
mod bvh;
mod camera;
mod config;
mod hittable;
mod integrator;
mod light;
mod material;
mod output;
mod renderer;
mod sampling;
mod scene;
mod sphere;
mod stats;
mod triangle;

pub use band::{partition_rows, render_band, Band, BandResult, Progress};
pub use bvh::BvhNode;
pub use camera::Camera;
pub use config::RenderConfig;
pub use hittable::{HitRecord, Hittable, Object, SurfacePoint};
pub use integrator::{Integrator, SHADOW_RAY_COUNT};
pub use light::{LightSample, LightSampler, LightSegment};
pub use material::{Color, DiffuseLight, Lambertian, Material};
pub use output::{encode_ppm, save_image, tone_map};
pub use renderer::{render, ImageBuffer, RenderError, RenderOutput};
pub use sampling::gen_f32;
pub use scene::{Scene, SceneError};
pub use sphere::Sphere;
pub use stats::RenderStats;
pub use triangle::{quad, Triangle};

/// Re-export Vec3 and common math types from glint_math
pub use glint_math::{Aabb, Interval, Ray, Vec3};
