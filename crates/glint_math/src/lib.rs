//! Glint math - vectors, rays and bounding volumes.
//!
//! Re-exports `glam` so downstream crates share one vector type.

pub use glam::*;

mod aabb;
mod interval;
mod ray;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;
