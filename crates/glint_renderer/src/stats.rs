//! Per-worker ray counters, merged after the render joins.

use std::fmt;

/// Counters gathered by one tile worker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub camera_rays: u64,
    pub shadow_rays: u64,
    pub indirect_rays: u64,
    /// Deepest recursion depth that reached the intersection step
    pub max_depth_reached: u32,
}

impl RenderStats {
    /// Record that a radiance estimate ran at `depth`.
    #[inline]
    pub fn record_depth(&mut self, depth: u32) {
        self.max_depth_reached = self.max_depth_reached.max(depth);
    }

    pub fn total_rays(&self) -> u64 {
        self.camera_rays + self.shadow_rays + self.indirect_rays
    }

    pub fn merge(&mut self, other: &RenderStats) {
        self.camera_rays += other.camera_rays;
        self.shadow_rays += other.shadow_rays;
        self.indirect_rays += other.indirect_rays;
        self.max_depth_reached = self.max_depth_reached.max(other.max_depth_reached);
    }
}

impl fmt::Display for RenderStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rays ({} camera, {} shadow, {} indirect), max depth {}",
            self.total_rays(),
            self.camera_rays,
            self.shadow_rays,
            self.indirect_rays,
            self.max_depth_reached
        )
    }
}
