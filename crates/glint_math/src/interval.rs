/// Range of ray parameters `[min, max]` accepted by an intersection query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Everything past `min`.
    pub const fn from_min(min: f32) -> Self {
        Self::new(min, f32::INFINITY)
    }

    /// Same lower bound, upper bound lowered to `max`.
    #[inline]
    pub fn clamp_max(self, max: f32) -> Self {
        Self::new(self.min, self.max.min(max))
    }

    pub fn is_empty(&self) -> bool {
        self.min >= self.max
    }

    /// `min <= x <= max`
    pub fn contains(&self, x: f32) -> bool {
        (self.min..=self.max).contains(&x)
    }

    /// `min < x < max`; hits exactly at either bound are rejected.
    #[inline]
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }
}
