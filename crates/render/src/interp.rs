use glam::{Vec2, Vec3};

/// Linear blend between two values.
pub trait Lerp: Copy {
    fn lerp(self, other: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for f64 {
    fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * f64::from(t)
    }
}

impl Lerp for Vec2 {
    fn lerp(self, other: Self, t: f32) -> Self {
        Vec2::lerp(self, other, t)
    }
}

impl Lerp for Vec3 {
    fn lerp(self, other: Self, t: f32) -> Self {
        Vec3::lerp(self, other, t)
    }
}

/// The two most recent simulation states of a value, for smooth drawing.
///
/// Games push the new state at the end of every `update` and sample with the
/// interpolation factor handed to `draw`. A factor of 1.0 yields the state of
/// the last completed step, 0.0 the one before it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interpolated<T: Lerp> {
    previous: T,
    current: T,
}

impl<T: Lerp> Interpolated<T> {
    pub fn new(value: T) -> Self {
        Self {
            previous: value,
            current: value,
        }
    }

    /// Record the state produced by a completed step.
    pub fn push(&mut self, value: T) {
        self.previous = self.current;
        self.current = value;
    }

    pub fn previous(&self) -> T {
        self.previous
    }

    pub fn current(&self) -> T {
        self.current
    }

    /// Blend for drawing. `interpolation` is clamped to `[0, 1]`.
    pub fn sample(&self, interpolation: f32) -> T {
        self.previous.lerp(self.current, interpolation.clamp(0.0, 1.0))
    }
}
