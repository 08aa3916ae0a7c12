#[cfg(test)]
#[path = "vector_test.rs"]
mod vector_test;

use serde::{Deserialize, Serialize};

/// A 2D vector used for positions, deltas and directions.
///
/// Operations never mutate; they return a new value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

#[allow(clippy::should_implement_trait)]
impl Vector {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
    pub const UP: Self = Self { x: 0.0, y: -1.0 };
    pub const DOWN: Self = Self { x: 0.0, y: 1.0 };
    pub const LEFT: Self = Self { x: -1.0, y: 0.0 };
    pub const RIGHT: Self = Self { x: 1.0, y: 0.0 };

    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    #[must_use]
    pub fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    #[must_use]
    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// Component-wise product.
    #[must_use]
    pub fn mul(self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y)
    }

    /// Component-wise quotient.
    #[must_use]
    pub fn div(self, other: Self) -> Self {
        Self::new(self.x / other.x, self.y / other.y)
    }

    /// Euclidean length.
    #[must_use]
    pub fn len(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Unit vector in the same direction.
    ///
    /// The zero vector has no direction: the result is NaN in both
    /// components. Check [`Vector::is_zero`] first.
    #[must_use]
    pub fn normalize(self) -> Self {
        let len = self.len();
        Self::new(self.x / len, self.y / len)
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        self.sub(other).len()
    }

    /// Rotate around the origin by `angle` radians.
    #[must_use]
    pub fn rotate(self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }
}
