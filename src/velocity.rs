//! Constant-velocity motion owned by a single shape.

#[cfg(test)]
#[path = "velocity_test.rs"]
mod velocity_test;

use crate::vector::Vector;

/// Per-tick displacement `direction * speed` applied to the owning shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyVelocity {
    pub direction: Vector,
    pub speed: f64,
    /// Re-aimed at the pointer on every pointer move.
    pub hover: bool,
}

impl BodyVelocity {
    #[must_use]
    pub fn new(direction: Vector, speed: f64) -> Self {
        Self { direction, speed, hover: false }
    }

    /// A still component that follows the pointer once it moves.
    #[must_use]
    pub fn hovering() -> Self {
        Self { direction: Vector::ZERO, speed: 0.0, hover: true }
    }

    /// Position after one tick. Zero speed or a degenerate direction leaves it unchanged.
    #[must_use]
    pub fn step(&self, position: Vector) -> Vector {
        if self.speed == 0.0 || !self.direction.x.is_finite() || !self.direction.y.is_finite() {
            return position;
        }
        position.add(self.direction.scale(self.speed))
    }

    /// Point at `target` from `from` with the given speed. Stops when already there.
    pub fn aim_at(&mut self, from: Vector, target: Vector, speed: f64) {
        let delta = target.sub(from);
        if delta.is_zero() {
            self.direction = Vector::ZERO;
            self.speed = 0.0;
            return;
        }
        self.direction = delta.normalize();
        self.speed = speed;
    }
}
