#[cfg(test)]
#[path = "circle_test.rs"]
mod circle_test;

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use super::ShapeProps;
use crate::surface::{DrawResult, Region, Surface};
use crate::vector::Vector;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CircleProps {
    #[serde(flatten)]
    pub shape: ShapeProps,
    pub radius: f64,
    pub color: String,
}

impl Default for CircleProps {
    fn default() -> Self {
        Self { shape: ShapeProps::default(), radius: 10.0, color: "#fff".into() }
    }
}

/// Filled circle; its position is the center.
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub radius: f64,
    pub color: String,
}

impl Circle {
    #[must_use]
    pub fn new(props: &CircleProps) -> Self {
        Self { radius: props.radius, color: props.color.clone() }
    }

    #[must_use]
    pub fn props(&self, shape: ShapeProps) -> CircleProps {
        CircleProps { shape, radius: self.radius, color: self.color.clone() }
    }

    #[must_use]
    pub fn contains(&self, center: Vector, point: Vector) -> bool {
        center.distance(point) <= self.radius
    }

    #[must_use]
    pub fn bounds(&self, center: Vector) -> Region {
        Region::new(center.x - self.radius, center.y - self.radius, self.radius * 2.0, self.radius * 2.0)
    }

    pub fn draw(&self, center: Vector, surface: &mut dyn Surface) -> DrawResult {
        surface.begin_path();
        surface.arc(center.x, center.y, self.radius, 0.0, TAU)?;
        surface.set_fill_style(&self.color);
        surface.fill();
        surface.close_path();
        Ok(())
    }

    pub fn outline(&self, center: Vector, surface: &mut dyn Surface) -> DrawResult {
        surface.move_to(center.x + self.radius, center.y);
        surface.arc(center.x, center.y, self.radius, 0.0, TAU)
    }
}
