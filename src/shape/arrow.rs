#[cfg(test)]
#[path = "arrow_test.rs"]
mod arrow_test;

use serde::{Deserialize, Serialize};

use super::ShapeProps;
use crate::consts::{ARROW_HEAD_ANGLE, ARROW_HEAD_SCALE, ARROW_HIT_SLOP};
use crate::surface::{DrawResult, Region, Surface};
use crate::vector::Vector;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ArrowProps {
    #[serde(flatten)]
    pub shape: ShapeProps,
    pub target: Vector,
    pub color: String,
    pub stroke_width: f64,
}

impl Default for ArrowProps {
    fn default() -> Self {
        Self { shape: ShapeProps::default(), target: Vector::ZERO, color: "#fff".into(), stroke_width: 3.0 }
    }
}

/// Straight arrow from the shape position (tail) to `target` (head).
#[derive(Debug, Clone, PartialEq)]
pub struct Arrow {
    pub target: Vector,
    pub color: String,
    pub stroke_width: f64,
}

impl Arrow {
    #[must_use]
    pub fn new(props: &ArrowProps) -> Self {
        Self { target: props.target, color: props.color.clone(), stroke_width: props.stroke_width }
    }

    #[must_use]
    pub fn props(&self, shape: ShapeProps) -> ArrowProps {
        ArrowProps { shape, target: self.target, color: self.color.clone(), stroke_width: self.stroke_width }
    }

    /// Heading from tail to head in radians.
    #[must_use]
    pub fn angle(&self, tail: Vector) -> f64 {
        (self.target.y - tail.y).atan2(self.target.x - tail.x)
    }

    /// Unit heading from tail to head.
    #[must_use]
    pub fn direction(&self, tail: Vector) -> Vector {
        let (sin, cos) = self.angle(tail).sin_cos();
        Vector::new(cos, sin)
    }

    #[must_use]
    pub fn contains(&self, tail: Vector, point: Vector) -> bool {
        distance_to_segment(point, tail, self.target) <= self.stroke_width.max(ARROW_HIT_SLOP)
    }

    #[must_use]
    pub fn bounds(&self, tail: Vector) -> Region {
        Region::from_corners(tail, self.target)
    }

    fn head_size(&self) -> f64 {
        self.stroke_width * ARROW_HEAD_SCALE
    }

    /// The two back corners of the arrowhead.
    fn head_corners(&self, tail: Vector) -> (Vector, Vector) {
        let angle = self.angle(tail);
        let size = self.head_size();
        let corner = |a: f64| {
            let (sin, cos) = a.sin_cos();
            Vector::new(self.target.x - size * cos, self.target.y - size * sin)
        };
        (corner(angle - ARROW_HEAD_ANGLE), corner(angle + ARROW_HEAD_ANGLE))
    }

    pub fn draw(&self, tail: Vector, surface: &mut dyn Surface) -> DrawResult {
        surface.save();
        surface.set_stroke_style(&self.color);
        surface.set_fill_style(&self.color);
        surface.set_line_width(self.stroke_width);
        surface.set_line_cap("round");
        surface.set_line_join("round");

        // Stop the shaft at the base of the head so the round cap stays hidden.
        let shaft_end = self.target.sub(self.direction(tail).scale(self.head_size()));
        surface.begin_path();
        surface.move_to(tail.x, tail.y);
        surface.line_to(shaft_end.x, shaft_end.y);
        surface.stroke();

        surface.begin_path();
        self.outline(tail, surface);
        surface.fill();

        surface.restore();
        Ok(())
    }

    /// Outlines the arrowhead; the shaft has no area to clip with.
    pub fn outline(&self, tail: Vector, surface: &mut dyn Surface) {
        let (left, right) = self.head_corners(tail);
        surface.move_to(self.target.x, self.target.y);
        surface.line_to(left.x, left.y);
        surface.line_to(right.x, right.y);
        surface.close_path();
    }
}

fn distance_to_segment(point: Vector, a: Vector, b: Vector) -> f64 {
    let ab = b.sub(a);
    let len_sq = ab.x * ab.x + ab.y * ab.y;
    if len_sq == 0.0 {
        return point.distance(a);
    }
    let ap = point.sub(a);
    let t = ((ap.x * ab.x + ap.y * ab.y) / len_sq).clamp(0.0, 1.0);
    point.distance(a.add(ab.scale(t)))
}
