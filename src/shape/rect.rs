#[cfg(test)]
#[path = "rect_test.rs"]
mod rect_test;

use serde::{Deserialize, Serialize};

use super::{ShapeProps, local_point};
use crate::surface::{DrawResult, Region, Surface};
use crate::vector::Vector;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RectProps {
    #[serde(flatten)]
    pub shape: ShapeProps,
    pub width: f64,
    pub height: f64,
    pub color: String,
    pub border_width: f64,
    pub border_color: String,
}

impl Default for RectProps {
    fn default() -> Self {
        Self {
            shape: ShapeProps::default(),
            width: 100.0,
            height: 100.0,
            color: "white".into(),
            border_width: 0.0,
            border_color: "transparent".into(),
        }
    }
}

/// Filled rectangle anchored at its top-left corner, rotated about that corner.
#[derive(Debug, Clone, PartialEq)]
pub struct Rect {
    pub width: f64,
    pub height: f64,
    pub color: String,
    pub border_width: f64,
    pub border_color: String,
}

impl Rect {
    #[must_use]
    pub fn new(props: &RectProps) -> Self {
        Self {
            width: props.width,
            height: props.height,
            color: props.color.clone(),
            border_width: props.border_width,
            border_color: props.border_color.clone(),
        }
    }

    #[must_use]
    pub fn props(&self, shape: ShapeProps) -> RectProps {
        RectProps {
            shape,
            width: self.width,
            height: self.height,
            color: self.color.clone(),
            border_width: self.border_width,
            border_color: self.border_color.clone(),
        }
    }

    #[must_use]
    pub fn contains(&self, position: Vector, rotation: f64, point: Vector) -> bool {
        let local = local_point(position, rotation, point);
        local.x >= 0.0 && local.x <= self.width && local.y >= 0.0 && local.y <= self.height
    }

    #[must_use]
    pub fn bounds(&self, position: Vector) -> Region {
        Region::new(position.x, position.y, self.width, self.height)
    }

    pub fn draw(&self, position: Vector, rotation: f64, surface: &mut dyn Surface) -> DrawResult {
        surface.save();
        let result = self.paint(position, rotation, surface);
        surface.restore();
        result
    }

    fn paint(&self, position: Vector, rotation: f64, surface: &mut dyn Surface) -> DrawResult {
        surface.translate(position.x, position.y)?;
        surface.rotate(rotation)?;
        surface.begin_path();
        surface.rect(Region::new(0.0, 0.0, self.width, self.height));
        surface.set_fill_style(&self.color);
        surface.fill();
        if self.border_width > 0.0 {
            surface.set_line_width(self.border_width);
            surface.set_stroke_style(&self.border_color);
            surface.stroke();
        }
        surface.close_path();
        Ok(())
    }

    pub fn outline(&self, position: Vector, surface: &mut dyn Surface) {
        surface.rect(self.bounds(position));
    }
}
