#[cfg(test)]
#[path = "pointer_test.rs"]
mod pointer_test;

use serde::{Deserialize, Serialize};

use super::ShapeProps;
use crate::consts::CURSOR_SIZE;
use crate::surface::{DrawResult, Region, Surface};
use crate::vector::Vector;

/// Arrow cursor outline in unscaled glyph units, tip at the origin.
const CURSOR_GLYPH: [(f64, f64); 7] = [
    (0.0, 0.0),
    (0.0, 17.0),
    (4.5, 13.0),
    (8.0, 21.0),
    (11.0, 19.5),
    (7.5, 12.0),
    (13.0, 12.0),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PointerProps {
    #[serde(flatten)]
    pub shape: ShapeProps,
    pub scale: f64,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Default for PointerProps {
    fn default() -> Self {
        Self { shape: ShapeProps::default(), scale: 1.0, color: "white".into(), name: None, email: None }
    }
}

/// A remote collaborator's cursor. Drawn like any shape but never hit.
#[derive(Debug, Clone, PartialEq)]
pub struct Pointer {
    pub scale: f64,
    pub color: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl Pointer {
    #[must_use]
    pub fn new(props: &PointerProps) -> Self {
        Self {
            scale: props.scale,
            color: props.color.clone(),
            name: props.name.clone(),
            email: props.email.clone(),
        }
    }

    #[must_use]
    pub fn props(&self, shape: ShapeProps) -> PointerProps {
        PointerProps {
            shape,
            scale: self.scale,
            color: self.color.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }

    #[must_use]
    pub fn bounds(&self, tip: Vector) -> Region {
        let size = CURSOR_SIZE * self.scale;
        Region::new(tip.x, tip.y, size, size)
    }

    pub fn draw(&self, tip: Vector, surface: &mut dyn Surface) -> DrawResult {
        surface.begin_path();
        self.outline(tip, surface);
        surface.set_fill_style(&self.color);
        surface.fill();
        surface.set_stroke_style("black");
        surface.set_line_width(1.0);
        surface.stroke();

        if let Some(name) = &self.name {
            let size = CURSOR_SIZE * self.scale;
            surface.set_font("12px sans-serif");
            surface.fill_text(name, tip.x + size * 0.6, tip.y + size + 4.0)?;
        }
        Ok(())
    }

    pub fn outline(&self, tip: Vector, surface: &mut dyn Surface) {
        let mut points = CURSOR_GLYPH.iter().map(|&(x, y)| tip.add(Vector::new(x, y).scale(self.scale)));
        if let Some(first) = points.next() {
            surface.move_to(first.x, first.y);
            for p in points {
                surface.line_to(p.x, p.y);
            }
            surface.close_path();
        }
    }
}
