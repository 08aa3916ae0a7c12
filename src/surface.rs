//! Immediate-mode 2D drawing surface.
//!
//! Shapes and the render loop draw through [`Surface`] so the engine never
//! touches a browser context directly. The web module implements it for
//! `CanvasRenderingContext2d`; [`RecordingSurface`] captures calls for
//! headless hosts and tests.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use crate::error::DrawError;
use crate::vector::Vector;

pub type DrawResult = Result<(), DrawError>;

/// Axis-aligned rectangle in surface units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Region {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Region {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Inclusive point containment.
    #[must_use]
    pub fn contains(&self, point: Vector) -> bool {
        point.x >= self.x && point.x <= self.x + self.width && point.y >= self.y && point.y <= self.y + self.height
    }

    /// Whether the two boxes overlap; touching edges count.
    #[must_use]
    pub fn intersects(&self, other: &Region) -> bool {
        !(self.x + self.width < other.x
            || self.x > other.x + other.width
            || self.y + self.height < other.y
            || self.y > other.y + other.height)
    }

    /// Grow by `padding` on every side.
    #[must_use]
    pub fn padded(&self, padding: f64) -> Self {
        Self::new(
            self.x - padding,
            self.y - padding,
            self.width + padding * 2.0,
            self.height + padding * 2.0,
        )
    }

    /// Smallest box covering both corners, whatever their order.
    #[must_use]
    pub fn from_corners(a: Vector, b: Vector) -> Self {
        Self::new(a.x.min(b.x), a.y.min(b.y), (a.x - b.x).abs(), (a.y - b.y).abs())
    }

    #[must_use]
    pub fn origin(&self) -> Vector {
        Vector::new(self.x, self.y)
    }

    #[must_use]
    pub fn center(&self) -> Vector {
        Vector::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// The subset of the canvas 2D API the engine uses.
pub trait Surface {
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, x: f64, y: f64) -> DrawResult;
    fn rotate(&mut self, angle: f64) -> DrawResult;

    fn clear_rect(&mut self, region: Region);
    fn fill_rect(&mut self, region: Region);
    fn stroke_rect(&mut self, region: Region);

    fn begin_path(&mut self);
    fn close_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn rect(&mut self, region: Region);
    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) -> DrawResult;
    fn fill(&mut self);
    fn stroke(&mut self);
    fn clip(&mut self);

    fn set_fill_style(&mut self, style: &str);
    fn set_stroke_style(&mut self, style: &str);
    fn set_line_width(&mut self, width: f64);
    fn set_line_cap(&mut self, cap: &str);
    fn set_line_join(&mut self, join: &str);
    fn set_font(&mut self, font: &str);
    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> DrawResult;

    /// Blit `source` of the image loaded from `src` into `dest`.
    fn draw_image(&mut self, src: &str, source: Region, dest: Region) -> DrawResult;
}

/// A [`Surface`] that records every call as a short text op.
///
/// Ops look like `"fill_rect 0 0 10 10"` or `"fill_style red"`; numbers are
/// formatted with `{}` so integral values print without a fraction.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub ops: Vec<String>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ops starting with `prefix`.
    #[must_use]
    pub fn ops_with(&self, prefix: &str) -> Vec<&str> {
        self.ops
            .iter()
            .filter(|op| op.starts_with(prefix))
            .map(String::as_str)
            .collect()
    }

    fn push_region(&mut self, name: &str, r: Region) {
        self.ops
            .push(format!("{name} {} {} {} {}", r.x, r.y, r.width, r.height));
    }
}

impl Surface for RecordingSurface {
    fn save(&mut self) {
        self.ops.push("save".into());
    }

    fn restore(&mut self) {
        self.ops.push("restore".into());
    }

    fn translate(&mut self, x: f64, y: f64) -> DrawResult {
        self.ops.push(format!("translate {x} {y}"));
        Ok(())
    }

    fn rotate(&mut self, angle: f64) -> DrawResult {
        self.ops.push(format!("rotate {angle}"));
        Ok(())
    }

    fn clear_rect(&mut self, region: Region) {
        self.push_region("clear_rect", region);
    }

    fn fill_rect(&mut self, region: Region) {
        self.push_region("fill_rect", region);
    }

    fn stroke_rect(&mut self, region: Region) {
        self.push_region("stroke_rect", region);
    }

    fn begin_path(&mut self) {
        self.ops.push("begin_path".into());
    }

    fn close_path(&mut self) {
        self.ops.push("close_path".into());
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ops.push(format!("move_to {x} {y}"));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ops.push(format!("line_to {x} {y}"));
    }

    fn rect(&mut self, region: Region) {
        self.push_region("rect", region);
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, _start: f64, _end: f64) -> DrawResult {
        self.ops.push(format!("arc {x} {y} {radius}"));
        Ok(())
    }

    fn fill(&mut self) {
        self.ops.push("fill".into());
    }

    fn stroke(&mut self) {
        self.ops.push("stroke".into());
    }

    fn clip(&mut self) {
        self.ops.push("clip".into());
    }

    fn set_fill_style(&mut self, style: &str) {
        self.ops.push(format!("fill_style {style}"));
    }

    fn set_stroke_style(&mut self, style: &str) {
        self.ops.push(format!("stroke_style {style}"));
    }

    fn set_line_width(&mut self, width: f64) {
        self.ops.push(format!("line_width {width}"));
    }

    fn set_line_cap(&mut self, cap: &str) {
        self.ops.push(format!("line_cap {cap}"));
    }

    fn set_line_join(&mut self, join: &str) {
        self.ops.push(format!("line_join {join}"));
    }

    fn set_font(&mut self, font: &str) {
        self.ops.push(format!("font {font}"));
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> DrawResult {
        self.ops.push(format!("fill_text {text} {x} {y}"));
        Ok(())
    }

    fn draw_image(&mut self, src: &str, source: Region, dest: Region) -> DrawResult {
        self.ops.push(format!(
            "draw_image {src} {} {} {} {} -> {} {} {} {}",
            source.x, source.y, source.width, source.height, dest.x, dest.y, dest.width, dest.height
        ));
        Ok(())
    }
}
