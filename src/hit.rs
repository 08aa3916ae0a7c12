//! Pointer and rubber-band hit-testing against the scene.
//!
//! Both queries walk draw order, ascending `(z_index, seq)`; the point query
//! walks it in reverse so the visually topmost shape wins. Hidden shapes are
//! never hit.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::events::Target;
use crate::scene::{Scene, ShapeId};
use crate::surface::Region;
use crate::vector::Vector;

/// Topmost visible shape under `point` (canvas-local), or the render itself.
#[must_use]
pub fn hit_test(scene: &Scene, point: Vector) -> Target {
    scene
        .sorted()
        .into_iter()
        .rev()
        .find(|shape| shape.visible && shape.is_clicked(point))
        .map_or(Target::Render, |shape| Target::Shape(shape.id()))
}

/// Visible shapes whose bounds touch `area`, in draw order.
#[must_use]
pub fn shapes_in(scene: &Scene, area: &Region) -> Vec<ShapeId> {
    scene
        .sorted()
        .into_iter()
        .filter(|shape| shape.visible && shape.is_in_boundary(area))
        .map(|shape| shape.id())
        .collect()
}
