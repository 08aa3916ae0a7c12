//! Rendering: draws one tick of the scene to a [`Surface`].
//!
//! Layers, bottom first:
//!
//! 1. clear the viewport;
//! 2. mask silhouettes become the clip region (masks are never painted);
//! 3. every other shape in draw order, updated and drawn;
//! 4. the rubber-band rectangle;
//! 5. the transformer chrome;
//! 6. the FPS badge.
//!
//! A failing draw call doesn't stop the frame: later layers still draw and
//! the first error is returned to the tick caller.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::clock::FrameContext;
use crate::error::DrawError;
use crate::scene::{Scene, ShapeId};
use crate::shape::Shape;
use crate::surface::{DrawResult, Region, Surface};
use crate::transformer::Transformer;

const FPS_FONT: &str = "12px monospace";
const FPS_COLOR: &str = "white";

/// Read-only state drawn above the scene.
#[derive(Debug, Default, Clone, Copy)]
pub struct Overlay<'a> {
    pub viewport: Region,
    pub selection: Option<&'a Shape>,
    pub transformer: Option<&'a Transformer>,
    /// FPS value to show, `None` hides the badge.
    pub fps: Option<u32>,
}

/// Draw and advance every shape, then the overlay.
pub fn draw(surface: &mut dyn Surface, scene: &mut Scene, frame: &FrameContext, overlay: &Overlay<'_>) -> DrawResult {
    let mut first_error = None;

    surface.clear_rect(overlay.viewport);

    let order = scene.sorted_ids();
    let masks: Vec<ShapeId> = order
        .iter()
        .copied()
        .filter(|id| scene.get(id).is_some_and(|s| s.visible && s.mask))
        .collect();

    if !masks.is_empty() {
        surface.save();
        surface.begin_path();
        for id in &masks {
            if let Some(shape) = scene.get_mut(id) {
                shape.step_velocity();
                keep_first(&mut first_error, shape.outline(surface));
            }
        }
        surface.clip();
    }

    for id in order.iter().filter(|id| !masks.contains(id)) {
        if let Some(shape) = scene.get_mut(id) {
            if let Err(e) = shape.update(frame, surface) {
                tracing::warn!(shape_id = %id, error = %e, "shape draw failed");
                first_error.get_or_insert(e);
            }
        }
    }

    if !masks.is_empty() {
        surface.restore();
    }

    if let Some(band) = overlay.selection {
        if let Some(rect) = band.as_rect() {
            keep_first(&mut first_error, rect.draw(band.position, band.rotation, surface));
        }
    }
    if let Some(transformer) = overlay.transformer {
        keep_first(&mut first_error, transformer.draw(scene, surface));
    }
    if let Some(fps) = overlay.fps {
        keep_first(&mut first_error, draw_fps(surface, fps));
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn draw_fps(surface: &mut dyn Surface, fps: u32) -> DrawResult {
    surface.set_font(FPS_FONT);
    surface.set_fill_style(FPS_COLOR);
    surface.fill_text(&format!("FPS: {fps}"), 10.0, 20.0)
}

fn keep_first(slot: &mut Option<DrawError>, result: DrawResult) {
    if let Err(e) = result {
        slot.get_or_insert(e);
    }
}
