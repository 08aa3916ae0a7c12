#![allow(clippy::float_cmp)]

use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::shape::{Circle, CircleProps, Rect, RectProps, ShapeProps, Sprite, SpriteProps};
use crate::surface::RecordingSurface;

fn add_rect(scene: &mut Scene, x: f64, y: f64, w: f64, h: f64) -> ShapeId {
    let props = RectProps { shape: ShapeProps::at(x, y), width: w, height: h, ..RectProps::default() };
    let shape = Shape::new(props.shape.clone(), ShapeKind::Rect(Rect::new(&props)));
    let id = shape.id();
    scene.insert(shape);
    id
}

fn add_circle(scene: &mut Scene, x: f64, y: f64, r: f64) -> ShapeId {
    let props = CircleProps { shape: ShapeProps::at(x, y), radius: r, ..CircleProps::default() };
    let shape = Shape::new(props.shape.clone(), ShapeKind::Circle(Circle::new(&props)));
    let id = shape.id();
    scene.insert(shape);
    id
}

fn rect_size(scene: &Scene, id: ShapeId) -> (f64, f64) {
    scene.get(&id).and_then(Shape::as_rect).map(|r| (r.width, r.height)).unwrap()
}

fn position(scene: &Scene, id: ShapeId) -> Vector {
    scene.get(&id).map(|s| s.position).unwrap()
}

fn transformer() -> Transformer {
    Transformer::new(TransformerSettings::default())
}

// =============================================================
// Membership
// =============================================================

#[test]
fn add_disables_dragging_and_fires_select() {
    let mut scene = Scene::new();
    let id = add_rect(&mut scene, 0.0, 0.0, 10.0, 10.0);
    let fired = Rc::new(RefCell::new(0));
    let f = Rc::clone(&fired);
    scene.get_mut(&id).unwrap().on(ShapeEventKind::Select, move |_| *f.borrow_mut() += 1);

    let mut t = transformer();
    assert!(t.add(&mut scene, id));
    let shape = scene.get(&id).unwrap();
    assert!(!shape.dragging);
    assert_eq!(shape.selected_by(), Some(t.id()));
    assert_eq!(*fired.borrow(), 1);

    // Adding twice is a no-op.
    assert!(!t.add(&mut scene, id));
    assert_eq!(*fired.borrow(), 1);
}

#[test]
fn remove_restores_dragging_and_fires_deselect() {
    let mut scene = Scene::new();
    let id = add_rect(&mut scene, 0.0, 0.0, 10.0, 10.0);
    let fired = Rc::new(RefCell::new(0));
    let f = Rc::clone(&fired);
    scene.get_mut(&id).unwrap().on(ShapeEventKind::Deselect, move |_| *f.borrow_mut() += 1);

    let mut t = transformer();
    t.add(&mut scene, id);
    assert!(t.remove(&mut scene, id));
    let shape = scene.get(&id).unwrap();
    assert!(shape.dragging);
    assert!(!shape.is_selected());
    assert_eq!(*fired.borrow(), 1);
    assert!(!t.remove(&mut scene, id));
}

#[test]
fn add_unknown_shape_is_rejected() {
    let mut scene = Scene::new();
    let mut t = transformer();
    assert!(!t.add(&mut scene, uuid::Uuid::new_v4()));
    assert!(t.is_empty());
}

#[test]
fn nodes_keep_selection_order() {
    let mut scene = Scene::new();
    let a = add_rect(&mut scene, 0.0, 0.0, 10.0, 10.0);
    let b = add_rect(&mut scene, 20.0, 0.0, 10.0, 10.0);
    let mut t = transformer();
    t.add(&mut scene, b);
    t.add(&mut scene, a);
    assert_eq!(t.nodes(), &[b, a]);
}

#[test]
fn clear_releases_everything() {
    let mut scene = Scene::new();
    let a = add_rect(&mut scene, 0.0, 0.0, 10.0, 10.0);
    let b = add_rect(&mut scene, 20.0, 0.0, 10.0, 10.0);
    let mut t = transformer();
    t.set_nodes(&mut scene, &[a, b]);
    t.clear(&mut scene);
    assert!(t.is_empty());
    assert!(scene.iter().all(|s| s.dragging && !s.is_selected()));
}

// =============================================================
// Geometry
// =============================================================

#[test]
fn bounding_box_spans_kinds() {
    let mut scene = Scene::new();
    let r = add_rect(&mut scene, 0.0, 0.0, 10.0, 10.0);
    let c = add_circle(&mut scene, 50.0, 50.0, 10.0);
    let mut t = transformer();
    t.set_nodes(&mut scene, &[r, c]);
    assert_eq!(t.bounding_box(&scene), Some(Region::new(0.0, 0.0, 60.0, 60.0)));
    assert_eq!(t.chrome(&scene), Some(Region::new(-10.0, -10.0, 80.0, 80.0)));
}

#[test]
fn empty_selection_has_no_box() {
    let scene = Scene::new();
    let t = transformer();
    assert_eq!(t.bounding_box(&scene), None);
    assert!(t.handles(&scene).is_empty());
}

#[test]
fn handles_sit_on_padded_corners() {
    let mut scene = Scene::new();
    let id = add_rect(&mut scene, 100.0, 100.0, 50.0, 50.0);
    let mut t = transformer();
    t.add(&mut scene, id);
    assert_eq!(t.handle_at(&scene, Vector::new(90.0, 90.0)), Some(Corner::TopLeft));
    assert_eq!(t.handle_at(&scene, Vector::new(160.0, 160.0)), Some(Corner::BottomRight));
    assert_eq!(t.handle_at(&scene, Vector::new(164.0, 92.0)), Some(Corner::TopRight));
    assert_eq!(t.handle_at(&scene, Vector::new(125.0, 125.0)), None);
}

#[test]
fn corner_resize_math() {
    let initial = Region::new(0.0, 0.0, 100.0, 50.0);
    let d = Vector::new(10.0, 5.0);
    assert_eq!(Corner::BottomRight.resize(&initial, d), Region::new(0.0, 0.0, 110.0, 55.0));
    assert_eq!(Corner::TopLeft.resize(&initial, d), Region::new(10.0, 5.0, 90.0, 45.0));
    assert_eq!(Corner::TopRight.resize(&initial, d), Region::new(0.0, 5.0, 110.0, 45.0));
    assert_eq!(Corner::BottomLeft.resize(&initial, d), Region::new(10.0, 0.0, 90.0, 55.0));
}

// =============================================================
// Move
// =============================================================

#[test]
fn pointer_down_on_shape_selects_and_moves_group() {
    let mut scene = Scene::new();
    let a = add_rect(&mut scene, 0.0, 0.0, 10.0, 10.0);
    let b = add_rect(&mut scene, 50.0, 0.0, 10.0, 10.0);
    let mut t = transformer();
    t.add(&mut scene, a);

    assert!(t.pointer_down(&mut scene, Vector::new(55.0, 5.0), Target::Shape(b), true));
    assert_eq!(t.nodes(), &[a, b]);

    t.pointer_move(&mut scene, Vector::new(60.0, 8.0));
    t.pointer_move(&mut scene, Vector::new(65.0, 10.0));
    assert_eq!(position(&scene, a), Vector::new(10.0, 5.0));
    assert_eq!(position(&scene, b), Vector::new(60.0, 5.0));
    assert!(t.pointer_up());
}

#[test]
fn pointer_down_on_other_shape_replaces_selection() {
    let mut scene = Scene::new();
    let a = add_rect(&mut scene, 0.0, 0.0, 10.0, 10.0);
    let b = add_rect(&mut scene, 50.0, 0.0, 10.0, 10.0);
    let mut t = transformer();
    t.add(&mut scene, a);
    t.pointer_down(&mut scene, Vector::new(55.0, 5.0), Target::Shape(b), false);
    assert_eq!(t.nodes(), &[b]);
}

#[test]
fn pointer_down_inside_chrome_starts_move() {
    let mut scene = Scene::new();
    let a = add_rect(&mut scene, 0.0, 0.0, 10.0, 10.0);
    let b = add_rect(&mut scene, 50.0, 0.0, 10.0, 10.0);
    let mut t = transformer();
    t.set_nodes(&mut scene, &[a, b]);
    // Gap between the two rects: empty canvas but inside the chrome.
    assert!(t.pointer_down(&mut scene, Vector::new(30.0, 5.0), Target::Render, false));
    assert!(t.is_active());
}

#[test]
fn pointer_down_outside_is_not_taken() {
    let mut scene = Scene::new();
    let a = add_rect(&mut scene, 0.0, 0.0, 10.0, 10.0);
    let mut t = transformer();
    t.add(&mut scene, a);
    assert!(!t.pointer_down(&mut scene, Vector::new(300.0, 300.0), Target::Render, false));
    assert!(!t.is_active());
    assert!(!t.pointer_move(&mut scene, Vector::new(310.0, 300.0)));
    assert!(!t.pointer_up());
}

// =============================================================
// Resize
// =============================================================

#[test]
fn bottom_right_resize_scales_widths_proportionally() {
    let mut scene = Scene::new();
    let a = add_rect(&mut scene, 0.0, 0.0, 40.0, 30.0);
    let b = add_rect(&mut scene, 60.0, 10.0, 40.0, 20.0);
    let mut t = transformer();
    t.set_nodes(&mut scene, &[a, b]);
    // Group box is 100 x 30; the bottom-right handle sits at (110, 40).
    assert!(t.pointer_down(&mut scene, Vector::new(110.0, 40.0), Target::Render, false));
    t.pointer_move(&mut scene, Vector::new(160.0, 40.0));

    let factor = 150.0 / 100.0;
    assert_eq!(rect_size(&scene, a), (40.0 * factor, 30.0));
    assert_eq!(rect_size(&scene, b), (40.0 * factor, 20.0));
    assert_eq!(position(&scene, a), Vector::new(0.0, 0.0));
    assert_eq!(position(&scene, b), Vector::new(60.0 * factor, 10.0));
    assert_eq!(t.bounding_box(&scene), Some(Region::new(0.0, 0.0, 150.0, 30.0)));
}

#[test]
fn resize_uses_cumulative_delta() {
    let mut scene = Scene::new();
    let a = add_rect(&mut scene, 0.0, 0.0, 100.0, 100.0);
    let mut t = transformer();
    t.add(&mut scene, a);
    t.pointer_down(&mut scene, Vector::new(110.0, 110.0), Target::Render, false);
    t.pointer_move(&mut scene, Vector::new(120.0, 110.0));
    t.pointer_move(&mut scene, Vector::new(130.0, 110.0));
    assert_eq!(rect_size(&scene, a), (120.0, 100.0));
}

#[test]
fn top_left_resize_moves_origin() {
    let mut scene = Scene::new();
    let a = add_rect(&mut scene, 100.0, 100.0, 100.0, 100.0);
    let mut t = transformer();
    t.add(&mut scene, a);
    t.pointer_down(&mut scene, Vector::new(90.0, 90.0), Target::Render, false);
    t.pointer_move(&mut scene, Vector::new(140.0, 140.0));
    assert_eq!(position(&scene, a), Vector::new(150.0, 150.0));
    assert_eq!(rect_size(&scene, a), (50.0, 50.0));
}

#[test]
fn resize_below_floor_is_rejected() {
    let mut scene = Scene::new();
    let a = add_rect(&mut scene, 0.0, 0.0, 100.0, 100.0);
    let mut t = transformer();
    t.add(&mut scene, a);
    t.pointer_down(&mut scene, Vector::new(110.0, 110.0), Target::Render, false);
    t.pointer_move(&mut scene, Vector::new(50.0, 110.0));
    assert_eq!(rect_size(&scene, a), (40.0, 100.0));
    // Would leave 15 wide: rejected, previous size kept.
    t.pointer_move(&mut scene, Vector::new(25.0, 110.0));
    assert_eq!(rect_size(&scene, a), (40.0, 100.0));
}

#[test]
fn circle_and_sprite_scale_by_smaller_ratio() {
    let mut scene = Scene::new();
    let c = add_circle(&mut scene, 50.0, 50.0, 50.0);
    let sprite_props = SpriteProps { shape: ShapeProps::at(0.0, 100.0), ..SpriteProps::default() };
    let sprite = Shape::new(sprite_props.shape.clone(), ShapeKind::Sprite(Box::new(Sprite::new(&sprite_props))));
    let s = sprite.id();
    scene.insert(sprite);

    let mut t = transformer();
    t.set_nodes(&mut scene, &[c, s]);
    // Group box 100 x 200; drag bottom-right by (+100, +20): sx = 2, sy = 1.1.
    t.pointer_down(&mut scene, Vector::new(110.0, 210.0), Target::Render, false);
    t.pointer_move(&mut scene, Vector::new(210.0, 230.0));

    let radius = scene.get(&c).and_then(Shape::as_circle).map(|c| c.radius).unwrap();
    let scale = scene.get(&s).and_then(Shape::as_sprite).map(Sprite::scale).unwrap();
    assert!((radius - 55.0).abs() < 1e-9);
    assert!((scale - 1.1).abs() < 1e-9);
}

// =============================================================
// Click
// =============================================================

#[test]
fn click_after_drag_is_swallowed() {
    let mut scene = Scene::new();
    let a = add_rect(&mut scene, 0.0, 0.0, 10.0, 10.0);
    let mut t = transformer();
    t.pointer_down(&mut scene, Vector::new(5.0, 5.0), Target::Shape(a), false);
    t.pointer_up();
    t.click(&mut scene, Target::Render, false, None);
    assert_eq!(t.nodes(), &[a]);

    // The next click counts again.
    t.click(&mut scene, Target::Render, false, None);
    assert!(t.is_empty());
}

#[test]
fn click_on_empty_canvas_keeps_selection_with_shift() {
    let mut scene = Scene::new();
    let a = add_rect(&mut scene, 0.0, 0.0, 10.0, 10.0);
    let mut t = transformer();
    t.add(&mut scene, a);
    t.click(&mut scene, Target::Render, true, None);
    assert_eq!(t.nodes(), &[a]);
}

#[test]
fn click_on_shape_adds_with_shift_replaces_without() {
    let mut scene = Scene::new();
    let a = add_rect(&mut scene, 0.0, 0.0, 10.0, 10.0);
    let b = add_rect(&mut scene, 20.0, 0.0, 10.0, 10.0);
    let c = add_rect(&mut scene, 40.0, 0.0, 10.0, 10.0);
    let mut t = transformer();
    t.click(&mut scene, Target::Shape(a), false, None);
    t.click(&mut scene, Target::Shape(b), true, None);
    assert_eq!(t.nodes(), &[a, b]);
    t.click(&mut scene, Target::Shape(c), false, None);
    assert_eq!(t.nodes(), &[c]);
}

#[test]
fn pending_selection_replaces_wholesale() {
    let mut scene = Scene::new();
    let a = add_rect(&mut scene, 0.0, 0.0, 10.0, 10.0);
    let b = add_rect(&mut scene, 20.0, 0.0, 10.0, 10.0);
    let c = add_rect(&mut scene, 40.0, 0.0, 10.0, 10.0);
    let mut t = transformer();
    t.add(&mut scene, a);
    t.click(&mut scene, Target::Render, false, Some(vec![b, c]));
    assert_eq!(t.nodes(), &[b, c]);
    assert!(scene.get(&a).unwrap().dragging);
}

// =============================================================
// Shortcuts
// =============================================================

#[test]
fn shortcuts_need_selection() {
    let t = transformer();
    let ctrl = Modifiers { ctrl: true, ..Modifiers::default() };
    assert_eq!(t.shortcut(&Key::new("d"), ctrl), None);
}

#[test]
fn shortcuts_are_modifier_gated() {
    let mut scene = Scene::new();
    let a = add_rect(&mut scene, 0.0, 0.0, 10.0, 10.0);
    let mut t = transformer();
    t.add(&mut scene, a);
    let none = Modifiers::default();
    let ctrl = Modifiers { ctrl: true, ..Modifiers::default() };
    let meta = Modifiers { meta: true, ..Modifiers::default() };

    assert_eq!(t.shortcut(&Key::new("d"), none), None);
    assert_eq!(t.shortcut(&Key::new("m"), none), None);
    assert_eq!(t.shortcut(&Key::new("Backspace"), none), None);
    assert_eq!(t.shortcut(&Key::new("d"), ctrl), Some(Shortcut::Duplicate));
    assert_eq!(t.shortcut(&Key::new("D"), meta), Some(Shortcut::Duplicate));
    assert_eq!(t.shortcut(&Key::new("m"), ctrl), Some(Shortcut::ToggleMask));
    assert_eq!(t.shortcut(&Key::new("h"), meta), Some(Shortcut::ToggleHover));
    assert_eq!(t.shortcut(&Key::new("Backspace"), meta), Some(Shortcut::Delete));
    assert_eq!(t.shortcut(&Key::new("Delete"), none), Some(Shortcut::Delete));
    assert_eq!(t.shortcut(&Key::new("x"), ctrl), None);
}

// =============================================================
// Drawing
// =============================================================

#[test]
fn draw_outlines_chrome_and_four_handles() {
    let mut scene = Scene::new();
    let a = add_rect(&mut scene, 0.0, 0.0, 10.0, 10.0);
    let mut t = transformer();
    let mut surface = RecordingSurface::new();
    t.draw(&scene, &mut surface).unwrap();
    assert!(surface.ops.is_empty());

    t.add(&mut scene, a);
    t.draw(&scene, &mut surface).unwrap();
    assert_eq!(surface.ops_with("rect -10 -10 30 30"), vec!["rect -10 -10 30 30"]);
    assert_eq!(surface.ops_with("fill").iter().filter(|op| **op == "fill").count(), 4);
}
