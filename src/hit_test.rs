use super::*;
use crate::shape::{
    Arrow, ArrowProps, Circle, CircleProps, Pointer, PointerProps, Rect, RectProps, Shape, ShapeKind, ShapeProps,
};

fn insert(scene: &mut Scene, shape: Shape) -> ShapeId {
    let id = shape.id();
    scene.insert(shape);
    id
}

fn rect(scene: &mut Scene, x: f64, y: f64, w: f64, h: f64, z: i64) -> ShapeId {
    let props = RectProps {
        shape: ShapeProps { z_index: z, ..ShapeProps::at(x, y) },
        width: w,
        height: h,
        ..RectProps::default()
    };
    insert(scene, Shape::new(props.shape.clone(), ShapeKind::Rect(Rect::new(&props))))
}

fn circle(scene: &mut Scene, x: f64, y: f64, r: f64, z: i64) -> ShapeId {
    let props = CircleProps { shape: ShapeProps { z_index: z, ..ShapeProps::at(x, y) }, radius: r, ..CircleProps::default() };
    insert(scene, Shape::new(props.shape.clone(), ShapeKind::Circle(Circle::new(&props))))
}

// =============================================================
// Point queries
// =============================================================

#[test]
fn empty_scene_hits_render() {
    let scene = Scene::new();
    assert_eq!(hit_test(&scene, Vector::new(0.0, 0.0)), Target::Render);
}

#[test]
fn rect_under_pointer_is_target() {
    let mut scene = Scene::new();
    let id = rect(&mut scene, 100.0, 100.0, 50.0, 50.0, 0);
    assert_eq!(hit_test(&scene, Vector::new(110.0, 110.0)), Target::Shape(id));
    assert_eq!(hit_test(&scene, Vector::new(90.0, 110.0)), Target::Render);
}

#[test]
fn higher_z_wins_regardless_of_insertion() {
    let mut scene = Scene::new();
    let first = circle(&mut scene, 200.0, 200.0, 50.0, 1);
    let second = circle(&mut scene, 200.0, 200.0, 50.0, 2);
    assert_eq!(hit_test(&scene, Vector::new(200.0, 200.0)), Target::Shape(second));

    let mut scene = Scene::new();
    let top = circle(&mut scene, 200.0, 200.0, 50.0, 2);
    circle(&mut scene, 200.0, 200.0, 50.0, 1);
    assert_eq!(hit_test(&scene, Vector::new(200.0, 200.0)), Target::Shape(top));
    assert_ne!(first, top);
}

#[test]
fn equal_z_latest_insertion_wins() {
    let mut scene = Scene::new();
    rect(&mut scene, 0.0, 0.0, 100.0, 100.0, 0);
    rect(&mut scene, 10.0, 10.0, 100.0, 100.0, 0);
    let last = rect(&mut scene, 20.0, 20.0, 100.0, 100.0, 0);
    assert_eq!(hit_test(&scene, Vector::new(50.0, 50.0)), Target::Shape(last));
}

#[test]
fn hidden_shapes_are_skipped() {
    let mut scene = Scene::new();
    let below = rect(&mut scene, 0.0, 0.0, 100.0, 100.0, 0);
    let above = rect(&mut scene, 0.0, 0.0, 100.0, 100.0, 1);
    scene.get_mut(&above).unwrap().visible = false;
    assert_eq!(hit_test(&scene, Vector::new(50.0, 50.0)), Target::Shape(below));
}

#[test]
fn pointers_are_transparent() {
    let mut scene = Scene::new();
    let below = rect(&mut scene, 0.0, 0.0, 100.0, 100.0, 0);
    let props = PointerProps { shape: ShapeProps { z_index: 5, ..ShapeProps::at(10.0, 10.0) }, ..PointerProps::default() };
    insert(&mut scene, Shape::new(props.shape.clone(), ShapeKind::Pointer(Pointer::new(&props))));
    assert_eq!(hit_test(&scene, Vector::new(15.0, 15.0)), Target::Shape(below));
}

#[test]
fn arrow_hit_near_shaft() {
    let mut scene = Scene::new();
    let props = ArrowProps { shape: ShapeProps::at(0.0, 0.0), target: Vector::new(100.0, 0.0), ..ArrowProps::default() };
    let id = insert(&mut scene, Shape::new(props.shape.clone(), ShapeKind::Arrow(Arrow::new(&props))));
    assert_eq!(hit_test(&scene, Vector::new(50.0, 4.0)), Target::Shape(id));
    assert_eq!(hit_test(&scene, Vector::new(50.0, 20.0)), Target::Render);
}

// =============================================================
// Area queries
// =============================================================

#[test]
fn shapes_in_returns_intersecting_in_draw_order() {
    let mut scene = Scene::new();
    let a = rect(&mut scene, 0.0, 0.0, 10.0, 10.0, 3);
    let b = circle(&mut scene, 50.0, 50.0, 10.0, 0);
    rect(&mut scene, 500.0, 500.0, 10.0, 10.0, 0);
    let found = shapes_in(&scene, &Region::new(5.0, 5.0, 40.0, 40.0));
    assert_eq!(found, vec![b, a]);
}

#[test]
fn shapes_in_counts_touching_edges() {
    let mut scene = Scene::new();
    let a = rect(&mut scene, 0.0, 0.0, 10.0, 10.0, 0);
    assert_eq!(shapes_in(&scene, &Region::new(10.0, 10.0, 5.0, 5.0)), vec![a]);
}

#[test]
fn shapes_in_skips_pointers() {
    let mut scene = Scene::new();
    let props = PointerProps::default();
    insert(&mut scene, Shape::new(props.shape.clone(), ShapeKind::Pointer(Pointer::new(&props))));
    assert!(shapes_in(&scene, &Region::new(-100.0, -100.0, 200.0, 200.0)).is_empty());
}
