#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn add_and_sub_return_new_values() {
    let a = Vector::new(1.0, 2.0);
    let b = Vector::new(3.0, -4.0);
    assert_eq!(a.add(b), Vector::new(4.0, -2.0));
    assert_eq!(a.sub(b), Vector::new(-2.0, 6.0));
    assert_eq!(a, Vector::new(1.0, 2.0));
}

#[test]
fn scale_mul_div() {
    let v = Vector::new(2.0, 3.0);
    assert_eq!(v.scale(2.0), Vector::new(4.0, 6.0));
    assert_eq!(v.mul(Vector::new(2.0, -1.0)), Vector::new(4.0, -3.0));
    assert_eq!(v.div(Vector::new(2.0, 3.0)), Vector::new(1.0, 1.0));
}

#[test]
fn len_is_euclidean() {
    assert_eq!(Vector::new(3.0, 4.0).len(), 5.0);
    assert_eq!(Vector::ZERO.len(), 0.0);
}

#[test]
fn normalize_produces_unit_length() {
    let n = Vector::new(10.0, 0.0).normalize();
    assert_eq!(n, Vector::RIGHT);
    let d = Vector::new(1.0, 1.0).normalize();
    assert!((d.len() - 1.0).abs() < 1e-12);
}

#[test]
fn normalize_zero_is_nan() {
    let n = Vector::ZERO.normalize();
    assert!(n.x.is_nan());
    assert!(n.y.is_nan());
}

#[test]
fn direction_constants_point_screen_space() {
    assert_eq!(Vector::UP.y, -1.0);
    assert_eq!(Vector::DOWN.y, 1.0);
    assert_eq!(Vector::LEFT.x, -1.0);
    assert_eq!(Vector::RIGHT.x, 1.0);
}

#[test]
fn rotate_quarter_turn() {
    let r = Vector::new(1.0, 0.0).rotate(std::f64::consts::FRAC_PI_2);
    assert!(r.x.abs() < 1e-12);
    assert!((r.y - 1.0).abs() < 1e-12);
}

#[test]
fn serde_shape_is_xy_object() {
    let json = serde_json::to_value(Vector::new(1.5, -2.0)).unwrap();
    assert_eq!(json, serde_json::json!({ "x": 1.5, "y": -2.0 }));
}
