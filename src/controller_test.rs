#![allow(clippy::float_cmp)]

use super::*;
use crate::shape::{ShapeKind, ShapeProps, Sprite, SpriteGrid, SpriteProps};

fn hero(y: f64) -> Shape {
    let props = SpriteProps {
        shape: ShapeProps::at(0.0, y),
        src: "hero.png".into(),
        sprite_grid: SpriteGrid { rows: 1, cols: 8 },
        pattern: Some(vec!["0:7".into()]),
        ..SpriteProps::default()
    };
    Shape::new(props.shape.clone(), ShapeKind::Sprite(Box::new(Sprite::new(&props))))
}

fn status() -> ControllerStatus {
    ControllerStatus {
        up: vec!["1".into()],
        down: vec!["2".into()],
        left: vec!["3".into()],
        right: vec!["4".into()],
        jump: vec!["5".into()],
        fall: vec!["6".into()],
        idle: vec!["7".into()],
    }
}

fn bound(shape: &Shape) -> Controller {
    let mut c = Controller::new(ControllerProps { status: status(), ..ControllerProps::default() }, Physics::default());
    c.bind(shape.id());
    c
}

// =============================================================
// Defaults
// =============================================================

#[test]
fn default_keys_and_patterns() {
    let props = ControllerProps::default();
    assert_eq!(props.keywords.up, "w");
    assert_eq!(props.keywords.jump, " ");
    assert_eq!(props.status.idle, vec!["0(10)".to_string()]);
    assert_eq!(props.speed, 1.0);
    assert_eq!(props.jump_force, 15.0);
}

// =============================================================
// State precedence
// =============================================================

#[test]
fn jump_beats_every_direction() {
    let mut shape = hero(100.0);
    let mut c = bound(&shape);
    for key in ["w", "s", "a", "d", " "] {
        c.key_down(key);
    }
    c.tick(0.0, Some(&mut shape));
    assert_eq!(c.state(), Some(ControllerState::Jump));
}

#[test]
fn direction_precedence_up_down_left_right() {
    let mut shape = hero(100.0);
    let mut c = bound(&shape);
    let mut now = 0.0;
    let mut step = |c: &mut Controller, shape: &mut Shape| {
        now += 16.0;
        c.tick(now, Some(shape));
        c.state()
    };

    c.key_down("d");
    assert_eq!(step(&mut c, &mut shape), Some(ControllerState::Right));
    c.key_down("a");
    assert_eq!(step(&mut c, &mut shape), Some(ControllerState::Left));
    c.key_down("s");
    assert_eq!(step(&mut c, &mut shape), Some(ControllerState::Down));
    c.key_down("w");
    assert_eq!(step(&mut c, &mut shape), Some(ControllerState::Up));
}

#[test]
fn no_keys_grounded_is_idle() {
    let mut shape = hero(100.0);
    let mut c = bound(&shape);
    c.tick(0.0, Some(&mut shape));
    assert_eq!(c.state(), Some(ControllerState::Idle));
    assert_eq!(shape.as_sprite().map(|s| s.frames().to_vec()), Some(vec![7]));
}

#[test]
fn unmapped_keys_are_ignored() {
    let mut shape = hero(100.0);
    let mut c = bound(&shape);
    c.key_down("x");
    c.tick(0.0, Some(&mut shape));
    assert_eq!(c.state(), Some(ControllerState::Idle));
}

#[test]
fn state_change_switches_pattern() {
    let mut shape = hero(100.0);
    let mut c = bound(&shape);
    c.key_down("d");
    c.tick(0.0, Some(&mut shape));
    assert_eq!(shape.as_sprite().map(|s| s.frames().to_vec()), Some(vec![4]));
}

// =============================================================
// Movement
// =============================================================

#[test]
fn diagonal_movement_is_normalized() {
    let mut shape = hero(100.0);
    let mut c = bound(&shape);
    c.speed = 2.0;
    c.key_down("d");
    c.key_down("s");
    c.tick(0.0, Some(&mut shape));
    let expected = 2.0 / 2.0_f64.sqrt();
    assert!((shape.position.x - expected).abs() < 1e-9);
    assert!((shape.position.y - (100.0 + expected)).abs() < 1e-9);
}

#[test]
fn opposite_keys_cancel_without_nan() {
    let mut shape = hero(100.0);
    let mut c = bound(&shape);
    c.key_down("a");
    c.key_down("d");
    c.tick(0.0, Some(&mut shape));
    assert_eq!(shape.position, Vector::new(0.0, 100.0));
}

// =============================================================
// Jump physics
// =============================================================

#[test]
fn jump_arc_returns_to_ground_with_state_sequence() {
    let mut shape = hero(200.0);
    let mut c = bound(&shape);
    let mut states = Vec::new();
    let mut now = 0.0;

    c.tick(now, Some(&mut shape));
    states.push(c.state());

    c.key_down(" ");
    now += 16.0;
    c.tick(now, Some(&mut shape));
    states.push(c.state());
    c.key_up(" ");

    let mut min_y = shape.position.y;
    for _ in 0..100 {
        now += 16.0;
        c.tick(now, Some(&mut shape));
        min_y = min_y.min(shape.position.y);
        if states.last() != Some(&c.state()) {
            states.push(c.state());
        }
    }

    assert!(min_y < 200.0);
    assert_eq!(shape.position.y, 200.0);
    assert!(c.is_grounded());
    assert_eq!(c.velocity(), Vector::ZERO);
    assert_eq!(
        states,
        vec![
            Some(ControllerState::Idle),
            Some(ControllerState::Jump),
            Some(ControllerState::Fall),
            Some(ControllerState::Idle),
        ]
    );
}

#[test]
fn never_rests_below_ground() {
    let mut shape = hero(50.0);
    let mut c = bound(&shape);
    c.key_down(" ");
    let mut now = 0.0;
    for _ in 0..500 {
        now += 16.0;
        c.tick(now, Some(&mut shape));
        assert!(shape.position.y <= 50.0);
        if c.is_grounded() {
            assert_eq!(shape.position.y, 50.0);
        }
    }
}

#[test]
fn jump_requires_ground() {
    let mut shape = hero(100.0);
    let mut c = bound(&shape);
    c.key_down(" ");
    c.tick(0.0, Some(&mut shape));
    assert_eq!(c.velocity(), Vector::new(0.0, -15.0));
    c.tick(1000.0, Some(&mut shape));
    // Gravity only; no second impulse mid-air.
    assert_eq!(c.velocity(), Vector::new(0.0, -15.0 + 0.9));
}

#[test]
fn cooldown_blocks_immediate_rejump() {
    let mut shape = hero(100.0);
    let physics = Physics { gravity: Vector::new(0.0, 100.0), jump_cooldown_ms: 250.0 };
    let mut c = Controller::new(ControllerProps::default(), physics);
    c.bind(shape.id());
    c.key_down(" ");
    c.tick(0.0, Some(&mut shape));
    // Heavy gravity lands it on the next tick.
    c.tick(16.0, Some(&mut shape));
    assert!(c.is_grounded());
    c.tick(32.0, Some(&mut shape));
    assert!(c.is_grounded());
    c.tick(260.0, Some(&mut shape));
    assert!(!c.is_grounded());
}

// =============================================================
// Binding
// =============================================================

#[test]
fn bind_resets_state() {
    let mut shape = hero(100.0);
    let mut c = bound(&shape);
    c.key_down(" ");
    c.tick(0.0, Some(&mut shape));
    assert!(!c.is_grounded());

    let other = hero(0.0);
    c.bind(other.id());
    assert_eq!(c.target(), Some(other.id()));
    assert!(c.is_grounded());
    assert_eq!(c.velocity(), Vector::ZERO);
    assert_eq!(c.state(), None);
}

#[test]
fn unbind_returns_target_and_resets() {
    let shape = hero(100.0);
    let mut c = bound(&shape);
    c.key_down("d");
    assert_eq!(c.unbind(), Some(shape.id()));
    assert_eq!(c.target(), None);
    assert_eq!(c.unbind(), None);
}

#[test]
fn tick_without_target_is_inert() {
    let mut c = Controller::new(ControllerProps::default(), Physics::default());
    c.key_down(" ");
    c.tick(0.0, None);
    assert!(c.is_grounded());
    assert_eq!(c.state(), None);
}

// =============================================================
// Raw data
// =============================================================

#[test]
fn raw_data_shape() {
    let c = Controller::new(ControllerProps::default(), Physics::default());
    let json = serde_json::to_value(c.raw_data()).unwrap();
    assert_eq!(json["type"], "controller");
    assert_eq!(json["jumpForce"], 15.0);
    assert_eq!(json["keywords"]["left"], "a");
    assert_eq!(json["status"]["fall"][0], "0(10)");
}

#[test]
fn raw_data_round_trip_keeps_id() {
    let mut c = Controller::new(ControllerProps::default(), Physics::default());
    c.speed = 3.0;
    let json = serde_json::to_string(&c.raw_data()).unwrap();
    let record: ControllerRecord = serde_json::from_str(&json).unwrap();
    let back = Controller::from_raw(record, Physics::default());
    assert_eq!(back.id(), c.id());
    assert_eq!(back.props(), c.props());
}
