//! Keyboard-driven movement, jump physics and animation state for one shape.
//!
//! A controller lives in the render's registry and is attached to a sprite
//! through its shape manager. Each tick it integrates jump physics, applies
//! directional movement from held keys and, when the logical state changes,
//! switches the target to that state's frame pattern.
//!
//! State precedence, highest first:
//!
//! 1. a held key: `jump > up > down > left > right`;
//! 2. airborne: `jump` while rising, `fall` otherwise;
//! 3. `idle`.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{GRAVITY, JUMP_COOLDOWN_MS, JUMP_FORCE};
use crate::scene::ShapeId;
use crate::shape::Shape;
use crate::vector::Vector;

pub type ControllerId = Uuid;

/// Key identifiers (as reported by the browser's `KeyboardEvent.key`) per action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerKeys {
    pub up: String,
    pub down: String,
    pub left: String,
    pub right: String,
    pub jump: String,
}

impl Default for ControllerKeys {
    fn default() -> Self {
        Self { up: "w".into(), down: "s".into(), left: "a".into(), right: "d".into(), jump: " ".into() }
    }
}

fn hold_pose() -> Vec<String> {
    vec!["0(10)".into()]
}

/// Frame pattern played in each logical state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerStatus {
    pub up: Vec<String>,
    pub down: Vec<String>,
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub jump: Vec<String>,
    pub fall: Vec<String>,
    pub idle: Vec<String>,
}

impl Default for ControllerStatus {
    fn default() -> Self {
        Self {
            up: hold_pose(),
            down: hold_pose(),
            left: hold_pose(),
            right: hold_pose(),
            jump: hold_pose(),
            fall: hold_pose(),
            idle: hold_pose(),
        }
    }
}

impl ControllerStatus {
    #[must_use]
    pub fn pattern(&self, state: ControllerState) -> &[String] {
        match state {
            ControllerState::Idle => &self.idle,
            ControllerState::Up => &self.up,
            ControllerState::Down => &self.down,
            ControllerState::Left => &self.left,
            ControllerState::Right => &self.right,
            ControllerState::Jump => &self.jump,
            ControllerState::Fall => &self.fall,
        }
    }
}

/// Logical animation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerState {
    Idle,
    Up,
    Down,
    Left,
    Right,
    Jump,
    Fall,
}

/// Construction options for a controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ControllerProps {
    pub keywords: ControllerKeys,
    pub status: ControllerStatus,
    pub speed: f64,
    pub jump_force: f64,
}

impl Default for ControllerProps {
    fn default() -> Self {
        Self {
            keywords: ControllerKeys::default(),
            status: ControllerStatus::default(),
            speed: 1.0,
            jump_force: JUMP_FORCE,
        }
    }
}

/// Physics tuning shared by every controller of a render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Physics {
    pub gravity: Vector,
    pub jump_cooldown_ms: f64,
}

impl Default for Physics {
    fn default() -> Self {
        Self { gravity: Vector::new(0.0, GRAVITY), jump_cooldown_ms: JUMP_COOLDOWN_MS }
    }
}

#[derive(Debug, Clone)]
pub struct Controller {
    id: ControllerId,
    pub keywords: ControllerKeys,
    pub status: ControllerStatus,
    pub speed: f64,
    pub jump_force: f64,
    physics: Physics,

    target: Option<ShapeId>,
    held: HashSet<String>,
    state: Option<ControllerState>,
    velocity: Vector,
    grounded: bool,
    ground_y: f64,
    last_jump: Option<f64>,
}

impl Controller {
    #[must_use]
    pub fn new(props: ControllerProps, physics: Physics) -> Self {
        Self {
            id: Uuid::new_v4(),
            keywords: props.keywords,
            status: props.status,
            speed: props.speed,
            jump_force: props.jump_force,
            physics,
            target: None,
            held: HashSet::new(),
            state: None,
            velocity: Vector::ZERO,
            grounded: true,
            ground_y: 0.0,
            last_jump: None,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: ControllerId) -> Self {
        self.id = id;
        self
    }

    #[must_use]
    pub fn id(&self) -> ControllerId {
        self.id
    }

    #[must_use]
    pub fn props(&self) -> ControllerProps {
        ControllerProps {
            keywords: self.keywords.clone(),
            status: self.status.clone(),
            speed: self.speed,
            jump_force: self.jump_force,
        }
    }

    #[must_use]
    pub fn target(&self) -> Option<ShapeId> {
        self.target
    }

    /// Current logical state; `None` until the first tick after binding.
    #[must_use]
    pub fn state(&self) -> Option<ControllerState> {
        self.state
    }

    #[must_use]
    pub fn velocity(&self) -> Vector {
        self.velocity
    }

    #[must_use]
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Y the target lands back on after a jump.
    #[must_use]
    pub fn ground_y(&self) -> f64 {
        self.ground_y
    }

    /// Attach to `shape`, replacing any previous target and resetting all
    /// input and physics state.
    pub fn bind(&mut self, shape: ShapeId) {
        self.target = Some(shape);
        self.reset();
    }

    /// Detach and reset. Returns the former target so the caller can restore
    /// its own animation pattern.
    pub fn unbind(&mut self) -> Option<ShapeId> {
        self.reset();
        self.target.take()
    }

    fn reset(&mut self) {
        self.held.clear();
        self.state = None;
        self.velocity = Vector::ZERO;
        self.grounded = true;
        self.last_jump = None;
    }

    pub fn key_down(&mut self, key: &str) {
        self.held.insert(key.to_string());
    }

    pub fn key_up(&mut self, key: &str) {
        self.held.remove(key);
    }

    fn is_held(&self, key: &str) -> bool {
        self.held.contains(key)
    }

    /// Highest-precedence held action, if any.
    fn held_state(&self) -> Option<ControllerState> {
        let k = &self.keywords;
        [
            (&k.jump, ControllerState::Jump),
            (&k.up, ControllerState::Up),
            (&k.down, ControllerState::Down),
            (&k.left, ControllerState::Left),
            (&k.right, ControllerState::Right),
        ]
        .into_iter()
        .find(|(key, _)| self.is_held(key))
        .map(|(_, state)| state)
    }

    fn movement(&self) -> Vector {
        let k = &self.keywords;
        [(&k.up, Vector::UP), (&k.down, Vector::DOWN), (&k.left, Vector::LEFT), (&k.right, Vector::RIGHT)]
            .into_iter()
            .filter(|(key, _)| self.is_held(key))
            .fold(Vector::ZERO, |acc, (_, dir)| acc.add(dir))
    }

    fn next_state(&self) -> ControllerState {
        if let Some(state) = self.held_state() {
            return state;
        }
        if self.grounded {
            ControllerState::Idle
        } else if self.velocity.y < 0.0 {
            ControllerState::Jump
        } else {
            ControllerState::Fall
        }
    }

    /// Advance one tick at host time `now` (milliseconds). `target` is the
    /// bound shape looked up by the caller; without one the tick is inert.
    pub fn tick(&mut self, now: f64, target: Option<&mut Shape>) {
        let Some(shape) = target else {
            return;
        };

        self.step_physics(shape);

        let jump_ready = self.last_jump.is_none_or(|t| now - t >= self.physics.jump_cooldown_ms);
        if self.is_held(&self.keywords.jump) && self.grounded && jump_ready {
            self.ground_y = shape.position.y;
            self.grounded = false;
            self.velocity = Vector::new(0.0, -self.jump_force);
            self.last_jump = Some(now);
        }

        let state = self.next_state();
        if self.state != Some(state) {
            self.state = Some(state);
            shape.play(Some(self.status.pattern(state).to_vec()));
        }

        let movement = self.movement();
        if !movement.is_zero() {
            shape.translate(movement.normalize().scale(self.speed));
        }
    }

    fn step_physics(&mut self, shape: &mut Shape) {
        if self.grounded {
            self.velocity = Vector::ZERO;
            return;
        }
        self.velocity = self.velocity.add(self.physics.gravity);
        shape.translate(self.velocity);
        if shape.position.y >= self.ground_y {
            shape.position.y = self.ground_y;
            self.velocity = Vector::ZERO;
            self.grounded = true;
        }
    }
}

/// Serialized controller, embedded in its sprite's record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllerRecord {
    pub id: ControllerId,
    #[serde(rename = "type")]
    pub kind: ControllerTag,
    #[serde(flatten)]
    pub props: ControllerProps,
}

/// Discriminant of a [`ControllerRecord`]; always `"controller"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControllerTag {
    #[default]
    Controller,
}

impl Controller {
    #[must_use]
    pub fn raw_data(&self) -> ControllerRecord {
        ControllerRecord { id: self.id, kind: ControllerTag::Controller, props: self.props() }
    }

    #[must_use]
    pub fn from_raw(record: ControllerRecord, physics: Physics) -> Self {
        Self::new(record.props, physics).with_id(record.id)
    }
}
