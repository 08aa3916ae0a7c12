//! Input model: pointer kinds, modifier keys, keys, and the gesture state machine.
//!
//! `Modifiers` and `Key` capture what the host reported with an event.
//! `InputState` is the render's own gesture tracked between pointer-down and
//! pointer-up, carrying the context needed to compute deltas and to finish
//! the gesture on release. Transformer sessions are tracked by the
//! transformer itself.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::scene::ShapeId;
use crate::vector::Vector;

/// Which device produced a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerKind {
    #[default]
    Mouse,
    Touch,
}

/// Keyboard modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl or Meta: the platform command modifier.
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// A keyboard key as reported by the browser (e.g. `"Delete"`, `"d"`, `" "`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Gesture in progress on the render.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A single shape is being dragged on its own.
    DraggingShape {
        /// Id of the shape being dragged.
        id: ShapeId,
        /// Canvas-local pointer position at the previous event.
        last: Vector,
    },
    /// A rubber-band rectangle is being dragged over empty canvas.
    Selecting {
        /// Canvas-local corner where the drag started.
        anchor: Vector,
    },
    /// A transformer move or resize session owns the gesture.
    Transforming,
}

impl InputState {
    /// Shape held by an individual drag, if any.
    #[must_use]
    pub fn dragged(&self) -> Option<ShapeId> {
        match self {
            Self::DraggingShape { id, .. } => Some(*id),
            _ => None,
        }
    }
}
