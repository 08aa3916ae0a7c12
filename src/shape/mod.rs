//! Scene entities: common shape state plus a closed set of geometry kinds.
//!
//! Every shape shares identity, placement, flags and its own event provider
//! in [`Shape`]; geometry lives in [`ShapeKind`] and is dispatched by `match`.
//! Shapes are created through the render's [`Creator`](crate::creator::Creator)
//! so they are registered and announced; [`Shape::new`] alone builds an
//! unregistered value.


mod arrow;
mod circle;
pub mod pattern;
mod pointer;
mod rect;
mod sprite;

pub use arrow::{Arrow, ArrowProps};
pub use circle::{Circle, CircleProps};
pub use pattern::compile_pattern;
pub use pointer::{Pointer, PointerProps};
pub use rect::{Rect, RectProps};
pub use sprite::{AssetState, PlaybackChange, Sprite, SpriteGrid, SpriteProps};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clock::FrameContext;
use crate::events::{ListenerId, PointerPosition, ShapeEvent, ShapeEventKind, ShapeEvents};
use crate::scene::ShapeId;
use crate::surface::{DrawResult, Region, Surface};
use crate::transformer::TransformerId;
use crate::vector::Vector;
use crate::velocity::BodyVelocity;

/// Placement and flags shared by every shape kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShapeProps {
    pub position: Vector,
    pub z_index: i64,
    /// Radians.
    pub rotation: f64,
    /// Whether the shape may be dragged on its own.
    pub dragging: bool,
    pub visible: bool,
    pub mask: bool,
}

impl Default for ShapeProps {
    fn default() -> Self {
        Self { position: Vector::ZERO, z_index: 0, rotation: 0.0, dragging: true, visible: true, mask: false }
    }
}

impl ShapeProps {
    #[must_use]
    pub fn at(x: f64, y: f64) -> Self {
        Self { position: Vector::new(x, y), ..Self::default() }
    }
}

/// Kind-specific geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    Rect(Rect),
    Circle(Circle),
    Sprite(Box<Sprite>),
    Arrow(Arrow),
    Pointer(Pointer),
}

impl ShapeKind {
    /// Serialization discriminant.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Rect(_) => "rect",
            Self::Circle(_) => "circle",
            Self::Sprite(_) => "sprite",
            Self::Arrow(_) => "arrow",
            Self::Pointer(_) => "pointer",
        }
    }
}

#[derive(Debug)]
pub struct Shape {
    pub(crate) id: ShapeId,
    pub(crate) seq: u64,
    pub position: Vector,
    pub z_index: i64,
    pub rotation: f64,
    pub dragging: bool,
    pub visible: bool,
    pub mask: bool,
    /// Included in serialization. Off for collaborator pointers.
    pub persist: bool,
    pub kind: ShapeKind,
    pub(crate) body_velocity: Option<BodyVelocity>,
    pub(crate) selected_by: Option<TransformerId>,
    events: ShapeEvents,
}

impl Shape {
    /// Build an unregistered shape with a fresh id.
    #[must_use]
    pub fn new(props: ShapeProps, kind: ShapeKind) -> Self {
        let persist = !matches!(kind, ShapeKind::Pointer(_));
        Self {
            id: Uuid::new_v4(),
            seq: 0,
            position: props.position,
            z_index: props.z_index,
            rotation: props.rotation,
            dragging: props.dragging,
            visible: props.visible,
            mask: props.mask,
            persist,
            kind,
            body_velocity: None,
            selected_by: None,
            events: ShapeEvents::new(),
        }
    }

    /// Keep a known id, used when rebuilding from raw data.
    #[must_use]
    pub fn with_id(mut self, id: ShapeId) -> Self {
        self.id = id;
        self
    }

    #[must_use]
    pub fn id(&self) -> ShapeId {
        self.id
    }

    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    /// Snapshot of the shared placement and flags.
    #[must_use]
    pub fn props(&self) -> ShapeProps {
        ShapeProps {
            position: self.position,
            z_index: self.z_index,
            rotation: self.rotation,
            dragging: self.dragging,
            visible: self.visible,
            mask: self.mask,
        }
    }

    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.selected_by.is_some()
    }

    #[must_use]
    pub fn selected_by(&self) -> Option<TransformerId> {
        self.selected_by
    }

    #[must_use]
    pub fn body_velocity(&self) -> Option<&BodyVelocity> {
        self.body_velocity.as_ref()
    }

    // --- events ---

    pub fn on<F>(&mut self, kind: ShapeEventKind, callback: F) -> ListenerId
    where
        F: Fn(&ShapeEvent) + 'static,
    {
        self.events.on(kind, callback)
    }

    pub fn off(&mut self, kind: ShapeEventKind, id: ListenerId) -> bool {
        self.events.off(kind, id)
    }

    pub fn emit(&self, kind: ShapeEventKind, pointer: Option<PointerPosition>) {
        self.events.emit(kind, &ShapeEvent { target: self.id, pointer });
    }

    // --- kind access ---

    #[must_use]
    pub fn as_rect(&self) -> Option<&Rect> {
        match &self.kind {
            ShapeKind::Rect(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_rect_mut(&mut self) -> Option<&mut Rect> {
        match &mut self.kind {
            ShapeKind::Rect(r) => Some(r),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_circle(&self) -> Option<&Circle> {
        match &self.kind {
            ShapeKind::Circle(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_circle_mut(&mut self) -> Option<&mut Circle> {
        match &mut self.kind {
            ShapeKind::Circle(c) => Some(c),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_sprite(&self) -> Option<&Sprite> {
        match &self.kind {
            ShapeKind::Sprite(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sprite_mut(&mut self) -> Option<&mut Sprite> {
        match &mut self.kind {
            ShapeKind::Sprite(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_arrow(&self) -> Option<&Arrow> {
        match &self.kind {
            ShapeKind::Arrow(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_arrow_mut(&mut self) -> Option<&mut Arrow> {
        match &mut self.kind {
            ShapeKind::Arrow(a) => Some(a),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_pointer(&self) -> Option<&Pointer> {
        match &self.kind {
            ShapeKind::Pointer(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_pointer_mut(&mut self) -> Option<&mut Pointer> {
        match &mut self.kind {
            ShapeKind::Pointer(p) => Some(p),
            _ => None,
        }
    }

    // --- geometry ---

    /// Whether `point` (canvas-local) lies on the shape.
    #[must_use]
    pub fn is_clicked(&self, point: Vector) -> bool {
        match &self.kind {
            ShapeKind::Rect(r) => r.contains(self.position, self.rotation, point),
            ShapeKind::Circle(c) => c.contains(self.position, point),
            ShapeKind::Sprite(s) => {
                let local = local_point(self.position, self.rotation, point);
                local.x >= 0.0 && local.x <= s.width() && local.y >= 0.0 && local.y <= s.height()
            }
            ShapeKind::Arrow(a) => a.contains(self.position, point),
            ShapeKind::Pointer(_) => false,
        }
    }

    /// Whether the shape's bounding box touches `area`. Pointers never do.
    #[must_use]
    pub fn is_in_boundary(&self, area: &Region) -> bool {
        match &self.kind {
            ShapeKind::Pointer(_) => false,
            _ => self.bounds().intersects(area),
        }
    }

    /// Axis-aligned bounding box, ignoring rotation.
    #[must_use]
    pub fn bounds(&self) -> Region {
        match &self.kind {
            ShapeKind::Rect(r) => r.bounds(self.position),
            ShapeKind::Circle(c) => c.bounds(self.position),
            ShapeKind::Sprite(s) => s.bounds(self.position),
            ShapeKind::Arrow(a) => a.bounds(self.position),
            ShapeKind::Pointer(p) => p.bounds(self.position),
        }
    }

    /// Move by `delta`. An arrow's head travels with its tail.
    pub fn translate(&mut self, delta: Vector) {
        self.position = self.position.add(delta);
        if let ShapeKind::Arrow(a) = &mut self.kind {
            a.target = a.target.add(delta);
        }
    }

    // --- drawing ---

    /// Add the shape's silhouette to the current path.
    pub fn outline(&self, surface: &mut dyn Surface) -> DrawResult {
        match &self.kind {
            ShapeKind::Rect(r) => r.outline(self.position, surface),
            ShapeKind::Circle(c) => c.outline(self.position, surface)?,
            ShapeKind::Sprite(s) => surface.rect(s.bounds(self.position)),
            ShapeKind::Arrow(a) => a.outline(self.position, surface),
            ShapeKind::Pointer(p) => p.outline(self.position, surface),
        }
        Ok(())
    }

    pub fn draw(&mut self, frame: &FrameContext, surface: &mut dyn Surface) -> DrawResult {
        if !self.visible {
            return Ok(());
        }
        match &mut self.kind {
            ShapeKind::Rect(r) => r.draw(self.position, self.rotation, surface),
            ShapeKind::Circle(c) => c.draw(self.position, surface),
            ShapeKind::Sprite(s) => s.draw(self.position, self.rotation, frame, surface),
            ShapeKind::Arrow(a) => a.draw(self.position, surface),
            ShapeKind::Pointer(p) => p.draw(self.position, surface),
        }
    }

    /// Move by the attached body velocity, if any.
    pub fn step_velocity(&mut self) {
        if let Some(velocity) = self.body_velocity {
            let next = velocity.step(self.position);
            self.translate(next.sub(self.position));
        }
    }

    /// One tick: apply body velocity, then draw and advance animation.
    pub fn update(&mut self, frame: &FrameContext, surface: &mut dyn Surface) -> DrawResult {
        self.step_velocity();
        if let ShapeKind::Sprite(s) = &mut self.kind {
            let change = s.update(self.position, self.rotation, self.visible, frame, surface)?;
            if change == Some(PlaybackChange::Paused) {
                self.emit(ShapeEventKind::Pause, None);
            }
            return Ok(());
        }
        self.draw(frame, surface)
    }

    // --- playback ---

    /// Resume a sprite, optionally with a new pattern. Other kinds ignore it.
    pub fn play(&mut self, pattern: Option<Vec<String>>) -> bool {
        let Some(sprite) = self.as_sprite_mut() else {
            return false;
        };
        sprite.play(pattern);
        self.emit(ShapeEventKind::Play, None);
        true
    }

    pub fn pause(&mut self) -> bool {
        let Some(sprite) = self.as_sprite_mut() else {
            return false;
        };
        sprite.pause();
        self.emit(ShapeEventKind::Pause, None);
        true
    }

    /// Put a sprite back on the pattern it was built with.
    pub fn restore_pattern(&mut self) -> bool {
        let Some(sprite) = self.as_sprite_mut() else {
            return false;
        };
        sprite.restore_pattern();
        true
    }

    /// Unregistered copy with a fresh id and no velocity, controller or selection.
    #[must_use]
    pub(crate) fn duplicate(&self) -> Shape {
        let props = self.props();
        let kind = match &self.kind {
            ShapeKind::Sprite(s) => ShapeKind::Sprite(Box::new(s.duplicate(props.clone()))),
            other => other.clone(),
        };
        let mut copy = Shape::new(props, kind);
        copy.persist = self.persist;
        copy.dragging = true;
        copy
    }
}

/// `point` in the frame of a box anchored at `origin` and rotated by `rotation`.
pub(crate) fn local_point(origin: Vector, rotation: f64, point: Vector) -> Vector {
    let offset = point.sub(origin);
    if rotation == 0.0 {
        offset
    } else {
        offset.rotate(-rotation)
    }
}
