//! Multi-selection with group move and proportional corner resize.
//!
//! The transformer holds shape ids in selection order; the authoritative
//! membership lives here, and each selected shape caches the transformer id
//! in `selected_by`. Every operation takes the scene explicitly because the
//! render owns the shapes.

#[cfg(test)]
#[path = "transformer_test.rs"]
mod transformer_test;

use uuid::Uuid;

use crate::consts::{HANDLE_SIZE, MIN_RESIZE, TRANSFORMER_PADDING};
use crate::events::{ShapeEventKind, Target};
use crate::input::{Key, Modifiers};
use crate::scene::{Scene, ShapeId};
use crate::shape::{Shape, ShapeKind};
use crate::surface::{DrawResult, Region, Surface};
use crate::vector::Vector;

pub type TransformerId = Uuid;

const CHROME_COLOR: &str = "red";

/// A resize handle at one corner of the padded selection box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [Corner::TopLeft, Corner::TopRight, Corner::BottomLeft, Corner::BottomRight];

    /// The corner's point on `area`.
    #[must_use]
    pub fn point(self, area: &Region) -> Vector {
        match self {
            Self::TopLeft => Vector::new(area.x, area.y),
            Self::TopRight => Vector::new(area.x + area.width, area.y),
            Self::BottomLeft => Vector::new(area.x, area.y + area.height),
            Self::BottomRight => Vector::new(area.x + area.width, area.y + area.height),
        }
    }

    /// Box produced by dragging this corner of `initial` by `delta`.
    #[must_use]
    pub fn resize(self, initial: &Region, delta: Vector) -> Region {
        let Region { x, y, width, height } = *initial;
        match self {
            Self::BottomRight => Region::new(x, y, width + delta.x, height + delta.y),
            Self::BottomLeft => Region::new(x + delta.x, y, width - delta.x, height + delta.y),
            Self::TopRight => Region::new(x, y + delta.y, width + delta.x, height - delta.y),
            Self::TopLeft => Region::new(x + delta.x, y + delta.y, width - delta.x, height - delta.y),
        }
    }
}

/// Keyboard actions on the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    Duplicate,
    ToggleMask,
    ToggleHover,
    Delete,
}

impl Shortcut {
    /// Map a key press to a shortcut. Letters need Ctrl or Meta; `Delete`
    /// works alone and `Backspace` needs Ctrl or Meta.
    #[must_use]
    pub fn from_key(key: &Key, modifiers: Modifiers) -> Option<Self> {
        let command = modifiers.command();
        match key.0.as_str() {
            "Delete" => Some(Self::Delete),
            "Backspace" if command => Some(Self::Delete),
            k if command && k.eq_ignore_ascii_case("d") => Some(Self::Duplicate),
            k if command && k.eq_ignore_ascii_case("m") => Some(Self::ToggleMask),
            k if command && k.eq_ignore_ascii_case("h") => Some(Self::ToggleHover),
            _ => None,
        }
    }
}

/// Geometry tuning for the selection chrome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformerSettings {
    pub padding: f64,
    pub handle_size: f64,
    pub min_size: f64,
}

impl Default for TransformerSettings {
    fn default() -> Self {
        Self { padding: TRANSFORMER_PADDING, handle_size: HANDLE_SIZE, min_size: MIN_RESIZE }
    }
}

/// Size-relevant state of one node captured when a resize starts.
#[derive(Debug, Clone, Copy, PartialEq)]
enum SizeSnapshot {
    Rect { width: f64, height: f64 },
    Circle { radius: f64 },
    Sprite { scale: f64 },
    Arrow { target: Vector },
    Fixed,
}

impl SizeSnapshot {
    fn of(shape: &Shape) -> Self {
        match &shape.kind {
            ShapeKind::Rect(r) => Self::Rect { width: r.width, height: r.height },
            ShapeKind::Circle(c) => Self::Circle { radius: c.radius },
            ShapeKind::Sprite(s) => Self::Sprite { scale: s.scale() },
            ShapeKind::Arrow(a) => Self::Arrow { target: a.target },
            ShapeKind::Pointer(_) => Self::Fixed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct NodeSnapshot {
    id: ShapeId,
    position: Vector,
    size: SizeSnapshot,
}

#[derive(Debug, Clone, PartialEq)]
enum Session {
    Idle,
    Moving { last: Vector },
    Resizing { corner: Corner, start: Vector, initial: Region, nodes: Vec<NodeSnapshot> },
}

#[derive(Debug, Clone)]
pub struct Transformer {
    id: TransformerId,
    nodes: Vec<ShapeId>,
    settings: TransformerSettings,
    session: Session,
    just_finished_drag: bool,
}

impl Transformer {
    #[must_use]
    pub fn new(settings: TransformerSettings) -> Self {
        Self { id: Uuid::new_v4(), nodes: Vec::new(), settings, session: Session::Idle, just_finished_drag: false }
    }

    #[must_use]
    pub fn id(&self) -> TransformerId {
        self.id
    }

    /// Selected ids in selection order.
    #[must_use]
    pub fn nodes(&self) -> &[ShapeId] {
        &self.nodes
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: ShapeId) -> bool {
        self.nodes.contains(&id)
    }

    #[must_use]
    pub fn settings(&self) -> TransformerSettings {
        self.settings
    }

    /// Whether a move or resize session is running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.session != Session::Idle
    }

    // --- membership ---

    /// Select `id`. The shape stops dragging on its own and fires `select`.
    pub fn add(&mut self, scene: &mut Scene, id: ShapeId) -> bool {
        if self.contains(id) {
            return false;
        }
        let Some(shape) = scene.get_mut(&id) else {
            return false;
        };
        shape.dragging = false;
        shape.selected_by = Some(self.id);
        self.nodes.push(id);
        shape.emit(ShapeEventKind::Select, None);
        true
    }

    /// Deselect `id`. The shape may drag on its own again and fires `deselect`.
    pub fn remove(&mut self, scene: &mut Scene, id: ShapeId) -> bool {
        let before = self.nodes.len();
        self.nodes.retain(|n| *n != id);
        if self.nodes.len() == before {
            return false;
        }
        if let Some(shape) = scene.get_mut(&id) {
            release(shape);
        }
        true
    }

    pub fn clear(&mut self, scene: &mut Scene) {
        for id in std::mem::take(&mut self.nodes) {
            if let Some(shape) = scene.get_mut(&id) {
                release(shape);
            }
        }
        self.session = Session::Idle;
    }

    /// Replace the selection wholesale.
    pub fn set_nodes(&mut self, scene: &mut Scene, ids: &[ShapeId]) {
        self.clear(scene);
        for id in ids {
            self.add(scene, *id);
        }
    }

    /// Drop a shape that has already left the scene.
    pub(crate) fn forget(&mut self, id: ShapeId) {
        self.nodes.retain(|n| *n != id);
        if let Session::Resizing { nodes, .. } = &mut self.session {
            nodes.retain(|n| n.id != id);
        }
    }

    // --- geometry ---

    /// Union of the selected shapes' bounds.
    #[must_use]
    pub fn bounding_box(&self, scene: &Scene) -> Option<Region> {
        let mut boxes = self.nodes.iter().filter_map(|id| scene.get(id)).map(Shape::bounds);
        let first = boxes.next()?;
        let (mut min_x, mut min_y) = (first.x, first.y);
        let (mut max_x, mut max_y) = (first.x + first.width, first.y + first.height);
        for b in boxes {
            min_x = min_x.min(b.x);
            min_y = min_y.min(b.y);
            max_x = max_x.max(b.x + b.width);
            max_y = max_y.max(b.y + b.height);
        }
        Some(Region::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }

    /// The padded box the chrome is drawn around.
    #[must_use]
    pub fn chrome(&self, scene: &Scene) -> Option<Region> {
        self.bounding_box(scene).map(|b| b.padded(self.settings.padding))
    }

    /// Square hit area of each corner handle.
    #[must_use]
    pub fn handles(&self, scene: &Scene) -> Vec<(Corner, Region)> {
        let Some(chrome) = self.chrome(scene) else {
            return Vec::new();
        };
        let size = self.settings.handle_size;
        Corner::ALL
            .iter()
            .map(|&corner| {
                let p = corner.point(&chrome);
                (corner, Region::new(p.x - size / 2.0, p.y - size / 2.0, size, size))
            })
            .collect()
    }

    #[must_use]
    pub fn handle_at(&self, scene: &Scene, point: Vector) -> Option<Corner> {
        self.handles(scene)
            .into_iter()
            .find(|(_, area)| area.contains(point))
            .map(|(corner, _)| corner)
    }

    // --- pointer ---

    /// Pointer pressed at `point` over `target`. Returns true when the
    /// transformer takes the gesture (resize, move, or selecting a shape).
    pub fn pointer_down(&mut self, scene: &mut Scene, point: Vector, target: Target, shift: bool) -> bool {
        if let Some(corner) = self.handle_at(scene, point) {
            if let Some(initial) = self.bounding_box(scene) {
                let nodes = self
                    .nodes
                    .iter()
                    .filter_map(|id| scene.get(id))
                    .map(|s| NodeSnapshot { id: s.id(), position: s.position, size: SizeSnapshot::of(s) })
                    .collect();
                self.session = Session::Resizing { corner, start: point, initial, nodes };
                return true;
            }
        }

        match target {
            Target::Shape(id) => {
                if !self.contains(id) {
                    if !shift {
                        self.clear(scene);
                    }
                    self.add(scene, id);
                }
                self.session = Session::Moving { last: point };
                true
            }
            Target::Render => {
                let inside = self.chrome(scene).is_some_and(|c| c.contains(point));
                if inside {
                    self.session = Session::Moving { last: point };
                }
                inside
            }
        }
    }

    /// Pointer moved to `point`. Returns true while a session is running.
    pub fn pointer_move(&mut self, scene: &mut Scene, point: Vector) -> bool {
        match &mut self.session {
            Session::Idle => false,
            Session::Moving { last } => {
                let delta = point.sub(*last);
                *last = point;
                for id in &self.nodes {
                    if let Some(shape) = scene.get_mut(id) {
                        shape.translate(delta);
                    }
                }
                true
            }
            Session::Resizing { corner, start, initial, nodes } => {
                let next = corner.resize(initial, point.sub(*start));
                apply_resize(scene, initial, &next, nodes, self.settings.min_size);
                true
            }
        }
    }

    /// Pointer released. Ends a session and swallows the click that follows.
    pub fn pointer_up(&mut self) -> bool {
        if self.session == Session::Idle {
            return false;
        }
        self.session = Session::Idle;
        self.just_finished_drag = true;
        true
    }

    /// Click resolved to `target`. A pending rubber-band selection replaces
    /// the current one; otherwise empty canvas clears and a shape is added,
    /// both preserving the selection while shift is held.
    pub fn click(&mut self, scene: &mut Scene, target: Target, shift: bool, pending: Option<Vec<ShapeId>>) {
        if self.just_finished_drag {
            self.just_finished_drag = false;
            return;
        }
        if let Some(ids) = pending {
            self.set_nodes(scene, &ids);
            return;
        }
        if !shift {
            self.clear(scene);
        }
        if let Target::Shape(id) = target {
            self.add(scene, id);
        }
    }

    /// Shortcut for `key` when something is selected.
    #[must_use]
    pub fn shortcut(&self, key: &Key, modifiers: Modifiers) -> Option<Shortcut> {
        if self.is_empty() {
            return None;
        }
        Shortcut::from_key(key, modifiers)
    }

    // --- drawing ---

    pub fn draw(&self, scene: &Scene, surface: &mut dyn Surface) -> DrawResult {
        let Some(chrome) = self.chrome(scene) else {
            return Ok(());
        };
        surface.begin_path();
        surface.rect(chrome);
        surface.set_stroke_style(CHROME_COLOR);
        surface.set_line_width(2.0);
        surface.stroke();

        for (_, handle) in self.handles(scene) {
            surface.begin_path();
            surface.rect(handle);
            surface.set_fill_style(CHROME_COLOR);
            surface.fill();
            surface.close_path();
        }
        Ok(())
    }
}

fn release(shape: &mut Shape) {
    shape.dragging = true;
    shape.selected_by = None;
    shape.emit(ShapeEventKind::Deselect, None);
}

/// Fit every node into `next`, keeping its fractional place in `initial`.
/// A box under `min_size` on either axis is rejected and nothing moves.
fn apply_resize(scene: &mut Scene, initial: &Region, next: &Region, nodes: &[NodeSnapshot], min_size: f64) {
    if next.width < min_size || next.height < min_size {
        tracing::trace!(width = next.width, height = next.height, "resize rejected below minimum size");
        return;
    }
    let sx = if initial.width > 0.0 { next.width / initial.width } else { 1.0 };
    let sy = if initial.height > 0.0 { next.height / initial.height } else { 1.0 };
    let uniform = sx.min(sy);
    let fit = |p: Vector| Vector::new(next.x + (p.x - initial.x) * sx, next.y + (p.y - initial.y) * sy);

    for node in nodes {
        let Some(shape) = scene.get_mut(&node.id) else {
            continue;
        };
        shape.position = fit(node.position);
        match (&mut shape.kind, node.size) {
            (ShapeKind::Rect(r), SizeSnapshot::Rect { width, height }) => {
                r.width = width * sx;
                r.height = height * sy;
            }
            (ShapeKind::Circle(c), SizeSnapshot::Circle { radius }) => c.radius = radius * uniform,
            (ShapeKind::Sprite(s), SizeSnapshot::Sprite { scale }) => s.set_scale(scale * uniform),
            (ShapeKind::Arrow(a), SizeSnapshot::Arrow { target }) => a.target = fit(target),
            _ => {}
        }
    }
}
