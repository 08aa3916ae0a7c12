//! Render: the scene container, its input handling and its frame loop.
//!
//! ARCHITECTURE
//! ============
//! `Render` owns every live shape, the optional transformer, the controller
//! registry and all transient gesture state. It has no browser dependency so
//! the whole engine runs headless in tests; the `web` module wraps it around
//! a real `<canvas>` and feeds it DOM events and animation frames.
//!
//! Input arrives in page coordinates. The render subtracts the canvas origin
//! to get canvas-local points, hit-tests them against the scene (highest
//! `z_index` first, latest insertion on ties) and routes the gesture to an
//! individual drag, the transformer or the rubber band before emitting the
//! render-level event.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::collections::HashMap;

use serde_json::Value;

use crate::clock::{FpsCounter, FrameClock};
use crate::collab::{Collab, CollabTransport, Collaborator, PointerMessage};
use crate::config::EngineConfig;
use crate::controller::{Controller, ControllerId};
use crate::creator::Creator;
use crate::error::{EngineError, ErrorCode};
use crate::events::{
    ListenerId, PointerEvent, PointerPosition, RenderEvent, RenderEventKind, RenderEvents, ShapeEventKind, Target,
};
use crate::hit::{hit_test, shapes_in};
use crate::input::{InputState, Key, Modifiers, PointerKind};
use crate::manager::{RenderManager, ShapeManager};
use crate::raw::ShapeRecord;
use crate::render::{self, Overlay};
use crate::scene::{Scene, ShapeId};
use crate::shape::{AssetState, Rect, RectProps, Shape, ShapeKind, ShapeProps, Sprite};
use crate::storage::SceneStore;
use crate::surface::{DrawResult, Region, Surface};
use crate::transformer::{Shortcut, Transformer};
use crate::vector::Vector;

const BAND_FILL: &str = "rgba(0, 120, 215, 0.2)";
const BAND_BORDER: &str = "rgba(0, 120, 215, 0.8)";

/// A record that could not be restored.
#[derive(Debug)]
pub struct RecordFailure {
    /// Position of the record in the input batch.
    pub index: usize,
    pub error: EngineError,
}

/// Outcome of [`Render::deserialize`]. Each record succeeds or fails on its own.
#[derive(Debug, Default)]
pub struct DeserializeReport {
    pub applied: Vec<ShapeId>,
    pub failed: Vec<RecordFailure>,
}

impl DeserializeReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Debug)]
pub struct Render {
    pub(crate) config: EngineConfig,
    pub(crate) scene: Scene,
    pub(crate) transformer: Option<Transformer>,
    pub(crate) controllers: HashMap<ControllerId, Controller>,
    pub(crate) collab: Collab,
    pub(crate) input: InputState,
    events: RenderEvents,

    width: f64,
    height: f64,
    origin: Vector,
    pointer: PointerPosition,
    target: Target,
    touch_inside: bool,
    swallow_click: bool,

    selection_enabled: bool,
    selection_band: Option<Shape>,
    pending_selection: Option<Vec<ShapeId>>,

    fps: FpsCounter,
    clock: FrameClock,
    running: bool,
    asset_requests: Vec<String>,
}

impl Default for Render {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Render {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            scene: Scene::new(),
            transformer: None,
            controllers: HashMap::new(),
            collab: Collab::new(),
            input: InputState::Idle,
            events: RenderEvents::new(),
            width: 0.0,
            height: 0.0,
            origin: Vector::ZERO,
            pointer: PointerPosition::default(),
            target: Target::Render,
            touch_inside: false,
            swallow_click: false,
            selection_enabled: config.selection_enabled,
            selection_band: None,
            pending_selection: None,
            fps: FpsCounter::new(),
            clock: FrameClock::new(config.frame_duration_ms),
            running: false,
            asset_requests: Vec::new(),
            config,
        }
    }

    // --- factories ---

    pub fn creator(&mut self) -> Creator<'_> {
        Creator::new(self)
    }

    pub fn manager(&mut self) -> RenderManager<'_> {
        RenderManager::new(self)
    }

    pub fn shape_manager(&mut self, id: ShapeId) -> ShapeManager<'_> {
        ShapeManager::new(self, id)
    }

    // --- accessors ---

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[must_use]
    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.scene.get(&id)
    }

    pub fn shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.scene.get_mut(&id)
    }

    /// [`shape`](Self::shape) for callers that treat an unknown id as an error.
    pub fn try_shape(&self, id: ShapeId) -> Result<&Shape, EngineError> {
        self.scene.get(&id).ok_or(EngineError::ShapeNotFound(id))
    }

    #[must_use]
    pub fn transformer(&self) -> Option<&Transformer> {
        self.transformer.as_ref()
    }

    /// The transformer together with the scene its operations act on.
    pub fn transformer_mut(&mut self) -> Option<(&mut Transformer, &mut Scene)> {
        self.transformer.as_mut().map(|t| (t, &mut self.scene))
    }

    #[must_use]
    pub fn controller(&self, id: ControllerId) -> Option<&Controller> {
        self.controllers.get(&id)
    }

    pub fn controller_mut(&mut self, id: ControllerId) -> Option<&mut Controller> {
        self.controllers.get_mut(&id)
    }

    #[must_use]
    pub fn controller_count(&self) -> usize {
        self.controllers.len()
    }

    /// Last pointer position seen by any input handler.
    #[must_use]
    pub fn pointer(&self) -> PointerPosition {
        self.pointer
    }

    /// What the last pointer-down or click resolved to.
    #[must_use]
    pub fn target(&self) -> Target {
        self.target
    }

    #[must_use]
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Rubber-band result waiting for the next click.
    #[must_use]
    pub fn pending_selection(&self) -> Option<&[ShapeId]> {
        self.pending_selection.as_deref()
    }

    /// The transient rubber-band rectangle, never part of the scene.
    #[must_use]
    pub fn selection_band(&self) -> Option<&Shape> {
        self.selection_band.as_ref()
    }

    #[must_use]
    pub fn fps(&self) -> u32 {
        self.fps.fps()
    }

    #[must_use]
    pub fn collab(&self) -> &Collab {
        &self.collab
    }

    // --- viewport ---

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
    }

    #[must_use]
    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Page position of the canvas's top-left corner.
    pub fn set_canvas_origin(&mut self, origin: Vector) {
        self.origin = origin;
    }

    #[must_use]
    pub fn origin(&self) -> Vector {
        self.origin
    }

    fn viewport(&self) -> Region {
        Region::new(0.0, 0.0, self.width, self.height)
    }

    /// Record `page` as the current pointer and return it canvas-local.
    fn locate(&mut self, page: Vector) -> Vector {
        let relative = page.sub(self.origin);
        self.pointer = PointerPosition { absolute: page, relative };
        relative
    }

    // --- events ---

    pub fn on<F>(&mut self, kind: RenderEventKind, callback: F) -> ListenerId
    where
        F: Fn(&RenderEvent) + 'static,
    {
        self.events.on(kind, callback)
    }

    pub fn off(&mut self, kind: RenderEventKind, id: ListenerId) -> bool {
        self.events.off(kind, id)
    }

    fn emit_pointer(&self, kind: RenderEventKind) {
        let payload = RenderEvent::Pointer(PointerEvent { pointer: self.pointer, target: self.target });
        self.events.emit(kind, &payload);
    }

    // --- pointer input ---

    pub fn pointer_move(&mut self, kind: PointerKind, page: Vector) {
        let point = self.locate(page);
        let pointer = self.pointer;

        match &mut self.input {
            InputState::Idle => {}
            InputState::DraggingShape { id, last } => {
                let delta = point.sub(*last);
                *last = point;
                if let Some(shape) = self.scene.get_mut(id) {
                    shape.translate(delta);
                    shape.emit(ShapeEventKind::Drag, Some(pointer));
                }
                if !delta.is_zero() {
                    self.swallow_click = true;
                }
            }
            InputState::Selecting { anchor } => {
                let area = Region::from_corners(*anchor, point);
                if let Some(band) = self.selection_band.as_mut() {
                    fit_band(band, area);
                }
            }
            InputState::Transforming => {
                if let Some(transformer) = self.transformer.as_mut() {
                    transformer.pointer_move(&mut self.scene, point);
                }
            }
        }

        self.aim_hover(point);
        self.collab.broadcast(pointer);
        self.emit_pointer(match kind {
            PointerKind::Mouse => RenderEventKind::MouseMove,
            PointerKind::Touch => RenderEventKind::TouchMove,
        });
    }

    pub fn pointer_down(&mut self, kind: PointerKind, page: Vector, modifiers: Modifiers) {
        let point = self.locate(page);
        self.target = hit_test(&self.scene, point);
        self.swallow_click = false;
        if kind == PointerKind::Touch {
            self.touch_inside = self.viewport().contains(point);
        }
        self.input = self.begin_gesture(point, modifiers.shift);
        self.emit_pointer(match kind {
            PointerKind::Mouse => RenderEventKind::MouseDown,
            PointerKind::Touch => RenderEventKind::TouchStart,
        });
    }

    /// Pick who owns the gesture: a resize handle, an individual drag, the
    /// transformer, or a rubber band over empty canvas.
    fn begin_gesture(&mut self, point: Vector, shift: bool) -> InputState {
        let target = self.target;

        if let Some(transformer) = self.transformer.as_mut() {
            if transformer.handle_at(&self.scene, point).is_some() {
                transformer.pointer_down(&mut self.scene, point, target, shift);
                return InputState::Transforming;
            }
        }

        if let Target::Shape(id) = target {
            if let Some(shape) = self.scene.get(&id).filter(|s| s.dragging && !s.is_selected()) {
                shape.emit(ShapeEventKind::DragStart, Some(self.pointer));
                return InputState::DraggingShape { id, last: point };
            }
        }

        if let Some(transformer) = self.transformer.as_mut() {
            if transformer.pointer_down(&mut self.scene, point, target, shift) {
                return InputState::Transforming;
            }
        }

        if target == Target::Render && self.selection_enabled && self.viewport().contains(point) {
            self.selection_band = Some(band_at(point));
            return InputState::Selecting { anchor: point };
        }
        InputState::Idle
    }

    pub fn pointer_up(&mut self, kind: PointerKind, page: Vector) {
        let point = self.locate(page);

        match std::mem::take(&mut self.input) {
            InputState::Idle => {}
            InputState::DraggingShape { id, .. } => {
                if let Some(shape) = self.scene.get(&id) {
                    shape.emit(ShapeEventKind::DragEnd, Some(self.pointer));
                }
            }
            InputState::Selecting { anchor } => self.finish_band(anchor, point),
            InputState::Transforming => {
                if let Some(transformer) = self.transformer.as_mut() {
                    transformer.pointer_up();
                }
            }
        }

        match kind {
            PointerKind::Mouse => self.emit_pointer(RenderEventKind::MouseUp),
            PointerKind::Touch => {
                self.emit_pointer(RenderEventKind::TouchEnd);
                if std::mem::take(&mut self.touch_inside) {
                    self.emit_pointer(RenderEventKind::Touch);
                }
            }
        }
    }

    /// A band that never moved is a plain click and leaves nothing pending.
    fn finish_band(&mut self, anchor: Vector, point: Vector) {
        self.selection_band = None;
        let area = Region::from_corners(anchor, point);
        if area.width > 0.0 || area.height > 0.0 {
            let ids = shapes_in(&self.scene, &area);
            tracing::debug!(selected = ids.len(), "rubber band finished");
            self.pending_selection = Some(ids);
        }
    }

    /// Click at `page`. `on_canvas` is whether the DOM target was the canvas
    /// element; clicks elsewhere or outside the viewport are ignored.
    pub fn click(&mut self, page: Vector, on_canvas: bool, modifiers: Modifiers) {
        if !on_canvas {
            return;
        }
        let point = self.locate(page);
        if !self.viewport().contains(point) {
            return;
        }
        self.target = hit_test(&self.scene, point);
        self.emit_pointer(RenderEventKind::Click);
        if let Some(shape) = self.target.shape().and_then(|id| self.scene.get(&id)) {
            shape.emit(ShapeEventKind::Click, Some(self.pointer));
        }

        let pending = self.pending_selection.take();
        if std::mem::take(&mut self.swallow_click) {
            return;
        }
        if let Some(transformer) = self.transformer.as_mut() {
            transformer.click(&mut self.scene, self.target, modifiers.shift, pending);
        }
    }

    /// The browser context menu never opens over the canvas. A rubber band
    /// started by the same right-button press is dropped.
    pub fn context_menu(&mut self) -> bool {
        if matches!(self.input, InputState::Selecting { .. }) {
            self.input = InputState::Idle;
            self.selection_band = None;
        }
        true
    }

    fn aim_hover(&mut self, point: Vector) {
        let speed = self.config.hover_speed;
        for shape in self.scene.iter_mut() {
            let center = shape.bounds().center();
            if let Some(velocity) = shape.body_velocity.as_mut().filter(|v| v.hover) {
                velocity.aim_at(center, point, speed);
            }
        }
    }

    // --- keyboard ---

    /// Key pressed. A selection shortcut takes the key; otherwise every
    /// controller sees it. Returns the shortcut that ran.
    pub fn key_down(&mut self, key: &Key, modifiers: Modifiers) -> Option<Shortcut> {
        let shortcut = self.transformer.as_ref().and_then(|t| t.shortcut(key, modifiers));
        match shortcut {
            Some(shortcut) => self.run_shortcut(shortcut),
            None => {
                for controller in self.controllers.values_mut() {
                    controller.key_down(key.as_str());
                }
            }
        }
        shortcut
    }

    pub fn key_up(&mut self, key: &Key) {
        for controller in self.controllers.values_mut() {
            controller.key_up(key.as_str());
        }
    }

    fn run_shortcut(&mut self, shortcut: Shortcut) {
        let nodes: Vec<ShapeId> = self.transformer.as_ref().map(|t| t.nodes().to_vec()).unwrap_or_default();
        tracing::debug!(?shortcut, nodes = nodes.len(), "selection shortcut");

        match shortcut {
            Shortcut::Duplicate => {
                let mut clones = Vec::with_capacity(nodes.len());
                for id in &nodes {
                    let Some(offset) = self.scene.get(id).map(|s| {
                        let b = s.bounds();
                        Vector::new(b.width, b.height)
                    }) else {
                        continue;
                    };
                    if let Some(clone) = self.creator().duplicate(*id) {
                        if let Some(shape) = self.scene.get_mut(&clone) {
                            shape.translate(offset);
                        }
                        clones.push(clone);
                    }
                }
                if let Some(transformer) = self.transformer.as_mut() {
                    transformer.set_nodes(&mut self.scene, &clones);
                }
            }
            Shortcut::ToggleMask => {
                for id in &nodes {
                    if let Some(shape) = self.scene.get_mut(id) {
                        shape.mask = !shape.mask;
                    }
                }
            }
            Shortcut::ToggleHover => {
                for id in &nodes {
                    let mut manager = self.shape_manager(*id);
                    if !manager.remove_body_velocity() {
                        manager.hover_velocity();
                    }
                }
            }
            Shortcut::Delete => {
                for id in nodes {
                    self.destroy_shape(id);
                }
            }
        }
    }

    // --- loop ---

    /// Mark the loop running. Returns false if it already was.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        tracing::debug!("render loop started");
        true
    }

    /// Mark the loop stopped. Returns false if it already was.
    pub fn stop(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        tracing::debug!("render loop stopped");
        true
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// One animation tick at host time `now` (milliseconds): step controllers,
    /// then draw the scene and overlay. Draw failures don't stop the frame;
    /// the first one is returned.
    pub fn tick(&mut self, now: f64, surface: &mut dyn Surface) -> DrawResult {
        let frame = self.clock.sample(now);

        for controller in self.controllers.values_mut() {
            let target = controller.target().and_then(|id| self.scene.get_mut(&id));
            controller.tick(now, target);
        }

        let fps = self.fps.frame(now);
        let overlay = Overlay {
            viewport: self.viewport(),
            selection: self.selection_band.as_ref(),
            transformer: self.transformer.as_ref(),
            fps: self.config.show_fps.then_some(fps),
        };
        render::draw(surface, &mut self.scene, &frame, &overlay)
    }

    // --- registry ---

    /// Add a freshly built shape and announce it.
    pub(crate) fn register(&mut self, shape: Shape) -> ShapeId {
        let id = shape.id();
        let kind = shape.type_name();
        if let Some(sprite) = shape.as_sprite() {
            self.queue_asset(sprite.src());
        }
        self.manager().add_child(shape);
        self.events.emit(RenderEventKind::Create, &RenderEvent::Create { shape: id });
        tracing::debug!(shape_id = %id, kind, "shape created");
        id
    }

    /// Remove a shape and everything that refers to it. Returns false when
    /// `id` is not registered.
    pub fn destroy_shape(&mut self, id: ShapeId) -> bool {
        let Some(shape) = self.scene.get(&id) else {
            return false;
        };
        shape.emit(ShapeEventKind::Destroy, None);

        if let Some(transformer) = self.transformer.as_mut() {
            transformer.remove(&mut self.scene, id);
            transformer.forget(id);
        }
        if self.input.dragged() == Some(id) {
            self.input = InputState::Idle;
            self.swallow_click = false;
        }
        if self.target == Target::Shape(id) {
            self.target = Target::Render;
        }
        self.shape_manager(id).remove_controller();
        for controller in self.controllers.values_mut() {
            if controller.target() == Some(id) {
                controller.unbind();
            }
        }
        if let Some(pending) = self.pending_selection.as_mut() {
            pending.retain(|p| *p != id);
        }
        self.collab.forget_pointer(id);
        self.manager().remove_child(id);
        tracing::debug!(shape_id = %id, "shape destroyed");
        true
    }

    /// Destroy every persisted shape. Collaborator cursors stay.
    pub fn clear_scene(&mut self) {
        let ids: Vec<ShapeId> = self.scene.iter().filter(|s| s.persist).map(Shape::id).collect();
        for id in ids {
            self.destroy_shape(id);
        }
    }

    // --- selection ---

    pub fn enable_select(&mut self) {
        self.selection_enabled = true;
    }

    pub fn disable_select(&mut self) {
        self.selection_enabled = false;
        self.cancel_select();
    }

    #[must_use]
    pub fn is_select_enabled(&self) -> bool {
        self.selection_enabled
    }

    /// Drop a rubber band in progress and any pending result.
    pub fn cancel_select(&mut self) {
        if matches!(self.input, InputState::Selecting { .. }) {
            self.input = InputState::Idle;
        }
        self.selection_band = None;
        self.pending_selection = None;
    }

    // --- assets ---

    fn queue_asset(&mut self, src: &str) {
        if !src.is_empty() && !self.asset_requests.iter().any(|s| s == src) {
            self.asset_requests.push(src.to_string());
        }
    }

    /// Image sources requested since the last call.
    pub fn take_asset_requests(&mut self) -> Vec<String> {
        std::mem::take(&mut self.asset_requests)
    }

    /// The image at `src` loaded with the given natural size. Every sprite
    /// still waiting on it becomes ready and fires `play`.
    pub fn asset_loaded(&mut self, src: &str, width: f64, height: f64) -> usize {
        let mut count = 0;
        for shape in self.scene.iter_mut() {
            let Some(sprite) = shape.as_sprite_mut() else {
                continue;
            };
            if sprite.src() != src || sprite.asset_state() != AssetState::Loading {
                continue;
            }
            sprite.asset_loaded(width, height);
            shape.emit(ShapeEventKind::Play, None);
            count += 1;
        }
        tracing::debug!(src, sprites = count, "asset loaded");
        count
    }

    /// The image at `src` failed. Waiting sprites keep their placeholder.
    pub fn asset_failed(&mut self, src: &str) -> usize {
        let mut count = 0;
        for shape in self.scene.iter_mut() {
            if let Some(sprite) = shape.as_sprite_mut() {
                if sprite.src() == src && sprite.asset_state() == AssetState::Loading {
                    sprite.asset_failed();
                    count += 1;
                }
            }
        }
        tracing::warn!(src, sprites = count, "asset failed to load");
        count
    }

    // --- serialization ---

    /// Records for every persisted shape in insertion order, with bound
    /// controllers embedded in their sprites.
    #[must_use]
    pub fn serialize(&self) -> Vec<ShapeRecord> {
        self.scene
            .insertion_order()
            .into_iter()
            .filter(|s| s.persist)
            .map(|s| {
                let controller = s
                    .as_sprite()
                    .and_then(Sprite::controller)
                    .and_then(|id| self.controllers.get(&id))
                    .map(Controller::raw_data);
                ShapeRecord::from_shape(s, controller)
            })
            .collect()
    }

    /// Rebuild shapes from untyped records, keeping their ids. A record whose
    /// id is already registered replaces that shape. Bad records are logged
    /// and reported; the rest still apply.
    pub fn deserialize(&mut self, records: Vec<Value>) -> DeserializeReport {
        let mut report = DeserializeReport::default();
        for (index, value) in records.into_iter().enumerate() {
            match ShapeRecord::from_value(value) {
                Ok(record) => report.applied.push(self.restore(record)),
                Err(error) => {
                    tracing::warn!(index, code = error.error_code(), error = %error, "skipping shape record");
                    report.failed.push(RecordFailure { index, error });
                }
            }
        }
        report
    }

    fn restore(&mut self, record: ShapeRecord) -> ShapeId {
        let id = record.id();
        if self.scene.contains(&id) {
            self.destroy_shape(id);
        }
        let controller = record.controller().cloned();
        self.register(record.into_shape());
        if let Some(raw) = controller {
            let controller = Controller::from_raw(raw, self.config.physics());
            self.shape_manager(id).attach(controller);
        }
        id
    }

    pub fn save_to(&self, store: &mut dyn SceneStore) -> Result<(), EngineError> {
        let records = self.serialize();
        store.save(&records)?;
        tracing::debug!(shapes = records.len(), "scene saved");
        Ok(())
    }

    pub fn load_from(&mut self, store: &dyn SceneStore) -> Result<DeserializeReport, EngineError> {
        let records = store.load()?;
        let report = self.deserialize(records);
        tracing::debug!(applied = report.applied.len(), failed = report.failed.len(), "scene loaded");
        Ok(report)
    }

    // --- collaboration ---

    pub fn attach_transport(&mut self, transport: Box<dyn CollabTransport>) {
        self.collab.attach(transport);
    }

    pub fn detach_transport(&mut self) -> Option<Box<dyn CollabTransport>> {
        self.collab.detach()
    }

    /// Identity stamped on outbound pointer moves; `None` stops broadcasting.
    pub fn set_local_user(&mut self, email: Option<String>) {
        self.collab.set_local_user(email);
    }

    /// Register or update a remote user. An existing cursor takes the new look.
    pub fn add_collaborator(&mut self, collaborator: Collaborator) {
        if let Some(id) = self.collab.pointer_for(&collaborator.email) {
            if let Some(pointer) = self.scene.get_mut(&id).and_then(Shape::as_pointer_mut) {
                pointer.color.clone_from(&collaborator.color);
                pointer.name = Some(collaborator.name.clone());
            }
        }
        self.collab.add_collaborator(collaborator);
    }

    /// Place the sender's cursor, creating it on first sight. The local
    /// user's own echo is ignored.
    pub fn apply_remote_pointer(&mut self, message: &PointerMessage) -> Option<ShapeId> {
        if self.collab.is_local(message) {
            return None;
        }
        if let Some(id) = self.collab.pointer_for(&message.email) {
            if let Some(shape) = self.scene.get_mut(&id) {
                shape.position = message.pointer.relative;
                return Some(id);
            }
        }
        let props = self.collab.pointer_props(message);
        let id = self.creator().pointer(props);
        self.collab.track_pointer(&message.email, id);
        Some(id)
    }

    /// Forget a remote user and destroy its cursor.
    pub fn remove_collaborator(&mut self, email: &str) -> bool {
        match self.collab.remove_collaborator(email) {
            Some(id) => self.destroy_shape(id),
            None => false,
        }
    }
}

fn band_at(point: Vector) -> Shape {
    let props = RectProps {
        shape: ShapeProps { dragging: false, ..ShapeProps::at(point.x, point.y) },
        width: 0.0,
        height: 0.0,
        color: BAND_FILL.into(),
        border_width: 1.0,
        border_color: BAND_BORDER.into(),
    };
    Shape::new(props.shape.clone(), ShapeKind::Rect(Rect::new(&props)))
}

fn fit_band(band: &mut Shape, area: Region) {
    band.position = area.origin();
    if let Some(rect) = band.as_rect_mut() {
        rect.width = area.width;
        rect.height = area.height;
    }
}
