//! Browser binding: a [`Render`] driven by a real `<canvas>`.
//!
//! `WebRender` owns the shared render, paints it on every animation frame
//! while running, forwards DOM input, loads sprite images and persists the
//! scene to `localStorage`. Everything here is glue; behavior lives in the
//! engine. At most one animation frame is scheduled at a time, and
//! [`WebRender::destroy`] detaches every DOM listener it installed.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use serde_json::Value;
use wasm_bindgen::closure::WasmClosure;
use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, EventTarget, HtmlCanvasElement, HtmlImageElement, KeyboardEvent, MouseEvent, Storage,
    TouchEvent, Window,
};

use crate::clock::FrameSchedule;
use crate::config::EngineConfig;
use crate::engine::Render;
use crate::error::{DrawError, EngineError, ErrorCode, StorageError};
use crate::input::{Key, Modifiers, PointerKind};
use crate::logging;
use crate::raw::ShapeRecord;
use crate::storage::{SceneStore, decode_scene, encode_scene};
use crate::surface::{DrawResult, Region, Surface};
use crate::vector::Vector;

type Shared<T> = Rc<RefCell<T>>;
type FrameLoop = Shared<FrameState>;

#[derive(Default)]
struct FrameState {
    callback: Option<Closure<dyn FnMut(f64)>>,
    schedule: FrameSchedule,
}

/// A DOM listener kept alive until [`Listener::detach`].
struct Listener {
    target: EventTarget,
    name: &'static str,
    callback: Box<dyn AsRef<JsValue>>,
}

impl Listener {
    fn detach(&self) {
        let callback: &JsValue = AsRef::<JsValue>::as_ref(&*self.callback);
        if let Err(err) = self.target.remove_event_listener_with_callback(self.name, callback.unchecked_ref()) {
            tracing::warn!(event = self.name, error = ?err, "listener not removed");
        }
    }
}

// =============================================================
// Surface
// =============================================================

/// Loaded sprite sheets keyed by `src`.
#[derive(Default)]
struct ImageCache {
    ready: HashMap<String, HtmlImageElement>,
    loading: HashSet<String>,
}

/// [`Surface`] over a 2D canvas context.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    images: Shared<ImageCache>,
}

fn backend(err: JsValue) -> DrawError {
    DrawError::Backend(format!("{err:?}"))
}

impl Surface for CanvasSurface {
    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, x: f64, y: f64) -> DrawResult {
        self.ctx.translate(x, y).map_err(backend)
    }

    fn rotate(&mut self, angle: f64) -> DrawResult {
        self.ctx.rotate(angle).map_err(backend)
    }

    fn clear_rect(&mut self, r: Region) {
        self.ctx.clear_rect(r.x, r.y, r.width, r.height);
    }

    fn fill_rect(&mut self, r: Region) {
        self.ctx.fill_rect(r.x, r.y, r.width, r.height);
    }

    fn stroke_rect(&mut self, r: Region) {
        self.ctx.stroke_rect(r.x, r.y, r.width, r.height);
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn close_path(&mut self) {
        self.ctx.close_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ctx.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ctx.line_to(x, y);
    }

    fn rect(&mut self, r: Region) {
        self.ctx.rect(r.x, r.y, r.width, r.height);
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) -> DrawResult {
        self.ctx.arc(x, y, radius, start, end).map_err(backend)
    }

    fn fill(&mut self) {
        self.ctx.fill();
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }

    fn clip(&mut self) {
        self.ctx.clip();
    }

    fn set_fill_style(&mut self, style: &str) {
        self.ctx.set_fill_style_str(style);
    }

    fn set_stroke_style(&mut self, style: &str) {
        self.ctx.set_stroke_style_str(style);
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn set_line_cap(&mut self, cap: &str) {
        self.ctx.set_line_cap(cap);
    }

    fn set_line_join(&mut self, join: &str) {
        self.ctx.set_line_join(join);
    }

    fn set_font(&mut self, font: &str) {
        self.ctx.set_font(font);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> DrawResult {
        self.ctx.fill_text(text, x, y).map_err(backend)
    }

    fn draw_image(&mut self, src: &str, s: Region, d: Region) -> DrawResult {
        let images = self.images.borrow();
        let Some(image) = images.ready.get(src) else {
            return Err(DrawError::MissingImage(src.to_string()));
        };
        self.ctx
            .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                image, s.x, s.y, s.width, s.height, d.x, d.y, d.width, d.height,
            )
            .map_err(backend)
    }
}

// =============================================================
// Storage
// =============================================================

/// [`SceneStore`] backed by `window.localStorage` under one key.
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    key: String,
}

impl LocalStorageStore {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Result<Storage, StorageError> {
        let window = web_sys::window().ok_or(StorageError::Unavailable)?;
        window
            .local_storage()
            .map_err(|e| StorageError::Backend(format!("{e:?}")))?
            .ok_or(StorageError::Unavailable)
    }
}

impl SceneStore for LocalStorageStore {
    fn load(&self) -> Result<Vec<Value>, StorageError> {
        let raw = Self::storage()?
            .get_item(&self.key)
            .map_err(|e| StorageError::Backend(format!("{e:?}")))?;
        match raw {
            Some(json) => decode_scene(&json),
            None => Ok(Vec::new()),
        }
    }

    fn save(&mut self, records: &[ShapeRecord]) -> Result<(), StorageError> {
        let json = encode_scene(records)?;
        Self::storage()?
            .set_item(&self.key, &json)
            .map_err(|e| StorageError::Backend(format!("{e:?}")))
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        Self::storage()?
            .remove_item(&self.key)
            .map_err(|e| StorageError::Backend(format!("{e:?}")))
    }
}

// =============================================================
// WebRender
// =============================================================

#[wasm_bindgen]
pub struct WebRender {
    render: Shared<Render>,
    canvas: HtmlCanvasElement,
    images: Shared<ImageCache>,
    frame: FrameLoop,
    listeners: Vec<Listener>,
    store: LocalStorageStore,
}

#[wasm_bindgen]
impl WebRender {
    /// Bind to `canvas`. `config` is optional JSON for [`EngineConfig`].
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, config: Option<String>) -> Result<WebRender, JsValue> {
        console_error_panic_hook::set_once();
        logging::init();

        let config = match config {
            Some(raw) => EngineConfig::from_json(&raw).map_err(|e| JsValue::from_str(&e.to_string()))?,
            None => EngineConfig::default(),
        };
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let store = LocalStorageStore::new(config.storage_key.clone());
        let render = Rc::new(RefCell::new(Render::new(config)));
        let images = Rc::new(RefCell::new(ImageCache::default()));
        let frame: FrameLoop = Rc::new(RefCell::new(FrameState::default()));

        sync_viewport(&window, &canvas, &mut render.borrow_mut());
        install_frame_loop(&window, &render, &images, &frame, CanvasSurface { ctx, images: Rc::clone(&images) });
        let listeners = bind_input(&window, &canvas, &render);

        tracing::info!(width = canvas.width(), height = canvas.height(), "canvas bound");
        Ok(Self { render, canvas, images, frame, listeners, store })
    }

    /// Start the animation loop. Returns false if it was already running.
    pub fn start(&self) -> bool {
        if !self.render.borrow_mut().start() {
            return false;
        }
        match web_sys::window() {
            Some(window) => request_frame(&window, &self.frame),
            None => false,
        }
    }

    /// Stop the loop and cancel the scheduled frame. Returns false if it was
    /// not running.
    pub fn stop(&self) -> bool {
        let stopped = self.render.borrow_mut().stop();
        if let Some(window) = web_sys::window() {
            cancel_frame(&window, &self.frame);
        }
        stopped
    }

    /// Stop the loop and remove every DOM listener. The instance is inert
    /// afterwards.
    pub fn destroy(&mut self) {
        self.stop();
        for listener in self.listeners.drain(..) {
            listener.detach();
        }
        self.frame.borrow_mut().callback = None;
        tracing::info!("canvas unbound");
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.render.borrow().is_running()
    }

    /// Persist the scene to `localStorage`.
    pub fn save(&mut self) -> Result<(), JsValue> {
        self.render.borrow().save_to(&mut self.store).map_err(js_error)
    }

    /// Restore from `localStorage`. Returns the number of shapes applied.
    pub fn load(&self) -> Result<usize, JsValue> {
        let report = self.render.borrow_mut().load_from(&self.store).map_err(js_error)?;
        self.load_assets();
        Ok(report.applied.len())
    }

    /// The scene as a JSON array of shape records.
    pub fn serialize(&self) -> Result<String, JsValue> {
        encode_scene(&self.render.borrow().serialize()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Apply a JSON array of shape records. Returns the number applied.
    pub fn deserialize(&self, json: &str) -> Result<usize, JsValue> {
        let records = decode_scene(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let report = self.render.borrow_mut().deserialize(records);
        self.load_assets();
        Ok(report.applied.len())
    }

    #[wasm_bindgen(js_name = clearScene)]
    pub fn clear_scene(&self) {
        self.render.borrow_mut().clear_scene();
    }

    #[wasm_bindgen(js_name = enableSelect)]
    pub fn enable_select(&self) {
        self.render.borrow_mut().enable_select();
    }

    #[wasm_bindgen(js_name = disableSelect)]
    pub fn disable_select(&self) {
        self.render.borrow_mut().disable_select();
    }

    /// Re-read the canvas size and page offset.
    pub fn resize(&self) {
        if let Some(window) = web_sys::window() {
            sync_viewport(&window, &self.canvas, &mut self.render.borrow_mut());
        }
    }
}

impl WebRender {
    /// The shared render, for Rust hosts that build scenes directly.
    #[must_use]
    pub fn render(&self) -> Shared<Render> {
        Rc::clone(&self.render)
    }

    /// Start loading any images the scene asked for since the last frame.
    pub fn load_assets(&self) {
        load_assets(&self.render, &self.images);
    }
}

fn js_error(err: EngineError) -> JsValue {
    JsValue::from_str(&format!("{}: {err}", err.error_code()))
}

// =============================================================
// Frame loop
// =============================================================

fn install_frame_loop(
    window: &Window,
    render: &Shared<Render>,
    images: &Shared<ImageCache>,
    frame: &FrameLoop,
    mut surface: CanvasSurface,
) {
    let render = Rc::clone(render);
    let images = Rc::clone(images);
    let next = Rc::clone(frame);
    let window = window.clone();

    let callback = Closure::wrap(Box::new(move |now: f64| {
        next.borrow_mut().schedule.fired();
        if !render.borrow().is_running() {
            return;
        }
        if let Err(err) = render.borrow_mut().tick(now, &mut surface) {
            tracing::warn!(error = %err, "frame draw failed");
        }
        load_assets(&render, &images);
        request_frame(&window, &next);
    }) as Box<dyn FnMut(f64)>);

    frame.borrow_mut().callback = Some(callback);
}

/// Schedule the next tick unless one is already pending.
fn request_frame(window: &Window, frame: &FrameLoop) -> bool {
    let mut state = frame.borrow_mut();
    if !state.schedule.needs_request() {
        return true;
    }
    let Some(callback) = state.callback.as_ref() else {
        return false;
    };
    match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
        Ok(id) => {
            state.schedule.scheduled(id);
            true
        }
        Err(err) => {
            tracing::warn!(error = ?err, "requestAnimationFrame failed");
            false
        }
    }
}

fn cancel_frame(window: &Window, frame: &FrameLoop) {
    let Some(id) = frame.borrow_mut().schedule.cancel() else {
        return;
    };
    if let Err(err) = window.cancel_animation_frame(id) {
        tracing::warn!(error = ?err, "cancelAnimationFrame failed");
    }
}

// =============================================================
// Images
// =============================================================

fn load_assets(render: &Shared<Render>, images: &Shared<ImageCache>) {
    let requests = render.borrow_mut().take_asset_requests();
    for src in requests {
        let cached = images
            .borrow()
            .ready
            .get(&src)
            .map(|img| (f64::from(img.natural_width()), f64::from(img.natural_height())));
        if let Some((width, height)) = cached {
            render.borrow_mut().asset_loaded(&src, width, height);
            continue;
        }
        if !images.borrow_mut().loading.insert(src.clone()) {
            continue;
        }
        if let Err(err) = fetch_image(render, images, &src) {
            tracing::warn!(src, error = ?err, "image element could not be created");
            images.borrow_mut().loading.remove(&src);
            render.borrow_mut().asset_failed(&src);
        }
    }
}

fn fetch_image(render: &Shared<Render>, images: &Shared<ImageCache>, src: &str) -> Result<(), JsValue> {
    let img = HtmlImageElement::new()?;

    let onload = {
        let render = Rc::clone(render);
        let images = Rc::clone(images);
        let img = img.clone();
        let src = src.to_string();
        Closure::once(move |_: web_sys::Event| {
            let (width, height) = (f64::from(img.natural_width()), f64::from(img.natural_height()));
            let mut cache = images.borrow_mut();
            cache.loading.remove(&src);
            cache.ready.insert(src.clone(), img);
            drop(cache);
            render.borrow_mut().asset_loaded(&src, width, height);
        })
    };
    let onerror = {
        let render = Rc::clone(render);
        let images = Rc::clone(images);
        let src = src.to_string();
        Closure::once(move |_: web_sys::Event| {
            images.borrow_mut().loading.remove(&src);
            render.borrow_mut().asset_failed(&src);
        })
    };

    img.set_onload(Some(onload.as_ref().unchecked_ref()));
    img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    onload.forget();
    onerror.forget();
    img.set_src(src);
    Ok(())
}

// =============================================================
// Input
// =============================================================

fn listen<T>(listeners: &mut Vec<Listener>, target: &EventTarget, name: &'static str, callback: Closure<T>)
where
    T: ?Sized + WasmClosure + 'static,
{
    if let Err(err) = target.add_event_listener_with_callback(name, callback.as_ref().unchecked_ref()) {
        tracing::warn!(event = name, error = ?err, "listener not installed");
        return;
    }
    listeners.push(Listener { target: target.clone(), name, callback: Box::new(callback) });
}

fn mouse_modifiers(e: &MouseEvent) -> Modifiers {
    Modifiers { shift: e.shift_key(), ctrl: e.ctrl_key(), alt: e.alt_key(), meta: e.meta_key() }
}

fn mouse_point(e: &MouseEvent) -> Vector {
    Vector::new(f64::from(e.page_x()), f64::from(e.page_y()))
}

/// Page position of the first touch; `changed` reads the touches that just ended.
fn touch_point(e: &TouchEvent, changed: bool) -> Option<Vector> {
    let list = if changed { e.changed_touches() } else { e.touches() };
    list.get(0).map(|t| Vector::new(f64::from(t.page_x()), f64::from(t.page_y())))
}

fn sync_viewport(window: &Window, canvas: &HtmlCanvasElement, render: &mut Render) {
    let rect = canvas.get_bounding_client_rect();
    let scroll = Vector::new(window.scroll_x().unwrap_or(0.0), window.scroll_y().unwrap_or(0.0));
    render.set_canvas_origin(Vector::new(rect.left(), rect.top()).add(scroll));
    render.resize(f64::from(canvas.width()), f64::from(canvas.height()));
}

fn bind_input(window: &Window, canvas: &HtmlCanvasElement, render: &Shared<Render>) -> Vec<Listener> {
    let canvas_target: &EventTarget = canvas.as_ref();
    let window_target: &EventTarget = window.as_ref();
    let mut listeners = Vec::new();

    {
        let render = Rc::clone(render);
        listen(
            &mut listeners,
            canvas_target,
            "mousedown",
            Closure::wrap(Box::new(move |e: MouseEvent| {
                render.borrow_mut().pointer_down(PointerKind::Mouse, mouse_point(&e), mouse_modifiers(&e));
            }) as Box<dyn FnMut(MouseEvent)>),
        );
    }
    {
        let render = Rc::clone(render);
        listen(
            &mut listeners,
            window_target,
            "mousemove",
            Closure::wrap(Box::new(move |e: MouseEvent| {
                render.borrow_mut().pointer_move(PointerKind::Mouse, mouse_point(&e));
            }) as Box<dyn FnMut(MouseEvent)>),
        );
    }
    {
        let render = Rc::clone(render);
        listen(
            &mut listeners,
            window_target,
            "mouseup",
            Closure::wrap(Box::new(move |e: MouseEvent| {
                render.borrow_mut().pointer_up(PointerKind::Mouse, mouse_point(&e));
            }) as Box<dyn FnMut(MouseEvent)>),
        );
    }
    {
        let render = Rc::clone(render);
        let canvas: JsValue = canvas.clone().into();
        listen(
            &mut listeners,
            window_target,
            "click",
            Closure::wrap(Box::new(move |e: MouseEvent| {
                let on_canvas = e.target().is_some_and(|t| JsValue::from(t) == canvas);
                render.borrow_mut().click(mouse_point(&e), on_canvas, mouse_modifiers(&e));
            }) as Box<dyn FnMut(MouseEvent)>),
        );
    }
    {
        let render = Rc::clone(render);
        listen(
            &mut listeners,
            canvas_target,
            "contextmenu",
            Closure::wrap(Box::new(move |e: MouseEvent| {
                if render.borrow_mut().context_menu() {
                    e.prevent_default();
                }
            }) as Box<dyn FnMut(MouseEvent)>),
        );
    }

    for (name, changed) in [("touchstart", false), ("touchmove", false), ("touchend", true)] {
        let render = Rc::clone(render);
        listen(
            &mut listeners,
            canvas_target,
            name,
            Closure::wrap(Box::new(move |e: TouchEvent| {
                let Some(point) = touch_point(&e, changed) else {
                    return;
                };
                let mut render = render.borrow_mut();
                match name {
                    "touchstart" => {
                        let modifiers =
                            Modifiers { shift: e.shift_key(), ctrl: e.ctrl_key(), alt: e.alt_key(), meta: e.meta_key() };
                        render.pointer_down(PointerKind::Touch, point, modifiers);
                    }
                    "touchmove" => {
                        e.prevent_default();
                        render.pointer_move(PointerKind::Touch, point);
                    }
                    _ => render.pointer_up(PointerKind::Touch, point),
                }
            }) as Box<dyn FnMut(TouchEvent)>),
        );
    }

    {
        let render = Rc::clone(render);
        listen(
            &mut listeners,
            window_target,
            "keydown",
            Closure::wrap(Box::new(move |e: KeyboardEvent| {
                let modifiers = Modifiers { shift: e.shift_key(), ctrl: e.ctrl_key(), alt: e.alt_key(), meta: e.meta_key() };
                if render.borrow_mut().key_down(&Key::new(e.key()), modifiers).is_some() {
                    e.prevent_default();
                }
            }) as Box<dyn FnMut(KeyboardEvent)>),
        );
    }
    {
        let render = Rc::clone(render);
        listen(
            &mut listeners,
            window_target,
            "keyup",
            Closure::wrap(Box::new(move |e: KeyboardEvent| {
                render.borrow_mut().key_up(&Key::new(e.key()));
            }) as Box<dyn FnMut(KeyboardEvent)>),
        );
    }
    {
        let render = Rc::clone(render);
        let canvas = canvas.clone();
        let resize_window = window.clone();
        listen(
            &mut listeners,
            window_target,
            "resize",
            Closure::wrap(Box::new(move || {
                sync_viewport(&resize_window, &canvas, &mut render.borrow_mut());
            }) as Box<dyn FnMut()>),
        );
    }
    listeners
}
