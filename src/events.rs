//! Pub-sub building block shared by the render and every shape.
//!
//! [`EventProvider`] is parameterized by an event-kind key and a payload
//! type, so the render and shapes keep independent vocabularies while
//! sharing one dispatch implementation. Dispatch is synchronous and runs in
//! subscription order.

#[cfg(test)]
#[path = "events_test.rs"]
mod events_test;

use std::fmt;
use std::rc::Rc;

use crate::scene::ShapeId;
use crate::vector::Vector;

/// Handle returned by [`EventProvider::on`], used to unsubscribe.
pub type ListenerId = u64;

type Callback<P> = Rc<dyn Fn(&P)>;

/// Listener registry keyed by event kind.
pub struct EventProvider<K, P> {
    listeners: Vec<(ListenerId, K, Callback<P>)>,
    next_id: ListenerId,
}

impl<K, P> Default for EventProvider<K, P> {
    fn default() -> Self {
        Self { listeners: Vec::new(), next_id: 1 }
    }
}

impl<K, P> fmt::Debug for EventProvider<K, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventProvider").field("listeners", &self.listeners.len()).finish()
    }
}

impl<K: Copy + PartialEq, P> EventProvider<K, P> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `callback` to `kind`.
    pub fn on<F>(&mut self, kind: K, callback: F) -> ListenerId
    where
        F: Fn(&P) + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.push((id, kind, Rc::new(callback)));
        id
    }

    /// Remove the listener `id` from `kind`. Returns false if it was not subscribed.
    pub fn off(&mut self, kind: K, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, lkind, _)| !(*lid == id && *lkind == kind));
        self.listeners.len() != before
    }

    /// Invoke every listener subscribed to `kind`.
    pub fn emit(&self, kind: K, payload: &P) {
        // Snapshot so a listener list change during dispatch can't skip entries.
        let targets: Vec<Callback<P>> = self
            .listeners
            .iter()
            .filter(|(_, lkind, _)| *lkind == kind)
            .map(|(_, _, cb)| Rc::clone(cb))
            .collect();
        for cb in targets {
            cb(payload);
        }
    }

    #[must_use]
    pub fn listener_count(&self, kind: K) -> usize {
        self.listeners.iter().filter(|(_, lkind, _)| *lkind == kind).count()
    }

    /// Drop every listener.
    pub fn clear(&mut self) {
        self.listeners.clear();
    }
}

// =============================================================
// Payloads
// =============================================================

/// Pointer coordinates carried by input events.
///
/// `absolute` is page space, `relative` is canvas-local.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct PointerPosition {
    pub absolute: Vector,
    pub relative: Vector,
}

/// What an input event resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Target {
    /// Empty canvas.
    #[default]
    Render,
    Shape(ShapeId),
}

impl Target {
    #[must_use]
    pub fn shape(self) -> Option<ShapeId> {
        match self {
            Self::Render => None,
            Self::Shape(id) => Some(id),
        }
    }
}

/// Render-level event vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderEventKind {
    Create,
    Click,
    MouseMove,
    MouseDown,
    MouseUp,
    TouchStart,
    TouchMove,
    TouchEnd,
    /// Synthesized tap, once per touch session that began on the canvas.
    Touch,
}

/// Pointer payload for every render-level input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub pointer: PointerPosition,
    pub target: Target,
}

/// Render-level payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderEvent {
    Create { shape: ShapeId },
    Pointer(PointerEvent),
}

impl RenderEvent {
    #[must_use]
    pub fn pointer(&self) -> Option<&PointerEvent> {
        match self {
            Self::Pointer(p) => Some(p),
            Self::Create { .. } => None,
        }
    }

    #[must_use]
    pub fn created(&self) -> Option<ShapeId> {
        match self {
            Self::Create { shape } => Some(*shape),
            Self::Pointer(_) => None,
        }
    }
}

/// Shape-level event vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeEventKind {
    Click,
    DragStart,
    DragEnd,
    Drag,
    Destroy,
    Select,
    Deselect,
    Play,
    Pause,
}

/// Shape-level payload. `pointer` is absent for playback events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeEvent {
    pub target: ShapeId,
    pub pointer: Option<PointerPosition>,
}

pub type RenderEvents = EventProvider<RenderEventKind, RenderEvent>;
pub type ShapeEvents = EventProvider<ShapeEventKind, ShapeEvent>;
