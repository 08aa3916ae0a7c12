//! 2D canvas scene engine with animated sprites.
//!
//! The crate keeps a scene of shapes (rectangles, circles, sprite-sheet
//! animations, arrows and collaborator cursors), hit-tests pointer input in
//! z-order, drives keyboard controllers with a small jump/gravity model, and
//! offers a transformer for multi-selection, moving and proportional
//! resizing. Scenes serialize to tagged JSON records. The engine core has no
//! browser dependency; the `web` module binds it to a `<canvas>` when compiled to
//! WebAssembly.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | [`engine::Render`]: scene container, input routing, frame loop |
//! | [`creator`] / [`manager`] | Shape factory and registry/component managers |
//! | [`scene`] | Child registry ordered by `(z_index, insertion)` |
//! | [`shape`] | Shape kinds, sprite playback and the pattern DSL |
//! | [`transformer`] | Multi-selection, move/resize sessions, shortcuts |
//! | [`controller`] | Keyboard-driven sprite controller with jump physics |
//! | [`velocity`] | Constant and pointer-chasing body velocity |
//! | [`hit`] | Hit-testing and rubber-band collection |
//! | [`input`] | Pointer kinds, modifiers, keys and gesture state |
//! | [`events`] | Listener registries and event payloads |
//! | [`render`] | Per-tick drawing: masks, shapes, overlay |
//! | [`surface`] | Drawing backend trait and a recording surface |
//! | [`clock`] | Shared frame clock and FPS counter |
//! | [`raw`] | Serialized shape records |
//! | [`storage`] | Scene persistence port |
//! | [`collab`] | Collaboration transport and remote cursors |
//! | [`config`] | Engine configuration |
//! | [`error`] | Error types and codes |
//! | [`logging`] | Tracing subscriber setup |
//! | [`consts`] | Shared numeric defaults |

pub mod clock;
pub mod collab;
pub mod config;
pub mod consts;
pub mod controller;
pub mod creator;
pub mod engine;
pub mod error;
pub mod events;
pub mod hit;
pub mod input;
pub mod logging;
pub mod manager;
pub mod raw;
pub mod render;
pub mod scene;
pub mod shape;
pub mod storage;
pub mod surface;
pub mod transformer;
pub mod vector;
pub mod velocity;
#[cfg(target_arch = "wasm32")]
pub mod web;
