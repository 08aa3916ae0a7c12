//! Shared numeric constants for the scene engine.

// ── Animation ───────────────────────────────────────────────────

/// Base time budget per sprite frame in milliseconds, before the speed multiplier.
pub const FRAME_DURATION_MS: f64 = 60.0;

/// Minimum wall-clock step before the shared animation clock is refreshed.
pub const CLOCK_GRANULARITY_MS: f64 = 16.0;

/// Refresh interval for the sprite debug badge text.
pub const DEBUG_TEXT_REFRESH_MS: f64 = 166.0;

/// Frame size assumed for a sprite whose image has not loaded yet.
pub const DEFAULT_FRAME_SIZE: f64 = 100.0;

/// Largest `rows × cols` product a decoded sprite record may declare.
pub const MAX_GRID_FRAMES: u32 = 65_536;

/// Ceiling on the compiled length of one sprite pattern.
pub const MAX_PATTERN_FRAMES: usize = 65_536;

/// Sampling window for the FPS counter.
pub const FPS_WINDOW_MS: f64 = 1000.0;

// ── Physics ─────────────────────────────────────────────────────

/// Downward acceleration applied to an airborne controller target each tick.
pub const GRAVITY: f64 = 0.9;

/// Default upward impulse of a controller jump.
pub const JUMP_FORCE: f64 = 15.0;

/// Minimum time between two jump starts, guards against key repeat.
pub const JUMP_COOLDOWN_MS: f64 = 250.0;

/// Speed given to hover velocity components on pointer move.
pub const HOVER_SPEED: f64 = 5.0;

// ── Transformer ─────────────────────────────────────────────────

/// Gap between the selection bounding box and its chrome.
pub const TRANSFORMER_PADDING: f64 = 10.0;

/// Side length of a corner resize handle.
pub const HANDLE_SIZE: f64 = 10.0;

/// Smallest width or height a resize may produce.
pub const MIN_RESIZE: f64 = 20.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Minimum distance from an arrow shaft still counted as a hit.
pub const ARROW_HIT_SLOP: f64 = 6.0;

/// Arrowhead half-angle in radians (30°).
pub const ARROW_HEAD_ANGLE: f64 = std::f64::consts::PI / 6.0;

/// Arrowhead length as a multiple of the stroke width.
pub const ARROW_HEAD_SCALE: f64 = 5.0;

/// Unscaled size of the collaborator cursor glyph.
pub const CURSOR_SIZE: f64 = 24.0;
