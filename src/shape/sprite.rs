//! Sprite-sheet animation.
//!
//! A sprite plays frames from a `rows × cols` grid cut out of one image, in
//! one of two modes:
//!
//! - **range mode** (no pattern): `start_frame..=end_frame` in row-major
//!   order, skipping `ignore_frames`;
//! - **pattern mode**: a compiled [`pattern`](super::pattern) list walked by
//!   a cursor.
//!
//! Frames advance against the shared [`FrameContext`] clock, never a
//! per-instance timer. Until the image reports its size the sprite draws a
//! translucent placeholder; a failed load keeps the placeholder forever.

#[cfg(test)]
#[path = "sprite_test.rs"]
mod sprite_test;

use serde::{Deserialize, Serialize};

use super::ShapeProps;
use super::pattern::compile_pattern;
use crate::clock::FrameContext;
use crate::consts::{DEBUG_TEXT_REFRESH_MS, DEFAULT_FRAME_SIZE, MAX_GRID_FRAMES};
use crate::controller::ControllerId;
use crate::surface::{DrawResult, Region, Surface};
use crate::vector::Vector;

const PLACEHOLDER_FILL: &str = "rgba(255, 255, 255, 0.1)";

/// Frame grid on the source image.
///
/// Decoding rejects an empty grid and one with more than
/// [`MAX_GRID_FRAMES`] cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridCells")]
pub struct SpriteGrid {
    pub rows: u32,
    pub cols: u32,
}

#[derive(Deserialize)]
struct GridCells {
    rows: u32,
    cols: u32,
}

impl TryFrom<GridCells> for SpriteGrid {
    type Error = String;

    fn try_from(cells: GridCells) -> Result<Self, Self::Error> {
        let count = u64::from(cells.rows) * u64::from(cells.cols);
        if count == 0 || count > u64::from(MAX_GRID_FRAMES) {
            return Err(format!(
                "sprite grid {}x{} must hold between 1 and {MAX_GRID_FRAMES} frames",
                cells.rows, cells.cols
            ));
        }
        Ok(Self { rows: cells.rows, cols: cells.cols })
    }
}

impl Default for SpriteGrid {
    fn default() -> Self {
        Self { rows: 1, cols: 1 }
    }
}

impl SpriteGrid {
    #[must_use]
    pub fn frame_count(self) -> u32 {
        self.rows.max(1).saturating_mul(self.cols.max(1))
    }

    #[must_use]
    pub fn last_frame(self) -> u32 {
        self.frame_count() - 1
    }

    /// `(column, row)` of `frame` in row-major order.
    #[must_use]
    pub fn cell(self, frame: u32) -> (u32, u32) {
        let cols = self.cols.max(1);
        (frame % cols, frame / cols)
    }
}

/// Image loading progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetState {
    Loading,
    Ready,
    Failed,
}

/// Playback transition produced by a frame advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackChange {
    Paused,
}

/// Construction options for a sprite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpriteProps {
    #[serde(flatten)]
    pub shape: ShapeProps,
    pub src: String,
    pub sprite_grid: SpriteGrid,
    pub ignore_frames: Vec<u32>,
    pub start_frame: u32,
    /// `-1` means the last frame of the grid.
    pub end_frame: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<Vec<String>>,
    pub scale: f64,
    pub speed: f64,
    #[serde(rename = "loop")]
    pub looping: bool,
}

impl Default for SpriteProps {
    fn default() -> Self {
        Self {
            shape: ShapeProps::default(),
            src: String::new(),
            sprite_grid: SpriteGrid::default(),
            ignore_frames: Vec::new(),
            start_frame: 0,
            end_frame: -1,
            pattern: None,
            scale: 1.0,
            speed: 1.0,
            looping: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Sprite {
    src: String,
    grid: SpriteGrid,
    ignore_frames: Vec<u32>,
    start_frame: u32,
    end_frame: i64,
    pattern: Option<Vec<String>>,
    original_pattern: Option<Vec<String>>,
    frames: Vec<u32>,
    scale: f64,
    speed: f64,
    pub looping: bool,
    pub(crate) controller: Option<ControllerId>,

    asset: AssetState,
    frame_width: f64,
    frame_height: f64,
    frame_index: u32,
    cursor: usize,
    paused: bool,
    last_advance: f64,

    debug: bool,
    debug_text: String,
    debug_dirty: bool,
    last_debug_refresh: f64,
}

/// Sprites compare by configuration; playback state is ignored.
impl PartialEq for Sprite {
    fn eq(&self, other: &Self) -> bool {
        self.props(ShapeProps::default()) == other.props(ShapeProps::default())
    }
}

impl Sprite {
    #[must_use]
    pub fn new(props: &SpriteProps) -> Self {
        let frames = props
            .pattern
            .as_deref()
            .map(|p| compile_pattern(p, props.sprite_grid))
            .unwrap_or_default();
        let mut sprite = Self {
            src: props.src.clone(),
            grid: props.sprite_grid,
            ignore_frames: props.ignore_frames.clone(),
            start_frame: props.start_frame,
            end_frame: props.end_frame,
            pattern: props.pattern.clone(),
            original_pattern: props.pattern.clone(),
            frames,
            scale: props.scale,
            speed: props.speed,
            looping: props.looping,
            controller: None,
            asset: AssetState::Loading,
            frame_width: DEFAULT_FRAME_SIZE,
            frame_height: DEFAULT_FRAME_SIZE,
            frame_index: props.start_frame,
            cursor: 0,
            paused: false,
            last_advance: 0.0,
            debug: false,
            debug_text: String::new(),
            debug_dirty: true,
            last_debug_refresh: 0.0,
        };
        sprite.skip_ignored();
        sprite
    }

    /// Options that rebuild this sprite. A controller-driven pattern is not
    /// the sprite's own, so the original pattern is reported while one is bound.
    #[must_use]
    pub fn props(&self, shape: ShapeProps) -> SpriteProps {
        let pattern = if self.controller.is_some() { &self.original_pattern } else { &self.pattern };
        SpriteProps {
            shape,
            src: self.src.clone(),
            sprite_grid: self.grid,
            ignore_frames: self.ignore_frames.clone(),
            start_frame: self.start_frame,
            end_frame: self.end_frame,
            pattern: pattern.clone(),
            scale: self.scale,
            speed: self.speed,
            looping: self.looping,
        }
    }

    /// Fresh sprite with the same configuration and no runtime state.
    #[must_use]
    pub(crate) fn duplicate(&self, shape: ShapeProps) -> Self {
        let mut copy = Self::new(&self.props(shape));
        copy.debug = self.debug;
        copy
    }

    // --- configuration ---

    #[must_use]
    pub fn src(&self) -> &str {
        &self.src
    }

    #[must_use]
    pub fn grid(&self) -> SpriteGrid {
        self.grid
    }

    #[must_use]
    pub fn ignore_frames(&self) -> &[u32] {
        &self.ignore_frames
    }

    pub fn set_ignore_frames(&mut self, frames: Vec<u32>) {
        self.ignore_frames = frames;
        self.skip_ignored();
    }

    #[must_use]
    pub fn start_frame(&self) -> u32 {
        self.start_frame
    }

    /// Stored end frame; `-1` stands for the last frame of the grid.
    #[must_use]
    pub fn end_frame(&self) -> i64 {
        self.end_frame
    }

    #[must_use]
    pub fn resolved_end_frame(&self) -> u32 {
        match u32::try_from(self.end_frame) {
            Ok(end) => end,
            Err(_) => self.grid.last_frame(),
        }
    }

    /// Set the playback range and restart range mode from `start`.
    pub fn set_range(&mut self, start: u32, end: i64) {
        self.start_frame = start;
        self.end_frame = end;
        self.frame_index = start;
        self.skip_ignored();
    }

    #[must_use]
    pub fn pattern(&self) -> Option<&[String]> {
        self.pattern.as_deref()
    }

    /// The construction-time pattern that [`Sprite::restore_pattern`] returns to.
    #[must_use]
    pub fn original_pattern(&self) -> Option<&[String]> {
        self.original_pattern.as_deref()
    }

    /// Compiled pattern frames; empty in range mode.
    #[must_use]
    pub fn frames(&self) -> &[u32] {
        &self.frames
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale;
    }

    #[must_use]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
        self.debug_dirty = true;
    }

    #[must_use]
    pub fn controller(&self) -> Option<ControllerId> {
        self.controller
    }

    // --- geometry ---

    /// Size of one grid cell on the source image.
    #[must_use]
    pub fn frame_size(&self) -> (f64, f64) {
        (self.frame_width, self.frame_height)
    }

    /// Drawn width: frame width times scale.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.frame_width * self.scale
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.frame_height * self.scale
    }

    /// Rescale so the drawn width becomes `width`.
    pub fn set_width(&mut self, width: f64) {
        if self.frame_width > 0.0 {
            self.scale = width / self.frame_width;
        }
    }

    /// Rescale so the drawn height becomes `height`.
    pub fn set_height(&mut self, height: f64) {
        if self.frame_height > 0.0 {
            self.scale = height / self.frame_height;
        }
    }

    #[must_use]
    pub fn bounds(&self, position: Vector) -> Region {
        Region::new(position.x, position.y, self.width(), self.height())
    }

    // --- asset ---

    #[must_use]
    pub fn asset_state(&self) -> AssetState {
        self.asset
    }

    /// The image finished loading with the given natural size.
    pub(crate) fn asset_loaded(&mut self, image_width: f64, image_height: f64) {
        self.frame_width = image_width / f64::from(self.grid.cols.max(1));
        self.frame_height = image_height / f64::from(self.grid.rows.max(1));
        self.asset = AssetState::Ready;
        self.paused = false;
    }

    pub(crate) fn asset_failed(&mut self) {
        self.asset = AssetState::Failed;
    }

    // --- playback ---

    #[must_use]
    pub fn is_playing(&self) -> bool {
        !self.paused
    }

    /// Frame index that the next draw shows.
    #[must_use]
    pub fn current_frame(&self) -> u32 {
        if self.frames.is_empty() {
            self.frame_index
        } else {
            self.frames[self.cursor.min(self.frames.len() - 1)]
        }
    }

    /// Position of the pattern cursor in [`Sprite::frames`].
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Resume playback, optionally switching to a new pattern first.
    pub(crate) fn play(&mut self, pattern: Option<Vec<String>>) {
        if let Some(pattern) = pattern {
            self.set_pattern(Some(pattern));
        }
        self.paused = false;
    }

    pub(crate) fn pause(&mut self) {
        self.paused = true;
    }

    /// Return to the construction-time pattern (or range mode when it had none).
    pub(crate) fn restore_pattern(&mut self) {
        self.set_pattern(self.original_pattern.clone());
    }

    fn set_pattern(&mut self, pattern: Option<Vec<String>>) {
        self.frames = pattern
            .as_deref()
            .map(|p| compile_pattern(p, self.grid))
            .unwrap_or_default();
        self.pattern = pattern;
        self.cursor = 0;
        self.frame_index = self.start_frame;
        self.skip_ignored();
        self.debug_dirty = true;
    }

    /// Step forward once if a full frame budget has passed since the last
    /// step. A non-looping sprite pauses on its final frame.
    pub(crate) fn advance(&mut self, frame: &FrameContext) -> Option<PlaybackChange> {
        if self.paused || self.speed <= 0.0 {
            return None;
        }
        if frame.time - self.last_advance < frame.frame_duration / self.speed {
            return None;
        }
        self.last_advance = frame.time;
        self.debug_dirty = true;

        if self.frames.is_empty() {
            if self.frame_index >= self.resolved_end_frame() {
                if !self.looping {
                    self.paused = true;
                    return Some(PlaybackChange::Paused);
                }
                self.frame_index = self.start_frame;
            } else {
                self.frame_index += 1;
            }
            self.skip_ignored();
        } else if self.cursor + 1 >= self.frames.len() {
            if !self.looping {
                self.paused = true;
                return Some(PlaybackChange::Paused);
            }
            self.cursor = 0;
        } else {
            self.cursor += 1;
        }
        None
    }

    /// Move the range cursor past ignored frames, wrapping to the start
    /// once it runs off the end.
    fn skip_ignored(&mut self) {
        if !self.frames.is_empty() {
            return;
        }
        let end = self.resolved_end_frame();
        while self.ignore_frames.contains(&self.frame_index) {
            if self.frame_index >= end {
                self.frame_index = self.start_frame;
                break;
            }
            self.frame_index += 1;
        }
    }

    // --- drawing ---

    #[must_use]
    pub fn is_debugging(&self) -> bool {
        self.debug
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
        self.debug_dirty = true;
    }

    /// Draw-and-advance for one tick. Invisible sprites neither draw nor advance.
    pub(crate) fn update(
        &mut self,
        position: Vector,
        rotation: f64,
        visible: bool,
        frame: &FrameContext,
        surface: &mut dyn Surface,
    ) -> Result<Option<PlaybackChange>, crate::error::DrawError> {
        if !visible {
            return Ok(None);
        }
        if self.asset != AssetState::Ready {
            self.draw_placeholder(position, surface);
            return Ok(None);
        }
        self.draw(position, rotation, frame, surface)?;
        Ok(self.advance(frame))
    }

    pub(crate) fn draw(
        &mut self,
        position: Vector,
        rotation: f64,
        frame: &FrameContext,
        surface: &mut dyn Surface,
    ) -> DrawResult {
        if self.asset != AssetState::Ready {
            self.draw_placeholder(position, surface);
            return Ok(());
        }
        surface.save();
        let result = self.draw_frame(position, rotation, frame, surface);
        surface.restore();
        result
    }

    fn draw_placeholder(&self, position: Vector, surface: &mut dyn Surface) {
        surface.set_fill_style(PLACEHOLDER_FILL);
        surface.fill_rect(self.bounds(position));
    }

    fn draw_frame(
        &mut self,
        position: Vector,
        rotation: f64,
        frame: &FrameContext,
        surface: &mut dyn Surface,
    ) -> DrawResult {
        let index = self.current_frame();
        let (col, row) = self.grid.cell(index);
        let source = Region::new(
            f64::from(col) * self.frame_width,
            f64::from(row) * self.frame_height,
            self.frame_width,
            self.frame_height,
        );
        let dest = Region::new(0.0, 0.0, self.width(), self.height());

        surface.translate(position.x, position.y)?;
        surface.rotate(rotation)?;

        if self.debug {
            surface.set_fill_style("rgba(255, 0, 0, 0.2)");
            surface.fill_rect(dest);
            surface.set_stroke_style("red");
            surface.set_line_width(1.0);
            surface.stroke_rect(dest);

            if self.debug_dirty || frame.time - self.last_debug_refresh > DEBUG_TEXT_REFRESH_MS {
                self.debug_text = format!("F:{index} S:{}x", self.speed);
                self.debug_dirty = false;
                self.last_debug_refresh = frame.time;
            }
            surface.set_fill_style("rgba(0, 0, 0, 0.8)");
            surface.fill_rect(Region::new(0.0, -20.0, 80.0, 18.0));
            surface.set_fill_style("white");
            surface.set_font("12px Arial");
            surface.fill_text(&self.debug_text, 2.0, -6.0)?;
        }

        surface.draw_image(&self.src, source, dest)
    }
}
