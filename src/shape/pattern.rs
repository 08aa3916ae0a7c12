//! Frame-sequence DSL for sprite playback.
//!
//! A pattern is a list of tokens compiled once into concrete frame indices:
//!
//! | Token | Meaning |
//! |-------|---------|
//! | `"N"` | frame `N` |
//! | `"A:B"` | frames `A..=B`; `B = -1` runs to the last frame of the grid |
//! | `"N(K)"` | frame `N` repeated `K` times |
//!
//! Tokens that don't parse, name a frame outside the grid, or would grow the
//! list past [`MAX_PATTERN_FRAMES`] are skipped with a warning.

#[cfg(test)]
#[path = "pattern_test.rs"]
mod pattern_test;

use std::str::FromStr;

use super::sprite::SpriteGrid;
use crate::consts::MAX_PATTERN_FRAMES;

/// One parsed pattern token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Single(u32),
    Range { start: u32, end: u32 },
    Repeat { frame: u32, count: u32 },
}

impl Token {
    /// Number of frames the token expands to.
    #[must_use]
    pub fn frame_count(self) -> u64 {
        match self {
            Self::Single(_) => 1,
            Self::Range { start, end } => (u64::from(end) + 1).saturating_sub(u64::from(start)),
            Self::Repeat { count, .. } => u64::from(count),
        }
    }

    /// Highest frame index the token plays.
    #[must_use]
    pub fn max_frame(self) -> u32 {
        match self {
            Self::Single(frame) | Self::Repeat { frame, .. } => frame,
            Self::Range { start, end } => start.max(end),
        }
    }

    fn push_frames(self, out: &mut Vec<u32>) {
        match self {
            Self::Single(frame) => out.push(frame),
            Self::Range { start, end } => out.extend(start..=end),
            Self::Repeat { frame, count } => {
                out.extend(std::iter::repeat_n(frame, count as usize));
            }
        }
    }
}

/// Parse a single token against a grid whose last frame index is `last_frame`.
///
/// A range whose end precedes its start parses but yields no frames.
#[must_use]
pub fn parse_token(token: &str, last_frame: u32) -> Option<Token> {
    let token = token.trim();

    if let Some((start, end)) = token.split_once(':') {
        let end = if number::<i64>(end)? == -1 { last_frame } else { number(end)? };
        return Some(Token::Range { start: number(start)?, end });
    }

    if let Some(body) = token.strip_suffix(')') {
        let (frame, count) = body.split_once('(')?;
        return Some(Token::Repeat { frame: number(frame)?, count: number(count)? });
    }

    number(token).map(Token::Single)
}

fn number<T: FromStr>(text: &str) -> Option<T> {
    match text.trim().parse() {
        Ok(n) => Some(n),
        Err(_) => None,
    }
}

/// Compile `pattern` into the flat frame list played by the cursor.
#[must_use]
pub fn compile_pattern<S: AsRef<str>>(pattern: &[S], grid: SpriteGrid) -> Vec<u32> {
    let last = grid.last_frame();
    let mut frames = Vec::new();
    for raw in pattern {
        let raw = raw.as_ref();
        let Some(token) = parse_token(raw, last) else {
            tracing::warn!(token = raw, "skipping malformed sprite pattern token");
            continue;
        };
        if token.frame_count() > 0 && token.max_frame() > last {
            tracing::warn!(token = raw, last_frame = last, "skipping sprite pattern token outside the grid");
            continue;
        }
        if frames.len() as u64 + token.frame_count() > MAX_PATTERN_FRAMES as u64 {
            tracing::warn!(token = raw, limit = MAX_PATTERN_FRAMES, "skipping sprite pattern token past the frame limit");
            continue;
        }
        token.push_frames(&mut frames);
    }
    frames
}
