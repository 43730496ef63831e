//! Sprite geometry and sprite-sheet animation
//!
//! A sprite is a centred box in world pixels plus a rotation and a grid of
//! animation frames. Frame timing is an accumulator fed by the tick's `dt`,
//! so playback is independent of any wall clock.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::DEFAULT_FPS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpriteError {
    #[error("sprite sheet grid must be at least 1x1, got {rows}x{cols}")]
    InvalidGrid { rows: i32, cols: i32 },
}

/// Row/column layout of a sprite sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetGrid {
    rows: u32,
    cols: u32,
}

impl SheetGrid {
    /// A single-frame texture
    pub const SINGLE: SheetGrid = SheetGrid { rows: 1, cols: 1 };

    pub fn new(rows: i32, cols: i32) -> Result<Self, SpriteError> {
        if rows <= 0 || cols <= 0 {
            return Err(SpriteError::InvalidGrid { rows, cols });
        }
        Ok(Self {
            rows: rows as u32,
            cols: cols as u32,
        })
    }

    #[inline]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Size of one frame in texture space
    pub fn frame_scale(&self) -> Vec2 {
        Vec2::new(1.0 / self.cols as f32, 1.0 / self.rows as f32)
    }
}

impl Default for SheetGrid {
    fn default() -> Self {
        Self::SINGLE
    }
}

/// Current frame plus the time accumulated toward the next one
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationClock {
    pub row: u32,
    pub col: u32,
    /// Seconds since the last frame change
    pub elapsed: f32,
    /// Frames per second
    pub fps: f32,
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self {
            row: 0,
            col: 0,
            elapsed: 0.0,
            fps: DEFAULT_FPS,
        }
    }
}

/// Position, size, rotation and animation state of one visual entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    /// Centre of the sprite (world pixels, origin bottom-left)
    pub pos: Vec2,
    /// Width/height in pixels
    pub size: Vec2,
    /// Rotation in degrees, [0, 360)
    pub angle: f32,
    grid: SheetGrid,
    clock: AnimationClock,
}

impl Sprite {
    pub fn new(pos: Vec2, size: Vec2, grid: SheetGrid, angle: f32) -> Self {
        Self {
            pos,
            size,
            angle: crate::normalize_degrees(angle),
            grid,
            clock: AnimationClock::default(),
        }
    }

    /// Build from raw row/column counts, rejecting empty grids
    pub fn with_grid(
        pos: Vec2,
        size: Vec2,
        rows: i32,
        cols: i32,
        angle: f32,
    ) -> Result<Self, SpriteError> {
        Ok(Self::new(pos, size, SheetGrid::new(rows, cols)?, angle))
    }

    #[inline]
    pub fn grid(&self) -> SheetGrid {
        self.grid
    }

    #[inline]
    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    /// Current (row, column)
    #[inline]
    pub fn frame(&self) -> (u32, u32) {
        (self.clock.row, self.clock.col)
    }

    pub fn fps(&self) -> f32 {
        self.clock.fps
    }

    /// Non-positive rates freeze the animation
    pub fn set_fps(&mut self, fps: f32) {
        self.clock.fps = fps;
    }

    /// Select an animation row. Out-of-range rows are ignored.
    pub fn set_row(&mut self, row: u32) -> bool {
        if row < self.grid.rows {
            self.clock.row = row;
            true
        } else {
            false
        }
    }

    /// Feed `dt` into the frame clock; advances at most one frame per call.
    ///
    /// Returns true when the column changed.
    pub fn advance_animation(&mut self, dt: f32) -> bool {
        if self.grid.cols <= 1 || self.clock.fps <= 0.0 {
            return false;
        }
        self.clock.elapsed += dt;
        if self.clock.elapsed >= 1.0 / self.clock.fps {
            self.clock.col = (self.clock.col + 1) % self.grid.cols;
            self.clock.elapsed = 0.0;
            return true;
        }
        false
    }

    /// Offset of the current frame in texture space
    pub fn frame_offset(&self) -> Vec2 {
        let scale = self.grid.frame_scale();
        Vec2::new(
            self.clock.col as f32 * scale.x,
            self.clock.row as f32 * scale.y,
        )
    }

    /// Half of the box size
    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        self.size * 0.5
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.pos += delta;
    }
}
