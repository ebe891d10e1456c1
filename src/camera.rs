//! Follow camera.
//!
//! Renderer-facing only; the simulation never reads it. The runner updates
//! it after each frame's ticks and hands it to the draw call.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Top-left corner of the visible window, in level coordinates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Camera {
    pub pos: Vec2,
    pub viewport: Vec2,
}

impl Camera {
    pub fn new(viewport: Vec2) -> Self {
        Self {
            pos: Vec2::ZERO,
            viewport,
        }
    }

    /// Center on `target`, clamped so the view never leaves the level.
    /// Levels smaller than the viewport pin to the origin.
    pub fn follow(&mut self, target: Vec2, level_size: Vec2) {
        let max = (level_size - self.viewport).max(Vec2::ZERO);
        self.pos = (target - self.viewport * 0.5).clamp(Vec2::ZERO, max);
    }

    #[inline]
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        world - self.pos
    }
}
