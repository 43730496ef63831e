//! Background decoration motion
//!
//! Purely cosmetic: scrolling layer offsets, drifting clouds and swaying
//! bushes. Nothing here feeds back into gameplay.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::ParallaxConfig;

/// Cloud sprite size in pixels
pub const CLOUD_SIZE: Vec2 = Vec2::new(150.0, 80.0);
/// Clouds sit this far below the top edge
pub const CLOUD_DROP: f32 = 120.0;

const CLOUD_START_X: [f32; 4] = [200.0, 600.0, 100.0, 500.0];
const CLOUD_SPEED: [f32; 4] = [40.0, 45.0, 35.0, 50.0];
const CLOUD_DIR: [f32; 4] = [1.0, -1.0, 1.0, -1.0];

/// A cloud drifting back and forth across the sky
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cloud {
    pub x: f32,
    /// Pixels per second
    pub speed: f32,
    /// +1 right, -1 left
    pub dir: f32,
}

impl Cloud {
    fn advance(&mut self, dt: f32, width: f32) {
        self.x += self.speed * self.dir * dt;
        if self.x < 0.0 {
            self.x = 0.0;
            self.dir = 1.0;
        } else if self.x > width {
            self.x = width;
            self.dir = -1.0;
        }
    }
}

/// Decoration animator state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parallax {
    /// Global scroll offset (pixels)
    pub offset: f32,
    pub bush_time: f32,
    pub shake_time: f32,
    pub clouds: [Cloud; 4],
    cfg: ParallaxConfig,
}

impl Parallax {
    pub fn new(cfg: &ParallaxConfig) -> Self {
        let clouds = std::array::from_fn(|i| Cloud {
            x: CLOUD_START_X[i],
            speed: CLOUD_SPEED[i],
            dir: CLOUD_DIR[i],
        });
        Self {
            offset: 0.0,
            bush_time: 0.0,
            shake_time: 0.0,
            clouds,
            cfg: cfg.clone(),
        }
    }

    pub fn config(&self) -> &ParallaxConfig {
        &self.cfg
    }

    pub fn advance(&mut self, dt: f32, width: f32) {
        self.offset += self.cfg.parallax_speed * dt;
        self.bush_time += dt * self.cfg.bush_oscillation_speed;
        self.shake_time += dt * self.cfg.bush_middle_shake_speed;
        for cloud in &mut self.clouds {
            cloud.advance(dt, width);
        }
    }

    /// Offset of a layer scrolling at `rate`, wrapped into (-width, width)
    pub fn layer_offset(&self, rate: f32, width: f32) -> f32 {
        if width <= 0.0 {
            return 0.0;
        }
        (self.offset * rate) % width
    }

    /// Horizontal swing of the left bush; the right bush uses the negation
    pub fn bush_offset(&self) -> f32 {
        self.bush_time.sin() * self.cfg.bush_oscillation_amount
    }

    /// Tremor of the middle bush
    pub fn middle_shake(&self) -> Vec2 {
        let amount = self.cfg.bush_middle_shake_amount;
        Vec2::new(
            self.shake_time.sin() * amount,
            (self.shake_time * 1.3).cos() * amount * 0.5,
        )
    }

    /// Centre of each cloud for a screen of the given height
    pub fn cloud_positions(&self, screen_height: f32) -> impl Iterator<Item = Vec2> + '_ {
        let y = screen_height - CLOUD_DROP;
        self.clouds.iter().map(move |c| Vec2::new(c.x, y))
    }
}
