//! Rendering seam
//!
//! The game never talks to a graphics API directly. Each frame it builds a
//! [`Frame`] of textured quads and HUD rectangles and hands it to a
//! [`Renderer`]; vertex data is computed on the CPU for backends that want
//! ready-made buffers.

pub mod frame;
pub mod vertex;

use std::collections::BTreeMap;

use glam::{Mat4, Vec2};

pub use frame::{BUSH_SIZE, Frame, Renderer, SpriteDraw, depth};
pub use vertex::{SpriteVertex, model_matrix, projection, quad_vertices};

use crate::hud::HudElement;
use crate::sim::TextureId;

/// Renderer for headless runs: builds the vertex data, projects it to clip
/// space and counts draws
#[derive(Debug)]
pub struct CountingRenderer {
    pub sprites: u64,
    pub hud_elements: u64,
    /// Draws whose quad lies entirely outside the view
    pub offscreen: u64,
    pub vertices: Vec<SpriteVertex>,
    /// Draw calls per texture
    pub per_texture: BTreeMap<u32, u64>,
    projection: Mat4,
}

impl CountingRenderer {
    pub fn new(screen: Vec2) -> Self {
        Self {
            sprites: 0,
            hud_elements: 0,
            offscreen: 0,
            vertices: Vec::new(),
            per_texture: BTreeMap::new(),
            projection: projection(screen),
        }
    }

    pub fn draws_of(&self, texture: TextureId) -> u64 {
        self.per_texture.get(&texture.0).copied().unwrap_or(0)
    }

    fn record(&mut self, draw: &SpriteDraw) {
        self.vertices.clear();
        self.vertices.extend(quad_vertices(draw));
        let clip: Vec<Vec2> = self
            .vertices
            .iter()
            .map(|v| self.projection.project_point3(v.position.into()).truncate())
            .collect();
        let outside = clip.iter().all(|p| p.x < -1.0)
            || clip.iter().all(|p| p.x > 1.0)
            || clip.iter().all(|p| p.y < -1.0)
            || clip.iter().all(|p| p.y > 1.0);
        if outside {
            self.offscreen += 1;
        }
        *self.per_texture.entry(draw.texture.0).or_default() += 1;
    }
}

impl Renderer for CountingRenderer {
    fn draw_sprite(&mut self, sprite: &SpriteDraw) {
        self.sprites += 1;
        self.record(sprite);
    }

    fn draw_hud(&mut self, element: &HudElement) {
        self.hud_elements += 1;
        self.record(&SpriteDraw::hud(element));
    }
}
