//! Per-frame draw list
//!
//! Built from a read-only view of the session, so rendering can never touch
//! simulation state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::assets::{AssetRegistry, TextureInfo};
use crate::hud::{self, HudElement};
use crate::sim::{CLOUD_SIZE, Entity, GamePhase, Session, TextureId};

/// Depth of each layer, back to front
pub mod depth {
    pub const SKY: f32 = -0.5;
    pub const CLOUDS: f32 = -0.4;
    pub const BUSHES: f32 = -0.3;
    pub const ENTITIES: f32 = 0.0;
    pub const HUD: f32 = 0.9;
}

/// Bush quad size in pixels
pub const BUSH_SIZE: Vec2 = Vec2::new(80.0, 120.0);
/// Left edge of the left bush
const BUSH_MARGIN: f32 = 20.0;
/// The sky texture is cropped to its lower part starting here (texture space)
const SKY_CROP_T: f32 = 0.30;

/// One textured quad
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteDraw {
    pub texture: TextureId,
    /// Centre in world pixels
    pub center: Vec2,
    pub size: Vec2,
    /// Degrees, counter-clockwise
    pub rotation_deg: f32,
    /// Texture-space offset of the frame
    pub uv_offset: Vec2,
    /// Texture-space size of the frame
    pub uv_scale: Vec2,
    pub depth: f32,
}

impl SpriteDraw {
    /// Whole texture, no rotation
    pub fn plain(texture: TextureId, center: Vec2, size: Vec2, depth: f32) -> Self {
        Self {
            texture,
            center,
            size,
            rotation_deg: 0.0,
            uv_offset: Vec2::ZERO,
            uv_scale: Vec2::ONE,
            depth,
        }
    }

    /// Current animation frame of an entity
    pub fn entity(entity: &Entity) -> Self {
        let sprite = &entity.sprite;
        Self {
            texture: entity.kind().texture(),
            center: sprite.pos,
            size: sprite.size,
            rotation_deg: sprite.angle,
            uv_offset: sprite.frame_offset(),
            uv_scale: sprite.grid().frame_scale(),
            depth: depth::ENTITIES,
        }
    }

    /// HUD element as a quad centred in its rectangle
    pub fn hud(element: &HudElement) -> Self {
        Self::plain(element.texture, element.rect.center(), element.rect.size, depth::HUD)
    }
}

/// Something that can put quads on screen
pub trait Renderer {
    fn draw_sprite(&mut self, sprite: &SpriteDraw);
    fn draw_hud(&mut self, element: &HudElement);
}

/// Everything drawn in one frame: scene sprites back to front, then HUD
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub sprites: Vec<SpriteDraw>,
    pub hud: Vec<HudElement>,
}

impl Frame {
    pub fn build(session: &Session, assets: &AssetRegistry) -> Self {
        let mut sprites = background(session, assets);

        if session.phase == GamePhase::Playing {
            if assets.basket.is_some() {
                sprites.push(SpriteDraw::entity(&session.basket));
            }
            sprites.extend(
                session
                    .entities
                    .iter()
                    .filter(|e| e.active && e.kind().texture() != TextureId::NONE)
                    .map(SpriteDraw::entity),
            );
        }

        Self {
            sprites,
            hud: hud::layout(session, assets),
        }
    }

    pub fn submit(&self, renderer: &mut impl Renderer) {
        for sprite in &self.sprites {
            renderer.draw_sprite(sprite);
        }
        for element in &self.hud {
            renderer.draw_hud(element);
        }
    }
}

/// Sky, clouds and bushes
fn background(session: &Session, assets: &AssetRegistry) -> Vec<SpriteDraw> {
    let screen = session.screen;
    let parallax = &session.parallax;
    let cfg = parallax.config();
    let mut sprites = Vec::new();

    if let Some(sky) = assets.sky {
        let offset = parallax.layer_offset(cfg.layer1_scroll_rate, screen.x);
        sprites.push(SpriteDraw {
            uv_offset: Vec2::new(0.0, SKY_CROP_T),
            uv_scale: Vec2::new(1.0, 1.0 - SKY_CROP_T),
            ..SpriteDraw::plain(
                sky.id,
                Vec2::new(screen.x / 2.0 + offset, screen.y / 2.0),
                screen,
                depth::SKY,
            )
        });
    }

    for (texture, center) in assets.clouds.iter().zip(parallax.cloud_positions(screen.y)) {
        if let Some(cloud) = texture {
            sprites.push(SpriteDraw::plain(cloud.id, center, CLOUD_SIZE, depth::CLOUDS));
        }
    }

    let scroll = parallax.layer_offset(cfg.layer3_scroll_rate, screen.x);
    let swing = parallax.bush_offset();
    let shake = parallax.middle_shake();
    let half = BUSH_SIZE / 2.0;
    let bushes: [(Option<TextureInfo>, Vec2); 3] = [
        (
            assets.bush_left,
            Vec2::new(BUSH_MARGIN + half.x + swing, half.y),
        ),
        (
            assets.bush_middle,
            Vec2::new(screen.x / 2.0, half.y) + shake,
        ),
        (
            assets.bush_right,
            Vec2::new(screen.x - BUSH_MARGIN - half.x - swing, half.y),
        ),
    ];
    for (texture, center) in bushes {
        if let Some(bush) = texture {
            let center = center + Vec2::new(scroll, 0.0);
            sprites.push(SpriteDraw::plain(bush.id, center, BUSH_SIZE, depth::BUSHES));
        }
    }

    sprites
}
