//! Movable entities: the basket, fruit and insects

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::sprite::{SheetGrid, Sprite};
use crate::consts::*;

/// Opaque texture handle handed out by the asset registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TextureId(pub u32);

impl TextureId {
    /// Placeholder used when an asset set is empty
    pub const NONE: TextureId = TextureId(0);
}

/// Entity classification without payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Basket,
    Fruit,
    Insect,
}

/// How an insect is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InsectLook {
    /// Single sprite that spins while falling
    Still(TextureId),
    /// Sprite sheet cycling frames, no spin
    Animated(TextureId),
}

/// Entity variant with category-specific data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Basket { texture: TextureId },
    Fruit { texture: TextureId },
    Insect { look: InsectLook },
}

impl EntityKind {
    pub fn category(&self) -> Category {
        match self {
            EntityKind::Basket { .. } => Category::Basket,
            EntityKind::Fruit { .. } => Category::Fruit,
            EntityKind::Insect { .. } => Category::Insect,
        }
    }

    pub fn texture(&self) -> TextureId {
        match *self {
            EntityKind::Basket { texture } | EntityKind::Fruit { texture } => texture,
            EntityKind::Insect {
                look: InsectLook::Still(texture) | InsectLook::Animated(texture),
            } => texture,
        }
    }

    /// Animated entities cycle sheet frames instead of rotating
    pub fn is_animated(&self) -> bool {
        matches!(
            self,
            EntityKind::Insect {
                look: InsectLook::Animated(_)
            }
        )
    }
}

/// A sprite that moves, spins and belongs to a category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub sprite: Sprite,
    /// Pixels per second
    pub vel: Vec2,
    /// Degrees per second (signed)
    rotation_speed: f32,
    kind: EntityKind,
    /// Inactive entities are removed at the end of the tick
    pub active: bool,
}

impl Entity {
    pub fn new(id: u32, kind: EntityKind, sprite: Sprite, vel: Vec2, rotation_speed: f32) -> Self {
        Self {
            id,
            sprite,
            vel,
            rotation_speed,
            kind,
            active: true,
        }
    }

    /// The player's basket, centred horizontally near the bottom edge
    pub fn basket(id: u32, texture: TextureId, screen_width: f32) -> Self {
        let sprite = Sprite::new(
            Vec2::new(screen_width / 2.0, BASKET_Y),
            Vec2::new(BASKET_WIDTH, BASKET_HEIGHT),
            SheetGrid::SINGLE,
            0.0,
        );
        Self::new(id, EntityKind::Basket { texture }, sprite, Vec2::ZERO, 0.0)
    }

    #[inline]
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    #[inline]
    pub fn category(&self) -> Category {
        self.kind.category()
    }

    #[inline]
    pub fn is_animated(&self) -> bool {
        self.kind.is_animated()
    }

    #[inline]
    pub fn rotation_speed(&self) -> f32 {
        self.rotation_speed
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.sprite.pos
    }

    /// Advance position by velocity; spin only non-animated entities
    pub fn integrate(&mut self, dt: f32) {
        self.sprite.translate(self.vel * dt);
        if !self.is_animated() {
            // Full wrap into [0, 360) even for large spin * dt products
            self.sprite.angle =
                crate::normalize_degrees(self.sprite.angle + self.rotation_speed * dt);
        }
    }
}
