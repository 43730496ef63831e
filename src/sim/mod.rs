//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time only advances through the `dt` handed to `tick`
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod entity;
pub mod parallax;
pub mod spawn;
pub mod sprite;
pub mod state;
pub mod tick;

pub use collision::{Aabb, overlaps};
pub use entity::{Category, Entity, EntityKind, InsectLook, TextureId};
pub use parallax::{CLOUD_DROP, CLOUD_SIZE, Cloud, Parallax};
pub use spawn::{SheetInfo, SpawnCatalog, SpawnController, spawn_entity};
pub use sprite::{AnimationClock, SheetGrid, Sprite, SpriteError};
pub use state::{GameEvent, GamePhase, Session};
pub use tick::{TickInput, clamp_basket_x, tick};
