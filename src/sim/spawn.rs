//! Spawn cadence, difficulty escalation and new falling objects
//!
//! Difficulty only ever ramps up: every `difficulty_increase_rate` seconds of
//! play the level goes up, spawns come faster and objects fall faster, each
//! bounded by its configured limit.

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityKind, InsectLook, TextureId};
use super::sprite::{SheetGrid, Sprite};
use crate::config::GameplayConfig;
use crate::consts::*;

/// An animated sprite sheet available for insects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetInfo {
    pub texture: TextureId,
    pub grid: SheetGrid,
}

/// Textures the spawner can pick from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpawnCatalog {
    pub fruits: Vec<TextureId>,
    pub insects: Vec<TextureId>,
    pub sheets: Vec<SheetInfo>,
}

/// Timers and escalating parameters for spawning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnController {
    /// Seconds since the last spawn
    pub spawn_timer: f32,
    /// Seconds between spawns
    pub spawn_interval: f32,
    /// Fall speed given to new objects (pixels/second)
    pub fall_speed: f32,
    /// Seconds since the last level-up
    pub difficulty_timer: f32,
    /// Current difficulty level (starts at 1)
    pub level: u32,
    tuning: GameplayConfig,
}

impl SpawnController {
    pub fn new(tuning: &GameplayConfig) -> Self {
        Self {
            spawn_timer: 0.0,
            spawn_interval: tuning.base_spawn_interval,
            fall_speed: tuning.base_fall_speed,
            difficulty_timer: 0.0,
            level: 1,
            tuning: tuning.clone(),
        }
    }

    /// Restore level 1 parameters
    pub fn reset(&mut self) {
        self.spawn_timer = 0.0;
        self.spawn_interval = self.tuning.base_spawn_interval;
        self.fall_speed = self.tuning.base_fall_speed;
        self.difficulty_timer = 0.0;
        self.level = 1;
    }

    /// Accumulate `dt`; returns true when exactly one spawn is due
    pub fn advance_spawn(&mut self, dt: f32) -> bool {
        self.spawn_timer += dt;
        if self.spawn_timer >= self.spawn_interval {
            self.spawn_timer = 0.0;
            true
        } else {
            false
        }
    }

    /// Accumulate play time; returns true on a level-up
    pub fn advance_difficulty(&mut self, dt: f32) -> bool {
        self.difficulty_timer += dt;
        if self.difficulty_timer < self.tuning.difficulty_increase_rate {
            return false;
        }

        self.level += 1;
        self.difficulty_timer = 0.0;
        self.spawn_interval = (self.spawn_interval - self.tuning.spawn_interval_step)
            .max(self.tuning.min_spawn_interval);
        self.fall_speed =
            (self.fall_speed + self.tuning.fall_speed_step).min(self.tuning.max_fall_speed);

        log::info!(
            "Level {} - spawn interval {:.2}s, fall speed {:.0}px/s",
            self.level,
            self.spawn_interval,
            self.fall_speed
        );
        true
    }
}

/// Random spin in `[min, max)` degrees/second with a random direction
fn random_spin(rng: &mut impl Rng, min: f32, max: f32) -> f32 {
    let speed = rng.random_range(min..max);
    if rng.random_bool(0.5) { -speed } else { speed }
}

/// Create a new falling object just above the top edge
pub fn spawn_entity(
    rng: &mut impl Rng,
    id: u32,
    catalog: &SpawnCatalog,
    screen: Vec2,
    fall_speed: f32,
    fruit_chance: u32,
) -> Entity {
    let x = if screen.x - SPAWN_MARGIN > SPAWN_MARGIN {
        rng.random_range(SPAWN_MARGIN..screen.x - SPAWN_MARGIN)
    } else {
        screen.x / 2.0
    };
    let pos = Vec2::new(x, screen.y + SPAWN_ABOVE);
    let size = Vec2::splat(FALLING_SIZE);
    let vel = Vec2::new(0.0, -fall_speed);

    let is_fruit = rng.random_range(0..100) < fruit_chance;
    if is_fruit {
        let texture = catalog.fruits.choose(rng).copied().unwrap_or(TextureId::NONE);
        let spin = random_spin(rng, FRUIT_SPIN_MIN, FRUIT_SPIN_MAX);
        let sprite = Sprite::new(pos, size, SheetGrid::SINGLE, 0.0);
        return Entity::new(id, EntityKind::Fruit { texture }, sprite, vel, spin);
    }

    let animated = !catalog.sheets.is_empty() && rng.random_range(0..100) < ANIMATED_INSECT_CHANCE;
    if animated {
        if let Some(sheet) = catalog.sheets.choose(rng) {
            let mut sprite = Sprite::new(pos, size, sheet.grid, 0.0);
            sprite.set_fps(INSECT_FPS);
            log::debug!(
                "Animated insect {id} spawned ({}x{} frames)",
                sheet.grid.rows(),
                sheet.grid.cols()
            );
            let kind = EntityKind::Insect {
                look: InsectLook::Animated(sheet.texture),
            };
            return Entity::new(id, kind, sprite, vel, 0.0);
        }
    }

    let texture = catalog.insects.choose(rng).copied().unwrap_or(TextureId::NONE);
    let spin = random_spin(rng, INSECT_SPIN_MIN, INSECT_SPIN_MAX);
    let sprite = Sprite::new(pos, size, SheetGrid::SINGLE, 0.0);
    let kind = EntityKind::Insect {
        look: InsectLook::Still(texture),
    };
    Entity::new(id, kind, sprite, vel, spin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::Category;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn catalog() -> SpawnCatalog {
        SpawnCatalog {
            fruits: vec![TextureId(1), TextureId(2)],
            insects: vec![TextureId(10)],
            sheets: vec![SheetInfo {
                texture: TextureId(20),
                grid: SheetGrid::new(1, 6).unwrap(),
            }],
        }
    }

    #[test]
    fn test_spawn_timer_fires_once_and_resets() {
        let mut spawner = SpawnController::new(&GameplayConfig::default());
        assert!(!spawner.advance_spawn(1.0));
        assert!(spawner.advance_spawn(0.5));
        assert_eq!(spawner.spawn_timer, 0.0);
        assert!(!spawner.advance_spawn(0.1));
    }

    #[test]
    fn test_difficulty_scenario_hits_floor() {
        let tuning = GameplayConfig {
            base_spawn_interval: 1.5,
            min_spawn_interval: 0.3,
            difficulty_increase_rate: 10.0,
            ..Default::default()
        };
        let mut spawner = SpawnController::new(&tuning);
        let mut level_ups = 0;
        for _ in 0..1000 {
            if spawner.advance_difficulty(0.1) {
                level_ups += 1;
            }
        }
        assert_eq!(level_ups, 10);
        assert_eq!(spawner.level, 11);
        assert_eq!(spawner.spawn_interval, 0.3);
        assert_eq!(spawner.fall_speed, 200.0);
    }

    #[test]
    fn test_fall_speed_capped() {
        let tuning = GameplayConfig {
            base_fall_speed: 480.0,
            max_fall_speed: 500.0,
            difficulty_increase_rate: 1.0,
            ..Default::default()
        };
        let mut spawner = SpawnController::new(&tuning);
        for _ in 0..5 {
            spawner.advance_difficulty(1.0);
        }
        assert_eq!(spawner.fall_speed, 500.0);
    }

    #[test]
    fn test_reset_restores_base() {
        let tuning = GameplayConfig::default();
        let mut spawner = SpawnController::new(&tuning);
        spawner.advance_spawn(0.7);
        spawner.advance_difficulty(10.0);
        spawner.reset();
        assert_eq!(spawner.level, 1);
        assert_eq!(spawner.spawn_timer, 0.0);
        assert_eq!(spawner.difficulty_timer, 0.0);
        assert_eq!(spawner.spawn_interval, tuning.base_spawn_interval);
        assert_eq!(spawner.fall_speed, tuning.base_fall_speed);
    }

    #[test]
    fn test_spawned_entities_follow_rules() {
        let mut rng = Pcg32::seed_from_u64(7);
        let screen = Vec2::new(800.0, 600.0);
        let catalog = catalog();
        let (mut fruits, mut insects) = (0, 0);

        for id in 0..500 {
            let e = spawn_entity(&mut rng, id, &catalog, screen, 120.0, 70);
            assert!(e.pos().x >= 50.0 && e.pos().x < 750.0);
            assert_eq!(e.pos().y, 650.0);
            assert_eq!(e.vel, Vec2::new(0.0, -120.0));
            assert_eq!(e.sprite.size, Vec2::splat(FALLING_SIZE));

            let spin = e.rotation_speed().abs();
            match e.kind() {
                EntityKind::Fruit { texture } => {
                    fruits += 1;
                    assert!(catalog.fruits.contains(&texture));
                    assert!((50.0..150.0).contains(&spin));
                }
                EntityKind::Insect {
                    look: InsectLook::Animated(texture),
                } => {
                    insects += 1;
                    assert_eq!(texture, TextureId(20));
                    assert_eq!(spin, 0.0);
                    assert_eq!(e.sprite.fps(), INSECT_FPS);
                }
                EntityKind::Insect {
                    look: InsectLook::Still(texture),
                } => {
                    insects += 1;
                    assert_eq!(texture, TextureId(10));
                    assert!((100.0..250.0).contains(&spin));
                }
                EntityKind::Basket { .. } => panic!("spawner never makes baskets"),
            }
        }
        // 70/30 split, loosely
        assert!(fruits > 300 && insects > 100, "{fruits} fruits, {insects} insects");
    }

    #[test]
    fn test_no_sheets_means_still_insects() {
        let mut rng = Pcg32::seed_from_u64(3);
        let catalog = SpawnCatalog {
            sheets: Vec::new(),
            ..catalog()
        };
        for id in 0..100 {
            let e = spawn_entity(&mut rng, id, &catalog, Vec2::new(800.0, 800.0), 100.0, 0);
            assert_eq!(e.category(), Category::Insect);
            assert!(!e.is_animated());
        }
    }

    #[test]
    fn test_narrow_screen_spawns_centered() {
        let mut rng = Pcg32::seed_from_u64(1);
        let e = spawn_entity(
            &mut rng,
            0,
            &SpawnCatalog::default(),
            Vec2::new(80.0, 400.0),
            100.0,
            100,
        );
        assert_eq!(e.pos().x, 40.0);
        assert_eq!(e.kind().texture(), TextureId::NONE);
    }
}
