//! Session state and core simulation types
//!
//! Everything a run needs to be replayed from its seed lives here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Category, Entity, TextureId};
use super::parallax::Parallax;
use super::spawn::{SpawnCatalog, SpawnController};
use crate::config::{GameConfig, GameplayConfig};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for start input
    Menu,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for restart input
    GameOver,
}

/// Things that happened during a tick, for audio and logging
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Spawned { id: u32, category: Category },
    FruitCaught { score: u32 },
    InsectCaught { lives: u32 },
    LevelUp {
        level: u32,
        spawn_interval: f32,
        fall_speed: f32,
    },
    GameOver { score: u32 },
}

/// Complete session state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct Session {
    /// Screen size in pixels
    pub screen: Vec2,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub score: u32,
    pub lives: u32,
    pub phase: GamePhase,
    /// Player basket
    pub basket: Entity,
    /// Falling fruit and insects (spawn order)
    pub entities: Vec<Entity>,
    pub spawner: SpawnController,
    pub parallax: Parallax,
    pub catalog: SpawnCatalog,
    /// Simulation tick counter
    pub time_ticks: u64,
    gameplay: GameplayConfig,
    basket_texture: TextureId,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl Session {
    /// Create a session in the menu phase
    pub fn new(
        config: &GameConfig,
        catalog: SpawnCatalog,
        basket_texture: TextureId,
        seed: u64,
    ) -> Self {
        let mut config = config.clone();
        config.sanitize();
        let (width, height) = config.screen_size();
        let gameplay = config.gameplay.clone();
        let mut session = Self {
            screen: Vec2::new(width, height),
            seed,
            rng: Pcg32::seed_from_u64(seed),
            score: 0,
            lives: gameplay.initial_lives,
            phase: GamePhase::Menu,
            basket: Entity::basket(0, basket_texture, width),
            entities: Vec::new(),
            spawner: SpawnController::new(&gameplay),
            parallax: Parallax::new(&config.parallax),
            catalog,
            time_ticks: 0,
            gameplay,
            basket_texture,
            events: Vec::new(),
            next_id: 1,
        };
        session.basket.id = session.next_entity_id();
        session
    }

    pub fn gameplay(&self) -> &GameplayConfig {
        &self.gameplay
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Back to level 1 with full starting lives and no falling objects
    pub fn reset(&mut self) {
        self.score = 0;
        self.lives = self.gameplay.initial_lives;
        self.entities.clear();
        self.spawner.reset();
        let id = self.next_entity_id();
        self.basket = Entity::basket(id, self.basket_texture, self.screen.x);
        log::debug!("Session reset");
    }

    /// Leave Menu or GameOver and begin a fresh run
    pub fn start(&mut self) {
        if self.phase == GamePhase::Playing {
            return;
        }
        self.reset();
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::Started);
        log::info!("Game started (seed {})", self.seed);
    }

    /// Score a caught fruit
    pub(crate) fn catch_fruit(&mut self) {
        self.score += 1;
        self.events.push(GameEvent::FruitCaught { score: self.score });
    }

    /// Lose a life to a caught insect; ends the run at zero
    pub(crate) fn catch_insect(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        self.events.push(GameEvent::InsectCaught { lives: self.lives });
        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
            self.events.push(GameEvent::GameOver { score: self.score });
            log::info!("Game over - final score {}", self.score);
        }
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
