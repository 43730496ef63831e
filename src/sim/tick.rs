//! Per-frame simulation tick
//!
//! Order within a Playing tick: basket movement, spawning, integration,
//! off-screen culling, animation, collisions, difficulty, decoration.

use super::collision::overlaps;
use super::entity::Category;
use super::spawn::spawn_entity;
use super::state::{GameEvent, GamePhase, Session};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Move left (Left/A held)
    pub left: bool,
    /// Move right (Right/D held)
    pub right: bool,
    /// Absolute pointer X while pointer control is active
    pub pointer_x: Option<f32>,
    /// Start/restart (click on a menu screen)
    pub start: bool,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

/// Advance the session by one frame of `dt` seconds
pub fn tick(session: &mut Session, input: &TickInput, dt: f32) {
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

    // Start/restart consumes the tick
    if session.phase != GamePhase::Playing {
        if input.start || input.idle_mode {
            session.start();
        }
        return;
    }

    session.time_ticks += 1;

    let mut input = input.clone();
    if input.idle_mode {
        steer_autopilot(session, &mut input);
    }

    move_basket(session, &input, dt);

    // Spawn
    if session.spawner.advance_spawn(dt) {
        let id = session.next_entity_id();
        let fruit_chance = session.gameplay().fruit_spawn_chance;
        let entity = spawn_entity(
            &mut session.rng,
            id,
            &session.catalog,
            session.screen,
            session.spawner.fall_speed,
            fruit_chance,
        );
        let category = entity.category();
        log::debug!("Spawned {category:?} {id} at x={:.0}", entity.pos().x);
        session.entities.push(entity);
        session.push_event(GameEvent::Spawned { id, category });
    }

    // Integrate and cull
    for entity in &mut session.entities {
        entity.integrate(dt);
        if entity.pos().y < DESPAWN_Y {
            entity.active = false;
        }
    }

    // Animation clocks
    session.basket.sprite.advance_animation(dt);
    for entity in &mut session.entities {
        entity.sprite.advance_animation(dt);
    }

    // Basket collisions
    for i in 0..session.entities.len() {
        if session.phase != GamePhase::Playing {
            break;
        }
        if !overlaps(&session.basket, &session.entities[i]) {
            continue;
        }
        session.entities[i].active = false;
        match session.entities[i].category() {
            Category::Fruit => session.catch_fruit(),
            Category::Insect => session.catch_insect(),
            Category::Basket => {}
        }
    }
    session.entities.retain(|e| e.active);

    if session.phase != GamePhase::Playing {
        return;
    }

    // Difficulty
    if session.spawner.advance_difficulty(dt) {
        let spawner = &session.spawner;
        let event = GameEvent::LevelUp {
            level: spawner.level,
            spawn_interval: spawner.spawn_interval,
            fall_speed: spawner.fall_speed,
        };
        session.push_event(event);
    }

    session.parallax.advance(dt, session.screen.x);
}

/// Keyboard takes priority; otherwise follow the pointer. Always clamped on screen.
fn move_basket(session: &mut Session, input: &TickInput, dt: f32) {
    let mut x = session.basket.pos().x;
    let step = session.gameplay().basket_speed * dt;

    if input.left || input.right {
        if input.left {
            x -= step;
        }
        if input.right {
            x += step;
        }
    } else if let Some(pointer_x) = input.pointer_x {
        x = pointer_x;
    }

    session.basket.sprite.pos.x = clamp_basket_x(x, session.screen.x);
}

/// Keep the whole basket box inside `[0, width]`
pub fn clamp_basket_x(x: f32, width: f32) -> f32 {
    let half = BASKET_WIDTH / 2.0;
    if width <= BASKET_WIDTH {
        return width / 2.0;
    }
    if x.is_nan() {
        return width / 2.0;
    }
    x.clamp(half, width - half)
}

/// Pick a target X: the lowest fruit that isn't shadowed by an insect,
/// or a step away from an insect about to land on the basket.
fn autopilot_target(session: &Session) -> Option<f32> {
    let basket = session.basket.pos();
    let reach = (BASKET_WIDTH + FALLING_SIZE) / 2.0;
    let horizon = basket.y + 250.0;

    let insects: Vec<_> = session
        .entities
        .iter()
        .filter(|e| e.active && e.category() == Category::Insect && e.pos().y < horizon)
        .map(|e| e.pos())
        .collect();
    let threatened = |x: f32| insects.iter().any(|p| (p.x - x).abs() <= reach);

    let fruit_target = session
        .entities
        .iter()
        .filter(|e| e.active && e.category() == Category::Fruit)
        .filter(|e| e.pos().y + FALLING_SIZE / 2.0 >= basket.y - BASKET_HEIGHT / 2.0)
        .filter(|e| !threatened(e.pos().x))
        .min_by(|a, b| {
            a.pos()
                .y
                .partial_cmp(&b.pos().y)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|e| e.pos().x);

    if fruit_target.is_some() {
        return fruit_target;
    }

    // Dodge the closest threatening insect
    insects
        .iter()
        .filter(|p| (p.x - basket.x).abs() <= reach)
        .min_by(|a, b| a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal))
        .map(|p| {
            let away = if basket.x >= p.x { 1.0 } else { -1.0 };
            let target = p.x + away * (reach + 10.0);
            // Dodge the other way when pinned against a wall
            if target < BASKET_WIDTH / 2.0 || target > session.screen.x - BASKET_WIDTH / 2.0 {
                p.x - away * (reach + 10.0)
            } else {
                target
            }
        })
}

/// Drive the basket like a player holding the arrow keys
fn steer_autopilot(session: &Session, input: &mut TickInput) {
    input.pointer_x = None;
    input.left = false;
    input.right = false;

    if let Some(target) = autopilot_target(session) {
        let dx = target - session.basket.pos().x;
        if dx.abs() > 4.0 {
            input.left = dx < 0.0;
            input.right = dx > 0.0;
        }
    }
}
