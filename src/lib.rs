//! Fruit Catcher - catch falling fruit, dodge the bugs
//!
//! Core modules:
//! - `sim`: Simulation core (sprites, entities, spawning, collisions, session state)
//! - `config`: Flat key/value configuration file with built-in defaults
//! - `assets`: Texture handle registry with load fallbacks
//! - `input`: Raw input events folded into per-tick commands
//! - `audio`: Sound effect and music control behind a backend trait
//! - `hud`: HUD and screen layout in pixel rectangles
//! - `renderer`: Draw command and quad generation for an external renderer

pub mod assets;
pub mod audio;
pub mod config;
pub mod hud;
pub mod input;
pub mod renderer;
pub mod sim;

pub use config::GameConfig;

/// Game configuration constants
pub mod consts {
    /// Default window dimensions (pixels)
    pub const DEFAULT_SCREEN_WIDTH: u32 = 800;
    pub const DEFAULT_SCREEN_HEIGHT: u32 = 800;

    /// Largest frame delta fed to the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Basket geometry - sits near the bottom edge
    pub const BASKET_WIDTH: f32 = 80.0;
    pub const BASKET_HEIGHT: f32 = 60.0;
    pub const BASKET_Y: f32 = 50.0;

    /// Falling objects are square
    pub const FALLING_SIZE: f32 = 50.0;

    /// Horizontal spawn margin from each screen edge
    pub const SPAWN_MARGIN: f32 = 50.0;
    /// Spawn height above the top edge
    pub const SPAWN_ABOVE: f32 = 50.0;
    /// Objects below this Y are gone
    pub const DESPAWN_Y: f32 = -50.0;

    /// Fruit spin magnitude range (degrees/second)
    pub const FRUIT_SPIN_MIN: f32 = 50.0;
    pub const FRUIT_SPIN_MAX: f32 = 150.0;
    /// Static insect spin magnitude range (degrees/second)
    pub const INSECT_SPIN_MIN: f32 = 100.0;
    pub const INSECT_SPIN_MAX: f32 = 250.0;

    /// Percent of insects that use an animated sheet (when sheets exist)
    pub const ANIMATED_INSECT_CHANCE: u32 = 60;
    /// Sheet playback rate for animated insects
    pub const INSECT_FPS: f32 = 12.0;
    /// Default sprite playback rate
    pub const DEFAULT_FPS: f32 = 12.0;
}

/// Normalize an angle in degrees to [0, 360), whatever the number of wraps
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to the modulus for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert!((normalize_degrees(1090.0) - 10.0).abs() < 1e-3);
        assert!((normalize_degrees(-730.0) - 350.0).abs() < 1e-3);
    }
}
