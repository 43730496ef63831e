//! Game configuration
//!
//! Read from a flat `KEY = value` text file. Blank lines and lines starting
//! with `#` are ignored; sprite sheets use `path|rows|cols`. A missing or
//! unreadable file is not fatal - built-in defaults are used instead.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{DEFAULT_SCREEN_HEIGHT, DEFAULT_SCREEN_WIDTH};

/// Default config file looked up by the native runner
pub const DEFAULT_CONFIG_PATH: &str = "config.txt";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: missing '=' in {text:?}")]
    MissingSeparator { line: usize, text: String },
    #[error("line {line}: invalid value {value:?} for {key}")]
    InvalidValue {
        line: usize,
        key: String,
        value: String,
    },
    #[error("line {line}: sprite sheet {key} must be `path|rows|cols`, got {value:?}")]
    InvalidSheet {
        line: usize,
        key: String,
        value: String,
    },
    #[error("line {line}: unknown key {key}")]
    UnknownKey { line: usize, key: String },
}

/// Window settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_SCREEN_WIDTH,
            height: DEFAULT_SCREEN_HEIGHT,
            title: "Fruit Catcher".to_string(),
        }
    }
}

/// Gameplay tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameplayConfig {
    pub max_lives: u32,
    pub initial_lives: u32,
    /// Seconds between spawns at level 1
    pub base_spawn_interval: f32,
    /// Spawn interval floor
    pub min_spawn_interval: f32,
    /// Interval reduction per level
    pub spawn_interval_step: f32,
    /// Percent of spawns that are fruit (0-100)
    pub fruit_spawn_chance: u32,
    /// Fall speed at level 1 (pixels/second)
    pub base_fall_speed: f32,
    /// Fall speed ceiling
    pub max_fall_speed: f32,
    /// Fall speed increase per level
    pub fall_speed_step: f32,
    /// Keyboard basket speed (pixels/second)
    pub basket_speed: f32,
    /// Seconds of play between level-ups
    pub difficulty_increase_rate: f32,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            max_lives: 5,
            initial_lives: 3,
            base_spawn_interval: 1.5,
            min_spawn_interval: 0.3,
            spawn_interval_step: 0.15,
            fruit_spawn_chance: 70,
            base_fall_speed: 100.0,
            max_fall_speed: 500.0,
            fall_speed_step: 10.0,
            basket_speed: 300.0,
            difficulty_increase_rate: 10.0,
        }
    }
}

/// Background animation tunables (cosmetic only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParallaxConfig {
    /// Base scroll speed (pixels/second)
    pub parallax_speed: f32,
    /// Sky
    pub layer1_scroll_rate: f32,
    /// Clouds
    pub layer2_scroll_rate: f32,
    /// Bushes
    pub layer3_scroll_rate: f32,
    pub bush_oscillation_speed: f32,
    /// Side bush swing amplitude (pixels)
    pub bush_oscillation_amount: f32,
    pub bush_middle_shake_speed: f32,
    /// Middle bush tremor amplitude (pixels)
    pub bush_middle_shake_amount: f32,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            parallax_speed: 20.0,
            layer1_scroll_rate: 0.0,
            layer2_scroll_rate: 0.5,
            layer3_scroll_rate: 0.0,
            bush_oscillation_speed: 1.5,
            bush_oscillation_amount: 15.0,
            bush_middle_shake_speed: 8.0,
            bush_middle_shake_amount: 3.0,
        }
    }
}

/// Path and grid of an animated sprite sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetPath {
    pub path: String,
    pub rows: i32,
    pub cols: i32,
}

impl SheetPath {
    /// Parse `path|rows|cols`
    pub fn parse(value: &str) -> Option<Self> {
        let mut parts = value.split('|').map(str::trim);
        let path = parts.next().filter(|p| !p.is_empty())?;
        let rows = parts.next()?.parse().ok()?;
        let cols = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self {
            path: path.to_string(),
            rows,
            cols,
        })
    }
}

/// Asset path table keyed by config name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetPaths {
    pub textures: BTreeMap<String, String>,
    pub audio: BTreeMap<String, String>,
    pub sheets: BTreeMap<String, SheetPath>,
}

const SPRITES: &str = "assets/sprites/fruitcatcher";
const BACKGROUNDS: &str = "assets/background-elements";

impl Default for AssetPaths {
    fn default() -> Self {
        let mut textures = BTreeMap::new();
        let mut put = |key: &str, path: String| {
            textures.insert(key.to_string(), path);
        };

        put("BG_LAYER_1", format!("{BACKGROUNDS}/backgroundColorGrass.png"));
        for i in 1..=4 {
            put(&format!("CLOUD_{i}"), format!("{BACKGROUNDS}/cloud{i}.png"));
        }
        put("BUSH_LEFT", format!("{BACKGROUNDS}/bushAlt2.png"));
        put("BUSH_MIDDLE", format!("{BACKGROUNDS}/bushAlt1.png"));
        put("BUSH_RIGHT", format!("{BACKGROUNDS}/bushAlt3.png"));

        put("BASKET", format!("{SPRITES}/ui/basket.png"));
        for fruit in ["apple", "banana", "orange", "pineapple"] {
            put(&fruit.to_uppercase(), format!("{SPRITES}/fruits/{fruit}.png"));
        }
        for insect in ["bee", "fly", "ladybug"] {
            put(&insect.to_uppercase(), format!("{SPRITES}/insects/{insect}.png"));
        }

        put("HEART_FULL", format!("{SPRITES}/ui/heart_full.png"));
        put("HEART_EMPTY", format!("{SPRITES}/ui/heart_empty.png"));
        put("FRUITS_ICON", format!("{SPRITES}/ui/fruits.png"));
        put("MENU_TITLE", format!("{SPRITES}/ui/menu_title.png"));
        put("MENU_START", format!("{SPRITES}/ui/menu_start.png"));
        put("GAME_OVER", format!("{SPRITES}/ui/game_over.png"));

        let digit_names = [
            "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
        ];
        for (digit, name) in digit_names.iter().enumerate() {
            put(&format!("NUMBER_{digit}"), format!("{SPRITES}/numbers/{name}.png"));
        }

        let mut sheets = BTreeMap::new();
        for (key, file, cols) in [
            ("BEE_FLY_SPR", "bee_fly_spr", 6),
            ("BEE2_FLY_SPR", "bee2_fly_spr", 6),
            ("BIRD_FLY_SPR", "bird_fly_spr", 6),
            ("BIRD2_FLY_SPR", "bird2_fly_spr", 6),
            ("RAT_WALK_SPR", "rat_walk_spr", 4),
            ("RAT2_WALK_SPR", "rat2_walk_spr", 4),
        ] {
            sheets.insert(
                key.to_string(),
                SheetPath {
                    path: format!("{SPRITES}/animated_sprites/{file}.png"),
                    rows: 1,
                    cols,
                },
            );
        }

        let mut audio = BTreeMap::new();
        audio.insert(
            "MUSIC_BACKGROUND".to_string(),
            "assets/audio/musica_fundo.mp3".to_string(),
        );
        audio.insert(
            "SOUND_FRUIT_COLLECT".to_string(),
            "assets/audio/fruit_collect.mp3".to_string(),
        );
        audio.insert(
            "SOUND_BUG_COLLECT".to_string(),
            "assets/audio/bug_collect.mp3".to_string(),
        );

        Self {
            textures,
            audio,
            sheets,
        }
    }
}

/// Texture keys accepted from the config file (besides `NUMBER_n`)
const TEXTURE_KEYS: &[&str] = &[
    "BG_LAYER_1",
    "CLOUD_1",
    "CLOUD_2",
    "CLOUD_3",
    "CLOUD_4",
    "BUSH_LEFT",
    "BUSH_MIDDLE",
    "BUSH_RIGHT",
    "BASKET",
    "APPLE",
    "BANANA",
    "ORANGE",
    "PINEAPPLE",
    "BEE",
    "FLY",
    "LADYBUG",
    "HEART_FULL",
    "HEART_EMPTY",
    "FRUITS_ICON",
    "MENU_TITLE",
    "MENU_START",
    "GAME_OVER",
];

/// Outcome of parsing a config text
#[derive(Debug, Default)]
pub struct ParseReport {
    /// Number of settings applied
    pub applied: usize,
    /// Lines that were skipped, with the reason
    pub errors: Vec<ConfigError>,
}

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub gameplay: GameplayConfig,
    pub parallax: ParallaxConfig,
    pub assets: AssetPaths,
}

impl GameConfig {
    /// Load from a file, falling back to defaults when it can't be read
    pub fn load(path: impl AsRef<Path>) -> Self {
        match Self::try_load(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{e}");
                log::info!("Using default configuration");
                Self::default()
            }
        }
    }

    /// Load from a file. Bad lines are logged and skipped; only I/O fails.
    pub fn try_load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let (config, report) = Self::parse(&text);
        for err in &report.errors {
            log::warn!("{}: {err}", path.display());
        }
        log::info!(
            "Loaded {} settings from {}",
            report.applied,
            path.display()
        );
        Ok(config)
    }

    /// Parse config text on top of the defaults. The result is sanitized.
    pub fn parse(text: &str) -> (Self, ParseReport) {
        let mut config = Self::default();
        let mut report = ParseReport::default();

        for (index, raw) in text.lines().enumerate() {
            let line = index + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let Some((key, value)) = trimmed.split_once('=') else {
                report.errors.push(ConfigError::MissingSeparator {
                    line,
                    text: trimmed.to_string(),
                });
                continue;
            };

            match config.apply(key.trim(), value.trim(), line) {
                Ok(()) => report.applied += 1,
                Err(e) => report.errors.push(e),
            }
        }

        config.sanitize();
        (config, report)
    }

    /// Apply a single `key = value` pair
    pub fn apply(&mut self, key: &str, value: &str, line: usize) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            line,
            key: key.to_string(),
            value: value.to_string(),
        };
        let int = || value.parse::<u32>().map_err(|_| invalid());
        let float = || {
            value
                .parse::<f32>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(invalid)
        };

        let gameplay = &mut self.gameplay;
        let parallax = &mut self.parallax;

        match key {
            // === Window ===
            "WINDOW_WIDTH" => self.window.width = int()?,
            "WINDOW_HEIGHT" => self.window.height = int()?,
            "WINDOW_TITLE" => self.window.title = value.to_string(),

            // === Gameplay ===
            "MAX_LIVES" => gameplay.max_lives = int()?,
            "INITIAL_LIVES" => gameplay.initial_lives = int()?,
            "BASE_SPAWN_INTERVAL" => gameplay.base_spawn_interval = float()?,
            "MIN_SPAWN_INTERVAL" => gameplay.min_spawn_interval = float()?,
            "SPAWN_INTERVAL_STEP" => gameplay.spawn_interval_step = float()?,
            "FRUIT_SPAWN_CHANCE" => gameplay.fruit_spawn_chance = int()?,
            "BASE_FALL_SPEED" => gameplay.base_fall_speed = float()?,
            "MAX_FALL_SPEED" => gameplay.max_fall_speed = float()?,
            "FALL_SPEED_STEP" => gameplay.fall_speed_step = float()?,
            "BASKET_SPEED" => gameplay.basket_speed = float()?,
            "DIFFICULTY_INCREASE_RATE" => gameplay.difficulty_increase_rate = float()?,

            // === Parallax ===
            "PARALLAX_SPEED" => parallax.parallax_speed = float()?,
            "LAYER1_SCROLL_RATE" => parallax.layer1_scroll_rate = float()?,
            "LAYER2_SCROLL_RATE" => parallax.layer2_scroll_rate = float()?,
            "LAYER3_SCROLL_RATE" => parallax.layer3_scroll_rate = float()?,
            "BUSH_OSCILLATION_SPEED" => parallax.bush_oscillation_speed = float()?,
            "BUSH_OSCILLATION_AMOUNT" => parallax.bush_oscillation_amount = float()?,
            "BUSH_MIDDLE_SHAKE_SPEED" => parallax.bush_middle_shake_speed = float()?,
            "BUSH_MIDDLE_SHAKE_AMOUNT" => parallax.bush_middle_shake_amount = float()?,

            // === Assets ===
            _ if key.ends_with("_SPR") => {
                let sheet = SheetPath::parse(value).ok_or_else(|| ConfigError::InvalidSheet {
                    line,
                    key: key.to_string(),
                    value: value.to_string(),
                })?;
                self.assets.sheets.insert(key.to_string(), sheet);
            }
            _ if key.starts_with("MUSIC_") || key.starts_with("SOUND_") => {
                self.assets.audio.insert(key.to_string(), value.to_string());
            }
            _ if TEXTURE_KEYS.contains(&key) || is_digit_key(key) => {
                self.assets.textures.insert(key.to_string(), value.to_string());
            }

            _ => {
                return Err(ConfigError::UnknownKey {
                    line,
                    key: key.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Clamp tunables into ranges the simulation relies on
    pub fn sanitize(&mut self) {
        let defaults = GameplayConfig::default();
        let g = &mut self.gameplay;

        if g.max_lives == 0 {
            log::warn!("MAX_LIVES must be at least 1, using {}", defaults.max_lives);
            g.max_lives = defaults.max_lives;
        }
        if g.initial_lives == 0 || g.initial_lives > g.max_lives {
            let clamped = g.initial_lives.clamp(1, g.max_lives);
            log::warn!(
                "INITIAL_LIVES {} outside 1..={}, using {clamped}",
                g.initial_lives,
                g.max_lives
            );
            g.initial_lives = clamped;
        }
        if g.min_spawn_interval <= 0.0 {
            log::warn!(
                "MIN_SPAWN_INTERVAL must be positive, using {}",
                defaults.min_spawn_interval
            );
            g.min_spawn_interval = defaults.min_spawn_interval;
        }
        if g.base_spawn_interval < g.min_spawn_interval {
            log::warn!(
                "BASE_SPAWN_INTERVAL {} below MIN_SPAWN_INTERVAL {}, raising it",
                g.base_spawn_interval,
                g.min_spawn_interval
            );
            g.base_spawn_interval = g.min_spawn_interval;
        }
        if g.base_fall_speed <= 0.0 {
            log::warn!(
                "BASE_FALL_SPEED must be positive, using {}",
                defaults.base_fall_speed
            );
            g.base_fall_speed = defaults.base_fall_speed;
        }
        if g.max_fall_speed < g.base_fall_speed {
            log::warn!(
                "MAX_FALL_SPEED {} below BASE_FALL_SPEED {}, raising it",
                g.max_fall_speed,
                g.base_fall_speed
            );
            g.max_fall_speed = g.base_fall_speed;
        }
        if g.fruit_spawn_chance > 100 {
            log::warn!("FRUIT_SPAWN_CHANCE {} above 100", g.fruit_spawn_chance);
            g.fruit_spawn_chance = 100;
        }
        if g.difficulty_increase_rate <= 0.0 {
            log::warn!(
                "DIFFICULTY_INCREASE_RATE must be positive, using {}",
                defaults.difficulty_increase_rate
            );
            g.difficulty_increase_rate = defaults.difficulty_increase_rate;
        }
        // Difficulty only ever gets harder
        g.spawn_interval_step = g.spawn_interval_step.abs();
        g.fall_speed_step = g.fall_speed_step.abs();
        g.basket_speed = g.basket_speed.abs();

        if self.window.width == 0 || self.window.height == 0 {
            log::warn!("Window size must be non-zero, using defaults");
            self.window.width = DEFAULT_SCREEN_WIDTH;
            self.window.height = DEFAULT_SCREEN_HEIGHT;
        }
    }

    /// Screen size in pixels as floats
    pub fn screen_size(&self) -> (f32, f32) {
        (self.window.width as f32, self.window.height as f32)
    }
}

fn is_digit_key(key: &str) -> bool {
    key.strip_prefix("NUMBER_")
        .and_then(|d| d.parse::<u8>().ok())
        .is_some_and(|d| d <= 9)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "
# Fruit Catcher
WINDOW_WIDTH = 1024
WINDOW_TITLE = My Catcher
MAX_LIVES=4
INITIAL_LIVES = 2
BASE_SPAWN_INTERVAL = 2.0
BUSH_OSCILLATION_AMOUNT = 20
APPLE = art/apple.png
NUMBER_7 = art/7.png
BEE_FLY_SPR = art/bee.png|1|8
SOUND_FRUIT_COLLECT = sfx/yum.wav
";

    #[test]
    fn test_parse_sample() {
        let (config, report) = GameConfig::parse(SAMPLE);
        assert!(report.errors.is_empty(), "{:?}", report.errors);
        assert_eq!(report.applied, 10);

        assert_eq!(config.window.width, 1024);
        assert_eq!(config.window.height, DEFAULT_SCREEN_HEIGHT);
        assert_eq!(config.window.title, "My Catcher");
        assert_eq!(config.gameplay.max_lives, 4);
        assert_eq!(config.gameplay.initial_lives, 2);
        assert_eq!(config.gameplay.base_spawn_interval, 2.0);
        assert_eq!(config.parallax.bush_oscillation_amount, 20.0);
        assert_eq!(config.assets.textures["APPLE"], "art/apple.png");
        assert_eq!(config.assets.textures["NUMBER_7"], "art/7.png");
        assert_eq!(
            config.assets.sheets["BEE_FLY_SPR"],
            SheetPath {
                path: "art/bee.png".to_string(),
                rows: 1,
                cols: 8
            }
        );
        assert_eq!(config.assets.audio["SOUND_FRUIT_COLLECT"], "sfx/yum.wav");
    }

    #[test]
    fn test_bad_lines_are_skipped() {
        let text = "no separator here\nMAX_LIVES = lots\nRAT_WALK_SPR = rat.png|1\n\
                    WHATEVER = 3\nBASKET_SPEED = 250";
        let (config, report) = GameConfig::parse(text);
        assert_eq!(report.applied, 1);
        assert_eq!(report.errors.len(), 4);
        assert!(matches!(
            report.errors[0],
            ConfigError::MissingSeparator { line: 1, .. }
        ));
        assert!(matches!(
            report.errors[1],
            ConfigError::InvalidValue { line: 2, .. }
        ));
        assert!(matches!(report.errors[2], ConfigError::InvalidSheet { line: 3, .. }));
        assert!(matches!(report.errors[3], ConfigError::UnknownKey { line: 4, .. }));
        assert_eq!(config.gameplay.max_lives, 5);
        assert_eq!(config.gameplay.basket_speed, 250.0);
    }

    #[test]
    fn test_sheet_path_parse() {
        assert_eq!(
            SheetPath::parse("a.png | 2 | 3"),
            Some(SheetPath {
                path: "a.png".to_string(),
                rows: 2,
                cols: 3
            })
        );
        assert_eq!(SheetPath::parse("a.png|x|3"), None);
        assert_eq!(SheetPath::parse("|1|3"), None);
        assert_eq!(SheetPath::parse("a.png|1|3|4"), None);
    }

    #[test]
    fn test_sanitize_clamps_ranges() {
        let mut config = GameConfig::default();
        config.gameplay.max_lives = 3;
        config.gameplay.initial_lives = 9;
        config.gameplay.base_spawn_interval = 0.1;
        config.gameplay.max_fall_speed = 50.0;
        config.gameplay.fruit_spawn_chance = 140;
        config.gameplay.spawn_interval_step = -0.2;
        config.sanitize();

        let g = &config.gameplay;
        assert_eq!(g.initial_lives, 3);
        assert_eq!(g.base_spawn_interval, g.min_spawn_interval);
        assert_eq!(g.max_fall_speed, g.base_fall_speed);
        assert_eq!(g.fruit_spawn_chance, 100);
        assert!((g.spawn_interval_step - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_parse_sanitizes() {
        let (config, report) =
            GameConfig::parse("MAX_LIVES = 5\nINITIAL_LIVES = 9\nMIN_SPAWN_INTERVAL = 2.0\n");
        assert_eq!(report.applied, 3);
        let g = &config.gameplay;
        assert_eq!(g.initial_lives, 5);
        assert_eq!(g.min_spawn_interval, 2.0);
        assert_eq!(g.base_spawn_interval, 2.0);
    }

    #[test]
    fn test_non_positive_fall_speed_rejected() {
        for text in ["BASE_FALL_SPEED = -100", "BASE_FALL_SPEED = 0"] {
            let (config, _) = GameConfig::parse(text);
            assert_eq!(config.gameplay.base_fall_speed, 100.0);
            assert!(config.gameplay.max_fall_speed >= config.gameplay.base_fall_speed);
        }
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("fruit-catcher-does-not-exist.txt");
        assert!(matches!(
            GameConfig::try_load(&path),
            Err(ConfigError::Io { .. })
        ));
        assert_eq!(GameConfig::load(&path), GameConfig::default());
    }

    #[test]
    fn test_load_reads_file() {
        let path = std::env::temp_dir().join(format!(
            "fruit-catcher-config-{}.txt",
            std::process::id()
        ));
        fs::write(&path, "MAX_LIVES = 7\nINITIAL_LIVES = 8\n").unwrap();
        let config = GameConfig::load(&path);
        let _ = fs::remove_file(&path);
        assert_eq!(config.gameplay.max_lives, 7);
        // Sanitized down to max
        assert_eq!(config.gameplay.initial_lives, 7);
    }

    #[test]
    fn test_defaults_cover_assets() {
        let assets = AssetPaths::default();
        assert_eq!(assets.sheets.len(), 6);
        assert!(assets.textures.contains_key("NUMBER_9"));
        assert!(assets.textures.contains_key("CLOUD_4"));
        assert_eq!(assets.audio.len(), 3);
    }
}
