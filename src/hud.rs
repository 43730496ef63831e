//! HUD and screen layout
//!
//! Everything is placed in screen pixels with the origin at the bottom-left.
//! Elements whose texture never loaded are left out.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::assets::{AssetRegistry, TextureInfo};
use crate::sim::{GamePhase, Session, TextureId};

const HEART_SIZE: f32 = 30.0;
const HEART_SPACING: f32 = 35.0;
const HEART_START_X: f32 = 10.0;
const TOP_MARGIN: f32 = 40.0;

const SCORE_ICON_SIZE: f32 = 30.0;
const SCORE_FROM_RIGHT: f32 = 150.0;
const SCORE_DIGITS_OFFSET: f32 = 40.0;
const SCORE_DIGIT_SIZE: f32 = 25.0;
const SCORE_DIGIT_SPACING: f32 = 5.0;

const FINAL_SCORE_Y: f32 = 80.0;
const FINAL_ICON_SIZE: f32 = 50.0;
const FINAL_ICON_GAP: f32 = 15.0;
const FINAL_DIGIT_SIZE: f32 = 50.0;
const FINAL_DIGIT_SPACING: f32 = 10.0;
const GAME_OVER_SCALE: f32 = 0.5;

/// Axis-aligned pixel rectangle given by its bottom-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }
}

/// A textured rectangle drawn on top of the scene
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HudElement {
    pub texture: TextureId,
    pub rect: Rect,
}

/// Lay out the overlay for the session's current phase
pub fn layout(session: &Session, assets: &AssetRegistry) -> Vec<HudElement> {
    let screen = session.screen;
    match session.phase {
        GamePhase::Menu => menu_screen(screen, assets),
        GamePhase::Playing => playing_hud(
            screen,
            session.score,
            session.lives,
            session.gameplay().max_lives,
            assets,
        ),
        GamePhase::GameOver => game_over_screen(screen, session.score, assets),
    }
}

/// Texture at its natural size, centred horizontally with its bottom at `y`
fn centered(
    info: Option<TextureInfo>,
    screen: Vec2,
    y: impl Fn(f32) -> f32,
    scale: f32,
) -> Option<HudElement> {
    let info = info.filter(|t| t.width > 0)?;
    let w = info.width as f32 * scale;
    let h = info.height as f32 * scale;
    Some(HudElement {
        texture: info.id,
        rect: Rect::new((screen.x - w) / 2.0, y(h), w, h),
    })
}

/// Title and start button
pub fn menu_screen(screen: Vec2, assets: &AssetRegistry) -> Vec<HudElement> {
    let title = centered(assets.menu_title, screen, |h| screen.y - h - 100.0, 1.0);
    let start = centered(assets.menu_start, screen, |h| (screen.y - h) / 2.0 - 50.0, 1.0);
    title.into_iter().chain(start).collect()
}

/// Hearts top-left, fruit icon and score top-right
pub fn playing_hud(
    screen: Vec2,
    score: u32,
    lives: u32,
    max_lives: u32,
    assets: &AssetRegistry,
) -> Vec<HudElement> {
    let mut elements = Vec::new();
    let y = screen.y - TOP_MARGIN;

    if let (Some(full), Some(empty)) = (assets.heart_full, assets.heart_empty) {
        for i in 0..max_lives {
            let texture = if i < lives { full.id } else { empty.id };
            let x = HEART_START_X + i as f32 * HEART_SPACING;
            elements.push(HudElement {
                texture,
                rect: Rect::new(x, y, HEART_SIZE, HEART_SIZE),
            });
        }
    }

    if let Some(fruit) = assets.fruits.first() {
        let x = screen.x - SCORE_FROM_RIGHT;
        elements.push(HudElement {
            texture: fruit.id,
            rect: Rect::new(x, y, SCORE_ICON_SIZE, SCORE_ICON_SIZE),
        });
        if assets.digit(0).is_some() {
            let origin = Vec2::new(x + SCORE_DIGITS_OFFSET, y);
            elements.extend(number(score, origin, SCORE_DIGIT_SIZE, SCORE_DIGIT_SPACING, assets));
        }
    }

    elements
}

/// Half-size title, final score and a start button to play again
pub fn game_over_screen(screen: Vec2, score: u32, assets: &AssetRegistry) -> Vec<HudElement> {
    let mut elements = Vec::new();
    elements.extend(centered(
        assets.game_over,
        screen,
        |h| screen.y - h - 80.0,
        GAME_OVER_SCALE,
    ));

    if assets.digit(0).is_some() {
        let digits = score.to_string().len() as f32;
        let numbers_width = digits * FINAL_DIGIT_SIZE + (digits - 1.0) * FINAL_DIGIT_SPACING;
        let total = FINAL_ICON_SIZE + FINAL_ICON_GAP + numbers_width;
        let start_x = (screen.x - total) / 2.0;

        let icon = assets.fruits_icon.filter(|_| !assets.fruits.is_empty());
        if let Some(icon) = icon {
            elements.push(HudElement {
                texture: icon.id,
                rect: Rect::new(start_x, FINAL_SCORE_Y, FINAL_ICON_SIZE, FINAL_ICON_SIZE),
            });
        }
        let origin = Vec2::new(start_x + FINAL_ICON_SIZE + FINAL_ICON_GAP, FINAL_SCORE_Y);
        elements.extend(number(score, origin, FINAL_DIGIT_SIZE, FINAL_DIGIT_SPACING, assets));
    }

    elements.extend(centered(
        assets.menu_start,
        screen,
        |_| screen.y / 2.0 - 150.0,
        1.0,
    ));
    elements
}

/// Digits left to right from `origin`; missing digit textures are skipped
/// without leaving a gap.
pub fn number(
    value: u32,
    origin: Vec2,
    digit_size: f32,
    spacing: f32,
    assets: &AssetRegistry,
) -> Vec<HudElement> {
    let mut x = origin.x;
    value
        .to_string()
        .chars()
        .filter_map(|c| c.to_digit(10))
        .filter_map(|d| assets.digit(d))
        .map(|info| {
            let element = HudElement {
                texture: info.id,
                rect: Rect::new(x, origin.y, digit_size, digit_size),
            };
            x += digit_size + spacing;
            element
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tex(id: u32, width: u32, height: u32) -> Option<TextureInfo> {
        Some(TextureInfo {
            id: TextureId(id),
            width,
            height,
        })
    }

    fn assets() -> AssetRegistry {
        AssetRegistry {
            fruits: vec![TextureInfo {
                id: TextureId(2),
                width: 64,
                height: 64,
            }],
            heart_full: tex(10, 32, 32),
            heart_empty: tex(11, 32, 32),
            fruits_icon: tex(12, 64, 64),
            digits: std::array::from_fn(|d| tex(100 + d as u32, 32, 32)),
            menu_title: tex(20, 400, 120),
            menu_start: tex(21, 200, 80),
            game_over: tex(22, 600, 200),
            ..Default::default()
        }
    }

    const SCREEN: Vec2 = Vec2::new(800.0, 800.0);

    #[test]
    fn test_hearts_and_score() {
        let hud = playing_hud(SCREEN, 42, 2, 5, &assets());
        // 5 hearts + icon + 2 digits
        assert_eq!(hud.len(), 8);
        assert_eq!(hud[0].rect, Rect::new(10.0, 760.0, 30.0, 30.0));
        assert_eq!(hud[1].texture, TextureId(10));
        assert_eq!(hud[2].texture, TextureId(11));
        assert_eq!(hud[4].rect.min.x, 150.0);

        assert_eq!(hud[5].rect, Rect::new(650.0, 760.0, 30.0, 30.0));
        assert_eq!(hud[6].texture, TextureId(104));
        assert_eq!(hud[6].rect.min.x, 690.0);
        assert_eq!(hud[7].texture, TextureId(102));
        assert_eq!(hud[7].rect.min.x, 720.0);
    }

    #[test]
    fn test_no_hearts_without_both_textures() {
        let mut assets = assets();
        assets.heart_empty = None;
        let hud = playing_hud(SCREEN, 0, 3, 5, &assets);
        assert!(hud.iter().all(|e| e.texture != TextureId(10)));
    }

    #[test]
    fn test_menu_layout() {
        let hud = menu_screen(SCREEN, &assets());
        assert_eq!(hud[0].rect, Rect::new(200.0, 580.0, 400.0, 120.0));
        assert_eq!(hud[1].rect, Rect::new(300.0, 310.0, 200.0, 80.0));
        assert_eq!(hud[1].rect.center(), Vec2::new(400.0, 350.0));
    }

    #[test]
    fn test_game_over_layout() {
        let hud = game_over_screen(SCREEN, 7, &assets());
        assert_eq!(hud.len(), 4);
        // Half-size title
        assert_eq!(hud[0].rect, Rect::new(250.0, 620.0, 300.0, 100.0));
        // Icon + gap + one digit = 115 wide, centred
        assert_eq!(hud[1].texture, TextureId(12));
        assert_eq!(hud[1].rect, Rect::new(342.5, 80.0, 50.0, 50.0));
        assert_eq!(hud[2].rect, Rect::new(407.5, 80.0, 50.0, 50.0));
        assert_eq!(hud[3].rect, Rect::new(300.0, 250.0, 200.0, 80.0));
    }

    #[test]
    fn test_missing_digit_leaves_no_gap() {
        let mut assets = assets();
        assets.digits[3] = None;
        let digits = number(135, Vec2::ZERO, 25.0, 5.0, &assets);
        assert_eq!(digits.len(), 2);
        assert_eq!(digits[1].texture, TextureId(105));
        assert_eq!(digits[1].rect.min.x, 30.0);
    }

    #[test]
    fn test_missing_screens_are_skipped() {
        let hud = menu_screen(SCREEN, &AssetRegistry::default());
        assert!(hud.is_empty());
        let over = game_over_screen(SCREEN, 3, &AssetRegistry::default());
        assert!(over.is_empty());
    }
}
