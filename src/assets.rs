//! Texture handle registry
//!
//! Decoding and GPU upload belong to whoever implements [`TextureLoader`];
//! this module only decides what to load, logs what failed, and applies
//! fallbacks so the game can still run with a partial asset set.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::AssetPaths;
use crate::sim::{SheetGrid, SheetInfo, SpawnCatalog, TextureId};

/// Fruit texture keys, in catalog order
pub const FRUIT_KEYS: [&str; 4] = ["APPLE", "BANANA", "ORANGE", "PINEAPPLE"];
/// Static insect texture keys, in catalog order
pub const INSECT_KEYS: [&str; 3] = ["BEE", "FLY", "LADYBUG"];
pub const CLOUD_KEYS: [&str; 4] = ["CLOUD_1", "CLOUD_2", "CLOUD_3", "CLOUD_4"];

/// A loaded texture and its natural size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureInfo {
    pub id: TextureId,
    pub width: u32,
    pub height: u32,
}

/// Something that can turn an image path into a texture handle
pub trait TextureLoader {
    /// Load an image; `None` when it is missing or undecodable
    fn load(&mut self, path: &str) -> Option<TextureInfo>;
}

/// All textures the game draws with
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetRegistry {
    pub basket: Option<TextureInfo>,
    pub sky: Option<TextureInfo>,
    pub clouds: [Option<TextureInfo>; 4],
    pub bush_left: Option<TextureInfo>,
    pub bush_middle: Option<TextureInfo>,
    pub bush_right: Option<TextureInfo>,
    pub fruits: Vec<TextureInfo>,
    pub insects: Vec<TextureInfo>,
    pub sheets: Vec<SheetInfo>,
    pub heart_full: Option<TextureInfo>,
    pub heart_empty: Option<TextureInfo>,
    pub fruits_icon: Option<TextureInfo>,
    pub digits: [Option<TextureInfo>; 10],
    pub menu_title: Option<TextureInfo>,
    pub menu_start: Option<TextureInfo>,
    pub game_over: Option<TextureInfo>,
}

impl AssetRegistry {
    /// Load every configured texture. Failures are logged and skipped.
    pub fn load(paths: &AssetPaths, loader: &mut impl TextureLoader) -> Self {
        let mut load = |key: &str| -> Option<TextureInfo> {
            let Some(path) = paths.textures.get(key) else {
                log::warn!("No path configured for texture {key}");
                return None;
            };
            let info = loader.load(path);
            if info.is_none() {
                log::warn!("Failed to load texture {key} from {path}");
            }
            info
        };

        let mut registry = Self {
            basket: load("BASKET"),
            sky: load("BG_LAYER_1"),
            clouds: CLOUD_KEYS.map(&mut load),
            bush_left: load("BUSH_LEFT"),
            bush_middle: load("BUSH_MIDDLE"),
            bush_right: load("BUSH_RIGHT"),
            fruits: FRUIT_KEYS.iter().filter_map(|&k| load(k)).collect(),
            insects: INSECT_KEYS.iter().filter_map(|&k| load(k)).collect(),
            sheets: Vec::new(),
            heart_full: load("HEART_FULL"),
            heart_empty: load("HEART_EMPTY"),
            fruits_icon: load("FRUITS_ICON"),
            digits: std::array::from_fn(|d| load(format!("NUMBER_{d}").as_str())),
            menu_title: load("MENU_TITLE"),
            menu_start: load("MENU_START"),
            game_over: load("GAME_OVER"),
        };

        for (key, sheet) in &paths.sheets {
            let grid = match SheetGrid::new(sheet.rows, sheet.cols) {
                Ok(grid) => grid,
                Err(e) => {
                    log::warn!("Skipping sprite sheet {key}: {e}");
                    continue;
                }
            };
            match loader.load(&sheet.path) {
                Some(info) => registry.sheets.push(SheetInfo {
                    texture: info.id,
                    grid,
                }),
                None => log::warn!("Failed to load sprite sheet {key} from {}", sheet.path),
            }
        }

        registry.apply_fallbacks();
        log::info!(
            "Loaded {} fruits, {} insects, {} animated sheets",
            registry.fruits.len(),
            registry.insects.len(),
            registry.sheets.len()
        );
        registry
    }

    /// Stand in fruit/insect art for missing HUD icons
    fn apply_fallbacks(&mut self) {
        if self.heart_full.is_none() {
            if let Some(&fruit) = self.fruits.first() {
                log::warn!("Using first fruit as full heart");
                self.heart_full = Some(fruit);
            }
        }
        if self.heart_empty.is_none() {
            if let Some(&insect) = self.insects.first() {
                log::warn!("Using first insect as empty heart");
                self.heart_empty = Some(insect);
            }
        }
        if self.fruits_icon.is_none() {
            self.fruits_icon = self.fruits.first().copied();
        }
    }

    /// Texture sets the spawner picks from
    pub fn spawn_catalog(&self) -> SpawnCatalog {
        SpawnCatalog {
            fruits: self.fruits.iter().map(|t| t.id).collect(),
            insects: self.insects.iter().map(|t| t.id).collect(),
            sheets: self.sheets.clone(),
        }
    }

    pub fn basket_texture(&self) -> TextureId {
        self.basket.map_or(TextureId::NONE, |t| t.id)
    }

    pub fn digit(&self, digit: u32) -> Option<TextureInfo> {
        self.digits.get(digit as usize).copied().flatten()
    }
}

/// Size assumed for images whose header can't be read
pub const FALLBACK_TEXTURE_SIZE: (u32, u32) = (64, 64);

/// Loader for runs without a GPU: hands out ids for files that exist and
/// reads image dimensions without decoding pixels.
#[derive(Debug)]
pub struct HeadlessLoader {
    root: PathBuf,
    next_id: u32,
    loaded: Vec<String>,
}

impl HeadlessLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            next_id: 1,
            loaded: Vec::new(),
        }
    }

    /// Paths loaded so far
    pub fn loaded(&self) -> &[String] {
        &self.loaded
    }
}

impl TextureLoader for HeadlessLoader {
    fn load(&mut self, path: &str) -> Option<TextureInfo> {
        let full = self.root.join(path);
        if !full.is_file() {
            return None;
        }
        let (width, height) = image::image_dimensions(&full).unwrap_or_else(|e| {
            log::debug!("{}: {e}, assuming default size", full.display());
            FALLBACK_TEXTURE_SIZE
        });
        let id = TextureId(self.next_id);
        self.next_id += 1;
        self.loaded.push(path.to_string());
        Some(TextureInfo { id, width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::fs;

    /// Loads everything except the listed paths
    struct FakeLoader {
        missing: HashSet<String>,
        next: u32,
    }

    impl FakeLoader {
        fn missing(paths: &[String]) -> Self {
            Self {
                missing: paths.iter().cloned().collect(),
                next: 1,
            }
        }
    }

    impl TextureLoader for FakeLoader {
        fn load(&mut self, path: &str) -> Option<TextureInfo> {
            if self.missing.contains(path) {
                return None;
            }
            self.next += 1;
            Some(TextureInfo {
                id: TextureId(self.next),
                width: 100,
                height: 40,
            })
        }
    }

    #[test]
    fn test_full_asset_set() {
        let paths = AssetPaths::default();
        let registry = AssetRegistry::load(&paths, &mut FakeLoader::missing(&[]));
        assert_eq!(registry.fruits.len(), 4);
        assert_eq!(registry.insects.len(), 3);
        assert_eq!(registry.sheets.len(), 6);
        assert!(registry.clouds.iter().all(Option::is_some));
        assert!(registry.digits.iter().all(Option::is_some));
        assert!(registry.basket_texture() != TextureId::NONE);

        let catalog = registry.spawn_catalog();
        assert_eq!(catalog.fruits.len(), 4);
        assert_eq!(catalog.sheets.len(), 6);
    }

    #[test]
    fn test_heart_fallbacks() {
        let paths = AssetPaths::default();
        let missing = [
            paths.textures["HEART_FULL"].clone(),
            paths.textures["HEART_EMPTY"].clone(),
            paths.textures["FRUITS_ICON"].clone(),
            paths.textures["APPLE"].clone(),
        ];
        let registry = AssetRegistry::load(&paths, &mut FakeLoader::missing(&missing));
        assert_eq!(registry.fruits.len(), 3);
        assert_eq!(registry.heart_full, Some(registry.fruits[0]));
        assert_eq!(registry.heart_empty, Some(registry.insects[0]));
        assert_eq!(registry.fruits_icon, Some(registry.fruits[0]));
    }

    #[test]
    fn test_bad_sheet_grid_skipped() {
        let mut paths = AssetPaths::default();
        if let Some(sheet) = paths.sheets.get_mut("RAT_WALK_SPR") {
            sheet.cols = 0;
        }
        let registry = AssetRegistry::load(&paths, &mut FakeLoader::missing(&[]));
        assert_eq!(registry.sheets.len(), 5);
    }

    #[test]
    fn test_headless_loader_reads_image_size() {
        let dir = std::env::temp_dir().join(format!("fruit-catcher-assets-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        image::RgbaImage::new(320, 96).save(dir.join("title.png")).unwrap();
        fs::write(dir.join("plain.bin"), b"not an image").unwrap();

        let mut loader = HeadlessLoader::new(&dir);
        let title = loader.load("title.png").unwrap();
        assert_eq!((title.width, title.height), (320, 96));
        let plain = loader.load("plain.bin").unwrap();
        assert_eq!((plain.width, plain.height), FALLBACK_TEXTURE_SIZE);
        assert_ne!(title.id, plain.id);
        assert!(loader.load("missing.png").is_none());
        assert_eq!(loader.loaded().len(), 2);

        let _ = fs::remove_dir_all(&dir);
    }
}
