//! Sound effects and background music
//!
//! Decoding and playback happen in an [`AudioBackend`]; the manager owns the
//! volume/mute state and turns session events into named effects.

use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;

use thiserror::Error;

use crate::config::AssetPaths;
use crate::sim::GameEvent;

/// Background music volume (fraction of master)
pub const MUSIC_VOLUME: f32 = 0.5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AudioError {
    #[error("failed to load sound {name} from {path}")]
    Sound { name: String, path: String },
    #[error("failed to load music from {path}")]
    Music { path: String },
}

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Fruit landed in the basket
    FruitCollect,
    /// Insect landed in the basket
    BugCollect,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 2] = [SoundEffect::FruitCollect, SoundEffect::BugCollect];

    /// Name the backend knows the effect by
    pub fn name(self) -> &'static str {
        match self {
            SoundEffect::FruitCollect => "fruit_collect",
            SoundEffect::BugCollect => "bug_collect",
        }
    }

    /// Config key holding the effect's file path
    pub fn config_key(self) -> &'static str {
        match self {
            SoundEffect::FruitCollect => "SOUND_FRUIT_COLLECT",
            SoundEffect::BugCollect => "SOUND_BUG_COLLECT",
        }
    }
}

/// Playback device
pub trait AudioBackend {
    fn load_sound(&mut self, name: &str, path: &str) -> Result<(), AudioError>;
    /// Fire-and-forget
    fn play_sound(&mut self, name: &str, volume: f32);
    fn load_music(&mut self, path: &str) -> Result<(), AudioError>;
    fn play_music(&mut self, looping: bool);
    fn stop_music(&mut self);
    fn set_music_volume(&mut self, volume: f32);
}

/// Audio manager for the game
pub struct AudioManager<B: AudioBackend> {
    backend: B,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    loaded: HashSet<SoundEffect>,
    music_loaded: bool,
}

impl<B: AudioBackend> AudioManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            master_volume: 1.0,
            sfx_volume: 1.0,
            muted: false,
            loaded: HashSet::new(),
            music_loaded: false,
        }
    }

    /// Load the configured effects and music; failures leave them silent
    pub fn load(&mut self, paths: &AssetPaths) {
        for effect in SoundEffect::ALL {
            let Some(path) = paths.audio.get(effect.config_key()) else {
                log::warn!("No path configured for {}", effect.config_key());
                continue;
            };
            match self.backend.load_sound(effect.name(), path) {
                Ok(()) => {
                    self.loaded.insert(effect);
                }
                Err(e) => log::warn!("{e}"),
            }
        }

        if let Some(path) = paths.audio.get("MUSIC_BACKGROUND") {
            match self.backend.load_music(path) {
                Ok(()) => self.music_loaded = true,
                Err(e) => log::warn!("{e}"),
            }
        }
        log::info!(
            "Audio ready: {} effects, music {}",
            self.loaded.len(),
            if self.music_loaded { "loaded" } else { "missing" }
        );
    }

    /// Start looping background music
    pub fn start_music(&mut self) {
        if !self.music_loaded {
            return;
        }
        self.backend.set_music_volume(self.music_volume());
        self.backend.play_music(true);
    }

    pub fn stop_music(&mut self) {
        if self.music_loaded {
            self.backend.stop_music();
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
        self.sync_music_volume();
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.sync_music_volume();
    }

    /// Volume applied to sound effects
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    fn music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * MUSIC_VOLUME
        }
    }

    fn sync_music_volume(&mut self) {
        if self.music_loaded {
            self.backend.set_music_volume(self.music_volume());
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 || !self.loaded.contains(&effect) {
            return;
        }
        self.backend.play_sound(effect.name(), vol);
    }

    /// React to a session event
    pub fn handle_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::FruitCaught { .. } => self.play(SoundEffect::FruitCollect),
            GameEvent::InsectCaught { .. } => self.play(SoundEffect::BugCollect),
            _ => {}
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

/// Backend for runs without an audio device: checks files exist, logs
/// and counts playback.
#[derive(Debug, Default)]
pub struct HeadlessAudio {
    root: PathBuf,
    sounds: HashSet<String>,
    music: Option<String>,
    pub music_playing: bool,
    pub music_volume: f32,
    /// Times each effect was played
    pub plays: BTreeMap<String, u32>,
}

impl HeadlessAudio {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    fn exists(&self, path: &str) -> bool {
        self.root.join(path).is_file()
    }
}

impl AudioBackend for HeadlessAudio {
    fn load_sound(&mut self, name: &str, path: &str) -> Result<(), AudioError> {
        if !self.exists(path) {
            return Err(AudioError::Sound {
                name: name.to_string(),
                path: path.to_string(),
            });
        }
        log::debug!("Sound loaded: {name} ({path})");
        self.sounds.insert(name.to_string());
        Ok(())
    }

    fn play_sound(&mut self, name: &str, volume: f32) {
        if !self.sounds.contains(name) {
            return;
        }
        log::debug!("Play {name} at {volume:.2}");
        *self.plays.entry(name.to_string()).or_default() += 1;
    }

    fn load_music(&mut self, path: &str) -> Result<(), AudioError> {
        if !self.exists(path) {
            return Err(AudioError::Music {
                path: path.to_string(),
            });
        }
        self.music = Some(path.to_string());
        Ok(())
    }

    fn play_music(&mut self, looping: bool) {
        if let Some(music) = &self.music {
            log::debug!("Music {music} playing (loop: {looping})");
            self.music_playing = true;
        }
    }

    fn stop_music(&mut self) {
        self.music_playing = false;
    }

    fn set_music_volume(&mut self, volume: f32) {
        self.music_volume = volume.clamp(0.0, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Accepts every file and records calls
    #[derive(Default)]
    struct Recorder {
        played: Vec<(String, f32)>,
        music_volume: f32,
        music_looping: Option<bool>,
    }

    impl AudioBackend for Recorder {
        fn load_sound(&mut self, _name: &str, _path: &str) -> Result<(), AudioError> {
            Ok(())
        }
        fn play_sound(&mut self, name: &str, volume: f32) {
            self.played.push((name.to_string(), volume));
        }
        fn load_music(&mut self, _path: &str) -> Result<(), AudioError> {
            Ok(())
        }
        fn play_music(&mut self, looping: bool) {
            self.music_looping = Some(looping);
        }
        fn stop_music(&mut self) {
            self.music_looping = None;
        }
        fn set_music_volume(&mut self, volume: f32) {
            self.music_volume = volume;
        }
    }

    fn manager() -> AudioManager<Recorder> {
        let mut audio = AudioManager::new(Recorder::default());
        audio.load(&AssetPaths::default());
        audio
    }

    #[test]
    fn test_events_map_to_effects() {
        let mut audio = manager();
        audio.handle_event(&GameEvent::FruitCaught { score: 1 });
        audio.handle_event(&GameEvent::InsectCaught { lives: 2 });
        audio.handle_event(&GameEvent::Started);
        let names: Vec<_> = audio.backend().played.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["fruit_collect", "bug_collect"]);
    }

    #[test]
    fn test_music_loops_at_half_volume() {
        let mut audio = manager();
        audio.start_music();
        assert_eq!(audio.backend().music_looping, Some(true));
        assert_eq!(audio.backend().music_volume, 0.5);

        audio.set_muted(true);
        assert_eq!(audio.backend().music_volume, 0.0);
        audio.stop_music();
        assert_eq!(audio.backend().music_looping, None);
    }

    #[test]
    fn test_mute_and_volume() {
        let mut audio = manager();
        audio.set_master_volume(0.5);
        audio.set_sfx_volume(2.0);
        assert_eq!(audio.effective_volume(), 0.5);
        audio.play(SoundEffect::FruitCollect);
        assert_eq!(audio.backend().played[0].1, 0.5);

        audio.set_muted(true);
        audio.play(SoundEffect::BugCollect);
        assert_eq!(audio.backend().played.len(), 1);
    }

    #[test]
    fn test_headless_missing_files_stay_silent() {
        let dir = std::env::temp_dir().join("fruit-catcher-no-audio-here");
        let mut audio = AudioManager::new(HeadlessAudio::new(dir));
        audio.load(&AssetPaths::default());
        audio.start_music();
        audio.play(SoundEffect::FruitCollect);
        assert!(!audio.backend().music_playing);
        assert!(audio.backend().plays.is_empty());
    }
}
