//! Sound cues and music
//!
//! Clips are registered by name with the audio backend once per scene and
//! released on teardown. A clip that fails to load stays silent.

use std::path::Path;

use crate::platform::AudioBackend;
use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Player fires
    PlayerShoot,
    /// Enemy fires
    EnemyShoot,
    /// Enemy destroyed
    EnemyExplosion,
    /// Player destroyed
    PlayerExplosion,
    /// Projectile or body hit
    Hit,
    /// Item picked up
    GetItem,
    /// Shield raised
    ShieldUp,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 7] = [
        SoundEffect::PlayerShoot,
        SoundEffect::EnemyShoot,
        SoundEffect::EnemyExplosion,
        SoundEffect::PlayerExplosion,
        SoundEffect::Hit,
        SoundEffect::GetItem,
        SoundEffect::ShieldUp,
    ];

    /// Clip name in the registry
    pub fn clip_name(self) -> &'static str {
        match self {
            SoundEffect::PlayerShoot => "player_shoot",
            SoundEffect::EnemyShoot => "enemy_shoot",
            SoundEffect::EnemyExplosion => "enemy_explode",
            SoundEffect::PlayerExplosion => "player_explode",
            SoundEffect::Hit => "hit",
            SoundEffect::GetItem => "get_item",
            SoundEffect::ShieldUp => "shield_up",
        }
    }

    /// File relative to the assets directory
    pub fn asset_path(self) -> &'static str {
        match self {
            SoundEffect::PlayerShoot => "sound/laser_shoot4.wav",
            SoundEffect::EnemyShoot => "sound/xs_laser.wav",
            SoundEffect::EnemyExplosion => "sound/explosion1.wav",
            SoundEffect::PlayerExplosion => "sound/explosion3.wav",
            SoundEffect::Hit => "sound/eff11.wav",
            SoundEffect::GetItem => "sound/eff5.wav",
            SoundEffect::ShieldUp => "sound/shield_up.wav",
        }
    }

    /// Cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::PlayerFired => Some(SoundEffect::PlayerShoot),
            GameEvent::EnemyFired => Some(SoundEffect::EnemyShoot),
            GameEvent::EnemyHit | GameEvent::PlayerHit | GameEvent::ShotAbsorbed => {
                Some(SoundEffect::Hit)
            }
            GameEvent::EnemyDestroyed { .. } => Some(SoundEffect::EnemyExplosion),
            GameEvent::PlayerDestroyed { .. } => Some(SoundEffect::PlayerExplosion),
            GameEvent::ItemCollected(_) => Some(SoundEffect::GetItem),
            GameEvent::ShieldRaised => Some(SoundEffect::ShieldUp),
            GameEvent::ShieldDropped => None,
        }
    }
}

/// Looping background tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Music {
    Title,
    Battle,
}

impl Music {
    pub fn clip_name(self) -> &'static str {
        match self {
            Music::Title => "title_bgm",
            Music::Battle => "battle_bgm",
        }
    }

    pub fn asset_path(self) -> &'static str {
        match self {
            Music::Title => "music/06_Battle_in_Space_Intro.ogg",
            Music::Battle => "music/03_Racing_Through_Asteroids_Loop.ogg",
        }
    }
}

/// Named clips registered by one scene, played at the configured volumes
#[derive(Debug, Default)]
pub struct SoundBank {
    loaded: Vec<&'static str>,
    sfx_volume: f32,
    music_volume: f32,
}

impl SoundBank {
    /// Register `effects` and `music` with the backend. Failed clips are
    /// logged and left out.
    pub fn load(
        backend: &mut dyn AudioBackend,
        assets: &Path,
        effects: &[SoundEffect],
        music: &[Music],
        settings: &Settings,
    ) -> Self {
        let clips = effects
            .iter()
            .map(|e| (e.clip_name(), e.asset_path()))
            .chain(music.iter().map(|m| (m.clip_name(), m.asset_path())));

        let mut loaded = Vec::new();
        for (name, rel) in clips {
            match backend.load_clip(name, &assets.join(rel)) {
                Ok(()) => loaded.push(name),
                Err(e) => log::error!("Failed to load sound {name}: {e}"),
            }
        }
        log::debug!("Sound bank ready with {} clips", loaded.len());

        Self {
            loaded,
            sfx_volume: settings.effective_sfx_volume(),
            music_volume: settings.effective_music_volume(),
        }
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.loaded.iter().any(|n| *n == name)
    }

    pub fn play(&self, backend: &mut dyn AudioBackend, effect: SoundEffect) {
        let name = effect.clip_name();
        if self.is_loaded(name) && self.sfx_volume > 0.0 {
            backend.play_clip(name, self.sfx_volume);
        }
    }

    /// Start looping `music`, replacing the current track
    pub fn loop_music(&self, backend: &mut dyn AudioBackend, music: Music) {
        let name = music.clip_name();
        if self.is_loaded(name) {
            backend.loop_clip(name, self.music_volume);
        } else {
            log::warn!("Music {name} not loaded, staying silent");
        }
    }

    /// Play the cue for every event that has one
    pub fn play_events(&self, backend: &mut dyn AudioBackend, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(backend, effect);
        }
    }

    /// Stop music and unregister every clip. A second call does nothing.
    pub fn release(&mut self, backend: &mut dyn AudioBackend) {
        if self.loaded.is_empty() {
            return;
        }
        backend.stop_music();
        for name in self.loaded.drain(..) {
            backend.release_clip(name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::HeadlessAudio;
    use crate::sim::ItemKind;
    use glam::Vec2;

    fn bank(audio: &mut HeadlessAudio, settings: &Settings) -> SoundBank {
        SoundBank::load(
            audio,
            Path::new("assets"),
            &SoundEffect::ALL,
            &[Music::Battle],
            settings,
        )
    }

    #[test]
    fn test_missing_clip_is_silent() {
        let mut audio = HeadlessAudio::with_missing(&["hit"]);
        let bank = bank(&mut audio, &Settings::default());
        assert!(!bank.is_loaded("hit"));
        assert!(bank.is_loaded("player_shoot"));

        bank.play(&mut audio, SoundEffect::Hit);
        bank.play(&mut audio, SoundEffect::PlayerShoot);
        assert_eq!(audio.played, vec!["player_shoot".to_string()]);
    }

    #[test]
    fn test_events_map_to_cues() {
        let mut audio = HeadlessAudio::default();
        let bank = bank(&mut audio, &Settings::default());
        let events = [
            GameEvent::PlayerFired,
            GameEvent::ShieldDropped,
            GameEvent::ItemCollected(ItemKind::Life),
            GameEvent::EnemyDestroyed { at: Vec2::ZERO },
        ];
        bank.play_events(&mut audio, &events);
        assert_eq!(audio.played, vec!["player_shoot", "get_item", "enemy_explode"]);
    }

    #[test]
    fn test_muted_plays_nothing() {
        let settings = Settings {
            muted: true,
            ..Settings::default()
        };
        let mut audio = HeadlessAudio::default();
        let bank = bank(&mut audio, &settings);
        bank.play(&mut audio, SoundEffect::Hit);
        assert!(audio.played.is_empty());
    }

    #[test]
    fn test_music_loops_and_release_is_once() {
        let mut audio = HeadlessAudio::default();
        let mut bank = bank(&mut audio, &Settings::default());
        bank.loop_music(&mut audio, Music::Battle);
        assert_eq!(audio.looping.as_deref(), Some("battle_bgm"));

        // Title music was never registered
        bank.loop_music(&mut audio, Music::Title);
        assert_eq!(audio.looping.as_deref(), Some("battle_bgm"));

        bank.release(&mut audio);
        assert!(audio.loaded.is_empty());
        assert!(audio.looping.is_none());
        bank.release(&mut audio);
    }
}
