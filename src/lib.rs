//! Space Plane - a vertical-scrolling arcade shooter
//!
//! Core modules:
//! - `sim`: Gameplay simulation (templates, pools, movement, collisions, spawning)
//! - `scene`: Title / main / end scenes bound to the frame driver
//! - `platform`: Capability interfaces for rendering, audio, clock and input
//! - `audio`: Named sound clip registry
//! - `settings`: JSON configuration

pub mod audio;
pub mod error;
pub mod game;
pub mod highscores;
pub mod locale;
pub mod logging;
pub mod platform;
pub mod scene;
pub mod settings;
pub mod sim;

pub use error::{GameError, ResourceKind};
pub use game::Game;
pub use highscores::HighScores;
pub use locale::Language;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions
    pub const WINDOW_WIDTH: f32 = 600.0;
    pub const WINDOW_HEIGHT: f32 = 800.0;
    pub const FPS: u32 = 60;

    /// Off-screen distance beyond which entities are culled
    pub const CULL_MARGIN: f32 = 32.0;
    /// Mean number of frames between enemy spawns
    pub const SPAWN_INTERVAL_FRAMES: f32 = 60.0;
    /// Seconds between the player's death and the end scene
    pub const DEATH_DELAY: f32 = 1.0;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 300.0;
    pub const PLAYER_COOLDOWN_NS: u64 = 300_000_000;
    pub const PLAYER_MAX_HEALTH: i32 = 3;
    pub const PLAYER_MAX_SHIELD: u32 = 3;
    pub const SHIELD_DURATION: f32 = 5.0;

    /// Player projectile defaults
    pub const PLAYER_PROJECTILE_SPEED: f32 = 600.0;
    pub const PLAYER_PROJECTILE_DAMAGE: i32 = 1;

    /// Enemy defaults
    pub const ENEMY_SPEED: f32 = 150.0;
    pub const ENEMY_HEALTH: i32 = 2;
    pub const ENEMY_COOLDOWN_NS: u64 = 2_000_000_000;

    /// Enemy projectile defaults
    pub const ENEMY_PROJECTILE_SPEED: f32 = 400.0;
    pub const ENEMY_PROJECTILE_DAMAGE: i32 = 1;

    /// Item defaults
    pub const ITEM_SPEED: f32 = 200.0;
    pub const ITEM_BOUNCES: u32 = 3;
    pub const ITEM_DROP_CHANCE: f32 = 0.5;

    /// Explosion animation rate (frames per second)
    pub const EXPLOSION_FPS: f32 = 10.0;

    /// Scoring
    pub const SCORE_ENEMY: u64 = 10;
    pub const SCORE_ITEM: u64 = 5;
}
