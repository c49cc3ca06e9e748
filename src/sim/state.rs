//! Game state and core simulation types
//!
//! Entity records double as their own templates: spawning is a clone of the
//! prototype followed by placement.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::pool::Pool;
use super::rect::Body;
use super::spawner::Spawner;
use crate::consts::*;
use crate::platform::TextureId;

/// Where the player is in the death sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerPhase {
    /// Normal play
    Alive,
    /// Explosion spawned, waiting out the death delay
    Exploding,
    /// Delay elapsed; the scene should hand over to the end scene
    Finished,
}

/// Shield charges and the active window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShieldState {
    pub charges: u32,
    pub max_charges: u32,
    pub active: bool,
    /// Seconds left while active; reset to `duration` on expiry
    pub remaining: f32,
    pub duration: f32,
}

impl Default for ShieldState {
    fn default() -> Self {
        Self {
            charges: 0,
            max_charges: PLAYER_MAX_SHIELD,
            active: false,
            remaining: SHIELD_DURATION,
            duration: SHIELD_DURATION,
        }
    }
}

impl ShieldState {
    /// Spend a charge and raise the shield. Returns false if nothing happened.
    pub fn activate(&mut self) -> bool {
        if self.active || self.charges == 0 {
            return false;
        }
        self.charges -= 1;
        self.active = true;
        self.remaining = self.duration;
        true
    }

    /// Count down with gated time. Returns true on the frame the shield drops.
    pub fn advance(&mut self, dt: f32) -> bool {
        if !self.active || dt <= 0.0 {
            return false;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.active = false;
            self.remaining = self.duration;
            return true;
        }
        false
    }

    pub fn add_charge(&mut self) {
        self.charges = (self.charges + 1).min(self.max_charges);
    }
}

/// The player's craft
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub body: Body,
    pub sprite: Option<TextureId>,
    pub speed: f32,
    pub health: i32,
    pub max_health: i32,
    pub fire_cooldown_ns: u64,
    pub last_shot_ns: Option<u64>,
    pub shield: ShieldState,
}

impl Player {
    pub fn new(size: Vec2) -> Self {
        Self {
            body: Body::new(size),
            sprite: None,
            speed: PLAYER_SPEED,
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            fire_cooldown_ns: PLAYER_COOLDOWN_NS,
            last_shot_ns: None,
            shield: ShieldState::default(),
        }
    }

    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    /// Health for display (logic lets it go negative)
    pub fn display_health(&self) -> i32 {
        self.health.max(0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerProjectile {
    pub body: Body,
    pub sprite: Option<TextureId>,
    pub speed: f32,
    pub damage: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub body: Body,
    pub sprite: Option<TextureId>,
    pub speed: f32,
    pub health: i32,
    pub fire_cooldown_ns: u64,
    pub last_shot_ns: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnemyProjectile {
    pub body: Body,
    pub sprite: Option<TextureId>,
    pub speed: f32,
    pub damage: i32,
    /// Unit vector fixed at launch
    pub direction: Vec2,
}

/// Pickup types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Life,
    Shield,
    /// Reserved; picking it up only scores
    Time,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub body: Body,
    pub sprite: Option<TextureId>,
    pub speed: f32,
    pub direction: Vec2,
    /// Reflections left before the item is allowed to leave
    pub bounces: u32,
    pub kind: ItemKind,
}

/// Sprite-sheet explosion animation
#[derive(Debug, Clone, PartialEq)]
pub struct Explosion {
    pub body: Body,
    pub sprite: Option<TextureId>,
    /// Scene time (gated seconds) at spawn
    pub started_at: f64,
    pub fps: f32,
    pub total_frames: u32,
}

impl Explosion {
    /// 0-based animation frame at scene time `now`
    pub fn frame_at(&self, now: f64) -> u32 {
        let elapsed = (now - self.started_at).max(0.0);
        (elapsed * self.fps as f64) as u32
    }

    pub fn finished_at(&self, now: f64) -> bool {
        self.frame_at(now) >= self.total_frames
    }
}

/// Shield overlay drawn over the player while the shield is up
#[derive(Debug, Clone, PartialEq)]
pub struct ShieldOverlay {
    pub size: Vec2,
    pub sprite: Option<TextureId>,
}

impl ShieldOverlay {
    /// Overlay body centred on the player
    pub fn body_around(&self, player: &Player) -> Body {
        let mut body = Body::new(self.size);
        body.center_on(player.body.center());
        body
    }
}

/// Things that happened during a tick, for audio and logging
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    PlayerFired,
    EnemyFired,
    EnemyHit,
    EnemyDestroyed { at: Vec2 },
    PlayerHit,
    PlayerDestroyed { at: Vec2 },
    ShotAbsorbed,
    ItemCollected(ItemKind),
    ShieldRaised,
    ShieldDropped,
}

/// Complete simulation state owned by the main scene
#[derive(Debug, Clone)]
pub struct SimState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub playfield: Vec2,
    pub spawner: Spawner,
    pub score: u64,
    pub paused: bool,
    pub phase: PlayerPhase,
    /// Gated seconds since the player died
    pub death_timer: f32,
    /// Gated seconds since the scene started
    pub scene_time: f64,
    pub frame: u64,
    /// Enemies spawned so far
    pub spawned: u64,
    pub player: Player,
    pub player_projectiles: Pool<PlayerProjectile>,
    pub enemies: Pool<Enemy>,
    pub enemy_projectiles: Pool<EnemyProjectile>,
    pub items: Pool<Item>,
    pub explosions: Pool<Explosion>,
    /// Drained by the scene after each tick
    pub events: Vec<GameEvent>,
}

impl SimState {
    /// Fresh state with the player centred at the bottom of the playfield
    pub fn new(seed: u64, playfield: Vec2, player: Player) -> Self {
        let mut player = player;
        player.body.pos = Vec2::new(
            playfield.x / 2.0 - player.body.size.x / 2.0,
            playfield.y - player.body.size.y,
        );

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            playfield,
            spawner: Spawner::new(SPAWN_INTERVAL_FRAMES),
            score: 0,
            paused: false,
            phase: PlayerPhase::Alive,
            death_timer: 0.0,
            scene_time: 0.0,
            frame: 0,
            spawned: 0,
            player,
            player_projectiles: Pool::new(),
            enemies: Pool::new(),
            enemy_projectiles: Pool::new(),
            items: Pool::new(),
            explosions: Pool::new(),
            events: Vec::new(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.phase == PlayerPhase::Alive
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        log::info!("Game {}", if self.paused { "paused" } else { "resumed" });
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
