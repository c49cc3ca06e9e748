//! Gameplay simulation
//!
//! Everything that decides what happens in a frame lives here:
//! - Gated timestep (zero while paused)
//! - Seeded RNG only
//! - Back-to-front pool iteration
//! - No drawing or sound; outcomes are reported as `GameEvent`s

pub mod collision;
pub mod pool;
pub mod rect;
pub mod spawner;
pub mod state;
pub mod template;
pub mod tick;

pub use pool::{Fate, Handle, Pool};
pub use rect::{Body, Rect};
pub use spawner::{Spawner, roll_item_drop};
pub use state::{
    Enemy, EnemyProjectile, Explosion, GameEvent, Item, ItemKind, Player, PlayerPhase,
    PlayerProjectile, ShieldOverlay, ShieldState, SimState,
};
pub use template::{Icon, Templates};
pub use tick::{TickInput, gated_dt, tick};
