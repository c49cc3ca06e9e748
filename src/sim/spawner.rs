//! Stochastic spawning
//!
//! One uniform draw per frame against `1 / interval`: inter-arrival times are
//! geometric in frame count, so bursts and gaps are expected.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, Item};
use crate::consts::ITEM_DROP_CHANCE;

/// Per-frame enemy spawner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spawner {
    /// Mean frames between spawns
    pub interval_frames: f32,
}

impl Spawner {
    pub fn new(interval_frames: f32) -> Self {
        Self { interval_frames }
    }

    /// Spawn probability per frame
    pub fn threshold(&self) -> f32 {
        1.0 / self.interval_frames
    }

    /// Roll for this frame. On success returns a copy of a uniformly chosen
    /// template placed at a random x just above the playfield.
    pub fn roll<R: Rng>(&self, rng: &mut R, templates: &[Enemy], playfield: Vec2) -> Option<Enemy> {
        let draw: f32 = rng.random();
        if draw >= self.threshold() || templates.is_empty() {
            return None;
        }

        let mut enemy = templates[rng.random_range(0..templates.len())].clone();
        let span = (playfield.x - enemy.body.size.x).max(0.0);
        enemy.body.pos = Vec2::new(rng.random::<f32>() * span, -enemy.body.size.y);
        Some(enemy)
    }
}

/// Maybe drop an item centred on `at`, heading off at a random angle
pub fn roll_item_drop<R: Rng>(rng: &mut R, templates: &[Item], at: Vec2) -> Option<Item> {
    let draw: f32 = rng.random();
    if draw >= ITEM_DROP_CHANCE || templates.is_empty() {
        return None;
    }

    let mut item = templates[rng.random_range(0..templates.len())].clone();
    item.body.center_on(at);
    let angle = rng.random::<f32>() * TAU;
    item.direction = Vec2::new(angle.cos(), angle.sin());
    Some(item)
}
