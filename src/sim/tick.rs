//! Per-frame simulation step
//!
//! Pass order: shield input, player movement/fire, player projectiles, enemy
//! projectiles, spawner, enemies, player vs world, explosions, items, shield
//! timer, death delay. Every pass consumes gated time (zero while paused).

use glam::Vec2;

use super::collision::{
    aim_direction, apply_item, beyond_any_side, beyond_bottom, beyond_top, bounce_off_edges,
    first_enemy_hit,
};
use super::pool::Fate;
use super::spawner::roll_item_drop;
use super::state::{GameEvent, PlayerPhase, SimState};
use super::template::Templates;
use crate::consts::*;
use crate::platform::Clock;

/// Player commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held direction, each axis in -1..=1 (y grows downward)
    pub movement: Vec2,
    /// Fire held
    pub fire: bool,
    /// Shield key pressed this frame
    pub activate_shield: bool,
}

/// Elapsed time after pause-forcing; non-positive input freezes the frame
pub fn gated_dt(paused: bool, dt: f32) -> f32 {
    if paused || dt.is_nan() || dt <= 0.0 { 0.0 } else { dt }
}

/// Has `cooldown_ns` passed since the last shot (or was there none)?
fn cooldown_elapsed(last_shot_ns: Option<u64>, now_ns: u64, cooldown_ns: u64) -> bool {
    last_shot_ns.is_none_or(|last| now_ns.saturating_sub(last) >= cooldown_ns)
}

/// Advance the game state by one frame
pub fn tick(state: &mut SimState, templates: &Templates, input: &TickInput, dt: f32, clock: &dyn Clock) {
    let dt = gated_dt(state.paused, dt);
    state.frame += 1;
    state.scene_time += dt as f64;

    // Shield stays usable while paused
    if input.activate_shield && state.is_alive() && state.player.shield.activate() {
        log::debug!("Shield raised, {} charges left", state.player.shield.charges);
        state.events.push(GameEvent::ShieldRaised);
    }

    if state.is_alive() && !state.paused {
        control_player(state, templates, input, dt, clock);
    }
    update_player_projectiles(state, dt);
    update_enemy_projectiles(state, templates, dt);
    if !state.paused {
        spawn_enemy(state, templates);
    }
    update_enemies(state, templates, dt, clock);
    update_player(state, templates);
    update_explosions(state);
    update_items(state, dt);

    if state.player.shield.advance(dt) {
        log::debug!("Shield dropped");
        state.events.push(GameEvent::ShieldDropped);
    }

    if state.phase == PlayerPhase::Exploding {
        state.death_timer += dt;
        if state.death_timer >= DEATH_DELAY {
            log::info!("Player lost, final score {}", state.score);
            state.phase = PlayerPhase::Finished;
        }
    }
}

/// Held-key movement (clamped to the playfield) and rate-limited fire
fn control_player(state: &mut SimState, templates: &Templates, input: &TickInput, dt: f32, clock: &dyn Clock) {
    let player = &mut state.player;
    let movement = input.movement.clamp(Vec2::NEG_ONE, Vec2::ONE);
    player.body.pos += movement * player.speed * dt;

    let max = (state.playfield - player.body.size).max(Vec2::ZERO);
    player.body.pos = player.body.pos.clamp(Vec2::ZERO, max);

    if !input.fire {
        return;
    }
    let now = clock.now_ns();
    if !cooldown_elapsed(player.last_shot_ns, now, player.fire_cooldown_ns) {
        return;
    }
    player.last_shot_ns = Some(now);

    let mut projectile = templates.player_projectile.clone();
    projectile.body.pos = Vec2::new(
        player.body.center().x - projectile.body.size.x / 2.0,
        player.body.pos.y,
    );
    state.player_projectiles.spawn(projectile);
    state.events.push(GameEvent::PlayerFired);
}

/// Move up, cull past the top margin, damage the first enemy touched
fn update_player_projectiles(state: &mut SimState, dt: f32) {
    let SimState {
        player_projectiles,
        enemies,
        events,
        ..
    } = state;

    player_projectiles.sweep(|projectile| {
        projectile.body.pos.y -= projectile.speed * dt;
        let rect = projectile.body.rect();
        if beyond_top(&rect, CULL_MARGIN) {
            return Fate::Remove;
        }
        match first_enemy_hit(&rect, enemies).and_then(|h| enemies.get_mut(h)) {
            Some(enemy) => {
                enemy.health -= projectile.damage;
                events.push(GameEvent::EnemyHit);
                Fate::Remove
            }
            None => Fate::Keep,
        }
    });
}

/// Move along the launch direction, then shield absorption or body hit
fn update_enemy_projectiles(state: &mut SimState, templates: &Templates, dt: f32) {
    let alive = state.is_alive();
    let playfield = state.playfield;
    let SimState {
        enemy_projectiles,
        player,
        events,
        ..
    } = state;

    enemy_projectiles.sweep(|projectile| {
        projectile.body.pos += projectile.direction * projectile.speed * dt;
        let rect = projectile.body.rect();
        if beyond_any_side(&rect, playfield, CULL_MARGIN) {
            return Fate::Remove;
        }
        if !alive {
            return Fate::Keep;
        }

        if player.shield.active && templates.shield.body_around(player).rect().intersects(&rect) {
            events.push(GameEvent::ShotAbsorbed);
            return Fate::Remove;
        }
        if player.body.rect().intersects(&rect) {
            player.health -= projectile.damage;
            events.push(GameEvent::PlayerHit);
            return Fate::Remove;
        }
        Fate::Keep
    });
}

fn spawn_enemy(state: &mut SimState, templates: &Templates) {
    if let Some(enemy) = state.spawner.roll(&mut state.rng, &templates.enemies, state.playfield) {
        log::trace!("Enemy spawned at x={:.1}", enemy.body.pos.x);
        state.enemies.spawn(enemy);
        state.spawned += 1;
    }
}

/// Move down, cull past the bottom margin, explode the dead, fire at the player
fn update_enemies(state: &mut SimState, templates: &Templates, dt: f32, clock: &dyn Clock) {
    let can_fire = state.is_alive() && !state.paused;
    let target = state.player.body.center();
    let playfield = state.playfield;
    let mut dead: Vec<Vec2> = Vec::new();
    let mut shots: Vec<Vec2> = Vec::new();

    state.enemies.sweep(|enemy| {
        enemy.body.pos.y += enemy.speed * dt;
        if beyond_bottom(&enemy.body.rect(), playfield, CULL_MARGIN) {
            return Fate::Remove;
        }
        if enemy.health <= 0 {
            dead.push(enemy.body.center());
            return Fate::Remove;
        }
        if can_fire {
            let now = clock.now_ns();
            if cooldown_elapsed(enemy.last_shot_ns, now, enemy.fire_cooldown_ns) {
                enemy.last_shot_ns = Some(now);
                shots.push(enemy.body.center());
            }
        }
        Fate::Keep
    });

    for origin in shots {
        let mut projectile = templates.enemy_projectile.clone();
        projectile.body.center_on(origin);
        projectile.direction = aim_direction(origin, target);
        state.enemy_projectiles.spawn(projectile);
        state.events.push(GameEvent::EnemyFired);
    }
    destroy_enemies(state, templates, &dead);
}

/// Explosion, score and a possible item drop for each destroyed enemy
fn destroy_enemies(state: &mut SimState, templates: &Templates, centers: &[Vec2]) {
    for &center in centers {
        let mut explosion = templates.explosion.clone();
        explosion.body.center_on(center);
        explosion.started_at = state.scene_time;
        state.explosions.spawn(explosion);

        state.score += SCORE_ENEMY;
        state.events.push(GameEvent::EnemyDestroyed { at: center });

        if let Some(item) = roll_item_drop(&mut state.rng, &templates.items, center) {
            log::debug!("{:?} dropped", item.kind);
            state.items.spawn(item);
        }
    }
}

/// Death check, then direct contact with enemies
fn update_player(state: &mut SimState, templates: &Templates) {
    if !state.is_alive() {
        return;
    }

    if state.player.health <= 0 {
        let center = state.player.body.center();
        let mut explosion = templates.explosion.clone();
        explosion.body.center_on(center);
        explosion.started_at = state.scene_time;
        state.explosions.spawn(explosion);

        state.phase = PlayerPhase::Exploding;
        state.death_timer = 0.0;
        state.events.push(GameEvent::PlayerDestroyed { at: center });
        log::info!("Player destroyed at ({:.0}, {:.0})", center.x, center.y);
        return;
    }

    let player_rect = state.player.body.rect();
    let player = &mut state.player;
    let events = &mut state.events;
    let mut dead: Vec<Vec2> = Vec::new();

    // Contact always kills the enemy and costs exactly one health
    state.enemies.sweep(|enemy| {
        if !enemy.body.rect().intersects(&player_rect) {
            return Fate::Keep;
        }
        player.health -= 1;
        enemy.health = 0;
        events.push(GameEvent::PlayerHit);
        dead.push(enemy.body.center());
        Fate::Remove
    });

    destroy_enemies(state, templates, &dead);
}

fn update_explosions(state: &mut SimState) {
    let now = state.scene_time;
    state.explosions.sweep(|explosion| {
        if explosion.finished_at(now) {
            Fate::Remove
        } else {
            Fate::Keep
        }
    });
}

/// Directional move, bounce while budget remains, cull, pickup
fn update_items(state: &mut SimState, dt: f32) {
    let alive = state.is_alive();
    let playfield = state.playfield;
    let SimState {
        items,
        player,
        score,
        events,
        ..
    } = state;

    items.sweep(|item| {
        item.body.pos += item.direction * item.speed * dt;
        bounce_off_edges(item, playfield);

        let rect = item.body.rect();
        if beyond_any_side(&rect, playfield, CULL_MARGIN) {
            return Fate::Remove;
        }
        if alive && player.body.rect().intersects(&rect) {
            apply_item(player, item.kind);
            *score += SCORE_ITEM;
            events.push(GameEvent::ItemCollected(item.kind));
            return Fate::Remove;
        }
        Fate::Keep
    });
}
