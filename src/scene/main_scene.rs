//! Gameplay scene
//!
//! Owns the templates, the simulation state and the sound bank. Input is turned
//! into a `TickInput`, the simulation advances, events become sound cues, and
//! the pools are drawn back-to-front.

use glam::Vec2;

use crate::audio::{Music, SoundBank, SoundEffect};
use crate::platform::{FontSize, InputEvent, Key, KeyState, Renderer};
use crate::sim::{PlayerPhase, Rect, SimState, Spawner, Templates, TickInput, tick};

use super::{Context, Scene, SceneRequest, render_text_centered, render_text_right};

const HUD_MARGIN: f32 = 10.0;
const HUD_SPACING: f32 = 5.0;
const WHITE: [u8; 3] = [255, 255, 255];
const GREY: [u8; 3] = [100, 100, 100];

pub struct MainScene {
    seed: u64,
    templates: Templates,
    state: SimState,
    sounds: SoundBank,
    /// Shield key pressed since the last update
    shield_requested: bool,
}

impl MainScene {
    pub fn new(seed: u64) -> Self {
        let templates = Templates::unloaded();
        let state = SimState::new(
            seed,
            Vec2::new(crate::consts::WINDOW_WIDTH, crate::consts::WINDOW_HEIGHT),
            templates.player.clone(),
        );
        Self {
            seed,
            templates,
            state,
            sounds: SoundBank::default(),
            shield_requested: false,
        }
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }
}

/// Held keys to simulation input
fn tick_input(keys: &KeyState, activate_shield: bool) -> TickInput {
    let axis = |neg: Key, pos: Key| match (keys.is_down(neg), keys.is_down(pos)) {
        (true, false) => -1.0,
        (false, true) => 1.0,
        _ => 0.0,
    };
    TickInput {
        movement: Vec2::new(axis(Key::Left, Key::Right), axis(Key::Up, Key::Down)),
        fire: keys.is_down(Key::Fire),
        activate_shield,
    }
}

impl Scene for MainScene {
    fn name(&self) -> &'static str {
        "main"
    }

    fn init(&mut self, ctx: &mut Context<'_>) {
        let playfield = ctx.session.playfield();
        let settings = &ctx.session.settings;

        self.templates = Templates::load(ctx.platform.renderer.as_mut(), &settings.assets_dir);
        self.state = SimState::new(self.seed, playfield, self.templates.player.clone());
        self.state.spawner = Spawner::new(settings.spawn_interval_frames);

        self.sounds = SoundBank::load(
            ctx.platform.audio.as_mut(),
            &settings.assets_dir,
            &SoundEffect::ALL,
            &[Music::Battle],
            settings,
        );
        self.sounds.loop_music(ctx.platform.audio.as_mut(), Music::Battle);
        log::info!("Main scene started with seed {}", self.seed);
    }

    fn handle_event(&mut self, event: &InputEvent, ctx: &mut Context<'_>) -> Option<SceneRequest> {
        match event {
            InputEvent::KeyPressed(Key::Pause) => self.state.toggle_pause(),
            InputEvent::KeyPressed(Key::Language) => ctx.session.toggle_language(),
            InputEvent::KeyPressed(Key::Shield) => self.shield_requested = true,
            _ => {}
        }
        None
    }

    fn update(&mut self, dt: f32, keys: &KeyState, ctx: &mut Context<'_>) -> Option<SceneRequest> {
        let input = tick_input(keys, std::mem::take(&mut self.shield_requested));
        tick(&mut self.state, &self.templates, &input, dt, &*ctx.platform.clock);

        let events = self.state.drain_events();
        self.sounds.play_events(ctx.platform.audio.as_mut(), &events);

        if self.state.phase == PlayerPhase::Finished {
            ctx.session.final_score = self.state.score;
            return Some(SceneRequest::End);
        }
        None
    }

    fn render(&self, ctx: &mut Context<'_>) {
        let playfield = ctx.session.playfield();
        let score_label = ctx.text("score");
        let paused_label = ctx.text("paused");
        let renderer = ctx.platform.renderer.as_mut();

        draw_world(renderer, &self.state, &self.templates);
        draw_hud(renderer, &self.state, &self.templates, &score_label, playfield);
        if self.state.paused {
            render_text_centered(renderer, &paused_label, 0.5, FontSize::Title, playfield);
        }
    }

    fn clean(&mut self, ctx: &mut Context<'_>) {
        self.templates.release(ctx.platform.renderer.as_mut());
        self.sounds.release(ctx.platform.audio.as_mut());
    }
}

/// Rotation in degrees for a sprite drawn pointing down along +y
pub fn heading_degrees(direction: Vec2) -> f32 {
    direction.y.atan2(direction.x).to_degrees() - 90.0
}

/// Layering: bullets, player, enemies, items, shield, explosions
pub fn draw_world(renderer: &mut dyn Renderer, state: &SimState, templates: &Templates) {
    for projectile in &state.player_projectiles {
        if let Some(tex) = projectile.sprite {
            renderer.draw_sprite(tex, projectile.body.rect(), None, None);
        }
    }
    for projectile in &state.enemy_projectiles {
        if let Some(tex) = projectile.sprite {
            let rotation = heading_degrees(projectile.direction);
            renderer.draw_sprite(tex, projectile.body.rect(), None, Some(rotation));
        }
    }

    let alive = state.is_alive();
    if let (true, Some(tex)) = (alive, state.player.sprite) {
        renderer.draw_sprite(tex, state.player.body.rect(), None, None);
    }

    for enemy in &state.enemies {
        if let Some(tex) = enemy.sprite {
            renderer.draw_sprite(tex, enemy.body.rect(), None, None);
        }
    }
    for item in &state.items {
        if let Some(tex) = item.sprite {
            renderer.draw_sprite(tex, item.body.rect(), None, None);
        }
    }

    if let (true, Some(tex)) = (alive && state.player.shield.active, templates.shield.sprite) {
        let body = templates.shield.body_around(&state.player);
        renderer.draw_sprite(tex, body.rect(), None, None);
    }

    for explosion in &state.explosions {
        let Some(tex) = explosion.sprite else { continue };
        let frame = explosion.frame_at(state.scene_time);
        let size = explosion.body.size;
        let src = Rect::new(frame as f32 * size.x, 0.0, size.x, size.y);
        renderer.draw_sprite(tex, explosion.body.rect(), Some(src), None);
    }
}

/// Health row (missing health greyed), shield charges, score top-right
pub fn draw_hud(renderer: &mut dyn Renderer, state: &SimState, templates: &Templates, score_label: &str, playfield: Vec2) {
    let player = &state.player;
    let icon = templates.health_icon;
    if let Some(tex) = icon.sprite {
        let health = player.display_health();
        for i in 0..player.max_health {
            let x = HUD_MARGIN + i as f32 * (icon.size.x + HUD_SPACING);
            renderer.tint_sprite(tex, if i < health { WHITE } else { GREY });
            renderer.draw_sprite(tex, Rect::from_pos_size(Vec2::new(x, HUD_MARGIN), icon.size), None, None);
        }
        renderer.tint_sprite(tex, WHITE);
    }

    let shield = templates.shield_icon;
    if let Some(tex) = shield.sprite {
        let y = HUD_MARGIN * 2.0 + icon.size.y;
        for i in 0..player.shield.charges {
            let x = HUD_MARGIN + i as f32 * (shield.size.x + HUD_SPACING);
            renderer.draw_sprite(tex, Rect::from_pos_size(Vec2::new(x, y), shield.size), None, None);
        }
    }

    let text = format!("{score_label}{}", state.score);
    render_text_right(renderer, &text, HUD_MARGIN, HUD_MARGIN, FontSize::Body, playfield.x);
}
