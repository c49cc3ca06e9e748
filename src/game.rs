//! Frame driver glue
//!
//! `Game` owns the platform and the session and holds exactly one live scene.
//! Per frame: events, update, then begin_frame / render / present.

use crate::platform::{InputEvent, KeyState, Platform};
use crate::scene::{Context, Scene, SceneRequest, Session, build_scene};
use crate::settings::Settings;

pub struct Game {
    platform: Platform,
    session: Session,
    scene: Box<dyn Scene>,
    running: bool,
    cleaned: bool,
}

impl Game {
    /// Start at the title scene
    pub fn new(platform: Platform, settings: Settings) -> Self {
        let session = Session::new(settings);
        let scene = build_scene(SceneRequest::Title, &session);
        let mut game = Self {
            platform,
            session,
            scene,
            running: true,
            cleaned: false,
        };
        game.with_scene(|scene, ctx| scene.init(ctx));
        log::info!("Game started in {} scene", game.scene.name());
        game
    }

    fn with_scene<R>(&mut self, f: impl FnOnce(&mut dyn Scene, &mut Context<'_>) -> R) -> R {
        let mut ctx = Context {
            platform: &mut self.platform,
            session: &mut self.session,
        };
        f(self.scene.as_mut(), &mut ctx)
    }

    /// Run one frame with `dt` seconds elapsed
    pub fn frame(&mut self, dt: f32, keys: &KeyState, events: &[InputEvent]) {
        if !self.running {
            return;
        }

        for event in events {
            if *event == InputEvent::Quit {
                log::info!("Quit requested");
                self.running = false;
                return;
            }
            if let Some(request) = self.with_scene(|scene, ctx| scene.handle_event(event, ctx)) {
                self.change_scene(request);
            }
        }

        if let Some(request) = self.with_scene(|scene, ctx| scene.update(dt, keys, ctx)) {
            self.change_scene(request);
        }

        self.platform.renderer.begin_frame();
        self.with_scene(|scene, ctx| scene.render(ctx));
        self.platform.renderer.present();
    }

    /// Clean the current scene, then build and init the requested one
    pub fn change_scene(&mut self, request: SceneRequest) {
        let from = self.scene.name();
        self.with_scene(|scene, ctx| scene.clean(ctx));
        self.scene = build_scene(request, &self.session);
        self.with_scene(|scene, ctx| scene.init(ctx));
        log::info!("Scene changed: {from} -> {}", self.scene.name());
    }

    /// Stop and release the current scene. Only the first call does anything.
    pub fn shutdown(&mut self) {
        self.running = false;
        if self.cleaned {
            return;
        }
        self.cleaned = true;
        self.with_scene(|scene, ctx| scene.clean(ctx));
        log::info!("Game shut down");
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn scene_name(&self) -> &'static str {
        self.scene.name()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }
}

impl Drop for Game {
    fn drop(&mut self) {
        self.shutdown();
    }
}
