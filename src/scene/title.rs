//! Title screen: looping intro music and a blinking start prompt

use crate::audio::{Music, SoundBank};
use crate::platform::{FontSize, InputEvent, Key, KeyState};

use super::{Context, Scene, SceneRequest, blink_visible, render_text_centered};

/// Prompt blink period in seconds
const BLINK_PERIOD: f64 = 1.0;

#[derive(Debug, Default)]
pub struct TitleScene {
    sounds: SoundBank,
    time: f64,
}

impl TitleScene {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scene for TitleScene {
    fn name(&self) -> &'static str {
        "title"
    }

    fn init(&mut self, ctx: &mut Context<'_>) {
        let settings = &ctx.session.settings;
        self.sounds = SoundBank::load(
            ctx.platform.audio.as_mut(),
            &settings.assets_dir,
            &[],
            &[Music::Title],
            settings,
        );
        self.sounds.loop_music(ctx.platform.audio.as_mut(), Music::Title);
    }

    fn handle_event(&mut self, event: &InputEvent, ctx: &mut Context<'_>) -> Option<SceneRequest> {
        match event {
            InputEvent::KeyPressed(Key::Start) => Some(SceneRequest::Main),
            InputEvent::KeyPressed(Key::Language) => {
                ctx.session.toggle_language();
                None
            }
            _ => None,
        }
    }

    fn update(&mut self, dt: f32, _keys: &KeyState, _ctx: &mut Context<'_>) -> Option<SceneRequest> {
        self.time += dt.max(0.0) as f64;
        None
    }

    fn render(&self, ctx: &mut Context<'_>) {
        let playfield = ctx.session.playfield();
        let title = ctx.text("title");
        let prompt = ctx.text("pressStart");
        let renderer = ctx.platform.renderer.as_mut();

        render_text_centered(renderer, &title, 0.4, FontSize::Title, playfield);
        if blink_visible(self.time, BLINK_PERIOD) {
            render_text_centered(renderer, &prompt, 0.8, FontSize::Body, playfield);
        }
    }

    fn clean(&mut self, ctx: &mut Context<'_>) {
        self.sounds.release(ctx.platform.audio.as_mut());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Platform;
    use crate::scene::Session;
    use crate::settings::Settings;
    use crate::Language;

    #[test]
    fn test_start_requests_main_scene() {
        let mut platform = Platform::headless();
        let mut session = Session::new(Settings::default());
        let mut ctx = Context {
            platform: &mut platform,
            session: &mut session,
        };
        let mut scene = TitleScene::new();
        scene.init(&mut ctx);

        assert_eq!(scene.handle_event(&InputEvent::KeyPressed(Key::Fire), &mut ctx), None);
        assert_eq!(
            scene.handle_event(&InputEvent::KeyPressed(Key::Start), &mut ctx),
            Some(SceneRequest::Main)
        );
        scene.clean(&mut ctx);
    }

    #[test]
    fn test_language_toggle() {
        let mut platform = Platform::headless();
        let mut session = Session::new(Settings::default());
        let mut ctx = Context {
            platform: &mut platform,
            session: &mut session,
        };
        let mut scene = TitleScene::new();
        scene.handle_event(&InputEvent::KeyPressed(Key::Language), &mut ctx);
        assert_eq!(ctx.session.language, Language::Chinese);
        assert_eq!(ctx.text("title"), "太空战机");
    }

    #[test]
    fn test_prompt_blinks() {
        let mut scene = TitleScene::new();
        let mut platform = Platform::headless();
        let mut session = Session::new(Settings::default());
        let mut ctx = Context {
            platform: &mut platform,
            session: &mut session,
        };
        scene.update(0.25, &KeyState::new(), &mut ctx);
        assert!(blink_visible(scene.time, BLINK_PERIOD));
        scene.update(0.5, &KeyState::new(), &mut ctx);
        assert!(!blink_visible(scene.time, BLINK_PERIOD));
    }
}
