//! Scene lifecycle
//!
//! A scene is driven once per frame by `Game`: events, then update, then render.
//! Scenes never build each other; they return a `SceneRequest` and the shell
//! performs the switch after the call returns.

pub mod end;
pub mod main_scene;
pub mod title;

use glam::Vec2;

use crate::highscores::HighScores;
use crate::locale::Language;
use crate::platform::{FontSize, InputEvent, KeyState, Platform, Renderer};
use crate::settings::Settings;

pub use end::EndScene;
pub use main_scene::MainScene;
pub use title::TitleScene;

/// Scene the shell should switch to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneRequest {
    Title,
    Main,
    End,
}

/// State that outlives individual scenes
#[derive(Debug, Clone)]
pub struct Session {
    pub settings: Settings,
    pub language: Language,
    /// Score of the last finished run
    pub final_score: u64,
    pub leaderboard: HighScores,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        Self {
            language: settings.language,
            settings,
            final_score: 0,
            leaderboard: HighScores::new(),
        }
    }

    pub fn playfield(&self) -> Vec2 {
        Vec2::new(self.settings.window_width, self.settings.window_height)
    }

    pub fn toggle_language(&mut self) {
        self.language = self.language.toggled();
        log::info!("Language switched to {:?}", self.language);
    }
}

/// Everything a scene may touch during a call
pub struct Context<'a> {
    pub platform: &'a mut Platform,
    pub session: &'a mut Session,
}

impl Context<'_> {
    /// Localized string for the session language
    pub fn text(&self, key: &str) -> String {
        self.platform.localizer.text(self.session.language, key)
    }
}

/// Contract between the frame driver and a scene
pub trait Scene {
    fn name(&self) -> &'static str;

    /// Load resources. Failures are logged and leave the scene degraded.
    fn init(&mut self, ctx: &mut Context<'_>);

    /// One-shot input (key presses, committed text)
    fn handle_event(&mut self, event: &InputEvent, ctx: &mut Context<'_>) -> Option<SceneRequest>;

    fn update(&mut self, dt: f32, keys: &KeyState, ctx: &mut Context<'_>) -> Option<SceneRequest>;

    fn render(&self, ctx: &mut Context<'_>);

    /// Release resources. Called exactly once, after the last update.
    fn clean(&mut self, ctx: &mut Context<'_>);
}

/// Construct the scene for `request`
pub fn build_scene(request: SceneRequest, session: &Session) -> Box<dyn Scene> {
    match request {
        SceneRequest::Title => Box::new(TitleScene::new()),
        SceneRequest::Main => {
            let seed = session.settings.seed.unwrap_or_else(rand::random);
            Box::new(MainScene::new(seed))
        }
        SceneRequest::End => Box::new(EndScene::new(session.final_score)),
    }
}

/// Draw `text` horizontally centred at `y_fraction` of the playfield height
pub fn render_text_centered(
    renderer: &mut dyn Renderer,
    text: &str,
    y_fraction: f32,
    font: FontSize,
    playfield: Vec2,
) {
    let size = renderer.measure_text(text, font);
    let pos = Vec2::new((playfield.x - size.x) / 2.0, playfield.y * y_fraction);
    renderer.draw_text(text, pos, font);
}

/// Draw `text` right-aligned with `margin` from the right edge
pub fn render_text_right(renderer: &mut dyn Renderer, text: &str, y: f32, margin: f32, font: FontSize, width: f32) {
    let size = renderer.measure_text(text, font);
    renderer.draw_text(text, Vec2::new(width - size.x - margin, y), font);
}

/// Blinking prompts: visible during the first half of every `period`
pub fn blink_visible(time: f64, period: f64) -> bool {
    time.rem_euclid(period) < period / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{DrawCall, HeadlessRenderer};

    #[test]
    fn test_centered_text_position() {
        let mut renderer = HeadlessRenderer::strict();
        // 5 glyphs * 12 = 60 wide
        render_text_centered(&mut renderer, "hello", 0.5, FontSize::Body, Vec2::new(600.0, 800.0));
        assert_eq!(
            renderer.calls,
            vec![DrawCall::Text {
                text: "hello".into(),
                pos: Vec2::new(270.0, 400.0),
                font: FontSize::Body,
            }]
        );
    }

    #[test]
    fn test_right_aligned_text() {
        let mut renderer = HeadlessRenderer::strict();
        render_text_right(&mut renderer, "ab", 10.0, 10.0, FontSize::Body, 600.0);
        match &renderer.calls[0] {
            DrawCall::Text { pos, .. } => assert_eq!(*pos, Vec2::new(566.0, 10.0)),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_blink_first_half_visible() {
        assert!(blink_visible(0.0, 1.0));
        assert!(blink_visible(0.49, 1.0));
        assert!(!blink_visible(0.5, 1.0));
        assert!(blink_visible(1.2, 1.0));
    }

    #[test]
    fn test_build_scene_uses_configured_seed() {
        let session = Session::new(Settings {
            seed: Some(5),
            ..Settings::default()
        });
        assert_eq!(build_scene(SceneRequest::Main, &session).name(), "main");
        assert_eq!(build_scene(SceneRequest::Title, &session).name(), "title");
        assert_eq!(build_scene(SceneRequest::End, &session).name(), "end");
    }
}
