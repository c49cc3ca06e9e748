//! Game over: name entry, then the leaderboard with a restart prompt

use crate::platform::{FontSize, InputEvent, Key, KeyState};

use super::{Context, Scene, SceneRequest, blink_visible, render_text_centered};

const BLINK_PERIOD: f64 = 1.0;
const MAX_NAME_CHARS: usize = 16;
/// Vertical step between leaderboard rows, as a fraction of the playfield
const ROW_STEP: f32 = 0.06;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EndPhase {
    NameEntry,
    Leaderboard,
}

#[derive(Debug)]
pub struct EndScene {
    score: u64,
    name: String,
    phase: EndPhase,
    /// Rank achieved, if the score made the board
    rank: Option<usize>,
    time: f64,
}

impl EndScene {
    pub fn new(score: u64) -> Self {
        Self {
            score,
            name: String::new(),
            phase: EndPhase::NameEntry,
            rank: None,
            time: 0.0,
        }
    }

    /// Cursor and restart prompt show in the second half of each period
    fn blink_on(&self) -> bool {
        !blink_visible(self.time, BLINK_PERIOD)
    }

    /// Typed name with the blinking cursor, padded so the line keeps its width
    fn name_line(&self) -> String {
        let cursor = if self.blink_on() { '_' } else { ' ' };
        format!("{}{cursor}", self.name)
    }

    fn commit(&mut self, ctx: &mut Context<'_>) {
        self.rank = ctx.session.leaderboard.insert(&self.name, self.score);
        self.phase = EndPhase::Leaderboard;
        self.time = 0.0;
    }

    fn render_name_entry(&self, ctx: &mut Context<'_>) {
        let playfield = ctx.session.playfield();
        let lines = [
            (ctx.text("gameOver"), 0.15, FontSize::Title),
            (format!("{}{}", ctx.text("endScore"), self.score), 0.3, FontSize::Body),
            (ctx.text("inputName"), 0.45, FontSize::Body),
            (self.name_line(), 0.55, FontSize::Body),
            (ctx.text("ensureName"), 0.7, FontSize::Body),
        ];
        let renderer = ctx.platform.renderer.as_mut();
        for (text, y, font) in &lines {
            render_text_centered(renderer, text, *y, *font, playfield);
        }
    }

    fn render_leaderboard(&self, ctx: &mut Context<'_>) {
        let playfield = ctx.session.playfield();
        let heading = ctx.text("scoreList");
        let prompt = ctx.text("restartGame");
        let rows: Vec<String> = ctx
            .session
            .leaderboard
            .entries()
            .iter()
            .enumerate()
            .map(|(i, e)| {
                let marker = if Some(i + 1) == self.rank { "> " } else { "" };
                format!("{marker}{}. {}  {}", i + 1, e.name, e.score)
            })
            .collect();

        let renderer = ctx.platform.renderer.as_mut();
        render_text_centered(renderer, &heading, 0.1, FontSize::Title, playfield);
        for (i, row) in rows.iter().enumerate() {
            let y = 0.25 + i as f32 * ROW_STEP;
            render_text_centered(renderer, row, y, FontSize::Body, playfield);
        }
        if self.blink_on() {
            render_text_centered(renderer, &prompt, 0.85, FontSize::Body, playfield);
        }
    }
}

impl Scene for EndScene {
    fn name(&self) -> &'static str {
        "end"
    }

    fn init(&mut self, _ctx: &mut Context<'_>) {
        log::info!("Run over with score {}", self.score);
    }

    fn handle_event(&mut self, event: &InputEvent, ctx: &mut Context<'_>) -> Option<SceneRequest> {
        if let InputEvent::KeyPressed(Key::Language) = event {
            ctx.session.toggle_language();
            return None;
        }

        match (self.phase, event) {
            (EndPhase::NameEntry, InputEvent::TextInput(text)) => {
                let room = MAX_NAME_CHARS.saturating_sub(self.name.chars().count());
                self.name.extend(text.chars().filter(|c| !c.is_control()).take(room));
                None
            }
            (EndPhase::NameEntry, InputEvent::KeyPressed(Key::Backspace)) => {
                self.name.pop();
                None
            }
            (EndPhase::NameEntry, InputEvent::KeyPressed(Key::Confirm)) => {
                self.commit(ctx);
                None
            }
            (EndPhase::Leaderboard, InputEvent::KeyPressed(Key::Restart)) => Some(SceneRequest::Main),
            _ => None,
        }
    }

    fn update(&mut self, dt: f32, _keys: &KeyState, _ctx: &mut Context<'_>) -> Option<SceneRequest> {
        self.time += dt.max(0.0) as f64;
        None
    }

    fn render(&self, ctx: &mut Context<'_>) {
        match self.phase {
            EndPhase::NameEntry => self.render_name_entry(ctx),
            EndPhase::Leaderboard => self.render_leaderboard(ctx),
        }
    }

    fn clean(&mut self, _ctx: &mut Context<'_>) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::DEFAULT_NAME;
    use crate::platform::Platform;
    use crate::scene::Session;
    use crate::settings::Settings;

    fn press(scene: &mut EndScene, ctx: &mut Context<'_>, key: Key) -> Option<SceneRequest> {
        scene.handle_event(&InputEvent::KeyPressed(key), ctx)
    }

    #[test]
    fn test_name_entry_then_restart() {
        let mut platform = Platform::headless();
        let mut session = Session::new(Settings::default());
        let mut ctx = Context {
            platform: &mut platform,
            session: &mut session,
        };
        let mut scene = EndScene::new(70);
        scene.init(&mut ctx);

        scene.handle_event(&InputEvent::TextInput("Ace".into()), &mut ctx);
        scene.handle_event(&InputEvent::TextInput("x".into()), &mut ctx);
        press(&mut scene, &mut ctx, Key::Backspace);
        // Restart does nothing until the name is committed
        assert_eq!(press(&mut scene, &mut ctx, Key::Restart), None);
        press(&mut scene, &mut ctx, Key::Confirm);

        assert_eq!(scene.phase, EndPhase::Leaderboard);
        assert_eq!(scene.rank, Some(1));
        let entry = &ctx.session.leaderboard.entries()[0];
        assert_eq!((entry.name.as_str(), entry.score), ("Ace", 70));

        // Typing is ignored once committed
        scene.handle_event(&InputEvent::TextInput("zzz".into()), &mut ctx);
        assert_eq!(scene.name, "Ace");
        assert_eq!(press(&mut scene, &mut ctx, Key::Restart), Some(SceneRequest::Main));
    }

    #[test]
    fn test_cursor_and_prompt_blink_in_second_half() {
        let mut platform = Platform::headless();
        let mut session = Session::new(Settings::default());
        let mut ctx = Context {
            platform: &mut platform,
            session: &mut session,
        };
        let keys = KeyState::new();
        let mut scene = EndScene::new(10);
        scene.handle_event(&InputEvent::TextInput("Ace".into()), &mut ctx);
        assert_eq!(scene.name_line(), "Ace ");

        scene.update(0.6, &keys, &mut ctx);
        assert_eq!(scene.name_line(), "Ace_");
        scene.update(0.5, &keys, &mut ctx);
        assert_eq!(scene.name_line(), "Ace ");

        press(&mut scene, &mut ctx, Key::Confirm);
        assert!(!scene.blink_on());
        scene.update(0.75, &keys, &mut ctx);
        assert!(scene.blink_on());
    }

    #[test]
    fn test_empty_name_recorded_as_default() {
        let mut platform = Platform::headless();
        let mut session = Session::new(Settings::default());
        let mut ctx = Context {
            platform: &mut platform,
            session: &mut session,
        };
        let mut scene = EndScene::new(0);
        press(&mut scene, &mut ctx, Key::Backspace);
        press(&mut scene, &mut ctx, Key::Confirm);
        assert_eq!(ctx.session.leaderboard.entries()[0].name, DEFAULT_NAME);
    }

    #[test]
    fn test_name_length_capped() {
        let mut platform = Platform::headless();
        let mut session = Session::new(Settings::default());
        let mut ctx = Context {
            platform: &mut platform,
            session: &mut session,
        };
        let mut scene = EndScene::new(5);
        scene.handle_event(&InputEvent::TextInput("a".repeat(40)), &mut ctx);
        assert_eq!(scene.name.chars().count(), MAX_NAME_CHARS);
    }
}
