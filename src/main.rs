//! Space Plane headless runner
//!
//! Usage: `space-plane [settings.json] [frames]`
//!
//! Drives the game with a scripted autopilot against the recording renderer and
//! silent audio, then logs how the run went. Time is simulated, so a run with a
//! fixed seed plays out the same way every time.

use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

use space_plane::platform::{InputEvent, Key, KeyState, ManualClock, Platform};
use space_plane::{Game, Settings, logging};

const DEFAULT_FRAMES: u64 = 60 * 120;
/// Frames between direction changes
const SWAY_FRAMES: u64 = 90;
/// Frames between shield presses
const SHIELD_FRAMES: u64 = 600;

/// Keys and events for `frame` given the current scene
fn autopilot(frame: u64, scene: &str) -> (KeyState, Vec<InputEvent>) {
    let mut keys = KeyState::new();
    let mut events = Vec::new();
    match scene {
        "title" => events.push(InputEvent::KeyPressed(Key::Start)),
        "main" => {
            keys.press(Key::Fire);
            keys.press(if (frame / SWAY_FRAMES) % 2 == 0 { Key::Left } else { Key::Right });
            if frame % SHIELD_FRAMES == 0 {
                events.push(InputEvent::KeyPressed(Key::Shield));
            }
        }
        _ => {
            events.push(InputEvent::TextInput("Autopilot".into()));
            events.push(InputEvent::KeyPressed(Key::Confirm));
        }
    }
    (keys, events)
}

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let settings = match args.next().map(PathBuf::from) {
        Some(path) => Settings::load_from(&path),
        None => Ok(Settings::default()),
    };
    let settings = match settings {
        Ok(s) => s,
        Err(e) => {
            eprintln!("space-plane: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = logging::init(&settings) {
        eprintln!("space-plane: {e}");
        return ExitCode::FAILURE;
    }

    let frames = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            log::error!("Invalid frame count: {e}");
            return ExitCode::FAILURE;
        }
        None => DEFAULT_FRAMES,
    };

    log::info!("Space Plane (headless) starting, {frames} frames");
    let dt = 1.0 / settings.fps as f32;
    let clock = Rc::new(ManualClock::new(0));
    let platform = Platform {
        clock: Box::new(Rc::clone(&clock)),
        ..Platform::headless()
    };
    let mut game = Game::new(platform, settings);

    for frame in 0..frames {
        if !game.is_running() {
            break;
        }
        let (keys, events) = autopilot(frame, game.scene_name());
        game.frame(dt, &keys, &events);
        clock.advance_secs(dt);

        if game.scene_name() == "end" && !game.session().leaderboard.is_empty() {
            log::info!("Run finished after {} frames", frame + 1);
            break;
        }
    }

    let session = game.session();
    for (rank, entry) in session.leaderboard.entries().iter().enumerate() {
        log::info!("#{} {} {}", rank + 1, entry.name, entry.score);
    }
    log::info!("Last score: {}", session.final_score);
    game.shutdown();
    ExitCode::SUCCESS
}
