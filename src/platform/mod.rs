//! Platform abstraction layer
//!
//! The simulation never talks to a window, mixer or font library directly.
//! Hosts implement these capability traits:
//! - `Renderer`: textures, sprites, text
//! - `AudioBackend`: named clips, one-shot and looped playback
//! - `Clock`: monotonic nanosecond timestamps
//!
//! Input arrives as a per-frame `KeyState` plus a stream of `InputEvent`s.

pub mod clock;
pub mod headless;
pub mod input;

use std::path::Path;

use glam::Vec2;

use crate::error::GameError;
use crate::locale::Localizer;
use crate::sim::Rect;

pub use clock::{ManualClock, MonotonicClock};
pub use headless::{DrawCall, HeadlessAudio, HeadlessRenderer};
pub use input::{InputEvent, Key, KeyState};

/// Opaque texture handle issued by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Font size class for text rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontSize {
    Body,
    Title,
}

/// Drawing backend
pub trait Renderer {
    fn load_texture(&mut self, path: &Path) -> Result<TextureId, GameError>;
    /// Pixel size of a loaded texture
    fn texture_size(&self, texture: TextureId) -> Option<Vec2>;
    fn destroy_texture(&mut self, texture: TextureId);

    fn begin_frame(&mut self);
    fn present(&mut self);

    /// Draw `src` (or the whole texture) into `dest`, rotated clockwise by degrees
    fn draw_sprite(&mut self, texture: TextureId, dest: Rect, src: Option<Rect>, rotation: Option<f32>);
    /// Color modulation applied to subsequent draws of `texture`
    fn tint_sprite(&mut self, texture: TextureId, rgb: [u8; 3]);

    /// Draw text with its top-left corner at `pos`
    fn draw_text(&mut self, text: &str, pos: Vec2, font: FontSize);
    fn measure_text(&self, text: &str, font: FontSize) -> Vec2;
}

/// Sound backend keyed by clip name
pub trait AudioBackend {
    fn load_clip(&mut self, name: &str, path: &Path) -> Result<(), GameError>;
    fn release_clip(&mut self, name: &str);
    fn play_clip(&mut self, name: &str, volume: f32);
    /// Loop a clip on the music track, replacing whatever was looping
    fn loop_clip(&mut self, name: &str, volume: f32);
    fn stop_music(&mut self);
}

/// Monotonic high-resolution time source
pub trait Clock {
    fn now_ns(&self) -> u64;
}

/// All host capabilities bundled for the scenes
pub struct Platform {
    pub renderer: Box<dyn Renderer>,
    pub audio: Box<dyn AudioBackend>,
    pub clock: Box<dyn Clock>,
    pub localizer: Box<dyn Localizer>,
}

impl Platform {
    /// Recording renderer, silent audio, wall clock and the built-in string table
    pub fn headless() -> Self {
        Self {
            renderer: Box::new(HeadlessRenderer::permissive(Vec2::new(64.0, 64.0))),
            audio: Box::new(HeadlessAudio::default()),
            clock: Box::new(MonotonicClock::new()),
            localizer: Box::new(crate::locale::BuiltinLocalizer::default()),
        }
    }
}
