//! Backends without a window or sound device
//!
//! Both record what they were asked to do so runs can be inspected.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use glam::Vec2;

use super::{AudioBackend, FontSize, Renderer, TextureId};
use crate::error::{GameError, ResourceKind};
use crate::sim::Rect;

/// A recorded draw command
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Sprite {
        texture: TextureId,
        dest: Rect,
        src: Option<Rect>,
        rotation: Option<f32>,
    },
    Tint {
        texture: TextureId,
        rgb: [u8; 3],
    },
    Text {
        text: String,
        pos: Vec2,
        font: FontSize,
    },
}

/// Renderer that records calls for the current frame
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    /// Size reported for any path not registered explicitly (None = unknown paths fail)
    default_size: Option<Vec2>,
    known: HashMap<PathBuf, Vec2>,
    textures: HashMap<TextureId, (PathBuf, Vec2)>,
    next_id: u32,
    pub calls: Vec<DrawCall>,
    pub frames_presented: u64,
    pub destroyed: Vec<TextureId>,
}

impl HeadlessRenderer {
    /// Only registered paths load
    pub fn strict() -> Self {
        Self::default()
    }

    /// Every path loads with `default_size`
    pub fn permissive(default_size: Vec2) -> Self {
        Self {
            default_size: Some(default_size),
            ..Self::default()
        }
    }

    pub fn with_texture(mut self, path: impl Into<PathBuf>, size: Vec2) -> Self {
        self.known.insert(path.into(), size);
        self
    }

    /// Texture path for a live handle
    pub fn texture_path(&self, texture: TextureId) -> Option<&Path> {
        self.textures.get(&texture).map(|(p, _)| p.as_path())
    }

    pub fn live_textures(&self) -> usize {
        self.textures.len()
    }
}

/// Fixed glyph cell used to measure text
const GLYPH: Vec2 = Vec2::new(12.0, 24.0);

impl Renderer for HeadlessRenderer {
    fn load_texture(&mut self, path: &Path) -> Result<TextureId, GameError> {
        let size = self
            .known
            .get(path)
            .copied()
            .or(self.default_size)
            .ok_or_else(|| GameError::resource(ResourceKind::Texture, path, "no such file"))?;
        self.next_id += 1;
        let id = TextureId(self.next_id);
        self.textures.insert(id, (path.to_path_buf(), size));
        Ok(id)
    }

    fn texture_size(&self, texture: TextureId) -> Option<Vec2> {
        self.textures.get(&texture).map(|(_, s)| *s)
    }

    fn destroy_texture(&mut self, texture: TextureId) {
        if self.textures.remove(&texture).is_some() {
            self.destroyed.push(texture);
        } else {
            log::warn!("Destroying unknown texture {:?}", texture);
        }
    }

    fn begin_frame(&mut self) {
        self.calls.clear();
    }

    fn present(&mut self) {
        self.frames_presented += 1;
    }

    fn draw_sprite(&mut self, texture: TextureId, dest: Rect, src: Option<Rect>, rotation: Option<f32>) {
        self.calls.push(DrawCall::Sprite {
            texture,
            dest,
            src,
            rotation,
        });
    }

    fn tint_sprite(&mut self, texture: TextureId, rgb: [u8; 3]) {
        self.calls.push(DrawCall::Tint { texture, rgb });
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, font: FontSize) {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            pos,
            font,
        });
    }

    fn measure_text(&self, text: &str, font: FontSize) -> Vec2 {
        let scale = match font {
            FontSize::Body => 1.0,
            FontSize::Title => 2.0,
        };
        Vec2::new(GLYPH.x * text.chars().count() as f32, GLYPH.y) * scale
    }
}

/// Audio sink that only keeps track of requests
#[derive(Debug, Default)]
pub struct HeadlessAudio {
    /// Clip names that fail to load
    pub missing: HashSet<String>,
    pub loaded: HashSet<String>,
    pub played: Vec<String>,
    pub looping: Option<String>,
}

impl HeadlessAudio {
    pub fn with_missing(names: &[&str]) -> Self {
        Self {
            missing: names.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }
}

impl AudioBackend for HeadlessAudio {
    fn load_clip(&mut self, name: &str, path: &Path) -> Result<(), GameError> {
        if self.missing.contains(name) {
            return Err(GameError::resource(ResourceKind::Audio, path, "no such file"));
        }
        self.loaded.insert(name.to_string());
        Ok(())
    }

    fn release_clip(&mut self, name: &str) {
        self.loaded.remove(name);
        if self.looping.as_deref() == Some(name) {
            self.looping = None;
        }
    }

    fn play_clip(&mut self, name: &str, _volume: f32) {
        if self.loaded.contains(name) {
            self.played.push(name.to_string());
        }
    }

    fn loop_clip(&mut self, name: &str, _volume: f32) {
        if self.loaded.contains(name) {
            self.looping = Some(name.to_string());
        }
    }

    fn stop_music(&mut self) {
        self.looping = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_renderer_rejects_unknown_paths() {
        let mut renderer = HeadlessRenderer::strict().with_texture("a.png", Vec2::new(10.0, 20.0));
        let id = renderer.load_texture(Path::new("a.png")).unwrap();
        assert_eq!(renderer.texture_size(id), Some(Vec2::new(10.0, 20.0)));
        assert_eq!(renderer.texture_path(id), Some(Path::new("a.png")));

        let err = renderer.load_texture(Path::new("b.png")).unwrap_err();
        assert!(matches!(err, GameError::ResourceLoad { kind: ResourceKind::Texture, .. }));
    }

    #[test]
    fn test_destroy_releases_texture() {
        let mut renderer = HeadlessRenderer::permissive(Vec2::splat(8.0));
        let id = renderer.load_texture(Path::new("x.png")).unwrap();
        renderer.destroy_texture(id);
        assert_eq!(renderer.live_textures(), 0);
        assert_eq!(renderer.texture_path(id), None);
        assert_eq!(renderer.destroyed, vec![id]);
    }

    #[test]
    fn test_begin_frame_clears_calls() {
        let mut renderer = HeadlessRenderer::permissive(Vec2::splat(8.0));
        let id = renderer.load_texture(Path::new("x.png")).unwrap();
        renderer.begin_frame();
        renderer.draw_sprite(id, Rect::new(0.0, 0.0, 8.0, 8.0), None, None);
        renderer.present();
        assert_eq!(renderer.calls.len(), 1);

        renderer.begin_frame();
        renderer.present();
        assert!(renderer.calls.is_empty());
        assert_eq!(renderer.frames_presented, 2);
    }

    #[test]
    fn test_audio_ignores_unloaded_clips() {
        let mut audio = HeadlessAudio::with_missing(&["boom"]);
        assert!(audio.load_clip("boom", Path::new("boom.wav")).is_err());
        audio.play_clip("boom", 1.0);
        assert!(audio.played.is_empty());
    }
}
