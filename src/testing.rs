//=========================================================================
// Test Support
//=========================================================================
//
// In-memory collaborators for unit tests:
//   MemoryContent     → ContentLoader backed by HashMaps
//   RecordingRenderer → Renderer that records every call
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use glam::Vec2;

//=== Internal Dependencies ===============================================

use crate::core::content::{ContentError, ContentLoader};
use crate::core::display::DisplayTransform;
use crate::core::render::{Color, Font, Renderer, Sprite, Texture};

//=== MemoryContent =======================================================

pub(crate) struct MemoryContent {
    root: PathBuf,
    textures: HashMap<String, Texture>,
    fonts: HashMap<String, Font>,
    texts: HashMap<String, String>,
    next_id: u32,
}

impl MemoryContent {
    pub(crate) fn new() -> Self {
        Self {
            root: PathBuf::from("Content"),
            textures: HashMap::new(),
            fonts: HashMap::new(),
            texts: HashMap::new(),
            next_id: 1,
        }
    }

    /// Every resource the default shared set and built-in screens need.
    pub(crate) fn with_shared_defaults() -> Self {
        Self::new()
            .with_font("gameplayfont")
            .with_font("menufont")
            .with_texture("blank", 1, 1)
            .with_texture("background", 1920, 1080)
            .with_texture("PowerUpHealth", 32, 32)
            .with_texture("PowerUpDamageFixed", 32, 32)
            .with_texture("PowerFireRateFixed", 32, 32)
    }

    pub(crate) fn with_texture(mut self, id: &str, width: u32, height: u32) -> Self {
        let texture = Texture { id: self.next_id, width, height };
        self.next_id += 1;
        self.textures.insert(id.to_string(), texture);
        self
    }

    pub(crate) fn with_font(mut self, id: &str) -> Self {
        let font = Font { id: self.next_id, line_spacing: 20.0 };
        self.next_id += 1;
        self.fonts.insert(id.to_string(), font);
        self
    }

    pub(crate) fn with_text(mut self, path: &str, text: &str) -> Self {
        self.texts.insert(path.to_string(), text.to_string());
        self
    }

    fn not_found(&self, id: &str) -> ContentError {
        ContentError::NotFound {
            id: id.to_string(),
            root: self.root.clone(),
        }
    }
}

impl ContentLoader for MemoryContent {
    fn root(&self) -> &Path {
        &self.root
    }

    fn load_texture(&mut self, id: &str) -> Result<Texture, ContentError> {
        self.textures.get(id).copied().ok_or_else(|| self.not_found(id))
    }

    fn load_font(&mut self, id: &str) -> Result<Font, ContentError> {
        self.fonts.get(id).copied().ok_or_else(|| self.not_found(id))
    }

    fn read_text(&mut self, path: &str) -> Result<String, ContentError> {
        self.texts.get(path).cloned().ok_or_else(|| self.not_found(path))
    }
}

//=== RecordingRenderer ===================================================

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DrawCall {
    Begin(DisplayTransform),
    Sprite(Sprite),
    Text { text: String, position: Vec2, color: Color },
    End,
}

#[derive(Debug, Default)]
pub(crate) struct RecordingRenderer {
    pub(crate) calls: Vec<DrawCall>,
}

impl RecordingRenderer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn sprites(&self) -> Vec<&Sprite> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Sprite(sprite) => Some(sprite),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for RecordingRenderer {
    fn begin_batch(&mut self, transform: DisplayTransform) {
        self.calls.push(DrawCall::Begin(transform));
    }

    fn draw_sprite(&mut self, sprite: &Sprite) {
        self.calls.push(DrawCall::Sprite(*sprite));
    }

    fn draw_string(&mut self, _font: &Font, text: &str, position: Vec2, color: Color) {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            position,
            color,
        });
    }

    fn end_batch(&mut self) {
        self.calls.push(DrawCall::End);
    }
}
