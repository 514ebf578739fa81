//=========================================================================
// Content Loading
//=========================================================================
//
// Contract for resolving resource identifiers against a content root,
// plus the shared resource set the screen manager lends to screens.
//
//   ContentLoader
//     ├─ load_texture(id) → Texture
//     ├─ load_font(id)    → Font
//     └─ read_text(path)  → String   (default: root/path on disk)
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::render::{Font, Texture};

//=== ContentError ========================================================

/// Failure to resolve or read a resource.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The identifier does not name a known resource.
    #[error("content '{id}' not found under {root}")]
    NotFound { id: String, root: PathBuf },

    /// The resource exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backend rejected the resource (bad image, unsupported font...).
    #[error("content '{id}' could not be loaded: {reason}")]
    Invalid { id: String, reason: String },
}

//=== ContentLoader =======================================================

/// Resolves resource identifiers relative to a configured root.
///
/// Backends implement texture and font loading; text resources default to
/// plain file reads under [`root`](Self::root).
pub trait ContentLoader {
    /// Directory all identifiers are relative to.
    fn root(&self) -> &Path;

    /// Loads (or returns a cached) texture.
    fn load_texture(&mut self, id: &str) -> Result<Texture, ContentError>;

    /// Loads (or returns a cached) font.
    fn load_font(&mut self, id: &str) -> Result<Font, ContentError>;

    /// Reads a text resource.
    fn read_text(&mut self, path: &str) -> Result<String, ContentError> {
        let full_path = self.root().join(path);
        debug!("Reading text resource {}", full_path.display());

        fs::read_to_string(&full_path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ContentError::NotFound {
                    id: path.to_string(),
                    root: self.root().to_path_buf(),
                }
            } else {
                ContentError::Io { path: full_path, source }
            }
        })
    }
}

//=== SharedResourceIds ===================================================

/// Identifiers of the resources every screen may draw with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedResourceIds {
    pub font: String,
    pub blank_texture: String,
    pub textures: Vec<String>,
}

impl Default for SharedResourceIds {
    fn default() -> Self {
        Self {
            font: "gameplayfont".to_string(),
            blank_texture: "blank".to_string(),
            textures: vec![
                "PowerUpHealth".to_string(),
                "PowerUpDamageFixed".to_string(),
                "PowerFireRateFixed".to_string(),
            ],
        }
    }
}

//=== SharedResources =====================================================

/// Font and textures owned by the screen manager.
///
/// Lent to screens by reference for one draw call at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct SharedResources {
    pub font: Font,
    /// 1×1 white texture used for overlays.
    pub blank: Texture,
    pub textures: Vec<Texture>,
}

impl SharedResources {
    /// Loads every shared resource; any missing one is fatal.
    pub fn load(
        content: &mut dyn ContentLoader,
        ids: &SharedResourceIds,
    ) -> Result<Self, ContentError> {
        let font = content.load_font(&ids.font)?;
        let blank = content.load_texture(&ids.blank_texture)?;
        let textures = ids
            .textures
            .iter()
            .map(|id| content.load_texture(id))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { font, blank, textures })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
