//=========================================================================
// Tile Map
//=========================================================================
//
// Loads a four-line map resource and draws it as a grid of sprites.
//
// Architecture:
//   Tilemap
//     ├─ filename / target_height        (construction)
//     └─ LoadedMap                        (after load_content)
//          ├─ MapDescription  (parsed text)
//          ├─ Tileset         (source rect table)
//          └─ scale           (target_height / map pixel height, or 1.0)
//
// Flow:
//   load_content() → read_text → parse → load_texture → validate → scale
//   draw()         → one sprite per non-empty cell, row-major
//
//=========================================================================

//=== Module Declarations =================================================

mod description;
mod tileset;

//=== Public API ==========================================================

pub use description::MapDescription;
pub use tileset::Tileset;

//=== External Dependencies ===============================================

use std::num::ParseIntError;

use glam::Vec2;
use log::{debug, error};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::content::{ContentError, ContentLoader};
use crate::core::render::{Renderer, Sprite};

//=== TilemapError ========================================================

/// Errors raised while loading a map resource.
#[derive(Debug, Error)]
pub enum TilemapError {
    /// A required line is absent or blank.
    #[error("line {line}: missing {name}")]
    MissingLine { line: usize, name: &'static str },

    /// A `a,b` header line has the wrong number of fields.
    #[error("line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A token is not a non-negative integer.
    #[error("line {line}: '{token}' is not a valid number")]
    InvalidNumber {
        line: usize,
        token: String,
        #[source]
        source: ParseIntError,
    },

    /// Tile or map size of zero.
    #[error("line {line}: dimensions must be non-zero")]
    ZeroDimension { line: usize },

    /// Map width or height in pixels does not fit a sprite coordinate.
    #[error("line {line}: map is larger than {} pixels on one axis", i32::MAX)]
    PixelSizeOverflow { line: usize },

    /// Grid line length differs from `map_width * map_height`.
    #[error("map declares {expected} cells but lists {found}")]
    CellCount { expected: usize, found: usize },

    /// Non-blank text after the grid line.
    #[error("line {line}: unexpected content after the cell grid")]
    TrailingContent { line: usize },

    /// A cell names a tile the tileset does not contain.
    #[error("cell ({column}, {row}) references tile {value} but the tileset has {tile_count} tiles")]
    TileOutOfRange {
        column: u32,
        row: u32,
        value: u32,
        tile_count: usize,
    },

    /// Map text or tileset image could not be loaded.
    #[error(transparent)]
    Content(#[from] ContentError),
}

//=== Tilemap =============================================================

#[derive(Debug, Clone)]
struct LoadedMap {
    description: MapDescription,
    tileset: Tileset,
    scale: f32,
}

/// Tile grid drawn from a shared tileset image.
///
/// Constructed with a resource name, populated once by
/// [`load_content`](Self::load_content). When a target height is set the
/// whole map is scaled uniformly so its height matches it.
///
/// # Example
///
/// ```no_run
/// # use tilestack::core::tilemap::Tilemap;
/// # fn demo(content: &mut dyn tilestack::core::content::ContentLoader,
/// #         renderer: &mut dyn tilestack::core::render::Renderer)
/// #     -> Result<(), tilestack::core::tilemap::TilemapError> {
/// let mut map = Tilemap::new("map.txt").with_target_height(1080.0);
/// map.load_content(content)?;
/// map.draw(renderer);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Tilemap {
    filename: String,
    target_height: Option<f32>,
    loaded: Option<LoadedMap>,
}

impl Tilemap {
    //--- Construction -----------------------------------------------------

    /// Creates an unloaded map for the given resource.
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            target_height: None,
            loaded: None,
        }
    }

    /// Scales the map so its pixel height equals `height` once loaded.
    pub fn with_target_height(mut self, height: f32) -> Self {
        self.target_height = Some(height);
        self
    }

    //--- Loading ----------------------------------------------------------

    /// Reads, parses and validates the map resource.
    ///
    /// Every cell is checked against the tileset here, so a loaded map can
    /// always be drawn.
    pub fn load_content(&mut self, content: &mut dyn ContentLoader) -> Result<(), TilemapError> {
        let text = content.read_text(&self.filename)?;
        let description = MapDescription::parse(&text)?;

        let texture = content.load_texture(&description.tileset)?;
        let tileset = Tileset::new(texture, description.tile_width, description.tile_height);

        validate_cells(&description, &tileset)?;

        let scale = scale_for(&description, self.target_height);

        debug!(
            "Loaded tilemap {} ({}x{} tiles, {} tileset entries, scale {:.3})",
            self.filename,
            description.map_width,
            description.map_height,
            tileset.len(),
            scale
        );

        self.loaded = Some(LoadedMap {
            description,
            tileset,
            scale,
        });
        Ok(())
    }

    /// Changes the target height and recomputes the scale.
    pub fn set_target_height(&mut self, height: Option<f32>) {
        self.target_height = height;
        if let Some(loaded) = &mut self.loaded {
            loaded.scale = scale_for(&loaded.description, height);
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    pub fn description(&self) -> Option<&MapDescription> {
        self.loaded.as_ref().map(|loaded| &loaded.description)
    }

    /// Uniform scale applied when drawing (1.0 until loaded).
    pub fn scale(&self) -> f32 {
        self.loaded.as_ref().map_or(1.0, |loaded| loaded.scale)
    }

    /// Drawn size in pixels after scaling.
    pub fn pixel_size(&self) -> Option<Vec2> {
        self.loaded.as_ref().map(|loaded| {
            let d = &loaded.description;
            Vec2::new(
                (d.map_width * d.tile_width) as f32,
                (d.map_height * d.tile_height) as f32,
            ) * loaded.scale
        })
    }

    //--- Drawing ----------------------------------------------------------

    /// Queues one sprite per non-empty cell into the current batch.
    ///
    /// The caller owns the batch (`begin_batch` / `end_batch`). An unloaded
    /// map draws nothing.
    pub fn draw(&self, renderer: &mut dyn Renderer) {
        let Some(loaded) = &self.loaded else {
            return;
        };

        let d = &loaded.description;
        let texture = loaded.tileset.texture();

        for row in 0..d.map_height {
            for column in 0..d.map_width {
                let value = d.cells[(row * d.map_width + column) as usize];
                if value == 0 {
                    continue;
                }

                let Some(source) = loaded.tileset.tile(value as usize - 1) else {
                    error!(
                        "Tilemap {} cell ({}, {}) references missing tile {}",
                        self.filename, column, row, value
                    );
                    continue;
                };

                let position = Vec2::new(
                    (column * d.tile_width) as f32,
                    (row * d.tile_height) as f32,
                ) * loaded.scale;

                renderer.draw_sprite(
                    &Sprite::at(texture, position)
                        .with_source(source)
                        .with_scale(loaded.scale),
                );
            }
        }
    }
}

//=== Internal Helpers ====================================================

fn validate_cells(description: &MapDescription, tileset: &Tileset) -> Result<(), TilemapError> {
    let tile_count = tileset.len();

    for (index, &value) in description.cells.iter().enumerate() {
        if value as usize > tile_count {
            let width = description.map_width as usize;
            return Err(TilemapError::TileOutOfRange {
                column: (index % width) as u32,
                row: (index / width) as u32,
                value,
                tile_count,
            });
        }
    }

    Ok(())
}

fn scale_for(description: &MapDescription, target_height: Option<f32>) -> f32 {
    match target_height {
        Some(height) => height / (description.map_height * description.tile_height) as f32,
        None => 1.0,
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::render::Rect;
    use crate::testing::{MemoryContent, RecordingRenderer};

    const SMALL_MAP: &str = "tiles.png\n16,16\n2,2\n1,0,0,2\n";

    fn content_with(map: &str) -> MemoryContent {
        MemoryContent::new()
            .with_texture("tiles.png", 32, 32)
            .with_text("map.txt", map)
    }

    fn loaded(map: &str) -> Tilemap {
        let mut tilemap = Tilemap::new("map.txt");
        tilemap
            .load_content(&mut content_with(map))
            .expect("map should load");
        tilemap
    }

    //--- Loading ----------------------------------------------------------

    #[test]
    fn new_map_is_unloaded() {
        let tilemap = Tilemap::new("map.txt");
        assert!(!tilemap.is_loaded());
        assert_eq!(tilemap.scale(), 1.0);
        assert!(tilemap.pixel_size().is_none());
    }

    #[test]
    fn load_populates_description() {
        let tilemap = loaded(SMALL_MAP);
        let description = tilemap.description().expect("loaded");
        assert_eq!(description.cells, vec![1, 0, 0, 2]);
        assert_eq!(tilemap.pixel_size(), Some(Vec2::new(32.0, 32.0)));
    }

    #[test]
    fn missing_resource_is_a_content_error() {
        let mut tilemap = Tilemap::new("nowhere.txt");
        let err = tilemap.load_content(&mut content_with(SMALL_MAP)).unwrap_err();
        assert!(matches!(err, TilemapError::Content(ContentError::NotFound { .. })));
        assert!(!tilemap.is_loaded());
    }

    #[test]
    fn missing_tileset_image_is_a_content_error() {
        let mut content = MemoryContent::new().with_text("map.txt", SMALL_MAP);
        let err = Tilemap::new("map.txt").load_content(&mut content).unwrap_err();
        assert!(matches!(err, TilemapError::Content(_)));
    }

    #[test]
    fn out_of_range_tile_is_rejected_at_load() {
        // 32x32 sheet of 16x16 tiles holds 4 tiles
        let mut tilemap = Tilemap::new("map.txt");
        let err = tilemap
            .load_content(&mut content_with("tiles.png\n16,16\n2,2\n1,0,5,2\n"))
            .unwrap_err();

        assert!(matches!(
            err,
            TilemapError::TileOutOfRange { column: 0, row: 1, value: 5, tile_count: 4 }
        ));
    }

    #[test]
    fn highest_tile_index_is_accepted() {
        let tilemap = loaded("tiles.png\n16,16\n2,2\n4,4,4,4\n");
        assert!(tilemap.is_loaded());
    }

    #[test]
    fn oversized_map_fails_at_load_instead_of_draw() {
        let mut content = MemoryContent::new()
            .with_texture("t", 3_000_000_000, 1)
            .with_text("map.txt", "t\n3000000000,1\n3,1\n1,1,1\n");

        let mut tilemap = Tilemap::new("map.txt").with_target_height(1080.0);
        let err = tilemap.load_content(&mut content).unwrap_err();

        assert!(matches!(err, TilemapError::PixelSizeOverflow { line: 3 }));
        assert!(!tilemap.is_loaded());
    }

    //--- Scaling ----------------------------------------------------------

    #[test]
    fn target_height_sets_uniform_scale() {
        let mut tilemap = Tilemap::new("map.txt").with_target_height(64.0);
        tilemap.load_content(&mut content_with(SMALL_MAP)).expect("loads");

        assert_eq!(tilemap.scale(), 2.0);
        assert_eq!(tilemap.pixel_size(), Some(Vec2::new(64.0, 64.0)));
    }

    #[test]
    fn changing_target_height_rescales() {
        let mut tilemap = loaded(SMALL_MAP);
        tilemap.set_target_height(Some(16.0));
        assert_eq!(tilemap.scale(), 0.5);

        tilemap.set_target_height(None);
        assert_eq!(tilemap.scale(), 1.0);
    }

    //--- Drawing ----------------------------------------------------------

    #[test]
    fn two_by_two_map_draws_only_non_empty_cells() {
        let tilemap = loaded(SMALL_MAP);
        let mut renderer = RecordingRenderer::new();

        tilemap.draw(&mut renderer);

        let sprites = renderer.sprites();
        assert_eq!(sprites.len(), 2);

        // cell (0,0) → tile 0
        assert_eq!(sprites[0].source, Some(Rect::new(0, 0, 16, 16)));
        assert_eq!(
            sprites[0].destination,
            crate::core::render::Destination::Position(Vec2::new(0.0, 0.0))
        );

        // cell (1,1) → tile 1
        assert_eq!(sprites[1].source, Some(Rect::new(16, 0, 16, 16)));
        assert_eq!(
            sprites[1].destination,
            crate::core::render::Destination::Position(Vec2::new(16.0, 16.0))
        );
    }

    #[test]
    fn empty_cells_never_draw() {
        let tilemap = loaded("tiles.png\n16,16\n2,2\n0,0,0,0\n");
        let mut renderer = RecordingRenderer::new();
        tilemap.draw(&mut renderer);
        assert!(renderer.calls.is_empty());
    }

    #[test]
    fn scaled_draw_moves_and_scales_sprites() {
        let mut tilemap = Tilemap::new("map.txt").with_target_height(64.0);
        tilemap.load_content(&mut content_with(SMALL_MAP)).expect("loads");
        let mut renderer = RecordingRenderer::new();

        tilemap.draw(&mut renderer);

        let sprites = renderer.sprites();
        assert_eq!(sprites[1].scale, 2.0);
        assert_eq!(
            sprites[1].destination,
            crate::core::render::Destination::Position(Vec2::new(32.0, 32.0))
        );
    }

    #[test]
    fn unloaded_map_draws_nothing() {
        let mut renderer = RecordingRenderer::new();
        Tilemap::new("map.txt").draw(&mut renderer);
        assert!(renderer.calls.is_empty());
    }
}
