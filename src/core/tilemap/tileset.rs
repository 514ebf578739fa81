//=========================================================================
// Tileset
//=========================================================================
//
// Partitions one texture into equally sized tile rectangles, row-major:
//
//   columns = texture.width  / tile_width
//   rows    = texture.height / tile_height
//   index   = row * columns + column
//
// Partial tiles on the right/bottom edge are ignored, as is any part of
// the texture beyond i32::MAX pixels.
//
//=========================================================================

use crate::core::render::{Rect, Texture};

/// Texture plus its source-rectangle lookup table.
#[derive(Debug, Clone, PartialEq)]
pub struct Tileset {
    texture: Texture,
    tiles: Vec<Rect>,
}

impl Tileset {
    /// Slices `texture` into `tile_width × tile_height` tiles.
    pub fn new(texture: Texture, tile_width: u32, tile_height: u32) -> Self {
        // Keeps every tile origin representable as an i32 coordinate
        let max_extent = i32::MAX as u32;
        let columns = texture.width.min(max_extent) / tile_width.max(1);
        let rows = texture.height.min(max_extent) / tile_height.max(1);

        let mut tiles = Vec::with_capacity((columns * rows) as usize);
        for row in 0..rows {
            for column in 0..columns {
                tiles.push(Rect::new(
                    (column * tile_width) as i32,
                    (row * tile_height) as i32,
                    tile_width,
                    tile_height,
                ));
            }
        }

        Self { texture, tiles }
    }

    pub fn texture(&self) -> Texture {
        self.texture
    }

    /// Number of whole tiles in the texture.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Source rectangle of the zero-based tile `index`.
    pub fn tile(&self, index: usize) -> Option<Rect> {
        self.tiles.get(index).copied()
    }
}
