//=========================================================================
// Map Description
//=========================================================================
//
// Text form of a tile map, four logical lines:
//
// ```text
// <tileset-image-id>
// <tileWidth>,<tileHeight>
// <mapWidth>,<mapHeight>
// <v0>,<v1>,...,<v(mapWidth*mapHeight-1)>
// ```
//
// Cell values are 1-based tileset indices; 0 marks an empty cell.
// `Display` writes the same format back, so parse → print → parse is
// lossless.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

//=== Internal Dependencies ===============================================

use super::TilemapError;

//=== MapDescription ======================================================

/// Parsed, format-level content of a map resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapDescription {
    pub tileset: String,
    pub tile_width: u32,
    pub tile_height: u32,
    pub map_width: u32,
    pub map_height: u32,
    /// Row-major, `map_width * map_height` entries.
    pub cells: Vec<u32>,
}

impl MapDescription {
    /// Parses the four-line map format.
    ///
    /// CRLF line endings and blank trailing lines are accepted; anything
    /// else that deviates from the format is an error naming the line.
    pub fn parse(text: &str) -> Result<Self, TilemapError> {
        let mut lines = text.lines().map(str::trim).enumerate();

        // Each header field occupies exactly one line, in order
        let mut next_line = |line: usize, name: &'static str| {
            match lines.next() {
                Some((_, text)) if !text.is_empty() => Ok(text),
                _ => Err(TilemapError::MissingLine { line, name }),
            }
        };

        let tileset = next_line(1, "tileset")?;
        let size = next_line(2, "tile size")?;
        let dims = next_line(3, "map size")?;
        let cells = next_line(4, "cells")?;

        let (tile_width, tile_height) = parse_pair(size, 2)?;
        let (map_width, map_height) = parse_pair(dims, 3)?;

        // Sprite positions are i32, so the whole map must fit on both axes
        if !fits_pixel_axis(tile_width, map_width) || !fits_pixel_axis(tile_height, map_height) {
            return Err(TilemapError::PixelSizeOverflow { line: 3 });
        }

        let cells = cells
            .split(',')
            .map(|token| parse_number(token, 4))
            .collect::<Result<Vec<_>, _>>()?;

        let expected = map_width as usize * map_height as usize;
        if cells.len() != expected {
            return Err(TilemapError::CellCount {
                expected,
                found: cells.len(),
            });
        }

        if let Some((index, _)) = lines.find(|(_, line)| !line.is_empty()) {
            return Err(TilemapError::TrailingContent { line: index + 1 });
        }

        Ok(Self {
            tileset: tileset.to_string(),
            tile_width,
            tile_height,
            map_width,
            map_height,
            cells,
        })
    }

    /// Cell value at `(column, row)`, `None` outside the map.
    pub fn cell(&self, column: u32, row: u32) -> Option<u32> {
        if column >= self.map_width || row >= self.map_height {
            return None;
        }
        self.cells
            .get(row as usize * self.map_width as usize + column as usize)
            .copied()
    }
}

//--- Trait Implementations -----------------------------------------------

impl fmt::Display for MapDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.tileset)?;
        writeln!(f, "{},{}", self.tile_width, self.tile_height)?;
        writeln!(f, "{},{}", self.map_width, self.map_height)?;

        for (index, value) in self.cells.iter().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", value)?;
        }
        writeln!(f)
    }
}

//=== Parsing Helpers =====================================================

fn parse_pair(text: &str, line: usize) -> Result<(u32, u32), TilemapError> {
    let fields: Vec<&str> = text.split(',').collect();
    if fields.len() != 2 {
        return Err(TilemapError::FieldCount {
            line,
            expected: 2,
            found: fields.len(),
        });
    }

    let first = parse_number(fields[0], line)?;
    let second = parse_number(fields[1], line)?;

    if first == 0 || second == 0 {
        return Err(TilemapError::ZeroDimension { line });
    }

    Ok((first, second))
}

fn fits_pixel_axis(tile: u32, count: u32) -> bool {
    tile.checked_mul(count).is_some_and(|pixels| i32::try_from(pixels).is_ok())
}

fn parse_number(token: &str, line: usize) -> Result<u32, TilemapError> {
    let token = token.trim();
    token.parse::<u32>().map_err(|source| TilemapError::InvalidNumber {
        line,
        token: token.to_string(),
        source,
    })
}

//=========================================================================
// Unit Tests
//=========================================================================
