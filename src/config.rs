//! Session configuration, computed once at startup and read-only after.
//!
//! Parameters come either from explicit arguments or a small JSON file;
//! every pixel/tile conversion goes through the power-of-two shift resolved
//! at construction.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::error::MapError;
use crate::geom::Point;

/// Immutable session parameters.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Tile edge length in pixels. Always a power of two.
    pub tile_size: u32,
    /// log2 of `tile_size`; all pixel<->tile conversion shifts by this.
    pub tile_shift: u32,
    /// Target frame rate of the session loop.
    pub fps: u32,
    /// Per-tick delay derived from `fps`, in milliseconds.
    pub frame_delay_ms: u32,
    /// Editable viewport extent in tiles.
    pub editor_size: Point,
    /// Sheet-pane preview window extent in tiles.
    pub sheet_viewport: Point,
    /// Full backing-store map extent in tiles.
    pub map_size: Point,
}

/// Raw on-disk shape of a config file; converted into [`Config`] after
/// validation.
#[derive(Deserialize)]
struct JsonConfig {
    tile_size: u32,
    fps: u32,
    editor_size: Point,
    sheet_viewport: Point,
    map_size: Point,
}

impl Config {
    /// Builds a validated config.
    ///
    /// `tile_size` must be a power of two (the shift would otherwise be
    /// degenerate), `fps` nonzero, and `map_size` must both contain the
    /// editor viewport and fit the 16-bit dimensions of the map format.
    pub fn new(
        tile_size: u32,
        fps: u32,
        editor_size: Point,
        sheet_viewport: Point,
        map_size: Point,
    ) -> Result<Self, MapError> {
        if tile_size == 0 || !tile_size.is_power_of_two() {
            return Err(MapError::InvalidTileSize(tile_size));
        }
        if fps == 0 {
            return Err(MapError::InvalidDimensions("fps must be nonzero".into()));
        }
        if editor_size.x <= 0
            || editor_size.y <= 0
            || sheet_viewport.x <= 0
            || sheet_viewport.y <= 0
        {
            return Err(MapError::InvalidDimensions(
                "viewport extents must be positive".into(),
            ));
        }
        if map_size.x < editor_size.x || map_size.y < editor_size.y {
            return Err(MapError::InvalidDimensions(format!(
                "map {}x{} smaller than the {}x{} editor viewport",
                map_size.x, map_size.y, editor_size.x, editor_size.y
            )));
        }
        if map_size.x > u16::MAX as i32 || map_size.y > u16::MAX as i32 {
            return Err(MapError::InvalidDimensions(format!(
                "map {}x{} exceeds the format's 16-bit dimensions",
                map_size.x, map_size.y
            )));
        }

        Ok(Config {
            tile_size,
            tile_shift: tile_size.trailing_zeros(),
            fps,
            frame_delay_ms: 1000 / fps,
            editor_size,
            sheet_viewport,
            map_size,
        })
    }

    /// Loads a config from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Config> {
        let path = path.as_ref();
        let txt = std::fs::read_to_string(path)
            .with_context(|| format!("Reading config file {}", path.display()))?;

        let j: JsonConfig = serde_json::from_str(&txt)
            .with_context(|| format!("Parsing config file {}", path.display()))?;

        let cfg = Config::new(j.tile_size, j.fps, j.editor_size, j.sheet_viewport, j.map_size)
            .with_context(|| format!("Validating config file {}", path.display()))?;
        Ok(cfg)
    }

    /// Pixel coordinate to tile coordinate.
    #[inline]
    pub fn to_tile(&self, pixels: i32) -> i32 {
        pixels >> self.tile_shift
    }

    /// Tile coordinate to pixel coordinate.
    #[inline]
    pub fn to_pixel(&self, tiles: i32) -> i32 {
        tiles << self.tile_shift
    }
}
