use std::fmt;
use std::io;

use crate::geom::Point;

/// Error type for the map store and editor core.
#[derive(Debug)]
pub enum MapError {
    /// File I/O error
    Io(io::Error),
    /// Header magic mismatch, or declared size inconsistent with the file body
    CorruptFormat(String),
    /// A viewport-local coordinate outside [0, editor viewport)
    OutOfRange(Point),
    /// Tile pixel size is not a power of two
    InvalidTileSize(u32),
    /// Map/viewport dimensions that cannot form a valid session
    InvalidDimensions(String),
}

impl From<io::Error> for MapError {
    fn from(err: io::Error) -> Self {
        MapError::Io(err)
    }
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::Io(e) => write!(f, "I/O error: {}", e),
            MapError::CorruptFormat(why) => write!(f, "Corrupt map file: {}", why),
            MapError::OutOfRange(p) => {
                write!(f, "Coordinate ({}, {}) outside the editor viewport", p.x, p.y)
            }
            MapError::InvalidTileSize(px) => {
                write!(f, "Tile size {} is not a power of two", px)
            }
            MapError::InvalidDimensions(why) => write!(f, "Invalid dimensions: {}", why),
        }
    }
}

impl std::error::Error for MapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MapError::Io(e) => Some(e),
            _ => None,
        }
    }
}
