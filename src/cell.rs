//! Cell codec: packing tile-sheet references into map cells.
//!
//! A cell is one `u32` holding two independent 16-bit layer values. Each
//! layer value carries a sheet coordinate as `(x & 0xff) << 8 | (y & 0xff)`,
//! so the addressable sheet space is 256x256 tiles per layer. Components
//! above 255 are masked off, not rejected; that truncation is part of the
//! format contract and callers must not rely on larger values surviving a
//! round trip.

use crate::geom::Point;

/// Which of the two packed tile values a cell operation addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Layer 0, the low 16 bits of a cell.
    Background,
    /// Layer 1, the high 16 bits of a cell.
    Foreground,
}

impl Layer {
    #[inline]
    fn shift(self) -> u32 {
        match self {
            Layer::Background => 0,
            Layer::Foreground => 16,
        }
    }
}

/// Packs a sheet coordinate into one 16-bit layer value. Masks each
/// component to 8 bits.
#[inline]
pub fn encode(tile: Point) -> u16 {
    (((tile.x & 0xff) << 8) | (tile.y & 0xff)) as u16
}

/// Unpacks a 16-bit layer value back into a sheet coordinate.
#[inline]
pub fn decode(half: u16) -> Point {
    Point::new((half >> 8) as i32, (half & 0xff) as i32)
}

/// Returns `cell` with one layer replaced; the other layer's bits are
/// untouched.
#[inline]
pub fn with_layer(cell: u32, layer: Layer, tile: Point) -> u32 {
    let shift = layer.shift();
    (cell & !(0xffff << shift)) | ((encode(tile) as u32) << shift)
}

/// Extracts one layer's sheet coordinate from `cell`.
#[inline]
pub fn layer_tile(cell: u32, layer: Layer) -> Point {
    decode((cell >> layer.shift()) as u16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_all_one_byte_components() {
        for x in [0, 1, 17, 128, 254, 255] {
            for y in [0, 3, 99, 255] {
                let t = Point::new(x, y);
                assert_eq!(decode(encode(t)), t);
            }
        }
    }

    #[test]
    fn encode_masks_out_of_range_components() {
        // 256 wraps to 0, 257 to 1: masking, not saturation.
        assert_eq!(decode(encode(Point::new(256, 257))), Point::new(0, 1));
    }

    #[test]
    fn layers_are_independent() {
        let a = Point::new(3, 4);
        let b = Point::new(200, 100);
        let mut cell = 0u32;
        cell = with_layer(cell, Layer::Background, a);
        cell = with_layer(cell, Layer::Foreground, b);
        assert_eq!(layer_tile(cell, Layer::Background), a);
        assert_eq!(layer_tile(cell, Layer::Foreground), b);

        // Rewriting one layer leaves the other alone.
        cell = with_layer(cell, Layer::Background, Point::new(9, 9));
        assert_eq!(layer_tile(cell, Layer::Foreground), b);
    }

    #[test]
    fn background_occupies_the_low_half() {
        let cell = with_layer(0, Layer::Background, Point::new(1, 2));
        assert_eq!(cell & 0xffff, cell);
    }
}
