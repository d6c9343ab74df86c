//! Map store: ownership of the tile grid, scroll origin, and the binary
//! `.tmap` record format.
//!
//! On-disk layout, little-endian:
//!
//! ```text
//! offset 0:  magic[4]      = 'T','m','a','p'
//! offset 4:  size: u32     = total record length in bytes
//! offset 8:  width: u16
//! offset 10: height: u16
//! offset 12: origin_x: u16
//! offset 14: origin_y: u16
//! offset 16: data[width*height] of u32 cells
//! ```

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use log::{debug, info};

use crate::cell::{self, Layer};
use crate::config::Config;
use crate::error::MapError;
use crate::geom::Point;

/// File magic identifying the map format.
pub const MAGIC: [u8; 4] = *b"Tmap";

/// Fixed header length in bytes.
pub const HEADER_SIZE: u32 = 16;

const CELL_BYTES: u32 = 4;

/// Owns the tile grid and translates viewport-local coordinates into
/// absolute backing-store offsets.
///
/// The origin is the map-space tile under the viewport's top-left corner;
/// it only ever moves through [`MapStore::move_origin`], which keeps it
/// inside `[0, map - viewport]` on both axes.
#[derive(Debug)]
pub struct MapStore {
    width: u16,
    height: u16,
    origin: Point,
    cells: Vec<u32>,
    viewport: Point,
}

impl MapStore {
    /// Opens the map at `path`, or allocates a fresh zeroed grid of the
    /// configured map size when no such file exists.
    ///
    /// Only a missing file falls back to a new map; a permissions or other
    /// I/O failure propagates as [`MapError::Io`], and a readable file that
    /// does not satisfy the format contract as [`MapError::CorruptFormat`].
    pub fn open<P: AsRef<Path>>(path: P, cfg: &Config) -> Result<Self, MapError> {
        let path = path.as_ref();
        match File::open(path) {
            Ok(file) => {
                debug!("reading map record from {}", path.display());
                Self::read_record(BufReader::new(file), cfg)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(
                    "{} not found, starting a fresh {}x{} map",
                    path.display(),
                    cfg.map_size.x,
                    cfg.map_size.y
                );
                Ok(Self::fresh(cfg))
            }
            Err(e) => Err(MapError::Io(e)),
        }
    }

    fn fresh(cfg: &Config) -> Self {
        let (w, h) = (cfg.map_size.x as u16, cfg.map_size.y as u16);
        MapStore {
            width: w,
            height: h,
            origin: Point::new(0, 0),
            cells: vec![0; w as usize * h as usize],
            viewport: cfg.editor_size,
        }
    }

    fn read_record<R: Read>(mut r: R, cfg: &Config) -> Result<Self, MapError> {
        let mut magic = [0u8; 4];
        r.read_exact(&mut magic)?;
        if magic != MAGIC {
            return Err(MapError::CorruptFormat(format!(
                "bad magic {:02x?}, expected {:02x?}",
                magic, MAGIC
            )));
        }

        let size = r.read_u32::<LittleEndian>()?;
        let width = r.read_u16::<LittleEndian>()?;
        let height = r.read_u16::<LittleEndian>()?;
        let origin_x = r.read_u16::<LittleEndian>()?;
        let origin_y = r.read_u16::<LittleEndian>()?;

        if width == 0 || height == 0 {
            return Err(MapError::CorruptFormat(format!(
                "degenerate grid {}x{}",
                width, height
            )));
        }
        // Widened so a hostile 65535x65535 header cannot overflow the
        // expected-size arithmetic; nothing is allocated until the declared
        // size matches it.
        let expected = u64::from(HEADER_SIZE)
            + u64::from(width) * u64::from(height) * u64::from(CELL_BYTES);
        if u64::from(size) != expected {
            return Err(MapError::CorruptFormat(format!(
                "declared size {} does not match {} for a {}x{} grid",
                size, expected, width, height
            )));
        }
        if i32::from(width) < cfg.editor_size.x || i32::from(height) < cfg.editor_size.y {
            return Err(MapError::InvalidDimensions(format!(
                "stored map {}x{} smaller than the {}x{} editor viewport",
                width, height, cfg.editor_size.x, cfg.editor_size.y
            )));
        }

        let count = width as usize * height as usize;
        let mut cells = vec![0u32; count];
        r.read_u32_into::<LittleEndian>(&mut cells).map_err(|e| {
            if e.kind() == io::ErrorKind::UnexpectedEof {
                MapError::CorruptFormat(format!(
                    "body truncated before {} declared cells",
                    count
                ))
            } else {
                MapError::Io(e)
            }
        })?;
        if r.read(&mut [0u8; 1])? != 0 {
            return Err(MapError::CorruptFormat(format!(
                "trailing bytes past the declared size {}",
                size
            )));
        }

        let mut store = MapStore {
            width,
            height,
            origin: Point::new(i32::from(origin_x), i32::from(origin_y)),
            cells,
            viewport: cfg.editor_size,
        };
        // A stored origin outside the scrollable range is pulled back in
        // rather than rejected.
        store.move_origin(Point::new(0, 0));
        debug!(
            "loaded {}x{} map, origin ({}, {})",
            store.width, store.height, store.origin.x, store.origin.y
        );
        Ok(store)
    }

    /// Serializes the full record to `path` in one pass.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<(), MapError> {
        let path = path.as_ref();
        let mut w = BufWriter::new(File::create(path)?);
        w.write_all(&MAGIC)?;
        w.write_u32::<LittleEndian>(self.size_bytes())?;
        w.write_u16::<LittleEndian>(self.width)?;
        w.write_u16::<LittleEndian>(self.height)?;
        w.write_u16::<LittleEndian>(self.origin.x as u16)?;
        w.write_u16::<LittleEndian>(self.origin.y as u16)?;
        for &c in &self.cells {
            w.write_u32::<LittleEndian>(c)?;
        }
        w.flush()?;
        info!(
            "wrote {} bytes ({}x{} map) to {}",
            self.size_bytes(),
            self.width,
            self.height,
            path.display()
        );
        Ok(())
    }

    /// Total serialized record length.
    pub fn size_bytes(&self) -> u32 {
        HEADER_SIZE + self.cells.len() as u32 * CELL_BYTES
    }

    /// Grid width in tiles.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Grid height in tiles.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Current scroll origin.
    pub fn origin(&self) -> Point {
        self.origin
    }

    fn offset(&self, local: Point) -> Result<usize, MapError> {
        if !local.in_bounds(self.viewport) {
            return Err(MapError::OutOfRange(local));
        }
        let abs = self.origin + local;
        Ok(self.width as usize * abs.y as usize + abs.x as usize)
    }

    /// Reads the sheet coordinate stored on `layer` at a viewport-local
    /// position.
    pub fn get(&self, local: Point, layer: Layer) -> Result<Point, MapError> {
        let idx = self.offset(local)?;
        Ok(cell::layer_tile(self.cells[idx], layer))
    }

    /// Writes a sheet coordinate on `layer` at a viewport-local position.
    /// The other layer's bits in the cell are preserved.
    pub fn put(&mut self, local: Point, tile: Point, layer: Layer) -> Result<(), MapError> {
        let idx = self.offset(local)?;
        self.cells[idx] = cell::with_layer(self.cells[idx], layer, tile);
        Ok(())
    }

    /// Shifts the scroll origin by `delta`, clamped so the viewport never
    /// leaves the map on either edge. This is the only origin mutator.
    pub fn move_origin(&mut self, delta: Point) {
        let max = Point::new(
            i32::from(self.width) - self.viewport.x,
            i32::from(self.height) - self.viewport.y,
        );
        self.origin = (self.origin + delta).clamped(Point::new(0, 0), max);
    }
}
