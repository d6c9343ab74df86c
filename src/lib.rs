#![warn(missing_docs)]

//! Grid tile-map authoring core for Macroquad.
//!
//! Paint tile indices from a sprite sheet onto a rectangular map persisted
//! as a compact binary `.tmap` record; maps larger than the visible window
//! scroll through an origin offset. The [`MapStore`] owns the grid and the
//! format, the [`Editor`] maps input actions onto it, and the host toolkit
//! stays behind the [`DrawSurface`] trait and the [`InputSnapshot`] value.

pub mod cell;
mod config;
mod editor;
mod error;
mod geom;
pub mod input;
mod render;
mod store;

pub use cell::Layer;
pub use config::Config;
pub use editor::{DrawSurface, Editor};
pub use error::MapError;
pub use geom::Point;
pub use input::{poll_snapshot, Action, InputSnapshot};
pub use render::{window_size, SheetSurface};
pub use store::{MapStore, HEADER_SIZE, MAGIC};
