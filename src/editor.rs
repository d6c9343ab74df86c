//! Editor state machine: turns input actions into map-store reads/writes
//! and redraw requests.
//!
//! The editor is mode-less; cursor movement, painting, and scrolling are all
//! legal at any time. State is session-local and never persisted, only the
//! map store survives a session.

use log::info;

use crate::cell::Layer;
use crate::config::Config;
use crate::error::MapError;
use crate::geom::Point;
use crate::input::{Action, Click, InputSnapshot, MouseButton};
use crate::store::MapStore;

/// Drawing collaborator the editor renders through.
///
/// `dest` positions are viewport-local tile coordinates; `src` positions are
/// tile-sheet coordinates. The surface owns the sheet pane's horizontal
/// scroll window.
pub trait DrawSurface {
    /// Draws one sheet tile into a viewport cell.
    fn copy_tile(&mut self, src: Point, dest: Point);
    /// Clears the whole window.
    fn clear(&mut self);
    /// Presents the back buffer.
    fn flip(&mut self);
    /// Current sheet-pane scroll offset in sheet tiles.
    fn sheet_scroll(&self) -> i32;
    /// Slides the sheet pane by `delta` tiles (clamped to the sheet) and
    /// repaints it; a zero delta is a plain repaint.
    fn scroll_sheet(&mut self, delta: i32);
}

/// The interactive editing session over one [`MapStore`].
pub struct Editor<D: DrawSurface> {
    store: MapStore,
    surface: D,
    cfg: Config,
    cursor: Point,
    cursor_tile: Point,
    selection: Point,
    layer: Layer,
    advance_down: bool,
    running: bool,
}

impl<D: DrawSurface> Editor<D> {
    /// Starts a session: paints the visible grid from the store, places the
    /// cursor highlight at the top-left, and presents the first frame.
    ///
    /// `cursor_tile` is the sheet coordinate of the glyph drawn as the
    /// cursor highlight.
    pub fn new(
        store: MapStore,
        surface: D,
        cfg: Config,
        cursor_tile: Point,
    ) -> Result<Self, MapError> {
        let mut ed = Editor {
            store,
            surface,
            cfg,
            cursor: Point::new(0, 0),
            cursor_tile,
            selection: Point::new(0, 0),
            layer: Layer::Background,
            advance_down: false,
            running: true,
        };
        ed.restore_view()?;
        ed.draw_cursor();
        ed.surface.flip();
        Ok(ed)
    }

    /// False once a quit action has been consumed.
    pub fn running(&self) -> bool {
        self.running
    }

    /// Cursor position, viewport-local.
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    /// Sheet coordinate currently loaded for painting.
    pub fn selection(&self) -> Point {
        self.selection
    }

    /// Loads a sheet coordinate for painting without a pane click.
    pub fn set_selection(&mut self, tile: Point) {
        self.selection = tile;
    }

    /// Active paint layer.
    pub fn layer(&self) -> Layer {
        self.layer
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &MapStore {
        &self.store
    }

    /// Read access to the drawing collaborator.
    pub fn surface(&self) -> &D {
        &self.surface
    }

    /// Ends the session, handing the store back for persistence.
    pub fn into_store(self) -> MapStore {
        self.store
    }

    /// Presents the current frame; hosts that swap buffers every frame call
    /// this once per tick.
    pub fn present(&mut self) {
        self.surface.flip();
    }

    /// Applies the one action this tick's snapshot maps to.
    pub fn handle(&mut self, snap: &InputSnapshot) -> Result<(), MapError> {
        let Some(action) = Action::derive(snap) else {
            return Ok(());
        };
        match action {
            Action::Quit => {
                info!("quit requested, ending session");
                self.running = false;
                Ok(())
            }
            Action::Click(click) => self.click(click),
            Action::Confirm => self.paint(true),
            Action::Refresh => self.refresh(),
            Action::ToggleAdvanceAxis => {
                self.advance_down = !self.advance_down;
                Ok(())
            }
            Action::Fill => self.fill(),
            Action::SelectLayer(layer) => {
                self.layer = layer;
                Ok(())
            }
            Action::MoveCursor(delta) => self.move_cursor(delta),
            Action::ScrollMap(dir) => self.scroll_map(dir),
            Action::ScrollSheet(dir) => {
                self.surface.scroll_sheet(dir * (self.cfg.sheet_viewport.x / 2));
                Ok(())
            }
        }
    }

    /// Moves the cursor by a delta, pinned inside the viewport.
    pub fn move_cursor(&mut self, delta: Point) -> Result<(), MapError> {
        self.set_cursor(self.cursor + delta)
    }

    /// Places the cursor. The cell under the old position is repainted from
    /// the store first, so the highlight never leaves a stale overlay.
    pub fn set_cursor(&mut self, dest: Point) -> Result<(), MapError> {
        self.redraw_cell(self.cursor)?;
        self.cursor = dest.clamped(
            Point::new(0, 0),
            self.cfg.editor_size - Point::new(1, 1),
        );
        self.draw_cursor();
        self.surface.flip();
        Ok(())
    }

    fn click(&mut self, click: Click) -> Result<(), MapError> {
        if click.pos.x < self.cfg.editor_size.x {
            self.set_cursor(click.pos)?;
            if click.button == MouseButton::Left {
                self.paint(false)?;
            }
            Ok(())
        } else {
            // Sheet pane: translate into sheet space through the pane's
            // scroll window, then pick-and-paint as one gesture.
            self.selection = Point::new(
                click.pos.x - self.cfg.editor_size.x + self.surface.sheet_scroll(),
                click.pos.y,
            );
            self.paint(false)
        }
    }

    /// Paints the selection at the cursor on the active layer.
    ///
    /// `advance` steps the cursor one cell afterward (row-major, or
    /// column-major after the axis toggle); keyboard confirms advance,
    /// mouse placement does not, so repeated clicks stay put.
    pub fn paint(&mut self, advance: bool) -> Result<(), MapError> {
        self.store.put(self.cursor, self.selection, self.layer)?;
        self.redraw_cell(self.cursor)?;
        if advance {
            let step = if self.advance_down {
                Point::new(0, 1)
            } else {
                Point::new(1, 0)
            };
            self.cursor = self.cursor.advanced(step, self.cfg.editor_size);
        }
        self.draw_cursor();
        self.surface.flip();
        Ok(())
    }

    /// Floods every viewport cell with the selection on the active layer,
    /// row-major, presenting once at the end.
    pub fn fill(&mut self) -> Result<(), MapError> {
        let mut loc = Point::new(0, 0);
        loop {
            self.store.put(loc, self.selection, self.layer)?;
            self.surface.copy_tile(self.selection, loc);
            loc = loc.advanced(Point::new(1, 0), self.cfg.editor_size);
            if loc == Point::new(0, 0) {
                break;
            }
        }
        self.surface.flip();
        Ok(())
    }

    /// Repaints every viewport cell from the store, both layers, row-major.
    pub fn restore_view(&mut self) -> Result<(), MapError> {
        let mut loc = Point::new(0, 0);
        loop {
            self.redraw_cell(loc)?;
            loc = loc.advanced(Point::new(1, 0), self.cfg.editor_size);
            if loc == Point::new(0, 0) {
                break;
            }
        }
        Ok(())
    }

    fn refresh(&mut self) -> Result<(), MapError> {
        self.surface.clear();
        self.surface.scroll_sheet(0);
        self.restore_view()?;
        self.draw_cursor();
        self.surface.flip();
        Ok(())
    }

    /// Scrolls the map origin half a viewport along `dir`, then repaints the
    /// now-invalid visible grid.
    pub fn scroll_map(&mut self, dir: Point) -> Result<(), MapError> {
        let delta = Point::new(
            dir.x * (self.cfg.editor_size.x / 2),
            dir.y * (self.cfg.editor_size.y / 2),
        );
        self.store.move_origin(delta);
        self.restore_view()?;
        self.draw_cursor();
        self.surface.flip();
        Ok(())
    }

    fn redraw_cell(&mut self, local: Point) -> Result<(), MapError> {
        self.surface
            .copy_tile(self.store.get(local, Layer::Background)?, local);
        self.surface
            .copy_tile(self.store.get(local, Layer::Foreground)?, local);
        Ok(())
    }

    fn draw_cursor(&mut self) {
        self.surface.copy_tile(self.cursor_tile, self.cursor);
    }
}
