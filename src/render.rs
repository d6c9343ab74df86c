//! Macroquad-backed [`DrawSurface`]: the editor grid on the left, the
//! scrollable sprite-sheet pane on the right.
//!
//! The editor paints incrementally, so everything is drawn into a persistent
//! render target; `flip` blits that target to the screen. The host loop
//! still has to present each frame through [`crate::Editor::present`].

use anyhow::Context;
use macroquad::prelude::*;

use crate::config::Config;
use crate::editor::DrawSurface;
use crate::geom::Point;

/// Window extent in pixels for a given config: editor viewport plus sheet
/// pane side by side.
pub fn window_size(cfg: &Config) -> (i32, i32) {
    (
        cfg.to_pixel(cfg.editor_size.x + cfg.sheet_viewport.x),
        cfg.to_pixel(cfg.editor_size.y.max(cfg.sheet_viewport.y)),
    )
}

/// Drawing surface over one sprite-sheet texture.
pub struct SheetSurface {
    cfg: Config,
    sheet: Texture2D,
    target: RenderTarget,
    /// Sheet extent in tiles, derived from the texture.
    sheet_size: Point,
    /// Horizontal scroll of the sheet pane, in sheet tiles.
    tile_position: i32,
}

impl SheetSurface {
    /// Loads the sprite sheet and presents an initial frame with the pane
    /// visible.
    pub async fn load(sheet_path: &str, cfg: Config) -> anyhow::Result<SheetSurface> {
        let sheet = load_texture(sheet_path)
            .await
            .with_context(|| format!("Loading sprite sheet {}", sheet_path))?;
        sheet.set_filter(FilterMode::Nearest);

        let sheet_size = Point::new(
            cfg.to_tile(sheet.width() as i32),
            cfg.to_tile(sheet.height() as i32),
        );

        let (w, h) = window_size(&cfg);
        let target = render_target(w as u32, h as u32);
        target.texture.set_filter(FilterMode::Nearest);

        let mut surface = SheetSurface {
            cfg,
            sheet,
            target,
            sheet_size,
            tile_position: 0,
        };
        surface.clear();
        surface.scroll_sheet(0);
        Ok(surface)
    }

    fn begin_target(&self) {
        let (w, h) = window_size(&self.cfg);
        set_camera(&Camera2D {
            zoom: vec2(2.0 / w as f32, 2.0 / h as f32),
            target: vec2(w as f32 / 2.0, h as f32 / 2.0),
            render_target: Some(self.target.clone()),
            ..Default::default()
        });
    }

    fn repaint_pane(&mut self) {
        let pane_w = self.cfg.to_pixel(self.cfg.sheet_viewport.x) as f32;
        let pane_h = self
            .cfg
            .to_pixel(self.cfg.sheet_viewport.y.min(self.sheet_size.y)) as f32;
        let dest_x = self.cfg.to_pixel(self.cfg.editor_size.x) as f32;

        self.begin_target();
        draw_rectangle(dest_x, 0.0, pane_w, pane_h, BLACK);
        draw_texture_ex(
            &self.sheet,
            dest_x,
            0.0,
            WHITE,
            DrawTextureParams {
                source: Some(Rect::new(
                    self.cfg.to_pixel(self.tile_position) as f32,
                    0.0,
                    pane_w,
                    pane_h,
                )),
                ..Default::default()
            },
        );
        set_default_camera();
    }
}

impl DrawSurface for SheetSurface {
    fn copy_tile(&mut self, src: Point, dest: Point) {
        let px = self.cfg.tile_size as f32;
        self.begin_target();
        draw_texture_ex(
            &self.sheet,
            self.cfg.to_pixel(dest.x) as f32,
            self.cfg.to_pixel(dest.y) as f32,
            WHITE,
            DrawTextureParams {
                source: Some(Rect::new(
                    self.cfg.to_pixel(src.x) as f32,
                    self.cfg.to_pixel(src.y) as f32,
                    px,
                    px,
                )),
                ..Default::default()
            },
        );
        set_default_camera();
    }

    fn clear(&mut self) {
        self.begin_target();
        clear_background(BLACK);
        set_default_camera();
    }

    fn flip(&mut self) {
        let (w, h) = window_size(&self.cfg);
        set_default_camera();
        draw_texture_ex(
            &self.target.texture,
            0.0,
            0.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(w as f32, h as f32)),
                // Render-target textures come out y-flipped.
                flip_y: true,
                ..Default::default()
            },
        );
    }

    fn sheet_scroll(&self) -> i32 {
        self.tile_position
    }

    fn scroll_sheet(&mut self, delta: i32) {
        let max = (self.sheet_size.x - self.cfg.sheet_viewport.x).max(0);
        self.tile_position = (self.tile_position + delta).clamp(0, max);
        self.repaint_pane();
        self.flip();
    }
}
