// tests/editor_tests.rs

use std::path::PathBuf;

use tmap_editor::input::{Click, InputSnapshot, Key, MouseButton};
use tmap_editor::{Config, DrawSurface, Editor, Layer, MapStore, Point};

/// Records every draw call so tests can observe ordering and present counts.
#[derive(Default)]
struct RecordingSurface {
    copies: Vec<(Point, Point)>, // (sheet src, viewport dest)
    flips: usize,
    clears: usize,
    sheet_scroll: i32,
    sheet_width: i32,
    pane_width: i32,
}

impl DrawSurface for RecordingSurface {
    fn copy_tile(&mut self, src: Point, dest: Point) {
        self.copies.push((src, dest));
    }
    fn clear(&mut self) {
        self.clears += 1;
    }
    fn flip(&mut self) {
        self.flips += 1;
    }
    fn sheet_scroll(&self) -> i32 {
        self.sheet_scroll
    }
    fn scroll_sheet(&mut self, delta: i32) {
        let max = (self.sheet_width - self.pane_width).max(0);
        self.sheet_scroll = (self.sheet_scroll + delta).clamp(0, max);
        self.flip();
    }
}

fn test_config() -> Config {
    Config::new(
        32,
        30,
        Point::new(20, 20),
        Point::new(8, 20),
        Point::new(40, 40),
    )
    .unwrap()
}

fn fresh_editor() -> Editor<RecordingSurface> {
    let cfg = test_config();
    let mut path = PathBuf::from(std::env::temp_dir());
    path.push("tmap_editor_no_such_map.tmap");
    let _ = std::fs::remove_file(&path);
    let store = MapStore::open(&path, &cfg).unwrap();
    let surface = RecordingSurface {
        sheet_width: 16,
        pane_width: 8,
        ..Default::default()
    };
    Editor::new(store, surface, cfg, Point::new(16, 0)).unwrap()
}

fn key(k: Key) -> InputSnapshot {
    InputSnapshot {
        key: Some(k),
        ..Default::default()
    }
}

fn left_click(x: i32, y: i32) -> InputSnapshot {
    InputSnapshot {
        click: Some(Click {
            button: MouseButton::Left,
            pos: Point::new(x, y),
        }),
        ..Default::default()
    }
}

#[test]
fn confirm_paints_and_advances_row_major() {
    let mut ed = fresh_editor();
    ed.set_selection(Point::new(3, 4));
    ed.handle(&key(Key::Confirm)).unwrap();

    assert_eq!(
        ed.store().get(Point::new(0, 0), Layer::Background).unwrap(),
        Point::new(3, 4)
    );
    // Layer 1 of the same cell keeps its fresh-map default.
    assert_eq!(
        ed.store().get(Point::new(0, 0), Layer::Foreground).unwrap(),
        Point::new(0, 0)
    );
    assert_eq!(ed.cursor(), Point::new(1, 0));
}

#[test]
fn confirm_wraps_at_the_viewport_edge() {
    let mut ed = fresh_editor();
    ed.set_cursor(Point::new(19, 0)).unwrap();
    ed.handle(&key(Key::Confirm)).unwrap();
    assert_eq!(ed.cursor(), Point::new(0, 1));
}

#[test]
fn axis_toggle_advances_down_instead() {
    let mut ed = fresh_editor();
    ed.handle(&key(Key::ToggleAdvanceAxis)).unwrap();
    ed.handle(&key(Key::Confirm)).unwrap();
    assert_eq!(ed.cursor(), Point::new(0, 1));
}

#[test]
fn mouse_paint_does_not_walk() {
    let mut ed = fresh_editor();
    ed.set_selection(Point::new(5, 6));
    ed.handle(&left_click(7, 8)).unwrap();
    ed.handle(&left_click(7, 8)).unwrap();
    assert_eq!(ed.cursor(), Point::new(7, 8));
    assert_eq!(
        ed.store().get(Point::new(7, 8), Layer::Background).unwrap(),
        Point::new(5, 6)
    );
}

#[test]
fn right_click_only_moves_the_cursor() {
    let mut ed = fresh_editor();
    ed.set_selection(Point::new(5, 6));
    ed.handle(&InputSnapshot {
        click: Some(Click {
            button: MouseButton::Right,
            pos: Point::new(3, 3),
        }),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(ed.cursor(), Point::new(3, 3));
    assert_eq!(
        ed.store().get(Point::new(3, 3), Layer::Background).unwrap(),
        Point::new(0, 0)
    );
}

#[test]
fn cursor_pins_at_the_viewport_boundary() {
    let mut ed = fresh_editor();
    ed.handle(&key(Key::CursorUp)).unwrap();
    ed.handle(&key(Key::CursorLeft)).unwrap();
    assert_eq!(ed.cursor(), Point::new(0, 0));

    ed.set_cursor(Point::new(100, 100)).unwrap();
    assert_eq!(ed.cursor(), Point::new(19, 19));
    ed.handle(&key(Key::CursorRight)).unwrap();
    ed.handle(&key(Key::CursorDown)).unwrap();
    assert_eq!(ed.cursor(), Point::new(19, 19));
}

#[test]
fn layer_switch_routes_paints_independently() {
    let mut ed = fresh_editor();
    ed.set_selection(Point::new(1, 2));
    ed.handle(&left_click(0, 0)).unwrap();

    ed.handle(&key(Key::LayerForeground)).unwrap();
    assert_eq!(ed.layer(), Layer::Foreground);
    ed.set_selection(Point::new(9, 8));
    ed.handle(&left_click(0, 0)).unwrap();

    let store = ed.store();
    assert_eq!(store.get(Point::new(0, 0), Layer::Background).unwrap(), Point::new(1, 2));
    assert_eq!(store.get(Point::new(0, 0), Layer::Foreground).unwrap(), Point::new(9, 8));
}

#[test]
fn fill_floods_the_viewport_with_one_flip() {
    let mut ed = fresh_editor();
    ed.set_selection(Point::new(2, 2));

    let flips_before = ed.surface().flips;
    let copies_before = ed.surface().copies.len();
    ed.handle(&key(Key::Fill)).unwrap();

    assert_eq!(ed.surface().flips, flips_before + 1);

    // Row-major order, x fastest, one draw per viewport cell.
    let copies = &ed.surface().copies[copies_before..];
    assert_eq!(copies.len(), 400);
    let expected: Vec<Point> = (0..20)
        .flat_map(|y| (0..20).map(move |x| Point::new(x, y)))
        .collect();
    let drawn: Vec<Point> = copies.iter().map(|&(_, dest)| dest).collect();
    assert_eq!(drawn, expected);

    for y in 0..20 {
        for x in 0..20 {
            assert_eq!(
                ed.store().get(Point::new(x, y), Layer::Background).unwrap(),
                Point::new(2, 2)
            );
        }
    }
}

#[test]
fn sheet_click_picks_through_the_pane_scroll_and_paints() {
    let mut ed = fresh_editor();
    ed.handle(&key(Key::SheetNext)).unwrap(); // pane slides by 4
    assert_eq!(ed.surface().sheet_scroll, 4);

    // Click at window tile (22, 3): pane-local x = 2, sheet x = 2 + 4.
    ed.handle(&left_click(22, 3)).unwrap();
    assert_eq!(ed.selection(), Point::new(6, 3));
    assert_eq!(
        ed.store().get(Point::new(0, 0), Layer::Background).unwrap(),
        Point::new(6, 3)
    );
}

#[test]
fn sheet_scroll_clamps_to_the_sheet_width() {
    let mut ed = fresh_editor();
    for _ in 0..10 {
        ed.handle(&key(Key::SheetNext)).unwrap();
    }
    assert_eq!(ed.surface().sheet_scroll, 8); // sheet 16 wide, pane 8
    for _ in 0..10 {
        ed.handle(&key(Key::SheetPrev)).unwrap();
    }
    assert_eq!(ed.surface().sheet_scroll, 0);
}

#[test]
fn map_scroll_steps_half_a_viewport_and_clamps() {
    let mut ed = fresh_editor();
    ed.handle(&key(Key::ScrollRight)).unwrap();
    assert_eq!(ed.store().origin(), Point::new(10, 0));
    ed.handle(&key(Key::ScrollRight)).unwrap();
    assert_eq!(ed.store().origin(), Point::new(20, 0));
    ed.handle(&key(Key::ScrollRight)).unwrap();
    assert_eq!(ed.store().origin(), Point::new(20, 0));

    ed.handle(&key(Key::ScrollDown)).unwrap();
    assert_eq!(ed.store().origin(), Point::new(20, 10));
    ed.handle(&key(Key::ScrollUp)).unwrap();
    ed.handle(&key(Key::ScrollUp)).unwrap();
    assert_eq!(ed.store().origin(), Point::new(20, 0));
}

#[test]
fn scrolling_repaints_the_visible_grid() {
    let mut ed = fresh_editor();
    let copies_before = ed.surface().copies.len();
    ed.handle(&key(Key::ScrollRight)).unwrap();
    // Full restore draws both layers for all 400 cells, plus the cursor.
    assert_eq!(ed.surface().copies.len() - copies_before, 801);
}

#[test]
fn paints_land_relative_to_the_scrolled_origin() {
    let mut ed = fresh_editor();
    ed.set_selection(Point::new(7, 7));
    ed.handle(&key(Key::ScrollRight)).unwrap();
    ed.handle(&left_click(0, 0)).unwrap();

    // Scroll back: the painted cell is now at local (10, 0).
    ed.handle(&key(Key::ScrollLeft)).unwrap();
    assert_eq!(
        ed.store().get(Point::new(10, 0), Layer::Background).unwrap(),
        Point::new(7, 7)
    );
}

#[test]
fn quit_ends_the_session() {
    let mut ed = fresh_editor();
    assert!(ed.running());
    ed.handle(&InputSnapshot {
        quit: true,
        ..Default::default()
    })
    .unwrap();
    assert!(!ed.running());

    let store = ed.into_store();
    assert_eq!(store.width(), 40);
}

#[test]
fn quit_key_outranks_painting() {
    let mut ed = fresh_editor();
    ed.handle(&key(Key::Quit)).unwrap();
    assert!(!ed.running());
}
