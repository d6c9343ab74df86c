// demos/editor.rs
//
// Interactive editing session:
//   cargo run --example editor [map.tmap] [sheet.png] [config.json]
//
// wasd moves the cursor, space/return paints, click-left paints, the right
// pane picks tiles, f fills, 1/2 switch layers, h/j/k/l scroll the map,
// PageUp/PageDown scroll the sheet pane, q or Escape saves and quits.

use macroquad::prelude::*;
use tmap_editor::{poll_snapshot, window_size, Config, Editor, MapStore, Point, SheetSurface};

fn session_config() -> Config {
    match std::env::args().nth(3) {
        Some(path) => Config::from_file(&path).expect("config file should load"),
        None => Config::new(
            32,
            30,
            Point::new(20, 20),
            Point::new(8, 20),
            Point::new(40, 40),
        )
        .expect("built-in defaults are valid"),
    }
}

fn window_conf() -> Conf {
    let (w, h) = window_size(&session_config());
    Conf {
        window_title: "tmap editor".into(),
        window_width: w,
        window_height: h,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();

    let cfg = session_config();
    let map_path = std::env::args().nth(1).unwrap_or_else(|| "savefile.tmap".into());
    let sheet_path = std::env::args().nth(2).unwrap_or_else(|| "sprite32.png".into());

    // Route window-close through the snapshot so the session still saves.
    prevent_quit();

    let store = MapStore::open(&map_path, &cfg).expect("map file should open");
    let surface = SheetSurface::load(&sheet_path, cfg)
        .await
        .expect("sprite sheet should load");
    let mut editor =
        Editor::new(store, surface, cfg, Point::new(16, 0)).expect("editor should start");

    while editor.running() {
        let snapshot = poll_snapshot(&cfg);
        editor.handle(&snapshot).expect("editor action should apply");
        editor.present();
        next_frame().await;
    }

    editor
        .into_store()
        .write(&map_path)
        .expect("map should save on exit");
}
