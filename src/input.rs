//! Per-tick input snapshot and its translation into editor actions.
//!
//! The host toolkit is polled once per tick into an [`InputSnapshot`]; the
//! editor then consumes at most one [`Action`] derived from it, in a fixed
//! priority order: quit, then mouse, then primary keys, then scroll keys.

use macroquad::input as mq;
use macroquad::input::KeyCode;

use crate::cell::Layer;
use crate::config::Config;
use crate::geom::Point;

/// Mouse button kinds the editor distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    /// Primary button; paints as well as placing the cursor.
    Left,
    /// Secondary button; places the cursor only.
    Right,
    /// Middle button; places the cursor only.
    Middle,
}

/// A mouse click in tile-space window coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Click {
    /// Which button went down.
    pub button: MouseButton,
    /// Click position in tiles, relative to the window's top-left.
    pub pos: Point,
}

/// Editor key bindings, already mapped from host key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// w/a/s/d cursor movement.
    CursorUp,
    /// See [`Key::CursorUp`].
    CursorLeft,
    /// See [`Key::CursorUp`].
    CursorDown,
    /// See [`Key::CursorUp`].
    CursorRight,
    /// Space or Return: paint the selection at the cursor.
    Confirm,
    /// r: repaint everything from the store.
    Refresh,
    /// x: toggle the paint auto-advance axis.
    ToggleAdvanceAxis,
    /// f: flood the viewport with the selection.
    Fill,
    /// 1: paint on the background layer.
    LayerBackground,
    /// 2: paint on the foreground layer.
    LayerForeground,
    /// h: scroll the map origin toward lower x.
    ScrollLeft,
    /// j: scroll the map origin toward lower y.
    ScrollUp,
    /// k: scroll the map origin toward higher y.
    ScrollDown,
    /// l: scroll the map origin toward higher x.
    ScrollRight,
    /// PageDown: slide the sheet pane toward lower sheet columns.
    SheetPrev,
    /// PageUp: slide the sheet pane toward higher sheet columns.
    SheetNext,
    /// q or Escape: end the session.
    Quit,
}

/// Everything the host delivered during one tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    /// Host requested shutdown (window close).
    pub quit: bool,
    /// At most one click per tick.
    pub click: Option<Click>,
    /// At most one bound key per tick.
    pub key: Option<Key>,
    /// Raw text character, if any. Unused by the editor today.
    pub ch: Option<char>,
}

/// One semantic editor action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// End the session loop.
    Quit,
    /// A click somewhere in the window; the editor splits editor pane from
    /// sheet pane by position.
    Click(Click),
    /// Paint the selection at the cursor (keyboard confirm).
    Confirm,
    /// Repaint the whole window from the store.
    Refresh,
    /// Toggle the paint auto-advance axis between row and column.
    ToggleAdvanceAxis,
    /// Flood the viewport with the selection on the active layer.
    Fill,
    /// Switch the active paint layer.
    SelectLayer(Layer),
    /// Move the cursor one tile in a direction.
    MoveCursor(Point),
    /// Scroll the map origin; unit direction, scaled to half a viewport by
    /// the editor.
    ScrollMap(Point),
    /// Slide the sheet pane window; -1 or +1 page.
    ScrollSheet(i32),
}

impl Action {
    /// Picks the one action a snapshot maps to, if any.
    pub fn derive(snap: &InputSnapshot) -> Option<Action> {
        if snap.quit {
            return Some(Action::Quit);
        }
        if let Some(click) = snap.click {
            return Some(Action::Click(click));
        }
        let action = match snap.key? {
            Key::Quit => Action::Quit,
            Key::Confirm => Action::Confirm,
            Key::Refresh => Action::Refresh,
            Key::ToggleAdvanceAxis => Action::ToggleAdvanceAxis,
            Key::Fill => Action::Fill,
            Key::LayerBackground => Action::SelectLayer(Layer::Background),
            Key::LayerForeground => Action::SelectLayer(Layer::Foreground),
            Key::CursorUp => Action::MoveCursor(Point::new(0, -1)),
            Key::CursorLeft => Action::MoveCursor(Point::new(-1, 0)),
            Key::CursorDown => Action::MoveCursor(Point::new(0, 1)),
            Key::CursorRight => Action::MoveCursor(Point::new(1, 0)),
            Key::ScrollLeft => Action::ScrollMap(Point::new(-1, 0)),
            Key::ScrollUp => Action::ScrollMap(Point::new(0, -1)),
            Key::ScrollDown => Action::ScrollMap(Point::new(0, 1)),
            Key::ScrollRight => Action::ScrollMap(Point::new(1, 0)),
            Key::SheetPrev => Action::ScrollSheet(-1),
            Key::SheetNext => Action::ScrollSheet(1),
        };
        Some(action)
    }
}

const KEY_BINDINGS: &[(KeyCode, Key)] = &[
    (KeyCode::Q, Key::Quit),
    (KeyCode::Escape, Key::Quit),
    (KeyCode::Space, Key::Confirm),
    (KeyCode::Enter, Key::Confirm),
    (KeyCode::R, Key::Refresh),
    (KeyCode::X, Key::ToggleAdvanceAxis),
    (KeyCode::F, Key::Fill),
    (KeyCode::Key1, Key::LayerBackground),
    (KeyCode::Key2, Key::LayerForeground),
    (KeyCode::W, Key::CursorUp),
    (KeyCode::A, Key::CursorLeft),
    (KeyCode::S, Key::CursorDown),
    (KeyCode::D, Key::CursorRight),
    (KeyCode::H, Key::ScrollLeft),
    (KeyCode::J, Key::ScrollUp),
    (KeyCode::K, Key::ScrollDown),
    (KeyCode::L, Key::ScrollRight),
    (KeyCode::PageUp, Key::SheetNext),
    (KeyCode::PageDown, Key::SheetPrev),
];

/// Polls Macroquad once and packs the result into a snapshot. Click
/// positions come back in tile units via the config's shift.
pub fn poll_snapshot(cfg: &Config) -> InputSnapshot {
    let quit = mq::is_quit_requested();

    let buttons = [
        (mq::MouseButton::Left, MouseButton::Left),
        (mq::MouseButton::Right, MouseButton::Right),
        (mq::MouseButton::Middle, MouseButton::Middle),
    ];
    let click = buttons
        .iter()
        .find(|(host, _)| mq::is_mouse_button_pressed(*host))
        .map(|(_, button)| {
            let (px, py) = mq::mouse_position();
            Click {
                button: *button,
                pos: Point::new(cfg.to_tile(px as i32), cfg.to_tile(py as i32)),
            }
        });

    let key = KEY_BINDINGS
        .iter()
        .find(|(code, _)| mq::is_key_pressed(*code))
        .map(|(_, key)| *key);

    InputSnapshot {
        quit,
        click,
        key,
        ch: mq::get_char_pressed(),
    }
}
