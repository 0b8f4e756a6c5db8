/// Crossterm event polling translated into engine input snapshots
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use log::debug;
use std::io;
use std::time::Duration;
use wf3d_core::{InputSnapshot, InputSource, Key};

/// What a single key press means to the app.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyAction {
    Move(Key),
    Look { dx: f64, dy: f64 },
    Quit,
    Ignore,
}

/// Map a key press to an action. `look_step` is the mouse-equivalent delta
/// produced by one arrow key press.
pub fn map_key(key: &KeyEvent, look_step: f64) -> KeyAction {
    if key.kind == KeyEventKind::Release {
        return KeyAction::Ignore;
    }
    match key.code {
        KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => KeyAction::Move(Key::Forward),
            's' => KeyAction::Move(Key::Back),
            'a' => KeyAction::Move(Key::Left),
            'd' => KeyAction::Move(Key::Right),
            'q' => KeyAction::Move(Key::Up),
            'e' => KeyAction::Move(Key::Down),
            _ => KeyAction::Ignore,
        },
        KeyCode::Left => KeyAction::Look { dx: -look_step, dy: 0.0 },
        KeyCode::Right => KeyAction::Look { dx: look_step, dy: 0.0 },
        KeyCode::Up => KeyAction::Look { dx: 0.0, dy: -look_step },
        KeyCode::Down => KeyAction::Look { dx: 0.0, dy: look_step },
        _ => KeyAction::Ignore,
    }
}

/// Input source backed by the crossterm event queue.
///
/// Terminals report key presses but not releases, so a key counts as held
/// for the tick in which its press (or auto-repeat) arrived.
pub struct TerminalInput {
    mouse_scale: f64,
    look_step: f64,
    last_mouse: Option<(u16, u16)>,
    resized: Option<(u16, u16)>,
}

impl TerminalInput {
    pub fn new(mouse_scale: f64, look_step: f64) -> Self {
        Self {
            mouse_scale,
            look_step,
            last_mouse: None,
            resized: None,
        }
    }

    /// Most recent terminal size change since the last call, if any.
    pub fn take_resize(&mut self) -> Option<(u16, u16)> {
        self.resized.take()
    }

    /// Fold one event into the snapshot being built for this tick.
    pub fn apply_event(&mut self, event: &Event, snapshot: &mut InputSnapshot) {
        match event {
            Event::Key(key) => match map_key(key, self.look_step) {
                KeyAction::Move(key) => snapshot.press(key),
                KeyAction::Look { dx, dy } => {
                    snapshot.mouse_dx += dx;
                    snapshot.mouse_dy += dy;
                }
                KeyAction::Quit => snapshot.quit_requested = true,
                KeyAction::Ignore => {}
            },
            Event::Mouse(MouseEvent {
                kind, column, row, ..
            }) => match kind {
                MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                    if let Some((last_col, last_row)) = self.last_mouse {
                        snapshot.mouse_dx += (*column as f64 - last_col as f64) * self.mouse_scale;
                        snapshot.mouse_dy += (*row as f64 - last_row as f64) * self.mouse_scale;
                    }
                    self.last_mouse = Some((*column, *row));
                }
                _ => {}
            },
            Event::Resize(cols, rows) => {
                debug!("terminal resized to {}x{}", cols, rows);
                self.resized = Some((*cols, *rows));
            }
            Event::FocusLost => {
                // the pointer re-enters somewhere else
                self.last_mouse = None;
            }
            _ => {}
        }
    }
}

impl InputSource for TerminalInput {
    type Error = io::Error;

    /// Drain every pending event without blocking.
    fn poll(&mut self) -> io::Result<InputSnapshot> {
        let mut snapshot = InputSnapshot::new();
        while event::poll(Duration::ZERO)? {
            let event = event::read()?;
            self.apply_event(&event, &mut snapshot);
        }
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, MouseButton};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse_move(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Moved,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(map_key(&press(KeyCode::Char('w')), 10.0), KeyAction::Move(Key::Forward));
        assert_eq!(map_key(&press(KeyCode::Char('S')), 10.0), KeyAction::Move(Key::Back));
        assert_eq!(map_key(&press(KeyCode::Char('a')), 10.0), KeyAction::Move(Key::Left));
        assert_eq!(map_key(&press(KeyCode::Char('d')), 10.0), KeyAction::Move(Key::Right));
        assert_eq!(map_key(&press(KeyCode::Char('q')), 10.0), KeyAction::Move(Key::Up));
        assert_eq!(map_key(&press(KeyCode::Char('e')), 10.0), KeyAction::Move(Key::Down));
        assert_eq!(map_key(&press(KeyCode::Char('x')), 10.0), KeyAction::Ignore);
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(map_key(&press(KeyCode::Esc), 10.0), KeyAction::Quit);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(&ctrl_c, 10.0), KeyAction::Quit);
    }

    #[test]
    fn test_release_is_ignored() {
        let release = KeyEvent {
            code: KeyCode::Char('w'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(map_key(&release, 10.0), KeyAction::Ignore);
    }

    #[test]
    fn test_arrows_look() {
        assert_eq!(
            map_key(&press(KeyCode::Left), 7.5),
            KeyAction::Look { dx: -7.5, dy: 0.0 }
        );
        assert_eq!(
            map_key(&press(KeyCode::Down), 7.5),
            KeyAction::Look { dx: 0.0, dy: 7.5 }
        );
    }

    #[test]
    fn test_events_fold_into_snapshot() {
        let mut input = TerminalInput::new(4.0, 10.0);
        let mut snapshot = InputSnapshot::new();

        input.apply_event(&Event::Key(press(KeyCode::Char('w'))), &mut snapshot);
        input.apply_event(&Event::Key(press(KeyCode::Right)), &mut snapshot);
        input.apply_event(&Event::Key(press(KeyCode::Right)), &mut snapshot);

        assert!(snapshot.is_down(Key::Forward));
        assert_eq!(snapshot.mouse_dx, 20.0);
        assert!(!snapshot.quit_requested);

        input.apply_event(&Event::Key(press(KeyCode::Esc)), &mut snapshot);
        assert!(snapshot.quit_requested);
    }

    #[test]
    fn test_mouse_motion_is_relative() {
        let mut input = TerminalInput::new(4.0, 10.0);
        let mut snapshot = InputSnapshot::new();

        // first sample only establishes the reference point
        input.apply_event(&mouse_move(10, 10), &mut snapshot);
        assert_eq!((snapshot.mouse_dx, snapshot.mouse_dy), (0.0, 0.0));

        input.apply_event(&mouse_move(12, 9), &mut snapshot);
        let drag = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Drag(MouseButton::Left),
            column: 13,
            row: 9,
            modifiers: KeyModifiers::NONE,
        });
        input.apply_event(&drag, &mut snapshot);
        assert_eq!((snapshot.mouse_dx, snapshot.mouse_dy), (12.0, -4.0));

        input.apply_event(&Event::FocusLost, &mut snapshot);
        input.apply_event(&mouse_move(50, 50), &mut snapshot);
        assert_eq!((snapshot.mouse_dx, snapshot.mouse_dy), (12.0, -4.0));
    }

    #[test]
    fn test_resize_is_reported_once() {
        let mut input = TerminalInput::new(1.0, 1.0);
        let mut snapshot = InputSnapshot::new();
        input.apply_event(&Event::Resize(100, 30), &mut snapshot);
        assert_eq!(input.take_resize(), Some((100, 30)));
        assert_eq!(input.take_resize(), None);
    }
}
