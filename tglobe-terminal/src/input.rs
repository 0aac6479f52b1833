/// Translation of crossterm events into viewer input
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use tglobe_core::{InputEvent, Key, WheelDirection};

/// Approximate pixel size of a terminal cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSize {
    pub width_px: f64,
    pub height_px: f64,
}

impl CellSize {
    /// Pixel position of the centre of a cell
    pub fn to_pixels(self, column: u16, row: u16) -> (f64, f64) {
        (
            (column as f64 + 0.5) * self.width_px,
            (row as f64 + 0.5) * self.height_px,
        )
    }
}

/// Map a terminal event to viewer input, if it means anything to the viewer
pub fn translate(event: &Event, cell: CellSize) -> Option<InputEvent> {
    match event {
        Event::Key(key) => translate_key(key),
        Event::Mouse(mouse) => translate_mouse(mouse, cell),
        _ => None,
    }
}

fn translate_key(event: &KeyEvent) -> Option<InputEvent> {
    if event.kind == KeyEventKind::Release {
        return None;
    }

    match event.code {
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputEvent::Quit)
        }
        KeyCode::Char('q') | KeyCode::Esc => Some(InputEvent::Quit),
        KeyCode::Char('p') => Some(InputEvent::TogglePopups),
        KeyCode::Left => Some(InputEvent::Key(Key::Left)),
        KeyCode::Right => Some(InputEvent::Key(Key::Right)),
        KeyCode::Up => Some(InputEvent::Key(Key::Up)),
        KeyCode::Down => Some(InputEvent::Key(Key::Down)),
        _ => None,
    }
}

fn translate_mouse(event: &MouseEvent, cell: CellSize) -> Option<InputEvent> {
    let (x, y) = cell.to_pixels(event.column, event.row);
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(InputEvent::ButtonDown { x, y }),
        MouseEventKind::Up(MouseButton::Left) => Some(InputEvent::ButtonUp),
        MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
            Some(InputEvent::Motion { x, y })
        }
        MouseEventKind::ScrollUp => Some(InputEvent::Wheel(WheelDirection::Up)),
        MouseEventKind::ScrollDown => Some(InputEvent::Wheel(WheelDirection::Down)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CELL: CellSize = CellSize {
        width_px: 8.0,
        height_px: 16.0,
    };

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_quit_keys() {
        for event in [
            KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE),
            KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE),
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            assert_eq!(translate(&Event::Key(event), CELL), Some(InputEvent::Quit));
        }
        let plain_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE);
        assert_eq!(translate(&Event::Key(plain_c), CELL), None);
    }

    #[test]
    fn test_arrow_keys() {
        let left = KeyEvent::new(KeyCode::Left, KeyModifiers::NONE);
        assert_eq!(
            translate(&Event::Key(left), CELL),
            Some(InputEvent::Key(Key::Left))
        );
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut up = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);
        up.kind = KeyEventKind::Release;
        assert_eq!(translate(&Event::Key(up), CELL), None);
    }

    #[test]
    fn test_mouse_positions_become_pixels() {
        assert_eq!(
            translate(&mouse(MouseEventKind::Down(MouseButton::Left), 2, 1), CELL),
            Some(InputEvent::ButtonDown { x: 20.0, y: 24.0 })
        );
        assert_eq!(
            translate(&mouse(MouseEventKind::Drag(MouseButton::Left), 3, 1), CELL),
            Some(InputEvent::Motion { x: 28.0, y: 24.0 })
        );
        assert_eq!(
            translate(&mouse(MouseEventKind::Down(MouseButton::Right), 3, 1), CELL),
            None
        );
    }

    #[test]
    fn test_scroll_zooms() {
        assert_eq!(
            translate(&mouse(MouseEventKind::ScrollUp, 0, 0), CELL),
            Some(InputEvent::Wheel(WheelDirection::Up))
        );
        assert_eq!(
            translate(&mouse(MouseEventKind::ScrollDown, 0, 0), CELL),
            Some(InputEvent::Wheel(WheelDirection::Down))
        );
    }
}
