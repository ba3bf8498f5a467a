use egui::{Key, Modifiers, Pos2, Rect};

use crate::stroke::Point;
use crate::tool::ToolMode;

/// Operations the user can trigger from buttons or shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardAction {
    Undo,
    Redo,
    SetMode(ToolMode),
    ToggleMode,
    ClearAll,
    Export,
    Upload,
    RemoveBackground,
    ToggleGrid,
}

/// Keyboard bindings for board actions
pub fn action_for_key(key: Key, modifiers: Modifiers) -> Option<BoardAction> {
    let command = modifiers.command || modifiers.ctrl || modifiers.mac_cmd;
    match key {
        Key::Z if command && modifiers.shift => Some(BoardAction::Redo),
        Key::Z if command => Some(BoardAction::Undo),
        _ if command || modifiers.alt => None,
        Key::E => Some(BoardAction::SetMode(ToolMode::Eraser)),
        Key::P => Some(BoardAction::SetMode(ToolMode::Pen)),
        Key::C => Some(BoardAction::ClearAll),
        Key::S => Some(BoardAction::Export),
        Key::U => Some(BoardAction::Upload),
        Key::R => Some(BoardAction::RemoveBackground),
        Key::G => Some(BoardAction::ToggleGrid),
        _ => None,
    }
}

/// Converts a screen position into board coordinates relative to the canvas
pub fn board_point(screen_pos: Pos2, canvas_rect: Rect, pressure: Option<f32>) -> Point {
    Point::new((screen_pos - canvas_rect.min).to_pos2(), pressure)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undo_redo_bindings() {
        assert_eq!(action_for_key(Key::Z, Modifiers::COMMAND), Some(BoardAction::Undo));
        assert_eq!(
            action_for_key(Key::Z, Modifiers::COMMAND | Modifiers::SHIFT),
            Some(BoardAction::Redo)
        );
        assert_eq!(action_for_key(Key::Z, Modifiers::NONE), None);
    }

    #[test]
    fn test_plain_letter_bindings() {
        assert_eq!(
            action_for_key(Key::E, Modifiers::NONE),
            Some(BoardAction::SetMode(ToolMode::Eraser))
        );
        assert_eq!(action_for_key(Key::G, Modifiers::NONE), Some(BoardAction::ToggleGrid));
        assert_eq!(action_for_key(Key::C, Modifiers::COMMAND), None);
        assert_eq!(action_for_key(Key::Q, Modifiers::NONE), None);
    }

    #[test]
    fn test_board_point_is_canvas_relative() {
        let canvas = Rect::from_min_size(Pos2::new(200.0, 50.0), egui::vec2(400.0, 300.0));
        let point = board_point(Pos2::new(210.0, 70.0), canvas, Some(0.5));
        assert_eq!(point.pos, Pos2::new(10.0, 20.0));
        assert_eq!(point.pressure, 0.5);
    }
}
