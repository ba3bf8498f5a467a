use egui::{Color32, Pos2};
use sketch_board::{Board, Point, Stroke, StrokeHistory, StrokeOp, ToolMode};

fn stroke(id: f32) -> Stroke {
    Stroke::new(Color32::RED, 1.0 + id, StrokeOp::Pen, Point::at(id, id))
}

#[test]
fn test_undo_all_then_redo_all_restores_list() {
    for n in 0..6 {
        let mut history = StrokeHistory::new();
        for i in 0..n {
            history.record(stroke(i as f32));
        }
        let original = history.committed().to_vec();

        for _ in 0..n {
            assert!(history.undo());
        }
        assert!(history.committed().is_empty());
        assert!(!history.undo());

        for _ in 0..n {
            assert!(history.redo());
        }
        assert!(!history.redo());
        assert_eq!(history.committed(), original.as_slice());
        assert!(history.redo_buffer().is_empty());
    }
}

#[test]
fn test_new_stroke_discards_redo_branch() {
    let mut history = StrokeHistory::new();
    history.record(stroke(1.0));
    assert!(history.undo());
    history.record(stroke(2.0));

    assert!(!history.redo());
    assert!(history.redo_buffer().is_empty());
    assert_eq!(history.committed(), &[stroke(2.0)]);
}

#[test]
fn test_clear_then_step_back_one_stroke_at_a_time() {
    let (a, b, c) = (stroke(1.0), stroke(2.0), stroke(3.0));
    let mut history = StrokeHistory::new();
    history.record(a.clone());
    history.record(b.clone());
    history.record(c.clone());

    assert!(history.clear_all());
    assert!(history.committed().is_empty());
    assert!(!history.clear_all());

    // Nothing is committed, so undo has nothing to take back
    assert!(!history.undo());
    assert!(history.committed().is_empty());

    // Each redo restores exactly one stroke, first-drawn first
    assert!(history.redo());
    assert_eq!(history.committed(), &[a.clone()]);
    assert!(history.redo());
    assert!(history.redo());
    assert_eq!(history.committed(), &[a, b, c]);
}

#[test]
fn test_board_history_operations() {
    let mut board = Board::new();
    assert!(!board.undo());
    assert!(!board.redo());
    assert!(!board.clear_all());

    board.pointer_down(Point::at(1.0, 1.0));
    board.pointer_move(Point::at(5.0, 5.0));
    board.pointer_up();

    board.set_mode(ToolMode::Eraser);
    board.pointer_down(Point::at(2.0, 2.0));
    board.pointer_up();

    assert_eq!(board.history().committed().len(), 2);
    assert!(board.undo());
    assert_eq!(board.history().committed().len(), 1);
    assert_eq!(board.history().redo_buffer()[0].op(), StrokeOp::Erase);

    // record; undo; record; redo leaves nothing to redo
    board.set_mode(ToolMode::Pen);
    board.pointer_down(Point::new(Pos2::new(8.0, 8.0), Some(0.5)));
    board.pointer_up();
    assert!(!board.redo());
    assert!(board.history().redo_buffer().is_empty());
    assert_eq!(board.history().committed().len(), 2);
}
