use egui::{Color32, Event, Pos2, Rect, TouchPhase};

use crate::app::SketchBoardApp;
use crate::board::Board;
use crate::input::board_point;

pub fn central_panel(app: &mut SketchBoardApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::drag());
            let rect = response.rect;

            app.board_mut().resize(rect.size(), ctx.pixels_per_point());
            handle_pointer(app, ctx, &response, rect);

            if let Some(texture) = app.frame_texture(ctx) {
                let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
                painter.image(texture.id(), rect, uv, Color32::WHITE);
            }
        });
}

/// Pointer positions of this frame, each with the touch force last reported before it
fn pointer_samples(events: &[Event]) -> (Vec<(Pos2, Option<f32>)>, bool) {
    let mut samples = Vec::new();
    let mut force = None;
    let mut cancelled = false;
    for event in events {
        match event {
            Event::PointerMoved(pos) => samples.push((*pos, force)),
            Event::Touch { phase, force: f, .. } => {
                force = *f;
                cancelled |= *phase == TouchPhase::Cancel;
            }
            _ => {}
        }
    }
    (samples, cancelled)
}

/// Starts a gesture at `start` (if any) and appends the samples that follow it
fn feed_samples(board: &mut Board, rect: Rect, start: Option<(Pos2, Option<f32>)>, samples: &[(Pos2, Option<f32>)]) {
    if let Some((pos, force)) = start {
        board.pointer_down(board_point(pos, rect, force));
    }
    if !board.is_drawing() {
        return;
    }
    for &(pos, force) in samples {
        if start.is_some_and(|(origin, _)| origin == pos) {
            continue;
        }
        if !rect.contains(pos) {
            board.pointer_leave();
            break;
        }
        board.pointer_move(board_point(pos, rect, force));
    }
}

/// Feeds pointer samples from this frame into the board's capture state machine
fn handle_pointer(app: &mut SketchBoardApp, ctx: &egui::Context, response: &egui::Response, rect: Rect) {
    let (samples, cancelled) = ctx.input(|i| pointer_samples(&i.events));

    let start = if response.drag_started() {
        response.interact_pointer_pos().map(|pos| {
            // Moves already seen this frame happened after the press
            let force = samples.first().and_then(|&(_, force)| force);
            (pos, force)
        })
    } else {
        None
    };

    let board = app.board_mut();
    feed_samples(board, rect, start, &samples);

    if cancelled {
        board.pointer_cancel();
    } else if response.drag_stopped() {
        board.pointer_up();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{TouchDeviceId, TouchId};

    fn touch(force: f32, phase: TouchPhase) -> Event {
        Event::Touch {
            device_id: TouchDeviceId(0),
            id: TouchId(0),
            phase,
            pos: Pos2::ZERO,
            force: Some(force),
        }
    }

    #[test]
    fn test_each_sample_keeps_its_own_force() {
        let events = [
            touch(0.3, TouchPhase::Move),
            Event::PointerMoved(Pos2::new(1.0, 1.0)),
            touch(0.8, TouchPhase::Move),
            Event::PointerMoved(Pos2::new(2.0, 2.0)),
        ];
        let (samples, cancelled) = pointer_samples(&events);
        assert!(!cancelled);
        assert_eq!(samples, vec![(Pos2::new(1.0, 1.0), Some(0.3)), (Pos2::new(2.0, 2.0), Some(0.8))]);

        let (_, cancelled) = pointer_samples(&[touch(0.5, TouchPhase::Cancel)]);
        assert!(cancelled);
    }

    #[test]
    fn test_moves_in_the_starting_frame_are_kept() {
        let rect = Rect::from_min_size(Pos2::new(10.0, 10.0), egui::vec2(40.0, 30.0));
        let mut board = Board::new();
        let samples = [(Pos2::new(12.0, 12.0), None), (Pos2::new(15.0, 14.0), None), (Pos2::new(20.0, 18.0), None)];

        feed_samples(&mut board, rect, Some((Pos2::new(12.0, 12.0), None)), &samples);

        assert!(board.is_drawing());
        let points = board.history().committed()[0].points();
        assert_eq!(points.len(), 3);
        assert_eq!(points[1].pos, Pos2::new(5.0, 4.0));
        assert_eq!(points[2].pos, Pos2::new(10.0, 8.0));
    }

    #[test]
    fn test_leaving_the_canvas_ends_the_gesture() {
        let rect = Rect::from_min_size(Pos2::ZERO, egui::vec2(40.0, 30.0));
        let mut board = Board::new();
        let samples = [(Pos2::new(5.0, 5.0), None), (Pos2::new(60.0, 5.0), None), (Pos2::new(6.0, 6.0), None)];

        feed_samples(&mut board, rect, Some((Pos2::new(1.0, 1.0), None)), &samples);

        assert!(!board.is_drawing());
        assert_eq!(board.history().committed()[0].points().len(), 2);
    }
}
