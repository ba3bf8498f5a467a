use egui::Slider;

use crate::app::SketchBoardApp;
use crate::input::BoardAction;
use crate::tool::ToolMode;

pub fn tools_panel(app: &mut SketchBoardApp, ctx: &egui::Context) {
    let mut actions = Vec::new();

    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(200.0)
        .show(ctx, |ui| {
            let board = app.board_mut();

            ui.heading("Tools");
            ui.horizontal(|ui| {
                for mode in [ToolMode::Pen, ToolMode::Eraser] {
                    if ui.selectable_label(board.tool().mode == mode, mode.label()).clicked() {
                        log::info!("Tool selected from UI: {:?}", mode);
                        board.set_mode(mode);
                    }
                }
            });

            ui.horizontal(|ui| {
                ui.label("Color:");
                let mut color = board.tool().color();
                if egui::color_picker::color_edit_button_srgba(
                    ui,
                    &mut color,
                    egui::color_picker::Alpha::Opaque,
                )
                .changed()
                {
                    board.tool_mut().set_color(color);
                }
            });

            ui.horizontal(|ui| {
                ui.label("Size:");
                let mut width = board.tool().width();
                if ui.add(Slider::new(&mut width, 1.0..=50.0).suffix(" px")).changed() {
                    board.tool_mut().set_width(width);
                }
            });

            ui.separator();
            ui.heading("Board");

            ui.horizontal(|ui| {
                ui.label("Background:");
                let mut background = board.config().background_color;
                if egui::color_picker::color_edit_button_srgba(
                    ui,
                    &mut background,
                    egui::color_picker::Alpha::Opaque,
                )
                .changed()
                {
                    board.set_background_color(background);
                }
            });

            let mut grid_enabled = board.config().grid_enabled;
            if ui.checkbox(&mut grid_enabled, "Grid").changed() {
                board.set_grid_enabled(grid_enabled);
            }
            ui.horizontal(|ui| {
                ui.label("Grid size:");
                let mut spacing = board.config().grid_spacing();
                if ui.add(Slider::new(&mut spacing, 5.0..=100.0).suffix(" px")).changed() {
                    board.set_grid_spacing(spacing);
                }
            });

            ui.separator();

            ui.horizontal(|ui| {
                let history = board.history();
                if ui.add_enabled(history.can_undo(), egui::Button::new("Undo")).clicked() {
                    actions.push(BoardAction::Undo);
                }
                if ui.add_enabled(history.can_redo(), egui::Button::new("Redo")).clicked() {
                    actions.push(BoardAction::Redo);
                }
                if ui.button("Clear").clicked() {
                    actions.push(BoardAction::ClearAll);
                }
            });

            ui.horizontal(|ui| {
                if ui.button("Upload").clicked() {
                    actions.push(BoardAction::Upload);
                }
                let has_background = board.config().background_image.is_some();
                if ui
                    .add_enabled(has_background, egui::Button::new("Remove background"))
                    .clicked()
                {
                    actions.push(BoardAction::RemoveBackground);
                }
            });

            if ui.button("💾 Save PNG").clicked() {
                actions.push(BoardAction::Export);
            }

            ui.separator();

            let history = board.history();
            ui.label(format!("Strokes: {}", history.committed().len()));
            ui.label(format!("Redo stack size: {}", history.redo_buffer().len()));
            if let Some(image) = &board.config().background_image {
                ui.label(format!("Background image: {}", image.name()));
            }
        });

    for action in actions {
        app.dispatch(action);
    }
}
