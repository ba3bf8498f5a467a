//! The board session: owns all mutable state and re-renders after every change.

use egui::{Color32, Vec2};

use crate::background::BackgroundImage;
use crate::compositor;
use crate::config::CanvasConfig;
use crate::error::{BoardError, BoardResult};
use crate::export::{self, ExportSink, ExportedImage};
use crate::file_handler::{self, Upload};
use crate::history::StrokeHistory;
use crate::input::BoardAction;
use crate::renderer::{Raster, RenderTarget};
use crate::state::{BoardState, CaptureState};
use crate::stroke::Point;
use crate::tool::{ToolMode, ToolSettings};

/// Single-owner controller for one drawing board.
///
/// Every call runs to completion, including a full compositor pass into
/// [`Board::frame`] whenever the visible result may have changed.
#[derive(Debug, Default)]
pub struct Board {
    state: BoardState,
    viewport: Option<RenderTarget>,
    frame: Option<Raster>,
    frame_version: u64,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: BoardState) -> Self {
        Self {
            state,
            ..Self::default()
        }
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn history(&self) -> &StrokeHistory {
        &self.state.history
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.state.config
    }

    pub fn tool(&self) -> &ToolSettings {
        &self.state.tool
    }

    /// Tool changes only affect future strokes, so no redraw is needed
    pub fn tool_mut(&mut self) -> &mut ToolSettings {
        &mut self.state.tool
    }

    pub fn is_drawing(&self) -> bool {
        self.state.capture.is_drawing()
    }

    pub fn viewport(&self) -> Option<RenderTarget> {
        self.viewport
    }

    /// Latest live render, if the board has a usable size
    pub fn frame(&self) -> Option<&Raster> {
        self.frame.as_ref()
    }

    /// Bumped on every completed render
    pub fn frame_version(&self) -> u64 {
        self.frame_version
    }

    /// Sets the live surface size. Strokes are logical, so nothing but the frame changes.
    pub fn resize(&mut self, logical_size: Vec2, density: f32) {
        let target = RenderTarget::new(logical_size, density);
        if self.viewport == Some(target) {
            return;
        }
        log::debug!("Board resized to {:?} at density {}", target.logical_size, target.density);
        self.viewport = Some(target);
        self.redraw();
    }

    // ---- stroke capture ----

    pub fn pointer_down(&mut self, point: Point) {
        if self.state.capture.is_drawing() {
            self.end_gesture();
        }
        let stroke = self.state.tool.begin_stroke(point, self.state.config.background_color);
        log::debug!("Stroke started: {:?} at {:?}", stroke.op(), point.pos);
        self.state.history.record(stroke);
        self.state.capture = CaptureState::Drawing;
        self.redraw();
    }

    pub fn pointer_move(&mut self, point: Point) {
        if !self.state.capture.is_drawing() {
            return;
        }
        if let Some(stroke) = self.state.history.last_mut() {
            stroke.push_point(point);
            self.redraw();
        }
    }

    pub fn pointer_up(&mut self) {
        self.end_gesture();
    }

    pub fn pointer_cancel(&mut self) {
        self.end_gesture();
    }

    /// Leaving the surface ends a running gesture
    pub fn pointer_leave(&mut self) {
        self.end_gesture();
    }

    fn end_gesture(&mut self) {
        if !self.state.capture.is_drawing() {
            return;
        }
        self.state.capture = CaptureState::Idle;
        if let Some(stroke) = self.state.history.committed().last() {
            log::debug!("Stroke finished with {} points", stroke.points().len());
        }
        self.redraw();
    }

    // ---- history ----

    pub fn undo(&mut self) -> bool {
        self.end_gesture();
        let changed = self.state.history.undo();
        if changed {
            self.redraw();
        }
        changed
    }

    pub fn redo(&mut self) -> bool {
        self.end_gesture();
        let changed = self.state.history.redo();
        if changed {
            self.redraw();
        }
        changed
    }

    pub fn clear_all(&mut self) -> bool {
        self.end_gesture();
        let count = self.state.history.committed().len();
        let changed = self.state.history.clear_all();
        if changed {
            log::debug!("Cleared {} strokes", count);
            self.redraw();
        }
        changed
    }

    // ---- tool and canvas settings ----

    pub fn set_mode(&mut self, mode: ToolMode) {
        self.state.tool.mode = mode;
    }

    pub fn toggle_mode(&mut self) {
        self.state.tool.mode = self.state.tool.mode.toggled();
    }

    pub fn toggle_grid(&mut self) {
        let enabled = !self.state.config.grid_enabled;
        self.set_grid_enabled(enabled);
    }

    pub fn set_grid_enabled(&mut self, enabled: bool) {
        if self.state.config.grid_enabled != enabled {
            self.state.config.grid_enabled = enabled;
            self.redraw();
        }
    }

    pub fn set_grid_spacing(&mut self, spacing: f32) {
        let before = self.state.config.grid_spacing();
        self.state.config.set_grid_spacing(spacing);
        if self.state.config.grid_enabled && self.state.config.grid_spacing() != before {
            self.redraw();
        }
    }

    pub fn set_background_color(&mut self, color: Color32) {
        if self.state.config.background_color != color {
            self.state.config.background_color = color;
            self.redraw();
        }
    }

    pub fn set_background_image(&mut self, image: BackgroundImage) {
        log::info!("Background image set: {}", image.name());
        self.state.config.background_image = Some(image);
        self.redraw();
    }

    pub fn remove_background(&mut self) -> bool {
        if self.state.config.background_image.take().is_none() {
            return false;
        }
        log::info!("Background image removed");
        self.redraw();
        true
    }

    /// Applies an uploaded file and returns the notice to show the user.
    ///
    /// Rejected or undecodable files leave the board untouched.
    pub fn upload(&mut self, name: &str, mime: &str, bytes: &[u8]) -> BoardResult<String> {
        match file_handler::load_asset(name, mime, bytes)? {
            Upload::Background(image) => {
                let notice = format!("Background image: {}", image.name());
                self.set_background_image(image);
                Ok(notice)
            }
            Upload::Placeholder { notice, .. } => Ok(notice),
        }
    }

    /// Runs a board action. Returns whether the board changed.
    ///
    /// Export and upload need a sink or a file source and are left to the host.
    pub fn apply(&mut self, action: BoardAction) -> bool {
        match action {
            BoardAction::Undo => self.undo(),
            BoardAction::Redo => self.redo(),
            BoardAction::ClearAll => self.clear_all(),
            BoardAction::SetMode(mode) => {
                self.set_mode(mode);
                false
            }
            BoardAction::ToggleMode => {
                self.toggle_mode();
                false
            }
            BoardAction::ToggleGrid => {
                self.toggle_grid();
                true
            }
            BoardAction::RemoveBackground => self.remove_background(),
            BoardAction::Export | BoardAction::Upload => false,
        }
    }

    // ---- rendering ----

    /// Renders the current board at an arbitrary target
    pub fn render_at(&self, target: RenderTarget) -> BoardResult<Raster> {
        compositor::compose(&self.state.config, self.state.history.committed(), target)
    }

    /// Encodes the board at its logical size, whatever the live density
    pub fn export(&self) -> BoardResult<ExportedImage> {
        let viewport = self.viewport.ok_or(BoardError::NoViewport)?;
        export::export_png(&self.state.config, self.state.history.committed(), viewport.logical_size)
    }

    pub fn export_to(&self, sink: &mut dyn ExportSink) -> BoardResult<()> {
        let export = self.export()?;
        sink.deliver(export)
    }

    fn redraw(&mut self) {
        let Some(target) = self.viewport else { return };
        match self.render_at(target) {
            Ok(raster) => {
                self.frame = Some(raster);
                self.frame_version += 1;
            }
            // The previous frame stays on screen
            Err(err) => log::warn!("Skipping board render: {}", err),
        }
    }
}
