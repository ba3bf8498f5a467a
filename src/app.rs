use egui::{Color32, TextureHandle, TextureOptions};

use crate::board::Board;
use crate::config::{CanvasConfig, DEFAULT_GRID_SPACING};
use crate::input::{self, BoardAction};
use crate::panels::{central_panel, tools_panel};
use crate::state::BoardState;
use crate::tool::ToolSettings;

/// User preferences restored between runs. The drawing itself is never persisted.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct Preferences {
    pub tool: ToolSettings,
    pub background_color: Color32,
    pub grid_enabled: bool,
    pub grid_spacing: f32,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            tool: ToolSettings::default(),
            background_color: Color32::WHITE,
            grid_enabled: false,
            grid_spacing: DEFAULT_GRID_SPACING,
        }
    }
}

impl Preferences {
    fn from_board(board: &Board) -> Self {
        let config = board.config();
        Self {
            tool: board.tool().clone(),
            background_color: config.background_color,
            grid_enabled: config.grid_enabled,
            grid_spacing: config.grid_spacing(),
        }
    }

    fn into_state(self) -> BoardState {
        let mut config = CanvasConfig::default();
        config.background_color = self.background_color;
        config.grid_enabled = self.grid_enabled;
        config.set_grid_spacing(self.grid_spacing);
        BoardState {
            tool: self.tool,
            config,
            ..BoardState::default()
        }
    }
}

pub struct SketchBoardApp {
    board: Board,
    texture: Option<TextureHandle>,
    texture_version: u64,
    notice: Option<String>,
    #[cfg(not(target_arch = "wasm32"))]
    sink: crate::export::DirectorySink,
}

impl SketchBoardApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let preferences: Preferences = match cc.storage {
            Some(storage) => eframe::get_value(storage, eframe::APP_KEY).unwrap_or_default(),
            None => Preferences::default(),
        };
        log::debug!("Restored preferences: {:?}", preferences);

        Self {
            board: Board::with_state(preferences.into_state()),
            texture: None,
            texture_version: 0,
            notice: None,
            #[cfg(not(target_arch = "wasm32"))]
            sink: crate::export::DirectorySink::new("."),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn show_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    /// Routes an action from a button or shortcut
    pub fn dispatch(&mut self, action: BoardAction) {
        match action {
            BoardAction::Export => self.save_image(),
            BoardAction::Upload => {
                self.show_notice("Drop an image (PNG, JPG, JPEG) or PDF onto the window to upload it.")
            }
            BoardAction::RemoveBackground => {
                if self.board.remove_background() {
                    self.show_notice("The background image has been removed.");
                }
            }
            other => {
                self.board.apply(other);
            }
        }
    }

    /// Uploads the live frame to the GPU when it changed since the last call
    pub fn frame_texture(&mut self, ctx: &egui::Context) -> Option<&TextureHandle> {
        let frame = self.board.frame()?;
        if self.texture.is_none() || self.texture_version != self.board.frame_version() {
            let size = [frame.width() as usize, frame.height() as usize];
            let image = egui::ColorImage::from_rgba_unmultiplied(size, &frame.to_rgba8());
            match &mut self.texture {
                Some(texture) => texture.set(image, TextureOptions::LINEAR),
                None => self.texture = Some(ctx.load_texture("board", image, TextureOptions::LINEAR)),
            }
            self.texture_version = self.board.frame_version();
        }
        self.texture.as_ref()
    }

    fn save_image(&mut self) {
        #[cfg(not(target_arch = "wasm32"))]
        {
            match self.board.export_to(&mut self.sink) {
                Ok(()) => {
                    if let Some(path) = self.sink.last_written() {
                        let notice = format!("Saved {}", path.display());
                        self.show_notice(notice);
                    }
                }
                Err(err) => {
                    log::error!("Export failed: {}", err);
                    self.show_notice(err.to_string());
                }
            }
        }

        #[cfg(target_arch = "wasm32")]
        {
            log::warn!("Saving to disk is not available on the web");
            self.show_notice("Saving is only available in the desktop app.");
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        let actions: Vec<BoardAction> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Key {
                        key,
                        pressed: true,
                        repeat: false,
                        modifiers,
                        ..
                    } => input::action_for_key(*key, *modifiers),
                    _ => None,
                })
                .collect()
        });
        for action in actions {
            log::debug!("Shortcut: {:?}", action);
            self.dispatch(action);
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        for file in dropped {
            let name = if !file.name.is_empty() {
                file.name.clone()
            } else if let Some(path) = &file.path {
                path.file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string())
            } else {
                "unknown".to_owned()
            };

            let bytes = match dropped_bytes(&file) {
                Some(bytes) => bytes,
                None => {
                    log::warn!("Dropped file has no accessible data: {}", name);
                    continue;
                }
            };

            match self.board.upload(&name, &file.mime, &bytes) {
                Ok(notice) => self.show_notice(notice),
                Err(err) => {
                    log::warn!("Upload rejected: {}", err);
                    self.show_notice(err.to_string());
                }
            }
        }
    }

    fn notice_window(&mut self, ctx: &egui::Context) {
        let Some(notice) = &self.notice else { return };
        let mut open = true;
        egui::Window::new("Notice")
            .collapsible(false)
            .resizable(false)
            .open(&mut open)
            .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-16.0, 16.0))
            .show(ctx, |ui| {
                ui.label(notice.as_str());
            });
        if !open {
            self.notice = None;
        }
    }
}

fn dropped_bytes(file: &egui::DroppedFile) -> Option<Vec<u8>> {
    if let Some(bytes) = &file.bytes {
        return Some(bytes.to_vec());
    }

    #[cfg(not(target_arch = "wasm32"))]
    if let Some(path) = &file.path {
        return match std::fs::read(path) {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                log::error!("Failed to read dropped file: {}: {}", path.display(), err);
                None
            }
        };
    }

    None
}

impl eframe::App for SketchBoardApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &Preferences::from_board(&self.board));
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);
        self.handle_shortcuts(ctx);

        tools_panel(self, ctx);
        central_panel(self, ctx);

        self.notice_window(ctx);
    }
}
