use egui::Color32;

use crate::background::BackgroundImage;

pub const DEFAULT_GRID_SPACING: f32 = 20.0;
pub const MIN_GRID_SPACING: f32 = 2.0;

/// Grid lines are always thin black hairlines
pub const GRID_COLOR: Color32 = Color32::BLACK;
pub const GRID_LINE_WIDTH: f32 = 0.5;

/// Board-wide appearance, read by the compositor on every pass
#[derive(Debug, Clone)]
pub struct CanvasConfig {
    pub background_color: Color32,
    pub background_image: Option<BackgroundImage>,
    pub grid_enabled: bool,
    grid_spacing: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            background_color: Color32::WHITE,
            background_image: None,
            grid_enabled: false,
            grid_spacing: DEFAULT_GRID_SPACING,
        }
    }
}

impl CanvasConfig {
    pub fn grid_spacing(&self) -> f32 {
        self.grid_spacing
    }

    pub fn set_grid_spacing(&mut self, spacing: f32) {
        self.grid_spacing = if spacing.is_finite() {
            spacing.max(MIN_GRID_SPACING)
        } else {
            DEFAULT_GRID_SPACING
        };
    }
}
