use egui::Color32;
use serde::{Deserialize, Deserializer, Serialize};

use crate::stroke::{MIN_STROKE_WIDTH, Point, Stroke, StrokeOp};

pub const DEFAULT_STROKE_WIDTH: f32 = 4.0;

/// Which kind of stroke the next gesture produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ToolMode {
    #[default]
    Pen,
    Eraser,
}

impl ToolMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Pen => Self::Eraser,
            Self::Eraser => Self::Pen,
        }
    }

    pub fn op(self) -> StrokeOp {
        match self {
            Self::Pen => StrokeOp::Pen,
            Self::Eraser => StrokeOp::Erase,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Pen => "🖊 Pen",
            Self::Eraser => "⌫ Eraser",
        }
    }
}

/// Current tool selection, seeded into every new stroke
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    pub mode: ToolMode,
    color: Color32,
    #[serde(deserialize_with = "deserialize_width")]
    width: f32,
}

fn clamp_width(width: f32) -> f32 {
    if width.is_finite() {
        width.max(MIN_STROKE_WIDTH)
    } else {
        DEFAULT_STROKE_WIDTH
    }
}

/// Stored preferences go through the same clamping as [`ToolSettings::set_width`]
fn deserialize_width<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
    f32::deserialize(deserializer).map(clamp_width)
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            mode: ToolMode::Pen,
            color: Color32::BLACK,
            width: DEFAULT_STROKE_WIDTH,
        }
    }
}

impl ToolSettings {
    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn set_color(&mut self, color: Color32) {
        self.color = color;
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    /// Out-of-range widths are clamped instead of rejected
    pub fn set_width(&mut self, width: f32) {
        self.width = clamp_width(width);
    }

    /// Starts a stroke for the current mode.
    ///
    /// Eraser strokes take the background colour; only their coverage matters.
    pub fn begin_stroke(&self, start: Point, background: Color32) -> Stroke {
        let color = match self.mode {
            ToolMode::Pen => self.color,
            ToolMode::Eraser => background,
        };
        Stroke::new(color, self.width, self.mode.op(), start)
    }
}
