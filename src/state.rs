use crate::config::CanvasConfig;
use crate::history::StrokeHistory;
use crate::tool::ToolSettings;

/// Pointer gesture tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureState {
    #[default]
    Idle,
    /// A gesture is running; samples go to the newest committed stroke
    Drawing,
}

impl CaptureState {
    pub fn is_drawing(&self) -> bool {
        matches!(self, Self::Drawing)
    }
}

/// Everything a board session mutates
#[derive(Debug, Clone, Default)]
pub struct BoardState {
    pub tool: ToolSettings,
    pub config: CanvasConfig,
    pub history: StrokeHistory,
    pub capture: CaptureState,
}
