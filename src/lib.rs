#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod background;
pub mod board;
pub mod compositor;
pub mod config;
pub mod error;
pub mod export;
pub mod file_handler;
pub mod history;
pub mod input;
pub mod panels;
pub mod renderer;
pub mod state;
pub mod stroke;
pub mod tool;

pub use app::SketchBoardApp;
pub use background::BackgroundImage;
pub use board::Board;
pub use config::CanvasConfig;
pub use error::{BoardError, BoardResult};
pub use export::{DirectorySink, ExportSink, ExportedImage};
pub use history::StrokeHistory;
pub use input::BoardAction;
pub use renderer::{Raster, RenderSurface, RenderTarget};
pub use state::{BoardState, CaptureState};
pub use stroke::{Point, Stroke, StrokeOp};
pub use tool::{ToolMode, ToolSettings};
