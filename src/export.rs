use std::io::Cursor;
use std::path::{Path, PathBuf};

use egui::Vec2;
use image::{ImageFormat, RgbaImage};

use crate::compositor;
use crate::config::CanvasConfig;
use crate::error::{BoardError, BoardResult};
use crate::renderer::{Raster, RenderTarget};
use crate::stroke::Stroke;

pub const DEFAULT_EXPORT_NAME: &str = "drawing.png";

/// An encoded PNG ready to hand to the user
#[derive(Debug, Clone)]
pub struct ExportedImage {
    pub file_name: String,
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

/// Destination for finished exports (download, file, clipboard, ...)
pub trait ExportSink {
    fn deliver(&mut self, export: ExportedImage) -> BoardResult<()>;
}

/// Writes exports as files into a directory
pub struct DirectorySink {
    dir: PathBuf,
    last_written: Option<PathBuf>,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            last_written: None,
        }
    }

    pub fn last_written(&self) -> Option<&Path> {
        self.last_written.as_deref()
    }
}

impl ExportSink for DirectorySink {
    fn deliver(&mut self, export: ExportedImage) -> BoardResult<()> {
        let path = available_path(&self.dir, &export.file_name);
        std::fs::write(&path, &export.png)?;
        log::info!("Saved {}x{} export to {}", export.width, export.height, path.display());
        self.last_written = Some(path);
        Ok(())
    }
}

/// `name.png`, or the first free `name-N.png` when earlier exports are in the way
fn available_path(dir: &Path, file_name: &str) -> PathBuf {
    let path = dir.join(file_name);
    if !path.exists() {
        return path;
    }
    let name = Path::new(file_name);
    let stem = name.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
    let extension = name.extension().map(|e| e.to_string_lossy()).unwrap_or_default();
    (1u32..)
        .map(|n| {
            if extension.is_empty() {
                dir.join(format!("{stem}-{n}"))
            } else {
                dir.join(format!("{stem}-{n}.{extension}"))
            }
        })
        .find(|candidate| !candidate.exists())
        .unwrap_or(path)
}

/// Renders the board at its logical size (one pixel per logical unit) and encodes it as PNG.
///
/// The live density never leaks into the file, so the export matches the
/// board as the user sees it on any display.
pub fn export_png(config: &CanvasConfig, strokes: &[Stroke], logical_size: Vec2) -> BoardResult<ExportedImage> {
    let raster: Raster = compositor::compose(config, strokes, RenderTarget::logical(logical_size))?;
    let (width, height) = (raster.width(), raster.height());

    let image = RgbaImage::from_raw(width, height, raster.to_rgba8())
        .ok_or(BoardError::InvalidSurface { width, height })?;
    let mut png = Vec::new();
    image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

    Ok(ExportedImage {
        file_name: suggested_file_name(config),
        width,
        height,
        png,
    })
}

/// `updated-<background name>.png` when a background image is set
pub fn suggested_file_name(config: &CanvasConfig) -> String {
    match &config.background_image {
        Some(image) => {
            let stem = image.stem();
            let stem = if stem.is_empty() { "background" } else { stem };
            format!("updated-{stem}.png")
        }
        None => DEFAULT_EXPORT_NAME.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::background::BackgroundImage;

    #[test]
    fn test_suggested_file_name() {
        let mut config = CanvasConfig::default();
        assert_eq!(suggested_file_name(&config), "drawing.png");

        config.background_image = Some(BackgroundImage::from_rgba("shots/floor plan.jpg", 1, 1, &[0, 0, 0, 255]).unwrap());
        assert_eq!(suggested_file_name(&config), "updated-floor plan.png");
    }

    #[test]
    fn test_directory_sink_writes_file() {
        let dir = std::env::temp_dir().join(format!("sketch_board_export_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let export = export_png(&CanvasConfig::default(), &[], Vec2::new(8.0, 6.0)).unwrap();
        let mut sink = DirectorySink::new(&dir);
        sink.deliver(export).unwrap();

        let written = sink.last_written().unwrap().to_path_buf();
        assert_eq!(written.file_name().unwrap(), "drawing.png");
        let decoded = image::open(&written).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (8, 6));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_directory_sink_keeps_earlier_exports() {
        let dir = std::env::temp_dir().join(format!("sketch_board_numbered_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("drawing.png"), b"earlier").unwrap();

        let mut sink = DirectorySink::new(&dir);
        let export = export_png(&CanvasConfig::default(), &[], Vec2::new(4.0, 4.0)).unwrap();
        sink.deliver(export.clone()).unwrap();
        assert_eq!(sink.last_written().unwrap().file_name().unwrap(), "drawing-1.png");
        sink.deliver(export).unwrap();
        assert_eq!(sink.last_written().unwrap().file_name().unwrap(), "drawing-2.png");

        assert_eq!(std::fs::read(dir.join("drawing.png")).unwrap(), b"earlier");
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
