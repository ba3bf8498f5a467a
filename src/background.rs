use egui::Vec2;
use tiny_skia::{ColorU8, IntSize, Pixmap};

use crate::error::{BoardError, BoardResult};

/// A decoded background picture and the file name it came from
#[derive(Clone)]
pub struct BackgroundImage {
    name: String,
    pixmap: Pixmap,
}

// Pixel data is skipped in debug output
impl std::fmt::Debug for BackgroundImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackgroundImage")
            .field("name", &self.name)
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .finish()
    }
}

impl BackgroundImage {
    /// Builds an image from straight (non-premultiplied) RGBA8 pixels
    pub fn from_rgba(name: impl Into<String>, width: u32, height: u32, rgba: &[u8]) -> BoardResult<Self> {
        let size = IntSize::from_wh(width, height).ok_or(BoardError::InvalidSurface { width, height })?;
        let mut pixmap = Pixmap::new(size.width(), size.height())
            .ok_or(BoardError::InvalidSurface { width, height })?;

        if rgba.len() != pixmap.pixels().len() * 4 {
            return Err(BoardError::InvalidSurface { width, height });
        }
        for (dst, src) in pixmap.pixels_mut().iter_mut().zip(rgba.chunks_exact(4)) {
            *dst = ColorU8::from_rgba(src[0], src[1], src[2], src[3]).premultiply();
        }

        Ok(Self {
            name: name.into(),
            pixmap,
        })
    }

    /// Decodes any format the `image` crate understands
    pub fn decode(name: impl Into<String>, bytes: &[u8]) -> BoardResult<Self> {
        let name = name.into();
        let decoded = match image::load_from_memory(bytes) {
            Ok(img) => img,
            Err(source) => return Err(BoardError::ImageDecode { name, source }),
        };
        log::debug!("Decoded image {}: {}x{}", name, decoded.width(), decoded.height());

        let rgba = decoded.to_rgba8();
        Self::from_rgba(name, rgba.width(), rgba.height(), rgba.as_raw())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// File name without directories or extension
    pub fn stem(&self) -> &str {
        let file = self.name.rsplit(['/', '\\']).next().unwrap_or(&self.name);
        match file.rfind('.') {
            Some(dot) if dot > 0 => &file[..dot],
            _ => file,
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.pixmap.width() as f32, self.pixmap.height() as f32)
    }

    pub(crate) fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }
}
