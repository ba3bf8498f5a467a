use std::path::Path;

use crate::background::BackgroundImage;
use crate::error::{BoardError, BoardResult};

/// Result of an accepted upload
#[derive(Debug)]
pub enum Upload {
    /// Becomes the new board background
    Background(BackgroundImage),
    /// Recognised but not drawable yet; the board stays as it is
    Placeholder { name: String, notice: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Image,
    Pdf,
    Unsupported,
}

impl AssetKind {
    /// Classifies by MIME type, falling back to the file extension when none is known
    pub fn classify(name: &str, mime: &str) -> Self {
        if !mime.is_empty() {
            return if mime.starts_with("image/") {
                Self::Image
            } else if mime == "application/pdf" {
                Self::Pdf
            } else {
                Self::Unsupported
            };
        }

        let ext = Path::new(name)
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp" => Self::Image,
            "pdf" => Self::Pdf,
            _ => Self::Unsupported,
        }
    }
}

/// Turns an uploaded file into a background, a placeholder notice, or an error
pub fn load_asset(name: &str, mime: &str, bytes: &[u8]) -> BoardResult<Upload> {
    match AssetKind::classify(name, mime) {
        AssetKind::Image => {
            log::info!("Processing image upload: {} ({} bytes)", name, bytes.len());
            BackgroundImage::decode(name, bytes).map(Upload::Background)
        }
        AssetKind::Pdf => {
            log::info!("PDF uploaded, backgrounds from PDF are not supported: {}", name);
            Ok(Upload::Placeholder {
                name: name.to_owned(),
                notice: format!(
                    "PDF uploaded: {name}. PDF backgrounds are not yet supported for drawing. \
                     Please upload an image file instead."
                ),
            })
        }
        AssetKind::Unsupported => {
            log::warn!("Uploaded file is not a supported type: {}", name);
            Err(BoardError::UnsupportedAsset { name: name.to_owned() })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(AssetKind::classify("a.bin", "image/png"), AssetKind::Image);
        assert_eq!(AssetKind::classify("a.png", "text/plain"), AssetKind::Unsupported);
        assert_eq!(AssetKind::classify("doc.PDF", ""), AssetKind::Pdf);
        assert_eq!(AssetKind::classify("photo.JPeG", ""), AssetKind::Image);
        assert_eq!(AssetKind::classify("notes.txt", ""), AssetKind::Unsupported);
        assert_eq!(AssetKind::classify("noext", ""), AssetKind::Unsupported);
    }

    #[test]
    fn test_pdf_is_a_placeholder() {
        match load_asset("plan.pdf", "application/pdf", b"%PDF-1.4").unwrap() {
            Upload::Placeholder { name, notice } => {
                assert_eq!(name, "plan.pdf");
                assert!(notice.contains("not yet supported"));
            }
            other => panic!("expected placeholder, got {other:?}"),
        }
    }

    #[test]
    fn test_unsupported_is_rejected() {
        let err = load_asset("song.mp3", "audio/mpeg", &[1, 2, 3]).unwrap_err();
        assert!(matches!(err, BoardError::UnsupportedAsset { name } if name == "song.mp3"));
    }
}
