use thiserror::Error;

/// Errors surfaced by the board core and its export/upload paths
#[derive(Debug, Error)]
pub enum BoardError {
    /// The uploaded file is neither an image nor a handled placeholder type
    #[error("Unsupported file type: {name}. Please upload an image (PNG, JPG, JPEG) or PDF.")]
    UnsupportedAsset { name: String },

    #[error("Failed to decode image {name}: {source}")]
    ImageDecode {
        name: String,
        #[source]
        source: image::ImageError,
    },

    /// The requested surface has a zero or unrepresentable pixel size
    #[error("Cannot allocate a {width}x{height} surface")]
    InvalidSurface { width: u32, height: u32 },

    #[error("The board has not been given a size yet")]
    NoViewport,

    #[error("Failed to encode export: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for board operations
pub type BoardResult<T> = Result<T, BoardError>;
