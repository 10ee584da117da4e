//! Data types for image export.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Raster formats the export image can be written as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    /// Maps a file extension (without the dot, any case) to a format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            _ => None,
        }
    }

    /// Picks the format from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Canonical extension for generated filenames.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }
}

/// Encoder settings for export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    /// JPEG quality, 1 (smallest) to 100 (best)
    pub jpeg_quality: u8,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { jpeg_quality: 90 }
    }
}

/// Errors that can occur while saving the export image.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Unsupported image format for {}: expected a .png, .jpg or .jpeg extension", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Directory does not exist: {}", .0.display())]
    MissingDirectory(PathBuf),

    #[error("Failed to write image: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG encoding failed: {0}")]
    Png(#[from] cairo::IoError),

    #[error("Image encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Export image is busy: {0}")]
    Surface(#[from] cairo::BorrowError),
}
