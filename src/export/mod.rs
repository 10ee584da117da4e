//! Saving the export raster to PNG or JPEG files.

pub mod file;
pub mod types;

pub use file::{
    default_export_path, ensure_directory_exists, expand_tilde, generate_filename, save_image,
};
pub use types::{ExportError, ExportOptions, ImageFormat};
