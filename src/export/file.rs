//! Writing the export image to disk.

use super::types::{ExportError, ExportOptions, ImageFormat};
use crate::config::ExportConfig;
use crate::draw::RasterImage;
use chrono::Local;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes `image` to `path` in the format named by the path's extension.
///
/// The parent directory must already exist.
///
/// # Returns
/// The path that was written.
pub fn save_image(
    image: &mut RasterImage,
    path: &Path,
    options: &ExportOptions,
) -> Result<PathBuf, ExportError> {
    let format =
        ImageFormat::from_path(path).ok_or_else(|| ExportError::UnsupportedFormat(path.into()))?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.is_dir()
    {
        return Err(ExportError::MissingDirectory(parent.to_path_buf()));
    }

    log::info!(
        "Saving {}x{} {:?} image to {}",
        image.width(),
        image.height(),
        format,
        path.display()
    );

    match format {
        ImageFormat::Png => {
            let mut writer = BufWriter::new(File::create(path)?);
            image.write_png(&mut writer)?;
            writer.flush()?;
        }
        ImageFormat::Jpeg => {
            // Convert before touching the file so a busy surface leaves nothing behind
            let rgb = image.to_rgb_image()?;
            let mut writer = BufWriter::new(File::create(path)?);
            let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(
                &mut writer,
                options.jpeg_quality.clamp(1, 100),
            );
            encoder.encode_image(&rgb)?;
            writer.flush()?;
        }
    }

    let written_size = fs::metadata(path)?.len();
    log::debug!("File written: {} bytes", written_size);

    Ok(path.to_path_buf())
}

/// Generate a filename based on the template and current time.
///
/// # Arguments
/// * `template` - Template string with chrono format specifiers
/// * `extension` - File extension (e.g., "png")
pub fn generate_filename(template: &str, extension: &str) -> String {
    let now = Local::now();
    let filename = now.format(template).to_string();
    format!("{}.{}", filename, extension)
}

/// Ensure the export directory exists, creating it if necessary.
pub fn ensure_directory_exists(directory: &Path) -> Result<PathBuf, ExportError> {
    if !directory.exists() {
        log::info!("Creating export directory: {}", directory.display());
        fs::create_dir_all(directory)?;
    }

    let canonical = directory
        .canonicalize()
        .unwrap_or_else(|_| directory.to_path_buf());

    Ok(canonical)
}

/// Builds a timestamped path inside the configured export directory.
///
/// Used when the host has no file dialog (headless replay) or as the dialog's
/// initial suggestion. Creates the directory if needed.
pub fn default_export_path(config: &ExportConfig) -> Result<PathBuf, ExportError> {
    let directory = ensure_directory_exists(&expand_tilde(&config.directory))?;
    let extension = ImageFormat::from_extension(&config.format)
        .unwrap_or(ImageFormat::Png)
        .extension();
    Ok(directory.join(generate_filename(&config.filename_template, extension)))
}

/// Expand tilde (~) in path strings.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}
