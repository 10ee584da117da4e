//! In-memory raster image mirrored from the stroke history for export.

use super::color::Color;
use super::render::{render_background, render_segment};
use super::segment::StyledSegment;
use super::surface::Surface;
use std::io::Write;

/// Fixed-size RGB raster backed by a Cairo image surface.
///
/// This is the image persisted on save. It is drawn segment by segment while
/// the user drags, and repainted from scratch when history is replayed.
pub struct RasterImage {
    surface: cairo::ImageSurface,
    background: Color,
}

impl RasterImage {
    /// Creates a raster of `width`×`height` pixels filled with `background`.
    ///
    /// # Errors
    /// Returns an error if Cairo cannot allocate the surface (zero or oversized
    /// dimensions, out of memory).
    pub fn new(width: u32, height: u32, background: Color) -> Result<Self, cairo::Error> {
        if width == 0 || height == 0 {
            return Err(cairo::Error::InvalidSize);
        }
        let width = i32::try_from(width).map_err(|_| cairo::Error::InvalidSize)?;
        let height = i32::try_from(height).map_err(|_| cairo::Error::InvalidSize)?;
        let surface = cairo::ImageSurface::create(cairo::Format::Rgb24, width, height)?;

        let mut image = Self {
            surface,
            background,
        };
        image.reset();
        Ok(image)
    }

    pub fn width(&self) -> u32 {
        self.surface.width() as u32
    }

    pub fn height(&self) -> u32 {
        self.surface.height() as u32
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Runs `draw` against a short-lived Cairo context.
    ///
    /// The context is dropped before returning; pixel access through
    /// [`cairo::ImageSurface::data`] requires the surface to be unshared.
    fn with_context(&self, draw: impl FnOnce(&cairo::Context)) {
        match cairo::Context::new(&self.surface) {
            Ok(ctx) => draw(&ctx),
            Err(err) => log::warn!("Failed to create Cairo context for export image: {err}"),
        }
    }

    /// Reads one pixel as 8-bit RGB. Returns `None` outside the canvas.
    pub fn pixel(&mut self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        self.surface.flush();
        let stride = self.surface.stride() as usize;
        let data = self.surface.data().ok()?;
        let offset = y as usize * stride + x as usize * 4;
        let bytes = data.get(offset..offset + 4)?;
        Some(unpack_rgb24([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Copies the pixels into an [`image::RgbImage`] (used by encoders Cairo lacks).
    pub fn to_rgb_image(&mut self) -> Result<image::RgbImage, cairo::BorrowError> {
        let width = self.width();
        let height = self.height();
        self.surface.flush();
        let stride = self.surface.stride() as usize;
        let data = self.surface.data()?;

        let mut out = image::RgbImage::new(width, height);
        for (y, row) in data.chunks(stride).take(height as usize).enumerate() {
            for x in 0..width as usize {
                let px = &row[x * 4..x * 4 + 4];
                let rgb = unpack_rgb24([px[0], px[1], px[2], px[3]]);
                out.put_pixel(x as u32, y as u32, image::Rgb(rgb));
            }
        }
        Ok(out)
    }

    /// Encodes the raster as PNG into `stream`.
    pub fn write_png<W: Write>(&self, stream: &mut W) -> Result<(), cairo::IoError> {
        self.surface.flush();
        self.surface.write_to_png(stream)
    }
}

impl Surface for RasterImage {
    fn draw_segment(&mut self, segment: &StyledSegment) {
        self.with_context(|ctx| render_segment(ctx, segment));
    }

    fn reset(&mut self) {
        let background = self.background;
        self.with_context(|ctx| render_background(ctx, background));
    }
}

impl std::fmt::Debug for RasterImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterImage")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("background", &self.background)
            .finish()
    }
}

/// RGB24 stores each pixel as a native-endian `u32` laid out `0x00RRGGBB`.
fn unpack_rgb24(bytes: [u8; 4]) -> [u8; 3] {
    let px = u32::from_ne_bytes(bytes);
    [(px >> 16) as u8, (px >> 8) as u8, px as u8]
}
