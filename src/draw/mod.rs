//! Rendering primitives and stroke geometry (Cairo-based).
//!
//! This module defines the core drawing types used by the whiteboard:
//! - [`Color`]: RGBA color representation with the brush palette
//! - [`Point`], [`StyledSegment`], [`Stroke`]: what a pointer drag records
//! - [`Surface`]: anything the session draws onto (display or export raster)
//! - [`RasterImage`]: the fixed-size image persisted on save
//! - Rendering functions for Cairo-based output

pub mod color;
pub mod raster;
pub mod render;
pub mod segment;
pub mod surface;

// Re-export commonly used types at module level
pub use color::Color;
pub use raster::RasterImage;
pub use render::{render_background, render_segment, render_segments, render_strokes};
pub use segment::{Point, Stroke, StyledSegment};
pub use surface::{NullSurface, Surface};

pub use color::{BLACK, BLUE, GREEN, RED, WHITE, YELLOW};
