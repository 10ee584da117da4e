//! Drawing session: pointer strokes, stroke history, and brush state.
//!
//! Everything here runs synchronously on the host's UI thread. The session
//! owns the stroke history and treats the display and export raster as
//! renderers of it.

mod brush;
mod drawing;
mod history;

pub use brush::{BrushMode, BrushState};
pub use drawing::{CanvasSettings, DrawingSession};
pub use history::History;
