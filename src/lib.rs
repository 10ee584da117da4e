//! Freehand whiteboard core.
//!
//! A [`DrawingSession`](session::DrawingSession) turns pointer drags into styled
//! line segments, keeps stroke-level undo/redo history and mirrors everything
//! onto a display surface and an export raster that can be saved as PNG or JPEG.
//! [`InputState`](input::InputState) adapts host keyboard and mouse events to the
//! session, and [`script`] replays recorded events headlessly.

pub mod config;
pub mod draw;
pub mod export;
pub mod input;
pub mod notification;
pub mod script;
pub mod session;
pub mod util;

pub use config::Config;
pub use input::InputState;
pub use session::DrawingSession;
