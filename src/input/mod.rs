//! Input handling.
//!
//! This module translates host keyboard and mouse events, plus the results of
//! host dialogs, into [`DrawingSession`](crate::session::DrawingSession) calls.

pub mod events;
pub mod modifiers;
pub mod state;

// Re-export commonly used types at module level
pub use events::{Key, MouseButton};
pub use modifiers::Modifiers;
pub use state::{HostRequest, InputState};
