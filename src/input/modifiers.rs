//! Keyboard modifier state tracking.

/// Keyboard modifier state.
///
/// Tracks which modifier keys (Shift, Ctrl, Alt) are currently pressed so that
/// key presses can be matched against keybindings like `Ctrl+Z`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift key pressed
    pub shift: bool,
    /// Ctrl key pressed
    pub ctrl: bool,
    /// Alt key pressed
    pub alt: bool,
}

impl Modifiers {
    /// Creates a new Modifiers instance with all keys released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Releases every modifier.
    ///
    /// Used when a host dialog opens, since the dialog swallows key releases.
    pub fn release_all(&mut self) {
        *self = Self::new();
    }
}
