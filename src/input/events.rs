//! Generic input event types for host-independent handling.

/// Generic key representation.
///
/// Hosts map their native key codes to these values before calling
/// [`InputState::on_key_press`](super::InputState::on_key_press).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Regular character key (a-z, 0-9, symbols)
    Char(char),
    /// Escape key
    Escape,
    /// Return/Enter key
    Return,
    /// Backspace key
    Backspace,
    /// Delete key
    Delete,
    /// Tab key
    Tab,
    /// Space bar
    Space,
    /// Shift modifier
    Shift,
    /// Ctrl modifier
    Ctrl,
    /// Alt modifier
    Alt,
    /// Unmapped or unrecognized key
    Unknown,
}

impl Key {
    /// Maps a key name as written in keybindings ("Escape", "Delete", "z") to a key.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "escape" | "esc" => Key::Escape,
            "return" | "enter" => Key::Return,
            "backspace" => Key::Backspace,
            "delete" | "del" => Key::Delete,
            "tab" => Key::Tab,
            "space" => Key::Space,
            "shift" => Key::Shift,
            "ctrl" | "control" => Key::Ctrl,
            "alt" => Key::Alt,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => Key::Unknown,
                }
            }
        }
    }

    /// Name used for keybinding lookup, `None` for modifiers and unknown keys.
    pub fn binding_name(&self) -> Option<String> {
        let name = match self {
            Key::Char(c) => return Some(c.to_string()),
            Key::Escape => "Escape",
            Key::Return => "Return",
            Key::Backspace => "Backspace",
            Key::Delete => "Delete",
            Key::Tab => "Tab",
            Key::Space => "Space",
            Key::Shift | Key::Ctrl | Key::Alt | Key::Unknown => return None,
        };
        Some(name.to_string())
    }
}

/// Mouse button identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    /// Left mouse button (draws)
    Left,
    /// Right mouse button (finishes the current stroke)
    Right,
    /// Middle mouse button (unused)
    Middle,
}
