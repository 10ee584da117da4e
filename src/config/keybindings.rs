//! Keybinding configuration types and parsing.
//!
//! This module defines the configurable keybinding system that allows users
//! to customize keyboard shortcuts for every whiteboard command.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// All possible actions that can be bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    // Exit
    Exit,

    // File and canvas
    Save,
    ClearCanvas,

    // History
    Undo,
    Redo,

    // Modes
    BrushMode,
    EraseMode,
    ToggleErase,

    // Width controls
    IncreaseWidth,
    DecreaseWidth,
    SetWidthSmall,
    SetWidthMedium,
    SetWidthLarge,
    SetWidthHuge,

    // Color selections
    ChooseColor,
    SetColorBlack,
    SetColorWhite,
    SetColorGreen,
    SetColorYellow,
    SetColorRed,
    SetColorBlue,
}

/// A single keybinding: a key character with optional modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyBinding {
    /// Parse a keybinding string like "Ctrl+Shift+Z" or "Escape".
    ///
    /// Modifiers can appear in any order and spaces around '+' are ignored.
    /// A trailing "++" binds the '+' key itself (e.g. "Ctrl++").
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Empty keybinding string".to_string());
        }

        let normalized: String = s.split_whitespace().collect();

        let mut ctrl = false;
        let mut shift = false;
        let mut alt = false;
        let mut key_parts = Vec::new();

        for part in normalized.split('+') {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => ctrl = true,
                "shift" => shift = true,
                "alt" => alt = true,
                _ => key_parts.push(part),
            }
        }

        if key_parts.is_empty() {
            return Err(format!("No key specified in: {}", s));
        }

        // "Ctrl++" splits into ["Ctrl", "", ""]: the empty parts are the '+' key
        let key = key_parts.join("+");
        let key = if key.chars().all(|c| c == '+') {
            "+".to_string()
        } else {
            key
        };

        Ok(Self {
            key,
            ctrl,
            shift,
            alt,
        })
    }

    /// Identity used for duplicate detection; keys compare case-insensitively
    /// like [`KeyBinding::matches`].
    fn folded(&self) -> (String, bool, bool, bool) {
        (self.key.to_ascii_lowercase(), self.ctrl, self.shift, self.alt)
    }

    /// Check if this keybinding matches the current input state.
    pub fn matches(&self, key: &str, ctrl: bool, shift: bool, alt: bool) -> bool {
        self.key.eq_ignore_ascii_case(key)
            && self.ctrl == ctrl
            && self.shift == shift
            && self.alt == alt
    }
}

/// Configuration for all keybindings.
///
/// Each action can have multiple keybindings. Users specify them in config.toml as:
/// ```toml
/// [keybindings]
/// undo = ["Ctrl+Z"]
/// redo = ["Ctrl+Y", "Ctrl+Shift+Z"]
/// clear_canvas = ["Ctrl+C"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct KeybindingsConfig {
    #[serde(default = "default_exit")]
    pub exit: Vec<String>,

    #[serde(default = "default_save")]
    pub save: Vec<String>,

    #[serde(default = "default_clear_canvas")]
    pub clear_canvas: Vec<String>,

    #[serde(default = "default_undo")]
    pub undo: Vec<String>,

    #[serde(default = "default_redo")]
    pub redo: Vec<String>,

    #[serde(default = "default_brush_mode")]
    pub brush_mode: Vec<String>,

    #[serde(default = "default_erase_mode")]
    pub erase_mode: Vec<String>,

    #[serde(default = "default_toggle_erase")]
    pub toggle_erase: Vec<String>,

    #[serde(default = "default_increase_width")]
    pub increase_width: Vec<String>,

    #[serde(default = "default_decrease_width")]
    pub decrease_width: Vec<String>,

    #[serde(default = "default_set_width_small")]
    pub set_width_small: Vec<String>,

    #[serde(default = "default_set_width_medium")]
    pub set_width_medium: Vec<String>,

    #[serde(default = "default_set_width_large")]
    pub set_width_large: Vec<String>,

    #[serde(default = "default_set_width_huge")]
    pub set_width_huge: Vec<String>,

    #[serde(default = "default_choose_color")]
    pub choose_color: Vec<String>,

    #[serde(default = "default_set_color_black")]
    pub set_color_black: Vec<String>,

    #[serde(default = "default_set_color_white")]
    pub set_color_white: Vec<String>,

    #[serde(default = "default_set_color_green")]
    pub set_color_green: Vec<String>,

    #[serde(default = "default_set_color_yellow")]
    pub set_color_yellow: Vec<String>,

    #[serde(default = "default_set_color_red")]
    pub set_color_red: Vec<String>,

    #[serde(default = "default_set_color_blue")]
    pub set_color_blue: Vec<String>,
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            exit: default_exit(),
            save: default_save(),
            clear_canvas: default_clear_canvas(),
            undo: default_undo(),
            redo: default_redo(),
            brush_mode: default_brush_mode(),
            erase_mode: default_erase_mode(),
            toggle_erase: default_toggle_erase(),
            increase_width: default_increase_width(),
            decrease_width: default_decrease_width(),
            set_width_small: default_set_width_small(),
            set_width_medium: default_set_width_medium(),
            set_width_large: default_set_width_large(),
            set_width_huge: default_set_width_huge(),
            choose_color: default_choose_color(),
            set_color_black: default_set_color_black(),
            set_color_white: default_set_color_white(),
            set_color_green: default_set_color_green(),
            set_color_yellow: default_set_color_yellow(),
            set_color_red: default_set_color_red(),
            set_color_blue: default_set_color_blue(),
        }
    }
}

impl KeybindingsConfig {
    fn entries(&self) -> [(&[String], Action); 21] {
        [
            (self.exit.as_slice(), Action::Exit),
            (self.save.as_slice(), Action::Save),
            (self.clear_canvas.as_slice(), Action::ClearCanvas),
            (self.undo.as_slice(), Action::Undo),
            (self.redo.as_slice(), Action::Redo),
            (self.brush_mode.as_slice(), Action::BrushMode),
            (self.erase_mode.as_slice(), Action::EraseMode),
            (self.toggle_erase.as_slice(), Action::ToggleErase),
            (self.increase_width.as_slice(), Action::IncreaseWidth),
            (self.decrease_width.as_slice(), Action::DecreaseWidth),
            (self.set_width_small.as_slice(), Action::SetWidthSmall),
            (self.set_width_medium.as_slice(), Action::SetWidthMedium),
            (self.set_width_large.as_slice(), Action::SetWidthLarge),
            (self.set_width_huge.as_slice(), Action::SetWidthHuge),
            (self.choose_color.as_slice(), Action::ChooseColor),
            (self.set_color_black.as_slice(), Action::SetColorBlack),
            (self.set_color_white.as_slice(), Action::SetColorWhite),
            (self.set_color_green.as_slice(), Action::SetColorGreen),
            (self.set_color_yellow.as_slice(), Action::SetColorYellow),
            (self.set_color_red.as_slice(), Action::SetColorRed),
            (self.set_color_blue.as_slice(), Action::SetColorBlue),
        ]
    }

    /// Build a lookup map from keybindings to actions for efficient matching.
    /// Returns an error if any keybinding string is invalid or if duplicates are detected.
    pub fn build_action_map(&self) -> Result<HashMap<KeyBinding, Action>, String> {
        let mut map = HashMap::new();
        let mut seen = HashMap::new();

        for (bindings, action) in self.entries() {
            for binding_str in bindings {
                let binding = KeyBinding::parse(binding_str)?;
                if let Some(existing_action) = seen.insert(binding.folded(), action) {
                    return Err(format!(
                        "Duplicate keybinding '{}' assigned to both {:?} and {:?}",
                        binding_str, existing_action, action
                    ));
                }
                map.insert(binding, action);
            }
        }

        Ok(map)
    }
}

// =============================================================================
// Default keybinding functions
// =============================================================================

fn bindings(keys: &[&str]) -> Vec<String> {
    keys.iter().map(|k| k.to_string()).collect()
}

fn default_exit() -> Vec<String> {
    bindings(&["Escape", "Ctrl+Q"])
}

fn default_save() -> Vec<String> {
    bindings(&["Ctrl+S"])
}

fn default_clear_canvas() -> Vec<String> {
    bindings(&["Ctrl+C", "Delete"])
}

fn default_undo() -> Vec<String> {
    bindings(&["Ctrl+Z"])
}

fn default_redo() -> Vec<String> {
    bindings(&["Ctrl+Y", "Ctrl+Shift+Z"])
}

fn default_brush_mode() -> Vec<String> {
    bindings(&["B"])
}

fn default_erase_mode() -> Vec<String> {
    bindings(&["E"])
}

fn default_toggle_erase() -> Vec<String> {
    bindings(&["X"])
}

fn default_increase_width() -> Vec<String> {
    bindings(&["+", "="])
}

fn default_decrease_width() -> Vec<String> {
    bindings(&["-", "_"])
}

fn default_set_width_small() -> Vec<String> {
    bindings(&["1"])
}

fn default_set_width_medium() -> Vec<String> {
    bindings(&["2"])
}

fn default_set_width_large() -> Vec<String> {
    bindings(&["3"])
}

fn default_set_width_huge() -> Vec<String> {
    bindings(&["4"])
}

fn default_choose_color() -> Vec<String> {
    bindings(&["C"])
}

fn default_set_color_black() -> Vec<String> {
    bindings(&["K"])
}

fn default_set_color_white() -> Vec<String> {
    bindings(&["W"])
}

fn default_set_color_green() -> Vec<String> {
    bindings(&["G"])
}

fn default_set_color_yellow() -> Vec<String> {
    bindings(&["Y"])
}

fn default_set_color_red() -> Vec<String> {
    bindings(&["R"])
}

fn default_set_color_blue() -> Vec<String> {
    bindings(&["Shift+B"])
}
