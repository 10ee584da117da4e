//! Brush state: color, width, and brush/erase mode.

use crate::draw::Color;
use serde::{Deserialize, Serialize};

/// Whether the pointer paints with the brush color or with the background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrushMode {
    #[default]
    Brush,
    /// Paints with the canvas background color
    Erase,
}

impl std::str::FromStr for BrushMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "brush" | "pen" => Ok(Self::Brush),
            "erase" | "eraser" => Ok(Self::Erase),
            other => Err(format!("unknown brush mode '{other}'")),
        }
    }
}

/// Current brush settings applied to each new segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushState {
    color: Color,
    width: f64,
    mode: BrushMode,
    /// Last color chosen in brush mode; restored when erase mode ends
    brush_color: Color,
}

impl BrushState {
    pub fn new(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            mode: BrushMode::Brush,
            brush_color: color,
        }
    }

    /// Color the next segment will be drawn with.
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn mode(&self) -> BrushMode {
        self.mode
    }

    /// The remembered non-erase color.
    pub fn brush_color(&self) -> Color {
        self.brush_color
    }

    /// Switches mode. `background` is the color erase mode paints with.
    ///
    /// Entering erase remembers the current color; leaving it restores that color.
    /// Setting the mode that is already active changes nothing.
    pub fn set_mode(&mut self, mode: BrushMode, background: Color) {
        match (self.mode, mode) {
            (BrushMode::Brush, BrushMode::Erase) => {
                self.brush_color = self.color;
                self.color = background;
            }
            (BrushMode::Erase, BrushMode::Brush) => {
                self.color = self.brush_color;
            }
            _ => return,
        }
        self.mode = mode;
    }

    /// Chooses a new brush color, leaving erase mode if it was active.
    pub fn set_color(&mut self, color: Color) {
        if self.mode == BrushMode::Erase {
            self.color = self.brush_color;
            self.mode = BrushMode::Brush;
        }
        self.color = color;
        self.brush_color = color;
    }

    /// Sets the width for subsequent segments. Non-positive or non-finite widths are ignored.
    pub fn set_width(&mut self, width: f64) -> bool {
        if !width.is_finite() || width <= 0.0 {
            log::warn!("Ignoring invalid brush width {width}");
            return false;
        }
        self.width = width;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{BLACK, GREEN, RED, WHITE};

    #[test]
    fn erase_round_trip_restores_exact_color() {
        let custom = Color::from_rgb8(12, 34, 56);
        let mut brush = BrushState::new(custom, 3.0);

        brush.set_mode(BrushMode::Erase, WHITE);
        assert_eq!(brush.mode(), BrushMode::Erase);
        assert_eq!(brush.color(), WHITE);
        assert_eq!(brush.brush_color(), custom);

        brush.set_mode(BrushMode::Brush, WHITE);
        assert_eq!(brush.mode(), BrushMode::Brush);
        assert_eq!(brush.color(), custom);
    }

    #[test]
    fn entering_erase_twice_keeps_remembered_color() {
        let mut brush = BrushState::new(RED, 2.0);
        brush.set_mode(BrushMode::Erase, WHITE);
        brush.set_mode(BrushMode::Erase, WHITE);
        brush.set_mode(BrushMode::Brush, WHITE);
        assert_eq!(brush.color(), RED);
    }

    #[test]
    fn choosing_color_while_erasing_returns_to_brush() {
        let mut brush = BrushState::new(RED, 2.0);
        brush.set_mode(BrushMode::Erase, WHITE);

        brush.set_color(GREEN);
        assert_eq!(brush.mode(), BrushMode::Brush);
        assert_eq!(brush.color(), GREEN);
        assert_eq!(brush.brush_color(), GREEN);
    }

    #[test]
    fn choosing_color_in_brush_mode_updates_both_colors() {
        let mut brush = BrushState::new(RED, 2.0);
        brush.set_color(BLACK);
        assert_eq!(brush.color(), BLACK);
        assert_eq!(brush.brush_color(), BLACK);
    }

    #[test]
    fn invalid_widths_are_ignored() {
        let mut brush = BrushState::new(RED, 2.0);
        assert!(!brush.set_width(0.0));
        assert!(!brush.set_width(-3.0));
        assert!(!brush.set_width(f64::NAN));
        assert_eq!(brush.width(), 2.0);
        assert!(brush.set_width(9.0));
        assert_eq!(brush.width(), 9.0);
    }

    #[test]
    fn brush_mode_parses_aliases() {
        assert_eq!("Erase".parse::<BrushMode>().unwrap(), BrushMode::Erase);
        assert_eq!("pen".parse::<BrushMode>().unwrap(), BrushMode::Brush);
        assert!("smudge".parse::<BrushMode>().is_err());
    }
}
