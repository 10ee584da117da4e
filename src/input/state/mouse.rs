use crate::draw::{Point, Surface};
use crate::input::events::MouseButton;

use super::InputState;

impl<D: Surface> InputState<D> {
    /// Processes a mouse button press event.
    ///
    /// # Behavior
    /// - Left click: starts a stroke at the pointer
    /// - Right click: finishes the current stroke, if any
    pub fn on_mouse_press(&mut self, button: MouseButton, x: i32, y: i32) {
        match button {
            MouseButton::Left => {
                self.session.start(Point::new(x, y));
            }
            MouseButton::Right => {
                if self.session.is_drawing() && self.session.end() {
                    self.needs_redraw = true;
                }
            }
            MouseButton::Middle => {}
        }
    }

    /// Processes mouse motion (dragging) events.
    ///
    /// Adds a segment to the active stroke; motion without a pressed button is ignored.
    pub fn on_mouse_motion(&mut self, x: i32, y: i32) {
        if self.session.extend(Point::new(x, y)) {
            self.needs_redraw = true;
        }
    }

    /// Processes mouse button release events.
    ///
    /// Releasing the left button commits the active stroke as drawn so far.
    /// The release position never adds a segment; only motion events draw.
    pub fn on_mouse_release(&mut self, button: MouseButton, _x: i32, _y: i32) {
        if button != MouseButton::Left {
            return;
        }

        if self.session.end() {
            self.needs_redraw = true;
        }
    }
}
