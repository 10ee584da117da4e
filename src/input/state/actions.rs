use crate::config::Action;
use crate::draw::{Surface, color};
use crate::input::events::Key;
use crate::session::BrushMode;

use super::{HostRequest, InputState};

impl<D: Surface> InputState<D> {
    /// Processes a key press event.
    ///
    /// Modifier keys only update the modifier state; every other key is looked
    /// up in the keybinding map together with the held modifiers.
    pub fn on_key_press(&mut self, key: Key) {
        match key {
            Key::Shift => {
                self.modifiers.shift = true;
                return;
            }
            Key::Ctrl => {
                self.modifiers.ctrl = true;
                return;
            }
            Key::Alt => {
                self.modifiers.alt = true;
                return;
            }
            _ => {}
        }

        let Some(key_str) = key.binding_name() else {
            return;
        };

        if let Some(action) = self.find_action(&key_str) {
            self.handle_action(action);
        }
    }

    /// Processes a key release event.
    ///
    /// Only tracks modifier key releases to update the modifier state.
    pub fn on_key_release(&mut self, key: Key) {
        match key {
            Key::Shift => self.modifiers.shift = false,
            Key::Ctrl => self.modifiers.ctrl = false,
            Key::Alt => self.modifiers.alt = false,
            _ => {}
        }
    }

    /// Handle an action triggered by a keybinding or a host menu.
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Exit => {
                // First press finishes a stroke in progress, second one exits
                if self.session.is_drawing() {
                    self.session.end();
                    self.needs_redraw = true;
                } else {
                    self.should_exit = true;
                }
            }
            Action::Save => {
                log::debug!("Save requested; waiting for host dialog");
                self.set_pending_request(HostRequest::SaveDialog);
                // Dialogs swallow key releases
                self.modifiers.release_all();
            }
            Action::ClearCanvas => {
                self.session.clear();
                self.needs_redraw = true;
            }
            Action::Undo => {
                if self.session.undo() {
                    self.needs_redraw = true;
                }
            }
            Action::Redo => {
                if self.session.redo() {
                    self.needs_redraw = true;
                }
            }
            Action::BrushMode => self.session.set_mode(BrushMode::Brush),
            Action::EraseMode => self.session.set_mode(BrushMode::Erase),
            Action::ToggleErase => {
                let next = match self.session.brush().mode() {
                    BrushMode::Brush => BrushMode::Erase,
                    BrushMode::Erase => BrushMode::Brush,
                };
                self.session.set_mode(next);
            }
            Action::IncreaseWidth => self.adjust_width(1.0),
            Action::DecreaseWidth => self.adjust_width(-1.0),
            Action::SetWidthSmall => self.set_width(self.width_preset(0)),
            Action::SetWidthMedium => self.set_width(self.width_preset(1)),
            Action::SetWidthLarge => self.set_width(self.width_preset(2)),
            Action::SetWidthHuge => self.set_width(self.width_preset(3)),
            Action::ChooseColor => {
                log::debug!("Color selection requested; waiting for host dialog");
                self.set_pending_request(HostRequest::ColorDialog);
                self.modifiers.release_all();
            }
            Action::SetColorBlack => self.apply_color_choice(Some(color::BLACK)),
            Action::SetColorWhite => self.apply_color_choice(Some(color::WHITE)),
            Action::SetColorGreen => self.apply_color_choice(Some(color::GREEN)),
            Action::SetColorYellow => self.apply_color_choice(Some(color::YELLOW)),
            Action::SetColorRed => self.apply_color_choice(Some(color::RED)),
            Action::SetColorBlue => self.apply_color_choice(Some(color::BLUE)),
        }
    }
}
