//! Input state: the session plus keybindings, modifiers and host requests.

use crate::config::{Action, Config, KeyBinding, MAX_BRUSH_WIDTH, MIN_BRUSH_WIDTH};
use crate::draw::{Color, NullSurface, Surface};
use crate::export::ExportError;
use crate::input::modifiers::Modifiers;
use crate::notification::{LogNotifier, Notifier};
use crate::session::DrawingSession;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Work the host has to do on behalf of the input layer.
///
/// Both requests are answered through [`InputState::save_to`] and
/// [`InputState::apply_color_choice`]; answering with `None` means the user
/// cancelled the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostRequest {
    /// Show a save-file dialog
    SaveDialog,
    /// Show a color picker
    ColorDialog,
}

/// Main input state wrapping a [`DrawingSession`].
///
/// Processes keyboard and mouse events, resolves keybindings to [`Action`]s
/// and tracks when the display needs to be repainted.
pub struct InputState<D: Surface = NullSurface> {
    /// Strokes, brush and surfaces
    pub(super) session: DrawingSession<D>,
    /// Current modifier key state
    pub modifiers: Modifiers,
    /// Whether user requested to exit
    pub should_exit: bool,
    /// Whether the display needs to be redrawn
    pub needs_redraw: bool,
    /// Widths selected by the size presets, smallest first
    width_presets: [f64; 4],
    /// Keybinding action map for efficient lookup
    action_map: HashMap<KeyBinding, Action>,
    /// Dialog the host should open next
    pending_request: Option<HostRequest>,
    /// Receives save outcomes
    notifier: Box<dyn Notifier>,
}

impl<D: Surface> InputState<D> {
    /// Creates a new InputState around an existing session.
    ///
    /// # Arguments
    /// * `session` - Drawing session receiving the input
    /// * `action_map` - Keybinding action map
    /// * `width_presets` - Widths for the four size shortcuts
    pub fn with_defaults(
        session: DrawingSession<D>,
        action_map: HashMap<KeyBinding, Action>,
        width_presets: [f64; 4],
    ) -> Self {
        Self {
            session,
            modifiers: Modifiers::new(),
            should_exit: false,
            needs_redraw: true,
            width_presets,
            action_map,
            pending_request: None,
            notifier: Box::new(LogNotifier),
        }
    }

    /// Builds the session and keybindings described by `config`.
    ///
    /// # Errors
    /// Fails if a keybinding is invalid or duplicated, or if the export raster
    /// cannot be allocated.
    pub fn from_config(config: &Config, display: D) -> Result<Self> {
        let action_map = config
            .keybindings
            .build_action_map()
            .map_err(|e| anyhow::anyhow!("Invalid keybindings: {e}"))?;

        let session =
            DrawingSession::with_display(config.canvas_settings(), config.brush_state(), display)
                .context("Failed to create drawing surface")?
                .with_export_options(config.export_options());

        Ok(Self::with_defaults(
            session,
            action_map,
            config.drawing.width_presets,
        ))
    }

    /// Replaces the notifier used for save outcomes.
    pub fn with_notifier(mut self, notifier: Box<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn session(&self) -> &DrawingSession<D> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut DrawingSession<D> {
        &mut self.session
    }

    /// Takes the dialog request raised by the last `Save` or `ChooseColor` action.
    pub fn take_pending_request(&mut self) -> Option<HostRequest> {
        self.pending_request.take()
    }

    pub(super) fn set_pending_request(&mut self, request: HostRequest) {
        if let Some(previous) = self.pending_request.replace(request) {
            log::debug!("Replacing unanswered {:?} with {:?}", previous, request);
        }
    }

    /// Look up an action for the given key and current modifiers.
    pub(super) fn find_action(&self, key_str: &str) -> Option<Action> {
        self.action_map.iter().find_map(|(binding, action)| {
            binding
                .matches(
                    key_str,
                    self.modifiers.ctrl,
                    self.modifiers.shift,
                    self.modifiers.alt,
                )
                .then_some(*action)
        })
    }

    /// Result of the color dialog. `None` (cancelled) changes nothing.
    pub fn apply_color_choice(&mut self, choice: Option<Color>) {
        match choice {
            Some(color) => {
                self.session.set_color(color);
                self.needs_redraw = true;
            }
            None => log::debug!("Color selection cancelled"),
        }
    }

    /// Result of the save dialog. `None` (cancelled) changes nothing.
    ///
    /// Success and failure are both reported through the notifier; the
    /// session is untouched either way.
    pub fn save_to(&mut self, path: Option<&Path>) -> Result<Option<PathBuf>, ExportError> {
        let Some(path) = path else {
            log::debug!("Save cancelled");
            return Ok(None);
        };

        match self.session.export(path) {
            Ok(saved) => {
                self.notifier
                    .notify("Whiteboard saved", &saved.display().to_string());
                Ok(Some(saved))
            }
            Err(e) => {
                log::error!("Failed to save {}: {}", path.display(), e);
                self.notifier.notify("Save failed", &e.to_string());
                Err(e)
            }
        }
    }

    /// Adjusts the brush width by `delta`, clamped to the valid range.
    pub fn adjust_width(&mut self, delta: f64) {
        let width = (self.session.brush().width() + delta).clamp(MIN_BRUSH_WIDTH, MAX_BRUSH_WIDTH);
        self.set_width(width);
    }

    pub(super) fn set_width(&mut self, width: f64) {
        if self.session.set_brush_width(width) {
            self.needs_redraw = true;
        }
    }

    pub(super) fn width_preset(&self, index: usize) -> f64 {
        self.width_presets[index]
    }
}
