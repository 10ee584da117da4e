//! Recorded input scripts for headless replay.
//!
//! A script is a JSON array of events, each tagged by `"event"`:
//!
//! ```json
//! [
//!   { "event": "pointer_down", "x": 10, "y": 10 },
//!   { "event": "pointer_move", "x": 20, "y": 20 },
//!   { "event": "pointer_up" },
//!   { "event": "key", "binding": "Ctrl+Z" },
//!   { "event": "command", "action": "redo" },
//!   { "event": "set_color", "color": "red" },
//!   { "event": "set_width", "width": 7.0 },
//!   { "event": "set_mode", "mode": "erase" },
//!   { "event": "save", "path": "board.png" }
//! ]
//! ```
//!
//! Events go through [`InputState`] exactly as live host input would, so a
//! script exercises keybindings, dialogs and the session together.

use crate::config::{Action, ColorSpec, KeyBinding};
use crate::draw::{Point, Surface};
use crate::input::{HostRequest, InputState, Key, MouseButton};
use crate::session::BrushMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// One recorded input event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScriptEvent {
    PointerDown {
        x: i32,
        y: i32,
    },
    PointerMove {
        x: i32,
        y: i32,
    },
    /// Release; without coordinates the pointer is released where it last was.
    PointerUp {
        #[serde(default)]
        x: Option<i32>,
        #[serde(default)]
        y: Option<i32>,
    },
    /// Key press with modifiers, written like a keybinding (`"Ctrl+Z"`).
    Key {
        binding: String,
    },
    /// Action invoked directly, as from a menu.
    Command {
        action: Action,
    },
    /// Color dialog result; a missing color is a cancelled dialog.
    SetColor {
        #[serde(default)]
        color: Option<ColorSpec>,
    },
    SetWidth {
        width: f64,
    },
    SetMode {
        mode: BrushMode,
    },
    /// Save; without a path this behaves like a save dialog.
    Save {
        #[serde(default)]
        path: Option<PathBuf>,
    },
}

/// Errors raised while loading or replaying a script.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Failed to read script {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid script: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid key binding in script: {0}")]
    Binding(String),

    #[error("Unknown color in script: {0}")]
    UnknownColor(String),
}

/// Outcome of a replay.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ReplayReport {
    /// Events processed (replay stops early on exit)
    pub events: usize,
    /// Files written by save events and save dialogs
    pub saved: Vec<PathBuf>,
    /// Saves that failed; failures are reported but do not stop the replay
    pub failed_saves: usize,
}

pub fn parse_script(text: &str) -> Result<Vec<ScriptEvent>, ScriptError> {
    Ok(serde_json::from_str(text)?)
}

pub fn load_script(path: &Path) -> Result<Vec<ScriptEvent>, ScriptError> {
    let text = fs::read_to_string(path).map_err(|source| ScriptError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let events = parse_script(&text)?;
    log::info!("Loaded {} event(s) from {}", events.len(), path.display());
    Ok(events)
}

/// Feeds `events` through `input`.
///
/// `dialog_path` answers save dialogs (a `save` event without a path, or the
/// save keybinding); `None` cancels them. Color dialogs are always cancelled.
pub fn replay<D: Surface>(
    input: &mut InputState<D>,
    events: &[ScriptEvent],
    dialog_path: Option<&Path>,
) -> Result<ReplayReport, ScriptError> {
    let mut report = ReplayReport::default();

    for event in events {
        log::trace!("Replaying {:?}", event);
        report.events += 1;

        match event {
            ScriptEvent::PointerDown { x, y } => {
                input.on_mouse_press(MouseButton::Left, *x, *y);
            }
            ScriptEvent::PointerMove { x, y } => input.on_mouse_motion(*x, *y),
            ScriptEvent::PointerUp { x, y } => {
                let release = x
                    .zip(*y)
                    .map(Point::from)
                    .or_else(|| input.session().last_point());
                if let Some(point) = release {
                    input.on_mouse_release(MouseButton::Left, point.x, point.y);
                }
            }
            ScriptEvent::Key { binding } => press_binding(input, binding)?,
            ScriptEvent::Command { action } => input.handle_action(*action),
            ScriptEvent::SetColor { color } => {
                let color = match color {
                    Some(spec) => Some(
                        spec.try_to_color()
                            .ok_or_else(|| ScriptError::UnknownColor(format!("{spec:?}")))?,
                    ),
                    None => None,
                };
                input.apply_color_choice(color);
            }
            ScriptEvent::SetWidth { width } => {
                input.session_mut().set_brush_width(*width);
            }
            ScriptEvent::SetMode { mode } => input.session_mut().set_mode(*mode),
            ScriptEvent::Save { path } => {
                record_save(input, path.as_deref().or(dialog_path), &mut report);
            }
        }

        while let Some(request) = input.take_pending_request() {
            match request {
                HostRequest::SaveDialog => record_save(input, dialog_path, &mut report),
                HostRequest::ColorDialog => {
                    log::debug!("No color dialog during replay; treating as cancelled");
                    input.apply_color_choice(None);
                }
            }
        }

        if input.should_exit {
            log::info!("Exit requested after {} event(s)", report.events);
            break;
        }
    }

    Ok(report)
}

fn press_binding<D: Surface>(input: &mut InputState<D>, binding: &str) -> Result<(), ScriptError> {
    let parsed = KeyBinding::parse(binding).map_err(ScriptError::Binding)?;
    let key = Key::from_name(&parsed.key);
    if key == Key::Unknown {
        return Err(ScriptError::Binding(format!("unknown key '{}'", parsed.key)));
    }

    let modifiers: Vec<Key> = [
        (parsed.ctrl, Key::Ctrl),
        (parsed.shift, Key::Shift),
        (parsed.alt, Key::Alt),
    ]
    .into_iter()
    .filter_map(|(held, key)| held.then_some(key))
    .collect();

    for &modifier in &modifiers {
        input.on_key_press(modifier);
    }
    input.on_key_press(key);
    input.on_key_release(key);
    for &modifier in modifiers.iter().rev() {
        input.on_key_release(modifier);
    }
    Ok(())
}

fn record_save<D: Surface>(
    input: &mut InputState<D>,
    path: Option<&Path>,
    report: &mut ReplayReport,
) {
    match input.save_to(path) {
        Ok(Some(saved)) => report.saved.push(saved),
        Ok(None) => {}
        Err(_) => report.failed_saves += 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::draw::{NullSurface, RED};

    fn small_input() -> InputState {
        let mut config = Config::default();
        config.canvas.width = 80;
        config.canvas.height = 60;
        InputState::from_config(&config, NullSurface).unwrap()
    }

    #[test]
    fn parses_every_event_kind() {
        let events = parse_script(
            r#"[
                {"event": "pointer_down", "x": 1, "y": 2},
                {"event": "pointer_move", "x": 3, "y": 4},
                {"event": "pointer_up"},
                {"event": "pointer_up", "x": 5, "y": 6},
                {"event": "key", "binding": "Ctrl+Z"},
                {"event": "command", "action": "clear_canvas"},
                {"event": "set_color", "color": [255, 0, 0]},
                {"event": "set_color"},
                {"event": "set_width", "width": 9.0},
                {"event": "set_mode", "mode": "erase"},
                {"event": "save", "path": "out.png"},
                {"event": "save"}
            ]"#,
        )
        .unwrap();

        assert_eq!(events.len(), 12);
        assert_eq!(events[2], ScriptEvent::PointerUp { x: None, y: None });
        assert_eq!(
            events[5],
            ScriptEvent::Command {
                action: Action::ClearCanvas
            }
        );
        assert_eq!(
            events[9],
            ScriptEvent::SetMode {
                mode: BrushMode::Erase
            }
        );
        assert_eq!(events[11], ScriptEvent::Save { path: None });
    }

    #[test]
    fn unknown_event_is_a_parse_error() {
        let err = parse_script(r#"[{"event": "teleport"}]"#).unwrap_err();
        assert!(matches!(err, ScriptError::Parse(_)));
    }

    #[test]
    fn load_script_reports_missing_file() {
        let err = load_script(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ScriptError::Io { .. }));
    }

    #[test]
    fn replay_draws_and_undoes() {
        let mut input = small_input();
        let events = parse_script(
            r#"[
                {"event": "pointer_down", "x": 10, "y": 10},
                {"event": "pointer_move", "x": 20, "y": 20},
                {"event": "pointer_up"},
                {"event": "pointer_down", "x": 30, "y": 10},
                {"event": "pointer_move", "x": 40, "y": 10},
                {"event": "pointer_up", "x": 40, "y": 10},
                {"event": "key", "binding": "Ctrl+Z"}
            ]"#,
        )
        .unwrap();

        let report = replay(&mut input, &events, None).unwrap();
        assert_eq!(report.events, 7);
        assert_eq!(input.session().history_len(), 1);
        assert_eq!(input.session().redo_len(), 1);
    }

    #[test]
    fn set_color_event_applies_and_rejects_unknown() {
        let mut input = small_input();
        let ok = parse_script(r#"[{"event": "set_color", "color": "red"}]"#).unwrap();
        replay(&mut input, &ok, None).unwrap();
        assert_eq!(input.session().brush().color(), RED);

        let bad = parse_script(r#"[{"event": "set_color", "color": "mauve"}]"#).unwrap();
        let err = replay(&mut input, &bad, None).unwrap_err();
        assert!(matches!(err, ScriptError::UnknownColor(_)));
    }

    #[test]
    fn invalid_binding_is_reported() {
        let mut input = small_input();
        let events = parse_script(r#"[{"event": "key", "binding": "Ctrl+F13"}]"#).unwrap();
        let err = replay(&mut input, &events, None).unwrap_err();
        assert!(matches!(err, ScriptError::Binding(_)));
    }

    #[test]
    fn save_dialog_uses_dialog_path_or_cancels() {
        let temp = tempfile::tempdir().unwrap();
        let target = temp.path().join("dialog.png");
        let events = parse_script(r#"[{"event": "key", "binding": "Ctrl+S"}]"#).unwrap();

        let mut input = small_input();
        let cancelled = replay(&mut input, &events, None).unwrap();
        assert!(cancelled.saved.is_empty());
        assert_eq!(cancelled.failed_saves, 0);

        let report = replay(&mut input, &events, Some(target.as_path())).unwrap();
        assert_eq!(report.saved, vec![target.clone()]);
        assert!(target.exists());
    }

    #[test]
    fn failed_save_is_counted_and_replay_continues() {
        let temp = tempfile::tempdir().unwrap();
        let bad = temp.path().join("board.bmp");
        let script = format!(
            r#"[
                {{"event": "save", "path": {bad:?}}},
                {{"event": "pointer_down", "x": 1, "y": 1}},
                {{"event": "pointer_move", "x": 9, "y": 9}},
                {{"event": "pointer_up", "x": 9, "y": 9}}
            ]"#
        );
        let events = parse_script(&script).unwrap();

        let mut input = small_input();
        let report = replay(&mut input, &events, None).unwrap();
        assert_eq!(report.failed_saves, 1);
        assert_eq!(report.events, 4);
        assert_eq!(input.session().history_len(), 1);
    }

    #[test]
    fn exit_stops_replay() {
        let events = parse_script(
            r#"[
                {"event": "command", "action": "exit"},
                {"event": "pointer_down", "x": 1, "y": 1},
                {"event": "pointer_up", "x": 9, "y": 9}
            ]"#,
        )
        .unwrap();

        let mut input = small_input();
        let report = replay(&mut input, &events, None).unwrap();
        assert_eq!(report.events, 1);
        assert_eq!(input.session().history_len(), 0);
    }
}
