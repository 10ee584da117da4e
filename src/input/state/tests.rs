use super::*;
use crate::config::{Action, Config, KeybindingsConfig};
use crate::draw::{BLACK, BLUE, Color, GREEN, RED, WHITE};
use crate::input::{Key, MouseButton};
use crate::notification::Notifier;
use crate::session::{BrushMode, BrushState, CanvasSettings, DrawingSession};
use std::cell::RefCell;
use std::rc::Rc;

/// Notifier double that keeps every (summary, body) pair.
#[derive(Clone, Default)]
struct RecordingNotifier {
    sent: Rc<RefCell<Vec<(String, String)>>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, summary: &str, body: &str) {
        self.sent
            .borrow_mut()
            .push((summary.to_string(), body.to_string()));
    }
}

fn create_test_input_state() -> InputState {
    let action_map = KeybindingsConfig::default().build_action_map().unwrap();
    let session = DrawingSession::new(
        CanvasSettings {
            width: 100,
            height: 60,
            background: WHITE,
        },
        BrushState::new(BLACK, 3.0),
    )
    .unwrap();

    InputState::with_defaults(session, action_map, [4.0, 7.0, 9.0, 12.0])
}

fn drag(state: &mut InputState, points: &[(i32, i32)]) {
    let (&(x, y), rest) = points.split_first().unwrap();
    state.on_mouse_press(MouseButton::Left, x, y);
    for &(x, y) in rest {
        state.on_mouse_motion(x, y);
    }
    let &(x, y) = points.last().unwrap();
    state.on_mouse_release(MouseButton::Left, x, y);
}

fn press_combo(state: &mut InputState, modifiers: &[Key], key: Key) {
    for &m in modifiers {
        state.on_key_press(m);
    }
    state.on_key_press(key);
    state.on_key_release(key);
    for &m in modifiers {
        state.on_key_release(m);
    }
}

#[test]
fn drag_commits_one_stroke() {
    let mut state = create_test_input_state();
    drag(&mut state, &[(10, 10), (20, 20), (30, 20)]);

    let strokes = state.session().strokes();
    assert_eq!(strokes.len(), 1);
    assert_eq!(strokes[0].len(), 2);
    assert!(!state.session().is_drawing());
}

#[test]
fn release_position_does_not_add_a_segment() {
    let mut state = create_test_input_state();
    state.on_mouse_press(MouseButton::Left, 5, 5);
    state.on_mouse_motion(15, 5);
    state.on_mouse_release(MouseButton::Left, 25, 5);

    let segments = state.session().strokes()[0].segments();
    assert_eq!(segments.len(), 1);
    assert_eq!((segments[0].x2, segments[0].y2), (15, 5));
}

#[test]
fn release_away_from_press_without_motion_commits_nothing() {
    let mut state = create_test_input_state();
    state.needs_redraw = false;
    state.on_mouse_press(MouseButton::Left, 5, 5);
    state.on_mouse_release(MouseButton::Left, 25, 5);

    assert_eq!(state.session().history_len(), 0);
    assert!(!state.session().is_drawing());
    assert!(!state.needs_redraw);
}

#[test]
fn click_without_drag_commits_nothing() {
    let mut state = create_test_input_state();
    state.on_mouse_press(MouseButton::Left, 40, 40);
    state.on_mouse_release(MouseButton::Left, 40, 40);
    assert_eq!(state.session().history_len(), 0);
}

#[test]
fn motion_without_press_is_ignored() {
    let mut state = create_test_input_state();
    state.needs_redraw = false;
    state.on_mouse_motion(10, 10);
    assert!(!state.needs_redraw);
    assert_eq!(state.session().history_len(), 0);
}

#[test]
fn right_click_finishes_active_stroke() {
    let mut state = create_test_input_state();
    state.on_mouse_press(MouseButton::Left, 0, 0);
    state.on_mouse_motion(10, 0);
    state.on_mouse_press(MouseButton::Right, 10, 0);

    assert!(!state.session().is_drawing());
    assert_eq!(state.session().history_len(), 1);
}

#[test]
fn ctrl_z_and_ctrl_y_walk_history() {
    let mut state = create_test_input_state();
    drag(&mut state, &[(0, 0), (10, 10)]);
    drag(&mut state, &[(20, 0), (30, 10)]);

    press_combo(&mut state, &[Key::Ctrl], Key::Char('z'));
    assert_eq!(state.session().history_len(), 1);
    assert_eq!(state.session().redo_len(), 1);

    press_combo(&mut state, &[Key::Ctrl], Key::Char('y'));
    assert_eq!(state.session().history_len(), 2);

    press_combo(&mut state, &[Key::Ctrl], Key::Char('z'));
    press_combo(&mut state, &[Key::Ctrl, Key::Shift], Key::Char('Z'));
    assert_eq!(state.session().history_len(), 2);
    assert_eq!(state.session().redo_len(), 0);
}

#[test]
fn plain_letter_does_not_trigger_ctrl_binding() {
    let mut state = create_test_input_state();
    drag(&mut state, &[(0, 0), (10, 10)]);

    // Plain 'z' is unbound; only Ctrl+Z undoes
    state.on_key_press(Key::Char('z'));
    assert_eq!(state.session().history_len(), 1);
}

#[test]
fn delete_clears_canvas() {
    let mut state = create_test_input_state();
    drag(&mut state, &[(0, 0), (10, 10)]);
    state.on_key_press(Key::Delete);

    assert_eq!(state.session().history_len(), 0);
    assert_eq!(state.session().redo_len(), 0);
}

#[test]
fn erase_and_brush_keys_restore_color() {
    let mut state = create_test_input_state();
    state.on_key_press(Key::Char('r'));
    assert_eq!(state.session().brush().color(), RED);

    state.on_key_press(Key::Char('e'));
    assert_eq!(state.session().brush().mode(), BrushMode::Erase);
    assert_eq!(state.session().brush().color(), WHITE);

    state.on_key_press(Key::Char('b'));
    assert_eq!(state.session().brush().mode(), BrushMode::Brush);
    assert_eq!(state.session().brush().color(), RED);
}

#[test]
fn toggle_erase_flips_mode() {
    let mut state = create_test_input_state();
    state.handle_action(Action::ToggleErase);
    assert_eq!(state.session().brush().mode(), BrushMode::Erase);
    state.handle_action(Action::ToggleErase);
    assert_eq!(state.session().brush().mode(), BrushMode::Brush);
    assert_eq!(state.session().brush().color(), BLACK);
}

#[test]
fn shift_b_selects_blue_not_brush() {
    let mut state = create_test_input_state();
    press_combo(&mut state, &[Key::Shift], Key::Char('B'));
    assert_eq!(state.session().brush().color(), BLUE);
}

#[test]
fn width_keys_step_and_clamp() {
    let mut state = create_test_input_state();
    state.on_key_press(Key::Char('+'));
    assert_eq!(state.session().brush().width(), 4.0);
    state.on_key_press(Key::Char('-'));
    state.on_key_press(Key::Char('-'));
    state.on_key_press(Key::Char('-'));
    state.on_key_press(Key::Char('-'));
    assert_eq!(state.session().brush().width(), 1.0);

    state.session_mut().set_brush_width(50.0);
    state.handle_action(Action::IncreaseWidth);
    assert_eq!(state.session().brush().width(), 50.0);
}

#[test]
fn width_presets_apply() {
    let mut state = create_test_input_state();
    let expected = [('1', 4.0), ('2', 7.0), ('3', 9.0), ('4', 12.0)];
    for (key, width) in expected {
        state.on_key_press(Key::Char(key));
        assert_eq!(state.session().brush().width(), width);
    }
}

#[test]
fn save_key_raises_dialog_request() {
    let mut state = create_test_input_state();
    press_combo(&mut state, &[Key::Ctrl], Key::Char('s'));
    assert_eq!(state.take_pending_request(), Some(HostRequest::SaveDialog));
    assert_eq!(state.take_pending_request(), None);
}

#[test]
fn dialog_request_releases_modifiers() {
    let mut state = create_test_input_state();
    state.on_key_press(Key::Ctrl);
    state.on_key_press(Key::Char('s'));
    // Release never arrives; the next plain key must not see Ctrl
    assert!(!state.modifiers.ctrl);
}

#[test]
fn color_dialog_choice_and_cancel() {
    let mut state = create_test_input_state();
    state.on_key_press(Key::Char('c'));
    assert_eq!(state.take_pending_request(), Some(HostRequest::ColorDialog));

    state.apply_color_choice(None);
    assert_eq!(state.session().brush().color(), BLACK);

    let orange = Color::from_rgb8(255, 128, 0);
    state.apply_color_choice(Some(orange));
    assert_eq!(state.session().brush().color(), orange);
}

#[test]
fn palette_keys_set_colors() {
    let mut state = create_test_input_state();
    state.on_key_press(Key::Char('g'));
    assert_eq!(state.session().brush().color(), GREEN);
    state.on_key_press(Key::Char('k'));
    assert_eq!(state.session().brush().color(), BLACK);
    state.on_key_press(Key::Char('w'));
    assert_eq!(state.session().brush().color(), WHITE);
}

#[test]
fn escape_finishes_stroke_before_exiting() {
    let mut state = create_test_input_state();
    state.on_mouse_press(MouseButton::Left, 0, 0);
    state.on_mouse_motion(10, 0);

    state.on_key_press(Key::Escape);
    assert!(!state.should_exit);
    assert_eq!(state.session().history_len(), 1);

    state.on_key_press(Key::Escape);
    assert!(state.should_exit);
}

#[test]
fn save_to_none_is_a_cancel() {
    let notifier = RecordingNotifier::default();
    let mut state = create_test_input_state().with_notifier(Box::new(notifier.clone()));

    assert_eq!(state.save_to(None).unwrap(), None);
    assert!(notifier.sent.borrow().is_empty());
}

#[test]
fn save_to_reports_success_and_failure() {
    let notifier = RecordingNotifier::default();
    let mut state = create_test_input_state().with_notifier(Box::new(notifier.clone()));
    drag(&mut state, &[(0, 0), (50, 30)]);

    let temp = tempfile::tempdir().unwrap();
    let good = temp.path().join("board.png");
    let saved = state.save_to(Some(good.as_path())).unwrap();
    assert_eq!(saved.as_deref(), Some(good.as_path()));
    assert!(good.exists());

    let bad = temp.path().join("board.gif");
    assert!(state.save_to(Some(bad.as_path())).is_err());
    assert!(!bad.exists());
    assert_eq!(state.session().history_len(), 1);

    let sent = notifier.sent.borrow();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].0, "Whiteboard saved");
    assert_eq!(sent[1].0, "Save failed");
}

#[test]
fn from_config_uses_canvas_and_brush_settings() {
    let mut config = Config::default();
    config.canvas.width = 64;
    config.canvas.height = 32;
    config.drawing.default_width = 6.0;
    config.drawing.width_presets = [2.0, 3.0, 5.0, 8.0];

    let mut state = InputState::from_config(&config, crate::draw::NullSurface).unwrap();
    assert_eq!(state.session().image().width(), 64);
    assert_eq!(state.session().image().height(), 32);
    assert_eq!(state.session().brush().width(), 6.0);

    state.on_key_press(Key::Char('4'));
    assert_eq!(state.session().brush().width(), 8.0);
}

#[test]
fn from_config_rejects_duplicate_bindings() {
    let mut config = Config::default();
    config.keybindings.undo = vec!["Ctrl+S".to_string()];

    let err = InputState::from_config(&config, crate::draw::NullSurface)
        .err()
        .unwrap();
    assert!(err.to_string().contains("Invalid keybindings"));
}
