use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, AppMode};

/// Handle a key event.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.force_quit();
        return;
    }

    if let AppMode::Error { .. } = app.mode {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            app.dismiss_error();
        }
        return;
    }

    match key.code {
        KeyCode::Enter => app.submit_command(),
        KeyCode::Tab => app.cycle_focus(),
        KeyCode::Up => app.scroll_up(),
        KeyCode::Down => app.scroll_down(),
        KeyCode::Left => app.input.move_cursor_left(),
        KeyCode::Right => app.input.move_cursor_right(),
        KeyCode::Home => app.input.cursor_home(),
        KeyCode::End => app.input.cursor_end(),
        KeyCode::Backspace => app.input.delete_char(),
        KeyCode::Delete => app.input.delete_char_forward(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.input.insert_char(c)
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Focus;
    use crate::session::{Session, SessionOptions};
    use crate::theme::dark_theme;
    use std::fs::File;
    use tempfile::TempDir;

    fn setup_app() -> (TempDir, App) {
        let dir = TempDir::new().unwrap();
        File::create(dir.path().join("a.txt")).unwrap();
        let session = Session::open(dir.path(), SessionOptions::default()).unwrap();
        (dir, App::new(session, dark_theme()))
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn typing_and_enter_runs_command() {
        let (_dir, mut app) = setup_app();
        type_str(&mut app, "0");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session.current_index(), Some(0));
    }

    #[test]
    fn error_dialog_swallows_keys_until_dismissed() {
        let (_dir, mut app) = setup_app();
        type_str(&mut app, "paste");
        press(&mut app, KeyCode::Enter);
        assert!(matches!(app.mode, AppMode::Error { .. }));

        type_str(&mut app, "x");
        assert!(app.input.input.is_empty());

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, AppMode::Normal);
    }

    #[test]
    fn tab_moves_focus() {
        let (_dir, mut app) = setup_app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Files);
    }

    #[test]
    fn backspace_edits_input() {
        let (_dir, mut app) = setup_app();
        type_str(&mut app, "helpx");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.input.input, "help");
        press(&mut app, KeyCode::Home);
        press(&mut app, KeyCode::Delete);
        assert_eq!(app.input.input, "elp");
    }

    #[test]
    fn ctrl_c_quits() {
        let (_dir, mut app) = setup_app();
        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
    }
}
