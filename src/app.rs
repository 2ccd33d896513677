use std::path::PathBuf;
use std::time::Instant;

use crate::command;
use crate::error::SessionError;
use crate::session::{Outcome, Session};
use crate::theme::ThemeColors;

/// Panel receiving arrow keys.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Input,
    Files,
    Info,
}

impl Focus {
    /// Next panel in Tab order.
    pub fn next(self) -> Self {
        match self {
            Focus::Input => Focus::Files,
            Focus::Files => Focus::Info,
            Focus::Info => Focus::Input,
        }
    }
}

/// Application mode.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum AppMode {
    #[default]
    Normal,
    /// A failed command, shown in a modal until dismissed.
    Error { message: String },
}

/// Text and cursor of the command line.
#[derive(Debug, Default)]
pub struct InputState {
    pub input: String,
    /// Byte offset into `input`, always on a char boundary.
    pub cursor_position: usize,
}

impl InputState {
    /// Insert a character at the current cursor position.
    pub fn insert_char(&mut self, c: char) {
        self.input.insert(self.cursor_position, c);
        self.cursor_position += c.len_utf8();
    }

    /// Delete the character before the cursor (backspace).
    pub fn delete_char(&mut self) {
        if let Some(prev) = self.input[..self.cursor_position].chars().next_back() {
            self.cursor_position -= prev.len_utf8();
            self.input.remove(self.cursor_position);
        }
    }

    /// Delete the character under the cursor.
    pub fn delete_char_forward(&mut self) {
        if self.cursor_position < self.input.len() {
            self.input.remove(self.cursor_position);
        }
    }

    pub fn move_cursor_left(&mut self) {
        if let Some(prev) = self.input[..self.cursor_position].chars().next_back() {
            self.cursor_position -= prev.len_utf8();
        }
    }

    pub fn move_cursor_right(&mut self) {
        if let Some(next) = self.input[self.cursor_position..].chars().next() {
            self.cursor_position += next.len_utf8();
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor_position = self.input.len();
    }

    /// Take the line out, leaving the input empty.
    pub fn take(&mut self) -> String {
        self.cursor_position = 0;
        std::mem::take(&mut self.input)
    }
}

/// Main application state.
pub struct App {
    pub session: Session,
    pub theme: ThemeColors,
    pub mode: AppMode,
    pub focus: Focus,
    pub input: InputState,
    /// Output of the last command; `None` shows the notes of the current NER.
    pub info: Option<String>,
    pub info_scroll: u16,
    pub files_scroll: usize,
    pub status_message: Option<(String, Instant)>,
    pub watcher_active: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(session: Session, theme: ThemeColors) -> Self {
        Self {
            session,
            theme,
            mode: AppMode::Normal,
            focus: Focus::Input,
            input: InputState::default(),
            info: None,
            info_scroll: 0,
            files_scroll: 0,
            status_message: None,
            watcher_active: false,
            should_quit: false,
        }
    }

    /// Parse and run the command line, then clear it.
    pub fn submit_command(&mut self) {
        let line = self.input.take();
        self.info = None;
        self.info_scroll = 0;

        let result = command::parse(&line)
            .map_err(SessionError::from)
            .and_then(|command| self.session.apply(&command));

        match result {
            Ok(outcome) => self.show_outcome(outcome),
            Err(e) => self.show_error(e.to_string()),
        }
        self.clamp_files_scroll();
    }

    fn show_outcome(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Nothing => {}
            Outcome::Done(message) => self.set_status_message(message),
            Outcome::Text(text) => self.info = Some(text),
            Outcome::Found { name, paths } => self.info = Some(format_matches(&name, &paths)),
            Outcome::Opened(path) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| path.display().to_string());
                self.set_status_message(format!("Opened {} in the external viewer", name));
            }
            Outcome::Exit => self.should_quit = true,
        }
    }

    /// Text of the Info panel.
    pub fn info_text(&self) -> String {
        match &self.info {
            Some(text) => text.clone(),
            None => self.session.current_note_text(),
        }
    }

    pub fn show_error(&mut self, message: String) {
        self.mode = AppMode::Error { message };
    }

    pub fn dismiss_error(&mut self) {
        self.mode = AppMode::Normal;
    }

    /// Quit without going through `exit`; notes are still saved if possible.
    pub fn force_quit(&mut self) {
        if let Err(e) = self.session.close() {
            tracing::warn!(error = %e, "notes not saved on forced quit");
        }
        self.should_quit = true;
    }

    /// The watched directory changed on disk.
    pub fn handle_fs_change(&mut self, paths: Vec<PathBuf>) {
        tracing::debug!(count = paths.len(), "directory changed on disk");
        self.session.refresh();
        self.clamp_files_scroll();
    }

    pub fn cycle_focus(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn scroll_up(&mut self) {
        match self.focus {
            Focus::Files => self.files_scroll = self.files_scroll.saturating_sub(1),
            Focus::Info => self.info_scroll = self.info_scroll.saturating_sub(1),
            Focus::Input => {}
        }
    }

    pub fn scroll_down(&mut self) {
        match self.focus {
            Focus::Files => {
                self.files_scroll += 1;
                self.clamp_files_scroll();
            }
            Focus::Info => {
                let lines = self.info_text().lines().count();
                let max = u16::try_from(lines.saturating_sub(1)).unwrap_or(u16::MAX);
                self.info_scroll = self.info_scroll.saturating_add(1).min(max);
            }
            Focus::Input => {}
        }
    }

    fn clamp_files_scroll(&mut self) {
        let max = self.session.directory().len().saturating_sub(1);
        self.files_scroll = self.files_scroll.min(max);
    }

    /// Set a status message with current timestamp.
    pub fn set_status_message(&mut self, msg: String) {
        self.status_message = Some((msg, Instant::now()));
    }

    /// Clear the status message if it has been displayed for more than 3 seconds.
    pub fn clear_expired_status(&mut self) {
        if let Some((_, ref created)) = self.status_message {
            if created.elapsed().as_secs() > 3 {
                self.status_message = None;
            }
        }
    }
}

fn format_matches(name: &str, paths: &[PathBuf]) -> String {
    let mut text = format!("File(s) matching the name '{}':", name);
    for path in paths {
        text.push('\n');
        text.push_str(&path.display().to_string());
    }
    text
}
