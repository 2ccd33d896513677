use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, Focus};
use crate::components::command_line::CommandLineWidget;
use crate::components::dialog::DialogWidget;
use crate::components::info::InfoWidget;
use crate::components::listing::FilesWidget;
use crate::components::status_bar::StatusBarWidget;
use crate::theme::ThemeColors;

/// Render the application UI.
pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();
    let theme = &app.theme;

    let outer = Block::default()
        .title(Span::styled(
            " Explorer ",
            Style::default()
                .fg(theme.title_fg)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_fg));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(4),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(inner);

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[1]);

    render_path(app, frame, rows[0]);

    let files = FilesWidget::new(
        app.session.directory().entries(),
        app.session.current_index(),
        theme,
    )
    .notes(app.session.directory().notes())
    .scroll(app.files_scroll)
    .block(panel_block("Files", app.focus == Focus::Files, theme));
    frame.render_widget(files, panels[0]);

    let info_text = app.info_text();
    let info = InfoWidget::new(&info_text, theme)
        .scroll(app.info_scroll)
        .block(panel_block("Info", app.focus == Focus::Info, theme));
    frame.render_widget(info, panels[1]);

    let command_line = CommandLineWidget::new(&app.input, theme)
        .show_cursor(app.focus == Focus::Input)
        .block(panel_block("Command Line", app.focus == Focus::Input, theme));
    frame.render_widget(command_line, rows[2]);

    let clipboard = app.session.clipboard().summary();
    let mut status = StatusBarWidget::new(theme).watcher_off(!app.watcher_active);
    if let Some((msg, _)) = &app.status_message {
        status = status.status_message(msg);
    }
    if let Some(info) = clipboard.as_deref() {
        status = status.clipboard_info(info);
    }
    frame.render_widget(status, rows[3]);

    frame.render_widget(DialogWidget::new(&app.mode, theme), area);
}

fn render_path(app: &App, frame: &mut Frame, area: Rect) {
    let theme = &app.theme;
    let path = app.session.path().display().to_string();
    let line = Line::from(Span::styled(path, Style::default().fg(theme.text_fg)));
    let paragraph =
        Paragraph::new(line).block(panel_block("Current Directory Path", false, theme));
    frame.render_widget(paragraph, area);
}

fn panel_block<'a>(title: &'a str, focused: bool, theme: &ThemeColors) -> Block<'a> {
    let border = if focused {
        theme.border_focused_fg
    } else {
        theme.border_fg
    };
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppMode;
    use crate::session::{Session, SessionOptions};
    use crate::theme::dark_theme;
    use ratatui::{backend::TestBackend, Terminal};
    use std::fs::File;
    use tempfile::TempDir;

    fn draw(app: &mut App) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        let buf = terminal.backend().buffer().clone();
        let mut s = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                s.push_str(buf.cell((x, y)).unwrap().symbol());
            }
            s.push('\n');
        }
        s
    }

    fn setup_app() -> (TempDir, App) {
        let dir = TempDir::new().unwrap();
        File::create(dir.path().join("report.txt")).unwrap();
        let session = Session::open(dir.path(), SessionOptions::default()).unwrap();
        (dir, App::new(session, dark_theme()))
    }

    #[test]
    fn renders_all_panels() {
        let (_dir, mut app) = setup_app();
        let screen = draw(&mut app);
        for title in ["Explorer", "Current Directory Path", "Files", "Info", "Command Line"] {
            assert!(screen.contains(title), "missing {}", title);
        }
        assert!(screen.contains("0 : report.txt"));
        assert!(screen.contains("No current NER."));
    }

    #[test]
    fn renders_error_dialog_on_top() {
        let (_dir, mut app) = setup_app();
        app.mode = AppMode::Error {
            message: "Nothing to paste.".into(),
        };
        let screen = draw(&mut app);
        assert!(screen.contains("Nothing to paste."));
        assert!(screen.contains("Dismiss"));
    }
}
