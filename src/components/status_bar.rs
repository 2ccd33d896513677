use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::ThemeColors;

const KEY_HINTS: &str = " Tab:focus  ↑↓:scroll  help  Ctrl+C:quit ";

/// One-line bar under the command line: status message or clipboard state,
/// then key hints.
pub struct StatusBarWidget<'a> {
    theme: &'a ThemeColors,
    status_message: Option<&'a str>,
    clipboard_info: Option<&'a str>,
    watcher_off: bool,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(theme: &'a ThemeColors) -> Self {
        Self {
            theme,
            status_message: None,
            clipboard_info: None,
            watcher_off: false,
        }
    }

    pub fn status_message(mut self, msg: &'a str) -> Self {
        self.status_message = Some(msg);
        self
    }

    pub fn clipboard_info(mut self, info: &'a str) -> Self {
        self.clipboard_info = Some(info);
        self
    }

    pub fn watcher_off(mut self, off: bool) -> Self {
        self.watcher_off = off;
        self
    }
}

impl<'a> Widget for StatusBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        buf.set_style(area, Style::default().bg(self.theme.status_bg));
        let width = area.width as usize;
        let mut spans = Vec::new();

        if let Some(msg) = self.status_message {
            spans.push(Span::styled(
                format!(" {}", msg),
                Style::default().fg(self.theme.success_fg),
            ));
        } else if let Some(info) = self.clipboard_info {
            spans.push(Span::styled(
                format!(" [{}]", info),
                Style::default()
                    .fg(self.theme.accent_fg)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        if self.watcher_off {
            spans.push(Span::styled(
                " [no auto-refresh]",
                Style::default().fg(self.theme.status_fg),
            ));
        }

        let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();
        let hints_len = KEY_HINTS.chars().count();
        if used + hints_len <= width {
            spans.push(Span::raw(" ".repeat(width - used - hints_len)));
            spans.push(Span::styled(
                KEY_HINTS,
                Style::default()
                    .fg(self.theme.dim_fg)
                    .add_modifier(Modifier::DIM),
            ));
        }

        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}
