use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph, Widget, Wrap},
};

use crate::app::AppMode;
use crate::theme::ThemeColors;

/// Modal overlay for a failed command.
pub struct DialogWidget<'a> {
    mode: &'a AppMode,
    theme: &'a ThemeColors,
}

impl<'a> DialogWidget<'a> {
    pub fn new(mode: &'a AppMode, theme: &'a ThemeColors) -> Self {
        Self { mode, theme }
    }

    /// Calculate a centered rectangle within the given area.
    fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
        let x = area.x + area.width.saturating_sub(width) / 2;
        let y = area.y + area.height.saturating_sub(height) / 2;
        let w = width.min(area.width);
        let h = height.min(area.height);
        Rect::new(x, y, w, h)
    }
}

impl<'a> Widget for DialogWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if let AppMode::Error { message } = self.mode {
            render_error_dialog(message, self.theme, area, buf);
        }
    }
}

fn render_error_dialog(message: &str, theme: &ThemeColors, area: Rect, buf: &mut Buffer) {
    let longest = message.lines().map(|l| l.chars().count()).max().unwrap_or(0);
    let dialog_width = (longest as u16).saturating_add(6).clamp(30, 70);
    let dialog_width = dialog_width.min(area.width.saturating_sub(4));

    // Borders, hint row and a blank separator, plus the wrapped message.
    let text_width = dialog_width.saturating_sub(4).max(1) as usize;
    let message_rows: usize = message
        .lines()
        .map(|l| l.chars().count().max(1).div_ceil(text_width))
        .sum::<usize>()
        .max(1);
    let dialog_height = (message_rows as u16 + 4).min(area.height.saturating_sub(2));
    let rect = DialogWidget::centered_rect(dialog_width, dialog_height, area);

    Clear.render(rect, buf);

    let block = Block::default()
        .title(" Error ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.dialog_border_fg))
        .style(Style::default().bg(theme.dialog_bg))
        .padding(Padding::horizontal(1));

    let inner = block.inner(rect);
    block.render(rect, buf);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let message_area = Rect::new(inner.x, inner.y, inner.width, inner.height.saturating_sub(1));
    Paragraph::new(message)
        .style(Style::default().fg(theme.error_fg))
        .wrap(Wrap { trim: false })
        .render(message_area, buf);

    let hint = "[Enter/Esc] Dismiss";
    let hint_style = Style::default()
        .fg(theme.dim_fg)
        .add_modifier(Modifier::DIM);
    let hint_line = Line::from(Span::styled(hint, hint_style));
    if inner.height > 1 {
        buf.set_line(inner.x, inner.y + inner.height - 1, &hint_line, inner.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::dark_theme;

    #[test]
    fn test_error_dialog_renders() {
        let mode = AppMode::Error {
            message: "Invalid NER.".to_string(),
        };
        let theme = dark_theme();
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        DialogWidget::new(&mode, &theme).render(area, &mut buf);

        let content = buffer_to_string(&buf, area);
        assert!(content.contains("Error"));
        assert!(content.contains("Invalid NER."));
        assert!(content.contains("Dismiss"));
    }

    #[test]
    fn test_long_message_wraps() {
        let message = "Could not save the notes: Permission denied (os error 13) while writing /very/long/path/notes".to_string();
        let mode = AppMode::Error { message };
        let theme = dark_theme();
        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        DialogWidget::new(&mode, &theme).render(area, &mut buf);

        let content = buffer_to_string(&buf, area);
        assert!(content.contains("Could not save the notes"));
        assert!(content.contains("notes"));
    }

    #[test]
    fn test_no_dialog_mode_noop() {
        let mode = AppMode::Normal;
        let theme = dark_theme();
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        DialogWidget::new(&mode, &theme).render(area, &mut buf);

        let content = buffer_to_string(&buf, area);
        assert!(content.trim().is_empty());
    }

    fn buffer_to_string(buf: &Buffer, area: Rect) -> String {
        let mut s = String::new();
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                s.push_str(buf.cell((x, y)).unwrap().symbol());
            }
            s.push('\n');
        }
        s
    }
}
