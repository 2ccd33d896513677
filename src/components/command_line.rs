use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Widget},
};

use crate::app::InputState;
use crate::theme::ThemeColors;

/// The "Command Line" input with a block cursor.
pub struct CommandLineWidget<'a> {
    state: &'a InputState,
    theme: &'a ThemeColors,
    show_cursor: bool,
    block: Option<Block<'a>>,
}

impl<'a> CommandLineWidget<'a> {
    pub fn new(state: &'a InputState, theme: &'a ThemeColors) -> Self {
        Self {
            state,
            theme,
            show_cursor: true,
            block: None,
        }
    }

    pub fn show_cursor(mut self, show: bool) -> Self {
        self.show_cursor = show;
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = block.into();
        self
    }
}

impl<'a> Widget for CommandLineWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = match self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.render(area, buf);
                inner
            }
            None => area,
        };

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let input = self.state.input.as_str();
        let cursor_pos = self.state.cursor_position.min(input.len());
        let before = &input[..cursor_pos];
        let mut rest = input[cursor_pos..].chars();
        let cursor_char = rest.next().map(String::from).unwrap_or_else(|| " ".into());
        let after = rest.as_str();

        // Keep the cursor visible by dropping characters from the left.
        let max_width = inner.width as usize;
        let before_chars = before.chars().count();
        let budget = max_width.saturating_sub(1);
        let before_display: String = if before_chars > budget {
            before.chars().skip(before_chars - budget).collect()
        } else {
            before.to_string()
        };

        let prompt_style = Style::default().fg(self.theme.accent_fg);
        let input_style = Style::default().fg(self.theme.text_fg);
        let cursor_style = if self.show_cursor {
            Style::default()
                .bg(self.theme.text_fg)
                .fg(self.theme.status_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            input_style
        };

        let mut spans = Vec::with_capacity(4);
        if before_chars <= budget.saturating_sub(2) {
            spans.push(Span::styled("> ", prompt_style));
        }
        spans.push(Span::styled(before_display, input_style));
        spans.push(Span::styled(cursor_char, cursor_style));
        spans.push(Span::styled(after, input_style));

        buf.set_line(inner.x, inner.y, &Line::from(spans), inner.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::dark_theme;

    fn row(buf: &Buffer, width: u16) -> String {
        (0..width)
            .map(|x| buf.cell((x, 0)).unwrap().symbol().to_string())
            .collect()
    }

    #[test]
    fn renders_prompt_and_text() {
        let theme = dark_theme();
        let state = InputState {
            input: "2 visu".into(),
            cursor_position: 6,
        };
        let area = Rect::new(0, 0, 20, 1);
        let mut buf = Buffer::empty(area);
        CommandLineWidget::new(&state, &theme).render(area, &mut buf);
        assert!(row(&buf, 20).starts_with("> 2 visu"));
        // cursor block sits after the text
        assert_eq!(buf.cell((8, 0)).unwrap().bg, theme.text_fg);
    }

    #[test]
    fn cursor_in_the_middle() {
        let theme = dark_theme();
        let state = InputState {
            input: "copy".into(),
            cursor_position: 1,
        };
        let area = Rect::new(0, 0, 20, 1);
        let mut buf = Buffer::empty(area);
        CommandLineWidget::new(&state, &theme).render(area, &mut buf);
        assert_eq!(buf.cell((3, 0)).unwrap().symbol(), "o");
        assert_eq!(buf.cell((3, 0)).unwrap().bg, theme.text_fg);
    }

    #[test]
    fn long_input_keeps_cursor_visible() {
        let theme = dark_theme();
        let state = InputState {
            input: "find a-very-long-file-name.txt".into(),
            cursor_position: 30,
        };
        let area = Rect::new(0, 0, 10, 1);
        let mut buf = Buffer::empty(area);
        CommandLineWidget::new(&state, &theme).render(area, &mut buf);
        assert!(row(&buf, 10).starts_with("-name.txt"));
        assert_eq!(buf.cell((9, 0)).unwrap().bg, theme.text_fg);
    }
}
