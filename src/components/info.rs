use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Paragraph, Widget, Wrap},
};

use crate::theme::ThemeColors;

/// The "Info" panel: command output, or the notes of the current NER.
///
/// The first line is drawn as a heading.
pub struct InfoWidget<'a> {
    text: &'a str,
    scroll: u16,
    theme: &'a ThemeColors,
    block: Option<Block<'a>>,
}

impl<'a> InfoWidget<'a> {
    pub fn new(text: &'a str, theme: &'a ThemeColors) -> Self {
        Self {
            text,
            scroll: 0,
            theme,
            block: None,
        }
    }

    pub fn scroll(mut self, scroll: u16) -> Self {
        self.scroll = scroll;
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = block.into();
        self
    }
}

impl<'a> Widget for InfoWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let heading = Style::default()
            .fg(self.theme.title_fg)
            .add_modifier(Modifier::BOLD);
        let body = Style::default().fg(self.theme.text_fg);

        let lines: Vec<Line> = self
            .text
            .lines()
            .enumerate()
            .map(|(i, line)| Line::from(Span::styled(line, if i == 0 { heading } else { body })))
            .collect();

        let mut paragraph = Paragraph::new(Text::from(lines))
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0));
        if let Some(block) = self.block {
            paragraph = paragraph.block(block);
        }
        paragraph.render(area, buf);
    }
}
