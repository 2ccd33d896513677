use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Widget},
};

use crate::fs::directory::Entry;
use crate::fs::notes::NoteStore;
use crate::theme::ThemeColors;

/// The "Files" panel: one `i : name` row per entry of the snapshot.
pub struct FilesWidget<'a> {
    entries: &'a [Entry],
    current: Option<usize>,
    notes: Option<&'a NoteStore>,
    scroll: usize,
    theme: &'a ThemeColors,
    block: Option<Block<'a>>,
}

impl<'a> FilesWidget<'a> {
    pub fn new(entries: &'a [Entry], current: Option<usize>, theme: &'a ThemeColors) -> Self {
        Self {
            entries,
            current,
            notes: None,
            scroll: 0,
            theme,
            block: None,
        }
    }

    /// Mark entries that carry notes.
    pub fn notes(mut self, notes: &'a NoteStore) -> Self {
        self.notes = Some(notes);
        self
    }

    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = block.into();
        self
    }
}

impl<'a> Widget for FilesWidget<'a> {
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

        if self.entries.is_empty() {
            let line = Line::from(Span::styled(
                "No file in this directory.",
                Style::default().fg(self.theme.dim_fg),
            ));
            buf.set_line(inner.x, inner.y, &line, inner.width);
            return;
        }

        let index_width = self.entries.len().saturating_sub(1).to_string().len();
        let rows = self
            .entries
            .iter()
            .enumerate()
            .skip(self.scroll)
            .take(inner.height as usize);

        for (row, (index, entry)) in rows.enumerate() {
            let is_current = self.current == Some(index);
            let name_fg = if entry.is_dir {
                self.theme.list_dir_fg
            } else {
                self.theme.list_fg
            };

            let mut index_style = Style::default().fg(self.theme.list_index_fg);
            let mut name_style = Style::default().fg(name_fg);
            if entry.is_dir {
                name_style = name_style.add_modifier(Modifier::BOLD);
            }
            if is_current {
                index_style = index_style.bg(self.theme.list_selected_bg);
                name_style = name_style
                    .fg(self.theme.list_selected_fg)
                    .bg(self.theme.list_selected_bg)
                    .add_modifier(Modifier::BOLD);
            }

            let mut name = entry.name.clone();
            if entry.is_dir {
                name.push('/');
            }

            let mut spans = vec![
                Span::styled(format!("{:>width$} : ", index, width = index_width), index_style),
                Span::styled(name, name_style),
            ];
            if self.notes.is_some_and(|notes| notes.has_note(&entry.name)) {
                spans.push(Span::styled(" *", Style::default().fg(self.theme.accent_fg)));
            }
            let line = Line::from(spans);
            let y = inner.y + row as u16;
            if is_current {
                buf.set_style(
                    Rect::new(inner.x, y, inner.width, 1),
                    Style::default().bg(self.theme.list_selected_bg),
                );
            }
            buf.set_line(inner.x, y, &line, inner.width);
        }
    }
}
