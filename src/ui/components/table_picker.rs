use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};
use rust_i18n::t;

use crate::generator::tables::{MAX_TABLE, MIN_TABLE, TableSet};
use crate::numerals::display_number;
use crate::ui::theme::Theme;

/// Row of table toggles plus a summary of the current selection.
pub struct TablePicker<'a> {
    tables: &'a TableSet,
    eastern_digits: bool,
    theme: &'a Theme,
}

impl<'a> TablePicker<'a> {
    pub fn new(tables: &'a TableSet, eastern_digits: bool, theme: &'a Theme) -> Self {
        Self {
            tables,
            eastern_digits,
            theme,
        }
    }
}

impl Widget for TablePicker<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", t!("tables.title")))
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut spans: Vec<Span> = Vec::new();
        for table in MIN_TABLE..=MAX_TABLE {
            let label = format!(" {:>2} ", display_number(table, self.eastern_digits));
            let style = if self.tables.contains(table) {
                Style::default()
                    .fg(colors.bg())
                    .bg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg()).bg(colors.accent_dim())
            };
            spans.push(Span::styled(label, style));
            spans.push(Span::raw(" "));
        }

        let summary = if self.tables.is_all() {
            t!("tables.all").to_string()
        } else {
            let count = display_number(self.tables.selected_count(), self.eastern_digits);
            t!("tables.some", count = count).to_string()
        };

        let lines = vec![
            Line::from(spans),
            Line::from(""),
            Line::from(Span::styled(summary, Style::default().fg(colors.fg()))),
            Line::from(Span::styled(
                t!("tables.hint").to_string(),
                Style::default().fg(colors.muted()),
            )),
        ];
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}
