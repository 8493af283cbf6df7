use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};
use rust_i18n::t;

use crate::numerals::display_number;
use crate::session::learn::LearnState;
use crate::ui::theme::Theme;

/// The learning screen body: ten rows of one table and the optional pattern hint.
pub struct MultiplicationTable<'a> {
    state: &'a LearnState,
    eastern_digits: bool,
    theme: &'a Theme,
}

impl<'a> MultiplicationTable<'a> {
    pub fn new(state: &'a LearnState, eastern_digits: bool, theme: &'a Theme) -> Self {
        Self {
            state,
            eastern_digits,
            theme,
        }
    }
}

impl Widget for MultiplicationTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let num = |n: u32| display_number(n, self.eastern_digits);

        let title = t!("learn.table", table = num(self.state.table)).to_string();
        let block = Block::bordered()
            .title(format!(" {title} "))
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let pattern_height = if self.state.show_pattern { 4 } else { 0 };
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(10), Constraint::Length(pattern_height)])
            .split(inner);

        let rows: Vec<Line> = self
            .state
            .rows()
            .into_iter()
            .map(|row| {
                Line::from(vec![
                    Span::styled(
                        format!("{} × {:>2} = ", num(row.table), num(row.multiplier)),
                        Style::default().fg(colors.fg()),
                    ),
                    Span::styled(
                        format!("{:>3}", num(row.product)),
                        Style::default()
                            .fg(colors.accent())
                            .add_modifier(Modifier::BOLD),
                    ),
                ])
            })
            .collect();
        Paragraph::new(rows)
            .alignment(Alignment::Center)
            .render(layout[0], buf);

        if self.state.show_pattern {
            let pattern_key = self.state.pattern_key();
            let pattern = Paragraph::new(vec![
                Line::from(Span::styled(
                    format!("💡 {}", t!("learn.pattern_title")),
                    Style::default()
                        .fg(colors.warning())
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    t!(pattern_key.as_str()).to_string(),
                    Style::default().fg(colors.fg()),
                )),
            ])
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
            pattern.render(layout[1], buf);
        }
    }
}
