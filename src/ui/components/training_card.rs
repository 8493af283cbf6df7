use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};
use rust_i18n::t;

use crate::generator::question::QuizQuestion;
use crate::numerals::{display_number, format_percentage};
use crate::session::training::TrainingState;
use crate::ui::theme::Theme;

/// `a × b = product`, used in feedback lines.
pub fn solved_equation(question: &QuizQuestion, eastern: bool) -> String {
    let text = format!("{} × {} = {}", question.a, question.b, question.correct_answer());
    display_number(text, eastern)
}

pub struct TrainingCard<'a> {
    state: &'a TrainingState,
    eastern_digits: bool,
    theme: &'a Theme,
}

impl<'a> TrainingCard<'a> {
    pub fn new(state: &'a TrainingState, eastern_digits: bool, theme: &'a Theme) -> Self {
        Self {
            state,
            eastern_digits,
            theme,
        }
    }
}

impl Widget for TrainingCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let eastern = self.eastern_digits;

        let mode_key = format!("train.mode.{}", self.state.mode.as_str());
        let block = Block::bordered()
            .title(format!(" {} ", t!(mode_key.as_str())))
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(2),
                Constraint::Min(0),
            ])
            .split(inner);

        let score = self.state.score();
        let mut status = vec![Span::styled(
            t!(
                "train.score",
                score = display_number(score.score, eastern),
                total = display_number(score.total, eastern)
            )
            .to_string(),
            Style::default().fg(colors.success()),
        )];
        if score.total > 0 {
            status.push(Span::styled(
                format!("  ({})", format_percentage(score.percentage(), eastern)),
                Style::default().fg(colors.muted()),
            ));
        }
        if let Some(remaining) = self.state.remaining_secs() {
            status.push(Span::raw("   "));
            status.push(Span::styled(
                t!("train.time", time = display_number(remaining, eastern)).to_string(),
                Style::default()
                    .fg(colors.warning())
                    .add_modifier(Modifier::BOLD),
            ));
        }
        Paragraph::new(Line::from(status))
            .alignment(Alignment::Center)
            .render(layout[0], buf);

        if let Some(question) = self.state.current() {
            Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    display_number(question, eastern),
                    Style::default()
                        .fg(colors.accent())
                        .add_modifier(Modifier::BOLD),
                )),
            ])
            .alignment(Alignment::Center)
            .render(layout[1], buf);
        }

        let input = Paragraph::new(vec![
            Line::from(Span::styled(
                t!("train.prompt").to_string(),
                Style::default().fg(colors.muted()),
            )),
            Line::from(Span::styled(
                format!("[ {:^6} ]", self.state.input),
                Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
            )),
        ])
        .alignment(Alignment::Center);
        input.render(layout[2], buf);

        if let Some(feedback) = self.state.feedback() {
            let equation = solved_equation(&feedback.question, eastern);
            let (text, color) = if feedback.correct {
                (t!("train.correct", equation = equation), colors.success())
            } else {
                (t!("train.wrong", equation = equation), colors.error())
            };
            Paragraph::new(Line::from(Span::styled(
                text.to_string(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )))
            .alignment(Alignment::Center)
            .render(layout[3], buf);
        }
    }
}
