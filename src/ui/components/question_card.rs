use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};
use rust_i18n::t;

use crate::generator::question::{Answer, QuestionKind};
use crate::numerals::{display_number, format_time};
use crate::session::quiz::QuizState;
use crate::ui::components::progress_bar::ProgressBar;
use crate::ui::theme::Theme;

/// Seconds left at which the quiz clock turns to the warning colour.
const LOW_TIME_SECS: u32 = 30;

/// The running quiz: position, clock, score, the equation and its options.
pub struct QuestionCard<'a> {
    quiz: &'a QuizState,
    eastern_digits: bool,
    theme: &'a Theme,
}

impl<'a> QuestionCard<'a> {
    pub fn new(quiz: &'a QuizState, eastern_digits: bool, theme: &'a Theme) -> Self {
        Self {
            quiz,
            eastern_digits,
            theme,
        }
    }

    fn option_lines(&self) -> Vec<(String, Answer)> {
        let eastern = self.eastern_digits;
        match self.quiz.current().map(|q| &q.kind) {
            Some(QuestionKind::MultipleChoice { choices }) => choices
                .iter()
                .enumerate()
                .map(|(i, &c)| {
                    (
                        format!(
                            "[{}]  {}",
                            display_number(i + 1, eastern),
                            display_number(c, eastern)
                        ),
                        Answer::Number(c as i64),
                    )
                })
                .collect(),
            Some(QuestionKind::TrueFalse { .. }) => vec![
                (
                    format!("[{}]  {}", display_number(1, eastern), t!("quiz.answer_true")),
                    Answer::Judgment(true),
                ),
                (
                    format!("[{}]  {}", display_number(2, eastern), t!("quiz.answer_false")),
                    Answer::Judgment(false),
                ),
            ],
            _ => Vec::new(),
        }
    }
}

impl Widget for QuestionCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let eastern = self.eastern_digits;

        let block = Block::bordered()
            .title(format!(" {} ", t!("quiz.title")))
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(4),
            ])
            .split(inner);

        let remaining = self.quiz.remaining_secs();
        let clock_color = if remaining <= LOW_TIME_SECS {
            colors.warning()
        } else {
            colors.fg()
        };
        let position = t!(
            "quiz.question_of",
            n = display_number(self.quiz.position() + 1, eastern),
            total = display_number(self.quiz.len(), eastern)
        );
        let score = t!("quiz.score", score = display_number(self.quiz.score().score, eastern));
        let status = Line::from(vec![
            Span::styled(position.to_string(), Style::default().fg(colors.fg())),
            Span::raw("   "),
            Span::styled(
                format!("⏰ {}", format_time(remaining, eastern)),
                Style::default().fg(clock_color).add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
            Span::styled(score.to_string(), Style::default().fg(colors.success())),
        ]);
        Paragraph::new(status)
            .alignment(Alignment::Center)
            .render(layout[0], buf);

        ProgressBar::new("", self.quiz.progress(), eastern, self.theme).render(layout[1], buf);

        let Some(question) = self.quiz.current() else {
            return;
        };

        if matches!(question.kind, QuestionKind::TrueFalse { .. }) {
            Paragraph::new(Line::from(Span::styled(
                t!("quiz.tf_prompt").to_string(),
                Style::default().fg(colors.muted()),
            )))
            .alignment(Alignment::Center)
            .render(layout[2], buf);
        }

        let equation = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                display_number(question, eastern),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
        ])
        .alignment(Alignment::Center);
        equation.render(layout[3], buf);

        let selected = self.quiz.selected();
        let options: Vec<Line> = self
            .option_lines()
            .into_iter()
            .map(|(label, answer)| {
                let style = if selected == Some(answer) {
                    Style::default()
                        .fg(colors.bg())
                        .bg(colors.selected())
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(colors.fg())
                };
                Line::from(Span::styled(format!("  {label}  "), style))
            })
            .collect();
        Paragraph::new(options)
            .alignment(Alignment::Center)
            .render(layout[4], buf);
    }
}
