use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};
use rust_i18n::t;

use crate::engine::stats::{QuizGrade, TrainingGrade};
use crate::numerals::{display_number, format_percentage};
use crate::session::scorer::SessionScore;
use crate::ui::components::progress_bar::ProgressBar;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResultKind {
    Quiz,
    Training,
}

/// End-of-session summary: score, percentage and an encouragement line.
pub struct ResultCard<'a> {
    kind: ResultKind,
    score: SessionScore,
    eastern_digits: bool,
    theme: &'a Theme,
}

impl<'a> ResultCard<'a> {
    pub fn new(kind: ResultKind, score: SessionScore, eastern_digits: bool, theme: &'a Theme) -> Self {
        Self {
            kind,
            score,
            eastern_digits,
            theme,
        }
    }

    fn grade_key(&self) -> &'static str {
        let pct = self.score.percentage();
        match self.kind {
            ResultKind::Quiz => QuizGrade::from_percentage(pct).message_key(),
            ResultKind::Training => TrainingGrade::from_percentage(pct).message_key(),
        }
    }
}

impl Widget for ResultCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let eastern = self.eastern_digits;

        let title = match self.kind {
            ResultKind::Quiz => t!("quiz.finished"),
            ResultKind::Training => t!("train.result_title"),
        };
        let block = Block::bordered()
            .title(format!(" {title} "))
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Length(2),
                Constraint::Min(0),
            ])
            .split(inner);

        let pct = self.score.percentage();
        let score_line = t!(
            "quiz.result",
            score = display_number(self.score.score, eastern),
            total = display_number(self.score.total, eastern)
        );
        Paragraph::new(Line::from(Span::styled(
            score_line.to_string(),
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .render(layout[1], buf);

        let pct_line = t!("quiz.percentage", pct = format_percentage(pct, eastern));
        Paragraph::new(Line::from(Span::styled(
            pct_line.to_string(),
            Style::default().fg(colors.fg()),
        )))
        .alignment(Alignment::Center)
        .render(layout[2], buf);

        ProgressBar::new("", self.score.ratio(), eastern, self.theme).render(layout[3], buf);

        let grade_color = if pct >= 70 {
            colors.success()
        } else if pct >= 50 {
            colors.warning()
        } else {
            colors.error()
        };
        Paragraph::new(Line::from(Span::styled(
            t!(self.grade_key()).to_string(),
            Style::default().fg(grade_color).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .render(layout[4], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_bands_differ_by_kind() {
        let theme = Theme::default();
        let score = SessionScore { score: 17, total: 20 };
        let quiz = ResultCard::new(ResultKind::Quiz, score, false, &theme);
        let training = ResultCard::new(ResultKind::Training, score, false, &theme);
        assert_eq!(quiz.grade_key(), "grade.quiz.very_good");
        assert_eq!(training.grade_key(), "grade.training.excellent");
    }
}
