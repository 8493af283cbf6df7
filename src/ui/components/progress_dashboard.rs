use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};
use rust_i18n::t;

use crate::engine::achievements::{compute_achievements, upcoming_achievements};
use crate::engine::stats::{HistoryBadge, compute_stats};
use crate::numerals::{display_number, format_percentage};
use crate::session::difficulty::Difficulty;
use crate::session::result::QuizResult;
use crate::ui::layout::split_panes;
use crate::ui::theme::Theme;

const RECENT_LIMIT: usize = 5;

/// The five most recent results, newest first.
pub fn recent_results(history: &[QuizResult]) -> Vec<&QuizResult> {
    history.iter().rev().take(RECENT_LIMIT).collect()
}

pub struct ProgressDashboard<'a> {
    history: &'a [QuizResult],
    eastern_digits: bool,
    theme: &'a Theme,
}

impl<'a> ProgressDashboard<'a> {
    pub fn new(history: &'a [QuizResult], eastern_digits: bool, theme: &'a Theme) -> Self {
        Self {
            history,
            eastern_digits,
            theme,
        }
    }

    fn heading(&self, key: &str) -> Line<'static> {
        Line::from(Span::styled(
            t!(key).to_string(),
            Style::default()
                .fg(self.theme.colors.accent())
                .add_modifier(Modifier::BOLD),
        ))
    }

    fn stats_lines(&self) -> Vec<Line<'static>> {
        let colors = &self.theme.colors;
        let eastern = self.eastern_digits;
        let stats = compute_stats(self.history);

        let row = |key: &str, value: String| {
            Line::from(vec![
                Span::styled(format!("  {}: ", t!(key)), Style::default().fg(colors.fg())),
                Span::styled(
                    value,
                    Style::default()
                        .fg(colors.accent())
                        .add_modifier(Modifier::BOLD),
                ),
            ])
        };

        vec![
            self.heading("progress.stats"),
            row("progress.total", display_number(stats.count, eastern)),
            row("progress.average", format_percentage(stats.average_pct, eastern)),
            row("progress.best", format_percentage(stats.best_pct, eastern)),
        ]
    }

    fn recent_lines(&self) -> Vec<Line<'static>> {
        let colors = &self.theme.colors;
        let eastern = self.eastern_digits;
        let mut lines = vec![self.heading("progress.recent")];

        for result in recent_results(self.history) {
            let badge = HistoryBadge::for_result(result);
            let date = display_number(result.timestamp.format("%Y-%m-%d"), eastern);
            let difficulty = match Difficulty::from_label(&result.difficulty) {
                Some(d) => {
                    let key = format!("quiz.difficulty.{}", d.as_str());
                    t!(key.as_str()).to_string()
                }
                None => result.difficulty.clone(),
            };
            let score = format!(
                "{}/{}",
                display_number(result.score, eastern),
                display_number(result.total, eastern)
            );
            lines.push(Line::from(vec![
                Span::raw(format!("  {} ", badge.icon())),
                Span::styled(
                    format!("{score:<7}"),
                    Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(" {:>5} ", format_percentage(result.percentage(), eastern)),
                    Style::default().fg(colors.accent()),
                ),
                Span::styled(format!(" {difficulty}  {date}"), Style::default().fg(colors.muted())),
            ]));
        }
        lines
    }

    fn achievement_lines(&self) -> Vec<Line<'static>> {
        let colors = &self.theme.colors;
        let earned = compute_achievements(self.history);
        let mut lines = vec![self.heading("progress.achievements")];

        if earned.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("  {}", t!("progress.no_achievements")),
                Style::default().fg(colors.muted()),
            )));
        }
        for achievement in &earned {
            let title_key = achievement.title_key();
            let description_key = achievement.description_key();
            lines.push(Line::from(vec![
                Span::raw(format!("  {} ", achievement.icon())),
                Span::styled(
                    t!(title_key.as_str()).to_string(),
                    Style::default()
                        .fg(colors.success())
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {}", t!(description_key.as_str())),
                    Style::default().fg(colors.fg()),
                ),
            ]));
        }

        let upcoming = upcoming_achievements(&earned);
        if !upcoming.is_empty() {
            lines.push(Line::from(""));
            lines.push(self.heading("progress.upcoming"));
            for achievement in upcoming {
                let title_key = achievement.title_key();
                let hint_key = achievement.hint_key();
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("  {} {}", achievement.icon(), t!(title_key.as_str())),
                        Style::default().fg(colors.muted()),
                    ),
                    Span::styled(
                        format!("  {}", t!(hint_key.as_str())),
                        Style::default().fg(colors.muted()),
                    ),
                ]));
            }
        }
        lines
    }
}

impl Widget for ProgressDashboard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let eastern = self.eastern_digits;

        let block = Block::bordered()
            .title(format!(" {} ", t!("progress.title")))
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.history.is_empty() {
            let lines = vec![
                Line::from(""),
                Line::from(Span::styled(
                    t!("progress.empty").to_string(),
                    Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    t!("progress.empty_hint").to_string(),
                    Style::default().fg(colors.muted()),
                )),
                Line::from(""),
            ];
            let mut all = lines;
            all.extend(self.achievement_lines());
            Paragraph::new(all)
                .wrap(Wrap { trim: false })
                .render(inner, buf);
            return;
        }

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(8), Constraint::Length(2)])
            .split(inner);
        let (left, right) = split_panes(rows[0], 50);

        let mut left_lines = self.stats_lines();
        left_lines.push(Line::from(""));
        left_lines.extend(self.recent_lines());
        Paragraph::new(left_lines).render(left, buf);

        Paragraph::new(self.achievement_lines())
            .wrap(Wrap { trim: false })
            .render(right, buf);

        let motivation = vec![
            Line::from(Span::styled(
                t!("progress.motivation").to_string(),
                Style::default()
                    .fg(colors.warning())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                t!("progress.completed", count = display_number(self.history.len(), eastern))
                    .to_string(),
                Style::default().fg(colors.fg()),
            )),
        ];
        Paragraph::new(motivation).render(rows[1], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recent_results_newest_first_and_capped() {
        let history: Vec<QuizResult> = (0..8)
            .map(|i| QuizResult::new(i, 10, "easy", vec![2]))
            .collect();
        let recent = recent_results(&history);
        assert_eq!(recent.len(), 5);
        let scores: Vec<u32> = recent.iter().map(|r| r.score).collect();
        assert_eq!(scores, vec![7, 6, 5, 4, 3]);
    }

    fn rendered_text(buf: &Buffer) -> String {
        buf.content.iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_renders_history_with_achievement_lines() {
        let theme = Theme::default();
        let history = vec![
            QuizResult::new(9, 10, "medium", vec![3]),
            QuizResult::new(10, 10, "easy", vec![]),
        ];
        let area = Rect::new(0, 0, 120, 30);
        let mut buf = Buffer::empty(area);
        ProgressDashboard::new(&history, false, &theme).render(area, &mut buf);

        let text = rendered_text(&buf);
        assert!(text.contains("10/10"));
        assert!(text.contains("9/10"));
        assert!(text.contains("95%"));
    }

    #[test]
    fn test_renders_empty_history_with_upcoming_milestones() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        ProgressDashboard::new(&[], true, &theme).render(area, &mut buf);

        let text = rendered_text(&buf);
        assert!(text.contains(crate::engine::achievements::Achievement::FirstQuiz.icon()));
    }

    #[test]
    fn test_recent_results_short_history() {
        let history = vec![QuizResult::new(3, 10, "hard", vec![])];
        assert_eq!(recent_results(&history).len(), 1);
        assert!(recent_results(&[]).is_empty());
    }
}
