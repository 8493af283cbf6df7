use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};
use rust_i18n::t;

use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Learn,
    Train,
    Quiz,
    Progress,
    Settings,
}

pub struct MenuItem {
    pub key: &'static str,
    pub action: MenuAction,
    label_key: &'static str,
    description_key: &'static str,
}

const ITEMS: [MenuItem; 5] = [
    MenuItem {
        key: "1",
        action: MenuAction::Learn,
        label_key: "menu.learn",
        description_key: "menu.learn_desc",
    },
    MenuItem {
        key: "2",
        action: MenuAction::Train,
        label_key: "menu.train",
        description_key: "menu.train_desc",
    },
    MenuItem {
        key: "3",
        action: MenuAction::Quiz,
        label_key: "menu.quiz",
        description_key: "menu.quiz_desc",
    },
    MenuItem {
        key: "4",
        action: MenuAction::Progress,
        label_key: "menu.progress",
        description_key: "menu.progress_desc",
    },
    MenuItem {
        key: "c",
        action: MenuAction::Settings,
        label_key: "menu.settings",
        description_key: "menu.settings_desc",
    },
];

#[derive(Default)]
pub struct Menu {
    pub selected: usize,
}

impl Menu {
    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % ITEMS.len();
    }

    pub fn prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        } else {
            self.selected = ITEMS.len() - 1;
        }
    }

    pub fn selected_action(&self) -> MenuAction {
        ITEMS[self.selected.min(ITEMS.len() - 1)].action
    }
}

pub struct MenuView<'a> {
    pub menu: &'a Menu,
    pub theme: &'a Theme,
}

impl Widget for MenuView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let title_lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                t!("app.title").to_string(),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                t!("app.subtitle").to_string(),
                Style::default().fg(colors.fg()),
            )),
        ];
        Paragraph::new(title_lines)
            .alignment(Alignment::Center)
            .render(layout[0], buf);

        let menu_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(ITEMS.iter().map(|_| Constraint::Length(3)).collect::<Vec<_>>())
            .split(layout[2]);

        for (i, item) in ITEMS.iter().enumerate() {
            let is_selected = i == self.menu.selected;
            let indicator = if is_selected { ">" } else { " " };

            let label_text = format!(" {indicator} [{}] {}", item.key, t!(item.label_key));
            let desc_text = format!("     {}", t!(item.description_key));

            let lines = vec![
                Line::from(Span::styled(
                    label_text,
                    Style::default()
                        .fg(if is_selected { colors.accent() } else { colors.fg() })
                        .add_modifier(if is_selected {
                            Modifier::BOLD
                        } else {
                            Modifier::empty()
                        }),
                )),
                Line::from(Span::styled(desc_text, Style::default().fg(colors.muted()))),
            ];

            if i < menu_layout.len() {
                Paragraph::new(lines).render(menu_layout[i], buf);
            }
        }
    }
}
