use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};
use rust_i18n::t;

use jadwal::app::{App, AppScreen, SETTINGS_FIELDS};
use jadwal::config::Config;
use jadwal::event::{AppEvent, EventHandler};
use jadwal::numerals::display_number;
use jadwal::session::difficulty::ALL_DIFFICULTIES;
use jadwal::session::training::TrainingMode;
use jadwal::store::storage::{FileStorage, MemoryStorage, Storage};
use jadwal::ui::components::menu::MenuView;
use jadwal::ui::components::multiplication_table::MultiplicationTable;
use jadwal::ui::components::progress_dashboard::ProgressDashboard;
use jadwal::ui::components::question_card::QuestionCard;
use jadwal::ui::components::result_card::{ResultCard, ResultKind};
use jadwal::ui::components::table_picker::TablePicker;
use jadwal::ui::components::training_card::TrainingCard;
use jadwal::ui::layout::{AppLayout, centered_rect, split_panes};
use jadwal::ui::theme::Theme;

rust_i18n::i18n!("locales", fallback = "en");

#[derive(Parser)]
#[command(
    name = "jadwal",
    version,
    about = "Terminal multiplication-table tutor for Arabic-speaking learners"
)]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Interface language (ar, en)")]
    locale: Option<String>,

    #[arg(long, help = "Show Western digits instead of Eastern Arabic digits")]
    western_digits: bool,

    #[arg(long, help = "Seed for reproducible question sequences")]
    seed: Option<u64>,

    #[arg(long, help = "Directory holding the quiz history")]
    data_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Log output goes to stderr and would tear through the TUI, so it stays
    // off unless asked for.
    if std::env::var_os("RUST_LOG").is_some() {
        let _ = pretty_env_logger::try_init();
    }

    let mut config = Config::load().unwrap_or_else(|e| {
        log::warn!("could not load config, using defaults: {e}");
        Config::default()
    });
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(locale) = cli.locale {
        config.locale = locale;
    }
    if cli.western_digits {
        config.eastern_digits = false;
    }
    config.validate(&Theme::available_themes());
    rust_i18n::set_locale(&config.locale);

    let file_storage = match cli.data_dir {
        Some(dir) => FileStorage::with_base_dir(dir),
        None => FileStorage::new(),
    };
    let storage: Box<dyn Storage> = match file_storage {
        Ok(storage) => {
            log::info!("quiz history stored under {}", storage.base_dir().display());
            Box::new(storage)
        }
        Err(e) => {
            log::warn!("data directory unavailable, history will not be kept: {e}");
            Box::new(MemoryStorage::new())
        }
    };

    let mut app = App::new(config, storage, cli.seed);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(200));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick(now) => app.on_tick(now),
            AppEvent::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// `1`..`9` pick tables 1-9 and `0` picks table 10.
fn table_for_key(ch: char) -> Option<u32> {
    match ch {
        '0' => Some(10),
        '1'..='9' => ch.to_digit(10),
        _ => None,
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Menu => handle_menu_key(app, key),
        AppScreen::Learn => handle_learn_key(app, key),
        AppScreen::TrainingSetup => handle_training_setup_key(app, key),
        AppScreen::Training => handle_training_key(app, key),
        AppScreen::TrainingResult => handle_training_result_key(app, key),
        AppScreen::QuizSetup => handle_quiz_setup_key(app, key),
        AppScreen::Quiz => handle_quiz_key(app, key),
        AppScreen::QuizResult => handle_quiz_result_key(app, key),
        AppScreen::Progress => handle_progress_key(app, key),
        AppScreen::Settings => handle_settings_key(app, key),
    }
}

fn handle_menu_key(app: &mut App, key: KeyEvent) {
    use jadwal::ui::components::menu::MenuAction;

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('1') => app.open(MenuAction::Learn),
        KeyCode::Char('2') => app.open(MenuAction::Train),
        KeyCode::Char('3') => app.open(MenuAction::Quiz),
        KeyCode::Char('4') => app.open(MenuAction::Progress),
        KeyCode::Char('c') => app.open(MenuAction::Settings),
        KeyCode::Up | KeyCode::Char('k') => app.menu.prev(),
        KeyCode::Down | KeyCode::Char('j') => app.menu.next(),
        KeyCode::Enter => {
            let action = app.menu.selected_action();
            app.open(action);
        }
        _ => {}
    }
}

fn handle_learn_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.go_to_menu(),
        KeyCode::Right | KeyCode::Down | KeyCode::Char('l') => app.learn.next(),
        KeyCode::Left | KeyCode::Up | KeyCode::Char('h') => app.learn.prev(),
        KeyCode::Char('p') => app.learn.toggle_pattern(),
        KeyCode::Char(ch) => {
            if let Some(table) = table_for_key(ch) {
                app.toggle_table_for_screen(table);
            }
        }
        _ => {}
    }
}

fn handle_training_setup_key(app: &mut App, key: KeyEvent) {
    let now = Instant::now();
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.go_to_menu(),
        KeyCode::Char('f') => app.start_training(TrainingMode::Focused, now),
        KeyCode::Char('r') => app.start_training(TrainingMode::Random, now),
        KeyCode::Char('t') => app.start_training(TrainingMode::Timed, now),
        KeyCode::Char('a') => app.select_all_tables_for_screen(),
        KeyCode::Char(ch) => {
            if let Some(table) = table_for_key(ch) {
                app.toggle_table_for_screen(table);
            }
        }
        _ => {}
    }
}

fn handle_training_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.end_training(),
        KeyCode::Enter => {
            app.submit_training(Instant::now());
        }
        KeyCode::Backspace => app.training_backspace(),
        KeyCode::Char(ch) => app.training_type_char(ch),
        _ => {}
    }
}

fn handle_training_result_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('r') => app.retry_training(Instant::now()),
        KeyCode::Char('q') | KeyCode::Esc => app.go_to_menu(),
        _ => {}
    }
}

fn handle_quiz_setup_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.go_to_menu(),
        KeyCode::Enter => app.start_quiz(Instant::now()),
        KeyCode::Right | KeyCode::Char('l') => app.quiz_difficulty = app.quiz_difficulty.next(),
        KeyCode::Left | KeyCode::Char('h') => app.quiz_difficulty = app.quiz_difficulty.prev(),
        KeyCode::Char('a') => app.select_all_tables_for_screen(),
        KeyCode::Char(ch) => {
            if let Some(table) = table_for_key(ch) {
                app.toggle_table_for_screen(table);
            }
        }
        _ => {}
    }
}

fn handle_quiz_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.end_quiz_early(),
        KeyCode::Enter => {
            app.quiz_submit();
        }
        KeyCode::Char(ch @ '1'..='4') => {
            if let Some(n) = ch.to_digit(10) {
                app.quiz_select(n as usize - 1);
            }
        }
        _ => {}
    }
}

fn handle_quiz_result_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('n') => app.go_to_quiz_setup(),
        KeyCode::Char('s') => app.go_to_progress(),
        KeyCode::Char('q') | KeyCode::Esc => app.go_to_menu(),
        _ => {}
    }
}

fn handle_progress_key(app: &mut App, key: KeyEvent) {
    if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
        app.go_to_menu();
    }
}

fn handle_settings_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.save_settings_and_leave(),
        KeyCode::Up | KeyCode::Char('k') => {
            app.settings_selected = app.settings_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.settings_selected + 1 < SETTINGS_FIELDS {
                app.settings_selected += 1;
            }
        }
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => app.settings_cycle_forward(),
        KeyCode::Left | KeyCode::Char('h') => app.settings_cycle_backward(),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    let layout = AppLayout::new(area);
    render_header(frame, app, layout.header);

    match app.screen {
        AppScreen::Menu => render_menu(frame, app, layout.main),
        AppScreen::Learn => render_learn(frame, app, layout.main),
        AppScreen::TrainingSetup => render_training_setup(frame, app, layout.main),
        AppScreen::Training => render_training(frame, app, layout.main),
        AppScreen::TrainingResult => render_training_result(frame, app, layout.main),
        AppScreen::QuizSetup => render_quiz_setup(frame, app, layout.main),
        AppScreen::Quiz => render_quiz(frame, app, layout.main),
        AppScreen::QuizResult => render_quiz_result(frame, app, layout.main),
        AppScreen::Progress => render_progress(frame, app, layout.main),
        AppScreen::Settings => render_settings(frame, app, layout.main),
    }

    let footer_key = match app.screen {
        AppScreen::Menu => "footer.menu",
        AppScreen::Learn => "learn.footer",
        AppScreen::TrainingSetup => "train.setup_footer",
        AppScreen::Training => "train.footer",
        AppScreen::TrainingResult => "train.result_footer",
        AppScreen::QuizSetup => "quiz.setup_footer",
        AppScreen::Quiz => "quiz.footer",
        AppScreen::QuizResult => "quiz.result_footer",
        AppScreen::Progress => "footer.back",
        AppScreen::Settings => "settings.footer",
    };
    let footer = Paragraph::new(Line::from(Span::styled(
        t!(footer_key).to_string(),
        Style::default().fg(colors.muted()),
    )));
    frame.render_widget(footer, layout.footer);
}

fn render_header(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let colors = &app.theme.colors;
    let section = match app.screen {
        AppScreen::Menu => t!("app.subtitle"),
        AppScreen::Learn => t!("learn.title"),
        AppScreen::TrainingSetup | AppScreen::Training | AppScreen::TrainingResult => {
            t!("train.title")
        }
        AppScreen::QuizSetup | AppScreen::Quiz | AppScreen::QuizResult => t!("quiz.title"),
        AppScreen::Progress => t!("progress.title"),
        AppScreen::Settings => t!("settings.title"),
    };
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" {} ", t!("app.title")),
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" | {section}"),
            Style::default().fg(colors.header_fg()).bg(colors.header_bg()),
        ),
    ]))
    .block(Block::bordered().border_style(Style::default().fg(colors.border())))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, area);
}

fn render_menu(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let menu_area = centered_rect(50, 90, area);
    let view = MenuView {
        menu: &app.menu,
        theme: &app.theme,
    };
    frame.render_widget(view, menu_area);
}

fn render_learn(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let centered = centered_rect(60, 100, area);
    let table = MultiplicationTable::new(&app.learn, app.eastern_digits(), &app.theme);
    frame.render_widget(table, centered);
}

fn render_training_setup(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let colors = &app.theme.colors;
    let (left, right) = split_panes(area, 50);

    frame.render_widget(
        TablePicker::new(&app.train_tables, app.eastern_digits(), &app.theme),
        left,
    );

    let block = Block::bordered()
        .title(format!(" {} ", t!("train.title")))
        .border_style(Style::default().fg(colors.border()));
    let inner = block.inner(right);
    frame.render_widget(block, right);

    let modes = [
        ('f', TrainingMode::Focused),
        ('r', TrainingMode::Random),
        ('t', TrainingMode::Timed),
    ];
    let mut lines = Vec::new();
    for (key, mode) in modes {
        let name_key = format!("train.mode.{}", mode.as_str());
        let desc_key = format!("train.mode.{}_desc", mode.as_str());
        lines.push(Line::from(Span::styled(
            format!(" [{key}] {}", t!(name_key.as_str())),
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            format!("     {}", t!(desc_key.as_str())),
            Style::default().fg(colors.muted()),
        )));
        lines.push(Line::from(""));
    }
    Paragraph::new(lines).render(inner, frame.buffer_mut());
}

fn render_training(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    if let Some(ref training) = app.training {
        let centered = centered_rect(70, 80, area);
        frame.render_widget(
            TrainingCard::new(training, app.eastern_digits(), &app.theme),
            centered,
        );
    }
}

fn render_training_result(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    if let Some(score) = app.last_training_score {
        let centered = centered_rect(60, 70, area);
        frame.render_widget(
            ResultCard::new(ResultKind::Training, score, app.eastern_digits(), &app.theme),
            centered,
        );
    }
}

fn render_quiz_setup(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let colors = &app.theme.colors;
    let (left, right) = split_panes(area, 50);

    frame.render_widget(
        TablePicker::new(&app.quiz_tables, app.eastern_digits(), &app.theme),
        left,
    );

    let block = Block::bordered()
        .title(format!(" {} ", t!("quiz.difficulty_title")))
        .border_style(Style::default().fg(colors.border()));
    let inner = block.inner(right);
    frame.render_widget(block, right);

    let mut lines = Vec::new();
    for difficulty in ALL_DIFFICULTIES {
        let is_selected = difficulty == app.quiz_difficulty;
        let indicator = if is_selected { ">" } else { " " };
        let name_key = format!("quiz.difficulty.{}", difficulty.as_str());
        let desc_key = format!("quiz.difficulty.{}_desc", difficulty.as_str());
        lines.push(Line::from(Span::styled(
            format!(" {indicator} {}", t!(name_key.as_str())),
            Style::default()
                .fg(if is_selected { colors.accent() } else { colors.fg() })
                .add_modifier(if is_selected {
                    Modifier::BOLD
                } else {
                    Modifier::empty()
                }),
        )));
        lines.push(Line::from(Span::styled(
            format!("     {}", display_number(t!(desc_key.as_str()), app.eastern_digits())),
            Style::default().fg(colors.muted()),
        )));
        lines.push(Line::from(""));
    }
    Paragraph::new(lines).render(inner, frame.buffer_mut());
}

fn render_quiz(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    if let Some(ref quiz) = app.quiz {
        let centered = centered_rect(70, 90, area);
        frame.render_widget(
            QuestionCard::new(quiz, app.eastern_digits(), &app.theme),
            centered,
        );
    }
}

fn render_quiz_result(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    if let Some(score) = app.last_quiz_score {
        let centered = centered_rect(60, 70, area);
        frame.render_widget(
            ResultCard::new(ResultKind::Quiz, score, app.eastern_digits(), &app.theme),
            centered,
        );
    }
}

fn render_progress(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    frame.render_widget(
        ProgressDashboard::new(&app.history, app.eastern_digits(), &app.theme),
        area,
    );
}

fn render_settings(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let colors = &app.theme.colors;
    let eastern = app.eastern_digits();

    let centered = centered_rect(60, 90, area);
    let block = Block::bordered()
        .title(format!(" {} ", t!("settings.title")))
        .border_style(Style::default().fg(colors.accent()))
        .style(Style::default().bg(colors.bg()));
    let inner = block.inner(centered);
    block.render(centered, frame.buffer_mut());

    let digits = if eastern {
        t!("settings.digits_eastern")
    } else {
        t!("settings.digits_western")
    };
    let difficulty_key = format!("quiz.difficulty.{}", app.config.default_difficulty.as_str());
    let fields: [(String, String); SETTINGS_FIELDS] = [
        (t!("settings.theme").to_string(), app.config.theme.clone()),
        (t!("settings.locale").to_string(), app.config.locale.clone()),
        (t!("settings.digits").to_string(), digits.to_string()),
        (
            t!("settings.difficulty").to_string(),
            t!(difficulty_key.as_str()).to_string(),
        ),
        (
            t!("settings.training_seconds").to_string(),
            display_number(app.config.training_seconds, eastern),
        ),
    ];

    let field_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(fields.iter().map(|_| Constraint::Length(3)).collect::<Vec<_>>())
        .split(inner);

    for (i, (label, value)) in fields.iter().enumerate() {
        let is_selected = i == app.settings_selected;
        let indicator = if is_selected { " > " } else { "   " };

        let label_style = Style::default()
            .fg(if is_selected { colors.accent() } else { colors.fg() })
            .add_modifier(if is_selected {
                Modifier::BOLD
            } else {
                Modifier::empty()
            });
        let value_style = Style::default().fg(if is_selected {
            colors.selected()
        } else {
            colors.muted()
        });

        let lines = vec![
            Line::from(Span::styled(format!("{indicator}{label}:"), label_style)),
            Line::from(Span::styled(format!("  < {value} >"), value_style)),
        ];
        Paragraph::new(lines)
            .alignment(Alignment::Left)
            .render(field_layout[i], frame.buffer_mut());
    }
}
