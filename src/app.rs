use std::time::Instant;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::config::Config;
use crate::generator::QuestionGenerator;
use crate::generator::tables::TableSet;
use crate::session::difficulty::Difficulty;
use crate::session::learn::LearnState;
use crate::session::quiz::{QuizPhase, QuizState};
use crate::session::result::QuizResult;
use crate::session::scorer::SessionScore;
use crate::session::training::{TrainingMode, TrainingState};
use crate::store::progress::ProgressStore;
use crate::store::storage::Storage;
use crate::ui::components::menu::{Menu, MenuAction};
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Menu,
    Learn,
    TrainingSetup,
    Training,
    TrainingResult,
    QuizSetup,
    Quiz,
    QuizResult,
    Progress,
    Settings,
}

pub const SETTINGS_FIELDS: usize = 5;

const TRAINING_SECONDS_STEP: u32 = 10;

pub struct App {
    pub screen: AppScreen,
    pub menu: Menu,
    pub theme: Theme,
    pub config: Config,
    pub store: ProgressStore<Box<dyn Storage>>,
    pub history: Vec<QuizResult>,
    pub learn: LearnState,
    pub train_tables: TableSet,
    pub training: Option<TrainingState>,
    pub last_training_mode: TrainingMode,
    pub last_training_score: Option<SessionScore>,
    pub quiz_tables: TableSet,
    pub quiz_difficulty: Difficulty,
    pub quiz: Option<QuizState>,
    pub last_quiz_score: Option<SessionScore>,
    pub settings_selected: usize,
    pub should_quit: bool,
    rng: SmallRng,
}

impl App {
    pub fn new(config: Config, storage: Box<dyn Storage>, seed: Option<u64>) -> Self {
        let theme = Theme::load(&config.theme).unwrap_or_default();
        let store = ProgressStore::new(storage);
        let history = store.load_history();
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        log::debug!("loaded {} quiz results", history.len());

        Self {
            screen: AppScreen::Menu,
            menu: Menu::default(),
            theme,
            quiz_difficulty: config.default_difficulty,
            config,
            store,
            history,
            learn: LearnState::default(),
            train_tables: TableSet::default(),
            training: None,
            last_training_mode: TrainingMode::Focused,
            last_training_score: None,
            quiz_tables: TableSet::default(),
            quiz: None,
            last_quiz_score: None,
            settings_selected: 0,
            should_quit: false,
            rng,
        }
    }

    pub fn eastern_digits(&self) -> bool {
        self.config.eastern_digits
    }

    pub fn go_to_menu(&mut self) {
        self.screen = AppScreen::Menu;
    }

    pub fn open(&mut self, action: MenuAction) {
        match action {
            MenuAction::Learn => self.screen = AppScreen::Learn,
            MenuAction::Train => self.screen = AppScreen::TrainingSetup,
            MenuAction::Quiz => self.go_to_quiz_setup(),
            MenuAction::Progress => self.go_to_progress(),
            MenuAction::Settings => {
                self.settings_selected = 0;
                self.screen = AppScreen::Settings;
            }
        }
    }

    pub fn go_to_quiz_setup(&mut self) {
        self.quiz = None;
        self.screen = AppScreen::QuizSetup;
    }

    pub fn go_to_progress(&mut self) {
        self.history = self.store.load_history();
        self.screen = AppScreen::Progress;
    }

    fn session_rng(&mut self) -> SmallRng {
        SmallRng::seed_from_u64(self.rng.r#gen())
    }

    // --- Training ---

    pub fn start_training(&mut self, mode: TrainingMode, now: Instant) {
        let rng = self.session_rng();
        self.training = Some(TrainingState::new(
            mode,
            &self.train_tables,
            rng,
            self.config.training_seconds,
            now,
        ));
        self.last_training_mode = mode;
        self.last_training_score = None;
        self.screen = AppScreen::Training;
        log::info!("training started: {}", mode.as_str());
    }

    pub fn training_type_char(&mut self, ch: char) {
        if let Some(ref mut training) = self.training {
            training.type_char(ch);
        }
    }

    pub fn training_backspace(&mut self) {
        if let Some(ref mut training) = self.training {
            training.backspace();
        }
    }

    pub fn submit_training(&mut self, now: Instant) -> Option<bool> {
        self.training.as_mut()?.submit(now)
    }

    /// Stop the drill (learner- or timer-initiated) and show its score.
    pub fn end_training(&mut self) {
        if let Some(ref mut training) = self.training {
            let score = training.finish();
            log::info!("training ended with {}/{}", score.score, score.total);
            self.last_training_score = Some(score);
        }
        self.training = None;
        self.screen = AppScreen::TrainingResult;
    }

    pub fn retry_training(&mut self, now: Instant) {
        self.start_training(self.last_training_mode, now);
    }

    // --- Quiz ---

    pub fn start_quiz(&mut self, now: Instant) {
        let rng = self.session_rng();
        let mut generator = QuestionGenerator::new(&self.quiz_tables, rng)
            .with_true_false_ratio(self.config.true_false_ratio);
        self.quiz = Some(QuizState::new(
            self.quiz_difficulty,
            self.quiz_tables.clone(),
            &mut generator,
            now,
        ));
        self.last_quiz_score = None;
        self.screen = AppScreen::Quiz;
        log::info!("quiz started: {}", self.quiz_difficulty.as_str());
    }

    pub fn quiz_select(&mut self, option: usize) {
        if let Some(ref mut quiz) = self.quiz {
            quiz.select_option(option);
        }
    }

    pub fn quiz_submit(&mut self) -> Option<bool> {
        let correct = self.quiz.as_mut()?.submit();
        self.finish_quiz_if_completed();
        correct
    }

    /// Leave a running quiz. Nothing is recorded.
    pub fn end_quiz_early(&mut self) {
        if let Some(ref mut quiz) = self.quiz {
            quiz.abandon();
            log::info!("quiz abandoned at question {}", quiz.position() + 1);
        }
        self.go_to_quiz_setup();
    }

    /// Persist a completed quiz exactly once and switch to its result.
    fn finish_quiz_if_completed(&mut self) {
        let Some(ref mut quiz) = self.quiz else {
            return;
        };
        if quiz.phase() != QuizPhase::Completed {
            return;
        }
        if let Some(result) = quiz.take_result() {
            if let Err(e) = self.store.append(result) {
                log::error!("failed to save quiz result: {e}");
            }
            self.history = self.store.load_history();
        }
        self.last_quiz_score = quiz.final_score();
        if self.screen == AppScreen::Quiz {
            self.screen = AppScreen::QuizResult;
        }
    }

    // --- Clock ---

    pub fn on_tick(&mut self, now: Instant) {
        if let Some(ref mut training) = self.training {
            training.expire_feedback(now, self.config.feedback_millis);
            training.on_tick(now);
            if training.is_finished() && self.screen == AppScreen::Training {
                self.end_training();
            }
        }

        if let Some(ref mut quiz) = self.quiz {
            quiz.on_tick(now);
        }
        self.finish_quiz_if_completed();
    }

    // --- Table pickers ---

    pub fn toggle_table_for_screen(&mut self, table: u32) {
        match self.screen {
            AppScreen::TrainingSetup => self.train_tables.toggle(table),
            AppScreen::QuizSetup => self.quiz_tables.toggle(table),
            AppScreen::Learn => self.learn.select(table),
            _ => {}
        }
    }

    pub fn select_all_tables_for_screen(&mut self) {
        match self.screen {
            AppScreen::TrainingSetup => self.train_tables.clear(),
            AppScreen::QuizSetup => self.quiz_tables.clear(),
            _ => {}
        }
    }

    // --- Settings ---

    pub fn settings_cycle_forward(&mut self) {
        self.settings_cycle(true);
    }

    pub fn settings_cycle_backward(&mut self) {
        self.settings_cycle(false);
    }

    fn settings_cycle(&mut self, forward: bool) {
        match self.settings_selected {
            0 => {
                let themes = Theme::available_themes();
                if themes.is_empty() {
                    return;
                }
                let idx = themes
                    .iter()
                    .position(|t| *t == self.config.theme)
                    .unwrap_or(0);
                let next = if forward {
                    (idx + 1) % themes.len()
                } else {
                    (idx + themes.len() - 1) % themes.len()
                };
                self.config.theme = themes[next].clone();
                if let Some(theme) = Theme::load(&self.config.theme) {
                    self.theme = theme;
                }
            }
            1 => {
                self.config.cycle_locale();
                rust_i18n::set_locale(&self.config.locale);
            }
            2 => self.config.eastern_digits = !self.config.eastern_digits,
            3 => {
                self.config.default_difficulty = if forward {
                    self.config.default_difficulty.next()
                } else {
                    self.config.default_difficulty.prev()
                };
                self.quiz_difficulty = self.config.default_difficulty;
            }
            4 => {
                let secs = self.config.training_seconds;
                self.config.training_seconds = if forward {
                    secs.saturating_add(TRAINING_SECONDS_STEP).min(600)
                } else {
                    secs.saturating_sub(TRAINING_SECONDS_STEP).max(10)
                };
            }
            _ => {}
        }
    }

    pub fn save_settings_and_leave(&mut self) {
        if let Err(e) = self.config.save() {
            log::warn!("could not save config: {e}");
        }
        self.go_to_menu();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::question::{Answer, QuestionKind};
    use crate::store::progress::HISTORY_KEY;
    use crate::store::storage::MemoryStorage;
    use std::time::Duration;

    fn test_app() -> App {
        App::new(Config::default(), Box::new(MemoryStorage::new()), Some(42))
    }

    fn answer_current_correctly(app: &mut App) {
        let quiz = app.quiz.as_mut().unwrap();
        let expected = quiz.current().unwrap().expected();
        quiz.select(expected);
        app.quiz_submit();
    }

    #[test]
    fn test_completed_quiz_is_saved_once() {
        let mut app = test_app();
        let start = Instant::now();
        app.open(MenuAction::Quiz);
        app.start_quiz(start);
        assert_eq!(app.screen, AppScreen::Quiz);

        for _ in 0..Difficulty::Easy.question_count() {
            answer_current_correctly(&mut app);
        }
        assert_eq!(app.screen, AppScreen::QuizResult);
        assert_eq!(app.history.len(), 1);
        assert_eq!(app.history[0].score, 10);
        assert_eq!(app.history[0].total, 10);

        app.on_tick(start + Duration::from_secs(400));
        app.on_tick(start + Duration::from_secs(800));
        assert_eq!(app.store.load_history().len(), 1);
        assert_eq!(app.last_quiz_score, Some(SessionScore { score: 10, total: 10 }));
    }

    #[test]
    fn test_quiz_expiry_saves_full_length_total() {
        let mut app = test_app();
        let start = Instant::now();
        app.quiz_difficulty = Difficulty::Medium;
        app.start_quiz(start);
        answer_current_correctly(&mut app);

        app.on_tick(start + Duration::from_secs(Difficulty::Medium.time_limit_secs() as u64));
        assert_eq!(app.screen, AppScreen::QuizResult);
        let history = app.store.load_history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].score, 1);
        assert_eq!(history[0].total, 15);
        assert_eq!(history[0].difficulty, "medium");
    }

    #[test]
    fn test_abandoned_quiz_is_not_saved() {
        let mut app = test_app();
        app.start_quiz(Instant::now());
        answer_current_correctly(&mut app);
        app.end_quiz_early();
        assert_eq!(app.screen, AppScreen::QuizSetup);
        assert!(app.quiz.is_none());
        assert!(app.store.load_history().is_empty());
        assert!(app.store.storage().read(HISTORY_KEY).unwrap().is_none());
    }

    #[test]
    fn test_quiz_uses_selected_tables() {
        let mut app = test_app();
        app.screen = AppScreen::QuizSetup;
        app.toggle_table_for_screen(7);
        app.start_quiz(Instant::now());
        let quiz = app.quiz.as_mut().unwrap();
        while let Some(q) = quiz.current() {
            assert_eq!(q.a, 7);
            let answer = match q.kind {
                QuestionKind::TrueFalse { .. } => Answer::Judgment(true),
                _ => Answer::Number(0),
            };
            quiz.select(answer);
            quiz.submit();
        }
        app.finish_quiz_if_completed();
        assert_eq!(app.history[0].tables, vec![7]);
    }

    #[test]
    fn test_timed_training_ends_on_tick() {
        let mut app = test_app();
        app.config.training_seconds = 10;
        let start = Instant::now();
        app.start_training(TrainingMode::Timed, start);
        app.training_type_char('5');
        app.submit_training(start);

        app.on_tick(start + Duration::from_secs(5));
        assert_eq!(app.screen, AppScreen::Training);
        app.on_tick(start + Duration::from_secs(10));
        assert_eq!(app.screen, AppScreen::TrainingResult);
        assert_eq!(app.last_training_score.unwrap().total, 1);
        assert!(app.store.load_history().is_empty());
    }

    #[test]
    fn test_settings_cycle_digits_and_seconds() {
        let mut app = test_app();
        app.settings_selected = 2;
        app.settings_cycle_forward();
        assert!(!app.eastern_digits());

        app.settings_selected = 4;
        app.config.training_seconds = 600;
        app.settings_cycle_forward();
        assert_eq!(app.config.training_seconds, 600);
        app.config.training_seconds = 10;
        app.settings_cycle_backward();
        assert_eq!(app.config.training_seconds, 10);
    }

    #[test]
    fn test_difficulty_setting_updates_quiz_preset() {
        let mut app = test_app();
        app.settings_selected = 3;
        app.settings_cycle_forward();
        assert_eq!(app.config.default_difficulty, Difficulty::Medium);
        assert_eq!(app.quiz_difficulty, Difficulty::Medium);
    }
}
