use std::collections::BTreeSet;

use crate::engine::achievements::{Achievement, compute_achievements};
use crate::engine::stats::{ProgressStats, compute_stats};
use crate::session::result::QuizResult;
use crate::store::storage::{StoreError, Storage};

pub const HISTORY_KEY: &str = "quizHistory";

/// Owner of the persisted quiz history.
///
/// `load_history` never fails: a missing key is an empty history, and a value that
/// does not parse (or holds a record with `score > total`) is discarded as a
/// whole and treated as empty. The next append then overwrites it. A storage
/// read error makes `append` fail without writing.
pub struct ProgressStore<S: Storage> {
    storage: S,
    last_appended: Option<QuizResult>,
}

impl<S: Storage> ProgressStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            last_appended: None,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn load_history(&self) -> Vec<QuizResult> {
        self.read_history().unwrap_or_else(|e| {
            log::warn!("could not read quiz history, starting empty: {e}");
            Vec::new()
        })
    }

    /// Like `load_history`, but a failed storage read is an error rather
    /// than an empty history, so `append` never overwrites records it could
    /// not see.
    fn read_history(&self) -> Result<Vec<QuizResult>, StoreError> {
        let Some(raw) = self.storage.read(HISTORY_KEY)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<QuizResult>>(&raw) {
            Ok(history) if history.iter().all(QuizResult::is_valid) => Ok(history),
            Ok(_) => {
                log::warn!("quiz history holds a record with score > total; discarding it");
                Ok(Vec::new())
            }
            Err(e) => {
                log::warn!("quiz history is malformed; discarding it: {e}");
                Ok(Vec::new())
            }
        }
    }

    /// Read-modify-write append. Returns `Ok(false)` without writing when the
    /// same record was already appended through this store, which absorbs
    /// repeated completion events for one session.
    pub fn append(&mut self, result: QuizResult) -> Result<bool, StoreError> {
        if self.last_appended.as_ref() == Some(&result) {
            log::debug!("duplicate quiz result ignored");
            return Ok(false);
        }

        let mut history = self.read_history()?;
        history.push(result.clone());
        let json = serde_json::to_string(&history)?;
        self.storage.write(HISTORY_KEY, &json)?;

        log::info!(
            "saved quiz result {}/{} ({}), history size {}",
            result.score,
            result.total,
            result.difficulty,
            history.len()
        );
        self.last_appended = Some(result);
        Ok(true)
    }

    pub fn stats(&self) -> ProgressStats {
        compute_stats(&self.load_history())
    }

    pub fn achievements(&self) -> BTreeSet<Achievement> {
        compute_achievements(&self.load_history())
    }
}
