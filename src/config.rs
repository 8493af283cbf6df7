use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::generator::DEFAULT_TRUE_FALSE_RATIO;
use crate::session::difficulty::Difficulty;

pub const SUPPORTED_LOCALES: [&str; 2] = ["ar", "en"];

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default = "default_eastern_digits")]
    pub eastern_digits: bool,
    #[serde(default)]
    pub default_difficulty: Difficulty,
    #[serde(default = "default_training_seconds")]
    pub training_seconds: u32,
    #[serde(default = "default_true_false_ratio")]
    pub true_false_ratio: f64,
    #[serde(default = "default_feedback_millis")]
    pub feedback_millis: u64,
}

fn default_theme() -> String {
    "desert".to_string()
}
fn default_locale() -> String {
    "ar".to_string()
}
fn default_eastern_digits() -> bool {
    true
}
fn default_training_seconds() -> u32 {
    60
}
fn default_true_false_ratio() -> f64 {
    DEFAULT_TRUE_FALSE_RATIO
}
fn default_feedback_millis() -> u64 {
    1500
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            locale: default_locale(),
            eastern_digits: default_eastern_digits(),
            default_difficulty: Difficulty::default(),
            training_seconds: default_training_seconds(),
            true_false_ratio: default_true_false_ratio(),
            feedback_millis: default_feedback_millis(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("jadwal")
            .join("config.toml")
    }

    /// Clamp numeric fields and reset unknown names to their defaults.
    /// Call after deserialization and after applying command-line overrides.
    pub fn validate(&mut self, valid_themes: &[String]) {
        self.training_seconds = self.training_seconds.clamp(10, 600);
        self.feedback_millis = self.feedback_millis.clamp(200, 10_000);
        if !self.true_false_ratio.is_finite() {
            self.true_false_ratio = default_true_false_ratio();
        }
        self.true_false_ratio = self.true_false_ratio.clamp(0.0, 1.0);

        if !SUPPORTED_LOCALES.contains(&self.locale.as_str()) {
            log::warn!("unknown locale {:?}, using {}", self.locale, default_locale());
            self.locale = default_locale();
        }
        if !valid_themes.is_empty() && !valid_themes.contains(&self.theme) {
            log::warn!("unknown theme {:?}, using {}", self.theme, default_theme());
            self.theme = default_theme();
        }
    }

    pub fn cycle_locale(&mut self) {
        let idx = SUPPORTED_LOCALES
            .iter()
            .position(|&l| l == self.locale)
            .unwrap_or(0);
        self.locale = SUPPORTED_LOCALES[(idx + 1) % SUPPORTED_LOCALES.len()].to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.locale, "ar");
        assert!(config.eastern_digits);
        assert_eq!(config.default_difficulty, Difficulty::Easy);
        assert_eq!(config.training_seconds, 60);
        assert!((config.true_false_ratio - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn test_config_serde_partial_file() {
        let toml_str = r#"
locale = "en"
default_difficulty = "hard"
training_seconds = 90
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.locale, "en");
        assert_eq!(config.default_difficulty, Difficulty::Hard);
        assert_eq!(config.training_seconds, 90);
        assert_eq!(config.theme, "desert");
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(config.theme, deserialized.theme);
        assert_eq!(config.default_difficulty, deserialized.default_difficulty);
        assert_eq!(config.feedback_millis, deserialized.feedback_millis);
    }

    #[test]
    fn test_validate_clamps_values() {
        let mut config = Config::default();
        config.training_seconds = 0;
        config.true_false_ratio = 4.0;
        config.feedback_millis = 0;
        config.locale = "fr".to_string();
        config.theme = "nonexistent".to_string();

        let themes = vec!["desert".to_string(), "night".to_string()];
        config.validate(&themes);

        assert_eq!(config.training_seconds, 10);
        assert_eq!(config.true_false_ratio, 1.0);
        assert_eq!(config.feedback_millis, 200);
        assert_eq!(config.locale, "ar");
        assert_eq!(config.theme, "desert");
    }

    #[test]
    fn test_validate_keeps_known_theme() {
        let mut config = Config::default();
        config.theme = "night".to_string();
        config.validate(&["desert".to_string(), "night".to_string()]);
        assert_eq!(config.theme, "night");
    }

    #[test]
    fn test_cycle_locale() {
        let mut config = Config::default();
        config.cycle_locale();
        assert_eq!(config.locale, "en");
        config.cycle_locale();
        assert_eq!(config.locale, "ar");
    }
}
