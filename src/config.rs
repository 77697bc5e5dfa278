use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::vocab::{QuestionMode, SessionSettings};

/// Host-level defaults for new sessions, loaded from
/// `<config dir>/voctrain/config.toml`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_times_to_solve")]
    pub times_to_solve: u32,
    #[serde(default = "default_question_mode")]
    pub question_mode: String,
    #[serde(default = "default_case_sensitive")]
    pub case_sensitive: bool,
    #[serde(default = "default_allow_tips")]
    pub allow_tips: bool,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_times_to_solve() -> u32 {
    3
}
fn default_question_mode() -> String {
    "random".to_string()
}
fn default_case_sensitive() -> bool {
    false
}
fn default_allow_tips() -> bool {
    true
}
fn default_data_dir() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("voctrain")
        .to_string_lossy()
        .to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            times_to_solve: default_times_to_solve(),
            question_mode: default_question_mode(),
            case_sensitive: default_case_sensitive(),
            allow_tips: default_allow_tips(),
            data_dir: default_data_dir(),
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
            .join("voctrain")
            .join("config.toml")
    }

    /// Parse `question_mode`, falling back to the default on a stale or
    /// unknown key from an old config file.
    pub fn mode(&self) -> QuestionMode {
        match self.question_mode.as_str() {
            "a" => QuestionMode::AskA,
            "b" => QuestionMode::AskB,
            _ => QuestionMode::Random,
        }
    }

    /// Fresh session settings from the configured defaults.
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings::new(
            self.times_to_solve.max(1),
            self.mode(),
            self.allow_tips,
            self.case_sensitive,
        )
    }
}
