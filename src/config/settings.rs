// ==========================================
// Survey calendar - settings
// ==========================================
// Loaded from config.{env}.json selected by SURVEY_ENV, with
// environment overrides for the database path. Missing file means
// defaults: every table keeps its canonical name and the database
// lives under the platform data directory.
// ==========================================

use std::path::PathBuf;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Top-level service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub debug: bool,
    pub database: DatabaseSettings,
}

/// Database location and table naming.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub path: String,
    pub monthly_batch_table: String,
    pub quarterly_batch_table: String,
    pub annual_batch_table: String,
    pub gb_batch_table: String,
    pub ni_batch_table: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: false,
            database: DatabaseSettings::default(),
        }
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            monthly_batch_table: "monthly_batch".to_string(),
            quarterly_batch_table: "quarterly_batch".to_string(),
            annual_batch_table: "annual_batch".to_string(),
            gb_batch_table: "gb_batch_item".to_string(),
            ni_batch_table: "ni_batch_item".to_string(),
        }
    }
}

impl Settings {
    /// Load settings for the current environment.
    ///
    /// Reads `config.{env}.json` where env comes from SURVEY_ENV
    /// (default "development"). A missing file yields defaults; a
    /// malformed file is an error. DB_PATH overrides the database path.
    pub fn load() -> anyhow::Result<Self> {
        let env = std::env::var("SURVEY_ENV").unwrap_or_else(|_| "development".to_string());
        let file = PathBuf::from(format!("config.{}.json", env));

        let mut settings = if file.exists() {
            Self::from_file(&file)?
        } else {
            tracing::debug!(config = %file.display(), "no configuration file, using defaults");
            Settings::default()
        };

        if let Ok(path) = std::env::var("DB_PATH") {
            settings.database.path = path;
        }

        tracing::info!(config = %file.display(), "configuration loaded");
        Ok(settings)
    }

    /// Parse settings from a JSON file.
    pub fn from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read configuration {}", path.display()))?;
        let settings = serde_json::from_str(&raw)
            .with_context(|| format!("cannot parse configuration {}", path.display()))?;
        Ok(settings)
    }
}

fn default_db_path() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("survey-calendar")
        .join("batches.db")
        .to_string_lossy()
        .into_owned()
}
