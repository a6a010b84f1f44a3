// src/domain/project/configuration.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// What the collector does with a file holding an unparsable line.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MalformedPolicy {
    /// Fail the whole run.
    #[default]
    Abort,
    /// Drop the offending file with a warning and keep going.
    SkipFile,
}

/// Settings of one ETL run. Every key is optional; the defaults are the
/// historical Sparkify layout.
#[derive(Debug, Deserialize, Serialize, Clone, Validate, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct PipelineConfig {
    #[serde(default = "default_name")]
    pub name: String,

    /// Glob (relative to the project directory) of the activity logs.
    #[validate(length(min = 1, message = "log-pattern cannot be empty"))]
    #[serde(default = "default_log_pattern")]
    pub log_pattern: String,

    /// Glob (relative to the project directory) of the song metadata files.
    #[validate(length(min = 1, message = "song-pattern cannot be empty"))]
    #[serde(default = "default_song_pattern")]
    pub song_pattern: String,

    /// DuckDB file, relative to the project directory, or `:memory:`.
    #[validate(length(min = 1, message = "db-path cannot be empty"))]
    #[serde(default = "default_db_path")]
    pub db_path: String,

    #[serde(default = "default_target_path")]
    pub target_path: String,

    #[serde(default)]
    pub on_malformed: MalformedPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            log_pattern: default_log_pattern(),
            song_pattern: default_song_pattern(),
            db_path: default_db_path(),
            target_path: default_target_path(),
            on_malformed: MalformedPolicy::default(),
        }
    }
}

fn default_name() -> String {
    "sparkify".to_string()
}
fn default_log_pattern() -> String {
    "data/log_data/**/*.json".to_string()
}
fn default_song_pattern() -> String {
    "data/song_data/**/*.json".to_string()
}
fn default_db_path() -> String {
    "sparkify.duckdb".to_string()
}
fn default_target_path() -> String {
    "target".to_string()
}
