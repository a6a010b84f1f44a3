// sparkify-core/src/infrastructure/config/project.rs

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use validator::Validate;

use crate::domain::project::configuration::PipelineConfig;
use crate::infrastructure::error::InfrastructureError;

const CONFIG_CANDIDATES: [&str; 2] = ["sparkify.yaml", "sparkify_project.yaml"];

/// Loads `sparkify.yaml` from `project_dir` (defaults when absent), applies
/// `SPARKIFY_*` environment overrides, then validates.
#[instrument(skip(project_dir))]
pub fn load_pipeline_config(project_dir: &Path) -> Result<PipelineConfig, InfrastructureError> {
    let mut config = match find_config(project_dir) {
        Some(path) => {
            info!(path = ?path, "Loading pipeline configuration");
            let content = fs::read_to_string(&path)?;
            // An empty file is a valid "all defaults" config
            if content.trim().is_empty() {
                PipelineConfig::default()
            } else {
                serde_yaml::from_str(&content)?
            }
        }
        None => {
            info!(dir = ?project_dir, "No configuration file, using defaults");
            PipelineConfig::default()
        }
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    config.validate()?;

    Ok(config)
}

fn find_config(root: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|name| root.join(name))
        .find(|p| p.exists())
}

fn apply_env_overrides<F>(config: &mut PipelineConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let fields: [(&str, &mut String); 4] = [
        ("SPARKIFY_DB_PATH", &mut config.db_path),
        ("SPARKIFY_TARGET_PATH", &mut config.target_path),
        ("SPARKIFY_LOG_PATTERN", &mut config.log_pattern),
        ("SPARKIFY_SONG_PATTERN", &mut config.song_pattern),
    ];
    for (key, field) in fields {
        if let Some(val) = lookup(key) {
            info!(key, old = ?field, new = ?val, "Overriding configuration via ENV");
            *field = val;
        }
    }
}

/// DuckDB path for `config`, relative paths being resolved from `project_dir`.
pub fn resolve_db_path(project_dir: &Path, config: &PipelineConfig) -> String {
    if config.db_path == ":memory:" || Path::new(&config.db_path).is_absolute() {
        return config.db_path.clone();
    }
    project_dir.join(&config.db_path).to_string_lossy().to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::domain::project::MalformedPolicy;
    use anyhow::Result;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() -> Result<()> {
        let dir = tempdir()?;
        let config = load_pipeline_config(dir.path())?;
        assert_eq!(config.log_pattern, PipelineConfig::default().log_pattern);
        Ok(())
    }

    #[test]
    fn test_reads_yaml_file() -> Result<()> {
        let dir = tempdir()?;
        fs::write(
            dir.path().join("sparkify.yaml"),
            "name: demo\ndb-path: ':memory:'\non-malformed: skip_file\n",
        )?;

        let config = load_pipeline_config(dir.path())?;

        assert_eq!(config.name, "demo");
        assert_eq!(config.db_path, ":memory:");
        assert_eq!(config.on_malformed, MalformedPolicy::SkipFile);
        Ok(())
    }

    #[test]
    fn test_invalid_yaml_is_an_error() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("sparkify.yaml"), "on-malformed: [")?;
        let err = load_pipeline_config(dir.path()).unwrap_err();
        assert!(matches!(err, InfrastructureError::YamlError(_)));
        Ok(())
    }

    #[test]
    fn test_env_overrides() {
        let mut config = PipelineConfig::default();
        apply_env_overrides(&mut config, |key| match key {
            "SPARKIFY_DB_PATH" => Some("/tmp/other.duckdb".to_string()),
            "SPARKIFY_LOG_PATTERN" => Some("logs/*.json".to_string()),
            _ => None,
        });
        assert_eq!(config.db_path, "/tmp/other.duckdb");
        assert_eq!(config.log_pattern, "logs/*.json");
        assert_eq!(config.target_path, "target");
    }

    #[test]
    fn test_resolve_db_path() {
        let project = Path::new("/srv/sparkify");
        let mut config = PipelineConfig::default();
        assert_eq!(
            resolve_db_path(project, &config),
            "/srv/sparkify/sparkify.duckdb"
        );

        config.db_path = ":memory:".into();
        assert_eq!(resolve_db_path(project, &config), ":memory:");
    }
}
