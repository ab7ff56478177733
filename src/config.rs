use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::timeline::{CacheConfig, TimelineConfig};

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct DiaryConfig {
    pub log: LogConfig,
    pub storage: StorageConfig,
    pub timeline: TimelineSection,
    pub cache: CacheSection,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub db_path: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TimelineSection {
    pub cluster_window_secs: u64,
    pub min_spacing: f64,
    pub max_labels: usize,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CacheSection {
    pub ttl_secs: u64,
    pub max_size: usize,
    pub sweep_interval_secs: u64,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let db_path = default_diary_dir()
            .join("diary.db")
            .to_string_lossy()
            .into_owned();
        Self { db_path }
    }
}

impl Default for TimelineSection {
    fn default() -> Self {
        Self {
            cluster_window_secs: 300,
            min_spacing: 2.0,
            max_labels: 10,
        }
    }
}

impl Default for CacheSection {
    fn default() -> Self {
        Self {
            ttl_secs: 300,
            max_size: 100,
            sweep_interval_secs: 300,
        }
    }
}

/// Returns `~/.diaryline/`, or `./.diaryline/` when no home directory is known.
pub fn default_diary_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".diaryline")
}

/// Returns the default config file path: `~/.diaryline/config.toml`
pub fn default_config_path() -> PathBuf {
    default_diary_dir().join("config.toml")
}

impl DiaryConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            DiaryConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides (DIARYLINE_DB, DIARYLINE_LOG_LEVEL).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("DIARYLINE_DB") {
            self.storage.db_path = val;
        }
        if let Ok(val) = std::env::var("DIARYLINE_LOG_LEVEL") {
            self.log.level = val;
        }
    }

    /// Resolve the database path, expanding `~` if needed.
    pub fn resolved_db_path(&self) -> PathBuf {
        expand_tilde(&self.storage.db_path)
    }

    /// Engine parameters in the units the timeline module works in.
    pub fn timeline_config(&self) -> TimelineConfig {
        TimelineConfig::from(self)
    }
}

impl From<&DiaryConfig> for TimelineConfig {
    fn from(config: &DiaryConfig) -> Self {
        Self {
            cluster_window: config.timeline.cluster_window_secs as f64 * 1000.0,
            min_spacing: config.timeline.min_spacing,
            max_labels: config.timeline.max_labels,
            cache: CacheConfig {
                ttl: config.cache.ttl_secs as f64 * 1000.0,
                max_size: config.cache.max_size,
            },
            sweep_interval: config.cache.sweep_interval_secs as f64 * 1000.0,
        }
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = DiaryConfig::default();
        assert_eq!(config.log.level, "info");
        assert_eq!(config.timeline.cluster_window_secs, 300);
        assert_eq!(config.cache.max_size, 100);
        assert!(config.storage.db_path.ends_with("diary.db"));
    }

    #[test]
    fn defaults_match_engine_defaults() {
        assert_eq!(DiaryConfig::default().timeline_config(), TimelineConfig::default());
    }

    #[test]
    fn parse_toml_config() {
        let toml_str = r#"
[log]
level = "debug"

[storage]
db_path = "/tmp/test.db"

[timeline]
cluster_window_secs = 600
max_labels = 6
"#;
        let config: DiaryConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.storage.db_path, "/tmp/test.db");
        assert_eq!(config.timeline.max_labels, 6);
        // defaults still apply for unset fields
        assert_eq!(config.timeline.min_spacing, 2.0);
        assert_eq!(config.cache.ttl_secs, 300);

        let engine = config.timeline_config();
        assert_eq!(engine.cluster_window, 600_000.0);
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = DiaryConfig::default();
        std::env::set_var("DIARYLINE_DB", "/tmp/override.db");
        std::env::set_var("DIARYLINE_LOG_LEVEL", "trace");

        config.apply_env_overrides();

        assert_eq!(config.storage.db_path, "/tmp/override.db");
        assert_eq!(config.log.level, "trace");

        std::env::remove_var("DIARYLINE_DB");
        std::env::remove_var("DIARYLINE_LOG_LEVEL");
    }
}
