//! Configuration loading for Task Timer.
//!
//! Reads `~/.task-timer/config.toml` (or the file named by `TASK_TIMER_CONFIG`).
//! A missing file is not an error; every setting has a default.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use task_timer_types::ui::UiOptions;

pub const CONFIG_ENV_VAR: &str = "TASK_TIMER_CONFIG";

/// Refresh cadence of the display, matching a 10 ms interval timer.
pub const DEFAULT_REFRESH_MS: u64 = 10;
const MIN_REFRESH_MS: u64 = 1;
const MAX_REFRESH_MS: u64 = 1000;

#[derive(Debug, Default, Deserialize)]
pub struct TimerConfig {
    pub app: Option<AppConfig>,
    pub deploy: Option<DeployConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// `"full"` or `"inline"`.
    pub tui: Option<String>,
    /// Use ASCII-only glyphs for borders and separators.
    #[serde(default)]
    pub ascii_only: bool,
    /// Enable a high-contrast color palette.
    #[serde(default)]
    pub high_contrast: bool,
    /// Display refresh interval in milliseconds.
    pub refresh_ms: Option<u64>,
}

/// Defaults for the `deploy` subcommand. Command-line flags take precedence.
#[derive(Debug, Default, Deserialize)]
pub struct DeployConfig {
    pub domain: Option<String>,
    pub site_dir: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
    pub stack_name: Option<String>,
    pub region: Option<String>,
}

impl TimerConfig {
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    /// Loads a specific file. Returns `Ok(None)` when it does not exist.
    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        self.app
            .as_ref()
            .map(|app| UiOptions {
                ascii_only: app.ascii_only,
                high_contrast: app.high_contrast,
            })
            .unwrap_or_default()
    }

    /// Display refresh interval, clamped to 1..=1000 ms.
    #[must_use]
    pub fn refresh_interval(&self) -> Duration {
        let ms = self
            .app
            .as_ref()
            .and_then(|app| app.refresh_ms)
            .unwrap_or(DEFAULT_REFRESH_MS)
            .clamp(MIN_REFRESH_MS, MAX_REFRESH_MS);
        Duration::from_millis(ms)
    }
}

/// Directory holding the config file and logs (`~/.task-timer`).
#[must_use]
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".task-timer"))
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }
    config_dir().map(|dir| dir.join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, DEFAULT_REFRESH_MS, TimerConfig};
    use std::fs;
    use std::time::Duration;
    use tempfile::tempdir;

    fn parse(toml_src: &str) -> TimerConfig {
        toml::from_str(toml_src).expect("valid config")
    }

    #[test]
    fn missing_file_is_none() {
        let dir = tempdir().unwrap();
        let loaded = TimerConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = parse("");
        assert_eq!(
            config.refresh_interval(),
            Duration::from_millis(DEFAULT_REFRESH_MS)
        );
        assert!(!config.ui_options().ascii_only);
        assert!(!config.ui_options().high_contrast);
    }

    #[test]
    fn app_section_is_read() {
        let config = parse(
            r#"
            [app]
            tui = "inline"
            ascii_only = true
            high_contrast = true
            refresh_ms = 50
            "#,
        );
        let app = config.app.as_ref().unwrap();
        assert_eq!(app.tui.as_deref(), Some("inline"));
        assert!(config.ui_options().ascii_only);
        assert!(config.ui_options().high_contrast);
        assert_eq!(config.refresh_interval(), Duration::from_millis(50));
    }

    #[test]
    fn refresh_interval_is_clamped() {
        let config = parse("[app]\nrefresh_ms = 0\n");
        assert_eq!(config.refresh_interval(), Duration::from_millis(1));
        let config = parse("[app]\nrefresh_ms = 60000\n");
        assert_eq!(config.refresh_interval(), Duration::from_millis(1000));
    }

    #[test]
    fn deploy_section_is_read() {
        let config = parse(
            r#"
            [deploy]
            domain = "timer.example.com"
            site_dir = "out"
            stack_name = "TimerStack"
            "#,
        );
        let deploy = config.deploy.unwrap();
        assert_eq!(deploy.domain.as_deref(), Some("timer.example.com"));
        assert_eq!(deploy.site_dir.unwrap().to_str(), Some("out"));
        assert_eq!(deploy.stack_name.as_deref(), Some("TimerStack"));
        assert!(deploy.region.is_none());
    }

    #[test]
    fn parse_error_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[app\nnot toml").unwrap();

        let err = TimerConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert_eq!(err.path(), &path);
    }

    #[test]
    fn load_from_reads_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[app]\nhigh_contrast = true\n").unwrap();

        let config = TimerConfig::load_from(&path).unwrap().unwrap();
        assert!(config.ui_options().high_contrast);
    }
}
