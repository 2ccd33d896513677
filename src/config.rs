//! Application configuration: TOML file loading, CLI overrides, and defaults.
//!
//! Resolution order (first found wins, values merge/override):
//! 1. CLI flags (`--no-watcher`, `--log-level`, `--theme`)
//! 2. `--config <file>`
//! 3. `$NERX_CONFIG` environment variable (path to config file)
//! 4. Project-local `.nerx.toml` in the current working directory
//! 5. Global `~/.config/ner-explorer/config.toml`
//! 6. Built-in defaults

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::fs::notes::NOTES_FILE_NAME;
use crate::fs::operations::DEFAULT_FIND_MAX_DEPTH;
use crate::fs::watcher::DEFAULT_DEBOUNCE_MS;
use crate::session::SessionOptions;

/// Directory name used under the platform config and data directories.
pub const APP_DIR_NAME: &str = "ner-explorer";

// ── Section configs ──────────────────────────────────────────────────────────

/// General application settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct GeneralConfig {
    /// Starting directory (overridden by CLI positional arg).
    pub default_path: Option<String>,
}

/// Recursive `find` settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct FindConfig {
    /// Deepest level below the current directory that is searched.
    pub max_depth: Option<usize>,
}

/// Per-directory notes file settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct NotesConfig {
    /// Name of the notes file kept in each directory.
    pub file_name: Option<String>,
}

/// Filesystem watcher settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct WatcherConfig {
    /// Refresh the listing when the current directory changes on disk.
    pub enabled: Option<bool>,
    /// Debounce interval in milliseconds.
    pub debounce_ms: Option<u64>,
}

/// Log file settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct LogConfig {
    pub enabled: Option<bool>,
    /// Filter directive, e.g. `info` or `ner_explorer=debug`.
    pub level: Option<String>,
    /// Directory holding the rolling log files.
    pub dir: Option<String>,
}

/// Theme configuration section.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeConfig {
    /// Color scheme: "dark" or "light".
    pub scheme: Option<String>,
}

// ── Top-level config ─────────────────────────────────────────────────────────

/// Top-level application configuration.
///
/// All fields are optional so that partial configs from different sources
/// can be merged together (CLI overrides file, file overrides defaults).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub find: FindConfig,
    pub notes: NotesConfig,
    pub watcher: WatcherConfig,
    pub log: LogConfig,
    pub theme: ThemeConfig,
}

/// Default log filter.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// ── Config file locator ──────────────────────────────────────────────────────

/// Candidate config file paths, highest priority first.
///
/// The CLI `--config` path is handled separately.
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(env_path) = std::env::var("NERX_CONFIG") {
        paths.push(PathBuf::from(env_path));
    }

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(".nerx.toml"));
    }

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join(APP_DIR_NAME).join("config.toml"));
    }

    paths
}

/// Try to read and parse a TOML config file. Returns `None` if the file
/// doesn't exist or can't be parsed (with a warning printed to stderr).
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str::<AppConfig>(&content) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            eprintln!(
                "Warning: failed to parse config file {}: {}",
                path.display(),
                e
            );
            None
        }
    }
}

// ── Merge logic ──────────────────────────────────────────────────────────────

impl AppConfig {
    /// Merge `other` on top of `self`; `other`'s `Some` values win.
    pub fn merge(self, other: &AppConfig) -> AppConfig {
        AppConfig {
            general: GeneralConfig {
                default_path: other
                    .general
                    .default_path
                    .clone()
                    .or(self.general.default_path),
            },
            find: FindConfig {
                max_depth: other.find.max_depth.or(self.find.max_depth),
            },
            notes: NotesConfig {
                file_name: other.notes.file_name.clone().or(self.notes.file_name),
            },
            watcher: WatcherConfig {
                enabled: other.watcher.enabled.or(self.watcher.enabled),
                debounce_ms: other.watcher.debounce_ms.or(self.watcher.debounce_ms),
            },
            log: LogConfig {
                enabled: other.log.enabled.or(self.log.enabled),
                level: other.log.level.clone().or(self.log.level),
                dir: other.log.dir.clone().or(self.log.dir),
            },
            theme: ThemeConfig {
                scheme: other.theme.scheme.clone().or(self.theme.scheme),
            },
        }
    }

    /// Load the final merged configuration.
    ///
    /// `cli_config_path` is an explicit config file path from `--config`.
    /// `cli_overrides` are partial overrides derived from CLI flags.
    pub fn load(cli_config_path: Option<&Path>, cli_overrides: Option<&AppConfig>) -> AppConfig {
        let mut config = AppConfig::default();

        // Lowest priority first so higher ones overwrite.
        for path in candidate_paths().iter().rev() {
            if let Some(file_cfg) = load_file(path) {
                config = config.merge(&file_cfg);
            }
        }

        if let Some(cli_path) = cli_config_path {
            if let Some(file_cfg) = load_file(cli_path) {
                config = config.merge(&file_cfg);
            }
        }

        if let Some(overrides) = cli_overrides {
            config = config.merge(overrides);
        }

        config
    }

    // ── Convenience getters with built-in defaults ──────────────────────────

    pub fn default_path(&self) -> Option<&str> {
        self.general.default_path.as_deref()
    }

    pub fn find_max_depth(&self) -> usize {
        self.find.max_depth.unwrap_or(DEFAULT_FIND_MAX_DEPTH)
    }

    pub fn notes_file_name(&self) -> &str {
        self.notes
            .file_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(NOTES_FILE_NAME)
    }

    /// Whether the watcher is enabled.
    pub fn watcher_enabled(&self) -> bool {
        self.watcher.enabled.unwrap_or(true)
    }

    /// Watcher debounce interval in milliseconds.
    pub fn debounce_ms(&self) -> u64 {
        self.watcher.debounce_ms.unwrap_or(DEFAULT_DEBOUNCE_MS)
    }

    pub fn log_enabled(&self) -> bool {
        self.log.enabled.unwrap_or(true)
    }

    pub fn log_level(&self) -> &str {
        self.log.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    /// Log directory: configured, else `<data_local_dir>/ner-explorer/logs`.
    pub fn log_dir(&self) -> Option<PathBuf> {
        match &self.log.dir {
            Some(dir) => Some(PathBuf::from(dir)),
            None => dirs::data_local_dir().map(|d| d.join(APP_DIR_NAME).join("logs")),
        }
    }

    /// Theme scheme: "dark" or "light".
    pub fn theme_scheme(&self) -> &str {
        self.theme.scheme.as_deref().unwrap_or("dark")
    }

    /// Options handed to the session.
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            notes_file: self.notes_file_name().to_string(),
            find_max_depth: self.find_max_depth(),
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
