// Reads `config.toml` and resolves the settings derived from it.
use crate::context::AppContext;
use anyhow::Result;
use log::LevelFilter;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Config {
    /// Explicit todo.txt location; defaults to the data directory.
    #[serde(default)]
    pub todo_file: Option<PathBuf>,
    /// Level for the log file: off, error, warn, info, debug or trace.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Make `list` priority-sorted without passing `--sorted`.
    #[serde(default)]
    pub sort_by_priority: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            todo_file: None,
            log_level: default_log_level(),
            sort_by_priority: false,
        }
    }
}

impl Config {
    /// Load the configuration from disk. A missing file yields the defaults;
    /// an unreadable or malformed one is an error.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(config)
    }

    /// Picks the todo file: an explicit path (flag or env) wins, then the
    /// config value, then the context default.
    pub fn resolve_todo_path(
        &self,
        ctx: &dyn AppContext,
        explicit: Option<PathBuf>,
    ) -> Result<PathBuf> {
        if let Some(path) = explicit.or_else(|| self.todo_file.clone()) {
            return Ok(path);
        }
        ctx.get_default_todo_path()
    }

    /// Unknown level names fall back to `info`.
    pub fn log_level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::Info)
    }
}
