/*! Application context abstraction for filesystem paths.

`AppContext` decides where the config file, the default todo.txt and the
log file live. Two implementations:

- `StandardContext`: `directories::ProjectDirs`, or everything under an
  explicit root when `--root` is given.
- `TestContext` (tests only): a `tempfile` directory, removed when dropped.

Code that touches the filesystem takes a `&dyn AppContext` instead of
looking paths up globally.
*/

use crate::storage::TODO_FILENAME;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

pub const LOG_FILENAME: &str = "todo.log";

pub trait AppContext: Send + Sync + std::fmt::Debug {
    fn get_data_dir(&self) -> Result<PathBuf>;
    fn get_config_dir(&self) -> Result<PathBuf>;
    fn get_cache_dir(&self) -> Result<PathBuf>;

    fn get_config_file_path(&self) -> Result<PathBuf> {
        Ok(self.get_config_dir()?.join("config.toml"))
    }

    /// Where the task list lives when nothing overrides it.
    fn get_default_todo_path(&self) -> Result<PathBuf> {
        Ok(self.get_data_dir()?.join(TODO_FILENAME))
    }

    fn get_log_path(&self) -> Option<PathBuf> {
        self.get_cache_dir().ok().map(|p| p.join(LOG_FILENAME))
    }
}

// --- Production Implementation ---

#[derive(Clone, Debug)]
pub struct StandardContext {
    override_root: Option<PathBuf>,
}

impl StandardContext {
    /// When `override_root` is `Some(path)`, all directories are created
    /// under that root as `data`, `config` and `cache`.
    pub fn new(override_root: Option<PathBuf>) -> Self {
        Self { override_root }
    }

    fn ensure_exists(path: PathBuf) -> Result<PathBuf> {
        if !path.exists() {
            std::fs::create_dir_all(&path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(path)
    }

    fn get_proj_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("org", "todotxt", "todo-txt")
    }

    fn resolve(&self, subdir: &str) -> Result<PathBuf> {
        if let Some(root) = &self.override_root {
            return Self::ensure_exists(root.join(subdir));
        }
        let proj = Self::get_proj_dirs().ok_or_else(|| anyhow::anyhow!("No home directory"))?;
        let dir = match subdir {
            "data" => proj.data_dir(),
            "config" => proj.config_dir(),
            _ => proj.cache_dir(),
        };
        Self::ensure_exists(dir.to_path_buf())
    }
}

impl AppContext for StandardContext {
    fn get_data_dir(&self) -> Result<PathBuf> {
        self.resolve("data")
    }

    fn get_config_dir(&self) -> Result<PathBuf> {
        self.resolve("config")
    }

    fn get_cache_dir(&self) -> Result<PathBuf> {
        self.resolve("cache")
    }
}

// --- Test Implementation ---

/// Throwaway root for unit tests; the directory goes away with the value.
#[cfg(test)]
#[derive(Debug)]
pub struct TestContext {
    dir: tempfile::TempDir,
}

#[cfg(test)]
impl TestContext {
    pub fn new() -> Self {
        let dir = tempfile::Builder::new()
            .prefix("todo_txt_test_")
            .tempdir()
            .unwrap();
        Self { dir }
    }

    pub fn root(&self) -> &std::path::Path {
        self.dir.path()
    }
}

#[cfg(test)]
impl AppContext for TestContext {
    fn get_data_dir(&self) -> Result<PathBuf> {
        StandardContext::ensure_exists(self.root().join("data"))
    }

    fn get_config_dir(&self) -> Result<PathBuf> {
        StandardContext::ensure_exists(self.root().join("config"))
    }

    fn get_cache_dir(&self) -> Result<PathBuf> {
        StandardContext::ensure_exists(self.root().join("cache"))
    }
}
