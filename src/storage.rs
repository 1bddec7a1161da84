// Reads and writes the todo.txt backing file.
//
// Writes go to a `<file>.tmp` sidecar that is renamed over the target, so a
// reader sees either the old or the new list, never a half-written one.
// Read-modify-write cycles hold an exclusive lock on `<file>.lock` from the
// read until the rename.
use crate::store::TaskList;
use anyhow::{Context, Result};
use fs2::FileExt;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

pub const TODO_FILENAME: &str = "todo.txt";

pub struct LocalStorage;

impl LocalStorage {
    /// `<file><suffix>` next to `file_path`, keeping the whole file name.
    fn sidecar_path(file_path: &Path, suffix: &str) -> PathBuf {
        let mut name = OsString::from(file_path.as_os_str());
        name.push(suffix);
        PathBuf::from(name)
    }

    fn get_lock_path(file_path: &Path) -> PathBuf {
        Self::sidecar_path(file_path, ".lock")
    }

    fn get_tmp_path(file_path: &Path) -> PathBuf {
        Self::sidecar_path(file_path, ".tmp")
    }

    pub fn with_lock<F, T>(file_path: &Path, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        if let Some(parent) = file_path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        let lock_path = Self::get_lock_path(file_path);
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .with_context(|| format!("Failed to open lock file {:?}", lock_path))?;

        file.lock_exclusive()?;
        let result = f();
        file.unlock()?;
        result
    }

    /// Write to `<file>.tmp`, then rename it over `path`.
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = Self::get_tmp_path(path);
        fs::write(&tmp_path, contents)
            .with_context(|| format!("Failed to write {:?}", tmp_path))?;
        fs::rename(&tmp_path, path)
            .with_context(|| format!("Failed to replace {:?}", path))?;
        Ok(())
    }

    /// Raw lines of the file, split on `\n`, `\r\n` and lone `\r`. A missing
    /// file is an empty list. No lock is taken: writers only ever rename.
    pub fn load_lines(path: &Path) -> Result<Vec<String>> {
        if !path.exists() {
            log::debug!("{:?} does not exist yet, starting empty", path);
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read todo file {:?}", path))?;
        Ok(TaskList::split_lines(&content).map(str::to_string).collect())
    }

    fn write_lines(path: &Path, lines: &[String]) -> Result<()> {
        let content: String = lines.iter().map(|l| format!("{}\n", l)).collect();
        Self::atomic_write(path, &content)?;
        log::debug!("Wrote {} tasks to {:?}", lines.len(), path);
        Ok(())
    }

    /// Rewrites the whole file: one line per entry, each newline-terminated.
    pub fn save_lines(path: &Path, lines: &[String]) -> Result<()> {
        Self::with_lock(path, || Self::write_lines(path, lines))
    }

    pub fn load(path: &Path) -> Result<TaskList> {
        let lines = Self::load_lines(path)?;
        let list = TaskList::load(&lines)
            .with_context(|| format!("Failed to parse todo file {:?}", path))?;
        log::debug!("Loaded {} tasks from {:?}", list.len(), path);
        Ok(list)
    }

    pub fn save(path: &Path, list: &TaskList) -> Result<()> {
        Self::save_lines(path, &list.save())
    }

    /// Loads, applies `op` and writes the list back if `op` reports a change,
    /// all under one lock. Returns `op`'s value and whether the file was
    /// rewritten.
    pub fn update<T, F>(path: &Path, op: F) -> Result<(T, bool)>
    where
        F: FnOnce(&mut TaskList) -> Result<(T, bool)>,
    {
        Self::with_lock(path, || {
            let mut list = Self::load(path)?;
            let (value, changed) = op(&mut list)?;
            if changed {
                Self::write_lines(path, &list.save())?;
            }
            Ok((value, changed))
        })
    }
}
