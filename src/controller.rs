//! Operations layer between the command line and the task list.
//!
//! Every call is one load -> operate -> save cycle against the backing file.
//! Validation happens inside the operation, before anything is mutated, and
//! the file is only rewritten when the list actually changed: a failed or
//! no-op operation leaves the file exactly as it was.
use crate::error::Result as TodoResult;
use crate::model::{Priority, Task};
use crate::report::ReportSummary;
use crate::storage::LocalStorage;
use crate::store::{Entry, TaskList, sort_by_priority};
use anyhow::Result;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct ListOptions<'a> {
    pub sorted: bool,
    pub filter: Option<&'a str>,
}

/// `[<index>]: <serialized-task>`
pub fn format_entry((index, task): Entry<'_>) -> String {
    format!("[{}]: {}", index, task)
}

#[derive(Debug, Clone)]
pub struct TodoController {
    path: PathBuf,
}

impl TodoController {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<TaskList> {
        LocalStorage::load(&self.path)
    }

    /// Applies `op` under the file lock; saves only if `op` reports a change.
    fn mutate<T, F>(&self, name: &str, op: F) -> Result<T>
    where
        F: FnOnce(&mut TaskList) -> TodoResult<(T, bool)>,
    {
        let (value, changed) = LocalStorage::update(&self.path, |list| Ok(op(list)?))?;
        if changed {
            log::info!("{}: saved {:?}", name, self.path);
        } else {
            log::info!("{}: nothing changed, file left untouched", name);
        }
        Ok(value)
    }

    /// Rendered listing lines. With both options, filtering happens first and
    /// the survivors are sorted; indices always refer to file positions.
    pub fn list(&self, options: &ListOptions<'_>) -> Result<Vec<String>> {
        let list = self.load()?;
        let mut entries = match options.filter {
            Some(query) => list.list_filtered(query),
            None => list.list(),
        };
        if options.sorted {
            sort_by_priority(&mut entries);
        }
        Ok(entries.into_iter().map(format_entry).collect())
    }

    /// Appends a task, returning its index.
    pub fn add(&self, line: &str) -> Result<usize> {
        self.mutate("add", |list| Ok((list.add(line)?, true)))
    }

    pub fn complete(&self, index: usize) -> Result<()> {
        self.mutate("complete", |list| Ok(((), list.complete(index)?)))
    }

    /// Removes a task, returning it.
    pub fn delete(&self, index: usize) -> Result<Task> {
        self.mutate("delete", |list| Ok((list.delete(index)?, true)))
    }

    /// `priority_arg` is the raw argument; its first character is the letter.
    pub fn prioritise(&self, index: usize, priority_arg: &str) -> Result<()> {
        self.mutate("prioritise", |list| {
            list.check_index(index)?;
            let priority = Priority::from_arg(priority_arg)?;
            Ok(((), list.prioritise(index, priority.letter())?))
        })
    }

    pub fn deprioritise(&self, index: usize) -> Result<()> {
        self.mutate("deprioritise", |list| Ok(((), list.deprioritise(index)?)))
    }

    pub fn report(&self) -> Result<ReportSummary> {
        Ok(self.load()?.report())
    }
}
