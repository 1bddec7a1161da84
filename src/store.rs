// In-memory ordered task list and its index-based operations.
use crate::error::{Result, TodoError};
use crate::model::Task;
use crate::report::ReportSummary;
use chrono::NaiveDate;

/// A task paired with its position in the list.
pub type Entry<'a> = (usize, &'a Task);

/// Ordered tasks as they appear in the backing file. Indices are 0-based
/// positions; deleting shifts every later task down by one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list from raw lines, one task per non-empty line.
    pub fn load<I, S>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tasks = lines
            .into_iter()
            .filter(|line| !line.as_ref().is_empty())
            .map(|line| Task::parse(line.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { tasks })
    }

    /// Parses the full text of a todo.txt file.
    pub fn parse(content: &str) -> Result<Self> {
        Self::load(Self::split_lines(content))
    }

    /// Splits file text into lines on `\n`, `\r\n` or a lone `\r`. A `\r\n`
    /// pair yields an extra empty piece, which `load` skips like any blank line.
    pub fn split_lines(content: &str) -> impl Iterator<Item = &str> {
        content
            .strip_suffix('\n')
            .unwrap_or(content)
            .split(['\n', '\r'])
    }

    /// One serialized line per task, in current order.
    pub fn save(&self) -> Vec<String> {
        self.tasks.iter().map(Task::to_line).collect()
    }

    /// The file body: every line newline-terminated, nothing for an empty list.
    pub fn to_content(&self) -> String {
        self.tasks
            .iter()
            .map(|t| format!("{}\n", t))
            .collect::<String>()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn list(&self) -> Vec<Entry<'_>> {
        self.tasks.iter().enumerate().collect()
    }

    /// Priority order, `A` first, unprioritized (and completed) tasks last.
    /// Ties keep file order.
    pub fn list_sorted(&self) -> Vec<Entry<'_>> {
        let mut entries = self.list();
        sort_by_priority(&mut entries);
        entries
    }

    pub fn list_filtered(&self, query: &str) -> Vec<Entry<'_>> {
        self.tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.matches_query(query))
            .collect()
    }

    pub fn add(&mut self, line: &str) -> Result<usize> {
        let task = Task::parse(line)?;
        self.tasks.push(task);
        Ok(self.tasks.len() - 1)
    }

    pub fn complete(&mut self, index: usize) -> Result<bool> {
        Ok(self.entry_mut(index)?.complete())
    }

    pub fn complete_on(&mut self, index: usize, date: NaiveDate) -> Result<bool> {
        Ok(self.entry_mut(index)?.complete_on(date))
    }

    pub fn delete(&mut self, index: usize) -> Result<Task> {
        self.check_index(index)?;
        Ok(self.tasks.remove(index))
    }

    /// Returns whether the task changed; the same letter twice is a no-op.
    pub fn prioritise(&mut self, index: usize, letter: char) -> Result<bool> {
        self.entry_mut(index)?.set_priority(letter)
    }

    pub fn deprioritise(&mut self, index: usize) -> Result<bool> {
        Ok(self.entry_mut(index)?.clear_priority())
    }

    pub fn report(&self) -> ReportSummary {
        let mut summary = ReportSummary {
            total: self.tasks.len(),
            ..Default::default()
        };
        for task in &self.tasks {
            if task.completed {
                summary.completed += 1;
            }
            if let Some(priority) = task.active_priority() {
                *summary.by_priority.entry(priority).or_insert(0) += 1;
            }
        }
        summary
    }

    pub fn check_index(&self, index: usize) -> Result<()> {
        if index < self.tasks.len() {
            Ok(())
        } else {
            Err(TodoError::IndexOutOfRange {
                index,
                len: self.tasks.len(),
            })
        }
    }

    fn entry_mut(&mut self, index: usize) -> Result<&mut Task> {
        self.check_index(index)?;
        Ok(&mut self.tasks[index])
    }
}

/// Stable sort of entries by priority letter, unprioritized last.
pub fn sort_by_priority(entries: &mut [Entry<'_>]) {
    entries.sort_by_key(|(_, task)| {
        let priority = task.active_priority();
        (priority.is_none(), priority)
    });
}
