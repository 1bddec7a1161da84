// Summary statistics over a task list and their text rendering.
use crate::model::Priority;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReportSummary {
    pub total: usize,
    pub completed: usize,
    /// Open tasks per priority letter, ascending by letter.
    pub by_priority: BTreeMap<Priority, usize>,
}

impl ReportSummary {
    /// `completed / total * 100`, or `0.0` for an empty list.
    pub fn completion_percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64 * 100.0
        }
    }
}

/// ```text
/// 5 tasks, 1 completed (20.0%)
/// Task counts by priority:
/// (A) -> 1
/// (B) -> 1
/// ```
impl fmt::Display for ReportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} tasks, {} completed ({:.1}%)",
            self.total,
            self.completed,
            self.completion_percentage()
        )?;
        writeln!(f, "Task counts by priority:")?;
        for (priority, count) in &self.by_priority {
            writeln!(f, "{} -> {}", priority, count)?;
        }
        Ok(())
    }
}
