// Core data types: the task record and its priority.
use crate::error::{Result, TodoError};
use chrono::{Local, NaiveDate};
use std::fmt;

/// A todo.txt priority: one uppercase ASCII letter, `A` ranking highest.
///
/// The derived ordering follows the letter, so sorting ascending puts `A`
/// before `B`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Priority(char);

impl Priority {
    pub fn new(letter: char) -> Result<Self> {
        if letter.is_ascii_uppercase() {
            Ok(Self(letter))
        } else {
            Err(TodoError::InvalidPriority(letter.to_string()))
        }
    }

    /// Interprets a raw command-line argument: the first character is the
    /// requested letter, anything after it is ignored (`"DD"` means `D`).
    pub fn from_arg(arg: &str) -> Result<Self> {
        match arg.chars().next() {
            Some(letter) => Self::new(letter).map_err(|_| TodoError::InvalidPriority(arg.into())),
            None => Err(TodoError::InvalidPriority(String::new())),
        }
    }

    pub fn letter(self) -> char {
        self.0
    }
}

impl TryFrom<char> for Priority {
    type Error = TodoError;

    fn try_from(letter: char) -> Result<Self> {
        Self::new(letter)
    }
}

/// Renders the serialized marker form, e.g. `(A)`.
impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.0)
    }
}

/// One line of a todo.txt file.
///
/// Parsing lives in `parser.rs` and serialization in `display.rs`; the two
/// are exact inverses as long as no field is mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub completed: bool,
    /// Only ever set on completed tasks.
    pub completion_date: Option<NaiveDate>,
    pub priority: Option<Priority>,
    pub description: String,
}

impl Task {
    /// Creates an open, unprioritized task.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            completed: false,
            completion_date: None,
            priority: None,
            description: description.into(),
        }
    }

    /// Marks the task done as of today's local date.
    /// Returns `false` if it was already completed.
    pub fn complete(&mut self) -> bool {
        self.complete_on(Local::now().date_naive())
    }

    /// Marks the task done on `date`, dropping any priority marker.
    pub fn complete_on(&mut self, date: NaiveDate) -> bool {
        if self.completed {
            return false;
        }
        self.priority = None;
        self.completed = true;
        self.completion_date = Some(date);
        true
    }

    /// Sets the priority letter, validating it first.
    ///
    /// Returns whether anything changed. Re-applying the current priority is
    /// a no-op, and so is prioritising a completed task: completion always
    /// wins in the serialized form, so the letter would never reach the file.
    pub fn set_priority(&mut self, letter: char) -> Result<bool> {
        let priority = Priority::new(letter)?;
        if self.completed || self.priority == Some(priority) {
            return Ok(false);
        }
        self.priority = Some(priority);
        Ok(true)
    }

    /// Removes the priority. Returns whether there was one.
    pub fn clear_priority(&mut self) -> bool {
        self.priority.take().is_some()
    }

    /// The priority used for ordering and reporting. Completed tasks never
    /// carry one.
    pub fn active_priority(&self) -> Option<Priority> {
        if self.completed { None } else { self.priority }
    }

    /// `+project` tags in the description, without the `+`.
    pub fn projects(&self) -> Vec<&str> {
        self.tags_with_prefix('+')
    }

    /// `@context` tags in the description, without the `@`.
    pub fn contexts(&self) -> Vec<&str> {
        self.tags_with_prefix('@')
    }

    fn tags_with_prefix(&self, prefix: char) -> Vec<&str> {
        self.description
            .split_whitespace()
            .filter_map(|word| word.strip_prefix(prefix))
            .filter(|tag| !tag.is_empty())
            .collect()
    }
}
