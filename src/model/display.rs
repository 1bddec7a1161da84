// Serialization of a Task back to its todo.txt line.
use crate::model::Task;
use crate::model::parser::DATE_FORMAT;
use std::fmt;

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Completion wins over priority: a done task never shows its letter.
        if self.completed {
            f.write_str("x ")?;
            if let Some(date) = self.completion_date {
                write!(f, "{} ", date.format(DATE_FORMAT))?;
            }
        } else if let Some(priority) = self.priority {
            write!(f, "{} ", priority)?;
        }
        f.write_str(&self.description)
    }
}

impl Task {
    /// The exact line written to the backing file.
    pub fn to_line(&self) -> String {
        self.to_string()
    }
}
