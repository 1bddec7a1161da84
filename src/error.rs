// Error types shared by the task model and the task list.
use thiserror::Error;

/// Broad classification of a [`TodoError`], for callers that only care about
/// which family of failure occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Parse,
    IndexOutOfRange,
    Validation,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TodoError {
    /// An empty line cannot be interpreted as a task.
    #[error("cannot parse an empty line as a task")]
    EmptyLine,

    /// A task record must fit on a single line of the backing file.
    #[error("task text must be a single line: {0:?}")]
    MultiLine(String),

    #[error("index {index} is out of range (list has {len} tasks)")]
    IndexOutOfRange { index: usize, len: usize },

    /// Priorities are a single uppercase letter A-Z.
    #[error("invalid priority {0:?}: expected a single letter A-Z")]
    InvalidPriority(String),
}

impl TodoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TodoError::EmptyLine | TodoError::MultiLine(_) => ErrorKind::Parse,
            TodoError::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
            TodoError::InvalidPriority(_) => ErrorKind::Validation,
        }
    }
}

pub type Result<T> = std::result::Result<T, TodoError>;
