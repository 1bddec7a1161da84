// Parsing of a single todo.txt line into a Task.
//
// Grammar:
//   ["x" SP [DATE SP]] ["(" UPPER ")" SP] DESCRIPTION
//
// The leading marker is decided once, up front, and the remainder of the line
// is kept verbatim as the description. Only the exact shapes above are treated
// as markers; anything else (e.g. "(3) ", "X ", "x 2021-1-5 ") is plain text,
// which is what keeps parse -> serialize byte-exact.
use crate::error::{Result, TodoError};
use crate::model::{Priority, Task};
use chrono::NaiveDate;
use std::str::FromStr;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
const COMPLETION_PREFIX: &str = "x ";

#[derive(Debug, PartialEq)]
pub enum LeadMarker<'a> {
    Completed {
        date: Option<NaiveDate>,
        rest: &'a str,
    },
    Prioritized {
        priority: Priority,
        rest: &'a str,
    },
    Plain(&'a str),
}

/// Classifies the start of a line.
pub fn scan_marker(line: &str) -> LeadMarker<'_> {
    if let Some(after_x) = line.strip_prefix(COMPLETION_PREFIX) {
        return match split_date(after_x) {
            Some((date, rest)) => LeadMarker::Completed {
                date: Some(date),
                rest,
            },
            None => LeadMarker::Completed {
                date: None,
                rest: after_x,
            },
        };
    }

    if let Some((priority, rest)) = split_priority(line) {
        return LeadMarker::Prioritized { priority, rest };
    }

    LeadMarker::Plain(line)
}

/// `YYYY-MM-DD ` at the start of `s`. The shape is checked strictly before
/// handing off to chrono, which would also accept unpadded fields.
fn split_date(s: &str) -> Option<(NaiveDate, &str)> {
    let bytes = s.as_bytes();
    if bytes.len() < 11 || bytes[10] != b' ' {
        return None;
    }
    let shape_ok = bytes[..10].iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        _ => b.is_ascii_digit(),
    });
    if !shape_ok {
        return None;
    }
    let date = NaiveDate::parse_from_str(&s[..10], DATE_FORMAT).ok()?;
    Some((date, &s[11..]))
}

/// `(X) ` at the start of `s`, X being an uppercase ASCII letter.
fn split_priority(s: &str) -> Option<(Priority, &str)> {
    let bytes = s.as_bytes();
    if bytes.len() < 4 || bytes[0] != b'(' || bytes[2] != b')' || bytes[3] != b' ' {
        return None;
    }
    let priority = Priority::new(bytes[1] as char).ok()?;
    Some((priority, &s[4..]))
}

impl Task {
    /// Parses one line. Fails only on empty input or embedded line breaks.
    pub fn parse(line: &str) -> Result<Self> {
        if line.is_empty() {
            return Err(TodoError::EmptyLine);
        }
        if line.contains(['\n', '\r']) {
            return Err(TodoError::MultiLine(line.to_string()));
        }

        let task = match scan_marker(line) {
            LeadMarker::Completed { date, rest } => Task {
                completed: true,
                completion_date: date,
                priority: None,
                description: rest.to_string(),
            },
            LeadMarker::Prioritized { priority, rest } => Task {
                completed: false,
                completion_date: None,
                priority: Some(priority),
                description: rest.to_string(),
            },
            LeadMarker::Plain(rest) => Task::new(rest),
        };
        Ok(task)
    }
}

impl FromStr for Task {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self> {
        Task::parse(s)
    }
}
