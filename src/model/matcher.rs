// Filter matching for list queries.
//
// A query matches when it occurs verbatim (case-sensitive) anywhere in the
// task's serialized line, markers included, so "x 2011" finds tasks completed
// in 2011 and "(A)" finds open A-priority tasks.
use crate::model::Task;

impl Task {
    pub fn matches_query(&self, query: &str) -> bool {
        query.is_empty() || self.to_line().contains(query)
    }
}
