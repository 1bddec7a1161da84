// Crate root library declaration and module exports.
pub mod cli;
pub mod config;
pub mod context;
pub mod controller;
pub mod error;
pub mod model;
pub mod report;
pub mod storage;
pub mod store;

pub use error::{ErrorKind, TodoError};
pub use model::{Priority, Task};
pub use report::ReportSummary;
pub use store::TaskList;
