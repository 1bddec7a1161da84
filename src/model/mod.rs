pub mod display;
pub mod item;
pub mod matcher;
pub mod parser;

pub use item::{Priority, Task};
pub use parser::{LeadMarker, scan_marker};
