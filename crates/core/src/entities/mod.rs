//! Entity types for the task tracker.

mod task;

pub use task::{ExportSnapshot, NewTask, Task, TaskPatch, TaskPriority, TaskStatus};
