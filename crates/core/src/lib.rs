//! Core library for the Serein task tracker.
//!
//! Everything that is not HTTP plumbing lives here: the task entity and its
//! update-merge rules, the SQLite-backed task store, the pure text heuristics
//! (stress scoring, suggestions, voice parsing, rewrite splitting and the
//! local fallback rewrite) and the external rewrite provider.

pub mod ai;
pub mod entities;
pub mod errors;
pub mod heuristics;
pub mod storage;
pub mod view;

pub use entities::{ExportSnapshot, NewTask, Task, TaskPatch, TaskPriority, TaskStatus};
pub use errors::{TaskError, TaskResult};
