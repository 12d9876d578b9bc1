//! Task persistence.

mod sqlite;

use async_trait::async_trait;

use crate::entities::{ExportSnapshot, NewTask, Task, TaskPatch};
use crate::errors::TaskResult;

pub use sqlite::SqliteStore;

/// Storage interface for task persistence.
///
/// Single-record semantics throughout: no transactions span records, no
/// optimistic-concurrency checks, and concurrent updates to one id race with
/// last write winning.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Create the schema if it does not exist yet.
    async fn initialize(&self) -> TaskResult<()>;

    /// All tasks, most recently created first.
    async fn list(&self) -> TaskResult<Vec<Task>>;

    /// Load a single task, failing with `TaskNotFound` for unknown ids.
    async fn get(&self, id: i64) -> TaskResult<Task>;

    /// Validate and insert a new task. Computes the stress level and the
    /// creation-time suggestions, assigns the id and timestamps.
    async fn create(&self, new: NewTask) -> TaskResult<Task>;

    /// Merge a partial update into an existing task and persist it,
    /// returning the full updated record.
    async fn update(&self, id: i64, patch: TaskPatch) -> TaskResult<Task>;

    /// Permanently remove a task.
    async fn delete(&self, id: i64) -> TaskResult<()>;

    /// Snapshot of every task in insertion order, with export metadata.
    async fn export_all(&self) -> TaskResult<ExportSnapshot>;
}
