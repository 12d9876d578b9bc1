//! SQLite-backed task store.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, Row};
use tracing::debug;

use crate::entities::{ExportSnapshot, NewTask, Task, TaskPatch, TaskStatus};
use crate::errors::{TaskError, TaskResult};
use crate::heuristics;

use super::TaskStore;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS tasks (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    title          TEXT NOT NULL CHECK(length(trim(title)) > 0),
    description    TEXT NOT NULL DEFAULT '',
    status         TEXT NOT NULL DEFAULT 'todo'
                   CHECK(status IN ('todo', 'in_progress', 'completed')),
    completed      INTEGER NOT NULL DEFAULT 0,
    priority       TEXT NOT NULL DEFAULT 'medium'
                   CHECK(priority IN ('low', 'medium', 'high', 'urgent')),
    stress_level   INTEGER NOT NULL DEFAULT 1 CHECK(stress_level BETWEEN 1 AND 5),
    due_date       TEXT,
    tags           TEXT NOT NULL DEFAULT '',
    ai_suggestions TEXT NOT NULL DEFAULT '',
    created_at     TEXT NOT NULL,
    updated_at     TEXT NOT NULL
);
";

const TASK_COLUMNS: &str = "id, title, description, status, completed, priority, \
                            stress_level, due_date, tags, ai_suggestions, created_at, updated_at";

/// Task store persisting to a single local SQLite database.
///
/// The connection sits behind a mutex; every operation is a fast single-row
/// read or write, so requests simply serialize on it.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the database at `path`.
    pub fn open(path: impl AsRef<Path>) -> TaskResult<Self> {
        let conn = Connection::open(path)?;
        Self::set_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// In-memory database for tests.
    pub fn open_in_memory() -> TaskResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::set_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn set_pragmas(conn: &Connection) -> TaskResult<()> {
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )?;
        Ok(())
    }

    fn conn(&self) -> TaskResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| TaskError::Storage {
            reason: "connection mutex poisoned".to_string(),
        })
    }

    fn select_all(conn: &Connection, order_by: &str) -> TaskResult<Vec<Task>> {
        let sql = format!("SELECT {TASK_COLUMNS} FROM tasks ORDER BY {order_by}");
        let mut stmt = conn.prepare(&sql)?;
        let tasks = stmt
            .query_map([], row_to_task)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tasks)
    }

    fn select_one(conn: &Connection, id: i64) -> TaskResult<Task> {
        let sql = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1");
        let mut stmt = conn.prepare(&sql)?;
        stmt.query_row(params![id], row_to_task)
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => TaskError::TaskNotFound { id },
                other => other.into(),
            })
    }
}

fn row_to_task(row: &Row<'_>) -> rusqlite::Result<Task> {
    let status: String = row.get("status")?;
    let priority: String = row.get("priority")?;
    let due_date: Option<String> = row.get("due_date")?;
    let created_at: String = row.get("created_at")?;
    let updated_at: String = row.get("updated_at")?;

    Ok(Task {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        status: parse_column(&status)?,
        completed: row.get("completed")?,
        priority: parse_column(&priority)?,
        stress_level: row.get::<_, i64>("stress_level")?.clamp(1, 5) as u8,
        due_date: due_date
            .map(|d| {
                NaiveDate::parse_from_str(&d, "%Y-%m-%d")
                    .map_err(|e| conversion_error(Box::new(e)))
            })
            .transpose()?,
        tags: row.get("tags")?,
        ai_suggestions: row.get("ai_suggestions")?,
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}

fn parse_column<T: std::str::FromStr<Err = TaskError>>(raw: &str) -> rusqlite::Result<T> {
    raw.parse().map_err(|e| conversion_error(Box::new(e)))
}

fn parse_timestamp(raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| conversion_error(Box::new(e)))
}

fn conversion_error(
    err: Box<dyn std::error::Error + Send + Sync + 'static>,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, err)
}

fn write_task(conn: &Connection, task: &Task) -> TaskResult<()> {
    conn.execute(
        "UPDATE tasks SET title = ?1, description = ?2, status = ?3, completed = ?4, \
         priority = ?5, stress_level = ?6, due_date = ?7, tags = ?8, updated_at = ?9 \
         WHERE id = ?10",
        params![
            task.title,
            task.description,
            task.status.to_string(),
            task.completed,
            task.priority.to_string(),
            i64::from(task.stress_level),
            task.due_date.map(|d| d.to_string()),
            task.tags,
            task.updated_at.to_rfc3339(),
            task.id,
        ],
    )?;
    Ok(())
}

#[async_trait]
impl TaskStore for SqliteStore {
    async fn initialize(&self) -> TaskResult<()> {
        self.conn()?.execute_batch(SCHEMA)?;
        Ok(())
    }

    async fn list(&self) -> TaskResult<Vec<Task>> {
        let conn = self.conn()?;
        Self::select_all(&conn, "created_at DESC, id DESC")
    }

    async fn get(&self, id: i64) -> TaskResult<Task> {
        let conn = self.conn()?;
        Self::select_one(&conn, id)
    }

    async fn create(&self, new: NewTask) -> TaskResult<Task> {
        new.validate()?;

        let now = Utc::now();
        let stress_level = heuristics::stress_score(&new.title, &new.description, new.priority);
        let ai_suggestions = heuristics::suggestions(&new.title, &new.description);

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO tasks (title, description, status, completed, priority, stress_level, \
             due_date, tags, ai_suggestions, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                new.title,
                new.description,
                TaskStatus::Todo.to_string(),
                false,
                new.priority.to_string(),
                i64::from(stress_level),
                new.due_date.map(|d| d.to_string()),
                new.tags,
                ai_suggestions,
                now.to_rfc3339(),
                now.to_rfc3339(),
            ],
        )?;
        let id = conn.last_insert_rowid();
        debug!(id, stress_level, "task created");

        Ok(Task {
            id,
            title: new.title,
            description: new.description,
            status: TaskStatus::Todo,
            completed: false,
            priority: new.priority,
            stress_level,
            due_date: new.due_date,
            tags: new.tags,
            ai_suggestions,
            created_at: now,
            updated_at: now,
        })
    }

    async fn update(&self, id: i64, patch: TaskPatch) -> TaskResult<Task> {
        let conn = self.conn()?;
        let mut task = Self::select_one(&conn, id)?;
        task.apply_patch(&patch)?;
        write_task(&conn, &task)?;
        debug!(id, "task updated");
        Ok(task)
    }

    async fn delete(&self, id: i64) -> TaskResult<()> {
        let conn = self.conn()?;
        let affected = conn.execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        if affected == 0 {
            return Err(TaskError::TaskNotFound { id });
        }
        debug!(id, "task deleted");
        Ok(())
    }

    async fn export_all(&self) -> TaskResult<ExportSnapshot> {
        let conn = self.conn()?;
        let tasks = Self::select_all(&conn, "id ASC")?;
        Ok(ExportSnapshot {
            export_date: Utc::now(),
            total_tasks: tasks.len(),
            tasks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::TaskPriority;

    async fn setup() -> SqliteStore {
        let store = SqliteStore::open_in_memory().unwrap();
        store.initialize().await.unwrap();
        store
    }

    fn new_task(title: &str) -> NewTask {
        NewTask {
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_defaults_and_invariant() {
        let store = setup().await;
        let task = store.create(new_task("Première tâche")).await.unwrap();

        assert_eq!(task.status, TaskStatus::Todo);
        assert!(!task.completed);
        assert_eq!(task.priority, TaskPriority::Medium);
        assert_eq!(task.completed, task.status == TaskStatus::Completed);
        // base 1 + medium 1.
        assert_eq!(task.stress_level, 2);
    }

    #[tokio::test]
    async fn test_create_requires_title() {
        let store = setup().await;
        let err = store.create(new_task("  ")).await.unwrap_err();
        assert!(matches!(err, TaskError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_create_generates_suggestions_once() {
        let store = setup().await;
        let task = store
            .create(NewTask {
                title: "Développer le projet".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(task.ai_suggestions.contains("sous-tâches"));

        // Suggestions are creation-time only: editing the title away from the
        // trigger keywords must not touch them.
        let updated = store
            .update(
                task.id,
                TaskPatch {
                    title: Some("Acheter du pain".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.ai_suggestions, task.ai_suggestions);
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let store = setup().await;
        store.create(new_task("ancienne")).await.unwrap();
        store.create(new_task("récente")).await.unwrap();

        let tasks = store.list().await.unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].title, "récente");
        assert_eq!(tasks[1].title, "ancienne");
    }

    #[tokio::test]
    async fn test_update_round_trip_recomputes_stress() {
        let store = setup().await;
        let task = store
            .create(NewTask {
                title: "Tâche calme".to_string(),
                description: "routine".to_string(),
                priority: TaskPriority::High,
                ..Default::default()
            })
            .await
            .unwrap();

        let updated = store
            .update(
                task.id,
                TaskPatch {
                    title: Some("urgent deadline".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        // Recomputed with the new title but the unchanged description and
        // priority: 1 + 2 (keywords) - 0.5 (routine) + 2 (high) = 4.5 -> 5.
        assert_eq!(updated.stress_level, 5);

        let fetched = store.get(task.id).await.unwrap();
        assert_eq!(fetched.stress_level, 5);
        assert_eq!(fetched.description, "routine");
        assert_eq!(fetched.priority, TaskPriority::High);
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let store = setup().await;
        let err = store.update(999, TaskPatch::default()).await.unwrap_err();
        assert!(matches!(err, TaskError::TaskNotFound { id: 999 }));
    }

    #[tokio::test]
    async fn test_update_status_completed_sync_persisted() {
        let store = setup().await;
        let task = store.create(new_task("à terminer")).await.unwrap();

        let updated = store
            .update(
                task.id,
                TaskPatch {
                    completed: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.status, TaskStatus::Completed);

        let fetched = store.get(task.id).await.unwrap();
        assert!(fetched.completed);
        assert_eq!(fetched.status, TaskStatus::Completed);
    }

    #[tokio::test]
    async fn test_delete() {
        let store = setup().await;
        let task = store.create(new_task("éphémère")).await.unwrap();
        store.delete(task.id).await.unwrap();
        assert!(matches!(
            store.get(task.id).await.unwrap_err(),
            TaskError::TaskNotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_an_error() {
        let store = setup().await;
        let err = store.delete(12345).await.unwrap_err();
        assert!(matches!(err, TaskError::TaskNotFound { id: 12345 }));
    }

    #[tokio::test]
    async fn test_export_insertion_order_and_metadata() {
        let store = setup().await;
        store.create(new_task("un")).await.unwrap();
        store.create(new_task("deux")).await.unwrap();

        let snapshot = store.export_all().await.unwrap();
        assert_eq!(snapshot.total_tasks, 2);
        assert_eq!(snapshot.tasks[0].title, "un");
        assert_eq!(snapshot.tasks[1].title, "deux");
    }

    #[tokio::test]
    async fn test_reopen_preserves_tasks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.db");

        {
            let store = SqliteStore::open(&path).unwrap();
            store.initialize().await.unwrap();
            store.create(new_task("persistante")).await.unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        store.initialize().await.unwrap();
        let tasks = store.list().await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "persistante");
    }

    #[tokio::test]
    async fn test_due_date_persists_and_clears() {
        let store = setup().await;
        let task = store
            .create(NewTask {
                title: "avec échéance".to_string(),
                due_date: NaiveDate::from_ymd_opt(2026, 1, 15),
                ..Default::default()
            })
            .await
            .unwrap();

        let fetched = store.get(task.id).await.unwrap();
        assert_eq!(fetched.due_date, NaiveDate::from_ymd_opt(2026, 1, 15));

        let cleared = store
            .update(
                task.id,
                TaskPatch {
                    due_date: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(cleared.due_date.is_none());
    }
}
