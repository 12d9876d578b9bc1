//! Task entity, its wire representations and the update-merge rules.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::{TaskError, TaskResult};
use crate::heuristics;

/// Task status values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Completed,
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Todo => write!(f, "todo"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "todo" => Ok(Self::Todo),
            "in_progress" | "in-progress" | "inprogress" => Ok(Self::InProgress),
            "completed" | "done" => Ok(Self::Completed),
            _ => Err(TaskError::InvalidStatus {
                status: s.to_string(),
            }),
        }
    }
}

/// Task priority levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl TaskPriority {
    /// Ordering rank used by the priority sort (urgent first).
    pub fn rank(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
            Self::Urgent => 4,
        }
    }
}

impl std::fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Urgent => write!(f, "urgent"),
        }
    }
}

impl std::str::FromStr for TaskPriority {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" | "med" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            _ => Err(TaskError::InvalidPriority {
                priority: s.to_string(),
            }),
        }
    }
}

/// A single to-do item.
///
/// Wire names are camelCase to match the JSON API. `completed` is a derived
/// mirror of `status == Completed` and `stress_level` is always computed
/// server-side; both are maintained by [`Task::apply_patch`] and the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier, assigned by the store. Immutable after creation.
    pub id: i64,

    /// Brief, descriptive title. Never empty.
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub status: TaskStatus,

    /// Derived mirror of `status == Completed`.
    #[serde(default)]
    pub completed: bool,

    #[serde(default)]
    pub priority: TaskPriority,

    /// Heuristic urgency score in 1..=5, recomputed whenever title,
    /// description or priority changes.
    #[serde(default = "default_stress")]
    pub stress_level: u8,

    #[serde(default)]
    pub due_date: Option<NaiveDate>,

    /// Free-form comma-separated tags.
    #[serde(default)]
    pub tags: String,

    /// Suggestion text generated once at creation time.
    #[serde(default)]
    pub ai_suggestions: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_stress() -> u8 {
    1
}

/// Fields accepted when creating a task.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub tags: String,
}

impl NewTask {
    /// Validate the create payload. Title is the only required field.
    pub fn validate(&self) -> TaskResult<()> {
        if self.title.trim().is_empty() {
            return Err(TaskError::validation("Le titre est requis"));
        }
        Ok(())
    }
}

/// Partial update payload. Absent fields are left untouched.
///
/// A client-supplied `stressLevel` is deliberately not representable here:
/// the server always recomputes it from the effective title, description and
/// priority, so any value sent by a client is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub completed: Option<bool>,
    pub priority: Option<TaskPriority>,
    /// `Some(None)` clears the due date; absent leaves it untouched.
    #[serde(default, deserialize_with = "double_option")]
    pub due_date: Option<Option<NaiveDate>>,
    pub tags: Option<String>,
}

/// Distinguishes an absent field from an explicit `null`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Snapshot returned by the export endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSnapshot {
    pub export_date: DateTime<Utc>,
    pub total_tasks: usize,
    pub tasks: Vec<Task>,
}

impl Task {
    /// Merge a partial update into this task.
    ///
    /// Applied in this order:
    /// 1. a supplied `status` drives `completed`;
    /// 2. otherwise a supplied `completed` drives `status` (true -> completed,
    ///    false -> todo);
    /// 3. if any of title/description/priority is supplied, `stress_level` is
    ///    recomputed from the post-merge (effective) values;
    /// 4. remaining fields are applied and `updated_at` is bumped.
    ///
    /// The `completed == (status == Completed)` invariant holds afterwards.
    pub fn apply_patch(&mut self, patch: &TaskPatch) -> TaskResult<()> {
        if let Some(title) = &patch.title {
            if title.trim().is_empty() {
                return Err(TaskError::validation("Le titre est requis"));
            }
        }

        if let Some(status) = patch.status {
            self.status = status;
            self.completed = status == TaskStatus::Completed;
        } else if let Some(completed) = patch.completed {
            self.completed = completed;
            self.status = if completed {
                TaskStatus::Completed
            } else {
                TaskStatus::Todo
            };
        }

        if patch.title.is_some() || patch.description.is_some() || patch.priority.is_some() {
            let title = patch.title.as_deref().unwrap_or(&self.title);
            let description = patch.description.as_deref().unwrap_or(&self.description);
            let priority = patch.priority.unwrap_or(self.priority);
            self.stress_level = heuristics::stress_score(title, description, priority);
        }

        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(tags) = &patch.tags {
            self.tags = tags.clone();
        }

        self.updated_at = Utc::now();
        Ok(())
    }
}
