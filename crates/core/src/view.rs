//! Pure list-view logic: filtering and sorting.
//!
//! Filter and sort are plain values applied by a pure function, so the
//! frontend holds no ordering logic of its own.

use serde::Deserialize;

use crate::entities::{Task, TaskStatus};

/// Status filter for the task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskFilter {
    #[default]
    All,
    Todo,
    InProgress,
    Completed,
}

impl TaskFilter {
    fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Todo => task.status == TaskStatus::Todo,
            Self::InProgress => task.status == TaskStatus::InProgress,
            Self::Completed => task.status == TaskStatus::Completed,
        }
    }
}

/// Sort order for the task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskSort {
    /// Newest first (the default list order).
    #[default]
    Date,
    /// Urgent first.
    Priority,
    /// Highest stress first.
    Stress,
    /// Case-insensitive alphabetical.
    Title,
}

/// Filter then sort a task list. Sorting is stable, so ties keep the
/// incoming (newest-first) order.
pub fn filter_and_sort(tasks: Vec<Task>, filter: TaskFilter, sort: TaskSort) -> Vec<Task> {
    let mut tasks: Vec<Task> = tasks.into_iter().filter(|t| filter.matches(t)).collect();

    match sort {
        TaskSort::Date => tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        TaskSort::Priority => tasks.sort_by(|a, b| b.priority.rank().cmp(&a.priority.rank())),
        TaskSort::Stress => tasks.sort_by(|a, b| b.stress_level.cmp(&a.stress_level)),
        TaskSort::Title => {
            tasks.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));
        }
    }

    tasks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::TaskPriority;
    use chrono::{Duration, Utc};

    fn task(id: i64, title: &str, status: TaskStatus, priority: TaskPriority, stress: u8) -> Task {
        let created = Utc::now() + Duration::seconds(id);
        Task {
            id,
            title: title.to_string(),
            description: String::new(),
            status,
            completed: status == TaskStatus::Completed,
            priority,
            stress_level: stress,
            due_date: None,
            tags: String::new(),
            ai_suggestions: String::new(),
            created_at: created,
            updated_at: created,
        }
    }

    fn sample() -> Vec<Task> {
        vec![
            task(3, "Bravo", TaskStatus::Completed, TaskPriority::Low, 1),
            task(2, "alpha", TaskStatus::InProgress, TaskPriority::Urgent, 5),
            task(1, "Charlie", TaskStatus::Todo, TaskPriority::Medium, 3),
        ]
    }

    #[test]
    fn test_filter_by_status() {
        let done = filter_and_sort(sample(), TaskFilter::Completed, TaskSort::Date);
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].title, "Bravo");

        let all = filter_and_sort(sample(), TaskFilter::All, TaskSort::Date);
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_sort_by_date_newest_first() {
        let sorted = filter_and_sort(sample(), TaskFilter::All, TaskSort::Date);
        assert_eq!(sorted[0].id, 3);
        assert_eq!(sorted[2].id, 1);
    }

    #[test]
    fn test_sort_by_priority_urgent_first() {
        let sorted = filter_and_sort(sample(), TaskFilter::All, TaskSort::Priority);
        assert_eq!(sorted[0].priority, TaskPriority::Urgent);
        assert_eq!(sorted[2].priority, TaskPriority::Low);
    }

    #[test]
    fn test_sort_by_stress_descending() {
        let sorted = filter_and_sort(sample(), TaskFilter::All, TaskSort::Stress);
        assert_eq!(sorted[0].stress_level, 5);
        assert_eq!(sorted[2].stress_level, 1);
    }

    #[test]
    fn test_sort_by_title_case_insensitive() {
        let sorted = filter_and_sort(sample(), TaskFilter::All, TaskSort::Title);
        let titles: Vec<&str> = sorted.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["alpha", "Bravo", "Charlie"]);
    }

    #[test]
    fn test_query_string_names() {
        let filter: TaskFilter = serde_json::from_str(r#""in_progress""#).unwrap();
        assert_eq!(filter, TaskFilter::InProgress);
        let sort: TaskSort = serde_json::from_str(r#""stress""#).unwrap();
        assert_eq!(sort, TaskSort::Stress);
    }
}
