//! Heuristic stress scoring.

use crate::entities::TaskPriority;

/// Keywords that raise the stress score by one each.
const STRESS_KEYWORDS: &[&str] = &["urgent", "deadline", "important", "critique", "rush", "asap"];

/// Keywords that lower the stress score by half a point each.
const RELAX_KEYWORDS: &[&str] = &["simple", "facile", "rapide", "routine"];

/// Score the stress level of a task on a 1..=5 scale.
///
/// Starts at 1, adds 1 per stress keyword and subtracts 0.5 per relax keyword
/// found as a case-insensitive substring of `title + " " + description`, adds
/// a priority offset (low 0, medium 1, high 2, urgent 3), then rounds to the
/// nearest integer and clamps into [1, 5].
pub fn stress_score(title: &str, description: &str, priority: TaskPriority) -> u8 {
    let text = format!("{title} {description}").to_lowercase();

    let mut score = 1.0_f64;
    for keyword in STRESS_KEYWORDS {
        if text.contains(keyword) {
            score += 1.0;
        }
    }
    for keyword in RELAX_KEYWORDS {
        if text.contains(keyword) {
            score -= 0.5;
        }
    }

    score += match priority {
        TaskPriority::Low => 0.0,
        TaskPriority::Medium => 1.0,
        TaskPriority::High => 2.0,
        TaskPriority::Urgent => 3.0,
    };

    score.round().clamp(1.0, 5.0) as u8
}
