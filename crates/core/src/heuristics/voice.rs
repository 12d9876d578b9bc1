//! Voice-transcript parsing for the voice task entry endpoint.

use std::sync::LazyLock;

use regex::Regex;

use crate::entities::TaskPriority;

use super::textpos::{byte_of_char, char_count};

/// Priority phrases stripped from the transcript when building the title.
static PRIORITY_PHRASES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)urgent|important|haute priorité|basse priorité|high|low")
        .expect("static pattern")
});

/// Title used when stripping the priority phrases leaves nothing behind.
const EMPTY_TITLE_PLACEHOLDER: &str = "Tâche vocale";

/// Maximum title length before the transcript is demoted to the description.
const MAX_TITLE_CHARS: usize = 100;

/// Task fields extracted from a speech transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceTask {
    pub title: String,
    pub description: String,
    pub priority: TaskPriority,
}

/// Parse a raw speech transcript into task fields.
///
/// Detects a priority keyword (urgent/important -> urgent, "haute priorité" or
/// "high" -> high, "basse priorité" or "low" -> low, otherwise medium), strips
/// the priority phrases to form a candidate title, and falls back to a
/// placeholder title or a truncated title + full-text description when the
/// stripped text is empty or over 100 characters.
pub fn parse_voice_transcript(raw: &str) -> VoiceTask {
    let lowered = raw.to_lowercase();

    let priority = if lowered.contains("urgent") || lowered.contains("important") {
        TaskPriority::Urgent
    } else if lowered.contains("haute priorité") || lowered.contains("high") {
        TaskPriority::High
    } else if lowered.contains("basse priorité") || lowered.contains("low") {
        TaskPriority::Low
    } else {
        TaskPriority::Medium
    };

    let stripped = PRIORITY_PHRASES.replace_all(raw, "").trim().to_string();

    if char_count(&stripped) > MAX_TITLE_CHARS {
        let cut = byte_of_char(&stripped, MAX_TITLE_CHARS);
        return VoiceTask {
            title: format!("{}...", &stripped[..cut]),
            description: stripped,
            priority,
        };
    }

    let title = if stripped.is_empty() {
        EMPTY_TITLE_PLACEHOLDER.to_string()
    } else {
        stripped
    };

    VoiceTask {
        title,
        description: format!("Créée par commande vocale: \"{raw}\""),
        priority,
    }
}
