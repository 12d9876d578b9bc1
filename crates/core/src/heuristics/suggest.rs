//! Keyword-triggered suggestion text, generated once at task creation.

/// Topic keyword groups and the fixed tips appended when a group matches.
const TOPIC_GROUPS: &[(&[&str], &[&str])] = &[
    (
        &["projet", "développer", "créer"],
        &[
            "💡 Divisez ce projet en sous-tâches plus petites",
            "📋 Créez un planning avec des étapes intermédiaires",
        ],
    ),
    (
        &["réunion", "meeting"],
        &[
            "📅 Préparez un agenda avant la réunion",
            "📝 Notez les points clés à aborder",
        ],
    ),
    (
        &["urgent", "deadline"],
        &[
            "⏰ Focalisez-vous sur cette tâche en priorité",
            "🚫 Éliminez les distractions pendant le travail",
        ],
    ),
];

/// Build suggestion text from the lowercased title + description.
///
/// Fixed strings per matched topic group, joined with `" | "`; empty when no
/// group matches.
pub fn suggestions(title: &str, description: &str) -> String {
    let text = format!("{title} {description}").to_lowercase();

    let mut tips: Vec<&str> = Vec::new();
    for (keywords, group_tips) in TOPIC_GROUPS {
        if keywords.iter().any(|k| text.contains(k)) {
            tips.extend_from_slice(group_tips);
        }
    }

    tips.join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_group() {
        let out = suggestions("Développer une API", "");
        assert!(out.contains("sous-tâches"));
        assert!(out.contains(" | "));
    }

    #[test]
    fn test_meeting_group() {
        let out = suggestions("Réunion d'équipe", "lundi matin");
        assert!(out.contains("agenda"));
    }

    #[test]
    fn test_multiple_groups_joined() {
        let out = suggestions("Créer le projet", "deadline urgente");
        assert!(out.contains("sous-tâches"));
        assert!(out.contains("distractions"));
        assert_eq!(out.matches(" | ").count(), 3);
    }

    #[test]
    fn test_no_match_is_empty() {
        assert_eq!(suggestions("Acheter du pain", ""), "");
    }
}
