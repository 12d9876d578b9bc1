//! Prompt construction for the rewrite provider.

/// System prompt sent with every rewrite request.
pub const REWRITE_SYSTEM_PROMPT: &str = "Tu es un expert en rédaction professionnelle. \
Reformule le texte selon le style demandé en gardant le sens original. \
Réponds uniquement avec le texte reformulé, sans explication.";

/// Per-style rewrite instruction. Unknown styles fall back to professional.
fn style_instruction(style: &str) -> &'static str {
    match style {
        "correct" => {
            "Corrige les fautes d'orthographe, de grammaire et de conjugaison dans ce texte \
             tout en gardant le sens original."
        }
        "formal" => {
            "Réécris ce texte dans un style formel et soutenu, avec un vocabulaire précis."
        }
        "concise" => {
            "Reformule ce texte de manière très concise et directe, en éliminant les mots \
             superflus."
        }
        "detailed" => {
            "Développe et enrichis ce texte en ajoutant des détails pertinents et des précisions."
        }
        "friendly" => {
            "Réécris ce texte dans un ton amical et accessible, tout en restant professionnel."
        }
        "technical" => {
            "Reformule ce texte avec un vocabulaire technique et précis, adapté à un contexte \
             professionnel spécialisé."
        }
        _ => {
            "Reformule ce texte de manière professionnelle et claire, adapté pour un \
             environnement de travail."
        }
    }
}

/// Build the user prompt for a rewrite request.
///
/// Text carrying `Titre:`/`Description:` markers is a combined
/// title+description rewrite; the prompt then asks for a short leading
/// sentence followed by a detailed remainder so the reply can be split back
/// into the two fields.
pub fn build_rewrite_prompt(text: &str, style: &str) -> String {
    let instruction = style_instruction(style);

    if text.contains("Titre:") && text.contains("Description:") {
        return format!(
            "{instruction}\n\n{text}\n\n\
             IMPORTANT: Retourne le résultat au format suivant pour une tâche:\n\
             - Une première phrase courte et claire pour le titre (max 80 caractères)\n\
             - Un point ou deux points\n\
             - Puis une description plus détaillée\n\n\
             Exemple: \"Finaliser le rapport mensuel. Compiler les données de vente, analyser \
             les tendances et préparer la présentation pour la direction.\"\n\n\
             Ne mets pas de guillemets autour de ta réponse."
        );
    }

    format!(
        "{instruction}\n\nTexte à réécrire :\n\"{text}\"\n\n\
         Garde le même sens mais améliore la formulation. Retourne uniquement le texte \
         réécrit, sans commentaires ni guillemets."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_prompt() {
        let prompt = build_rewrite_prompt("faire le rapport", "professional");
        assert!(prompt.contains("Texte à réécrire"));
        assert!(prompt.contains("faire le rapport"));
        assert!(!prompt.contains("IMPORTANT"));
    }

    #[test]
    fn test_structured_prompt_for_title_and_description() {
        let prompt = build_rewrite_prompt(
            "Titre: faire le point\n\nDescription: avec l'équipe",
            "professional",
        );
        assert!(prompt.contains("IMPORTANT"));
        assert!(prompt.contains("max 80 caractères"));
    }

    #[test]
    fn test_unknown_style_uses_professional_instruction() {
        let prompt = build_rewrite_prompt("texte", "poetic");
        assert!(prompt.contains("environnement de travail"));
    }

    #[test]
    fn test_each_style_has_distinct_instruction() {
        let styles = ["correct", "formal", "concise", "detailed", "friendly", "technical"];
        let mut seen = std::collections::HashSet::new();
        for style in styles {
            assert!(seen.insert(style_instruction(style)), "duplicate for {style}");
        }
    }
}
