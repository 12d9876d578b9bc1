//! Rewrite helpers: reply cleanup, title/description splitting and the local
//! fallback rewrite used when the external provider is unavailable.

use std::sync::LazyLock;

use regex::Regex;

use super::textpos::{byte_of_char, char_count, find_char_from, rfind_char_upto, slice_chars};

/// Suffix marking text produced by the local fallback rewrite.
pub const FALLBACK_MARKER: &str = "[Réécriture basique - IA indisponible]";

/// Strip surrounding quotes and whitespace from an LLM reply.
pub fn clean_rewritten(raw: &str) -> String {
    raw.trim()
        .trim_matches(|c| matches!(c, '"' | '\'' | '“' | '”' | '«' | '»'))
        .trim()
        .to_string()
}

/// Truncate an over-long rewritten title to 100 characters plus an ellipsis.
pub fn truncate_title(text: &str) -> String {
    if char_count(text) > 100 {
        format!("{}...", slice_chars(text, 0, 100).trim())
    } else {
        text.to_string()
    }
}

/// Split a rewritten blob back into a (title, description) pair.
///
/// A known heuristic, not a guaranteed-correct parser: arbitrary LLM output
/// has no reliable structure, so the branches (and their 30/80/100/120
/// character thresholds) are tried in a fixed order:
/// 1. first sentence terminator, if the leading sentence is under 120 chars;
/// 2. first newline;
/// 3. for text over 80 chars, a colon (preferred) or comma between positions
///    30 and 100, else the last space before position 80 when after 30;
/// 4. otherwise the whole text becomes the title when it fits in 100 chars,
///    else a cut at the last space before 80 (hard cut at 80 as last resort).
pub fn split_rewritten(cleaned: &str) -> (String, String) {
    let text = cleaned.trim();
    let total = char_count(text);

    let mut title = String::new();
    let mut description = String::new();

    let terminator = text.find(['.', '!', '?']);
    if let Some(pos) = terminator.filter(|&p| text[..p].chars().count() + 1 < 120) {
        // Terminators are ASCII, so byte slicing around `pos` is safe.
        title = text[..pos].trim().to_string();
        description = text[pos + 1..].trim().to_string();
    } else if text.contains('\n') {
        let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
        if let Some((first, rest)) = lines.split_first() {
            title = first.trim().to_string();
            description = rest.join("\n").trim().to_string();
        }
    } else if total > 80 {
        let colon = find_char_from(text, ':', 30).filter(|&i| i < 100);
        let comma = find_char_from(text, ',', 30).filter(|&i| i < 100);
        if let Some(idx) = colon.or(comma) {
            title = slice_chars(text, 0, idx).trim().to_string();
            description = text[byte_of_char(text, idx + 1)..].trim().to_string();
        } else if let Some(space) = rfind_char_upto(text, ' ', 80).filter(|&i| i > 30) {
            title = slice_chars(text, 0, space).trim().to_string();
            description = text[byte_of_char(text, space)..].trim().to_string();
        }
    }

    if title.is_empty() {
        if total <= 100 {
            title = text.to_string();
            description.clear();
        } else {
            let cut = match rfind_char_upto(text, ' ', 80) {
                Some(i) if i > 30 => i,
                _ => 80,
            };
            title = slice_chars(text, 0, cut).trim().to_string();
            description = text[byte_of_char(text, cut)..].trim().to_string();
        }
    }

    (title, description)
}

/// Literal substitutions and optional prefix for one rewrite style.
struct StyleRewrite {
    replacements: Vec<(Regex, &'static str)>,
    prefix: &'static str,
}

fn compile(pairs: &[(&str, &'static str)], prefix: &'static str) -> StyleRewrite {
    StyleRewrite {
        replacements: pairs
            .iter()
            .map(|(from, to)| {
                let pattern = format!("(?i){}", regex::escape(from));
                (Regex::new(&pattern).expect("literal pattern"), *to)
            })
            .collect(),
        prefix,
    }
}

static PROFESSIONAL: LazyLock<StyleRewrite> = LazyLock::new(|| {
    compile(
        &[
            ("faire", "réaliser"),
            ("voir", "examiner"),
            ("finir", "finaliser"),
            ("commencer", "initier"),
            ("changer", "modifier"),
        ],
        "Objectif : ",
    )
});

static CORRECT: LazyLock<StyleRewrite> = LazyLock::new(|| {
    compile(
        &[
            ("ca", "cela"),
            ("pk", "pourquoi"),
            ("tjrs", "toujours"),
            ("vs", "vous"),
            ("dc", "donc"),
        ],
        "",
    )
});

static FORMAL: LazyLock<StyleRewrite> = LazyLock::new(|| {
    compile(
        &[
            ("ok", "validé"),
            ("super", "excellent"),
            ("problème", "problématique"),
        ],
        "Il convient de : ",
    )
});

static CONCISE: LazyLock<StyleRewrite> = LazyLock::new(|| {
    compile(
        &[
            ("il faut que je", "je dois"),
            ("il est nécessaire de", ""),
            ("afin de", "pour"),
        ],
        "",
    )
});

static TECHNICAL: LazyLock<StyleRewrite> = LazyLock::new(|| {
    compile(
        &[
            ("faire", "implémenter"),
            ("vérifier", "valider"),
            ("problème", "dysfonctionnement"),
        ],
        "Procédure : ",
    )
});

fn table_for(style: &str) -> &'static StyleRewrite {
    match style {
        "correct" => &CORRECT,
        "formal" => &FORMAL,
        "concise" => &CONCISE,
        "technical" => &TECHNICAL,
        // Unknown styles fall back to professional.
        _ => &PROFESSIONAL,
    }
}

/// Local substring-substitution rewrite used when the external provider
/// fails. Applies the style's case-insensitive replacements, prepends the
/// style prefix when not already present, and appends [`FALLBACK_MARKER`].
pub fn fallback_rewrite(text: &str, style: &str) -> String {
    let table = table_for(style);

    let mut rewritten = if text.is_empty() {
        "Texte non fourni".to_string()
    } else {
        text.to_string()
    };

    for (pattern, replacement) in &table.replacements {
        rewritten = pattern.replace_all(&rewritten, *replacement).into_owned();
    }

    if !table.prefix.is_empty()
        && !rewritten
            .to_lowercase()
            .starts_with(&table.prefix.to_lowercase())
    {
        rewritten = format!("{}{rewritten}", table.prefix);
    }

    format!("{rewritten}\n\n{FALLBACK_MARKER}")
}
