//! Whole-word, case-insensitive profanity detection for practice words.

use regex::Regex;
use std::sync::OnceLock;

const BLOCKED_TERMS: &[&str] = &[
    "arse",
    "arsehole",
    "ass",
    "asshole",
    "bastard",
    "bitch",
    "bitches",
    "bollocks",
    "bullshit",
    "cock",
    "cunt",
    "damn",
    "dick",
    "dickhead",
    "fag",
    "faggot",
    "fuck",
    "fucked",
    "fucker",
    "fucking",
    "motherfucker",
    "nigger",
    "piss",
    "pissed",
    "prick",
    "pussy",
    "shit",
    "shitty",
    "slut",
    "twat",
    "wanker",
    "whore",
];

fn blocked_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        let alternatives = BLOCKED_TERMS
            .iter()
            .map(|term| regex::escape(term))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!(r"(?i)\b(?:{alternatives})\b"))
            .expect("blocked term list is a valid pattern")
    })
}

pub fn contains_profanity(text: Option<&str>) -> bool {
    match text {
        Some(text) if !text.is_empty() => blocked_pattern().is_match(text),
        _ => false,
    }
}

/// True when any of the given fields contains a blocked term.
pub fn contains_profanity_in_fields<'a>(fields: impl IntoIterator<Item = Option<&'a str>>) -> bool {
    fields.into_iter().any(contains_profanity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_blocked_terms_case_insensitively() {
        assert!(contains_profanity(Some("fuck")));
        assert!(contains_profanity(Some("FUCK")));
        assert!(contains_profanity(Some("fuck this")));
        assert!(contains_profanity(Some("Damn")));
    }

    #[test]
    fn test_matches_whole_words_only() {
        assert!(!contains_profanity(Some("class")));
        assert!(!contains_profanity(Some("assistant")));
        assert!(!contains_profanity(Some("Scunthorpe")));
    }

    #[test]
    fn test_empty_and_absent_are_clean() {
        assert!(!contains_profanity(None));
        assert!(!contains_profanity(Some("")));
        assert!(!contains_profanity(Some("いえ")));
    }

    #[test]
    fn test_any_field_blocks() {
        assert!(contains_profanity_in_fields([Some("word"), Some("shit"), None]));
        assert!(!contains_profanity_in_fields([Some("cat"), Some("猫"), Some("ねこ")]));
        assert!(!contains_profanity_in_fields([Some("goodbye"), None, Some("さよなら")]));
    }
}
