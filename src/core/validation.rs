use crate::core::error::{KotobatenError, Result};

/// `"<name> cannot be empty."` when `value` is blank, `None` otherwise.
pub fn validate_required(value: &str, name: &str) -> Option<String> {
    if value.trim().is_empty() {
        Some(format!("{name} cannot be empty."))
    } else {
        None
    }
}

/// Blank optional fields are sent as absent.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// A word ready to be sent to the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordDraft<'a> {
    pub sense: &'a str,
    pub kanji: Option<&'a str>,
    pub kana: Option<&'a str>,
    pub note: Option<&'a str>,
}

impl<'a> WordDraft<'a> {
    pub fn new(
        sense: &'a str,
        kanji: Option<&'a str>,
        kana: Option<&'a str>,
        note: Option<&'a str>,
    ) -> Result<Self> {
        if let Some(message) = validate_required(sense, "Sense") {
            return Err(KotobatenError::validation(message));
        }

        let kanji = non_blank(kanji);
        let kana = non_blank(kana);
        if kanji.is_none() && kana.is_none() {
            return Err(KotobatenError::validation("Kanji or kana cannot be empty."));
        }

        Ok(Self {
            sense: sense.trim(),
            kanji,
            kana,
            note: non_blank(note),
        })
    }

    /// Lines of the confirmation prompt, `-` for absent fields.
    pub fn summary_lines(&self) -> Vec<String> {
        vec![
            format!("Sense: {}", self.sense),
            format!("Kanji: {}", self.kanji.unwrap_or("-")),
            format!("Kana: {}", self.kana.unwrap_or("-")),
            format!("Note: {}", self.note.unwrap_or("-")),
        ]
    }
}
