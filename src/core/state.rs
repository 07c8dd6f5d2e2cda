//! State shared between the practice commands.
//!
//! This module defines the data structures persisted between invocations: the
//! flattened [`DisplayWord`] shown to the user and the [`PracticeWordsCache`]
//! generation that the rotation display and the next/previous commands share.
//!
//! # Public API
//! - [`DisplayWord`]: A `{sense, kanji?, kana?}` projection of a practice item
//! - [`PracticeWordsCache`]: One cache generation with its current position
//! - [`Direction`]: Which way a navigation step moves
//!
//! # Cache Strategy
//! - **JSON word list**: The word list is stored as a JSON array
//! - **Decimal index and timestamp**: Stored as text under their own keys
//! - **Index-only updates**: Navigation never rewrites the word list

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayWord {
    pub sense: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kanji: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kana: Option<String>,
}

impl DisplayWord {
    pub fn new(sense: impl Into<String>) -> Self {
        Self {
            sense: sense.into(),
            kanji: None,
            kana: None,
        }
    }

    pub fn with_kanji(mut self, kanji: impl Into<String>) -> Self {
        self.kanji = Some(kanji.into());
        self
    }

    pub fn with_kana(mut self, kana: impl Into<String>) -> Self {
        self.kana = Some(kana.into());
        self
    }

    /// `sense - kanji - kana`, skipping the segments that are absent or empty.
    pub fn one_line(&self) -> String {
        let mut parts = vec![self.sense.as_str()];

        if let Some(kanji) = self.kanji.as_deref().filter(|k| !k.is_empty()) {
            parts.push(kanji);
        }

        if let Some(kana) = self.kana.as_deref().filter(|k| !k.is_empty()) {
            parts.push(kana);
        }

        parts.join(" - ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

impl Direction {
    /// Step `index` within `len` words, wrapping at both ends.
    ///
    /// Returns `None` for an empty list instead of dividing by zero.
    pub fn step(self, index: usize, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }

        let index = index % len;
        Some(match self {
            Direction::Next => (index + 1) % len,
            Direction::Previous => (index + len - 1) % len,
        })
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::Next => "next",
            Direction::Previous => "previous",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PracticeWordsCache {
    pub words: Vec<DisplayWord>,
    pub index: usize,
    /// Epoch milliseconds of the write that produced this generation.
    pub timestamp: i64,
}

impl PracticeWordsCache {
    pub fn current_word(&self) -> Option<&DisplayWord> {
        self.words.get(self.index)
    }

    /// `"<position>/<total>: <word>"` for the word at `index`.
    pub fn position_summary(&self, index: usize) -> Option<String> {
        self.words
            .get(index)
            .map(|word| format!("{}/{}: {}", index + 1, self.words.len(), word.one_line()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_line_with_all_fields() {
        let word = DisplayWord::new("house").with_kanji("家").with_kana("いえ");
        assert_eq!(word.one_line(), "house - 家 - いえ");
    }

    #[test]
    fn test_one_line_omits_missing_segments() {
        assert_eq!(DisplayWord::new("hello").one_line(), "hello");
        assert_eq!(
            DisplayWord::new("goodbye").with_kana("さよなら").one_line(),
            "goodbye - さよなら"
        );
        assert_eq!(
            DisplayWord::new("cat").with_kanji("猫").one_line(),
            "cat - 猫"
        );
    }

    #[test]
    fn test_absent_fields_are_not_serialized() {
        let json = serde_json::to_string(&DisplayWord::new("a")).unwrap();
        assert_eq!(json, r#"{"sense":"a"}"#);
    }

    #[test]
    fn test_step_wraps_both_ways() {
        assert_eq!(Direction::Next.step(4, 5), Some(0));
        assert_eq!(Direction::Previous.step(0, 5), Some(4));
        assert_eq!(Direction::Next.step(0, 1), Some(0));
        assert_eq!(Direction::Previous.step(0, 1), Some(0));
    }

    #[test]
    fn test_step_on_empty_list_is_none() {
        assert_eq!(Direction::Next.step(0, 0), None);
        assert_eq!(Direction::Previous.step(3, 0), None);
    }

    #[test]
    fn test_stepping_len_times_is_cyclic() {
        for len in 1..=7 {
            for start in 0..len {
                for direction in [Direction::Next, Direction::Previous] {
                    let mut index = start;
                    for _ in 0..len {
                        index = direction.step(index, len).unwrap();
                    }
                    assert_eq!(index, start, "{direction:?} len={len} start={start}");
                }
            }
        }
    }

    #[test]
    fn test_position_summary() {
        let cache = PracticeWordsCache {
            words: vec![
                DisplayWord::new("dog").with_kanji("犬").with_kana("いぬ"),
                DisplayWord::new("hello"),
            ],
            index: 0,
            timestamp: 0,
        };
        assert_eq!(cache.position_summary(0).unwrap(), "1/2: dog - 犬 - いぬ");
        assert_eq!(cache.position_summary(1).unwrap(), "2/2: hello");
        assert_eq!(cache.position_summary(2), None);
    }
}
