//! Turning served practice impressions into displayable words.
//!
//! Each [`Impression`] variant reduces to at most one [`DisplayWord`]; unknown
//! variants are skipped. Words containing a blocked term in any field are
//! dropped while preserving the order of the rest.

use crate::core::error::Result;
use crate::core::models::{Impression, PracticeResponse};
use crate::core::profanity::contains_profanity_in_fields;
use crate::core::state::DisplayWord;
use async_trait::async_trait;

/// Anything that can serve a batch of practice impressions.
#[async_trait]
pub trait PracticeSource: Send + Sync {
    async fn practice(&self, count: u32, token: &str) -> Result<Option<PracticeResponse>>;
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

pub fn extract_display_word(impression: &Impression) -> Option<DisplayWord> {
    match impression {
        Impression::SenseGuess { card, .. } | Impression::KanaGuess { card, .. } => {
            Some(DisplayWord {
                sense: card.sense.clone(),
                kanji: non_empty(&card.kanji),
                kana: non_empty(&card.kana),
            })
        }
        Impression::GeneratedSentenceGuess {
            sense,
            with_kanji,
            kana_only,
            ..
        } => Some(DisplayWord {
            sense: sense.clone(),
            kanji: Some(with_kanji.clone()),
            kana: Some(kana_only.clone()),
        }),
        Impression::GeneratedSentenceWithParticlesSelect {
            sense,
            options,
            correct_option,
            ..
        } => {
            let correct = usize::try_from(*correct_option)
                .ok()
                .and_then(|index| options.get(index));
            Some(DisplayWord {
                sense: sense.clone(),
                kanji: correct.map(|option| option.with_kanji.clone()),
                kana: correct.map(|option| option.kana_only.clone()),
            })
        }
        Impression::Unknown => None,
    }
}

pub fn filter_profanity(words: Vec<DisplayWord>) -> Vec<DisplayWord> {
    words
        .into_iter()
        .filter(|word| {
            !contains_profanity_in_fields([
                Some(word.sense.as_str()),
                word.kanji.as_deref(),
                word.kana.as_deref(),
            ])
        })
        .collect()
}

pub fn process_practice_impressions(impressions: &[Impression]) -> Vec<DisplayWord> {
    let words = impressions.iter().filter_map(extract_display_word).collect();
    filter_profanity(words)
}

/// Fetch a batch and reduce it to words. An absent or empty batch is an empty list.
pub async fn fetch_practice_words(
    source: &dyn PracticeSource,
    count: u32,
    token: &str,
) -> Result<Vec<DisplayWord>> {
    let Some(response) = source.practice(count, token).await? else {
        return Ok(Vec::new());
    };

    log::debug!("Received {} practice impressions", response.impressions.len());
    Ok(process_practice_impressions(&response.impressions))
}
