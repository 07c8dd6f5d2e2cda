//! Wire types of the Kotobaten API.
//!
//! Only the fields kotobaten reads are required; everything else is optional so
//! that additions on the server side do not break deserialization.

use serde::{Deserialize, Deserializer, Serialize};

/// `null` reads as the type's default, like a missing field does.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode impressions one by one, skipping the ones that do not parse.
fn lenient_impressions<'de, D>(deserializer: D) -> Result<Vec<Impression>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<serde_json::Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .filter_map(|(position, value)| match serde_json::from_value(value) {
            Ok(impression) => Some(impression),
            Err(e) => {
                log::warn!("Skipping malformed impression at position {position}: {e}");
                None
            }
        })
        .collect())
}

/// A saved vocabulary entry with its spaced-repetition progress.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StackCard {
    pub id: Option<u64>,
    pub created: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub sense: String,
    #[serde(deserialize_with = "null_as_default")]
    pub kana: String,
    #[serde(deserialize_with = "null_as_default")]
    pub kanji: String,
    #[serde(deserialize_with = "null_as_default")]
    pub note: String,
    pub order: i64,
    pub user_id: Option<u64>,
    #[serde(rename = "type")]
    pub card_type: Option<String>,

    pub first_seen: Option<String>,
    pub last_seen: Option<String>,
    pub oldest_consecutive_kana_success: Option<String>,
    pub newest_consecutive_kana_success: Option<String>,
    pub oldest_consecutive_sense_success: Option<String>,
    pub newest_consecutive_sense_success: Option<String>,
    pub consecutive_kana_success_count: u32,
    pub consecutive_sense_success_count: u32,
    pub sense_retention_score: Option<f64>,
    pub last_sense_retention_score_updated: Option<String>,
    pub kana_retention_score: Option<f64>,
    pub last_kana_retention_score_updated: Option<String>,
    pub kana_is_in_practice_queue: bool,
    pub sense_is_in_practice_queue: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DictionaryCardSense {
    pub senses: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DictionaryCard {
    #[serde(deserialize_with = "null_as_default")]
    pub kanji: String,
    #[serde(deserialize_with = "null_as_default")]
    pub kana: String,
    pub senses: Vec<DictionaryCardSense>,
    pub is_common: bool,
}

impl DictionaryCard {
    /// First gloss of the first sense group.
    pub fn first_sense(&self) -> Option<&str> {
        self.senses
            .first()
            .and_then(|group| group.senses.first())
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchResult {
    pub query: String,
    pub cards: Vec<StackCard>,
    pub dictionary_cards: Vec<DictionaryCard>,
}

impl SearchResult {
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty() && self.dictionary_cards.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticleOption {
    #[serde(default)]
    pub id: i64,
    pub with_kanji: String,
    pub kana_only: String,
}

/// One served practice item, discriminated by its `type` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Impression {
    #[serde(rename_all = "camelCase")]
    GeneratedSentenceGuess {
        #[serde(default)]
        id: i64,
        #[serde(default)]
        stack_card_id: Option<i64>,
        kana_only: String,
        with_kanji: String,
        sense: String,
    },
    #[serde(rename_all = "camelCase")]
    SenseGuess {
        #[serde(default)]
        id: i64,
        #[serde(default)]
        stack_card_id: Option<i64>,
        card: StackCard,
    },
    #[serde(rename_all = "camelCase")]
    KanaGuess {
        #[serde(default)]
        id: i64,
        #[serde(default)]
        stack_card_id: Option<i64>,
        card: StackCard,
    },
    #[serde(rename_all = "camelCase")]
    GeneratedSentenceWithParticlesSelect {
        #[serde(default)]
        id: i64,
        #[serde(default)]
        stack_card_id: Option<i64>,
        options: Vec<ParticleOption>,
        correct_option: i64,
        #[serde(default)]
        explanation: String,
        sense: String,
    },
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PracticeResponse {
    #[serde(deserialize_with = "lenient_impressions")]
    pub impressions: Vec<Impression>,
}

/// Body of `POST cards`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCard<'a> {
    pub sense: &'a str,
    pub kanji: Option<&'a str>,
    pub kana: Option<&'a str>,
    pub note: Option<&'a str>,
    pub created: String,
    #[serde(rename = "type")]
    pub card_type: &'static str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
}
