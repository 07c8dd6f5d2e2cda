//! Practice word cache codec and freshness policy.
//!
//! A cache generation is spread over three keys of the [`KeyValueStore`]: the
//! JSON word list, the decimal current index and the decimal epoch-millisecond
//! timestamp. Reads never fail on bad data: a missing or corrupt word list reads
//! as "no cache" and a missing or non-numeric index/timestamp reads as `0`.

use crate::core::error::Result;
use crate::core::state::{DisplayWord, PracticeWordsCache};
use crate::core::store::KeyValueStore;
use std::sync::Arc;
use std::time::Duration;

pub const STORAGE_KEY_WORDS: &str = "practice_menubar_words";
pub const STORAGE_KEY_INDEX: &str = "practice_menubar_index";
pub const STORAGE_KEY_TIMESTAMP: &str = "practice_menubar_timestamp";

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

fn parse_index(raw: Option<&str>) -> usize {
    raw.and_then(|value| value.trim().parse().ok()).unwrap_or(0)
}

fn parse_timestamp(raw: Option<&str>) -> i64 {
    raw.and_then(|value| value.trim().parse().ok()).unwrap_or(0)
}

/// Whether a generation written at `timestamp` is still usable at `now`.
///
/// An age equal to `max_age` is already stale.
pub fn is_fresh(timestamp: i64, now: i64, max_age: Duration) -> bool {
    let max_age_ms = i64::try_from(max_age.as_millis()).unwrap_or(i64::MAX);
    now.saturating_sub(timestamp) < max_age_ms
}

#[derive(Clone)]
pub struct PracticeCache {
    store: Arc<dyn KeyValueStore>,
}

impl PracticeCache {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub async fn read(&self) -> Result<Option<PracticeWordsCache>> {
        let Some(raw_words) = self.store.get(STORAGE_KEY_WORDS).await? else {
            return Ok(None);
        };
        if raw_words.is_empty() {
            return Ok(None);
        }

        let words: Vec<DisplayWord> = match serde_json::from_str(&raw_words) {
            Ok(words) => words,
            Err(e) => {
                log::warn!("Ignoring unreadable practice word cache: {e}");
                return Ok(None);
            }
        };

        let index = self.store.get(STORAGE_KEY_INDEX).await?;
        let timestamp = self.store.get(STORAGE_KEY_TIMESTAMP).await?;

        Ok(Some(PracticeWordsCache {
            words,
            index: parse_index(index.as_deref()),
            timestamp: parse_timestamp(timestamp.as_deref()),
        }))
    }

    /// Replace the cache with a new generation stamped with the current time.
    ///
    /// The three keys are written one after the other; a concurrent reader may
    /// see the new words with the old index for a moment.
    pub async fn write(&self, words: &[DisplayWord], index: usize) -> Result<PracticeWordsCache> {
        let timestamp = now_millis();
        let json = serde_json::to_string(words)?;

        self.store.set(STORAGE_KEY_WORDS, &json).await?;
        self.store.set(STORAGE_KEY_INDEX, &index.to_string()).await?;
        self.store
            .set(STORAGE_KEY_TIMESTAMP, &timestamp.to_string())
            .await?;

        log::debug!("Cached {} practice words at {}", words.len(), timestamp);
        Ok(PracticeWordsCache {
            words: words.to_vec(),
            index,
            timestamp,
        })
    }

    pub async fn timestamp(&self) -> Result<i64> {
        let raw = self.store.get(STORAGE_KEY_TIMESTAMP).await?;
        Ok(parse_timestamp(raw.as_deref()))
    }

    pub async fn is_valid(&self, max_age: Duration) -> Result<bool> {
        self.is_valid_at(max_age, now_millis()).await
    }

    pub async fn is_valid_at(&self, max_age: Duration, now: i64) -> Result<bool> {
        let has_words = self
            .store
            .get(STORAGE_KEY_WORDS)
            .await?
            .is_some_and(|words| !words.is_empty());
        if !has_words {
            return Ok(false);
        }

        Ok(is_fresh(self.timestamp().await?, now, max_age))
    }

    pub async fn current_index(&self) -> Result<usize> {
        let raw = self.store.get(STORAGE_KEY_INDEX).await?;
        Ok(parse_index(raw.as_deref()))
    }

    /// Persist only the index, leaving words and timestamp untouched.
    pub async fn set_current_index(&self, index: usize) -> Result<()> {
        self.store.set(STORAGE_KEY_INDEX, &index.to_string()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::MemoryStore;

    fn cache() -> (Arc<MemoryStore>, PracticeCache) {
        let store = Arc::new(MemoryStore::new());
        let cache = PracticeCache::new(store.clone());
        (store, cache)
    }

    const HOUR: Duration = Duration::from_secs(3600);

    #[tokio::test]
    async fn test_read_without_cache_is_none() {
        let (_, cache) = cache();
        assert_eq!(cache.read().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_write_then_read_round_trips() {
        let (_, cache) = cache();
        let before = now_millis();

        cache.write(&[DisplayWord::new("a")], 0).await.unwrap();
        let read = cache.read().await.unwrap().unwrap();

        assert_eq!(read.words, vec![DisplayWord::new("a")]);
        assert_eq!(read.index, 0);
        assert!(read.timestamp >= before);
    }

    #[tokio::test]
    async fn test_corrupt_words_read_as_absent() {
        let (store, cache) = cache();
        store.set(STORAGE_KEY_WORDS, "[{not json").await.unwrap();
        store.set(STORAGE_KEY_INDEX, "2").await.unwrap();

        assert_eq!(cache.read().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_bad_index_and_timestamp_default_to_zero() {
        let (store, cache) = cache();
        store
            .set(STORAGE_KEY_WORDS, r#"[{"sense":"a"},{"sense":"b"}]"#)
            .await
            .unwrap();
        store.set(STORAGE_KEY_INDEX, "one").await.unwrap();

        let read = cache.read().await.unwrap().unwrap();
        assert_eq!(read.index, 0);
        assert_eq!(read.timestamp, 0);
        assert_eq!(cache.current_index().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_set_current_index_leaves_generation_alone() {
        let (store, cache) = cache();
        let written = cache
            .write(&[DisplayWord::new("a"), DisplayWord::new("b")], 0)
            .await
            .unwrap();

        cache.set_current_index(1).await.unwrap();

        let read = cache.read().await.unwrap().unwrap();
        assert_eq!(read.index, 1);
        assert_eq!(read.words, written.words);
        assert_eq!(read.timestamp, written.timestamp);
        assert_eq!(
            store.snapshot().get(STORAGE_KEY_INDEX).map(String::as_str),
            Some("1")
        );
    }

    #[tokio::test]
    async fn test_is_valid_false_without_cache() {
        let (_, cache) = cache();
        assert!(!cache.is_valid(HOUR).await.unwrap());
    }

    #[tokio::test]
    async fn test_is_valid_boundary_is_strict() {
        let (store, cache) = cache();
        store.set(STORAGE_KEY_WORDS, r#"[{"sense":"a"}]"#).await.unwrap();
        store.set(STORAGE_KEY_TIMESTAMP, "1000").await.unwrap();

        let max_age = Duration::from_millis(500);
        assert!(cache.is_valid_at(max_age, 1000).await.unwrap());
        assert!(cache.is_valid_at(max_age, 1499).await.unwrap());
        assert!(!cache.is_valid_at(max_age, 1500).await.unwrap());
        assert!(!cache.is_valid_at(max_age, 9000).await.unwrap());
    }

    #[tokio::test]
    async fn test_fresh_write_is_valid() {
        let (_, cache) = cache();
        cache.write(&[DisplayWord::new("a")], 0).await.unwrap();
        assert!(cache.is_valid(HOUR).await.unwrap());
    }

    #[test]
    fn test_is_fresh_with_clock_skew() {
        // A timestamp from the future is younger than any max age.
        assert!(is_fresh(5_000, 1_000, Duration::from_millis(1)));
        assert!(!is_fresh(0, i64::MAX, HOUR));
    }
}
