//! One-shot navigation used by the `next`, `previous` and `current` commands.
//!
//! These commands never fetch and never touch the rotation flag. They move the
//! stored index and the running display picks the change up through its poll.

use crate::core::cache::PracticeCache;
use crate::core::error::{KotobatenError, Result};
use crate::core::state::Direction;

/// Move the stored index one step and return the `"i/n: word"` summary.
pub async fn navigate(cache: &PracticeCache, direction: Direction) -> Result<String> {
    let current = cache.read().await?.ok_or(KotobatenError::NoWordsLoaded)?;
    let index = direction
        .step(current.index, current.words.len())
        .ok_or(KotobatenError::NoWordsLoaded)?;

    cache.set_current_index(index).await?;
    log::debug!("Moved to {} word at index {}", direction.label(), index);

    current
        .position_summary(index)
        .ok_or(KotobatenError::NoWordsLoaded)
}

/// Summary of the stored current word without moving it.
pub async fn current(cache: &PracticeCache) -> Result<String> {
    let current = cache.read().await?.ok_or(KotobatenError::NoWordsLoaded)?;
    let len = current.words.len();
    if len == 0 {
        return Err(KotobatenError::NoWordsLoaded);
    }
    current
        .position_summary(current.index % len)
        .ok_or(KotobatenError::NoWordsLoaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cache::STORAGE_KEY_INDEX;
    use crate::core::rotation_state::STORAGE_KEY_ENABLED;
    use crate::core::state::DisplayWord;
    use crate::core::store::{KeyValueStore, MemoryStore};
    use std::sync::Arc;

    async fn seeded(index: usize) -> (Arc<MemoryStore>, PracticeCache) {
        let store = Arc::new(MemoryStore::new());
        let cache = PracticeCache::new(store.clone());
        let words = vec![
            DisplayWord::new("house").with_kanji("家").with_kana("いえ"),
            DisplayWord::new("hello"),
            DisplayWord::new("goodbye").with_kana("さよなら"),
        ];
        cache.write(&words, index).await.unwrap();
        (store, cache)
    }

    #[tokio::test]
    async fn test_next_wraps_to_first() {
        let (store, cache) = seeded(2).await;
        let summary = navigate(&cache, Direction::Next).await.unwrap();
        assert_eq!(summary, "1/3: house - 家 - いえ");
        assert_eq!(store.get(STORAGE_KEY_INDEX).await.unwrap().as_deref(), Some("0"));
    }

    #[tokio::test]
    async fn test_previous_wraps_to_last() {
        let (_, cache) = seeded(0).await;
        let summary = navigate(&cache, Direction::Previous).await.unwrap();
        assert_eq!(summary, "3/3: goodbye - さよなら");
        assert_eq!(cache.current_index().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_navigation_leaves_words_and_timestamp() {
        let (_, cache) = seeded(0).await;
        let before = cache.read().await.unwrap().unwrap();
        navigate(&cache, Direction::Next).await.unwrap();
        let after = cache.read().await.unwrap().unwrap();
        assert_eq!(before.words, after.words);
        assert_eq!(before.timestamp, after.timestamp);
    }

    #[tokio::test]
    async fn test_navigation_without_cache() {
        let cache = PracticeCache::new(Arc::new(MemoryStore::new()));
        let err = navigate(&cache, Direction::Next).await.unwrap_err();
        assert!(matches!(err, KotobatenError::NoWordsLoaded));
    }

    #[tokio::test]
    async fn test_navigation_never_touches_rotation_flag() {
        let (store, cache) = seeded(1).await;
        navigate(&cache, Direction::Previous).await.unwrap();
        assert!(!store.snapshot().contains_key(STORAGE_KEY_ENABLED));
    }

    #[tokio::test]
    async fn test_current_does_not_move() {
        let (_, cache) = seeded(1).await;
        assert_eq!(current(&cache).await.unwrap(), "2/3: hello");
        assert_eq!(cache.current_index().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_out_of_range_index_is_normalized() {
        let (store, cache) = seeded(0).await;
        store.set(STORAGE_KEY_INDEX, "4").await.unwrap();
        assert_eq!(current(&cache).await.unwrap(), "2/3: hello");
        assert_eq!(
            navigate(&cache, Direction::Next).await.unwrap(),
            "3/3: goodbye - さよなら"
        );
    }
}
