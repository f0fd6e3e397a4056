//! Memoizing cache for fetched and loaded values.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;

use tokio::sync::Mutex;

/// Keyed memo table with no eviction and no TTL. Entries live until
/// [`FetchCache::clear`] or the cache is dropped. Errors are not cached.
///
/// One lock covers the whole map and is held while a missing value is
/// fetched, so a key is fetched at most once even when requests race. A
/// fetch that never returns also blocks every later lookup, hits for other
/// keys included; bound provider calls with a timeout when that matters.
pub struct FetchCache<K, V> {
    entries: Mutex<HashMap<K, Arc<V>>>,
}

impl<K, V> Default for FetchCache<K, V> {
    fn default() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl<K, V> FetchCache<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached value for `key`, or runs `fetch` and caches its
    /// success.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: K, fetch: F) -> Result<Arc<V>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let mut entries = self.entries.lock().await;
        if let Some(hit) = entries.get(&key) {
            return Ok(Arc::clone(hit));
        }
        let value = Arc::new(fetch().await?);
        entries.insert(key, Arc::clone(&value));
        Ok(value)
    }

    pub async fn invalidate(&self, key: &K) -> Option<Arc<V>> {
        self.entries.lock().await.remove(key)
    }

    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn second_lookup_is_a_hit() {
        let cache: FetchCache<&str, u32> = FetchCache::new();
        let calls = AtomicUsize::new(0);

        let first = cache
            .get_or_fetch("AAPL", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, String>(7)
            })
            .await
            .unwrap();
        let second = cache
            .get_or_fetch("AAPL", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, String>(8)
            })
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(*second, 7);
    }

    #[tokio::test]
    async fn errors_are_not_cached() {
        let cache: FetchCache<&str, u32> = FetchCache::new();

        let err = cache
            .get_or_fetch("MSFT", || async { Err::<u32, _>("offline") })
            .await;
        assert_eq!(err.unwrap_err(), "offline");
        assert!(cache.is_empty().await);

        let ok = cache
            .get_or_fetch("MSFT", || async { Ok::<_, &str>(3) })
            .await
            .unwrap();
        assert_eq!(*ok, 3);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn distinct_keys_fetch_separately() {
        let cache: FetchCache<(String, u8), &'static str> = FetchCache::new();
        cache
            .get_or_fetch(("AAPL".to_string(), 1), || async { Ok::<_, ()>("a") })
            .await
            .unwrap();
        cache
            .get_or_fetch(("AAPL".to_string(), 2), || async { Ok::<_, ()>("b") })
            .await
            .unwrap();
        assert_eq!(cache.len().await, 2);
    }

    #[tokio::test]
    async fn clear_and_invalidate_drop_entries() {
        let cache: FetchCache<u8, u8> = FetchCache::new();
        for k in 0..3 {
            cache
                .get_or_fetch(k, || async move { Ok::<_, ()>(k) })
                .await
                .unwrap();
        }
        assert_eq!(cache.invalidate(&1).await.as_deref(), Some(&1));
        assert_eq!(cache.invalidate(&1).await, None);
        assert_eq!(cache.len().await, 2);

        cache.clear().await;
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn pending_fetch_blocks_other_keys() {
        let cache: Arc<FetchCache<u8, u8>> = Arc::new(FetchCache::new());
        cache
            .get_or_fetch(2, || async { Ok::<_, ()>(2) })
            .await
            .unwrap();

        let hung = Arc::clone(&cache);
        tokio::spawn(async move {
            hung.get_or_fetch(1, std::future::pending::<Result<u8, ()>>)
                .await
        });
        tokio::task::yield_now().await;

        let hit = tokio::time::timeout(
            Duration::from_millis(50),
            cache.get_or_fetch(2, || async { Ok::<_, ()>(9) }),
        )
        .await;
        assert!(hit.is_err());
    }
}
