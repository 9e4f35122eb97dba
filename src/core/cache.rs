use crate::utils::error::Result;
use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};

/// Keyed memoization of async loads.
///
/// Each key owns a `OnceCell`, so concurrent callers for the same key wait on a
/// single load instead of each issuing their own request. A failed load leaves
/// the cell empty and the next caller tries again.
pub struct MemoCache<K, V> {
    cells: Mutex<HashMap<K, Arc<OnceCell<Arc<V>>>>>,
}

impl<K, V> Default for MemoCache<K, V> {
    fn default() -> Self {
        Self {
            cells: Mutex::new(HashMap::new()),
        }
    }
}

impl<K, V> MemoCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_or_try_load<F, Fut>(&self, key: &K, load: F) -> Result<Arc<V>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        let cell = {
            let mut cells = self.cells.lock().await;
            cells.entry(key.clone()).or_default().clone()
        };

        let value = cell
            .get_or_try_init(|| async { load().await.map(Arc::new) })
            .await?;
        Ok(Arc::clone(value))
    }

    /// The cached value, without triggering a load.
    pub async fn peek(&self, key: &K) -> Option<Arc<V>> {
        let cells = self.cells.lock().await;
        cells.get(key).and_then(|cell| cell.get().cloned())
    }

    pub async fn len(&self) -> usize {
        let cells = self.cells.lock().await;
        cells.values().filter(|cell| cell.initialized()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::SiteError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_loads_once_per_key() {
        let cache: MemoCache<String, u32> = MemoCache::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let value = cache
                .get_or_try_load(&"a".to_string(), || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(7)
                })
                .await
                .unwrap();
            assert_eq!(*value, 7);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_concurrent_loads_are_coalesced() {
        let cache: MemoCache<&'static str, u32> = MemoCache::new();
        let calls = AtomicUsize::new(0);

        let load = || async {
            calls.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            Ok(1)
        };

        let (a, b) = tokio::join!(
            cache.get_or_try_load(&"k", load),
            cache.get_or_try_load(&"k", load)
        );

        assert_eq!(*a.unwrap(), 1);
        assert_eq!(*b.unwrap(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let cache: MemoCache<&'static str, u32> = MemoCache::new();

        let err = cache
            .get_or_try_load(&"k", || async {
                Err(SiteError::HttpStatusError {
                    resource: "k".to_string(),
                    status: 500,
                })
            })
            .await;
        assert!(err.is_err());
        assert!(cache.peek(&"k").await.is_none());

        let ok = cache.get_or_try_load(&"k", || async { Ok(2) }).await.unwrap();
        assert_eq!(*ok, 2);
    }
}
