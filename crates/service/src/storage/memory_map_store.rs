use std::{collections::HashMap, hash::Hash, sync::Arc};
use tokio::sync::RwLock;

/// Generic in-memory key-value map store.
///
/// Wraps a `HashMap<K, V>` behind an async `RwLock`. Compound operations
/// (`insert_new`, `replace`) check and mutate under a single write guard, so
/// concurrent callers never observe a half-applied update. Nothing is persisted.
#[derive(Clone)]
pub struct MemoryMapStore<K, V> {
    inner: Arc<RwLock<HashMap<K, V>>>,
}

impl<K, V> Default for MemoryMapStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> MemoryMapStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new() -> Self {
        Self::from_map(HashMap::new())
    }

    pub fn from_map(map: HashMap<K, V>) -> Self {
        Self { inner: Arc::new(RwLock::new(map)) }
    }

    /// List all entries as `(key, value)` pairs.
    pub async fn list(&self) -> Vec<(K, V)> {
        let map = self.inner.read().await;
        map.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    /// Get value by key.
    pub async fn get(&self, key: &K) -> Option<V> {
        let map = self.inner.read().await;
        map.get(key).cloned()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// Insert only if the key is absent. On conflict the map is left untouched
    /// and the rejected value is handed back.
    pub async fn insert_new(&self, key: K, value: V) -> Result<(), V> {
        let mut map = self.inner.write().await;
        if map.contains_key(&key) {
            return Err(value);
        }
        map.insert(key, value);
        Ok(())
    }

    /// Overwrite the value of an existing key; returns the previous value,
    /// or `None` (and inserts nothing) when the key is absent.
    pub async fn replace(&self, key: &K, value: V) -> Option<V> {
        let mut map = self.inner.write().await;
        map.get_mut(key).map(|slot| std::mem::replace(slot, value))
    }

    /// Remove a key; returns the value it held, if any.
    pub async fn remove(&self, key: &K) -> Option<V> {
        let mut map = self.inner.write().await;
        map.remove(key)
    }
}
