use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Cache miss: {0}")]
    CacheMiss(String),
}

/// In-process TTL cache for upstream lookups
///
/// Values are stored as serialized JSON so one cache can hold any
/// `Serialize + Deserialize` payload under string keys.
#[derive(Clone)]
pub struct CacheManager {
    entries: moka::future::Cache<String, Vec<u8>>,
    ttl_secs: u64,
}

impl CacheManager {
    /// Create a new cache manager
    pub fn new(max_entries: u64, ttl_secs: u64) -> Self {
        let entries = moka::future::CacheBuilder::new(max_entries)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { entries, ttl_secs }
    }

    /// Get a value from cache
    pub async fn get<T>(&self, key: &str) -> Result<T, CacheError>
    where
        T: for<'de> Deserialize<'de>,
    {
        match self.entries.get(key).await {
            Some(bytes) => {
                tracing::trace!("Cache hit: {}", key);
                Ok(serde_json::from_slice(&bytes)?)
            }
            None => {
                tracing::trace!("Cache miss: {}", key);
                Err(CacheError::CacheMiss(key.to_string()))
            }
        }
    }

    /// Set a value in cache
    pub async fn set<T>(&self, key: &str, value: &T) -> Result<(), CacheError>
    where
        T: Serialize,
    {
        let bytes = serde_json::to_vec(value)?;
        self.entries.insert(key.to_string(), bytes).await;

        tracing::trace!("Cache set: {} (ttl {}s)", key, self.ttl_secs);
        Ok(())
    }

    /// Delete a value from cache
    pub async fn delete(&self, key: &str) {
        self.entries.invalidate(key).await;
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.entry_count(),
            ttl_secs: self.ttl_secs,
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: u64,
    pub ttl_secs: u64,
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build a cache key for the full breed catalog
    pub fn breeds() -> String {
        "breeds:all".to_string()
    }

    /// Build a cache key for a single breed lookup
    pub fn breed(name: &str) -> String {
        format!("breed:{}", name.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cache_set_get() {
        let cache = CacheManager::new(100, 60);

        let key = "test_key";
        let value = vec!["Siamese".to_string(), "Bengal".to_string()];

        cache.set(key, &value).await.unwrap();
        let result: Vec<String> = cache.get(key).await.unwrap();
        assert_eq!(result, value);

        cache.delete(key).await;
        assert!(matches!(
            cache.get::<Vec<String>>(key).await,
            Err(CacheError::CacheMiss(_))
        ));
    }

    #[tokio::test]
    async fn test_cache_type_mismatch_is_serialization_error() {
        let cache = CacheManager::new(100, 60);
        cache.set("number", &42u32).await.unwrap();

        assert!(matches!(
            cache.get::<Vec<String>>("number").await,
            Err(CacheError::SerializationError(_))
        ));
    }

    #[test]
    fn test_cache_key_builder() {
        assert_eq!(CacheKey::breeds(), "breeds:all");
        assert_eq!(CacheKey::breed("Maine Coon"), "breed:maine coon");
    }
}
