use async_trait::async_trait;
use std::time::Duration;
use crate::models::ResolvedAddress;
use crate::services::geocoder::{AddressResolver, GeocodeError};

/// In-memory TTL cache in front of an address resolver
///
/// Only successful resolutions are cached. Not-found results and errors
/// always go back to the wrapped resolver.
pub struct CachedResolver<R> {
    inner: R,
    cache: moka::future::Cache<String, ResolvedAddress>,
}

impl<R: AddressResolver> CachedResolver<R> {
    pub fn new(inner: R, max_capacity: u64, ttl: Duration) -> Self {
        let cache = moka::future::CacheBuilder::new(max_capacity)
            .time_to_live(ttl)
            .build();

        Self { inner, cache }
    }

    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}

/// Cache key for a free-text query
pub fn cache_key(address: &str) -> String {
    address.trim().to_lowercase()
}

#[async_trait]
impl<R: AddressResolver> AddressResolver for CachedResolver<R> {
    async fn resolve(&self, address: &str) -> Result<Option<ResolvedAddress>, GeocodeError> {
        let key = cache_key(address);

        if let Some(resolved) = self.cache.get(&key).await {
            tracing::trace!("Geocode cache hit: {}", key);
            return Ok(Some(resolved));
        }

        let resolved = self.inner.resolve(address).await?;
        if let Some(resolved) = &resolved {
            self.cache.insert(key, resolved.clone()).await;
        }

        Ok(resolved)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinate;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingResolver {
        calls: AtomicUsize,
        found: bool,
    }

    #[async_trait]
    impl AddressResolver for CountingResolver {
        async fn resolve(&self, address: &str) -> Result<Option<ResolvedAddress>, GeocodeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.found {
                return Ok(None);
            }
            Ok(Some(ResolvedAddress {
                formatted_address: address.to_string(),
                coordinates: Coordinate { lat: 30.0, lng: -97.0 },
                ..Default::default()
            }))
        }
    }

    #[test]
    fn test_cache_key_normalization() {
        assert_eq!(cache_key("  Austin, TX "), "austin, tx");
    }

    #[tokio::test]
    async fn test_hits_are_cached() {
        let resolver = CachedResolver::new(
            CountingResolver { calls: AtomicUsize::new(0), found: true },
            100,
            Duration::from_secs(60),
        );

        resolver.resolve("Austin, TX").await.unwrap();
        let second = resolver.resolve("austin, tx ").await.unwrap();

        assert!(second.is_some());
        assert_eq!(resolver.inner.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_not_found_is_not_cached() {
        let resolver = CachedResolver::new(
            CountingResolver { calls: AtomicUsize::new(0), found: false },
            100,
            Duration::from_secs(60),
        );

        assert!(resolver.resolve("nowhere").await.unwrap().is_none());
        assert!(resolver.resolve("nowhere").await.unwrap().is_none());
        assert_eq!(resolver.inner.calls.load(Ordering::SeqCst), 2);
    }
}
