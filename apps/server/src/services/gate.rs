// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Read-through cache in front of the metadata resolver.
//!
//! There is no locking: concurrent misses on one key may both hit the
//! resolver and both write the store, last write wins. Entries never expire.

use super::{CacheStore, MetadataResolver};
use crate::error::ApiError;
use crate::types::{AppId, AppInfo};
use std::sync::Arc;

/// Decides per lookup whether to serve from the store or the resolver.
#[derive(Clone)]
pub struct CacheGate {
    resolver: Arc<dyn MetadataResolver>,
    store: Option<Arc<dyn CacheStore>>,
}

impl CacheGate {
    /// Gate that always goes straight to the resolver.
    pub fn uncached(resolver: Arc<dyn MetadataResolver>) -> Self {
        Self {
            resolver,
            store: None,
        }
    }

    /// Gate that reads through `store`.
    pub fn cached(resolver: Arc<dyn MetadataResolver>, store: Arc<dyn CacheStore>) -> Self {
        Self {
            resolver,
            store: Some(store),
        }
    }

    pub fn is_caching(&self) -> bool {
        self.store.is_some()
    }

    /// Resolve metadata for `id`, populating the store on a miss.
    pub async fn resolve(&self, id: AppId) -> Result<AppInfo, ApiError> {
        let Some(store) = &self.store else {
            return self.resolver.fetch(id).await;
        };

        let key = AppInfo::cache_key(id);

        if let Some(info) = store.get(&key).await? {
            tracing::debug!(app_id = id, "Cache HIT");
            return Ok(info);
        }

        tracing::info!(app_id = id, "Cache MISS - fetching from upstream");

        let info = self.resolver.fetch(id).await?;
        store.set(&key, &info).await?;

        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{render, Format};
    use crate::services::testing::{CountingResolver, MemoryStore};
    use crate::types::Envelope;

    #[tokio::test]
    async fn test_uncached_always_hits_resolver() {
        let resolver = Arc::new(CountingResolver::default().with_app(730, "Counter-Strike 2"));
        let gate = CacheGate::uncached(resolver.clone());

        gate.resolve(730).await.unwrap();
        gate.resolve(730).await.unwrap();
        gate.resolve(570).await.unwrap();

        assert!(!gate.is_caching());
        assert_eq!(resolver.calls(), 3);
    }

    #[tokio::test]
    async fn test_miss_populates_then_hit_skips_resolver() {
        let resolver = Arc::new(CountingResolver::default().with_app(730, "Counter-Strike 2"));
        let store = Arc::new(MemoryStore::default());
        let gate = CacheGate::cached(resolver.clone(), store.clone());

        let first = gate.resolve(730).await.unwrap();
        assert_eq!(resolver.calls(), 1);
        assert_eq!(store.writes(), 1);
        assert!(store.contains("730"));

        let second = gate.resolve(730).await.unwrap();
        assert_eq!(resolver.calls(), 1);
        assert_eq!(store.writes(), 1);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_unknown_id_is_cached_too() {
        let resolver = Arc::new(CountingResolver::default());
        let store = Arc::new(MemoryStore::default());
        let gate = CacheGate::cached(resolver.clone(), store.clone());

        assert!(gate.resolve(42).await.unwrap().apps.is_empty());
        assert!(gate.resolve(42).await.unwrap().apps.is_empty());
        assert_eq!(resolver.calls(), 1);
    }

    #[tokio::test]
    async fn test_repeated_lookups_render_identically() {
        let resolver = Arc::new(CountingResolver::default().with_app(440, "Team Fortress 2"));
        let gate = CacheGate::cached(resolver, Arc::new(MemoryStore::default()));

        let mut bodies = Vec::new();
        for _ in 0..3 {
            let info = gate.resolve(440).await.unwrap();
            bodies.push(render(&Envelope::from_app_info(440, info), Format::Compact).unwrap());
        }

        assert!(bodies.windows(2).all(|pair| pair[0] == pair[1]));
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let resolver = Arc::new(CountingResolver::default().with_app(730, "Counter-Strike 2"));
        let gate = CacheGate::cached(resolver.clone(), Arc::new(MemoryStore::unreachable()));

        let err = gate.resolve(730).await.unwrap_err();
        assert!(matches!(err, ApiError::Cache(_)));
        assert_eq!(resolver.calls(), 0);
    }

    #[tokio::test]
    async fn test_resolver_failure_leaves_store_untouched() {
        let store = Arc::new(MemoryStore::default());
        let gate = CacheGate::cached(Arc::new(CountingResolver::failing()), store.clone());

        let err = gate.resolve(730).await.unwrap_err();
        assert!(matches!(err, ApiError::Upstream(_)));
        assert_eq!(store.reads(), 1);
        assert_eq!(store.writes(), 0);
    }
}
