// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Disk-based cache service using cacache.

use crate::error::ApiError;
use crate::types::AppInfo;
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::path::PathBuf;

/// Key-value store backing the read-through cache.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Read an entry, `None` when the key was never written.
    async fn get(&self, key: &str) -> Result<Option<AppInfo>, ApiError>;

    /// Write an entry, replacing any previous value.
    async fn set(&self, key: &str, value: &AppInfo) -> Result<(), ApiError>;
}

/// Content-addressable disk cache.
#[derive(Debug, Clone)]
pub struct DiskCache {
    cache_dir: PathBuf,
}

impl DiskCache {
    /// Create a new cache in the specified directory.
    pub async fn new(cache_dir: &str) -> Self {
        let path = PathBuf::from(cache_dir);

        // Create cache directory if it doesn't exist
        if let Err(e) = tokio::fs::create_dir_all(&path).await {
            tracing::warn!(
                error = %e,
                path = %path.display(),
                "Failed to create cache directory"
            );
        }

        Self { cache_dir: path }
    }

    /// Get a cached value by key.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ApiError> {
        match cacache::read(&self.cache_dir, key).await {
            Ok(data) => {
                let value: T = serde_json::from_slice(&data)
                    .map_err(|e| ApiError::Cache(format!("Corrupt entry {key}: {e}")))?;
                Ok(Some(value))
            }
            Err(cacache::Error::EntryNotFound(_, _)) => Ok(None),
            Err(e) => Err(ApiError::Cache(e.to_string())),
        }
    }

    /// Set a cached value.
    pub async fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), ApiError> {
        let data = serde_json::to_vec(value)?;
        cacache::write(&self.cache_dir, key, &data).await?;
        tracing::debug!(key = %key, size = data.len(), "Cached result");
        Ok(())
    }
}

#[async_trait]
impl CacheStore for DiskCache {
    async fn get(&self, key: &str) -> Result<Option<AppInfo>, ApiError> {
        self.get_json(key).await
    }

    async fn set(&self, key: &str, value: &AppInfo) -> Result<(), ApiError> {
        self.set_json(key, value).await
    }
}
