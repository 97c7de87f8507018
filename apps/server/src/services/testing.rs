// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory collaborators with call counters for tests.

use super::{CacheStore, MetadataResolver};
use crate::error::ApiError;
use crate::types::{AppId, AppInfo};
use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Resolver that knows a fixed set of ids and counts every fetch.
#[derive(Default)]
pub struct CountingResolver {
    known: HashMap<AppId, AppInfo>,
    calls: AtomicUsize,
    fail: bool,
    delay: Option<Duration>,
}

impl CountingResolver {
    pub fn with_app(mut self, id: AppId, name: &str) -> Self {
        let mut info = AppInfo::default();
        info.apps.insert(
            AppInfo::cache_key(id),
            json!({"appid": id.to_string(), "common": {"name": name, "type": "Game"}}),
        );
        self.known.insert(id, info);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetadataResolver for CountingResolver {
    async fn fetch(&self, id: AppId) -> Result<AppInfo, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(ApiError::Upstream("connection refused".into()));
        }
        Ok(self.known.get(&id).cloned().unwrap_or_default())
    }
}

/// Store kept in a map, counting reads and writes.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, AppInfo>>,
    reads: AtomicUsize,
    writes: AtomicUsize,
    fail: bool,
}

impl MemoryStore {
    pub fn unreachable() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().unwrap().contains_key(key)
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<AppInfo>, ApiError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ApiError::Cache("store unreachable".into()));
        }
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &AppInfo) -> Result<(), ApiError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ApiError::Cache("store unreachable".into()));
        }
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.clone());
        Ok(())
    }
}
