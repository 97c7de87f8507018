// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Upstream metadata source.

use crate::error::ApiError;
use crate::types::{AppId, AppInfo};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;

/// Source of truth for application metadata.
#[async_trait]
pub trait MetadataResolver: Send + Sync {
    /// Fetch metadata for `id`. Unknown ids yield an empty `apps` map.
    async fn fetch(&self, id: AppId) -> Result<AppInfo, ApiError>;
}

/// Resolver backed by a JSON HTTP endpoint at `{base_url}/{id}`.
pub struct HttpResolver {
    base_url: String,
    http: reqwest::Client,
}

impl HttpResolver {
    /// Create a new resolver.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Internal(format!("HTTP client setup failed: {e}")))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }
}

#[async_trait]
impl MetadataResolver for HttpResolver {
    async fn fetch(&self, id: AppId) -> Result<AppInfo, ApiError> {
        let url = format!("{}/{}", self.base_url, id);
        tracing::debug!(app_id = id, url = %url, "Fetching app info");

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Upstream(format!("Request failed: {e}")))?;

        if resp.status() == StatusCode::NOT_FOUND {
            tracing::debug!(app_id = id, "Upstream has no entry");
            return Ok(AppInfo::default());
        }

        if !resp.status().is_success() {
            return Err(ApiError::Upstream(format!(
                "Lookup failed with status {}",
                resp.status()
            )));
        }

        resp.json::<AppInfo>()
            .await
            .map_err(|e| ApiError::Upstream(format!("Response parse failed: {e}")))
    }
}
