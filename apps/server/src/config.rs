// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Server configuration loaded from environment variables.

use crate::types::parse_flag;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port to listen on.
    pub port: u16,
    /// Allowed CORS origins (comma-separated, "*" mirrors any origin).
    pub allowed_hosts: Vec<String>,
    /// Serve lookups through the read-through cache.
    pub cache_enabled: bool,
    /// Directory for cache storage.
    pub cache_dir: String,
    /// Semantic version reported by `/v1/version`.
    pub version: Option<String>,
    /// Base URL of the upstream metadata source.
    pub upstream_url: String,
    /// Request timeout in seconds, also applied to upstream calls.
    pub request_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            port: lookup("PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(8000),
            allowed_hosts: lookup("ALLOWED_HOSTS")
                .unwrap_or_else(|| "http://localhost".into())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            // Unrecognised non-empty values still enable the cache
            cache_enabled: lookup("CACHE")
                .map(|v| parse_flag(&v).unwrap_or(!v.trim().is_empty()))
                .unwrap_or(false),
            cache_dir: lookup("CACHE_DIR").unwrap_or_else(|| {
                std::env::current_dir()
                    .ok()
                    .and_then(|dir| dir.join(".cache").to_str().map(|s| s.to_string()))
                    .unwrap_or_else(|| "./.cache".into())
            }),
            version: lookup("VERSION").filter(|v| !v.is_empty()),
            upstream_url: lookup("UPSTREAM_URL")
                .unwrap_or_else(|| "http://localhost:8080/v1/apps".into()),
            request_timeout_secs: lookup("REQUEST_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
