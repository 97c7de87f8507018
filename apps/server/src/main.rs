// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! App Info Server - application metadata lookups with an optional
//! read-through cache.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /v1/info/:id` - Application metadata (`?pretty=true` to indent)
//! - `GET /v1/version` - Configured API version

use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

mod config;
mod error;
mod render;
mod routes;
mod services;
mod types;

use config::Config;
use services::{CacheGate, CacheStore, DiskCache, HttpResolver};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub gate: Arc<CacheGate>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,tower_http=debug,appinfo_server=debug".into()),
        )
        .pretty()
        .init();

    if let Ok(path) = dotenv {
        tracing::debug!(path = %path.display(), "Loaded .env");
    }

    let config = Config::from_env();

    tracing::info!(
        port = config.port,
        cache_enabled = config.cache_enabled,
        cache_dir = %config.cache_dir,
        upstream_url = %config.upstream_url,
        allowed_hosts = ?config.allowed_hosts,
        "Starting App Info Server"
    );

    let timeout = Duration::from_secs(config.request_timeout_secs);
    let resolver = Arc::new(HttpResolver::new(&config.upstream_url, timeout)?);

    let gate = if config.cache_enabled {
        let store: Arc<dyn CacheStore> = Arc::new(DiskCache::new(&config.cache_dir).await);
        CacheGate::cached(resolver, store)
    } else {
        CacheGate::uncached(resolver)
    };

    let state = AppState {
        gate: Arc::new(gate),
        config: Arc::new(config.clone()),
    };

    let app = routes::app(state).context("Invalid ALLOWED_HOSTS")?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
