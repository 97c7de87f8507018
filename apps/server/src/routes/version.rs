// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! API version endpoint.

use crate::error::ApiError;
use crate::render::JsonEnvelope;
use crate::services::version;
use crate::types::FormatQuery;
use crate::AppState;
use axum::extract::{rejection::QueryRejection, Query, State};

/// GET /v1/version - Report the configured API version.
pub async fn read_version(
    State(state): State<AppState>,
    query: Result<Query<FormatQuery>, QueryRejection>,
) -> Result<JsonEnvelope, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::InvalidQuery(e.body_text()))?;

    Ok(JsonEnvelope::new(
        version::report(state.config.version.as_deref()),
        query.format(),
    ))
}
