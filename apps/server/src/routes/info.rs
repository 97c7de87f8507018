// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Application metadata lookup endpoint.

use crate::error::ApiError;
use crate::render::JsonEnvelope;
use crate::types::{AppId, Envelope, FormatQuery};
use crate::AppState;
use axum::extract::{
    rejection::{PathRejection, QueryRejection},
    Path, Query, State,
};

/// GET /v1/info/:id - Look up application metadata.
pub async fn read_app(
    State(state): State<AppState>,
    path: Result<Path<AppId>, PathRejection>,
    query: Result<Query<FormatQuery>, QueryRejection>,
) -> Result<JsonEnvelope, ApiError> {
    let Path(app_id) = path.map_err(|e| ApiError::InvalidAppId(e.body_text()))?;
    let Query(query) = query.map_err(|e| ApiError::InvalidQuery(e.body_text()))?;

    tracing::debug!(app_id, cached = state.gate.is_caching(), "App info lookup");

    let info = state.gate.resolve(app_id).await?;

    Ok(JsonEnvelope::new(
        Envelope::from_app_info(app_id, info),
        query.format(),
    ))
}
