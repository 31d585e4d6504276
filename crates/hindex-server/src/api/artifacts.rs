//! Artifact-backed data routes.
//!
//! Each handler reads one JSON artifact written by the pipeline and returns
//! it verbatim inside the response envelope. A missing artifact means the
//! pipeline has not produced data yet, which is a 404, not a server error.

use std::path::Path;

use axum::{extract::State, Extension, Json};
use hindex_core::artifacts::{EVENTS_FILE, INDEX_SERIES_FILE, LATEST_FILE};
use serde_json::Value;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

pub(super) async fn latest(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Value>>, ApiError> {
    read_artifact(&state.data_dir.join(LATEST_FILE), req_id.0).await
}

pub(super) async fn index_series(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Value>>, ApiError> {
    read_artifact(&state.data_dir.join(INDEX_SERIES_FILE), req_id.0).await
}

pub(super) async fn events(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Value>>, ApiError> {
    read_artifact(&state.data_dir.join(EVENTS_FILE), req_id.0).await
}

async fn read_artifact(
    path: &Path,
    request_id: String,
) -> Result<Json<ApiResponse<Value>>, ApiError> {
    let raw = match tokio::fs::read(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ApiError::new(
                request_id,
                "no_data",
                "no data yet — the pipeline has not run",
            ));
        }
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "artifact read failed");
            return Err(ApiError::new(
                request_id,
                "internal_error",
                "artifact read failed",
            ));
        }
    };

    let value: Value = serde_json::from_slice(&raw).map_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "artifact is not valid JSON");
        ApiError::new(request_id.clone(), "internal_error", "artifact is corrupt")
    })?;

    Ok(Json(ApiResponse {
        data: value,
        meta: ResponseMeta::new(request_id),
    }))
}
