mod artifacts;

use std::path::{Path, PathBuf};

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::middleware::{request_id, RequestId};

#[derive(Clone)]
pub struct AppState {
    /// Directory the pipeline writes its JSON artifacts to.
    pub data_dir: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
struct HealthData {
    status: &'static str,
    artifacts: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "no_data" | "not_found" => StatusCode::NOT_FOUND,
            "bad_request" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

/// Assemble the read-only API router plus static hosting for the web UI.
///
/// The server never recomputes the index; every data route is a file read
/// over the pipeline's artifacts.
pub fn build_app(state: AppState, web_dir: &Path) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/latest", get(artifacts::latest))
        .route("/api/index", get(artifacts::index_series))
        .route("/api/events", get(artifacts::events))
        .nest_service("/web", ServeDir::new(web_dir))
        .fallback_service(ServeDir::new(web_dir))
        .layer(axum::middleware::from_fn(request_id))
        .layer(build_cors())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<HealthData>> {
    let artifacts = if state
        .data_dir
        .join(hindex_core::artifacts::INDEX_SERIES_FILE)
        .exists()
    {
        "present"
    } else {
        "missing"
    };
    Json(ApiResponse {
        data: HealthData {
            status: "ok",
            artifacts,
        },
        meta: ResponseMeta::new(req_id.0),
    })
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;

    fn scratch_dir(label: &str) -> PathBuf {
        let dir =
            std::env::temp_dir().join(format!("hindex-server-{label}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn app(data_dir: &Path) -> Router {
        build_app(
            AppState {
                data_dir: data_dir.to_path_buf(),
            },
            data_dir,
        )
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn healthz_reports_missing_artifacts() {
        let dir = scratch_dir("healthz");
        let response = app(&dir)
            .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["status"], "ok");
        assert_eq!(json["data"]["artifacts"], "missing");
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn latest_returns_not_found_before_first_run() {
        let dir = scratch_dir("latest-missing");
        let response = app(&dir)
            .oneshot(Request::get("/api/latest").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "no_data");
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn latest_returns_artifact_contents() {
        let dir = scratch_dir("latest-present");
        std::fs::write(
            dir.join(hindex_core::artifacts::LATEST_FILE),
            r#"{"date":"2025-06-01","HI":17}"#,
        )
        .unwrap();
        let response = app(&dir)
            .oneshot(Request::get("/api/latest").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["HI"], 17);
        assert_eq!(json["data"]["date"], "2025-06-01");
        assert!(json["meta"]["request_id"].is_string());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn index_series_round_trips_through_the_api() {
        let dir = scratch_dir("series");
        std::fs::write(
            dir.join(hindex_core::artifacts::INDEX_SERIES_FILE),
            r#"[{"date":"2025-06-01","HI":-42},{"date":"2025-06-02","HI":62}]"#,
        )
        .unwrap();
        let response = app(&dir)
            .oneshot(Request::get("/api/index").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 2);
        assert_eq!(json["data"][1]["HI"], 62);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn request_id_header_is_echoed() {
        let dir = scratch_dir("reqid");
        let response = app(&dir)
            .oneshot(
                Request::get("/healthz")
                    .header("x-request-id", "abc-123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            response.headers().get("x-request-id").unwrap(),
            "abc-123"
        );
        let _ = std::fs::remove_dir_all(&dir);
    }
}
