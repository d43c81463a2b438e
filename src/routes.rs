use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::aggregator;
use crate::error::ProxyError;
use crate::fetcher::Fetcher;
use crate::posts::PostsBody;

pub struct AppState {
    pub fetcher: Arc<Fetcher>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/ping", get(ping))
        .route("/api/posts", get(posts))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// Error envelope: {"error": {"message": ..., "status": ...}}
pub struct AppError(ProxyError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.0.status();
        if self.0.is_client_error() {
            warn!("Rejected request: {}", self.0);
        } else {
            error!("Request failed: {}", self.0);
        }

        let code = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = json!({
            "error": {
                "message": self.0.to_string(),
                "status": code.as_u16(),
            }
        });
        (code, Json(body)).into_response()
    }
}

impl From<ProxyError> for AppError {
    fn from(err: ProxyError) -> Self {
        AppError(err)
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError(ProxyError::InvalidQuery(rejection.body_text()))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PostsParams {
    pub tags: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    pub direction: Option<String>,
}

pub async fn ping() -> impl IntoResponse {
    Json(json!({ "success": true }))
}

pub async fn posts(
    State(state): State<Arc<AppState>>,
    params: Result<Query<PostsParams>, QueryRejection>,
) -> Result<Json<PostsBody>, AppError> {
    let Query(params) = params?;
    let posts = aggregator::aggregate(
        &state.fetcher,
        params.tags.as_deref(),
        params.sort_by.as_deref(),
        params.direction.as_deref(),
    )
    .await?;

    Ok(Json(PostsBody { posts }))
}
