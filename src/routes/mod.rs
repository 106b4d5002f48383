// HTTP routes

mod http;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::query::{QueryError, QueryService};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) query: Arc<QueryService>,
}

pub fn app(query: Arc<QueryService>) -> Router {
    let state = AppState { query };
    Router::new()
        .route("/version", get(http::version_handler)) // GET /version
        .route("/health", get(http::health_handler)) // GET /health
        .route("/speed", get(http::speed_handler)) // GET /speed
        .route("/time", get(http::time_handler)) // GET /time
        .route("/logs", get(http::logs_handler)) // GET /logs
        .route("/top", get(http::top_handler)) // GET /top
        .route("/graph", get(http::graph_handler)) // GET /graph
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}

/// Errors render as `{"detail": "..."}`. Store failures are logged, not echoed to the client.
impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            QueryError::NotFound(msg) => (StatusCode::NOT_FOUND, *msg),
            QueryError::Store(e) => {
                tracing::warn!(error = %e, "store read failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };
        (status, Json(serde_json::json!({ "detail": detail }))).into_response()
    }
}
