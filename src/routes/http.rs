// GET handlers: version, live host readings, request-log aggregates

use axum::{Json, extract::State};

use super::AppState;
use crate::models::{
    GraphData, Reachability, RequestLogRecord, Summary, TrafficTotals, UptimeDowntime,
};
use crate::query::QueryError;
use crate::version::{self, VersionInfo};

/// GET /version: service name and version from Cargo.toml.
pub(super) async fn version_handler() -> Json<VersionInfo> {
    Json(version::current())
}

/// GET /health: one live reachability probe. Always 200, even when unhealthy.
pub(super) async fn health_handler(State(state): State<AppState>) -> Json<Reachability> {
    Json(state.query.health().await)
}

pub(super) async fn speed_handler(State(state): State<AppState>) -> Json<TrafficTotals> {
    Json(state.query.speed().await)
}

pub(super) async fn time_handler(State(state): State<AppState>) -> Json<UptimeDowntime> {
    Json(state.query.uptime_downtime())
}

/// GET /logs: 404 when no logs have been ingested yet.
pub(super) async fn logs_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<RequestLogRecord>>, QueryError> {
    state.query.list_logs().await.map(Json)
}

/// GET /top: waits out the CPU sampling window.
pub(super) async fn top_handler(
    State(state): State<AppState>,
) -> Result<Json<Summary>, QueryError> {
    state.query.summary().await.map(Json)
}

pub(super) async fn graph_handler(
    State(state): State<AppState>,
) -> Result<Json<GraphData>, QueryError> {
    state.query.graph_data().await.map(Json)
}
