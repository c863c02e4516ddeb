//! Health check handlers
//!
//! Endpoints for liveness and readiness probes.

use axum::{extract::State, http::StatusCode, Json};
use scheduler_service::{DependencyStatus, HealthResponse, ReadinessResponse};

use crate::state::AppState;

/// Basic health check (liveness probe)
///
/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Readiness check with dependency health
///
/// GET /health/ready
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let ctx = state.service_context();

    let database = match ctx.db_pool() {
        Some(pool) => match pool.acquire().await {
            Ok(_) => DependencyStatus::Healthy,
            Err(e) => {
                tracing::warn!(error = %e, "Database readiness check failed");
                DependencyStatus::Unhealthy
            }
        },
        None => DependencyStatus::NotConfigured,
    };

    let redis = match ctx.redis_pool() {
        Some(pool) => match pool.health_check().await {
            Ok(()) => DependencyStatus::Healthy,
            Err(e) => {
                tracing::warn!(error = %e, "Redis readiness check failed");
                DependencyStatus::Unhealthy
            }
        },
        None => DependencyStatus::NotConfigured,
    };

    let response = ReadinessResponse::new(database, redis);
    let status = if response.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
