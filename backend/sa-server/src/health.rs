use sa_ws::AppState;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde_json::json;

/// GET /health - status of the transport and the configuration store
pub async fn health_check(State(state): State<AppState>) -> Response {
    let database = match state
        .dispatcher
        .channels()
        .get_default(state.session.owner_id())
        .await
    {
        Ok(_) => "operational",
        Err(e) => {
            log::warn!("Health check: store unavailable: {e}");
            "unavailable"
        }
    };

    let status = if database == "operational" {
        "healthy"
    } else {
        "degraded"
    };

    let health = json!({
        "status": status,
        "version": env!("CARGO_PKG_VERSION"),
        "owner_id": state.session.owner_id(),
        "uptime_secs": (Utc::now() - state.session.started_at()).num_seconds(),
        "components": {
            "websocket": {
                "connections": state.registry.total_count().await,
                "channels": state.broadcaster.channel_count().await,
            },
            "database": database,
        },
        "timestamp": Utc::now().to_rfc3339(),
    });

    (StatusCode::OK, Json(health)).into_response()
}

/// GET /live - the process answers
pub async fn liveness_check() -> Response {
    (StatusCode::OK, "OK").into_response()
}

/// GET /ready - accepting connections until shutdown starts
pub async fn readiness_check(State(state): State<AppState>) -> Response {
    if state.shutdown.is_shutdown() {
        return (StatusCode::SERVICE_UNAVAILABLE, "Shutting down").into_response();
    }
    (StatusCode::OK, "Ready").into_response()
}
