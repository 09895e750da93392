//! Operational HTTP endpoints.
//!
//! - `/healthz`           : liveness
//! - `/v1/system-metrics` : JSON view of one snapshot (503 when none is
//!   available this cycle)

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tokio::time::{timeout, Duration};

use sysmon_core::error::MonitorError;

use crate::app_state::AppState;

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn system_metrics(State(state): State<AppState>) -> Response {
    let wait_ms = state.cfg().provider.ask_timeout_ms;

    match timeout(Duration::from_millis(wait_ms), state.provider().system_metrics()).await {
        Ok(Ok(resp)) => (StatusCode::OK, Json(resp.into_metrics())).into_response(),
        Ok(Err(e)) => unavailable(&e),
        Err(_) => unavailable(&MonitorError::Timeout(wait_ms)),
    }
}

fn unavailable(e: &MonitorError) -> Response {
    tracing::warn!(error = %e, "no system metrics snapshot this cycle");
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({ "code": e.code().as_str(), "message": e.to_string() })),
    )
        .into_response()
}
