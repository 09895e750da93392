//! sysmon provider daemon.
//!
//! - Loads `sysmon.yaml` (or the path given as the first argument)
//! - Spawns the metrics provider over a fresh registry
//! - Serves `/healthz` and `/v1/system-metrics`

use std::sync::Arc;
use std::time::Instant;

use tracing_subscriber::{fmt, EnvFilter};

use sysmon_core::error::{MonitorError, Result};
use sysmon_core::registry::{FnGauge, GaugeValue, MetricRegistry};
use sysmon_provider::{app_state, config, router};

const UPTIME_GAUGE: &str = "monitorUptimeSeconds";

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "sysmon.yaml".to_string());
    let cfg = config::load_from_file(&path)?;
    let listen = cfg.provider.listen_addr()?;

    let registry = Arc::new(MetricRegistry::new());
    let started = Instant::now();
    registry.register_gauge(
        UPTIME_GAUGE,
        Arc::new(FnGauge::new(move || {
            let secs = i64::try_from(started.elapsed().as_secs()).unwrap_or(i64::MAX);
            Ok(GaugeValue::from(secs))
        })),
    )?;

    let state = app_state::AppState::new(cfg, registry)?;
    let app = router::build_router(state);

    tracing::info!(%listen, config = %path, "sysmon-provider starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| MonitorError::Internal(format!("bind {listen} failed: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| MonitorError::Internal(format!("server failed: {e}")))
}
