//! Shared application state for the sysmon provider.
//!
//! Owns the registry handle collectors write to and the provider task
//! handle the HTTP layer asks.

use std::sync::Arc;

use sysmon_core::error::Result;
use sysmon_core::registry::MetricRegistry;

use crate::config::MonitorConfig;
use crate::provider::MetricsProvider;
use crate::snapshot::SnapshotBuilder;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    provider: MetricsProvider,
}

struct AppStateInner {
    cfg: MonitorConfig,
    registry: Arc<MetricRegistry>,
}

impl AppState {
    /// Build application state and spawn the provider task.
    /// Must be called from within a tokio runtime.
    pub fn new(cfg: MonitorConfig, registry: Arc<MetricRegistry>) -> Result<Self> {
        let builder = SnapshotBuilder::new(Arc::clone(&registry))
            .with_date_offset(cfg.snapshot.date_offset()?);
        let provider = MetricsProvider::spawn(builder, cfg.provider.mailbox_capacity);

        Ok(Self {
            inner: Arc::new(AppStateInner { cfg, registry }),
            provider,
        })
    }

    pub fn cfg(&self) -> &MonitorConfig {
        &self.inner.cfg
    }

    pub fn registry(&self) -> Arc<MetricRegistry> {
        Arc::clone(&self.inner.registry)
    }

    pub fn provider(&self) -> &MetricsProvider {
        &self.provider
    }
}
