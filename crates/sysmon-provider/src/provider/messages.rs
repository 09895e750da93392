use serde::Serialize;

use sysmon_core::dto::MetricSetDto;

/// Message type name of [`SystemMetricsRequest`] on the wire.
pub const SYSTEM_METRICS_REQUEST: &str = "systemMetrics";

/// Ask for a snapshot of the whole registry. Carries no payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SystemMetricsRequest;

/// Reply to [`SystemMetricsRequest`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemMetricsResponse {
    metrics: MetricSetDto,
}

impl SystemMetricsResponse {
    pub fn new(metrics: MetricSetDto) -> Self {
        Self { metrics }
    }

    pub fn metrics(&self) -> &MetricSetDto {
        &self.metrics
    }

    pub fn into_metrics(self) -> MetricSetDto {
        self.metrics
    }
}

/// Anything that can land in the provider mailbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderRequest {
    SystemMetrics(SystemMetricsRequest),
    /// A message of a type the provider does not understand, by type name.
    Other(String),
}

impl ProviderRequest {
    /// Resolve a message type name.
    pub fn from_kind(kind: &str) -> Self {
        match kind {
            SYSTEM_METRICS_REQUEST => ProviderRequest::SystemMetrics(SystemMetricsRequest),
            other => ProviderRequest::Other(other.to_string()),
        }
    }

    pub fn kind(&self) -> &str {
        match self {
            ProviderRequest::SystemMetrics(_) => SYSTEM_METRICS_REQUEST,
            ProviderRequest::Other(kind) => kind,
        }
    }
}

impl From<SystemMetricsRequest> for ProviderRequest {
    fn from(r: SystemMetricsRequest) -> Self {
        ProviderRequest::SystemMetrics(r)
    }
}

/// Published for every message the provider did not handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnhandledMessage {
    pub kind: String,
}

/// What the provider answers with.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderReply {
    SystemMetrics(SystemMetricsResponse),
    Unhandled(UnhandledMessage),
}
