//! Metrics provider: the message-driven front of the snapshot builder.
//!
//! The provider runs as its own task behind a bounded mailbox. Each request
//! gets exactly one reply on its own oneshot channel: a snapshot, a build
//! error, or an explicit unhandled notice. Unhandled messages are also
//! published on a broadcast channel so supervisors can observe misrouting.
//! There are no retries or timeouts here; callers own both.

mod actor;
mod messages;

use tokio::sync::{broadcast, mpsc, oneshot};

use sysmon_core::error::{MonitorError, Result};

use crate::snapshot::SnapshotBuilder;

use actor::{Envelope, MetricsProviderActor};

pub use messages::{
    ProviderReply, ProviderRequest, SystemMetricsRequest, SystemMetricsResponse,
    UnhandledMessage, SYSTEM_METRICS_REQUEST,
};

const UNHANDLED_BUFFER_SIZE: usize = 16;

/// Handle to a running provider task. Cheap to clone.
#[derive(Clone)]
pub struct MetricsProvider {
    tx: mpsc::Sender<Envelope>,
    unhandled: broadcast::Sender<UnhandledMessage>,
}

impl MetricsProvider {
    /// Spawn the provider task on the current tokio runtime.
    pub fn spawn(builder: SnapshotBuilder, mailbox_capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(mailbox_capacity.max(1));
        let (unhandled, _) = broadcast::channel(UNHANDLED_BUFFER_SIZE);

        let actor = MetricsProviderActor::new(builder, rx, unhandled.clone());
        tokio::spawn(actor.run());

        Self { tx, unhandled }
    }

    /// Send one request and wait for its reply.
    pub async fn ask(&self, request: impl Into<ProviderRequest>) -> Result<ProviderReply> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Envelope {
                request: request.into(),
                reply,
            })
            .await
            .map_err(|_| MonitorError::MailboxClosed)?;
        rx.await.map_err(|_| MonitorError::MailboxClosed)?
    }

    pub async fn system_metrics(&self) -> Result<SystemMetricsResponse> {
        match self.ask(SystemMetricsRequest).await? {
            ProviderReply::SystemMetrics(resp) => Ok(resp),
            ProviderReply::Unhandled(msg) => Err(MonitorError::Unhandled(msg.kind)),
        }
    }

    /// Observe messages the provider did not handle.
    pub fn subscribe_unhandled(&self) -> broadcast::Receiver<UnhandledMessage> {
        self.unhandled.subscribe()
    }
}
