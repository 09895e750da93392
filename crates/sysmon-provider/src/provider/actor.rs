use tokio::sync::{broadcast, mpsc, oneshot};

use sysmon_core::error::Result;

use crate::snapshot::SnapshotBuilder;

use super::messages::{
    ProviderReply, ProviderRequest, SystemMetricsResponse, UnhandledMessage,
};

pub(super) struct Envelope {
    pub(super) request: ProviderRequest,
    pub(super) reply: oneshot::Sender<Result<ProviderReply>>,
}

/// Mailbox loop. One request at a time; concurrent askers queue in the
/// bounded mailbox.
pub(super) struct MetricsProviderActor {
    builder: SnapshotBuilder,
    mailbox: mpsc::Receiver<Envelope>,
    unhandled: broadcast::Sender<UnhandledMessage>,
}

impl MetricsProviderActor {
    pub(super) fn new(
        builder: SnapshotBuilder,
        mailbox: mpsc::Receiver<Envelope>,
        unhandled: broadcast::Sender<UnhandledMessage>,
    ) -> Self {
        Self {
            builder,
            mailbox,
            unhandled,
        }
    }

    pub(super) async fn run(mut self) {
        tracing::info!("metrics provider started");
        while let Some(env) = self.mailbox.recv().await {
            let reply = self.on_receive(env.request);
            // Asker gave up; nothing to deliver.
            let _ = env.reply.send(reply);
        }
        tracing::info!("metrics provider stopped (mailbox closed)");
    }

    fn on_receive(&self, request: ProviderRequest) -> Result<ProviderReply> {
        match request {
            ProviderRequest::SystemMetrics(_) => {
                tracing::info!("received SystemMetricsRequest");
                let metrics = self.builder.build().map_err(|e| {
                    tracing::warn!(error = %e, "system metrics snapshot failed");
                    e
                })?;
                Ok(ProviderReply::SystemMetrics(SystemMetricsResponse::new(metrics)))
            }
            ProviderRequest::Other(kind) => Ok(ProviderReply::Unhandled(self.unhandled(kind))),
        }
    }

    fn unhandled(&self, kind: String) -> UnhandledMessage {
        tracing::warn!(%kind, "unhandled message");
        let msg = UnhandledMessage { kind };
        // No subscribers is fine; the asker still gets the reply.
        let _ = self.unhandled.send(msg.clone());
        msg
    }
}
