use std::net::SocketAddr;

use chrono::FixedOffset;
use serde::Deserialize;
use sysmon_core::error::{MonitorError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonitorConfig {
    pub version: u32,

    #[serde(default)]
    pub provider: ProviderSection,

    #[serde(default)]
    pub snapshot: SnapshotSection,
}

impl MonitorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(MonitorError::UnsupportedVersion);
        }

        self.provider.validate()?;
        self.snapshot.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_mailbox_capacity")]
    pub mailbox_capacity: usize,

    /// How long the HTTP layer waits for a snapshot.
    #[serde(default = "default_ask_timeout_ms")]
    pub ask_timeout_ms: u64,
}

impl Default for ProviderSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            mailbox_capacity: default_mailbox_capacity(),
            ask_timeout_ms: default_ask_timeout_ms(),
        }
    }
}

impl ProviderSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if !(1..=4096).contains(&self.mailbox_capacity) {
            return Err(MonitorError::BadRequest(
                "provider.mailbox_capacity must be between 1 and 4096".into(),
            ));
        }
        if !(100..=60000).contains(&self.ask_timeout_ms) {
            return Err(MonitorError::BadRequest(
                "provider.ask_timeout_ms must be between 100 and 60000".into(),
            ));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            MonitorError::BadRequest(format!("provider.listen must be a valid SocketAddr: {e}"))
        })
    }
}

fn default_listen() -> String {
    "127.0.0.1:9011".into()
}
fn default_mailbox_capacity() -> usize {
    64
}
fn default_ask_timeout_ms() -> u64 {
    5000
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct SnapshotSection {
    /// Offset certificate dates are displayed in, minutes east of UTC.
    #[serde(default)]
    pub date_offset_minutes: i32,
}

impl SnapshotSection {
    pub fn validate(&self) -> Result<()> {
        if !(-720..=840).contains(&self.date_offset_minutes) {
            return Err(MonitorError::BadRequest(
                "snapshot.date_offset_minutes must be between -720 and 840".into(),
            ));
        }
        Ok(())
    }

    pub fn date_offset(&self) -> Result<FixedOffset> {
        FixedOffset::east_opt(self.date_offset_minutes * 60).ok_or_else(|| {
            MonitorError::BadRequest("snapshot.date_offset_minutes out of range".into())
        })
    }
}
