//! sysmon provider library entry.
//!
//! Wires the metrics registry, the snapshot builder, and the provider task
//! into a service, plus the HTTP surface in front of it. Consumed by the
//! binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod ops;
pub mod provider;
pub mod router;
pub mod snapshot;
