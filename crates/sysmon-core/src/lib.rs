//! sysmon core: metric data model, registry, and error types.
//!
//! This crate defines the snapshot tree handed to exporters, the registry
//! that background collectors populate, and the error surface shared with
//! the provider. It carries no runtime or transport dependencies so
//! collectors can link it without pulling in tokio or axum.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. A misbehaving
//! sensor surfaces as `MonitorError`, never as a crashed collector thread.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod dto;
pub mod error;
pub mod listing;
pub mod names;
pub mod registry;

/// Shared result type.
pub use error::{ErrorCode, MonitorError, Result};
