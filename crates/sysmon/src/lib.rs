//! Top-level facade crate for sysmon.
//!
//! Re-exports the core data model and the provider library so users can
//! depend on a single crate.

pub mod core {
    pub use sysmon_core::*;
}

pub mod provider {
    pub use sysmon_provider::*;
}
