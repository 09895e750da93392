//! Parsed listings exposed by list-valued gauges.
//!
//! Collectors run an OS tool (`ps`, the package manager, the signer), keep
//! the raw output lines, and parse each line into a typed row. Both views
//! travel together so string exporters and the snapshot tree see the same
//! collection pass.

use chrono::{DateTime, Utc};

/// One collection pass of a listing tool.
#[derive(Debug, Clone, PartialEq)]
pub struct ListedData<T> {
    listed_data: Vec<String>,
    parsed_data: Vec<T>,
}

impl<T> ListedData<T> {
    /// Wrap already-parsed rows with no raw listing kept.
    pub fn new(parsed_data: Vec<T>) -> Self {
        Self {
            listed_data: Vec::new(),
            parsed_data,
        }
    }

    pub fn with_listing(listed_data: Vec<String>, parsed_data: Vec<T>) -> Self {
        Self {
            listed_data,
            parsed_data,
        }
    }

    /// Raw listing lines as produced by the tool.
    pub fn listed_data(&self) -> &[String] {
        &self.listed_data
    }

    pub fn parsed_data(&self) -> &[T] {
        &self.parsed_data
    }

    pub fn len(&self) -> usize {
        self.parsed_data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parsed_data.is_empty()
    }

    /// Raw listing as one newline-separated string, the form string
    /// exporters publish.
    pub fn listing_text(&self) -> String {
        self.listed_data.join("\n")
    }
}

impl<T> Default for ListedData<T> {
    fn default() -> Self {
        Self {
            listed_data: Vec::new(),
            parsed_data: Vec::new(),
        }
    }
}

/// One row of the process listing. Fields keep the listing tool's text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessInfo {
    pub process_id: String,
    pub command: String,
    pub cpu_load: String,
    pub mem_used: String,
    pub start_time: String,
    pub user_id: String,
}

/// One installed package.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PackageInfo {
    pub name: String,
    pub version: String,
}

impl PackageInfo {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// One certificate under observation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateMonitoringInfo {
    pub id: String,
    pub subject: String,
    pub issuer: String,
    pub status: String,
    pub not_before: DateTime<Utc>,
    pub not_after: DateTime<Utc>,
}
