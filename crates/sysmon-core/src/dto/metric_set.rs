use std::collections::HashSet;

use serde::Serialize;

use crate::error::{MonitorError, Result};

use super::MetricDto;

/// Named, ordered collection of uniquely named metrics.
///
/// Only [`MetricSetBuilder`] creates one, so the uniqueness invariant holds
/// for every set in a snapshot tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSetDto {
    name: String,
    metrics: Vec<MetricDto>,
}

impl MetricSetDto {
    pub fn builder(name: impl Into<String>) -> MetricSetBuilder {
        MetricSetBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Children in insertion order.
    pub fn metrics(&self) -> &[MetricDto] {
        &self.metrics
    }

    pub fn get(&self, name: &str) -> Option<&MetricDto> {
        self.metrics.iter().find(|m| m.name() == name)
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}

/// Accumulates children, rejecting a name already used in this set.
#[derive(Debug)]
pub struct MetricSetBuilder {
    name: String,
    metrics: Vec<MetricDto>,
    seen: HashSet<String>,
}

impl MetricSetBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            metrics: Vec::new(),
            seen: HashSet::new(),
        }
    }

    pub fn with_metric(&mut self, metric: impl Into<MetricDto>) -> Result<&mut Self> {
        let metric = metric.into();
        if !self.seen.insert(metric.name().to_string()) {
            return Err(MonitorError::DuplicateMetric(format!(
                "{}/{}",
                self.name,
                metric.name()
            )));
        }
        self.metrics.push(metric);
        Ok(self)
    }

    pub fn build(self) -> MetricSetDto {
        MetricSetDto {
            name: self.name,
            metrics: self.metrics,
        }
    }
}
