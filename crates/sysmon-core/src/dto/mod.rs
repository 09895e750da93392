//! Snapshot tree handed to exporters.
//!
//! A snapshot is a [`MetricSetDto`] whose children are simple values,
//! histogram statistics, or nested metric sets. Trees are immutable once
//! built and serialize with serde; the exporter picks the encoding.

pub mod histogram;
pub mod metric_set;
pub mod simple;

use serde::Serialize;

pub use histogram::HistogramDto;
pub use metric_set::{MetricSetBuilder, MetricSetDto};
pub use simple::{ScalarValue, SimpleMetricDto};

/// Any node of the snapshot tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MetricDto {
    Simple(SimpleMetricDto),
    Histogram(HistogramDto),
    MetricSet(MetricSetDto),
}

impl MetricDto {
    pub fn name(&self) -> &str {
        match self {
            MetricDto::Simple(m) => &m.name,
            MetricDto::Histogram(m) => &m.name,
            MetricDto::MetricSet(m) => m.name(),
        }
    }

    pub fn as_simple(&self) -> Option<&SimpleMetricDto> {
        match self {
            MetricDto::Simple(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_histogram(&self) -> Option<&HistogramDto> {
        match self {
            MetricDto::Histogram(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_metric_set(&self) -> Option<&MetricSetDto> {
        match self {
            MetricDto::MetricSet(m) => Some(m),
            _ => None,
        }
    }
}

impl From<SimpleMetricDto> for MetricDto {
    fn from(m: SimpleMetricDto) -> Self {
        MetricDto::Simple(m)
    }
}

impl From<HistogramDto> for MetricDto {
    fn from(m: HistogramDto) -> Self {
        MetricDto::Histogram(m)
    }
}

impl From<MetricSetDto> for MetricDto {
    fn from(m: MetricSetDto) -> Self {
        MetricDto::MetricSet(m)
    }
}
