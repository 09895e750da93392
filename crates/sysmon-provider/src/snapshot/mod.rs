//! System metrics snapshot assembly.
//!
//! One pass over the registry produces the `systemMetrics` tree:
//! histograms first, then plain gauges, then the process, certificate and
//! package listings. Routing by name lives in
//! [`GaugeRoute`](sysmon_core::names::GaugeRoute); this module only decides
//! pass order and what each route turns into.
//!
//! A failing metric fails the whole snapshot. Callers get no partial tree.

pub mod convert;
pub mod histogram;

use std::sync::Arc;

use chrono::{FixedOffset, Offset, Utc};

use sysmon_core::dto::{MetricDto, MetricSetDto, SimpleMetricDto};
use sysmon_core::error::{MonitorError, Result};
use sysmon_core::names::{GaugeRoute, SYSTEM_METRICS};
use sysmon_core::registry::{GaugeEntry, GaugeValue, MetricRegistry};

pub use convert::{
    format_certificate_date, to_certificate_metric_set, to_package_metric_set,
    to_process_metric_set,
};
pub use histogram::to_histogram_dto;

/// Gauge passes in output order. `ExportOnly` gauges are never read.
const GAUGE_PASSES: [GaugeRoute; 4] = [
    GaugeRoute::Scalar,
    GaugeRoute::ProcessList,
    GaugeRoute::CertificateList,
    GaugeRoute::PackageList,
];

/// Builds snapshots of one registry.
#[derive(Clone)]
pub struct SnapshotBuilder {
    registry: Arc<MetricRegistry>,
    date_offset: FixedOffset,
}

impl SnapshotBuilder {
    /// Builder rendering certificate dates in UTC.
    pub fn new(registry: Arc<MetricRegistry>) -> Self {
        Self {
            registry,
            date_offset: Utc.fix(),
        }
    }

    pub fn with_date_offset(mut self, offset: FixedOffset) -> Self {
        self.date_offset = offset;
        self
    }

    pub fn build(&self) -> Result<MetricSetDto> {
        let mut root = MetricSetDto::builder(SYSTEM_METRICS);

        for h in self.registry.histograms() {
            root.with_metric(to_histogram_dto(h.name(), &h.snapshot()))?;
        }

        let gauges = self
            .registry
            .gauges_matching(|name| GaugeRoute::of(name) != GaugeRoute::ExportOnly);

        for route in GAUGE_PASSES {
            for entry in gauges.iter().filter(|g| GaugeRoute::of(g.name()) == route) {
                root.with_metric(self.convert(route, entry)?)?;
            }
        }

        let snapshot = root.build();
        tracing::debug!(metrics = snapshot.len(), "system metrics snapshot built");
        Ok(snapshot)
    }

    /// Read `entry` once and convert it as `route` dictates.
    fn convert(&self, route: GaugeRoute, entry: &GaugeEntry) -> Result<MetricDto> {
        let name = entry.name();
        let value = entry.read()?;

        let dto: MetricDto = match (route, value) {
            (GaugeRoute::Scalar, GaugeValue::Scalar(v)) => SimpleMetricDto::new(name, v).into(),
            (GaugeRoute::ProcessList, GaugeValue::ProcessList(list)) => {
                to_process_metric_set(name, &list)?.into()
            }
            (GaugeRoute::CertificateList, GaugeValue::CertificateList(list)) => {
                to_certificate_metric_set(name, &list, &self.date_offset)?.into()
            }
            (GaugeRoute::PackageList, GaugeValue::PackageList(list)) => {
                to_package_metric_set(name, &list)?.into()
            }
            (route, other) => {
                return Err(MonitorError::UnexpectedValue {
                    name: name.to_string(),
                    expected: expected_kind(route),
                    found: other.kind(),
                })
            }
        };
        Ok(dto)
    }
}

fn expected_kind(route: GaugeRoute) -> &'static str {
    match route {
        GaugeRoute::Scalar => "scalar",
        GaugeRoute::ProcessList => "process list",
        GaugeRoute::CertificateList => "certificate list",
        GaugeRoute::PackageList => "package list",
        GaugeRoute::ExportOnly => "no",
    }
}
