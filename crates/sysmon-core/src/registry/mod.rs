//! Shared metrics registry.
//!
//! Background collectors register gauges and histograms here and keep them
//! current; the snapshot builder enumerates them on request. Names are
//! unique across both kinds.
//!
//! # Consistency
//! Reads are per key. A snapshot reads each gauge once, while collectors
//! may overwrite other gauges in between, so two metrics of one snapshot can
//! come from different collection passes. Each value is internally
//! consistent; the composite is not. There is deliberately no cross-key
//! lock, and none is required for a correct snapshot.

mod gauge;
mod histogram;

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::error::{MonitorError, Result};

pub use gauge::{FnGauge, Gauge, GaugeValue, ListingGauge, SensorError, SettableGauge};
pub use histogram::{Histogram, HistogramSnapshot, DEFAULT_RESERVOIR_SIZE};

#[derive(Clone)]
enum Metric {
    Gauge(Arc<dyn Gauge>),
    Histogram(Arc<Histogram>),
}

/// A registered gauge, detached from the registry map.
#[derive(Clone)]
pub struct GaugeEntry {
    name: String,
    gauge: Arc<dyn Gauge>,
}

impl GaugeEntry {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sample the gauge once.
    pub fn read(&self) -> Result<GaugeValue> {
        self.gauge
            .value()
            .map_err(|e| MonitorError::SensorUnavailable {
                name: self.name.clone(),
                reason: e.to_string(),
            })
    }
}

/// A registered histogram, detached from the registry map.
#[derive(Clone)]
pub struct HistogramEntry {
    name: String,
    histogram: Arc<Histogram>,
}

impl HistogramEntry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn snapshot(&self) -> HistogramSnapshot {
        self.histogram.snapshot()
    }
}

/// Name -> metric map shared between collectors and the provider.
#[derive(Default)]
pub struct MetricRegistry {
    metrics: DashMap<String, Metric>,
}

impl MetricRegistry {
    pub fn new() -> Self {
        Self {
            metrics: DashMap::new(),
        }
    }

    pub fn register_gauge(&self, name: impl Into<String>, gauge: Arc<dyn Gauge>) -> Result<()> {
        match self.metrics.entry(name.into()) {
            Entry::Occupied(e) => Err(MonitorError::AlreadyRegistered(e.key().clone())),
            Entry::Vacant(e) => {
                tracing::debug!(name = %e.key(), "gauge registered");
                e.insert(Metric::Gauge(gauge));
                Ok(())
            }
        }
    }

    /// Register an empty [`SettableGauge`] and hand it back to the collector.
    pub fn settable_gauge(&self, name: impl Into<String>) -> Result<Arc<SettableGauge>> {
        let gauge = Arc::new(SettableGauge::new());
        self.register_gauge(name, gauge.clone())?;
        Ok(gauge)
    }

    /// Register a list gauge `name` together with its string export gauge
    /// `strings_name`. Nothing is left registered if either name is taken.
    pub fn listing_gauge(
        &self,
        name: impl Into<String>,
        strings_name: impl Into<String>,
    ) -> Result<ListingGauge> {
        let name = name.into();
        let list = self.settable_gauge(name.clone())?;
        let strings = match self.settable_gauge(strings_name) {
            Ok(g) => g,
            Err(e) => {
                self.remove(&name);
                return Err(e);
            }
        };
        Ok(ListingGauge::new(list, strings))
    }

    /// Get or create the histogram `name`.
    pub fn histogram(&self, name: impl Into<String>) -> Result<Arc<Histogram>> {
        match self.metrics.entry(name.into()) {
            Entry::Occupied(e) => match e.get() {
                Metric::Histogram(h) => Ok(Arc::clone(h)),
                Metric::Gauge(_) => Err(MonitorError::AlreadyRegistered(e.key().clone())),
            },
            Entry::Vacant(e) => {
                tracing::debug!(name = %e.key(), "histogram registered");
                let h = Arc::new(Histogram::new());
                e.insert(Metric::Histogram(Arc::clone(&h)));
                Ok(h)
            }
        }
    }

    pub fn remove(&self, name: &str) -> bool {
        self.metrics.remove(name).is_some()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.metrics.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// All gauges, sorted by name.
    pub fn gauges(&self) -> Vec<GaugeEntry> {
        self.gauges_matching(|_| true)
    }

    /// Gauges whose name passes `filter`, sorted by name.
    ///
    /// Entries are cloned out before returning so no shard lock is held
    /// while a gauge is sampled; a sampling closure may touch the registry.
    pub fn gauges_matching(&self, filter: impl Fn(&str) -> bool) -> Vec<GaugeEntry> {
        let mut out: Vec<GaugeEntry> = self
            .metrics
            .iter()
            .filter(|r| filter(r.key().as_str()))
            .filter_map(|r| match r.value() {
                Metric::Gauge(g) => Some(GaugeEntry {
                    name: r.key().clone(),
                    gauge: Arc::clone(g),
                }),
                Metric::Histogram(_) => None,
            })
            .collect();
        out.sort_by(|a, b| a.name.cmp(&b.name));
        out
    }

    /// All histograms, sorted by name.
    pub fn histograms(&self) -> Vec<HistogramEntry> {
        let mut out: Vec<HistogramEntry> = self
            .metrics
            .iter()
            .filter_map(|r| match r.value() {
                Metric::Histogram(h) => Some(HistogramEntry {
                    name: r.key().clone(),
                    histogram: Arc::clone(h),
                }),
                Metric::Gauge(_) => None,
            })
            .collect();
        out.sort_by(|a, b| a.name.cmp(&b.name));
        out
    }
}
