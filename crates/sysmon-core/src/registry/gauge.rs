use std::sync::{Arc, RwLock};

use thiserror::Error;

use crate::dto::ScalarValue;
use crate::listing::{CertificateMonitoringInfo, ListedData, PackageInfo, ProcessInfo};

/// Current value of a gauge. Closed set: the snapshot builder matches on it
/// exhaustively.
#[derive(Debug, Clone, PartialEq)]
pub enum GaugeValue {
    Scalar(ScalarValue),
    ProcessList(ListedData<ProcessInfo>),
    PackageList(ListedData<PackageInfo>),
    CertificateList(ListedData<CertificateMonitoringInfo>),
}

impl GaugeValue {
    pub fn kind(&self) -> &'static str {
        match self {
            GaugeValue::Scalar(_) => "scalar",
            GaugeValue::ProcessList(_) => "process list",
            GaugeValue::PackageList(_) => "package list",
            GaugeValue::CertificateList(_) => "certificate list",
        }
    }
}

impl From<ScalarValue> for GaugeValue {
    fn from(v: ScalarValue) -> Self {
        GaugeValue::Scalar(v)
    }
}

macro_rules! scalar_gauge_value {
    ($($t:ty),*) => {
        $(
            impl From<$t> for GaugeValue {
                fn from(v: $t) -> Self {
                    GaugeValue::Scalar(ScalarValue::from(v))
                }
            }
        )*
    };
}

scalar_gauge_value!(i64, i32, u32, f64, bool, String, &str);

impl From<ListedData<ProcessInfo>> for GaugeValue {
    fn from(v: ListedData<ProcessInfo>) -> Self {
        GaugeValue::ProcessList(v)
    }
}

impl From<ListedData<PackageInfo>> for GaugeValue {
    fn from(v: ListedData<PackageInfo>) -> Self {
        GaugeValue::PackageList(v)
    }
}

impl From<ListedData<CertificateMonitoringInfo>> for GaugeValue {
    fn from(v: ListedData<CertificateMonitoringInfo>) -> Self {
        GaugeValue::CertificateList(v)
    }
}

/// Why a sensor could not produce a value.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{0}")]
pub struct SensorError(String);

impl SensorError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// A named metric sampled on read.
pub trait Gauge: Send + Sync {
    fn value(&self) -> std::result::Result<GaugeValue, SensorError>;
}

/// Gauge whose value a collector overwrites after each collection pass.
///
/// Reads clone the current value under a read lock, so a reader never sees
/// half of an update. Nothing coordinates reads across gauges.
#[derive(Debug, Default)]
pub struct SettableGauge {
    value: RwLock<Option<GaugeValue>>,
}

impl SettableGauge {
    /// A gauge with no value yet. Reading it fails until the first `set`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: impl Into<GaugeValue>) -> Self {
        Self {
            value: RwLock::new(Some(value.into())),
        }
    }

    pub fn set(&self, value: impl Into<GaugeValue>) {
        let mut slot = self.value.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(value.into());
    }

    /// Forget the current value, e.g. when the listing tool disappeared.
    pub fn clear(&self) {
        let mut slot = self.value.write().unwrap_or_else(|e| e.into_inner());
        *slot = None;
    }
}

impl Gauge for SettableGauge {
    fn value(&self) -> std::result::Result<GaugeValue, SensorError> {
        let slot = self.value.read().unwrap_or_else(|e| e.into_inner());
        slot.as_ref()
            .cloned()
            .ok_or_else(|| SensorError::new("no value collected yet"))
    }
}

/// Gauge computed by a closure on every read.
pub struct FnGauge<F> {
    f: F,
}

impl<F> FnGauge<F>
where
    F: Fn() -> std::result::Result<GaugeValue, SensorError> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> Gauge for FnGauge<F>
where
    F: Fn() -> std::result::Result<GaugeValue, SensorError> + Send + Sync,
{
    fn value(&self) -> std::result::Result<GaugeValue, SensorError> {
        (self.f)()
    }
}

/// A list gauge paired with its `*Strings` export gauge.
///
/// One [`set`](Self::set) updates both from the same collection pass, so the
/// tree and the string export never disagree about which pass they show.
#[derive(Debug, Clone)]
pub struct ListingGauge {
    list: Arc<SettableGauge>,
    strings: Arc<SettableGauge>,
}

impl ListingGauge {
    pub(crate) fn new(list: Arc<SettableGauge>, strings: Arc<SettableGauge>) -> Self {
        Self { list, strings }
    }

    pub fn set<T>(&self, data: ListedData<T>)
    where
        ListedData<T>: Into<GaugeValue>,
    {
        tracing::trace!(rows = data.len(), "listing collected");
        self.strings.set(data.listing_text());
        self.list.set(data);
    }

    pub fn clear(&self) {
        self.strings.clear();
        self.list.clear();
    }
}
