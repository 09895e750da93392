use serde::Serialize;

/// Ten statistics read from one histogram snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistogramDto {
    pub name: String,
    pub p75: f64,
    pub p95: f64,
    pub p98: f64,
    pub p99: f64,
    pub p999: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub std_dev: f64,
}
