use sysmon_core::dto::HistogramDto;
use sysmon_core::registry::HistogramSnapshot;

/// Read the ten exported statistics from one snapshot.
pub fn to_histogram_dto(name: &str, snapshot: &HistogramSnapshot) -> HistogramDto {
    HistogramDto {
        name: name.to_string(),
        p75: snapshot.p75(),
        p95: snapshot.p95(),
        p98: snapshot.p98(),
        p99: snapshot.p99(),
        p999: snapshot.p999(),
        max: snapshot.max(),
        mean: snapshot.mean(),
        median: snapshot.median(),
        min: snapshot.min(),
        std_dev: snapshot.std_dev(),
    }
}
