//! Tree conversions for list-valued gauges.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, Utc};

use sysmon_core::dto::{MetricSetDto, SimpleMetricDto};
use sysmon_core::error::Result;
use sysmon_core::listing::{CertificateMonitoringInfo, ListedData, PackageInfo, ProcessInfo};

/// `yyyy-MM-dd'T'HH:mm:ss.SSSZ`
const CERTIFICATE_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// One metric set per process, named by process id.
pub fn to_process_metric_set(
    name: &str,
    processes: &ListedData<ProcessInfo>,
) -> Result<MetricSetDto> {
    let mut main = MetricSetDto::builder(name);
    for p in processes.parsed_data() {
        let mut process = MetricSetDto::builder(p.process_id.as_str());
        process
            .with_metric(SimpleMetricDto::new("processId", p.process_id.as_str()))?
            .with_metric(SimpleMetricDto::new("command", p.command.as_str()))?
            .with_metric(SimpleMetricDto::new("cpuLoad", p.cpu_load.as_str()))?
            .with_metric(SimpleMetricDto::new("memUsed", p.mem_used.as_str()))?
            .with_metric(SimpleMetricDto::new("startTime", p.start_time.as_str()))?
            .with_metric(SimpleMetricDto::new("userId", p.user_id.as_str()))?;
        main.with_metric(process.build())?;
    }
    Ok(main.build())
}

/// One metric set per certificate, named `certificate-{id}`, with display
/// dates rendered in `offset`.
pub fn to_certificate_metric_set(
    name: &str,
    certificates: &ListedData<CertificateMonitoringInfo>,
    offset: &FixedOffset,
) -> Result<MetricSetDto> {
    let mut main = MetricSetDto::builder(name);
    for c in certificates.parsed_data() {
        let mut cert = MetricSetDto::builder(format!("certificate-{}", c.id));
        cert.with_metric(SimpleMetricDto::new("subjectDN", c.subject.as_str()))?
            .with_metric(SimpleMetricDto::new("issuerDN", c.issuer.as_str()))?
            .with_metric(SimpleMetricDto::new("status", c.status.as_str()))?
            .with_metric(SimpleMetricDto::new(
                "notBefore",
                format_certificate_date(&c.not_before, offset),
            ))?
            .with_metric(SimpleMetricDto::new(
                "notAfter",
                format_certificate_date(&c.not_after, offset),
            ))?;
        main.with_metric(cert.build())?;
    }
    Ok(main.build())
}

/// One simple metric per package: name -> version. No per-package set.
///
/// Package managers list some names more than once (several `gpg-pubkey`
/// rows on RPM hosts). Such a name keeps its first position and its last
/// version.
pub fn to_package_metric_set(
    name: &str,
    packages: &ListedData<PackageInfo>,
) -> Result<MetricSetDto> {
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(packages.len());
    let mut rows: Vec<(&str, &str)> = Vec::with_capacity(packages.len());
    for p in packages.parsed_data() {
        match index.get(p.name.as_str()) {
            Some(&i) => {
                tracing::warn!(
                    gauge = name,
                    package = %p.name,
                    replaced = rows[i].1,
                    version = %p.version,
                    "duplicate package name, keeping last version"
                );
                rows[i].1 = p.version.as_str();
            }
            None => {
                index.insert(p.name.as_str(), rows.len());
                rows.push((p.name.as_str(), p.version.as_str()));
            }
        }
    }

    let mut main = MetricSetDto::builder(name);
    for (package, version) in rows {
        main.with_metric(SimpleMetricDto::new(package, version))?;
    }
    Ok(main.build())
}

pub fn format_certificate_date(date: &DateTime<Utc>, offset: &FixedOffset) -> String {
    date.with_timezone(offset)
        .format(CERTIFICATE_DATE_FORMAT)
        .to_string()
}
