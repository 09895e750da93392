//! Snapshot assembly over a live registry.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{FixedOffset, TimeZone, Utc};

use sysmon_core::dto::{MetricDto, MetricSetDto, ScalarValue};
use sysmon_core::error::ErrorCode;
use sysmon_core::listing::{CertificateMonitoringInfo, ListedData, PackageInfo, ProcessInfo};
use sysmon_core::names::{self, RESERVED_NAMES};
use sysmon_core::registry::{FnGauge, GaugeValue, MetricRegistry, SensorError, SettableGauge};
use sysmon_core::MonitorError;
use sysmon_provider::snapshot::SnapshotBuilder;

fn process(id: &str) -> ProcessInfo {
    ProcessInfo {
        process_id: id.to_string(),
        command: format!("/usr/bin/worker-{id}"),
        cpu_load: "0.3".into(),
        mem_used: "1.2".into(),
        start_time: "10:15".into(),
        user_id: "xroad".into(),
    }
}

fn certificate(id: &str) -> CertificateMonitoringInfo {
    CertificateMonitoringInfo {
        id: id.to_string(),
        subject: "CN=ss1".into(),
        issuer: "CN=ca".into(),
        status: "in use".into(),
        not_before: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        not_after: Utc.with_ymd_and_hms(2026, 6, 30, 23, 59, 59).unwrap(),
    }
}

fn set(reg: &MetricRegistry, name: &str, value: impl Into<GaugeValue>) {
    reg.register_gauge(name, Arc::new(SettableGauge::with_value(value)))
        .unwrap();
}

fn names_of(set: &MetricSetDto) -> Vec<&str> {
    set.metrics().iter().map(MetricDto::name).collect()
}

fn child_set<'a>(set: &'a MetricSetDto, name: &str) -> &'a MetricSetDto {
    set.get(name)
        .and_then(MetricDto::as_metric_set)
        .unwrap_or_else(|| panic!("no metric set {name}"))
}

fn text<'a>(set: &'a MetricSetDto, name: &str) -> &'a str {
    set.get(name)
        .and_then(MetricDto::as_simple)
        .and_then(|m| m.value.as_str())
        .unwrap_or_else(|| panic!("no text metric {name}"))
}

/// Registry with every reserved name populated plus a few plain gauges.
fn full_registry() -> Arc<MetricRegistry> {
    let reg = Arc::new(MetricRegistry::new());
    set(&reg, "cpuLoad", 0.25);
    set(&reg, "openFiles", 17);
    set(&reg, names::PROCESSES, ListedData::new(vec![process("1"), process("2")]));
    set(&reg, names::XROAD_PROCESSES, ListedData::new(vec![process("2")]));
    set(&reg, names::PROCESS_STRINGS, "1 /usr/bin/worker-1\n2 /usr/bin/worker-2");
    set(&reg, names::XROAD_PROCESS_STRINGS, "2 /usr/bin/worker-2");
    set(&reg, names::PACKAGES, ListedData::new(vec![PackageInfo::new("curl", "7.0")]));
    set(&reg, names::PACKAGE_STRINGS, "curl 7.0");
    set(&reg, names::CERTIFICATES, ListedData::new(vec![certificate("abc")]));
    reg.histogram("diskReadLatency").unwrap().update(5);
    reg
}

#[test]
fn scalar_gauges_and_histograms() {
    let reg = Arc::new(MetricRegistry::new());
    set(&reg, "freePhysicalMemory", 1024);
    set(&reg, "os", "Ubuntu 22.04");
    set(&reg, "swapEnabled", false);
    for (name, samples) in [("cpuLoad", vec![1, 2, 3]), ("fileDescriptors", vec![])] {
        let h = reg.histogram(name).unwrap();
        for s in samples {
            h.update(s);
        }
    }

    let snap = SnapshotBuilder::new(reg).build().unwrap();
    assert_eq!(snap.name(), "systemMetrics");
    assert_eq!(
        names_of(&snap),
        vec!["cpuLoad", "fileDescriptors", "freePhysicalMemory", "os", "swapEnabled"]
    );

    let unique: HashSet<_> = names_of(&snap).into_iter().collect();
    assert_eq!(unique.len(), snap.len());

    let cpu = snap.get("cpuLoad").and_then(MetricDto::as_histogram).unwrap();
    assert_eq!(cpu.median, 2.0);
    assert_eq!(cpu.max, 3.0);
    assert_eq!(cpu.min, 1.0);
    assert_eq!(cpu.std_dev, 1.0);

    let empty = snap.get("fileDescriptors").and_then(MetricDto::as_histogram).unwrap();
    assert_eq!(empty.p999, 0.0);
    assert_eq!(empty.mean, 0.0);

    assert_eq!(
        snap.get("freePhysicalMemory").and_then(MetricDto::as_simple).unwrap().value,
        ScalarValue::Int(1024)
    );
    assert_eq!(
        snap.get("swapEnabled").and_then(MetricDto::as_simple).unwrap().value,
        ScalarValue::Bool(false)
    );
}

#[test]
fn process_list_becomes_one_set_per_process() {
    let reg = Arc::new(MetricRegistry::new());
    set(&reg, names::PROCESSES, ListedData::new(vec![process("1"), process("2")]));

    let snap = SnapshotBuilder::new(reg).build().unwrap();
    let processes = child_set(&snap, "processes");
    assert_eq!(names_of(processes), vec!["1", "2"]);

    for id in ["1", "2"] {
        let p = child_set(processes, id);
        assert_eq!(
            names_of(p),
            vec!["processId", "command", "cpuLoad", "memUsed", "startTime", "userId"]
        );
        assert_eq!(text(p, "processId"), id);
        assert_eq!(text(p, "userId"), "xroad");
    }
}

#[test]
fn certificate_dates_are_display_strings() {
    let reg = Arc::new(MetricRegistry::new());
    set(&reg, names::CERTIFICATES, ListedData::new(vec![certificate("abc")]));

    let snap = SnapshotBuilder::new(Arc::clone(&reg)).build().unwrap();
    let cert = child_set(child_set(&snap, "certificates"), "certificate-abc");
    assert_eq!(
        names_of(cert),
        vec!["subjectDN", "issuerDN", "status", "notBefore", "notAfter"]
    );
    assert_eq!(text(cert, "notBefore"), "2024-01-01T00:00:00.000+0000");
    assert_eq!(text(cert, "notAfter"), "2026-06-30T23:59:59.000+0000");
    assert_eq!(text(cert, "subjectDN"), "CN=ss1");

    let helsinki = FixedOffset::east_opt(2 * 3600).unwrap();
    let snap = SnapshotBuilder::new(reg).with_date_offset(helsinki).build().unwrap();
    let cert = child_set(child_set(&snap, "certificates"), "certificate-abc");
    assert_eq!(text(cert, "notBefore"), "2024-01-01T02:00:00.000+0200");
}

#[test]
fn packages_are_flat_name_version_pairs() {
    let reg = Arc::new(MetricRegistry::new());
    set(
        &reg,
        names::PACKAGES,
        ListedData::new(vec![
            PackageInfo::new("curl", "7.0"),
            PackageInfo::new("bash", "5.1"),
        ]),
    );

    let snap = SnapshotBuilder::new(reg).build().unwrap();
    let packages = child_set(&snap, "packages");
    assert_eq!(names_of(packages), vec!["curl", "bash"]);
    assert_eq!(text(packages, "curl"), "7.0");
    assert_eq!(text(packages, "bash"), "5.1");
    assert!(packages.metrics().iter().all(|m| m.as_metric_set().is_none()));
}

#[test]
fn empty_lists_yield_empty_sets() {
    let reg = Arc::new(MetricRegistry::new());
    set(&reg, names::PROCESSES, ListedData::<ProcessInfo>::default());
    set(&reg, names::PACKAGES, ListedData::<PackageInfo>::default());

    let snap = SnapshotBuilder::new(reg).build().unwrap();
    assert!(child_set(&snap, "processes").is_empty());
    assert!(child_set(&snap, "packages").is_empty());
}

#[test]
fn every_reserved_name_is_handled_exactly_once() {
    let snap = SnapshotBuilder::new(full_registry()).build().unwrap();

    assert_eq!(
        names_of(&snap),
        vec![
            "diskReadLatency",
            "cpuLoad",
            "openFiles",
            "processes",
            "xroadProcesses",
            "certificates",
            "packages",
        ]
    );

    for name in RESERVED_NAMES {
        let count = snap.metrics().iter().filter(|m| m.name() == name).count();
        let expected = usize::from(!name.ends_with("Strings"));
        assert_eq!(count, expected, "{name}");
        if expected == 1 {
            assert!(snap.get(name).and_then(MetricDto::as_metric_set).is_some(), "{name}");
        }
    }
}

#[test]
fn export_only_gauges_are_never_read() {
    let reg = Arc::new(MetricRegistry::new());
    reg.register_gauge(
        names::PACKAGE_STRINGS,
        Arc::new(FnGauge::new(|| panic!("string export gauge sampled"))),
    )
    .unwrap();

    let snap = SnapshotBuilder::new(reg).build().unwrap();
    assert!(snap.is_empty());
}

#[test]
fn unchanged_registry_builds_identical_snapshots() {
    let builder = SnapshotBuilder::new(full_registry());
    let a = builder.build().unwrap();
    let b = builder.build().unwrap();
    assert_eq!(a, b);
}

#[test]
fn failing_sensor_aborts_the_snapshot() {
    let reg = full_registry();
    reg.register_gauge(
        "diskFree",
        Arc::new(FnGauge::new(|| Err(SensorError::new("statvfs failed")))),
    )
    .unwrap();

    let err = SnapshotBuilder::new(reg).build().unwrap_err();
    assert_eq!(err.code(), ErrorCode::SnapshotFailed);
    assert!(matches!(err, MonitorError::SensorUnavailable { ref name, .. } if name == "diskFree"));
}

#[test]
fn missing_list_value_aborts_the_snapshot() {
    let reg = Arc::new(MetricRegistry::new());
    reg.settable_gauge(names::CERTIFICATES).unwrap();

    let err = SnapshotBuilder::new(reg).build().unwrap_err();
    assert!(matches!(
        err,
        MonitorError::SensorUnavailable { ref name, .. } if name == "certificates"
    ));
}

#[test]
fn mismatched_value_kind_aborts_the_snapshot() {
    let reg = Arc::new(MetricRegistry::new());
    set(&reg, names::PACKAGES, "curl 7.0");
    let err = SnapshotBuilder::new(reg).build().unwrap_err();
    assert_eq!(
        err,
        MonitorError::UnexpectedValue {
            name: "packages".into(),
            expected: "package list",
            found: "scalar",
        }
    );

    let reg = Arc::new(MetricRegistry::new());
    set(&reg, "services", ListedData::new(vec![process("9")]));
    let err = SnapshotBuilder::new(reg).build().unwrap_err();
    assert!(matches!(err, MonitorError::UnexpectedValue { expected: "scalar", .. }));
}

#[test]
fn duplicate_process_ids_abort_the_snapshot() {
    let reg = Arc::new(MetricRegistry::new());
    set(&reg, names::PROCESSES, ListedData::new(vec![process("7"), process("7")]));
    let err = SnapshotBuilder::new(reg).build().unwrap_err();
    assert_eq!(err, MonitorError::DuplicateMetric("processes/7".into()));
}

#[test]
fn collector_updates_show_up_in_the_next_snapshot() {
    let reg = Arc::new(MetricRegistry::new());
    let packages = reg.settable_gauge(names::PACKAGES).unwrap();
    packages.set(ListedData::new(vec![PackageInfo::new("curl", "7.0")]));

    let builder = SnapshotBuilder::new(Arc::clone(&reg));
    let first = builder.build().unwrap();

    packages.set(ListedData::new(vec![PackageInfo::new("curl", "8.5")]));
    let second = builder.build().unwrap();

    assert_eq!(text(child_set(&first, "packages"), "curl"), "7.0");
    assert_eq!(text(child_set(&second, "packages"), "curl"), "8.5");
}

#[test]
fn duplicate_package_names_keep_the_last_version() {
    let reg = Arc::new(MetricRegistry::new());
    set(&reg, "cpuLoad", 0.25);
    set(
        &reg,
        names::PACKAGES,
        ListedData::new(vec![
            PackageInfo::new("gpg-pubkey", "fd431d51"),
            PackageInfo::new("curl", "7.0"),
            PackageInfo::new("gpg-pubkey", "5a6340b3"),
        ]),
    );

    let snap = SnapshotBuilder::new(reg).build().unwrap();
    assert!(snap.get("cpuLoad").is_some());

    let packages = child_set(&snap, "packages");
    assert_eq!(names_of(packages), vec!["gpg-pubkey", "curl"]);
    assert_eq!(text(packages, "gpg-pubkey"), "5a6340b3");
    assert_eq!(text(packages, "curl"), "7.0");
}

#[test]
fn listing_gauge_strings_stay_out_of_the_tree() {
    let reg = Arc::new(MetricRegistry::new());
    let packages = reg.listing_gauge(names::PACKAGES, names::PACKAGE_STRINGS).unwrap();
    packages.set(ListedData::with_listing(
        vec!["curl 7.0".to_string()],
        vec![PackageInfo::new("curl", "7.0")],
    ));

    let snap = SnapshotBuilder::new(reg).build().unwrap();
    assert_eq!(names_of(&snap), vec![names::PACKAGES]);
}
