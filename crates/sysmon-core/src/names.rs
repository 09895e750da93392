//! Reserved metric names and gauge routing.
//!
//! List-valued gauges need a tree conversion instead of the generic scalar
//! pass, and the `*Strings` variants exist only for string-oriented export
//! channels. Every name is routed by [`GaugeRoute::of`] and nowhere else, so
//! the scalar pass and the list converters can never both claim a gauge.

/// Every running process on the host.
pub const PROCESSES: &str = "processes";
/// String rendering of [`PROCESSES`], export channel only.
pub const PROCESS_STRINGS: &str = "processesStrings";
/// Processes belonging to the X-Road subsystem.
pub const XROAD_PROCESSES: &str = "xroadProcesses";
/// String rendering of [`XROAD_PROCESSES`], export channel only.
pub const XROAD_PROCESS_STRINGS: &str = "xroadProcessesStrings";
/// Installed packages.
pub const PACKAGES: &str = "packages";
/// String rendering of [`PACKAGES`], export channel only.
pub const PACKAGE_STRINGS: &str = "packagesStrings";
/// Certificates under observation.
pub const CERTIFICATES: &str = "certificates";

/// All reserved names. A reserved name never reaches the scalar pass.
pub const RESERVED_NAMES: [&str; 7] = [
    PROCESSES,
    PROCESS_STRINGS,
    XROAD_PROCESSES,
    XROAD_PROCESS_STRINGS,
    PACKAGES,
    PACKAGE_STRINGS,
    CERTIFICATES,
];

/// Name of the root metric set of every snapshot.
pub const SYSTEM_METRICS: &str = "systemMetrics";

/// How the snapshot builder treats a gauge with a given name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GaugeRoute {
    /// Added as a simple metric with its raw value.
    Scalar,
    /// Converted into one metric set per process.
    ProcessList,
    /// Converted into one metric set per certificate.
    CertificateList,
    /// Converted into one simple metric per package.
    PackageList,
    /// Never read; consumed by string-oriented exporters only.
    ExportOnly,
}

impl GaugeRoute {
    pub fn of(name: &str) -> Self {
        match name {
            PROCESSES | XROAD_PROCESSES => GaugeRoute::ProcessList,
            CERTIFICATES => GaugeRoute::CertificateList,
            PACKAGES => GaugeRoute::PackageList,
            PROCESS_STRINGS | XROAD_PROCESS_STRINGS | PACKAGE_STRINGS => GaugeRoute::ExportOnly,
            _ => GaugeRoute::Scalar,
        }
    }
}

pub fn is_reserved(name: &str) -> bool {
    RESERVED_NAMES.contains(&name)
}
