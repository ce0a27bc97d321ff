use serde::Serialize;
use std::fmt;
use std::net::IpAddr;

/// Default UDP port of the overlay, used when a record never sets `port =`.
pub const DEFAULT_PORT: u16 = 655;

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Ok,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct DiagnosticEntry {
    pub severity: Severity,
    pub message: String,
}

/// One peer's declared identity, normalized from its record file.
/// Every address carries a concrete port once parsing has finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostRecord {
    pub community: String,
    pub addresses: Vec<(String, u16)>,
    pub default_port: u16,
    pub diagnostics: Vec<DiagnosticEntry>,
}

/// Concrete probe target produced by name resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedEndpoint {
    pub ip: IpAddr,
    pub port: u16,
}

impl ResolvedEndpoint {
    pub fn is_ipv6(&self) -> bool {
        self.ip.is_ipv6()
    }
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum PortState {
    Open,
    Closed,
    Filtered,
    Unknown,
}

impl fmt::Display for PortState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PortState::Open => "open",
            PortState::Closed => "closed",
            PortState::Filtered => "filtered",
            PortState::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Verdict of the two-stage chain for one endpoint. `port_state` is only
/// present when the ping stage passed.
#[derive(Debug, Clone)]
pub struct ProbeResult {
    pub ping_alive: bool,
    pub port_state: Option<PortState>,
    pub diagnostics: Vec<DiagnosticEntry>,
}

impl ProbeResult {
    /// True when the endpoint counts as reachable for its address family.
    pub fn reached(&self) -> bool {
        self.ping_alive && self.port_state.is_some_and(|s| s != PortState::Closed)
    }
}

/// Per-record outcome. Counters stay in lockstep with the diagnostic log:
/// every entry is appended through `push`, which counts by severity.
#[derive(Debug, Serialize, Clone, Default)]
pub struct HostResult {
    pub community: String,
    pub errors: u64,
    pub warnings: u64,
    pub reachable_v4: u64,
    pub reachable_v6: u64,
    pub diagnostics: Vec<DiagnosticEntry>,
}

impl HostResult {
    pub fn new(community: &str) -> Self {
        Self {
            community: community.to_string(),
            ..Default::default()
        }
    }

    pub fn push(&mut self, severity: Severity, message: impl Into<String>) {
        match severity {
            Severity::Error => self.errors += 1,
            Severity::Warning => self.warnings += 1,
            Severity::Ok => {}
        }
        self.diagnostics.push(DiagnosticEntry {
            severity,
            message: message.into(),
        });
    }

    pub fn absorb_diag(&mut self, d: DiagnosticEntry) {
        self.push(d.severity, d.message);
    }
}

/// Fleet-wide reduction target. `absorb` is commutative and associative on
/// the counters; only the diagnostic stream order follows completion order.
#[derive(Debug, Serialize, Clone, Default, PartialEq, Eq)]
pub struct FleetSummary {
    pub hosts: u64,
    pub errors: u64,
    pub warnings: u64,
    pub reachable_v4: u64,
    pub reachable_v6: u64,
}

impl FleetSummary {
    pub fn absorb(&mut self, r: &HostResult) {
        self.hosts += 1;
        self.errors += r.errors;
        self.warnings += r.warnings;
        self.reachable_v4 += r.reachable_v4;
        self.reachable_v6 += r.reachable_v6;
    }
}
