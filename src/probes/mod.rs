pub mod icmp;
pub mod udp;

pub use icmp::icmp_ping;
pub use udp::udp_port_state;

use crate::types::{DiagnosticEntry, PortState, ProbeResult, ResolvedEndpoint, Severity};
use async_trait::async_trait;
use std::io;
use std::sync::Arc;

/// Seam between the checker and the network. The production implementation
/// shells out for ICMP and opens real sockets; tests substitute stubs.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn resolve(&self, host: &str, port: u16) -> io::Result<Vec<ResolvedEndpoint>>;
    async fn ping(&self, ep: &ResolvedEndpoint) -> bool;
    async fn port_state(&self, ep: &ResolvedEndpoint) -> PortState;
}

pub type ProberHandle = Arc<dyn Prober>;

pub struct SystemProber;

#[async_trait]
impl Prober for SystemProber {
    async fn resolve(&self, host: &str, port: u16) -> io::Result<Vec<ResolvedEndpoint>> {
        crate::netutils::resolve_udp(host, port).await
    }

    async fn ping(&self, ep: &ResolvedEndpoint) -> bool {
        icmp_ping(ep.ip).await
    }

    async fn port_state(&self, ep: &ResolvedEndpoint) -> PortState {
        udp_port_state(ep).await
    }
}

/// Two-stage chain for one endpoint: ping first, port state only if alive.
/// `host` is the configured host string, kept in the diagnostics so lines
/// correlate with the record that declared the address.
pub async fn probe_endpoint(prober: &dyn Prober, host: &str, ep: &ResolvedEndpoint) -> ProbeResult {
    let mut result = ProbeResult {
        ping_alive: false,
        port_state: None,
        diagnostics: Vec::new(),
    };

    if !prober.ping(ep).await {
        result.diagnostics.push(DiagnosticEntry {
            severity: Severity::Error,
            message: format!("{} is icmp unreachable", host),
        });
        return result;
    }
    result.ping_alive = true;

    let state = prober.port_state(ep).await;
    result.port_state = Some(state);
    let severity = if state == PortState::Closed {
        Severity::Error
    } else {
        Severity::Ok
    };
    result.diagnostics.push(DiagnosticEntry {
        severity,
        message: format!("{} port {}/udp is {}", host, ep.port, state),
    });
    result
}
