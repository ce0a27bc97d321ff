use crate::types::{PortState, ResolvedEndpoint};
use tokio::net::UdpSocket;
use tokio::time::{timeout, Duration};

const PROBE_TIMEOUT_MS: u64 = 3000;

/// Single-shot UDP port-state probe.
///
/// Connects the socket first so an ICMP port-unreachable from the target
/// surfaces as a recv error, which is the only hard "closed" signal UDP
/// gives us. A reply datagram means open; silence within the timeout means
/// filtered (or an open service that ignores empty probes); a local socket
/// failure means unknown.
pub async fn udp_port_state(ep: &ResolvedEndpoint) -> PortState {
    let local = if ep.is_ipv6() { "[::]:0" } else { "0.0.0.0:0" };

    let sock = match UdpSocket::bind(local).await {
        Ok(s) => s,
        Err(_) => return PortState::Unknown,
    };
    if sock.connect((ep.ip, ep.port)).await.is_err() {
        return PortState::Unknown;
    }
    if sock.send(&[]).await.is_err() {
        return PortState::Closed;
    }

    let mut buf = [0u8; 2048];
    match timeout(Duration::from_millis(PROBE_TIMEOUT_MS), sock.recv(&mut buf)).await {
        Ok(Ok(_)) => PortState::Open,
        Ok(Err(_)) => PortState::Closed,
        Err(_) => PortState::Filtered,
    }
}
