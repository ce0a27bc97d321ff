use crate::types::ResolvedEndpoint;
use std::io;
use tokio::net::lookup_host;

/// Resolve `(host, port)` into the set of datagram endpoints to probe.
///
/// System resolution reports one address per transport variant; after
/// collapsing those duplicates every remaining address is usable over UDP.
/// An empty answer comes back as an empty Vec and a resolver error as `Err`;
/// the caller turns both into a diagnostic, never an abort.
pub async fn resolve_udp(host: &str, port: u16) -> io::Result<Vec<ResolvedEndpoint>> {
    let mut endpoints: Vec<ResolvedEndpoint> = lookup_host((host, port))
        .await?
        .map(|sa| ResolvedEndpoint {
            ip: sa.ip(),
            port: sa.port(),
        })
        .collect();

    endpoints.sort_by_key(|e| (e.ip, e.port));
    endpoints.dedup();
    tracing::debug!(host, port, count = endpoints.len(), "resolved");
    Ok(endpoints)
}
