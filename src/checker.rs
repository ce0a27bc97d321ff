use crate::probes::{probe_endpoint, Prober};
use crate::types::{HostRecord, HostResult, Severity};

/// Run the full probe chain for one record and fold everything into a
/// `HostResult`. Strictly sequential: the per-host diagnostic order is
/// parse diagnostics, then each address in record order, then each probe
/// stage in order. Nothing here touches state shared with other hosts.
pub async fn check_host(record: HostRecord, prober: &dyn Prober) -> HostResult {
    let mut out = HostResult::new(&record.community);
    out.push(Severity::Ok, format!("checking {}", record.community));

    for d in record.diagnostics {
        out.absorb_diag(d);
    }

    if record.addresses.is_empty() {
        out.push(Severity::Warning, "no addresses specified");
    }

    for (host, port) in &record.addresses {
        let endpoints = match prober.resolve(host, *port).await {
            Ok(eps) => eps,
            Err(_) => Vec::new(),
        };
        if endpoints.is_empty() {
            out.push(Severity::Error, format!("DNS Lookup for {} failed", host));
            continue;
        }
        for ep in &endpoints {
            let verdict = probe_endpoint(prober, host, ep).await;
            let reached = verdict.reached();
            for d in verdict.diagnostics {
                out.absorb_diag(d);
            }
            if reached {
                if ep.is_ipv6() {
                    out.reachable_v6 += 1;
                } else {
                    out.reachable_v4 += 1;
                }
            }
        }
    }

    // Blank trailer keeps this host's block visually separate in the
    // aggregated stream.
    out.push(Severity::Ok, "");
    out
}
