use std::net::IpAddr;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

/// Fixed echo parameters: 4 requests, 0.2s apart, 5s per-request timeout.
const ECHO_COUNT: u64 = 4;
const ECHO_INTERVAL_S: &str = "0.2";
const ECHO_TIMEOUT_S: u64 = 5;

/// System ping helper, selecting the echo binary by address family.
/// Returns true iff the probe exits successfully. A single failed run is a
/// final verdict; no retries.
pub async fn icmp_ping(ip: IpAddr) -> bool {
    let program = if ip.is_ipv6() { "ping6" } else { "ping" };

    let mut cmd = Command::new(program);
    cmd.arg("-c")
        .arg(ECHO_COUNT.to_string())
        .arg("-i")
        .arg(ECHO_INTERVAL_S)
        .arg("-W")
        .arg(ECHO_TIMEOUT_S.to_string())
        .arg(ip.to_string());

    let fut = async {
        match cmd.output().await {
            Ok(out) => out.status.success(),
            Err(err) => {
                tracing::debug!(%ip, %err, "ping invocation failed");
                false
            }
        }
    };

    // Belt over the child's own timeouts so a wedged ping cannot hold a
    // worker slot forever.
    let budget = Duration::from_secs(ECHO_COUNT * ECHO_TIMEOUT_S + 2);
    timeout(budget, fut).await.unwrap_or(false)
}
