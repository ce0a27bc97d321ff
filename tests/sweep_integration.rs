use async_trait::async_trait;
use meshaudit::cli::Cli;
use meshaudit::probes::Prober;
use meshaudit::sweep::run_with;
use meshaudit::types::{PortState, ResolvedEndpoint};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::io;
use std::net::IpAddr;
use std::sync::Arc;
use tempfile::tempdir;

#[derive(Default)]
struct StubProber {
    addrs: HashMap<String, Vec<IpAddr>>,
    alive: HashSet<IpAddr>,
    states: HashMap<IpAddr, PortState>,
}

#[async_trait]
impl Prober for StubProber {
    async fn resolve(&self, host: &str, port: u16) -> io::Result<Vec<ResolvedEndpoint>> {
        match self.addrs.get(host) {
            Some(ips) => Ok(ips
                .iter()
                .map(|&ip| ResolvedEndpoint { ip, port })
                .collect()),
            None => Err(io::Error::new(io::ErrorKind::NotFound, "no such host")),
        }
    }

    async fn ping(&self, ep: &ResolvedEndpoint) -> bool {
        self.alive.contains(&ep.ip)
    }

    async fn port_state(&self, ep: &ResolvedEndpoint) -> PortState {
        *self.states.get(&ep.ip).unwrap_or(&PortState::Filtered)
    }
}

fn cli_for(dir: &std::path::Path) -> Cli {
    Cli {
        hosts_dir: dir.to_string_lossy().into_owned(),
        concurrency: 8,
        json_out: String::new(),
        quiet: true,
    }
}

#[tokio::test]
async fn sweep_counts_across_a_small_fleet() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("alpha"),
        "Address = 10.0.0.1 700\n-----BEGIN RSA PUBLIC KEY-----\nopaque\n-----END RSA PUBLIC KEY-----\n",
    )
    .unwrap();
    fs::write(dir.path().join("beta"), "# no addresses here\n").unwrap();
    fs::write(dir.path().join("gamma"), "Address = badhost\n").unwrap();
    // Hidden files and directories are not record sources.
    fs::write(dir.path().join(".hidden"), "Address = 10.9.9.9\n").unwrap();
    fs::create_dir(dir.path().join("subdir")).unwrap();

    let ip: IpAddr = "10.0.0.1".parse().unwrap();
    let mut stub = StubProber::default();
    stub.addrs.insert("10.0.0.1".to_string(), vec![ip]);
    stub.alive.insert(ip);
    stub.states.insert(ip, PortState::Open);

    let summary = run_with(cli_for(dir.path()), Arc::new(stub)).await.unwrap();

    assert_eq!(summary.hosts, 3);
    assert_eq!(summary.reachable_v4, 1);
    assert_eq!(summary.reachable_v6, 0);
    assert_eq!(summary.errors, 1); // badhost resolution
    assert_eq!(summary.warnings, 1); // beta has no addresses
}

#[tokio::test]
async fn zero_errors_means_success_signal() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("alpha"), "Address = 10.0.0.1\n").unwrap();

    let ip: IpAddr = "10.0.0.1".parse().unwrap();
    let mut stub = StubProber::default();
    stub.addrs.insert("10.0.0.1".to_string(), vec![ip]);
    stub.alive.insert(ip);
    stub.states.insert(ip, PortState::Open);

    let summary = run_with(cli_for(dir.path()), Arc::new(stub)).await.unwrap();
    assert_eq!(summary.errors, 0);
}

#[tokio::test]
async fn json_report_is_written_when_requested() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("alpha"), "Address = 10.0.0.1\n").unwrap();

    let ip: IpAddr = "10.0.0.1".parse().unwrap();
    let mut stub = StubProber::default();
    stub.addrs.insert("10.0.0.1".to_string(), vec![ip]);
    stub.alive.insert(ip);
    stub.states.insert(ip, PortState::Open);

    let out = dir.path().join("report.json");
    let mut cli = cli_for(dir.path());
    cli.json_out = out.to_string_lossy().into_owned();

    run_with(cli, Arc::new(stub)).await.unwrap();

    let text = fs::read_to_string(&out).unwrap();
    let report: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(report["summary"]["reachable_v4"], 1);
    assert_eq!(report["hosts"][0]["community"], "alpha");
}

#[tokio::test]
async fn missing_hosts_dir_is_the_only_fatal_error() {
    let cli = Cli {
        hosts_dir: "/definitely/not/a/real/path".to_string(),
        concurrency: 8,
        json_out: String::new(),
        quiet: true,
    };
    assert!(run_with(cli, Arc::new(StubProber::default())).await.is_err());
}

#[tokio::test]
async fn nonsense_concurrency_is_rejected() {
    let dir = tempdir().unwrap();
    let mut cli = cli_for(dir.path());
    cli.concurrency = 0;
    assert!(run_with(cli, Arc::new(StubProber::default())).await.is_err());
}
