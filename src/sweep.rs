use crate::checker::check_host;
use crate::cli::Cli;
use crate::probes::{ProberHandle, SystemProber};
use crate::record::parse_record;
use crate::types::{DiagnosticEntry, FleetSummary, HostResult, Severity};
use anyhow::{Context, Result};
use chrono::Utc;
use colored::*;
use futures::stream::{FuturesUnordered, StreamExt};
use serde_json::json;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// One pass over the discovery root: every non-hidden regular file is a
/// record source, ordered lexicographically by name. The file name is the
/// community.
fn discover_records(dir: &str) -> Result<Vec<(String, PathBuf)>> {
    let mut records = Vec::new();
    let entries =
        fs::read_dir(dir).with_context(|| format!("failed to list hosts directory {}", dir))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("failed to list hosts directory {}", dir))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        records.push((name, entry.path()));
    }
    records.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(records)
}

fn print_diagnostic(d: &DiagnosticEntry) {
    match d.severity {
        Severity::Error => println!("{}", d.message.red()),
        Severity::Warning => println!("{}", d.message.yellow()),
        Severity::Ok => println!("{}", d.message.green()),
    }
}

fn write_json_report_atomic(path: &str, hosts: &[HostResult], summary: &FleetSummary) -> Result<()> {
    let report = json!({
        "finished_at": Utc::now(),
        "hosts": hosts.iter().map(|h| json!({
            "community": h.community,
            "errors": h.errors,
            "warnings": h.warnings,
            "reachable_v4": h.reachable_v4,
            "reachable_v6": h.reachable_v6,
        })).collect::<Vec<_>>(),
        "summary": summary,
    });
    let tmp = format!("{}.tmp", path);
    let f = File::create(&tmp)?;
    let mut w = BufWriter::new(f);
    serde_json::to_writer_pretty(&mut w, &report)?;
    w.flush()?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Orchestrate one fleet sweep with the production prober.
pub async fn run(cli: Cli) -> Result<FleetSummary> {
    run_with(cli, Arc::new(SystemProber)).await
}

/// Sweep with an injectable prober. One task per record, bounded by the
/// semaphore; results are folded in completion order, so each host's
/// diagnostic block stays contiguous while blocks may interleave across
/// runs. The counters are order-independent.
pub async fn run_with(cli: Cli, prober: ProberHandle) -> Result<FleetSummary> {
    if cli.concurrency == 0 || cli.concurrency > 4096 {
        anyhow::bail!("--concurrency must be between 1 and 4096");
    }

    let records = discover_records(&cli.hosts_dir)?;
    tracing::debug!(count = records.len(), dir = %cli.hosts_dir, "discovered records");

    let sem = Arc::new(Semaphore::new(cli.concurrency));
    let mut tasks = FuturesUnordered::new();

    for (community, path) in records {
        let sem = sem.clone();
        let prober = prober.clone();
        tasks.push(tokio::spawn(async move {
            let _permit = sem.acquire_owned().await.expect("semaphore closed");
            let record = match tokio::fs::read_to_string(&path).await {
                Ok(text) => parse_record(&community, &text),
                Err(err) => {
                    let mut out = HostResult::new(&community);
                    out.push(Severity::Ok, format!("checking {}", community));
                    out.push(
                        Severity::Error,
                        format!("failed to read {}: {}", path.display(), err),
                    );
                    out.push(Severity::Ok, "");
                    return out;
                }
            };
            check_host(record, prober.as_ref()).await
        }));
    }

    let mut summary = FleetSummary::default();
    let mut hosts: Vec<HostResult> = Vec::new();

    while let Some(joined) = tasks.next().await {
        let result = joined.context("host checker task panicked")?;
        if !cli.quiet {
            for d in &result.diagnostics {
                print_diagnostic(d);
            }
        }
        summary.absorb(&result);
        hosts.push(result);
    }

    println!(
        "{}",
        format!(
            "{} ipv4 and {} ipv6 addresses are reachable",
            summary.reachable_v4, summary.reachable_v6
        )
        .bold()
    );
    println!("{}", format!("{} errors", summary.errors).bold());
    println!("{}", format!("{} warnings", summary.warnings).bold());

    if !cli.json_out.is_empty() {
        if let Err(err) = write_json_report_atomic(&cli.json_out, &hosts, &summary) {
            eprintln!("Failed to write JSON report {}: {}", &cli.json_out, err);
        }
    }

    Ok(summary)
}
