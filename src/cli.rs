use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "meshaudit", about = "Reachability audit for mesh VPN peers (ICMP + UDP port probe)")]
pub struct Cli {
    /// Directory of peer record files (one file per peer)
    #[arg(short = 'd', long, default_value = "hosts")]
    pub hosts_dir: String,

    /// Max hosts checked in flight at once
    #[arg(short = 'c', long, default_value_t = 200)]
    pub concurrency: usize,

    /// Write the fleet report as JSON to this file
    #[arg(long, value_name = "FILE", default_value_t = String::new())]
    pub json_out: String,

    /// Suppress per-host diagnostic lines; print only the summary
    #[arg(short, long, action = ArgAction::SetTrue)]
    pub quiet: bool,
}

impl Cli {
    pub fn parse() -> Self {
        Parser::parse()
    }
}
