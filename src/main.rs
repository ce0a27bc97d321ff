use anyhow::Result;
use meshaudit::cli::Cli;
use meshaudit::{init_tracing, sweep};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_tracing();

    let cli = Cli::parse();
    let summary = sweep::run(cli).await?;

    // Warnings never change the exit signal.
    Ok(if summary.errors == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
