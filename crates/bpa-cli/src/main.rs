use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use bpa_core::config::RunOptions;

mod args;

fn main() -> Result<()> {
    let args = args::Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let root = match args.root {
        Some(path) => path,
        None => std::env::current_dir()?,
    };
    let options = RunOptions::new(root).with_source_glob(args.source_glob);

    let summary = bpa_core::run(&options)?;

    tracing::info!(
        reports = summary.reports.len(),
        rules = %summary.rules.display(),
        "best-practice analysis passed"
    );
    Ok(())
}
