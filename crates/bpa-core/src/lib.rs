pub mod config;
pub mod discover;
pub mod fabric;
pub mod fetch;
pub mod provision;
pub mod runner;

#[cfg(test)]
pub(crate) mod testutil;

use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use crate::config::RunOptions;

pub const TOOL_NAME: &str = "bpa";

/// Marker file identifying the root folder of a PBIR report definition.
pub const REPORT_MARKER: &str = "definition.pbir";

/// Output-format selector passed to every inspector invocation.
pub const OUTPUT_FORMAT: &str = "GitHub";

/// Paths resolved and reports inspected by one completed run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Provisioned inspector executable used for every invocation.
    pub inspector: PathBuf,

    /// Rule file used for every invocation.
    pub rules: PathBuf,

    /// Report folders inspected, in invocation order.
    pub reports: Vec<PathBuf>,
}

/// Run best-practice analysis over every report definition under the
/// configured source tree.
///
/// Phases run strictly in order: provision the inspector, provision the
/// rule set, discover report folders, then inspect each folder one at a
/// time. The first failure aborts the run; remaining folders are not
/// processed.
pub fn run(options: &RunOptions) -> Result<RunSummary> {
    let inspector = provision::tool::provision_inspector(options)?;
    let rules = provision::rules::provision_rules(options)?;

    let reports = discover::discover_reports(&options.root, &options.source_glob)?;
    if reports.is_empty() {
        info!("no report definitions found");
    }

    for report in &reports {
        runner::inspect_report(&inspector, report, &rules, OUTPUT_FORMAT)?;
    }

    Ok(RunSummary {
        inspector,
        rules,
        reports,
    })
}
