use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use thiserror::Error;
use tracing::info;

/// Inspector invocation that finished with a failing status.
///
/// Carries the offending report folder so an operator can re-run against
/// that single report.
#[derive(Debug, Error)]
#[error("best-practice analysis failed for {} (exit code {code})", report.display())]
pub struct InspectionFailed {
    /// Report folder the inspector was launched against.
    pub report: PathBuf,

    /// Exit code of the failed invocation; -1 when killed by a signal.
    pub code: i32,
}

/// Launch the inspector against one report folder and block until it
/// exits.
///
/// Invoked as `<tool> -pbipreport <report> -rules <rules> -formats
/// <format>`; exit code 0 is success, anything else is a failure.
pub fn inspect_report(tool: &Path, report: &Path, rules: &Path, format: &str) -> Result<()> {
    info!(report = %report.display(), "inspecting report");

    let status = Command::new(tool)
        .arg("-pbipreport")
        .arg(report)
        .arg("-rules")
        .arg(rules)
        .arg("-formats")
        .arg(format)
        .status()
        .with_context(|| format!("failed to launch inspector {}", tool.display()))?;

    if !status.success() {
        return Err(InspectionFailed {
            report: report.to_path_buf(),
            code: status.code().unwrap_or(-1),
        }
        .into());
    }

    Ok(())
}
