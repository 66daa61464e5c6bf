use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::RunOptions;
use crate::fetch;

/// Resolve the rule file passed to every inspector invocation.
///
/// Resolution order is deterministic:
/// 1. the expected rule file next to the working root, if present;
/// 2. a previously downloaded fallback under the tools directory;
/// 3. otherwise the default rule set is downloaded to the fallback path.
///
/// A downloaded document must parse as JSON before it is written; this is
/// a well-formedness check only, the rule semantics stay opaque here.
pub fn provision_rules(options: &RunOptions) -> Result<PathBuf> {
    let expected = options.expected_rules_path();
    if expected.is_file() {
        debug!(path = %expected.display(), "using local rule file");
        return Ok(expected);
    }

    let fallback = options.fallback_rules_path();
    if fallback.is_file() {
        debug!(path = %fallback.display(), "reusing previously downloaded rule file");
        return Ok(fallback);
    }

    if let Some(parent) = fallback.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    info!(url = %options.rules_url, "downloading default rule set");
    let bytes = fetch::fetch_bytes(&options.rules_url)?;
    serde_json::from_slice::<serde_json::Value>(&bytes)
        .with_context(|| format!("rule document from {} is not valid JSON", options.rules_url))?;
    fs::write(&fallback, &bytes)
        .with_context(|| format!("failed to write {}", fallback.display()))?;

    Ok(fallback)
}
