use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use globset::GlobBuilder;
use tracing::debug;
use walkdir::WalkDir;

use crate::REPORT_MARKER;

/// Recursively locate report folders under `root`.
///
/// The source glob is split into a literal base (joined onto the root)
/// and a glob remainder. Every file literally named `definition.pbir`
/// whose base-relative path matches the remainder resolves to its parent
/// directory, the report folder. Results are sorted so the invocation
/// order is stable across runs.
///
/// Zero matches is valid; a non-existent base also yields zero matches.
pub fn discover_reports(root: &Path, source_glob: &str) -> Result<Vec<PathBuf>> {
    let (base, pattern) = split_glob(root, source_glob);
    if !base.exists() {
        debug!(base = %base.display(), "search base does not exist; nothing to inspect");
        return Ok(Vec::new());
    }

    let marker_glob = if pattern.is_empty() {
        format!("**/{REPORT_MARKER}")
    } else {
        format!("{pattern}/**/{REPORT_MARKER}")
    };
    let matcher = GlobBuilder::new(&marker_glob)
        .literal_separator(true)
        .build()
        .with_context(|| format!("invalid source glob {source_glob:?}"))?
        .compile_matcher();

    let mut folders = Vec::new();
    for entry in WalkDir::new(&base) {
        let entry = entry.with_context(|| format!("failed to walk {}", base.display()))?;
        if !entry.file_type().is_file() || entry.file_name().to_str() != Some(REPORT_MARKER) {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(&base)
            .context("walked path lies outside the search base")?;
        if matcher.is_match(relative) {
            if let Some(folder) = entry.path().parent() {
                folders.push(folder.to_path_buf());
            }
        }
    }

    folders.sort();
    debug!(count = folders.len(), "report discovery finished");
    Ok(folders)
}

/// Split a source glob into the literal leading components (joined onto
/// the root) and the remaining glob pattern.
fn split_glob(root: &Path, source_glob: &str) -> (PathBuf, String) {
    let mut base = root.to_path_buf();
    let mut pattern: Vec<&str> = Vec::new();

    for part in source_glob.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if pattern.is_empty() && !has_glob_meta(part) {
            base.push(part);
        } else {
            pattern.push(part);
        }
    }

    (base, pattern.join("/"))
}

fn has_glob_meta(part: &str) -> bool {
    part.contains(['*', '?', '[', '{'])
}
