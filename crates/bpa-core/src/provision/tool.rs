use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tempfile::NamedTempFile;
use tracing::{debug, info};
use zip::ZipArchive;

use crate::config::RunOptions;
use crate::fetch;

/// Ensure the inspector executable exists at its expected path.
///
/// When the executable is already present the filesystem and network are
/// left untouched. Otherwise the archive is downloaded to a temporary
/// file, unpacked into the tools directory (overwriting any partial prior
/// extraction) and the temporary archive is removed. The archive is
/// deleted on every path, including failures, via `NamedTempFile` drop.
pub fn provision_inspector(options: &RunOptions) -> Result<PathBuf> {
    let inspector = options.inspector_path();
    if inspector.is_file() {
        debug!(path = %inspector.display(), "inspector already provisioned");
        return Ok(inspector);
    }

    let tools_dir = options.tools_dir();
    fs::create_dir_all(&tools_dir)
        .with_context(|| format!("failed to create {}", tools_dir.display()))?;

    info!(url = %options.archive_url, "downloading inspector archive");
    let archive =
        NamedTempFile::new().context("failed to create temporary file for inspector archive")?;
    fetch::fetch_to_file(&options.archive_url, archive.path())?;
    unpack_archive(archive.path(), &tools_dir)?;

    if !inspector.is_file() {
        bail!(
            "inspector archive did not contain the expected executable {}",
            inspector.display()
        );
    }

    info!(path = %inspector.display(), "inspector provisioned");
    Ok(inspector)
}

/// Extract every entry of a zip archive under `dest`.
///
/// Entry names are resolved with `enclosed_name`, so entries that would
/// escape the destination abort the extraction.
fn unpack_archive(archive: &Path, dest: &Path) -> Result<()> {
    let file = fs::File::open(archive)
        .with_context(|| format!("failed to open archive {}", archive.display()))?;
    let mut zip = ZipArchive::new(file).context("failed to read inspector archive")?;

    for index in 0..zip.len() {
        let mut entry = zip
            .by_index(index)
            .context("failed to read inspector archive entry")?;
        let Some(relative) = entry.enclosed_name() else {
            bail!("archive entry {:?} escapes the destination", entry.name());
        };
        let target = dest.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("failed to create {}", target.display()))?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let mut out = fs::File::create(&target)
            .with_context(|| format!("failed to write {}", target.display()))?;
        io::copy(&mut entry, &mut out)
            .with_context(|| format!("failed to extract {}", target.display()))?;

        #[cfg(unix)]
        if let Some(mode) = entry.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&target, fs::Permissions::from_mode(mode))
                .with_context(|| format!("failed to set permissions on {}", target.display()))?;
        }
    }

    Ok(())
}
