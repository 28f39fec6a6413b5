use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info};

use super::write_plist;
use crate::codec;
use crate::models::{Destination, LicenseRecord};

/// Write the Settings.bundle layout for `records`.
///
/// Order matters: every child is written, then stale children are removed,
/// and only then is the index written, so the index always describes the
/// final contents of the child directory.
pub fn write(dest: &Destination, records: &[LicenseRecord], out: &mut impl Write) -> Result<()> {
    let children_dir = dest.children_dir();
    std::fs::create_dir_all(&children_dir)
        .with_context(|| format!("failed to create {}", children_dir.display()))?;

    for record in records {
        let path = children_dir.join(format!("{}.plist", record.name));
        write_plist(&path, &codec::encode_child(record))?;
        debug!("wrote {}", path.display());
        writeln!(out, "{}", record.name)?;
    }

    for removed in sweep_orphans(&children_dir, records)? {
        info!("removed stale {}", removed.display());
    }

    write_plist(&dest.root_plist(), &codec::encode_index(&dest.name, records))?;
    Ok(())
}

/// Delete every entry of `children_dir` whose stem is not a current record name.
///
/// Returns the deleted paths.
pub fn sweep_orphans(children_dir: &Path, records: &[LicenseRecord]) -> Result<Vec<PathBuf>> {
    let current: HashSet<&str> = records.iter().map(|r| r.name.as_str()).collect();

    let mut removed = Vec::new();
    let entries = std::fs::read_dir(children_dir)
        .with_context(|| format!("failed to list {}", children_dir.display()))?;

    for entry in entries {
        let path = entry
            .with_context(|| format!("failed to list {}", children_dir.display()))?
            .path();

        let stem = path.file_stem().map(|s| s.to_string_lossy());
        if stem.as_deref().is_some_and(|stem| current.contains(stem)) {
            continue;
        }

        let result = if path.is_dir() {
            std::fs::remove_dir_all(&path)
        } else {
            std::fs::remove_file(&path)
        };
        result.with_context(|| format!("failed to remove {}", path.display()))?;
        removed.push(path);
    }

    removed.sort();
    Ok(removed)
}
