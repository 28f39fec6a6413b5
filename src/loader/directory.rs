use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use super::{LoadOutcome, SkipReason};
use crate::models::LicenseRecord;

/// File stems accepted as a license file, matched case-sensitively.
const LICENSE_STEMS: [&str; 2] = ["LICENSE", "LICENCE"];

/// Loads licenses that are not covered by any generated plist, laid out as
/// `<root>/<LibraryName>/LICENSE[.ext]`.
///
/// Only immediate subdirectories of the root are considered, and only the
/// immediate contents of each subdirectory are searched.
pub struct LicenseDirectoryLoader;

impl LicenseDirectoryLoader {
    pub fn new() -> Self {
        Self
    }
}

impl super::Loader for LicenseDirectoryLoader {
    fn load(&self, path: &Path) -> LoadOutcome {
        if !path.is_dir() {
            return LoadOutcome::Skipped(SkipReason::NotADirectory);
        }

        let subdirs = match list_sorted(path) {
            Ok(entries) => entries.into_iter().filter(|p| p.is_dir()),
            Err(e) => return LoadOutcome::Skipped(SkipReason::Unreadable(e)),
        };

        let mut records = Vec::new();
        for subdir in subdirs {
            match load_library(&subdir) {
                Ok(Some(record)) => records.push(record),
                Ok(None) => debug!("{}: no LICENSE file", subdir.display()),
                Err(e) => warn!("skipping {}: {}", subdir.display(), e),
            }
        }

        LoadOutcome::Loaded(records)
    }
}

/// Directory entries in file-name order, so that scans are repeatable.
fn list_sorted(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut entries = std::fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<io::Result<Vec<_>>>()?;
    entries.sort();
    Ok(entries)
}

/// One record named after `library_dir`, or `None` if it holds no license file.
fn load_library(library_dir: &Path) -> io::Result<Option<LicenseRecord>> {
    let Some(license_path) = list_sorted(library_dir)?
        .into_iter()
        .find(|p| p.is_file() && is_license_file(p))
    else {
        return Ok(None);
    };

    let bytes = std::fs::read(&license_path)?;
    let body = String::from_utf8(bytes).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{} is not UTF-8: {}", license_path.display(), e),
        )
    })?;

    let name = library_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(LicenseRecord::new(name, body))
}

fn is_license_file(path: &Path) -> bool {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .is_some_and(|stem| LICENSE_STEMS.contains(&stem))
}
