//! Sources of license records.
//!
//! - [`file`] — an existing license plist in either supported dialect.
//! - [`directory`] — a directory whose subdirectories each hold a bare
//!   `LICENSE` / `LICENCE` file.
//!
//! Loaders never fail hard: anything that keeps a source from contributing is
//! reported as [`LoadOutcome::Skipped`] with the reason, and the caller decides
//! whether that is fatal (`--strict`) or just worth a warning.

use std::path::Path;

use crate::models::LicenseRecord;
use crate::plist::PlistError;

pub mod directory;
pub mod file;

/// Result of loading one source.
#[derive(Debug)]
pub enum LoadOutcome {
    /// The source was understood. The list may be empty.
    Loaded(Vec<LicenseRecord>),
    /// The source contributed nothing.
    Skipped(SkipReason),
}

/// Why a source contributed nothing.
#[derive(Debug, thiserror::Error)]
pub enum SkipReason {
    #[error("cannot read: {0}")]
    Unreadable(#[source] std::io::Error),
    #[error("not a decodable plist: {0}")]
    Undecodable(#[source] PlistError),
    #[error("neither `PreferenceSpecifiers` nor `libraries` list found")]
    UnrecognizedDialect,
    #[error("not an existing directory")]
    NotADirectory,
}

impl LoadOutcome {
    /// Records of a loaded source; empty for a skipped one.
    pub fn into_records(self) -> Vec<LicenseRecord> {
        match self {
            LoadOutcome::Loaded(records) => records,
            LoadOutcome::Skipped(_) => Vec::new(),
        }
    }
}

pub trait Loader {
    fn load(&self, path: &Path) -> LoadOutcome;
}
