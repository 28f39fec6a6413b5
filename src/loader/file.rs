use std::path::Path;

use log::debug;

use super::{LoadOutcome, SkipReason};
use crate::codec::{self, Dialect};
use crate::plist;

/// Loads a license plist written by CocoaPods, LicensePlist, or a previous
/// `license-list` run.
pub struct PlistFileLoader;

impl PlistFileLoader {
    pub fn new() -> Self {
        Self
    }
}

impl super::Loader for PlistFileLoader {
    fn load(&self, path: &Path) -> LoadOutcome {
        let data = match std::fs::read(path) {
            Ok(data) => data,
            Err(e) => return LoadOutcome::Skipped(SkipReason::Unreadable(e)),
        };

        let value = match plist::from_bytes(&data) {
            Ok(value) => value,
            Err(e) => return LoadOutcome::Skipped(SkipReason::Undecodable(e)),
        };

        let dialect = codec::detect(&value);
        if dialect == Dialect::Unrecognized {
            return LoadOutcome::Skipped(SkipReason::UnrecognizedDialect);
        }

        let records = codec::decode(dialect, &value);
        debug!(
            "{}: {:?}, {} licenses",
            path.display(),
            dialect,
            records.len()
        );
        LoadOutcome::Loaded(records)
    }
}
