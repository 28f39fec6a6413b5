//! Output writers.
//!
//! - [`settings_bundle`] — `<name>.plist` index plus a `<name>/` directory holding one
//!   child plist per library, mirrored exactly on every run.
//! - [`library_list`] — a single `<name>.plist` with a flat `libraries` list.
//!
//! Both print each library name to the supplied sink as it is written.

use std::path::Path;

use anyhow::{Context, Result};

use crate::plist::{self, Value};

pub mod library_list;
pub mod settings_bundle;

/// Serialize `value` and write it to `path`, replacing any existing file.
fn write_plist(path: &Path, value: &Value) -> Result<()> {
    let bytes = plist::to_bytes(value)
        .with_context(|| format!("failed to encode {}", path.display()))?;
    std::fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))
}
