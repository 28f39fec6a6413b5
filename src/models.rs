use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use serde::Deserialize;

/// Control character stripped from every license body (form feed, 0x0C).
///
/// At least one vendored license embeds it, and Xcode's plist viewer refuses
/// to open a file containing it.
pub const FORM_FEED: char = '\u{0c}';

/// One library's license: the unit every loader produces and every writer consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct LicenseRecord {
    /// Name of the library the license applies to. Never empty.
    pub name: String,
    /// Raw license text, without form feeds.
    pub body: String,
}

impl LicenseRecord {
    /// Build a record, normalizing the body. Returns `None` for an empty name.
    pub fn new(name: impl Into<String>, body: impl AsRef<str>) -> Option<Self> {
        let name = name.into();
        if name.is_empty() {
            return None;
        }
        Some(Self {
            name,
            body: body.as_ref().replace(FORM_FEED, ""),
        })
    }
}

/// Layout of the generated output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
pub enum OutputStyle {
    /// Settings bundle: an index plist plus one child plist per library.
    #[default]
    #[value(name = "license-plist", alias = "LicensePlist", alias = "licensePlist")]
    #[serde(rename = "license-plist", alias = "LicensePlist", alias = "licensePlist")]
    LicensePlist,
    /// One plist holding every library under `libraries`.
    #[value(name = "license-list", alias = "LicenseList", alias = "licenseList")]
    #[serde(rename = "license-list", alias = "LicenseList", alias = "licenseList")]
    LicenseList,
}

impl OutputStyle {
    /// Base name used when no explicit output path is given.
    pub fn default_file_name(&self) -> &'static str {
        match self {
            OutputStyle::LicensePlist => "Acknowledgements",
            OutputStyle::LicenseList => "license-list",
        }
    }
}

impl std::fmt::Display for OutputStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputStyle::LicensePlist => write!(f, "license-plist"),
            OutputStyle::LicenseList => write!(f, "license-list"),
        }
    }
}

/// Where output lands: `<dir>/<name>.plist`, plus `<dir>/<name>/` for the bundle style.
#[derive(Debug, Clone, PartialEq)]
pub struct Destination {
    pub dir: PathBuf,
    pub name: String,
}

impl Destination {
    /// Resolve where to write.
    ///
    /// With an explicit `output`, a `.plist` extension is dropped to get the base
    /// name and any other last component is used as-is; the parent directory
    /// (or `cwd` for a bare name) receives the output. Without one, the style's
    /// default name is used in `cwd`.
    pub fn resolve(output: Option<&Path>, style: OutputStyle, cwd: &Path) -> Result<Self> {
        let Some(output) = output else {
            return Ok(Self {
                dir: cwd.to_path_buf(),
                name: style.default_file_name().to_string(),
            });
        };

        let leaf = if output.extension().is_some_and(|ext| ext == "plist") {
            output.file_stem()
        } else {
            output.file_name()
        };
        let Some(name) = leaf.map(|n| n.to_string_lossy().into_owned()) else {
            bail!("output path {} does not name a file", output.display());
        };

        let dir = match output.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => cwd.to_path_buf(),
        };

        Ok(Self { dir, name })
    }

    /// Path of the root plist.
    pub fn root_plist(&self) -> PathBuf {
        self.dir.join(format!("{}.plist", self.name))
    }

    /// Directory that holds per-library child plists.
    pub fn children_dir(&self) -> PathBuf {
        self.dir.join(&self.name)
    }
}
