//! `license-plists-merger` — merge license attribution plists into one output.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]) and layer them over the config file ([`config`]).
//! 2. Load every input plist and the optional LICENSE directory ([`loader`]).
//! 3. Concatenate and sort by library name ([`merge`]).
//! 4. Write a Settings.bundle pane or a single library list ([`writer`]),
//!    printing each library name to stdout.
//! 5. Exit `0`, or `1` on any write failure (or skipped input with `--strict`).

mod cli;
mod codec;
mod config;
mod loader;
mod merge;
mod models;
mod plist;
mod writer;

use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use log::warn;

use cli::Cli;
use config::{load_config, Settings};
use loader::directory::LicenseDirectoryLoader;
use loader::file::PlistFileLoader;
use loader::{LoadOutcome, Loader};
use models::{Destination, LicenseRecord, OutputStyle};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let cwd = std::env::current_dir().context("cannot determine current directory")?;
    let config = load_config(&cwd, cli.config.as_deref())?;
    let settings = Settings::resolve(&cli, config);
    let dest = Destination::resolve(settings.output.as_deref(), settings.style, &cwd)?;

    // Load inputs
    let file_loader = PlistFileLoader::new();
    let mut primary = Vec::new();
    for input in &settings.inputs {
        primary.extend(accept(input, file_loader.load(input), settings.strict)?);
    }

    let supplemental = match &settings.other_licenses_directory {
        Some(dir) => accept(dir, LicenseDirectoryLoader::new().load(dir), settings.strict)?,
        None => Vec::new(),
    };

    let records = merge::merge(primary, supplemental)?;
    merge::warn_duplicates(&records);

    // Write output; stdout carries only library names
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match settings.style {
        OutputStyle::LicensePlist => writer::settings_bundle::write(&dest, &records, &mut out)?,
        OutputStyle::LicenseList => writer::library_list::write(&dest, &records, &mut out)?,
    }
    out.flush()?;

    if !cli.quiet {
        eprintln!(
            "  {} {} licenses ({}) → {}",
            "→".cyan(),
            records.len(),
            settings.style,
            dest.root_plist().display()
        );
    }

    Ok(())
}

fn init_logging(cli: &Cli) {
    let level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Turn a load outcome into records: skipped sources are warnings, or fatal under `--strict`.
fn accept(path: &Path, outcome: LoadOutcome, strict: bool) -> Result<Vec<LicenseRecord>> {
    if let LoadOutcome::Skipped(reason) = &outcome {
        if strict {
            bail!("cannot load {}: {}", path.display(), reason);
        }
        warn!("skipping {}: {}", path.display(), reason);
    }
    Ok(outcome.into_records())
}

#[cfg(test)]
mod tests {
    use super::*;
    use loader::SkipReason;

    #[test]
    fn test_skipped_source_is_soft_by_default() {
        let outcome = LoadOutcome::Skipped(SkipReason::UnrecognizedDialect);
        assert!(accept(Path::new("x.plist"), outcome, false).unwrap().is_empty());
    }

    #[test]
    fn test_skipped_source_is_fatal_when_strict() {
        let outcome = LoadOutcome::Skipped(SkipReason::NotADirectory);
        let err = accept(Path::new("Licenses"), outcome, true).unwrap_err();
        assert!(err.to_string().contains("Licenses"));
    }

    #[test]
    fn test_end_to_end_bundle_from_mixed_sources() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("Pods-acknowledgements.plist");
        std::fs::write(
            &input,
            r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0">
<dict>
	<key>PreferenceSpecifiers</key>
	<array>
		<dict><key>Title</key><string>zlib</string><key>FooterText</key><string>zlib license</string></dict>
		<dict><key>Title</key><string>Abc</string><key>FooterText</key><string>MIT</string></dict>
	</array>
</dict>
</plist>
"#,
        )
        .unwrap();
        let other = tmp.path().join("Licenses");
        std::fs::create_dir_all(other.join("boost")).unwrap();
        std::fs::write(other.join("boost").join("LICENSE"), "Boost").unwrap();

        let primary = accept(&input, PlistFileLoader::new().load(&input), true).unwrap();
        let supplemental =
            accept(&other, LicenseDirectoryLoader::new().load(&other), true).unwrap();
        let records = merge::merge(primary, supplemental).unwrap();

        let dest = Destination::resolve(None, OutputStyle::LicensePlist, tmp.path()).unwrap();
        let mut out = Vec::new();
        writer::settings_bundle::write(&dest, &records, &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "Abc\nboost\nzlib\n");
        assert!(tmp.path().join("Acknowledgements.plist").exists());
        assert!(tmp.path().join("Acknowledgements/boost.plist").exists());
    }
}
