use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::cli::Cli;
use crate::models::OutputStyle;

/// Optional defaults, deserialized from `.license-plists-merger/config.toml`.
///
/// Every key mirrors a command-line option; the command line wins.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Inputs merged before any given on the command line.
    #[serde(default)]
    pub inputs: Vec<PathBuf>,
    pub other_licenses_directory: Option<PathBuf>,
    pub style: Option<OutputStyle>,
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub strict: bool,
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<base_dir>/.license-plists-merger/config.toml`
/// 3. `~/.config/license-plists-merger/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(base_dir: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = base_dir.join(".license-plists-merger").join("config.toml");
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("license-plists-merger")
            .join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("invalid config {}", path.display()))
}

/// Effective options for one run: command line layered over config.
#[derive(Debug, PartialEq)]
pub struct Settings {
    pub inputs: Vec<PathBuf>,
    pub other_licenses_directory: Option<PathBuf>,
    pub style: OutputStyle,
    pub output: Option<PathBuf>,
    pub strict: bool,
}

impl Settings {
    pub fn resolve(cli: &Cli, config: Config) -> Self {
        let mut inputs = config.inputs;
        inputs.extend(cli.inputs.iter().cloned());

        Settings {
            inputs,
            other_licenses_directory: cli
                .other_licenses_directory_path
                .clone()
                .or(config.other_licenses_directory),
            style: cli.style.or(config.style).unwrap_or_default(),
            output: cli.output.clone().or(config.output),
            strict: cli.strict || config.strict,
        }
    }
}
