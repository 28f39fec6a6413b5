use std::path::PathBuf;

use clap::Parser;

use crate::models::OutputStyle;

#[derive(Parser, Debug)]
#[command(
    name = "license-plists-merger",
    about = "Merge license plists into a Settings.bundle pane or a single license list",
    version
)]
pub struct Cli {
    /// License plists to merge (CocoaPods acknowledgements, LicensePlist or license-list output)
    #[arg(value_name = "INPUTS")]
    pub inputs: Vec<PathBuf>,

    /// Directory whose subdirectories each hold a LICENSE / LICENCE file
    #[arg(long, value_name = "DIR")]
    pub other_licenses_directory_path: Option<PathBuf>,

    /// Output style [default: license-plist]
    #[arg(long, value_name = "STYLE")]
    pub style: Option<OutputStyle>,

    /// Output path; a `.plist` extension is stripped to form the base name
    #[arg(short, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Config file [default: ./.license-plists-merger/config.toml, fallback ~/.config/license-plists-merger/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Fail instead of skipping inputs that cannot be loaded
    #[arg(long)]
    pub strict: bool,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Errors only; no summary line
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}
