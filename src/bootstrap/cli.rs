use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "clippin")]
#[command(about = "Clipboard history with pinning and sensitive-data rules", long_about = None)]
pub struct Cli {
    /// TOML config file (defaults to <data dir>/config.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the per-user data directory
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}
