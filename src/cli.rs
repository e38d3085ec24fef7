use std::path::PathBuf;

use clap::Parser;

/// Terminal dashboard for upcoming company holidays.
#[derive(Parser)]
#[command(name = "holiday-dashboard", version, about = "Upcoming company holidays")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the site URL from config.
    #[arg(long)]
    pub site_url: Option<String>,

    /// Override the holiday list name from config.
    #[arg(short, long)]
    pub list: Option<String>,

    /// Use the compact card layout.
    #[arg(long)]
    pub edit: bool,

    /// Load once, print the holidays to stdout and exit.
    #[arg(long)]
    pub print: bool,
}
