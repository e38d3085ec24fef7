use std::path::{Path, PathBuf};
use std::time::Duration;

use color_eyre::eyre::{Result, WrapErr};
use serde::Deserialize;

use crate::cli::Cli;
use crate::holiday::DEFAULT_LIST_NAME;

pub const APP_DIR: &str = "holiday-dashboard";

/// Card layout: `Edit` is the compact rendering, `Read` the full one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    Edit,
    #[default]
    Read,
}

impl DisplayMode {
    pub fn toggle(self) -> Self {
        match self {
            DisplayMode::Edit => DisplayMode::Read,
            DisplayMode::Read => DisplayMode::Edit,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub site_url: String,
    #[serde(default = "default_list_name")]
    pub list_name: String,
    #[serde(default)]
    pub display_mode: DisplayMode,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_list_name() -> String {
    DEFAULT_LIST_NAME.to_string()
}

fn default_timeout_secs() -> u64 {
    20
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site_url: String::new(),
            list_name: default_list_name(),
            display_mode: DisplayMode::default(),
            description: None,
            access_token: None,
            request_timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Load from `path`, or the default location when none is given. A missing
    /// file at the default location yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => match config_path() {
                Some(p) => (p, false),
                None => return Ok(Self::default()),
            },
        };

        if !explicit && !path.exists() {
            tracing::info!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .wrap_err_with(|| format!("Failed to read config {}", path.display()))?;
        Self::parse(&content).wrap_err_with(|| format!("Invalid config {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(content)?;
        if config.list_name.trim().is_empty() {
            config.list_name = default_list_name();
        }
        Ok(config)
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(ref site_url) = cli.site_url {
            self.site_url = site_url.clone();
        }
        if let Some(ref list) = cli.list {
            self.list_name = list.clone();
        }
        if cli.edit {
            self.display_mode = DisplayMode::Edit;
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR))
}

fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}
