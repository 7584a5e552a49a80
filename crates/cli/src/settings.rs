//! Layered settings: defaults < user config file < --config file < environment
//!
//! # Environment Variables
//!
//! - `BIDSIFY_CONVERTER__PROGRAM`: converter executable (default: dcm2niix)
//! - `BIDSIFY_CONVERTER__TIMEOUT_SECS`: kill the converter after N seconds
//! - `BIDSIFY_LAYOUT__SCRATCH_DIR_NAME`: scratch folder name (default: temp_dcm2niix)
//! - `BIDSIFY_LOG_FORMAT`: `text` (default) or `json` for the log file
//!
//! # Example
//!
//! ```text
//! # ~/.config/bidsify/config.toml
//! log_format = "json"
//!
//! [converter]
//! program = "/opt/dcm2niix/bin/dcm2niix"
//! timeout_secs = 600
//! ```

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use bidsify_core::application::LayoutOptions;
use bidsify_infra_system::Dcm2niixOptions;

const ENV_PREFIX: &str = "BIDSIFY";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub converter: Dcm2niixOptions,
    pub layout: LayoutOptions,
    pub log_format: LogFormat,
}

/// `config.toml` in the platform config directory, e.g. `~/.config/bidsify/`
pub fn user_config_file() -> Option<PathBuf> {
    ProjectDirs::from("", "", "bidsify").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Load settings from the standard locations and the process environment
pub fn load(explicit: Option<&Path>) -> Result<Settings> {
    load_from(user_config_file().as_deref(), explicit, None)
}

/// Load settings; `env` replaces the process environment when given
pub fn load_from(
    user_file: Option<&Path>,
    explicit: Option<&Path>,
    env: Option<config::Map<String, String>>,
) -> Result<Settings> {
    let mut builder = Config::builder();

    if let Some(path) = user_file {
        builder = builder.add_source(File::from(path).required(false));
    }
    if let Some(path) = explicit {
        builder = builder.add_source(File::from(path).required(true));
    }

    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .source(env),
    );

    builder
        .build()
        .context("Failed to read settings")?
        .try_deserialize()
        .context("Invalid settings")
}
