//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod list;
pub mod output;
pub mod process;

use std::path::Path;

use tracing::debug;

use pcard_core::PcardConfig;

/// Load configuration from `-c`, else the default file if present, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<PcardConfig> {
    if let Some(path) = config_path {
        return Ok(PcardConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Using config file {}", default_path.display());
        Ok(PcardConfig::from_file(&default_path)?)
    } else {
        Ok(PcardConfig::default())
    }
}
