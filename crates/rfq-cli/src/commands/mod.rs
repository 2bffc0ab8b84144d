//! Subcommand implementations.

pub mod config;
pub mod documents;
pub mod process;

use std::path::Path;

use rfq_core::RfqConfig;

/// Load the configuration selected by `--config`, falling back to the default file.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<RfqConfig> {
    Ok(RfqConfig::load(config_path.map(Path::new))?)
}
