//! Game configuration loader.

use std::path::Path;

use idle_core::FormatConfig;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Top-level `config.toml` contents. Every field is optional in the file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdleConfig {
    /// Display precision for formatted numbers.
    pub format: FormatConfig,
    /// Zone entered at session start.
    pub starting_zone: Option<String>,
}

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML file containing IdleConfig
    pub fn load(path: &Path) -> LoadResult<IdleConfig> {
        let content = read_file(path)?;
        let config: IdleConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }
}
