//! Upgrade catalog loader.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};
use crate::providers::UpgradeDefinition;

/// Upgrade catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpgradeCatalog {
    pub upgrades: Vec<UpgradeDefinition>,
}

/// Loader for upgrade catalog from RON files.
pub struct UpgradeLoader;

impl UpgradeLoader {
    /// Load upgrade catalog from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing UpgradeCatalog
    pub fn load(path: &Path) -> LoadResult<Vec<UpgradeDefinition>> {
        let content = read_file(path)?;
        let catalog: UpgradeCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse upgrade catalog RON: {}", e))?;

        Ok(catalog.upgrades)
    }
}
