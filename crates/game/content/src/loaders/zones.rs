//! Zone catalog loader.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};
use crate::providers::ZoneDefinition;

/// Zone catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneCatalog {
    pub zones: Vec<ZoneDefinition>,
}

/// Loader for zone catalog from RON files.
pub struct ZoneLoader;

impl ZoneLoader {
    /// Load zone catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<ZoneDefinition>> {
        let content = read_file(path)?;
        let catalog: ZoneCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse zone catalog RON: {}", e))?;

        Ok(catalog.zones)
    }
}
