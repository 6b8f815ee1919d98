//! Entity pool catalog loader.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};
use crate::providers::PoolDefinition;

/// Pool catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolCatalog {
    pub pools: Vec<PoolDefinition>,
}

/// Loader for entity pool catalog from RON files.
pub struct PoolLoader;

impl PoolLoader {
    /// Load pool catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<PoolDefinition>> {
        let content = read_file(path)?;
        let catalog: PoolCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse pool catalog RON: {}", e))?;

        Ok(catalog.pools)
    }
}
